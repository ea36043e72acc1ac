// Handlers by security tier:
// public (no auth, `/`, `/health`, `/auth/*`) and protected (Bearer JWT, `/api/*`).
// Staff-only operations check the role inside the handler.

pub mod protected;
pub mod public;
