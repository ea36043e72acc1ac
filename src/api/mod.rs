pub mod extract;
pub mod response;

pub use extract::{ResourceId, ValidJson, ValidQuery};
pub use response::{ApiResponse, ApiResult};
