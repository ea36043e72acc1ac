use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

use super::manager::DatabaseError;

/// One transaction shared by every repository call of a use-case.
///
/// Dropping the unit of work without calling [`UnitOfWork::commit`] rolls the
/// transaction back, so an early `?` return never leaves partial writes.
pub struct UnitOfWork {
    tx: Transaction<'static, Postgres>,
}

impl UnitOfWork {
    pub async fn begin(pool: &PgPool) -> Result<Self, DatabaseError> {
        let tx = pool.begin().await?;
        Ok(Self { tx })
    }

    /// Connection for repository functions
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        debug!("unit of work committed");
        Ok(())
    }
}
