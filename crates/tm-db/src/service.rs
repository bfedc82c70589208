//! Service layer wrapping the database handle.
//!
//! `TmService` is what the HTTP layer holds. All repo methods are implemented
//! as `impl TmService` blocks under `repos/`.

use tokio::sync::{Mutex, MutexGuard};

use crate::TmDb;
use crate::error::DatabaseError;

/// Orchestrates database access on the shared connection.
///
/// Every public repo method, read or write, holds the gate for its whole
/// duration. Multi-statement mutations follow this protocol:
/// 1. Acquire the gate
/// 2. Begin transaction
/// 3. Verify referenced rows exist
/// 4. Execute SQL
/// 5. Commit, or roll back on the first error
///
/// A statement issued on the shared connection while another request holds
/// an open transaction would otherwise run inside that transaction: a write
/// would be committed or rolled back with it, a read would see its
/// uncommitted rows. Methods that compose other lookups do so through
/// connection-level helpers, never by calling a gated method while holding
/// the gate.
pub struct TmService {
    db: TmDb,
    gate: Mutex<()>,
}

impl TmService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = TmDb::open_local(db_path).await?;
        Ok(Self::from_db(db))
    }

    /// Create from an existing `TmDb`.
    #[must_use]
    pub fn from_db(db: TmDb) -> Self {
        Self {
            db,
            gate: Mutex::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &TmDb {
        &self.db
    }

    /// Serialize access to the shared connection. Not reentrant.
    pub(crate) async fn gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}
