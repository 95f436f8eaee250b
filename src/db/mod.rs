//! Database layer (activity store).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Activity, NewActivity};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const ACTIVITIES: &str = "activities";
}

/// Durable storage of activity records.
///
/// Append-only from the ingestion pipeline's point of view. Implementations
/// must be safe for concurrent use.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Assign an id and timestamps, write the record and return it.
    async fn save(&self, activity: NewActivity) -> Result<Activity, AppError>;

    /// All activities owned by `user_id`, in a stable order. Empty when none.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<Activity>, AppError>;

    async fn find_by_id(&self, activity_id: &str) -> Result<Option<Activity>, AppError>;
}

/// Fresh opaque activity id.
pub(crate) fn new_activity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
