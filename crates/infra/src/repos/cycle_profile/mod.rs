mod inmemory;
mod postgres;

pub use inmemory::InMemoryCycleProfileRepo;
pub use postgres::PostgresCycleProfileRepo;

use helsa_notify_domain::{CycleProfile, ID};

#[async_trait::async_trait]
pub trait ICycleProfileRepo: Send + Sync {
    async fn insert(&self, profile: &CycleProfile) -> anyhow::Result<()>;
    async fn save(&self, profile: &CycleProfile) -> anyhow::Result<()>;
    /// There is at most one profile per owner
    async fn find_by_owner(&self, owner_id: &ID) -> Option<CycleProfile>;
}
