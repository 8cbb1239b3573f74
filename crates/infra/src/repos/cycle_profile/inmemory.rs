use super::ICycleProfileRepo;
use crate::repos::shared::inmemory_repo::*;
use helsa_notify_domain::{CycleProfile, ID};

pub struct InMemoryCycleProfileRepo {
    profiles: std::sync::Mutex<Vec<CycleProfile>>,
}

impl InMemoryCycleProfileRepo {
    pub fn new() -> Self {
        Self {
            profiles: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ICycleProfileRepo for InMemoryCycleProfileRepo {
    async fn insert(&self, profile: &CycleProfile) -> anyhow::Result<()> {
        insert(profile, &self.profiles);
        Ok(())
    }

    async fn save(&self, profile: &CycleProfile) -> anyhow::Result<()> {
        save(profile, &self.profiles);
        Ok(())
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Option<CycleProfile> {
        find_by(&self.profiles, |profile: &CycleProfile| {
            profile.owner_id == *owner_id
        })
        .into_iter()
        .next()
    }
}
