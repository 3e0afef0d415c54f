//! In-memory rule store implementing the configuration and profile ports.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use dashmap::DashMap;

use limits_types::{
    ConfigurationId, ConfigurationSet, LimitConfiguration, LimitConfigurationRepository,
    LimitProfile, LimitProfileRepository, ProfileId, RepoError,
};

/// Rule store shared by clones.
///
/// Configurations are kept in insertion order, which is the order the
/// resolver uses to break priority ties.
#[derive(Clone, Default)]
pub struct InMemoryLimitStore {
    profiles: Arc<DashMap<ProfileId, LimitProfile>>,
    configurations: Arc<RwLock<Vec<LimitConfiguration>>>,
}

impl InMemoryLimitStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile after validating it.
    pub fn upsert_profile(&self, profile: LimitProfile) -> Result<(), RepoError> {
        profile.validate()?;
        self.profiles.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Adds a configuration. Ids must be unique.
    pub fn add_configuration(&self, configuration: LimitConfiguration) -> Result<(), RepoError> {
        let mut configurations = self.write()?;
        if configurations.iter().any(|c| c.id == configuration.id) {
            return Err(RepoError::Conflict(format!(
                "Limit configuration {} already exists",
                configuration.id
            )));
        }
        configurations.push(configuration);
        Ok(())
    }

    /// Removes a configuration from the active set.
    pub fn deactivate_configuration(&self, id: &ConfigurationId) -> Result<bool, RepoError> {
        let mut configurations = self.write()?;
        let before = configurations.len();
        configurations.retain(|c| &c.id != id);
        Ok(configurations.len() != before)
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.len()
    }

    pub fn configuration_count(&self) -> Result<usize, RepoError> {
        Ok(self.read()?.len())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, Vec<LimitConfiguration>>, RepoError> {
        self.configurations
            .read()
            .map_err(|_| RepoError::Storage("limit configuration lock poisoned".into()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, Vec<LimitConfiguration>>, RepoError> {
        self.configurations
            .write()
            .map_err(|_| RepoError::Storage("limit configuration lock poisoned".into()))
    }
}

#[async_trait]
impl LimitConfigurationRepository for InMemoryLimitStore {
    async fn get_all_active_configurations(&self) -> Result<ConfigurationSet, RepoError> {
        let configurations = self.read()?.clone();
        ConfigurationSet::from_configurations(configurations).map_err(RepoError::Domain)
    }
}

#[async_trait]
impl LimitProfileRepository for InMemoryLimitStore {
    async fn get_profile(&self, id: &ProfileId) -> Result<Option<LimitProfile>, RepoError> {
        Ok(self.profiles.get(id).map(|entry| entry.value().clone()))
    }
}

