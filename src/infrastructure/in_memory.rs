use crate::domain::company::CompanyConfig;
use crate::domain::employee::Employee;
use crate::domain::ports::{ConfigRepository, EmployeeRepository};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A volatile configuration repository.
///
/// Clones share the same underlying document, which lets tests reopen a store
/// against "persisted" state without touching the filesystem.
#[derive(Default, Clone)]
pub struct InMemoryConfigRepository {
    config: Arc<RwLock<Option<CompanyConfig>>>,
}

impl InMemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CompanyConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(Some(config))),
        }
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigRepository {
    async fn load(&self) -> Result<Option<CompanyConfig>> {
        Ok(self.config.read().await.clone())
    }

    async fn save(&self, config: &CompanyConfig) -> Result<()> {
        *self.config.write().await = Some(config.clone());
        Ok(())
    }
}

/// A volatile employee repository; clones share state.
#[derive(Default, Clone)]
pub struct InMemoryEmployeeRepository {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn load(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn save(&self, employees: &[Employee]) -> Result<()> {
        *self.employees.write().await = employees.to_vec();
        Ok(())
    }
}
