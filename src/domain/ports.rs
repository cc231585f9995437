use super::company::{CompanyConfig, CompanyProfile};
use super::employee::Employee;
use super::slip::IssuedSlip;
use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Durable home of the company configuration document.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// `None` when nothing has been persisted yet.
    async fn load(&self) -> Result<Option<CompanyConfig>>;
    async fn save(&self, config: &CompanyConfig) -> Result<()>;
}

/// Durable home of the employee list. The whole list is rewritten on save.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<Employee>>;
    async fn save(&self, employees: &[Employee]) -> Result<()>;
}

/// Turns an issued slip into an artifact and returns where it was written.
#[async_trait]
pub trait SlipRenderer: Send + Sync {
    async fn render(&self, slip: &IssuedSlip, company: &CompanyProfile) -> Result<PathBuf>;
}

pub type ConfigRepositoryBox = Box<dyn ConfigRepository>;
pub type EmployeeRepositoryBox = Box<dyn EmployeeRepository>;
pub type SlipRendererBox = Box<dyn SlipRenderer>;
