use crate::domain::company::CompanyConfig;
use crate::domain::employee::Employee;
use crate::domain::ports::{ConfigRepository, EmployeeRepository};
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Company configuration kept in a single pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileConfigRepository {
    path: PathBuf,
}

impl JsonFileConfigRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigRepository for JsonFileConfigRepository {
    async fn load(&self) -> Result<Option<CompanyConfig>> {
        read_json(&self.path).await
    }

    async fn save(&self, config: &CompanyConfig) -> Result<()> {
        write_json(&self.path, config).await
    }
}

/// Employee registry kept as a JSON array, rewritten in full on every save.
#[derive(Debug, Clone)]
pub struct JsonFileEmployeeRepository {
    path: PathBuf,
}

impl JsonFileEmployeeRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EmployeeRepository for JsonFileEmployeeRepository {
    async fn load(&self) -> Result<Vec<Employee>> {
        Ok(read_json(&self.path).await?.unwrap_or_default())
    }

    async fn save(&self, employees: &[Employee]) -> Result<()> {
        write_json(&self.path, employees).await
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no persisted file, starting empty");
            return Ok(None);
        }
        Err(e) => return Err(PayrollError::storage(&format!("reading {}", path.display()), e)),
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| PayrollError::storage(&format!("parsing {}", path.display()), e))
}

/// Writes to a sibling temp file and renames it over the target, so readers
/// never observe a half-written document.
async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let context = format!("writing {}", path.display());

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PayrollError::storage(&context, e))?;
    }

    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| PayrollError::storage(&context, e))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, &buffer)
        .await
        .map_err(|e| PayrollError::storage(&context, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| PayrollError::storage(&context, e))?;

    debug!(path = %path.display(), bytes = buffer.len(), "persisted");
    Ok(())
}
