use crate::application::config::CompanyConfigStore;
use crate::application::emission::DocumentEmitter;
use crate::application::registry::EmployeeRegistry;
use crate::error::Result;
use crate::infrastructure::artifacts::ArtifactDirectory;
use crate::infrastructure::json_file::{JsonFileConfigRepository, JsonFileEmployeeRepository};
use crate::infrastructure::json_renderer::JsonSlipRenderer;
use crate::settings::Settings;
use std::sync::Arc;
use tracing::debug;

/// The application services wired to their file-backed adapters.
pub struct Services {
    pub config: Arc<CompanyConfigStore>,
    pub registry: EmployeeRegistry,
    pub emitter: DocumentEmitter,
    pub artifacts: ArtifactDirectory,
}

impl Services {
    pub async fn open(settings: &Settings) -> Result<Self> {
        debug!(
            data_dir = %settings.data_dir.display(),
            output_dir = %settings.output_dir.display(),
            "opening services"
        );

        let config = Arc::new(
            CompanyConfigStore::open(Box::new(JsonFileConfigRepository::new(
                settings.config_file(),
            )))
            .await?,
        );
        let registry = EmployeeRegistry::open(Box::new(JsonFileEmployeeRepository::new(
            settings.employees_file(),
        )))
        .await?;

        let artifacts = ArtifactDirectory::new(&settings.output_dir);
        let emitter = DocumentEmitter::new(
            Arc::clone(&config),
            Box::new(JsonSlipRenderer::new(artifacts.clone())),
        );

        Ok(Self {
            config,
            registry,
            emitter,
            artifacts,
        })
    }
}
