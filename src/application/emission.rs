use super::config::CompanyConfigStore;
use crate::domain::company::DocumentNumber;
use crate::domain::ports::SlipRendererBox;
use crate::domain::slip::{DEFAULT_PAYMENT_METHOD, Emission, IssuedSlip, Slip};
use crate::error::Result;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Caller overrides for the emission metadata.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmissionOptions {
    /// Defaults to today.
    pub emission_date: Option<NaiveDate>,
    /// Defaults to `EFECTIVO` when absent. An explicit empty string is kept.
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedDocument {
    pub document_number: DocumentNumber,
    pub artifact: PathBuf,
}

/// Numbers a slip and hands it to the renderer.
///
/// The document number is drawn before rendering. If rendering fails the
/// number stays consumed; the sequence has gaps, never duplicates.
pub struct DocumentEmitter {
    config: Arc<CompanyConfigStore>,
    renderer: SlipRendererBox,
}

impl DocumentEmitter {
    pub fn new(config: Arc<CompanyConfigStore>, renderer: SlipRendererBox) -> Self {
        Self { config, renderer }
    }

    pub async fn emit(&self, slip: Slip, options: EmissionOptions) -> Result<IssuedDocument> {
        let document_number = self.config.next_document_number().await?;

        let emission = Emission {
            document_number: document_number.clone(),
            emission_date: options
                .emission_date
                .unwrap_or_else(|| Local::now().date_naive()),
            payment_method: options
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        };
        let issued = IssuedSlip { slip, emission };
        let company = self.config.profile().await;

        let artifact = match self.renderer.render(&issued, &company).await {
            Ok(artifact) => artifact,
            Err(e) => {
                warn!(document = %document_number, error = %e, "rendering failed, document number consumed");
                return Err(e);
            }
        };

        info!(
            document = %document_number,
            kind = %issued.slip.kind(),
            employee = %issued.slip.identity().full_name,
            "slip issued"
        );
        Ok(IssuedDocument {
            document_number,
            artifact,
        })
    }
}
