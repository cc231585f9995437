use super::artifacts::ArtifactDirectory;
use crate::domain::company::CompanyProfile;
use crate::domain::money::Money;
use crate::domain::ports::SlipRenderer;
use crate::domain::slip::{
    BonusSlip, Emission, IssuedSlip, MonthlySlip, ServiceTime, SettlementSlip, Slip,
};
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Writes each issued slip as a self-contained JSON statement: company
/// letterhead, every input field, the derived totals and the emission
/// metadata.
#[derive(Debug, Clone)]
pub struct JsonSlipRenderer {
    artifacts: ArtifactDirectory,
}

impl JsonSlipRenderer {
    pub fn new(artifacts: ArtifactDirectory) -> Self {
        Self { artifacts }
    }
}

#[derive(Serialize)]
struct Statement<'a, B: Serialize> {
    #[serde(rename = "tipo")]
    kind: &'static str,
    #[serde(rename = "empresa")]
    company: &'a CompanyProfile,
    #[serde(flatten)]
    body: B,
    #[serde(flatten)]
    emission: &'a Emission,
}

#[derive(Serialize)]
struct MonthlyBody<'a> {
    #[serde(flatten)]
    slip: &'a MonthlySlip,
    total_ingresos: Money,
    total_egresos: Money,
    liquido_pagable: Money,
}

#[derive(Serialize)]
struct BonusBody<'a> {
    #[serde(flatten)]
    slip: &'a BonusSlip,
    liquido_pagable: Money,
    dias_trabajados: i64,
    #[serde(with = "rust_decimal::serde::float")]
    meses_trabajados: Decimal,
}

#[derive(Serialize)]
struct SettlementBody<'a> {
    #[serde(flatten)]
    slip: &'a SettlementSlip,
    tiempo_servicio: ServiceTime,
    total_beneficios: Money,
    total_deducciones: Money,
    liquido_pagable: Money,
}

fn statement_json(issued: &IssuedSlip, company: &CompanyProfile) -> serde_json::Result<Vec<u8>> {
    let kind = issued.slip.kind().label();
    let emission = &issued.emission;
    match &issued.slip {
        Slip::Monthly(slip) => serde_json::to_vec_pretty(&Statement {
            kind,
            company,
            emission,
            body: MonthlyBody {
                slip,
                total_ingresos: slip.total_income(),
                total_egresos: slip.total_deductions(),
                liquido_pagable: slip.net_payable(),
            },
        }),
        Slip::Bonus(slip) => serde_json::to_vec_pretty(&Statement {
            kind,
            company,
            emission,
            body: BonusBody {
                slip,
                liquido_pagable: slip.net_payable(),
                dias_trabajados: slip.days_worked(),
                meses_trabajados: slip.months_worked(),
            },
        }),
        Slip::Settlement(slip) => serde_json::to_vec_pretty(&Statement {
            kind,
            company,
            emission,
            body: SettlementBody {
                slip,
                tiempo_servicio: slip.service_time(),
                total_beneficios: slip.total_benefits(),
                total_deducciones: slip.total_deductions(),
                liquido_pagable: slip.net_payable(),
            },
        }),
    }
}

#[async_trait]
impl SlipRenderer for JsonSlipRenderer {
    async fn render(&self, issued: &IssuedSlip, company: &CompanyProfile) -> Result<PathBuf> {
        let bytes = statement_json(issued, company)
            .map_err(|e| PayrollError::storage("rendering statement", e))?;

        self.artifacts.ensure().await?;
        let path = self.artifacts.path_for(&issued.artifact_stem(), "json");
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PayrollError::storage(&format!("writing {}", path.display()), e))?;

        info!(
            document = %issued.emission.document_number,
            kind = %issued.slip.kind(),
            path = %path.display(),
            "statement rendered"
        );
        Ok(path)
    }
}
