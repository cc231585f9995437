//! Request bodies, keyed the way the web forms post them.

use crate::application::emission::EmissionOptions;
use crate::domain::company::CompanyProfile;
use crate::domain::date;
use crate::domain::slip::{BonusSlip, MonthlySlip, SettlementSlip, Slip};
use crate::error::{PayrollError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Emission overrides shared by every slip request.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct EmissionFields {
    /// `dd/mm/yyyy`; unlike slip dates this one must parse.
    pub fecha_emision: Option<String>,
    pub metodo_pago: Option<String>,
}

impl EmissionFields {
    pub fn into_options(self) -> Result<EmissionOptions> {
        let emission_date = self
            .fecha_emision
            .filter(|text| !text.trim().is_empty())
            .map(|text| date::parse_strict("fecha_emision", &text))
            .transpose()?;

        Ok(EmissionOptions {
            emission_date,
            payment_method: self.metodo_pago,
        })
    }
}

/// A slip body plus its emission fields, all at the top level of one object.
/// Missing amounts default to zero and a missing `anio` to the current year.
#[derive(Debug, Deserialize)]
pub struct SlipRequest<S> {
    #[serde(flatten)]
    pub slip: S,
    #[serde(flatten)]
    pub emission: EmissionFields,
}

pub type MonthlySlipRequest = SlipRequest<MonthlySlip>;
pub type BonusSlipRequest = SlipRequest<BonusSlip>;
pub type SettlementSlipRequest = SlipRequest<SettlementSlip>;

impl<S: Into<Slip>> SlipRequest<S> {
    pub fn into_parts(self) -> Result<(Slip, EmissionOptions)> {
        Ok((self.slip.into(), self.emission.into_options()?))
    }
}

/// Company profile form. Every field is replaced; a missing `logo_path`
/// keeps the current logo.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct CompanyProfileRequest {
    pub nombre: String,
    pub eslogan: String,
    pub contabilidad: String,
    pub direccion: String,
    pub telefono: String,
    pub nit: String,
    pub actividad: String,
    pub logo_path: Option<String>,
}

impl CompanyProfileRequest {
    pub fn into_profile(self, current_logo: String) -> CompanyProfile {
        CompanyProfile {
            name: self.nombre,
            slogan: self.eslogan,
            accounting_code: self.contabilidad,
            address: self.direccion,
            phone: self.telefono,
            tax_id: self.nit,
            activity: self.actividad,
            logo_path: self.logo_path.unwrap_or(current_logo),
        }
    }
}

/// Decodes a request body, reporting malformed input as a validation error.
pub fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| PayrollError::ValidationError(e.to_string()))
}
