use crate::error::{PayrollError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LOGO_PATH: &str = "static/uploads/logo.png";
pub const DEFAULT_PREFIX: &str = "BOL";

/// Company letterhead printed on every slip.
///
/// Replaced wholesale on update; no field is validated.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct CompanyProfile {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "eslogan")]
    pub slogan: String,
    #[serde(rename = "contabilidad")]
    pub accounting_code: String,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "nit")]
    pub tax_id: String,
    #[serde(rename = "actividad")]
    pub activity: String,
    pub logo_path: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        Self {
            name: "Mi Empresa".to_string(),
            slogan: "Excelencia en Servicios".to_string(),
            accounting_code: "001-2025".to_string(),
            address: "Av. Principal #123".to_string(),
            phone: "591-2-1234567".to_string(),
            tax_id: "12345678".to_string(),
            activity: "Servicios Generales".to_string(),
            logo_path: DEFAULT_LOGO_PATH.to_string(),
        }
    }
}

/// The durable counter behind document numbers.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct DocumentSequence {
    #[serde(rename = "ultimo_numero")]
    pub last_number: u64,
    #[serde(rename = "prefijo")]
    pub prefix: String,
}

impl Default for DocumentSequence {
    fn default() -> Self {
        Self {
            last_number: 0,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl DocumentSequence {
    /// Moves the counter forward and returns the number it now points at.
    pub fn advance(&mut self) -> DocumentNumber {
        self.last_number += 1;
        DocumentNumber::new(&self.prefix, self.last_number)
    }
}

/// A document number such as `BOL-000042`.
///
/// Ordered by the counter it was drawn from, not by its text, so
/// `BOL-999999` sorts before `BOL-1000000`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash)]
pub struct DocumentNumber {
    number: u64,
    text: String,
}

impl DocumentNumber {
    pub fn new(prefix: &str, number: u64) -> Self {
        Self {
            number,
            text: format!("{prefix}-{number:06}"),
        }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for DocumentNumber {
    type Err = PayrollError;

    fn from_str(text: &str) -> Result<Self> {
        let invalid = || PayrollError::ValidationError(format!("Número de boleta inválido: {text}"));
        let (prefix, digits) = text.rsplit_once('-').ok_or_else(invalid)?;
        let number = digits.parse().map_err(|_| invalid())?;
        Ok(Self::new(prefix, number))
    }
}

impl Serialize for DocumentNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for DocumentNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Everything persisted in the company configuration file.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct CompanyConfig {
    #[serde(rename = "empresa", default)]
    pub profile: CompanyProfile,
    #[serde(rename = "boletas", default)]
    pub sequence: DocumentSequence,
}
