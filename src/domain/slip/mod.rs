//! The three payroll documents and their derived values.
//!
//! Slips are transient value objects: built per request, numbered once, handed
//! to a renderer and dropped. Every derived value is a pure method over the
//! slip's own fields.

pub mod bonus;
pub mod monthly;
pub mod settlement;

use crate::domain::company::DocumentNumber;
use crate::domain::date;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use bonus::BonusSlip;
pub use monthly::MonthlySlip;
pub use settlement::{ServiceTime, SettlementSlip};

pub const DEFAULT_PAYMENT_METHOD: &str = "EFECTIVO";

pub(crate) fn current_year() -> i32 {
    Local::now().year()
}

/// Accepts `anio` as a JSON number or as numeric text, the way form posts
/// send it.
pub(crate) mod year {
    use serde::Deserializer;
    use serde::de::{self, Visitor};
    use std::fmt;

    struct YearVisitor;

    impl Visitor<'_> for YearVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a year as a number or numeric string")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i32, E> {
            i32::try_from(value).map_err(|_| E::custom(format!("year out of range: {value}")))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i32, E> {
            i32::try_from(value).map_err(|_| E::custom(format!("year out of range: {value}")))
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<i32, E> {
            value
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid year: '{value}'")))
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        deserializer.deserialize_any(YearVisitor)
    }
}

/// Who the slip is for.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct EmployeeIdentity {
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    pub ci: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
}

/// Metadata attached when a slip is issued.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Emission {
    #[serde(rename = "numero_boleta")]
    pub document_number: DocumentNumber,
    #[serde(rename = "fecha_emision", with = "date::dmy")]
    pub emission_date: NaiveDate,
    #[serde(rename = "metodo_pago")]
    pub payment_method: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SlipKind {
    Monthly,
    Bonus,
    Settlement,
}

impl SlipKind {
    /// Label used in artifact names.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Mensual",
            Self::Bonus => "Aguinaldo",
            Self::Settlement => "Liquidacion",
        }
    }
}

impl fmt::Display for SlipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Slip {
    Monthly(MonthlySlip),
    Bonus(BonusSlip),
    Settlement(SettlementSlip),
}

impl Slip {
    pub fn kind(&self) -> SlipKind {
        match self {
            Self::Monthly(_) => SlipKind::Monthly,
            Self::Bonus(_) => SlipKind::Bonus,
            Self::Settlement(_) => SlipKind::Settlement,
        }
    }

    pub fn identity(&self) -> &EmployeeIdentity {
        match self {
            Self::Monthly(slip) => &slip.identity,
            Self::Bonus(slip) => &slip.identity,
            Self::Settlement(slip) => &slip.identity,
        }
    }
}

impl From<MonthlySlip> for Slip {
    fn from(slip: MonthlySlip) -> Self {
        Self::Monthly(slip)
    }
}

impl From<BonusSlip> for Slip {
    fn from(slip: BonusSlip) -> Self {
        Self::Bonus(slip)
    }
}

impl From<SettlementSlip> for Slip {
    fn from(slip: SettlementSlip) -> Self {
        Self::Settlement(slip)
    }
}

/// A slip together with its emission metadata, as handed to a renderer.
#[derive(Debug, PartialEq, Clone)]
pub struct IssuedSlip {
    pub slip: Slip,
    pub emission: Emission,
}

impl IssuedSlip {
    /// `{number}_{kind}_{name}`, without extension. Anything in the name
    /// other than letters, digits, `-` and `.` becomes `_`, so the stem is
    /// always a single file name.
    pub fn artifact_stem(&self) -> String {
        let name: String = self
            .slip
            .identity()
            .full_name
            .chars()
            .map(|c| match c {
                c if c.is_alphanumeric() => c,
                '-' | '.' => c,
                _ => '_',
            })
            .collect();
        format!(
            "{}_{}_{}",
            self.emission.document_number,
            self.slip.kind().label(),
            name
        )
    }
}
