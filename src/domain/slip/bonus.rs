use super::{EmployeeIdentity, current_year};
use crate::domain::date;
use crate::domain::money::Money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Year-end bonus (aguinaldo) slip.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct BonusSlip {
    #[serde(flatten)]
    pub identity: EmployeeIdentity,
    #[serde(rename = "anio", deserialize_with = "super::year::deserialize")]
    pub year: i32,
    /// Start of the period being paid, `dd/mm/yyyy`.
    #[serde(rename = "fecha_inicio")]
    pub period_start: String,
    #[serde(rename = "fecha_fin")]
    pub period_end: String,
    #[serde(rename = "fecha_ingreso")]
    pub hire_date: String,
    #[serde(rename = "promedio_ultimos_3_pagos")]
    pub average_last_three: Money,
    #[serde(rename = "otros")]
    pub other: Money,
}

impl Default for BonusSlip {
    fn default() -> Self {
        Self::for_year(current_year())
    }
}

impl BonusSlip {
    pub fn for_year(year: i32) -> Self {
        Self {
            identity: EmployeeIdentity::default(),
            year,
            period_start: String::new(),
            period_end: String::new(),
            hire_date: String::new(),
            average_last_three: Money::ZERO,
            other: Money::ZERO,
        }
    }

    pub fn net_payable(&self) -> Money {
        self.average_last_three + self.other
    }

    /// Inclusive day count of the period; 0 if either date is missing or
    /// malformed. An end before the start yields a negative count.
    pub fn days_worked(&self) -> i64 {
        match (
            date::parse_lenient(&self.period_start),
            date::parse_lenient(&self.period_end),
        ) {
            (Some(start), Some(end)) => (end - start).num_days() + 1,
            _ => 0,
        }
    }

    /// `days_worked / 30`, rounded to one decimal.
    pub fn months_worked(&self) -> Decimal {
        (Decimal::from(self.days_worked()) / dec!(30)).round_dp(1)
    }
}
