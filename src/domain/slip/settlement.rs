use super::EmployeeIdentity;
use crate::domain::date;
use crate::domain::money::Money;
use serde::{Deserialize, Serialize};

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

/// Severance settlement (liquidación) slip.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct SettlementSlip {
    #[serde(flatten)]
    pub identity: EmployeeIdentity,
    #[serde(rename = "domicilio_trabajador")]
    pub address: String,
    #[serde(rename = "fecha_ingreso")]
    pub hire_date: String,
    #[serde(rename = "fecha_retiro")]
    pub termination_date: String,

    #[serde(rename = "ultimo_sueldo")]
    pub last_salary: Money,
    #[serde(rename = "promedio_ultimos_3_sueldos")]
    pub average_last_three: Money,

    #[serde(rename = "indemnizacion")]
    pub indemnity: Money,
    #[serde(rename = "aguinaldo")]
    pub bonus: Money,
    #[serde(rename = "vacaciones")]
    pub vacation: Money,
    #[serde(rename = "otros_beneficios")]
    pub other_benefits: Money,

    #[serde(rename = "anticipos")]
    pub advances: Money,
    #[serde(rename = "prestamos")]
    pub loans: Money,
    #[serde(rename = "otras_deducciones")]
    pub other_deductions: Money,
}

/// Length of service split into 365-day years and 30-day months.
///
/// This is an approximation, not a calendar difference: leap days and month
/// lengths are ignored.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct ServiceTime {
    #[serde(rename = "anios")]
    pub years: i64,
    #[serde(rename = "meses")]
    pub months: i64,
    #[serde(rename = "dias")]
    pub days: i64,
    #[serde(rename = "total_dias")]
    pub total_days: i64,
}

impl ServiceTime {
    /// Floor division throughout, so a negative span still decomposes into
    /// non-negative months and days.
    pub fn from_days(total_days: i64) -> Self {
        let remaining = total_days.rem_euclid(DAYS_PER_YEAR);
        Self {
            years: total_days.div_euclid(DAYS_PER_YEAR),
            months: remaining / DAYS_PER_MONTH,
            days: remaining % DAYS_PER_MONTH,
            total_days,
        }
    }
}

impl Default for SettlementSlip {
    fn default() -> Self {
        Self::empty()
    }
}

impl SettlementSlip {
    pub fn empty() -> Self {
        Self {
            identity: EmployeeIdentity::default(),
            address: String::new(),
            hire_date: String::new(),
            termination_date: String::new(),
            last_salary: Money::ZERO,
            average_last_three: Money::ZERO,
            indemnity: Money::ZERO,
            bonus: Money::ZERO,
            vacation: Money::ZERO,
            other_benefits: Money::ZERO,
            advances: Money::ZERO,
            loans: Money::ZERO,
            other_deductions: Money::ZERO,
        }
    }

    pub fn total_benefits(&self) -> Money {
        self.indemnity + self.bonus + self.vacation + self.other_benefits
    }

    pub fn total_deductions(&self) -> Money {
        self.advances + self.loans + self.other_deductions
    }

    /// May be negative when deductions exceed benefits.
    pub fn net_payable(&self) -> Money {
        self.total_benefits() - self.total_deductions()
    }

    /// All zeros when either date is missing or malformed.
    pub fn service_time(&self) -> ServiceTime {
        match (
            date::parse_lenient(&self.hire_date),
            date::parse_lenient(&self.termination_date),
        ) {
            (Some(hired), Some(terminated)) => {
                ServiceTime::from_days((terminated - hired).num_days())
            }
            _ => ServiceTime::default(),
        }
    }
}
