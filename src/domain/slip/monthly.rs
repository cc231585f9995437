use super::{EmployeeIdentity, current_year};
use crate::domain::money::Money;
use serde::{Deserialize, Serialize};

/// Monthly pay slip: four income lines, four deduction lines.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct MonthlySlip {
    #[serde(flatten)]
    pub identity: EmployeeIdentity,
    #[serde(rename = "mes_pago")]
    pub month: String,
    #[serde(rename = "anio", deserialize_with = "super::year::deserialize")]
    pub year: i32,
    /// Free text such as `01/01/2025 al 31/01/2025`.
    #[serde(rename = "rango_fechas")]
    pub date_range: String,

    #[serde(rename = "haber_basico")]
    pub base_pay: Money,
    #[serde(rename = "horas_extra")]
    pub overtime: Money,
    #[serde(rename = "bono_antiguedad")]
    pub seniority_bonus: Money,
    #[serde(rename = "otros_ingresos")]
    pub other_income: Money,

    #[serde(rename = "faltas")]
    pub absences: Money,
    #[serde(rename = "retrasos")]
    pub tardiness: Money,
    #[serde(rename = "reposiciones")]
    pub makeups: Money,
    #[serde(rename = "otros_egresos")]
    pub other_deductions: Money,
}

impl Default for MonthlySlip {
    /// An empty slip for the current year.
    fn default() -> Self {
        Self::for_year(current_year())
    }
}

impl MonthlySlip {
    /// An empty slip with every amount at zero.
    pub fn for_year(year: i32) -> Self {
        Self {
            identity: EmployeeIdentity::default(),
            month: String::new(),
            year,
            date_range: String::new(),
            base_pay: Money::ZERO,
            overtime: Money::ZERO,
            seniority_bonus: Money::ZERO,
            other_income: Money::ZERO,
            absences: Money::ZERO,
            tardiness: Money::ZERO,
            makeups: Money::ZERO,
            other_deductions: Money::ZERO,
        }
    }

    pub fn total_income(&self) -> Money {
        self.base_pay + self.overtime + self.seniority_bonus + self.other_income
    }

    pub fn total_deductions(&self) -> Money {
        self.absences + self.tardiness + self.makeups + self.other_deductions
    }

    pub fn net_payable(&self) -> Money {
        self.total_income() - self.total_deductions()
    }
}
