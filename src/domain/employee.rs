use crate::domain::money::Money;
use crate::error::{PayrollError, Result};
use serde::{Deserialize, Serialize};

/// A registered employee. `ci` (national ID) is the registry's natural key.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Employee {
    pub id: u64,
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    pub ci: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    /// `dd/mm/yyyy`, kept as entered.
    #[serde(rename = "fecha_ingreso")]
    pub hire_date: String,
    #[serde(rename = "sueldo")]
    pub salary: Money,
}

/// Input for registering an employee; the registry assigns the identifier.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct NewEmployee {
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    pub ci: String,
    #[serde(rename = "cargo")]
    pub job_title: String,
    #[serde(rename = "fecha_ingreso")]
    pub hire_date: String,
    #[serde(rename = "sueldo")]
    pub salary: Money,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<()> {
        validate_ci(&self.ci)?;
        validate_salary(self.salary)
    }

    pub fn into_employee(self, id: u64) -> Employee {
        Employee {
            id,
            full_name: self.full_name,
            ci: self.ci,
            job_title: self.job_title,
            hire_date: self.hire_date,
            salary: self.salary,
        }
    }
}

/// A replace-by-identifier update. Absent fields keep their current value.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(default)]
pub struct EmployeeUpdate {
    #[serde(rename = "nombre_completo")]
    pub full_name: Option<String>,
    pub ci: Option<String>,
    #[serde(rename = "cargo")]
    pub job_title: Option<String>,
    #[serde(rename = "fecha_ingreso")]
    pub hire_date: Option<String>,
    #[serde(rename = "sueldo")]
    pub salary: Option<Money>,
}

impl EmployeeUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ci) = &self.ci {
            validate_ci(ci)?;
        }
        if let Some(salary) = self.salary {
            validate_salary(salary)?;
        }
        Ok(())
    }
}

impl Employee {
    /// Builds the replacement record; the identifier never changes.
    pub fn apply(&self, update: EmployeeUpdate) -> Employee {
        Employee {
            id: self.id,
            full_name: update.full_name.unwrap_or_else(|| self.full_name.clone()),
            ci: update.ci.unwrap_or_else(|| self.ci.clone()),
            job_title: update.job_title.unwrap_or_else(|| self.job_title.clone()),
            hire_date: update.hire_date.unwrap_or_else(|| self.hire_date.clone()),
            salary: update.salary.unwrap_or(self.salary),
        }
    }

    /// Case-insensitive substring match on name or national ID.
    /// `term` must already be lowercase.
    pub fn matches(&self, term: &str) -> bool {
        self.full_name.to_lowercase().contains(term) || self.ci.to_lowercase().contains(term)
    }
}

fn validate_ci(ci: &str) -> Result<()> {
    if ci.trim().is_empty() {
        return Err(PayrollError::ValidationError(
            "El C.I. es obligatorio".to_string(),
        ));
    }
    Ok(())
}

fn validate_salary(salary: Money) -> Result<()> {
    if salary.is_negative() {
        return Err(PayrollError::ValidationError(
            "El sueldo no puede ser negativo".to_string(),
        ));
    }
    Ok(())
}
