use crate::domain::employee::NewEmployee;
use crate::error::{PayrollError, Result};
use std::io::Read;

/// Reads employees to register from a CSV source.
///
/// Expects the registry's own column names
/// (`nombre_completo,ci,cargo,fecha_ingreso,sueldo`); surrounding whitespace
/// is trimmed and extra columns are ignored.
pub struct EmployeeReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EmployeeReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one result per data row, so a bad row does not stop the
    /// rows after it.
    pub fn employees(self) -> impl Iterator<Item = Result<NewEmployee>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayrollError::from))
    }
}
