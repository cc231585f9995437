use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PayrollError {
    #[error("Validation error: {0}")]
    #[diagnostic(code(boletas::validation))]
    ValidationError(String),

    #[error("Ya existe un empleado con ese C.I.: {0}")]
    #[diagnostic(code(boletas::duplicate_key))]
    DuplicateKey(String),

    #[error("{0} no encontrado")]
    #[diagnostic(code(boletas::not_found))]
    NotFound(String),

    #[error("Storage error: {0}")]
    #[diagnostic(
        code(boletas::storage),
        help("check that the data directory exists and is writable")
    )]
    StorageError(String),

    #[error("Usuario o contraseña incorrectos")]
    #[diagnostic(code(boletas::auth))]
    AuthError,

    #[error("CSV error: {0}")]
    #[diagnostic(code(boletas::csv))]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(boletas::io))]
    IoError(#[from] std::io::Error),
}

impl PayrollError {
    pub fn storage(context: &str, source: impl std::fmt::Display) -> Self {
        Self::StorageError(format!("{context}: {source}"))
    }

    /// HTTP-equivalent status used by the response envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AuthError => 401,
            Self::NotFound(_) => 404,
            _ => 400,
        }
    }
}

pub type Result<T> = std::result::Result<T, PayrollError>;
