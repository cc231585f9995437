use crate::error::{PayrollError, Result};
use std::path::{Component, Path, PathBuf};

/// The directory generated documents are written to and downloaded from.
#[derive(Debug, Clone)]
pub struct ArtifactDirectory {
    root: PathBuf,
}

impl ArtifactDirectory {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| PayrollError::storage(&format!("creating {}", self.root.display()), e))
    }

    pub fn path_for(&self, stem: &str, extension: &str) -> PathBuf {
        self.root.join(format!("{stem}.{extension}"))
    }

    /// Resolves a bare file name inside the directory.
    ///
    /// Names with separators or parent references are rejected so a download
    /// can never reach outside the output directory.
    pub async fn locate(&self, filename: &str) -> Result<PathBuf> {
        let mut components = Path::new(filename).components();
        let is_bare_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_bare_name {
            return Err(PayrollError::ValidationError(format!(
                "Nombre de archivo inválido: {filename}"
            )));
        }

        let path = self.root.join(filename);
        match tokio::fs::try_exists(&path).await {
            Ok(true) => Ok(path),
            Ok(false) => Err(PayrollError::NotFound("Archivo".to_string())),
            Err(e) => Err(PayrollError::IoError(e)),
        }
    }
}
