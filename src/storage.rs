use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSON or TOML document on disk
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn exists(&self) -> bool {
        self.file_path.exists()
    }

    pub fn load_json<T: DeserializeOwned>(&self) -> Result<T> {
        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let data = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON in {}", self.file_path.display()))?;
        Ok(data)
    }

    /// Load a JSON document, or the default value when the file is missing
    pub fn load_json_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        if !self.exists() {
            return Ok(T::default());
        }
        self.load_json()
    }

    /// Load a TOML document, or the default value when the file is missing
    pub fn load_toml_or_default<T: DeserializeOwned + Default>(&self) -> Result<T> {
        if !self.exists() {
            return Ok(T::default());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let data = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML in {}", self.file_path.display()))?;
        Ok(data)
    }

    /// Write pretty JSON, creating parent directories as needed
    pub fn save_json<T: Serialize + ?Sized>(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(data)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;
        Ok(())
    }
}
