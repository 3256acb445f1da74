use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }
}

/// Where a site is read from and written to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Source tree mirrored into the output
    pub prototype: PathBuf,
    /// Output tree, cleared on every build
    pub output: PathBuf,
    /// Directory inside the prototype holding pages and templates; never copied
    pub reserved: String,
    /// Page sources, relative to the reserved directory
    pub pages: PathBuf,
    /// Templates, relative to the reserved directory
    pub templates: PathBuf,
    /// File name the table of contents is written to inside the templates directory
    pub table_of_contents: String,
    /// Extension given to generated pages
    pub extension: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            prototype: PathBuf::from("Prototype"),
            output: PathBuf::from("Site"),
            reserved: "_prototype".to_string(),
            pages: PathBuf::from("pages"),
            templates: PathBuf::from("templates"),
            table_of_contents: "table_of_contents.html".to_string(),
            extension: "html".to_string(),
        }
    }
}

impl SiteConfig {
    pub fn reserved_dir(&self) -> PathBuf {
        self.prototype.join(&self.reserved)
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.reserved_dir().join(&self.pages)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.reserved_dir().join(&self.templates)
    }

    pub fn table_of_contents_path(&self) -> PathBuf {
        self.templates_dir().join(&self.table_of_contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let site = SiteConfig::default();
        assert_eq!(site.pages_dir(), PathBuf::from("Prototype/_prototype/pages"));
        assert_eq!(
            site.table_of_contents_path(),
            PathBuf::from("Prototype/_prototype/templates/table_of_contents.html")
        );
    }

    #[test]
    fn test_read_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quire.toml");
        std::fs::write(&path, "[site]\noutput = \"public\"\nreserved = \"_src\"\n").unwrap();

        let config = Config::read(&path).unwrap();
        assert_eq!(config.site.output, PathBuf::from("public"));
        assert_eq!(config.site.reserved, "_src");
        assert_eq!(config.site.prototype, PathBuf::from("Prototype"));
        assert_eq!(config.site.extension, "html");
    }

    #[test]
    fn test_read_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quire.toml");
        std::fs::write(&path, "[site\n").unwrap();

        assert!(matches!(Config::read(&path), Err(ConfigError::Parsing(_))));
    }
}
