use anyhow::{Context, Result};
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment};
use quire_core::config::{Config, SiteConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "./quire.toml";

/// Site layout after layering quire.toml, `QUIRE_*` variables and
/// command-line flags over the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuireConfig {
    pub site: SiteConfig,
}

fn arg<'a>(args: &'a ArgMatches, id: &str) -> Option<&'a String> {
    args.try_get_one::<String>(id).ok().flatten()
}

impl QuireConfig {
    /// Later layers win: defaults, then the config file (skipped when it does
    /// not exist), then `QUIRE_SITE__<KEY>` variables, then `--prototype` and
    /// `--output`.
    pub fn load(args: &ArgMatches) -> Result<Self> {
        let config_file = arg(args, "config")
            .cloned()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

        let mut builder =
            ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&Self::default())?);

        if Path::new(&config_file).exists() {
            let file = Config::read(&config_file)
                .with_context(|| format!("Failed to read config file {}", config_file))?;
            builder = builder.add_source(ConfigBuilder::try_from(&file)?);
        }

        builder = builder.add_source(
            Environment::with_prefix("QUIRE")
                .prefix_separator("_")
                .separator("__"),
        );

        for (id, key) in [("prototype", "site.prototype"), ("output", "site.output")] {
            if let Some(value) = arg(args, id) {
                builder = builder.set_override(key, value.as_str())?;
            }
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn site_config(&self) -> &SiteConfig {
        &self.site
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn app() -> Command {
        Command::new("test")
            .arg(Arg::new("prototype").long("prototype").value_name("DIR"))
            .arg(Arg::new("output").long("output").value_name("DIR"))
            .arg(Arg::new("config").long("config").value_name("FILE"))
    }

    #[test]
    fn test_default_config() {
        let config = QuireConfig::default();
        assert_eq!(config.site.prototype, PathBuf::from("Prototype"));
        assert_eq!(config.site.output, PathBuf::from("Site"));
        assert_eq!(config.site.reserved, "_prototype");
    }

    #[test]
    fn test_cli_args_override() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("none.toml");
        let matches = app()
            .try_get_matches_from(vec![
                "test",
                "--prototype",
                "/custom/proto",
                "--output",
                "/custom/site",
                "--config",
                missing.to_str().unwrap(),
            ])
            .unwrap();

        let config = QuireConfig::load(&matches).unwrap();
        assert_eq!(config.site.prototype, PathBuf::from("/custom/proto"));
        assert_eq!(config.site.output, PathBuf::from("/custom/site"));
        assert_eq!(config.site.templates, PathBuf::from("templates"));
    }

    #[test]
    fn test_file_layer_under_cli() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("quire.toml");
        std::fs::write(
            &file,
            "[site]\nprototype = \"from-file\"\noutput = \"public\"\n",
        )
        .unwrap();

        let matches = app()
            .try_get_matches_from(vec![
                "test",
                "--output",
                "cli-out",
                "--config",
                file.to_str().unwrap(),
            ])
            .unwrap();

        let config = QuireConfig::load(&matches).unwrap();
        assert_eq!(config.site.prototype, PathBuf::from("from-file"));
        assert_eq!(config.site.output, PathBuf::from("cli-out"));
        assert_eq!(config.site.extension, "html");
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("quire.toml");
        std::fs::write(&file, "[site\nprototype = \"x\"\n").unwrap();

        let matches = app()
            .try_get_matches_from(vec!["test", "--config", file.to_str().unwrap()])
            .unwrap();

        let err = QuireConfig::load(&matches).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file"));
        assert!(err.downcast_ref::<quire_core::config::ConfigError>().is_some());
    }
}
