use std::path::{Path, PathBuf};

use crate::config::{AppConfig, CONFIG_FILE};

/// Loads a TrueType font and builds the text meshes for a string.
#[derive(clap::Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Config file. Without it, `tessera.toml` in the working directory is
    /// used when present.
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Text to build meshes for, overriding the config file.
    pub text: Option<String>,
}

impl Args {
    /// A config path given explicitly must exist; only the implicit
    /// `tessera.toml` falls back to defaults.
    pub fn app_config(&self) -> anyhow::Result<AppConfig> {
        let config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::load_or_default(Path::new(CONFIG_FILE))?,
        };
        Ok(match &self.text {
            Some(text) => config.with_text(text),
            None => config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn help_is_not_taken_as_a_path() {
        let err = Args::try_parse_from(["tessera", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn config_flag_and_text() {
        let args = Args::try_parse_from(["tessera", "--config", "my.toml", "abc"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
        assert_eq!(args.text.as_deref(), Some("abc"));

        let args = Args::try_parse_from(["tessera"]).unwrap();
        assert!(args.config.is_none() && args.text.is_none());
    }

    #[test]
    fn named_config_must_exist() {
        let args =
            Args::try_parse_from(["tessera", "-c", "/nonexistent/myconf.tmol", "hi"]).unwrap();
        let err = args.app_config().unwrap_err();
        assert!(format!("{err:#}").contains("myconf.tmol"));
    }
}
