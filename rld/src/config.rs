//! Configuration readable from a config file.
//!
//! rld can read default values for its commands from a TOML file. Every key is
//! optional; see [EXAMPLE_CONFIG] for the full set.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{ensure, Context};
use log::LevelFilter;
use rld_util::boolean::BoolFormat;
use serde::{Deserialize, Serialize};

/// Example configuration written by `rld gen-config`
pub const EXAMPLE_CONFIG: &str = r#"# Lowest log level to show: off, error, warn, info, debug or trace
log_level = "warn"

# Character used by `rld pad` unless --char is given
pad_char = " "

# Word pair used to print booleans: OneZero, YesNo, YupNope, YN, TrueFalse, TF or PassFail
bool_format = "TrueFalse"

# Match case-insensitively in `rld match` and `rld replace`
regex_ignore_case = false
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// log verbosity, parsed as [log::LevelFilter]
    pub log_level: String,

    /// padding character for `rld pad`
    pub pad_char: char,

    /// how booleans are printed
    pub bool_format: BoolFormat,

    /// case-insensitive regular expressions by default
    #[serde(alias = "regex_case_insensitive")]
    pub regex_ignore_case: bool,

    /// path to the file which provided this configuration
    ///
    /// This item is of course not read from the TOML but is added by the algorithm that parses
    /// the config file.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Warn.to_string().to_lowercase(),
            pad_char: ' ',
            bool_format: BoolFormat::default(),
            regex_ignore_case: false,
            config_file_path: None,
        }
    }
}

impl Config {
    /// load configuration from a TOML file
    ///
    /// NOTE: only the schema is checked here; call [Config::validate] for the rest.
    pub fn load<P: AsRef<Path>>(p: P) -> anyhow::Result<Self> {
        let p = p.as_ref();
        let text = fs::read_to_string(p)
            .with_context(|| format!("could not read configuration file {p:?}"))?;
        let mut config: Self = toml::from_str(&text)
            .with_context(|| format!("could not parse configuration file {p:?}"))?;
        config.config_file_path = Some(p.to_owned());
        Ok(config)
    }

    /// Write a config to a file
    pub fn store<P: AsRef<Path>>(&self, p: P) -> anyhow::Result<()> {
        fs::write(p, toml::to_string_pretty(&self)?)?;
        Ok(())
    }

    /// The configured log level
    pub fn log_level_filter(&self) -> anyhow::Result<LevelFilter> {
        LevelFilter::from_str(&self.log_level)
            .with_context(|| format!("invalid log level '{}'", self.log_level))
    }

    /// Validate a configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        self.log_level_filter()?;
        ensure!(
            !self.pad_char.is_control(),
            "pad_char must be a printable character, found {:?}",
            self.pad_char
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_config_matches_default() -> anyhow::Result<()> {
        let config: Config = toml::from_str(EXAMPLE_CONFIG)?;
        assert_eq!(config, Config::default());
        config.validate()
    }

    #[test]
    fn missing_keys_use_defaults() -> anyhow::Result<()> {
        let config: Config = toml::from_str("pad_char = \"0\"\nbool_format = \"yes-no\"")?;
        assert_eq!(config.pad_char, '0');
        assert_eq!(config.bool_format, BoolFormat::YesNo);
        assert_eq!(config.log_level_filter()?, LevelFilter::Warn);
        assert!(!config.regex_ignore_case);
        Ok(())
    }

    #[test]
    fn regex_case_key_accepts_both_spellings() -> anyhow::Result<()> {
        let config: Config = toml::from_str("regex_ignore_case = true")?;
        assert!(config.regex_ignore_case);
        let config: Config = toml::from_str("regex_case_insensitive = true")?;
        assert!(config.regex_ignore_case);
        Ok(())
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(toml::from_str::<Config>("colour = true").is_err());
        assert!(toml::from_str::<Config>("bool_format = \"MaybeSo\"").is_err());
        assert!(toml::from_str::<Config>("pad_char = \"ab\"").is_err());
    }

    #[test]
    fn validate_checks_log_level_and_pad_char() {
        let mut config = Config {
            log_level: "chatty".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.log_level = "DEBUG".into();
        assert!(config.validate().is_ok());

        config.pad_char = '\u{7}';
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_then_load() -> anyhow::Result<()> {
        let tmpdir = tempfile::tempdir()?;
        let path = tmpdir.path().join("rld.toml");

        let config = Config {
            pad_char: '*',
            bool_format: BoolFormat::PassFail,
            ..Default::default()
        };
        config.store(&path)?;

        let loaded = Config::load(&path)?;
        assert_eq!(loaded.config_file_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            loaded,
            Config {
                config_file_path: Some(path),
                ..config
            }
        );
        Ok(())
    }
}
