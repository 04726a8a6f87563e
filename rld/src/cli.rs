//! Contains the code used to parse command line parameters for rld.
//!
//! [CliArgs::run] is called by the main function and does all the work; the
//! main function just sets up logging and the configuration.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand, ValueEnum};

use rld_util::boolean::{BoolFormat, BoolFormatExt};
use rld_util::flags::{self, FlagsExt};
use rld_util::string::{RegexOptions, StrExt};

use crate::config::{self, Config};

/// Command line arguments to the rld binary.
///
/// Used for parsing with [clap].
#[derive(Parser, Debug)]
#[command(author, version, about, long_about, arg_required_else_help = true)]
pub struct CliArgs {
    /// Read default values from this TOML file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Lowest log level to show
    #[arg(long = "log-level", value_name = "LOG_LEVEL", group = "log-level")]
    log_level: Option<log::LevelFilter>,

    /// Show verbose log output; sets log level to "debug"
    #[arg(short, long, group = "log-level")]
    verbose: bool,

    /// Show no log output; sets log level to "error"
    #[arg(short, long, group = "log-level")]
    quiet: bool,

    /// The subcommand to be invoked
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Generate completion file for a shell
    #[clap(long, value_name = "shell")]
    pub print_completions: Option<clap_complete::Shell>,
}

/// Which end of the text `rld pad` extends
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadSide {
    /// Prepend padding
    Pre,
    /// Append padding
    Post,
}

/// Set operation performed by `rld flags`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOp {
    /// Set the bits of B in A
    Add,
    /// Clear the bits of B in A
    Remove,
    /// Whether all bits of B are set in A
    Has,
    /// Whether A and B are equal
    Is,
}

/// represents a command specified via CLI
#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print TEXT as typed with the shift key held down
    ///
    /// Letters swap case; digits and punctuation swap with their shifted symbol
    /// on a US keyboard. Fails on characters without a shifted form, such as
    /// spaces.
    Shift { text: String },

    /// Print TEXT with the case of every letter swapped
    ReverseCase { text: String },

    /// Combine or compare two bit masks
    ///
    /// Masks are integers in decimal, hexadecimal (`0x`) or binary (`0b`).
    Flags {
        #[arg(value_enum)]
        op: FlagOp,
        #[arg(value_parser = parse_mask, allow_negative_numbers = true)]
        a: i64,
        #[arg(value_parser = parse_mask, allow_negative_numbers = true)]
        b: i64,
    },

    /// Print a boolean as a word
    Bool {
        #[arg(action = clap::ArgAction::Set, value_parser = clap::builder::BoolishValueParser::new())]
        value: bool,

        /// Word pair to use, e.g. yes-no or pass-fail
        #[arg(short, long)]
        format: Option<BoolFormat>,
    },

    /// Pad TEXT to LEN characters
    Pad {
        #[arg(value_enum)]
        side: PadSide,
        text: String,
        len: usize,

        /// Padding character
        #[arg(long = "char")]
        pad_char: Option<char>,
    },

    /// Print the first match of PATTERN in TEXT
    Match {
        pattern: String,
        text: String,

        /// Print only this named group
        #[arg(short, long)]
        group: Option<String>,

        /// Match case-insensitively
        #[arg(short, long)]
        ignore_case: bool,

        /// `^` and `$` match at line boundaries
        #[arg(short, long)]
        multiline: bool,
    },

    /// Replace every match of PATTERN in TEXT
    Replace {
        pattern: String,
        replacement: String,
        text: String,

        /// Match case-insensitively
        #[arg(short, long)]
        ignore_case: bool,
    },

    /// Generate a demo config file for rld
    GenConfig {
        config_file: PathBuf,

        /// Forcefully overwrite existing config file
        #[clap(short, long)]
        force: bool,
    },

    /// Validate configuration files
    Validate { config_files: Vec<PathBuf> },
}

/// Parse a bit mask in decimal, `0x` hexadecimal or `0b` binary notation
///
/// The digits give the unsigned bit pattern, so `0x8000000000000000` is
/// [i64::MIN]. A leading `-` negates it in two's complement.
pub fn parse_mask(s: &str) -> anyhow::Result<i64> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (radix, digits) = if let Some(hex) = unsigned.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = unsigned.strip_prefix("0b") {
        (2, bin)
    } else {
        (10, unsigned)
    };
    let digits = digits.replace('_', "");
    ensure!(
        !digits.starts_with(&['-', '+'][..]),
        "invalid mask '{s}': unexpected sign"
    );
    let magnitude = u64::from_str_radix(&digits, radix)
        .with_context(|| format!("invalid mask '{s}'"))?;
    ensure!(
        !negative || magnitude <= i64::MIN.unsigned_abs(),
        "invalid mask '{s}': out of range"
    );
    let bits = magnitude as i64;
    Ok(if negative { bits.wrapping_neg() } else { bits })
}

impl CliArgs {
    /// Apply the command line parameters to the configuration struct
    ///
    /// Command line parameters take precedence over the configuration file.
    pub fn apply_to_config(&self, cfg: &mut Config) -> anyhow::Result<()> {
        if let Some(level) = self.get_log_level() {
            cfg.log_level = level.to_string().to_lowercase();
        }
        Ok(())
    }

    /// returns the log level filter set by CLI args
    /// returns `None` if the user did not specify any log level filter via CLI
    ///
    /// NOTE: the clap feature of ["argument groups"](https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_3/index.html#argument-relations)
    /// ensures that the user can not specify more than one of the possible log level arguments.
    pub fn get_log_level(&self) -> Option<log::LevelFilter> {
        if self.verbose {
            return Some(log::LevelFilter::Debug);
        }
        if self.quiet {
            return Some(log::LevelFilter::Error);
        }
        self.log_level
    }

    /// Load the configuration named by `--config`, or the defaults, and merge
    /// the command line parameters into it
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        self.apply_to_config(&mut cfg)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Run rld with the given command line parameters, writing results to `out`
    pub fn run<W: Write>(self, cfg: &Config, out: &mut W) -> anyhow::Result<()> {
        use CliCommand::*;
        let Some(command) = self.command else {
            return Ok(()); // clap prints help if no command is given
        };
        log::debug!("running {command:?}");

        match command {
            Shift { text } => {
                writeln!(out, "{}", text.apply_shift()?)?;
            }

            ReverseCase { text } => {
                writeln!(out, "{}", text.reverse_case())?;
            }

            Flags { op, a, b } => match op {
                FlagOp::Add => writeln!(out, "{}", flags::add(a, b)?)?,
                FlagOp::Remove => writeln!(out, "{}", flags::remove(a, b)?)?,
                FlagOp::Has => writeln!(out, "{}", a.flag_has(b).format_as(cfg.bool_format))?,
                FlagOp::Is => writeln!(out, "{}", a.flag_is(b).format_as(cfg.bool_format))?,
            },

            Bool { value, format } => {
                let format = format.unwrap_or(cfg.bool_format);
                writeln!(out, "{}", value.format_as(format))?;
            }

            Pad {
                side,
                text,
                len,
                pad_char,
            } => {
                let c = pad_char.unwrap_or(cfg.pad_char);
                let padded = match side {
                    PadSide::Pre => text.pre_pad_to_length(c, len)?,
                    PadSide::Post => text.post_pad_to_length(c, len)?,
                };
                writeln!(out, "{padded}")?;
            }

            Match {
                pattern,
                text,
                group,
                ignore_case,
                multiline,
            } => {
                let mut options = regex_options(cfg, ignore_case)?;
                if multiline {
                    options = options.flag_add(RegexOptions::MULTILINE)?;
                }
                let found = text.regex_match_with(&pattern, options, group.as_deref())?;
                if found.is_empty() {
                    log::info!("no match for {pattern:?}");
                }
                writeln!(out, "{found}")?;
            }

            Replace {
                pattern,
                replacement,
                text,
                ignore_case,
            } => {
                let options = regex_options(cfg, ignore_case)?;
                writeln!(
                    out,
                    "{}",
                    text.regex_replace_with(&pattern, &replacement, options)?
                )?;
            }

            GenConfig { config_file, force } => {
                ensure!(
                    force || !config_file.exists(),
                    "config file {config_file:?} already exists"
                );
                std::fs::write(&config_file, config::EXAMPLE_CONFIG)?;
                log::info!("wrote example configuration to {config_file:?}");
            }

            Validate { config_files } => {
                for file in config_files {
                    match Config::load(&file) {
                        Ok(config) => match config.validate() {
                            Ok(_) => writeln!(out, "{file:?} is valid")?,
                            Err(err) => writeln!(out, "{file:?} contains logical errors: '{err}'")?,
                        },
                        Err(e) => writeln!(out, "{file:?} is not valid: {e:#}")?,
                    }
                }
            }
        }

        Ok(())
    }
}

fn regex_options(cfg: &Config, ignore_case: bool) -> anyhow::Result<RegexOptions> {
    let mut options = RegexOptions::empty();
    if ignore_case || cfg.regex_ignore_case {
        options = options.flag_add(RegexOptions::IGNORE_CASE)?;
    }
    Ok(options)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_mask_notations() -> anyhow::Result<()> {
        assert_eq!(parse_mask("12")?, 12);
        assert_eq!(parse_mask("0x1f")?, 31);
        assert_eq!(parse_mask("0b1010")?, 10);
        assert_eq!(parse_mask("0b1000_0000")?, 128);
        assert_eq!(parse_mask("-0x10")?, -16);
        assert!(parse_mask("0xzz").is_err());
        assert!(parse_mask("").is_err());
        Ok(())
    }

    #[test]
    fn parse_mask_reaches_the_sign_bit() -> anyhow::Result<()> {
        assert_eq!(parse_mask("-9223372036854775808")?, i64::MIN);
        assert_eq!(parse_mask("-0x8000000000000000")?, i64::MIN);
        assert_eq!(parse_mask("0x8000000000000000")?, i64::MIN);
        assert_eq!(parse_mask("0xffff_ffff_ffff_ffff")?, -1);
        assert_eq!(parse_mask("9223372036854775807")?, i64::MAX);
        assert!(parse_mask("-0x8000000000000001").is_err());
        assert!(parse_mask("0x10000000000000000").is_err());
        Ok(())
    }

    #[test]
    fn parse_mask_rejects_inner_signs() -> anyhow::Result<()> {
        for s in ["0x-5", "--5", "+5", "-+5", "0b+1", "0x_-1"] {
            assert!(parse_mask(s).is_err(), "{s}");
        }
        Ok(())
    }

    #[test]
    fn log_level_flags() {
        let args = CliArgs::parse_from(["rld", "-v", "shift", "a"]);
        assert_eq!(args.get_log_level(), Some(log::LevelFilter::Debug));

        let args = CliArgs::parse_from(["rld", "-q", "shift", "a"]);
        assert_eq!(args.get_log_level(), Some(log::LevelFilter::Error));

        let args = CliArgs::parse_from(["rld", "--log-level", "trace", "shift", "a"]);
        assert_eq!(args.get_log_level(), Some(log::LevelFilter::Trace));

        let args = CliArgs::parse_from(["rld", "shift", "a"]);
        assert_eq!(args.get_log_level(), None);

        assert!(CliArgs::try_parse_from(["rld", "-v", "-q", "shift", "a"]).is_err());
    }

    #[test]
    fn cli_log_level_overrides_config() -> anyhow::Result<()> {
        let mut cfg = Config::default();
        CliArgs::parse_from(["rld", "-v", "shift", "a"]).apply_to_config(&mut cfg)?;
        assert_eq!(cfg.log_level_filter()?, log::LevelFilter::Debug);
        Ok(())
    }

    #[test]
    fn config_ignore_case_sets_regex_option() -> anyhow::Result<()> {
        let cfg = Config {
            regex_ignore_case: true,
            ..Default::default()
        };
        assert_eq!(regex_options(&cfg, false)?, RegexOptions::IGNORE_CASE);
        assert_eq!(
            regex_options(&Config::default(), false)?,
            RegexOptions::empty()
        );
        Ok(())
    }
}
