//! Rendering [bool] as one of a fixed set of word pairs
//!
//! Each [BoolFormat] is named after its two words: the word for `true` is the
//! name up to the second capital letter, the word for `false` is the rest.
//!
//! ```rust
//! use rld_util::boolean::{BoolFormat, BoolFormatExt};
//!
//! assert_eq!(true.format_as(BoolFormat::YesNo), "Yes");
//! assert_eq!(false.format_as(BoolFormat::YesNo), "No");
//! assert_eq!(false.format_as(BoolFormat::TF), "F");
//! assert_eq!("pass-fail".parse::<BoolFormat>()?, BoolFormat::PassFail);
//! # Ok::<(), rld_util::boolean::BoolFormatParseError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Word pair used to render a [bool]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BoolFormat {
    OneZero,
    YesNo,
    YupNope,
    YN,
    #[default]
    TrueFalse,
    TF,
    PassFail,
}

impl BoolFormat {
    /// All formats in declaration order
    pub const ALL: [BoolFormat; 7] = [
        Self::OneZero,
        Self::YesNo,
        Self::YupNope,
        Self::YN,
        Self::TrueFalse,
        Self::TF,
        Self::PassFail,
    ];

    /// Name of the format as written in its declaration
    pub const fn name(self) -> &'static str {
        match self {
            Self::OneZero => "OneZero",
            Self::YesNo => "YesNo",
            Self::YupNope => "YupNope",
            Self::YN => "YN",
            Self::TrueFalse => "TrueFalse",
            Self::TF => "TF",
            Self::PassFail => "PassFail",
        }
    }

    /// The words for `true` and `false`
    pub fn words(self) -> (&'static str, &'static str) {
        let name = self.name();
        let at = name
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_uppercase())
            .map_or(name.len(), |(i, _)| i);
        name.split_at(at)
    }

    /// Render `value` in this format
    pub fn format(self, value: bool) -> &'static str {
        let (t, f) = self.words();
        if value {
            t
        } else {
            f
        }
    }
}

impl fmt::Display for BoolFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when parsing an unknown [BoolFormat] name
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown boolean format '{0}'")]
pub struct BoolFormatParseError(pub String);

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for BoolFormat {
    type Err = BoolFormatParseError;

    /// Case-insensitive; separators such as `-` and `_` are ignored, so
    /// `YesNo`, `yes-no` and `YES_NO` all parse
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|fmt| normalize(fmt.name()) == wanted)
            .ok_or_else(|| BoolFormatParseError(s.to_owned()))
    }
}

impl TryFrom<String> for BoolFormat {
    type Error = BoolFormatParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BoolFormat> for &'static str {
    fn from(fmt: BoolFormat) -> Self {
        fmt.name()
    }
}

/// Method chaining style access to [BoolFormat::format]
pub trait BoolFormatExt {
    fn format_as(self, format: BoolFormat) -> &'static str;
}

impl BoolFormatExt for bool {
    fn format_as(self, format: BoolFormat) -> &'static str {
        format.format(self)
    }
}
