//! Extensions for [str]: padding, slicing by character count, per-character
//! shift and case reversal, and regular expression shortcuts
//!
//! All counts and lengths are in [char]s, not bytes.
//!
//! # Examples
//!
//! ```rust
//! use rld_util::string::{RegexOptions, StrExt};
//!
//! assert_eq!("42".pre_pad_to_length('0', 5)?, "00042");
//! assert_eq!("report.txt".remove_last(4)?, "report");
//! assert_eq!("héllo".retrieve_last(3)?, "llo");
//! assert_eq!("Hello, World".reverse_case(), "hELLO, wORLD");
//! assert_eq!("a1-".apply_shift()?, "A!_");
//!
//! let year = "released 2019-04".regex_match_with(
//!     r"(?P<year>\d{4})-(?P<month>\d{2})",
//!     RegexOptions::empty(),
//!     Some("year"),
//! )?;
//! assert_eq!(year, "2019");
//! # Ok::<(), rld_util::string::StringError>(())
//! ```

use std::io::Cursor;
use std::iter::repeat;

use regex::{Regex, RegexBuilder};

use crate::chars::{self, ShiftError};
use crate::flags::FlagsExt;

bitflags::bitflags! {
    /// Matching options for [StrExt::regex_match_with] and [StrExt::regex_replace_with]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegexOptions: u32 {
        /// Case-insensitive matching
        const IGNORE_CASE = 1 << 0;
        /// `^` and `$` match at line boundaries
        const MULTILINE = 1 << 1;
        /// `.` also matches `\n`
        const SINGLE_LINE = 1 << 2;
        /// Unescaped whitespace and `#` comments in the pattern are ignored
        const IGNORE_WHITESPACE = 1 << 3;
    }
}

crate::impl_flag_repr!(RegexOptions);

/// Errors raised by [StrExt]
#[derive(thiserror::Error, Debug)]
pub enum StringError {
    #[error("the string is longer ({actual}) than the length specified ({length})")]
    LongerThanLength { length: usize, actual: usize },
    #[error("{count} characters requested, but the string has only {length}")]
    OutOfRange { count: usize, length: usize },
    #[error(transparent)]
    Shift(#[from] ShiftError),
    #[error("a regular expression parsing error occurred")]
    Regex(#[from] regex::Error),
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Split after the first `n` chars
fn split_at_char(s: &str, n: usize) -> Result<(&str, &str), StringError> {
    match s.char_indices().nth(n) {
        Some((i, _)) => Ok(s.split_at(i)),
        None => {
            let length = char_len(s);
            if n == length {
                Ok((s, ""))
            } else {
                Err(StringError::OutOfRange { count: n, length })
            }
        }
    }
}

/// Number of chars left in `s` after removing `n` from one end
fn remaining(s: &str, n: usize) -> Result<usize, StringError> {
    let length = char_len(s);
    length
        .checked_sub(n)
        .ok_or(StringError::OutOfRange { count: n, length })
}

fn padding_for(s: &str, len: usize) -> Result<usize, StringError> {
    let actual = char_len(s);
    len.checked_sub(actual)
        .ok_or(StringError::LongerThanLength {
            length: len,
            actual,
        })
}

fn build_regex(pattern: &str, options: RegexOptions) -> Result<Regex, StringError> {
    let re = RegexBuilder::new(pattern)
        .case_insensitive(options.flag_has(RegexOptions::IGNORE_CASE))
        .multi_line(options.flag_has(RegexOptions::MULTILINE))
        .dot_matches_new_line(options.flag_has(RegexOptions::SINGLE_LINE))
        .ignore_whitespace(options.flag_has(RegexOptions::IGNORE_WHITESPACE))
        .build()?;
    Ok(re)
}

/// Extension trait adding helpers to [str]
pub trait StrExt {
    /// Whether the string contains a space character (see [chars::is_blank])
    fn contains_space(&self) -> bool;

    /// Append `count` copies of `c`
    fn post_pad_char(&self, c: char, count: usize) -> String;

    /// Append copies of `c` until the string is `len` chars long
    ///
    /// Fails with [StringError::LongerThanLength] if it already is longer.
    fn post_pad_to_length(&self, c: char, len: usize) -> Result<String, StringError>;

    /// Prepend `count` copies of `c`
    fn pre_pad_char(&self, c: char, count: usize) -> String;

    /// Prepend copies of `c` until the string is `len` chars long
    ///
    /// Fails with [StringError::LongerThanLength] if it already is longer.
    fn pre_pad_to_length(&self, c: char, len: usize) -> Result<String, StringError>;

    /// Everything but the last `n` chars
    fn remove_last(&self, n: usize) -> Result<&str, StringError>;

    /// Everything but the last char
    fn remove_last_char(&self) -> Result<&str, StringError>;

    /// The first `n` chars
    fn retrieve_first(&self, n: usize) -> Result<&str, StringError>;

    /// The first char
    fn retrieve_first_char(&self) -> Result<char, StringError>;

    /// The last `n` chars
    fn retrieve_last(&self, n: usize) -> Result<&str, StringError>;

    /// The last char
    fn retrieve_last_char(&self) -> Result<char, StringError>;

    /// Length in chars after trimming leading and trailing whitespace
    fn trim_length(&self) -> usize;

    /// [chars::apply_shift] applied to every char; fails on the first
    /// char without a shifted form
    fn apply_shift(&self) -> Result<String, StringError>;

    /// [chars::reverse_case] applied to every char
    fn reverse_case(&self) -> String;

    /// In-memory stream over the UTF-8 bytes of the string
    fn to_stream(&self) -> Cursor<Vec<u8>>;

    /// Text of the first match of `pattern`, or an empty string
    fn regex_match(&self, pattern: &str) -> Result<String, StringError> {
        self.regex_match_with(pattern, RegexOptions::empty(), None)
    }

    /// Text of the first match of `pattern`, or of its group `group`
    ///
    /// Evaluates to an empty string when nothing matches or the group did not
    /// participate in the match. A blank group name selects the whole match.
    fn regex_match_with(
        &self,
        pattern: &str,
        options: RegexOptions,
        group: Option<&str>,
    ) -> Result<String, StringError>;

    /// Replace every match of `pattern`; `$name` and `$1` in `replacement`
    /// refer to capture groups
    fn regex_replace(&self, pattern: &str, replacement: &str) -> Result<String, StringError> {
        self.regex_replace_with(pattern, replacement, RegexOptions::empty())
    }

    /// [StrExt::regex_replace] with matching options
    fn regex_replace_with(
        &self,
        pattern: &str,
        replacement: &str,
        options: RegexOptions,
    ) -> Result<String, StringError>;
}

impl StrExt for str {
    fn contains_space(&self) -> bool {
        self.chars().any(chars::is_blank)
    }

    fn post_pad_char(&self, c: char, count: usize) -> String {
        let mut out = String::with_capacity(self.len() + count * c.len_utf8());
        out.push_str(self);
        out.extend(repeat(c).take(count));
        out
    }

    fn post_pad_to_length(&self, c: char, len: usize) -> Result<String, StringError> {
        Ok(self.post_pad_char(c, padding_for(self, len)?))
    }

    fn pre_pad_char(&self, c: char, count: usize) -> String {
        let mut out: String = repeat(c).take(count).collect();
        out.push_str(self);
        out
    }

    fn pre_pad_to_length(&self, c: char, len: usize) -> Result<String, StringError> {
        Ok(self.pre_pad_char(c, padding_for(self, len)?))
    }

    fn remove_last(&self, n: usize) -> Result<&str, StringError> {
        let keep = remaining(self, n)?;
        Ok(split_at_char(self, keep)?.0)
    }

    fn remove_last_char(&self) -> Result<&str, StringError> {
        self.remove_last(1)
    }

    fn retrieve_first(&self, n: usize) -> Result<&str, StringError> {
        Ok(split_at_char(self, n)?.0)
    }

    fn retrieve_first_char(&self) -> Result<char, StringError> {
        self.chars()
            .next()
            .ok_or(StringError::OutOfRange { count: 1, length: 0 })
    }

    fn retrieve_last(&self, n: usize) -> Result<&str, StringError> {
        let skip = remaining(self, n)?;
        Ok(split_at_char(self, skip)?.1)
    }

    fn retrieve_last_char(&self) -> Result<char, StringError> {
        self.chars()
            .next_back()
            .ok_or(StringError::OutOfRange { count: 1, length: 0 })
    }

    fn trim_length(&self) -> usize {
        char_len(self.trim())
    }

    fn apply_shift(&self) -> Result<String, StringError> {
        let shifted = self
            .chars()
            .map(chars::apply_shift)
            .collect::<Result<String, ShiftError>>()?;
        Ok(shifted)
    }

    fn reverse_case(&self) -> String {
        self.chars().map(chars::reverse_case).collect()
    }

    fn to_stream(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.as_bytes().to_vec())
    }

    fn regex_match_with(
        &self,
        pattern: &str,
        options: RegexOptions,
        group: Option<&str>,
    ) -> Result<String, StringError> {
        let re = build_regex(pattern, options)?;
        let matched = match group.filter(|g| !g.trim().is_empty()) {
            None => re.find(self).map(|m| m.as_str()),
            Some(name) => re
                .captures(self)
                .and_then(|caps| caps.name(name))
                .map(|m| m.as_str()),
        };
        Ok(matched.unwrap_or_default().to_owned())
    }

    fn regex_replace_with(
        &self,
        pattern: &str,
        replacement: &str,
        options: RegexOptions,
    ) -> Result<String, StringError> {
        let re = build_regex(pattern, options)?;
        Ok(re.replace_all(self, replacement).into_owned())
    }
}
