//! Formatting of errors for log output

use std::error::Error;

/// Renders an error together with its chain of sources
///
/// # Examples
///
/// ```rust
/// use rld_util::fmt::ErrorChainExt;
/// use rld_util::string::StrExt;
///
/// let err = "abc".regex_match("(").unwrap_err();
/// let log = err.to_logging_string();
/// assert!(log.starts_with("**********"));
/// assert!(log.contains("Error: a regular expression parsing error occurred"));
/// assert!(log.contains("Caused by: regex parse error"));
/// ```
pub trait ErrorChainExt {
    /// Banner line, the error itself, then one `Caused by:` line per source
    fn to_logging_string(&self) -> String;
}

impl<E: Error + ?Sized> ErrorChainExt for E {
    fn to_logging_string(&self) -> String {
        let mut out = format!(
            "********** {} **********\nError: {self}\n",
            short_type_name::<E>()
        );
        let mut source = self.source();
        while let Some(cause) = source {
            out.push_str(&format!("Caused by: {cause}\n"));
            source = cause.source();
        }
        out
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let name = std::any::type_name::<T>();
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{IoError, StreamExt};

    #[test]
    fn lists_every_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err = IoError::Read(inner);
        let log = err.to_logging_string();
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(
            lines,
            [
                "********** IoError **********",
                "Error: an I/O error occurred while reading",
                "Caused by: disk on fire",
            ]
        );
    }

    #[test]
    fn source_from_conversion() {
        let err = std::io::Cursor::new(vec![0xffu8])
            .read_into_string()
            .unwrap_err();
        let log = err.to_logging_string();
        assert!(log.contains("Error: the stream does not contain valid UTF-8"));
        assert!(log.contains("Caused by: invalid utf-8"));
    }
}
