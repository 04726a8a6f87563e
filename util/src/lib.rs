//! Extension helpers for primitive and standard library types.
//!
//! Every helper is a stateless transformation of its input. Helpers that can
//! fail return a typed error from their own module; [Error] unifies them for
//! callers that want a single error type.
//!
//! # Examples
//!
//! ```rust
//! use rld_util::chars::ShiftExt;
//! use rld_util::flags::FlagsExt;
//!
//! assert_eq!('a'.apply_shift()?, 'A');
//! assert_eq!('1'.apply_shift()?, '!');
//!
//! let mask = 0b0001u32.flag_add(0b0100)?;
//! assert!(mask.flag_has(0b0100));
//! assert!(!mask.flag_remove(0b0100)?.flag_has(0b0100));
//! # Ok::<(), rld_util::Error>(())
//! ```

pub mod boolean;
pub mod chars;
pub mod flags;
pub mod fmt;
pub mod generic;
pub mod io;
pub mod string;

/// Any error produced by this crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Flag(#[from] flags::FlagError),
    #[error(transparent)]
    Shift(#[from] chars::ShiftError),
    #[error(transparent)]
    String(#[from] string::StringError),
    #[error(transparent)]
    Io(#[from] io::IoError),
    #[error(transparent)]
    Generic(#[from] generic::GenericError),
}

/// Result alias using the crate-wide [Error]
pub type Result<T, E = Error> = std::result::Result<T, E>;
