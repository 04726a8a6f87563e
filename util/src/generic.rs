//! Small helpers over values and sequences
//!
//! ```rust
//! use rld_util::generic::{is_first, join, IsInExt};
//!
//! assert!('b'.is_in(&['a', 'b', 'c']));
//! assert_eq!(join(", ", [1, 2, 3]), "1, 2, 3");
//! assert!(is_first(&5, &[3, 9])?);
//! # Ok::<(), rld_util::generic::GenericError>(())
//! ```

use std::fmt::Display;

use rand::seq::SliceRandom;

/// Errors raised by the helpers in this module
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericError {
    #[error("the source sequence is empty")]
    EmptySequence,
}

/// Membership test against a list of candidates
pub trait IsInExt: PartialEq + Sized {
    fn is_in(&self, list: &[Self]) -> bool {
        list.contains(self)
    }
}

impl<T: PartialEq> IsInExt for T {}

/// Whether `value` orders at or after the first element of `list`
///
/// Fails with [GenericError::EmptySequence] on an empty sequence.
pub fn is_first<'a, T, I>(value: &T, list: I) -> Result<bool, GenericError>
where
    T: Ord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let first = list
        .into_iter()
        .next()
        .ok_or(GenericError::EmptySequence)?;
    Ok(value >= first)
}

/// Render every item and put `separator` between them
pub fn join<S, I>(separator: S, list: I) -> String
where
    S: Display,
    I: IntoIterator,
    I::Item: Display,
{
    let separator = separator.to_string();
    list.into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(&separator)
}

/// A uniformly chosen element, or `None` for an empty slice
pub fn random<T>(list: &[T]) -> Option<&T> {
    list.choose(&mut rand::thread_rng())
}
