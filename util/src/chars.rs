//! Keyboard shift and case helpers for [char]
//!
//! [apply_shift] yields the character a US keyboard emits when the key for
//! the input character is pressed together with shift. Letters swap case,
//! the digit row and the punctuation keys swap with their shifted symbols.
//! The mapping is an involution: shifting twice gives back the input.
//!
//! The remaining helpers classify and convert ASCII letters and never fail.
//!
//! # Examples
//!
//! ```rust
//! use rld_util::chars::ShiftExt;
//!
//! assert_eq!('q'.apply_shift()?, 'Q');
//! assert_eq!('Q'.apply_shift()?, 'q');
//! assert_eq!('/'.apply_shift()?, '?');
//! assert_eq!('?'.apply_shift()?, '/');
//! assert!(' '.apply_shift().is_err());
//!
//! assert_eq!('x'.reverse_case(), 'X');
//! assert_eq!(' '.reverse_case(), ' ');
//! # Ok::<(), rld_util::chars::ShiftError>(())
//! ```

use static_assertions::{const_assert, const_assert_eq};

/// Unshifted and shifted symbol of every non-letter key with a shift mapping
const SHIFT_PAIRS: [(char, char); 20] = [
    ('0', ')'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// Shifted counterpart indexed by ASCII code; zero means "no mapping"
const SHIFT_TABLE: [u8; 128] = build_shift_table();

const fn build_shift_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < SHIFT_PAIRS.len() {
        let (plain, shifted) = SHIFT_PAIRS[i];
        table[plain as usize] = shifted as u8;
        table[shifted as usize] = plain as u8;
        i += 1;
    }
    table
}

const fn is_involution(table: &[u8; 128]) -> bool {
    let mut i = 0;
    while i < table.len() {
        let s = table[i] as usize;
        if s != 0 && table[s] as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

const fn mapped_count(table: &[u8; 128]) -> usize {
    let mut n = 0;
    let mut i = 0;
    while i < table.len() {
        if table[i] != 0 {
            n += 1;
        }
        i += 1;
    }
    n
}

const_assert!(is_involution(&SHIFT_TABLE));
const_assert_eq!(mapped_count(&SHIFT_TABLE), 2 * SHIFT_PAIRS.len());

/// Error raised by [apply_shift]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftError {
    /// The character has no shifted form
    #[error("invalid character type: {0:?}")]
    InvalidCharacter(char),
}

/// `a` to `z`
pub fn is_alpha_lower(c: char) -> bool {
    c.is_ascii_lowercase()
}

/// `A` to `Z`
pub fn is_alpha_upper(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// ASCII letter of either case
pub fn is_alpha(c: char) -> bool {
    is_alpha_upper(c) || is_alpha_lower(c)
}

/// `0` to `9`
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Exactly the space character; tabs and other whitespace are not blank
pub fn is_blank(c: char) -> bool {
    c == ' '
}

/// Lowercase form of an ASCII letter; anything else passes through
pub fn to_alpha_lower(c: char) -> char {
    c.to_ascii_lowercase()
}

/// Uppercase form of an ASCII letter; anything else passes through
pub fn to_alpha_upper(c: char) -> char {
    c.to_ascii_uppercase()
}

/// Swap the case of an ASCII letter; anything else passes through
///
/// This is the lenient counterpart of [apply_shift].
///
/// # Examples
///
/// ```rust
/// use rld_util::chars::reverse_case;
/// assert_eq!(reverse_case('a'), 'A');
/// assert_eq!(reverse_case('Z'), 'z');
/// assert_eq!(reverse_case('5'), '5');
/// ```
pub fn reverse_case(c: char) -> char {
    if is_alpha_lower(c) {
        to_alpha_upper(c)
    } else if is_alpha_upper(c) {
        to_alpha_lower(c)
    } else {
        c
    }
}

/// Shifted symbol for a digit or punctuation key, in either direction
fn shift_symbol(c: char) -> Option<char> {
    let idx = usize::try_from(u32::from(c)).ok()?;
    match SHIFT_TABLE.get(idx).copied() {
        None | Some(0) => None,
        Some(s) => Some(char::from(s)),
    }
}

/// The character produced by pressing the key for `c` while holding shift
///
/// Fails with [ShiftError::InvalidCharacter] for anything that is neither
/// an ASCII letter nor one of the forty mapped digit and punctuation
/// characters; that includes space, control characters and all non-ASCII
/// input.
///
/// # Examples
///
/// ```rust
/// use rld_util::chars::{apply_shift, ShiftError};
/// assert_eq!(apply_shift('1'), Ok('!'));
/// assert_eq!(apply_shift('!'), Ok('1'));
/// assert_eq!(apply_shift('-'), Ok('_'));
/// assert_eq!(apply_shift('['), Ok('{'));
/// assert_eq!(apply_shift('\t'), Err(ShiftError::InvalidCharacter('\t')));
/// ```
pub fn apply_shift(c: char) -> Result<char, ShiftError> {
    if is_alpha(c) {
        return Ok(reverse_case(c));
    }
    shift_symbol(c).ok_or(ShiftError::InvalidCharacter(c))
}

/// Method chaining style access to the helpers in this module
///
/// Names avoid the inherent methods of [char] such as
/// [char::is_numeric], which would otherwise take precedence.
pub trait ShiftExt: Sized {
    /// See [apply_shift]
    fn apply_shift(self) -> Result<char, ShiftError>;
    /// See [reverse_case]
    fn reverse_case(self) -> char;
    /// See [to_alpha_lower]
    fn to_alpha_lower(self) -> char;
    /// See [to_alpha_upper]
    fn to_alpha_upper(self) -> char;
    /// See [is_alpha]
    fn is_alpha(self) -> bool;
    /// See [is_alpha_lower]
    fn is_alpha_lower(self) -> bool;
    /// See [is_alpha_upper]
    fn is_alpha_upper(self) -> bool;
    /// See [is_digit]
    fn is_numeral(self) -> bool;
    /// See [is_blank]
    fn is_blank(self) -> bool;
}

impl ShiftExt for char {
    fn apply_shift(self) -> Result<char, ShiftError> {
        apply_shift(self)
    }

    fn reverse_case(self) -> char {
        reverse_case(self)
    }

    fn to_alpha_lower(self) -> char {
        to_alpha_lower(self)
    }

    fn to_alpha_upper(self) -> char {
        to_alpha_upper(self)
    }

    fn is_alpha(self) -> bool {
        is_alpha(self)
    }

    fn is_alpha_lower(self) -> bool {
        is_alpha_lower(self)
    }

    fn is_alpha_upper(self) -> bool {
        is_alpha_upper(self)
    }

    fn is_numeral(self) -> bool {
        is_digit(self)
    }

    fn is_blank(self) -> bool {
        is_blank(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapped_symbols() -> impl Iterator<Item = char> {
        SHIFT_PAIRS.iter().flat_map(|&(a, b)| [a, b])
    }

    #[test]
    fn letters_are_an_involution() -> Result<(), ShiftError> {
        for c in 'a'..='z' {
            let up = apply_shift(c)?;
            assert_eq!(up, c.to_ascii_uppercase());
            assert_eq!(apply_shift(up)?, c);
        }
        Ok(())
    }

    #[test]
    fn symbols_are_an_involution() -> Result<(), ShiftError> {
        assert_eq!(mapped_symbols().count(), 40);
        for c in mapped_symbols() {
            assert_ne!(apply_shift(c)?, c);
            assert_eq!(apply_shift(apply_shift(c)?)?, c);
        }
        Ok(())
    }

    #[test]
    fn concrete_mappings() {
        assert_eq!(apply_shift('1'), Ok('!'));
        assert_eq!(apply_shift('-'), Ok('_'));
        assert_eq!(apply_shift('['), Ok('{'));
        assert_eq!(apply_shift('0'), Ok(')'));
        assert_eq!(apply_shift('\\'), Ok('|'));
        assert_eq!(apply_shift('"'), Ok('\''));
        assert_eq!(apply_shift('>'), Ok('.'));
    }

    #[test]
    fn unmapped_characters_fail() {
        for c in [' ', '\t', '\n', '\0', '`', '~', 'é', 'ß', '€', '\u{7f}'] {
            assert_eq!(apply_shift(c), Err(ShiftError::InvalidCharacter(c)));
        }
        assert_eq!(
            apply_shift(' ').unwrap_err().to_string(),
            "invalid character type: ' '"
        );
    }

    #[test]
    fn every_ascii_char_is_classified_once() {
        for b in 0u8..128 {
            let c = char::from(b);
            let classes = [
                is_alpha_lower(c),
                is_alpha_upper(c),
                is_digit(c),
                !is_digit(c) && shift_symbol(c).is_some(),
                !is_alpha(c) && shift_symbol(c).is_none(),
            ];
            assert_eq!(classes.iter().filter(|x| **x).count(), 1, "{c:?}");
        }
    }

    #[test]
    fn reverse_case_passes_through_non_letters() {
        assert_eq!(reverse_case('a'), 'A');
        assert_eq!(reverse_case('Z'), 'z');
        assert_eq!(reverse_case('5'), '5');
        assert_eq!(reverse_case(' '), ' ');
        assert_eq!(reverse_case('é'), 'é');
    }

    #[test]
    fn predicates() {
        assert!('m'.is_alpha_lower() && !'M'.is_alpha_lower());
        assert!('M'.is_alpha_upper() && !'m'.is_alpha_upper());
        assert!('m'.is_alpha() && 'M'.is_alpha() && !'1'.is_alpha());
        assert!('7'.is_numeral() && !'a'.is_numeral() && !'٣'.is_numeral());
        assert!(' '.is_blank() && !'\t'.is_blank() && !'\u{a0}'.is_blank());
        assert_eq!('Q'.to_alpha_lower(), 'q');
        assert_eq!('q'.to_alpha_upper(), 'Q');
        assert_eq!('!'.to_alpha_upper(), '!');
    }
}
