//! Set algebra on bit-flag values
//!
//! Any type implementing [FlagRepr] can be treated as a bit set: [add] sets
//! bits, [remove] clears them, [has] checks that all given bits are set and
//! [is] checks for exact equality. [FlagsExt] offers the same operations in
//! method chaining style.
//!
//! [FlagRepr] is implemented for all primitive integers of up to 64 bits.
//! Structs generated by [bitflags::bitflags] get an implementation through
//! [impl_flag_repr](crate::impl_flag_repr).
//!
//! The operations assume that each named flag is a distinct power of two;
//! nothing here checks that.
//!
//! # Examples
//!
//! ```rust
//! use rld_util::flags::{self, FlagsExt};
//!
//! rld_util::flags::bitflags::bitflags! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     struct Perm: i32 {
//!         const READ = 1 << 0;
//!         const WRITE = 1 << 1;
//!         const EXEC = 1 << 2;
//!     }
//! }
//! rld_util::impl_flag_repr!(Perm);
//!
//! let rw = Perm::READ.flag_add(Perm::WRITE)?;
//! assert!(rw.flag_has(Perm::WRITE));
//! assert!(!rw.flag_has(Perm::EXEC));
//!
//! let r = flags::remove(rw, Perm::WRITE)?;
//! assert!(r.flag_is(Perm::READ));
//!
//! // Zero bits are always present
//! assert!(r.flag_has(Perm::empty()));
//! # Ok::<(), rld_util::flags::FlagError>(())
//! ```

use std::any::type_name;

pub use bitflags;

/// Reinterpretation of a value as the bit pattern of a fixed-width integer
///
/// Bits are carried in an [i64]; narrower types are sign- or zero-extended
/// according to their own signedness, so the bitwise operations in this
/// module never change bits outside the original width.
///
/// A type that is not backed by an integer may still implement this trait
/// and return `None`; [add] and [remove] then fail with
/// [FlagError::IncompatibleType] while [has] and [is] evaluate to `false`.
pub trait FlagRepr: Copy {
    /// The bit pattern of this value, or `None` if it has no integer representation
    fn try_to_bits(self) -> Option<i64>;

    /// Rebuild a value from a bit pattern produced by [FlagRepr::try_to_bits]
    fn try_from_bits(bits: i64) -> Option<Self>;
}

macro_rules! impl_flag_repr_for_int {
    ($($int:ty),+) => {$(
        impl FlagRepr for $int {
            #[inline]
            fn try_to_bits(self) -> Option<i64> {
                Some(self as i64)
            }

            #[inline]
            fn try_from_bits(bits: i64) -> Option<Self> {
                Some(bits as $int)
            }
        }
    )+};
}

impl_flag_repr_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Implement [FlagRepr] for one or more types generated by [bitflags::bitflags]
///
/// The implementation goes through [bitflags::Flags::bits] and
/// [bitflags::Flags::from_bits_retain], so unnamed bits survive every
/// operation.
///
/// # Examples
///
/// ```rust
/// use rld_util::flags::FlagsExt;
///
/// rld_util::flags::bitflags::bitflags! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
///     struct Mode: u8 {
///         const A = 0b01;
///         const B = 0b10;
///     }
/// }
/// rld_util::impl_flag_repr!(Mode);
///
/// assert_eq!(Mode::A.flag_add(Mode::B)?, Mode::all());
/// # Ok::<(), rld_util::flags::FlagError>(())
/// ```
#[macro_export]
macro_rules! impl_flag_repr {
    ($($flags:ty),+ $(,)?) => {$(
        impl $crate::flags::FlagRepr for $flags {
            #[inline]
            fn try_to_bits(self) -> ::core::option::Option<i64> {
                $crate::flags::FlagRepr::try_to_bits(
                    <$flags as $crate::flags::bitflags::Flags>::bits(&self),
                )
            }

            #[inline]
            fn try_from_bits(bits: i64) -> ::core::option::Option<Self> {
                <<$flags as $crate::flags::bitflags::Flags>::Bits as $crate::flags::FlagRepr>::try_from_bits(bits)
                    .map(<$flags as $crate::flags::bitflags::Flags>::from_bits_retain)
            }
        }
    )+};
}

/// Errors raised by the composing flag operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    /// An operand or the result could not be reinterpreted as an integer
    #[error("could not {op} value for flag type '{type_name}'")]
    IncompatibleType {
        op: &'static str,
        type_name: &'static str,
    },
}

impl FlagError {
    fn incompatible<T>(op: &'static str) -> Self {
        Self::IncompatibleType {
            op,
            type_name: type_name::<T>(),
        }
    }

    /// Name of the type that could not be reinterpreted
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::IncompatibleType { type_name, .. } => type_name,
        }
    }
}

fn bits_of<T: FlagRepr>(flags: T, value: T) -> Option<(i64, i64)> {
    Some((flags.try_to_bits()?, value.try_to_bits()?))
}

fn compose<T, F>(op: &'static str, flags: T, value: T, f: F) -> Result<T, FlagError>
where
    T: FlagRepr,
    F: FnOnce(i64, i64) -> i64,
{
    bits_of(flags, value)
        .and_then(|(t, v)| T::try_from_bits(f(t, v)))
        .ok_or_else(|| FlagError::incompatible::<T>(op))
}

/// Set all bits of `value` in `flags`
///
/// # Examples
///
/// ```rust
/// use rld_util::flags::add;
/// assert_eq!(add(0b001i32, 0b100)?, 0b101);
/// assert_eq!(add(0b101i32, 0)?, 0b101);
/// # Ok::<(), rld_util::flags::FlagError>(())
/// ```
pub fn add<T: FlagRepr>(flags: T, value: T) -> Result<T, FlagError> {
    compose("append", flags, value, |t, v| t | v)
}

/// Clear all bits of `value` in `flags`
///
/// # Examples
///
/// ```rust
/// use rld_util::flags::remove;
/// assert_eq!(remove(0b111u8, 0b010)?, 0b101);
/// assert_eq!(remove(0b101u8, 0)?, 0b101);
/// # Ok::<(), rld_util::flags::FlagError>(())
/// ```
pub fn remove<T: FlagRepr>(flags: T, value: T) -> Result<T, FlagError> {
    compose("remove", flags, value, |t, v| t & !v)
}

/// Check whether all bits of `value` are set in `flags`
///
/// Evaluates to `false` instead of failing when either operand has no
/// integer representation. This also hides implementation bugs in a
/// [FlagRepr] impl behind a plain "not set".
///
/// # Examples
///
/// ```rust
/// use rld_util::flags::has;
/// assert!(has(0b110i64, 0b100));
/// assert!(!has(0b110i64, 0b101));
/// assert!(has(0b110i64, 0));
/// ```
pub fn has<T: FlagRepr>(flags: T, value: T) -> bool {
    bits_of(flags, value)
        .map(|(t, v)| t & v == v)
        .unwrap_or(false)
}

/// Check whether `flags` and `value` carry exactly the same bits
///
/// Same lenient behavior as [has].
///
/// # Examples
///
/// ```rust
/// use rld_util::flags::is;
/// assert!(is(0i16, 0));
/// assert!(!is(0b1i16, 0));
/// ```
pub fn is<T: FlagRepr>(flags: T, value: T) -> bool {
    bits_of(flags, value)
        .map(|(t, v)| t == v)
        .unwrap_or(false)
}

/// Method chaining style access to [add], [remove], [has] and [is]
pub trait FlagsExt: FlagRepr {
    /// See [add]
    fn flag_add(self, value: Self) -> Result<Self, FlagError> {
        add(self, value)
    }

    /// See [remove]
    fn flag_remove(self, value: Self) -> Result<Self, FlagError> {
        remove(self, value)
    }

    /// See [has]
    fn flag_has(self, value: Self) -> bool {
        has(self, value)
    }

    /// See [is]
    fn flag_is(self, value: Self) -> bool {
        is(self, value)
    }
}

impl<T: FlagRepr> FlagsExt for T {}
