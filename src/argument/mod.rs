//! Argument assertion helpers.
//!
//! This module provides small, stateless checks that validate the arguments of a
//! public API surface and fail with a self-describing [`crate::Error`] carrying the
//! argument's name. It replaces the laborious `if`/`return Err` sequences that
//! otherwise accumulate at the top of every public function.
//!
//! # Key Components
//!
//! - [`assert_not_none`] / [`assert_items_not_none`] - presence checks for optional
//!   values and sequences of optional values
//! - [`assert_not_empty`] / [`assert_not_none_or_empty`] / [`assert_seq_not_empty`] -
//!   emptiness checks for strings and finite sequences
//! - [`assert_enum_member`] / [`assert_enum_member_of`] - membership validation for
//!   enumerations and flags types, driven by per-type member tables declared with
//!   [`crate::enum_members!`]
//! - [`ext`] - extension-trait facades over the above for method-call syntax
//!
//! # Examples
//!
//! ```rust
//! use trinity::argument;
//!
//! fn display_details(name: Option<&str>) -> trinity::Result<()> {
//!     argument::assert_not_none_or_empty(name, "name", true)?;
//!     // name is present and not blank from here on
//!     Ok(())
//! }
//!
//! assert!(display_details(Some("ada")).is_ok());
//! assert!(display_details(Some("   ")).is_err());
//! ```

use crate::{Error, Result};

mod enums;
pub mod ext;

pub use enums::{assert_enum_member, assert_enum_member_of, assert_enum_member_raw, EnumMembers};

/// Ensures that `arg` carries a value.
///
/// # Errors
///
/// Returns [`Error::NullArgument`] with the given argument name when `arg` is `None`.
pub fn assert_not_none<T: ?Sized>(arg: Option<&T>, name: &str) -> Result<()> {
    if arg.is_none() {
        return Err(Error::NullArgument {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Ensures that `arg` carries a sequence, optionally checking each item for absence.
///
/// When `check_items` is `true`, the sequence is walked and the first `None` element
/// fails the assertion. When `false`, only the sequence itself is checked.
///
/// # Errors
///
/// Returns [`Error::NullArgument`] when the sequence itself is absent, or
/// [`Error::InvalidArgument`] when `check_items` is set and an element is `None`.
pub fn assert_items_not_none<T>(
    arg: Option<&[Option<T>]>,
    name: &str,
    check_items: bool,
) -> Result<()> {
    let Some(items) = arg else {
        return Err(Error::NullArgument {
            name: name.to_string(),
        });
    };

    if check_items && items.iter().any(Option::is_none) {
        return Err(Error::InvalidArgument {
            name: name.to_string(),
            message: "An item inside the enumeration was null.".to_string(),
        });
    }

    Ok(())
}

/// Ensures that `arg` is not an empty string, optionally treating a blank
/// (all-whitespace) string as empty.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `arg` is zero-length, or when `trim` is
/// set and `arg` consists only of whitespace.
pub fn assert_not_empty(arg: &str, name: &str, trim: bool) -> Result<()> {
    if arg.is_empty() || (trim && arg.chars().all(char::is_whitespace)) {
        return Err(null_or_empty(name));
    }

    Ok(())
}

/// Ensures that `arg` carries a non-empty string, optionally treating a blank
/// (all-whitespace) string as empty.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `arg` is absent, zero-length, or (with
/// `trim` set) consists only of whitespace.
pub fn assert_not_none_or_empty(arg: Option<&str>, name: &str, trim: bool) -> Result<()> {
    match arg {
        Some(value) => assert_not_empty(value, name, trim),
        None => Err(null_or_empty(name)),
    }
}

/// Ensures that `arg` carries a non-empty sequence.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when the sequence is absent or has no elements.
pub fn assert_seq_not_empty<T>(arg: Option<&[T]>, name: &str) -> Result<()> {
    match arg {
        Some(items) if !items.is_empty() => Ok(()),
        _ => Err(null_or_empty(name)),
    }
}

fn null_or_empty(name: &str) -> Error {
    Error::InvalidArgument {
        name: name.to_string(),
        message: "Cannot be null or empty.".to_string(),
    }
}
