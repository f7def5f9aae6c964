//! Extension-trait facades over the assertion helpers.
//!
//! These traits add method-call syntax for the checks in [`crate::argument`],
//! returning the checked value so assertions compose with `?` at binding sites:
//!
//! ```rust
//! use trinity::argument::ext::OptionAssertExt;
//!
//! fn greet(name: Option<String>) -> trinity::Result<String> {
//!     let name = name.assert_not_none("name")?;
//!     Ok(format!("hello, {name}"))
//! }
//!
//! assert!(greet(None).is_err());
//! ```

use super::{assert_enum_member, assert_enum_member_of, assert_not_empty, EnumMembers};
use crate::{Error, Result};

/// Presence assertion for optional values.
pub trait OptionAssertExt<T> {
    /// Returns the carried value, or [`Error::NullArgument`] naming `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullArgument`] when the value is absent.
    fn assert_not_none(self, name: &str) -> Result<T>;
}

impl<T> OptionAssertExt<T> for Option<T> {
    fn assert_not_none(self, name: &str) -> Result<T> {
        self.ok_or_else(|| Error::NullArgument {
            name: name.to_string(),
        })
    }
}

/// Emptiness assertions for string slices.
pub trait StrAssertExt {
    /// Returns `self` unless it is empty, or blank when `trim` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the string is empty or blank.
    fn assert_not_empty(&self, name: &str, trim: bool) -> Result<&str>;
}

impl StrAssertExt for str {
    fn assert_not_empty(&self, name: &str, trim: bool) -> Result<&str> {
        assert_not_empty(self, name, trim)?;
        Ok(self)
    }
}

/// Membership assertions for types with a declared member table.
pub trait EnumAssertExt: EnumMembers {
    /// Returns `self` if it is a valid member of its enumeration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the value is not valid.
    fn assert_member(self, name: &str) -> Result<Self> {
        assert_enum_member(self, name)?;
        Ok(self)
    }

    /// Returns `self` if it is permitted by `valid`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the value is not permitted.
    fn assert_member_of(self, name: &str, valid: &[Self]) -> Result<Self> {
        assert_enum_member_of(self, name, valid)?;
        Ok(self)
    }
}

impl<E: EnumMembers> EnumAssertExt for E {}
