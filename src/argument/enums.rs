//! Membership validation for enumerations and flags types.
//!
//! Rust has no runtime reflection over enum variants, so validation is driven by
//! an explicit per-type member table declared once with [`crate::enum_members!`].
//! The table records whether the type is a flags (bitmask) type and the ordered
//! list of declared `(name, value)` pairs; the validation algorithms operate on
//! those tables alone.
//!
//! Flags values are validated with a bit-clearing test: the value is valid when
//! removing every declared member leaves no bits set (a zero value is only valid
//! when zero itself is declared). Ordinary enumerations require an exact match
//! against a declared member.

use crate::{Error, Result};

/// The declared member table of an enumeration or flags type.
///
/// Implemented via [`crate::enum_members!`] rather than by hand; the validation
/// functions in this module consume the table.
pub trait EnumMembers: Copy {
    /// Full name of the type, as shown in validation failure messages
    const TYPE_NAME: &'static str;
    /// Whether the members are intended to be combined via bitwise OR
    const IS_FLAGS: bool;
    /// Declared members as `(name, value)` pairs, in declaration order
    const MEMBERS: &'static [(&'static str, i64)];

    /// Returns the numeric value carried by this instance
    fn raw(self) -> i64;
}

/// Ensures that `value` is a valid member of its enumeration.
///
/// For a flags type, any combination of declared members is accepted. For an
/// ordinary enumeration, `value` must equal one of the declared members.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `value` is not valid for the type.
pub fn assert_enum_member<E: EnumMembers>(value: E, name: &str) -> Result<()> {
    assert_enum_member_raw::<E>(value.raw(), name)
}

/// Ensures that the raw numeric value `raw` is a valid member of the enumeration
/// `E`, without requiring a typed instance.
///
/// This is the entry point for untrusted integers (wire data, FFI, configuration)
/// that have not yet been converted to the typed enumeration.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `raw` is not valid for the type.
pub fn assert_enum_member_raw<E: EnumMembers>(raw: i64, name: &str) -> Result<()> {
    if E::IS_FLAGS {
        if !flags_value_covered(raw, E::MEMBERS.iter().map(|(_, value)| *value)) {
            return Err(invalid::<E>(name, raw, "is not valid for flags enumeration"));
        }
    } else if !is_declared::<E>(raw) {
        return Err(invalid::<E>(name, raw, "is not defined for enumeration"));
    }

    Ok(())
}

/// Ensures that `value` is permitted by the caller-supplied set `valid`, using
/// the same flags/non-flags split as [`assert_enum_member`].
///
/// For flags types, `value` must be some combination of the supplied values.
/// For ordinary enumerations, `value` must equal one of the supplied values;
/// the failure message distinguishes a value that is not a member of the type at
/// all from a declared member that is merely not permitted in this context.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when `value` is not permitted.
pub fn assert_enum_member_of<E: EnumMembers>(value: E, name: &str, valid: &[E]) -> Result<()> {
    let raw = value.raw();

    if E::IS_FLAGS {
        if !flags_value_covered(raw, valid.iter().map(|v| v.raw())) {
            return Err(invalid::<E>(
                name,
                raw,
                "is not allowed for flags enumeration",
            ));
        }

        return Ok(());
    }

    if valid.iter().any(|v| v.raw() == raw) {
        return Ok(());
    }

    if !is_declared::<E>(raw) {
        return Err(invalid::<E>(name, raw, "is not defined for enumeration"));
    }

    Err(Error::InvalidArgument {
        name: name.to_string(),
        message: format!(
            "Enum value '{}' is defined for enumeration '{}' but it is not permitted in this context.",
            format_value::<E>(raw),
            E::TYPE_NAME
        ),
    })
}

/// Renders a raw value the way it should appear in a failure message: a declared
/// member by name, a representable flags combination as a comma-separated list of
/// member names, anything else as the bare number.
pub fn format_value<E: EnumMembers>(raw: i64) -> String {
    if let Some((name, _)) = E::MEMBERS.iter().find(|(_, value)| *value == raw) {
        return (*name).to_string();
    }

    if E::IS_FLAGS && raw != 0 {
        let mut remaining = raw;
        let mut names = Vec::new();

        for (name, value) in E::MEMBERS {
            if *value != 0 && remaining & value == *value {
                names.push(*name);
                remaining &= !value;
            }
        }

        if remaining == 0 && !names.is_empty() {
            return names.join(", ");
        }
    }

    raw.to_string()
}

/// Bit-clearing test: `raw` is covered iff removing every supplied value leaves
/// no bits set. Zero is only covered when zero itself is supplied.
fn flags_value_covered(raw: i64, values: impl Iterator<Item = i64>) -> bool {
    if raw == 0 {
        let mut values = values;
        return values.any(|value| value == 0);
    }

    let mut remaining = raw;

    for value in values {
        remaining &= !value;
    }

    remaining == 0
}

fn is_declared<E: EnumMembers>(raw: i64) -> bool {
    E::MEMBERS.iter().any(|(_, value)| *value == raw)
}

fn invalid<E: EnumMembers>(name: &str, raw: i64, reason: &str) -> Error {
    Error::InvalidArgument {
        name: name.to_string(),
        message: format!(
            "Enum value '{}' {} '{}'.",
            format_value::<E>(raw),
            reason,
            E::TYPE_NAME
        ),
    }
}
