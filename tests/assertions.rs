//! Integration tests for the argument assertion surface.
//!
//! Exercises the free functions and the extension-trait facades the way a
//! consuming crate would: guarding the top of public functions and validating
//! enum-typed configuration coming from untrusted input.

use trinity::{enum_members, prelude::*};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
}

enum_members!(LogLevel { Off, Error, Warn, Info, Debug });

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    struct OpenOptions: u32 {
        const Read   = 1;
        const Write  = 2;
        const Create = 4;
    }
}

enum_members!(flags OpenOptions { Read, Write, Create });

fn open(path: Option<&str>, options: OpenOptions) -> trinity::Result<String> {
    let path = path.assert_not_none("path")?;
    let path = path.assert_not_empty("path", true)?;
    let options = options.assert_member("options")?;

    Ok(format!("{path}:{}", options.bits()))
}

#[test]
fn guarded_function_accepts_valid_arguments() {
    let opened = open(Some("/tmp/data"), OpenOptions::Read | OpenOptions::Write).unwrap();
    assert_eq!(opened, "/tmp/data:3");
}

#[test]
fn guarded_function_names_the_offending_argument() {
    let err = open(None, OpenOptions::Read).unwrap_err();
    assert_eq!(err.to_string(), "Value cannot be null (argument 'path')");

    let err = open(Some("   "), OpenOptions::Read).unwrap_err();
    assert_eq!(err.to_string(), "Cannot be null or empty. (argument 'path')");
}

#[test]
fn guarded_function_rejects_undeclared_flag_bits() {
    let err = open(Some("/tmp/data"), OpenOptions::from_bits_retain(64)).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Enum value '64' is not valid for flags enumeration"));
}

#[test]
fn allow_list_restricts_levels_per_call_site() {
    // only Error and Warn are meaningful for this hypothetical sink
    let valid = [LogLevel::Error, LogLevel::Warn];

    assert!(LogLevel::Warn.assert_member_of("level", &valid).is_ok());

    let err = LogLevel::Debug.assert_member_of("level", &valid).unwrap_err();
    assert!(err.to_string().contains("not permitted in this context"));
}

#[test]
fn raw_validation_rejects_untrusted_integers() {
    assert!(assert_enum_member_raw::<LogLevel>(3, "level").is_ok());
    assert!(assert_enum_member_raw::<LogLevel>(250, "level").is_err());
}

#[test]
fn sequence_assertions_cover_absence_and_items() {
    let batch = [Some("a"), Some("b")];
    assert!(assert_items_not_none(Some(&batch[..]), "batch", true).is_ok());

    let holey = [Some("a"), None];
    assert!(assert_items_not_none(Some(&holey[..]), "batch", true).is_err());

    assert!(assert_seq_not_empty::<u8>(Some(&[]), "batch").is_err());
}
