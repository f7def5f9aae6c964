/// Declares the member table for an enumeration so it can be validated by
/// [`crate::argument::assert_enum_member`] and friends.
///
/// The macro implements [`crate::argument::EnumMembers`] for an existing type.
/// Two shapes are supported:
///
/// - A plain C-like enum, listing every declared variant:
///
/// ```rust
/// #[derive(Clone, Copy)]
/// enum Weekday {
///     Sunday = 0,
///     Monday = 1,
/// }
///
/// trinity::enum_members!(Weekday { Sunday, Monday });
/// ```
///
/// - A flags type built with the `bitflags` crate, marked with the `flags`
///   keyword. Member values are taken from the declared constants:
///
/// ```rust,ignore
/// bitflags::bitflags! {
///     #[derive(Clone, Copy)]
///     pub struct FilterOptions: u32 {
///         const None  = 0;
///         const One   = 1;
///         const Two   = 2;
///         const Three = 4;
///         const Four  = 8;
///     }
/// }
///
/// trinity::enum_members!(flags FilterOptions { None, One, Two, Three, Four });
/// ```
///
/// The generated `TYPE_NAME` is the full module path of the type, which is what
/// appears in validation failure messages.
#[macro_export]
macro_rules! enum_members {
    (flags $ty:ident { $($member:ident),+ $(,)? }) => {
        impl $crate::argument::EnumMembers for $ty {
            const TYPE_NAME: &'static str =
                concat!(module_path!(), "::", stringify!($ty));
            const IS_FLAGS: bool = true;
            const MEMBERS: &'static [(&'static str, i64)] =
                &[$((stringify!($member), $ty::$member.bits() as i64)),+];

            fn raw(self) -> i64 {
                self.bits() as i64
            }
        }
    };
    ($ty:ident { $($member:ident),+ $(,)? }) => {
        impl $crate::argument::EnumMembers for $ty {
            const TYPE_NAME: &'static str =
                concat!(module_path!(), "::", stringify!($ty));
            const IS_FLAGS: bool = false;
            const MEMBERS: &'static [(&'static str, i64)] =
                &[$((stringify!($member), $ty::$member as i64)),+];

            fn raw(self) -> i64 {
                self as i64
            }
        }
    };
}
