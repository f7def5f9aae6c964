//! # trinity Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits from the trinity library. Import it to get quick access to the
//! assertion helpers, event chains, and catalog resolution types in one line.
//!
//! ```rust
//! use trinity::prelude::*;
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all trinity operations
pub use crate::Error;

/// The result type used throughout trinity
pub use crate::Result;

/// A resolved, caller-owned error value
pub use crate::RaisedError;

// ================================================================================================
// Argument Assertions
// ================================================================================================

/// Free-function assertion helpers
pub use crate::argument::{
    assert_enum_member, assert_enum_member_of, assert_enum_member_raw, assert_items_not_none,
    assert_not_empty, assert_not_none, assert_not_none_or_empty, assert_seq_not_empty,
};

/// Declared member tables for enum validation
pub use crate::argument::EnumMembers;

/// Method-call facades over the assertions
pub use crate::argument::ext::{EnumAssertExt, OptionAssertExt, StrAssertExt};

// ================================================================================================
// Event Dispatch
// ================================================================================================

/// Listener chains and dispatch types
pub use crate::event::{
    CompletionCallback, DynListener, DynamicChain, EventChain, Listener, ListenerToken, Sender,
};

// ================================================================================================
// Catalog Resolution
// ================================================================================================

/// Catalog documents, registries, and the resolver
pub use crate::catalog::{
    CatalogDocument, CatalogRegistry, CatalogSource, CtorArg, CtorArgs, CtorParam, Descriptor,
    ErrorResolver, RaisableRegistry, RaisableType, RaisableTypeBuilder, ResolveRequest,
};
