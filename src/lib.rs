#![deny(missing_docs)]
#![allow(clippy::too_many_arguments)]

//! # trinity
//!
//! Cross-cutting helpers for the three chores every codebase repeats: validating
//! arguments, dispatching events, and constructing errors from externalized
//! metadata. Each helper is a small, independent set of stateless (or trivially
//! cached) functions; there is no pipeline or engine here, just the plumbing that
//! otherwise gets rewritten at the top of every public function.
//!
//! ## Features
//!
//! - **Argument assertions** - presence, emptiness, and enum-membership checks
//!   that fail with self-describing errors naming the offending argument
//! - **Enum member tables** - compile-time declared member tables (via
//!   [`enum_members!`]) drive flags and non-flags validation without reflection
//! - **Ordered event dispatch** - null-safe listener chains with synchronous,
//!   lazy-payload, and fire-and-forget asynchronous raising
//! - **Catalog-driven errors** - per-module XML catalogs of error types and
//!   message templates, resolved through an explicit type registry and cached
//!   once per process
//!
//! ## Quick Start
//!
//! Add `trinity` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! trinity = "0.1"
//! ```
//!
//! ### Validating arguments
//!
//! ```rust
//! use trinity::argument;
//!
//! fn display_details(name: Option<&str>) -> trinity::Result<()> {
//!     argument::assert_not_none_or_empty(name, "name", true)?;
//!     // name is known to be present and non-blank
//!     Ok(())
//! }
//!
//! assert!(display_details(None).is_err());
//! ```
//!
//! ### Raising events
//!
//! ```rust
//! use std::sync::Arc;
//! use trinity::event::{EventChain, Sender};
//!
//! let mut closed = EventChain::<u32>::new();
//! let token = closed.subscribe(|_sender: &Sender, id: &u32| {
//!     println!("widget {id} closed");
//! });
//!
//! let sender: Sender = Arc::new("publisher");
//! closed.raise(&sender, &17);
//! closed.unsubscribe(token);
//! ```
//!
//! ### Resolving catalog errors
//!
//! Modules register their catalog and error types once at startup, then raise
//! sites stay declarative; see the [`catalog`] module documentation for a
//! complete example.
//!
//! ## Architecture
//!
//! `trinity` is organized into three independent modules:
//!
//! - [`argument`] - assertion helpers and the [`argument::EnumMembers`] tables
//! - [`event`] - listener chains and late-bound dispatch
//! - [`catalog`] - catalog documents, registries, and the error resolver
//!
//! The event and catalog modules use the argument assertions for their own
//! preconditions; no other coupling exists between the three.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Assertion failures carry
//! the argument's name; catalog failures carry the offending key or type name,
//! and are deliberately unrecoverable-by-design: they indicate a defect in a
//! catalog or its registrations and are meant to surface during development.

#[macro_use]
mod macros;

mod error;

pub mod argument;
pub mod catalog;
pub mod event;

/// Convenient re-exports of the most commonly used types and traits.
pub mod prelude;

pub use error::{Error, RaisedError};

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
