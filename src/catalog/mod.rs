//! Catalog-driven error construction.
//!
//! Error details (target type and message template) live in an XML catalog
//! embedded alongside each module rather than scattered through the code. A
//! catalog entry is addressed by the invoking context's type name and a string
//! key; resolving an entry constructs a concrete error value ready to raise.
//! Centralizing the details keeps messages consistent and reviewable in one
//! place, and makes a defective entry fail loudly the first time it is used.
//!
//! # Key Components
//!
//! - [`CatalogDocument`] / [`Descriptor`] - one module's parsed catalog and its
//!   entries
//! - [`CatalogRegistry`] / [`CatalogSource`] - process-wide load-once cache of
//!   parsed catalogs, keyed by module identity
//! - [`RaisableRegistry`] / [`RaisableType`] - the registered error types and
//!   constructors catalog entries may reference
//! - [`ErrorResolver`] / [`ResolveRequest`] - the resolution pipeline from
//!   (context, key) to a constructed error
//!
//! # Examples
//!
//! A module registers its catalog and error types once at startup:
//!
//! ```rust,ignore
//! CatalogRegistry::global().register("my_app", CatalogSource::from_static(include_str!("errors.xml")));
//! RaisableType::builder("my_app::WidgetError")
//!     .message(WidgetError::new)
//!     .register(&RaisableRegistry::global());
//! ```
//!
//! and raise sites stay declarative:
//!
//! ```rust,ignore
//! let resolver = ErrorResolver::new("my_app", "my_app::Widget");
//! resolver.throw_if(count > LIMIT, "too_many_widgets")?;
//! ```

mod document;
mod registry;
mod resolver;
mod types;

pub use document::{CatalogDocument, Descriptor};
pub use registry::{CatalogRegistry, CatalogSource};
pub use resolver::{ErrorResolver, ResolveRequest};
pub use types::{CtorArg, CtorArgs, CtorParam, RaisableRegistry, RaisableType, RaisableTypeBuilder};
