//! Resolution of catalog entries into concrete error values.
//!
//! An [`ErrorResolver`] is scoped to one invoking context (the type on whose
//! behalf entries are looked up) within one module's catalog. Resolution walks a
//! fixed pipeline: fetch the module's parsed catalog, look up the descriptor for
//! (context, key), resolve the descriptor's target type in the raisable type
//! registry, format the message template, assemble the constructor-argument list
//! in fixed order (message, extra constructor arguments, inner error), select a
//! matching constructor, and construct. Every step fails loudly with an error
//! that names the offending key or type; catalog defects are meant to surface
//! during development, not to be handled in production code.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use trinity::catalog::{CatalogRegistry, CatalogSource, ErrorResolver, RaisableRegistry, RaisableType};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("{0}")]
//! struct WidgetError(String);
//!
//! let catalogs = Arc::new(CatalogRegistry::new());
//! catalogs.register(
//!     "my_app",
//!     CatalogSource::from_static(
//!         r#"<catalog>
//!             <group type="my_app::Widget">
//!                 <entry key="jammed" type="my_app::WidgetError">The widget is jammed.</entry>
//!             </group>
//!         </catalog>"#,
//!     ),
//! );
//!
//! let types = Arc::new(RaisableRegistry::new());
//! RaisableType::builder("my_app::WidgetError")
//!     .message(WidgetError)
//!     .register(&types);
//!
//! let resolver = ErrorResolver::with_registries("my_app", "my_app::Widget", catalogs, types);
//! let error = resolver.resolve("jammed").unwrap();
//! assert_eq!(error.to_string(), "The widget is jammed.");
//! ```

use std::{any::Any, borrow::Cow, fmt, sync::Arc};

use super::{
    document::format_template,
    registry::CatalogRegistry,
    types::{CtorArg, RaisableRegistry, TypeLookup},
};
use crate::{Error, RaisedError, Result};

/// Resolves catalog entries into error values on behalf of one invoking context.
///
/// Constructed with the owning module's identity and the context type's full
/// name; by default it consults the process-wide catalog and type registries.
pub struct ErrorResolver {
    module: Cow<'static, str>,
    context: Cow<'static, str>,
    catalogs: Arc<CatalogRegistry>,
    types: Arc<RaisableRegistry>,
}

impl ErrorResolver {
    /// Creates a resolver over the process-wide registries.
    pub fn new(
        module: impl Into<Cow<'static, str>>,
        context: impl Into<Cow<'static, str>>,
    ) -> Self {
        ErrorResolver::with_registries(
            module,
            context,
            CatalogRegistry::global(),
            RaisableRegistry::global(),
        )
    }

    /// Creates a resolver over explicit registries.
    pub fn with_registries(
        module: impl Into<Cow<'static, str>>,
        context: impl Into<Cow<'static, str>>,
        catalogs: Arc<CatalogRegistry>,
        types: Arc<RaisableRegistry>,
    ) -> Self {
        ErrorResolver {
            module: module.into(),
            context: context.into(),
            catalogs,
            types,
        }
    }

    /// The module whose catalog this resolver consults.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// The invoking context entries are scoped to.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Starts a resolution request for `key`, to be decorated with message
    /// arguments, extra constructor arguments, or an inner error.
    #[must_use]
    pub fn request<'a>(&'a self, key: &'a str) -> ResolveRequest<'a> {
        ResolveRequest {
            resolver: self,
            key,
            message_args: Vec::new(),
            values: Vec::new(),
            inner: None,
        }
    }

    /// Resolves the entry for `key` with no message or constructor arguments.
    ///
    /// # Errors
    ///
    /// Returns the catalog-defect errors described at [`ResolveRequest::resolve`].
    pub fn resolve(&self, key: &str) -> Result<RaisedError> {
        self.request(key).resolve()
    }

    /// Resolves the entry for `key` and raises it immediately.
    ///
    /// # Errors
    ///
    /// Always returns `Err`: the resolved error wrapped as [`Error::Raised`], or
    /// the catalog defect that prevented resolution.
    pub fn throw<T>(&self, key: &str) -> Result<T> {
        self.request(key).throw()
    }

    /// Resolves and raises the entry for `key` when `condition` holds; does
    /// nothing at all otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Err` exactly when `condition` is `true`, as for
    /// [`ErrorResolver::throw`].
    pub fn throw_if(&self, condition: bool, key: &str) -> Result<()> {
        self.request(key).throw_if(condition)
    }
}

impl fmt::Debug for ErrorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorResolver")
            .field("module", &self.module)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// A single resolution request under construction.
///
/// Created by [`ErrorResolver::request`]; consumed by one of the terminal
/// operations [`ResolveRequest::resolve`], [`ResolveRequest::throw`], or
/// [`ResolveRequest::throw_if`].
pub struct ResolveRequest<'a> {
    resolver: &'a ErrorResolver,
    key: &'a str,
    message_args: Vec<String>,
    values: Vec<Arc<dyn Any + Send + Sync>>,
    inner: Option<RaisedError>,
}

impl ResolveRequest<'_> {
    /// Appends a positional message argument, substituted into the entry's
    /// template by index.
    #[must_use]
    pub fn message_arg(mut self, value: impl fmt::Display) -> Self {
        self.message_args.push(value.to_string());
        self
    }

    /// Appends an extra constructor argument, passed to the selected
    /// constructor after the message.
    #[must_use]
    pub fn constructor_arg(mut self, value: impl Any + Send + Sync) -> Self {
        self.values.push(Arc::new(value));
        self
    }

    /// Sets the inner (source) error, passed to the selected constructor last.
    #[must_use]
    pub fn inner(mut self, inner: impl Into<RaisedError>) -> Self {
        self.inner = Some(inner.into());
        self
    }

    /// Resolves the request into a constructed error value.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] when the key is empty
    /// - [`Error::ConfigurationMissing`] / [`Error::CatalogMalformed`] when the
    ///   module's catalog cannot be loaded
    /// - [`Error::UnknownKey`] when no entry exists for (context, key)
    /// - [`Error::MissingTypeAttribute`] when the entry declares no target type
    /// - [`Error::TypeLoadFailure`] / [`Error::NotRaisable`] when the target type
    ///   is unregistered or not an error type
    /// - [`Error::TemplateFormat`] when the message template cannot be formatted
    /// - [`Error::NoMatchingConstructor`] when no registered constructor accepts
    ///   the assembled argument list
    pub fn resolve(self) -> Result<RaisedError> {
        let resolver = self.resolver;
        let key = self.key;

        crate::argument::assert_not_empty(key, "key", false)?;

        let document = resolver.catalogs.document(&resolver.module)?;

        let descriptor = document
            .descriptor(&resolver.context, key)
            .ok_or_else(|| Error::UnknownKey {
                key: key.to_string(),
                path: format!(
                    "/catalog/group[@type=\"{}\"]/entry[@key=\"{}\"]",
                    resolver.context, key
                ),
            })?;

        let type_name = descriptor
            .type_name()
            .ok_or_else(|| Error::MissingTypeAttribute {
                key: key.to_string(),
            })?;

        let raisable = match resolver.types.lookup(type_name) {
            TypeLookup::Raisable(raisable) => raisable,
            TypeLookup::Opaque => {
                return Err(Error::NotRaisable {
                    type_name: type_name.to_string(),
                    key: key.to_string(),
                })
            }
            TypeLookup::Missing => {
                return Err(Error::TypeLoadFailure {
                    type_name: type_name.to_string(),
                    key: key.to_string(),
                })
            }
        };

        let message = format_template(key, descriptor.template(), &self.message_args)?;

        // fixed argument order: message, then extra constructor args, then inner
        let mut args = Vec::with_capacity(2 + self.values.len());
        args.push(CtorArg::Message(message));
        args.extend(self.values.into_iter().map(CtorArg::Value));
        if let Some(inner) = self.inner {
            args.push(CtorArg::Inner(inner));
        }

        raisable
            .construct(args)
            .ok_or_else(|| Error::NoMatchingConstructor {
                type_name: type_name.to_string(),
                key: key.to_string(),
            })
    }

    /// Resolves the request and raises the result immediately.
    ///
    /// # Errors
    ///
    /// Always returns `Err`, as for [`ErrorResolver::throw`].
    pub fn throw<T>(self) -> Result<T> {
        Err(Error::Raised(self.resolve()?))
    }

    /// Resolves and raises only when `condition` holds.
    ///
    /// When `condition` is `false` the request is dropped without touching the
    /// catalog at all.
    ///
    /// # Errors
    ///
    /// Returns `Err` exactly when `condition` is `true`.
    pub fn throw_if(self, condition: bool) -> Result<()> {
        if condition {
            return self.throw();
        }

        Ok(())
    }
}
