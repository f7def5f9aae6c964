//! Registry of error types constructible from catalog entries.
//!
//! Rust has no runtime reflection, so the catalog cannot discover arbitrary
//! types by name the way a managed runtime can. Instead, every type a catalog
//! entry may name is registered up front under its full name, together with the
//! explicit list of constructors resolution is allowed to call. Constructor
//! selection then works like overload resolution: the resolver assembles its
//! argument list in fixed order (message first, then extra constructor
//! arguments, then the inner error) and picks the first registered constructor
//! whose parameters accept that list by arity and kind.
//!
//! Types can also be registered as *opaque*: present in the registry by name but
//! not constructible as an error. Naming an opaque type from a catalog entry is
//! reported distinctly from naming a type that is missing altogether.
//!
//! # Examples
//!
//! ```rust
//! use trinity::catalog::{RaisableRegistry, RaisableType};
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("{0}")]
//! struct WidgetError(String);
//!
//! let registry = RaisableRegistry::new();
//! RaisableType::builder("my_app::WidgetError")
//!     .message(|message| WidgetError(message))
//!     .register(&registry);
//! ```

use std::{
    any::{Any, TypeId},
    sync::{Arc, OnceLock},
};

use dashmap::DashMap;

use crate::RaisedError;

/// The kind of one declared constructor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtorParam {
    /// The formatted message; always the first parameter
    Message,
    /// An extra constructor argument of the given concrete type
    Value(TypeId),
    /// The inner (source) error; always the last parameter when declared
    Inner,
}

impl CtorParam {
    /// A [`CtorParam::Value`] parameter accepting the concrete type `T`.
    #[must_use]
    pub fn value_of<T: Any>() -> Self {
        CtorParam::Value(TypeId::of::<T>())
    }
}

/// One value in an assembled constructor-argument list.
pub enum CtorArg {
    /// The formatted message
    Message(String),
    /// A caller-supplied extra constructor argument
    Value(Arc<dyn Any + Send + Sync>),
    /// The inner (source) error
    Inner(RaisedError),
}

impl CtorArg {
    fn matches(&self, param: CtorParam) -> bool {
        match (self, param) {
            (CtorArg::Message(_), CtorParam::Message) | (CtorArg::Inner(_), CtorParam::Inner) => {
                true
            }
            (CtorArg::Value(value), CtorParam::Value(type_id)) => {
                value.as_ref().type_id() == type_id
            }
            _ => false,
        }
    }
}

/// The argument list handed to a constructor once selection has succeeded,
/// unpacked into its fixed-order parts.
pub struct CtorArgs {
    /// The formatted message
    pub message: String,
    /// Extra constructor arguments, in the order they were supplied
    pub values: Vec<Arc<dyn Any + Send + Sync>>,
    /// The inner error, when one was supplied
    pub inner: Option<RaisedError>,
}

impl CtorArgs {
    fn new(args: Vec<CtorArg>) -> Self {
        let mut message = String::new();
        let mut values = Vec::new();
        let mut inner = None;

        for arg in args {
            match arg {
                CtorArg::Message(m) => message = m,
                CtorArg::Value(v) => values.push(v),
                CtorArg::Inner(e) => inner = Some(e),
            }
        }

        CtorArgs {
            message,
            values,
            inner,
        }
    }

    /// Downcasts the extra constructor argument at `index` to `T`.
    #[must_use]
    pub fn value<T: Any + Clone>(&self, index: usize) -> Option<T> {
        self.values.get(index)?.downcast_ref::<T>().cloned()
    }
}

type BuildFn = Arc<dyn Fn(CtorArgs) -> RaisedError + Send + Sync>;

struct Constructor {
    params: Vec<CtorParam>,
    build: BuildFn,
}

/// A registered error type: its full name and the constructors resolution may
/// call on it.
pub struct RaisableType {
    full_name: String,
    constructors: Vec<Constructor>,
}

impl RaisableType {
    /// Starts declaring a raisable type registered under `full_name`.
    #[must_use]
    pub fn builder(full_name: impl Into<String>) -> RaisableTypeBuilder {
        RaisableTypeBuilder {
            inner: RaisableType {
                full_name: full_name.into(),
                constructors: Vec::new(),
            },
        }
    }

    /// The full name this type is registered under.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Selects the first constructor accepting `args` by arity and kind, and
    /// invokes it. Returns `None` when no declared constructor matches.
    pub(crate) fn construct(&self, args: Vec<CtorArg>) -> Option<RaisedError> {
        let constructor = self.constructors.iter().find(|c| {
            c.params.len() == args.len()
                && args.iter().zip(&c.params).all(|(arg, param)| arg.matches(*param))
        })?;

        Some((constructor.build)(CtorArgs::new(args)))
    }
}

/// Declares the constructors of a [`RaisableType`].
pub struct RaisableTypeBuilder {
    inner: RaisableType,
}

impl RaisableTypeBuilder {
    /// Declares a `(message)` constructor.
    #[must_use]
    pub fn message<E, F>(self, build: F) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(String) -> E + Send + Sync + 'static,
    {
        self.constructor(vec![CtorParam::Message], move |args| {
            Box::new(build(args.message))
        })
    }

    /// Declares a `(message, inner)` constructor.
    #[must_use]
    pub fn message_with_inner<E, F>(self, build: F) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        F: Fn(String, Option<RaisedError>) -> E + Send + Sync + 'static,
    {
        self.constructor(
            vec![CtorParam::Message, CtorParam::Inner],
            move |args| Box::new(build(args.message, args.inner)),
        )
    }

    /// Declares a constructor with an explicit parameter list.
    ///
    /// `build` is only invoked after the argument list has been matched against
    /// `params`, so it can rely on [`CtorArgs`] carrying the declared shape.
    #[must_use]
    pub fn constructor<F>(mut self, params: Vec<CtorParam>, build: F) -> Self
    where
        F: Fn(CtorArgs) -> RaisedError + Send + Sync + 'static,
    {
        self.inner.constructors.push(Constructor {
            params,
            build: Arc::new(build),
        });
        self
    }

    /// Registers the declared type with `registry`, replacing any previous
    /// registration under the same name.
    pub fn register(self, registry: &RaisableRegistry) {
        registry.register(self.inner);
    }

    /// Finishes the declaration without registering it.
    #[must_use]
    pub fn build(self) -> RaisableType {
        self.inner
    }
}

enum RegisteredType {
    Raisable(Arc<RaisableType>),
    Opaque,
}

/// Lookup result for a registered type name.
pub(crate) enum TypeLookup {
    /// The name is registered and constructible as an error
    Raisable(Arc<RaisableType>),
    /// The name is registered but is not an error type
    Opaque,
    /// The name is not registered at all
    Missing,
}

/// Name-indexed registry of the types catalog entries may reference.
///
/// Normally accessed through [`RaisableRegistry::global`]; independent instances
/// exist so tests can isolate their registrations.
#[derive(Default)]
pub struct RaisableRegistry {
    types: DashMap<String, RegisteredType>,
}

impl RaisableRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        RaisableRegistry::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<RaisableRegistry> {
        static GLOBAL: OnceLock<Arc<RaisableRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(RaisableRegistry::new())))
    }

    /// Registers a raisable type under its full name.
    pub fn register(&self, raisable: RaisableType) {
        self.types.insert(
            raisable.full_name.clone(),
            RegisteredType::Raisable(Arc::new(raisable)),
        );
    }

    /// Registers a name that resolves to a type which is not an error.
    ///
    /// Catalog entries naming an opaque type fail with a "not raisable" error
    /// rather than a "could not be located" one.
    pub fn register_opaque(&self, full_name: impl Into<String>) {
        self.types.insert(full_name.into(), RegisteredType::Opaque);
    }

    /// Returns `true` when `full_name` is registered, raisable or not.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.types.contains_key(full_name)
    }

    pub(crate) fn lookup(&self, full_name: &str) -> TypeLookup {
        match self.types.get(full_name).as_deref() {
            Some(RegisteredType::Raisable(raisable)) => TypeLookup::Raisable(Arc::clone(raisable)),
            Some(RegisteredType::Opaque) => TypeLookup::Opaque,
            None => TypeLookup::Missing,
        }
    }
}
