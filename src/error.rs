use thiserror::Error;

/// A fully constructed, caller-owned error produced by catalog resolution.
///
/// Resolved errors are ordinary boxed error objects so they can flow through
/// any `?`-based propagation path without this crate imposing its own error
/// type on callers.
pub type RaisedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into two layers:
///
/// - **Assertion and dispatch failures** ([`Error::NullArgument`],
///   [`Error::InvalidArgument`], [`Error::ArgumentCountMismatch`]) are surfaced to the
///   immediate caller and never recovered internally.
/// - **Catalog resolution failures** ([`Error::ConfigurationMissing`] through
///   [`Error::TemplateFormat`]) indicate a defect in an error catalog or its
///   registrations. They are deliberately loud: centralizing error metadata only pays off
///   if catalog mistakes surface immediately during development.
///
/// Every message embeds the offending key, type name, or argument label so a failure is
/// self-describing without inspecting the catalog source.
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was absent.
    ///
    /// Raised by the assertion helpers in [`crate::argument`] when an `Option`
    /// argument that must carry a value is `None`.
    #[error("Value cannot be null (argument '{name}')")]
    NullArgument {
        /// The name of the offending argument
        name: String,
    },

    /// An argument was present but failed validation.
    ///
    /// The message describes the specific violation, for example an empty string
    /// or an enum value outside its declared members.
    #[error("{message} (argument '{name}')")]
    InvalidArgument {
        /// The name of the offending argument
        name: String,
        /// Description of the violated constraint
        message: String,
    },

    /// A dynamically dispatched listener declared a signature that cannot accept
    /// the supplied arguments.
    #[error("Listener expects {expected} argument(s) but {supplied} were supplied")]
    ArgumentCountMismatch {
        /// Arity declared by the listener
        expected: usize,
        /// Number of arguments supplied by the raise
        supplied: usize,
    },

    /// No catalog source is registered for the requested module, or its loader
    /// produced no data.
    #[error("Error catalog could not be located for module '{module}'")]
    ConfigurationMissing {
        /// Identity of the module whose catalog was requested
        module: String,
    },

    /// The catalog XML for a module failed to parse.
    #[error("Error catalog for module '{module}' is malformed: {message}")]
    CatalogMalformed {
        /// Identity of the module whose catalog was loaded
        module: String,
        /// Description of the parse failure
        message: String,
    },

    /// No catalog entry exists for the requested key.
    ///
    /// The `path` field holds the catalog path the entry was expected at, in the
    /// form `/catalog/group[@type="…"]/entry[@key="…"]`.
    #[error("The error details for key '{key}' could not be found at {path}")]
    UnknownKey {
        /// The key that was looked up
        key: String,
        /// The catalog path the entry was expected at
        path: String,
    },

    /// The catalog entry does not declare a target type.
    #[error("The 'type' attribute could not be found for error with key '{key}'")]
    MissingTypeAttribute {
        /// The key of the offending entry
        key: String,
    },

    /// The target type named by a catalog entry is not present in the raisable
    /// type registry.
    #[error("Type '{type_name}' could not be located for error with key '{key}'")]
    TypeLoadFailure {
        /// The fully-qualified type name that failed to resolve
        type_name: String,
        /// The key of the offending entry
        key: String,
    },

    /// The target type is registered but is not an error-kind type.
    #[error("Type '{type_name}' for error with key '{key}' is not a raisable error type")]
    NotRaisable {
        /// The fully-qualified name of the non-raisable type
        type_name: String,
        /// The key of the offending entry
        key: String,
    },

    /// No registered constructor of the target type accepts the assembled
    /// argument list.
    #[error(
        "An appropriate constructor could not be found for error type '{type_name}', for error with key '{key}'"
    )]
    NoMatchingConstructor {
        /// The fully-qualified name of the target type
        type_name: String,
        /// The key of the offending entry
        key: String,
    },

    /// A message template and its positional arguments do not agree.
    #[error("Message template for key '{key}' could not be formatted: {message}")]
    TemplateFormat {
        /// The key whose template failed to format
        key: String,
        /// Description of the formatting failure
        message: String,
    },

    /// A resolved catalog error raised through one of the `throw` entry points.
    ///
    /// This variant is transparent: it displays and sources as the resolved error
    /// itself, so `throw_if(cond, key)?` propagates the catalog-described error
    /// directly.
    #[error(transparent)]
    Raised(#[from] RaisedError),
}

impl Error {
    /// Returns the resolved error carried by [`Error::Raised`], if any.
    #[must_use]
    pub fn raised(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Raised(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }

    /// Consumes this error and returns the resolved error carried by
    /// [`Error::Raised`], or the original error otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Err(self)` when this is not a [`Error::Raised`] value.
    pub fn into_raised(self) -> Result<RaisedError, Error> {
        match self {
            Error::Raised(inner) => Ok(inner),
            other => Err(other),
        }
    }
}
