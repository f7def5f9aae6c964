//! Late-bound dispatch for listeners with non-canonical signatures.
//!
//! Most listeners take the canonical `(sender, args)` pair and belong in an
//! [`crate::event::EventChain`]. Occasionally a dispatch point has to carry
//! listeners whose shape is only known at runtime; a [`DynamicChain`] holds such
//! listeners as type-erased callables with a declared arity, and the raise checks
//! that declared arity against the two values it supplies before invoking.

use std::sync::Arc;

use super::{ListenerToken, Sender};
use crate::{Error, Result};

/// A type-erased listener with a declared parameter count.
#[derive(Clone)]
pub struct DynListener {
    arity: usize,
    invoke: Arc<dyn Fn(&[Sender]) + Send + Sync>,
}

impl DynListener {
    /// Creates a listener declaring `arity` parameters.
    ///
    /// The callable receives the supplied values as a slice whose length equals
    /// the declared arity.
    pub fn new<F>(arity: usize, invoke: F) -> Self
    where
        F: Fn(&[Sender]) + Send + Sync + 'static,
    {
        DynListener {
            arity,
            invoke: Arc::new(invoke),
        }
    }

    /// The parameter count this listener declares.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.arity
    }
}

/// An ordered set of late-bound listeners for one dispatch point.
pub struct DynamicChain {
    entries: Vec<(ListenerToken, DynListener)>,
    next_token: u64,
}

impl Default for DynamicChain {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        DynamicChain {
            entries: Vec::new(),
            next_token: 0,
        }
    }

    /// Appends a listener to the chain and returns its removal token.
    pub fn subscribe(&mut self, listener: DynListener) -> ListenerToken {
        let token = ListenerToken(self.next_token);
        self.next_token += 1;
        self.entries.push((token, listener));
        token
    }

    /// Removes the listener identified by `token`.
    pub fn unsubscribe(&mut self, token: ListenerToken) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(t, _)| *t != token);
        before != self.entries.len()
    }

    /// Number of subscribed listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no listeners are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes every listener in registration order with the sender/args pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentCountMismatch`] when a listener declares an arity
    /// other than two; listeners preceding the mismatching one have already run.
    pub fn raise(&self, sender: &Sender, args: &Sender) -> Result<()> {
        let supplied = [Arc::clone(sender), Arc::clone(args)];

        for (_, listener) in &self.entries {
            if listener.arity != supplied.len() {
                return Err(Error::ArgumentCountMismatch {
                    expected: listener.arity,
                    supplied: supplied.len(),
                });
            }

            (listener.invoke)(&supplied);
        }

        Ok(())
    }
}
