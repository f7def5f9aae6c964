//! Null-safe, ordered event dispatch.
//!
//! The dispatch model is an explicit ordered listener list owned by the publisher:
//! [`EventChain`] holds listeners in registration order, [`EventChain::subscribe`]
//! returns a [`ListenerToken`] that later removes the listener, and the raise
//! operations walk the list in order. An empty chain is always a no-op to raise.
//!
//! # Key Components
//!
//! - [`EventChain`] - the ordered listener list for one dispatch point
//! - [`EventChain::raise`] / [`EventChain::raise_with`] - synchronous dispatch with
//!   eager or lazily constructed payloads
//! - [`EventChain::raise_async`] / [`EventChain::raise_async_with`] - fire-and-forget
//!   dispatch on a background worker, with an optional completion callback
//! - [`dynamic`] - late-bound dispatch for listeners whose signature does not match
//!   the canonical `(sender, args)` shape
//!
//! # Ordering
//!
//! Listeners within one chain always run in registration order, synchronously or
//! asynchronously. The completion callback of an asynchronous raise fires strictly
//! after every listener of that raise has finished; the scheduling caller's own
//! thread proceeds independently of both.
//!
//! # Capture Semantics
//!
//! An asynchronous raise snapshots the listener list at scheduling time. A listener
//! removed after the raise was scheduled, but before the worker runs, is still
//! invoked by that raise.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use trinity::event::{EventChain, Sender};
//!
//! let mut chain = EventChain::<String>::new();
//! chain.subscribe(|_sender: &Sender, args: &String| {
//!     assert_eq!(args.as_str(), "payload");
//! });
//!
//! let sender: Sender = Arc::new("publisher");
//! chain.raise(&sender, &"payload".to_string());
//! ```

use std::{
    any::Any,
    sync::Arc,
    thread::{self, JoinHandle},
};

use crate::{argument::ext::OptionAssertExt, Result};

pub mod dynamic;

pub use dynamic::{DynListener, DynamicChain};

/// The opaque originator of an event, shared with every listener.
pub type Sender = Arc<dyn Any + Send + Sync>;

/// A subscribed callback, invoked with the sender and the event payload.
pub type Listener<A> = Arc<dyn Fn(&Sender, &A) + Send + Sync>;

/// Callback fired once an asynchronous raise has invoked every listener.
///
/// Receives the opaque state token supplied at scheduling time.
pub type CompletionCallback = Box<dyn FnOnce(Option<Sender>) + Send>;

/// Identifies one subscription within a chain, for later removal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerToken(u64);

/// An ordered set of listeners subscribed to one dispatch point.
///
/// The publisher owns the chain. Raising an empty chain is a no-op, which makes
/// the raise sites null-safe without explicit checks.
pub struct EventChain<A> {
    entries: Vec<(ListenerToken, Listener<A>)>,
    next_token: u64,
}

impl<A> Default for EventChain<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> EventChain<A> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        EventChain {
            entries: Vec::new(),
            next_token: 0,
        }
    }

    /// Appends a listener to the chain and returns its removal token.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerToken
    where
        F: Fn(&Sender, &A) + Send + Sync + 'static,
    {
        self.subscribe_arc(Arc::new(listener))
    }

    /// Appends an already-shared listener to the chain and returns its removal token.
    pub fn subscribe_arc(&mut self, listener: Listener<A>) -> ListenerToken {
        let token = ListenerToken(self.next_token);
        self.next_token += 1;
        self.entries.push((token, listener));
        token
    }

    /// Removes the listener identified by `token`.
    ///
    /// Returns `true` when a listener was removed, `false` when the token did not
    /// match any subscription (already removed, or from another chain).
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

    /// Invokes every listener in registration order with the given sender and
    /// payload, on the calling thread. A no-op for an empty chain.
    pub fn raise(&self, sender: &Sender, args: &A) {
        for (_, listener) in &self.entries {
            listener(sender, args);
        }
    }

    /// Invokes every listener with a lazily constructed payload.
    ///
    /// The factory is invoked exactly once, before any listener runs, and only when
    /// the chain is non-empty. The factory itself is validated before the chain's
    /// emptiness is considered, so an absent factory fails even on an empty chain.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NullArgument`] when `create` is `None`.
    pub fn raise_with<F>(&self, sender: &Sender, create: Option<F>) -> Result<()>
    where
        F: FnOnce() -> A,
    {
        let create = require_factory(create)?;

        if self.entries.is_empty() {
            return Ok(());
        }

        let args = create();
        self.raise(sender, &args);

        Ok(())
    }

    /// Schedules an asynchronous raise and returns immediately.
    ///
    /// The listener list is captured at this moment; later subscriptions or removals
    /// do not affect the scheduled raise. Listeners run in registration order on a
    /// background worker, after which the optional completion callback fires with
    /// the supplied state token. Returns `None` without scheduling anything when the
    /// chain is empty (the completion callback does not fire in that case).
    pub fn raise_async(
        &self,
        sender: Sender,
        args: Arc<A>,
        completion: Option<CompletionCallback>,
        state: Option<Sender>,
    ) -> Option<JoinHandle<()>>
    where
        A: Send + Sync + 'static,
    {
        if self.entries.is_empty() {
            return None;
        }

        let listeners = self.snapshot();

        Some(thread::spawn(move || {
            for listener in &listeners {
                listener(&sender, &args);
            }

            if let Some(callback) = completion {
                callback(state);
            }
        }))
    }

    /// Schedules an asynchronous raise with a lazily constructed payload.
    ///
    /// The factory precondition is enforced eagerly, on the scheduling thread; the
    /// factory itself runs on the worker, and only when the captured chain is
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NullArgument`] when `create` is `None`.
    pub fn raise_async_with<F>(
        &self,
        sender: Sender,
        create: Option<F>,
        completion: Option<CompletionCallback>,
        state: Option<Sender>,
    ) -> Result<Option<JoinHandle<()>>>
    where
        F: FnOnce() -> A + Send + 'static,
        A: Send + Sync + 'static,
    {
        let create = require_factory(create)?;

        if self.entries.is_empty() {
            return Ok(None);
        }

        let listeners = self.snapshot();

        Ok(Some(thread::spawn(move || {
            let args = create();

            for listener in &listeners {
                listener(&sender, &args);
            }

            if let Some(callback) = completion {
                callback(state);
            }
        })))
    }

    fn snapshot(&self) -> Vec<Listener<A>> {
        self.entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

fn require_factory<F>(create: Option<F>) -> Result<F> {
    create.assert_not_none("create_event_args")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc, Mutex,
    };

    fn sender() -> Sender {
        Arc::new("sender")
    }

    #[test]
    fn raise_invokes_listeners_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut chain = EventChain::<u32>::new();

        for id in 0..3 {
            let order = Arc::clone(&order);
            chain.subscribe(move |_, args: &u32| {
                order.lock().unwrap().push((id, *args));
            });
        }

        chain.raise(&sender(), &7);

        let order = order.lock().unwrap();
        assert_eq!(*order, vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn raise_on_empty_chain_is_noop() {
        let chain = EventChain::<u32>::new();
        chain.raise(&sender(), &1);
    }

    #[test]
    fn listeners_receive_same_sender() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = EventChain::<()>::new();

        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            chain.subscribe(move |s: &Sender, _| {
                seen.lock().unwrap().push(Arc::as_ptr(s) as *const () as usize);
            });
        }

        chain.raise(&sender(), &());

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn unsubscribe_removes_listener() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut chain = EventChain::<()>::new();

        let calls_a = Arc::clone(&calls);
        let token = chain.subscribe(move |_, _| {
            calls_a.fetch_add(1, Ordering::SeqCst);
        });

        assert!(chain.unsubscribe(token));
        assert!(!chain.unsubscribe(token));

        chain.raise(&sender(), &());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn raise_with_invokes_factory_once_before_listeners() {
        let factory_calls = Arc::new(AtomicUsize::new(0));
        let listener_calls = Arc::new(AtomicUsize::new(0));
        let mut chain = EventChain::<u32>::new();

        for _ in 0..3 {
            let listener_calls = Arc::clone(&listener_calls);
            let factory_calls = Arc::clone(&factory_calls);
            chain.subscribe(move |_, args: &u32| {
                // the factory has already run exactly once by the time any listener sees the payload
                assert_eq!(factory_calls.load(Ordering::SeqCst), 1);
                assert_eq!(*args, 42);
                listener_calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        let factory_calls_f = Arc::clone(&factory_calls);
        chain
            .raise_with(
                &sender(),
                Some(move || {
                    factory_calls_f.fetch_add(1, Ordering::SeqCst);
                    42
                }),
            )
            .unwrap();

        assert_eq!(factory_calls.load(Ordering::SeqCst), 1);
        assert_eq!(listener_calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn raise_with_never_invokes_factory_on_empty_chain() {
        let factory_calls = Arc::new(AtomicUsize::new(0));
        let chain = EventChain::<u32>::new();

        let factory_calls_f = Arc::clone(&factory_calls);
        chain
            .raise_with(
                &sender(),
                Some(move || {
                    factory_calls_f.fetch_add(1, Ordering::SeqCst);
                    1
                }),
            )
            .unwrap();

        assert_eq!(factory_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn raise_with_requires_factory_even_on_empty_chain() {
        let chain = EventChain::<u32>::new();
        let err = chain
            .raise_with(&sender(), None::<fn() -> u32>)
            .unwrap_err();
        assert!(matches!(err, Error::NullArgument { name } if name == "create_event_args"));
    }

    #[test]
    fn raise_with_requires_factory_on_populated_chain() {
        let mut chain = EventChain::<u32>::new();
        chain.subscribe(|_, _| {});
        assert!(chain.raise_with(&sender(), None::<fn() -> u32>).is_err());
    }

    #[test]
    fn raise_async_runs_listeners_then_completion() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut chain = EventChain::<u32>::new();

        for id in 0..3 {
            let order = Arc::clone(&order);
            chain.subscribe(move |_, _| {
                order.lock().unwrap().push(id);
            });
        }

        let (tx, rx) = mpsc::channel();
        let order_c = Arc::clone(&order);
        let completion: CompletionCallback = Box::new(move |state| {
            order_c.lock().unwrap().push(99);
            tx.send(state).unwrap();
        });

        let state: Sender = Arc::new(1234u32);
        let handle = chain
            .raise_async(sender(), Arc::new(0), Some(completion), Some(state))
            .unwrap();

        let received = rx.recv().unwrap().unwrap();
        handle.join().unwrap();

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 99]);
        assert_eq!(*received.downcast_ref::<u32>().unwrap(), 1234);
    }

    #[test]
    fn raise_async_on_empty_chain_schedules_nothing() {
        let chain = EventChain::<u32>::new();
        let completion: CompletionCallback = Box::new(|_| panic!("must not fire"));
        assert!(chain
            .raise_async(sender(), Arc::new(0), Some(completion), None)
            .is_none());
    }

    #[test]
    fn raise_async_captures_chain_at_schedule_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut chain = EventChain::<u32>::new();

        let calls_a = Arc::clone(&calls);
        let token = chain.subscribe(move |_, _| {
            calls_a.fetch_add(1, Ordering::SeqCst);
        });

        let handle = chain.raise_async(sender(), Arc::new(0), None, None).unwrap();

        // removal after scheduling does not affect the in-flight raise
        chain.unsubscribe(token);

        handle.join().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn raise_async_with_runs_factory_on_worker() {
        let main_thread = thread::current().id();
        let mut chain = EventChain::<u32>::new();
        chain.subscribe(|_, args: &u32| assert_eq!(*args, 9));

        let handle = chain
            .raise_async_with(
                sender(),
                Some(move || {
                    assert_ne!(thread::current().id(), main_thread);
                    9
                }),
                None,
                None,
            )
            .unwrap()
            .unwrap();

        handle.join().unwrap();
    }

    #[test]
    fn raise_async_with_requires_factory_even_on_empty_chain() {
        let chain = EventChain::<u32>::new();
        let err = chain
            .raise_async_with(sender(), None::<fn() -> u32>, None, None)
            .unwrap_err();
        assert!(matches!(err, Error::NullArgument { name } if name == "create_event_args"));
    }
}
