//! Integration tests for event dispatch.
//!
//! Models a publisher type owning its chains, the way a consuming crate would
//! wire them: typed payload events, a lazily built payload, and an
//! asynchronous notification with a completion callback.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc, Arc, Mutex,
};

use trinity::{
    event::{CompletionCallback, DynListener, DynamicChain, EventChain, Sender},
    Error,
};

#[derive(Debug, PartialEq, Eq)]
struct ProgressArgs {
    percent: u8,
}

struct Downloader {
    progress: EventChain<ProgressArgs>,
    finished: EventChain<()>,
}

impl Downloader {
    fn new() -> Self {
        Downloader {
            progress: EventChain::new(),
            finished: EventChain::new(),
        }
    }

    fn run(&self) -> trinity::Result<()> {
        let sender: Sender = Arc::new("downloader");

        for percent in [25u8, 50, 75, 100] {
            // payload built only if anyone is listening
            self.progress
                .raise_with(&sender, Some(|| ProgressArgs { percent }))?;
        }

        self.finished.raise(&sender, &());
        Ok(())
    }
}

#[test]
fn publisher_raises_typed_events_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));

    let mut downloader = Downloader::new();
    let seen_p = Arc::clone(&seen);
    downloader.progress.subscribe(move |_, args: &ProgressArgs| {
        seen_p.lock().unwrap().push(args.percent);
    });
    let seen_f = Arc::clone(&seen);
    downloader.finished.subscribe(move |_, _| {
        seen_f.lock().unwrap().push(0);
    });

    downloader.run().unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![25, 50, 75, 100, 0]);
}

#[test]
fn publisher_with_no_listeners_is_a_noop() {
    // nothing subscribed: factories never run, raises never fail
    Downloader::new().run().unwrap();
}

#[test]
fn absent_factory_fails_before_dispatch() {
    let downloader = Downloader::new();
    let sender: Sender = Arc::new("downloader");

    let err = downloader
        .progress
        .raise_with(&sender, None::<fn() -> ProgressArgs>)
        .unwrap_err();
    assert!(matches!(err, Error::NullArgument { name } if name == "create_event_args"));
}

#[test]
fn async_notification_completes_after_all_listeners() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let mut chain = EventChain::<ProgressArgs>::new();

    for _ in 0..3 {
        let invoked = Arc::clone(&invoked);
        chain.subscribe(move |_, args: &ProgressArgs| {
            assert_eq!(args.percent, 100);
            invoked.fetch_add(1, Ordering::SeqCst);
        });
    }

    let (tx, rx) = mpsc::channel();
    let invoked_c = Arc::clone(&invoked);
    let completion: CompletionCallback = Box::new(move |state| {
        // every listener has finished by the time completion fires
        tx.send((invoked_c.load(Ordering::SeqCst), state)).unwrap();
    });

    let sender: Sender = Arc::new("downloader");
    let state: Sender = Arc::new("request-7");
    let handle = chain
        .raise_async(
            sender,
            Arc::new(ProgressArgs { percent: 100 }),
            Some(completion),
            Some(state),
        )
        .unwrap();

    let (count, state) = rx.recv().unwrap();
    handle.join().unwrap();

    assert_eq!(count, 3);
    assert_eq!(*state.unwrap().downcast_ref::<&str>().unwrap(), "request-7");
}

#[test]
fn dynamic_chain_bridges_nonstandard_listeners() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut chain = DynamicChain::new();

    let seen_l = Arc::clone(&seen);
    chain.subscribe(DynListener::new(2, move |supplied| {
        let percent = *supplied[1].downcast_ref::<u8>().unwrap();
        seen_l.lock().unwrap().push(percent);
    }));

    let sender: Sender = Arc::new(());
    let args: Sender = Arc::new(50u8);
    chain.raise(&sender, &args).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![50]);

    chain.subscribe(DynListener::new(1, |_| {}));
    assert!(matches!(
        chain.raise(&sender, &args).unwrap_err(),
        Error::ArgumentCountMismatch {
            expected: 1,
            supplied: 2
        }
    ));
}
