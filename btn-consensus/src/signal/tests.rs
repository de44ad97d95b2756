//! Signal and combiner tests

use std::{
    sync::{Arc, Mutex},
    thread,
};

use btn_test::prelude::*;

use super::*;

fn return_false(_: &()) -> bool {
    false
}

fn return_true(_: &()) -> bool {
    true
}

#[test]
fn combiner_all() {
    btn_test::init();

    let mut signal: ValidationSignal<()> = ValidationSignal::new();

    // Zero subscribers.
    assert!(signal.emit(&()));

    let vetoes = signal.connect(return_false);
    assert!(!signal.emit(&()));

    let approves = signal.connect(return_true);
    assert!(!signal.emit(&()));

    assert!(signal.disconnect(vetoes));
    assert!(signal.emit(&()));

    assert!(signal.disconnect(approves));
    assert!(signal.emit(&()));
    assert!(signal.is_empty());
}

#[test]
fn disconnect_unknown_subscriber() {
    btn_test::init();

    let mut signal: ValidationSignal<()> = ValidationSignal::new();
    let id = signal.connect(return_true);

    assert!(signal.disconnect(id));
    assert!(!signal.disconnect(id));

    let other = signal.connect(return_true);
    assert_ne!(id, other);
    assert_eq!(signal.len(), 1);

    signal.disconnect_all();
    assert!(signal.is_empty());
    assert!(!signal.disconnect(other));
}

#[test]
fn disconnect_releases_the_subscriber() {
    btn_test::init();

    let state = Arc::new(());
    let mut signal: ValidationSignal<()> = ValidationSignal::new();

    let captured = state.clone();
    let id = signal.connect(move |_: &()| Arc::strong_count(&captured) > 0);
    let kept = state.clone();
    signal.connect(move |_: &()| Arc::strong_count(&kept) > 0);
    assert_eq!(Arc::strong_count(&state), 3);

    assert!(signal.disconnect(id));
    assert_eq!(Arc::strong_count(&state), 2);
    assert!(signal.emit(&()));

    signal.disconnect_all();
    assert_eq!(Arc::strong_count(&state), 1);
}

#[test]
fn subscribers_run_in_connection_order_without_short_circuit() {
    btn_test::init();

    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut signal: ValidationSignal<u32> = ValidationSignal::new();

    for (position, approve) in [true, false, true, false].iter().copied().enumerate() {
        let calls = calls.clone();
        signal.connect(move |arg: &u32| {
            calls
                .lock()
                .expect("no test thread panics while holding the lock")
                .push((position, *arg));
            approve
        });
    }

    assert!(!signal.emit(&9));
    assert_eq!(
        *calls.lock().expect("no test thread panics while holding the lock"),
        vec![(0, 9), (1, 9), (2, 9), (3, 9)]
    );
}

#[test]
fn custom_combiner() {
    btn_test::init();

    #[derive(Default, Debug)]
    struct CountApprovals;

    impl Combiner<bool> for CountApprovals {
        type Output = usize;

        fn combine<I>(&self, results: I) -> usize
        where
            I: Iterator<Item = bool>,
        {
            results.filter(|approved| *approved).count()
        }
    }

    let mut signal: Signal<str, bool, CountApprovals> = Signal::new();
    signal.connect(|name: &str| name.starts_with("btn"));
    signal.connect(|name: &str| name.len() < 8);
    signal.connect(|_: &str| false);

    assert_eq!(signal.emit("btnd"), 2);
    assert_eq!(signal.emit("bitcoind"), 0);
    assert_eq!(signal.len(), 3);
}

#[test]
fn emit_from_many_threads() {
    btn_test::init();

    let mut signal: ValidationSignal<u64> = ValidationSignal::new();
    signal.connect(|n: &u64| n % 2 == 0);
    signal.connect(|n: &u64| *n < 100);
    let signal = Arc::new(signal);

    let handles: Vec<_> = (0..4u64)
        .map(|n| {
            let signal = signal.clone();
            thread::spawn(move || signal.emit(&(n * 50)))
        })
        .collect();

    let results: Vec<bool> = handles
        .into_iter()
        .map(|handle| handle.join().expect("emitting never panics"))
        .collect();

    assert_eq!(results, vec![true, true, false, false]);
}

proptest! {
    #[test]
    fn emit_is_the_conjunction_of_connected_subscribers(
        approvals in proptest::collection::vec(any::<bool>(), 0..16),
        disconnected in proptest::collection::vec(any::<bool>(), 16),
    ) {
        btn_test::init();

        let mut signal: ValidationSignal<()> = ValidationSignal::new();
        let ids: Vec<SubscriberId> = approvals
            .iter()
            .copied()
            .map(|approve| signal.connect(move |_: &()| approve))
            .collect();

        prop_assert_eq!(signal.emit(&()), approvals.iter().all(|approve| *approve));

        let mut expected = true;
        for (i, id) in ids.iter().enumerate() {
            if disconnected[i] {
                prop_assert!(signal.disconnect(*id));
            } else {
                expected &= approvals[i];
            }
        }

        prop_assert_eq!(signal.emit(&()), expected);
    }
}
