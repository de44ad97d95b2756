//! Signals with many subscribers, whose results are combined into one.
//!
//! A [`Signal`] owns an ordered list of subscribers. Emitting the signal calls
//! every subscriber with the same arguments, in connection order, and passes
//! their results to a [`Combiner`].
//!
//! Validation hooks use a [`ValidationSignal`], where any subscriber can veto:
//!
//! ```
//! use btn_consensus::ValidationSignal;
//!
//! let mut accept_block: ValidationSignal<u32> = ValidationSignal::new();
//! assert!(accept_block.emit(&7));
//!
//! let small_blocks = accept_block.connect(|size: &u32| *size < 10);
//! assert!(accept_block.emit(&7));
//! assert!(!accept_block.emit(&11));
//!
//! accept_block.disconnect(small_blocks);
//! assert!(accept_block.emit(&11));
//! ```

use std::fmt;

use tracing::{debug, trace};

/// Combines the results of every subscriber into the result of an emission.
pub trait Combiner<T> {
    /// The result of an emission.
    type Output;

    /// Combines `results`, which yields one result per subscriber in
    /// connection order.
    fn combine<I>(&self, results: I) -> Self::Output
    where
        I: Iterator<Item = T>;
}

/// Combines boolean results with a logical AND.
///
/// An emission with no subscribers is `true`. Every subscriber is called,
/// even after an earlier subscriber returned `false`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CombinerAll;

impl Combiner<bool> for CombinerAll {
    type Output = bool;

    fn combine<I>(&self, results: I) -> bool
    where
        I: Iterator<Item = bool>,
    {
        results.enumerate().fold(true, |all, (position, result)| {
            if !result {
                debug!(position, "subscriber vetoed");
            }
            all && result
        })
    }
}

/// A handle to a connected subscriber, used to disconnect it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SubscriberId(u64);

type Subscriber<A, R> = Box<dyn Fn(&A) -> R + Send + Sync>;

/// A list of subscribers that are called together, and a combiner for their
/// results.
///
/// Subscribers take `&A` and return `R`. Connecting and disconnecting need
/// `&mut self`, so the subscriber list can't change during an emission.
pub struct Signal<A: ?Sized, R = bool, C = CombinerAll> {
    subscribers: Vec<(SubscriberId, Subscriber<A, R>)>,
    next_id: u64,
    combiner: C,
}

/// A signal where every subscriber must approve.
pub type ValidationSignal<A> = Signal<A, bool, CombinerAll>;

impl<A: ?Sized, R, C: Default> Signal<A, R, C> {
    /// Returns a signal with no subscribers and the default combiner.
    pub fn new() -> Self {
        Self::with_combiner(C::default())
    }
}

impl<A: ?Sized, R, C: Default> Default for Signal<A, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized, R, C> Signal<A, R, C> {
    /// Returns a signal with no subscribers, which combines results with
    /// `combiner`.
    pub fn with_combiner(combiner: C) -> Self {
        Signal {
            subscribers: Vec::new(),
            next_id: 0,
            combiner,
        }
    }

    /// Connects `subscriber` after every existing subscriber.
    pub fn connect<F>(&mut self, subscriber: F) -> SubscriberId
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));

        debug!(?id, subscribers = self.subscribers.len(), "connected subscriber");

        id
    }

    /// Disconnects the subscriber with `id`.
    ///
    /// Returns `false` if it was not connected.
    pub fn disconnect(&mut self, id: SubscriberId) -> bool {
        let position = self
            .subscribers
            .iter()
            .position(|(subscriber_id, _)| *subscriber_id == id);

        match position {
            Some(position) => {
                drop(self.subscribers.remove(position));
                debug!(?id, subscribers = self.subscribers.len(), "disconnected subscriber");
                true
            }
            None => false,
        }
    }

    /// Disconnects every subscriber.
    pub fn disconnect_all(&mut self) {
        self.subscribers.clear();
    }

    /// Returns the number of connected subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if no subscribers are connected.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Calls every subscriber with `args`, and combines their results.
    pub fn emit(&self, args: &A) -> C::Output
    where
        C: Combiner<R>,
    {
        trace!(subscribers = self.subscribers.len(), "emitting signal");

        self.combiner
            .combine(self.subscribers.iter().map(|(_, subscriber)| subscriber(args)))
    }
}

impl<A: ?Sized, R, C: fmt::Debug> fmt::Debug for Signal<A, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<SubscriberId> = self.subscribers.iter().map(|(id, _)| *id).collect();

        f.debug_struct("Signal")
            .field("subscribers", &ids)
            .field("combiner", &self.combiner)
            .finish()
    }
}

#[cfg(test)]
mod tests;
