// Copyright 2026 the Overlook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serialized, cancelable FIFO of named operations.
//!
//! The queue never runs anything itself. Its owner pops operations one at a
//! time and runs each to completion before popping the next, which is what
//! makes layer operations linearizable.
//!
//! Cancellation is epoch based. Every operation remembers the
//! [`CancelToken`] epoch current when it was enqueued; bumping the epoch
//! cancels every operation enqueued before the bump, whether it is still
//! queued or already running. Tokens are `Send + Sync`, so another thread can
//! cancel work that the owner will observe at its next check.

use alloc::borrow::Cow;
use alloc::collections::VecDeque;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicU64, Ordering};

/// Shared cancellation switch.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    epoch: Arc<AtomicU64>,
}

impl CancelToken {
    /// Creates a token at epoch zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels everything started or enqueued before this call.
    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Current epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Whether a cancel happened after `epoch` was read.
    #[must_use]
    pub fn is_cancelled_since(&self, epoch: u64) -> bool {
        self.epoch() != epoch
    }
}

/// One queued unit of work.
#[derive(Clone, Debug)]
pub struct Operation<W> {
    /// Position in enqueue order, starting at zero.
    pub sequence: u64,
    /// Diagnostic name.
    pub name: Cow<'static, str>,
    /// Cancellation epoch at enqueue time.
    pub epoch: u64,
    /// The work itself.
    pub work: W,
}

/// FIFO of named operations with group suspension and cancellation.
#[derive(Debug)]
pub struct OperationQueue<W> {
    pending: VecDeque<Operation<W>>,
    next_sequence: u64,
    suspended: bool,
    token: CancelToken,
}

impl<W> Default for OperationQueue<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> OperationQueue<W> {
    /// Creates an empty, running queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            next_sequence: 0,
            suspended: false,
            token: CancelToken::new(),
        }
    }

    /// Appends an operation and returns its sequence number.
    pub fn enqueue(&mut self, name: impl Into<Cow<'static, str>>, work: W) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push_back(Operation {
            sequence,
            name: name.into(),
            epoch: self.token.epoch(),
            work,
        });
        sequence
    }

    /// Pops the oldest operation, or `None` if the queue is empty or
    /// suspended.
    pub fn pop(&mut self) -> Option<Operation<W>> {
        if self.suspended {
            return None;
        }
        self.pending.pop_front()
    }

    /// Stops [`pop`](Self::pop) from handing out work. Queued operations are
    /// kept in order.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Lets [`pop`](Self::pop) hand out work again.
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Whether the queue is suspended.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Drops every queued operation and cancels any running one.
    ///
    /// Returns how many queued operations were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        self.token.cancel();
        dropped
    }

    /// Whether `operation` was cancelled after it was enqueued.
    #[must_use]
    pub fn is_cancelled(&self, operation: &Operation<W>) -> bool {
        self.token.is_cancelled_since(operation.epoch)
    }

    /// A handle that cancels this queue's work from anywhere.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Number of queued operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Names of queued operations, oldest first.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.pending.iter().map(|op| op.name.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn fifo_order_and_sequence() {
        let mut queue = OperationQueue::new();
        assert_eq!(queue.enqueue("first", 1), 0);
        assert_eq!(queue.enqueue("second", 2), 1);
        assert_eq!(queue.names().collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(queue.pop().map(|op| op.work), Some(1));
        assert_eq!(queue.pop().map(|op| op.work), Some(2));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn suspension_delays_without_dropping() {
        let mut queue = OperationQueue::new();
        queue.enqueue("a", 'a');
        queue.suspend();
        queue.enqueue("b", 'b');
        assert!(queue.pop().is_none());
        assert_eq!(queue.len(), 2);
        queue.resume();
        assert_eq!(queue.pop().map(|op| op.work), Some('a'));
        assert_eq!(queue.pop().map(|op| op.work), Some('b'));
    }

    #[test]
    fn cancel_all_drops_queued_and_flags_running() {
        let mut queue = OperationQueue::new();
        queue.enqueue("running", ());
        queue.enqueue("queued", ());
        let running = queue.pop().unwrap();
        assert!(!queue.is_cancelled(&running));
        assert_eq!(queue.cancel_all(), 1);
        assert!(queue.is_cancelled(&running));
        assert!(queue.is_empty());

        queue.enqueue("later", ());
        let later = queue.pop().unwrap();
        assert!(!queue.is_cancelled(&later));
        assert_eq!(later.sequence, 2);
    }

    #[test]
    fn token_cancels_from_outside() {
        let mut queue = OperationQueue::new();
        queue.enqueue("queued", ());
        let token = queue.cancel_token();
        token.cancel();
        let op = queue.pop().unwrap();
        assert!(queue.is_cancelled(&op));
    }

    #[test]
    fn token_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CancelToken>();
    }
}
