// ============================================================================
// spark-cells - Stream Primitive
// Synchronous, single-threaded broadcast of values to subscribers
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::core::constants::DISPOSED;
use crate::core::types::Listener;

// =============================================================================
// TYPE-ERASED STREAM
// =============================================================================
//
// A Subscription has to remove its listener without knowing the stream's
// value type, so it talks to the stream through this trait. Removal never
// needs T.
// =============================================================================

/// Type-erased stream interface used by [`Subscription`].
trait AnyStream {
    /// Remove the listener with the given id. Returns true if it was present.
    fn remove_listener(&self, id: u64) -> bool;

    /// Whether a listener with the given id is still registered.
    fn has_listener(&self, id: u64) -> bool;
}

// =============================================================================
// STREAM INNER
// =============================================================================

struct StreamInner<T> {
    /// Lifecycle flags (DISPOSED)
    flags: Cell<u32>,

    /// Id handed to the next subscriber
    next_id: Cell<u64>,

    /// Listeners in registration order
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
}

impl<T> StreamInner<T> {
    fn is_closed(&self) -> bool {
        self.flags.get() & DISPOSED != 0
    }
}

impl<T> AnyStream for StreamInner<T> {
    fn remove_listener(&self, id: u64) -> bool {
        let removed = {
            let mut listeners = self.listeners.borrow_mut();
            listeners
                .iter()
                .position(|(listener_id, _)| *listener_id == id)
                .map(|index| listeners.remove(index))
        };
        // Dropped outside the borrow: the listener may own subscriptions too.
        removed.is_some()
    }

    fn has_listener(&self, id: u64) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

// =============================================================================
// STREAM<T> - The public stream handle
// =============================================================================

/// A broadcast stream of values.
///
/// Delivery is synchronous: `emit` calls every subscriber, in registration
/// order, before returning. No borrow is held while a subscriber runs, so
/// subscribers may emit, subscribe or unsubscribe re-entrantly. A subscriber
/// added during delivery does not see the in-flight value.
///
/// Cloning a `Stream` creates another handle to the same listener list.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use spark_cells::Stream;
///
/// let stream = Stream::new();
/// let seen = Rc::new(Cell::new(0));
///
/// let sub = stream.subscribe({
///     let seen = seen.clone();
///     move |v: &i32| seen.set(*v)
/// });
///
/// stream.emit(&7);
/// assert_eq!(seen.get(), 7);
///
/// drop(sub);
/// stream.emit(&8);
/// assert_eq!(seen.get(), 7);
/// ```
pub struct Stream<T> {
    inner: Rc<StreamInner<T>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> Default for Stream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Stream<T> {
    /// Create an open stream with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StreamInner {
                flags: Cell::new(0),
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a subscriber.
    ///
    /// On a closed stream the callback is dropped immediately and the
    /// returned subscription is inert.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe_listener(Rc::new(callback))
    }

    /// Register an already shared listener.
    pub(crate) fn subscribe_listener(&self, listener: Listener<T>) -> Subscription {
        if self.inner.is_closed() {
            return Subscription::inert();
        }

        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, listener));

        let weak: Weak<StreamInner<T>> = Rc::downgrade(&self.inner);
        let weak: Weak<dyn AnyStream> = weak;
        Subscription {
            stream: Some(weak),
            id,
        }
    }

    /// Deliver `value` to every subscriber registered before this call.
    ///
    /// Returns the number of subscribers that were called. A closed stream
    /// delivers nothing. If the stream is closed by a subscriber mid-delivery,
    /// the remaining subscribers are skipped.
    pub fn emit(&self, value: &T) -> usize {
        if self.inner.is_closed() {
            return 0;
        }

        // Collect first so callbacks run without the listener list borrowed.
        let snapshot: Vec<Listener<T>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        let mut delivered = 0;
        for listener in &snapshot {
            if self.inner.is_closed() {
                break;
            }
            listener(value);
            delivered += 1;
        }
        delivered
    }

    /// Close the stream: drop every subscriber and refuse new ones.
    ///
    /// Closing is terminal. Closing twice is a no-op.
    pub fn close(&self) {
        if self.inner.is_closed() {
            return;
        }
        self.inner.flags.set(self.inner.flags.get() | DISPOSED);
        // Take the list out before dropping so listener destructors can't
        // observe a borrowed RefCell.
        let listeners = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        drop(listeners);
    }

    /// Whether `close()` has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("closed", &self.inner.is_closed())
            .field("subscriber_count", &self.inner.listeners.borrow().len())
            .finish()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// RAII guard for a stream subscriber.
///
/// Dropping the guard removes the subscriber. Use [`Subscription::detach`]
/// to keep the subscriber registered for the rest of the stream's life.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    stream: Option<Weak<dyn AnyStream>>,
    id: u64,
}

impl Subscription {
    /// A subscription that is not registered anywhere.
    pub(crate) fn inert() -> Self {
        Self {
            stream: None,
            id: 0,
        }
    }

    /// Whether the subscriber is still registered with a live stream.
    pub fn is_active(&self) -> bool {
        self.stream
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|stream| stream.has_listener(self.id))
    }

    /// Remove the subscriber now. Equivalent to dropping the guard.
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    /// Give up the guard without unsubscribing.
    ///
    /// The subscriber stays registered until the stream is closed or dropped.
    pub fn detach(mut self) {
        self.stream = None;
    }

    fn remove(&mut self) {
        if let Some(stream) = self.stream.take().and_then(|weak| weak.upgrade()) {
            stream.remove_listener(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
