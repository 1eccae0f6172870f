//! Observers for steps and sinks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::effects::Sink;

/// Wraps a step function and counts its invocations.
#[derive(Debug)]
pub struct Spy<F> {
    func: F,
    calls: AtomicUsize,
}

impl<F> Spy<F> {
    pub fn new(func: F) -> Self {
        Self {
            func,
            calls: AtomicUsize::new(0),
        }
    }

    /// A borrowing step that records each call before delegating.
    pub fn step<T, R>(&self) -> impl Fn(T) -> R + '_
    where
        F: Fn(T) -> R,
    {
        move |input| {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.func)(input)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn was_called(&self) -> bool {
        self.calls() > 0
    }
}

/// A sink that keeps every reported value in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    values: Arc<Mutex<Vec<Value>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`Sink`] feeding this recorder.
    pub fn sink(&self) -> Sink {
        let values = Arc::clone(&self.values);
        Arc::new(move |value: &Value| values.lock().push(value.clone()))
    }

    /// Everything reported so far, in order.
    pub fn values(&self) -> Vec<Value> {
        self.values.lock().clone()
    }

    pub fn clear(&self) {
        self.values.lock().clear();
    }
}
