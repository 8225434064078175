// src/engine/queue.rs

//! Unbounded priority queue of supervisor requests.
//!
//! Producers (`TaskSender`) may live on any thread, including the `notify`
//! callback thread, and never block. The single consumer (`TaskReceiver`)
//! awaits the next request.
//!
//! Ordering:
//! - lower [`Priority`] values are served first;
//! - requests with equal priority are served in arrival order.
//!
//! Nothing is ever dropped or merged: a burst of ten reloads reaches the
//! supervisor as ten reloads.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::sync::Notify;
use tracing::trace;

use crate::types::{Priority, TaskRequest};

/// Returned by [`TaskSender::enqueue`] once the receiver is gone.
#[derive(Debug, Error)]
#[error("task queue closed; dropping {0:?}")]
pub struct QueueClosed(pub TaskRequest);

#[derive(Debug)]
struct Entry {
    priority: Priority,
    seq: u64,
    request: TaskRequest,
}

impl Entry {
    fn key(&self) -> (Priority, u64) {
        (self.priority, self.seq)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // `BinaryHeap` pops the greatest element, so the smallest key must
    // compare as greatest.
    fn cmp(&self, other: &Self) -> Ordering {
        other.key().cmp(&self.key())
    }
}

#[derive(Debug, Default)]
struct QueueState {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
    senders: usize,
    receiver_alive: bool,
}

#[derive(Debug, Default)]
struct Shared {
    state: Mutex<QueueState>,
    available: Notify,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        // The state stays consistent even if a holder panicked: every
        // critical section is a single push/pop or counter update.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Create a connected sender/receiver pair.
pub fn task_queue() -> (TaskSender, TaskReceiver) {
    let shared = Arc::new(Shared::default());
    {
        let mut state = shared.lock();
        state.senders = 1;
        state.receiver_alive = true;
    }
    (
        TaskSender {
            shared: Arc::clone(&shared),
        },
        TaskReceiver { shared },
    )
}

/// Producer side of the queue. Cheap to clone.
#[derive(Debug)]
pub struct TaskSender {
    shared: Arc<Shared>,
}

impl TaskSender {
    /// Insert a request without blocking.
    pub fn enqueue(
        &self,
        priority: impl Into<Priority>,
        request: impl Into<TaskRequest>,
    ) -> Result<(), QueueClosed> {
        let priority = priority.into();
        let request = request.into();

        {
            let mut state = self.shared.lock();
            if !state.receiver_alive {
                return Err(QueueClosed(request));
            }
            let seq = state.next_seq;
            state.next_seq += 1;
            trace!(%priority, seq, ?request, "enqueued task");
            state.heap.push(Entry {
                priority,
                seq,
                request,
            });
        }

        self.shared.available.notify_one();
        Ok(())
    }

    /// Number of requests waiting to be dequeued.
    pub fn len(&self) -> usize {
        self.shared.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for TaskSender {
    fn clone(&self) -> Self {
        self.shared.lock().senders += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for TaskSender {
    fn drop(&mut self) {
        let last = {
            let mut state = self.shared.lock();
            state.senders -= 1;
            state.senders == 0
        };
        if last {
            self.shared.available.notify_one();
        }
    }
}

/// Consumer side of the queue. There is exactly one per queue.
#[derive(Debug)]
pub struct TaskReceiver {
    shared: Arc<Shared>,
}

impl TaskReceiver {
    /// Wait for the next request in priority order.
    ///
    /// Returns `None` once every sender has been dropped and nothing is left
    /// to deliver.
    pub async fn dequeue(&mut self) -> Option<TaskRequest> {
        loop {
            // Register interest before inspecting the heap so a concurrent
            // enqueue cannot slip between the check and the wait.
            let notified = self.shared.available.notified();

            {
                let mut state = self.shared.lock();
                if let Some(entry) = state.heap.pop() {
                    return Some(entry.request);
                }
                if state.senders == 0 {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// Take the next request if one is already queued.
    pub fn try_dequeue(&mut self) -> Option<TaskRequest> {
        self.shared.lock().heap.pop().map(|entry| entry.request)
    }

    pub fn len(&self) -> usize {
        self.shared.lock().heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for TaskReceiver {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.receiver_alive = false;
        state.heap.clear();
    }
}
