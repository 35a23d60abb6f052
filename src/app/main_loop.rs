//! Deferred-callback queue for the UI-owning thread
//!
//! All view mutation happens on one thread. Work from elsewhere (surface
//! listeners invoked on host threads) is posted through a [`LoopSender`]
//! and only executed when the owning thread runs [`MainLoop::run_due`].
//! Nothing here blocks or sleeps; the host decides when to turn the loop.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// Thread-safe handle for posting immediate tasks
#[derive(Debug)]
pub struct LoopSender<T> {
    tx: Sender<T>,
}

impl<T> Clone for LoopSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send> LoopSender<T> {
    /// Posts a task; returns false if the loop is gone
    pub fn post(&self, task: T) -> bool {
        self.tx.send(task).is_ok()
    }
}

#[derive(Debug)]
struct Scheduled<T> {
    id: TaskId,
    due: Instant,
    task: T,
}

/// Single-threaded deferred task queue
#[derive(Debug)]
pub struct MainLoop<T> {
    queue: Vec<Scheduled<T>>,
    next_id: u64,
    now: Instant,
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T: Send> MainLoop<T> {
    pub fn new(now: Instant) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            queue: Vec::new(),
            next_id: 1,
            now,
            tx,
            rx,
        }
    }

    /// Time of the most recent turn
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn sender(&self) -> LoopSender<T> {
        LoopSender {
            tx: self.tx.clone(),
        }
    }

    /// Schedules `task` for the next turn
    pub fn post(&mut self, task: T) -> TaskId {
        self.post_delayed(task, Duration::ZERO)
    }

    /// Schedules `task` to run `delay` after the current loop time
    pub fn post_delayed(&mut self, task: T, delay: Duration) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(Scheduled {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    /// Cancels a pending task; returns true if it was still queued
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|s| s.id != id);
        self.queue.len() != before
    }

    /// Cancels every pending task matching `pred`
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|s| !pred(&s.task));
        before - self.queue.len()
    }

    /// Drops all pending tasks, including ones posted from other threads
    pub fn clear(&mut self) {
        self.queue.clear();
        while self.rx.try_recv().is_ok() {}
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.queue.iter().any(|s| s.id == id)
    }

    /// Advances the loop to `now` and removes every task that is due
    ///
    /// Tasks posted through a [`LoopSender`] are drained first and become
    /// due immediately. The result is ordered by deadline, then by posting
    /// order.
    pub fn run_due(&mut self, now: Instant) -> Vec<T> {
        if now > self.now {
            self.now = now;
        }
        while let Ok(task) = self.rx.try_recv() {
            self.post(task);
        }

        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.due <= now);
        self.queue = pending;
        due.sort_by_key(|s| (s.due, s.id.0));
        due.into_iter().map(|s| s.task).collect()
    }
}
