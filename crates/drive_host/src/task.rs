//! Local task spawning contract for fire-and-forget work.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Boxed `!Send` future handed to a [`TaskSpawner`].
pub type LocalTask = Pin<Box<dyn Future<Output = ()> + 'static>>;

/// Host executor for single-threaded background futures.
pub trait TaskSpawner {
    /// Starts `task` without waiting for it.
    fn spawn_local(&self, task: LocalTask);
}

#[derive(Debug, Clone, Copy, Default)]
/// Spawner that drops every task unpolled.
pub struct NoopTaskSpawner;

impl TaskSpawner for NoopTaskSpawner {
    fn spawn_local(&self, _task: LocalTask) {}
}

#[derive(Clone, Default)]
/// Spawner that queues tasks until the owner drains and drives them.
pub struct QueuedTaskSpawner {
    queue: Rc<RefCell<Vec<LocalTask>>>,
}

impl QueuedTaskSpawner {
    /// Returns the number of queued tasks.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns whether no task is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Removes and returns every queued task, oldest first.
    pub fn drain(&self) -> Vec<LocalTask> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}

impl std::fmt::Debug for QueuedTaskSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedTaskSpawner")
            .field("queued", &self.len())
            .finish()
    }
}

impl TaskSpawner for QueuedTaskSpawner {
    fn spawn_local(&self, task: LocalTask) {
        self.queue.borrow_mut().push(task);
    }
}
