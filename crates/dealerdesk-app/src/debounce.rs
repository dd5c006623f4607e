// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Trailing-edge debounce on a tokio runtime.
//!
//! Each [`Debounced::call`] restarts the delay. The callee only runs once the
//! delay passes without another call, and it receives the arguments of the
//! last call. A superseded call never reaches the callee: its timer task is
//! aborted and a generation token is re-checked right before invoking.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Pending {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

pub struct Debounced<A> {
    callee: Arc<dyn Fn(A) + Send + Sync>,
    timeout: Duration,
    handle: Handle,
    pending: Arc<Mutex<Pending>>,
}

/// Wraps `callee` using the tokio runtime of the calling context.
pub fn debounce<A, F>(callee: F, timeout: Duration) -> Result<Debounced<A>>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    let handle = Handle::try_current()
        .context("debounce needs a tokio runtime -- build one or pass a handle explicitly")?;
    Ok(Debounced::with_handle(callee, timeout, handle))
}

impl<A> Debounced<A>
where
    A: Send + 'static,
{
    pub fn with_handle<F>(callee: F, timeout: Duration, handle: Handle) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callee: Arc::new(callee),
            timeout,
            handle,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn call(&self, args: A) {
        let mut pending = lock(&self.pending);
        pending.generation = pending.generation.wrapping_add(1);
        if let Some(task) = pending.task.take() {
            task.abort();
        }

        let generation = pending.generation;
        let callee = Arc::clone(&self.callee);
        let shared = Arc::clone(&self.pending);
        let timeout = self.timeout;
        pending.task = Some(self.handle.spawn(async move {
            tokio::time::sleep(timeout).await;
            {
                let mut pending = lock(&shared);
                if pending.generation != generation {
                    return;
                }
                pending.task = None;
            }
            callee(args);
        }));
    }

    /// Drops any scheduled invocation.
    pub fn cancel(&self) {
        let mut pending = lock(&self.pending);
        pending.generation = pending.generation.wrapping_add(1);
        if let Some(task) = pending.task.take() {
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.pending).task.is_some()
    }
}

impl<A> Drop for Debounced<A> {
    fn drop(&mut self) {
        if let Some(task) = lock(&self.pending).task.take() {
            task.abort();
        }
    }
}

fn lock(pending: &Mutex<Pending>) -> MutexGuard<'_, Pending> {
    match pending.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
