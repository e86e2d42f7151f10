//! Deferred work that reports back into the session inbox.
//!
//! Every timer and remote call runs as its own task and ends by posting one
//! event. The session never awaits anything itself.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

/// Handle to a scheduled task. Dropping it detaches the task; `cancel`
/// stops it before it posts.
#[derive(Debug)]
pub struct Deferred {
    handle: JoinHandle<()>,
}

impl Deferred {
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

pub struct Scheduler<E> {
    tx: UnboundedSender<E>,
}

impl<E> Clone for Scheduler<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E: Send + 'static> Scheduler<E> {
    pub fn new(tx: UnboundedSender<E>) -> Self {
        Self { tx }
    }

    pub fn sender(&self) -> UnboundedSender<E> {
        self.tx.clone()
    }

    /// Post `event` once `delay` has elapsed.
    pub fn after(&self, delay: Duration, event: E) -> Deferred {
        self.spawn(async move {
            tokio::time::sleep(delay).await;
            event
        })
    }

    /// Run `work` off the session task and post whatever it yields.
    pub fn spawn<F>(&self, work: F) -> Deferred
    where
        F: Future<Output = E> + Send + 'static,
    {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let event = work.await;
            if tx.send(event).is_err() {
                trace!("session inbox closed, dropping deferred event");
            }
        });
        Deferred { handle }
    }
}
