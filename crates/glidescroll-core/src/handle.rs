//! Completion handles for in-flight animations.
//!
//! Each accepted request gets a watch channel with exactly one writer,
//! the animation's own termination logic. Any number of readers may
//! hold a [`ScrollHandle`]: joiners of a deduplicated request all share
//! the first animation's handle and therefore its outcome.

use tokio::sync::watch;

use crate::error::ScrollError;

pub(crate) type Outcome = std::result::Result<(), ScrollError>;

/// Cloneable handle that settles exactly once, to success or failure.
#[derive(Debug, Clone)]
pub struct ScrollHandle {
    rx: watch::Receiver<Option<Outcome>>,
}

/// The single writer for one animation's outcome.
#[derive(Debug)]
pub(crate) struct Settler {
    tx: watch::Sender<Option<Outcome>>,
}

pub(crate) fn completion() -> (Settler, ScrollHandle) {
    let (tx, rx) = watch::channel(None);
    (Settler { tx }, ScrollHandle { rx })
}

impl Settler {
    /// Settle the handle. Consumes the settler, so the outcome can only
    /// ever be written once.
    pub(crate) fn settle(self, outcome: Outcome) {
        let _ = self.tx.send(Some(outcome));
    }
}

impl ScrollHandle {
    /// Wait until the animation settles.
    ///
    /// An animation dropped without settling (the writer disappeared)
    /// reads as an interruption.
    pub async fn wait(mut self) -> Result<(), ScrollError> {
        match self.rx.wait_for(|outcome| outcome.is_some()).await {
            Ok(value) => (*value).unwrap_or(Err(ScrollError::Interrupted)),
            Err(_) => Err(ScrollError::Interrupted),
        }
    }

    /// The outcome, if already settled. Never blocks.
    pub fn outcome(&self) -> Option<Result<(), ScrollError>> {
        *self.rx.borrow()
    }

    pub fn is_settled(&self) -> bool {
        self.outcome().is_some()
    }
}
