//! # Transition Drivers
//!
//! The router never animates anything itself. It hands each `Transition`
//! to a driver and waits for the driver to say it has settled before the
//! completion fires and the next queued task runs.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::action::Transition;

#[async_trait]
pub trait TransitionDriver: Send + Sync {
    /// Returns the name of the driver.
    fn name(&self) -> &str;

    /// Resolves once `transition` has visually settled.
    async fn settle(&self, transition: &Transition, animated: bool);
}

/// Settles on the next scheduler turn, animated or not.
pub struct ImmediateTransitions;

#[async_trait]
impl TransitionDriver for ImmediateTransitions {
    fn name(&self) -> &str {
        "immediate"
    }

    async fn settle(&self, _transition: &Transition, _animated: bool) {
        tokio::task::yield_now().await;
    }
}

/// Animated transitions take a fixed duration; instant ones settle next turn.
pub struct TimedTransitions {
    duration: Duration,
}

impl TimedTransitions {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl TransitionDriver for TimedTransitions {
    fn name(&self) -> &str {
        "timed"
    }

    async fn settle(&self, _transition: &Transition, animated: bool) {
        if animated && !self.duration.is_zero() {
            tokio::time::sleep(self.duration).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
}
