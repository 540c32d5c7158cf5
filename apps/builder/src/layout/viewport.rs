//! Viewport resize recalculation as an explicit subscription.
#![allow(dead_code)]
//!
//! Resize events arrive through a [`ViewportFeed`]; consumers hold a
//! [`ResizeSubscription`] and recompute [`LayoutParams`] when it fires.
//! Dropping the subscription unsubscribes — there is no process-wide
//! permanent listener to leak.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::layout::geometry::LayoutParams;

/// Browser viewport dimensions in CSS px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: f32,
    pub height_px: f32,
}

impl Viewport {
    pub fn new(width_px: f32, height_px: f32) -> Self {
        Self {
            width_px,
            height_px,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Source of viewport change events.
pub struct ViewportFeed {
    tx: watch::Sender<Viewport>,
}

impl ViewportFeed {
    pub fn new(initial: Viewport) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx }
    }

    /// Publishes a resize event to all live subscriptions.
    pub fn publish(&self, viewport: Viewport) {
        // send only fails with zero receivers; a resize with no one watching
        // is not an error.
        let _ = self.tx.send(viewport);
    }

    pub fn subscribe(&self) -> ResizeSubscription {
        ResizeSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions (drops are reflected immediately).
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ViewportFeed {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

/// A live subscription to viewport changes. Dropping it releases the
/// registration.
pub struct ResizeSubscription {
    rx: watch::Receiver<Viewport>,
}

impl ResizeSubscription {
    /// The most recently published viewport.
    pub fn current(&self) -> Viewport {
        *self.rx.borrow()
    }

    /// Layout parameters for the current viewport.
    pub fn layout(&self) -> LayoutParams {
        LayoutParams::compute(&self.current())
    }

    /// Waits for the next resize. Returns `None` once the feed is gone.
    pub async fn changed(&mut self) -> Option<Viewport> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
