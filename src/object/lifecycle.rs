//! Object lifecycle events: create, map, unmap, destroy.
//!
//! The `LifecycleTracker` accumulates events that a driver or test can drain
//! after a tree walk. Mapped state itself lives on each object's native
//! handle.

use super::handle::Handle;

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Transitions an object goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created { handle: Handle },
    Mapped { handle: Handle },
    Unmapped { handle: Handle },
    Destroyed { handle: Handle },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Queues lifecycle events in the order they happen.
///
/// Callers record a transition only when it actually takes place.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(&mut self, handle: Handle) {
        self.pending.push(LifecycleEvent::Created { handle });
    }

    pub fn on_map(&mut self, handle: Handle) {
        self.pending.push(LifecycleEvent::Mapped { handle });
    }

    pub fn on_unmap(&mut self, handle: Handle) {
        self.pending.push(LifecycleEvent::Unmapped { handle });
    }

    pub fn on_destroy(&mut self, handle: Handle) {
        self.pending.push(LifecycleEvent::Destroyed { handle });
    }

    /// Drain and return all pending events.
    pub fn take_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
