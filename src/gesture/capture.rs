//! Exclusive pointer capture for the duration of one gesture.
//!
//! The host routes pointer-move and pointer-up events to whichever gesture
//! holds the capture. Holding it is tied to a [`CaptureGuard`]: when the guard
//! is dropped, whether because the gesture ended or because its controller
//! was torn down mid-gesture, the capture is released and no further events
//! reach the old gesture.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize,
}

#[derive(Debug, Default)]
struct CaptureSlot {
    owner: Cell<Option<(u64, GestureKind)>>,
    next_token: Cell<u64>,
}

/// Shared handle to the pointer capture. Clones refer to the same slot.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    slot: Rc<CaptureSlot>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the capture for a gesture, or `None` while another gesture holds
    /// it.
    pub fn acquire(&self, kind: GestureKind) -> Option<CaptureGuard> {
        if self.slot.owner.get().is_some() {
            return None;
        }
        let token = self.slot.next_token.get();
        self.slot.next_token.set(token.wrapping_add(1));
        self.slot.owner.set(Some((token, kind)));
        tracing::trace!(?kind, token, "pointer captured");
        Some(CaptureGuard {
            slot: Rc::clone(&self.slot),
            token,
            kind,
        })
    }

    /// Kind of the gesture currently holding the capture.
    pub fn active(&self) -> Option<GestureKind> {
        self.slot.owner.get().map(|(_, kind)| kind)
    }

    pub fn is_captured(&self) -> bool {
        self.slot.owner.get().is_some()
    }
}

/// Proof of capture ownership; releases the capture on drop.
#[derive(Debug)]
pub struct CaptureGuard {
    slot: Rc<CaptureSlot>,
    token: u64,
    kind: GestureKind,
}

impl CaptureGuard {
    pub fn kind(&self) -> GestureKind {
        self.kind
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if matches!(self.slot.owner.get(), Some((token, _)) if token == self.token) {
            self.slot.owner.set(None);
            tracing::trace!(kind = ?self.kind, token = self.token, "pointer released");
        }
    }
}
