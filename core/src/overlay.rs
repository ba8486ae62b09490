//! Open/close state shared by the project modal, the mobile menu and banners
//!
//! `Closed → Opening → Open → Closing → Closed`. Every close trigger
//! (explicit control, click outside, Escape, timeout) lands in the same
//! `Closed` state. Overlays do not stack: opening an already open overlay
//! swaps its payload in place.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Explicit,
    OutsideClick,
    Escape,
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState<T> {
    Closed,
    Opening(T),
    Open(T),
    Closing(T),
}

#[derive(Debug, Clone)]
pub struct Overlay<T> {
    state: OverlayState<T>,
    last_close: Option<CloseTrigger>,
}

impl<T> Default for Overlay<T> {
    fn default() -> Self {
        Self {
            state: OverlayState::Closed,
            last_close: None,
        }
    }
}

impl<T> Overlay<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &OverlayState<T> {
        &self.state
    }

    /// Opening or open
    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Opening(_) | OverlayState::Open(_))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, OverlayState::Closed)
    }

    pub fn payload(&self) -> Option<&T> {
        match &self.state {
            OverlayState::Closed => None,
            OverlayState::Opening(p) | OverlayState::Open(p) | OverlayState::Closing(p) => Some(p),
        }
    }

    pub fn last_close(&self) -> Option<CloseTrigger> {
        self.last_close
    }

    /// Start opening. Returns false while a close is in progress.
    pub fn request_open(&mut self, payload: T) -> bool {
        match self.state {
            OverlayState::Closed => {
                self.state = OverlayState::Opening(payload);
                true
            }
            OverlayState::Opening(_) => {
                self.state = OverlayState::Opening(payload);
                true
            }
            OverlayState::Open(_) => {
                self.state = OverlayState::Open(payload);
                true
            }
            OverlayState::Closing(_) => false,
        }
    }

    /// Content rendered: `Opening → Open`.
    pub fn mark_opened(&mut self) {
        let state = std::mem::replace(&mut self.state, OverlayState::Closed);
        self.state = match state {
            OverlayState::Opening(p) => OverlayState::Open(p),
            other => other,
        };
    }

    pub fn open(&mut self, payload: T) -> bool {
        let accepted = self.request_open(payload);
        if accepted {
            self.mark_opened();
        }
        accepted
    }

    /// Start closing. Returns false if nothing is open.
    pub fn request_close(&mut self, trigger: CloseTrigger) -> bool {
        let state = std::mem::replace(&mut self.state, OverlayState::Closed);
        let (next, accepted) = match state {
            OverlayState::Opening(p) | OverlayState::Open(p) => (OverlayState::Closing(p), true),
            other => (other, false),
        };
        self.state = next;
        if accepted {
            self.last_close = Some(trigger);
        }
        accepted
    }

    /// Content hidden: `Closing → Closed`.
    pub fn mark_closed(&mut self) {
        if matches!(self.state, OverlayState::Closing(_)) {
            self.state = OverlayState::Closed;
        }
    }

    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        let accepted = self.request_close(trigger);
        if accepted {
            self.mark_closed();
        }
        accepted
    }

    /// Open if closed, close (explicitly) if open.
    pub fn toggle(&mut self, payload: T) -> bool {
        if self.is_open() {
            self.close(CloseTrigger::Explicit);
            false
        } else {
            self.open(payload)
        }
    }
}
