//! Write-once boolean used by the wave grouper

/// A boolean with one-way semantics: starts optimistic, and a single false
/// vote is final. `set_true` is ignored once `set_false` has been called.
#[derive(Debug)]
pub struct StickyBool {
    value: bool,
    pinned: bool,
}

impl StickyBool {
    pub fn new() -> Self {
        Self {
            value: true,
            pinned: false,
        }
    }

    pub fn get(&self) -> bool {
        self.value
    }

    pub fn set_true(&mut self) {
        if !self.pinned {
            self.value = true;
        }
    }

    pub fn set_false(&mut self) {
        self.pinned = true;
        self.value = false;
    }
}

impl Default for StickyBool {
    fn default() -> Self {
        Self::new()
    }
}
