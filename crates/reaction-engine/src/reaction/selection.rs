use crate::api::types::SelectionHandle;

/// Holds at most one grabbed molecule at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    held: Option<SelectionHandle>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take hold of `handle`. Returns `false` and keeps the current
    /// handle if something is already held.
    pub fn select(&mut self, handle: SelectionHandle) -> bool {
        if self.held.is_some() {
            return false;
        }
        self.held = Some(handle);
        true
    }

    /// Drop whatever is held. Returns the released handle, if any.
    pub fn release(&mut self) -> Option<SelectionHandle> {
        self.held.take()
    }

    pub fn current(&self) -> Option<SelectionHandle> {
        self.held
    }

    pub fn is_held(&self) -> bool {
        self.held.is_some()
    }
}
