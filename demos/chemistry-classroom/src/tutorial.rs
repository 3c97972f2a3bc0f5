//! Guided grab → drop → break walkthrough.
//!
//! The learner is asked to grab the tutorial molecule, drop it into the
//! reaction zone, then break it apart. Each step changes which indicator the
//! scene shows.

/// Which hint the scene should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// "Grab the molecule"
    Grab,
    /// "Drop it in the reaction zone"
    Drop,
    /// "Now break it apart"
    Break,
    /// Tutorial finished, no hint.
    Hidden,
}

impl Indicator {
    /// Wire value for lab events.
    pub fn code(self) -> f32 {
        match self {
            Indicator::Grab => 1.0,
            Indicator::Drop => 2.0,
            Indicator::Break => 3.0,
            Indicator::Hidden => 0.0,
        }
    }
}

pub struct Tutorial {
    /// Symbol of the molecule the walkthrough uses.
    target: String,
    grabbed: bool,
    dropped: bool,
    broken: bool,
    indicator: Indicator,
}

impl Tutorial {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            grabbed: false,
            dropped: false,
            broken: false,
            indicator: Indicator::Grab,
        }
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn is_complete(&self) -> bool {
        self.broken
    }

    /// A molecule was grabbed. Returns the new indicator if it changed.
    pub fn on_grab(&mut self, symbol: &str) -> Option<Indicator> {
        if self.broken {
            return None;
        }
        if !self.grabbed && symbol == self.target {
            self.grabbed = true;
            return self.show(Indicator::Drop);
        }
        // Picking something else after the drop starts the walkthrough over.
        if self.dropped && symbol != self.target {
            self.grabbed = false;
            self.dropped = false;
            return self.show(Indicator::Grab);
        }
        None
    }

    /// The grab was let go.
    pub fn on_release(&mut self) -> Option<Indicator> {
        if self.broken || self.dropped {
            return None;
        }
        self.grabbed = false;
        self.show(Indicator::Grab)
    }

    /// The held molecule reached the reaction zone.
    pub fn on_drop(&mut self) -> Option<Indicator> {
        if self.broken || !self.grabbed || self.dropped {
            return None;
        }
        self.dropped = true;
        self.show(Indicator::Break)
    }

    /// A break succeeded.
    pub fn on_break(&mut self) -> Option<Indicator> {
        if self.broken || !self.dropped {
            return None;
        }
        self.broken = true;
        self.show(Indicator::Hidden)
    }

    /// Start the walkthrough from the first step.
    pub fn restart(&mut self) -> Option<Indicator> {
        self.grabbed = false;
        self.dropped = false;
        self.broken = false;
        self.show(Indicator::Grab)
    }

    fn show(&mut self, indicator: Indicator) -> Option<Indicator> {
        if self.indicator == indicator {
            return None;
        }
        self.indicator = indicator;
        Some(indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_walkthrough() {
        let mut t = Tutorial::new("CO2");
        assert_eq!(t.indicator(), Indicator::Grab);
        assert_eq!(t.on_grab("CO2"), Some(Indicator::Drop));
        assert_eq!(t.on_drop(), Some(Indicator::Break));
        assert_eq!(t.on_release(), None);
        assert_eq!(t.on_break(), Some(Indicator::Hidden));
        assert!(t.is_complete());
        assert_eq!(t.on_grab("C"), None);
    }

    #[test]
    fn grabbing_other_molecules_does_not_advance() {
        let mut t = Tutorial::new("CO2");
        assert_eq!(t.on_grab("C"), None);
        assert_eq!(t.on_drop(), None);
        assert_eq!(t.indicator(), Indicator::Grab);
    }

    #[test]
    fn release_before_drop_goes_back() {
        let mut t = Tutorial::new("CO2");
        t.on_grab("CO2");
        assert_eq!(t.on_release(), Some(Indicator::Grab));
        assert_eq!(t.on_drop(), None);
    }

    #[test]
    fn other_pick_after_drop_restarts() {
        let mut t = Tutorial::new("CO2");
        t.on_grab("CO2");
        t.on_drop();
        assert_eq!(t.on_grab("H2"), Some(Indicator::Grab));
        assert_eq!(t.on_break(), None);
        assert_eq!(t.on_grab("CO2"), Some(Indicator::Drop));
    }

    #[test]
    fn break_before_drop_is_ignored() {
        let mut t = Tutorial::new("CO2");
        assert_eq!(t.on_break(), None);
        assert!(!t.is_complete());
    }

    #[test]
    fn restart_after_completion() {
        let mut t = Tutorial::new("CO2");
        t.on_grab("CO2");
        t.on_drop();
        t.on_break();
        assert_eq!(t.restart(), Some(Indicator::Grab));
        assert!(!t.is_complete());
    }
}
