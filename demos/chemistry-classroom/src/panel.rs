//! Reaction panel layout.
//!
//! Reactants fill a column-major grid; a product is shown alone at the panel
//! origin. The panel keeps its own count of what is on display.

use glam::Vec3;

pub const PANEL_ROWS: usize = 3;
pub const PANEL_COLS: usize = 3;

/// Horizontal distance between grid columns (panel units).
const COL_SPACING: f32 = 0.4;
/// Vertical distance between grid rows (panel units).
const ROW_SPACING: f32 = 0.3;
/// Top-left slot position.
const GRID_ORIGIN: Vec3 = Vec3::new(-0.4, 0.3, 0.0);

/// What the reaction panel currently shows.
pub struct ReactionPanel {
    rows: usize,
    cols: usize,
    /// Molecules currently on display.
    displayed: usize,
    /// The "max molecules reached" warning is up.
    warning_shown: bool,
}

impl ReactionPanel {
    pub fn new() -> Self {
        Self::with_grid(PANEL_ROWS, PANEL_COLS)
    }

    pub fn with_grid(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            displayed: 0,
            warning_shown: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    pub fn displayed(&self) -> usize {
        self.displayed
    }

    /// Position of grid slot `n`: row `n % rows`, column `n / rows`.
    pub fn slot_position(&self, n: usize) -> Vec3 {
        let row = (n % self.rows) as f32;
        let col = (n / self.rows) as f32;
        GRID_ORIGIN + Vec3::new(col * COL_SPACING, -row * ROW_SPACING, 0.0)
    }

    /// Take the next reactant slot. `None` when the grid is full.
    pub fn place_reactant(&mut self) -> Option<Vec3> {
        if self.displayed >= self.capacity() {
            return None;
        }
        let pos = self.slot_position(self.displayed);
        self.displayed += 1;
        Some(pos)
    }

    /// Show a product. Replaces everything on the panel.
    pub fn place_product(&mut self) -> Vec3 {
        self.clear();
        self.displayed = 1;
        Vec3::ZERO
    }

    /// Raise the capacity warning. Returns `true` only the first time
    /// since the last clear.
    pub fn show_capacity_warning(&mut self) -> bool {
        !std::mem::replace(&mut self.warning_shown, true)
    }

    pub fn clear(&mut self) {
        self.displayed = 0;
        self.warning_shown = false;
    }
}

impl Default for ReactionPanel {
    fn default() -> Self {
        Self::new()
    }
}
