use std::collections::BTreeMap;

/// What kind of molecule the zone is currently collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneMode {
    #[default]
    Empty,
    AccumulatingReactants,
    AccumulatingProduct,
}

impl ZoneMode {
    /// Wire value written into the protocol header.
    pub fn as_f32(self) -> f32 {
        match self {
            ZoneMode::Empty => 0.0,
            ZoneMode::AccumulatingReactants => 1.0,
            ZoneMode::AccumulatingProduct => 2.0,
        }
    }
}

/// Molecules dropped into the zone since the last reset.
///
/// Read-only outside the resolver; only `ReactionResolver` mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneTally {
    counts: BTreeMap<String, u32>,
    mode: ZoneMode,
}

impl ZoneTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ZoneMode {
        self.mode
    }

    /// Count for `symbol` (0 when absent).
    pub fn count(&self, symbol: &str) -> u32 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Total molecules across all symbols.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(symbol, count)` in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(symbol, count)| (symbol.as_str(), *count))
    }

    /// The first tallied symbol, used when the zone holds a single product.
    pub(crate) fn first_symbol(&self) -> Option<&str> {
        self.counts.keys().next().map(String::as_str)
    }

    pub(crate) fn clear(&mut self) {
        self.counts.clear();
        self.mode = ZoneMode::Empty;
    }

    pub(crate) fn increment(&mut self, symbol: &str, mode: ZoneMode) {
        self.mode = mode;
        *self.counts.entry(symbol.to_string()).or_insert(0) += 1;
    }
}
