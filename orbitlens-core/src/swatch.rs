//! Fixed palette of reference colors and nearest-color lookup.

use tracing::debug;

use crate::color::{hex_to_rgb, Rgb};
use crate::constants::MATCH_THRESHOLD;
use crate::error::CoreError;

/// Handle to a registered swatch: its position in registration order.
///
/// The front end uses it to find the widget that represents the swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SwatchId(pub usize);

impl SwatchId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub id: SwatchId,
    pub color: Rgb,
    /// The hex string the swatch was registered from, kept for display.
    pub hex: String,
}

/// Append-only list of swatches.
#[derive(Debug, Clone, Default)]
pub struct SwatchSet {
    swatches: Vec<Swatch>,
}

impl SwatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and append a `#RRGGBB` color.
    pub fn register(&mut self, hex: &str) -> crate::Result<SwatchId> {
        let color = hex_to_rgb(hex)?;
        let id = SwatchId(self.swatches.len());
        self.swatches.push(Swatch {
            id,
            color,
            hex: hex.to_string(),
        });
        Ok(id)
    }

    /// Register every entry in order, stopping at the first malformed one.
    pub fn from_hex_list<S: AsRef<str>>(palette: &[S]) -> crate::Result<Self> {
        let mut set = Self::new();
        for hex in palette {
            set.register(hex.as_ref())?;
        }
        debug!(count = set.len(), "Registered swatches");
        Ok(set)
    }

    /// The swatch closest to `sample` by L1 distance, if within
    /// [`MATCH_THRESHOLD`].
    ///
    /// Ties go to the earliest-registered swatch.
    pub fn nearest(&self, sample: Rgb) -> crate::Result<Option<SwatchId>> {
        let (first, rest) = self.swatches.split_first().ok_or(CoreError::EmptyPalette)?;
        let mut best = first;
        let mut best_distance = first.color.l1_distance(sample);
        for swatch in rest {
            let distance = swatch.color.l1_distance(sample);
            if distance < best_distance {
                best = swatch;
                best_distance = distance;
            }
        }
        if best_distance > MATCH_THRESHOLD {
            return Ok(None);
        }
        Ok(Some(best.id))
    }

    pub fn get(&self, id: SwatchId) -> Option<&Swatch> {
        self.swatches.get(id.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }

    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }
}

impl<'a> IntoIterator for &'a SwatchSet {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What a [`Highlight::set`] call did, so the caller can restyle exactly
/// the affected swatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightChange {
    pub cleared: Option<SwatchId>,
    pub set: Option<SwatchId>,
}

/// The single currently highlighted swatch, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Highlight {
    current: Option<SwatchId>,
}

impl Highlight {
    pub fn current(&self) -> Option<SwatchId> {
        self.current
    }

    pub fn is_highlighted(&self, id: SwatchId) -> bool {
        self.current == Some(id)
    }

    /// Clear whatever is highlighted, then highlight `next`.
    pub fn set(&mut self, next: Option<SwatchId>) -> HighlightChange {
        let cleared = self.current.take();
        self.current = next;
        HighlightChange { cleared, set: next }
    }

    pub fn clear(&mut self) -> HighlightChange {
        self.set(None)
    }
}
