//! Responsive sizing for the countdown readout.
//!
//! Pure derivation over the current viewport: classify orientation and
//! derive how tall the readout should render. Recomputed on every resize
//! notification; no state is kept beyond the latest dimensions and there is
//! no hysteresis.

use tracing::debug;

// ============================================================================
// Constants
// ============================================================================

/// Readout fraction of the shorter viewport dimension in landscape.
const LANDSCAPE_SCALE: f32 = 0.5;

/// Readout fraction of the shorter viewport dimension in portrait.
const PORTRAIT_SCALE: f32 = 0.35;

/// Viewport assumed when the terminal size cannot be queried.
const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

// ============================================================================
// Orientation
// ============================================================================

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Width does not exceed height (square counts as portrait)
    Portrait,
    /// Width strictly exceeds height
    Landscape,
}

// ============================================================================
// Viewport
// ============================================================================

/// Current display dimensions, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Width in columns
    pub width: u16,
    /// Height in rows
    pub height: u16,
}

impl Viewport {
    /// Creates a viewport from explicit dimensions.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Classifies the orientation: landscape iff width > height.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Returns the shorter of the two dimensions.
    #[must_use]
    pub fn shorter(&self) -> u16 {
        self.width.min(self.height)
    }
}

// ============================================================================
// Derivations
// ============================================================================

/// Derives the readout height in rows for the given viewport.
///
/// Half the shorter dimension in landscape, 0.35 of it in portrait, never
/// less than one row.
#[must_use]
pub fn readout_height(viewport: Viewport) -> u16 {
    let factor = match viewport.orientation() {
        Orientation::Landscape => LANDSCAPE_SCALE,
        Orientation::Portrait => PORTRAIT_SCALE,
    };
    let rows = (f32::from(viewport.shorter()) * factor).round() as u16;
    rows.max(1)
}

/// Queries the current terminal viewport.
///
/// Falls back to 80×24 when the terminal size is unavailable (e.g., output
/// is not a tty).
#[must_use]
pub fn current_viewport() -> Viewport {
    match crossterm::terminal::size() {
        Ok((width, height)) => Viewport { width, height },
        Err(e) => {
            debug!("Terminal size unavailable ({}), using fallback", e);
            FALLBACK_VIEWPORT
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
