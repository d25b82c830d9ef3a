//! Position adjustments for Grammar of Graphics.
//!
//! Adjustments are applied after the stat to resolve overlapping graphical
//! objects. Only their identity and parameters are described here.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Position adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    /// Leave positions untouched.
    #[default]
    Identity,
    /// Stack overlapping objects on top of each other.
    Stack {
        /// Stack in reverse group order.
        reverse: bool,
    },
    /// Stack and normalise every stack to unit height.
    Fill {
        /// Stack in reverse group order.
        reverse: bool,
    },
    /// Place overlapping objects side by side.
    Dodge {
        /// Dodging width, defaults to the geom's own width.
        width: Option<f64>,
    },
    /// Add random noise to break up overplotting.
    Jitter {
        /// Horizontal jitter amount.
        width: Option<f64>,
        /// Vertical jitter amount.
        height: Option<f64>,
        /// Random seed for reproducible jitter.
        seed: Option<u64>,
    },
    /// Shift every object by a fixed offset.
    Nudge {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
}

/// Registry descriptor for a position adjustment.
#[derive(Debug, Clone, Copy)]
pub struct PositionInfo {
    /// Registry name.
    pub name: &'static str,
    /// Whether the adjustment only makes sense for geoms with graphical extent.
    pub needs_extent: bool,
}

impl Position {
    /// Names of every position adjustment in the catalog.
    pub const ALL_NAMES: [&'static str; 6] =
        ["identity", "stack", "fill", "dodge", "jitter", "nudge"];

    /// Stack with default ordering.
    #[must_use]
    pub fn stack() -> Self {
        Position::Stack { reverse: false }
    }

    /// Fill with default ordering.
    #[must_use]
    pub fn fill() -> Self {
        Position::Fill { reverse: false }
    }

    /// Dodge using the geom's width.
    #[must_use]
    pub fn dodge() -> Self {
        Position::Dodge { width: None }
    }

    /// Jitter with default amounts.
    #[must_use]
    pub fn jitter() -> Self {
        Position::Jitter {
            width: None,
            height: None,
            seed: None,
        }
    }

    /// Nudge by a fixed offset.
    #[must_use]
    pub fn nudge(x: f64, y: f64) -> Self {
        Position::Nudge { x, y }
    }

    /// Registry name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Registry descriptor.
    #[must_use]
    pub fn info(self) -> PositionInfo {
        let (name, needs_extent) = match self {
            Position::Identity => ("identity", false),
            Position::Stack { .. } => ("stack", true),
            Position::Fill { .. } => ("fill", true),
            Position::Dodge { .. } => ("dodge", true),
            Position::Jitter { .. } => ("jitter", false),
            Position::Nudge { .. } => ("nudge", false),
        };
        PositionInfo { name, needs_extent }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position_{}", self.name())
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parses a registry name, with or without the `position_` prefix.
    /// Parameters take their defaults; `nudge` defaults to no offset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("position_").unwrap_or(s);
        let position = match name {
            "identity" => Position::Identity,
            "stack" => Position::stack(),
            "fill" => Position::fill(),
            "dodge" => Position::dodge(),
            "jitter" => Position::jitter(),
            "nudge" => Position::nudge(0.0, 0.0),
            _ => return Err(Error::unknown("position", s)),
        };
        Ok(position)
    }
}
