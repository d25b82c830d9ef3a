//! Geometry types for Grammar of Graphics.
//!
//! Defines visual representations of data. Each geom declares the aesthetics
//! it cannot draw without, and the stat and position a layer gets when it
//! names only the geom.

use std::fmt;
use std::str::FromStr;

use super::aes::Aesthetic;
use super::position::Position;
use super::stat::{SmoothMethod, Stat, DEFAULT_BINS};
use crate::error::Error;

/// Geometry type specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Geom {
    /// Points.
    Point,
    /// Lines connecting points in x order.
    Line,
    /// Lines connecting points in data order.
    Path,
    /// Stairstep lines.
    Step,
    /// Area under a line.
    Area,
    /// Band between ymin and ymax.
    Ribbon,
    /// Bars whose height is computed by a stat.
    Bar,
    /// Bars whose height is taken from the data.
    Col,
    /// Histogram bars.
    Histogram,
    /// Frequency polygon.
    Freqpoly,
    /// Rectangles by corners.
    Rect,
    /// Tile/rectangle by centre (for heatmaps).
    Tile,
    /// Text labels.
    Text,
    /// Text labels on a background box.
    Label,
    /// Box plot.
    Boxplot,
    /// Violin plot.
    Violin,
    /// Smoothed density estimate.
    Density,
    /// Smooth curve (loess/lm).
    Smooth,
    /// Horizontal reference line.
    Hline,
    /// Vertical reference line.
    Vline,
    /// Diagonal reference line.
    Abline,
    /// Straight segment between two points.
    Segment,
    /// Vertical error bars.
    Errorbar,
    /// Filled polygon.
    Polygon,
    /// Points with random jitter.
    Jitter,
    /// Points sized by overlap count.
    Count,
}

/// Registry descriptor for a geom.
#[derive(Debug, Clone, Copy)]
pub struct GeomInfo {
    /// Registry name.
    pub name: &'static str,
    /// Minimal aesthetics needed to draw.
    pub required: &'static [Aesthetic],
    /// Stat used when the layer does not name one.
    pub default_stat: Stat,
    /// Position used when the layer does not name one.
    pub default_position: Position,
    /// Whether drawn observations occupy an extent that neighbours can overlap,
    /// so stacking, filling, and dodging mean something.
    pub has_extent: bool,
}

impl Geom {
    /// Every geom in the catalog.
    pub const ALL: [Geom; 26] = [
        Geom::Point,
        Geom::Line,
        Geom::Path,
        Geom::Step,
        Geom::Area,
        Geom::Ribbon,
        Geom::Bar,
        Geom::Col,
        Geom::Histogram,
        Geom::Freqpoly,
        Geom::Rect,
        Geom::Tile,
        Geom::Text,
        Geom::Label,
        Geom::Boxplot,
        Geom::Violin,
        Geom::Density,
        Geom::Smooth,
        Geom::Hline,
        Geom::Vline,
        Geom::Abline,
        Geom::Segment,
        Geom::Errorbar,
        Geom::Polygon,
        Geom::Jitter,
        Geom::Count,
    ];

    /// Registry name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Minimal aesthetics needed to draw.
    #[must_use]
    pub fn required_aes(self) -> &'static [Aesthetic] {
        self.info().required
    }

    /// Registry descriptor.
    #[must_use]
    pub fn info(self) -> GeomInfo {
        use Aesthetic as A;

        const XY: &[Aesthetic] = &[A::X, A::Y];
        const XY_LABEL: &[Aesthetic] = &[A::X, A::Y, A::Label];
        const X_YRANGE: &[Aesthetic] = &[A::X, A::Ymin, A::Ymax];
        const CORNERS: &[Aesthetic] = &[A::Xmin, A::Xmax, A::Ymin, A::Ymax];
        const HINGES: &[Aesthetic] = &[A::Lower, A::Middle, A::Upper, A::Ymin, A::Ymax];
        const SEGMENT: &[Aesthetic] = &[A::X, A::Y, A::Xend, A::Yend];
        const HLINE: &[Aesthetic] = &[A::Yintercept];
        const VLINE: &[Aesthetic] = &[A::Xintercept];
        const ABLINE: &[Aesthetic] = &[A::Slope, A::Intercept];

        let identity = Position::Identity;
        let stack = Position::stack();
        let dodge = Position::dodge();
        let bin = Stat::bin(DEFAULT_BINS);

        let (name, required, default_stat, default_position, has_extent) = match self {
            Geom::Point => ("point", XY, Stat::Identity, identity, false),
            Geom::Line => ("line", XY, Stat::Identity, identity, true),
            Geom::Path => ("path", XY, Stat::Identity, identity, false),
            Geom::Step => ("step", XY, Stat::Identity, identity, true),
            Geom::Area => ("area", XY, Stat::Identity, stack, true),
            Geom::Ribbon => ("ribbon", X_YRANGE, Stat::Identity, identity, true),
            Geom::Bar => ("bar", XY, Stat::Count, stack, true),
            Geom::Col => ("col", XY, Stat::Identity, stack, true),
            Geom::Histogram => ("histogram", XY, bin, stack, true),
            Geom::Freqpoly => ("freqpoly", XY, bin, identity, true),
            Geom::Rect => ("rect", CORNERS, Stat::Identity, identity, true),
            Geom::Tile => ("tile", XY, Stat::Identity, identity, true),
            Geom::Text => ("text", XY_LABEL, Stat::Identity, identity, false),
            Geom::Label => ("label", XY_LABEL, Stat::Identity, identity, false),
            Geom::Boxplot => ("boxplot", HINGES, Stat::Boxplot, dodge, true),
            Geom::Violin => ("violin", XY, Stat::Ydensity, dodge, true),
            Geom::Density => ("density", XY, Stat::Density, identity, true),
            Geom::Smooth => ("smooth", XY, Stat::smooth(SmoothMethod::Loess), identity, false),
            Geom::Hline => ("hline", HLINE, Stat::Identity, identity, false),
            Geom::Vline => ("vline", VLINE, Stat::Identity, identity, false),
            Geom::Abline => ("abline", ABLINE, Stat::Identity, identity, false),
            Geom::Segment => ("segment", SEGMENT, Stat::Identity, identity, false),
            Geom::Errorbar => ("errorbar", X_YRANGE, Stat::Identity, identity, true),
            Geom::Polygon => ("polygon", XY, Stat::Identity, identity, false),
            Geom::Jitter => ("jitter", XY, Stat::Identity, Position::jitter(), false),
            Geom::Count => ("count", XY, Stat::Sum, identity, false),
        };

        GeomInfo {
            name,
            required,
            default_stat,
            default_position,
            has_extent,
        }
    }
}

impl fmt::Display for Geom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geom_{}", self.name())
    }
}

impl FromStr for Geom {
    type Err = Error;

    /// Parses a registry name, with or without the `geom_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("geom_").unwrap_or(s);
        Geom::ALL
            .iter()
            .copied()
            .find(|g| g.name() == name)
            .ok_or_else(|| Error::unknown("geom", s))
    }
}
