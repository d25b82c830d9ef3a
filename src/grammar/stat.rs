//! Statistical transformations for Grammar of Graphics.
//!
//! A stat summarises a layer's data before rendering. This module only
//! describes stats: their default geom, the aesthetics they need, and the
//! variables they generate. The numerical algorithms live elsewhere.

use std::fmt;
use std::str::FromStr;

use super::aes::Aesthetic;
use super::geom::Geom;
use crate::error::Error;

/// Default number of bins for binning stats.
pub const DEFAULT_BINS: usize = 30;

/// Smoothing method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SmoothMethod {
    /// Local polynomial regression (LOESS).
    #[default]
    Loess,
    /// Linear regression.
    Linear,
}

impl SmoothMethod {
    /// Conventional short name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SmoothMethod::Loess => "loess",
            SmoothMethod::Linear => "lm",
        }
    }
}

impl FromStr for SmoothMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loess" => Ok(SmoothMethod::Loess),
            "lm" | "linear" => Ok(SmoothMethod::Linear),
            other => Err(Error::unknown("smoothing method", other)),
        }
    }
}

/// Statistical transformation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stat {
    /// No transformation (identity).
    #[default]
    Identity,
    /// Count occurrences.
    Count,
    /// Bin continuous data.
    Bin {
        /// Number of bins.
        bins: usize,
    },
    /// Compute density estimation.
    Density,
    /// Fit a smooth curve.
    Smooth {
        /// Smoothing method.
        method: SmoothMethod,
    },
    /// Compute summary statistics (for boxplot).
    Boxplot,
    /// Density along y, per x group (for violins).
    Ydensity,
    /// Compute 2D binning (for tile/heatmap).
    Bin2d {
        /// Number of x bins.
        bins_x: usize,
        /// Number of y bins.
        bins_y: usize,
    },
    /// Summarise y at each x.
    Summary,
    /// Count overlapping observations.
    Sum,
    /// Drop duplicate observations.
    Unique,
    /// Empirical cumulative distribution.
    Ecdf,
    /// Quantile-quantile comparison.
    Qq,
}

/// Registry descriptor for a stat.
#[derive(Debug, Clone, Copy)]
pub struct StatInfo {
    /// Registry name.
    pub name: &'static str,
    /// Geom used when a layer names only this stat.
    pub default_geom: Geom,
    /// Aesthetics the stat needs to compute anything.
    pub required: &'static [Aesthetic],
    /// Variables the stat generates, addressable as computed references.
    pub generated: &'static [&'static str],
    /// Aesthetics filled from generated variables when the mapping leaves them unset.
    pub default_aes: &'static [(Aesthetic, &'static str)],
}

impl Stat {
    /// Names of every stat in the catalog.
    pub const ALL_NAMES: [&'static str; 13] = [
        "identity", "count", "bin", "density", "smooth", "boxplot", "ydensity", "bin2d",
        "summary", "sum", "unique", "ecdf", "qq",
    ];

    /// Create an identity stat (no transformation).
    #[must_use]
    pub fn identity() -> Self {
        Stat::Identity
    }

    /// Create a binning stat.
    #[must_use]
    pub fn bin(bins: usize) -> Self {
        Stat::Bin { bins }
    }

    /// Create a smooth stat.
    #[must_use]
    pub fn smooth(method: SmoothMethod) -> Self {
        Stat::Smooth { method }
    }

    /// Create a 2D binning stat.
    #[must_use]
    pub fn bin2d(bins_x: usize, bins_y: usize) -> Self {
        Stat::Bin2d { bins_x, bins_y }
    }

    /// Registry name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Whether this stat passes data through untouched.
    #[must_use]
    pub fn is_identity(self) -> bool {
        matches!(self, Stat::Identity)
    }

    /// Whether `variable` is generated by this stat.
    #[must_use]
    pub fn generates(self, variable: &str) -> bool {
        self.info().generated.iter().any(|g| *g == variable)
    }

    /// Registry descriptor.
    #[must_use]
    pub fn info(self) -> StatInfo {
        use Aesthetic as A;
        match self {
            Stat::Identity => StatInfo {
                name: "identity",
                default_geom: Geom::Point,
                required: &[],
                generated: &[],
                default_aes: &[],
            },
            Stat::Count => StatInfo {
                name: "count",
                default_geom: Geom::Bar,
                required: &[A::X],
                generated: &["count", "prop"],
                default_aes: &[(A::Y, "count")],
            },
            Stat::Bin { .. } => StatInfo {
                name: "bin",
                default_geom: Geom::Bar,
                required: &[A::X],
                generated: &["count", "density", "ncount", "ndensity", "width"],
                default_aes: &[(A::Y, "count")],
            },
            Stat::Density => StatInfo {
                name: "density",
                default_geom: Geom::Area,
                required: &[A::X],
                generated: &["density", "count", "scaled", "ndensity", "n"],
                default_aes: &[(A::Y, "density")],
            },
            Stat::Smooth { .. } => StatInfo {
                name: "smooth",
                default_geom: Geom::Smooth,
                required: &[A::X, A::Y],
                generated: &["y", "ymin", "ymax", "se"],
                default_aes: &[],
            },
            Stat::Boxplot => StatInfo {
                name: "boxplot",
                default_geom: Geom::Boxplot,
                required: &[A::Y],
                generated: &[
                    "lower", "middle", "upper", "ymin", "ymax", "width", "notchlower",
                    "notchupper", "relvarwidth",
                ],
                default_aes: &[
                    (A::Lower, "lower"),
                    (A::Middle, "middle"),
                    (A::Upper, "upper"),
                    (A::Ymin, "ymin"),
                    (A::Ymax, "ymax"),
                ],
            },
            Stat::Ydensity => StatInfo {
                name: "ydensity",
                default_geom: Geom::Violin,
                required: &[A::X, A::Y],
                generated: &["density", "scaled", "count", "n", "violinwidth", "width"],
                default_aes: &[],
            },
            Stat::Bin2d { .. } => StatInfo {
                name: "bin2d",
                default_geom: Geom::Tile,
                required: &[A::X, A::Y],
                generated: &["count", "density", "ncount", "ndensity"],
                default_aes: &[(A::Fill, "count")],
            },
            Stat::Summary => StatInfo {
                name: "summary",
                default_geom: Geom::Point,
                required: &[A::X, A::Y],
                generated: &["y", "ymin", "ymax"],
                default_aes: &[],
            },
            Stat::Sum => StatInfo {
                name: "sum",
                default_geom: Geom::Point,
                required: &[A::X, A::Y],
                generated: &["n", "prop"],
                default_aes: &[(A::Size, "n")],
            },
            Stat::Unique => StatInfo {
                name: "unique",
                default_geom: Geom::Point,
                required: &[],
                generated: &[],
                default_aes: &[],
            },
            Stat::Ecdf => StatInfo {
                name: "ecdf",
                default_geom: Geom::Step,
                required: &[A::X],
                generated: &["ecdf"],
                default_aes: &[(A::Y, "ecdf")],
            },
            Stat::Qq => StatInfo {
                name: "qq",
                default_geom: Geom::Point,
                required: &[A::Sample],
                generated: &["sample", "theoretical"],
                default_aes: &[(A::X, "theoretical"), (A::Y, "sample")],
            },
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stat_{}", self.name())
    }
}

impl FromStr for Stat {
    type Err = Error;

    /// Parses a registry name, with or without the `stat_` prefix.
    /// Parameterised stats get their default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.strip_prefix("stat_").unwrap_or(s);
        let stat = match name {
            "identity" => Stat::Identity,
            "count" => Stat::Count,
            "bin" => Stat::bin(DEFAULT_BINS),
            "density" => Stat::Density,
            "smooth" => Stat::smooth(SmoothMethod::default()),
            "boxplot" => Stat::Boxplot,
            "ydensity" => Stat::Ydensity,
            "bin2d" | "bin_2d" => Stat::bin2d(DEFAULT_BINS, DEFAULT_BINS),
            "summary" => Stat::Summary,
            "sum" => Stat::Sum,
            "unique" => Stat::Unique,
            "ecdf" => Stat::Ecdf,
            "qq" => Stat::Qq,
            _ => return Err(Error::unknown("stat", s)),
        };
        Ok(stat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_bin() {
        let stat = Stat::bin(20);
        match stat {
            Stat::Bin { bins } => assert_eq!(bins, 20),
            _ => panic!("Expected Bin stat"),
        }
    }

    #[test]
    fn test_stat_bin2d() {
        let stat = Stat::bin2d(10, 15);
        match stat {
            Stat::Bin2d { bins_x, bins_y } => {
                assert_eq!(bins_x, 10);
                assert_eq!(bins_y, 15);
            }
            _ => panic!("Expected Bin2d stat"),
        }
    }

    #[test]
    fn test_stat_identity_passthrough() {
        let info = Stat::identity().info();
        assert!(Stat::identity().is_identity());
        assert!(info.generated.is_empty());
        assert!(info.default_aes.is_empty());
    }

    #[test]
    fn test_stat_count_generates() {
        assert!(Stat::Count.generates("count"));
        assert!(Stat::Count.generates("prop"));
        assert!(!Stat::Count.generates("density"));
        assert_eq!(Stat::Count.info().default_geom, Geom::Bar);
    }

    #[test]
    fn test_default_aes_reference_generated_variables() {
        for name in Stat::ALL_NAMES {
            let stat: Stat = name.parse().unwrap();
            for (_, var) in stat.info().default_aes {
                assert!(stat.generates(var), "{name} default aes uses undeclared {var}");
            }
        }
    }

    #[test]
    fn test_stat_from_str() {
        assert_eq!("bin".parse::<Stat>().unwrap(), Stat::bin(DEFAULT_BINS));
        assert_eq!("stat_count".parse::<Stat>().unwrap(), Stat::Count);
        assert_eq!(
            "smooth".parse::<Stat>().unwrap(),
            Stat::smooth(SmoothMethod::Loess)
        );
    }

    #[test]
    fn test_stat_from_str_unknown() {
        let err = "stat_magic".parse::<Stat>().unwrap_err();
        assert_eq!(err, Error::unknown("stat", "stat_magic"));
    }

    #[test]
    fn test_stat_names_round_trip() {
        for name in Stat::ALL_NAMES {
            assert_eq!(name.parse::<Stat>().unwrap().name(), name);
        }
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(Stat::Density.to_string(), "stat_density");
    }

    #[test]
    fn test_smooth_method_from_str() {
        assert_eq!("lm".parse::<SmoothMethod>().unwrap(), SmoothMethod::Linear);
        assert_eq!("loess".parse::<SmoothMethod>().unwrap(), SmoothMethod::Loess);
        assert!("gam".parse::<SmoothMethod>().is_err());
    }
}
