//! # Trueno-Layers
//!
//! Layered Grammar of Graphics specification for data science visualization.
//!
//! trueno-layers models a plot as plot-level defaults plus an ordered
//! sequence of layers. Each layer bundles a dataset reference, an aesthetic
//! mapping, a geom, a stat, and a position adjustment. Resolving a plot binds
//! every layer to a concrete dataset and merged mapping and checks it against
//! the geom, stat, and position registries, producing a value a renderer can
//! consume without further lookups.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_layers::prelude::*;
//!
//! let mpg = DataFrame::new()
//!     .with_f64("displ", &[1.8, 2.0])
//!     .with_f64("hwy", &[29.0, 31.0])
//!     .into_ref();
//!
//! let plot = PlotSpec::new()
//!     .data(mpg)
//!     .aes(Aes::new().x("displ").y("hwy"))
//!     + Layer::new(Geom::Point)
//!     + Layer::from_stat(Stat::Count).with_aes(Aes::new().remove(Aesthetic::Y));
//!
//! let resolved = plot.resolve()?;
//! assert_eq!(resolved.len(), 2);
//! # Ok::<(), trueno_layers::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `config` (default): YAML plot specification documents
//!
//! ## Academic References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Specification Modules
// ============================================================================

/// Grammar of Graphics layer specification.
pub mod grammar;

/// YAML plot specification documents.
#[cfg(feature = "config")]
#[cfg_attr(docsrs, doc(cfg(feature = "config")))]
pub mod config;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-layers operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_layers::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "config")]
    pub use crate::config::PlotConfig;
    pub use crate::error::{Error, Result};
    pub use crate::grammar::{
        Aes, AesValue, Aesthetic, Binding, Constant, DataFrame, DataRef, Dataset,
        DatasetProvider, Geom, Layer, PlotSpec, Position, ResolvedLayer, ResolvedPlot,
        SmoothMethod, Stat,
    };
}
