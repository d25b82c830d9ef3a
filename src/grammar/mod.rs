//! Grammar of Graphics layer specification.
//!
//! Provides the declarative plot specification of the layered grammar of
//! graphics [Wickham 2010]: a plot is a default dataset and mapping plus an
//! ordered sequence of layers, each combining data, mapping, geom, stat, and
//! position.
//!
//! # Components
//!
//! - **Aesthetics**: Mappings from data to visual channels (x, y, colour, size, shape)
//! - **Geometries**: Rendering primitives (point, line, bar, text, ...)
//! - **Statistics**: Data summaries applied before rendering (identity, count, bin, density)
//! - **Positions**: Overlap adjustments applied after the stat (stack, dodge, jitter)
//! - **Layers**: One bundle of the above, resolved against plot defaults
//!
//! # Example
//!
//! ```rust
//! use trueno_layers::grammar::*;
//!
//! let mpg = DataFrame::new()
//!     .with_f64("displ", &[1.8, 2.0, 2.8])
//!     .with_f64("hwy", &[29.0, 31.0, 26.0])
//!     .with_str("class", &["compact", "compact", "midsize"])
//!     .into_ref();
//!
//! let plot = PlotSpec::new()
//!     .data(mpg)
//!     .aes(Aes::new().x("displ").y("hwy"))
//!     .layer(Layer::new(Geom::Point).with_aes(Aes::new().colour("class")))
//!     .layer(Geom::Smooth)
//!     .resolve()
//!     .unwrap();
//!
//! assert_eq!(plot.len(), 2);
//! ```
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.
//! - Wickham, H. (2010). "A Layered Grammar of Graphics." Journal of Computational
//!   and Graphical Statistics.

mod aes;
mod data;
mod geom;
mod layer;
mod plot;
mod position;
mod stat;

pub use aes::{Aes, AesValue, Aesthetic, Constant};
pub use data::{DataFrame, DataRef, DataValue, Dataset, DatasetProvider};
pub use geom::{Geom, GeomInfo};
pub use layer::{Binding, Layer, PlotDefaults, ResolvedLayer};
pub use plot::{PlotSpec, ResolvedPlot};
pub use position::{Position, PositionInfo};
pub use stat::{SmoothMethod, Stat, StatInfo, DEFAULT_BINS};
