//! Plot specification builder.
//!
//! Combines plot-level defaults with an ordered sequence of layers. Layers are
//! only ever appended; resolution produces a separate [`ResolvedPlot`] and
//! leaves the specification untouched.

use std::ops::Add;

use tracing::debug;

use super::aes::Aes;
use super::data::DataRef;
use super::layer::{Layer, PlotDefaults, ResolvedLayer};
use crate::error::{Error, Result};

/// Grammar of Graphics plot specification.
#[derive(Debug, Clone, Default)]
pub struct PlotSpec {
    /// Default data and mapping.
    defaults: PlotDefaults,
    /// Layers, in drawing order.
    layers: Vec<Layer>,
}

impl PlotSpec {
    /// Create an empty plot specification.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default data.
    #[must_use]
    pub fn data(mut self, data: DataRef) -> Self {
        self.defaults.data = Some(data);
        self
    }

    /// Set the default aesthetics.
    #[must_use]
    pub fn aes(mut self, aes: Aes) -> Self {
        self.defaults.aes = aes;
        self
    }

    /// Append a layer.
    #[must_use]
    pub fn layer(mut self, layer: impl Into<Layer>) -> Self {
        self.layers.push(layer.into());
        self
    }

    /// Plot-level defaults.
    #[must_use]
    pub fn defaults(&self) -> &PlotDefaults {
        &self.defaults
    }

    /// Layers, in drawing order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Resolve and validate every layer, in order.
    ///
    /// # Errors
    ///
    /// Returns the first layer's error; nothing after it is resolved.
    /// Configuration errors are prefixed with the layer index.
    pub fn resolve(&self) -> Result<ResolvedPlot> {
        let mut layers = Vec::with_capacity(self.layers.len());

        for (index, layer) in self.layers.iter().enumerate() {
            let resolved = layer
                .resolve(&self.defaults)
                .and_then(|r| r.validate_aesthetics().map(|()| r))
                .map_err(|e| match e {
                    Error::Configuration { message } => {
                        Error::configuration(format!("layer {index}: {message}"))
                    }
                    other => other,
                })?;
            layers.push(resolved);
        }

        debug!(n_layers = layers.len(), "plot resolved");
        Ok(ResolvedPlot { layers })
    }
}

impl Add<Layer> for PlotSpec {
    type Output = PlotSpec;

    fn add(self, layer: Layer) -> PlotSpec {
        self.layer(layer)
    }
}

/// A fully resolved plot, ready for rendering.
#[derive(Debug, Clone)]
pub struct ResolvedPlot {
    layers: Vec<ResolvedLayer>,
}

impl ResolvedPlot {
    /// Resolved layers, in drawing order.
    #[must_use]
    pub fn layers(&self) -> &[ResolvedLayer] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the plot has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate over resolved layers.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedLayer> {
        self.layers.iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedPlot {
    type Item = &'a ResolvedLayer;
    type IntoIter = std::slice::Iter<'a, ResolvedLayer>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
