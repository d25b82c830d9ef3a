//! YAML plot specification documents.
//!
//! A document names its datasets, geoms, stats, and positions as strings.
//! [`PlotConfig::into_plot`] looks every name up and builds a [`PlotSpec`];
//! unknown names fail there rather than at resolution time.
//!
//! ```yaml
//! data: mpg
//! mapping: { x: displ, y: hwy }
//! layers:
//!   - geom: point
//!     mapping: { colour: class }
//!   - geom: smooth
//!     method: lm
//!   - stat: count
//!     position: dodge
//!     mapping: { y: { computed: prop } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::grammar::{
    Aes, AesValue, Aesthetic, Constant, DatasetProvider, Geom, Layer, PlotSpec, Position, Stat,
};

/// Mapping section: aesthetic name to value, `null` removes an inherited entry.
pub type MappingConfig = BTreeMap<String, Option<MappingValue>>;

/// A mapping value as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingValue {
    /// `{ computed: count }`: a stat-generated variable.
    Computed {
        /// Variable name.
        computed: String,
    },
    /// `{ constant: "blue" }`: an explicit constant.
    Constant {
        /// The constant.
        constant: ConstantValue,
    },
    /// A bare boolean constant.
    Bool(bool),
    /// A bare numeric constant.
    Number(f64),
    /// A bare string: a column name.
    Column(String),
}

/// A constant as written in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstantValue {
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// Text.
    Text(String),
}

impl From<&ConstantValue> for Constant {
    fn from(value: &ConstantValue) -> Self {
        match value {
            ConstantValue::Bool(b) => Constant::Bool(*b),
            ConstantValue::Number(n) => Constant::Number(*n),
            ConstantValue::Text(s) => Constant::Text(s.clone()),
        }
    }
}

impl From<&MappingValue> for AesValue {
    fn from(value: &MappingValue) -> Self {
        match value {
            MappingValue::Computed { computed } => AesValue::Computed(computed.clone()),
            MappingValue::Constant { constant } => AesValue::Constant(constant.into()),
            MappingValue::Bool(b) => AesValue::constant(*b),
            MappingValue::Number(n) => AesValue::constant(*n),
            MappingValue::Column(c) => AesValue::Column(c.clone()),
        }
    }
}

/// One layer of a plot document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    /// Geom name; inferred from the stat when absent.
    #[serde(default)]
    pub geom: Option<String>,

    /// Stat name; the geom's default when absent.
    #[serde(default)]
    pub stat: Option<String>,

    /// Position name; the geom's default when absent.
    #[serde(default)]
    pub position: Option<String>,

    /// Dataset name; the plot's data when absent.
    #[serde(default)]
    pub data: Option<String>,

    /// Layer mapping.
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Whether the plot mapping is inherited.
    #[serde(default = "default_inherit_aes")]
    pub inherit_aes: bool,

    /// Bin count for `bin` and `bin2d`.
    #[serde(default)]
    pub bins: Option<usize>,

    /// Smoothing method for `smooth` (`loess`, `lm`).
    #[serde(default)]
    pub method: Option<String>,

    /// Width for `dodge` and `jitter`.
    #[serde(default)]
    pub width: Option<f64>,

    /// Height for `jitter`.
    #[serde(default)]
    pub height: Option<f64>,

    /// Seed for `jitter`.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Horizontal offset for `nudge`.
    #[serde(default)]
    pub nudge_x: Option<f64>,

    /// Vertical offset for `nudge`.
    #[serde(default)]
    pub nudge_y: Option<f64>,

    /// Reverse stacking order for `stack` and `fill`.
    #[serde(default)]
    pub reverse: Option<bool>,
}

fn default_inherit_aes() -> bool {
    true
}

/// A plot document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotConfig {
    /// Default dataset name.
    #[serde(default)]
    pub data: Option<String>,

    /// Default mapping.
    #[serde(default)]
    pub mapping: MappingConfig,

    /// Layers, in drawing order.
    #[serde(default)]
    pub layers: Vec<LayerConfig>,
}

impl PlotConfig {
    /// Loads a plot document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses a plot document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        debug!(n_layers = config.layers.len(), "plot document parsed");
        Ok(config)
    }

    /// Builds a plot specification, looking datasets up in `provider`.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for unknown datasets, layers naming neither a
    ///   geom nor a stat, and parameters that do not apply.
    /// - [`Error::UnknownIdentifier`] for unknown geom, stat, position, or
    ///   aesthetic names.
    pub fn into_plot<P: DatasetProvider + ?Sized>(&self, provider: &P) -> Result<PlotSpec> {
        let mut plot = PlotSpec::new().aes(build_aes(&self.mapping)?);

        if let Some(name) = &self.data {
            plot = plot.data(lookup_dataset(provider, name)?);
        }

        for (index, layer) in self.layers.iter().enumerate() {
            plot = plot.layer(build_layer(index, layer, provider)?);
        }

        Ok(plot)
    }
}

fn lookup_dataset<P: DatasetProvider + ?Sized>(
    provider: &P,
    name: &str,
) -> Result<crate::grammar::DataRef> {
    provider
        .dataset(name)
        .ok_or_else(|| Error::configuration(format!("unknown dataset '{name}'")))
}

fn build_aes(mapping: &MappingConfig) -> Result<Aes> {
    mapping.iter().try_fold(Aes::new(), |aes, (name, value)| -> Result<Aes> {
        let aesthetic: Aesthetic = name.parse()?;
        Ok(match value {
            Some(v) => aes.set(aesthetic, AesValue::from(v)),
            None => aes.remove(aesthetic),
        })
    })
}

fn build_layer<P: DatasetProvider + ?Sized>(
    index: usize,
    config: &LayerConfig,
    provider: &P,
) -> Result<Layer> {
    let geom = config.geom.as_deref().map(str::parse::<Geom>).transpose()?;
    let stat = config.stat.as_deref().map(str::parse::<Stat>).transpose()?;

    let mut layer = match (geom, stat) {
        (Some(g), Some(s)) => Layer::new(g).with_stat(s),
        (Some(g), None) => Layer::new(g),
        (None, Some(s)) => Layer::from_stat(s),
        (None, None) => {
            return Err(Error::configuration(format!(
                "layer {index} names neither a geom nor a stat"
            )))
        }
    };

    if let Some(name) = &config.position {
        layer = layer.with_position(name.parse()?);
    }

    let stat = stat_params(index, layer.stat(), config)?;
    let position = position_params(index, layer.position(), config)?;
    layer = layer
        .with_stat(stat)
        .with_position(position)
        .with_aes(build_aes(&config.mapping)?)
        .with_inherit_aes(config.inherit_aes);

    if let Some(name) = &config.data {
        layer = layer.with_data(lookup_dataset(provider, name)?);
    }

    Ok(layer)
}

fn not_applicable(index: usize, param: &str, target: impl std::fmt::Display) -> Error {
    Error::configuration(format!("layer {index}: '{param}' does not apply to {target}"))
}

fn stat_params(index: usize, stat: Stat, config: &LayerConfig) -> Result<Stat> {
    let mut stat = stat;

    if let Some(n) = config.bins {
        if n == 0 {
            return Err(Error::configuration(format!(
                "layer {index}: 'bins' must be at least 1"
            )));
        }
        stat = match stat {
            Stat::Bin { .. } => Stat::bin(n),
            Stat::Bin2d { .. } => Stat::bin2d(n, n),
            other => return Err(not_applicable(index, "bins", other)),
        };
    }

    if let Some(name) = &config.method {
        stat = match stat {
            Stat::Smooth { .. } => Stat::smooth(name.parse()?),
            other => return Err(not_applicable(index, "method", other)),
        };
    }

    Ok(stat)
}

fn position_params(index: usize, position: Position, config: &LayerConfig) -> Result<Position> {
    let mut position = position;

    if config.width.is_some() {
        position = match position {
            Position::Dodge { .. } => Position::Dodge {
                width: config.width,
            },
            Position::Jitter { height, seed, .. } => Position::Jitter {
                width: config.width,
                height,
                seed,
            },
            other => return Err(not_applicable(index, "width", other)),
        };
    }

    if config.height.is_some() || config.seed.is_some() {
        position = match position {
            Position::Jitter { width, height, seed } => Position::Jitter {
                width,
                height: config.height.or(height),
                seed: config.seed.or(seed),
            },
            other => {
                let param = if config.height.is_some() { "height" } else { "seed" };
                return Err(not_applicable(index, param, other));
            }
        };
    }

    if config.nudge_x.is_some() || config.nudge_y.is_some() {
        position = match position {
            Position::Nudge { x, y } => Position::Nudge {
                x: config.nudge_x.unwrap_or(x),
                y: config.nudge_y.unwrap_or(y),
            },
            other => return Err(not_applicable(index, "nudge_x/nudge_y", other)),
        };
    }

    if let Some(reverse) = config.reverse {
        position = match position {
            Position::Stack { .. } => Position::Stack { reverse },
            Position::Fill { .. } => Position::Fill { reverse },
            other => return Err(not_applicable(index, "reverse", other)),
        };
    }

    Ok(position)
}
