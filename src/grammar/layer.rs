//! Layers: the unit combining data, mapping, geom, stat, and position.
//!
//! A [`Layer`] is built once and then treated as immutable. Resolving it
//! against the plot defaults yields a [`ResolvedLayer`] bound to a concrete
//! dataset and a merged mapping, ready for a renderer.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::aes::{Aes, AesValue, Aesthetic, Constant};
use super::data::DataRef;
use super::geom::Geom;
use super::position::Position;
use super::stat::Stat;
use crate::error::{Error, Result};

/// Plot-level defaults every layer resolves against.
#[derive(Debug, Clone, Default)]
pub struct PlotDefaults {
    /// Default dataset.
    pub data: Option<DataRef>,
    /// Default aesthetic mapping.
    pub aes: Aes,
}

/// A layer in the plot.
///
/// Fields are set through the constructors and `with_*` builders only:
///
/// ```compile_fail
/// use trueno_layers::grammar::{Geom, Layer};
///
/// let mut layer = Layer::new(Geom::Point);
/// layer.geom = Geom::Boxplot;
/// ```
#[derive(Debug, Clone)]
pub struct Layer {
    geom: Geom,
    stat: Stat,
    position: Position,
    /// Layer-specific data (if different from plot data).
    data: Option<DataRef>,
    /// Layer-specific aesthetics, merged over the plot mapping.
    aes: Aes,
    inherit_aes: bool,
}

impl Layer {
    /// Create a new layer from a geometry, with the geom's default stat and position.
    #[must_use]
    pub fn new(geom: Geom) -> Self {
        let info = geom.info();
        Self {
            geom,
            stat: info.default_stat,
            position: info.default_position,
            data: None,
            aes: Aes::new(),
            inherit_aes: true,
        }
    }

    /// Create a new layer from a stat, drawn with the stat's default geom.
    #[must_use]
    pub fn from_stat(stat: Stat) -> Self {
        Self::new(stat.info().default_geom).with_stat(stat)
    }

    /// Set layer-specific data.
    #[must_use]
    pub fn with_data(mut self, data: DataRef) -> Self {
        self.data = Some(data);
        self
    }

    /// Set layer aesthetics.
    #[must_use]
    pub fn with_aes(mut self, aes: Aes) -> Self {
        self.aes = aes;
        self
    }

    /// Set statistical transformation.
    #[must_use]
    pub fn with_stat(mut self, stat: Stat) -> Self {
        self.stat = stat;
        self
    }

    /// Set position adjustment.
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Choose whether the plot mapping is inherited.
    #[must_use]
    pub fn with_inherit_aes(mut self, inherit: bool) -> Self {
        self.inherit_aes = inherit;
        self
    }

    /// The geometry.
    pub fn geom(&self) -> Geom {
        self.geom
    }

    /// Statistical transformation.
    pub fn stat(&self) -> Stat {
        self.stat
    }

    /// Position adjustment.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Layer-specific data, if any.
    pub fn data(&self) -> Option<&DataRef> {
        self.data.as_ref()
    }

    /// Layer-specific aesthetics.
    pub fn aes(&self) -> &Aes {
        &self.aes
    }

    /// Whether the plot mapping is inherited.
    pub fn inherit_aes(&self) -> bool {
        self.inherit_aes
    }

    /// Bind this layer to a dataset and a merged mapping.
    ///
    /// Layer data wins over plot data. The layer mapping is merged over the
    /// plot mapping unless inheritance is switched off.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if neither the layer nor the plot has data.
    /// - [`Error::UnknownIdentifier`] if a computed reference names a variable
    ///   the stat does not generate.
    pub fn resolve(&self, defaults: &PlotDefaults) -> Result<ResolvedLayer> {
        let data = self
            .data
            .as_ref()
            .or(defaults.data.as_ref())
            .map(Arc::clone)
            .ok_or_else(|| {
                Error::configuration(format!(
                    "{} has no data and the plot has no default data",
                    self.geom
                ))
            })?;

        let aes = if self.inherit_aes {
            defaults.aes.merge(&self.aes)
        } else {
            Aes::new().merge(&self.aes)
        };

        for (aesthetic, value) in aes.iter() {
            if let AesValue::Computed(variable) = value {
                if !self.stat.generates(variable) {
                    debug!(
                        %aesthetic,
                        %variable,
                        stat = %self.stat,
                        "computed variable not generated"
                    );
                    return Err(Error::unknown("computed variable", variable.as_str()));
                }
            }
        }

        if self.position.info().needs_extent && !self.geom.info().has_extent {
            warn!(
                geom = %self.geom,
                position = %self.position,
                "position adjustment has no effect on a geom without extent"
            );
        }

        debug!(
            geom = %self.geom,
            stat = %self.stat,
            position = %self.position,
            %aes,
            "layer resolved"
        );

        Ok(ResolvedLayer {
            geom: self.geom,
            stat: self.stat,
            position: self.position,
            data,
            aes,
        })
    }
}

impl From<Geom> for Layer {
    fn from(geom: Geom) -> Self {
        Layer::new(geom)
    }
}

/// What a resolved aesthetic is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// A variable generated by the layer's stat.
    Computed(String),
    /// A column present in the layer's dataset.
    Column(String),
    /// A constant literal.
    Constant(Constant),
}

/// A layer bound to a concrete dataset and merged mapping.
#[derive(Debug, Clone)]
pub struct ResolvedLayer {
    geom: Geom,
    stat: Stat,
    position: Position,
    data: DataRef,
    aes: Aes,
}

impl ResolvedLayer {
    /// The geometry.
    pub fn geom(&self) -> Geom {
        self.geom
    }

    /// Statistical transformation.
    pub fn stat(&self) -> Stat {
        self.stat
    }

    /// Position adjustment.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The dataset in effect.
    pub fn data(&self) -> &DataRef {
        &self.data
    }

    /// The merged mapping.
    pub fn aes(&self) -> &Aes {
        &self.aes
    }

    /// Check the geom's and the stat's required aesthetics.
    ///
    /// Aesthetics the stat fills from its generated variables count toward the
    /// geom's requirements. The stat's own requirements must come from the
    /// mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAesthetic`] naming the geom (checked first) or
    /// the stat, and every unmet aesthetic.
    pub fn validate_aesthetics(&self) -> Result<()> {
        let stat_info = self.stat.info();
        let provided = |a: Aesthetic| {
            self.aes.contains(a) || stat_info.default_aes.iter().any(|(d, _)| *d == a)
        };

        let missing: Vec<Aesthetic> =
            self.geom.required_aes().iter().copied().filter(|&a| !provided(a)).collect();
        if !missing.is_empty() {
            return Err(Error::MissingAesthetic {
                owner: self.geom.to_string(),
                missing,
            });
        }

        let missing: Vec<Aesthetic> =
            stat_info.required.iter().copied().filter(|&a| !self.aes.contains(a)).collect();
        if !missing.is_empty() {
            return Err(Error::MissingAesthetic {
                owner: self.stat.to_string(),
                missing,
            });
        }

        Ok(())
    }

    /// Evaluate every aesthetic to what it is bound to.
    ///
    /// Resolution order: explicit computed reference, then raw column, then
    /// constant literal. A column name the dataset does not have is taken as
    /// a text constant. Stat default aesthetics fill whatever the mapping
    /// leaves unset.
    #[must_use]
    pub fn bindings(&self) -> BTreeMap<Aesthetic, Binding> {
        let mut out: BTreeMap<Aesthetic, Binding> = self
            .stat
            .info()
            .default_aes
            .iter()
            .map(|(a, var)| (*a, Binding::Computed((*var).to_string())))
            .collect();

        for (aesthetic, value) in self.aes.iter() {
            let binding = match value {
                AesValue::Computed(v) => Binding::Computed(v.clone()),
                AesValue::Column(c) if self.data.has_column(c) => Binding::Column(c.clone()),
                AesValue::Column(c) => {
                    debug!(%aesthetic, column = %c, "no such column, binding as constant");
                    Binding::Constant(Constant::Text(c.clone()))
                }
                AesValue::Constant(k) => Binding::Constant(k.clone()),
            };
            out.insert(aesthetic, binding);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::data::DataFrame;
    use crate::grammar::stat::DEFAULT_BINS;

    fn mpg() -> DataRef {
        DataFrame::new()
            .with_f64("displ", &[1.8, 2.0, 2.8])
            .with_f64("hwy", &[29.0, 31.0, 26.0])
            .with_f64("cty", &[18.0, 21.0, 16.0])
            .with_f64("cyl", &[4.0, 4.0, 6.0])
            .with_str("class", &["compact", "compact", "midsize"])
            .into_ref()
    }

    fn defaults() -> PlotDefaults {
        PlotDefaults {
            data: Some(mpg()),
            aes: Aes::new().x("displ").y("hwy"),
        }
    }

    #[test]
    fn test_layer_new_uses_geom_defaults() {
        let layer = Layer::new(Geom::Bar);
        assert_eq!(layer.stat(), Stat::Count);
        assert_eq!(layer.position(), Position::stack());
        assert!(layer.data().is_none());
        assert!(layer.inherit_aes());
    }

    #[test]
    fn test_layer_from_stat_infers_geom() {
        let layer = Layer::from_stat(Stat::Density);
        assert_eq!(layer.geom(), Geom::Area);
        assert_eq!(layer.stat(), Stat::Density);
        assert_eq!(layer.position(), Position::stack());
    }

    #[test]
    fn test_layer_overrides() {
        let layer = Layer::new(Geom::Point)
            .with_stat(Stat::Sum)
            .with_position(Position::jitter());
        assert_eq!(layer.stat(), Stat::Sum);
        assert_eq!(layer.position(), Position::jitter());
    }

    #[test]
    fn test_resolve_inherits_data() {
        let defaults = defaults();
        let resolved = Layer::new(Geom::Point).resolve(&defaults).unwrap();
        assert!(Arc::ptr_eq(resolved.data(), defaults.data.as_ref().unwrap()));
    }

    #[test]
    fn test_resolve_layer_data_wins() {
        let own = DataFrame::new().with_f64("displ", &[1.0]).into_ref();
        let resolved = Layer::new(Geom::Point)
            .with_data(Arc::clone(&own))
            .resolve(&defaults())
            .unwrap();
        assert!(Arc::ptr_eq(resolved.data(), &own));
    }

    #[test]
    fn test_resolve_without_any_data() {
        let err = Layer::new(Geom::Point).resolve(&PlotDefaults::default()).unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_resolve_merges_mapping() {
        let resolved = Layer::new(Geom::Point)
            .with_aes(Aes::new().colour("cyl"))
            .resolve(&defaults())
            .unwrap();
        assert_eq!(*resolved.aes(), Aes::new().x("displ").y("hwy").colour("cyl"));
    }

    #[test]
    fn test_resolve_without_inheritance() {
        let resolved = Layer::new(Geom::Point)
            .with_aes(Aes::new().x("cty"))
            .with_inherit_aes(false)
            .resolve(&defaults())
            .unwrap();
        assert_eq!(*resolved.aes(), Aes::new().x("cty"));
    }

    #[test]
    fn test_resolve_rejects_ungenerated_computed_variable() {
        let err = Layer::new(Geom::Point)
            .with_aes(Aes::new().computed(Aesthetic::Colour, "density"))
            .resolve(&defaults())
            .unwrap_err();
        assert_eq!(err, Error::unknown("computed variable", "density"));
    }

    #[test]
    fn test_validate_missing_y() {
        let resolved = Layer::new(Geom::Point)
            .with_aes(Aes::new().x("displ"))
            .with_inherit_aes(false)
            .resolve(&defaults())
            .unwrap();
        let err = resolved.validate_aesthetics().unwrap_err();
        assert_eq!(
            err,
            Error::MissingAesthetic {
                owner: "geom_point".into(),
                missing: vec![Aesthetic::Y],
            }
        );
    }

    #[test]
    fn test_validate_stat_supplies_geom_requirement() {
        let resolved = Layer::new(Geom::Bar)
            .with_aes(Aes::new().x("class"))
            .with_inherit_aes(false)
            .resolve(&defaults())
            .unwrap();
        assert!(resolved.validate_aesthetics().is_ok());
    }

    #[test]
    fn test_validate_stat_requirement() {
        let resolved = Layer::new(Geom::Boxplot)
            .with_aes(Aes::new().x("class"))
            .with_inherit_aes(false)
            .resolve(&defaults())
            .unwrap();
        let err = resolved.validate_aesthetics().unwrap_err();
        assert_eq!(
            err,
            Error::MissingAesthetic {
                owner: "stat_boxplot".into(),
                missing: vec![Aesthetic::Y],
            }
        );
    }

    #[test]
    fn test_validate_reports_every_missing_aesthetic() {
        let resolved = Layer::new(Geom::Segment).resolve(&defaults()).unwrap();
        match resolved.validate_aesthetics().unwrap_err() {
            Error::MissingAesthetic { missing, .. } => {
                assert_eq!(missing, vec![Aesthetic::Xend, Aesthetic::Yend]);
            }
            other => panic!("Expected MissingAesthetic, got {other:?}"),
        }
    }

    #[test]
    fn test_bindings_resolution_order() {
        let resolved = Layer::new(Geom::Bar)
            .with_aes(
                Aes::new()
                    .x("class")
                    .fill("blue")
                    .constant(Aesthetic::Alpha, 0.5)
                    .computed(Aesthetic::Y, "prop"),
            )
            .with_inherit_aes(false)
            .resolve(&defaults())
            .unwrap();

        let b = resolved.bindings();
        assert_eq!(b[&Aesthetic::X], Binding::Column("class".into()));
        assert_eq!(b[&Aesthetic::Y], Binding::Computed("prop".into()));
        assert_eq!(b[&Aesthetic::Fill], Binding::Constant(Constant::Text("blue".into())));
        assert_eq!(b[&Aesthetic::Alpha], Binding::Constant(Constant::Number(0.5)));
    }

    #[test]
    fn test_bindings_computed_shadows_same_named_column() {
        let data = DataFrame::new()
            .with_f64("x", &[1.0])
            .with_f64("count", &[9.0])
            .into_ref();
        let resolved = Layer::new(Geom::Bar)
            .with_data(data)
            .with_aes(Aes::new().x("x").computed(Aesthetic::Y, "count"))
            .resolve(&PlotDefaults::default())
            .unwrap();
        assert_eq!(resolved.bindings()[&Aesthetic::Y], Binding::Computed("count".into()));
    }

    #[test]
    fn test_bindings_include_stat_defaults() {
        let resolved = Layer::new(Geom::Histogram)
            .with_aes(Aes::new().x("hwy"))
            .with_inherit_aes(false)
            .resolve(&defaults())
            .unwrap();
        let b = resolved.bindings();
        assert_eq!(b[&Aesthetic::Y], Binding::Computed("count".into()));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn test_resolve_stack_on_point_is_not_an_error() {
        let resolved = Layer::new(Geom::Point)
            .with_position(Position::stack())
            .resolve(&defaults())
            .unwrap();
        assert_eq!(resolved.position(), Position::stack());
        assert!(resolved.validate_aesthetics().is_ok());
    }

    #[test]
    fn test_resolved_layer_accessors() {
        let defaults = defaults();
        let layer = Layer::new(Geom::Histogram)
            .with_aes(Aes::new().remove(Aesthetic::Y))
            .with_position(Position::dodge());
        let resolved = layer.resolve(&defaults).unwrap();

        assert_eq!(resolved.geom(), layer.geom());
        assert_eq!(resolved.stat(), Stat::bin(DEFAULT_BINS));
        assert_eq!(resolved.position(), Position::dodge());
        assert_eq!(*resolved.aes(), Aes::new().x("displ"));
        assert!(Arc::ptr_eq(resolved.data(), defaults.data.as_ref().unwrap()));
        assert!(layer.aes().removes(Aesthetic::Y));
    }

    #[test]
    fn test_layer_from_geom() {
        let layer: Layer = Geom::Line.into();
        assert_eq!(layer.geom(), Geom::Line);
    }

    #[test]
    fn test_layer_debug_clone() {
        let layer = Layer::new(Geom::Point).with_data(mpg());
        let layer2 = layer.clone();
        let _ = format!("{:?}", layer2);
    }
}
