//! Aesthetic mappings for Grammar of Graphics.
//!
//! Maps aesthetic channels to data columns, stat-computed variables, or
//! constants. Plot-level and layer-level mappings combine key-wise: a layer
//! entry adds or overrides the plot entry with the same aesthetic, and a
//! removal marker deletes an inherited entry.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A visual channel a variable or constant can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Aesthetic {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Lower horizontal bound.
    Xmin,
    /// Upper horizontal bound.
    Xmax,
    /// Lower vertical bound.
    Ymin,
    /// Upper vertical bound.
    Ymax,
    /// Horizontal end point.
    Xend,
    /// Vertical end point.
    Yend,
    /// Position of a vertical reference line.
    Xintercept,
    /// Position of a horizontal reference line.
    Yintercept,
    /// Slope of a reference line.
    Slope,
    /// Intercept of a reference line.
    Intercept,
    /// Lower hinge of a box.
    Lower,
    /// Median of a box.
    Middle,
    /// Upper hinge of a box.
    Upper,
    /// Sample for quantile statistics.
    Sample,
    /// Stroke colour.
    Colour,
    /// Fill colour.
    Fill,
    /// Opacity.
    Alpha,
    /// Point or text size.
    Size,
    /// Point shape.
    Shape,
    /// Line dash pattern.
    Linetype,
    /// Stroke width.
    Linewidth,
    /// Grouping for collective geoms and statistics.
    Group,
    /// Text label.
    Label,
    /// Observation weight.
    Weight,
    /// Width of a rectangle or box.
    Width,
    /// Height of a rectangle or tile.
    Height,
}

impl Aesthetic {
    /// Every aesthetic, in canonical order.
    pub const ALL: [Aesthetic; 28] = [
        Aesthetic::X,
        Aesthetic::Y,
        Aesthetic::Xmin,
        Aesthetic::Xmax,
        Aesthetic::Ymin,
        Aesthetic::Ymax,
        Aesthetic::Xend,
        Aesthetic::Yend,
        Aesthetic::Xintercept,
        Aesthetic::Yintercept,
        Aesthetic::Slope,
        Aesthetic::Intercept,
        Aesthetic::Lower,
        Aesthetic::Middle,
        Aesthetic::Upper,
        Aesthetic::Sample,
        Aesthetic::Colour,
        Aesthetic::Fill,
        Aesthetic::Alpha,
        Aesthetic::Size,
        Aesthetic::Shape,
        Aesthetic::Linetype,
        Aesthetic::Linewidth,
        Aesthetic::Group,
        Aesthetic::Label,
        Aesthetic::Weight,
        Aesthetic::Width,
        Aesthetic::Height,
    ];

    /// Canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Aesthetic::X => "x",
            Aesthetic::Y => "y",
            Aesthetic::Xmin => "xmin",
            Aesthetic::Xmax => "xmax",
            Aesthetic::Ymin => "ymin",
            Aesthetic::Ymax => "ymax",
            Aesthetic::Xend => "xend",
            Aesthetic::Yend => "yend",
            Aesthetic::Xintercept => "xintercept",
            Aesthetic::Yintercept => "yintercept",
            Aesthetic::Slope => "slope",
            Aesthetic::Intercept => "intercept",
            Aesthetic::Lower => "lower",
            Aesthetic::Middle => "middle",
            Aesthetic::Upper => "upper",
            Aesthetic::Sample => "sample",
            Aesthetic::Colour => "colour",
            Aesthetic::Fill => "fill",
            Aesthetic::Alpha => "alpha",
            Aesthetic::Size => "size",
            Aesthetic::Shape => "shape",
            Aesthetic::Linetype => "linetype",
            Aesthetic::Linewidth => "linewidth",
            Aesthetic::Group => "group",
            Aesthetic::Label => "label",
            Aesthetic::Weight => "weight",
            Aesthetic::Width => "width",
            Aesthetic::Height => "height",
        }
    }
}

impl fmt::Display for Aesthetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aesthetic {
    type Err = Error;

    /// Parses a canonical name. American spelling `color` is accepted for `colour`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = match s {
            "color" => "colour",
            other => other,
        };
        Aesthetic::ALL
            .iter()
            .copied()
            .find(|a| a.name() == name)
            .ok_or_else(|| Error::unknown("aesthetic", s))
    }
}

/// A constant value bound to an aesthetic.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    /// A number.
    Number(f64),
    /// A string, e.g. a colour name.
    Text(String),
    /// A boolean.
    Bool(bool),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Number(n) => write!(f, "{n}"),
            Constant::Text(s) => write!(f, "\"{s}\""),
            Constant::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<f64> for Constant {
    fn from(v: f64) -> Self {
        Constant::Number(v)
    }
}

impl From<&str> for Constant {
    fn from(s: &str) -> Self {
        Constant::Text(s.to_string())
    }
}

impl From<String> for Constant {
    fn from(s: String) -> Self {
        Constant::Text(s)
    }
}

impl From<bool> for Constant {
    fn from(b: bool) -> Self {
        Constant::Bool(b)
    }
}

/// What an aesthetic is mapped to.
#[derive(Debug, Clone, PartialEq)]
pub enum AesValue {
    /// A variable generated by the layer's stat (e.g. `count`, `density`).
    ///
    /// Takes precedence over a raw column of the same name.
    Computed(String),
    /// A raw column of the layer's dataset.
    Column(String),
    /// A constant literal.
    Constant(Constant),
}

impl AesValue {
    /// Reference a raw data column.
    #[must_use]
    pub fn column(name: &str) -> Self {
        AesValue::Column(name.to_string())
    }

    /// Reference a stat-computed variable.
    #[must_use]
    pub fn computed(name: &str) -> Self {
        AesValue::Computed(name.to_string())
    }

    /// Bind a constant.
    #[must_use]
    pub fn constant(value: impl Into<Constant>) -> Self {
        AesValue::Constant(value.into())
    }
}

impl fmt::Display for AesValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AesValue::Computed(v) => write!(f, "computed({v})"),
            AesValue::Column(c) => f.write_str(c),
            AesValue::Constant(c) => write!(f, "{c}"),
        }
    }
}

impl From<&str> for AesValue {
    fn from(s: &str) -> Self {
        AesValue::column(s)
    }
}

impl From<Constant> for AesValue {
    fn from(c: Constant) -> Self {
        AesValue::Constant(c)
    }
}

/// Aesthetic mapping specification.
///
/// An entry is either a binding or a removal marker. Removal markers only
/// matter when this mapping is merged over another one; a merged mapping
/// never contains them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aes {
    entries: BTreeMap<Aesthetic, Option<AesValue>>,
}

impl Aes {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an aesthetic.
    #[must_use]
    pub fn set(mut self, aesthetic: Aesthetic, value: impl Into<AesValue>) -> Self {
        self.entries.insert(aesthetic, Some(value.into()));
        self
    }

    /// Mark an inherited aesthetic for removal.
    #[must_use]
    pub fn remove(mut self, aesthetic: Aesthetic) -> Self {
        self.entries.insert(aesthetic, None);
        self
    }

    /// Map x position to a column.
    #[must_use]
    pub fn x(self, column: &str) -> Self {
        self.set(Aesthetic::X, column)
    }

    /// Map y position to a column.
    #[must_use]
    pub fn y(self, column: &str) -> Self {
        self.set(Aesthetic::Y, column)
    }

    /// Map colour to a column.
    #[must_use]
    pub fn colour(self, column: &str) -> Self {
        self.set(Aesthetic::Colour, column)
    }

    /// Map fill to a column.
    #[must_use]
    pub fn fill(self, column: &str) -> Self {
        self.set(Aesthetic::Fill, column)
    }

    /// Map size to a column.
    #[must_use]
    pub fn size(self, column: &str) -> Self {
        self.set(Aesthetic::Size, column)
    }

    /// Map shape to a column.
    #[must_use]
    pub fn shape(self, column: &str) -> Self {
        self.set(Aesthetic::Shape, column)
    }

    /// Map group to a column.
    #[must_use]
    pub fn group(self, column: &str) -> Self {
        self.set(Aesthetic::Group, column)
    }

    /// Map label to a column.
    #[must_use]
    pub fn label(self, column: &str) -> Self {
        self.set(Aesthetic::Label, column)
    }

    /// Map an aesthetic to a stat-computed variable.
    #[must_use]
    pub fn computed(self, aesthetic: Aesthetic, variable: &str) -> Self {
        self.set(aesthetic, AesValue::computed(variable))
    }

    /// Bind an aesthetic to a constant.
    #[must_use]
    pub fn constant(self, aesthetic: Aesthetic, value: impl Into<Constant>) -> Self {
        self.set(aesthetic, AesValue::constant(value))
    }

    /// The binding for an aesthetic, if set.
    #[must_use]
    pub fn get(&self, aesthetic: Aesthetic) -> Option<&AesValue> {
        self.entries.get(&aesthetic).and_then(Option::as_ref)
    }

    /// Whether the aesthetic is bound.
    #[must_use]
    pub fn contains(&self, aesthetic: Aesthetic) -> bool {
        self.get(aesthetic).is_some()
    }

    /// Whether the aesthetic carries a removal marker.
    #[must_use]
    pub fn removes(&self, aesthetic: Aesthetic) -> bool {
        matches!(self.entries.get(&aesthetic), Some(None))
    }

    /// Bound aesthetics in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Aesthetic, &AesValue)> {
        self.entries
            .iter()
            .filter_map(|(a, v)| v.as_ref().map(|v| (*a, v)))
    }

    /// Number of bound aesthetics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Whether no aesthetic is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge `other` over `self`.
    ///
    /// Key-wise, last writer wins: a binding in `other` replaces the one in
    /// `self`, a removal marker in `other` deletes it. Removal markers in
    /// `self` are dropped. No partial merging of a single aesthetic.
    #[must_use]
    pub fn merge(&self, other: &Aes) -> Aes {
        let mut entries: BTreeMap<Aesthetic, Option<AesValue>> = self
            .entries
            .iter()
            .filter(|(_, v)| v.is_some())
            .map(|(a, v)| (*a, v.clone()))
            .collect();

        for (aesthetic, value) in &other.entries {
            match value {
                Some(v) => {
                    entries.insert(*aesthetic, Some(v.clone()));
                }
                None => {
                    entries.remove(aesthetic);
                }
            }
        }

        Aes { entries }
    }
}

impl fmt::Display for Aes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("aes(")?;
        for (i, (aesthetic, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match value {
                Some(v) => write!(f, "{aesthetic} = {v}")?,
                None => write!(f, "{aesthetic} = NULL")?,
            }
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Aes {
        Aes::new().x("displ").y("hwy")
    }

    #[test]
    fn test_aes_builder() {
        let aes = Aes::new()
            .x("xvar")
            .y("yvar")
            .colour("category")
            .constant(Aesthetic::Size, 5.0);

        assert_eq!(aes.get(Aesthetic::X), Some(&AesValue::column("xvar")));
        assert_eq!(aes.get(Aesthetic::Y), Some(&AesValue::column("yvar")));
        assert_eq!(aes.get(Aesthetic::Colour), Some(&AesValue::column("category")));
        assert_eq!(aes.get(Aesthetic::Size), Some(&AesValue::constant(5.0)));
        assert_eq!(aes.len(), 4);
    }

    #[test]
    fn test_merge_adds_key() {
        let merged = defaults().merge(&Aes::new().colour("cyl"));
        assert_eq!(merged, Aes::new().x("displ").y("hwy").colour("cyl"));
    }

    #[test]
    fn test_merge_overrides_key() {
        let merged = defaults().merge(&Aes::new().y("cty"));
        assert_eq!(merged, Aes::new().x("displ").y("cty"));
    }

    #[test]
    fn test_merge_removes_key() {
        let merged = defaults().merge(&Aes::new().remove(Aesthetic::Y));
        assert_eq!(merged, Aes::new().x("displ"));
        assert!(!merged.removes(Aesthetic::Y));
    }

    #[test]
    fn test_merge_remove_absent_key_is_noop() {
        let merged = defaults().merge(&Aes::new().remove(Aesthetic::Colour));
        assert_eq!(merged, defaults());
    }

    #[test]
    fn test_merge_is_not_deep() {
        let base = Aes::new().set(Aesthetic::Colour, AesValue::computed("count"));
        let merged = base.merge(&Aes::new().constant(Aesthetic::Colour, "red"));
        assert_eq!(merged.get(Aesthetic::Colour), Some(&AesValue::constant("red")));
    }

    #[test]
    fn test_merge_drops_base_removal_markers() {
        let base = Aes::new().x("a").remove(Aesthetic::Y);
        let merged = base.merge(&Aes::new());
        assert!(!merged.removes(Aesthetic::Y));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_aesthetic_from_str() {
        assert_eq!("x".parse::<Aesthetic>().unwrap(), Aesthetic::X);
        assert_eq!("colour".parse::<Aesthetic>().unwrap(), Aesthetic::Colour);
        assert_eq!("color".parse::<Aesthetic>().unwrap(), Aesthetic::Colour);
        assert_eq!("linewidth".parse::<Aesthetic>().unwrap(), Aesthetic::Linewidth);
    }

    #[test]
    fn test_aesthetic_from_str_unknown() {
        let err = "sparkle".parse::<Aesthetic>().unwrap_err();
        assert_eq!(err, Error::unknown("aesthetic", "sparkle"));
    }

    #[test]
    fn test_aesthetic_names_round_trip() {
        for a in Aesthetic::ALL {
            assert_eq!(a.name().parse::<Aesthetic>().unwrap(), a);
        }
    }

    #[test]
    fn test_iter_skips_removals() {
        let aes = Aes::new().x("a").remove(Aesthetic::Y).colour("c");
        let keys: Vec<_> = aes.iter().map(|(a, _)| a).collect();
        assert_eq!(keys, vec![Aesthetic::X, Aesthetic::Colour]);
        assert!(aes.removes(Aesthetic::Y));
    }

    #[test]
    fn test_display() {
        let aes = Aes::new()
            .x("displ")
            .computed(Aesthetic::Y, "count")
            .remove(Aesthetic::Colour);
        assert_eq!(aes.to_string(), "aes(x = displ, y = computed(count), colour = NULL)");
    }

    #[test]
    fn test_aes_default() {
        let aes = Aes::default();
        assert!(aes.is_empty());
        assert!(aes.get(Aesthetic::X).is_none());
    }
}
