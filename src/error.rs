//! Error types for trueno-layers operations.

use thiserror::Error;

use crate::grammar::Aesthetic;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or resolving a plot specification.
///
/// Every variant is reported synchronously to the caller at construction or
/// resolution time. Nothing is retried or recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A layer could not be bound to a concrete dataset.
    #[error("configuration error: {message}")]
    Configuration {
        /// What could not be resolved.
        message: String,
    },

    /// A geom or stat is missing aesthetics it requires after the mapping merge.
    #[error("{owner} requires missing aesthetics: {}", format_aesthetics(.missing))]
    MissingAesthetic {
        /// Registry name of the geom or stat that declared the requirement.
        owner: String,
        /// Unmet aesthetics, in declaration order.
        missing: Vec<Aesthetic>,
    },

    /// A name that is not present in the relevant registry.
    #[error("unknown {kind}: '{name}'")]
    UnknownIdentifier {
        /// Registry searched ("geom", "stat", "position", "aesthetic", "computed variable").
        kind: &'static str,
        /// The offending name.
        name: String,
    },

    /// YAML plot document could not be parsed.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Parser message.
        message: String,
    },

    /// YAML plot document could not be read.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),
}

impl Error {
    /// Shorthand for [`Error::Configuration`].
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::UnknownIdentifier`].
    pub(crate) fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Error::UnknownIdentifier {
            kind,
            name: name.into(),
        }
    }
}

fn format_aesthetics(missing: &[Aesthetic]) -> String {
    missing
        .iter()
        .map(|a| a.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_aesthetic_display() {
        let err = Error::MissingAesthetic {
            owner: "geom_point".into(),
            missing: vec![Aesthetic::Y],
        };
        assert_eq!(err.to_string(), "geom_point requires missing aesthetics: y");
    }

    #[test]
    fn test_missing_aesthetic_lists_all() {
        let err = Error::MissingAesthetic {
            owner: "geom_segment".into(),
            missing: vec![Aesthetic::Xend, Aesthetic::Yend],
        };
        assert!(err.to_string().ends_with("xend, yend"));
    }

    #[test]
    fn test_unknown_identifier_display() {
        let err = Error::unknown("geom", "pointy");
        assert_eq!(err.to_string(), "unknown geom: 'pointy'");
    }

    #[test]
    fn test_configuration_display() {
        let err = Error::configuration("layer 0 has no data");
        assert!(err.to_string().contains("layer 0 has no data"));
    }

    #[test]
    fn test_config_parse_display() {
        let err = Error::ConfigParse {
            line: 3,
            message: "bad indent".into(),
        };
        assert!(err.to_string().contains("line 3"));
    }
}
