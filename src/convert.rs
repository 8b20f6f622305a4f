//! Type converters for variable path segments.
//!
//! A pattern like `/users/{id:int}` declares that the second segment must
//! parse as a base-10 integer. The tag after the colon is looked up in a
//! [`ConverterRegistry`] when the pattern is built, so an unknown tag is a
//! registration-time error. At request time a failed conversion simply
//! disqualifies the candidate route: a type mismatch in a path segment is
//! indistinguishable from "this route does not apply here".

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// A typed value captured from a path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl ParamValue {
    /// The string form of the value, if it was captured by a `str` segment.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer form of the value, if it was captured by an `int` segment.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float form of the value, if it was captured by a `float` segment.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => s.fmt(f),
            ParamValue::Int(i) => i.fmt(f),
            ParamValue::Float(x) => x.fmt(f),
        }
    }
}

/// A path segment's raw text failed its declared type's parser.
///
/// This error never reaches application code through [`resolve`]: it is
/// swallowed by the router, which treats the candidate route as not
/// matching.
///
/// [`resolve`]: crate::Router::resolve
#[derive(Debug, Clone, PartialEq, Error)]
#[error("cannot convert {value:?} with the {tag:?} converter")]
pub struct ConversionError {
    /// The type tag whose converter rejected the value.
    pub tag: String,
    /// The raw segment text.
    pub value: String,
}

/// A parse function from raw segment text to a typed value.
pub type Converter = dyn Fn(&str) -> Result<ParamValue, ConversionError> + Send + Sync;

/// Maps type tags to parse functions.
///
/// The default registry carries `str`, `int` and `float`. Custom tags can
/// be added with [`register`](ConverterRegistry::register) before any
/// pattern referencing them is built:
///
/// ```rust
/// use pathrouter::{ConverterRegistry, ParamValue};
///
/// let mut registry = ConverterRegistry::default();
/// registry.register("lower", |raw| {
///     Ok(ParamValue::Str(raw.to_lowercase()))
/// });
/// assert!(registry.contains("lower"));
/// ```
///
/// The registry is build-phase configuration: extending it after the
/// application has started serving requests is not supported.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<Converter>>,
}

impl ConverterRegistry {
    /// An empty registry with no converters at all, not even the built-ins.
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Register a converter under `tag`, replacing any previous one.
    pub fn register<F>(&mut self, tag: impl Into<String>, convert: F)
    where
        F: Fn(&str) -> Result<ParamValue, ConversionError> + Send + Sync + 'static,
    {
        let tag = tag.into();
        tracing::debug!(tag = %tag, "registered converter");
        self.converters.insert(tag, Arc::new(convert));
    }

    /// Whether a converter is registered under `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.converters.contains_key(tag)
    }

    pub(crate) fn get(&self, tag: &str) -> Option<Arc<Converter>> {
        self.converters.get(tag).cloned()
    }
}

/// The built-in converters: `str`, `int` and `float`.
impl Default for ConverterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();

        registry.register("str", |raw| Ok(ParamValue::Str(raw.to_owned())));

        registry.register("int", |raw| {
            raw.parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|_| ConversionError {
                    tag: "int".to_owned(),
                    value: raw.to_owned(),
                })
        });

        registry.register("float", |raw| {
            raw.parse::<f64>()
                .map(ParamValue::Float)
                .map_err(|_| ConversionError {
                    tag: "float".to_owned(),
                    value: raw.to_owned(),
                })
        });

        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(tag: &str, raw: &str) -> Result<ParamValue, ConversionError> {
        let registry = ConverterRegistry::default();
        registry.get(tag).expect("built-in converter")(raw)
    }

    #[test]
    fn str_is_identity() {
        assert_eq!(convert("str", "gordon"), Ok(ParamValue::Str("gordon".into())));
        assert_eq!(convert("str", "42"), Ok(ParamValue::Str("42".into())));
    }

    #[test]
    fn int_parses_base_10() {
        assert_eq!(convert("int", "42"), Ok(ParamValue::Int(42)));
        assert_eq!(convert("int", "-7"), Ok(ParamValue::Int(-7)));
    }

    #[test]
    fn int_rejects_non_digits() {
        assert!(convert("int", "abc").is_err());
        assert!(convert("int", "4.2").is_err());
        assert!(convert("int", "").is_err());
        assert!(convert("int", "42x").is_err());
    }

    #[test]
    fn float_parses_decimal() {
        assert_eq!(convert("float", "2.5"), Ok(ParamValue::Float(2.5)));
        assert_eq!(convert("float", "10"), Ok(ParamValue::Float(10.0)));
        assert!(convert("float", "two").is_err());
    }

    #[test]
    fn error_carries_tag_and_value() {
        let err = convert("int", "abc").unwrap_err();
        assert_eq!(err.tag, "int");
        assert_eq!(err.value, "abc");
    }

    #[test]
    fn custom_converter() {
        let mut registry = ConverterRegistry::default();
        registry.register("bool", |raw| match raw {
            "true" => Ok(ParamValue::Int(1)),
            "false" => Ok(ParamValue::Int(0)),
            _ => Err(ConversionError {
                tag: "bool".to_owned(),
                value: raw.to_owned(),
            }),
        });

        assert!(registry.contains("bool"));
        assert_eq!(registry.get("bool").unwrap()("true"), Ok(ParamValue::Int(1)));
        assert!(registry.get("bool").unwrap()("yes").is_err());
    }

    #[test]
    fn empty_registry_has_no_builtins() {
        let registry = ConverterRegistry::empty();
        assert!(!registry.contains("str"));
        assert!(!registry.contains("int"));
    }

    #[test]
    fn param_value_accessors() {
        assert_eq!(ParamValue::Int(42).as_int(), Some(42));
        assert_eq!(ParamValue::Int(42).as_str(), None);
        assert_eq!(ParamValue::Str("a".into()).as_str(), Some("a"));
        assert_eq!(ParamValue::Float(1.5).as_float(), Some(1.5));
    }
}
