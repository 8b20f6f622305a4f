//! Parameters bound from variable path segments.

use std::ops::Index;
use std::slice;

use crate::convert::ParamValue;

/// A single name/value pair captured from the request path.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub key: String,
    pub value: ParamValue,
}

/// The parameters bound while matching a route, in pattern order.
///
/// There are two ways to retrieve a value:
///
/// 1) by the name of the variable segment:
/// ```rust
/// # use pathrouter::{Params, ParamValue};
/// # let mut params = Params::default();
/// # params.push("id", ParamValue::Int(42));
/// let id = params.get("id").and_then(|v| v.as_int());
/// assert_eq!(id, Some(42));
/// ```
///
/// 2) by position, which also exposes the name:
/// ```rust
/// # use pathrouter::{Params, ParamValue};
/// # let mut params = Params::default();
/// # params.push("id", ParamValue::Int(42));
/// assert_eq!(params[0].key, "id");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<Param>);

impl Params {
    /// The value bound to the variable named `key`, if any.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Append a binding. Later bindings never shadow earlier ones because
    /// duplicate variable names are rejected at pattern construction.
    pub fn push(&mut self, key: impl Into<String>, value: ParamValue) {
        self.0.push(Param {
            key: key.into(),
            value,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, Param> {
        self.0.iter()
    }
}

impl Index<usize> for Params {
    type Output = Param;

    fn index(&self, index: usize) -> &Param {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a Param;
    type IntoIter = slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_name_and_index() {
        let mut params = Params::default();
        params.push("category", ParamValue::Str("rust".into()));
        params.push("post", ParamValue::Int(7));

        assert_eq!(params.len(), 2);
        assert_eq!(
            params.get("category"),
            Some(&ParamValue::Str("rust".into()))
        );
        assert_eq!(params.get("post"), Some(&ParamValue::Int(7)));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params[1].key, "post");
    }

    #[test]
    fn empty_by_default() {
        let params = Params::default();
        assert!(params.is_empty());
        assert_eq!(params.get("anything"), None);
    }
}
