#![forbid(unsafe_code)]

//! Ordered query-string model.
//!
//! [`Query`] keeps parameters in insertion order so rewriting one parameter
//! does not shuffle the rest of the URL. Parsing never fails: a query
//! string is user-controlled input and a malformed escape is data, not an
//! error.
//!
//! # Design Notes
//!
//! - Repeated keys collapse into [`QueryValue::Many`]. Codec callers treat
//!   `Many` as "not a string", mirroring how array-valued parameters are
//!   rejected at the selection boundary.
//! - `+` decodes to a space; spaces encode as `%20`. Both directions agree,
//!   so parse ∘ serialize is the identity on anything this module emits.

use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters gets percent-escaped.
const QUERY_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Value of one query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// The parameter appeared exactly once.
    Single(String),
    /// The parameter appeared more than once.
    Many(Vec<String>),
}

impl QueryValue {
    /// The value as a plain string, if the parameter appeared exactly once.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            QueryValue::Single(s) => Some(s),
            QueryValue::Many(_) => None,
        }
    }
}

/// An ordered set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, QueryValue)>,
}

impl Query {
    /// Create an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the query has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Value for the given parameter name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Set a parameter to a single value, replacing any previous value.
    ///
    /// An existing parameter keeps its position; a new one appends.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = QueryValue::Single(value.into());
        match self.params.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
    }

    /// Remove a parameter, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<QueryValue> {
        let index = self.params.iter().position(|(key, _)| key == name)?;
        Some(self.params.remove(index).1)
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Parse a query string (with or without a leading `?`).
    ///
    /// Never fails. Empty pairs are skipped, malformed percent escapes pass
    /// through literally, and repeated names accumulate into
    /// [`QueryValue::Many`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Query::new();
        for pair in raw.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (name, value) = match pair.split_once('=') {
                Some((name, value)) => (name, value),
                None => (pair, ""),
            };
            let name = decode_component(name);
            if name.is_empty() {
                continue;
            }
            let value = decode_component(value);
            query.append(name, value);
        }
        query
    }

    /// Serialize to a query string without a leading `?`.
    ///
    /// An empty query serializes to an empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.params {
            let values: &[String] = match value {
                QueryValue::Single(s) => std::slice::from_ref(s),
                QueryValue::Many(list) => list,
            };
            for v in values {
                if !out.is_empty() {
                    out.push('&');
                }
                out.push_str(&encode_component(name));
                out.push('=');
                out.push_str(&encode_component(v));
            }
        }
        out
    }

    /// Append a decoded pair, collapsing repeats into `Many`.
    fn append(&mut self, name: String, value: String) {
        if let Some(index) = self.params.iter().position(|(key, _)| *key == name) {
            let slot = &mut self.params[index].1;
            match slot {
                QueryValue::Single(existing) => {
                    let first = std::mem::take(existing);
                    *slot = QueryValue::Many(vec![first, value]);
                }
                QueryValue::Many(list) => list.push(value),
            }
        } else {
            self.params.push((name, QueryValue::Single(value)));
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_ESCAPE).to_string()
}

fn decode_component(raw: &str) -> String {
    // Form encoding: '+' is a space. A literal plus arrives as %2B and is
    // untouched by this replacement.
    let raw = raw.replace('+', " ");
    percent_decode_str(&raw).decode_utf8_lossy().into_owned()
}
