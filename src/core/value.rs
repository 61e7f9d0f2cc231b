// Copyright 2025 Quern Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Expression tree values for Quern
//!
//! This module provides the [`Value`] enum, the tagged tree that query
//! expressions are made of, plus the bridge from JSON text.
//!
//! Object entries keep their insertion order. The compiler depends on this:
//! implicit-AND terms are emitted in source order, and when an object holds
//! an operator key the first `$`-key encountered wins.

use super::error::Result;
use super::types::ValueType;

/// A node in a query expression tree
///
/// The where- and sort-expressions handed to the compiler are trees of
/// these. Scalars are leaves; arrays and objects nest.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null
    Null,

    /// Boolean true/false
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// UTF-8 text string
    String(String),

    /// Ordered sequence of values
    Array(Vec<Value>),

    /// String-keyed mapping, in insertion order; keys are unique
    Object(Vec<(String, Value)>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a string value
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Create an array value
    pub fn array(values: impl Into<Vec<Value>>) -> Self {
        Value::Array(values.into())
    }

    /// Create an object value from key/value pairs, keeping their order
    pub fn object(entries: impl Into<Vec<(String, Value)>>) -> Self {
        Value::Object(entries.into())
    }

    /// Decode a JSON blob into an expression tree
    ///
    /// Decoding is delegated to serde_json; decode failures surface as
    /// [`Error::Json`](crate::core::Error::Json).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let decoded: serde_json::Value = serde_json::from_str(json)?;
        Ok(Value::from(decoded))
    }

    // =========================================================================
    // Type accessors
    // =========================================================================

    /// Returns the document type of this value
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Int(_) | Value::Float(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    /// Returns true if this value is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // =========================================================================
    // Value extractors
    // =========================================================================

    /// Extract a boolean, or None for other types
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract an integer, or None for other types
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a string slice, or None for other types
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract the elements of an array, or None for other types
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Extract the entries of an object, or None for other types
    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64 range, or a fraction/exponent
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(values) => {
                Value::Array(values.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
