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

//! Core type definitions for Quern
//!
//! This module defines [`ValueType`], the closed list of document value
//! types recognized by the `$type` operator.

use std::fmt;
use std::str::FromStr;

use super::error::Error;

/// Document value types, in storage tag order
///
/// The numeric code of each variant is the tag the storage engine's
/// `fl_type` SQL function reports for a value of that type, so `$type`
/// comparisons compile to a plain integer equality. `Blob` never occurs in
/// a query expression tree but keeps the codes aligned with the storage
/// tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ValueType {
    /// JSON null
    Null = 0,

    /// Boolean true/false
    Boolean = 1,

    /// Integer or floating point number
    Number = 2,

    /// UTF-8 text string
    String = 3,

    /// Raw binary data
    Blob = 4,

    /// Ordered sequence of values
    Array = 5,

    /// String-keyed mapping
    Object = 6,
}

impl ValueType {
    /// Returns the storage tag code used by `fl_type`
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Null => write!(f, "null"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Number => write!(f, "number"),
            ValueType::String => write!(f, "string"),
            ValueType::Blob => write!(f, "blob"),
            ValueType::Array => write!(f, "array"),
            ValueType::Object => write!(f, "object"),
        }
    }
}

impl FromStr for ValueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(ValueType::Null),
            "boolean" => Ok(ValueType::Boolean),
            "number" => Ok(ValueType::Number),
            "string" => Ok(ValueType::String),
            "blob" => Ok(ValueType::Blob),
            "array" => Ok(ValueType::Array),
            "object" => Ok(ValueType::Object),
            _ => Err(Error::InvalidQuery(format!("unknown type name '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_storage_tag_order() {
        assert_eq!(ValueType::Null.code(), 0);
        assert_eq!(ValueType::Boolean.code(), 1);
        assert_eq!(ValueType::Number.code(), 2);
        assert_eq!(ValueType::String.code(), 3);
        assert_eq!(ValueType::Blob.code(), 4);
        assert_eq!(ValueType::Array.code(), 5);
        assert_eq!(ValueType::Object.code(), 6);
    }

    #[test]
    fn test_name_round_trip() {
        for ty in [
            ValueType::Null,
            ValueType::Boolean,
            ValueType::Number,
            ValueType::String,
            ValueType::Blob,
            ValueType::Array,
            ValueType::Object,
        ] {
            assert_eq!(ty.to_string().parse::<ValueType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_unknown_name_fails() {
        assert!("integer".parse::<ValueType>().is_err());
        // Names are case-sensitive, matching the storage engine's list
        assert!("String".parse::<ValueType>().is_err());
    }
}
