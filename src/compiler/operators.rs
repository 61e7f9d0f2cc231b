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

//! The operator registry
//!
//! Query operators appear as `$`-prefixed object keys, e.g.
//! `{"$gt": 5}`. The registry is a closed table mapping each operator name
//! to its SQL operator text and a dispatch category.

use crate::core::{Error, Result, Value};

/// Dispatch category of a query operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperatorKind {
    /// Binary comparison: `<lhs> <sql_op> <rhs>`
    Comparison,
    /// `$type` - compare the value's storage type tag
    TypeCheck,
    /// `$exists` - test presence of a property
    Exists,
    /// `$in` / `$nin` - membership in a literal list
    Membership,
    /// `$size` - compare an array's element count
    Size,
    /// `$all` - every listed element present
    ContainsAll,
    /// `$any` - at least one listed element present
    ContainsAny,
    /// `$elemMatch` - predicate over exploded array elements
    ElemMatch,
    /// `$match` - full-text-search match
    FtsMatch,
}

/// One entry of the operator table
pub(crate) struct OperatorEntry {
    /// The `$`-prefixed operator name
    pub name: &'static str,
    /// SQL operator text, with surrounding spaces; empty when the category
    /// generates its own shape
    pub sql_op: &'static str,
    /// Dispatch category
    pub kind: OperatorKind,
}

/// The closed operator table; unknown `$`-keys are rejected
static OPERATORS: &[OperatorEntry] = &[
    OperatorEntry { name: "$eq", sql_op: " = ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$ne", sql_op: " <> ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$lt", sql_op: " < ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$lte", sql_op: " <= ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$le", sql_op: " <= ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$gt", sql_op: " > ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$gte", sql_op: " >= ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$ge", sql_op: " >= ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$like", sql_op: " LIKE ", kind: OperatorKind::Comparison },
    OperatorEntry { name: "$type", sql_op: "", kind: OperatorKind::TypeCheck },
    OperatorEntry { name: "$exists", sql_op: "", kind: OperatorKind::Exists },
    OperatorEntry { name: "$in", sql_op: " IN ", kind: OperatorKind::Membership },
    OperatorEntry { name: "$nin", sql_op: " NOT IN ", kind: OperatorKind::Membership },
    OperatorEntry { name: "$size", sql_op: "", kind: OperatorKind::Size },
    OperatorEntry { name: "$all", sql_op: "", kind: OperatorKind::ContainsAll },
    OperatorEntry { name: "$any", sql_op: "", kind: OperatorKind::ContainsAny },
    OperatorEntry { name: "$elemMatch", sql_op: "", kind: OperatorKind::ElemMatch },
    OperatorEntry { name: "$match", sql_op: " MATCH ", kind: OperatorKind::FtsMatch },
];

/// Look up an operator by its `$`-name
pub(crate) fn lookup(name: &str) -> Option<&'static OperatorEntry> {
    OPERATORS.iter().find(|entry| entry.name == name)
}

/// Returns the first `$`-prefixed entry of an object, in insertion order
///
/// Returns None for non-objects and for objects with no special key. Any
/// further `$`-keys in the same object are ignored; the first one wins.
pub(crate) fn special_key(value: &Value) -> Option<(&str, &Value)> {
    value.as_object().and_then(|entries| {
        entries
            .iter()
            .find(|(key, _)| key.starts_with('$'))
            .map(|(key, value)| (key.as_str(), value))
    })
}

/// Resolve the operator applied by a term's value
///
/// An object carrying a special key peels to `(operator, payload)`; an
/// object without one is a sub-property predicate and resolves to `None`;
/// any other value compares with the implicit `$eq`. Unknown operator
/// names fail.
pub(crate) fn find_relation(value: &Value) -> Result<Option<(&'static OperatorEntry, &Value)>> {
    let (name, payload) = match special_key(value) {
        Some((name, payload)) => (name, payload),
        None => {
            if value.is_object() {
                return Ok(None);
            }
            ("$eq", value)
        }
    };

    match lookup(name) {
        Some(entry) => Ok(Some((entry, payload))),
        None => Err(Error::InvalidQuery(format!(
            "unknown operator '{}'",
            name
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_operators() {
        assert_eq!(lookup("$eq").unwrap().sql_op, " = ");
        assert_eq!(lookup("$ne").unwrap().sql_op, " <> ");
        assert_eq!(lookup("$like").unwrap().sql_op, " LIKE ");
        assert_eq!(lookup("$nin").unwrap().sql_op, " NOT IN ");
        assert_eq!(lookup("$match").unwrap().kind, OperatorKind::FtsMatch);
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(lookup("$le").unwrap().sql_op, " <= ");
        assert_eq!(lookup("$lte").unwrap().sql_op, " <= ");
        assert_eq!(lookup("$ge").unwrap().sql_op, " >= ");
        assert_eq!(lookup("$gte").unwrap().sql_op, " >= ");
    }

    #[test]
    fn test_lookup_unknown() {
        assert!(lookup("$regex").is_none());
        assert!(lookup("eq").is_none());
    }

    #[test]
    fn test_special_key_first_wins() {
        let v = Value::object(vec![
            ("plain".to_string(), Value::Int(1)),
            ("$gt".to_string(), Value::Int(5)),
            ("$lt".to_string(), Value::Int(10)),
        ]);
        let (key, payload) = special_key(&v).unwrap();
        assert_eq!(key, "$gt");
        assert_eq!(payload, &Value::Int(5));
    }

    #[test]
    fn test_special_key_absent() {
        let v = Value::object(vec![("name".to_string(), Value::string("Bob"))]);
        assert!(special_key(&v).is_none());
        assert!(special_key(&Value::Int(3)).is_none());
    }

    #[test]
    fn test_find_relation_defaults_to_eq() {
        let v = Value::string("Bob");
        let (entry, payload) = find_relation(&v).unwrap().unwrap();
        assert_eq!(entry.name, "$eq");
        assert_eq!(payload, &v);
    }

    #[test]
    fn test_find_relation_peels_operator() {
        let v = Value::object(vec![("$gte".to_string(), Value::Int(21))]);
        let (entry, payload) = find_relation(&v).unwrap().unwrap();
        assert_eq!(entry.name, "$gte");
        assert_eq!(payload, &Value::Int(21));
    }

    #[test]
    fn test_find_relation_sub_property() {
        let v = Value::object(vec![("city".to_string(), Value::string("Oslo"))]);
        assert!(find_relation(&v).unwrap().is_none());
    }

    #[test]
    fn test_find_relation_unknown_operator() {
        let v = Value::object(vec![("$regex".to_string(), Value::string("a.*"))]);
        assert!(find_relation(&v).is_err());
    }
}
