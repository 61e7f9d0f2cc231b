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

//! `$elemMatch` compilation
//!
//! An `$elemMatch` predicate tests the elements of an array property. The
//! array is exploded into rows by the `fl_each` table-valued function and
//! the inner predicate runs against its `value`/`type` columns inside an
//! `EXISTS` sub-select.

use crate::core::{Error, Result, Value};

use super::compiler::QueryCompiler;
use super::emit::Delimiter;
use super::operators::{find_relation, OperatorKind};

/// Alias of the row-exploded array table inside the sub-select
const EACH_TABLE: &str = "fl_each";

impl QueryCompiler {
    /// Parse an `$elemMatch` expression against a property
    pub(super) fn parse_elem_match(&mut self, property: &str, matcher: &Value) -> Result<()> {
        self.where_sql.push_str("EXISTS (SELECT 1 FROM ");
        self.write_property_getter(EACH_TABLE, property)?;
        self.where_sql.push_str(" WHERE ");
        self.parse_elem_match_term(matcher)?;
        self.where_sql.push(')');
        Ok(())
    }

    /// Parse one operator term inside an `$elemMatch`
    ///
    /// Mirrors the outer term dispatch but compiles against the exploded
    /// table's columns instead of property getters. Nested quantifiers,
    /// nested `$elemMatch`, FTS matches, and bare sub-property objects are
    /// not supported here.
    fn parse_elem_match_term(&mut self, value: &Value) -> Result<()> {
        let Some((entry, value)) = find_relation(value)? else {
            return Err(Error::invalid_query(
                "a sub-property predicate is not supported inside $elemMatch",
            ));
        };

        match entry.kind {
            OperatorKind::Comparison => {
                self.where_sql.push_str(EACH_TABLE);
                self.where_sql.push_str(".value");
                self.where_sql.push_str(entry.sql_op);
                self.write_literal(value)
            }
            OperatorKind::TypeCheck => {
                self.where_sql.push_str(EACH_TABLE);
                self.where_sql.push_str(".type=");
                self.write_type_code(value)
            }
            OperatorKind::Exists => {
                let present = value
                    .as_bool()
                    .ok_or_else(|| Error::invalid_query("$exists expects a boolean"))?;
                if !present {
                    self.where_sql.push_str("NOT ");
                }
                // Any present element has a non-negative type tag
                self.where_sql.push('(');
                self.where_sql.push_str(EACH_TABLE);
                self.where_sql.push_str(".type >= 0)");
                Ok(())
            }
            OperatorKind::Membership => {
                self.where_sql.push_str(EACH_TABLE);
                self.where_sql.push_str(".value");
                self.where_sql.push_str(entry.sql_op);
                self.where_sql.push('(');
                let items = value.as_array().ok_or_else(|| {
                    Error::InvalidQuery(format!("{} expects an array of literals", entry.name))
                })?;
                let mut sep = Delimiter::new(", ");
                for item in items {
                    sep.next(&mut self.where_sql);
                    self.write_literal(item)?;
                }
                self.where_sql.push(')');
                Ok(())
            }
            OperatorKind::Size => {
                self.where_sql.push_str("count(");
                self.where_sql.push_str(EACH_TABLE);
                self.where_sql.push_str(".*)=");
                self.write_literal(value)
            }
            OperatorKind::ContainsAll
            | OperatorKind::ContainsAny
            | OperatorKind::ElemMatch
            | OperatorKind::FtsMatch => Err(Error::InvalidQuery(format!(
                "{} is not supported inside $elemMatch",
                entry.name
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(json: &str) -> Result<String> {
        let mut qc = QueryCompiler::new("kv_default", "body");
        let expr = Value::from_json_str(json).unwrap();
        qc.parse(Some(&expr), None)?;
        Ok(qc.where_clause().to_string())
    }

    #[test]
    fn test_elem_match_comparison() {
        assert_eq!(
            compile(r#"{"items": {"$elemMatch": {"$gt": 5}}}"#).unwrap(),
            "EXISTS (SELECT 1 FROM fl_each(body, 'items') WHERE fl_each.value > 5)"
        );
    }

    #[test]
    fn test_elem_match_implicit_eq() {
        assert_eq!(
            compile(r#"{"items": {"$elemMatch": "red"}}"#).unwrap(),
            "EXISTS (SELECT 1 FROM fl_each(body, 'items') WHERE fl_each.value = 'red')"
        );
    }

    #[test]
    fn test_elem_match_type() {
        assert_eq!(
            compile(r#"{"items": {"$elemMatch": {"$type": "number"}}}"#).unwrap(),
            "EXISTS (SELECT 1 FROM fl_each(body, 'items') WHERE fl_each.type=2)"
        );
    }

    #[test]
    fn test_elem_match_exists() {
        assert_eq!(
            compile(r#"{"items": {"$elemMatch": {"$exists": true}}}"#).unwrap(),
            "EXISTS (SELECT 1 FROM fl_each(body, 'items') WHERE (fl_each.type >= 0))"
        );
        assert_eq!(
            compile(r#"{"items": {"$elemMatch": {"$exists": false}}}"#).unwrap(),
            "EXISTS (SELECT 1 FROM fl_each(body, 'items') WHERE NOT (fl_each.type >= 0))"
        );
    }

    #[test]
    fn test_elem_match_membership() {
        assert_eq!(
            compile(r#"{"items": {"$elemMatch": {"$in": [1, 2]}}}"#).unwrap(),
            "EXISTS (SELECT 1 FROM fl_each(body, 'items') WHERE fl_each.value IN (1, 2))"
        );
    }

    #[test]
    fn test_elem_match_size() {
        assert_eq!(
            compile(r#"{"items": {"$elemMatch": {"$size": 2}}}"#).unwrap(),
            "EXISTS (SELECT 1 FROM fl_each(body, 'items') WHERE count(fl_each.*)=2)"
        );
    }

    #[test]
    fn test_elem_match_under_nested_property() {
        assert_eq!(
            compile(r#"{"order": {"lines": {"$elemMatch": {"$eq": 7}}}}"#).unwrap(),
            "(EXISTS (SELECT 1 FROM fl_each(body, 'order.lines') WHERE fl_each.value = 7))"
        );
    }

    #[test]
    fn test_elem_match_unsupported_forms() {
        assert!(compile(r#"{"items": {"$elemMatch": {"$all": [1]}}}"#).is_err());
        assert!(compile(r#"{"items": {"$elemMatch": {"$any": [1]}}}"#).is_err());
        assert!(compile(r#"{"items": {"$elemMatch": {"$elemMatch": {"$eq": 1}}}}"#).is_err());
        assert!(compile(r#"{"items": {"$elemMatch": {"$match": "word"}}}"#).is_err());
        assert!(compile(r#"{"items": {"$elemMatch": {"qty": {"$gt": 1}}}}"#).is_err());
    }

    #[test]
    fn test_elem_match_rejects_reserved_property() {
        assert!(compile(r#"{"_id": {"$elemMatch": {"$eq": 1}}}"#).is_err());
        assert!(compile(r#"{"_sequence": {"$elemMatch": {"$eq": 1}}}"#).is_err());
    }
}
