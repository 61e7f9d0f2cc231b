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

//! Predicate parsing for the query compiler
//!
//! A predicate is an object. Without a special key its entries are terms
//! joined by an implicit ` AND `; `$and`/`$or`/`$nor`/`$not` combine
//! sub-predicates; every other shape dispatches through the operator table.

use crate::core::{Error, Result, Value, ValueType};

use super::compiler::QueryCompiler;
use super::emit::{push_literal, push_sql_string, Delimiter};
use super::operators::{find_relation, special_key, OperatorKind};
use super::path::append_paths;

impl QueryCompiler {
    /// Parse a boolean-valued expression, usually the top level of a query
    pub(super) fn parse_predicate(&mut self, expr: &Value) -> Result<()> {
        let entries = expr
            .as_object()
            .ok_or_else(|| Error::invalid_query("a predicate must be an object"))?;

        match special_key(expr) {
            None => {
                // No operator; each key is a property path, joined by an
                // implicit AND
                let mut sep = Delimiter::new(" AND ");
                for (key, value) in entries {
                    sep.next(&mut self.where_sql);
                    self.parse_term(key, value)?;
                }
                Ok(())
            }
            Some(("$and", terms)) => self.write_boolean_expr(terms, " AND "),
            Some(("$or", terms)) => self.write_boolean_expr(terms, " OR "),
            Some(("$nor", terms)) => {
                self.where_sql.push_str("NOT (");
                self.write_boolean_expr(terms, " OR ")?;
                self.where_sql.push(')');
                Ok(())
            }
            Some(("$not", terms)) => {
                let terms = terms
                    .as_array()
                    .ok_or_else(|| Error::invalid_query("$not expects a 1-element array"))?;
                if terms.len() != 1 {
                    return Err(Error::invalid_query("$not expects a 1-element array"));
                }
                self.where_sql.push_str("NOT (");
                self.parse_predicate(&terms[0])?;
                self.where_sql.push(')');
                Ok(())
            }
            Some((name, _)) => Err(Error::InvalidQuery(format!(
                "operator '{}' cannot stand at predicate position",
                name
            ))),
        }
    }

    /// Write a series of sub-predicates separated by an AND or OR operator
    fn write_boolean_expr(&mut self, terms: &Value, op: &str) -> Result<()> {
        let terms = terms.as_array().ok_or_else(|| {
            Error::invalid_query("boolean connectives expect an array of predicates")
        })?;
        let mut sep = Delimiter::new(op);
        for term in terms {
            sep.next(&mut self.where_sql);
            self.parse_predicate(term)?;
        }
        Ok(())
    }

    /// Parse one key/value term, like `"x": {"$gt": 5}`
    pub(super) fn parse_term(&mut self, key: &str, value: &Value) -> Result<()> {
        let Some((entry, value)) = find_relation(value)? else {
            // An object without an operator nests a predicate under `key`
            return self.parse_sub_property_term(key, value);
        };

        match entry.kind {
            OperatorKind::Comparison => {
                self.write_property_getter("fl_value", key)?;
                self.where_sql.push_str(entry.sql_op);
                self.write_literal(value)
            }
            OperatorKind::TypeCheck => {
                self.write_property_getter("fl_type", key)?;
                self.where_sql.push('=');
                self.write_type_code(value)
            }
            OperatorKind::Exists => {
                let present = value
                    .as_bool()
                    .ok_or_else(|| Error::invalid_query("$exists expects a boolean"))?;
                if !present {
                    self.where_sql.push_str("NOT ");
                }
                self.write_property_getter("fl_exists", key)
            }
            OperatorKind::Membership => {
                self.write_property_getter("fl_value", key)?;
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
                self.write_property_getter("fl_count", key)?;
                self.where_sql.push('=');
                self.write_literal(value)
            }
            OperatorKind::ContainsAll | OperatorKind::ContainsAny => {
                self.write_property_getter_left_open("fl_contains", key);
                self.where_sql
                    .push_str(if entry.kind == OperatorKind::ContainsAll {
                        ", 1"
                    } else {
                        ", 0"
                    });
                let items = value.as_array().ok_or_else(|| {
                    Error::InvalidQuery(format!("{} expects an array of literals", entry.name))
                })?;
                for item in items {
                    self.where_sql.push_str(", ");
                    self.write_literal(item)?;
                }
                self.where_sql.push(')');
                Ok(())
            }
            OperatorKind::ElemMatch => self.parse_elem_match(key, value),
            OperatorKind::FtsMatch => self.parse_fts_match(key, value),
        }
    }

    /// Parse a predicate nested inside a property
    ///
    /// The property joins the path prefix for the duration of the inner
    /// parse; the prefix is restored before any error propagates.
    fn parse_sub_property_term(&mut self, property: &str, value: &Value) -> Result<()> {
        let saved = self.property_path.clone();
        self.property_path = append_paths(&saved, property);
        self.where_sql.push('(');
        let inner = self.parse_predicate(value);
        self.property_path = saved;
        inner?;
        self.where_sql.push(')');
        Ok(())
    }

    /// Write the storage type code named by a `$type` operand
    pub(super) fn write_type_code(&mut self, value: &Value) -> Result<()> {
        let name = value
            .as_str()
            .ok_or_else(|| Error::invalid_query("$type expects a type name string"))?;
        let ty: ValueType = name.parse()?;
        self.where_sql.push_str(&ty.code().to_string());
        Ok(())
    }

    /// Write a call to a document helper SQL function over a property
    ///
    /// The synthetic properties `_id` and `_sequence` address the row's
    /// `key` and `sequence` columns instead of the document body, and only
    /// make sense as plain values.
    pub(super) fn write_property_getter(&mut self, fn_name: &str, property: &str) -> Result<()> {
        Self::push_property_getter(
            &mut self.where_sql,
            &self.json_column,
            &self.property_path,
            fn_name,
            property,
        )
    }

    /// Like [`write_property_getter`](Self::write_property_getter) but
    /// leaves the call open for trailing arguments; no closing `)`, no
    /// synthetic-property handling
    pub(super) fn write_property_getter_left_open(&mut self, fn_name: &str, property: &str) {
        Self::push_property_getter_open(
            &mut self.where_sql,
            &self.json_column,
            &self.property_path,
            fn_name,
            property,
        );
    }

    /// Write an expression node into the WHERE buffer as a SQL literal
    pub(super) fn write_literal(&mut self, literal: &Value) -> Result<()> {
        push_literal(&mut self.where_sql, literal)
    }

    /// Buffer-parameterized property getter, shared with the sort parser
    pub(super) fn push_property_getter(
        out: &mut String,
        json_column: &str,
        property_path: &str,
        fn_name: &str,
        property: &str,
    ) -> Result<()> {
        if property == "_id" {
            if fn_name != "fl_value" {
                return Err(Error::InvalidQuery(format!(
                    "reserved property '_id' cannot be used with {}",
                    fn_name
                )));
            }
            out.push_str("key");
        } else if property == "_sequence" {
            if fn_name != "fl_value" {
                return Err(Error::InvalidQuery(format!(
                    "reserved property '_sequence' cannot be used with {}",
                    fn_name
                )));
            }
            out.push_str("sequence");
        } else {
            Self::push_property_getter_open(out, json_column, property_path, fn_name, property);
            out.push(')');
        }
        Ok(())
    }

    /// Buffer-parameterized open-ended getter: `fn(column, 'path'`
    fn push_property_getter_open(
        out: &mut String,
        json_column: &str,
        property_path: &str,
        fn_name: &str,
        property: &str,
    ) {
        out.push_str(fn_name);
        out.push('(');
        out.push_str(json_column);
        out.push_str(", ");
        push_sql_string(out, &append_paths(property_path, property));
    }
}
