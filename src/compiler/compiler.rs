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

//! Query compiler - main struct and public facade

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Result, Value};

/// Compiles a document query expression into SQL text fragments
///
/// One instance compiles one query at a time: construct it with the
/// documents table name and the column holding the encoded document, call
/// [`parse`](Self::parse) (or [`parse_json`](Self::parse_json)), then read
/// the fragments out. `parse` resets all internal buffers on entry, so an
/// instance may be reused for another query.
///
/// The table name, column name, and any string placeholder identifiers are
/// inlined into the generated SQL verbatim; the caller vouches for them.
/// Everything else user-supplied is emitted as a quoted literal or a bound
/// placeholder.
pub struct QueryCompiler {
    /// Documents table name, trusted verbatim
    pub(super) table_name: String,
    /// Name of the column holding the encoded document, trusted verbatim
    pub(super) json_column: String,
    /// WHERE clause under construction
    pub(super) where_sql: String,
    /// ORDER BY clause under construction
    pub(super) sort_sql: String,
    /// Property-path prefix of the predicate currently being compiled;
    /// empty at top level, restored on every scope exit
    pub(super) property_path: String,
    /// FTS-indexed property paths in first-use order, 1-based
    pub(super) fts_properties: SmallVec<[String; 2]>,
}

impl QueryCompiler {
    /// Create a compiler for the given documents table and document column
    pub fn new(table_name: impl Into<String>, json_column: impl Into<String>) -> Self {
        QueryCompiler {
            table_name: table_name.into(),
            json_column: json_column.into(),
            where_sql: String::new(),
            sort_sql: String::new(),
            property_path: String::new(),
            fts_properties: SmallVec::new(),
        }
    }

    /// Compile a where-expression and a sort-expression
    ///
    /// Either may be absent: no where-expression leaves the WHERE fragment
    /// empty, no sort-expression orders by `key`.
    pub fn parse(&mut self, where_expr: Option<&Value>, sort_expr: Option<&Value>) -> Result<()> {
        self.reset();
        if let Some(where_expr) = where_expr {
            self.parse_predicate(where_expr)?;
        }
        self.parse_sort(sort_expr)?;
        trace!(
            where_len = self.where_sql.len(),
            order_by_len = self.sort_sql.len(),
            fts_tables = self.fts_properties.len(),
            "compiled query"
        );
        Ok(())
    }

    /// Compile where- and sort-expressions from their JSON encodings
    ///
    /// Each present blob is decoded before compilation; decode failures
    /// propagate as [`Error::Json`](crate::core::Error::Json).
    pub fn parse_json(
        &mut self,
        where_json: Option<&str>,
        sort_json: Option<&str>,
    ) -> Result<()> {
        let where_expr = where_json.map(Value::from_json_str).transpose()?;
        let sort_expr = sort_json.map(Value::from_json_str).transpose()?;
        self.parse(where_expr.as_ref(), sort_expr.as_ref())
    }

    /// The compiled WHERE clause body, without the `WHERE` keyword
    pub fn where_clause(&self) -> &str {
        &self.where_sql
    }

    /// The compiled ORDER BY clause body, without the `ORDER BY` keywords
    pub fn order_by_clause(&self) -> &str {
        &self.sort_sql
    }

    /// Clear all per-query state so a new build starts from scratch
    fn reset(&mut self) {
        self.where_sql.clear();
        self.sort_sql.clear();
        self.property_path.clear();
        self.fts_properties.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn where_tree(json: &str) -> Value {
        Value::from_json_str(json).unwrap()
    }

    #[test]
    fn test_empty_build() {
        let mut qc = QueryCompiler::new("kv_default", "body");
        qc.parse(None, None).unwrap();
        assert_eq!(qc.where_clause(), "");
        assert_eq!(qc.order_by_clause(), "key");
        assert_eq!(qc.from_clause(), "kv_default");
        assert!(qc.fts_table_names().is_empty());
    }

    #[test]
    fn test_property_path_restored_after_build() {
        let mut qc = QueryCompiler::new("kv_default", "body");
        let w = where_tree(r#"{"address": {"city": "Oslo", "zip": {"$exists": true}}}"#);
        qc.parse(Some(&w), None).unwrap();
        assert_eq!(qc.property_path, "");
    }

    #[test]
    fn test_property_path_restored_after_failure() {
        let mut qc = QueryCompiler::new("kv_default", "body");
        let w = where_tree(r#"{"address": {"city": {"$bogus": 1}}}"#);
        assert!(qc.parse(Some(&w), None).is_err());
        assert_eq!(qc.property_path, "");
    }

    #[test]
    fn test_reuse_resets_state() {
        let mut qc = QueryCompiler::new("kv_default", "body");
        let w1 = where_tree(r#"{"summary": {"$match": "fast"}}"#);
        qc.parse(Some(&w1), None).unwrap();
        assert_eq!(qc.fts_table_names().len(), 1);

        let w2 = where_tree(r#"{"name": "Bob"}"#);
        qc.parse(Some(&w2), None).unwrap();
        assert_eq!(qc.where_clause(), "fl_value(body, 'name') = 'Bob'");
        assert_eq!(qc.from_clause(), "kv_default");
        assert!(qc.fts_table_names().is_empty());
    }

    #[test]
    fn test_deterministic_output() {
        let json = r#"{"$or": [{"x": {"$lt": 0}}, {"x": {"$gt": 100}}]}"#;
        let mut first = QueryCompiler::new("kv_default", "body");
        first.parse_json(Some(json), Some(r#"["-x"]"#)).unwrap();
        for _ in 0..3 {
            let mut qc = QueryCompiler::new("kv_default", "body");
            qc.parse_json(Some(json), Some(r#"["-x"]"#)).unwrap();
            assert_eq!(qc.where_clause(), first.where_clause());
            assert_eq!(qc.order_by_clause(), first.order_by_clause());
            assert_eq!(qc.from_clause(), first.from_clause());
        }
    }

    #[test]
    fn test_parse_json_decode_error_propagates() {
        let mut qc = QueryCompiler::new("kv_default", "body");
        let err = qc.parse_json(Some("{oops"), None).unwrap_err();
        assert!(matches!(err, crate::core::Error::Json(_)));
    }
}
