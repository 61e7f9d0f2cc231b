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

//! Query compiler
//!
//! This module translates a document query expression - a JSON-shaped tree
//! of operators and property paths - into SQL text fragments:
//!
//! - [`QueryCompiler`] - one build: construct, parse, read fragments out
//! - [`compile`] - one-call convenience wrapper
//!
//! The generated fragments are a `WHERE` clause body, an `ORDER BY` clause
//! body, a `FROM` clause body (documents table plus any FTS joins), and
//! the list of FTS virtual-table names the host must attach.
//!
//! # Example
//!
//! ```
//! use quern::compiler::QueryCompiler;
//!
//! let mut qc = QueryCompiler::new("kv_default", "body");
//! qc.parse_json(Some(r#"{"age": {"$gte": 21}}"#), Some(r#""-age""#)).unwrap();
//! assert_eq!(qc.where_clause(), "fl_value(body, 'age') >= 21");
//! assert_eq!(qc.order_by_clause(), "fl_value(body, 'age') DESC");
//! assert_eq!(qc.from_clause(), "kv_default");
//! ```

#[allow(clippy::module_inception)]
mod compiler;
mod elem_match;
mod emit;
mod fts;
mod operators;
mod path;
mod predicate;
mod sort;

pub use compiler::QueryCompiler;

use crate::core::{Result, Value};

/// Compile a query in one call
///
/// Builds a [`QueryCompiler`] for the given documents table and document
/// column, compiles the expressions, and returns it ready for fragment
/// readout.
pub fn compile(
    table_name: &str,
    json_column: &str,
    where_expr: Option<&Value>,
    sort_expr: Option<&Value>,
) -> Result<QueryCompiler> {
    let mut qc = QueryCompiler::new(table_name, json_column);
    qc.parse(where_expr, sort_expr)?;
    Ok(qc)
}
