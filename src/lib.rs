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

//! # Quern - document query to SQL compiler
//!
//! Quern translates a structured, document-oriented predicate/sort
//! expression (a JSON-shaped tree of operators and property paths) into
//! SQL text fragments for a relational engine backing a document store.
//! Documents are stored as opaque encoded blobs in one column of a table;
//! the generated SQL calls helper functions (`fl_value`, `fl_type`,
//! `fl_exists`, `fl_count`, `fl_contains`, `fl_each`) that extract or test
//! sub-values at a property path inside that blob, and joins per-property
//! full-text-search virtual tables for `$match`.
//!
//! ## Key Features
//!
//! - **Operator-rich predicates** - `$eq`/`$ne`/`$lt`/`$lte`/`$gt`/`$gte`/
//!   `$like`, `$type`, `$exists`, `$in`/`$nin`, `$size`, `$all`/`$any`,
//!   `$elemMatch`, boolean `$and`/`$or`/`$nor`/`$not`, implicit AND
//! - **Full-text search** - `$match` terms join FTS virtual tables with
//!   stable `FTS1`, `FTS2`, … aliases, rank-ordered sorting
//! - **Injection-safe emission** - every user string is a quoted literal
//!   (apostrophes doubled) or a `:_name` placeholder, never inlined bare
//! - **Nested scopes** - sub-property predicates compose dotted paths with
//!   strict push/pop discipline
//!
//! ## Quick Start
//!
//! ```rust
//! use quern::QueryCompiler;
//!
//! let mut qc = QueryCompiler::new("kv_default", "body");
//! qc.parse_json(
//!     Some(r#"{"body": {"$match": "quick brown"}}"#),
//!     Some(r#"["-date", "body"]"#),
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     qc.where_clause(),
//!     "(FTS1.text MATCH 'quick brown' AND FTS1.rowid = kv_default.sequence)"
//! );
//! assert_eq!(qc.from_clause(), "kv_default, \"kv_default::body\" AS FTS1");
//! assert_eq!(
//!     qc.order_by_clause(),
//!     "fl_value(body, 'date') DESC, rank(matchinfo(\"kv_default::body\")) DESC"
//! );
//! ```
//!
//! The fragments are meant to be spliced into a host `SELECT`; executing
//! the SQL, resolving placeholders, and maintaining the FTS tables are the
//! host's business.
//!
//! ## Modules
//!
//! - [`compiler`] - The query compiler ([`QueryCompiler`])
//! - [`core`] - Core types ([`Value`], [`ValueType`], [`Error`])

pub mod compiler;
pub mod core;

// Re-export main types for convenience
pub use crate::core::{Error, Result, Value, ValueType};
pub use compiler::{compile, QueryCompiler};
