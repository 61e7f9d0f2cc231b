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

//! Full-text-search coordination
//!
//! Each FTS-indexed property is a separate virtual table named
//! `"<table>::<path>"`. A `$match` joins it by rowid against the documents
//! table; the coordinator assigns each distinct property path a stable
//! 1-based alias `FTSk` used consistently across the WHERE, FROM, and
//! ORDER BY fragments of one build.

use crate::core::{Result, Value};

use super::compiler::QueryCompiler;
use super::path::append_paths;

impl QueryCompiler {
    /// 1-based index of a recorded FTS property path, or 0 when absent
    pub(super) fn fts_property_index(&self, property_path: &str) -> usize {
        self.fts_properties
            .iter()
            .position(|p| p == property_path)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Parse a `$match` term against a property
    ///
    /// Records the property's FTS table on first use and emits the match
    /// joined to the documents table through the rowid.
    pub(super) fn parse_fts_match(&mut self, property: &str, matcher: &Value) -> Result<()> {
        let property_path = append_paths(&self.property_path, property);
        let mut table_no = self.fts_property_index(&property_path);
        if table_no == 0 {
            self.fts_properties.push(property_path);
            table_no = self.fts_properties.len();
        }

        self.where_sql
            .push_str(&format!("(FTS{}.text MATCH ", table_no));
        self.write_literal(matcher)?;
        self.where_sql.push_str(&format!(
            " AND FTS{}.rowid = {}.sequence)",
            table_no, self.table_name
        ));
        Ok(())
    }

    /// The FROM clause body: the documents table, then one aliased FTS
    /// virtual table per recorded property in first-use order
    pub fn from_clause(&self) -> String {
        let mut from = self.table_name.clone();
        for (i, property_path) in self.fts_properties.iter().enumerate() {
            from.push_str(&format!(
                ", \"{}::{}\" AS FTS{}",
                self.table_name,
                property_path,
                i + 1
            ));
        }
        from
    }

    /// The quoted names of the FTS virtual tables this query expects, in
    /// the order their aliases were assigned
    pub fn fts_table_names(&self) -> Vec<String> {
        self.fts_properties
            .iter()
            .map(|property_path| format!("\"{}::{}\"", self.table_name, property_path))
            .collect()
    }
}
