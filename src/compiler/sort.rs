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

//! Sort-expression parsing
//!
//! A sort expression is a property-path string or an array of them. A `-`
//! or `+` sign prefix sets the direction. A term naming an FTS-matched
//! property orders by search rank instead.

use crate::core::{Error, Result, Value};

use super::compiler::QueryCompiler;
use super::emit::Delimiter;

impl QueryCompiler {
    /// Parse the sort expression into the ORDER BY buffer
    ///
    /// An absent expression defaults to ordering by the document key.
    pub(super) fn parse_sort(&mut self, expr: Option<&Value>) -> Result<()> {
        let Some(expr) = expr else {
            self.sort_sql.push_str("key");
            return Ok(());
        };
        match expr {
            Value::String(_) => self.write_order_by(expr),
            Value::Array(terms) => {
                let mut sep = Delimiter::new(", ");
                for term in terms {
                    sep.next(&mut self.sort_sql);
                    self.write_order_by(term)?;
                }
                Ok(())
            }
            _ => Err(Error::invalid_query(
                "a sort expression must be a string or an array of strings",
            )),
        }
    }

    /// Write one order term
    fn write_order_by(&mut self, property: &Value) -> Result<()> {
        let term = property
            .as_str()
            .ok_or_else(|| Error::invalid_query("sort terms must be strings"))?;
        if term.is_empty() {
            return Err(Error::invalid_query("sort terms must be non-empty"));
        }

        // A term naming an FTS-matched property (verbatim, before any sign
        // handling) orders by rank
        if self.fts_property_index(term) > 0 {
            self.write_order_by_fts_rank(term);
            return Ok(());
        }

        let (term, ascending) = if let Some(rest) = term.strip_prefix('-') {
            (rest, false)
        } else if let Some(rest) = term.strip_prefix('+') {
            (rest, true)
        } else {
            (term, true)
        };

        if term == "_id" {
            self.sort_sql.push_str("key");
        } else if term == "_sequence" {
            self.sort_sql.push_str("sequence");
        } else {
            Self::push_property_getter(&mut self.sort_sql, &self.json_column, "", "fl_value", term)?;
        }
        if !ascending {
            self.sort_sql.push_str(" DESC");
        }
        Ok(())
    }

    /// Order by the search rank of an FTS-matched property
    fn write_order_by_fts_rank(&mut self, property: &str) {
        self.sort_sql.push_str(&format!(
            "rank(matchinfo(\"{}::{}\")) DESC",
            self.table_name, property
        ));
    }
}
