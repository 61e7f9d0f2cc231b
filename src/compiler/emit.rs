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

//! SQL text emission primitives
//!
//! Everything user-supplied reaches the generated SQL through this module,
//! either as a quoted literal or as a named placeholder. The compiler never
//! inlines an unquoted user string.

use crate::core::{Error, Result, Value};

/// Writes its separator word on every call but the first
///
/// Used for ` AND `/` OR `-joined term lists and comma-joined literal
/// lists.
pub(crate) struct Delimiter<'a> {
    word: &'a str,
    first: bool,
}

impl<'a> Delimiter<'a> {
    /// Create a delimiter that emits `word` between items
    pub(crate) fn new(word: &'a str) -> Self {
        Delimiter { word, first: true }
    }

    /// Advance to the next item, writing the separator if needed
    pub(crate) fn next(&mut self, out: &mut String) {
        if self.first {
            self.first = false;
        } else {
            out.push_str(self.word);
        }
    }
}

/// Append a string as a SQL literal, doubling embedded apostrophes
///
/// Fast path: a string with no apostrophe is copied verbatim between the
/// surrounding quotes.
pub(crate) fn push_sql_string(out: &mut String, s: &str) {
    out.push('\'');
    if !s.contains('\'') {
        out.push_str(s);
    } else {
        for ch in s.chars() {
            if ch == '\'' {
                out.push_str("''");
            } else {
                out.push(ch);
            }
        }
    }
    out.push('\'');
}

/// Append an expression node as a SQL literal
///
/// Numbers keep their canonical decimal form, booleans become `1`/`0`, and
/// strings are quoted. A single-element array is placeholder sugar: an
/// integer `n` emits `:_n`, a non-empty string `s` emits `:_s`. Anything
/// else is not a literal and fails.
pub(crate) fn push_literal(out: &mut String, literal: &Value) -> Result<()> {
    match literal {
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Float(f) => out.push_str(&f.to_string()),
        // SQL has no true/false
        Value::Bool(b) => out.push(if *b { '1' } else { '0' }),
        Value::String(s) => push_sql_string(out, s),
        Value::Array(items) => {
            if items.len() != 1 {
                return Err(Error::invalid_query(
                    "a literal array must hold exactly one placeholder name",
                ));
            }
            match &items[0] {
                Value::Int(n) => {
                    out.push_str(":_");
                    out.push_str(&n.to_string());
                }
                Value::String(s) if !s.is_empty() => {
                    out.push_str(":_");
                    out.push_str(s);
                }
                _ => {
                    return Err(Error::invalid_query(
                        "a placeholder must be an integer or a non-empty string",
                    ))
                }
            }
        }
        Value::Null | Value::Object(_) => {
            return Err(Error::invalid_query(format!(
                "a {} cannot be written as a SQL literal",
                literal.value_type()
            )))
        }
    }
    Ok(())
}
