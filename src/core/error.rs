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

//! Error types for Quern
//!
//! This module defines the error type shared by the expression tree and the
//! query compiler.

use thiserror::Error;

/// Result type alias for Quern operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for query compilation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The query expression violates the grammar
    ///
    /// Covers every malformed input: a non-object at a predicate position,
    /// an unknown operator, a missing or wrongly-typed operand, a malformed
    /// placeholder, an unsupported construct inside `$elemMatch`, and so on.
    /// The message names the offending construct.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The JSON encoding of an expression could not be decoded
    #[error("invalid query JSON: {0}")]
    Json(String),
}

impl Error {
    /// Create an invalid-query error with a contextual message
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Error::InvalidQuery(message.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}
