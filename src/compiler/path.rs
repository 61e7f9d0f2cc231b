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

//! Property path composition
//!
//! A property path is a dotted/bracketed string addressing a sub-value
//! inside a stored document, e.g. `address.city` or `scores[0]`.

/// Join a parent property path and a child segment
///
/// A leading `$.` or `$` on the child (explicit document root) is stripped.
/// A child starting with `[` is an index expression and concatenates
/// without a separator; any other child joins with a `.`.
pub(crate) fn append_paths(parent: &str, child: &str) -> String {
    let child = if let Some(stripped) = child.strip_prefix("$.") {
        stripped
    } else if let Some(stripped) = child.strip_prefix('$') {
        stripped
    } else {
        child
    };

    if parent.is_empty() {
        child.to_string()
    } else if child.starts_with('[') {
        format!("{}{}", parent, child)
    } else {
        format!("{}.{}", parent, child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_parent() {
        assert_eq!(append_paths("", "name"), "name");
        assert_eq!(append_paths("", "[2]"), "[2]");
    }

    #[test]
    fn test_dotted_join() {
        assert_eq!(append_paths("address", "city"), "address.city");
        assert_eq!(append_paths("a.b", "c"), "a.b.c");
    }

    #[test]
    fn test_bracket_join() {
        assert_eq!(append_paths("scores", "[0]"), "scores[0]");
    }

    #[test]
    fn test_root_prefix_stripped() {
        assert_eq!(append_paths("", "$.name"), "name");
        assert_eq!(append_paths("", "$name"), "name");
        assert_eq!(append_paths("outer", "$.inner"), "outer.inner");
        assert_eq!(append_paths("outer", "$[3]"), "outer[3]");
    }

    #[test]
    fn test_empty_child() {
        assert_eq!(append_paths("", ""), "");
        assert_eq!(append_paths("a", ""), "a.");
    }
}
