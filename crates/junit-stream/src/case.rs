// JUnit Stream - Streaming test report decoder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decoded test case records.
//!
//! A [`Case`] is built in place by the scanner and handed to the consumer by
//! reference. The same allocation is reused for later cases, so callers that
//! need a record beyond the next [`scan`](crate::CaseStream::scan) must clone
//! it.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a single test case.
///
/// Variants are listed from lowest to highest precedence. Once a case has
/// been fully read, a failure beats a skip, and both beat captured output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CaseResult {
    /// No outcome marker was present.
    #[default]
    Success,
    /// The case wrote to `system-out`.
    SystemOut,
    /// The case wrote to `system-err`.
    SystemErr,
    /// The case carried a `skipped` marker.
    Skipped,
    /// The case carried at least one `failure` or `error` marker.
    Failed,
}

impl CaseResult {
    /// Name used in reports and serialized output.
    pub fn as_str(self) -> &'static str {
        match self {
            CaseResult::Success => "success",
            CaseResult::SystemOut => "system-out",
            CaseResult::SystemErr => "system-err",
            CaseResult::Skipped => "skipped",
            CaseResult::Failed => "failed",
        }
    }

    /// Rank used when several markers compete. Both output markers share a rank.
    pub fn precedence(self) -> u8 {
        match self {
            CaseResult::Success => 0,
            CaseResult::SystemOut | CaseResult::SystemErr => 1,
            CaseResult::Skipped => 2,
            CaseResult::Failed => 3,
        }
    }

    /// True for outcomes that should fail a CI run.
    #[inline]
    pub fn is_failure(self) -> bool {
        self == CaseResult::Failed
    }
}

impl fmt::Display for CaseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`CaseResult`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownResult(pub String);

impl fmt::Display for UnknownResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown case result: {}", self.0)
    }
}

impl std::error::Error for UnknownResult {}

impl FromStr for CaseResult {
    type Err = UnknownResult;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(CaseResult::Success),
            "system-out" => Ok(CaseResult::SystemOut),
            "system-err" => Ok(CaseResult::SystemErr),
            "skipped" => Ok(CaseResult::Skipped),
            "failed" => Ok(CaseResult::Failed),
            other => Err(UnknownResult(other.to_string())),
        }
    }
}

/// One decoded `testcase` element.
///
/// # Examples
///
/// ```rust
/// use junit_stream::{CancelToken, CaseResult, CaseStream};
/// use std::io::Cursor;
///
/// let input = r#"
/// <testsuite name="auth" file="auth_test.go">
///   <testcase name="TestLogin" time="0.25"/>
/// </testsuite>
/// "#;
///
/// let mut stream = CaseStream::start(&CancelToken::new(), Cursor::new(input)).unwrap();
/// let case = stream.scan().unwrap().unwrap().clone();
///
/// assert_eq!(case.name, "TestLogin");
/// assert_eq!(case.class_name, "auth");
/// assert_eq!(case.file, "auth_test.go");
/// assert_eq!(case.result, CaseResult::Success);
/// assert_eq!(case.duration, 0.25);
/// assert!(stream.scan().unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Case {
    /// Class name, or the enclosing suite's name when absent.
    pub class_name: String,
    /// Source file, or the enclosing suite's file when absent.
    pub file: String,
    /// Case name.
    pub name: String,
    /// Final outcome after precedence has been applied.
    pub result: CaseResult,
    /// Duration in seconds; zero when `time` is missing or unparsable.
    pub duration: f64,
    /// Messages from every outcome marker, concatenated in document order.
    pub message: String,
}

impl Case {
    /// Reset to an empty record without giving up allocated capacity.
    pub fn clear(&mut self) {
        self.class_name.clear();
        self.file.clear();
        self.name.clear();
        self.result = CaseResult::Success;
        self.duration = 0.0;
        self.message.clear();
    }
}

/// Parse a `time` attribute. Anything unparsable counts as zero seconds.
pub(crate) fn parse_duration(raw: &str) -> f64 {
    raw.parse().unwrap_or(0.0)
}

/// Append the message of one outcome marker to `out`.
///
/// `short` is the marker's `message` attribute and `content` its body text.
/// When the body already contains the attribute text (ignoring spaces) only
/// the body is kept; otherwise both are joined with a newline, attribute
/// first.
///
/// # Examples
///
/// ```rust
/// use junit_stream::merge_message;
///
/// let mut out = String::new();
/// merge_message(&mut out, "boom", "boom: stack");
/// assert_eq!(out, "boom: stack");
///
/// let mut out = String::new();
/// merge_message(&mut out, "expected 1", "got 2");
/// assert_eq!(out, "expected 1\ngot 2");
/// ```
pub fn merge_message(out: &mut String, short: &str, content: &str) {
    match (short.is_empty(), content.is_empty()) {
        (true, true) => {}
        (false, true) => out.push_str(short),
        (true, false) => out.push_str(content),
        (false, false) => {
            if strip_spaces(content).contains(&strip_spaces(short)) {
                out.push_str(content);
            } else {
                out.push_str(short);
                out.push('\n');
                out.push_str(content);
            }
        }
    }
}

/// Only U+0020 is removed. Line breaks and tabs still take part in the
/// containment test.
fn strip_spaces(s: &str) -> String {
    s.replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(short: &str, content: &str) -> String {
        let mut out = String::new();
        merge_message(&mut out, short, content);
        out
    }

    // ==================== CaseResult tests ====================

    #[test]
    fn test_result_names_round_trip() {
        for result in [
            CaseResult::Success,
            CaseResult::SystemOut,
            CaseResult::SystemErr,
            CaseResult::Skipped,
            CaseResult::Failed,
        ] {
            assert_eq!(result.as_str().parse::<CaseResult>(), Ok(result));
            assert_eq!(result.to_string(), result.as_str());
        }
    }

    #[test]
    fn test_result_unknown_name() {
        let err = "passed".parse::<CaseResult>().unwrap_err();
        assert_eq!(err.to_string(), "unknown case result: passed");
    }

    #[test]
    fn test_result_precedence_order() {
        assert!(CaseResult::Failed.precedence() > CaseResult::Skipped.precedence());
        assert!(CaseResult::Skipped.precedence() > CaseResult::SystemOut.precedence());
        assert_eq!(
            CaseResult::SystemOut.precedence(),
            CaseResult::SystemErr.precedence()
        );
        assert!(CaseResult::SystemErr.precedence() > CaseResult::Success.precedence());
    }

    #[test]
    fn test_result_default_is_success() {
        assert_eq!(CaseResult::default(), CaseResult::Success);
        assert!(!CaseResult::Skipped.is_failure());
        assert!(CaseResult::Failed.is_failure());
    }

    // ==================== Case tests ====================

    #[test]
    fn test_case_clear_keeps_capacity() {
        let mut case = Case {
            class_name: "pkg".to_string(),
            file: "a.go".to_string(),
            name: "TestA".to_string(),
            result: CaseResult::Failed,
            duration: 1.5,
            message: "x".repeat(128),
        };
        let capacity = case.message.capacity();
        case.clear();
        assert_eq!(case, Case::default());
        assert_eq!(case.message.capacity(), capacity);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1.25"), 1.25);
        assert_eq!(parse_duration("3"), 3.0);
        assert_eq!(parse_duration(""), 0.0);
        assert_eq!(parse_duration("n/a"), 0.0);
        assert_eq!(parse_duration("1,5"), 0.0);
    }

    // ==================== Message merge tests ====================

    #[test]
    fn test_merge_neither() {
        assert_eq!(merged("", ""), "");
    }

    #[test]
    fn test_merge_only_attribute() {
        assert_eq!(merged("boom", ""), "boom");
    }

    #[test]
    fn test_merge_only_content() {
        assert_eq!(merged("", "stack trace"), "stack trace");
    }

    #[test]
    fn test_merge_content_superset() {
        assert_eq!(merged("boom", "boom: stack\n..."), "boom: stack\n...");
    }

    #[test]
    fn test_merge_ignores_spaces_when_comparing() {
        assert_eq!(
            merged("expected  1 got 2", "expected 1 got2 at line 7"),
            "expected 1 got2 at line 7"
        );
    }

    #[test]
    fn test_merge_line_break_is_not_a_space() {
        assert_eq!(
            merged("expected 1 got 2", "expected 1\ngot 2"),
            "expected 1 got 2\nexpected 1\ngot 2"
        );
        assert_eq!(merged("a b", "a\tb"), "a b\na\tb");
    }

    #[test]
    fn test_merge_disjoint_joins_with_newline() {
        assert_eq!(merged("assertion failed", "at foo.rs:3"), "assertion failed\nat foo.rs:3");
    }

    #[test]
    fn test_merge_appends_to_existing() {
        let mut out = String::from("first");
        merge_message(&mut out, "second", "");
        assert_eq!(out, "firstsecond");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_result_serializes_kebab_case() {
        let json = serde_json::to_string(&CaseResult::SystemOut).unwrap();
        assert_eq!(json, "\"system-out\"");
    }
}
