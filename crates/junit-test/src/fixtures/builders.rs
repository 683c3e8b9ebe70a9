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

//! Builder pattern for generating report XML.
//!
//! Builders render well-formed XML with escaped attribute values and text,
//! so tests can describe the cases they need instead of writing markup.

/// Builder for a complete report.
///
/// # Examples
///
/// ```
/// use junit_test::fixtures::builders::{CaseBuilder, ReportBuilder, SuiteBuilder};
///
/// let xml = ReportBuilder::new()
///     .suite(SuiteBuilder::new("pkg").case(CaseBuilder::new("TestA")))
///     .build();
///
/// assert!(xml.starts_with("<testsuites>"));
/// assert!(xml.contains(r#"<testcase name="TestA">"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    wrapped: bool,
    suites: Vec<SuiteBuilder>,
}

impl ReportBuilder {
    /// Creates a report wrapped in `testsuites`.
    pub fn new() -> Self {
        Self {
            wrapped: true,
            suites: Vec::new(),
        }
    }

    /// Creates a report without the `testsuites` wrapper.
    ///
    /// Only meaningful with exactly one suite.
    pub fn bare() -> Self {
        Self {
            wrapped: false,
            suites: Vec::new(),
        }
    }

    /// Adds a suite.
    pub fn suite(mut self, suite: SuiteBuilder) -> Self {
        self.suites.push(suite);
        self
    }

    /// Number of cases across all suites.
    pub fn case_count(&self) -> usize {
        self.suites.iter().map(|s| s.cases.len()).sum()
    }

    /// Renders the report.
    pub fn build(&self) -> String {
        let mut out = String::new();
        if self.wrapped {
            out.push_str("<testsuites>");
        }
        for suite in &self.suites {
            suite.render(&mut out);
        }
        if self.wrapped {
            out.push_str("</testsuites>");
        }
        out
    }
}

/// Builder for a `testsuite` element.
#[derive(Debug, Clone)]
pub struct SuiteBuilder {
    name: String,
    file: Option<String>,
    properties: Vec<(String, String)>,
    system_out: Option<String>,
    cases: Vec<CaseBuilder>,
}

impl SuiteBuilder {
    /// Creates a suite with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: None,
            properties: Vec::new(),
            system_out: None,
            cases: Vec::new(),
        }
    }

    /// Sets the suite file inherited by cases without their own.
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Adds a property; rendered inside `properties`.
    pub fn property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((name.into(), value.into()));
        self
    }

    /// Sets suite-level output.
    pub fn system_out(mut self, text: impl Into<String>) -> Self {
        self.system_out = Some(text.into());
        self
    }

    /// Adds a case.
    pub fn case(mut self, case: CaseBuilder) -> Self {
        self.cases.push(case);
        self
    }

    fn render(&self, out: &mut String) {
        out.push_str("<testsuite");
        push_attr(out, "name", &self.name);
        if let Some(file) = &self.file {
            push_attr(out, "file", file);
        }
        out.push('>');
        if !self.properties.is_empty() {
            out.push_str("<properties>");
            for (name, value) in &self.properties {
                out.push_str("<property");
                push_attr(out, "name", name);
                push_attr(out, "value", value);
                out.push_str("/>");
            }
            out.push_str("</properties>");
        }
        for case in &self.cases {
            case.render(out);
        }
        if let Some(text) = &self.system_out {
            push_element(out, "system-out", None, text);
        }
        out.push_str("</testsuite>");
    }
}

/// Builder for a `testcase` element.
#[derive(Debug, Clone)]
pub struct CaseBuilder {
    attrs: Vec<(&'static str, String)>,
    children: Vec<Child>,
}

#[derive(Debug, Clone)]
struct Child {
    tag: &'static str,
    message: Option<String>,
    body: String,
}

impl CaseBuilder {
    /// Creates a case with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            attrs: vec![("name", name.into())],
            children: Vec::new(),
        }
    }

    /// Sets `classname`.
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.attrs.push(("classname", class_name.into()));
        self
    }

    /// Sets `file`.
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.attrs.push(("file", file.into()));
        self
    }

    /// Sets the raw `time` attribute.
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.attrs.push(("time", time.into()));
        self
    }

    /// Adds a `failure` marker. Empty strings are omitted.
    pub fn failure(self, message: impl Into<String>, body: impl Into<String>) -> Self {
        self.child("failure", message.into(), body.into())
    }

    /// Adds an `error` marker. Empty strings are omitted.
    pub fn error(self, message: impl Into<String>, body: impl Into<String>) -> Self {
        self.child("error", message.into(), body.into())
    }

    /// Adds a `skipped` marker.
    pub fn skipped(self, message: impl Into<String>) -> Self {
        self.child("skipped", message.into(), String::new())
    }

    /// Adds a `system-out` marker.
    pub fn system_out(self, body: impl Into<String>) -> Self {
        self.child("system-out", String::new(), body.into())
    }

    /// Adds a `system-err` marker.
    pub fn system_err(self, body: impl Into<String>) -> Self {
        self.child("system-err", String::new(), body.into())
    }

    fn child(mut self, tag: &'static str, message: String, body: String) -> Self {
        self.children.push(Child {
            tag,
            message: (!message.is_empty()).then_some(message),
            body,
        });
        self
    }

    fn render(&self, out: &mut String) {
        out.push_str("<testcase");
        for (key, value) in &self.attrs {
            push_attr(out, key, value);
        }
        out.push('>');
        for child in &self.children {
            push_element(out, child.tag, child.message.as_deref(), &child.body);
        }
        out.push_str("</testcase>");
    }
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    escape_into(out, value);
    out.push('"');
}

fn push_element(out: &mut String, tag: &str, message: Option<&str>, body: &str) {
    out.push('<');
    out.push_str(tag);
    if let Some(message) = message {
        push_attr(out, "message", message);
    }
    if body.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        escape_into(out, body);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

/// Escape XML special characters.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\n' => out.push_str("&#10;"),
            '\t' => out.push_str("&#9;"),
            '\r' => out.push_str("&#13;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count_testcases;

    #[test]
    fn test_bare_report() {
        let xml = ReportBuilder::bare()
            .suite(SuiteBuilder::new("s").file("s.go"))
            .build();
        assert_eq!(xml, r#"<testsuite name="s" file="s.go"></testsuite>"#);
    }

    #[test]
    fn test_case_children_render() {
        let xml = ReportBuilder::new()
            .suite(
                SuiteBuilder::new("s").case(
                    CaseBuilder::new("t")
                        .time("0.5")
                        .failure("boom", "")
                        .system_out("log"),
                ),
            )
            .build();
        assert!(xml.contains(r#"<testcase name="t" time="0.5">"#));
        assert!(xml.contains(r#"<failure message="boom"/>"#));
        assert!(xml.contains("<system-out>log</system-out>"));
    }

    #[test]
    fn test_escaping() {
        let mut out = String::new();
        escape_into(&mut out, "a<b & \"c\"\n");
        assert_eq!(out, "a&lt;b &amp; &quot;c&quot;&#10;");
    }

    #[test]
    fn test_case_count() {
        let report = ReportBuilder::new()
            .suite(SuiteBuilder::new("a").case(CaseBuilder::new("1")).case(CaseBuilder::new("2")))
            .suite(SuiteBuilder::new("b").property("k", "v").case(CaseBuilder::new("3")));
        assert_eq!(report.case_count(), 3);
        assert_eq!(count_testcases(&report.build()), 3);
    }
}
