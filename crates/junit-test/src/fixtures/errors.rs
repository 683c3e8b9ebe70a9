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

//! Invalid reports for exercising error handling.

/// Reports that must end the scan with a structural error.
///
/// Returned as (name, xml) pairs.
pub fn invalid_reports() -> Vec<(&'static str, &'static str)> {
    vec![
        ("wrong_root", wrong_root()),
        ("case_outside_suite", case_outside_suite()),
        ("nested_suite", nested_suite()),
        ("unknown_case_child", unknown_case_child()),
        ("markup_in_failure", markup_in_failure()),
        ("truncated_suite", truncated_suite()),
        ("truncated_case", truncated_case()),
        ("truncated_suites", truncated_suites()),
        ("truncated_properties", truncated_properties()),
    ]
}

/// Root element that is neither `testsuites` nor `testsuite`.
pub fn wrong_root() -> &'static str {
    r#"<report><testsuite name="s"/></report>"#
}

/// Reports the XML reader itself rejects.
pub fn malformed_reports() -> Vec<(&'static str, &'static str)> {
    vec![
        ("stray_end", stray_end()),
        ("mismatched_end", mismatched_end()),
        ("unquoted_attribute", unquoted_attribute()),
        ("unknown_entity", unknown_entity()),
    ]
}

/// Closing tag before anything was opened.
pub fn stray_end() -> &'static str {
    "</testsuite>"
}

/// `testcase` directly inside `testsuites`.
pub fn case_outside_suite() -> &'static str {
    r#"<testsuites><testcase name="lost"/></testsuites>"#
}

/// `testsuite` nested in another `testsuite`.
pub fn nested_suite() -> &'static str {
    r#"<testsuites><testsuite name="outer"><testsuite name="inner"/></testsuite></testsuites>"#
}

/// Unknown child of `testcase`; the error names the case.
pub fn unknown_case_child() -> &'static str {
    r#"<testsuite name="s"><testcase name="TestWeird"><flaky/></testcase></testsuite>"#
}

/// Markup nested inside a failure body.
pub fn markup_in_failure() -> &'static str {
    r#"<testsuite name="s"><testcase name="t"><failure message="x"><pre>trace</pre></failure></testcase></testsuite>"#
}

/// Input ends inside a `testsuite`, after one complete case.
pub fn truncated_suite() -> &'static str {
    r#"<testsuite name="s"><testcase name="done"/>"#
}

/// Input ends inside a `testcase`.
pub fn truncated_case() -> &'static str {
    r#"<testsuites><testsuite name="s"><testcase name="cut"><system-out>partial</system-out>"#
}

/// Input ends right after the wrapper opened.
pub fn truncated_suites() -> &'static str {
    "<testsuites>\n"
}

/// Input ends inside discarded properties.
pub fn truncated_properties() -> &'static str {
    r#"<testsuite name="s"><properties><property name="a" value="b"/>"#
}

/// Closing tag that does not match the open element.
pub fn mismatched_end() -> &'static str {
    r#"<testsuite name="s"><testcase name="a"></testsuite>"#
}

/// Attribute value without quotes.
pub fn unquoted_attribute() -> &'static str {
    r#"<testsuite name=s><testcase name="a"/></testsuite>"#
}

/// Body using an entity XML does not define.
pub fn unknown_entity() -> &'static str {
    r#"<testsuite name="s"><testcase name="a"><failure>&nbsp;</failure></testcase></testsuite>"#
}
