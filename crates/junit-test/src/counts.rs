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

//! Counting helpers used to cross-check decoder output.

/// Count `testcase` elements in a report by scanning its text.
///
/// Matching is ASCII case-insensitive and only looks at opening tags, so
/// `</testcase>` is not counted. Good enough for well-formed fixtures that do
/// not mention `<testcase` inside text or comments.
///
/// # Examples
///
/// ```
/// use junit_test::count_testcases;
///
/// assert_eq!(count_testcases("<testsuite><testcase/><TestCase></TestCase></testsuite>"), 2);
/// ```
pub fn count_testcases(xml: &str) -> usize {
    const TAG: &[u8] = b"<testcase";
    let bytes = xml.as_bytes();
    bytes
        .windows(TAG.len() + 1)
        .filter(|w| {
            w[..TAG.len()].eq_ignore_ascii_case(TAG)
                && matches!(w[TAG.len()], b' ' | b'\t' | b'\n' | b'\r' | b'/' | b'>')
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_ignores_end_tags() {
        assert_eq!(count_testcases("<testcase name=\"a\"></testcase>"), 1);
    }

    #[test]
    fn test_count_ignores_similar_names() {
        assert_eq!(count_testcases("<testcases><testcase/></testcases>"), 1);
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(count_testcases(""), 0);
    }
}
