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

//! Integration tests for junit-stream

use junit_stream::{CancelToken, Case, CaseResult, CaseStream, ScanError};
use junit_test::fixtures::{self, errors};
use junit_test::{count_testcases, RepeatReader};
use std::io::Cursor;

fn start(xml: &str) -> CaseStream {
    CaseStream::start(&CancelToken::new(), Cursor::new(xml.as_bytes().to_vec())).unwrap()
}

fn decode(xml: &str) -> Vec<Case> {
    let mut stream = start(xml);
    let mut cases = Vec::new();
    while let Some(case) = stream.scan().unwrap() {
        cases.push(case.clone());
    }
    cases
}

// ==================== Fixture Tests ====================

#[test]
fn test_every_fixture_decodes_all_cases() {
    for (name, fixture_fn) in fixtures::all() {
        let xml = fixture_fn();
        let cases = decode(xml);
        assert_eq!(cases.len(), count_testcases(xml), "fixture {}", name);
    }
}

#[test]
fn test_go_test_report() {
    let cases = decode(fixtures::go_test_report());

    assert_eq!(cases[0].name, "TestLogin");
    assert_eq!(cases[0].class_name, "auth");
    assert_eq!(cases[0].file, "auth/auth_test.go");
    assert_eq!(cases[0].result, CaseResult::Success);
    assert_eq!(cases[0].duration, 0.12);
    assert_eq!(cases[0].message, "");

    assert_eq!(cases[1].result, CaseResult::Failed);
    assert_eq!(
        cases[1].message,
        "auth_test.go:42: Failed\n    expected status 200, got 500"
    );

    assert_eq!(cases[2].result, CaseResult::Skipped);
    assert_eq!(cases[2].message, "auth_test.go:61: needs redis");

    assert_eq!(cases[3].name, "TestPut");
    assert_eq!(cases[3].class_name, "github.com/acme/api/store");
    assert_eq!(cases[3].file, "store/put_test.go");
}

#[test]
fn test_surefire_report() {
    let cases = decode(fixtures::surefire_report());

    assert_eq!(cases[0].result, CaseResult::Failed);
    assert!(cases[0]
        .message
        .starts_with("java.net.ConnectException: Connection refused"));
    assert_eq!(cases[0].file, "");

    assert_eq!(cases[1].result, CaseResult::SystemOut);
    assert_eq!(cases[1].message, "cancelling order 17");

    assert_eq!(cases[2].result, CaseResult::SystemErr);
    assert_eq!(cases[2].message, "listingwarning: slow query");
}

#[test]
fn test_pytest_report() {
    let cases = decode(fixtures::pytest_report());

    assert_eq!(cases[1].result, CaseResult::Failed);
    assert!(cases[1].message.starts_with("def test_div():\n>       1 / 0"));
    assert!(!cases[1].message.starts_with("ZeroDivisionError"));

    assert_eq!(cases[2].result, CaseResult::Skipped);
    assert_eq!(cases[2].message, "tests/test_math.py:12: too slow");
}

#[test]
fn test_bare_suite() {
    let cases = decode(fixtures::bare_suite());
    assert_eq!(cases[0].class_name, "smoke");
    assert_eq!(cases[0].file, "smoke.sh");
    assert_eq!(cases[0].duration, 3.5);
    assert_eq!(cases[1].duration, 0.0);
}

#[test]
fn test_mixed_case_names() {
    let cases = decode(fixtures::mixed_case_names());
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].name, "shouts");
    assert_eq!(cases[0].class_name, "Loud");
    assert_eq!(cases[0].file, "upper.c");
    assert_eq!(cases[0].duration, 1.0);
    assert_eq!(cases[0].result, CaseResult::Failed);
    assert_eq!(cases[0].message, "too loud");
}

#[test]
fn test_escaped_content() {
    let cases = decode(fixtures::escaped_content());
    assert_eq!(cases[0].name, r#"compares <a> & "b""#);
    assert_eq!(cases[0].message, "assert 1 < 2<- raw & unescaped");
}

#[test]
fn test_suite_noise_is_discarded() {
    let cases = decode(fixtures::suite_noise());
    let names: Vec<_> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["one", "two"]);
    assert!(cases.iter().all(|c| c.message.is_empty()));
}

// ==================== Error Tests ====================

#[test]
fn test_invalid_reports_fail() {
    for (name, xml) in errors::invalid_reports() {
        let mut stream = start(xml);
        let err = loop {
            match stream.scan() {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("{} ended without an error", name),
                Err(e) => break e,
            }
        };
        assert!(err.is_structural(), "{}: {}", name, err);
        assert!(stream.scan().unwrap().is_none(), "{}", name);
    }
}

#[test]
fn test_malformed_reports_fail() {
    for (name, xml) in errors::malformed_reports() {
        let mut stream = start(xml);
        let err = loop {
            match stream.scan() {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("{} ended without an error", name),
                Err(e) => break e,
            }
        };
        assert!(matches!(err, ScanError::Xml { .. }), "{}: {}", name, err);
    }
}

#[test]
fn test_wrong_root_names_element() {
    let mut stream = start(errors::wrong_root());
    let err = stream.scan().unwrap_err();
    assert_eq!(err.to_string(), "invalid top level element: report");
}

#[test]
fn test_unknown_case_child_names_case() {
    let mut stream = start(errors::unknown_case_child());
    let err = stream.scan().unwrap_err();
    assert!(err.to_string().contains("TestWeird"));
    assert!(err.to_string().contains("flaky"));
}

#[test]
fn test_cases_before_truncation_are_delivered() {
    let mut stream = start(errors::truncated_suite());
    assert_eq!(stream.scan().unwrap().unwrap().name, "done");
    assert!(matches!(
        stream.scan(),
        Err(ScanError::Truncated { element: "testsuite" })
    ));
}

#[test]
fn test_malformed_xml_reports_position() {
    let mut stream = start(r#"<testsuite><testcase name="a"></testsuite>"#);
    let err = stream.scan().unwrap_err();
    assert!(matches!(err, ScanError::Xml { .. }));
    assert!(err.position().is_some());
}

// ==================== Re-scan Tests ====================

#[test]
fn test_rescan_is_identical() {
    let xml = fixtures::go_test_report();
    let first = decode(xml);
    let second = decode(xml);
    assert_eq!(first, second);
}

#[test]
fn test_independent_streams_in_parallel() {
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| decode(fixtures::surefire_report())))
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

// ==================== Large Input Tests ====================

#[test]
fn test_large_repeated_input() {
    // Roughly 20MB of report streamed through small reads; the decoder only
    // ever sees one chunk and one case at a time.
    const REPEATS: u64 = 25_000;
    let body = fixtures::repeatable_suite();
    let per_suite = count_testcases(body) as u64;
    let reader = RepeatReader::new("<testsuites>", body, "\n</testsuites>\n", REPEATS).with_chunk(4096);
    let total = reader.total_len();

    let mut stream = CaseStream::start(&CancelToken::new(), reader).unwrap();
    let mut failed = 0u64;
    let mut buffers = std::collections::HashSet::new();
    let count = stream
        .for_each(|case| {
            if case.result == CaseResult::Failed {
                failed += 1;
            }
            buffers.insert(case as *const Case as usize);
        })
        .unwrap();

    assert_eq!(count, per_suite * REPEATS);
    assert_eq!(failed, 2 * REPEATS);
    assert!(buffers.len() <= 2);
    assert!(total > 5_000_000);
}

#[test]
fn test_concatenated_documents() {
    // Whole documents back to back, each with its own declaration and root.
    const COPIES: u64 = 40;
    let document = fixtures::go_test_report();
    let per_document = count_testcases(document) as u64;
    let reader = RepeatReader::new("", document, "", COPIES).with_chunk(97);

    let mut stream = CaseStream::start(&CancelToken::new(), reader).unwrap();
    let mut count = 0u64;
    let mut last_name = String::new();
    while let Some(case) = stream.scan().unwrap() {
        count += 1;
        last_name.clone_from(&case.name);
    }

    assert_eq!(count, per_document * COPIES);
    assert_eq!(last_name, decode(document).last().unwrap().name);
    assert!(matches!(stream.scan(), Ok(None)));
}
