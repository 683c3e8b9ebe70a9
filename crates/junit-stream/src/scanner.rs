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

//! Recursive-descent scanner over tokenizer events.
//!
//! The report shape is fixed and shallow, so each nesting level is a method
//! and the call stack is the state stack:
//!
//! ```text
//! run          top level: testsuites | testsuite
//! test_suites  testsuite*
//! test_suite   testcase* plus discarded properties / system-out / system-err
//! test_case    skipped | error | failure | system-out | system-err
//! discard      any balanced subtree
//! ```
//!
//! Finished cases go to a [`CaseSink`]. The sink hands back a buffer for the
//! next case so steady-state scanning does not allocate records.

use crate::case::{merge_message, parse_duration, Case, CaseResult};
use crate::error::{ScanError, ScanResult};
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use std::io::BufRead;

/// Receiver of finished cases.
pub(crate) trait CaseSink {
    /// Take ownership of a finished case.
    ///
    /// May block until the consumer is ready. Returns a spare buffer to build
    /// the next case in, if one is available.
    fn deliver(&mut self, case: Box<Case>) -> ScanResult<Option<Box<Case>>>;
}

/// Elements the scanner recognizes, after case folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    TestSuites,
    TestSuite,
    TestCase,
    Properties,
    Skipped,
    Error,
    Failure,
    SystemOut,
    SystemErr,
    Other,
}

impl Tag {
    fn of(token: &Token) -> Tag {
        match token.element() {
            "testsuites" => Tag::TestSuites,
            "testsuite" => Tag::TestSuite,
            "testcase" => Tag::TestCase,
            "properties" => Tag::Properties,
            "skipped" => Tag::Skipped,
            "error" => Tag::Error,
            "failure" => Tag::Failure,
            "system-out" => Tag::SystemOut,
            "system-err" => Tag::SystemErr,
            _ => Tag::Other,
        }
    }
}

/// State machine turning tokens into cases.
pub(crate) struct Scanner<R: BufRead, S: CaseSink> {
    tokenizer: Tokenizer<R>,
    sink: S,
    /// Buffer for the next case, returned by the sink.
    spare: Option<Box<Case>>,
    suite_name: String,
    suite_file: String,
    short_message: String,
    content: String,
    max_depth: usize,
    delivered: u64,
}

impl<R: BufRead, S: CaseSink> Scanner<R, S> {
    pub(crate) fn new(tokenizer: Tokenizer<R>, sink: S, max_depth: usize) -> Self {
        Self {
            tokenizer,
            sink,
            spare: None,
            suite_name: String::new(),
            suite_file: String::new(),
            short_message: String::new(),
            content: String::new(),
            max_depth,
            delivered: 0,
        }
    }

    /// Number of cases handed to the sink so far.
    pub(crate) fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Scan the whole document.
    pub(crate) fn run(&mut self) -> ScanResult<()> {
        loop {
            let tok = match self.tokenizer.next()? {
                Some(tok) => tok,
                None => return Ok(()),
            };
            match tok.kind() {
                TokenKind::Start => match Tag::of(tok) {
                    Tag::TestSuites => self.test_suites()?,
                    Tag::TestSuite => {
                        load_suite(&mut self.suite_name, &mut self.suite_file, tok);
                        self.test_suite()?;
                    }
                    _ => return Err(ScanError::unexpected("top level", tok.element())),
                },
                TokenKind::End => {
                    return Err(ScanError::UnexpectedEndElement {
                        element: tok.element().to_string(),
                    })
                }
                TokenKind::Char => {}
            }
        }
    }

    fn test_suites(&mut self) -> ScanResult<()> {
        loop {
            let tok = match self.tokenizer.next()? {
                Some(tok) => tok,
                None => return Err(ScanError::truncated("testsuites")),
            };
            match tok.kind() {
                TokenKind::Start => match Tag::of(tok) {
                    Tag::TestSuite => {
                        load_suite(&mut self.suite_name, &mut self.suite_file, tok);
                        self.test_suite()?;
                    }
                    _ => return Err(ScanError::unexpected("testsuites", tok.element())),
                },
                TokenKind::End => return Ok(()),
                TokenKind::Char => {}
            }
        }
    }

    fn test_suite(&mut self) -> ScanResult<()> {
        loop {
            let tok = match self.tokenizer.next()? {
                Some(tok) => tok,
                None => return Err(ScanError::truncated("testsuite")),
            };
            match tok.kind() {
                TokenKind::Start => match Tag::of(tok) {
                    Tag::TestCase => {
                        let mut case = self.spare.take().unwrap_or_default();
                        begin_case(&mut case, tok, &self.suite_name, &self.suite_file);
                        self.test_case(case)?;
                    }
                    Tag::Properties | Tag::SystemOut | Tag::SystemErr => {
                        discard(&mut self.tokenizer, 1, self.max_depth)?;
                    }
                    _ => return Err(ScanError::unexpected("testsuite", tok.element())),
                },
                TokenKind::End => return Ok(()),
                TokenKind::Char => {}
            }
        }
    }

    fn test_case(&mut self, mut case: Box<Case>) -> ScanResult<()> {
        loop {
            let tok = match self.tokenizer.next()? {
                Some(tok) => tok,
                None => return Err(ScanError::truncated("testcase")),
            };
            match tok.kind() {
                TokenKind::Start => {
                    let marker = match Tag::of(tok) {
                        Tag::Skipped => CaseResult::Skipped,
                        Tag::Error | Tag::Failure => CaseResult::Failed,
                        Tag::SystemOut => CaseResult::SystemOut,
                        Tag::SystemErr => CaseResult::SystemErr,
                        _ => {
                            return Err(ScanError::UnexpectedCaseElement {
                                case: case.name.clone(),
                                element: tok.element().to_string(),
                            })
                        }
                    };
                    // Equal rank replaces, so the last output marker wins.
                    if marker.precedence() >= case.result.precedence() {
                        case.result = marker;
                    }
                    self.short_message.clear();
                    self.short_message
                        .push_str(tok.attribute("message").unwrap_or_default());
                    read_body(&mut self.tokenizer, &mut self.content, &case.name)?;
                    merge_message(&mut case.message, &self.short_message, &self.content);
                }
                TokenKind::End => break,
                TokenKind::Char => {}
            }
        }

        self.delivered += 1;
        tracing::trace!(case = %case.name, result = %case.result, "case decoded");
        self.spare = self.sink.deliver(case)?;
        Ok(())
    }
}

fn load_suite(name: &mut String, file: &mut String, tok: &Token) {
    name.clear();
    name.push_str(tok.attribute("name").unwrap_or_default());
    file.clear();
    file.push_str(tok.attribute("file").unwrap_or_default());
}

/// Initialise a case from its start token, inheriting empty or missing
/// `classname` and `file` from the suite.
fn begin_case(case: &mut Case, tok: &Token, suite_name: &str, suite_file: &str) {
    case.clear();
    case.name.push_str(tok.attribute("name").unwrap_or_default());
    case.class_name.push_str(non_empty_or(tok.attribute("classname"), suite_name));
    case.file.push_str(non_empty_or(tok.attribute("file"), suite_file));
    case.duration = parse_duration(tok.attribute("time").unwrap_or_default());
}

fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => fallback,
    }
}

/// Read the text body of an outcome marker into `content`.
///
/// Each character data token is trimmed before being appended. Nested
/// elements are not allowed.
fn read_body<R: BufRead>(
    tokenizer: &mut Tokenizer<R>,
    content: &mut String,
    case_name: &str,
) -> ScanResult<()> {
    content.clear();
    loop {
        let tok = match tokenizer.next()? {
            Some(tok) => tok,
            None => return Err(ScanError::truncated("testcase child")),
        };
        match tok.kind() {
            TokenKind::Start => {
                return Err(ScanError::UnexpectedMessageElement {
                    case: case_name.to_string(),
                    element: tok.element().to_string(),
                })
            }
            TokenKind::End => return Ok(()),
            TokenKind::Char => content.push_str(tok.text().trim()),
        }
    }
}

/// Consume a balanced subtree whose start token has already been read.
fn discard<R: BufRead>(tokenizer: &mut Tokenizer<R>, depth: usize, max_depth: usize) -> ScanResult<()> {
    if depth > max_depth {
        return Err(ScanError::DepthExceeded { max: max_depth });
    }
    loop {
        let kind = match tokenizer.next()? {
            Some(tok) => tok.kind(),
            None => return Err(ScanError::truncated("discarded")),
        };
        match kind {
            TokenKind::Start => discard(tokenizer, depth + 1, max_depth)?,
            TokenKind::End => return Ok(()),
            TokenKind::Char => {}
        }
    }
}
