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

//! Streaming JUnit Report Decoder
//!
//! This crate decodes JUnit-style XML test reports one test case at a time.
//! The document is never loaded into memory: a background thread tokenizes
//! the input and assembles cases, and the caller pulls them one by one.
//! Memory use stays flat no matter how large the report is.
//!
//! # Features
//!
//! - **Constant Memory**: one token and two case buffers are reused for the whole stream
//! - **Backpressure**: the producer waits for the caller, only one case is ever in flight
//! - **Cancellation**: a [`CancelToken`] (optionally with a deadline) stops the producer promptly
//! - **Strict Shape**: unexpected elements and truncated input are fatal errors
//!
//! # Document Shape
//!
//! ```text
//! <testsuites>?
//!   <testsuite name=".." file="..">+
//!     <testcase name=".." classname=".." file=".." time="..">*
//!       <skipped/>? (<error/> | <failure/>)* <system-out/>? <system-err/>?
//!     </testcase>
//!     <properties/>? <system-out/>? <system-err/>?
//!   </testsuite>
//! </testsuites>
//! ```
//!
//! Names are matched case-insensitively. `classname` and `file` fall back to
//! the suite's `name` and `file` when missing or empty.
//!
//! # Usage
//!
//! ```rust,no_run
//! use junit_stream::{CancelToken, CaseResult, CaseStream};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("report.xml")?;
//! let mut stream = CaseStream::start(&CancelToken::new(), file)?;
//!
//! while let Some(case) = stream.scan()? {
//!     if case.result == CaseResult::Failed {
//!         println!("{} {}: {}", case.class_name, case.name, case.message);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Result Precedence
//!
//! A case's result is decided after its closing tag: `failed` (any
//! `failure` or `error`) beats `skipped`, which beats the last
//! `system-out`/`system-err` marker, which beats `success`.

mod cancel;
mod case;
mod config;
mod error;
mod scanner;
mod stream;
mod tokenizer;

pub use cancel::CancelToken;
pub use case::{merge_message, Case, CaseResult, UnknownResult};
pub use config::ScannerConfig;
pub use error::{ScanError, ScanResult};
pub use stream::CaseStream;
pub use tokenizer::{Token, TokenKind, Tokenizer, DEFAULT_TEXT_CAPACITY};
