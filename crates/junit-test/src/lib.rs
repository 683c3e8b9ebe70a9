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

//! Shared test fixtures and utilities for junit-stream.
//!
//! This crate provides sample reports, invalid documents, a fluent report
//! builder and a lazily repeating reader for stress tests.
//!
//! # Quick Start
//!
//! ```rust
//! use junit_test::fixtures;
//! use junit_test::fixtures::builders::{CaseBuilder, ReportBuilder, SuiteBuilder};
//!
//! // Use pre-built reports
//! let xml = fixtures::go_test_report();
//! assert_eq!(junit_test::count_testcases(xml), 4);
//!
//! // Build custom reports
//! let xml = ReportBuilder::new()
//!     .suite(
//!         SuiteBuilder::new("pkg/auth")
//!             .file("auth_test.go")
//!             .case(CaseBuilder::new("TestLogin").time("0.01"))
//!             .case(CaseBuilder::new("TestLogout").failure("boom", "boom: stack")),
//!     )
//!     .build();
//! assert_eq!(junit_test::count_testcases(&xml), 2);
//!
//! // Test error handling
//! for (name, invalid) in fixtures::errors::invalid_reports() {
//!     assert!(!invalid.is_empty(), "{}", name);
//! }
//! ```

/// Type alias for a list of named report fixtures.
pub type FixtureList = Vec<(&'static str, fn() -> &'static str)>;

/// Canonical sample reports.
pub mod fixtures;

/// Readers that synthesize large inputs.
pub mod repeat;

/// Fixture counting utilities.
pub mod counts;

pub use counts::count_testcases;
pub use repeat::RepeatReader;
