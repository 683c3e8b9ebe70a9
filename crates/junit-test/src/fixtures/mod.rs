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

//! Canonical sample reports.
//!
//! - **reports**: realistic reports as emitted by common test runners
//! - **errors**: malformed or truncated reports
//! - **builders**: builder pattern for generating reports

pub mod builders;
pub mod errors;
mod reports;

pub use reports::*;

use crate::FixtureList;

/// Returns all well-formed report fixtures for iteration.
///
/// Useful for running the same test across all fixtures.
pub fn all() -> FixtureList {
    vec![
        ("go_test_report", go_test_report),
        ("surefire_report", surefire_report),
        ("pytest_report", pytest_report),
        ("bare_suite", bare_suite),
        ("mixed_case_names", mixed_case_names),
        ("escaped_content", escaped_content),
        ("suite_noise", suite_noise),
    ]
}
