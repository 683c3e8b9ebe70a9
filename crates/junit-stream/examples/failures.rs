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

//! Print the failed cases of a JUnit report.
//!
//! Run with: cargo run --example failures -- report.xml
//! Set RUST_LOG=junit_stream=debug to see the producer lifecycle.

use junit_stream::{CancelToken, CaseStream};
use std::fs::File;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: failures <report.xml>")?;
    let file = File::open(&path)?;

    let mut stream = CaseStream::start(&CancelToken::new(), file)?;
    let mut total = 0u64;
    let mut failed = 0u64;
    while let Some(case) = stream.scan()? {
        total += 1;
        if case.result.is_failure() {
            failed += 1;
            println!("FAIL {}.{} ({}) {:.3}s", case.class_name, case.name, case.file, case.duration);
            for line in case.message.lines() {
                println!("    {}", line);
            }
        }
    }

    println!("{} cases, {} failed", total, failed);
    Ok(())
}
