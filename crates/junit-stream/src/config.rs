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

//! Scanner configuration.

use crate::tokenizer::DEFAULT_TEXT_CAPACITY;
use std::time::Duration;

/// Configuration for [`CaseStream`](crate::CaseStream).
///
/// # Examples
///
/// ```rust
/// use junit_stream::ScannerConfig;
/// use std::time::Duration;
///
/// let config = ScannerConfig {
///     timeout: Some(Duration::from_secs(30)),
///     ..Default::default()
/// };
/// assert_eq!(config.buffer_size, 64 * 1024);
/// ```
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Capacity of the buffered reader wrapped around the input.
    ///
    /// Default: 64KB
    pub buffer_size: usize,

    /// Initial capacity of the reused character data buffer.
    ///
    /// Text longer than this grows the buffer once and the larger buffer is
    /// kept for the rest of the stream.
    ///
    /// Default: 64KB
    pub text_capacity: usize,

    /// Maximum nesting inside ignored subtrees such as `properties`.
    ///
    /// Default: 100 levels
    pub max_depth: usize,

    /// Deadline for the whole scan, measured from start.
    ///
    /// When it passes the scan ends with `ScanError::DeadlineExceeded`.
    ///
    /// Default: None (no deadline)
    pub timeout: Option<Duration>,

    /// Name of the background producer thread.
    ///
    /// Default: `"junit-scan"`
    pub thread_name: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,
            text_capacity: DEFAULT_TEXT_CAPACITY,
            max_depth: 100,
            timeout: None,
            thread_name: "junit-scan".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ScannerConfig::default();
        assert_eq!(config.buffer_size, 65536);
        assert_eq!(config.text_capacity, 65536);
        assert_eq!(config.max_depth, 100);
        assert_eq!(config.timeout, None);
        assert_eq!(config.thread_name, "junit-scan");
    }

    #[test]
    fn test_config_override() {
        let config = ScannerConfig {
            max_depth: 8,
            timeout: Some(Duration::from_millis(500)),
            ..Default::default()
        };
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.timeout, Some(Duration::from_millis(500)));
        assert_eq!(config.buffer_size, 65536);
    }
}
