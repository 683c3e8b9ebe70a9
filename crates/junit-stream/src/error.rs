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

//! Error types for the streaming scanner.
//!
//! Every fatal condition ends the scan. Errors raised on the background
//! producer are handed to the consumer exactly once, through the final
//! [`CaseStream::scan`](crate::CaseStream::scan) call.
//!
//! # Error Categories
//!
//! - **Structural Errors**: an element appears where the report shape does not
//!   allow it, or the input ends while a container is still open
//! - **Cancellation Errors**: the [`CancelToken`](crate::CancelToken) was
//!   cancelled or its deadline passed
//! - **XML Errors**: malformed markup, bad escapes and I/O failures reported by
//!   the underlying reader
//! - **Worker Errors**: the producer thread could not be spawned or panicked
//!
//! Unparsable `time` attributes are not errors; the duration defaults to zero.
//!
//! # Examples
//!
//! ```rust
//! use junit_stream::{CancelToken, CaseStream, ScanError};
//! use std::io::Cursor;
//!
//! let input = "<report/>";
//! let mut stream = CaseStream::start(&CancelToken::new(), Cursor::new(input)).unwrap();
//!
//! match stream.scan() {
//!     Err(ScanError::UnexpectedElement { context, element }) => {
//!         assert_eq!(context, "top level");
//!         assert_eq!(element, "report");
//!     }
//!     other => panic!("expected a structural error, got {:?}", other.map(|c| c.cloned())),
//! }
//! assert!(stream.scan().unwrap().is_none());
//! ```

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while streaming a test report.
///
/// # Examples
///
/// ```rust
/// use junit_stream::ScanError;
///
/// let err = ScanError::truncated("testsuite");
/// assert!(err.is_structural());
/// assert_eq!(
///     err.to_string(),
///     "end of token stream without closing testsuite element"
/// );
/// ```
#[derive(Error, Debug)]
pub enum ScanError {
    /// The XML reader rejected the input (syntax, escapes, encoding or I/O).
    #[error("XML parse error at position {position}: {message}")]
    Xml { position: u64, message: String },

    /// An element that is not allowed at this level of the report.
    #[error("invalid {context} element: {element}")]
    UnexpectedElement {
        context: &'static str,
        element: String,
    },

    /// A closing tag seen before any element was opened.
    #[error("invalid top level end element: {element}")]
    UnexpectedEndElement { element: String },

    /// A child of `testcase` that is not a recognized outcome marker.
    #[error("{case}, invalid testcase element: {element}")]
    UnexpectedCaseElement { case: String, element: String },

    /// Markup nested inside a failure, error, skipped or output body.
    #[error("{case}, unexpected element inside message body: {element}")]
    UnexpectedMessageElement { case: String, element: String },

    /// The input ended while an element was still open.
    #[error("end of token stream without closing {element} element")]
    Truncated { element: &'static str },

    /// A discarded subtree nests deeper than allowed.
    #[error("element nesting exceeded maximum depth of {max}")]
    DepthExceeded { max: usize },

    /// The scan was cancelled through its token.
    #[error("scan cancelled")]
    Cancelled,

    /// The token's deadline passed before the scan finished.
    #[error("scan deadline of {limit:?} exceeded")]
    DeadlineExceeded { limit: Duration },

    /// The consumer went away while a case was being handed off.
    #[error("case consumer disconnected")]
    Disconnected,

    /// The background producer thread could not be started.
    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The background producer thread panicked.
    #[error("scanner thread panicked")]
    WorkerPanicked,
}

impl ScanError {
    /// Create an unexpected element error for the given nesting level.
    #[inline]
    pub fn unexpected(context: &'static str, element: impl Into<String>) -> Self {
        Self::UnexpectedElement {
            context,
            element: element.into(),
        }
    }

    /// Create an error for input that ended inside `element`.
    #[inline]
    pub fn truncated(element: &'static str) -> Self {
        Self::Truncated { element }
    }

    /// Create an XML error at the given byte position.
    #[inline]
    pub fn xml(position: u64, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    /// True for errors caused by the shape of the report itself.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedElement { .. }
                | Self::UnexpectedEndElement { .. }
                | Self::UnexpectedCaseElement { .. }
                | Self::UnexpectedMessageElement { .. }
                | Self::Truncated { .. }
                | Self::DepthExceeded { .. }
        )
    }

    /// True if the scan stopped because its token was cancelled or expired.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded { .. })
    }

    /// Byte position of the failure, if the XML reader reported one.
    #[inline]
    pub fn position(&self) -> Option<u64> {
        match self {
            Self::Xml { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result type for scanning operations.
pub type ScanResult<T> = Result<T, ScanError>;
