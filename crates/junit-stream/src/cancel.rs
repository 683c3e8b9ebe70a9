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

//! Cooperative cancellation for the background scanner.
//!
//! A [`CancelToken`] is polled by the tokenizer before every pull from the
//! underlying reader. Tokens form a tree: cancelling a token cancels all of
//! its children, while cancelling a child leaves the parent untouched. The
//! scanner always runs against a child of the caller's token so a failing
//! scan never cancels anything the caller owns.

use crate::error::{ScanError, ScanResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancellation flag with an optional deadline.
///
/// # Examples
///
/// ```rust
/// use junit_stream::CancelToken;
///
/// let parent = CancelToken::new();
/// let child = parent.child();
///
/// child.cancel();
/// assert!(child.is_cancelled());
/// assert!(!parent.is_cancelled());
///
/// let other = parent.child();
/// parent.cancel();
/// assert!(other.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    deadline: Option<Deadline>,
    parent: Option<CancelToken>,
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    limit: Duration,
}

impl CancelToken {
    /// Create a root token that is never cancelled unless asked to.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a root token that expires `limit` from now.
    pub fn with_timeout(limit: Duration) -> Self {
        Self::from_parts(None, Some(limit))
    }

    /// Create a child token observing this one.
    pub fn child(&self) -> Self {
        Self::from_parts(Some(self.clone()), None)
    }

    /// Create a child token that additionally expires `limit` from now.
    pub fn child_with_timeout(&self, limit: Duration) -> Self {
        Self::from_parts(Some(self.clone()), Some(limit))
    }

    fn from_parts(parent: Option<CancelToken>, limit: Option<Duration>) -> Self {
        let deadline = limit.map(|limit| Deadline {
            at: Instant::now() + limit,
            limit,
        });
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                deadline,
                parent,
            }),
        }
    }

    /// Cancel this token and every token derived from it.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    /// True once this token or any ancestor is cancelled or expired.
    pub fn is_cancelled(&self) -> bool {
        self.check().is_err()
    }

    /// Return the reason this token stopped, if it has.
    ///
    /// Explicit cancellation anywhere in the chain wins over an expired
    /// deadline.
    pub fn check(&self) -> ScanResult<()> {
        let mut expired = None;
        let mut token = Some(self);
        while let Some(current) = token {
            if current.inner.cancelled.load(Ordering::Acquire) {
                return Err(ScanError::Cancelled);
            }
            if expired.is_none() {
                if let Some(deadline) = current.inner.deadline {
                    if Instant::now() >= deadline.at {
                        expired = Some(deadline.limit);
                    }
                }
            }
            token = current.inner.parent.as_ref();
        }
        match expired {
            Some(limit) => Err(ScanError::DeadlineExceeded { limit }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_token_is_live() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        let token = CancelToken::new();
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(matches!(clone.check(), Err(ScanError::Cancelled)));
    }

    #[test]
    fn test_child_does_not_cancel_parent() {
        let parent = CancelToken::new();
        let child = parent.child();
        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn test_parent_cancels_grandchild() {
        let root = CancelToken::new();
        let grandchild = root.child().child();
        root.cancel();
        assert!(grandchild.is_cancelled());
    }

    #[test]
    fn test_zero_timeout_expires_immediately() {
        let token = CancelToken::with_timeout(Duration::ZERO);
        match token.check() {
            Err(ScanError::DeadlineExceeded { limit }) => assert_eq!(limit, Duration::ZERO),
            other => panic!("expected deadline error, got {:?}", other),
        }
    }

    #[test]
    fn test_parent_deadline_reaches_child() {
        let parent = CancelToken::with_timeout(Duration::ZERO);
        let child = parent.child_with_timeout(Duration::from_secs(3600));
        assert!(matches!(
            child.check(),
            Err(ScanError::DeadlineExceeded { .. })
        ));
    }

    #[test]
    fn test_cancel_wins_over_deadline() {
        let token = CancelToken::with_timeout(Duration::ZERO);
        token.cancel();
        assert!(matches!(token.check(), Err(ScanError::Cancelled)));
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let token = CancelToken::new();
        let remote = token.clone();
        thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
