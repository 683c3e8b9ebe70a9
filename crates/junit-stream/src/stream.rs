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

//! Background producer and foreground consumer.
//!
//! [`CaseStream`] runs the tokenizer and scanner on a dedicated thread and
//! hands cases to the caller one at a time.
//!
//! # Handoff
//!
//! ```text
//!  producer thread                         caller
//!  ───────────────                         ──────
//!  build case in buffer A
//!  send A ──────── rendezvous ──────────▶  scan() returns &A
//!  build case in buffer B
//!  send B (blocks) ◀──── recycle A ──────  scan() gives A back, then receives B
//!  build case in A ...
//! ```
//!
//! - **Backpressure**: the case channel has no capacity, so the producer
//!   waits for every `scan` and at most one finished case is in flight
//! - **Two Buffers**: the buffer the caller held is returned through the
//!   recycle channel and reused, so records are not reallocated per case
//! - **Terminal Signal**: when the case channel closes, the producer's
//!   result is collected by joining its thread
//! - **Cancellation**: any producer error cancels the stream's own token,
//!   never the caller's

use crate::cancel::CancelToken;
use crate::case::Case;
use crate::config::ScannerConfig;
use crate::error::{ScanError, ScanResult};
use crate::scanner::{CaseSink, Scanner};
use crate::tokenizer::Tokenizer;
use std::io::{BufReader, Read};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender};
use std::thread::{self, JoinHandle};

/// Streaming decoder yielding one [`Case`] per `testcase` element.
///
/// # Examples
///
/// ```rust
/// use junit_stream::{CancelToken, CaseResult, CaseStream};
/// use std::io::Cursor;
///
/// let input = r#"
/// <testsuites>
///   <testsuite name="math">
///     <testcase name="adds" time="0.01"/>
///     <testcase name="divides"><failure message="division by zero"/></testcase>
///   </testsuite>
/// </testsuites>
/// "#;
///
/// let mut stream = CaseStream::start(&CancelToken::new(), Cursor::new(input)).unwrap();
///
/// let mut failed = Vec::new();
/// while let Some(case) = stream.scan().unwrap() {
///     if case.result == CaseResult::Failed {
///         failed.push(case.name.clone());
///     }
/// }
/// assert_eq!(failed, vec!["divides"]);
/// ```
///
/// # Shutdown
///
/// Keep calling [`scan`](Self::scan) until it returns `Ok(None)` or an error;
/// that call joins the producer thread. Dropping the stream earlier cancels
/// the producer, which then exits at its next read or handoff.
pub struct CaseStream {
    cases: Option<Receiver<Box<Case>>>,
    recycle: Sender<Box<Case>>,
    current: Option<Box<Case>>,
    worker: Option<JoinHandle<ScanResult<()>>>,
    cancel: CancelToken,
    scanned: u64,
}

impl CaseStream {
    /// Start streaming `reader` with the default configuration.
    ///
    /// Returns immediately; parsing happens on a background thread.
    ///
    /// # Errors
    ///
    /// `ScanError::Spawn` if the producer thread cannot be created.
    pub fn start<R>(cancel: &CancelToken, reader: R) -> ScanResult<Self>
    where
        R: Read + Send + 'static,
    {
        Self::with_config(cancel, reader, ScannerConfig::default())
    }

    /// Start streaming `reader` with a custom configuration.
    ///
    /// The scan observes a child of `cancel`: cancelling `cancel` stops the
    /// scan, while a failing scan leaves `cancel` untouched.
    pub fn with_config<R>(cancel: &CancelToken, reader: R, config: ScannerConfig) -> ScanResult<Self>
    where
        R: Read + Send + 'static,
    {
        let cancel = match config.timeout {
            Some(limit) => cancel.child_with_timeout(limit),
            None => cancel.child(),
        };

        let (case_tx, case_rx) = mpsc::sync_channel(0);
        let (recycle_tx, recycle_rx) = mpsc::channel();
        let sink = ChannelSink {
            cases: case_tx,
            recycled: recycle_rx,
        };

        let worker_cancel = cancel.clone();
        let worker = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || produce(reader, config, worker_cancel, sink))
            .map_err(ScanError::Spawn)?;

        Ok(Self {
            cases: Some(case_rx),
            recycle: recycle_tx,
            current: None,
            worker: Some(worker),
            cancel,
            scanned: 0,
        })
    }

    /// Wait for the next case.
    ///
    /// Returns `Ok(Some(case))` for every decoded case, `Ok(None)` once the
    /// document ended cleanly, or the error that stopped the scan. The error
    /// is reported once; later calls return `Ok(None)`.
    ///
    /// The returned case is only valid until the next call; clone it to keep it.
    pub fn scan(&mut self) -> ScanResult<Option<&Case>> {
        if let Some(previous) = self.current.take() {
            // The producer may already be gone; the buffer is simply dropped then.
            let _ = self.recycle.send(previous);
        }

        let received = match &self.cases {
            Some(cases) => cases.recv(),
            None => return Ok(None),
        };

        match received {
            Ok(case) => {
                self.scanned += 1;
                Ok(Some(&**self.current.insert(case)))
            }
            Err(_) => {
                self.cases = None;
                self.join().map(|()| None)
            }
        }
    }

    /// Scan to the end, calling `f` for every case.
    ///
    /// Returns the number of cases seen. Always joins the producer.
    pub fn for_each<F>(&mut self, mut f: F) -> ScanResult<u64>
    where
        F: FnMut(&Case),
    {
        let mut count = 0;
        while let Some(case) = self.scan()? {
            f(case);
            count += 1;
        }
        Ok(count)
    }

    /// Number of cases returned by [`scan`](Self::scan) so far.
    #[inline]
    pub fn scanned(&self) -> u64 {
        self.scanned
    }

    /// True once the terminal result has been collected.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.cases.is_none()
    }

    fn join(&mut self) -> ScanResult<()> {
        match self.worker.take() {
            Some(worker) => match worker.join() {
                Ok(result) => result,
                Err(_) => Err(ScanError::WorkerPanicked),
            },
            None => Ok(()),
        }
    }
}

impl Drop for CaseStream {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.cancel.cancel();
            // Closing the receiver fails any pending handoff.
            self.cases = None;
        }
    }
}

/// Sink feeding the rendezvous channel and collecting returned buffers.
struct ChannelSink {
    cases: SyncSender<Box<Case>>,
    recycled: Receiver<Box<Case>>,
}

impl CaseSink for ChannelSink {
    fn deliver(&mut self, case: Box<Case>) -> ScanResult<Option<Box<Case>>> {
        self.cases.send(case).map_err(|_| ScanError::Disconnected)?;
        // The consumer returns its previous buffer before receiving this one.
        Ok(self.recycled.try_recv().ok())
    }
}

fn produce<R: Read>(
    reader: R,
    config: ScannerConfig,
    cancel: CancelToken,
    sink: ChannelSink,
) -> ScanResult<()> {
    let reader = BufReader::with_capacity(config.buffer_size, reader);
    let tokenizer = Tokenizer::with_capacity(reader, cancel.clone(), config.text_capacity);
    let mut scanner = Scanner::new(tokenizer, sink, config.max_depth);

    tracing::debug!(thread = %config.thread_name, "scan started");
    let result = scanner.run();
    match result {
        Ok(()) => tracing::debug!(cases = scanner.delivered(), "scan finished"),
        Err(_) => {
            cancel.cancel();
            tracing::debug!(cases = scanner.delivered(), "scan aborted");
        }
    }
    result
}
