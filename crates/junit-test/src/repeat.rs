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

//! Synthetic large inputs built from a repeated body.
//!
//! [`RepeatReader`] emits `head`, then `body` a fixed number of times, then
//! `tail`, without ever holding more than those three pieces in memory. It
//! lets stress tests feed gigabytes of well-formed report through a decoder.

use std::io::{self, Read};

/// Reader producing `head + body * repeats + tail`.
///
/// Each `read` call returns at most `chunk` bytes, which mimics a pipe or
/// socket delivering data in pieces.
///
/// # Examples
///
/// ```
/// use junit_test::RepeatReader;
/// use std::io::Read;
///
/// let mut reader = RepeatReader::new("<r>", "<x/>", "</r>", 3);
/// let mut out = String::new();
/// reader.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "<r><x/><x/><x/></r>");
/// assert_eq!(RepeatReader::new("<r>", "<x/>", "</r>", 3).total_len(), 19);
/// ```
#[derive(Debug, Clone)]
pub struct RepeatReader {
    head: Vec<u8>,
    body: Vec<u8>,
    tail: Vec<u8>,
    repeats: u64,
    chunk: usize,
    /// 0 = head, 1..=repeats = body copies, repeats + 1 = tail.
    part: u64,
    offset: usize,
    emitted: u64,
}

impl RepeatReader {
    /// Default maximum bytes returned per read.
    pub const DEFAULT_CHUNK: usize = 32 * 1024;

    /// Create a reader repeating `body` `repeats` times between `head` and `tail`.
    pub fn new(
        head: impl Into<Vec<u8>>,
        body: impl Into<Vec<u8>>,
        tail: impl Into<Vec<u8>>,
        repeats: u64,
    ) -> Self {
        Self {
            head: head.into(),
            body: body.into(),
            tail: tail.into(),
            repeats,
            chunk: Self::DEFAULT_CHUNK,
            part: 0,
            offset: 0,
            emitted: 0,
        }
    }

    /// Limit every read to `chunk` bytes (at least one).
    pub fn with_chunk(mut self, chunk: usize) -> Self {
        self.chunk = chunk.max(1);
        self
    }

    /// Total number of bytes this reader produces.
    pub fn total_len(&self) -> u64 {
        (self.body.len() as u64)
            .saturating_mul(self.repeats)
            .saturating_add(self.head.len() as u64)
            .saturating_add(self.tail.len() as u64)
    }

    /// Bytes produced so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn current(&self) -> Option<&[u8]> {
        if self.part == 0 {
            Some(&self.head)
        } else if self.part <= self.repeats {
            Some(&self.body)
        } else if self.part == self.repeats + 1 {
            Some(&self.tail)
        } else {
            None
        }
    }
}

impl Read for RepeatReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            let limit = buf.len().min(self.chunk);
            let offset = self.offset;
            let n = match self.current() {
                None => return Ok(0),
                Some(piece) if offset >= piece.len() => None,
                Some(piece) => {
                    let n = (piece.len() - offset).min(limit);
                    buf[..n].copy_from_slice(&piece[offset..offset + n]);
                    Some(n)
                }
            };
            match n {
                Some(n) => {
                    self.offset += n;
                    self.emitted += n as u64;
                    return Ok(n);
                }
                None => {
                    self.part += 1;
                    self.offset = 0;
                }
            }
        }
    }
}
