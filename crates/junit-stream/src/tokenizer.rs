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

//! Pull tokenizer over a streaming XML reader.
//!
//! The tokenizer turns the raw event stream of [`quick_xml::Reader`] into the
//! three token kinds the scanner cares about: element starts, element ends
//! and character data. Element and attribute names are lower-cased so the
//! scanner can match them case-insensitively.
//!
//! # Memory Characteristics
//!
//! - **Single Token**: one [`Token`] lives for the whole stream and is
//!   overwritten by every pull
//! - **Reused Buffers**: the event buffer, name strings, attribute strings and
//!   character data buffer keep their capacity between pulls
//! - **Pre-sized Text**: the character data buffer starts at
//!   [`DEFAULT_TEXT_CAPACITY`] bytes and only grows for larger payloads
//!
//! # Examples
//!
//! ```rust
//! use junit_stream::{CancelToken, TokenKind, Tokenizer};
//! use std::io::Cursor;
//!
//! let mut tokenizer = Tokenizer::new(Cursor::new(r#"<TestCase Name="a">ok</TestCase>"#), CancelToken::new());
//!
//! let tok = tokenizer.next().unwrap().unwrap();
//! assert_eq!(tok.kind(), TokenKind::Start);
//! assert_eq!(tok.element(), "testcase");
//! assert_eq!(tok.attribute("name"), Some("a"));
//!
//! let tok = tokenizer.next().unwrap().unwrap();
//! assert_eq!(tok.kind(), TokenKind::Char);
//! assert_eq!(tok.data(), b"ok");
//!
//! let tok = tokenizer.next().unwrap().unwrap();
//! assert_eq!(tok.kind(), TokenKind::End);
//!
//! assert!(tokenizer.next().unwrap().is_none());
//! ```

use crate::cancel::CancelToken;
use crate::error::{ScanError, ScanResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;

/// Initial capacity of the character data buffer.
pub const DEFAULT_TEXT_CAPACITY: usize = 64 * 1024;

/// Kind of structural event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An element opened. Self-closing elements produce a start then an end.
    Start,
    /// An element closed.
    End,
    /// Character data or a CDATA section.
    Char,
}

/// The tokenizer's single reusable token.
///
/// Contents are only valid until the next call to [`Tokenizer::next`].
#[derive(Debug)]
pub struct Token {
    kind: TokenKind,
    element: String,
    attributes: Vec<(String, String)>,
    attr_len: usize,
    data: Vec<u8>,
}

impl Token {
    fn with_capacity(text_capacity: usize) -> Self {
        Self {
            kind: TokenKind::End,
            element: String::new(),
            attributes: Vec::new(),
            attr_len: 0,
            data: Vec::with_capacity(text_capacity),
        }
    }

    /// Kind of this token.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Lower-cased local name of the element. Meaningful for starts and ends.
    #[inline]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Value of the attribute with the given lower-case name.
    ///
    /// Only meaningful on [`TokenKind::Start`]. When an attribute occurs more
    /// than once after case folding, the last occurrence wins.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes[..self.attr_len]
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Raw character data. Only meaningful on [`TokenKind::Char`].
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Character data as text, replacing invalid UTF-8.
    #[inline]
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    fn load_start(&mut self, start: &BytesStart<'_>) -> Result<(), String> {
        self.kind = TokenKind::Start;
        set_lowercase(&mut self.element, start.local_name().as_ref());
        self.attr_len = 0;
        for attr in start.attributes() {
            let attr = attr.map_err(|e| e.to_string())?;
            let value = attr.unescape_value().map_err(|e| e.to_string())?;
            if self.attr_len == self.attributes.len() {
                self.attributes.push((String::new(), String::new()));
            }
            let (key, slot) = &mut self.attributes[self.attr_len];
            set_lowercase(key, attr.key.local_name().as_ref());
            slot.clear();
            slot.push_str(&value);
            self.attr_len += 1;
        }
        Ok(())
    }

    fn load_end(&mut self, name: &[u8]) {
        self.kind = TokenKind::End;
        set_lowercase(&mut self.element, name);
    }

    fn load_text(&mut self, data: &[u8]) {
        self.kind = TokenKind::Char;
        self.data.clear();
        self.data.extend_from_slice(data);
    }
}

fn set_lowercase(dst: &mut String, raw: &[u8]) {
    dst.clear();
    for ch in String::from_utf8_lossy(raw).chars() {
        dst.extend(ch.to_lowercase());
    }
}

/// Pull-based tokenizer with cooperative cancellation.
///
/// Every call to [`next`](Self::next) first checks the [`CancelToken`]; this
/// is the only point where a running scan observes cancellation.
pub struct Tokenizer<R: BufRead> {
    reader: Reader<R>,
    cancel: CancelToken,
    buf: Vec<u8>,
    token: Token,
    pending_end: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer with the default text buffer capacity.
    pub fn new(reader: R, cancel: CancelToken) -> Self {
        Self::with_capacity(reader, cancel, DEFAULT_TEXT_CAPACITY)
    }

    /// Create a tokenizer whose text buffer starts at `text_capacity` bytes.
    pub fn with_capacity(reader: R, cancel: CancelToken, text_capacity: usize) -> Self {
        Self {
            reader: Reader::from_reader(reader),
            cancel,
            buf: Vec::with_capacity(8192),
            token: Token::with_capacity(text_capacity),
            pending_end: false,
        }
    }

    /// Byte offset of the reader within the input.
    #[inline]
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    /// Pull the next token.
    ///
    /// Returns `Ok(None)` at the end of the input. Comments, processing
    /// instructions, declarations and doctypes are skipped. Empty character
    /// data is never reported.
    ///
    /// # Errors
    ///
    /// - `ScanError::Cancelled` / `ScanError::DeadlineExceeded`: the token stopped
    /// - `ScanError::Xml`: malformed markup, bad escapes or an I/O failure
    pub fn next(&mut self) -> ScanResult<Option<&Token>> {
        loop {
            self.cancel.check()?;

            if self.pending_end {
                self.pending_end = false;
                self.token.kind = TokenKind::End;
                return Ok(Some(&self.token));
            }

            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    return Err(ScanError::xml(
                        self.reader.buffer_position() as u64,
                        e.to_string(),
                    ))
                }
            };

            match event {
                Event::Start(start) => {
                    if let Err(message) = self.token.load_start(&start) {
                        return Err(ScanError::xml(self.reader.buffer_position() as u64, message));
                    }
                    return Ok(Some(&self.token));
                }
                Event::Empty(start) => {
                    if let Err(message) = self.token.load_start(&start) {
                        return Err(ScanError::xml(self.reader.buffer_position() as u64, message));
                    }
                    self.pending_end = true;
                    return Ok(Some(&self.token));
                }
                Event::End(end) => {
                    self.token.load_end(end.local_name().as_ref());
                    return Ok(Some(&self.token));
                }
                Event::Text(text) => {
                    let text = match text.unescape() {
                        Ok(text) => text,
                        Err(e) => {
                            return Err(ScanError::xml(
                                self.reader.buffer_position() as u64,
                                e.to_string(),
                            ))
                        }
                    };
                    if !text.is_empty() {
                        self.token.load_text(text.as_bytes());
                        return Ok(Some(&self.token));
                    }
                }
                Event::CData(cdata) => {
                    let data: &[u8] = &cdata;
                    if !data.is_empty() {
                        self.token.load_text(data);
                        return Ok(Some(&self.token));
                    }
                }
                Event::Eof => return Ok(None),
                _ => {}
            }
        }
    }
}
