// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The character-reference sub-tokenizer.
//!
//! Entered when `Data`, RCDATA, or an attribute-value state consumes `&`.
//! Runs to completion (or EOF) and hands back up to two replacement scalars;
//! on failure every consumed scalar is pushed back so it re-tokenizes as
//! literal text, and the caller emits the bare `&`.

use log::debug;
use std::char::from_u32;
use std::mem;

use crate::errors::{ErrorCode, Location};
use crate::tokenizer::entities;
use crate::tokenizer::{TokenSink, Tokenizer};

#[derive(Clone, Copy, Debug)]
pub(super) struct CharRef {
    /// The resulting scalar(s).
    pub(super) chars: [char; 2],

    /// How many slots of `chars` are valid. Zero means "not a reference":
    /// the caller emits the `&` itself.
    pub(super) num_chars: u8,
}

impl CharRef {
    pub(super) const EMPTY: CharRef = CharRef {
        chars: ['\0', '\0'],
        num_chars: 0,
    };

    fn from_table(chars: [char; 2]) -> CharRef {
        let num_chars = if chars[1] == '\0' { 1 } else { 2 };
        CharRef { chars, num_chars }
    }
}

pub(super) enum Status {
    /// Waiting for more input.
    Stuck,
    /// Made progress; call `step` again.
    Progress,
    Done(CharRef),
}

#[derive(Debug)]
enum State {
    Begin,
    Octothorpe,
    Numeric(u32), // base
    NumericSemicolon,
    Named,
}

pub(super) struct CharRefTokenizer {
    state: State,
    is_consumed_in_attribute: bool,

    // Numeric reference accumulator.
    num: u32,
    num_too_big: bool,
    seen_digit: bool,
    hex_marker: Option<char>,

    // Candidate name and the consumed scalars backing it, kept so a failed
    // match can return them to the input with their original locations.
    name_buf: String,
    name_marks: Vec<(char, Location)>,
}

impl CharRefTokenizer {
    pub(super) fn new(is_consumed_in_attribute: bool) -> CharRefTokenizer {
        CharRefTokenizer {
            state: State::Begin,
            is_consumed_in_attribute,
            num: 0,
            num_too_big: false,
            seen_digit: false,
            hex_marker: None,
            name_buf: String::new(),
            name_marks: Vec::new(),
        }
    }

    pub(super) fn step<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) -> Status {
        debug!("char ref tokenizer stepping in state {:?}", self.state);
        match self.state {
            State::Begin => self.do_begin(tokenizer),
            State::Octothorpe => self.do_octothorpe(tokenizer),
            State::Numeric(base) => self.do_numeric(tokenizer, base),
            State::NumericSemicolon => self.do_numeric_semicolon(tokenizer),
            State::Named => self.do_named(tokenizer),
        }
    }

    fn do_begin<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) -> Status {
        match tokenizer.peek_input() {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.state = State::Named;
                Status::Progress
            }
            Some('#') => {
                let mark = tokenizer.consume_input().expect("peeked char vanished");
                self.name_marks.push(mark);
                self.state = State::Octothorpe;
                Status::Progress
            }
            Some(_) => Status::Done(CharRef::EMPTY),
            None => Status::Stuck,
        }
    }

    fn do_octothorpe<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) -> Status {
        match tokenizer.peek_input() {
            Some(c @ ('x' | 'X')) => {
                let mark = tokenizer.consume_input().expect("peeked char vanished");
                self.name_marks.push(mark);
                self.hex_marker = Some(c);
                self.state = State::Numeric(16);
                Status::Progress
            }
            Some(_) => {
                self.hex_marker = None;
                self.state = State::Numeric(10);
                Status::Progress
            }
            None => Status::Stuck,
        }
    }

    fn do_numeric<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>, base: u32) -> Status {
        let Some(c) = tokenizer.peek_input() else {
            return Status::Stuck;
        };
        match c.to_digit(base) {
            Some(n) => {
                let _ = tokenizer.consume_input();
                self.num = self.num.wrapping_mul(base);
                if self.num > 0x10FFFF {
                    // Keep consuming digits, but the value is already junk.
                    self.num_too_big = true;
                }
                self.num = self.num.wrapping_add(n);
                self.seen_digit = true;
                Status::Progress
            }

            None if !self.seen_digit => self.unconsume_numeric(tokenizer),

            None => {
                self.state = State::NumericSemicolon;
                Status::Progress
            }
        }
    }

    fn do_numeric_semicolon<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) -> Status {
        match tokenizer.peek_input() {
            Some(';') => {
                let _ = tokenizer.consume_input();
            }
            Some(_) => tokenizer.emit_error(
                ErrorCode::MissingSemicolonAfterCharacterReference,
                "Semicolon missing after numeric character reference",
            ),
            None => return Status::Stuck,
        }
        self.finish_numeric(tokenizer)
    }

    fn unconsume_numeric<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) -> Status {
        tokenizer.unconsume_input(mem::take(&mut self.name_marks));
        tokenizer.emit_error(
            ErrorCode::AbsenceOfDigitsInNumericCharacterReference,
            "Numeric character reference without digits",
        );
        Status::Done(CharRef::EMPTY)
    }

    fn finish_numeric<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) -> Status {
        fn conv(n: u32) -> char {
            from_u32(n).expect("invalid scalar missed by the error cases")
        }

        let (c, error) = match self.num {
            n if n > 0x10FFFF => ('\u{fffd}', Some(ErrorCode::CharacterReferenceOutsideUnicodeRange)),
            _ if self.num_too_big => ('\u{fffd}', Some(ErrorCode::CharacterReferenceOutsideUnicodeRange)),
            0x00 => ('\u{fffd}', Some(ErrorCode::NullCharacterReference)),
            0xD800..=0xDFFF => ('\u{fffd}', Some(ErrorCode::SurrogateCharacterReference)),

            0x80..=0x9F => match entities::C1_REPLACEMENTS[(self.num - 0x80) as usize] {
                Some(c) => (c, Some(ErrorCode::ControlCharacterReference)),
                None => (conv(self.num), Some(ErrorCode::ControlCharacterReference)),
            },

            0x01..=0x08 | 0x0B | 0x0D..=0x1F | 0x7F => {
                (conv(self.num), Some(ErrorCode::ControlCharacterReference))
            }

            n if (0xFDD0..=0xFDEF).contains(&n) || (n & 0xFFFE) == 0xFFFE => {
                (conv(n), Some(ErrorCode::NoncharacterCharacterReference))
            }

            n => (conv(n), None),
        };

        if let Some(code) = error {
            tokenizer.emit_error(
                code,
                format!("Invalid numeric character reference value 0x{:06X}", self.num),
            );
        }

        Status::Done(CharRef {
            chars: [c, '\0'],
            num_chars: 1,
        })
    }

    fn do_named<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) -> Status {
        let Some(c) = tokenizer.peek_input() else {
            return Status::Stuck;
        };
        // A semicolon always terminates the candidate name.
        if !self.name_buf.ends_with(';') {
            if c.is_ascii_alphanumeric() && self.name_buf.len() < entities::LONGEST_REFERENCE_NAME {
                let mark = tokenizer.consume_input().expect("peeked char vanished");
                self.name_marks.push(mark);
                self.name_buf.push(c);
                return Status::Progress;
            }
            if c == ';' {
                let mark = tokenizer.consume_input().expect("peeked char vanished");
                self.name_marks.push(mark);
                self.name_buf.push(';');
            }
        }
        self.finish_named(tokenizer, false)
    }

    fn finish_named<Sink: TokenSink>(
        &mut self,
        tokenizer: &mut Tokenizer<Sink>,
        at_eof: bool,
    ) -> Status {
        match entities::longest_reference_prefix(&self.name_buf) {
            Some((len, chars)) => {
                let has_semicolon = self.name_buf[..len].ends_with(';');

                // Historical quirk: in an attribute value, a reference
                // without its semicolon followed by `=` or an alphanumeric
                // is not a reference at all, and not an error either. The
                // following scalar is either part of the consumed surplus or
                // still in the input.
                if !has_semicolon && self.is_consumed_in_attribute {
                    let next_char = if len < self.name_buf.len() {
                        self.name_buf[len..].chars().next()
                    } else if at_eof {
                        None
                    } else {
                        match tokenizer.peek_input() {
                            Some(c) => Some(c),
                            None => return Status::Stuck,
                        }
                    };
                    if matches!(next_char, Some(c) if c == '=' || c.is_ascii_alphanumeric()) {
                        self.unconsume_all(tokenizer);
                        return Status::Done(CharRef::EMPTY);
                    }
                }

                // Names are ASCII, so byte length equals scalar count.
                let surplus = self.name_marks.split_off(len);
                tokenizer.unconsume_input(surplus);

                if !has_semicolon {
                    tokenizer.emit_error(
                        ErrorCode::MissingSemicolonAfterCharacterReference,
                        format!("Character reference &{} missing semicolon", &self.name_buf[..len]),
                    );
                }
                Status::Done(CharRef::from_table(chars))
            }
            None => {
                let ended_with_semicolon = self.name_buf.ends_with(';');
                let bogus_name = mem::take(&mut self.name_buf);
                self.unconsume_all(tokenizer);
                if ended_with_semicolon {
                    tokenizer.emit_error(
                        ErrorCode::UnknownNamedCharacterReference,
                        format!("&{} is not a known character reference", bogus_name),
                    );
                }
                Status::Done(CharRef::EMPTY)
            }
        }
    }

    fn unconsume_all<Sink: TokenSink>(&mut self, tokenizer: &mut Tokenizer<Sink>) {
        tokenizer.unconsume_input(mem::take(&mut self.name_marks));
        self.name_buf.clear();
    }

    /// The input ended while a reference was in flight.
    pub(super) fn end_of_file<Sink: TokenSink>(
        &mut self,
        tokenizer: &mut Tokenizer<Sink>,
    ) -> CharRef {
        let status = match self.state {
            State::Begin => Status::Done(CharRef::EMPTY),

            State::Numeric(_) if !self.seen_digit => self.unconsume_numeric(tokenizer),

            State::Numeric(_) | State::NumericSemicolon => {
                tokenizer.emit_error(
                    ErrorCode::MissingSemicolonAfterCharacterReference,
                    "EOF in numeric character reference",
                );
                self.finish_numeric(tokenizer)
            }

            State::Named => self.finish_named(tokenizer, true),

            State::Octothorpe => {
                tokenizer.unconsume_input(mem::take(&mut self.name_marks));
                tokenizer.emit_error(
                    ErrorCode::AbsenceOfDigitsInNumericCharacterReference,
                    "EOF after '#' in character reference",
                );
                Status::Done(CharRef::EMPTY)
            }
        };

        match status {
            Status::Done(char_ref) => char_ref,
            // There is no more input coming; nothing left to resolve.
            Status::Stuck | Status::Progress => CharRef::EMPTY,
        }
    }
}
