// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The HTML5 tokenizer: a switch-over-state machine advancing one scalar
//! value at a time.
//!
//! Every transition either consumes and emits nothing, consumes and emits
//! token(s), or reconsumes (advances state without consuming; an explicit
//! flag, never buffer rewind). Character tokens carry exactly one scalar.
//! Parse errors are reported and never fatal: the machine always makes
//! progress.

pub use self::interface::{CharacterToken, CommentToken, DoctypeToken, EOFToken, TagToken};
pub use self::interface::{Doctype, EndTag, StartTag, Tag, TagKind, Token};
pub use self::interface::{TokenSink, TokenSinkResult};

use self::char_ref::{CharRef, CharRefTokenizer, Status};
use self::states::{DoctypeIdKind, Public, System};
use self::states::{DoubleEscaped, Escaped};
use self::states::{DoubleQuoted, SingleQuoted, Unquoted};
use self::states::{Rawtext, Rcdata, ScriptData, ScriptDataEscaped};

use std::borrow::Cow;
use std::mem;

use log::{debug, trace};
use mac::unwrap_or_return;

use crate::errors::{ErrorCode, Location, ParseError};
use crate::input::InputStream;
use crate::interface::{Attribute, LocalName, QualName};
use crate::tendril::StrTendril;

mod char_ref;
mod entities;
mod interface;
pub mod states;

pub enum ProcessResult {
    Continue,
    Suspend,
}

fn option_push(opt_str: &mut Option<StrTendril>, c: char) {
    match *opt_str {
        Some(ref mut s) => s.push_char(c),
        None => *opt_str = Some(StrTendril::from_char(c)),
    }
}

fn lower_ascii_letter(c: char) -> Option<char> {
    match c {
        'a'..='z' => Some(c),
        'A'..='Z' => Some(c.to_ascii_lowercase()),
        _ => None,
    }
}

/// Tokenizer options, with an impl for `Default`.
#[derive(Clone)]
pub struct TokenizerOpts {
    /// Discard a `U+FEFF BYTE ORDER MARK` at the beginning of the stream?
    /// Default: true
    pub discard_bom: bool,

    /// Initial state override, for fragment parsing and the test runner.
    pub initial_state: Option<states::State>,

    /// Last start tag seen, for fragment parsing and the test runner.
    pub last_start_tag_name: Option<String>,
}

impl Default for TokenizerOpts {
    fn default() -> TokenizerOpts {
        TokenizerOpts {
            discard_bom: true,
            initial_state: None,
            last_start_tag_name: None,
        }
    }
}

/// The HTML tokenizer.
pub struct Tokenizer<Sink> {
    /// Destination for tokens we emit.
    pub sink: Sink,

    /// The preprocessed input stream.
    input: InputStream,

    /// The abstract machine state as described in the spec.
    state: states::State,

    /// Are we at the end of the input, once buffers run dry?
    at_eof: bool,

    /// Tokenizer for character references, if we're tokenizing one at the
    /// moment.
    char_ref_tokenizer: Option<Box<CharRefTokenizer>>,

    /// Current input scalar. Just consumed, may reconsume.
    current_char: char,

    /// Should we reconsume the current input scalar?
    reconsume: bool,

    /// Discard a U+FEFF BYTE ORDER MARK if we see one? Only done at the
    /// very beginning of the stream.
    discard_bom: bool,

    /// Current tag kind.
    current_tag_kind: TagKind,

    /// Current tag name.
    current_tag_name: String,

    /// Current tag is self-closing?
    current_tag_self_closing: bool,

    /// Current tag attributes.
    current_tag_attrs: Vec<Attribute>,

    /// Where the current tag's name began, reported with the finished tag.
    current_tag_start: Location,

    /// Current attribute name.
    current_attr_name: String,

    /// Current attribute value.
    current_attr_value: StrTendril,

    /// Current comment.
    current_comment: StrTendril,

    /// Current doctype token.
    current_doctype: Doctype,

    /// Last start tag name, for use in checking "appropriate end tag".
    last_start_tag_name: Option<LocalName>,

    /// The "temporary buffer" mentioned in the spec.
    temp_buf: StrTendril,
}

impl<Sink: TokenSink> Tokenizer<Sink> {
    /// Create a new tokenizer which feeds tokens to a particular `TokenSink`.
    pub fn new(sink: Sink, mut opts: TokenizerOpts) -> Tokenizer<Sink> {
        let start_tag_name = opts.last_start_tag_name.take();
        let state = opts.initial_state.unwrap_or(states::Data);
        Tokenizer {
            sink,
            input: InputStream::new(),
            state,
            at_eof: false,
            char_ref_tokenizer: None,
            current_char: '\0',
            reconsume: false,
            discard_bom: opts.discard_bom,
            current_tag_kind: StartTag,
            current_tag_name: String::new(),
            current_tag_self_closing: false,
            current_tag_attrs: vec![],
            current_tag_start: Location::default(),
            current_attr_name: String::new(),
            current_attr_value: StrTendril::new(),
            current_comment: StrTendril::new(),
            current_doctype: Doctype::default(),
            last_start_tag_name: start_tag_name,
            temp_buf: StrTendril::new(),
        }
    }

    /// Feed a chunk of input into the tokenizer, running the machine as far
    /// as it will go.
    pub fn feed(&mut self, chunk: StrTendril) {
        self.input.push_back(chunk);

        if self.discard_bom {
            match self.input.peek() {
                Some('\u{feff}') => {
                    self.input.next();
                    self.discard_bom = false;
                }
                Some(_) => self.discard_bom = false,
                None => return,
            }
        }

        self.run();
    }

    /// Set the tokenizer state directly. Used by fragment parsing.
    pub fn set_state(&mut self, state: states::State) {
        self.state = state;
    }

    /// Location of the most recently consumed scalar.
    pub fn location(&self) -> Location {
        self.input.location()
    }

    fn process_token(&mut self, token: Token) -> TokenSinkResult {
        let at = match token {
            TagToken(_) => self.current_tag_start,
            _ => self.input.location(),
        };
        self.sink.process_token(token, at)
    }

    fn process_token_and_continue(&mut self, token: Token) {
        assert!(matches!(self.process_token(token), TokenSinkResult::Continue));
    }

    //§ tokenization
    // Get the next input scalar, which might be the scalar `current_char`
    // that we already consumed.
    fn get_char(&mut self) -> Option<char> {
        if self.reconsume {
            self.reconsume = false;
            Some(self.current_char)
        } else {
            let c = self.input.next()?;
            trace!("got character {c:?}");
            self.current_char = c;
            Some(c)
        }
    }

    fn peek_input(&mut self) -> Option<char> {
        if self.reconsume {
            Some(self.current_char)
        } else {
            self.input.peek()
        }
    }

    fn consume_input(&mut self) -> Option<(char, Location)> {
        let c = self.get_char()?;
        Some((c, self.input.location()))
    }

    fn unconsume_input(&mut self, marks: Vec<(char, Location)>) {
        self.input.unconsume(marks);
    }

    // Check if the next scalars are a case-(in)sensitive match for `pat`,
    // consuming them if so. None means more input is needed to decide.
    fn eat(&mut self, pat: &str, ignore_case: bool) -> Option<bool> {
        if self.reconsume {
            // Return the pending scalar to the stream so lookahead sees it.
            self.reconsume = false;
            let loc = self.input.location();
            let c = self.current_char;
            self.input.unconsume(vec![(c, loc)]);
        }
        self.input.eat(pat, ignore_case)
    }

    /// Run the state machine for as long as we can.
    fn run(&mut self) {
        loop {
            match self.step() {
                ProcessResult::Continue => (),
                ProcessResult::Suspend => break,
            }
        }
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<Cow<'static, str>>) {
        let err = ParseError::new(code, self.input.location(), message.into());
        self.sink.parse_error(err);
    }

    fn bad_char(&mut self, code: ErrorCode) {
        let c = self.current_char;
        let state = self.state;
        self.emit_error(code, format!("Saw {c:?} in state {state:?}"));
    }

    fn bad_eof(&mut self, code: ErrorCode) {
        let state = self.state;
        self.emit_error(code, format!("Saw EOF in state {state:?}"));
    }

    fn emit_char(&mut self, c: char) {
        self.process_token_and_continue(CharacterToken(c));
    }

    fn emit_temp_buf(&mut self) {
        let buf = mem::take(&mut self.temp_buf);
        for c in buf.chars() {
            self.emit_char(c);
        }
    }

    fn clear_temp_buf(&mut self) {
        self.temp_buf.clear();
    }

    fn emit_current_tag(&mut self) -> ProcessResult {
        self.finish_attribute();

        let name = mem::take(&mut self.current_tag_name);

        match self.current_tag_kind {
            StartTag => {
                self.last_start_tag_name = Some(name.clone());
            }
            EndTag => {
                if !self.current_tag_attrs.is_empty() {
                    self.emit_error(ErrorCode::EndTagWithAttributes, "Attributes on an end tag");
                }
                if self.current_tag_self_closing {
                    self.emit_error(
                        ErrorCode::EndTagWithTrailingSolidus,
                        "Self-closing flag on an end tag",
                    );
                }
            }
        }

        let token = TagToken(Tag {
            kind: self.current_tag_kind,
            name,
            self_closing: self.current_tag_self_closing,
            attrs: mem::take(&mut self.current_tag_attrs),
        });

        match self.process_token(token) {
            TokenSinkResult::Continue => ProcessResult::Continue,
            TokenSinkResult::Plaintext => {
                self.state = states::Plaintext;
                ProcessResult::Continue
            }
            TokenSinkResult::RawData(kind) => {
                self.state = states::RawData(kind);
                ProcessResult::Continue
            }
        }
    }

    fn emit_current_comment(&mut self) {
        let comment = mem::take(&mut self.current_comment);
        self.process_token_and_continue(CommentToken(comment));
    }

    fn emit_current_doctype(&mut self) {
        let doctype = mem::take(&mut self.current_doctype);
        self.process_token_and_continue(DoctypeToken(doctype));
    }

    fn emit_eof(&mut self) {
        self.process_token_and_continue(EOFToken);
    }

    fn discard_tag(&mut self) {
        self.current_tag_name.clear();
        self.current_tag_self_closing = false;
        self.current_tag_attrs = vec![];
    }

    fn create_tag(&mut self, kind: TagKind, c: char) {
        self.discard_tag();
        self.current_tag_name.push(c);
        self.current_tag_kind = kind;
        self.current_tag_start = self.input.location();
    }

    fn have_appropriate_end_tag(&self) -> bool {
        match self.last_start_tag_name {
            Some(ref last) => self.current_tag_kind == EndTag && self.current_tag_name == *last,
            None => false,
        }
    }

    fn create_attribute(&mut self, c: char) {
        self.finish_attribute();
        self.current_attr_name.push(c);
    }

    fn finish_attribute(&mut self) {
        if self.current_attr_name.is_empty() {
            return;
        }

        // A name already present on the tag keeps its first value; the
        // duplicate is dropped, not replaced.
        let dup = {
            let name = &self.current_attr_name;
            self.current_tag_attrs.iter().any(|a| a.name.local == *name)
        };

        if dup {
            self.emit_error(ErrorCode::DuplicateAttribute, "Duplicate attribute");
            self.current_attr_name.clear();
            self.current_attr_value.clear();
        } else {
            let name = mem::take(&mut self.current_attr_name);
            self.current_tag_attrs.push(Attribute {
                // The tree builder will assign a namespace if necessary.
                // That only happens in foreign elements.
                name: QualName::attribute(name),
                value: mem::take(&mut self.current_attr_value),
            });
        }
    }

    fn doctype_id(&mut self, kind: DoctypeIdKind) -> &mut Option<StrTendril> {
        match kind {
            Public => &mut self.current_doctype.public_id,
            System => &mut self.current_doctype.system_id,
        }
    }

    fn clear_doctype_id(&mut self, kind: DoctypeIdKind) {
        let id = self.doctype_id(kind);
        match *id {
            Some(ref mut s) => s.clear(),
            None => *id = Some(StrTendril::new()),
        }
    }

    fn consume_char_ref(&mut self) {
        self.char_ref_tokenizer = Some(Box::new(CharRefTokenizer::new(
            self.state.in_attribute_value(),
        )));
    }
}

// Shorthand for common state machine behaviors.
macro_rules! shorthand (
    ( $me:ident : create_tag $kind:ident $c:expr   ) => ( $me.create_tag($kind, $c)                      );
    ( $me:ident : push_tag $c:expr                 ) => ( $me.current_tag_name.push($c)                  );
    ( $me:ident : discard_tag                      ) => ( $me.discard_tag()                              );
    ( $me:ident : push_temp $c:expr                ) => ( $me.temp_buf.push_char($c)                     );
    ( $me:ident : clear_temp                       ) => ( $me.clear_temp_buf()                           );
    ( $me:ident : create_attr $c:expr              ) => ( $me.create_attribute($c)                       );
    ( $me:ident : push_name $c:expr                ) => ( $me.current_attr_name.push($c)                 );
    ( $me:ident : push_value $c:expr               ) => ( $me.current_attr_value.push_char($c)           );
    ( $me:ident : push_comment $c:expr             ) => ( $me.current_comment.push_char($c)              );
    ( $me:ident : append_comment $c:expr           ) => ( $me.current_comment.push_slice($c)             );
    ( $me:ident : emit_comment                     ) => ( $me.emit_current_comment()                     );
    ( $me:ident : clear_comment                    ) => ( $me.current_comment.clear()                    );
    ( $me:ident : create_doctype                   ) => ( $me.current_doctype = Doctype::default()       );
    ( $me:ident : push_doctype_name $c:expr        ) => ( option_push(&mut $me.current_doctype.name, $c) );
    ( $me:ident : push_doctype_id $k:ident $c:expr ) => ( option_push($me.doctype_id($k), $c)            );
    ( $me:ident : clear_doctype_id $k:ident        ) => ( $me.clear_doctype_id($k)                       );
    ( $me:ident : force_quirks                     ) => ( $me.current_doctype.force_quirks = true        );
    ( $me:ident : emit_doctype                     ) => ( $me.emit_current_doctype()                     );
    ( $me:ident : error $code:ident                ) => ( $me.bad_char(ErrorCode::$code)                 );
    ( $me:ident : error_eof $code:ident            ) => ( $me.bad_eof(ErrorCode::$code)                  );
);

// A little DSL for sequencing shorthand actions.
macro_rules! go (
    // A pattern like $($cmd:tt)* ; $($rest:tt)* causes parse ambiguity.
    // We have to tell the parser how much lookahead we need.

    ( $me:ident : $a:tt                   ; $($rest:tt)* ) => ({ shorthand!($me: $a);          go!($me: $($rest)*); });
    ( $me:ident : $a:tt $b:tt             ; $($rest:tt)* ) => ({ shorthand!($me: $a $b);       go!($me: $($rest)*); });
    ( $me:ident : $a:tt $b:tt $c:tt       ; $($rest:tt)* ) => ({ shorthand!($me: $a $b $c);    go!($me: $($rest)*); });
    ( $me:ident : $a:tt $b:tt $c:tt $d:tt ; $($rest:tt)* ) => ({ shorthand!($me: $a $b $c $d); go!($me: $($rest)*); });

    // These can only come at the end.

    ( $me:ident : to $s:ident                    ) => ({ $me.state = states::$s; return ProcessResult::Continue;           });
    ( $me:ident : to $s:ident $k1:expr           ) => ({ $me.state = states::$s($k1); return ProcessResult::Continue;      });
    ( $me:ident : to $s:ident $k1:ident $k2:expr ) => ({ $me.state = states::$s($k1($k2)); return ProcessResult::Continue; });

    ( $me:ident : reconsume $s:ident                    ) => ({ $me.reconsume = true; go!($me: to $s);         });
    ( $me:ident : reconsume $s:ident $k1:expr           ) => ({ $me.reconsume = true; go!($me: to $s $k1);     });
    ( $me:ident : reconsume $s:ident $k1:ident $k2:expr ) => ({ $me.reconsume = true; go!($me: to $s $k1 $k2); });

    ( $me:ident : consume_char_ref ) => ({ $me.consume_char_ref(); return ProcessResult::Continue; });

    // We have a default next state after emitting a tag, but the sink can override.
    ( $me:ident : emit_tag $s:ident ) => ({
        $me.state = states::$s;
        return $me.emit_current_tag();
    });

    ( $me:ident : eof ) => ({ $me.emit_eof(); return ProcessResult::Suspend; });

    // If nothing else matched, it's a single command
    ( $me:ident : $($cmd:tt)+ ) => ( shorthand!($me: $($cmd)+) );

    // or nothing.
    ( $me:ident : ) => (());
);

// These macros can cause early return from the function where they are used.
macro_rules! get_char ( ($me:expr) => (
    unwrap_or_return!($me.get_char(), ProcessResult::Suspend)
));

macro_rules! peek ( ($me:expr) => (
    unwrap_or_return!($me.peek_input(), ProcessResult::Suspend)
));

macro_rules! eat ( ($me:expr, $pat:expr) => (
    unwrap_or_return!($me.eat($pat, true), ProcessResult::Suspend)
));

macro_rules! eat_exact ( ($me:expr, $pat:expr) => (
    unwrap_or_return!($me.eat($pat, false), ProcessResult::Suspend)
));

impl<Sink: TokenSink> Tokenizer<Sink> {
    // Run the state machine for one step.
    #[allow(clippy::never_loop)]
    fn step(&mut self) -> ProcessResult {
        if self.char_ref_tokenizer.is_some() {
            return self.step_char_ref_tokenizer();
        }

        trace!("processing in state {:?}", self.state);
        match self.state {
            //§ data-state
            states::Data => loop {
                match get_char!(self) {
                    '&' => go!(self: consume_char_ref),
                    '<' => go!(self: to TagOpen),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\0');
                    }
                    c => self.emit_char(c),
                }
            },

            //§ rcdata-state
            states::RawData(Rcdata) => loop {
                match get_char!(self) {
                    '&' => go!(self: consume_char_ref),
                    '<' => go!(self: to RawLessThanSign Rcdata),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\u{fffd}');
                    }
                    c => self.emit_char(c),
                }
            },

            //§ rawtext-state
            states::RawData(Rawtext) => loop {
                match get_char!(self) {
                    '<' => go!(self: to RawLessThanSign Rawtext),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\u{fffd}');
                    }
                    c => self.emit_char(c),
                }
            },

            //§ script-data-state
            states::RawData(ScriptData) => loop {
                match get_char!(self) {
                    '<' => go!(self: to RawLessThanSign ScriptData),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\u{fffd}');
                    }
                    c => self.emit_char(c),
                }
            },

            //§ script-data-escaped-state script-data-double-escaped-state
            states::RawData(ScriptDataEscaped(kind)) => loop {
                match get_char!(self) {
                    '-' => {
                        self.emit_char('-');
                        go!(self: to ScriptDataEscapedDash kind);
                    }
                    '<' => {
                        if kind == DoubleEscaped {
                            self.emit_char('<');
                        }
                        go!(self: to RawLessThanSign ScriptDataEscaped kind);
                    }
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\u{fffd}');
                    }
                    c => self.emit_char(c),
                }
            },

            //§ plaintext-state
            states::Plaintext => loop {
                match get_char!(self) {
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\u{fffd}');
                    }
                    c => self.emit_char(c),
                }
            },

            //§ tag-open-state
            states::TagOpen => loop {
                match get_char!(self) {
                    '!' => go!(self: to MarkupDeclarationOpen),
                    '/' => go!(self: to EndTagOpen),
                    '?' => {
                        go!(self: error UnexpectedQuestionMarkInsteadOfTagName);
                        go!(self: clear_comment; reconsume BogusComment)
                    }
                    c => match lower_ascii_letter(c) {
                        Some(cl) => go!(self: create_tag StartTag cl; to TagName),
                        None => {
                            go!(self: error InvalidFirstCharacterOfTagName);
                            self.emit_char('<');
                            go!(self: reconsume Data)
                        }
                    },
                }
            },

            //§ end-tag-open-state
            states::EndTagOpen => loop {
                match get_char!(self) {
                    '>' => {
                        go!(self: error MissingEndTagName);
                        go!(self: to Data)
                    }
                    c => match lower_ascii_letter(c) {
                        Some(cl) => go!(self: create_tag EndTag cl; to TagName),
                        None => {
                            go!(self: error InvalidFirstCharacterOfTagName);
                            go!(self: clear_comment; reconsume BogusComment)
                        }
                    },
                }
            },

            //§ tag-name-state
            states::TagName => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => go!(self: to BeforeAttributeName),
                    '/' => go!(self: to SelfClosingStartTag),
                    '>' => go!(self: emit_tag Data),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_tag '\u{fffd}')
                    }
                    c => go!(self: push_tag (c.to_ascii_lowercase())),
                }
            },

            //§ script-data-escaped-less-than-sign-state
            states::RawLessThanSign(ScriptDataEscaped(Escaped)) => loop {
                match get_char!(self) {
                    '/' => go!(self: clear_temp; to RawEndTagOpen ScriptDataEscaped Escaped),
                    c => match lower_ascii_letter(c) {
                        Some(cl) => {
                            go!(self: clear_temp; push_temp cl);
                            self.emit_char('<');
                            self.emit_char(c);
                            go!(self: to ScriptDataEscapeStart DoubleEscaped);
                        }
                        None => {
                            self.emit_char('<');
                            go!(self: reconsume RawData ScriptDataEscaped Escaped);
                        }
                    },
                }
            },

            //§ script-data-double-escaped-less-than-sign-state
            states::RawLessThanSign(ScriptDataEscaped(DoubleEscaped)) => loop {
                match get_char!(self) {
                    '/' => {
                        go!(self: clear_temp);
                        self.emit_char('/');
                        go!(self: to ScriptDataDoubleEscapeEnd);
                    }
                    _ => go!(self: reconsume RawData ScriptDataEscaped DoubleEscaped),
                }
            },

            //§ rcdata-less-than-sign-state rawtext-less-than-sign-state script-data-less-than-sign-state
            states::RawLessThanSign(kind) => loop {
                match get_char!(self) {
                    '/' => go!(self: clear_temp; to RawEndTagOpen kind),
                    '!' if kind == ScriptData => {
                        self.emit_char('<');
                        self.emit_char('!');
                        go!(self: to ScriptDataEscapeStart Escaped);
                    }
                    _ => {
                        self.emit_char('<');
                        go!(self: reconsume RawData kind);
                    }
                }
            },

            //§ rcdata-end-tag-open-state rawtext-end-tag-open-state script-data-end-tag-open-state script-data-escaped-end-tag-open-state
            states::RawEndTagOpen(kind) => loop {
                let c = get_char!(self);
                match lower_ascii_letter(c) {
                    Some(cl) => go!(self: create_tag EndTag cl; push_temp c; to RawEndTagName kind),
                    None => {
                        self.emit_char('<');
                        self.emit_char('/');
                        go!(self: reconsume RawData kind);
                    }
                }
            },

            //§ rcdata-end-tag-name-state rawtext-end-tag-name-state script-data-end-tag-name-state script-data-escaped-end-tag-name-state
            states::RawEndTagName(kind) => loop {
                let c = get_char!(self);
                if self.have_appropriate_end_tag() {
                    match c {
                        '\t' | '\n' | '\x0C' | ' ' => go!(self: clear_temp; to BeforeAttributeName),
                        '/' => go!(self: clear_temp; to SelfClosingStartTag),
                        '>' => go!(self: clear_temp; emit_tag Data),
                        _ => (),
                    }
                }

                match lower_ascii_letter(c) {
                    Some(cl) => go!(self: push_tag cl; push_temp c),
                    None => {
                        go!(self: discard_tag);
                        self.emit_char('<');
                        self.emit_char('/');
                        self.emit_temp_buf();
                        go!(self: reconsume RawData kind);
                    }
                }
            },

            //§ script-data-double-escape-start-state
            states::ScriptDataEscapeStart(DoubleEscaped) => loop {
                let c = get_char!(self);
                match c {
                    '\t' | '\n' | '\x0C' | ' ' | '/' | '>' => {
                        let esc = if &*self.temp_buf == "script" {
                            DoubleEscaped
                        } else {
                            Escaped
                        };
                        self.emit_char(c);
                        go!(self: to RawData ScriptDataEscaped esc);
                    }
                    _ => match lower_ascii_letter(c) {
                        Some(cl) => {
                            go!(self: push_temp cl);
                            self.emit_char(c);
                        }
                        None => go!(self: reconsume RawData ScriptDataEscaped Escaped),
                    },
                }
            },

            //§ script-data-escape-start-state
            states::ScriptDataEscapeStart(Escaped) => loop {
                match get_char!(self) {
                    '-' => {
                        self.emit_char('-');
                        go!(self: to ScriptDataEscapeStartDash);
                    }
                    _ => go!(self: reconsume RawData ScriptData),
                }
            },

            //§ script-data-escape-start-dash-state
            states::ScriptDataEscapeStartDash => loop {
                match get_char!(self) {
                    '-' => {
                        self.emit_char('-');
                        go!(self: to ScriptDataEscapedDashDash Escaped);
                    }
                    _ => go!(self: reconsume RawData ScriptData),
                }
            },

            //§ script-data-escaped-dash-state script-data-double-escaped-dash-state
            states::ScriptDataEscapedDash(kind) => loop {
                match get_char!(self) {
                    '-' => {
                        self.emit_char('-');
                        go!(self: to ScriptDataEscapedDashDash kind);
                    }
                    '<' => {
                        if kind == DoubleEscaped {
                            self.emit_char('<');
                        }
                        go!(self: to RawLessThanSign ScriptDataEscaped kind);
                    }
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\u{fffd}');
                        go!(self: to RawData ScriptDataEscaped kind)
                    }
                    c => {
                        self.emit_char(c);
                        go!(self: to RawData ScriptDataEscaped kind);
                    }
                }
            },

            //§ script-data-escaped-dash-dash-state script-data-double-escaped-dash-dash-state
            states::ScriptDataEscapedDashDash(kind) => loop {
                match get_char!(self) {
                    '-' => {
                        self.emit_char('-');
                    }
                    '<' => {
                        if kind == DoubleEscaped {
                            self.emit_char('<');
                        }
                        go!(self: to RawLessThanSign ScriptDataEscaped kind);
                    }
                    '>' => {
                        self.emit_char('>');
                        go!(self: to RawData ScriptData);
                    }
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        self.emit_char('\u{fffd}');
                        go!(self: to RawData ScriptDataEscaped kind)
                    }
                    c => {
                        self.emit_char(c);
                        go!(self: to RawData ScriptDataEscaped kind);
                    }
                }
            },

            //§ script-data-double-escape-end-state
            states::ScriptDataDoubleEscapeEnd => loop {
                let c = get_char!(self);
                match c {
                    '\t' | '\n' | '\x0C' | ' ' | '/' | '>' => {
                        let esc = if &*self.temp_buf == "script" {
                            Escaped
                        } else {
                            DoubleEscaped
                        };
                        self.emit_char(c);
                        go!(self: to RawData ScriptDataEscaped esc);
                    }
                    _ => match lower_ascii_letter(c) {
                        Some(cl) => {
                            go!(self: push_temp cl);
                            self.emit_char(c);
                        }
                        None => go!(self: reconsume RawData ScriptDataEscaped DoubleEscaped),
                    },
                }
            },

            //§ before-attribute-name-state
            states::BeforeAttributeName => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => (),
                    '/' => go!(self: to SelfClosingStartTag),
                    '>' => go!(self: emit_tag Data),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: create_attr '\u{fffd}'; to AttributeName)
                    }
                    c => match lower_ascii_letter(c) {
                        Some(cl) => go!(self: create_attr cl; to AttributeName),
                        None => {
                            if c == '=' {
                                go!(self: error UnexpectedEqualsSignBeforeAttributeName);
                            } else if matches!(c, '"' | '\'' | '<') {
                                go!(self: error UnexpectedCharacterInAttributeName);
                            }
                            go!(self: create_attr c; to AttributeName);
                        }
                    },
                }
            },

            //§ attribute-name-state
            states::AttributeName => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => go!(self: to AfterAttributeName),
                    '/' => go!(self: to SelfClosingStartTag),
                    '=' => go!(self: to BeforeAttributeValue),
                    '>' => go!(self: emit_tag Data),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_name '\u{fffd}')
                    }
                    c => match lower_ascii_letter(c) {
                        Some(cl) => go!(self: push_name cl),
                        None => {
                            if matches!(c, '"' | '\'' | '<') {
                                go!(self: error UnexpectedCharacterInAttributeName);
                            }
                            go!(self: push_name c);
                        }
                    },
                }
            },

            //§ after-attribute-name-state
            states::AfterAttributeName => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => (),
                    '/' => go!(self: to SelfClosingStartTag),
                    '=' => go!(self: to BeforeAttributeValue),
                    '>' => go!(self: emit_tag Data),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: create_attr '\u{fffd}'; to AttributeName)
                    }
                    c => match lower_ascii_letter(c) {
                        Some(cl) => go!(self: create_attr cl; to AttributeName),
                        None => {
                            if matches!(c, '"' | '\'' | '<') {
                                go!(self: error UnexpectedCharacterInAttributeName);
                            }
                            go!(self: create_attr c; to AttributeName);
                        }
                    },
                }
            },

            //§ before-attribute-value-state
            // Peek so the first value scalar can be handled uniformly below.
            states::BeforeAttributeValue => loop {
                match peek!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => {
                        let _ = self.get_char();
                    }
                    '"' => {
                        let _ = self.get_char();
                        go!(self: to AttributeValue DoubleQuoted);
                    }
                    '\'' => {
                        let _ = self.get_char();
                        go!(self: to AttributeValue SingleQuoted);
                    }
                    '>' => {
                        let _ = self.get_char();
                        go!(self: error MissingAttributeValue);
                        go!(self: emit_tag Data)
                    }
                    _ => go!(self: to AttributeValue Unquoted),
                }
            },

            //§ attribute-value-(double-quoted)-state
            states::AttributeValue(DoubleQuoted) => loop {
                match get_char!(self) {
                    '"' => go!(self: to AfterAttributeValueQuoted),
                    '&' => go!(self: consume_char_ref),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_value '\u{fffd}')
                    }
                    c => go!(self: push_value c),
                }
            },

            //§ attribute-value-(single-quoted)-state
            states::AttributeValue(SingleQuoted) => loop {
                match get_char!(self) {
                    '\'' => go!(self: to AfterAttributeValueQuoted),
                    '&' => go!(self: consume_char_ref),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_value '\u{fffd}')
                    }
                    c => go!(self: push_value c),
                }
            },

            //§ attribute-value-(unquoted)-state
            states::AttributeValue(Unquoted) => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => go!(self: to BeforeAttributeName),
                    '&' => go!(self: consume_char_ref),
                    '>' => go!(self: emit_tag Data),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_value '\u{fffd}')
                    }
                    c => {
                        if matches!(c, '"' | '\'' | '<' | '=' | '`') {
                            go!(self: error UnexpectedCharacterInUnquotedAttributeValue);
                        }
                        go!(self: push_value c);
                    }
                }
            },

            //§ after-attribute-value-(quoted)-state
            states::AfterAttributeValueQuoted => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => go!(self: to BeforeAttributeName),
                    '/' => go!(self: to SelfClosingStartTag),
                    '>' => go!(self: emit_tag Data),
                    _ => {
                        go!(self: error MissingWhitespaceBetweenAttributes);
                        go!(self: reconsume BeforeAttributeName)
                    }
                }
            },

            //§ self-closing-start-tag-state
            states::SelfClosingStartTag => loop {
                match get_char!(self) {
                    '>' => {
                        self.current_tag_self_closing = true;
                        go!(self: emit_tag Data);
                    }
                    _ => {
                        go!(self: error UnexpectedSolidusInTag);
                        go!(self: reconsume BeforeAttributeName)
                    }
                }
            },

            //§ comment-start-state
            states::CommentStart => loop {
                match get_char!(self) {
                    '-' => go!(self: to CommentStartDash),
                    '>' => {
                        go!(self: error AbruptClosingOfEmptyComment);
                        go!(self: emit_comment; to Data)
                    }
                    _ => go!(self: reconsume Comment),
                }
            },

            //§ comment-start-dash-state
            states::CommentStartDash => loop {
                match get_char!(self) {
                    '-' => go!(self: to CommentEnd),
                    '>' => {
                        go!(self: error AbruptClosingOfEmptyComment);
                        go!(self: emit_comment; to Data)
                    }
                    _ => go!(self: push_comment '-'; reconsume Comment),
                }
            },

            //§ comment-state
            states::Comment => loop {
                match get_char!(self) {
                    c @ '<' => go!(self: push_comment c; to CommentLessThanSign),
                    '-' => go!(self: to CommentEndDash),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_comment '\u{fffd}')
                    }
                    c => go!(self: push_comment c),
                }
            },

            //§ comment-less-than-sign-state
            states::CommentLessThanSign => loop {
                match get_char!(self) {
                    c @ '!' => go!(self: push_comment c; to CommentLessThanSignBang),
                    c @ '<' => go!(self: push_comment c),
                    _ => go!(self: reconsume Comment),
                }
            },

            //§ comment-less-than-sign-bang-state
            states::CommentLessThanSignBang => loop {
                match get_char!(self) {
                    '-' => go!(self: to CommentLessThanSignBangDash),
                    _ => go!(self: reconsume Comment),
                }
            },

            //§ comment-less-than-sign-bang-dash-state
            states::CommentLessThanSignBangDash => loop {
                match get_char!(self) {
                    '-' => go!(self: to CommentLessThanSignBangDashDash),
                    _ => go!(self: reconsume CommentEndDash),
                }
            },

            //§ comment-less-than-sign-bang-dash-dash-state
            states::CommentLessThanSignBangDashDash => loop {
                match get_char!(self) {
                    '>' => go!(self: reconsume CommentEnd),
                    _ => {
                        go!(self: error NestedComment);
                        go!(self: reconsume CommentEnd)
                    }
                }
            },

            //§ comment-end-dash-state
            states::CommentEndDash => loop {
                match get_char!(self) {
                    '-' => go!(self: to CommentEnd),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: append_comment "-\u{fffd}"; to Comment)
                    }
                    _ => go!(self: push_comment '-'; reconsume Comment),
                }
            },

            //§ comment-end-state
            states::CommentEnd => loop {
                match get_char!(self) {
                    '>' => go!(self: emit_comment; to Data),
                    '!' => go!(self: to CommentEndBang),
                    '-' => go!(self: push_comment '-'),
                    _ => go!(self: append_comment "--"; reconsume Comment),
                }
            },

            //§ comment-end-bang-state
            states::CommentEndBang => loop {
                match get_char!(self) {
                    '-' => go!(self: append_comment "--!"; to CommentEndDash),
                    '>' => {
                        go!(self: error IncorrectlyClosedComment);
                        go!(self: emit_comment; to Data)
                    }
                    _ => go!(self: append_comment "--!"; reconsume Comment),
                }
            },

            //§ doctype-state
            states::Doctype => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => go!(self: to BeforeDoctypeName),
                    '>' => go!(self: reconsume BeforeDoctypeName),
                    _ => {
                        go!(self: error MissingWhitespaceBeforeDoctypeName);
                        go!(self: reconsume BeforeDoctypeName)
                    }
                }
            },

            //§ before-doctype-name-state
            states::BeforeDoctypeName => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => (),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: create_doctype; push_doctype_name '\u{fffd}'; to DoctypeName)
                    }
                    '>' => {
                        go!(self: error MissingDoctypeName);
                        go!(self: create_doctype; force_quirks; emit_doctype; to Data)
                    }
                    c => go!(self: create_doctype; push_doctype_name (c.to_ascii_lowercase());
                                  to DoctypeName),
                }
            },

            //§ doctype-name-state
            states::DoctypeName => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => go!(self: clear_temp; to AfterDoctypeName),
                    '>' => go!(self: emit_doctype; to Data),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_doctype_name '\u{fffd}')
                    }
                    c => go!(self: push_doctype_name (c.to_ascii_lowercase())),
                }
            },

            //§ after-doctype-name-state
            states::AfterDoctypeName => loop {
                if eat!(self, "public") {
                    go!(self: to AfterDoctypeKeyword Public);
                } else if eat!(self, "system") {
                    go!(self: to AfterDoctypeKeyword System);
                } else {
                    match get_char!(self) {
                        '\t' | '\n' | '\x0C' | ' ' => (),
                        '>' => go!(self: emit_doctype; to Data),
                        _ => {
                            go!(self: error InvalidCharacterSequenceAfterDoctypeName);
                            go!(self: force_quirks; reconsume BogusDoctype)
                        }
                    }
                }
            },

            //§ after-doctype-public-keyword-state after-doctype-system-keyword-state
            states::AfterDoctypeKeyword(kind) => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => go!(self: to BeforeDoctypeIdentifier kind),
                    '"' => {
                        self.bad_char(match kind {
                            Public => ErrorCode::MissingWhitespaceAfterDoctypePublicKeyword,
                            System => ErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword,
                        });
                        go!(self: clear_doctype_id kind; to DoctypeIdentifierDoubleQuoted kind)
                    }
                    '\'' => {
                        self.bad_char(match kind {
                            Public => ErrorCode::MissingWhitespaceAfterDoctypePublicKeyword,
                            System => ErrorCode::MissingWhitespaceAfterDoctypeSystemKeyword,
                        });
                        go!(self: clear_doctype_id kind; to DoctypeIdentifierSingleQuoted kind)
                    }
                    '>' => {
                        self.bad_char(match kind {
                            Public => ErrorCode::MissingDoctypePublicIdentifier,
                            System => ErrorCode::MissingDoctypeSystemIdentifier,
                        });
                        go!(self: force_quirks; emit_doctype; to Data)
                    }
                    _ => {
                        self.bad_char(match kind {
                            Public => ErrorCode::MissingQuoteBeforeDoctypePublicIdentifier,
                            System => ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier,
                        });
                        go!(self: force_quirks; reconsume BogusDoctype)
                    }
                }
            },

            //§ before-doctype-public-identifier-state before-doctype-system-identifier-state
            states::BeforeDoctypeIdentifier(kind) => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => (),
                    '"' => go!(self: clear_doctype_id kind; to DoctypeIdentifierDoubleQuoted kind),
                    '\'' => go!(self: clear_doctype_id kind; to DoctypeIdentifierSingleQuoted kind),
                    '>' => {
                        self.bad_char(match kind {
                            Public => ErrorCode::MissingDoctypePublicIdentifier,
                            System => ErrorCode::MissingDoctypeSystemIdentifier,
                        });
                        go!(self: force_quirks; emit_doctype; to Data)
                    }
                    _ => {
                        self.bad_char(match kind {
                            Public => ErrorCode::MissingQuoteBeforeDoctypePublicIdentifier,
                            System => ErrorCode::MissingQuoteBeforeDoctypeSystemIdentifier,
                        });
                        go!(self: force_quirks; reconsume BogusDoctype)
                    }
                }
            },

            //§ doctype-public-identifier-(double-quoted)-state doctype-system-identifier-(double-quoted)-state
            states::DoctypeIdentifierDoubleQuoted(kind) => loop {
                match get_char!(self) {
                    '"' => go!(self: to AfterDoctypeIdentifier kind),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_doctype_id kind '\u{fffd}')
                    }
                    '>' => {
                        self.bad_char(match kind {
                            Public => ErrorCode::AbruptDoctypePublicIdentifier,
                            System => ErrorCode::AbruptDoctypeSystemIdentifier,
                        });
                        go!(self: force_quirks; emit_doctype; to Data)
                    }
                    c => go!(self: push_doctype_id kind c),
                }
            },

            //§ doctype-public-identifier-(single-quoted)-state doctype-system-identifier-(single-quoted)-state
            states::DoctypeIdentifierSingleQuoted(kind) => loop {
                match get_char!(self) {
                    '\'' => go!(self: to AfterDoctypeIdentifier kind),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_doctype_id kind '\u{fffd}')
                    }
                    '>' => {
                        self.bad_char(match kind {
                            Public => ErrorCode::AbruptDoctypePublicIdentifier,
                            System => ErrorCode::AbruptDoctypeSystemIdentifier,
                        });
                        go!(self: force_quirks; emit_doctype; to Data)
                    }
                    c => go!(self: push_doctype_id kind c),
                }
            },

            //§ after-doctype-public-identifier-state
            states::AfterDoctypeIdentifier(Public) => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => {
                        go!(self: to BetweenDoctypePublicAndSystemIdentifiers)
                    }
                    '>' => go!(self: emit_doctype; to Data),
                    '"' => {
                        go!(self: error MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers);
                        go!(self: clear_doctype_id System; to DoctypeIdentifierDoubleQuoted System)
                    }
                    '\'' => {
                        go!(self: error MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers);
                        go!(self: clear_doctype_id System; to DoctypeIdentifierSingleQuoted System)
                    }
                    _ => {
                        go!(self: error MissingQuoteBeforeDoctypeSystemIdentifier);
                        go!(self: force_quirks; reconsume BogusDoctype)
                    }
                }
            },

            //§ after-doctype-system-identifier-state
            states::AfterDoctypeIdentifier(System) => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => (),
                    '>' => go!(self: emit_doctype; to Data),
                    _ => {
                        go!(self: error UnexpectedCharacterAfterDoctypeSystemIdentifier);
                        go!(self: reconsume BogusDoctype)
                    }
                }
            },

            //§ between-doctype-public-and-system-identifiers-state
            states::BetweenDoctypePublicAndSystemIdentifiers => loop {
                match get_char!(self) {
                    '\t' | '\n' | '\x0C' | ' ' => (),
                    '>' => go!(self: emit_doctype; to Data),
                    '"' => {
                        go!(self: clear_doctype_id System; to DoctypeIdentifierDoubleQuoted System)
                    }
                    '\'' => {
                        go!(self: clear_doctype_id System; to DoctypeIdentifierSingleQuoted System)
                    }
                    _ => {
                        go!(self: error MissingQuoteBeforeDoctypeSystemIdentifier);
                        go!(self: force_quirks; reconsume BogusDoctype)
                    }
                }
            },

            //§ bogus-doctype-state
            states::BogusDoctype => loop {
                match get_char!(self) {
                    '>' => go!(self: emit_doctype; to Data),
                    '\0' => go!(self: error UnexpectedNullCharacter),
                    _ => (),
                }
            },

            //§ bogus-comment-state
            states::BogusComment => loop {
                match get_char!(self) {
                    '>' => go!(self: emit_comment; to Data),
                    '\0' => {
                        go!(self: error UnexpectedNullCharacter);
                        go!(self: push_comment '\u{fffd}')
                    }
                    c => go!(self: push_comment c),
                }
            },

            //§ markup-declaration-open-state
            states::MarkupDeclarationOpen => loop {
                if eat_exact!(self, "--") {
                    go!(self: clear_comment; to CommentStart);
                } else if eat!(self, "doctype") {
                    go!(self: to Doctype);
                } else {
                    if self
                        .sink
                        .adjusted_current_node_present_and_not_in_html_namespace()
                    {
                        if eat_exact!(self, "[CDATA[") {
                            go!(self: clear_temp; to CdataSection);
                        }
                    }
                    go!(self: error IncorrectlyOpenedComment);
                    go!(self: clear_comment; to BogusComment);
                }
            },

            //§ cdata-section-state
            states::CdataSection => loop {
                match get_char!(self) {
                    ']' => go!(self: to CdataSectionBracket),
                    c => self.emit_char(c),
                }
            },

            //§ cdata-section-bracket-state
            states::CdataSectionBracket => loop {
                match get_char!(self) {
                    ']' => go!(self: to CdataSectionEnd),
                    _ => {
                        self.emit_char(']');
                        go!(self: reconsume CdataSection);
                    }
                }
            },

            //§ cdata-section-end-state
            states::CdataSectionEnd => loop {
                match get_char!(self) {
                    ']' => self.emit_char(']'),
                    '>' => go!(self: to Data),
                    _ => {
                        self.emit_char(']');
                        self.emit_char(']');
                        go!(self: reconsume CdataSection);
                    }
                }
            },
            //§ END
        }
    }

    fn step_char_ref_tokenizer(&mut self) -> ProcessResult {
        // Take the sub-tokenizer out so it can borrow `self` mutably.
        let mut tok = self.char_ref_tokenizer.take().unwrap();
        let outcome = tok.step(self);

        let progress = match outcome {
            Status::Done(char_ref) => {
                self.process_char_ref(char_ref);
                return ProcessResult::Continue;
            }
            Status::Stuck => ProcessResult::Suspend,
            Status::Progress => ProcessResult::Continue,
        };

        self.char_ref_tokenizer = Some(tok);
        progress
    }

    fn process_char_ref(&mut self, char_ref: CharRef) {
        let CharRef {
            mut chars,
            mut num_chars,
        } = char_ref;

        if num_chars == 0 {
            chars[0] = '&';
            num_chars = 1;
        }

        for i in 0..num_chars {
            let c = chars[i as usize];
            match self.state {
                states::Data | states::RawData(states::Rcdata) => self.emit_char(c),

                states::AttributeValue(_) => self.current_attr_value.push_char(c),

                _ => panic!(
                    "state {:?} should not be reachable in process_char_ref",
                    self.state
                ),
            }
        }
    }

    /// Indicate that we have reached the end of the input.
    pub fn end(&mut self) {
        self.at_eof = true;
        self.input.notify_eof();

        // Handle EOF in the char ref sub-tokenizer, if there is one.
        // Do this first because it might un-consume stuff.
        if let Some(mut tok) = self.char_ref_tokenizer.take() {
            let char_ref = tok.end_of_file(self);
            self.process_char_ref(char_ref);
        }

        // Process all remaining buffered input.
        // If we're waiting for lookahead, we're not gonna get it.
        self.run();

        loop {
            match self.eof_step() {
                ProcessResult::Continue => (),
                ProcessResult::Suspend => break,
            }
        }

        self.sink.end();
    }

    fn eof_step(&mut self) -> ProcessResult {
        debug!("processing EOF in state {:?}", self.state);
        match self.state {
            states::Data
            | states::RawData(Rcdata)
            | states::RawData(Rawtext)
            | states::RawData(ScriptData)
            | states::Plaintext => go!(self: eof),

            states::TagName
            | states::BeforeAttributeName
            | states::AttributeName
            | states::AfterAttributeName
            | states::AttributeValue(_)
            | states::AfterAttributeValueQuoted
            | states::SelfClosingStartTag => {
                go!(self: error_eof EofInTag);
                go!(self: to Data)
            }

            states::RawData(ScriptDataEscaped(_))
            | states::ScriptDataEscapedDash(_)
            | states::ScriptDataEscapedDashDash(_) => {
                go!(self: error_eof EofInScriptHtmlCommentLikeText);
                go!(self: to Data)
            }

            states::BeforeAttributeValue => go!(self: reconsume AttributeValue Unquoted),

            states::TagOpen => {
                go!(self: error_eof EofBeforeTagName);
                self.emit_char('<');
                go!(self: to Data);
            }

            states::EndTagOpen => {
                go!(self: error_eof EofBeforeTagName);
                self.emit_char('<');
                self.emit_char('/');
                go!(self: to Data);
            }

            states::RawLessThanSign(ScriptDataEscaped(DoubleEscaped)) => {
                go!(self: to RawData ScriptDataEscaped DoubleEscaped)
            }

            states::RawLessThanSign(kind) => {
                self.emit_char('<');
                go!(self: to RawData kind);
            }

            states::RawEndTagOpen(kind) => {
                self.emit_char('<');
                self.emit_char('/');
                go!(self: to RawData kind);
            }

            states::RawEndTagName(kind) => {
                self.emit_char('<');
                self.emit_char('/');
                self.emit_temp_buf();
                go!(self: to RawData kind)
            }

            states::ScriptDataEscapeStart(kind) => go!(self: to RawData ScriptDataEscaped kind),

            states::ScriptDataEscapeStartDash => go!(self: to RawData ScriptData),

            states::ScriptDataDoubleEscapeEnd => {
                go!(self: to RawData ScriptDataEscaped DoubleEscaped)
            }

            states::CommentStart
            | states::CommentStartDash
            | states::Comment
            | states::CommentEndDash
            | states::CommentEnd
            | states::CommentEndBang => {
                go!(self: error_eof EofInComment);
                go!(self: emit_comment; to Data)
            }

            states::CommentLessThanSign | states::CommentLessThanSignBang => {
                go!(self: reconsume Comment)
            }

            states::CommentLessThanSignBangDash => go!(self: reconsume CommentEndDash),

            states::CommentLessThanSignBangDashDash => go!(self: reconsume CommentEnd),

            states::Doctype | states::BeforeDoctypeName => {
                go!(self: error_eof EofInDoctype);
                go!(self: create_doctype; force_quirks; emit_doctype; to Data)
            }

            states::DoctypeName
            | states::AfterDoctypeName
            | states::AfterDoctypeKeyword(_)
            | states::BeforeDoctypeIdentifier(_)
            | states::DoctypeIdentifierDoubleQuoted(_)
            | states::DoctypeIdentifierSingleQuoted(_)
            | states::AfterDoctypeIdentifier(_)
            | states::BetweenDoctypePublicAndSystemIdentifiers => {
                go!(self: error_eof EofInDoctype);
                go!(self: force_quirks; emit_doctype; to Data)
            }

            states::BogusDoctype => go!(self: emit_doctype; to Data),

            states::BogusComment => go!(self: emit_comment; to Data),

            states::MarkupDeclarationOpen => {
                go!(self: error_eof IncorrectlyOpenedComment);
                go!(self: to BogusComment)
            }

            states::CdataSection => {
                go!(self: error_eof EofInCdata);
                go!(self: to Data)
            }

            states::CdataSectionBracket => {
                self.emit_char(']');
                go!(self: to CdataSection)
            }

            states::CdataSectionEnd => {
                self.emit_char(']');
                self.emit_char(']');
                go!(self: to CdataSection)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::{ErrorCode, Location, ParseError};
    use crate::tendril::StrTendril;

    // Collects tokens (with locations) and errors for inspection.
    #[derive(Default)]
    struct Accumulator {
        tokens: Vec<(Token, Location)>,
        errors: Vec<ParseError>,
    }

    impl TokenSink for Accumulator {
        fn process_token(&mut self, token: Token, at: Location) -> TokenSinkResult {
            self.tokens.push((token, at));
            TokenSinkResult::Continue
        }

        fn parse_error(&mut self, error: ParseError) {
            self.errors.push(error);
        }
    }

    fn tokenize_with(opts: TokenizerOpts, input: &str) -> Accumulator {
        let mut tok = Tokenizer::new(Accumulator::default(), opts);
        tok.feed(StrTendril::from_slice(input));
        tok.end();
        tok.sink
    }

    fn tokenize(input: &str) -> Accumulator {
        tokenize_with(TokenizerOpts::default(), input)
    }

    fn text_of(acc: &Accumulator) -> String {
        acc.tokens
            .iter()
            .filter_map(|(t, _)| match t {
                CharacterToken(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    fn tags_of(acc: &Accumulator) -> Vec<(TagKind, String)> {
        acc.tokens
            .iter()
            .filter_map(|(t, _)| match t {
                TagToken(tag) => Some((tag.kind, tag.name.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn simple_tags_and_text() {
        let acc = tokenize("<p>Hi</p>");
        assert_eq!(
            tags_of(&acc),
            vec![(StartTag, "p".to_string()), (EndTag, "p".to_string())]
        );
        assert_eq!(text_of(&acc), "Hi");
        assert!(acc.errors.is_empty());
    }

    #[test]
    fn tag_names_and_attr_names_are_lowered() {
        let acc = tokenize("<DIV CLASS='a' Class='b'>");
        let (token, _) = &acc.tokens[0];
        let TagToken(tag) = token else {
            panic!("expected tag")
        };
        assert_eq!(tag.name, "div");
        assert_eq!(tag.attrs.len(), 1);
        assert_eq!(tag.attrs[0].name.local, "class");
        assert_eq!(&*tag.attrs[0].value, "a");
        assert_eq!(acc.errors[0].code, ErrorCode::DuplicateAttribute);
    }

    #[test]
    fn lone_lt_at_eof() {
        let acc = tokenize("<");
        assert_eq!(text_of(&acc), "<");
        assert_eq!(acc.errors[0].code, ErrorCode::EofBeforeTagName);
    }

    #[test]
    fn named_character_references() {
        assert_eq!(text_of(&tokenize("a&amp;b")), "a&b");
        assert_eq!(text_of(&tokenize("a&ampb")), "a&b"); // legacy, with error
        assert_eq!(text_of(&tokenize("&notin;")), "\u{2209}");
        assert_eq!(text_of(&tokenize("&notit;")), "\u{AC}it;");
        let acc = tokenize("&noSuchThing;");
        assert_eq!(text_of(&acc), "&noSuchThing;");
        assert_eq!(
            acc.errors[0].code,
            ErrorCode::UnknownNamedCharacterReference
        );
    }

    #[test]
    fn numeric_character_references() {
        assert_eq!(text_of(&tokenize("&#65;&#x42;")), "AB");
        // Windows-1252 remapping per the replacement table.
        assert_eq!(text_of(&tokenize("&#x80;")), "\u{20AC}");
        assert_eq!(text_of(&tokenize("&#0;")), "\u{fffd}");
        assert_eq!(text_of(&tokenize("&#xD800;")), "\u{fffd}");
    }

    #[test]
    fn char_ref_in_attribute_context() {
        // No semicolon followed by alphanumeric: not a reference at all.
        let acc = tokenize("<a href='?x&ampy=1'>");
        let TagToken(tag) = &acc.tokens[0].0 else {
            panic!("expected tag")
        };
        assert_eq!(&*tag.attrs[0].value, "?x&ampy=1");
        assert!(acc.errors.is_empty());

        // With semicolon it always resolves.
        let acc = tokenize("<a href='?x&amp;y=1'>");
        let TagToken(tag) = &acc.tokens[0].0 else {
            panic!("expected tag")
        };
        assert_eq!(&*tag.attrs[0].value, "?x&y=1");
    }

    #[test]
    fn rcdata_appropriate_end_tag() {
        let opts = TokenizerOpts {
            initial_state: Some(states::RawData(states::Rcdata)),
            last_start_tag_name: Some("title".to_string()),
            ..Default::default()
        };
        let acc = tokenize_with(opts, "x</other>y</title>z");
        assert_eq!(text_of(&acc), "x</other>yz");
        assert!(tags_of(&acc).contains(&(EndTag, "title".to_string())));
    }

    #[test]
    fn script_double_escape() {
        let opts = TokenizerOpts {
            initial_state: Some(states::RawData(states::ScriptData)),
            last_start_tag_name: Some("script".to_string()),
            ..Default::default()
        };
        let acc = tokenize_with(opts, "<!--<script>a</script>--></script>");
        // Everything before the final end tag is character data.
        assert_eq!(text_of(&acc), "<!--<script>a</script>-->");
        assert_eq!(tags_of(&acc), vec![(EndTag, "script".to_string())]);
    }

    #[test]
    fn comment_dashes() {
        let acc = tokenize("<!-- a -- b -->");
        let comments: Vec<String> = acc
            .tokens
            .iter()
            .filter_map(|(t, _)| match t {
                CommentToken(s) => Some(s.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(comments, vec![" a -- b ".to_string()]);
    }

    #[test]
    fn doctype_with_ids() {
        let acc = tokenize(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#);
        let DoctypeToken(dt) = &acc.tokens[0].0 else {
            panic!("expected doctype")
        };
        assert_eq!(dt.name.as_deref(), Some("html"));
        assert_eq!(dt.public_id.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
        assert!(!dt.force_quirks);
    }

    #[test]
    fn bogus_comment_from_question_mark() {
        let acc = tokenize("<?pi data?>");
        let CommentToken(text) = &acc.tokens[0].0 else {
            panic!("expected comment")
        };
        assert_eq!(&**text, "?pi data?");
        assert_eq!(
            acc.errors[0].code,
            ErrorCode::UnexpectedQuestionMarkInsteadOfTagName
        );
    }

    #[test]
    fn token_locations_track_lines() {
        let acc = tokenize("<a>\n<b>");
        let locs: Vec<Location> = acc
            .tokens
            .iter()
            .filter_map(|(t, at)| match t {
                TagToken(_) => Some(*at),
                _ => None,
            })
            .collect();
        assert_eq!(locs, vec![Location::new(1, 2), Location::new(2, 2)]);
    }

    #[test]
    fn bom_is_discarded() {
        let acc = tokenize("\u{feff}x");
        assert_eq!(text_of(&acc), "x");
    }
}
