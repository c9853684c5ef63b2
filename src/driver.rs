// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! High-level interface to the parser.

use std::fmt;

use crate::interface::{create_element, Attribute, QualName, TreeSink};
use crate::tendril::StrTendril;
use crate::tokenizer::{Tokenizer, TokenizerOpts};
use crate::tree_builder::{TreeBuilder, TreeBuilderOpts};

/// All-encompassing options struct for the parser.
#[derive(Clone, Default)]
pub struct ParseOpts {
    /// Tokenizer options.
    pub tokenizer: TokenizerOpts,

    /// Tree builder options.
    pub tree_builder: TreeBuilderOpts,
}

/// Errors in how the parser was invoked, reported before any tokenization.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum CallerError {
    /// The fragment context element name cannot be an element name.
    InvalidFragmentContext(String),
}

impl fmt::Display for CallerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CallerError::InvalidFragmentContext(name) => {
                write!(f, "invalid fragment context element name {name:?}")
            }
        }
    }
}

impl std::error::Error for CallerError {}

/// Parse an HTML document into `sink`.
///
/// The returned [`Parser`] is fed string chunks and finished:
///
/// ```
/// use tidehtml::{parse_document, ParseOpts};
/// use tidehtml::rcdom::RcDom;
///
/// let dom = parse_document(RcDom::default(), ParseOpts::default())
///     .one("<!DOCTYPE html><p>Hello");
/// assert!(dom.errors.borrow().is_empty());
/// ```
pub fn parse_document<Sink: TreeSink>(sink: Sink, opts: ParseOpts) -> Parser<Sink> {
    let tb = TreeBuilder::new(sink, opts.tree_builder);
    let tokenizer = Tokenizer::new(tb, opts.tokenizer);
    Parser { tokenizer }
}

/// Parse an HTML fragment in the given context element, per the fragment
/// parsing algorithm: the context picks the initial tokenizer state (e.g. a
/// `title` context tokenizes RCDATA, `script` tokenizes script data) and the
/// initial insertion mode. The parsed nodes become children of a bare
/// `html` root under the sink's document.
pub fn parse_fragment<Sink: TreeSink>(
    sink: Sink,
    opts: ParseOpts,
    context: QualName,
    context_attrs: Vec<Attribute>,
) -> Result<Parser<Sink>, CallerError> {
    if context.local.is_empty()
        || context
            .local
            .chars()
            .any(|c| c.is_ascii_whitespace() || matches!(c, '<' | '>' | '/' | '\0'))
    {
        log::warn!("rejecting fragment context name {:?}", context.local);
        return Err(CallerError::InvalidFragmentContext(context.local));
    }

    let context_elem = create_element(&sink, context, context_attrs, None);
    let last_start_tag_name = sink.elem_name(&context_elem).local;

    let tb = TreeBuilder::new_for_fragment(sink, context_elem, None, opts.tree_builder);

    let mut tok_opts = opts.tokenizer;
    tok_opts.initial_state = Some(tb.tokenizer_state_for_context_elem());
    tok_opts.last_start_tag_name = Some(last_start_tag_name);

    let tokenizer = Tokenizer::new(tb, tok_opts);
    Ok(Parser { tokenizer })
}

/// A parser ready to be fed input.
pub struct Parser<Sink: TreeSink> {
    tokenizer: Tokenizer<TreeBuilder<Sink>>,
}

impl<Sink: TreeSink> Parser<Sink> {
    /// Feed a chunk of input. May be called any number of times.
    pub fn feed(&mut self, input: &str) {
        self.tokenizer.feed(StrTendril::from_slice(input));
    }

    /// Signal the end of the input and extract the finished output.
    pub fn finish(mut self) -> Sink::Output {
        self.tokenizer.end();
        let tree_builder = self.tokenizer.sink;
        tree_builder.sink.finish()
    }

    /// Parse a complete input in one step.
    pub fn one(mut self, input: &str) -> Sink::Output {
        self.feed(input);
        self.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rcdom::RcDom;

    #[test]
    fn fragment_context_is_validated_up_front() {
        let bad = parse_fragment(
            RcDom::default(),
            ParseOpts::default(),
            QualName::html("no such element"),
            vec![],
        );
        assert!(matches!(bad, Err(CallerError::InvalidFragmentContext(_))));

        let ok = parse_fragment(
            RcDom::default(),
            ParseOpts::default(),
            QualName::html("td"),
            vec![],
        );
        assert!(ok.is_ok());
    }
}
