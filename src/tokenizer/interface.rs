// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The token stream: what the tokenizer emits, and the sink it emits into.

use crate::errors::{Location, ParseError};
use crate::interface::{Attribute, LocalName};
use crate::tendril::StrTendril;
use crate::tokenizer::states::RawKind;

pub use self::TagKind::{EndTag, StartTag};
pub use self::Token::{CharacterToken, CommentToken, DoctypeToken, EOFToken, TagToken};

/// What the tokenizer emits.
///
/// Character data is emitted one scalar value per token; the consumer is
/// responsible for coalescing runs. Parse errors travel out of band through
/// [`TokenSink::parse_error`], and each token carries the source location it
/// was produced at.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Token {
    DoctypeToken(Doctype),
    TagToken(Tag),
    CommentToken(StrTendril),
    CharacterToken(char),
    EOFToken,
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum TagKind {
    StartTag,
    EndTag,
}

/// A start- or end-tag token. Names arrive ASCII-lowered; attributes are
/// already deduplicated (first occurrence of a name wins).
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Tag {
    pub kind: TagKind,
    pub name: LocalName,
    pub self_closing: bool,
    pub attrs: Vec<Attribute>,
}

impl Tag {
    /// Same kind, name, and attribute set, in any attribute order. The
    /// self-closing flag does not participate. This is the equivalence the
    /// Noah's ark clause counts.
    pub fn matches_ignoring_attr_order(&self, other: &Tag) -> bool {
        if self.kind != other.kind
            || self.name != other.name
            || self.attrs.len() != other.attrs.len()
        {
            return false;
        }
        let mut self_attrs = self.attrs.clone();
        let mut other_attrs = other.attrs.clone();
        self_attrs.sort();
        other_attrs.sort();
        self_attrs == other_attrs
    }

    /// The value of an un-namespaced attribute, if the tag has it.
    pub fn attribute(&self, name: &str) -> Option<&StrTendril> {
        self.attrs
            .iter()
            .find(|attr| attr.name.ns.is_none() && attr.name.local == name)
            .map(|attr| &attr.value)
    }
}

/// A `DOCTYPE` token. Missing parts stay `None`; an empty identifier and an
/// absent one are different things for quirks-mode analysis.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Doctype {
    pub name: Option<StrTendril>,
    pub public_id: Option<StrTendril>,
    pub system_id: Option<StrTendril>,
    pub force_quirks: bool,
}

/// Instruction from the sink back to the tokenizer, applied after the token
/// that produced it. This is the only coupling between tree construction and
/// tokenization: a mode switch by return value, never a nested call.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
#[must_use]
pub enum TokenSinkResult {
    Continue,
    /// Switch to RCDATA, RAWTEXT, or script-data tokenization.
    RawData(RawKind),
    /// Switch to PLAINTEXT; the rest of the input is text.
    Plaintext,
}

/// Types which can receive tokens from the tokenizer.
pub trait TokenSink {
    /// Process a token emitted at the given source location.
    fn process_token(&mut self, token: Token, at: Location) -> TokenSinkResult;

    /// Record a tokenize-stage parse error.
    fn parse_error(&mut self, error: ParseError);

    /// Tokenization reached the end of the input.
    fn end(&mut self) {}

    /// Used by the markup declaration open state to decide whether `[CDATA[`
    /// opens a real CDATA section (only inside foreign content).
    fn adjusted_current_node_present_and_not_in_html_namespace(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::QualName;
    use crate::tendril::StrTendril;

    fn tag_with_attrs(pairs: &[(&str, &str)]) -> Tag {
        Tag {
            kind: StartTag,
            name: "b".to_string(),
            self_closing: false,
            attrs: pairs
                .iter()
                .map(|&(name, value)| Attribute {
                    name: QualName::attribute(name),
                    value: StrTendril::from_slice(value),
                })
                .collect(),
        }
    }

    #[test]
    fn tag_equivalence_ignores_attribute_order_only() {
        let a = tag_with_attrs(&[("id", "x"), ("class", "y")]);
        let b = tag_with_attrs(&[("class", "y"), ("id", "x")]);
        let c = tag_with_attrs(&[("id", "x")]);
        assert!(a.matches_ignoring_attr_order(&b));
        assert!(!a.matches_ignoring_attr_order(&c));
    }

    #[test]
    fn attribute_lookup_skips_namespaced_names() {
        let tag = tag_with_attrs(&[("type", "hidden")]);
        assert_eq!(tag.attribute("type").map(|v| &**v), Some("hidden"));
        assert_eq!(tag.attribute("name"), None);
    }
}
