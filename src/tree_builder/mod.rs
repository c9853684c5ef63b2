// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The HTML5 tree builder: consumes the token stream and materializes a DOM
//! through a [`TreeSink`].
//!
//! State lives in one place: the open-elements stack is the source of truth
//! for the current node and all scope queries, and the active formatting
//! list references stack elements by node identity. The two are mutated
//! together; `reconstruct_active_formatting_elements` and the adoption
//! agency are the only places that clone elements.

use self::types::*;

use std::borrow::Cow;
use std::mem;

use log::debug;

use crate::errors::{ErrorCode, Location, ParseError};
use crate::interface::{create_element, AppendNode, AppendText};
use crate::interface::{Attribute, LocalName, Namespace, NodeOrText, QualName, QuirksMode};
use crate::tendril::StrTendril;
use crate::tokenizer::states as tok_state;
use crate::tokenizer::{self, Doctype, EndTag, StartTag, Tag, TokenSink, TokenSinkResult};
use crate::tree_builder::tag_sets::*;
use crate::TreeSink;

mod data;
mod rules;
pub(crate) mod tag_sets;
mod types;

/// Tree builder options, with an impl for `Default`.
#[derive(Copy, Clone)]
pub struct TreeBuilderOpts {
    /// Is scripting enabled? This decides how `<noscript>` parses and
    /// whether `[CDATA[`-adjacent rules see script as live. Default: false.
    pub scripting_enabled: bool,

    /// Is this document the `srcdoc` of an `<iframe>`? Affects quirks-mode
    /// inference from the DOCTYPE. Default: false.
    pub iframe_srcdoc: bool,

    /// Drop the DOCTYPE (if any) from the tree. Default: false.
    pub drop_doctype: bool,

    /// Initial quirks mode. Default: NoQuirks.
    pub quirks_mode: QuirksMode,

    /// Record the source location of each element's start tag.
    /// Default: false.
    pub track_node_source_spans: bool,
}

impl Default for TreeBuilderOpts {
    fn default() -> TreeBuilderOpts {
        TreeBuilderOpts {
            scripting_enabled: false,
            iframe_srcdoc: false,
            drop_doctype: false,
            quirks_mode: QuirksMode::NoQuirks,
            track_node_source_spans: false,
        }
    }
}

/// The HTML tree builder.
pub struct TreeBuilder<Sink: TreeSink> {
    /// Options controlling the behavior of the tree builder.
    opts: TreeBuilderOpts,

    /// Consumer of tree modifications.
    pub sink: Sink,

    /// Insertion mode.
    mode: InsertionMode,

    /// Original insertion mode, used by Text and InTableText modes.
    orig_mode: Option<InsertionMode>,

    /// Stack of template insertion modes.
    template_modes: Vec<InsertionMode>,

    /// Pending table character tokens.
    pending_table_text: Vec<char>,

    /// Quirks mode as set by the parser.
    quirks_mode: QuirksMode,

    /// The document node, which is created by the sink.
    doc_handle: Sink::Handle,

    /// Stack of open elements, most recently added at end.
    open_elems: Vec<Sink::Handle>,

    /// List of active formatting elements.
    active_formatting: Vec<FormatEntry<Sink::Handle>>,

    /// Head element pointer.
    head_elem: Option<Sink::Handle>,

    /// Form element pointer.
    form_elem: Option<Sink::Handle>,

    /// Frameset-ok flag.
    frameset_ok: bool,

    /// Ignore a following U+000A LINE FEED?
    ignore_lf: bool,

    /// Is an insertion currently being redirected out of a table?
    /// Established only by `foster_parent_in_body` and always torn down
    /// before the token completes; asserted clear at every token boundary.
    foster_redirect: bool,

    /// The context element for the fragment parsing algorithm.
    context_elem: Option<Sink::Handle>,

    /// Source location of the token being processed.
    current_location: Location,
}

pub(crate) enum PushFlag {
    Push,
    NoPush,
}

enum Bookmark<Handle> {
    Replace(Handle),
    InsertAfter(Handle),
}

impl<Sink: TreeSink> TreeBuilder<Sink> {
    /// Create a new tree builder which sends tree modifications to a
    /// particular `TreeSink`. The tree builder is also a `TokenSink`.
    pub fn new(sink: Sink, opts: TreeBuilderOpts) -> TreeBuilder<Sink> {
        let doc_handle = sink.get_document();
        TreeBuilder {
            opts,
            sink,
            mode: InsertionMode::Initial,
            orig_mode: None,
            template_modes: vec![],
            pending_table_text: vec![],
            quirks_mode: opts.quirks_mode,
            doc_handle,
            open_elems: vec![],
            active_formatting: vec![],
            head_elem: None,
            form_elem: None,
            frameset_ok: true,
            ignore_lf: false,
            foster_redirect: false,
            context_elem: None,
            current_location: Location::default(),
        }
    }

    /// Create a tree builder for parsing a fragment in the given context
    /// element.
    pub fn new_for_fragment(
        sink: Sink,
        context_elem: Sink::Handle,
        form_elem: Option<Sink::Handle>,
        opts: TreeBuilderOpts,
    ) -> TreeBuilder<Sink> {
        let doc_handle = sink.get_document();
        let context_is_template = sink.elem_name(&context_elem).is_html("template");

        let mut tb = TreeBuilder {
            opts,
            sink,
            mode: InsertionMode::Initial,
            orig_mode: None,
            template_modes: if context_is_template {
                vec![InsertionMode::InTemplate]
            } else {
                vec![]
            },
            pending_table_text: vec![],
            quirks_mode: opts.quirks_mode,
            doc_handle,
            open_elems: vec![],
            active_formatting: vec![],
            head_elem: None,
            form_elem,
            frameset_ok: true,
            ignore_lf: false,
            foster_redirect: false,
            context_elem: Some(context_elem),
            current_location: Location::default(),
        };

        // Fragment parsing: a bare `html` root carries the parsed nodes,
        // and the insertion mode is reset around the context element.
        tb.create_root(vec![]);
        tb.mode = tb.reset_insertion_mode();
        tb
    }

    /// The tokenizer state a fragment's context element calls for.
    pub fn tokenizer_state_for_context_elem(&self) -> tok_state::State {
        let context_elem = self.context_elem.as_ref().expect("no context element");
        let name = self.sink.elem_name(context_elem);
        if name.ns != Some(Namespace::Html) {
            return tok_state::Data;
        }
        match &*name.local {
            "title" | "textarea" => tok_state::RawData(tok_state::Rcdata),

            "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                tok_state::RawData(tok_state::Rawtext)
            }

            "script" => tok_state::RawData(tok_state::ScriptData),

            "noscript" => {
                if self.opts.scripting_enabled {
                    tok_state::RawData(tok_state::Rawtext)
                } else {
                    tok_state::Data
                }
            }

            "plaintext" => tok_state::Plaintext,

            _ => tok_state::Data,
        }
    }

    fn process_to_completion(&mut self, mut token: Token) -> TokenSinkResult {
        loop {
            let should_have_acknowledged_self_closing_flag = matches!(
                token,
                Token::Tag(Tag {
                    self_closing: true,
                    kind: StartTag,
                    ..
                })
            );
            let result = if self.is_foreign(&token) {
                self.step_foreign(token)
            } else {
                let mode = self.mode;
                self.step(mode, token)
            };
            match result {
                ProcessResult::Done => {
                    if should_have_acknowledged_self_closing_flag {
                        self.err(
                            ErrorCode::NonVoidHtmlElementStartTagWithTrailingSolidus,
                            "Unacknowledged self-closing tag",
                        );
                    }
                    return TokenSinkResult::Continue;
                }
                ProcessResult::DoneAckSelfClosing => {
                    return TokenSinkResult::Continue;
                }
                ProcessResult::Reprocess(m, t) => {
                    self.mode = m;
                    token = t;
                }
                ProcessResult::ToPlaintext => {
                    return TokenSinkResult::Plaintext;
                }
                ProcessResult::ToRawData(k) => {
                    return TokenSinkResult::RawData(k);
                }
            }
        }
    }

    /// Are we parsing an HTML fragment?
    pub fn is_fragment(&self) -> bool {
        self.context_elem.is_some()
    }

    //§ appropriate-place-for-inserting-a-node
    /// Decide where the next node goes. This is the only place that decides
    /// whether an insertion is foster-parented: an override target (the
    /// adoption agency's common ancestor) fosters purely by being a
    /// table-insertion element, an ordinary insertion fosters only inside a
    /// `foster_parent_in_body` redirect.
    fn appropriate_place_for_insertion(
        &self,
        override_target: Option<Sink::Handle>,
    ) -> InsertionPoint<Sink::Handle> {
        let (target, foster) = match override_target {
            Some(target) => {
                let foster = self.elem_in(&target, table_foster_target);
                (target, foster)
            }
            None => {
                let target = self.current_node().clone();
                let foster = self.foster_redirect && self.elem_in(&target, table_foster_target);
                (target, foster)
            }
        };

        if !foster {
            if self.html_elem_named(&target, "template") {
                // Insertions in a template go into its contents fragment.
                let contents = self.sink.get_template_contents(&target);
                return InsertionPoint::LastChild(contents);
            }
            return InsertionPoint::LastChild(target);
        }

        let mut iter = self.open_elems.iter().rev().peekable();
        while let Some(elem) = iter.next() {
            if self.html_elem_named(elem, "template") {
                let contents = self.sink.get_template_contents(elem);
                return InsertionPoint::LastChild(contents);
            } else if self.html_elem_named(elem, "table") {
                return InsertionPoint::TableFosterParenting {
                    element: elem.clone(),
                    prev_element: (*iter.peek().expect("table on stack bottom")).clone(),
                };
            }
        }
        InsertionPoint::LastChild(self.html_elem().clone())
    }

    fn insert_at(&self, insertion_point: InsertionPoint<Sink::Handle>, child: NodeOrText<Sink::Handle>) {
        match insertion_point {
            InsertionPoint::LastChild(parent) => self.sink.append(&parent, child),
            InsertionPoint::TableFosterParenting {
                element,
                prev_element,
            } => self
                .sink
                .append_based_on_parent_node(&element, &prev_element, child),
        }
    }
}

impl<Sink: TreeSink> TokenSink for TreeBuilder<Sink> {
    fn process_token(&mut self, token: tokenizer::Token, at: Location) -> TokenSinkResult {
        self.current_location = at;
        debug_assert!(!self.foster_redirect);
        let ignore_lf = mem::take(&mut self.ignore_lf);

        // Handle `DoctypeToken` here; convert everything else to the local
        // `Token` type.
        let token = match token {
            tokenizer::DoctypeToken(dt) => {
                if self.mode == InsertionMode::Initial {
                    let (err, quirk) = data::doctype_error_and_quirks(&dt, self.opts.iframe_srcdoc);
                    if err {
                        self.err(ErrorCode::BadDoctype, format!("Bad DOCTYPE: {dt:?}"));
                    }
                    let Doctype {
                        name,
                        public_id,
                        system_id,
                        force_quirks: _,
                    } = dt;
                    if !self.opts.drop_doctype {
                        self.sink.append_doctype_to_document(
                            name.unwrap_or_default(),
                            public_id.unwrap_or_default(),
                            system_id.unwrap_or_default(),
                        );
                    }
                    self.set_quirks_mode(quirk);

                    self.mode = InsertionMode::BeforeHtml;
                } else {
                    self.err(
                        ErrorCode::DoctypeNotAllowed,
                        format!("DOCTYPE in insertion mode {:?}", self.mode),
                    );
                }
                return TokenSinkResult::Continue;
            }

            tokenizer::TagToken(x) => Token::Tag(x),
            tokenizer::CommentToken(x) => Token::Comment(x),
            tokenizer::EOFToken => Token::Eof,

            tokenizer::CharacterToken('\0') => Token::NullCharacter,
            tokenizer::CharacterToken(c) => {
                if ignore_lf && c == '\n' {
                    return TokenSinkResult::Continue;
                }
                Token::Character(c)
            }
        };

        self.process_to_completion(token)
    }

    fn parse_error(&mut self, error: ParseError) {
        self.sink.parse_error(error);
    }

    fn end(&mut self) {
        self.open_elems.clear();
    }

    fn adjusted_current_node_present_and_not_in_html_namespace(&self) -> bool {
        !self.open_elems.is_empty()
            && self.sink.elem_name(self.adjusted_current_node()).ns != Some(Namespace::Html)
    }
}

#[doc(hidden)]
impl<Sink: TreeSink> TreeBuilder<Sink> {
    fn err(&self, code: ErrorCode, message: impl Into<Cow<'static, str>>) {
        self.sink
            .parse_error(ParseError::new(code, self.current_location, message.into()));
    }

    pub(crate) fn unexpected_token(&self, token: &Token) -> ProcessResult {
        let code = match token {
            Token::Tag(Tag { kind: StartTag, .. }) => ErrorCode::UnexpectedStartTag,
            Token::Tag(Tag { kind: EndTag, .. }) => ErrorCode::UnexpectedEndTag,
            Token::Comment(_) | Token::Character(_) => ErrorCode::UnexpectedCharacters,
            Token::NullCharacter => ErrorCode::UnexpectedNullCharacter,
            Token::Eof => ErrorCode::UnexpectedEof,
        };
        self.err(
            code,
            format!("Unexpected token {:?} in insertion mode {:?}", token, self.mode),
        );
        ProcessResult::Done
    }

    pub(crate) fn unexpected_tag(&self, tag: &Tag) -> ProcessResult {
        let code = match tag.kind {
            StartTag => ErrorCode::UnexpectedStartTag,
            EndTag => ErrorCode::UnexpectedEndTag,
        };
        self.err(
            code,
            format!("Unexpected tag {:?} in insertion mode {:?}", tag.name, self.mode),
        );
        ProcessResult::Done
    }

    fn assert_named(&self, node: &Sink::Handle, name: &str) {
        assert!(self.html_elem_named(node, name));
    }

    fn debug_step(&self, mode: InsertionMode, token: &Token) {
        debug!("processing {:?} in insertion mode {:?}", token, mode);
    }

    /// Iterate the active formatting entries (with list index) from the end
    /// back to the most recent marker, if any.
    fn active_formatting_end_to_marker(
        &self,
    ) -> impl Iterator<Item = (usize, &Sink::Handle, &Tag)> {
        self.active_formatting
            .iter()
            .enumerate()
            .rev()
            .map_while(|(i, entry)| match entry {
                FormatEntry::Marker => None,
                FormatEntry::Element(h, t) => Some((i, h, t)),
            })
    }

    fn position_in_active_formatting(&self, element: &Sink::Handle) -> Option<usize> {
        self.active_formatting.iter().position(|n| match n {
            FormatEntry::Marker => false,
            FormatEntry::Element(ref handle, _) => self.sink.same_node(handle, element),
        })
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
        self.sink.set_quirks_mode(mode);
    }

    fn stop_parsing(&mut self) -> ProcessResult {
        ProcessResult::Done
    }

    fn span(&self) -> Option<Location> {
        if self.opts.track_node_source_spans {
            Some(self.current_location)
        } else {
            None
        }
    }

    //§ parsing-elements-that-contain-only-text
    // Switch to `Text` insertion mode, save the old mode, and switch the
    // tokenizer to a raw-data state. The switch only takes effect after the
    // current start tag's `process_token` returns.
    fn to_raw_text_mode(&mut self, k: tok_state::RawKind) -> ProcessResult {
        self.orig_mode = Some(self.mode);
        self.mode = InsertionMode::Text;
        ProcessResult::ToRawData(k)
    }

    // The generic raw text / RCDATA parsing algorithm.
    fn parse_raw_data(&mut self, tag: Tag, k: tok_state::RawKind) -> ProcessResult {
        self.insert_element_for(tag);
        self.to_raw_text_mode(k)
    }

    fn current_node(&self) -> &Sink::Handle {
        self.open_elems.last().expect("no current element")
    }

    fn adjusted_current_node(&self) -> &Sink::Handle {
        if self.open_elems.len() == 1 {
            if let Some(ctx) = self.context_elem.as_ref() {
                return ctx;
            }
        }
        self.current_node()
    }

    fn current_node_in<TagSet>(&self, set: TagSet) -> bool
    where
        TagSet: Fn(&QualName) -> bool,
    {
        set(&self.sink.elem_name(self.current_node()))
    }

    // Insert at the "appropriate place for inserting a node".
    fn insert_appropriately(&self, child: NodeOrText<Sink::Handle>, override_target: Option<Sink::Handle>) {
        let insertion_point = self.appropriate_place_for_insertion(override_target);
        self.insert_at(insertion_point, child);
    }

    //§ the-adoption-agency-algorithm
    pub(crate) fn adoption_agency(&mut self, subject: LocalName) {
        // 1. If the current node is an HTML element with the subject's name
        // and is not in the list of active formatting elements, pop it.
        if self.current_node_named(&subject)
            && self
                .position_in_active_formatting(self.current_node())
                .is_none()
        {
            self.pop();
            return;
        }

        // Outer loop, at most eight times.
        for _ in 0..8 {
            // Find the formatting element: the most recent entry for the
            // subject between the end of the list and the last marker.
            let maybe_fmt_entry = self
                .active_formatting_end_to_marker()
                .find(|&(_, _, tag)| tag.name == subject)
                .map(|(i, h, t)| (i, h.clone(), t.clone()));

            let Some((fmt_elem_index, fmt_elem, fmt_elem_tag)) = maybe_fmt_entry else {
                return self.process_end_tag_in_body(Tag {
                    kind: EndTag,
                    name: subject,
                    self_closing: false,
                    attrs: vec![],
                });
            };

            let Some(fmt_elem_stack_index) = self
                .open_elems
                .iter()
                .rposition(|n| self.sink.same_node(n, &fmt_elem))
            else {
                self.err(
                    ErrorCode::FormattingElementNotOpen,
                    "Formatting element not open",
                );
                self.active_formatting.remove(fmt_elem_index);
                return;
            };

            if !self.in_scope(default_scope, |n| self.sink.same_node(n, &fmt_elem)) {
                self.err(
                    ErrorCode::FormattingElementNotInScope,
                    "Formatting element not in scope",
                );
                return;
            }

            if !self.sink.same_node(self.current_node(), &fmt_elem) {
                self.err(
                    ErrorCode::FormattingElementNotCurrentNode,
                    "Formatting element not current node",
                );
            }

            // Find the furthest block: the topmost special element below the
            // formatting element on the stack.
            let maybe_furthest_block = self
                .open_elems
                .iter()
                .enumerate()
                .skip(fmt_elem_stack_index)
                .find(|&(_, open_element)| self.elem_in(open_element, special_tag))
                .map(|(i, h)| (i, h.clone()));

            let Some((furthest_block_index, furthest_block)) = maybe_furthest_block else {
                // No furthest block: pop everything above (and including)
                // the formatting element, drop its list entry, done.
                self.open_elems.truncate(fmt_elem_stack_index);
                self.active_formatting.remove(fmt_elem_index);
                return;
            };

            let common_ancestor = self.open_elems[fmt_elem_stack_index - 1].clone();

            let mut bookmark = Bookmark::Replace(fmt_elem.clone());

            // Inner loop: walk up from the furthest block, cloning each
            // intervening formatting element and reparenting as we go.
            let mut node;
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block.clone();

            let mut inner_counter = 0;
            loop {
                inner_counter += 1;

                node_index -= 1;
                node = self.open_elems[node_index].clone();

                if self.sink.same_node(&node, &fmt_elem) {
                    break;
                }

                // A node walked three times is evicted from both structures.
                if inner_counter > 3 {
                    if let Some(position) = self.position_in_active_formatting(&node) {
                        self.active_formatting.remove(position);
                    }
                    self.open_elems.remove(node_index);
                    continue;
                }

                let Some(node_formatting_index) = self.position_in_active_formatting(&node) else {
                    self.open_elems.remove(node_index);
                    continue;
                };

                let tag = match self.active_formatting[node_formatting_index] {
                    FormatEntry::Element(ref h, ref t) => {
                        assert!(self.sink.same_node(h, &node));
                        t.clone()
                    }
                    FormatEntry::Marker => panic!("Found marker during adoption agency"),
                };
                let new_element = create_element(
                    &self.sink,
                    QualName::html(tag.name.clone()),
                    tag.attrs.clone(),
                    self.span(),
                );
                self.open_elems[node_index] = new_element.clone();
                self.active_formatting[node_formatting_index] =
                    FormatEntry::Element(new_element.clone(), tag);
                node = new_element;

                if self.sink.same_node(&last_node, &furthest_block) {
                    bookmark = Bookmark::InsertAfter(node.clone());
                }

                self.sink.remove_from_parent(&last_node);
                self.sink.append(&node, AppendNode(last_node.clone()));

                last_node = node.clone();
            }

            // Insert last_node at the appropriate place with the common
            // ancestor as the override target; this fosters if the ancestor
            // is a table-insertion element.
            self.sink.remove_from_parent(&last_node);
            self.insert_appropriately(AppendNode(last_node.clone()), Some(common_ancestor));

            // Fresh clone of the formatting element takes over the furthest
            // block's children.
            let new_element = create_element(
                &self.sink,
                QualName::html(fmt_elem_tag.name.clone()),
                fmt_elem_tag.attrs.clone(),
                self.span(),
            );
            let new_entry = FormatEntry::Element(new_element.clone(), fmt_elem_tag);

            self.sink.reparent_children(&furthest_block, &new_element);
            self.sink
                .append(&furthest_block, AppendNode(new_element.clone()));

            // Fix up the active formatting list around the bookmark.
            match bookmark {
                Bookmark::Replace(to_replace) => {
                    let index = self
                        .position_in_active_formatting(&to_replace)
                        .expect("bookmark not found in active formatting elements");
                    self.active_formatting[index] = new_entry;
                }
                Bookmark::InsertAfter(previous) => {
                    let index = self
                        .position_in_active_formatting(&previous)
                        .expect("bookmark not found in active formatting elements")
                        + 1;
                    self.active_formatting.insert(index, new_entry);
                    let old_index = self
                        .position_in_active_formatting(&fmt_elem)
                        .expect("formatting element not found in active formatting elements");
                    self.active_formatting.remove(old_index);
                }
            }

            // And the stack: the clone sits just below the furthest block.
            self.remove_from_stack(&fmt_elem);
            let new_furthest_block_index = self
                .open_elems
                .iter()
                .position(|n| self.sink.same_node(n, &furthest_block))
                .expect("furthest block missing from open element stack");
            self.open_elems
                .insert(new_furthest_block_index + 1, new_element);
        }
    }

    fn push(&mut self, elem: &Sink::Handle) {
        self.open_elems.push(elem.clone());
    }

    fn pop(&mut self) -> Sink::Handle {
        self.open_elems.pop().expect("no current element")
    }

    fn remove_from_stack(&mut self, elem: &Sink::Handle) {
        let position = self
            .open_elems
            .iter()
            .rposition(|x| self.sink.same_node(elem, x));
        if let Some(position) = position {
            self.open_elems.remove(position);
        }
    }

    fn is_marker_or_open(&self, entry: &FormatEntry<Sink::Handle>) -> bool {
        match *entry {
            FormatEntry::Marker => true,
            FormatEntry::Element(ref node, _) => self
                .open_elems
                .iter()
                .rev()
                .any(|n| self.sink.same_node(n, node)),
        }
    }

    //§ reconstruct-the-active-formatting-elements
    pub(crate) fn reconstruct_active_formatting_elements(&mut self) {
        {
            // Nothing to do if the list is empty, or if the last entry is a
            // marker or already open.
            let Some(last) = self.active_formatting.last() else {
                return;
            };
            if self.is_marker_or_open(last) {
                return;
            }
        }

        // Rewind to the latest entry that is a marker or open, then advance
        // one; everything from there on gets recreated.
        let mut entry_index = self.active_formatting.len() - 1;
        loop {
            if entry_index == 0 {
                break;
            }
            entry_index -= 1;
            if self.is_marker_or_open(&self.active_formatting[entry_index]) {
                entry_index += 1;
                break;
            }
        }

        loop {
            let tag = match self.active_formatting[entry_index] {
                FormatEntry::Element(_, ref t) => t.clone(),
                FormatEntry::Marker => {
                    panic!("Found marker during formatting element reconstruction")
                }
            };

            // Create, insert, and swap the entry for the clone.
            let new_element = self.insert_element(
                PushFlag::Push,
                Namespace::Html,
                tag.name.clone(),
                tag.attrs.clone(),
            );
            self.active_formatting[entry_index] = FormatEntry::Element(new_element, tag);

            if entry_index == self.active_formatting.len() - 1 {
                break;
            }
            entry_index += 1;
        }
    }

    /// Get the first element on the stack, which will be the `<html>`
    /// element.
    fn html_elem(&self) -> &Sink::Handle {
        &self.open_elems[0]
    }

    /// Get the second element on the stack, if it's an HTML body element.
    fn body_elem(&self) -> Option<&Sink::Handle> {
        if self.open_elems.len() <= 1 {
            return None;
        }
        let node = &self.open_elems[1];
        if self.html_elem_named(node, "body") {
            Some(node)
        } else {
            None
        }
    }

    /// Signal an error depending on the state of the stack of open elements
    /// at the end of the body.
    fn check_body_end(&self) {
        for elem in self.open_elems.iter() {
            let name = self.sink.elem_name(elem);
            if !impromptu_body_end_ok(&name) {
                self.err(
                    ErrorCode::OpenElementsAtEndOfBody,
                    format!("Unexpected open tag {:?} at end of body", name.local),
                );
                // The spec suggests not reporting the rest.
                return;
            }
        }
    }

    fn in_scope<TagSet, Pred>(&self, scope: TagSet, pred: Pred) -> bool
    where
        TagSet: Fn(&QualName) -> bool,
        Pred: Fn(&Sink::Handle) -> bool,
    {
        for node in self.open_elems.iter().rev() {
            if pred(node) {
                return true;
            }
            if scope(&self.sink.elem_name(node)) {
                return false;
            }
        }

        // supposed to be impossible, because <html> is always in scope
        false
    }

    fn elem_in<TagSet>(&self, elem: &Sink::Handle, set: TagSet) -> bool
    where
        TagSet: Fn(&QualName) -> bool,
    {
        set(&self.sink.elem_name(elem))
    }

    fn html_elem_named(&self, elem: &Sink::Handle, name: &str) -> bool {
        self.sink.elem_name(elem).is_html(name)
    }

    fn in_html_elem_named(&self, name: &str) -> bool {
        self.open_elems
            .iter()
            .any(|elem| self.html_elem_named(elem, name))
    }

    fn current_node_named(&self, name: &str) -> bool {
        self.html_elem_named(self.current_node(), name)
    }

    fn in_scope_named<TagSet>(&self, scope: TagSet, name: &str) -> bool
    where
        TagSet: Fn(&QualName) -> bool,
    {
        self.in_scope(scope, |elem| self.html_elem_named(elem, name))
    }

    //§ generate-implied-end-tags
    fn generate_implied_end_tags<TagSet>(&mut self, set: TagSet)
    where
        TagSet: Fn(&QualName) -> bool,
    {
        loop {
            {
                let Some(elem) = self.open_elems.last() else {
                    return;
                };
                if !set(&self.sink.elem_name(elem)) {
                    return;
                }
            }
            self.pop();
        }
    }

    fn generate_implied_end_except(&mut self, except: LocalName) {
        self.generate_implied_end_tags(|name| {
            if name.is_html(&except) {
                false
            } else {
                cursory_implied_end(name)
            }
        });
    }

    // Pop elements until the current element is in the set.
    fn pop_until_current<TagSet>(&mut self, tag_set: TagSet)
    where
        TagSet: Fn(&QualName) -> bool,
    {
        while !self.current_node_in(&tag_set) {
            self.open_elems.pop();
        }
    }

    // Pop elements until an element from the set has been popped. Returns
    // the number of elements popped.
    fn pop_until<P>(&mut self, pred: P) -> usize
    where
        P: Fn(&QualName) -> bool,
    {
        let mut n = 0;
        loop {
            n += 1;
            match self.open_elems.pop() {
                None => break,
                Some(elem) => {
                    if pred(&self.sink.elem_name(&elem)) {
                        break;
                    }
                }
            }
        }
        n
    }

    fn pop_until_named(&mut self, name: &str) -> usize {
        self.pop_until(|p| p.is_html(name))
    }

    /// Pop elements until one with the specified name has been popped.
    /// Signal an error if it was not the first one.
    fn expect_to_close(&mut self, name: &str) {
        if self.pop_until_named(name) != 1 {
            self.err(
                ErrorCode::UnexpectedEndTag,
                format!("Unexpected open element while closing {name:?}"),
            );
        }
    }

    fn close_p_element(&mut self) {
        self.generate_implied_end_tags(|name| cursory_implied_end(name) && !name.is_html("p"));
        self.expect_to_close("p");
    }

    fn close_p_element_in_button_scope(&mut self) {
        if self.in_scope_named(button_scope, "p") {
            self.close_p_element();
        }
    }

    // Check <input> tags for type=hidden.
    fn is_type_hidden(&self, tag: &Tag) -> bool {
        match tag.attribute("type") {
            None => false,
            Some(value) => value.eq_ignore_ascii_case("hidden"),
        }
    }

    /// Re-process a token "as in body" with insertions redirected out of the
    /// table. The redirect context exists only for the duration of this
    /// call.
    fn foster_parent_in_body(&mut self, token: Token) -> ProcessResult {
        self.foster_redirect = true;
        let result = self.step(InsertionMode::InBody, token);
        self.foster_redirect = false;
        result
    }

    fn process_chars_in_table(&mut self, token: Token) -> ProcessResult {
        if self.current_node_in(table_foster_target) {
            assert!(self.pending_table_text.is_empty());
            self.orig_mode = Some(self.mode);
            ProcessResult::Reprocess(InsertionMode::InTableText, token)
        } else {
            self.err(
                ErrorCode::UnexpectedCharacters,
                "Unexpected characters in table",
            );
            self.foster_parent_in_body(token)
        }
    }

    fn flush_pending_table_text(&mut self) {
        let pending = mem::take(&mut self.pending_table_text);
        if pending.iter().any(|c| !c.is_ascii_whitespace()) {
            self.err(
                ErrorCode::NonSpaceCharactersInTable,
                "Non-space characters in table text",
            );
            for c in pending {
                match self.foster_parent_in_body(Token::Character(c)) {
                    ProcessResult::Done => (),
                    _ => panic!("not prepared to handle this"),
                }
            }
        } else {
            for c in pending {
                self.append_char(c);
            }
        }
    }

    //§ reset-the-insertion-mode-appropriately
    fn reset_insertion_mode(&self) -> InsertionMode {
        for (i, mut node) in self.open_elems.iter().enumerate().rev() {
            let last = i == 0;
            if let (true, Some(ctx)) = (last, self.context_elem.as_ref()) {
                node = ctx;
            }
            let name = self.sink.elem_name(node);
            if name.ns != Some(Namespace::Html) {
                continue;
            }
            match &*name.local {
                "select" => {
                    for ancestor in self.open_elems[0..i].iter().rev() {
                        if self.html_elem_named(ancestor, "template") {
                            return InsertionMode::InSelect;
                        } else if self.html_elem_named(ancestor, "table") {
                            return InsertionMode::InSelectInTable;
                        }
                    }
                    return InsertionMode::InSelect;
                }
                "td" | "th" => {
                    if !last {
                        return InsertionMode::InCell;
                    }
                }
                "tr" => return InsertionMode::InRow,
                "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                "caption" => return InsertionMode::InCaption,
                "colgroup" => return InsertionMode::InColumnGroup,
                "table" => return InsertionMode::InTable,
                "template" => {
                    return *self
                        .template_modes
                        .last()
                        .expect("template on stack with no template mode")
                }
                "head" => {
                    if !last {
                        return InsertionMode::InHead;
                    }
                }
                "body" => return InsertionMode::InBody,
                "frameset" => return InsertionMode::InFrameset,
                "html" => match self.head_elem {
                    None => return InsertionMode::BeforeHead,
                    Some(_) => return InsertionMode::AfterHead,
                },
                _ => (),
            }
        }
        InsertionMode::InBody
    }

    fn close_the_cell(&mut self) {
        self.generate_implied_end_tags(cursory_implied_end);
        if self.pop_until(td_th) != 1 {
            self.err(
                ErrorCode::UnexpectedEndTag,
                "expected to close <td> or <th> with cell",
            );
        }
        self.clear_active_formatting_to_marker();
    }

    fn append_char(&mut self, c: char) -> ProcessResult {
        self.insert_appropriately(AppendText(StrTendril::from_char(c)), None);
        ProcessResult::Done
    }

    fn append_comment(&mut self, text: StrTendril) -> ProcessResult {
        let comment = self.sink.create_comment(text);
        self.insert_appropriately(AppendNode(comment), None);
        ProcessResult::Done
    }

    fn append_comment_to_doc(&mut self, text: StrTendril) -> ProcessResult {
        let comment = self.sink.create_comment(text);
        self.sink.append(&self.doc_handle, AppendNode(comment));
        ProcessResult::Done
    }

    fn append_comment_to_html(&mut self, text: StrTendril) -> ProcessResult {
        let comment = self.sink.create_comment(text);
        self.sink.append(self.html_elem(), AppendNode(comment));
        ProcessResult::Done
    }

    //§ creating-and-inserting-nodes
    fn create_root(&mut self, attrs: Vec<Attribute>) {
        let elem = create_element(&self.sink, QualName::html("html"), attrs, self.span());
        self.push(&elem);
        self.sink.append(&self.doc_handle, AppendNode(elem));
    }

    fn insert_element(
        &mut self,
        push: PushFlag,
        ns: Namespace,
        name: LocalName,
        attrs: Vec<Attribute>,
    ) -> Sink::Handle {
        let qname = QualName::new(ns, name);
        let elem = create_element(&self.sink, qname, attrs, self.span());

        let insertion_point = self.appropriate_place_for_insertion(None);
        self.insert_at(insertion_point, AppendNode(elem.clone()));

        match push {
            PushFlag::Push => self.push(&elem),
            PushFlag::NoPush => (),
        }
        elem
    }

    fn insert_element_for(&mut self, tag: Tag) -> Sink::Handle {
        self.insert_element(PushFlag::Push, Namespace::Html, tag.name, tag.attrs)
    }

    fn insert_and_pop_element_for(&mut self, tag: Tag) -> Sink::Handle {
        self.insert_element(PushFlag::NoPush, Namespace::Html, tag.name, tag.attrs)
    }

    fn insert_phantom(&mut self, name: &str) -> Sink::Handle {
        self.insert_element(PushFlag::Push, Namespace::Html, name.to_string(), vec![])
    }

    fn create_formatting_element_for(&mut self, tag: Tag) -> Sink::Handle {
        // The Noah's ark clause: at most three entries with identical tag
        // and attributes between the end of the list and the last marker;
        // the earliest of them gives way.
        let mut first_match = None;
        let mut matches = 0usize;
        for (i, _, old_tag) in self.active_formatting_end_to_marker() {
            if tag.matches_ignoring_attr_order(old_tag) {
                first_match = Some(i);
                matches += 1;
            }
        }

        if matches >= 3 {
            self.active_formatting
                .remove(first_match.expect("matches with no index"));
        }

        let elem = self.insert_element(
            PushFlag::Push,
            Namespace::Html,
            tag.name.clone(),
            tag.attrs.clone(),
        );
        self.active_formatting
            .push(FormatEntry::Element(elem.clone(), tag));
        elem
    }

    fn push_marker(&mut self) {
        self.active_formatting.push(FormatEntry::Marker);
    }

    fn clear_active_formatting_to_marker(&mut self) {
        loop {
            match self.active_formatting.pop() {
                None | Some(FormatEntry::Marker) => break,
                _ => (),
            }
        }
    }

    /// The "any other end tag" rule of InBody: walk the stack for a
    /// matching element, generating implied end tags; a special element on
    /// the way aborts.
    pub(crate) fn process_end_tag_in_body(&mut self, tag: Tag) {
        let mut match_idx = None;
        for (i, elem) in self.open_elems.iter().enumerate().rev() {
            if self.html_elem_named(elem, &tag.name) {
                match_idx = Some(i);
                break;
            }
            if self.elem_in(elem, special_tag) {
                self.err(
                    ErrorCode::EndTagWithoutMatchingOpenElement,
                    "Found special tag while closing generic tag",
                );
                return;
            }
        }

        // The root <html> element is special, so this is always Some.
        let Some(match_idx) = match_idx else {
            self.unexpected_tag(&tag);
            return;
        };

        self.generate_implied_end_except(tag.name.clone());

        if match_idx != self.open_elems.len() - 1 {
            // mis-nested tags
            self.unexpected_tag(&tag);
        }
        self.open_elems.truncate(match_idx);
    }

    /// The `<a>` start tag rule: a stale anchor in the list means adoption
    /// plus eviction of the old entry.
    fn handle_misnested_a_tags(&mut self, tag: &Tag) {
        let Some(node) = self
            .active_formatting_end_to_marker()
            .find(|&(_, n, _)| self.html_elem_named(n, "a"))
            .map(|(_, n, _)| n.clone())
        else {
            return;
        };

        self.unexpected_tag(tag);
        self.adoption_agency("a".to_string());
        if let Some(index) = self.position_in_active_formatting(&node) {
            self.active_formatting.remove(index);
        }
        self.remove_from_stack(&node);
    }

    //§ tree-construction (dispatch to the foreign-content rules?)
    fn is_foreign(&self, token: &Token) -> bool {
        if let Token::Eof = *token {
            return false;
        }

        if self.open_elems.is_empty() {
            return false;
        }

        let name = self.sink.elem_name(self.adjusted_current_node());
        if name.ns == Some(Namespace::Html) {
            return false;
        }

        if mathml_text_integration_point(&name) {
            match *token {
                Token::Character(..) | Token::NullCharacter => return false,
                Token::Tag(Tag {
                    kind: StartTag,
                    ref name,
                    ..
                }) if !matches!(&**name, "mglyph" | "malignmark") => {
                    return false;
                }
                _ => (),
            }
        }

        if svg_html_integration_point(&name) {
            match *token {
                Token::Character(..) | Token::NullCharacter => return false,
                Token::Tag(Tag { kind: StartTag, .. }) => return false,
                _ => (),
            }
        }

        if name.is_mathml("annotation-xml") {
            match *token {
                Token::Tag(Tag {
                    kind: StartTag,
                    ref name,
                    ..
                }) if name == "svg" => return false,
                Token::Character(..)
                | Token::NullCharacter
                | Token::Tag(Tag { kind: StartTag, .. }) => {
                    return !self
                        .sink
                        .is_mathml_annotation_xml_integration_point(self.adjusted_current_node());
                }
                _ => {}
            };
        }

        true
    }

    pub(crate) fn enter_foreign(&mut self, mut tag: Tag, ns: Namespace) -> ProcessResult {
        match ns {
            Namespace::MathMl => self.adjust_mathml_attributes(&mut tag),
            Namespace::Svg => self.adjust_svg_attributes(&mut tag),
            _ => (),
        }
        self.adjust_foreign_attributes(&mut tag);

        if tag.self_closing {
            self.insert_element(PushFlag::NoPush, ns, tag.name, tag.attrs);
            ProcessResult::DoneAckSelfClosing
        } else {
            self.insert_element(PushFlag::Push, ns, tag.name, tag.attrs);
            ProcessResult::Done
        }
    }

    fn adjust_svg_tag_name(&self, tag: &mut Tag) {
        let replacement = match &*tag.name {
            "altglyph" => "altGlyph",
            "altglyphdef" => "altGlyphDef",
            "altglyphitem" => "altGlyphItem",
            "animatecolor" => "animateColor",
            "animatemotion" => "animateMotion",
            "animatetransform" => "animateTransform",
            "clippath" => "clipPath",
            "feblend" => "feBlend",
            "fecolormatrix" => "feColorMatrix",
            "fecomponenttransfer" => "feComponentTransfer",
            "fecomposite" => "feComposite",
            "feconvolvematrix" => "feConvolveMatrix",
            "fediffuselighting" => "feDiffuseLighting",
            "fedisplacementmap" => "feDisplacementMap",
            "fedistantlight" => "feDistantLight",
            "fedropshadow" => "feDropShadow",
            "feflood" => "feFlood",
            "fefunca" => "feFuncA",
            "fefuncb" => "feFuncB",
            "fefuncg" => "feFuncG",
            "fefuncr" => "feFuncR",
            "fegaussianblur" => "feGaussianBlur",
            "feimage" => "feImage",
            "femerge" => "feMerge",
            "femergenode" => "feMergeNode",
            "femorphology" => "feMorphology",
            "feoffset" => "feOffset",
            "fepointlight" => "fePointLight",
            "fespecularlighting" => "feSpecularLighting",
            "fespotlight" => "feSpotLight",
            "fetile" => "feTile",
            "feturbulence" => "feTurbulence",
            "foreignobject" => "foreignObject",
            "glyphref" => "glyphRef",
            "lineargradient" => "linearGradient",
            "radialgradient" => "radialGradient",
            "textpath" => "textPath",
            _ => return,
        };
        tag.name = replacement.to_string();
    }

    fn adjust_attributes<F>(&self, tag: &mut Tag, map: F)
    where
        F: Fn(&str) -> Option<QualName>,
    {
        for attr in &mut tag.attrs {
            if let Some(replacement) = map(&attr.name.local) {
                attr.name = replacement;
            }
        }
    }

    fn adjust_svg_attributes(&self, tag: &mut Tag) {
        self.adjust_attributes(tag, |k| {
            let replacement = match k {
                "attributename" => "attributeName",
                "attributetype" => "attributeType",
                "basefrequency" => "baseFrequency",
                "baseprofile" => "baseProfile",
                "calcmode" => "calcMode",
                "clippathunits" => "clipPathUnits",
                "diffuseconstant" => "diffuseConstant",
                "edgemode" => "edgeMode",
                "filterunits" => "filterUnits",
                "glyphref" => "glyphRef",
                "gradienttransform" => "gradientTransform",
                "gradientunits" => "gradientUnits",
                "kernelmatrix" => "kernelMatrix",
                "kernelunitlength" => "kernelUnitLength",
                "keypoints" => "keyPoints",
                "keysplines" => "keySplines",
                "keytimes" => "keyTimes",
                "lengthadjust" => "lengthAdjust",
                "limitingconeangle" => "limitingConeAngle",
                "markerheight" => "markerHeight",
                "markerunits" => "markerUnits",
                "markerwidth" => "markerWidth",
                "maskcontentunits" => "maskContentUnits",
                "maskunits" => "maskUnits",
                "numoctaves" => "numOctaves",
                "pathlength" => "pathLength",
                "patterncontentunits" => "patternContentUnits",
                "patterntransform" => "patternTransform",
                "patternunits" => "patternUnits",
                "pointsatx" => "pointsAtX",
                "pointsaty" => "pointsAtY",
                "pointsatz" => "pointsAtZ",
                "preservealpha" => "preserveAlpha",
                "preserveaspectratio" => "preserveAspectRatio",
                "primitiveunits" => "primitiveUnits",
                "refx" => "refX",
                "refy" => "refY",
                "repeatcount" => "repeatCount",
                "repeatdur" => "repeatDur",
                "requiredextensions" => "requiredExtensions",
                "requiredfeatures" => "requiredFeatures",
                "specularconstant" => "specularConstant",
                "specularexponent" => "specularExponent",
                "spreadmethod" => "spreadMethod",
                "startoffset" => "startOffset",
                "stddeviation" => "stdDeviation",
                "stitchtiles" => "stitchTiles",
                "surfacescale" => "surfaceScale",
                "systemlanguage" => "systemLanguage",
                "tablevalues" => "tableValues",
                "targetx" => "targetX",
                "targety" => "targetY",
                "textlength" => "textLength",
                "viewbox" => "viewBox",
                "viewtarget" => "viewTarget",
                "xchannelselector" => "xChannelSelector",
                "ychannelselector" => "yChannelSelector",
                "zoomandpan" => "zoomAndPan",
                _ => return None,
            };
            Some(QualName::attribute(replacement))
        });
    }

    fn adjust_mathml_attributes(&self, tag: &mut Tag) {
        self.adjust_attributes(tag, |k| match k {
            "definitionurl" => Some(QualName::attribute("definitionURL")),
            _ => None,
        });
    }

    fn adjust_foreign_attributes(&self, tag: &mut Tag) {
        self.adjust_attributes(tag, |k| match k {
            "xlink:actuate" => Some(QualName::prefixed("xlink", Namespace::XLink, "actuate")),
            "xlink:arcrole" => Some(QualName::prefixed("xlink", Namespace::XLink, "arcrole")),
            "xlink:href" => Some(QualName::prefixed("xlink", Namespace::XLink, "href")),
            "xlink:role" => Some(QualName::prefixed("xlink", Namespace::XLink, "role")),
            "xlink:show" => Some(QualName::prefixed("xlink", Namespace::XLink, "show")),
            "xlink:title" => Some(QualName::prefixed("xlink", Namespace::XLink, "title")),
            "xlink:type" => Some(QualName::prefixed("xlink", Namespace::XLink, "type")),
            "xml:lang" => Some(QualName::prefixed("xml", Namespace::Xml, "lang")),
            "xml:space" => Some(QualName::prefixed("xml", Namespace::Xml, "space")),
            "xmlns" => Some(QualName::new(Namespace::Xmlns, "xmlns")),
            "xmlns:xlink" => Some(QualName::prefixed("xmlns", Namespace::Xmlns, "xlink")),
            _ => None,
        });
    }

    fn foreign_start_tag(&mut self, mut tag: Tag) -> ProcessResult {
        let current_ns = self
            .sink
            .elem_name(self.adjusted_current_node())
            .ns
            .expect("adjusted current node has no namespace");
        match current_ns {
            Namespace::MathMl => self.adjust_mathml_attributes(&mut tag),
            Namespace::Svg => {
                self.adjust_svg_tag_name(&mut tag);
                self.adjust_svg_attributes(&mut tag);
            }
            _ => (),
        }
        self.adjust_foreign_attributes(&mut tag);
        if tag.self_closing {
            self.insert_element(PushFlag::NoPush, current_ns, tag.name, tag.attrs);
            ProcessResult::DoneAckSelfClosing
        } else {
            self.insert_element(PushFlag::Push, current_ns, tag.name, tag.attrs);
            ProcessResult::Done
        }
    }

    fn unexpected_start_tag_in_foreign_content(&mut self, tag: Tag) -> ProcessResult {
        self.err(
            ErrorCode::UnexpectedTokenInForeignContent,
            format!("Unexpected HTML tag {:?} in foreign content", tag.name),
        );
        while !self.current_node_in(|n| {
            n.ns == Some(Namespace::Html)
                || mathml_text_integration_point(n)
                || svg_html_integration_point(n)
        }) {
            self.pop();
        }
        self.step(self.mode, Token::Tag(tag))
    }
}
