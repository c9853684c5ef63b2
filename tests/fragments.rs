// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fragment parsing: the context element drives both the initial tokenizer
//! state and the initial insertion mode.

mod common;

use common::dump_node;
use tidehtml::rcdom::RcDom;
use tidehtml::{parse_fragment, CallerError, ErrorCode, ParseOpts, QualName};

/// Parse a fragment and dump the children of the synthetic root.
fn fragment(context: &str, input: &str) -> (String, RcDom) {
    let parser = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::html(context),
        vec![],
    )
    .expect("valid fragment context");
    let dom = parser.one(input);

    let mut out = String::new();
    {
        let doc_children = dom.document.children.borrow();
        let root = doc_children.first().expect("no fragment root");
        for child in root.children.borrow().iter() {
            dump_node(child, 0, &mut out);
        }
    }
    (out.trim_end().to_string(), dom)
}

#[test]
fn div_context_parses_flow_content() {
    let (tree, _) = fragment("div", "<p>a<p>b");
    assert_eq!(tree, ["<p>", "  \"a\"", "<p>", "  \"b\""].join("\n"));
}

#[test]
fn tbody_context_starts_in_table_body_mode() {
    let (tree, _) = fragment("tbody", "<tr><td>x");
    assert_eq!(tree, ["<tr>", "  <td>", "    \"x\""].join("\n"));
}

#[test]
fn td_context_ignores_cell_start_tags() {
    let (tree, dom) = fragment("td", "<td>x</td>");
    assert_eq!(tree, "\"x\"");
    assert!(!dom.errors.borrow().is_empty());
}

#[test]
fn title_context_tokenizes_rcdata() {
    let (tree, _) = fragment("title", "a<b>c</title>d");
    assert_eq!(tree, "\"a<b>cd\"");
}

#[test]
fn script_context_tokenizes_script_data() {
    let (tree, _) = fragment("script", "x<!--y-->");
    assert_eq!(tree, "\"x<!--y-->\"");
}

#[test]
fn plaintext_context_takes_everything_verbatim() {
    let (tree, _) = fragment("plaintext", "</plaintext><div>");
    assert_eq!(tree, "\"</plaintext><div>\"");
}

#[test]
fn template_context_uses_the_template_mode_stack() {
    let (tree, _) = fragment("template", "<td>x");
    assert_eq!(tree, ["<td>", "  \"x\""].join("\n"));
}

#[test]
fn invalid_context_is_a_caller_error() {
    let result = parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        QualName::html(""),
        vec![],
    );
    assert!(matches!(
        result,
        Err(CallerError::InvalidFragmentContext(_))
    ));
}

#[test]
fn fragment_errors_still_carry_locations() {
    let (_, dom) = fragment("div", "<p>\u{0}");
    let errors = dom.errors.borrow();
    let err = errors
        .iter()
        .find(|e| e.code == ErrorCode::UnexpectedNullCharacter)
        .expect("null character error");
    assert_eq!((err.location.line, err.location.column), (1, 4));
}
