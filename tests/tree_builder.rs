// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end tree construction scenarios, in the style of the html5lib
//! tree-construction corpus but inlined.

mod common;

use common::{assert_tree, dump, parse};
use tidehtml::rcdom::RcDom;
use tidehtml::{parse_document, ErrorCode, ParseOpts, QuirksMode};

#[test]
fn empty_input_builds_the_skeleton() {
    assert_tree("", &["<html>", "  <head>", "  <body>"]);
}

#[test]
fn lone_lt_at_eof_is_text() {
    let dom = parse("<");
    assert_eq!(
        dump(&dom),
        ["<html>", "  <head>", "  <body>", "    \"<\""].join("\n")
    );
    assert!(dom
        .errors
        .borrow()
        .iter()
        .any(|e| e.code == ErrorCode::EofBeforeTagName));
}

#[test]
fn misnested_formatting_elements_are_reconstructed() {
    assert_tree(
        "<p>1<b>2<i>3</b>4</i>5</p>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      \"1\"",
            "      <b>",
            "        \"2\"",
            "        <i>",
            "          \"3\"",
            "      <i>",
            "        \"4\"",
            "      \"5\"",
        ],
    );
}

#[test]
fn table_grows_implied_tbody_and_keeps_cell_content() {
    assert_tree(
        "<table><tr><td>x<b>y</table>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"x\"",
            "            <b>",
            "              \"y\"",
        ],
    );
}

#[test]
fn text_after_closing_html_reenters_the_body() {
    assert_tree(
        "<!DOCTYPE html><html><body></body></html>after",
        &[
            "<!DOCTYPE html>",
            "<html>",
            "  <head>",
            "  <body>",
            "    \"after\"",
        ],
    );
}

#[test]
fn svg_foreign_object_is_an_html_integration_point() {
    assert_tree(
        "<svg><foreignObject><div>x</div></foreignObject></svg>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg foreignObject>",
            "        <div>",
            "          \"x\"",
        ],
    );
}

#[test]
fn adoption_agency_clones_the_anchor_into_the_paragraph() {
    assert_tree(
        "<a><p></a>X",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <a>",
            "    <p>",
            "      <a>",
            "        \"X\"",
        ],
    );
}

#[test]
fn comments_attach_to_document_html_and_body() {
    assert_tree(
        "<!--x--><html><!--y--><body><!--z-->",
        &[
            "<!-- x -->",
            "<html>",
            "  <!-- y -->",
            "  <head>",
            "  <body>",
            "    <!-- z -->",
        ],
    );
}

#[test]
fn second_anchor_is_fostered_out_of_the_table() {
    // The adoption agency aborts (the table bounds the anchor's scope), the
    // stale entry is dropped, and the new <a> foster-parents before the
    // table. Only one <a> remains open, outside the table.
    let dom = parse("<a><table><a>");
    assert_eq!(
        dump(&dom),
        [
            "<html>",
            "  <head>",
            "  <body>",
            "    <a>",
            "      <a>",
            "      <table>",
        ]
        .join("\n")
    );
    assert!(!dom.errors.borrow().is_empty());
}

#[test]
fn formatting_reconstructs_across_paragraphs() {
    assert_tree(
        "<p><b>x</p><p>y",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <b>",
            "        \"x\"",
            "    <p>",
            "      <b>",
            "        \"y\"",
        ],
    );
}

#[test]
fn noahs_ark_caps_identical_entries_at_three() {
    assert_tree(
        "<p><b><b><b><b>x</p><p>y",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            <b>",
            "              \"x\"",
            "    <p>",
            "      <b>",
            "        <b>",
            "          <b>",
            "            \"y\"",
        ],
    );
}

#[test]
fn whitespace_stays_in_the_table_but_text_is_fostered() {
    assert_tree(
        "<table> <tbody></tbody></table>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      \" \"",
            "      <tbody>",
        ],
    );

    let dom = parse("<table>x</table>");
    assert_eq!(
        dump(&dom),
        [
            "<html>",
            "  <head>",
            "  <body>",
            "    \"x\"",
            "    <table>",
        ]
        .join("\n")
    );
    assert!(dom
        .errors
        .borrow()
        .iter()
        .any(|e| e.code == ErrorCode::NonSpaceCharactersInTable));
}

#[test]
fn select_ignores_disallowed_tags() {
    assert_tree(
        "<select><option>a<option>b<div>c</select>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <select>",
            "      <option>",
            "        \"a\"",
            "      <option>",
            "        \"bc\"",
        ],
    );
}

#[test]
fn select_in_table_closes_on_table_tags() {
    assert_tree(
        "<table><tr><td><select><td>x",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            <select>",
            "          <td>",
            "            \"x\"",
        ],
    );
}

#[test]
fn template_contents_live_in_a_separate_fragment() {
    assert_tree(
        "<template><td>x</td></template>",
        &[
            "<html>",
            "  <head>",
            "    <template>",
            "      content",
            "        <td>",
            "          \"x\"",
            "  <body>",
        ],
    );
}

#[test]
fn eof_inside_template_balances_the_stack() {
    assert_tree(
        "<template><div>",
        &[
            "<html>",
            "  <head>",
            "    <template>",
            "      content",
            "        <div>",
            "  <body>",
        ],
    );
}

#[test]
fn frameset_replaces_the_body_mode() {
    assert_tree(
        "<frameset><frame></frameset><noframes>x</noframes>",
        &[
            "<html>",
            "  <head>",
            "  <frameset>",
            "    <frame>",
            "  <noframes>",
            "    \"x\"",
        ],
    );
}

#[test]
fn nested_heading_closes_the_previous_one() {
    assert_tree(
        "<h1>a<h2>b",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <h1>",
            "      \"a\"",
            "    <h2>",
            "      \"b\"",
        ],
    );
}

#[test]
fn list_items_imply_their_end_tags() {
    assert_tree(
        "<ul><li>a<li>b</ul><dl><dt>c<dd>d</dl>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <ul>",
            "      <li>",
            "        \"a\"",
            "      <li>",
            "        \"b\"",
            "    <dl>",
            "      <dt>",
            "        \"c\"",
            "      <dd>",
            "        \"d\"",
        ],
    );
}

#[test]
fn head_elements_after_head_go_into_the_head() {
    let dom = parse("<head></head><title>T</title>");
    assert_eq!(
        dump(&dom),
        [
            "<html>",
            "  <head>",
            "    <title>",
            "      \"T\"",
            "  <body>",
        ]
        .join("\n")
    );
    assert!(dom
        .errors
        .borrow()
        .iter()
        .any(|e| e.code == ErrorCode::MisplacedStartTagForHeadElement));
}

#[test]
fn cdata_is_text_in_foreign_content_and_a_comment_in_html() {
    assert_tree(
        "<svg><![CDATA[x<y]]></svg>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      \"x<y\"",
        ],
    );

    let dom = parse("<body><![CDATA[x]]>");
    assert_eq!(
        dump(&dom),
        [
            "<html>",
            "  <head>",
            "  <body>",
            "    <!-- [CDATA[x]] -->",
        ]
        .join("\n")
    );
    assert!(dom
        .errors
        .borrow()
        .iter()
        .any(|e| e.code == ErrorCode::IncorrectlyOpenedComment));
}

#[test]
fn mathml_annotation_xml_with_html_encoding_hosts_html() {
    assert_tree(
        "<math><annotation-xml encoding=\"text/html\"><p>x</p></annotation-xml></math>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <math math>",
            "      <math annotation-xml encoding=\"text/html\">",
            "        <p>",
            "          \"x\"",
        ],
    );
}

#[test]
fn foreign_breakout_pops_back_to_html() {
    assert_tree(
        "<svg><circle></circle><p>x",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg circle>",
            "    <p>",
            "      \"x\"",
        ],
    );
}

#[test]
fn svg_names_and_attributes_are_case_adjusted() {
    assert_tree(
        "<svg><clippath clippathunits=\"userSpaceOnUse\"></clippath></svg>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg clipPath clipPathUnits=\"userSpaceOnUse\">",
        ],
    );
}

#[test]
fn xlink_attributes_gain_their_prefix() {
    assert_tree(
        "<svg><a xlink:href=\"#\"></a></svg>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <svg svg>",
            "      <svg a xlink:href=\"#\">",
        ],
    );
}

#[test]
fn plaintext_swallows_the_rest_of_the_input() {
    assert_tree(
        "<plaintext></plaintext><div>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <plaintext>",
            "      \"</plaintext><div>\"",
        ],
    );
}

#[test]
fn end_br_becomes_a_start_br() {
    let dom = parse("x</br>y");
    assert_eq!(
        dump(&dom),
        [
            "<html>",
            "  <head>",
            "  <body>",
            "    \"x\"",
            "    <br>",
            "    \"y\"",
        ]
        .join("\n")
    );
}

#[test]
fn image_is_rewritten_to_img() {
    let dom = parse("<image src=\"a\">");
    assert_eq!(
        dump(&dom),
        ["<html>", "  <head>", "  <body>", "    <img src=\"a\">"].join("\n")
    );
}

#[test]
fn doctype_selects_quirks_mode() {
    let dom = parse("<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 3.2 Final//EN\"><p>x");
    assert_eq!(dom.quirks_mode.get(), QuirksMode::Quirks);

    let dom = parse("<!DOCTYPE html><p>x");
    assert_eq!(dom.quirks_mode.get(), QuirksMode::NoQuirks);

    // No doctype at all is also quirks.
    let dom = parse("<p>x");
    assert_eq!(dom.quirks_mode.get(), QuirksMode::Quirks);
}

#[test]
fn misplaced_doctype_is_ignored_with_an_error() {
    let dom = parse("<p>x<!DOCTYPE html>");
    assert!(dom
        .errors
        .borrow()
        .iter()
        .any(|e| e.code == ErrorCode::DoctypeNotAllowed));
    assert!(!dump(&dom).contains("DOCTYPE"));
}

#[test]
fn pre_ignores_its_leading_newline() {
    assert_tree(
        "<pre>\nkeep</pre>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <pre>",
            "      \"keep\"",
        ],
    );
}

#[test]
fn error_locations_point_at_the_source() {
    let dom = parse("<p>ok\n\u{0}bad");
    let errors = dom.errors.borrow();
    let null_error = errors
        .iter()
        .find(|e| e.code == ErrorCode::UnexpectedNullCharacter)
        .expect("expected a null-character error");
    assert_eq!(null_error.location.line, 2);
    assert_eq!(null_error.location.column, 1);
}

#[test]
fn source_spans_are_recorded_when_requested() {
    use tidehtml::rcdom::NodeData;

    let mut opts = ParseOpts::default();
    opts.tree_builder.track_node_source_spans = true;
    let dom = parse_document(RcDom::default(), opts).one("<p>\n<div>x");

    let html = dom.document.children.borrow()[0].clone();
    let body = html.children.borrow()[1].clone();
    let children = body.children.borrow();
    let div = children
        .iter()
        .find(|n| matches!(&n.data, NodeData::Element { name, .. } if name.local == "div"))
        .expect("no div in body")
        .clone();
    match &div.data {
        NodeData::Element {
            source_location, ..
        } => {
            let span = source_location.expect("span missing");
            assert_eq!((span.line, span.column), (2, 2));
        }
        _ => unreachable!(),
    }
}

#[test]
fn stray_end_tags_are_ignored_with_an_error() {
    let dom = parse("<div>x</span></div>");
    assert_eq!(
        dump(&dom),
        [
            "<html>",
            "  <head>",
            "  <body>",
            "    <div>",
            "      \"x\"",
        ]
        .join("\n")
    );
    assert!(dom
        .errors
        .borrow()
        .iter()
        .any(|e| e.code == ErrorCode::EndTagWithoutMatchingOpenElement));
}

#[test]
fn colgroup_recovery_inside_table_body() {
    // A <colgroup> inside an open <tbody> pops back to the table and opens
    // a real column group rather than nesting where it stood.
    assert_tree(
        "<table><tbody><colgroup><col></table>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <tbody>",
            "      <colgroup>",
            "        <col>",
        ],
    );
}

#[test]
fn caption_closes_into_table_rows() {
    assert_tree(
        "<table><caption>cap<tr><td>x</table>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <table>",
            "      <caption>",
            "        \"cap\"",
            "      <tbody>",
            "        <tr>",
            "          <td>",
            "            \"x\"",
        ],
    );
}

#[test]
fn marquee_is_a_formatting_boundary() {
    // The marker pushed by <marquee> stops reconstruction of the outer <b>.
    assert_tree(
        "<b>1<marquee>2</marquee>",
        &[
            "<html>",
            "  <head>",
            "  <body>",
            "    <b>",
            "      \"1\"",
            "      <marquee>",
            "        \"2\"",
        ],
    );
}
