// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Round-trip laws: parse → serialize → parse reaches a fixed point.

mod common;

use common::{dump, parse};
use tidehtml::serialize::{serialize_to_string, SerializeOpts};

fn serialized(input: &str) -> String {
    let dom = parse(input);
    serialize_to_string(&dom.document, SerializeOpts::default())
}

/// parse(serialize(parse(x))) produces the same tree as parse(x).
fn assert_fixed_point(input: &str) {
    let first = parse(input);
    let html = serialize_to_string(&first.document, SerializeOpts::default());
    let second = parse(&html);
    assert_eq!(
        dump(&first),
        dump(&second),
        "\ninput {input:?} did not reach a fixed point; serialized as {html:?}"
    );

    // And the second iteration is a fixed point on the text as well.
    let html2 = serialize_to_string(&second.document, SerializeOpts::default());
    assert_eq!(html, html2);
}

#[test]
fn well_formed_documents_round_trip() {
    assert_fixed_point("<!DOCTYPE html><html><head><title>t</title></head><body><p>x</p></body></html>");
    assert_fixed_point("<table><tbody><tr><td>1</td><td>2</td></tr></tbody></table>");
    assert_fixed_point("<ul><li>a</li><li>b</li></ul>");
    assert_fixed_point("<div id=\"a\" class=\"b c\">text &amp; more</div>");
}

#[test]
fn malformed_documents_round_trip_after_recovery() {
    assert_fixed_point("<p>1<b>2<i>3</b>4</i>5</p>");
    assert_fixed_point("<table><tr><td>x<b>y</table>");
    assert_fixed_point("<ul><li>a<li>b");
    assert_fixed_point("<select><option>a<option>b</select>");
    assert_fixed_point("<h1>a<h2>b");
}

#[test]
fn foreign_content_round_trips() {
    assert_fixed_point("<svg><foreignObject><div>x</div></foreignObject></svg>");
    assert_fixed_point("<math><mi>x</mi></math>");
}

#[test]
fn serialized_output_is_plain_html() {
    assert_eq!(
        serialized("<p>x"),
        "<html><head></head><body><p>x</p></body></html>"
    );
    assert_eq!(
        serialized("<!DOCTYPE html>ok"),
        "<!DOCTYPE html><html><head></head><body>ok</body></html>"
    );
}
