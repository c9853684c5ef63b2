// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shared helpers for the integration tests: parse into an `RcDom` and dump
//! trees in an indented one-node-per-line format so failures diff well.

// Each integration test crate uses a different subset of these helpers.
#![allow(dead_code)]

use tidehtml::rcdom::{Handle, NodeData, RcDom};
use tidehtml::{parse_document, Namespace, ParseOpts};

pub fn parse(input: &str) -> RcDom {
    let _ = env_logger::builder().is_test(true).try_init();
    parse_document(RcDom::default(), ParseOpts::default()).one(input)
}

pub fn dump(dom: &RcDom) -> String {
    let mut out = String::new();
    for child in dom.document.children.borrow().iter() {
        dump_node(child, 0, &mut out);
    }
    out.trim_end().to_string()
}

pub fn dump_node(node: &Handle, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match node.data {
        NodeData::Document => panic!("document inside the tree"),

        NodeData::Doctype { ref name, .. } => {
            out.push_str(&format!("{indent}<!DOCTYPE {name}>\n"));
        }

        NodeData::Text { ref contents } => {
            out.push_str(&format!("{indent}\"{}\"\n", &**contents.borrow()));
        }

        NodeData::Comment { ref contents } => {
            out.push_str(&format!("{indent}<!-- {contents} -->\n"));
        }

        NodeData::Element {
            ref name,
            ref attrs,
            ref template_contents,
            ..
        } => {
            let mut line = String::new();
            line.push('<');
            match name.ns {
                Some(Namespace::Svg) => line.push_str("svg "),
                Some(Namespace::MathMl) => line.push_str("math "),
                _ => (),
            }
            line.push_str(&name.local);
            for attr in attrs.borrow().iter() {
                line.push(' ');
                if let Some(prefix) = attr.name.prefix {
                    line.push_str(prefix);
                    line.push(':');
                }
                line.push_str(&attr.name.local);
                line.push_str(&format!("=\"{}\"", &*attr.value));
            }
            line.push('>');
            out.push_str(&format!("{indent}{line}\n"));

            if let Some(ref contents) = *template_contents.borrow() {
                out.push_str(&format!("{}content\n", "  ".repeat(depth + 1)));
                for child in contents.children.borrow().iter() {
                    dump_node(child, depth + 2, out);
                }
            }
            for child in node.children.borrow().iter() {
                dump_node(child, depth + 1, out);
            }
        }
    }
}

/// Parse `input` and assert the dumped tree equals `expected` (given as
/// lines).
pub fn assert_tree(input: &str, expected: &[&str]) {
    let dom = parse(input);
    let actual = dump(&dom);
    let expected = expected.join("\n");
    assert_eq!(
        actual, expected,
        "\ninput: {input:?}\n-- got --\n{actual}\n-- want --\n{expected}\n"
    );
}
