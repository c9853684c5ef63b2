// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! HTML fragment serialization for [`RcDom`](crate::rcdom::RcDom) trees.
//!
//! Follows the fragment-serialization algorithm: void elements have no end
//! tag, raw-text element content is written verbatim, everything else is
//! escaped, and the parser-eaten newline at the start of `pre`, `textarea`,
//! and `listing` content is put back.

//§ serializing-html-fragments

use std::io::{self, Write};

use crate::interface::{LocalName, Namespace, QualName};
use crate::rcdom::{Handle, NodeData};

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum TraversalScope {
    IncludeNode,
    ChildrenOnly,
}

#[derive(Copy, Clone)]
pub struct SerializeOpts {
    /// Serialize the root node, or only its children? Default: ChildrenOnly.
    pub traversal_scope: TraversalScope,
}

impl Default for SerializeOpts {
    fn default() -> SerializeOpts {
        SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly,
        }
    }
}

/// Serialize a node (or its children) as HTML text.
pub fn serialize<Wr: Write>(writer: &mut Wr, node: &Handle, opts: SerializeOpts) -> io::Result<()> {
    let mut ser = HtmlSerializer::new(writer);
    match opts.traversal_scope {
        TraversalScope::IncludeNode => ser.serialize_node(node),
        TraversalScope::ChildrenOnly => ser.serialize_children(node),
    }
}

/// Convenience wrapper producing a `String`.
pub fn serialize_to_string(node: &Handle, opts: SerializeOpts) -> String {
    let mut buf = Vec::new();
    serialize(&mut buf, node, opts).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("serializer wrote invalid UTF-8")
}

struct ElemInfo {
    html_name: Option<LocalName>,
    ignore_children: bool,
    processed_first_child: bool,
}

struct HtmlSerializer<'wr, Wr> {
    writer: &'wr mut Wr,
    stack: Vec<ElemInfo>,
}

fn is_void_element(name: &QualName) -> bool {
    name.ns == Some(Namespace::Html)
        && matches!(
            &*name.local,
            "area" | "base" | "basefont" | "bgsound" | "br" | "col" | "embed" | "frame" | "hr"
                | "img" | "input" | "keygen" | "link" | "meta" | "param" | "source" | "track"
                | "wbr"
        )
}

fn writes_raw_text(html_name: &Option<LocalName>) -> bool {
    match html_name {
        Some(name) => matches!(
            &**name,
            "style" | "script" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
        ),
        None => false,
    }
}

impl<'wr, Wr: Write> HtmlSerializer<'wr, Wr> {
    fn new(writer: &'wr mut Wr) -> HtmlSerializer<'wr, Wr> {
        HtmlSerializer {
            writer,
            stack: vec![ElemInfo {
                html_name: None,
                ignore_children: false,
                processed_first_child: false,
            }],
        }
    }

    fn parent(&mut self) -> &mut ElemInfo {
        self.stack.last_mut().expect("no parent ElemInfo")
    }

    fn write_escaped(&mut self, text: &str, attr_mode: bool) -> io::Result<()> {
        for c in text.chars() {
            match c {
                '&' => self.writer.write_all(b"&amp;")?,
                '\u{00A0}' => self.writer.write_all(b"&nbsp;")?,
                '"' if attr_mode => self.writer.write_all(b"&quot;")?,
                '<' if !attr_mode => self.writer.write_all(b"&lt;")?,
                '>' if !attr_mode => self.writer.write_all(b"&gt;")?,
                c => write!(self.writer, "{c}")?,
            }
        }
        Ok(())
    }

    fn serialize_children(&mut self, node: &Handle) -> io::Result<()> {
        for child in node.children.borrow().iter() {
            self.serialize_node(child)?;
        }
        Ok(())
    }

    fn serialize_node(&mut self, node: &Handle) -> io::Result<()> {
        match node.data {
            NodeData::Element {
                ref name,
                ref attrs,
                ref template_contents,
                ..
            } => {
                self.start_elem(name, &attrs.borrow())?;
                match &*template_contents.borrow() {
                    Some(contents) => self.serialize_children(contents)?,
                    None => self.serialize_children(node)?,
                }
                self.end_elem(name)
            }

            NodeData::Doctype { ref name, .. } => {
                write!(self.writer, "<!DOCTYPE {name}>")
            }

            NodeData::Text { ref contents } => self.write_text(&contents.borrow()),

            NodeData::Comment { ref contents } => {
                write!(self.writer, "<!--{contents}-->")
            }

            NodeData::Document => panic!("can't serialize the Document node itself"),
        }
    }

    fn start_elem(&mut self, name: &QualName, attrs: &[crate::interface::Attribute]) -> io::Result<()> {
        let html_name = match name.ns {
            Some(Namespace::Html) => Some(name.local.clone()),
            _ => None,
        };

        if self.parent().ignore_children {
            self.stack.push(ElemInfo {
                html_name,
                ignore_children: true,
                processed_first_child: false,
            });
            return Ok(());
        }

        self.writer.write_all(b"<")?;
        self.writer.write_all(name.local.as_bytes())?;
        for attr in attrs {
            self.writer.write_all(b" ")?;
            match attr.name.ns {
                None => (),
                Some(Namespace::Xml) => self.writer.write_all(b"xml:")?,
                Some(Namespace::XLink) => self.writer.write_all(b"xlink:")?,
                Some(Namespace::Xmlns) => {
                    if attr.name.local != "xmlns" {
                        self.writer.write_all(b"xmlns:")?;
                    }
                }
                Some(_) => (),
            }
            self.writer.write_all(attr.name.local.as_bytes())?;
            self.writer.write_all(b"=\"")?;
            self.write_escaped(&attr.value, true)?;
            self.writer.write_all(b"\"")?;
        }
        self.writer.write_all(b">")?;

        let ignore_children = is_void_element(name);

        self.parent().processed_first_child = true;

        self.stack.push(ElemInfo {
            html_name,
            ignore_children,
            processed_first_child: false,
        });

        Ok(())
    }

    fn end_elem(&mut self, name: &QualName) -> io::Result<()> {
        let info = self.stack.pop().expect("no ElemInfo");
        if info.ignore_children {
            return Ok(());
        }

        self.writer.write_all(b"</")?;
        self.writer.write_all(name.local.as_bytes())?;
        self.writer.write_all(b">")
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let prepend_lf = text.starts_with('\n') && {
            let parent = self.parent();
            !parent.processed_first_child
                && matches!(
                    parent.html_name.as_deref(),
                    Some("pre" | "textarea" | "listing")
                )
        };

        if prepend_lf {
            self.writer.write_all(b"\n")?;
        }

        self.parent().processed_first_child = true;

        if writes_raw_text(&self.parent().html_name) {
            self.writer.write_all(text.as_bytes())
        } else {
            self.write_escaped(text, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{serialize_to_string, SerializeOpts};
    use crate::driver::{parse_document, ParseOpts};
    use crate::rcdom::RcDom;

    fn round(input: &str) -> String {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(input);
        serialize_to_string(&dom.document, SerializeOpts::default())
    }

    #[test]
    fn escapes_text_but_not_raw_elements() {
        assert_eq!(
            round("<style>a < b</style><p>a &lt; b</p>"),
            "<html><head><style>a < b</style></head><body><p>a &lt; b</p></body></html>"
        );
    }

    #[test]
    fn void_elements_have_no_end_tag() {
        assert_eq!(
            round("<p>x<br>y"),
            "<html><head></head><body><p>x<br>y</p></body></html>"
        );
    }

    #[test]
    fn pre_newline_round_trips() {
        // The parser eats the first newline; a kept one is re-doubled so the
        // output parses back to the same text.
        assert_eq!(
            round("<pre>\n\nkeep</pre>"),
            "<html><head></head><body><pre>\n\nkeep</pre></body></html>"
        );
    }

    #[test]
    fn attribute_values_are_quoted_and_escaped() {
        assert_eq!(
            round(r#"<div title='a"b'></div>"#),
            r#"<html><head></head><body><div title="a&quot;b"></div></body></html>"#
        );
    }
}
