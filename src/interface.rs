// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Names, attributes, and the `TreeSink` contract between the tree
//! constructor and the DOM it materializes.

use crate::errors::{Location, ParseError};
use crate::tendril::StrTendril;

pub use self::QuirksMode::{LimitedQuirks, NoQuirks, Quirks};

/// A lowercase tag or attribute local name.
pub type LocalName = String;

/// The namespaces an element or adjusted attribute can live in.
///
/// Unprefixed elements default to HTML; attributes normally carry no
/// namespace at all (`QualName::ns == None`) until foreign-content
/// adjustment assigns one.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Debug)]
pub enum Namespace {
    Html,
    MathMl,
    Svg,
    XLink,
    Xml,
    Xmlns,
}

impl Namespace {
    /// The namespace URL, as used in DOM APIs and serialized output.
    pub fn url(&self) -> &'static str {
        match *self {
            Namespace::Html => "http://www.w3.org/1999/xhtml",
            Namespace::MathMl => "http://www.w3.org/1998/Math/MathML",
            Namespace::Svg => "http://www.w3.org/2000/svg",
            Namespace::XLink => "http://www.w3.org/1999/xlink",
            Namespace::Xml => "http://www.w3.org/XML/1998/namespace",
            Namespace::Xmlns => "http://www.w3.org/2000/xmlns/",
        }
    }
}

/// A namespace-qualified name for an element or attribute.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Debug)]
pub struct QualName {
    /// Serialization prefix, only ever set by foreign-attribute adjustment
    /// (`xlink:`, `xml:`, `xmlns:`).
    pub prefix: Option<&'static str>,
    /// `None` for ordinary attributes, `Some` for elements and adjusted
    /// attributes.
    pub ns: Option<Namespace>,
    pub local: LocalName,
}

impl QualName {
    pub fn new(ns: Namespace, local: impl Into<LocalName>) -> QualName {
        QualName {
            prefix: None,
            ns: Some(ns),
            local: local.into(),
        }
    }

    pub fn html(local: impl Into<LocalName>) -> QualName {
        QualName::new(Namespace::Html, local)
    }

    /// An attribute name in no namespace.
    pub fn attribute(local: impl Into<LocalName>) -> QualName {
        QualName {
            prefix: None,
            ns: None,
            local: local.into(),
        }
    }

    pub fn prefixed(prefix: &'static str, ns: Namespace, local: impl Into<LocalName>) -> QualName {
        QualName {
            prefix: Some(prefix),
            ns: Some(ns),
            local: local.into(),
        }
    }

    pub fn is_html(&self, local: &str) -> bool {
        self.ns == Some(Namespace::Html) && self.local == local
    }

    pub fn is_mathml(&self, local: &str) -> bool {
        self.ns == Some(Namespace::MathMl) && self.local == local
    }

    pub fn is_svg(&self, local: &str) -> bool {
        self.ns == Some(Namespace::Svg) && self.local == local
    }
}

/// A tag attribute. Values keep their source text; names are ASCII-lowered
/// by the tokenizer.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct Attribute {
    pub name: QualName,
    pub value: StrTendril,
}

/// Document quirks mode, set from DOCTYPE analysis.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum QuirksMode {
    Quirks,
    LimitedQuirks,
    NoQuirks,
}

/// A new node, or text to be merged into a trailing text node.
pub enum NodeOrText<Handle> {
    AppendNode(Handle),
    AppendText(StrTendril),
}

pub use self::NodeOrText::{AppendNode, AppendText};

/// Per-element facts the sink needs at creation time.
#[derive(Clone, Default, Debug)]
pub struct ElementFlags {
    /// An HTML `<template>`: the sink must allocate separate template
    /// contents for it.
    pub template: bool,

    /// A MathML `<annotation-xml>` whose `encoding` is `text/html` or
    /// `application/xhtml+xml`, which makes it an HTML integration point.
    pub mathml_annotation_xml_integration_point: bool,

    /// Source position of the start tag, when span tracking is enabled.
    pub source_location: Option<Location>,
}

/// Compute `ElementFlags` and create an element through the sink.
pub fn create_element<Sink>(
    sink: &Sink,
    name: QualName,
    attrs: Vec<Attribute>,
    source_location: Option<Location>,
) -> Sink::Handle
where
    Sink: TreeSink,
{
    let mut flags = ElementFlags {
        source_location,
        ..ElementFlags::default()
    };
    match (name.ns, &*name.local) {
        (Some(Namespace::Html), "template") => flags.template = true,
        (Some(Namespace::MathMl), "annotation-xml") => {
            flags.mathml_annotation_xml_integration_point = attrs.iter().any(|attr| {
                attr.name.ns.is_none()
                    && attr.name.local == "encoding"
                    && (attr.value.eq_ignore_ascii_case("text/html")
                        || attr.value.eq_ignore_ascii_case("application/xhtml+xml"))
            });
        }
        _ => (),
    }
    sink.create_element(name, attrs, flags)
}

/// The object the tree constructor builds a DOM through.
///
/// All operations are infallible. Operations that would violate tree shape
/// (give a node a second parent, create a cycle) are parser bugs; a sink is
/// expected to reject them loudly rather than produce a malformed tree.
pub trait TreeSink {
    /// Reference to a node. Cloning a handle must be cheap and must alias
    /// the same node.
    type Handle: Clone;

    /// What `finish` returns: usually the sink itself.
    type Output;

    /// Consume the sink after parsing completes.
    fn finish(self) -> Self::Output;

    /// Record a recoverable parse error.
    fn parse_error(&self, err: ParseError);

    /// The `Document` node.
    fn get_document(&self) -> Self::Handle;

    /// The separate contents fragment of a `<template>` element.
    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle;

    /// Do the two handles refer to the same node?
    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool;

    /// The qualified name of an element node.
    fn elem_name(&self, target: &Self::Handle) -> QualName;

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle;

    fn create_comment(&self, text: StrTendril) -> Self::Handle;

    /// Append as last child; text may coalesce with a trailing text node.
    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>);

    /// Insert immediately before `sibling`; text may coalesce with the node
    /// preceding the insertion point.
    fn append_before_sibling(&self, sibling: &Self::Handle, child: NodeOrText<Self::Handle>);

    /// Foster-parenting insert: before `element` if it has a parent,
    /// otherwise as last child of `prev_element`.
    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    );

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    );

    /// Add any attribute whose name is not already present on `target`.
    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>);

    /// Detach `target` from its parent, if any.
    fn remove_from_parent(&self, target: &Self::Handle);

    /// Move all children of `node` to `new_parent`, preserving order.
    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle);

    fn is_mathml_annotation_xml_integration_point(&self, _target: &Self::Handle) -> bool {
        false
    }

    fn set_quirks_mode(&self, mode: QuirksMode);
}

#[cfg(test)]
mod tests {
    use super::{Namespace, QualName};

    #[test]
    fn qualified_name_queries_respect_the_namespace() {
        assert!(QualName::html("td").is_html("td"));
        assert!(!QualName::new(Namespace::Svg, "title").is_html("title"));
        assert!(QualName::new(Namespace::MathMl, "mi").is_mathml("mi"));
        assert!(QualName::attribute("href").ns.is_none());
    }

    #[test]
    fn namespace_urls_match_the_dom() {
        assert_eq!(Namespace::Html.url(), "http://www.w3.org/1999/xhtml");
        assert_eq!(Namespace::Svg.url(), "http://www.w3.org/2000/svg");
    }
}
