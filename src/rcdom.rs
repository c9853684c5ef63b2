// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A simple reference-counted DOM, and the crate's default [`TreeSink`].
//!
//! Sufficient as a static parse tree; don't build a web browser on it.
//! Nodes own their children and hold weak references to their parents, so a
//! detached subtree stays alive as long as someone holds a handle to it.
//!
//! The sink enforces the parser's tree-shape guarantees: a node is never
//! given a second parent, and re-attaching a node somewhere below itself is
//! impossible because every insertion demands a parentless child. Violations
//! are parser bugs and fail loudly instead of producing a malformed tree.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

use crate::errors::{Location, ParseError};
use crate::interface::{
    Attribute, ElementFlags, NodeOrText, QualName, QuirksMode, TreeSink,
};
use crate::tendril::StrTendril;

/// The different kinds of nodes in the DOM.
pub enum NodeData {
    /// The `Document` itself, the root of the tree. Also used for the
    /// contents fragment of a `<template>`.
    Document,

    /// A `DOCTYPE` with name, public id, and system id.
    Doctype {
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    },

    /// A text node.
    Text { contents: RefCell<StrTendril> },

    /// A comment.
    Comment { contents: StrTendril },

    /// An element with attributes.
    Element {
        name: QualName,
        attrs: RefCell<Vec<Attribute>>,

        /// For HTML `<template>` elements, the separate template contents.
        template_contents: RefCell<Option<Handle>>,

        /// Whether this is a MathML `annotation-xml` HTML integration point.
        mathml_annotation_xml_integration_point: bool,

        /// Where the start tag for this element began, if span tracking was
        /// requested.
        source_location: Option<Location>,
    },
}

/// A DOM node.
pub struct Node {
    /// Parent node.
    pub parent: Cell<Option<WeakHandle>>,
    /// Child nodes of this node.
    pub children: RefCell<Vec<Handle>>,
    /// Represents this node's data.
    pub data: NodeData,
}

impl Node {
    /// Create a new node from its contents.
    pub fn new(data: NodeData) -> Handle {
        Rc::new(Node {
            data,
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
        })
    }

    fn parent_node(&self) -> Option<WeakHandle> {
        let parent = self.parent.take();
        self.parent.set(parent.clone());
        parent
    }
}

impl Drop for Node {
    // Default recursive drop can blow the stack on deep documents; walk the
    // subtree iteratively instead.
    fn drop(&mut self) {
        let mut nodes = mem::take(&mut *self.children.borrow_mut());
        while let Some(node) = nodes.pop() {
            let children = mem::take(&mut *node.children.borrow_mut());
            nodes.extend(children);
            if let NodeData::Element {
                ref template_contents,
                ..
            } = node.data
            {
                if let Some(contents) = template_contents.borrow_mut().take() {
                    nodes.push(contents);
                }
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self.data {
            NodeData::Document => "Document".to_string(),
            NodeData::Doctype { ref name, .. } => format!("Doctype({name})"),
            NodeData::Text { ref contents } => format!("Text({:?})", &**contents.borrow()),
            NodeData::Comment { ref contents } => format!("Comment({:?})", &**contents),
            NodeData::Element { ref name, .. } => format!("Element({:?})", name.local),
        };
        fmt.debug_struct("Node")
            .field("data", &kind)
            .field("children", &self.children.borrow())
            .finish()
    }
}

/// Reference to a DOM node.
pub type Handle = Rc<Node>;

/// Weak reference to a DOM node, used for parent pointers.
pub type WeakHandle = Weak<Node>;

/// Append a parentless node to another node's children.
fn append(new_parent: &Handle, child: Handle) {
    let previous_parent = child.parent.replace(Some(Rc::downgrade(new_parent)));
    // Invariant: the child cannot already have a parent.
    assert!(
        previous_parent.is_none(),
        "node appended while still attached"
    );
    new_parent.children.borrow_mut().push(child);
}

/// If the node has a parent, get it and this node's position in its
/// children.
fn get_parent_and_index(target: &Handle) -> Option<(Handle, usize)> {
    let weak = target.parent_node()?;
    let parent = weak.upgrade().expect("dangling weak pointer");
    let i = parent
        .children
        .borrow()
        .iter()
        .position(|child| Rc::ptr_eq(child, target))
        .expect("have parent but couldn't find in parent's children");
    Some((parent, i))
}

fn append_to_existing_text(prev: &Handle, text: &str) -> bool {
    match prev.data {
        NodeData::Text { ref contents } => {
            contents.borrow_mut().push_slice(text);
            true
        }
        _ => false,
    }
}

fn remove_from_parent(target: &Handle) {
    if let Some((parent, i)) = get_parent_and_index(target) {
        parent.children.borrow_mut().remove(i);
        target.parent.set(None);
    }
}

/// The DOM itself; the result of parsing.
pub struct RcDom {
    /// The `Document` itself.
    pub document: Handle,

    /// Errors that occurred during parsing, in input order.
    pub errors: RefCell<Vec<ParseError>>,

    /// The document's quirks mode.
    pub quirks_mode: Cell<QuirksMode>,
}

impl Default for RcDom {
    fn default() -> RcDom {
        RcDom {
            document: Node::new(NodeData::Document),
            errors: RefCell::new(vec![]),
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
        }
    }
}

impl TreeSink for RcDom {
    type Output = Self;
    type Handle = Handle;

    fn finish(self) -> Self {
        self
    }

    fn parse_error(&self, err: ParseError) {
        self.errors.borrow_mut().push(err);
    }

    fn get_document(&self) -> Handle {
        self.document.clone()
    }

    fn get_template_contents(&self, target: &Handle) -> Handle {
        if let NodeData::Element {
            ref template_contents,
            ..
        } = target.data
        {
            template_contents
                .borrow()
                .as_ref()
                .expect("not a template element")
                .clone()
        } else {
            panic!("not a template element")
        }
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        self.quirks_mode.set(mode);
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        Rc::ptr_eq(x, y)
    }

    fn elem_name(&self, target: &Handle) -> QualName {
        match target.data {
            NodeData::Element { ref name, .. } => name.clone(),
            _ => panic!("not an element"),
        }
    }

    fn create_element(&self, name: QualName, attrs: Vec<Attribute>, flags: ElementFlags) -> Handle {
        Node::new(NodeData::Element {
            name,
            attrs: RefCell::new(attrs),
            template_contents: RefCell::new(if flags.template {
                Some(Node::new(NodeData::Document))
            } else {
                None
            }),
            mathml_annotation_xml_integration_point: flags
                .mathml_annotation_xml_integration_point,
            source_location: flags.source_location,
        })
    }

    fn create_comment(&self, text: StrTendril) -> Handle {
        Node::new(NodeData::Comment { contents: text })
    }

    fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
        // Append to an existing Text node if we have one.
        if let NodeOrText::AppendText(text) = &child {
            if let Some(h) = parent.children.borrow().last() {
                if append_to_existing_text(h, text) {
                    return;
                }
            }
        }

        append(
            parent,
            match child {
                NodeOrText::AppendText(text) => Node::new(NodeData::Text {
                    contents: RefCell::new(text),
                }),
                NodeOrText::AppendNode(node) => node,
            },
        );
    }

    fn append_before_sibling(&self, sibling: &Handle, child: NodeOrText<Handle>) {
        let (parent, i) =
            get_parent_and_index(sibling).expect("append_before_sibling called on detached node");

        let child = match (child, i) {
            // No previous node.
            (NodeOrText::AppendText(text), 0) => Node::new(NodeData::Text {
                contents: RefCell::new(text),
            }),

            // Look for a text node before the insertion point.
            (NodeOrText::AppendText(text), i) => {
                let children = parent.children.borrow();
                let prev = &children[i - 1];
                if append_to_existing_text(prev, &text) {
                    return;
                }
                Node::new(NodeData::Text {
                    contents: RefCell::new(text),
                })
            }

            // The tree builder promises there is no text node after the
            // insertion point.
            (NodeOrText::AppendNode(node), _) => node,
        };

        remove_from_parent(&child);

        child.parent.set(Some(Rc::downgrade(&parent)));
        parent.children.borrow_mut().insert(i, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Handle,
        prev_element: &Handle,
        child: NodeOrText<Handle>,
    ) {
        let has_parent = element.parent_node().is_some();

        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        append(
            &self.document,
            Node::new(NodeData::Doctype {
                name,
                public_id,
                system_id,
            }),
        );
    }

    fn add_attrs_if_missing(&self, target: &Handle, attrs: Vec<Attribute>) {
        let mut existing = if let NodeData::Element { ref attrs, .. } = target.data {
            attrs.borrow_mut()
        } else {
            panic!("not an element")
        };

        let existing_names = existing
            .iter()
            .map(|e| e.name.clone())
            .collect::<HashSet<_>>();
        existing.extend(
            attrs
                .into_iter()
                .filter(|attr| !existing_names.contains(&attr.name)),
        );
    }

    fn remove_from_parent(&self, target: &Handle) {
        remove_from_parent(target);
    }

    fn reparent_children(&self, node: &Handle, new_parent: &Handle) {
        let mut children = node.children.borrow_mut();
        let mut new_children = new_parent.children.borrow_mut();
        for child in children.iter() {
            let previous_parent = child.parent.replace(Some(Rc::downgrade(new_parent)));
            assert!(Rc::ptr_eq(
                node,
                &previous_parent
                    .expect("child has no parent")
                    .upgrade()
                    .expect("dangling weak")
            ));
        }
        new_children.extend(mem::take(&mut *children));
    }

    fn is_mathml_annotation_xml_integration_point(&self, target: &Handle) -> bool {
        if let NodeData::Element {
            mathml_annotation_xml_integration_point,
            ..
        } = target.data
        {
            mathml_annotation_xml_integration_point
        } else {
            panic!("not an element")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{AppendNode, AppendText};

    fn element(local: &str) -> Handle {
        Node::new(NodeData::Element {
            name: QualName::html(local),
            attrs: RefCell::new(vec![]),
            template_contents: RefCell::new(None),
            mathml_annotation_xml_integration_point: false,
            source_location: None,
        })
    }

    #[test]
    fn append_coalesces_text() {
        let dom = RcDom::default();
        let div = element("div");
        dom.append(&div, AppendText(StrTendril::from_slice("a")));
        dom.append(&div, AppendText(StrTendril::from_slice("b")));
        let children = div.children.borrow();
        assert_eq!(children.len(), 1);
        match children[0].data {
            NodeData::Text { ref contents } => assert_eq!(&**contents.borrow(), "ab"),
            _ => panic!("expected a text node"),
        }
    }

    #[test]
    fn append_based_on_parent_node_picks_a_side() {
        let dom = RcDom::default();
        let parent = element("div");
        let table = element("table");
        let fallback = element("p");
        dom.append(&parent, AppendNode(table.clone()));

        // Table has a parent: insert before it.
        dom.append_based_on_parent_node(&table, &fallback, AppendNode(element("a")));
        assert_eq!(parent.children.borrow().len(), 2);

        // Detached table: insert into the previous element instead.
        remove_from_parent(&table);
        dom.append_based_on_parent_node(&table, &fallback, AppendNode(element("b")));
        assert_eq!(fallback.children.borrow().len(), 1);
    }

    #[test]
    #[should_panic(expected = "still attached")]
    fn double_parenting_is_rejected() {
        let dom = RcDom::default();
        let a = element("a");
        let b = element("b");
        let child = element("span");
        dom.append(&a, AppendNode(child.clone()));
        dom.append(&b, AppendNode(child));
    }
}
