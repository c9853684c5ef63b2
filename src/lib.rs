// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! tidehtml: a spec-faithful HTML5 parser with browser-grade error
//! recovery.
//!
//! Input text flows one way through the crate: a preprocessed scalar stream
//! feeds the [tokenizer], whose tokens feed the [tree builder], which
//! materializes a DOM through a [`TreeSink`] while collecting parse errors.
//! The bundled [`rcdom`] sink and [`serialize`] module give a working
//! document model out of the box:
//!
//! ```
//! use tidehtml::{parse_document, ParseOpts};
//! use tidehtml::rcdom::RcDom;
//!
//! let dom = parse_document(RcDom::default(), ParseOpts::default())
//!     .one("<title>Hi</title><p>Hello, world!");
//! ```
//!
//! Malformed input never fails: every error the WHATWG standard defines is
//! recorded with its spec identifier and source position, and parsing
//! continues with the standard's recovery behavior.
//!
//! [tokenizer]: tokenizer::Tokenizer
//! [tree builder]: tree_builder::TreeBuilder

pub use tendril;

pub mod driver;
pub mod errors;
pub mod interface;
pub mod rcdom;
pub mod serialize;
pub mod tokenizer;
pub mod tree_builder;

mod input;

pub use crate::driver::{parse_document, parse_fragment, CallerError, ParseOpts, Parser};
pub use crate::errors::{ErrorCode, Location, ParseError};
pub use crate::interface::{
    create_element, Attribute, ElementFlags, LocalName, Namespace, NodeOrText, QualName,
    QuirksMode, TreeSink,
};
