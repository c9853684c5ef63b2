// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Types used within the tree builder code. Not exported to users.

use crate::tendril::StrTendril;
use crate::tokenizer::states::RawKind;
use crate::tokenizer::Tag;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub(crate) enum InsertionMode {
    Initial,
    BeforeHtml,
    BeforeHead,
    InHead,
    InHeadNoscript,
    AfterHead,
    InBody,
    Text,
    InTable,
    InTableText,
    InCaption,
    InColumnGroup,
    InTableBody,
    InRow,
    InCell,
    InSelect,
    InSelectInTable,
    InTemplate,
    AfterBody,
    InFrameset,
    AfterFrameset,
    AfterAfterBody,
    AfterAfterFrameset,
}

/// A subset/refinement of `tokenizer::Token`. DOCTYPE and parse-error
/// handling happens at the start of `process_token`; everything else is
/// converted to this local type.
#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) enum Token {
    Tag(Tag),
    Comment(StrTendril),
    Character(char),
    NullCharacter,
    Eof,
}

pub(crate) enum ProcessResult {
    Done,
    DoneAckSelfClosing,
    Reprocess(InsertionMode, Token),
    ToPlaintext,
    ToRawData(RawKind),
}

pub(crate) enum FormatEntry<Handle> {
    Element(Handle, Tag),
    Marker,
}

pub(crate) enum InsertionPoint<Handle> {
    /// Insert as last child of this parent.
    LastChild(Handle),
    /// Foster parenting: insertion point is decided by whether the table
    /// element has a parent node.
    TableFosterParenting {
        element: Handle,
        prev_element: Handle,
    },
}
