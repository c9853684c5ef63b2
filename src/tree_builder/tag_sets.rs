// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named sets of HTML tags: scope terminators, the "special" category,
//! implied-end-tag sets, and the foreign integration points.
//!
//! Each set is a predicate over a qualified name so callers can compose
//! them with closures.

use crate::interface::{Namespace, QualName};

/// Define a predicate that is true for the listed HTML-namespace tags.
macro_rules! declare_tag_set (
    (pub $name:ident = $($tag:tt)*) => {
        pub(crate) fn $name(name: &QualName) -> bool {
            name.ns == Some(Namespace::Html) && matches!(&*name.local, $($tag)|*)
        }
    };
);

declare_tag_set!(pub heading_tag = "h1" "h2" "h3" "h4" "h5" "h6");

declare_tag_set!(pub table_scope = "html" "table" "template");

declare_tag_set!(pub td_th = "td" "th");

declare_tag_set!(pub cursory_implied_end =
    "dd" "dt" "li" "option" "optgroup" "p" "rb" "rp" "rt" "rtc");

declare_tag_set!(pub thorough_implied_end =
    "dd" "dt" "li" "option" "optgroup" "p" "rb" "rp" "rt" "rtc"
    "caption" "colgroup" "tbody" "td" "tfoot" "th" "thead" "tr");

declare_tag_set!(pub table_body_context = "tbody" "tfoot" "thead" "template" "html");

declare_tag_set!(pub table_row_context = "tr" "template" "html");

declare_tag_set!(pub impromptu_body_end_ok =
    "dd" "dt" "li" "optgroup" "option" "p" "rb" "rp" "rt" "rtc" "tbody" "td"
    "tfoot" "th" "thead" "tr" "body" "html");

declare_tag_set!(pub table_foster_target = "table" "tbody" "tfoot" "thead" "tr");

/// The base "in scope" terminator set.
pub(crate) fn default_scope(name: &QualName) -> bool {
    match name.ns {
        Some(Namespace::Html) => matches!(
            &*name.local,
            "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object"
                | "template"
        ),
        Some(Namespace::MathMl) => mathml_text_integration_point(name)
            || name.local == "annotation-xml",
        Some(Namespace::Svg) => svg_html_integration_point(name),
        _ => false,
    }
}

pub(crate) fn button_scope(name: &QualName) -> bool {
    default_scope(name) || name.is_html("button")
}

pub(crate) fn list_item_scope(name: &QualName) -> bool {
    default_scope(name) || name.is_html("ol") || name.is_html("ul")
}

/// Select scope is inverted: everything terminates it except `optgroup`
/// and `option`.
pub(crate) fn select_scope(name: &QualName) -> bool {
    !(name.is_html("optgroup") || name.is_html("option"))
}

/// The spec's "special" category.
pub(crate) fn special_tag(name: &QualName) -> bool {
    match name.ns {
        Some(Namespace::Html) => matches!(
            &*name.local,
            "address" | "applet" | "area" | "article" | "aside" | "base" | "basefont"
                | "bgsound" | "blockquote" | "body" | "br" | "button" | "caption" | "center"
                | "col" | "colgroup" | "dd" | "details" | "dialog" | "dir" | "div" | "dl"
                | "dt" | "embed" | "fieldset" | "figcaption" | "figure" | "footer" | "form"
                | "frame" | "frameset" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "head"
                | "header" | "hgroup" | "hr" | "html" | "iframe" | "img" | "input" | "keygen"
                | "li" | "link" | "listing" | "main" | "marquee" | "menu" | "meta" | "nav"
                | "noembed" | "noframes" | "noscript" | "object" | "ol" | "p" | "param"
                | "plaintext" | "pre" | "script" | "search" | "section" | "select" | "source"
                | "style" | "summary" | "table" | "tbody" | "td" | "template" | "textarea"
                | "tfoot" | "th" | "thead" | "title" | "tr" | "track" | "ul" | "wbr" | "xmp"
        ),
        Some(Namespace::MathMl) => matches!(
            &*name.local,
            "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
        ),
        Some(Namespace::Svg) => matches!(&*name.local, "foreignObject" | "desc" | "title"),
        _ => false,
    }
}

/// MathML text integration points: HTML rules apply directly inside.
pub(crate) fn mathml_text_integration_point(name: &QualName) -> bool {
    name.ns == Some(Namespace::MathMl)
        && matches!(&*name.local, "mi" | "mo" | "mn" | "ms" | "mtext")
}

/// SVG HTML integration points.
pub(crate) fn svg_html_integration_point(name: &QualName) -> bool {
    name.ns == Some(Namespace::Svg)
        && matches!(&*name.local, "foreignObject" | "desc" | "title")
}

/// Start tags that break out of foreign content back into HTML parsing.
pub(crate) fn html_breakout_tag(local: &str) -> bool {
    matches!(
        local,
        "b" | "big" | "blockquote" | "body" | "br" | "center" | "code" | "dd" | "div" | "dl"
            | "dt" | "em" | "embed" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "head" | "hr"
            | "i" | "img" | "li" | "listing" | "menu" | "meta" | "nobr" | "ol" | "p" | "pre"
            | "ruby" | "s" | "small" | "span" | "strong" | "strike" | "sub" | "sup" | "table"
            | "tt" | "u" | "ul" | "var"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{Namespace, QualName};

    #[test]
    fn scopes_are_namespace_aware() {
        assert!(default_scope(&QualName::html("table")));
        assert!(!default_scope(&QualName::html("div")));
        assert!(default_scope(&QualName::new(Namespace::Svg, "foreignObject")));
        assert!(default_scope(&QualName::new(Namespace::MathMl, "mtext")));
        assert!(!special_tag(&QualName::new(Namespace::Svg, "rect")));
        assert!(button_scope(&QualName::html("button")));
        assert!(select_scope(&QualName::html("table")));
        assert!(!select_scope(&QualName::html("option")));
    }
}
