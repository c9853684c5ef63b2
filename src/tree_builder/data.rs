// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! DOCTYPE analysis: which doctypes are conforming, and which quirks mode
//! a given doctype selects.

use crate::interface::QuirksMode::{self, LimitedQuirks, NoQuirks, Quirks};
use crate::tokenizer::Doctype;

// All lowercase, for ASCII case-insensitive matching.
static QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

static QUIRKY_PUBLIC_MATCHES: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

static QUIRKY_SYSTEM_MATCHES: &[&str] =
    &["http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd"];

static LIMITED_QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

// These select quirks modes only when a system identifier is present.
static HTML4_PUBLIC_PREFIXES: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

fn opt_eq_ignore_case(id: &Option<crate::tendril::StrTendril>, expected: &str) -> bool {
    match id {
        Some(s) => s.eq_ignore_ascii_case(expected),
        None => false,
    }
}

fn contains_match(haystack: &[&str], needle: &str) -> bool {
    haystack.iter().any(|x| needle.eq_ignore_ascii_case(x))
}

fn contains_prefix(haystack: &[&str], needle: &str) -> bool {
    haystack.iter().any(|&x| {
        needle.len() >= x.len()
            && needle.is_char_boundary(x.len())
            && needle[..x.len()].eq_ignore_ascii_case(x)
    })
}

fn is_conforming(doctype: &Doctype) -> bool {
    let name_is_html = matches!(&doctype.name, Some(name) if &**name == "html");
    let system = &doctype.system_id;
    let has_system = system.is_some();

    if !name_is_html {
        false
    } else if doctype.public_id.is_none() {
        !has_system || opt_eq_ignore_case(system, "about:legacy-compat")
    } else {
        // A couple of obsolete-permitted doctypes.
        let public = &doctype.public_id;
        if opt_eq_ignore_case(public, "-//W3C//DTD HTML 4.0//EN") {
            !has_system || opt_eq_ignore_case(system, "http://www.w3.org/TR/REC-html40/strict.dtd")
        } else if opt_eq_ignore_case(public, "-//W3C//DTD HTML 4.01//EN") {
            !has_system || opt_eq_ignore_case(system, "http://www.w3.org/TR/html4/strict.dtd")
        } else if opt_eq_ignore_case(public, "-//W3C//DTD XHTML 1.0 Strict//EN") {
            opt_eq_ignore_case(system, "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd")
        } else if opt_eq_ignore_case(public, "-//W3C//DTD XHTML 1.1//EN") {
            opt_eq_ignore_case(system, "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd")
        } else {
            false
        }
    }
}

/// Is this doctype an error, and what quirks mode does it select?
pub(crate) fn doctype_error_and_quirks(doctype: &Doctype, iframe_srcdoc: bool) -> (bool, QuirksMode) {
    let err = !is_conforming(doctype);

    let name_is_html = matches!(&doctype.name, Some(name) if &**name == "html");
    let public = doctype.public_id.as_deref().unwrap_or("");
    let has_public = doctype.public_id.is_some();
    let system = doctype.system_id.as_deref().unwrap_or("");
    let has_system = doctype.system_id.is_some();

    let quirk = if iframe_srcdoc {
        NoQuirks
    } else if doctype.force_quirks
        || !name_is_html
        || (has_public && contains_match(QUIRKY_PUBLIC_MATCHES, public))
        || (has_system && contains_match(QUIRKY_SYSTEM_MATCHES, system))
        || contains_prefix(QUIRKY_PUBLIC_PREFIXES, public)
        || (!has_system && contains_prefix(HTML4_PUBLIC_PREFIXES, public))
    {
        Quirks
    } else if contains_prefix(LIMITED_QUIRKY_PUBLIC_PREFIXES, public)
        || (has_system && contains_prefix(HTML4_PUBLIC_PREFIXES, public))
    {
        LimitedQuirks
    } else {
        NoQuirks
    };

    (err, quirk)
}

#[cfg(test)]
mod tests {
    use super::doctype_error_and_quirks;
    use crate::interface::QuirksMode::{LimitedQuirks, NoQuirks, Quirks};
    use crate::tendril::StrTendril;
    use crate::tokenizer::Doctype;

    fn dt(name: Option<&str>, public: Option<&str>, system: Option<&str>) -> Doctype {
        Doctype {
            name: name.map(StrTendril::from_slice),
            public_id: public.map(StrTendril::from_slice),
            system_id: system.map(StrTendril::from_slice),
            force_quirks: false,
        }
    }

    #[test]
    fn modern_doctype_is_conforming() {
        assert_eq!(
            doctype_error_and_quirks(&dt(Some("html"), None, None), false),
            (false, NoQuirks)
        );
    }

    #[test]
    fn html32_is_quirky() {
        let d = dt(Some("html"), Some("-//W3C//DTD HTML 3.2 Final//EN"), None);
        assert_eq!(doctype_error_and_quirks(&d, false), (true, Quirks));
    }

    #[test]
    fn html401_transitional_depends_on_system_id() {
        let public = Some("-//W3C//DTD HTML 4.01 Transitional//EN");
        let no_system = dt(Some("html"), public, None);
        assert_eq!(doctype_error_and_quirks(&no_system, false).1, Quirks);
        let with_system = dt(
            Some("html"),
            public,
            Some("http://www.w3.org/TR/html4/loose.dtd"),
        );
        assert_eq!(doctype_error_and_quirks(&with_system, false).1, LimitedQuirks);
    }

    #[test]
    fn srcdoc_suppresses_quirks() {
        let d = dt(None, None, None);
        assert_eq!(doctype_error_and_quirks(&d, true).1, NoQuirks);
    }
}
