// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parse-error reporting: spec-identifier error codes plus source locations.
//!
//! Errors are recorded, never thrown; parsing always continues with the
//! recovery the standard prescribes.

use std::borrow::Cow;
use std::fmt;

/// A 1-based (line, column) position in the source text.
///
/// The location attached to an error is the position of the scalar value
/// whose consumption triggered it.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Debug, Default)]
pub struct Location {
    pub line: u64,
    pub column: u64,
}

impl Location {
    pub fn new(line: u64, column: u64) -> Location {
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

macro_rules! error_codes {
    ($( $string:literal <=> $variant:ident, )*) => {
        /// Stable identifiers for every error the parser can report.
        ///
        /// Tokenizer-stage codes use the kebab-case names from the WHATWG
        /// "parse errors" table verbatim; tree-construction codes follow the
        /// same convention.
        #[derive(PartialEq, Eq, Copy, Clone, Hash, Debug)]
        #[non_exhaustive]
        pub enum ErrorCode {
            $( $variant, )*
        }

        impl ErrorCode {
            /// The kebab-case identifier for this code.
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $( ErrorCode::$variant => $string, )*
                }
            }
        }

        impl std::str::FromStr for ErrorCode {
            type Err = ();

            fn from_str(s: &str) -> Result<ErrorCode, ()> {
                match s {
                    $( $string => Ok(ErrorCode::$variant), )*
                    _ => Err(()),
                }
            }
        }
    };
}

error_codes! {
    // Tokenizer stage.
    "abrupt-closing-of-empty-comment" <=> AbruptClosingOfEmptyComment,
    "abrupt-doctype-public-identifier" <=> AbruptDoctypePublicIdentifier,
    "abrupt-doctype-system-identifier" <=> AbruptDoctypeSystemIdentifier,
    "absence-of-digits-in-numeric-character-reference" <=> AbsenceOfDigitsInNumericCharacterReference,
    "cdata-in-html-content" <=> CdataInHtmlContent,
    "character-reference-outside-unicode-range" <=> CharacterReferenceOutsideUnicodeRange,
    "control-character-reference" <=> ControlCharacterReference,
    "duplicate-attribute" <=> DuplicateAttribute,
    "end-tag-with-attributes" <=> EndTagWithAttributes,
    "end-tag-with-trailing-solidus" <=> EndTagWithTrailingSolidus,
    "eof-before-tag-name" <=> EofBeforeTagName,
    "eof-in-cdata" <=> EofInCdata,
    "eof-in-comment" <=> EofInComment,
    "eof-in-doctype" <=> EofInDoctype,
    "eof-in-script-html-comment-like-text" <=> EofInScriptHtmlCommentLikeText,
    "eof-in-tag" <=> EofInTag,
    "incorrectly-closed-comment" <=> IncorrectlyClosedComment,
    "incorrectly-opened-comment" <=> IncorrectlyOpenedComment,
    "invalid-character-sequence-after-doctype-name" <=> InvalidCharacterSequenceAfterDoctypeName,
    "invalid-first-character-of-tag-name" <=> InvalidFirstCharacterOfTagName,
    "missing-attribute-value" <=> MissingAttributeValue,
    "missing-doctype-name" <=> MissingDoctypeName,
    "missing-doctype-public-identifier" <=> MissingDoctypePublicIdentifier,
    "missing-doctype-system-identifier" <=> MissingDoctypeSystemIdentifier,
    "missing-end-tag-name" <=> MissingEndTagName,
    "missing-quote-before-doctype-public-identifier" <=> MissingQuoteBeforeDoctypePublicIdentifier,
    "missing-quote-before-doctype-system-identifier" <=> MissingQuoteBeforeDoctypeSystemIdentifier,
    "missing-semicolon-after-character-reference" <=> MissingSemicolonAfterCharacterReference,
    "missing-whitespace-after-doctype-public-keyword" <=> MissingWhitespaceAfterDoctypePublicKeyword,
    "missing-whitespace-after-doctype-system-keyword" <=> MissingWhitespaceAfterDoctypeSystemKeyword,
    "missing-whitespace-before-doctype-name" <=> MissingWhitespaceBeforeDoctypeName,
    "missing-whitespace-between-attributes" <=> MissingWhitespaceBetweenAttributes,
    "missing-whitespace-between-doctype-public-and-system-identifiers" <=> MissingWhitespaceBetweenDoctypePublicAndSystemIdentifiers,
    "nested-comment" <=> NestedComment,
    "noncharacter-character-reference" <=> NoncharacterCharacterReference,
    "null-character-reference" <=> NullCharacterReference,
    "non-void-html-element-start-tag-with-trailing-solidus" <=> NonVoidHtmlElementStartTagWithTrailingSolidus,
    "surrogate-character-reference" <=> SurrogateCharacterReference,
    "unexpected-character-after-doctype-system-identifier" <=> UnexpectedCharacterAfterDoctypeSystemIdentifier,
    "unexpected-character-in-attribute-name" <=> UnexpectedCharacterInAttributeName,
    "unexpected-character-in-unquoted-attribute-value" <=> UnexpectedCharacterInUnquotedAttributeValue,
    "unexpected-equals-sign-before-attribute-name" <=> UnexpectedEqualsSignBeforeAttributeName,
    "unexpected-null-character" <=> UnexpectedNullCharacter,
    "unexpected-question-mark-instead-of-tag-name" <=> UnexpectedQuestionMarkInsteadOfTagName,
    "unexpected-solidus-in-tag" <=> UnexpectedSolidusInTag,
    "unknown-named-character-reference" <=> UnknownNamedCharacterReference,

    // Tree-construction stage.
    "bad-doctype" <=> BadDoctype,
    "doctype-not-allowed" <=> DoctypeNotAllowed,
    "end-tag-without-matching-open-element" <=> EndTagWithoutMatchingOpenElement,
    "formatting-element-not-current-node" <=> FormattingElementNotCurrentNode,
    "formatting-element-not-in-scope" <=> FormattingElementNotInScope,
    "formatting-element-not-open" <=> FormattingElementNotOpen,
    "misplaced-start-tag-for-head-element" <=> MisplacedStartTagForHeadElement,
    "non-space-characters-in-table" <=> NonSpaceCharactersInTable,
    "open-elements-at-end-of-body" <=> OpenElementsAtEndOfBody,
    "unexpected-characters" <=> UnexpectedCharacters,
    "unexpected-end-tag" <=> UnexpectedEndTag,
    "unexpected-eof" <=> UnexpectedEof,
    "unexpected-start-tag" <=> UnexpectedStartTag,
    "unexpected-token-in-foreign-content" <=> UnexpectedTokenInForeignContent,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable parse error.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub location: Location,
    pub message: Cow<'static, str>,
}

impl ParseError {
    pub fn new(code: ErrorCode, location: Location, message: Cow<'static, str>) -> ParseError {
        ParseError {
            code,
            location,
            message,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.location, self.message)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn codes_round_trip_through_strings() {
        for code in [
            ErrorCode::UnexpectedNullCharacter,
            ErrorCode::EofBeforeTagName,
            ErrorCode::EndTagWithAttributes,
            ErrorCode::MisplacedStartTagForHeadElement,
        ] {
            assert_eq!(code.as_str().parse::<ErrorCode>(), Ok(code));
        }
        assert!("no-such-error".parse::<ErrorCode>().is_err());
    }
}
