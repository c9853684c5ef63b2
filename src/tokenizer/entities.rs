// Copyright 2026 The tidehtml Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Static tables for character-reference resolution.
//!
//! `NAMED_REFERENCES` maps entity names to their replacement scalars.
//! Keys are taken from the WHATWG named-references table: names that the
//! table lists without a trailing semicolon (the legacy HTML set) appear
//! here both with and without it, everything else requires the semicolon.
//! Values hold up to two scalars; a `'\0'` in the second slot means the
//! reference expands to a single scalar.

/// No entity name, including its semicolon, is longer than this.
pub const LONGEST_REFERENCE_NAME: usize = 33;

/// Replacements for C1 controls in numeric references (`0x80..=0x9F`),
/// per the numeric character reference end state.
pub static C1_REPLACEMENTS: [Option<char>; 32] = [
    Some('\u{20AC}'), // 0x80
    None,             // 0x81
    Some('\u{201A}'), // 0x82
    Some('\u{0192}'), // 0x83
    Some('\u{201E}'), // 0x84
    Some('\u{2026}'), // 0x85
    Some('\u{2020}'), // 0x86
    Some('\u{2021}'), // 0x87
    Some('\u{02C6}'), // 0x88
    Some('\u{2030}'), // 0x89
    Some('\u{0160}'), // 0x8A
    Some('\u{2039}'), // 0x8B
    Some('\u{0152}'), // 0x8C
    None,             // 0x8D
    Some('\u{017D}'), // 0x8E
    None,             // 0x8F
    None,             // 0x90
    Some('\u{2018}'), // 0x91
    Some('\u{2019}'), // 0x92
    Some('\u{201C}'), // 0x93
    Some('\u{201D}'), // 0x94
    Some('\u{2022}'), // 0x95
    Some('\u{2013}'), // 0x96
    Some('\u{2014}'), // 0x97
    Some('\u{02DC}'), // 0x98
    Some('\u{2122}'), // 0x99
    Some('\u{0161}'), // 0x9A
    Some('\u{203A}'), // 0x9B
    Some('\u{0153}'), // 0x9C
    None,             // 0x9D
    Some('\u{017E}'), // 0x9E
    Some('\u{0178}'), // 0x9F
];

pub static NAMED_REFERENCES: phf::Map<&'static str, [char; 2]> = phf::phf_map! {
    // Legacy references: valid with or without the trailing semicolon.
    "AElig" => ['\u{C6}', '\0'], "AElig;" => ['\u{C6}', '\0'],
    "AMP" => ['&', '\0'], "AMP;" => ['&', '\0'],
    "Aacute" => ['\u{C1}', '\0'], "Aacute;" => ['\u{C1}', '\0'],
    "Acirc" => ['\u{C2}', '\0'], "Acirc;" => ['\u{C2}', '\0'],
    "Agrave" => ['\u{C0}', '\0'], "Agrave;" => ['\u{C0}', '\0'],
    "Aring" => ['\u{C5}', '\0'], "Aring;" => ['\u{C5}', '\0'],
    "Atilde" => ['\u{C3}', '\0'], "Atilde;" => ['\u{C3}', '\0'],
    "Auml" => ['\u{C4}', '\0'], "Auml;" => ['\u{C4}', '\0'],
    "COPY" => ['\u{A9}', '\0'], "COPY;" => ['\u{A9}', '\0'],
    "Ccedil" => ['\u{C7}', '\0'], "Ccedil;" => ['\u{C7}', '\0'],
    "ETH" => ['\u{D0}', '\0'], "ETH;" => ['\u{D0}', '\0'],
    "Eacute" => ['\u{C9}', '\0'], "Eacute;" => ['\u{C9}', '\0'],
    "Ecirc" => ['\u{CA}', '\0'], "Ecirc;" => ['\u{CA}', '\0'],
    "Egrave" => ['\u{C8}', '\0'], "Egrave;" => ['\u{C8}', '\0'],
    "Euml" => ['\u{CB}', '\0'], "Euml;" => ['\u{CB}', '\0'],
    "GT" => ['>', '\0'], "GT;" => ['>', '\0'],
    "Iacute" => ['\u{CD}', '\0'], "Iacute;" => ['\u{CD}', '\0'],
    "Icirc" => ['\u{CE}', '\0'], "Icirc;" => ['\u{CE}', '\0'],
    "Igrave" => ['\u{CC}', '\0'], "Igrave;" => ['\u{CC}', '\0'],
    "Iuml" => ['\u{CF}', '\0'], "Iuml;" => ['\u{CF}', '\0'],
    "LT" => ['<', '\0'], "LT;" => ['<', '\0'],
    "Ntilde" => ['\u{D1}', '\0'], "Ntilde;" => ['\u{D1}', '\0'],
    "Oacute" => ['\u{D3}', '\0'], "Oacute;" => ['\u{D3}', '\0'],
    "Ocirc" => ['\u{D4}', '\0'], "Ocirc;" => ['\u{D4}', '\0'],
    "Ograve" => ['\u{D2}', '\0'], "Ograve;" => ['\u{D2}', '\0'],
    "Oslash" => ['\u{D8}', '\0'], "Oslash;" => ['\u{D8}', '\0'],
    "Otilde" => ['\u{D5}', '\0'], "Otilde;" => ['\u{D5}', '\0'],
    "Ouml" => ['\u{D6}', '\0'], "Ouml;" => ['\u{D6}', '\0'],
    "QUOT" => ['"', '\0'], "QUOT;" => ['"', '\0'],
    "REG" => ['\u{AE}', '\0'], "REG;" => ['\u{AE}', '\0'],
    "THORN" => ['\u{DE}', '\0'], "THORN;" => ['\u{DE}', '\0'],
    "Uacute" => ['\u{DA}', '\0'], "Uacute;" => ['\u{DA}', '\0'],
    "Ucirc" => ['\u{DB}', '\0'], "Ucirc;" => ['\u{DB}', '\0'],
    "Ugrave" => ['\u{D9}', '\0'], "Ugrave;" => ['\u{D9}', '\0'],
    "Uuml" => ['\u{DC}', '\0'], "Uuml;" => ['\u{DC}', '\0'],
    "Yacute" => ['\u{DD}', '\0'], "Yacute;" => ['\u{DD}', '\0'],
    "aacute" => ['\u{E1}', '\0'], "aacute;" => ['\u{E1}', '\0'],
    "acirc" => ['\u{E2}', '\0'], "acirc;" => ['\u{E2}', '\0'],
    "acute" => ['\u{B4}', '\0'], "acute;" => ['\u{B4}', '\0'],
    "aelig" => ['\u{E6}', '\0'], "aelig;" => ['\u{E6}', '\0'],
    "agrave" => ['\u{E0}', '\0'], "agrave;" => ['\u{E0}', '\0'],
    "amp" => ['&', '\0'], "amp;" => ['&', '\0'],
    "aring" => ['\u{E5}', '\0'], "aring;" => ['\u{E5}', '\0'],
    "atilde" => ['\u{E3}', '\0'], "atilde;" => ['\u{E3}', '\0'],
    "auml" => ['\u{E4}', '\0'], "auml;" => ['\u{E4}', '\0'],
    "brvbar" => ['\u{A6}', '\0'], "brvbar;" => ['\u{A6}', '\0'],
    "ccedil" => ['\u{E7}', '\0'], "ccedil;" => ['\u{E7}', '\0'],
    "cedil" => ['\u{B8}', '\0'], "cedil;" => ['\u{B8}', '\0'],
    "cent" => ['\u{A2}', '\0'], "cent;" => ['\u{A2}', '\0'],
    "copy" => ['\u{A9}', '\0'], "copy;" => ['\u{A9}', '\0'],
    "curren" => ['\u{A4}', '\0'], "curren;" => ['\u{A4}', '\0'],
    "deg" => ['\u{B0}', '\0'], "deg;" => ['\u{B0}', '\0'],
    "divide" => ['\u{F7}', '\0'], "divide;" => ['\u{F7}', '\0'],
    "eacute" => ['\u{E9}', '\0'], "eacute;" => ['\u{E9}', '\0'],
    "ecirc" => ['\u{EA}', '\0'], "ecirc;" => ['\u{EA}', '\0'],
    "egrave" => ['\u{E8}', '\0'], "egrave;" => ['\u{E8}', '\0'],
    "eth" => ['\u{F0}', '\0'], "eth;" => ['\u{F0}', '\0'],
    "euml" => ['\u{EB}', '\0'], "euml;" => ['\u{EB}', '\0'],
    "frac12" => ['\u{BD}', '\0'], "frac12;" => ['\u{BD}', '\0'],
    "frac14" => ['\u{BC}', '\0'], "frac14;" => ['\u{BC}', '\0'],
    "frac34" => ['\u{BE}', '\0'], "frac34;" => ['\u{BE}', '\0'],
    "gt" => ['>', '\0'], "gt;" => ['>', '\0'],
    "iacute" => ['\u{ED}', '\0'], "iacute;" => ['\u{ED}', '\0'],
    "icirc" => ['\u{EE}', '\0'], "icirc;" => ['\u{EE}', '\0'],
    "iexcl" => ['\u{A1}', '\0'], "iexcl;" => ['\u{A1}', '\0'],
    "igrave" => ['\u{EC}', '\0'], "igrave;" => ['\u{EC}', '\0'],
    "iquest" => ['\u{BF}', '\0'], "iquest;" => ['\u{BF}', '\0'],
    "iuml" => ['\u{EF}', '\0'], "iuml;" => ['\u{EF}', '\0'],
    "laquo" => ['\u{AB}', '\0'], "laquo;" => ['\u{AB}', '\0'],
    "lt" => ['<', '\0'], "lt;" => ['<', '\0'],
    "macr" => ['\u{AF}', '\0'], "macr;" => ['\u{AF}', '\0'],
    "micro" => ['\u{B5}', '\0'], "micro;" => ['\u{B5}', '\0'],
    "middot" => ['\u{B7}', '\0'], "middot;" => ['\u{B7}', '\0'],
    "nbsp" => ['\u{A0}', '\0'], "nbsp;" => ['\u{A0}', '\0'],
    "not" => ['\u{AC}', '\0'], "not;" => ['\u{AC}', '\0'],
    "ntilde" => ['\u{F1}', '\0'], "ntilde;" => ['\u{F1}', '\0'],
    "oacute" => ['\u{F3}', '\0'], "oacute;" => ['\u{F3}', '\0'],
    "ocirc" => ['\u{F4}', '\0'], "ocirc;" => ['\u{F4}', '\0'],
    "ograve" => ['\u{F2}', '\0'], "ograve;" => ['\u{F2}', '\0'],
    "ordf" => ['\u{AA}', '\0'], "ordf;" => ['\u{AA}', '\0'],
    "ordm" => ['\u{BA}', '\0'], "ordm;" => ['\u{BA}', '\0'],
    "oslash" => ['\u{F8}', '\0'], "oslash;" => ['\u{F8}', '\0'],
    "otilde" => ['\u{F5}', '\0'], "otilde;" => ['\u{F5}', '\0'],
    "ouml" => ['\u{F6}', '\0'], "ouml;" => ['\u{F6}', '\0'],
    "para" => ['\u{B6}', '\0'], "para;" => ['\u{B6}', '\0'],
    "plusmn" => ['\u{B1}', '\0'], "plusmn;" => ['\u{B1}', '\0'],
    "pound" => ['\u{A3}', '\0'], "pound;" => ['\u{A3}', '\0'],
    "quot" => ['"', '\0'], "quot;" => ['"', '\0'],
    "raquo" => ['\u{BB}', '\0'], "raquo;" => ['\u{BB}', '\0'],
    "reg" => ['\u{AE}', '\0'], "reg;" => ['\u{AE}', '\0'],
    "sect" => ['\u{A7}', '\0'], "sect;" => ['\u{A7}', '\0'],
    "shy" => ['\u{AD}', '\0'], "shy;" => ['\u{AD}', '\0'],
    "sup1" => ['\u{B9}', '\0'], "sup1;" => ['\u{B9}', '\0'],
    "sup2" => ['\u{B2}', '\0'], "sup2;" => ['\u{B2}', '\0'],
    "sup3" => ['\u{B3}', '\0'], "sup3;" => ['\u{B3}', '\0'],
    "szlig" => ['\u{DF}', '\0'], "szlig;" => ['\u{DF}', '\0'],
    "thorn" => ['\u{FE}', '\0'], "thorn;" => ['\u{FE}', '\0'],
    "times" => ['\u{D7}', '\0'], "times;" => ['\u{D7}', '\0'],
    "uacute" => ['\u{FA}', '\0'], "uacute;" => ['\u{FA}', '\0'],
    "ucirc" => ['\u{FB}', '\0'], "ucirc;" => ['\u{FB}', '\0'],
    "ugrave" => ['\u{F9}', '\0'], "ugrave;" => ['\u{F9}', '\0'],
    "uml" => ['\u{A8}', '\0'], "uml;" => ['\u{A8}', '\0'],
    "uuml" => ['\u{FC}', '\0'], "uuml;" => ['\u{FC}', '\0'],
    "yacute" => ['\u{FD}', '\0'], "yacute;" => ['\u{FD}', '\0'],
    "yen" => ['\u{A5}', '\0'], "yen;" => ['\u{A5}', '\0'],
    "yuml" => ['\u{FF}', '\0'], "yuml;" => ['\u{FF}', '\0'],

    // ASCII punctuation.
    "apos;" => ['\'', '\0'],
    "excl;" => ['!', '\0'],
    "num;" => ['#', '\0'],
    "dollar;" => ['$', '\0'],
    "percnt;" => ['%', '\0'],
    "lpar;" => ['(', '\0'],
    "rpar;" => [')', '\0'],
    "ast;" => ['*', '\0'],
    "midast;" => ['*', '\0'],
    "plus;" => ['+', '\0'],
    "comma;" => [',', '\0'],
    "period;" => ['.', '\0'],
    "sol;" => ['/', '\0'],
    "colon;" => [':', '\0'],
    "semi;" => [';', '\0'],
    "quest;" => ['?', '\0'],
    "commat;" => ['@', '\0'],
    "lbrack;" => ['[', '\0'],
    "lsqb;" => ['[', '\0'],
    "bsol;" => ['\\', '\0'],
    "rbrack;" => [']', '\0'],
    "rsqb;" => [']', '\0'],
    "Hat;" => ['^', '\0'],
    "lowbar;" => ['_', '\0'],
    "grave;" => ['`', '\0'],
    "DiacriticalGrave;" => ['`', '\0'],
    "lbrace;" => ['{', '\0'],
    "lcub;" => ['{', '\0'],
    "verbar;" => ['|', '\0'],
    "vert;" => ['|', '\0'],
    "VerticalLine;" => ['|', '\0'],
    "rbrace;" => ['}', '\0'],
    "rcub;" => ['}', '\0'],

    // Latin Extended-A.
    "Amacr;" => ['\u{100}', '\0'], "amacr;" => ['\u{101}', '\0'],
    "Abreve;" => ['\u{102}', '\0'], "abreve;" => ['\u{103}', '\0'],
    "Aogon;" => ['\u{104}', '\0'], "aogon;" => ['\u{105}', '\0'],
    "Cacute;" => ['\u{106}', '\0'], "cacute;" => ['\u{107}', '\0'],
    "Ccirc;" => ['\u{108}', '\0'], "ccirc;" => ['\u{109}', '\0'],
    "Cdot;" => ['\u{10A}', '\0'], "cdot;" => ['\u{10B}', '\0'],
    "Ccaron;" => ['\u{10C}', '\0'], "ccaron;" => ['\u{10D}', '\0'],
    "Dcaron;" => ['\u{10E}', '\0'], "dcaron;" => ['\u{10F}', '\0'],
    "Dstrok;" => ['\u{110}', '\0'], "dstrok;" => ['\u{111}', '\0'],
    "Emacr;" => ['\u{112}', '\0'], "emacr;" => ['\u{113}', '\0'],
    "Edot;" => ['\u{116}', '\0'], "edot;" => ['\u{117}', '\0'],
    "Eogon;" => ['\u{118}', '\0'], "eogon;" => ['\u{119}', '\0'],
    "Ecaron;" => ['\u{11A}', '\0'], "ecaron;" => ['\u{11B}', '\0'],
    "Gcirc;" => ['\u{11C}', '\0'], "gcirc;" => ['\u{11D}', '\0'],
    "Gbreve;" => ['\u{11E}', '\0'], "gbreve;" => ['\u{11F}', '\0'],
    "Gdot;" => ['\u{120}', '\0'], "gdot;" => ['\u{121}', '\0'],
    "Gcedil;" => ['\u{122}', '\0'],
    "Hcirc;" => ['\u{124}', '\0'], "hcirc;" => ['\u{125}', '\0'],
    "Hstrok;" => ['\u{126}', '\0'], "hstrok;" => ['\u{127}', '\0'],
    "Itilde;" => ['\u{128}', '\0'], "itilde;" => ['\u{129}', '\0'],
    "Imacr;" => ['\u{12A}', '\0'], "imacr;" => ['\u{12B}', '\0'],
    "Iogon;" => ['\u{12E}', '\0'], "iogon;" => ['\u{12F}', '\0'],
    "Idot;" => ['\u{130}', '\0'],
    "imath;" => ['\u{131}', '\0'], "inodot;" => ['\u{131}', '\0'],
    "IJlig;" => ['\u{132}', '\0'], "ijlig;" => ['\u{133}', '\0'],
    "Jcirc;" => ['\u{134}', '\0'], "jcirc;" => ['\u{135}', '\0'],
    "Kcedil;" => ['\u{136}', '\0'], "kcedil;" => ['\u{137}', '\0'],
    "kgreen;" => ['\u{138}', '\0'],
    "Lacute;" => ['\u{139}', '\0'], "lacute;" => ['\u{13A}', '\0'],
    "Lcedil;" => ['\u{13B}', '\0'], "lcedil;" => ['\u{13C}', '\0'],
    "Lcaron;" => ['\u{13D}', '\0'], "lcaron;" => ['\u{13E}', '\0'],
    "Lmidot;" => ['\u{13F}', '\0'], "lmidot;" => ['\u{140}', '\0'],
    "Lstrok;" => ['\u{141}', '\0'], "lstrok;" => ['\u{142}', '\0'],
    "Nacute;" => ['\u{143}', '\0'], "nacute;" => ['\u{144}', '\0'],
    "Ncedil;" => ['\u{145}', '\0'], "ncedil;" => ['\u{146}', '\0'],
    "Ncaron;" => ['\u{147}', '\0'], "ncaron;" => ['\u{148}', '\0'],
    "napos;" => ['\u{149}', '\0'],
    "ENG;" => ['\u{14A}', '\0'], "eng;" => ['\u{14B}', '\0'],
    "Omacr;" => ['\u{14C}', '\0'], "omacr;" => ['\u{14D}', '\0'],
    "Odblac;" => ['\u{150}', '\0'], "odblac;" => ['\u{151}', '\0'],
    "OElig;" => ['\u{152}', '\0'], "oelig;" => ['\u{153}', '\0'],
    "Racute;" => ['\u{154}', '\0'], "racute;" => ['\u{155}', '\0'],
    "Rcedil;" => ['\u{156}', '\0'], "rcedil;" => ['\u{157}', '\0'],
    "Rcaron;" => ['\u{158}', '\0'], "rcaron;" => ['\u{159}', '\0'],
    "Sacute;" => ['\u{15A}', '\0'], "sacute;" => ['\u{15B}', '\0'],
    "Scirc;" => ['\u{15C}', '\0'], "scirc;" => ['\u{15D}', '\0'],
    "Scedil;" => ['\u{15E}', '\0'], "scedil;" => ['\u{15F}', '\0'],
    "Scaron;" => ['\u{160}', '\0'], "scaron;" => ['\u{161}', '\0'],
    "Tcedil;" => ['\u{162}', '\0'], "tcedil;" => ['\u{163}', '\0'],
    "Tcaron;" => ['\u{164}', '\0'], "tcaron;" => ['\u{165}', '\0'],
    "Tstrok;" => ['\u{166}', '\0'], "tstrok;" => ['\u{167}', '\0'],
    "Utilde;" => ['\u{168}', '\0'], "utilde;" => ['\u{169}', '\0'],
    "Umacr;" => ['\u{16A}', '\0'], "umacr;" => ['\u{16B}', '\0'],
    "Ubreve;" => ['\u{16C}', '\0'], "ubreve;" => ['\u{16D}', '\0'],
    "Uring;" => ['\u{16E}', '\0'], "uring;" => ['\u{16F}', '\0'],
    "Udblac;" => ['\u{170}', '\0'], "udblac;" => ['\u{171}', '\0'],
    "Uogon;" => ['\u{172}', '\0'], "uogon;" => ['\u{173}', '\0'],
    "Wcirc;" => ['\u{174}', '\0'], "wcirc;" => ['\u{175}', '\0'],
    "Ycirc;" => ['\u{176}', '\0'], "ycirc;" => ['\u{177}', '\0'],
    "Yuml;" => ['\u{178}', '\0'],
    "Zacute;" => ['\u{179}', '\0'], "zacute;" => ['\u{17A}', '\0'],
    "Zdot;" => ['\u{17B}', '\0'], "zdot;" => ['\u{17C}', '\0'],
    "Zcaron;" => ['\u{17D}', '\0'], "zcaron;" => ['\u{17E}', '\0'],
    "fnof;" => ['\u{192}', '\0'],
    "circ;" => ['\u{2C6}', '\0'],
    "tilde;" => ['\u{2DC}', '\0'],
    "DiacriticalTilde;" => ['\u{2DC}', '\0'],
    "dot;" => ['\u{2D9}', '\0'],
    "DiacriticalDot;" => ['\u{2D9}', '\0'],
    "fjlig;" => ['f', 'j'],

    // Greek.
    "Alpha;" => ['\u{391}', '\0'], "Beta;" => ['\u{392}', '\0'],
    "Gamma;" => ['\u{393}', '\0'], "Delta;" => ['\u{394}', '\0'],
    "Epsilon;" => ['\u{395}', '\0'], "Zeta;" => ['\u{396}', '\0'],
    "Eta;" => ['\u{397}', '\0'], "Theta;" => ['\u{398}', '\0'],
    "Iota;" => ['\u{399}', '\0'], "Kappa;" => ['\u{39A}', '\0'],
    "Lambda;" => ['\u{39B}', '\0'], "Mu;" => ['\u{39C}', '\0'],
    "Nu;" => ['\u{39D}', '\0'], "Xi;" => ['\u{39E}', '\0'],
    "Omicron;" => ['\u{39F}', '\0'], "Pi;" => ['\u{3A0}', '\0'],
    "Rho;" => ['\u{3A1}', '\0'], "Sigma;" => ['\u{3A3}', '\0'],
    "Tau;" => ['\u{3A4}', '\0'], "Upsilon;" => ['\u{3A5}', '\0'],
    "Phi;" => ['\u{3A6}', '\0'], "Chi;" => ['\u{3A7}', '\0'],
    "Psi;" => ['\u{3A8}', '\0'], "Omega;" => ['\u{3A9}', '\0'],
    "alpha;" => ['\u{3B1}', '\0'], "beta;" => ['\u{3B2}', '\0'],
    "gamma;" => ['\u{3B3}', '\0'], "delta;" => ['\u{3B4}', '\0'],
    "epsilon;" => ['\u{3B5}', '\0'], "epsi;" => ['\u{3B5}', '\0'],
    "zeta;" => ['\u{3B6}', '\0'], "eta;" => ['\u{3B7}', '\0'],
    "theta;" => ['\u{3B8}', '\0'], "iota;" => ['\u{3B9}', '\0'],
    "kappa;" => ['\u{3BA}', '\0'], "lambda;" => ['\u{3BB}', '\0'],
    "mu;" => ['\u{3BC}', '\0'], "nu;" => ['\u{3BD}', '\0'],
    "xi;" => ['\u{3BE}', '\0'], "omicron;" => ['\u{3BF}', '\0'],
    "pi;" => ['\u{3C0}', '\0'], "rho;" => ['\u{3C1}', '\0'],
    "sigmaf;" => ['\u{3C2}', '\0'], "sigmav;" => ['\u{3C2}', '\0'],
    "varsigma;" => ['\u{3C2}', '\0'],
    "sigma;" => ['\u{3C3}', '\0'], "tau;" => ['\u{3C4}', '\0'],
    "upsilon;" => ['\u{3C5}', '\0'], "upsi;" => ['\u{3C5}', '\0'],
    "phi;" => ['\u{3C6}', '\0'], "chi;" => ['\u{3C7}', '\0'],
    "psi;" => ['\u{3C8}', '\0'], "omega;" => ['\u{3C9}', '\0'],
    "thetasym;" => ['\u{3D1}', '\0'], "thetav;" => ['\u{3D1}', '\0'],
    "vartheta;" => ['\u{3D1}', '\0'],
    "upsih;" => ['\u{3D2}', '\0'],
    "phiv;" => ['\u{3D5}', '\0'], "varphi;" => ['\u{3D5}', '\0'],
    "piv;" => ['\u{3D6}', '\0'], "varpi;" => ['\u{3D6}', '\0'],
    "Gammad;" => ['\u{3DC}', '\0'], "gammad;" => ['\u{3DD}', '\0'],
    "kappav;" => ['\u{3F0}', '\0'], "varkappa;" => ['\u{3F0}', '\0'],
    "rhov;" => ['\u{3F1}', '\0'], "varrho;" => ['\u{3F1}', '\0'],
    "epsiv;" => ['\u{3F5}', '\0'], "varepsilon;" => ['\u{3F5}', '\0'],
    "straightepsilon;" => ['\u{3F5}', '\0'],
    "backepsilon;" => ['\u{3F6}', '\0'],

    // Cyrillic.
    "IOcy;" => ['\u{401}', '\0'], "iocy;" => ['\u{451}', '\0'],
    "Acy;" => ['\u{410}', '\0'], "acy;" => ['\u{430}', '\0'],
    "Bcy;" => ['\u{411}', '\0'], "bcy;" => ['\u{431}', '\0'],
    "Vcy;" => ['\u{412}', '\0'], "vcy;" => ['\u{432}', '\0'],
    "Gcy;" => ['\u{413}', '\0'], "gcy;" => ['\u{433}', '\0'],
    "Dcy;" => ['\u{414}', '\0'], "dcy;" => ['\u{434}', '\0'],
    "IEcy;" => ['\u{415}', '\0'], "iecy;" => ['\u{435}', '\0'],
    "ZHcy;" => ['\u{416}', '\0'], "zhcy;" => ['\u{436}', '\0'],
    "Zcy;" => ['\u{417}', '\0'], "zcy;" => ['\u{437}', '\0'],
    "Icy;" => ['\u{418}', '\0'], "icy;" => ['\u{438}', '\0'],
    "Jcy;" => ['\u{419}', '\0'], "jcy;" => ['\u{439}', '\0'],
    "Kcy;" => ['\u{41A}', '\0'], "kcy;" => ['\u{43A}', '\0'],
    "Lcy;" => ['\u{41B}', '\0'], "lcy;" => ['\u{43B}', '\0'],
    "Mcy;" => ['\u{41C}', '\0'], "mcy;" => ['\u{43C}', '\0'],
    "Ncy;" => ['\u{41D}', '\0'], "ncy;" => ['\u{43D}', '\0'],
    "Ocy;" => ['\u{41E}', '\0'], "ocy;" => ['\u{43E}', '\0'],
    "Pcy;" => ['\u{41F}', '\0'], "pcy;" => ['\u{43F}', '\0'],
    "Rcy;" => ['\u{420}', '\0'], "rcy;" => ['\u{440}', '\0'],
    "Scy;" => ['\u{421}', '\0'], "scy;" => ['\u{441}', '\0'],
    "Tcy;" => ['\u{422}', '\0'], "tcy;" => ['\u{442}', '\0'],
    "Ucy;" => ['\u{423}', '\0'], "ucy;" => ['\u{443}', '\0'],
    "Fcy;" => ['\u{424}', '\0'], "fcy;" => ['\u{444}', '\0'],
    "KHcy;" => ['\u{425}', '\0'], "khcy;" => ['\u{445}', '\0'],
    "TScy;" => ['\u{426}', '\0'], "tscy;" => ['\u{446}', '\0'],
    "CHcy;" => ['\u{427}', '\0'], "chcy;" => ['\u{447}', '\0'],
    "SHcy;" => ['\u{428}', '\0'], "shcy;" => ['\u{448}', '\0'],
    "SHCHcy;" => ['\u{429}', '\0'], "shchcy;" => ['\u{449}', '\0'],
    "HARDcy;" => ['\u{42A}', '\0'], "hardcy;" => ['\u{44A}', '\0'],
    "Ycy;" => ['\u{42B}', '\0'], "ycy;" => ['\u{44B}', '\0'],
    "SOFTcy;" => ['\u{42C}', '\0'], "softcy;" => ['\u{44C}', '\0'],
    "Ecy;" => ['\u{42D}', '\0'], "ecy;" => ['\u{44D}', '\0'],
    "YUcy;" => ['\u{42E}', '\0'], "yucy;" => ['\u{44E}', '\0'],
    "YAcy;" => ['\u{42F}', '\0'], "yacy;" => ['\u{44F}', '\0'],

    // General punctuation and spaces.
    "ensp;" => ['\u{2002}', '\0'], "emsp;" => ['\u{2003}', '\0'],
    "emsp13;" => ['\u{2004}', '\0'], "emsp14;" => ['\u{2005}', '\0'],
    "numsp;" => ['\u{2007}', '\0'], "puncsp;" => ['\u{2008}', '\0'],
    "thinsp;" => ['\u{2009}', '\0'], "ThinSpace;" => ['\u{2009}', '\0'],
    "hairsp;" => ['\u{200A}', '\0'], "VeryThinSpace;" => ['\u{200A}', '\0'],
    "ZeroWidthSpace;" => ['\u{200B}', '\0'],
    "zwnj;" => ['\u{200C}', '\0'], "zwj;" => ['\u{200D}', '\0'],
    "lrm;" => ['\u{200E}', '\0'], "rlm;" => ['\u{200F}', '\0'],
    "hyphen;" => ['\u{2010}', '\0'], "dash;" => ['\u{2010}', '\0'],
    "ndash;" => ['\u{2013}', '\0'], "mdash;" => ['\u{2014}', '\0'],
    "horbar;" => ['\u{2015}', '\0'],
    "Verbar;" => ['\u{2016}', '\0'], "Vert;" => ['\u{2016}', '\0'],
    "lsquo;" => ['\u{2018}', '\0'], "OpenCurlyQuote;" => ['\u{2018}', '\0'],
    "rsquo;" => ['\u{2019}', '\0'], "rsquor;" => ['\u{2019}', '\0'],
    "CloseCurlyQuote;" => ['\u{2019}', '\0'],
    "sbquo;" => ['\u{201A}', '\0'], "lsquor;" => ['\u{201A}', '\0'],
    "ldquo;" => ['\u{201C}', '\0'], "OpenCurlyDoubleQuote;" => ['\u{201C}', '\0'],
    "rdquo;" => ['\u{201D}', '\0'], "rdquor;" => ['\u{201D}', '\0'],
    "CloseCurlyDoubleQuote;" => ['\u{201D}', '\0'],
    "bdquo;" => ['\u{201E}', '\0'], "ldquor;" => ['\u{201E}', '\0'],
    "dagger;" => ['\u{2020}', '\0'], "Dagger;" => ['\u{2021}', '\0'],
    "bull;" => ['\u{2022}', '\0'], "bullet;" => ['\u{2022}', '\0'],
    "nldr;" => ['\u{2025}', '\0'],
    "hellip;" => ['\u{2026}', '\0'], "mldr;" => ['\u{2026}', '\0'],
    "permil;" => ['\u{2030}', '\0'], "pertenk;" => ['\u{2031}', '\0'],
    "prime;" => ['\u{2032}', '\0'], "Prime;" => ['\u{2033}', '\0'],
    "tprime;" => ['\u{2034}', '\0'],
    "bprime;" => ['\u{2035}', '\0'], "backprime;" => ['\u{2035}', '\0'],
    "lsaquo;" => ['\u{2039}', '\0'], "rsaquo;" => ['\u{203A}', '\0'],
    "oline;" => ['\u{203E}', '\0'], "OverBar;" => ['\u{203E}', '\0'],
    "caret;" => ['\u{2041}', '\0'],
    "frasl;" => ['\u{2044}', '\0'],
    "qprime;" => ['\u{2057}', '\0'],
    "MediumSpace;" => ['\u{205F}', '\0'],
    "ThickSpace;" => ['\u{205F}', '\u{200A}'],
    "NoBreak;" => ['\u{2060}', '\0'],
    "af;" => ['\u{2061}', '\0'], "ApplyFunction;" => ['\u{2061}', '\0'],
    "it;" => ['\u{2062}', '\0'], "InvisibleTimes;" => ['\u{2062}', '\0'],
    "ic;" => ['\u{2063}', '\0'], "InvisibleComma;" => ['\u{2063}', '\0'],
    "euro;" => ['\u{20AC}', '\0'],

    // Letterlike symbols.
    "Copf;" => ['\u{2102}', '\0'], "complexes;" => ['\u{2102}', '\0'],
    "copysr;" => ['\u{2117}', '\0'],
    "ell;" => ['\u{2113}', '\0'],
    "planckh;" => ['\u{210E}', '\0'],
    "hbar;" => ['\u{210F}', '\0'], "planck;" => ['\u{210F}', '\0'],
    "hslash;" => ['\u{210F}', '\0'], "plankv;" => ['\u{210F}', '\0'],
    "image;" => ['\u{2111}', '\0'], "Im;" => ['\u{2111}', '\0'],
    "imagpart;" => ['\u{2111}', '\0'],
    "Nopf;" => ['\u{2115}', '\0'], "naturals;" => ['\u{2115}', '\0'],
    "numero;" => ['\u{2116}', '\0'],
    "weierp;" => ['\u{2118}', '\0'], "wp;" => ['\u{2118}', '\0'],
    "Popf;" => ['\u{2119}', '\0'], "primes;" => ['\u{2119}', '\0'],
    "Qopf;" => ['\u{211A}', '\0'], "rationals;" => ['\u{211A}', '\0'],
    "real;" => ['\u{211C}', '\0'], "Re;" => ['\u{211C}', '\0'],
    "realpart;" => ['\u{211C}', '\0'],
    "Ropf;" => ['\u{211D}', '\0'], "reals;" => ['\u{211D}', '\0'],
    "trade;" => ['\u{2122}', '\0'], "TRADE;" => ['\u{2122}', '\0'],
    "Zopf;" => ['\u{2124}', '\0'], "integers;" => ['\u{2124}', '\0'],
    "ohm;" => ['\u{3A9}', '\0'],
    "alefsym;" => ['\u{2135}', '\0'], "aleph;" => ['\u{2135}', '\0'],
    "beth;" => ['\u{2136}', '\0'], "gimel;" => ['\u{2137}', '\0'],
    "daleth;" => ['\u{2138}', '\0'],

    // Arrows.
    "larr;" => ['\u{2190}', '\0'], "leftarrow;" => ['\u{2190}', '\0'],
    "LeftArrow;" => ['\u{2190}', '\0'], "slarr;" => ['\u{2190}', '\0'],
    "ShortLeftArrow;" => ['\u{2190}', '\0'],
    "uarr;" => ['\u{2191}', '\0'], "uparrow;" => ['\u{2191}', '\0'],
    "UpArrow;" => ['\u{2191}', '\0'], "ShortUpArrow;" => ['\u{2191}', '\0'],
    "rarr;" => ['\u{2192}', '\0'], "rightarrow;" => ['\u{2192}', '\0'],
    "RightArrow;" => ['\u{2192}', '\0'], "srarr;" => ['\u{2192}', '\0'],
    "ShortRightArrow;" => ['\u{2192}', '\0'],
    "darr;" => ['\u{2193}', '\0'], "downarrow;" => ['\u{2193}', '\0'],
    "DownArrow;" => ['\u{2193}', '\0'], "ShortDownArrow;" => ['\u{2193}', '\0'],
    "harr;" => ['\u{2194}', '\0'], "leftrightarrow;" => ['\u{2194}', '\0'],
    "LeftRightArrow;" => ['\u{2194}', '\0'],
    "varr;" => ['\u{2195}', '\0'], "updownarrow;" => ['\u{2195}', '\0'],
    "UpDownArrow;" => ['\u{2195}', '\0'],
    "nwarr;" => ['\u{2196}', '\0'], "UpperLeftArrow;" => ['\u{2196}', '\0'],
    "nearr;" => ['\u{2197}', '\0'], "UpperRightArrow;" => ['\u{2197}', '\0'],
    "searr;" => ['\u{2198}', '\0'], "LowerRightArrow;" => ['\u{2198}', '\0'],
    "swarr;" => ['\u{2199}', '\0'], "LowerLeftArrow;" => ['\u{2199}', '\0'],
    "nlarr;" => ['\u{219A}', '\0'], "nleftarrow;" => ['\u{219A}', '\0'],
    "nrarr;" => ['\u{219B}', '\0'], "nrightarrow;" => ['\u{219B}', '\0'],
    "crarr;" => ['\u{21B5}', '\0'],
    "map;" => ['\u{21A6}', '\0'], "mapsto;" => ['\u{21A6}', '\0'],
    "larrhk;" => ['\u{21A9}', '\0'], "hookleftarrow;" => ['\u{21A9}', '\0'],
    "rarrhk;" => ['\u{21AA}', '\0'], "hookrightarrow;" => ['\u{21AA}', '\0'],
    "lArr;" => ['\u{21D0}', '\0'], "Leftarrow;" => ['\u{21D0}', '\0'],
    "DoubleLeftArrow;" => ['\u{21D0}', '\0'],
    "uArr;" => ['\u{21D1}', '\0'], "Uparrow;" => ['\u{21D1}', '\0'],
    "DoubleUpArrow;" => ['\u{21D1}', '\0'],
    "rArr;" => ['\u{21D2}', '\0'], "Rightarrow;" => ['\u{21D2}', '\0'],
    "DoubleRightArrow;" => ['\u{21D2}', '\0'], "Implies;" => ['\u{21D2}', '\0'],
    "dArr;" => ['\u{21D3}', '\0'], "Downarrow;" => ['\u{21D3}', '\0'],
    "DoubleDownArrow;" => ['\u{21D3}', '\0'],
    "hArr;" => ['\u{21D4}', '\0'], "Leftrightarrow;" => ['\u{21D4}', '\0'],
    "DoubleLeftRightArrow;" => ['\u{21D4}', '\0'], "iff;" => ['\u{21D4}', '\0'],

    // Mathematical operators.
    "forall;" => ['\u{2200}', '\0'], "ForAll;" => ['\u{2200}', '\0'],
    "comp;" => ['\u{2201}', '\0'], "complement;" => ['\u{2201}', '\0'],
    "part;" => ['\u{2202}', '\0'], "PartialD;" => ['\u{2202}', '\0'],
    "exist;" => ['\u{2203}', '\0'], "Exists;" => ['\u{2203}', '\0'],
    "nexist;" => ['\u{2204}', '\0'], "nexists;" => ['\u{2204}', '\0'],
    "NotExists;" => ['\u{2204}', '\0'],
    "empty;" => ['\u{2205}', '\0'], "emptyset;" => ['\u{2205}', '\0'],
    "emptyv;" => ['\u{2205}', '\0'], "varnothing;" => ['\u{2205}', '\0'],
    "nabla;" => ['\u{2207}', '\0'], "Del;" => ['\u{2207}', '\0'],
    "isin;" => ['\u{2208}', '\0'], "isinv;" => ['\u{2208}', '\0'],
    "Element;" => ['\u{2208}', '\0'], "in;" => ['\u{2208}', '\0'],
    "notin;" => ['\u{2209}', '\0'], "NotElement;" => ['\u{2209}', '\0'],
    "notinva;" => ['\u{2209}', '\0'],
    "ni;" => ['\u{220B}', '\0'], "niv;" => ['\u{220B}', '\0'],
    "ReverseElement;" => ['\u{220B}', '\0'], "SuchThat;" => ['\u{220B}', '\0'],
    "notni;" => ['\u{220C}', '\0'], "notniva;" => ['\u{220C}', '\0'],
    "NotReverseElement;" => ['\u{220C}', '\0'],
    "prod;" => ['\u{220F}', '\0'], "Product;" => ['\u{220F}', '\0'],
    "coprod;" => ['\u{2210}', '\0'], "Coproduct;" => ['\u{2210}', '\0'],
    "sum;" => ['\u{2211}', '\0'], "Sum;" => ['\u{2211}', '\0'],
    "minus;" => ['\u{2212}', '\0'],
    "mnplus;" => ['\u{2213}', '\0'], "mp;" => ['\u{2213}', '\0'],
    "MinusPlus;" => ['\u{2213}', '\0'],
    "plusdo;" => ['\u{2214}', '\0'], "dotplus;" => ['\u{2214}', '\0'],
    "setmn;" => ['\u{2216}', '\0'], "setminus;" => ['\u{2216}', '\0'],
    "Backslash;" => ['\u{2216}', '\0'], "ssetmn;" => ['\u{2216}', '\0'],
    "smallsetminus;" => ['\u{2216}', '\0'],
    "lowast;" => ['\u{2217}', '\0'],
    "compfn;" => ['\u{2218}', '\0'], "SmallCircle;" => ['\u{2218}', '\0'],
    "radic;" => ['\u{221A}', '\0'], "Sqrt;" => ['\u{221A}', '\0'],
    "prop;" => ['\u{221D}', '\0'], "propto;" => ['\u{221D}', '\0'],
    "Proportional;" => ['\u{221D}', '\0'], "vprop;" => ['\u{221D}', '\0'],
    "varpropto;" => ['\u{221D}', '\0'],
    "infin;" => ['\u{221E}', '\0'],
    "ang;" => ['\u{2220}', '\0'], "angle;" => ['\u{2220}', '\0'],
    "angmsd;" => ['\u{2221}', '\0'], "measuredangle;" => ['\u{2221}', '\0'],
    "angsph;" => ['\u{2222}', '\0'],
    "mid;" => ['\u{2223}', '\0'], "shortmid;" => ['\u{2223}', '\0'],
    "smid;" => ['\u{2223}', '\0'], "VerticalBar;" => ['\u{2223}', '\0'],
    "nmid;" => ['\u{2224}', '\0'], "nshortmid;" => ['\u{2224}', '\0'],
    "nsmid;" => ['\u{2224}', '\0'], "NotVerticalBar;" => ['\u{2224}', '\0'],
    "par;" => ['\u{2225}', '\0'], "parallel;" => ['\u{2225}', '\0'],
    "shortparallel;" => ['\u{2225}', '\0'], "spar;" => ['\u{2225}', '\0'],
    "DoubleVerticalBar;" => ['\u{2225}', '\0'],
    "npar;" => ['\u{2226}', '\0'], "nparallel;" => ['\u{2226}', '\0'],
    "nshortparallel;" => ['\u{2226}', '\0'], "nspar;" => ['\u{2226}', '\0'],
    "NotDoubleVerticalBar;" => ['\u{2226}', '\0'],
    "and;" => ['\u{2227}', '\0'], "wedge;" => ['\u{2227}', '\0'],
    "or;" => ['\u{2228}', '\0'], "vee;" => ['\u{2228}', '\0'],
    "cap;" => ['\u{2229}', '\0'],
    "cup;" => ['\u{222A}', '\0'],
    "int;" => ['\u{222B}', '\0'], "Integral;" => ['\u{222B}', '\0'],
    "Int;" => ['\u{222C}', '\0'],
    "tint;" => ['\u{222D}', '\0'],
    "conint;" => ['\u{222E}', '\0'], "oint;" => ['\u{222E}', '\0'],
    "ContourIntegral;" => ['\u{222E}', '\0'],
    "there4;" => ['\u{2234}', '\0'], "therefore;" => ['\u{2234}', '\0'],
    "Therefore;" => ['\u{2234}', '\0'],
    "becaus;" => ['\u{2235}', '\0'], "because;" => ['\u{2235}', '\0'],
    "Because;" => ['\u{2235}', '\0'],
    "ratio;" => ['\u{2236}', '\0'],
    "Colon;" => ['\u{2237}', '\0'], "Proportion;" => ['\u{2237}', '\0'],
    "sim;" => ['\u{223C}', '\0'], "thksim;" => ['\u{223C}', '\0'],
    "thicksim;" => ['\u{223C}', '\0'], "Tilde;" => ['\u{223C}', '\0'],
    "nsim;" => ['\u{2241}', '\0'], "NotTilde;" => ['\u{2241}', '\0'],
    "sime;" => ['\u{2243}', '\0'], "simeq;" => ['\u{2243}', '\0'],
    "TildeEqual;" => ['\u{2243}', '\0'],
    "nsime;" => ['\u{2244}', '\0'], "nsimeq;" => ['\u{2244}', '\0'],
    "NotTildeEqual;" => ['\u{2244}', '\0'],
    "cong;" => ['\u{2245}', '\0'], "TildeFullEqual;" => ['\u{2245}', '\0'],
    "ncong;" => ['\u{2247}', '\0'], "NotTildeFullEqual;" => ['\u{2247}', '\0'],
    "asymp;" => ['\u{2248}', '\0'], "ap;" => ['\u{2248}', '\0'],
    "approx;" => ['\u{2248}', '\0'], "thkap;" => ['\u{2248}', '\0'],
    "thickapprox;" => ['\u{2248}', '\0'], "TildeTilde;" => ['\u{2248}', '\0'],
    "nap;" => ['\u{2249}', '\0'], "napprox;" => ['\u{2249}', '\0'],
    "NotTildeTilde;" => ['\u{2249}', '\0'],
    "ape;" => ['\u{224A}', '\0'], "approxeq;" => ['\u{224A}', '\0'],
    "bump;" => ['\u{224E}', '\0'], "Bumpeq;" => ['\u{224E}', '\0'],
    "HumpDownHump;" => ['\u{224E}', '\0'],
    "bumpe;" => ['\u{224F}', '\0'], "bumpeq;" => ['\u{224F}', '\0'],
    "HumpEqual;" => ['\u{224F}', '\0'],
    "esdot;" => ['\u{2250}', '\0'], "doteq;" => ['\u{2250}', '\0'],
    "DotEqual;" => ['\u{2250}', '\0'],
    "ne;" => ['\u{2260}', '\0'], "NotEqual;" => ['\u{2260}', '\0'],
    "equiv;" => ['\u{2261}', '\0'], "Congruent;" => ['\u{2261}', '\0'],
    "nequiv;" => ['\u{2262}', '\0'], "NotCongruent;" => ['\u{2262}', '\0'],
    "le;" => ['\u{2264}', '\0'], "leq;" => ['\u{2264}', '\0'],
    "ge;" => ['\u{2265}', '\0'], "geq;" => ['\u{2265}', '\0'],
    "GreaterEqual;" => ['\u{2265}', '\0'],
    "lE;" => ['\u{2266}', '\0'], "leqq;" => ['\u{2266}', '\0'],
    "LessFullEqual;" => ['\u{2266}', '\0'],
    "gE;" => ['\u{2267}', '\0'], "geqq;" => ['\u{2267}', '\0'],
    "GreaterFullEqual;" => ['\u{2267}', '\0'],
    "ll;" => ['\u{226A}', '\0'], "Lt;" => ['\u{226A}', '\0'],
    "NestedLessLess;" => ['\u{226A}', '\0'],
    "gg;" => ['\u{226B}', '\0'], "Gt;" => ['\u{226B}', '\0'],
    "NestedGreaterGreater;" => ['\u{226B}', '\0'],
    "nlt;" => ['\u{226E}', '\0'], "NotLess;" => ['\u{226E}', '\0'],
    "ngt;" => ['\u{226F}', '\0'], "NotGreater;" => ['\u{226F}', '\0'],
    "nle;" => ['\u{2270}', '\0'], "nleq;" => ['\u{2270}', '\0'],
    "NotLessEqual;" => ['\u{2270}', '\0'],
    "nge;" => ['\u{2271}', '\0'], "ngeq;" => ['\u{2271}', '\0'],
    "NotGreaterEqual;" => ['\u{2271}', '\0'],
    "lsim;" => ['\u{2272}', '\0'], "lesssim;" => ['\u{2272}', '\0'],
    "LessTilde;" => ['\u{2272}', '\0'],
    "gsim;" => ['\u{2273}', '\0'], "gtrsim;" => ['\u{2273}', '\0'],
    "GreaterTilde;" => ['\u{2273}', '\0'],
    "lg;" => ['\u{2276}', '\0'], "lessgtr;" => ['\u{2276}', '\0'],
    "LessGreater;" => ['\u{2276}', '\0'],
    "gl;" => ['\u{2277}', '\0'], "gtrless;" => ['\u{2277}', '\0'],
    "GreaterLess;" => ['\u{2277}', '\0'],
    "pr;" => ['\u{227A}', '\0'], "prec;" => ['\u{227A}', '\0'],
    "Precedes;" => ['\u{227A}', '\0'],
    "sc;" => ['\u{227B}', '\0'], "succ;" => ['\u{227B}', '\0'],
    "Succeeds;" => ['\u{227B}', '\0'],
    "sub;" => ['\u{2282}', '\0'], "subset;" => ['\u{2282}', '\0'],
    "sup;" => ['\u{2283}', '\0'], "supset;" => ['\u{2283}', '\0'],
    "Superset;" => ['\u{2283}', '\0'],
    "nsub;" => ['\u{2284}', '\0'],
    "nsup;" => ['\u{2285}', '\0'],
    "sube;" => ['\u{2286}', '\0'], "subseteq;" => ['\u{2286}', '\0'],
    "SubsetEqual;" => ['\u{2286}', '\0'],
    "supe;" => ['\u{2287}', '\0'], "supseteq;" => ['\u{2287}', '\0'],
    "SupersetEqual;" => ['\u{2287}', '\0'],
    "nsube;" => ['\u{2288}', '\0'], "nsubseteq;" => ['\u{2288}', '\0'],
    "NotSubsetEqual;" => ['\u{2288}', '\0'],
    "nsupe;" => ['\u{2289}', '\0'], "nsupseteq;" => ['\u{2289}', '\0'],
    "NotSupersetEqual;" => ['\u{2289}', '\0'],
    "subne;" => ['\u{228A}', '\0'], "subsetneq;" => ['\u{228A}', '\0'],
    "supne;" => ['\u{228B}', '\0'], "supsetneq;" => ['\u{228B}', '\0'],
    "uplus;" => ['\u{228E}', '\0'], "UnionPlus;" => ['\u{228E}', '\0'],
    "sqsub;" => ['\u{228F}', '\0'], "SquareSubset;" => ['\u{228F}', '\0'],
    "sqsup;" => ['\u{2290}', '\0'], "SquareSuperset;" => ['\u{2290}', '\0'],
    "sqsube;" => ['\u{2291}', '\0'], "sqsubseteq;" => ['\u{2291}', '\0'],
    "SquareSubsetEqual;" => ['\u{2291}', '\0'],
    "sqsupe;" => ['\u{2292}', '\0'], "sqsupseteq;" => ['\u{2292}', '\0'],
    "SquareSupersetEqual;" => ['\u{2292}', '\0'],
    "sqcap;" => ['\u{2293}', '\0'], "SquareIntersection;" => ['\u{2293}', '\0'],
    "sqcup;" => ['\u{2294}', '\0'], "SquareUnion;" => ['\u{2294}', '\0'],
    "oplus;" => ['\u{2295}', '\0'], "CirclePlus;" => ['\u{2295}', '\0'],
    "ominus;" => ['\u{2296}', '\0'], "CircleMinus;" => ['\u{2296}', '\0'],
    "otimes;" => ['\u{2297}', '\0'], "CircleTimes;" => ['\u{2297}', '\0'],
    "osol;" => ['\u{2298}', '\0'],
    "odot;" => ['\u{2299}', '\0'], "CircleDot;" => ['\u{2299}', '\0'],
    "ocir;" => ['\u{229A}', '\0'], "circledcirc;" => ['\u{229A}', '\0'],
    "oast;" => ['\u{229B}', '\0'], "circledast;" => ['\u{229B}', '\0'],
    "odash;" => ['\u{229D}', '\0'], "circleddash;" => ['\u{229D}', '\0'],
    "plusb;" => ['\u{229E}', '\0'], "boxplus;" => ['\u{229E}', '\0'],
    "minusb;" => ['\u{229F}', '\0'], "boxminus;" => ['\u{229F}', '\0'],
    "timesb;" => ['\u{22A0}', '\0'], "boxtimes;" => ['\u{22A0}', '\0'],
    "sdotb;" => ['\u{22A1}', '\0'], "dotsquare;" => ['\u{22A1}', '\0'],
    "vdash;" => ['\u{22A2}', '\0'], "RightTee;" => ['\u{22A2}', '\0'],
    "dashv;" => ['\u{22A3}', '\0'], "LeftTee;" => ['\u{22A3}', '\0'],
    "top;" => ['\u{22A4}', '\0'], "DownTee;" => ['\u{22A4}', '\0'],
    "perp;" => ['\u{22A5}', '\0'], "bot;" => ['\u{22A5}', '\0'],
    "bottom;" => ['\u{22A5}', '\0'], "UpTee;" => ['\u{22A5}', '\0'],
    "models;" => ['\u{22A7}', '\0'],
    "vDash;" => ['\u{22A8}', '\0'], "DoubleRightTee;" => ['\u{22A8}', '\0'],
    "ltimes;" => ['\u{22C9}', '\0'],
    "rtimes;" => ['\u{22CA}', '\0'],
    "bowtie;" => ['\u{22C8}', '\0'],
    "sdot;" => ['\u{22C5}', '\0'],
    "Star;" => ['\u{22C6}', '\0'], "sstarf;" => ['\u{22C6}', '\0'],
    "divonx;" => ['\u{22C7}', '\0'], "divideontimes;" => ['\u{22C7}', '\0'],
    "ctdot;" => ['\u{22EF}', '\0'],

    // Geometric shapes, misc symbols, ceilings and floors.
    "lceil;" => ['\u{2308}', '\0'], "LeftCeiling;" => ['\u{2308}', '\0'],
    "rceil;" => ['\u{2309}', '\0'], "RightCeiling;" => ['\u{2309}', '\0'],
    "lfloor;" => ['\u{230A}', '\0'], "LeftFloor;" => ['\u{230A}', '\0'],
    "rfloor;" => ['\u{230B}', '\0'], "RightFloor;" => ['\u{230B}', '\0'],
    "lang;" => ['\u{27E8}', '\0'], "langle;" => ['\u{27E8}', '\0'],
    "LeftAngleBracket;" => ['\u{27E8}', '\0'],
    "rang;" => ['\u{27E9}', '\0'], "rangle;" => ['\u{27E9}', '\0'],
    "RightAngleBracket;" => ['\u{27E9}', '\0'],
    "squ;" => ['\u{25A1}', '\0'], "square;" => ['\u{25A1}', '\0'],
    "Square;" => ['\u{25A1}', '\0'],
    "squf;" => ['\u{25AA}', '\0'], "blacksquare;" => ['\u{25AA}', '\0'],
    "FilledVerySmallSquare;" => ['\u{25AA}', '\0'],
    "loz;" => ['\u{25CA}', '\0'], "lozenge;" => ['\u{25CA}', '\0'],
    "starf;" => ['\u{2605}', '\0'], "bigstar;" => ['\u{2605}', '\0'],
    "star;" => ['\u{2606}', '\0'],
    "phone;" => ['\u{260E}', '\0'],
    "female;" => ['\u{2640}', '\0'],
    "male;" => ['\u{2642}', '\0'],
    "spades;" => ['\u{2660}', '\0'], "spadesuit;" => ['\u{2660}', '\0'],
    "clubs;" => ['\u{2663}', '\0'], "clubsuit;" => ['\u{2663}', '\0'],
    "hearts;" => ['\u{2665}', '\0'], "heartsuit;" => ['\u{2665}', '\0'],
    "diams;" => ['\u{2666}', '\0'], "diamondsuit;" => ['\u{2666}', '\0'],
    "sung;" => ['\u{266A}', '\0'],
    "flat;" => ['\u{266D}', '\0'],
    "natur;" => ['\u{266E}', '\0'], "natural;" => ['\u{266E}', '\0'],
    "sharp;" => ['\u{266F}', '\0'],
    "check;" => ['\u{2713}', '\0'], "checkmark;" => ['\u{2713}', '\0'],
    "cross;" => ['\u{2717}', '\0'],
    "malt;" => ['\u{2720}', '\0'], "maltese;" => ['\u{2720}', '\0'],
    "sext;" => ['\u{2736}', '\0'],
};

/// Look up the longest prefix of `name` that is a complete reference name.
/// Returns the matched length and its replacement scalars.
pub fn longest_reference_prefix(name: &str) -> Option<(usize, [char; 2])> {
    for end in (1..=name.len().min(LONGEST_REFERENCE_NAME)).rev() {
        if !name.is_char_boundary(end) {
            continue;
        }
        if let Some(&chars) = NAMED_REFERENCES.get(&name[..end]) {
            return Some((end, chars));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{longest_reference_prefix, LONGEST_REFERENCE_NAME, NAMED_REFERENCES};

    #[test]
    fn legacy_names_present_in_both_forms() {
        assert_eq!(NAMED_REFERENCES.get("amp"), Some(&['&', '\0']));
        assert_eq!(NAMED_REFERENCES.get("amp;"), Some(&['&', '\0']));
        assert_eq!(NAMED_REFERENCES.get("copy"), Some(&['\u{A9}', '\0']));
        assert!(NAMED_REFERENCES.get("lceil").is_none());
        assert!(NAMED_REFERENCES.get("lceil;").is_some());
    }

    #[test]
    fn longest_match_wins() {
        // "notin" must not stop at the legacy "not".
        assert_eq!(
            longest_reference_prefix("notin;x"),
            Some((6, ['\u{2209}', '\0']))
        );
        // A dead end backtracks to the legacy prefix.
        assert_eq!(
            longest_reference_prefix("notit;"),
            Some((3, ['\u{AC}', '\0']))
        );
        assert_eq!(longest_reference_prefix("zzz;"), None);
    }

    #[test]
    fn no_name_exceeds_the_declared_bound() {
        assert!(NAMED_REFERENCES
            .keys()
            .all(|k| k.len() <= LONGEST_REFERENCE_NAME));
    }
}
