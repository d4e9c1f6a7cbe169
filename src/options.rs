// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! §4.8/§4.7 ambient stack: the `ParseOptions` builder and the non-fatal
//! `SyntaxViolation` observer channel.
//!
//! Grounded on the teacher's `UrlParser` (old `src/parser.rs`): a small
//! builder collecting an optional base URL and an optional error-handler
//! callback before `.parse(input)` is called, generalized so the callback
//! reports named violations instead of a raw `&'static str`.

use crate::error::ParseError;
use crate::Url;

/// A non-fatal deviation from the strict grammar that the parser
/// recovered from, reported for diagnostics. Never changes whether
/// parsing succeeds.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum SyntaxViolation {
    Backslash,
    C0SpaceIgnored,
    EmbeddedCredentials,
    ExpectedDoubleSlash,
    ExpectedFileDoubleSlash,
    FileWithHostAndWindowsDrive,
    NonUrlCodePoint,
    NullInFragment,
    PercentDecode,
    TabOrNewlineIgnored,
    UnencodedAtSign,
}

impl SyntaxViolation {
    pub fn description(self) -> &'static str {
        match self {
            SyntaxViolation::Backslash => "backslash used as a path separator",
            SyntaxViolation::C0SpaceIgnored => "leading or trailing C0 control or space ignored",
            SyntaxViolation::EmbeddedCredentials => {
                "embedding authentication information (username/password) in a URL is not recommended"
            }
            SyntaxViolation::ExpectedDoubleSlash => "expected //",
            SyntaxViolation::ExpectedFileDoubleSlash => "expected // after file:",
            SyntaxViolation::FileWithHostAndWindowsDrive => {
                "file: URL with a host and a Windows drive letter"
            }
            SyntaxViolation::NonUrlCodePoint => "non-URL code point",
            SyntaxViolation::NullInFragment => "NULL character in fragment",
            SyntaxViolation::PercentDecode => "expected 2 hex digits after %",
            SyntaxViolation::TabOrNewlineIgnored => "tabs or newlines are ignored in URLs",
            SyntaxViolation::UnencodedAtSign => "unencoded @ sign in username or password",
        }
    }
}

impl std::fmt::Display for SyntaxViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// A callback invoked once per `SyntaxViolation` encountered while
/// parsing, purely for diagnostics.
pub type ViolationFn<'a> = dyn FnMut(SyntaxViolation) + 'a;

/// Builder for `Url::parse`, collecting an optional base URL to resolve
/// relative references against and an optional syntax-violation observer.
/// Constructed via `Url::options()`.
pub struct ParseOptions<'a> {
    pub(crate) base_url: Option<&'a Url>,
    pub(crate) violation_fn: Option<&'a mut ViolationFn<'a>>,
}

impl<'a> ParseOptions<'a> {
    pub fn new() -> Self {
        ParseOptions {
            base_url: None,
            violation_fn: None,
        }
    }

    pub fn base_url(mut self, base: Option<&'a Url>) -> Self {
        self.base_url = base;
        self
    }

    pub fn syntax_violation_callback(mut self, callback: Option<&'a mut ViolationFn<'a>>) -> Self {
        self.violation_fn = callback;
        self
    }

    pub fn parse(self, input: &str) -> Result<Url, ParseError> {
        crate::parser::parse_url(input, self)
    }
}

impl<'a> Default for ParseOptions<'a> {
    fn default() -> Self {
        Self::new()
    }
}
