// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! §7 Error handling design: one typed, `Display` + `Error`-implementing
//! enum per fallible boundary, rather than a bare `&'static str`.
//!
//! Grounded on the teacher's evolution from string errors
//! (`Err("Invalid IPv6 address")` in its oldest `host.rs`) to a typed
//! `ParseError` enum a revision later; this crate starts from the typed
//! shape directly.

use crate::host::HostParseError;
use std::fmt;

/// Why `Url::parse` failed. The WHATWG parser never reports a byte
/// position, only a reason.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ParseError {
    EmptyHost,
    IdnaError,
    InvalidPort,
    InvalidIpv4Address,
    InvalidIpv6Address,
    InvalidDomainCharacter,
    InvalidScheme,
    InvalidBackslash,
    InvalidCharacterInFragment,
    InvalidCharacterInPath,
    RelativeUrlWithoutBase,
    RelativeUrlWithCannotBeABaseBase,
    SetHostOnCannotBeABaseUrl,
    Overflow,
    HostParse(HostParseError),
}

impl From<HostParseError> for ParseError {
    fn from(e: HostParseError) -> Self {
        match e {
            HostParseError::EmptyHost => ParseError::EmptyHost,
            HostParseError::InvalidIpv4Address => ParseError::InvalidIpv4Address,
            HostParseError::InvalidIpv6Address => ParseError::InvalidIpv6Address,
            HostParseError::InvalidDomainCharacter => ParseError::InvalidDomainCharacter,
            HostParseError::NonAsciiDomainsNotSupportedYet => ParseError::IdnaError,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseError::EmptyHost => "empty host",
            ParseError::IdnaError => "non-ASCII domains are not supported",
            ParseError::InvalidPort => "invalid port number",
            ParseError::InvalidIpv4Address => "invalid IPv4 address",
            ParseError::InvalidIpv6Address => "invalid IPv6 address",
            ParseError::InvalidDomainCharacter => "invalid domain character",
            ParseError::InvalidScheme => "invalid scheme",
            ParseError::InvalidBackslash => "invalid backslash",
            ParseError::InvalidCharacterInFragment => "invalid character in fragment",
            ParseError::InvalidCharacterInPath => "invalid character in path",
            ParseError::RelativeUrlWithoutBase => "relative URL without a base",
            ParseError::RelativeUrlWithCannotBeABaseBase => {
                "relative URL with a cannot-be-a-base base"
            }
            ParseError::SetHostOnCannotBeABaseUrl => "cannot set host on cannot-be-a-base URL",
            ParseError::Overflow => "URLs more than 4 GiB are not supported",
            ParseError::HostParse(inner) => return write!(f, "{}", inner),
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseError {}

/// Setter errors: see the table in §7. Each corresponds to a WHATWG
/// "setter basic URL parser" failure or one of this crate's own
/// structural invariants (cannot-be-a-base, port bounds).
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SetterError {
    InvalidScheme,
    ChangeOfSchemeSpecialness,
    NewSchemeCannotHaveCredentialsOrPort,
    NewSchemeCannotHaveEmptyHostname,
    InvalidHostname,
    SchemeDoesNotSupportNilOrEmptyHostnames,
    CannotSetEmptyHostnameWithCredentialsOrPort,
    CannotSetHostOnCannotBeABaseUrl,
    CannotSetPathOnCannotBeABaseUrl,
    CannotHaveCredentialsOrPort,
    PortValueOutOfBounds,
    CannotRemoveHostnameWithoutPath,
}

impl fmt::Display for SetterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SetterError::InvalidScheme => "invalid scheme",
            SetterError::ChangeOfSchemeSpecialness => {
                "setting this scheme would change whether the URL is special"
            }
            SetterError::NewSchemeCannotHaveCredentialsOrPort => {
                "the new scheme cannot have credentials or a port"
            }
            SetterError::NewSchemeCannotHaveEmptyHostname => {
                "the new scheme cannot have an empty hostname"
            }
            SetterError::InvalidHostname => "invalid hostname",
            SetterError::SchemeDoesNotSupportNilOrEmptyHostnames => {
                "this scheme does not support a nil or empty hostname"
            }
            SetterError::CannotSetEmptyHostnameWithCredentialsOrPort => {
                "cannot set an empty hostname when credentials or a port are present"
            }
            SetterError::CannotSetHostOnCannotBeABaseUrl => {
                "cannot set the host of a cannot-be-a-base URL"
            }
            SetterError::CannotSetPathOnCannotBeABaseUrl => {
                "cannot set the path of a cannot-be-a-base URL"
            }
            SetterError::CannotHaveCredentialsOrPort => {
                "this scheme does not support credentials or a port"
            }
            SetterError::PortValueOutOfBounds => "port number out of bounds (0..=65535)",
            SetterError::CannotRemoveHostnameWithoutPath => {
                "cannot remove the hostname without a path to replace it"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for SetterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_parse_error_converts() {
        let e: ParseError = HostParseError::InvalidIpv6Address.into();
        assert_eq!(e, ParseError::InvalidIpv6Address);
    }

    #[test]
    fn displays_are_non_empty() {
        assert!(!ParseError::InvalidScheme.to_string().is_empty());
        assert!(!SetterError::PortValueOutOfBounds.to_string().is_empty());
    }
}
