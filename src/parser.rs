// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! §4.4 the basic URL parser, restated as a sequence of plain functions
//! over an owned, pre-cleaned `String` rather than the state-machine-over-
//! characters shape of the standard's own pseudocode.
//!
//! Grounded on the teacher's `UrlParser`/`parse_url` (old `src/parser.rs`):
//! the same overall shape (clean input, split off scheme, dispatch on
//! special/file/other, build the serialization left to right while
//! recording offsets as you go) survives; the state names themselves are
//! inlined into ordinary control flow instead of a `Context` enum, since
//! this crate doesn't need to resume parsing mid-state the way a
//! state-override setter call does.

use crate::ascii::{
    is_ascii_alpha, is_ascii_alphanumeric, is_ascii_tab_or_newline, is_c0_or_space, is_url_code_point,
};
use crate::error::ParseError;
use crate::host::Host;
use crate::options::{ParseOptions, SyntaxViolation};
use crate::path::{push_path_segment, serialize_path, starts_with_windows_drive_letter};
use crate::percent_encoding::{percent_encode_to, starts_with_two_hex, C0_SET, PATH_SET, USERINFO_SET};
use crate::scheme::SchemeKind;
use crate::structure::{HostRepr, Sigil, UrlStructure};
use crate::Url;
use std::sync::Arc;

pub(crate) fn parse_url(input: &str, mut options: ParseOptions<'_>) -> Result<Url, ParseError> {
    let mut report = |v: SyntaxViolation| {
        if let Some(f) = options.violation_fn.as_deref_mut() {
            f(v)
        }
    };
    let cleaned = clean(input, &mut report);

    if let Some((scheme, rest)) = parse_scheme(&cleaned) {
        let scheme_kind = SchemeKind::from_ascii_lowercase(&scheme);
        let mut serialization = String::with_capacity(cleaned.len() + 4);
        serialization.push_str(&scheme);
        serialization.push(':');
        let scheme_end = serialization.len() as u32;

        if scheme_kind.is_file() {
            return parse_file(serialization, scheme_end, rest, options.base_url, &mut report);
        }
        if scheme_kind.is_special() {
            if let Some(base) = options.base_url {
                if base.scheme_kind() == scheme_kind && !starts_with_authority_marker(rest, true) {
                    return parse_relative(base, rest, Some(scheme), &mut report);
                }
            }
            let after_slashes = consume_special_slashes(rest, &mut report);
            return parse_authority_then_rest(
                serialization,
                scheme_end,
                scheme_kind,
                after_slashes,
                &mut report,
            );
        }
        // Non-special scheme.
        if let Some(after) = rest.strip_prefix("//") {
            return parse_authority_then_rest(serialization, scheme_end, scheme_kind, after, &mut report);
        }
        if rest.starts_with('/') {
            return parse_path_only(serialization, scheme_end, scheme_kind, rest, &mut report);
        }
        return parse_cannot_be_a_base(serialization, scheme_end, scheme_kind, rest, &mut report);
    }

    match options.base_url {
        Some(base) => parse_relative(base, &cleaned, None, &mut report),
        None => Err(ParseError::RelativeUrlWithoutBase),
    }
}

/// Trim leading/trailing C0-or-space, then drop every tab and newline,
/// reporting at most one violation for each kind of removal.
fn clean(input: &str, report: &mut impl FnMut(SyntaxViolation)) -> String {
    let trimmed = input.trim_matches(is_c0_or_space);
    if trimmed.len() != input.len() {
        report(SyntaxViolation::C0SpaceIgnored);
    }
    if trimmed.contains(is_ascii_tab_or_newline) {
        report(SyntaxViolation::TabOrNewlineIgnored);
        trimmed.chars().filter(|&c| !is_ascii_tab_or_newline(c)).collect()
    } else {
        trimmed.to_owned()
    }
}

/// §4.7: reports a `NonUrlCodePoint` violation for every code point of
/// `input` that isn't a URL code point and isn't `%` (the standard's own
/// exception, since a well-formed percent escape is always acceptable),
/// and a `PercentDecode` violation for every `%` not followed by two hex
/// digits. Purely diagnostic; never changes how `input` is parsed.
fn scan_url_code_points(input: &str, report: &mut impl FnMut(SyntaxViolation)) {
    let bytes = input.as_bytes();
    for (i, c) in input.char_indices() {
        if c == '%' {
            if !starts_with_two_hex(&bytes[i + 1..]) {
                report(SyntaxViolation::PercentDecode);
            }
        } else if !is_url_code_point(c) {
            report(SyntaxViolation::NonUrlCodePoint);
        }
    }
}

/// An ASCII-alpha start, then any run of alnum/`+`/`-`/`.`, then `:`.
fn parse_scheme(input: &str) -> Option<(String, &str)> {
    let bytes = input.as_bytes();
    if bytes.is_empty() || !is_ascii_alpha(bytes[0]) {
        return None;
    }
    let mut i = 1;
    while i < bytes.len() && (is_ascii_alphanumeric(bytes[i]) || matches!(bytes[i], b'+' | b'-' | b'.')) {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b':' {
        return None;
    }
    Some((input[..i].to_ascii_lowercase(), &input[i + 1..]))
}

fn starts_with_authority_marker(input: &str, special: bool) -> bool {
    let mut chars = input.chars();
    let is_sep = |c: char| c == '/' || (special && c == '\\');
    matches!((chars.next(), chars.next()), (Some(a), Some(b)) if is_sep(a) && is_sep(b))
}

/// Special schemes tolerate any run of slashes/backslashes where the
/// standard wants exactly `//`; collapse them all and report once.
fn consume_special_slashes<'a>(input: &'a str, report: &mut impl FnMut(SyntaxViolation)) -> &'a str {
    let mut rest = input;
    let mut saw_backslash = false;
    let mut count = 0;
    while let Some(c) = rest.chars().next() {
        if c == '/' {
            rest = &rest[1..];
            count += 1;
        } else if c == '\\' {
            saw_backslash = true;
            rest = &rest[1..];
            count += 1;
        } else {
            break;
        }
    }
    if saw_backslash {
        report(SyntaxViolation::Backslash);
    }
    if count < 2 {
        report(SyntaxViolation::ExpectedDoubleSlash);
    }
    rest
}

struct Authority<'a> {
    username: String,
    password: String,
    host: Host,
    port: Option<u16>,
    remainder: &'a str,
}

/// Parses `username:password@host:port` out of the front of `input`, up
/// to the first unescaped `/`, `\` (special only), `?` or `#`.
fn parse_authority<'a>(
    input: &'a str,
    scheme_kind: SchemeKind,
    report: &mut impl FnMut(SyntaxViolation),
) -> Result<Authority<'a>, ParseError> {
    let end = input
        .find(|c: char| c == '/' || c == '?' || c == '#' || (scheme_kind.is_special() && c == '\\'))
        .unwrap_or(input.len());
    let (authority, remainder) = input.split_at(end);

    let (userinfo, host_and_port) = match authority.rfind('@') {
        Some(at) => {
            report(SyntaxViolation::EmbeddedCredentials);
            if authority[..at].contains('@') {
                report(SyntaxViolation::UnencodedAtSign);
            }
            (&authority[..at], &authority[at + 1..])
        }
        None => ("", authority),
    };

    let (username_raw, password_raw) = match userinfo.find(':') {
        Some(i) => (&userinfo[..i], &userinfo[i + 1..]),
        None => (userinfo, ""),
    };
    scan_url_code_points(username_raw, report);
    let mut username = String::new();
    percent_encode_to(username_raw.as_bytes(), &USERINFO_SET, &mut username);
    scan_url_code_points(password_raw, report);
    let mut password = String::new();
    percent_encode_to(password_raw.as_bytes(), &USERINFO_SET, &mut password);

    let (host_str, port_str) = if let Some(rest) = host_and_port.strip_prefix('[') {
        match rest.find(']') {
            Some(close) => {
                let host_literal = &host_and_port[..close + 2];
                let after = &rest[close + 1..];
                match after.strip_prefix(':') {
                    Some(p) => (host_literal, Some(p)),
                    None if after.is_empty() => (host_literal, None),
                    None => return Err(ParseError::InvalidPort),
                }
            }
            None => return Err(ParseError::InvalidIpv6Address),
        }
    } else {
        match host_and_port.find(':') {
            Some(i) => (&host_and_port[..i], Some(&host_and_port[i + 1..])),
            None => (host_and_port, None),
        }
    };

    if host_str.is_empty()
        && (scheme_kind.is_special() || !username.is_empty() || !password.is_empty() || port_str.is_some())
    {
        return Err(ParseError::EmptyHost);
    }

    let host = if scheme_kind.is_special() {
        Host::parse_for_special_scheme(host_str)?
    } else {
        Host::parse_opaque(host_str)?
    };

    let port = match port_str {
        None => None,
        Some("") => None,
        Some(digits) => {
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::InvalidPort);
            }
            let value: u32 = digits.parse().map_err(|_| ParseError::InvalidPort)?;
            if value > u16::MAX as u32 {
                return Err(ParseError::InvalidPort);
            }
            let value = value as u16;
            if Some(value) == scheme_kind.default_port() {
                None
            } else {
                Some(value)
            }
        }
    };

    Ok(Authority {
        username,
        password,
        host,
        port,
        remainder,
    })
}

fn host_repr(host: &Host) -> HostRepr {
    match host {
        Host::Domain(_) => HostRepr::Domain,
        Host::Opaque(_) => HostRepr::Opaque,
        Host::Empty => HostRepr::None,
        Host::Ipv4(addr) => HostRepr::Ipv4(*addr),
        Host::Ipv6(addr) => HostRepr::Ipv6(*addr),
    }
}

fn parse_authority_then_rest(
    mut serialization: String,
    scheme_end: u32,
    scheme_kind: SchemeKind,
    rest: &str,
    report: &mut impl FnMut(SyntaxViolation),
) -> Result<Url, ParseError> {
    serialization.push_str("//");
    let authority = parse_authority(rest, scheme_kind, report)?;

    if !authority.username.is_empty() {
        serialization.push_str(&authority.username);
    }
    if !authority.password.is_empty() {
        serialization.push(':');
        serialization.push_str(&authority.password);
    }
    if !authority.username.is_empty() || !authority.password.is_empty() {
        serialization.push('@');
    }
    let username_end = serialization.len() as u32;

    let host_start = serialization.len() as u32;
    serialization.push_str(&authority.host.to_string());
    let host_end = serialization.len() as u32;

    if let Some(port) = authority.port {
        serialization.push(':');
        serialization.push_str(&port.to_string());
    }

    finish_path_query_fragment(
        serialization,
        scheme_end,
        scheme_kind,
        Sigil::Authority,
        username_end,
        host_start,
        host_end,
        host_repr(&authority.host),
        authority.port,
        authority.remainder,
        false,
        report,
    )
}

fn parse_path_only(
    serialization: String,
    scheme_end: u32,
    scheme_kind: SchemeKind,
    rest: &str,
    report: &mut impl FnMut(SyntaxViolation),
) -> Result<Url, ParseError> {
    let len = serialization.len() as u32;
    finish_path_query_fragment(
        serialization,
        scheme_end,
        scheme_kind,
        Sigil::None,
        len,
        len,
        len,
        HostRepr::None,
        None,
        rest,
        false,
        report,
    )
}

fn parse_cannot_be_a_base(
    mut serialization: String,
    scheme_end: u32,
    scheme_kind: SchemeKind,
    rest: &str,
    report: &mut impl FnMut(SyntaxViolation),
) -> Result<Url, ParseError> {
    let (path_part, query_part, fragment_part) = split_query_fragment(rest);
    let path_start = serialization.len() as u32;
    scan_url_code_points(path_part, report);
    percent_encode_to(path_part.as_bytes(), &C0_SET, &mut serialization);

    let query_start = write_query(&mut serialization, query_part, scheme_kind, report);
    let fragment_start = write_fragment(&mut serialization, fragment_part, report);

    Ok(Url {
        serialization: Arc::new(serialization),
        structure: UrlStructure {
            scheme_end,
            scheme_kind,
            sigil: Sigil::None,
            username_end: scheme_end,
            host_start: scheme_end,
            host_end: scheme_end,
            host: HostRepr::None,
            port: None,
            path_start,
            first_path_segment_length: path_part.len() as u32,
            query_start,
            fragment_start,
            cannot_be_a_base: true,
        },
    })
}

/// Unlike `consume_special_slashes`, `file:` only collapses the first two
/// leading slashes (the "file" and "file slash" states each consume at
/// most one); a third leading slash is not part of the marker and is left
/// for the path to reprocess, per the empty-host branch below.
fn consume_file_slashes<'a>(input: &'a str, report: &mut impl FnMut(SyntaxViolation)) -> (u8, &'a str) {
    let mut rest = input;
    let mut count = 0u8;
    while count < 2 {
        match rest.chars().next() {
            Some('/') => {
                rest = &rest[1..];
                count += 1;
            }
            Some('\\') => {
                report(SyntaxViolation::Backslash);
                rest = &rest[1..];
                count += 1;
            }
            _ => break,
        }
    }
    (count, rest)
}

fn parse_file(
    mut serialization: String,
    scheme_end: u32,
    rest: &str,
    base_url: Option<&Url>,
    report: &mut impl FnMut(SyntaxViolation),
) -> Result<Url, ParseError> {
    let scheme_kind = SchemeKind::File;
    let (slash_count, after_slashes) = consume_file_slashes(rest, report);

    if slash_count < 2 {
        report(SyntaxViolation::ExpectedFileDoubleSlash);
        // Fewer than two slashes: no authority was ever present, so the
        // rest is the path and the host stays empty. Only the authority
        // sigil goes in `serialization` here — `serialize_path` always
        // synthesizes the path's own leading `/` later, so writing a bare
        // "//" (not "///") avoids a spurious fourth slash.
        serialization.push_str("//");
        let host_pos = serialization.len() as u32;
        return finish_path_query_fragment(
            serialization,
            scheme_end,
            scheme_kind,
            Sigil::Authority,
            host_pos,
            host_pos,
            host_pos,
            HostRepr::None,
            None,
            after_slashes,
            true,
            report,
        );
    }

    // file://C:/... (a host that's actually a drive letter) degrades to a
    // hostless file URL with the drive letter kept as the first segment.
    if starts_with_windows_drive_letter(after_slashes) {
        report(SyntaxViolation::FileWithHostAndWindowsDrive);
        serialization.push_str("//");
        let host_pos = serialization.len() as u32;
        return finish_path_query_fragment(
            serialization,
            scheme_end,
            scheme_kind,
            Sigil::Authority,
            host_pos,
            host_pos,
            host_pos,
            HostRepr::None,
            None,
            after_slashes,
            true,
            report,
        );
    }

    let end = after_slashes
        .find(|c: char| matches!(c, '/' | '\\' | '?' | '#'))
        .unwrap_or(after_slashes.len());
    let (host_candidate, remainder) = after_slashes.split_at(end);

    if host_candidate.is_empty() {
        if let Some(base) = base_url {
            if base.scheme_kind() == SchemeKind::File {
                return parse_relative(base, rest, Some("file".to_owned()), report);
            }
        }
        serialization.push_str("//");
        let host_pos = serialization.len() as u32;
        return finish_path_query_fragment(
            serialization,
            scheme_end,
            scheme_kind,
            Sigil::Authority,
            host_pos,
            host_pos,
            host_pos,
            HostRepr::None,
            None,
            remainder,
            true,
            report,
        );
    }

    serialization.push_str("//");
    let username_end = serialization.len() as u32;
    let host_start = serialization.len() as u32;
    let host = if host_candidate.eq_ignore_ascii_case("localhost") {
        Host::Empty
    } else {
        Host::parse_file_host(host_candidate)?
    };
    serialization.push_str(&host.to_string());
    let host_end = serialization.len() as u32;

    finish_path_query_fragment(
        serialization,
        scheme_end,
        scheme_kind,
        Sigil::Authority,
        username_end,
        host_start,
        host_end,
        host_repr(&host),
        None,
        remainder,
        true,
        report,
    )
}

fn split_query_fragment(input: &str) -> (&str, Option<&str>, Option<&str>) {
    let (before_fragment, fragment) = match input.find('#') {
        Some(i) => (&input[..i], Some(&input[i + 1..])),
        None => (input, None),
    };
    let (path, query) = match before_fragment.find('?') {
        Some(i) => (&before_fragment[..i], Some(&before_fragment[i + 1..])),
        None => (before_fragment, None),
    };
    (path, query, fragment)
}

fn write_query(
    serialization: &mut String,
    query_part: Option<&str>,
    scheme_kind: SchemeKind,
    report: &mut impl FnMut(SyntaxViolation),
) -> Option<u32> {
    query_part.map(|q| {
        scan_url_code_points(q, report);
        serialization.push('?');
        let start = serialization.len() as u32;
        let set = if scheme_kind.is_special() {
            &crate::percent_encoding::SPECIAL_QUERY_SET
        } else {
            &crate::percent_encoding::QUERY_SET
        };
        percent_encode_to(q.as_bytes(), set, serialization);
        start
    })
}

fn write_fragment(
    serialization: &mut String,
    fragment_part: Option<&str>,
    report: &mut impl FnMut(SyntaxViolation),
) -> Option<u32> {
    fragment_part.map(|frag| {
        if frag.contains('\0') {
            report(SyntaxViolation::NullInFragment);
        }
        scan_url_code_points(frag, report);
        serialization.push('#');
        let start = serialization.len() as u32;
        percent_encode_to(
            frag.as_bytes(),
            &crate::percent_encoding::FRAGMENT_SET,
            serialization,
        );
        start
    })
}

#[allow(clippy::too_many_arguments)]
fn finish_path_query_fragment(
    mut serialization: String,
    scheme_end: u32,
    scheme_kind: SchemeKind,
    sigil: Sigil,
    username_end: u32,
    host_start: u32,
    host_end: u32,
    host: HostRepr,
    port: Option<u16>,
    rest: &str,
    is_file: bool,
    report: &mut impl FnMut(SyntaxViolation),
) -> Result<Url, ParseError> {
    let (path_part, query_part, fragment_part) = split_query_fragment(rest);

    let is_special = scheme_kind.is_special();
    let normalized = if is_special && path_part.contains('\\') {
        report(SyntaxViolation::Backslash);
        path_part.replace('\\', "/")
    } else {
        path_part.to_owned()
    };

    let had_host = !matches!(sigil, Sigil::None);
    let mut segments = Vec::new();
    if !normalized.is_empty() || had_host {
        let body = normalized.strip_prefix('/').unwrap_or(&normalized);
        for raw in body.split('/') {
            scan_url_code_points(raw, report);
            let mut encoded = String::new();
            percent_encode_to(raw.as_bytes(), &PATH_SET, &mut encoded);
            push_path_segment(&mut segments, &encoded, is_file);
        }
    }

    let mut path_str = serialize_path(&segments);
    let had_leading_slash = normalized.starts_with('/');
    if (had_host || had_leading_slash) && path_str.is_empty() {
        path_str.push('/');
    }

    let needs_sigil = matches!(sigil, Sigil::None) && path_str.starts_with("//");
    let first_path_segment_length = segments.first().map(|s| s.len()).unwrap_or(0) as u32;
    if needs_sigil {
        serialization.push_str("/.");
    }
    let path_start = serialization.len() as u32;
    serialization.push_str(&path_str);

    let query_start = write_query(&mut serialization, query_part, scheme_kind, &mut *report);
    let fragment_start = write_fragment(&mut serialization, fragment_part, report);

    Ok(Url {
        serialization: Arc::new(serialization),
        structure: UrlStructure {
            scheme_end,
            scheme_kind,
            sigil: if needs_sigil { Sigil::Path } else { sigil },
            username_end,
            host_start,
            host_end,
            host,
            port,
            path_start,
            first_path_segment_length,
            query_start,
            fragment_start,
            cannot_be_a_base: false,
        },
    })
}

/// Resolve `rest` (the cleaned input minus any scheme) as a reference
/// relative to `base`. `new_scheme` is `Some` when the input *did* have an
/// explicit (same-kind) scheme, in which case it replaces `base`'s scheme
/// text but authority/path resolution still follows the relative rules.
fn parse_relative(
    base: &Url,
    rest: &str,
    new_scheme: Option<String>,
    report: &mut impl FnMut(SyntaxViolation),
) -> Result<Url, ParseError> {
    if base.cannot_be_a_base() {
        return match rest.strip_prefix('#') {
            Some(frag) => {
                let end = base.structure.query_end(base.as_str()) as usize;
                let mut serialization = base.as_str()[..end].to_owned();
                let fragment_start = write_fragment(&mut serialization, Some(frag), report);
                let mut structure = base.structure.clone();
                structure.fragment_start = fragment_start;
                Ok(Url {
                    serialization: Arc::new(serialization),
                    structure,
                })
            }
            None if rest.is_empty() => Ok(base.clone()),
            None => Err(ParseError::RelativeUrlWithCannotBeABaseBase),
        };
    }

    let scheme_kind = base.scheme_kind();
    let scheme_text = new_scheme.unwrap_or_else(|| base.scheme().to_owned());
    let mut serialization = String::with_capacity(base.as_str().len() + rest.len());
    serialization.push_str(&scheme_text);
    serialization.push(':');
    let scheme_end = serialization.len() as u32;
    let delta = scheme_end as i64 - base.structure.scheme_end as i64;

    if rest.is_empty() {
        let tail = &base.as_str()[base.structure.scheme_end as usize..];
        serialization.push_str(tail);
        return Ok(Url {
            serialization: Arc::new(serialization),
            structure: shift_structure(&base.structure, delta),
        });
    }

    if let Some(frag) = rest.strip_prefix('#') {
        let end = base.structure.query_end(base.as_str()) as usize;
        let tail = &base.as_str()[base.structure.scheme_end as usize..end];
        serialization.push_str(tail);
        let mut structure = shift_structure(&base.structure, delta);
        let fragment_start = write_fragment(&mut serialization, Some(frag), report);
        structure.fragment_start = fragment_start;
        return Ok(Url {
            serialization: Arc::new(serialization),
            structure,
        });
    }

    if let Some(after) = rest.strip_prefix('?') {
        let end = base.structure.path_end(base.as_str()) as usize;
        let tail = &base.as_str()[base.structure.scheme_end as usize..end];
        serialization.push_str(tail);
        let mut structure = shift_structure(&base.structure, delta);
        let hash = after.find('#');
        let (query_part, fragment_part) = match hash {
            Some(i) => (&after[..i], Some(&after[i + 1..])),
            None => (after, None),
        };
        let query_start = write_query(&mut serialization, Some(query_part), scheme_kind, &mut *report);
        let fragment_start = write_fragment(&mut serialization, fragment_part, report);
        structure.query_start = query_start;
        structure.fragment_start = fragment_start;
        return Ok(Url {
            serialization: Arc::new(serialization),
            structure,
        });
    }

    if starts_with_authority_marker(rest, scheme_kind.is_special()) {
        let after = consume_special_slashes(rest, report);
        return parse_authority_then_rest(serialization, scheme_end, scheme_kind, after, report);
    }

    if rest.starts_with('/') || (scheme_kind.is_special() && rest.starts_with('\\')) {
        // Path-absolute: keep base's authority, replace the whole path —
        // unless the new path's first segment is a Windows drive letter,
        // which clears the inherited host per the `file:` drive-letter
        // quirk (the same rule `parse_file` applies to an absolute URL).
        let after_slash = &rest[1..];
        if scheme_kind.is_file() && starts_with_windows_drive_letter(after_slash) {
            report(SyntaxViolation::FileWithHostAndWindowsDrive);
            serialization.push_str("//");
            let pos = serialization.len() as u32;
            return finish_path_query_fragment(
                serialization,
                scheme_end,
                scheme_kind,
                Sigil::Authority,
                pos,
                pos,
                pos,
                HostRepr::None,
                None,
                rest,
                true,
                report,
            );
        }
        let tail_start = base.structure.username_start() as usize;
        let tail_end = base.structure.path_start as usize;
        serialization.push_str(&base.as_str()[tail_start..tail_end]);
        let username_end = (base.structure.username_end as i64 + delta) as u32;
        let host_start = (base.structure.host_start as i64 + delta) as u32;
        let host_end = (base.structure.host_end as i64 + delta) as u32;
        return finish_path_query_fragment(
            serialization,
            scheme_end,
            scheme_kind,
            base.structure.sigil,
            username_end,
            host_start,
            host_end,
            base.structure.host,
            base.structure.port,
            rest,
            scheme_kind.is_file(),
            report,
        );
    }

    // Merge: drop base's last path segment, append the new relative path —
    // unless the new path starts with a Windows drive letter, which clears
    // the inherited host per the `file:` drive-letter quirk (the same rule
    // `parse_file` applies to an absolute URL) and replaces the base path
    // outright instead of merging into it.
    let is_file = scheme_kind.is_file();
    let clears_host = is_file && starts_with_windows_drive_letter(rest);
    if clears_host {
        report(SyntaxViolation::FileWithHostAndWindowsDrive);
    }
    let mut dir: Vec<String> = if clears_host {
        Vec::new()
    } else {
        let base_path = base.path();
        let mut dir: Vec<String> = base_path
            .strip_prefix('/')
            .unwrap_or(base_path)
            .split('/')
            .map(str::to_owned)
            .collect();
        if !dir.is_empty() {
            dir.pop();
        }
        dir
    };

    let (path_part, query_part, fragment_part) = split_query_fragment(rest);
    let normalized = if scheme_kind.is_special() && path_part.contains('\\') {
        report(SyntaxViolation::Backslash);
        path_part.replace('\\', "/")
    } else {
        path_part.to_owned()
    };
    for raw in normalized.split('/') {
        scan_url_code_points(raw, report);
        let mut encoded = String::new();
        percent_encode_to(raw.as_bytes(), &PATH_SET, &mut encoded);
        push_path_segment(&mut dir, &encoded, is_file);
    }

    let (sigil, username_end, host_start, host_end, host) = if clears_host {
        serialization.push_str("//");
        let pos = serialization.len() as u32;
        (Sigil::Authority, pos, pos, pos, HostRepr::None)
    } else {
        let tail_start = base.structure.username_start() as usize;
        let tail_end = base.structure.host_end as usize;
        serialization.push_str(&base.as_str()[tail_start..tail_end]);
        if let Some(port) = base.structure.port {
            serialization.push(':');
            serialization.push_str(&port.to_string());
        }
        (
            base.structure.sigil,
            (base.structure.username_end as i64 + delta) as u32,
            (base.structure.host_start as i64 + delta) as u32,
            (base.structure.host_end as i64 + delta) as u32,
            base.structure.host,
        )
    };
    let port = if clears_host { None } else { base.structure.port };

    let mut path_str = serialize_path(&dir);
    if path_str.is_empty() {
        path_str.push('/');
    }
    let first_path_segment_length = dir.first().map(|s| s.len()).unwrap_or(0) as u32;
    let path_start = serialization.len() as u32;
    serialization.push_str(&path_str);
    let query_start = write_query(&mut serialization, query_part, scheme_kind, &mut *report);
    let fragment_start = write_fragment(&mut serialization, fragment_part, report);

    Ok(Url {
        serialization: Arc::new(serialization),
        structure: UrlStructure {
            scheme_end,
            scheme_kind,
            sigil,
            username_end,
            host_start,
            host_end,
            host,
            port,
            path_start,
            first_path_segment_length,
            query_start,
            fragment_start,
            cannot_be_a_base: false,
        },
    })
}

/// Re-bases every offset in `structure` by `delta` bytes (used when a
/// relative reference reuses the bulk of a base URL's serialization under
/// a possibly differently-sized scheme prefix).
fn shift_structure(structure: &UrlStructure, delta: i64) -> UrlStructure {
    let shift = |x: u32| (x as i64 + delta) as u32;
    UrlStructure {
        scheme_end: shift(structure.scheme_end),
        scheme_kind: structure.scheme_kind,
        sigil: structure.sigil,
        username_end: shift(structure.username_end),
        host_start: shift(structure.host_start),
        host_end: shift(structure.host_end),
        host: structure.host,
        port: structure.port,
        path_start: shift(structure.path_start),
        first_path_segment_length: structure.first_path_segment_length,
        query_start: structure.query_start.map(shift),
        fragment_start: structure.fragment_start.map(shift),
        cannot_be_a_base: structure.cannot_be_a_base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Url;

    #[test]
    fn parses_simple_http_url() {
        let url = Url::parse("https://example.com/a/b?x=1#f").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/a/b");
        assert_eq!(url.query(), Some("x=1"));
        assert_eq!(url.fragment(), Some("f"));
    }

    #[test]
    fn file_url_without_host() {
        let url = Url::parse("file:///etc/hosts").unwrap();
        assert_eq!(url.path(), "/etc/hosts");
        assert_eq!(url.host_str(), None);
    }

    #[test]
    fn cannot_be_a_base_url() {
        let url = Url::parse("mailto:a@example.com").unwrap();
        assert!(url.cannot_be_a_base());
        assert_eq!(url.path(), "a@example.com");
    }

    #[test]
    fn relative_resolution_merges_directory() {
        let base = Url::parse("https://example.com/a/b/c").unwrap();
        let joined = base.join("../d").unwrap();
        assert_eq!(joined.as_str(), "https://example.com/a/d");
    }

    #[test]
    fn relative_resolution_query_only() {
        let base = Url::parse("https://example.com/a/b?x=1").unwrap();
        let joined = base.join("?y=2").unwrap();
        assert_eq!(joined.as_str(), "https://example.com/a/b?y=2");
    }

    #[test]
    fn missing_base_is_an_error() {
        assert!(matches!(
            Url::options().parse("/just/a/path"),
            Err(ParseError::RelativeUrlWithoutBase)
        ));
    }

    #[test]
    fn empty_host_on_special_scheme_is_an_error() {
        assert!(matches!(Url::parse("https:///path"), Err(ParseError::EmptyHost)));
    }
}
