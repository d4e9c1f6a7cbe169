// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! §4.3 Path parser: segment popping, dot-segment normalization, and the
//! Windows drive-letter quirk for `file:` URLs.
//!
//! Grounded on the teacher's `parse_path` (old `src/parser.rs`): the
//! `..`/`.` segment matching and the drive-letter byte-swap are the same
//! algorithm, restated over a `Vec<String>` of already-percent-encoded
//! segments instead of over the old crate's `Vec<String>` + manual
//! `unsafe { as_mut_vec() }` byte poke.

use crate::percent_encoding::{percent_encode_to, PATH_SET};

/// Is `segment` a single or double dot segment (in any of the WHATWG's
/// case-insensitive percent-encoded spellings)?
fn is_single_dot(segment: &str) -> bool {
    matches!(segment, "." | "%2e" | "%2E")
}

fn is_double_dot(segment: &str) -> bool {
    matches!(
        segment,
        ".." | ".%2e" | ".%2E" | "%2e." | "%2E." | "%2e%2e" | "%2E%2e" | "%2e%2E" | "%2E%2E"
    )
}

/// An ASCII letter followed by `:` or `|`, e.g. `C:` or `C|`.
pub fn is_windows_drive_letter(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && matches!(bytes[1], b':' | b'|')
}

/// Like `is_windows_drive_letter`, but also accepts a drive letter followed
/// by `/`, `\`, `?`, or `#` (i.e. as the start of a longer path), which is
/// what the parser needs to decide "is this segment going to be a drive
/// letter" before segment boundaries are known.
pub fn starts_with_windows_drive_letter(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && matches!(bytes[1], b':' | b'|')
        && (bytes.len() == 2 || matches!(bytes[2], b'/' | b'\\' | b'?' | b'#'))
}

fn normalize_drive_letter(segment: &str) -> String {
    let mut bytes = segment.as_bytes().to_vec();
    bytes[1] = b':';
    String::from_utf8(bytes).unwrap()
}

/// Pushes one already-percent-encoded path segment onto `path`, applying
/// `.`/`..` normalization and the `file:` drive-letter quirk.
///
/// `path.len() == 1 && is_windows_drive_letter(path[0])` is treated as the
/// "don't pop past the drive letter" floor per the Windows drive-letter
/// invariant in §4.3.
pub fn push_path_segment(path: &mut Vec<String>, raw_segment: &str, is_file: bool) {
    if is_double_dot(raw_segment) {
        pop_path(path, is_file);
    } else if is_single_dot(raw_segment) {
        // dropped
    } else {
        let mut segment = raw_segment.to_owned();
        if is_file && path.is_empty() && is_windows_drive_letter(&segment) {
            segment = normalize_drive_letter(&segment);
        }
        path.push(segment);
    }
}

/// Pop the last segment of `path`, unless doing so would pop past a
/// Windows drive letter that is the sole remaining segment of a `file:`
/// URL path.
fn pop_path(path: &mut Vec<String>, is_file: bool) {
    if is_file && path.len() == 1 && is_windows_drive_letter(&path[0]) {
        return;
    }
    path.pop();
}

/// Percent-encode one raw (not yet escaped) path segment for inclusion in
/// the serialized path, using the special-path set when `is_special`.
pub fn encode_path_segment(raw: &[u8], output: &mut String) {
    percent_encode_to(raw, &PATH_SET, output);
}

/// Serializes `path` (already percent-encoded segments) as `/seg/seg/...`.
/// An empty `path` serializes to nothing (the caller adds a lone `/` only
/// when a host is present, per the WHATWG path-state "if url's host is
/// null" special case, which this crate's parser handles directly).
pub fn serialize_path(path: &[String]) -> String {
    let mut out = String::new();
    for segment in path {
        out.push('/');
        out.push_str(segment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_all(segments: &[&str], is_file: bool) -> Vec<String> {
        let mut path = Vec::new();
        for s in segments {
            push_path_segment(&mut path, s, is_file);
        }
        path
    }

    #[test]
    fn dot_segments_are_dropped() {
        assert_eq!(push_all(&["a", ".", "b"], false), vec!["a", "b"]);
    }

    #[test]
    fn double_dot_pops() {
        assert_eq!(push_all(&["a", "b", ".."], false), vec!["a"]);
        assert_eq!(push_all(&[".."], false), Vec::<String>::new());
    }

    #[test]
    fn double_dot_does_not_pop_past_drive_letter() {
        assert_eq!(push_all(&["C:", ".."], true), vec!["C:"]);
    }

    #[test]
    fn drive_letter_pipe_normalizes_to_colon() {
        assert_eq!(push_all(&["C|"], true), vec!["C:"]);
        assert_eq!(push_all(&["C|", "foo"], true), vec!["C:", "foo"]);
    }

    #[test]
    fn drive_letter_quirk_only_applies_at_path_start() {
        assert_eq!(push_all(&["a", "C|"], true), vec!["a", "C|"]);
    }

    #[test]
    fn serialize_joins_with_slash() {
        assert_eq!(serialize_path(&["a".into(), "b".into()]), "/a/b");
        assert_eq!(serialize_path(&[]), "");
    }

    #[test]
    fn windows_drive_letter_detection() {
        assert!(is_windows_drive_letter("C:"));
        assert!(is_windows_drive_letter("c|"));
        assert!(!is_windows_drive_letter("C::"));
        assert!(!is_windows_drive_letter("1:"));
        assert!(starts_with_windows_drive_letter("C:/foo"));
        assert!(starts_with_windows_drive_letter("C|"));
        assert!(!starts_with_windows_drive_letter("C:foo"));
    }
}
