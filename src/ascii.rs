//! ASCII classification used by the parser and host/path sub-parsers.
//!
//! Every predicate here operates on a single byte and is meant to be cheap
//! enough to call per-byte in a hot loop; none of them allocate.

/// `0-9`
#[inline]
pub fn is_ascii_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// `0-9 a-f A-F`
#[inline]
pub fn is_hex_digit(byte: u8) -> bool {
    byte.is_ascii_hexdigit()
}

/// Returns the numeric value of a hex digit, or `None` if `byte` is not one.
#[inline]
pub fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// `A-Z a-z`
#[inline]
pub fn is_ascii_alpha(byte: u8) -> bool {
    byte.is_ascii_alphabetic()
}

/// `A-Z a-z 0-9`
#[inline]
pub fn is_ascii_alphanumeric(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
}

/// Lower-case an ASCII byte with the classic `| 0x20` trick; non-ASCII-alpha
/// bytes pass through unchanged (this never touches non-ASCII bytes because
/// the 0x20 bit is already set for all of them that matter here).
#[inline]
pub fn ascii_lower(byte: u8) -> u8 {
    if byte.is_ascii_uppercase() {
        byte | 0x20
    } else {
        byte
    }
}

/// <https://url.spec.whatwg.org/#url-code-points>
///
/// ASCII alphanumerics, `!$&'()*+,-./:;=?@_~`, and the non-surrogate,
/// non-noncharacter range `U+00A0..U+10FFFD`.
pub fn is_url_code_point(c: char) -> bool {
    match c {
        'a'..='z'
        | 'A'..='Z'
        | '0'..='9'
        | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/' | ':' | ';'
        | '=' | '?' | '@' | '_' | '~' => true,
        '\u{A0}'..='\u{D7FF}' | '\u{E000}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' => true,
        _ => {
            let v = c as u32;
            if v < 0x10000 {
                return false;
            }
            if v > 0x10FFFD {
                return false;
            }
            // exclude the last two code points of every plane (noncharacters)
            (v & 0xFFFE) != 0xFFFE
        }
    }
}

/// <https://url.spec.whatwg.org/#forbidden-host-code-point>
pub fn is_forbidden_host_code_point(c: char) -> bool {
    matches!(
        c,
        '\0' | '\t' | '\n' | '\r' | ' ' | '#' | '/' | ':' | '<' | '>' | '?' | '@' | '[' | '\\'
            | ']' | '^' | '|'
    )
}

/// <https://url.spec.whatwg.org/#forbidden-domain-code-point>
///
/// Forbidden host code points, plus ASCII control/C0 and `%` and DEL.
pub fn is_forbidden_domain_code_point(c: char) -> bool {
    is_forbidden_host_code_point(c) || matches!(c, '\0'..='\u{1F}' | '%' | '\u{7F}')
}

/// C0 control or space, used for the one-time input trim.
#[inline]
pub fn is_c0_or_space(c: char) -> bool {
    c <= ' '
}

/// ASCII tab or newline, silently stripped from input before parsing.
#[inline]
pub fn is_ascii_tab_or_newline(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        for b in 0..=255u8 {
            if let Some(v) = hex_value(b) {
                assert!(v < 16);
            }
        }
        assert_eq!(hex_value(b'a'), Some(10));
        assert_eq!(hex_value(b'F'), Some(15));
        assert_eq!(hex_value(b'g'), None);
    }

    #[test]
    fn lower_is_idempotent() {
        for b in 0..=255u8 {
            assert_eq!(ascii_lower(ascii_lower(b)), ascii_lower(b));
        }
    }

    #[test]
    fn url_code_point_excludes_forbidden() {
        assert!(is_url_code_point('a'));
        assert!(is_url_code_point('~'));
        assert!(!is_url_code_point('"'));
        assert!(!is_url_code_point(' '));
        assert!(is_url_code_point('\u{00A1}'));
        assert!(!is_url_code_point('\u{FFFE}'));
    }

    #[test]
    fn forbidden_domain_is_superset_of_forbidden_host() {
        assert!(is_forbidden_domain_code_point('%'));
        assert!(is_forbidden_domain_code_point('\u{1}'));
        assert!(is_forbidden_host_code_point('#'));
        assert!(is_forbidden_domain_code_point('#'));
    }
}
