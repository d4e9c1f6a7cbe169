// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! §3.1 Scheme kind.

/// The six *special* schemes get a dedicated tag each so callers can match
/// on them without re-comparing strings; everything else is `Other`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub enum SchemeKind {
    Http,
    Https,
    Ws,
    Wss,
    Ftp,
    File,
    Other,
}

impl SchemeKind {
    pub fn from_ascii_lowercase(scheme: &str) -> SchemeKind {
        match scheme {
            "http" => SchemeKind::Http,
            "https" => SchemeKind::Https,
            "ws" => SchemeKind::Ws,
            "wss" => SchemeKind::Wss,
            "ftp" => SchemeKind::Ftp,
            "file" => SchemeKind::File,
            _ => SchemeKind::Other,
        }
    }

    #[inline]
    pub fn is_special(self) -> bool {
        !matches!(self, SchemeKind::Other)
    }

    #[inline]
    pub fn is_file(self) -> bool {
        matches!(self, SchemeKind::File)
    }

    /// The scheme's default port, elided from the serialization when the
    /// URL's port matches it.
    pub fn default_port(self) -> Option<u16> {
        match self {
            SchemeKind::Http | SchemeKind::Ws => Some(80),
            SchemeKind::Https | SchemeKind::Wss => Some(443),
            SchemeKind::Ftp => Some(21),
            SchemeKind::File | SchemeKind::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_special_schemes() {
        for (s, port) in [
            ("http", Some(80)),
            ("https", Some(443)),
            ("ws", Some(80)),
            ("wss", Some(443)),
            ("ftp", Some(21)),
            ("file", None),
        ] {
            let kind = SchemeKind::from_ascii_lowercase(s);
            assert!(kind.is_special());
            assert_eq!(kind.default_port(), port);
        }
        let other = SchemeKind::from_ascii_lowercase("mailto");
        assert!(!other.is_special());
        assert_eq!(other.default_port(), None);
    }
}
