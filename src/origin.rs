// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! §3.5 / §5 origin computation: <https://url.spec.whatwg.org/#origin>
//!
//! Grounded directly on the teacher's `src/origin.rs`: the opaque-origin
//! unique-identity trick (`Arc<u8>` compared by pointer, so
//! `opaque.clone() != opaque`) is carried over unchanged, and `blob:`'s
//! recursive re-parse-and-recurse is the same shape as the teacher's.

use crate::host::Host;
use crate::scheme::SchemeKind;
use crate::Url;
use std::sync::Arc;

/// The origin of a URL, per the tuple-or-opaque model in §3.5.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Origin {
    /// A globally unique identifier, equal only to itself (and not even to
    /// a clone of itself).
    Opaque(OpaqueOrigin),
    /// Scheme, host and port, for the schemes that have one.
    Tuple(SchemeKind, Host, u16),
}

impl Origin {
    pub fn new_opaque() -> Origin {
        Origin::Opaque(OpaqueOrigin(Arc::new(0)))
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, Origin::Opaque(_))
    }
}

/// A marker value with pointer identity. Every `new_opaque()` call
/// allocates a fresh one, and even `.clone()` is a distinct origin from
/// the original: opaque origins are "globally unique" per the standard,
/// not structurally comparable.
#[derive(Eq, Clone, Debug)]
pub struct OpaqueOrigin(Arc<u8>);

impl PartialEq for OpaqueOrigin {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// <https://url.spec.whatwg.org/#concept-url-origin>
pub(crate) fn origin_of(url: &Url) -> Origin {
    match url.scheme_kind() {
        SchemeKind::Http | SchemeKind::Https | SchemeKind::Ws | SchemeKind::Wss | SchemeKind::Ftp => {
            Origin::Tuple(
                url.scheme_kind(),
                url.host().expect("special URL always has a host").clone(),
                url.port_or_known_default().expect("special scheme has a default port"),
            )
        }
        SchemeKind::File => Origin::new_opaque(),
        SchemeKind::Other => {
            if url.scheme() == "blob" {
                match Url::parse(url.path()) {
                    Ok(inner) => inner.origin(),
                    Err(_) => Origin::new_opaque(),
                }
            } else {
                Origin::new_opaque()
            }
        }
    }
}
