// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use urlkit::host::{Host, Ipv4Addr, Ipv6Addr};

#[test]
fn ipv4_parses_mixed_radixes_and_reserializes_dotted_decimal() {
    let addr = Ipv4Addr::parse("0300.0x7f.1.1").unwrap();
    let s = addr.to_string();
    let reparsed = Ipv4Addr::parse(&s).unwrap();
    assert_eq!(addr, reparsed);
    assert!(s.split('.').all(|part| part.parse::<u8>().is_ok()));
}

#[test]
fn ipv4_number_overflow_is_rejected() {
    assert!(Ipv4Addr::parse("4294967296").is_err());
    assert!(Ipv4Addr::parse("1.2.3.256").is_err());
}

#[test]
fn ipv6_round_trips_through_serialization() {
    let addr = Ipv6Addr::parse("2001:db8:0:0:0:0:2:1").unwrap();
    let s = addr.to_string();
    assert_eq!(s, "2001:db8::2:1");
    assert_eq!(Ipv6Addr::parse(&s).unwrap(), addr);
}

#[test]
fn ipv6_rejects_too_many_pieces() {
    assert!(Ipv6Addr::parse("1:2:3:4:5:6:7:8:9").is_err());
}

#[test]
fn domain_host_lowercases_and_rejects_forbidden_code_points() {
    assert_eq!(
        Host::parse_for_special_scheme("EXAMPLE.COM").unwrap(),
        Host::Domain("example.com".to_owned())
    );
    assert!(Host::parse_for_special_scheme("exa mple.com").is_err());
}

#[test]
fn opaque_host_is_percent_encoded_but_not_lowercased() {
    let host = Host::parse_opaque("EXAMPLE.com path").unwrap();
    assert_eq!(host.to_string(), "EXAMPLE.com%20path");
}

#[test]
fn empty_host_is_allowed_for_file_and_opaque_schemes() {
    assert_eq!(Host::parse_file_host("").unwrap(), Host::Empty);
    assert_eq!(Host::parse_opaque("").unwrap(), Host::Empty);
}

#[test]
fn bracketed_ipv6_host_parses_through_the_host_entry_point() {
    assert!(matches!(
        Host::parse_for_special_scheme("[::1]").unwrap(),
        Host::Ipv6(_)
    ));
    assert!(Host::parse_for_special_scheme("[::1").is_err());
}

#[test]
fn numeric_looking_domain_label_dispatches_to_ipv4() {
    assert!(matches!(
        Host::parse_for_special_scheme("192.168.0.1").unwrap(),
        Host::Ipv4(_)
    ));
    assert!(Host::parse_for_special_scheme("999.168.0.1").is_err());
}
