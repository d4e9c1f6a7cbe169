// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use urlkit::form_urlencoded::FormUrlEncoded;
use urlkit::Url;

#[test]
fn query_pairs_reads_percent_and_plus_decoded_values() {
    let url = Url::parse("https://example.com/search?q=rust+url&lang=en").unwrap();
    let pairs = url.query_pairs();
    assert_eq!(pairs.get("q"), Some("rust url"));
    assert_eq!(pairs.get("lang"), Some("en"));
}

#[test]
fn setting_query_via_the_pairs_list_round_trips() {
    let mut url = Url::parse("https://example.com/search").unwrap();
    let mut pairs = FormUrlEncoded::new();
    pairs.append("q", "a b");
    pairs.append("page", "2");
    url.set_query(Some(&pairs.serialize())).unwrap();
    assert_eq!(url.query(), Some("q=a+b&page=2"));

    let read_back = url.query_pairs();
    assert_eq!(read_back.get("q"), Some("a b"));
    assert_eq!(read_back.get("page"), Some("2"));
}

#[test]
fn parse_with_params_overwrites_the_query() {
    let url = Url::parse_with_params(
        "https://example.com/search?old=1",
        &[("q", "rust"), ("page", "1")],
    )
    .unwrap();
    assert_eq!(url.query(), Some("q=rust&page=1"));
}

#[test]
fn repeated_keys_preserve_order_until_sorted() {
    let mut pairs = FormUrlEncoded::new();
    pairs.append("b", "1");
    pairs.append("a", "2");
    pairs.append("a", "1");
    assert_eq!(pairs.serialize(), "b=1&a=2&a=1");
    pairs.sort_by_key();
    assert_eq!(pairs.serialize(), "a=2&a=1&b=1");
}

#[test]
fn empty_query_list_serializes_to_no_query_when_cleared() {
    let mut url = Url::parse("https://example.com/search?q=1").unwrap();
    let mut pairs = url.query_pairs();
    pairs.remove_all();
    url.set_query(if pairs.is_empty() {
        None
    } else {
        Some(&pairs.serialize())
    })
    .unwrap();
    assert_eq!(url.query(), None);
    assert_eq!(url.as_str(), "https://example.com/search");
}
