//! IP detector (spec §4.1(a)): IPv4 and IPv6 literal addresses, at priority
//! 600.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;

use crate::context::RedactionContext;
use crate::span::{FilterType, Span};

use super::common::make_span;

const SOURCE: &str = "ip_detector";

static IPV4_CANDIDATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b").unwrap());

static IPV6_CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[A-Fa-f0-9]{1,4}:){2,7}[A-Fa-f0-9]{1,4}\b").unwrap()
});

pub fn detect(text: &str, _ctx: &RedactionContext) -> Vec<Span> {
    let mut spans = Vec::new();
    for m in IPV4_CANDIDATE.find_iter(text) {
        if m.as_str().parse::<Ipv4Addr>().is_ok() {
            spans.push(make_span(text, m.as_str(), m.start(), m.end(), FilterType::Ip, 0.9, SOURCE));
        }
    }
    for m in IPV6_CANDIDATE.find_iter(text) {
        if m.as_str().parse::<Ipv6Addr>().is_ok() {
            spans.push(make_span(text, m.as_str(), m.start(), m.end(), FilterType::Ip, 0.9, SOURCE));
        }
    }
    spans
}
