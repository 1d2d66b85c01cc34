//! Host token classification.
//!
//! A token is an IP address exactly when the platform's `inet_aton` accepts
//! it. The same call produces the address used for reverse lookups, so
//! classification and normalization can never disagree.

use std::ffi::{CString, c_char, c_int};
use std::net::Ipv4Addr;

// Not exported by the `libc` crate.
unsafe extern "C" {
    fn inet_aton(cp: *const c_char, inp: *mut libc::in_addr) -> c_int;
}

/// What a host token looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// An IPv4 literal, resolved by reverse lookup.
    Ip(Ipv4Addr),
    /// Anything else, resolved by forward lookup with domain fallback.
    Hostname,
}

impl HostKind {
    /// Returns `true` for [`HostKind::Ip`].
    #[must_use]
    pub const fn is_ip(self) -> bool {
        matches!(self, Self::Ip(_))
    }
}

/// Classifies `token` without touching the network.
///
/// ```
/// use domr::{HostKind, classify};
///
/// assert!(classify("10.0.0.1").is_ip());
/// assert_eq!(classify("web01"), HostKind::Hostname);
/// ```
#[must_use]
pub fn classify(token: &str) -> HostKind {
    parse_ipv4(token).map_or(HostKind::Hostname, HostKind::Ip)
}

/// Parses an IPv4 address with the platform's `inet_aton`.
///
/// Shorthand forms are accepted the way the C library accepts them: one to
/// four parts, octal and hex parts, the last part filling the remaining
/// bytes (`127.1` is `127.0.0.1`). glibc also stops at the first whitespace
/// character, so `"1.2.3.4 junk"` parses as `1.2.3.4`.
#[must_use]
pub fn parse_ipv4(token: &str) -> Option<Ipv4Addr> {
    let c_token = CString::new(token).ok()?;
    let mut addr = libc::in_addr { s_addr: 0 };

    // SAFETY: `c_token` is NUL-terminated and `addr` is a valid out pointer.
    let ok = unsafe { inet_aton(c_token.as_ptr(), &mut addr) };
    (ok != 0).then(|| Ipv4Addr::from(addr.s_addr.to_ne_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_quad_is_ip() {
        assert_eq!(classify("127.0.0.1"), HostKind::Ip(Ipv4Addr::LOCALHOST));
        assert_eq!(
            classify("255.255.255.255"),
            HostKind::Ip(Ipv4Addr::BROADCAST)
        );
        assert!(classify("0.0.0.0").is_ip());
    }

    #[test]
    fn shorthand_forms() {
        let localhost = Some(Ipv4Addr::LOCALHOST);
        assert_eq!(parse_ipv4("127.1"), localhost);
        assert_eq!(parse_ipv4("127.0.1"), localhost);
        assert_eq!(parse_ipv4("2130706433"), localhost);
        assert_eq!(parse_ipv4("0x7f.1"), localhost);
        assert_eq!(parse_ipv4("0177.0.0.01"), localhost);
        assert_eq!(parse_ipv4("10.0.258"), Some(Ipv4Addr::new(10, 0, 1, 2)));
    }

    #[test]
    fn leading_zeros_are_octal() {
        assert_eq!(parse_ipv4("010.0.0.1"), Some(Ipv4Addr::new(8, 0, 0, 1)));
        assert_eq!(
            parse_ipv4("192.168.001.010"),
            Some(Ipv4Addr::new(192, 168, 1, 8))
        );
        assert_eq!(parse_ipv4("08.0.0.1"), None);
    }

    #[test]
    #[cfg(all(target_os = "linux", target_env = "gnu"))]
    fn trailing_whitespace_ends_the_address() {
        let addr = Some(Ipv4Addr::new(1, 2, 3, 4));
        assert_eq!(parse_ipv4("1.2.3.4 junk"), addr);
        assert_eq!(parse_ipv4("1.2.3.4\t"), addr);
        assert!(classify("1.2.3.4 ").is_ip());
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(parse_ipv4("256.0.0.1"), None);
        assert_eq!(parse_ipv4("1.2.3.256"), None);
        assert_eq!(parse_ipv4("1.2.65536"), None);
    }

    #[test]
    fn hostnames_are_not_ips() {
        for token in [
            "web01",
            "web01.corp.example.com",
            "1.2.3.4.5",
            "1.2.3.",
            ".1.2.3",
            "1..2",
            "+1.2.3.4",
            "0x",
            "a.b.c.d",
            "10.0.0.1a",
            "1.2\03.4",
            "",
        ] {
            assert_eq!(classify(token), HostKind::Hostname, "{token:?}");
        }
    }

    #[test]
    fn parsed_address_renders_canonically() {
        let ip = parse_ipv4("127.000.000.001").unwrap();
        assert_eq!(ip.to_string(), "127.0.0.1");
        assert_eq!(parse_ipv4("10.1").unwrap().to_string(), "10.0.0.1");
    }
}
