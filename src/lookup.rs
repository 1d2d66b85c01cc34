//! Name service lookups.
//!
//! [`NameService`] is the seam between the resolution policy and the host
//! platform's resolver. "Not found" is an ordinary `None`; only names that
//! cannot be encoded as a DNS query come back as an error.

use crate::error::{DomrError, Result};
use dns_lookup::{AddrFamily, AddrInfoHints, SockType};
use std::net::{Ipv4Addr, SocketAddr};

/// Longest encodable query name, excluding a trailing root dot.
const MAX_NAME_LEN: usize = 253;

/// Longest single label.
const MAX_LABEL_LEN: usize = 63;

/// What a lookup returned for a name or address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEntry {
    /// Canonical host name.
    pub name: String,
    /// Alternate names, possibly empty.
    pub aliases: Vec<String>,
    /// Addresses, in resolver order.
    pub addresses: Vec<Ipv4Addr>,
}

impl HostEntry {
    /// Creates an entry with no aliases.
    #[must_use]
    pub fn new(name: impl Into<String>, addresses: Vec<Ipv4Addr>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            addresses,
        }
    }

    /// Adds alternate names.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }
}

/// Forward and reverse lookup primitives.
///
/// Implementations block until the lookup completes or fails. Any timeout or
/// retry behavior belongs to the implementation, not the caller.
pub trait NameService {
    /// Looks up `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DomrError::InvalidName`] if `name` cannot be encoded as a
    /// query name. Lookup failures of any other kind are `Ok(None)`.
    fn lookup_host(&self, name: &str) -> Result<Option<HostEntry>>;

    /// Looks up the name registered for `addr`.
    fn lookup_addr(&self, addr: Ipv4Addr) -> Option<HostEntry>;
}

impl<T: NameService + ?Sized> NameService for &T {
    fn lookup_host(&self, name: &str) -> Result<Option<HostEntry>> {
        (**self).lookup_host(name)
    }

    fn lookup_addr(&self, addr: Ipv4Addr) -> Option<HostEntry> {
        (**self).lookup_addr(addr)
    }
}

/// Encodes `name` as an ASCII query name, converting IDN labels to
/// punycode (`münchen.de` becomes `xn--mnchen-3ya.de`).
///
/// # Errors
///
/// Returns [`DomrError::InvalidName`] describing the first problem found:
/// a NUL byte, a code point IDNA cannot map, an empty label, a label over
/// 63 bytes or a name over 253 bytes.
pub fn encode_name(name: &str) -> Result<String> {
    let invalid = |reason| DomrError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.contains('\0') {
        return Err(invalid("contains NUL byte"));
    }
    let ascii = idna::domain_to_ascii(name).map_err(|_| invalid("not IDNA encodable"))?;

    let trimmed = ascii.strip_suffix('.').unwrap_or(&ascii);
    if trimmed.is_empty() {
        return Err(invalid("empty name"));
    }
    if trimmed.len() > MAX_NAME_LEN {
        return Err(invalid("name longer than 253 bytes"));
    }
    for label in trimmed.split('.') {
        if label.is_empty() {
            return Err(invalid("empty label"));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(invalid("label longer than 63 bytes"));
        }
    }
    Ok(ascii)
}

/// The host platform's resolver.
///
/// Names and addresses go through `getaddrinfo`/`getnameinfo`, so
/// `/etc/hosts`, `nsswitch.conf` and DNS settings all apply. Aliases come
/// from the `hostent` lookups in [`crate::hostent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNameService;

impl SystemNameService {
    /// Creates the system name service.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl NameService for SystemNameService {
    fn lookup_host(&self, name: &str) -> Result<Option<HostEntry>> {
        let query = encode_name(name)?;
        let hints = AddrInfoHints {
            socktype: SockType::Stream.into(),
            address: AddrFamily::Inet.into(),
            flags: libc::AI_CANONNAME,
            ..AddrInfoHints::default()
        };

        let infos = match dns_lookup::getaddrinfo(Some(&query), None, Some(hints)) {
            Ok(infos) => infos,
            Err(e) => {
                tracing::debug!(name = %query, error = ?e, "getaddrinfo failed");
                return Ok(None);
            }
        };

        let mut canonical = None;
        let mut addresses = Vec::new();
        for info in infos.flatten() {
            canonical = canonical.or(info.canonname);
            if let SocketAddr::V4(sa) = info.sockaddr {
                if !addresses.contains(sa.ip()) {
                    addresses.push(*sa.ip());
                }
            }
        }
        if addresses.is_empty() {
            tracing::debug!(name = %query, "getaddrinfo returned no IPv4 address");
            return Ok(None);
        }

        let aliases = crate::hostent::aliases_for_name(&query);
        Ok(Some(HostEntry {
            name: canonical.unwrap_or(query),
            aliases,
            addresses,
        }))
    }

    fn lookup_addr(&self, addr: Ipv4Addr) -> Option<HostEntry> {
        let sock = SocketAddr::from((addr, 0));
        match dns_lookup::getnameinfo(&sock, libc::NI_NAMEREQD) {
            Ok((name, _service)) => Some(
                HostEntry::new(name, vec![addr])
                    .with_aliases(crate::hostent::aliases_for_addr(addr)),
            ),
            Err(e) => {
                tracing::debug!(addr = %addr, error = ?e, "getnameinfo failed");
                None
            }
        }
    }
}
