//! Resolution policy: domain fallback for names, reverse lookup for IPs.
//!
//! Every entry point returns a [`ResolutionRecord`]; per-host failures are
//! reported as warnings and never propagate to the caller.

use crate::classify::{HostKind, classify};
use crate::config::ResolverConfig;
use crate::lookup::{HostEntry, NameService};
use std::net::Ipv4Addr;

/// Outcome of resolving one host token.
///
/// A failed record still has printable `primary_name` and `matched_input`
/// (both the original token) and empty `aliases` and `addresses`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRecord {
    /// The token as the caller supplied it.
    pub input: String,
    /// The exact name or normalized address that resolved.
    pub matched_input: String,
    /// Canonical name, or the original token on failure.
    pub primary_name: String,
    /// Alternate names.
    pub aliases: Vec<String>,
    /// Resolved addresses.
    pub addresses: Vec<Ipv4Addr>,
    /// Whether any lookup succeeded.
    pub succeeded: bool,
}

impl ResolutionRecord {
    /// Builds a success record from a lookup result.
    #[must_use]
    pub fn resolved(input: &str, matched_input: impl Into<String>, entry: HostEntry) -> Self {
        Self {
            input: input.to_string(),
            matched_input: matched_input.into(),
            primary_name: entry.name,
            aliases: entry.aliases,
            addresses: entry.addresses,
            succeeded: true,
        }
    }

    /// Builds a failure record that echoes the token.
    #[must_use]
    pub fn failed(input: &str) -> Self {
        Self {
            input: input.to_string(),
            matched_input: input.to_string(),
            primary_name: input.to_string(),
            aliases: Vec::new(),
            addresses: Vec::new(),
            succeeded: false,
        }
    }

    /// First resolved address, if any.
    #[must_use]
    pub fn first_address(&self) -> Option<Ipv4Addr> {
        self.addresses.first().copied()
    }
}

/// Resolves host tokens against a [`NameService`] with domain fallback.
///
/// # Example
///
/// ```rust,no_run
/// use domr::{Resolver, ResolverConfig, SystemNameService};
///
/// let config = ResolverConfig::parse("corp.example.com");
/// let resolver = Resolver::new(SystemNameService::new(), &config);
///
/// for record in resolver.resolve_all(["web01", "10.0.0.1"]) {
///     println!("{}", record.primary_name);
/// }
/// ```
pub struct Resolver<'a, N> {
    names: N,
    config: &'a ResolverConfig,
}

impl<'a, N: NameService> Resolver<'a, N> {
    /// Creates a resolver over `names` using the fallback domains in `config`.
    #[must_use]
    pub const fn new(names: N, config: &'a ResolverConfig) -> Self {
        Self { names, config }
    }

    /// Returns the fallback domains in use.
    #[must_use]
    pub fn domains(&self) -> &[String] {
        &self.config.domains
    }

    /// Forward lookup of a single name.
    ///
    /// Not-found is `None`. A name the resolver cannot encode is logged with
    /// its own warning and also yields `None`.
    pub fn resolve_hostname(&self, name: &str) -> Option<HostEntry> {
        match self.names.lookup_host(name) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        }
    }

    /// Tries `host`, then `host.<domain>` for each domain in order.
    ///
    /// Stops at the first success. Emits one warning if nothing resolves.
    pub fn resolve_with_fallback(&self, host: &str) -> ResolutionRecord {
        if let Some(entry) = self.resolve_hostname(host) {
            return ResolutionRecord::resolved(host, host, entry);
        }

        for domain in self.domains() {
            let candidate = format!("{host}.{domain}");
            tracing::debug!(host = %host, candidate = %candidate, "Trying fallback domain");
            if let Some(entry) = self.resolve_hostname(&candidate) {
                return ResolutionRecord::resolved(host, candidate, entry);
            }
        }

        tracing::warn!("cannot resolve {host}");
        ResolutionRecord::failed(host)
    }

    /// Reverse lookup of an address token.
    ///
    /// The success record reports the canonical dotted form; the failure
    /// record keeps the token exactly as typed.
    pub fn resolve_address(&self, ip: &str) -> ResolutionRecord {
        match crate::classify::parse_ipv4(ip) {
            Some(addr) => self.resolve_parsed_address(ip, addr),
            None => {
                tracing::warn!("cannot resolve {ip}");
                ResolutionRecord::failed(ip)
            }
        }
    }

    fn resolve_parsed_address(&self, ip: &str, addr: Ipv4Addr) -> ResolutionRecord {
        let Some(mut entry) = self.names.lookup_addr(addr) else {
            tracing::warn!("cannot resolve {ip}");
            return ResolutionRecord::failed(ip);
        };

        if !entry.addresses.contains(&addr) {
            entry.addresses.insert(0, addr);
        }
        ResolutionRecord::resolved(ip, addr.to_string(), entry)
    }

    /// Dispatches on the token's kind.
    pub fn resolve(&self, token: &str) -> ResolutionRecord {
        match classify(token) {
            HostKind::Ip(addr) => self.resolve_parsed_address(token, addr),
            HostKind::Hostname => self.resolve_with_fallback(token),
        }
    }

    /// Resolves every non-blank token, one at a time, in input order.
    pub fn resolve_all<I, S>(&self, tokens: I) -> Vec<ResolutionRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter_map(|t| {
                let t = t.as_ref().trim();
                (!t.is_empty()).then(|| self.resolve(t))
            })
            .collect()
    }
}
