//! # domr
//!
//! Resolve short hostnames and IP addresses to canonical names.
//!
//! Operators often hold host lists that mix short names, FQDNs and IPs.
//! This crate normalizes them: names are looked up as given, then with each
//! configured fallback domain appended, in order, until one resolves; IPv4
//! literals get a reverse lookup. Every token yields a
//! [`ResolutionRecord`], whether or not it resolved.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use domr::{DisplayMode, Resolver, ResolverConfig, SystemNameService, write_records};
//!
//! let config = ResolverConfig::from_env(); // DOMR_DOMAINS="corp.example.com lab.example.com"
//! let resolver = Resolver::new(SystemNameService::new(), &config);
//!
//! let records = resolver.resolve_all(["web01", "10.0.0.1"]);
//! write_records(&mut std::io::stdout(), &records, DisplayMode::Name)?;
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Failure policy
//!
//! Lookups block on the platform resolver, one host at a time. A host that
//! does not resolve produces a `cannot resolve` warning through `tracing`
//! and a record with `succeeded == false`; it is never an error. A name that
//! cannot be encoded as a DNS query (IDNA failure, empty label, label over
//! 63 bytes) gets its own `invalid hostname/domain` warning and is otherwise
//! treated as not found.
//!
//! ## Testing
//!
//! [`Resolver`] is generic over [`NameService`], so tests can script lookups
//! instead of depending on live DNS.

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod classify;
pub mod config;
pub mod error;
pub mod hostent;
pub mod input;
pub mod lookup;
pub mod output;
pub mod resolver;

pub use classify::{HostKind, classify, parse_ipv4};
pub use config::{DOMAINS_ENV, ResolverConfig};
pub use error::{DomrError, Result};
pub use input::{
    STDIN_SENTINEL, collect_hosts, read_hosts, read_hosts_file, read_hosts_from, split_hosts,
};
pub use lookup::{HostEntry, NameService, SystemNameService, encode_name};
pub use output::{DisplayMode, render, write_records};
pub use resolver::{ResolutionRecord, Resolver};
