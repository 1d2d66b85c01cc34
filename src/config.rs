//! Fallback domain configuration.

/// Environment variable holding the whitespace-separated fallback domains.
pub const DOMAINS_ENV: &str = "DOMR_DOMAINS";

/// Ordered list of domain suffixes tried when a bare name does not resolve.
///
/// Built once at startup and passed to the [`Resolver`](crate::Resolver).
///
/// # Example
///
/// ```
/// use domr::ResolverConfig;
///
/// let config = ResolverConfig::parse("corp.example.com  lab.example.com");
///
/// assert_eq!(config.domains, vec!["corp.example.com", "lab.example.com"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Domain suffixes, highest priority first.
    pub domains: Vec<String>,
}

impl ResolverConfig {
    /// Creates a config from an explicit domain list, dropping blank entries.
    #[must_use]
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(Into::into)
                .filter(|d: &String| !d.trim().is_empty())
                .collect(),
        }
    }

    /// Splits a single configuration string on whitespace.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::new(value.split_whitespace())
    }

    /// Reads [`DOMAINS_ENV`]. Unset or non-unicode values give an empty list.
    #[must_use]
    pub fn from_env() -> Self {
        let config = std::env::var(DOMAINS_ENV)
            .map(|v| Self::parse(&v))
            .unwrap_or_default();
        tracing::debug!(domains = ?config.domains, "Loaded fallback domains");
        config
    }
}
