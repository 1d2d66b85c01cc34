use clap::{ArgGroup, Parser};
use domr::{
    DOMAINS_ENV, DisplayMode, Resolver, ResolverConfig, SystemNameService, collect_hosts,
    write_records,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Resolve short hostnames / IPs to FQDN using fallback DNS domains.
///
/// Fallback domains come from the DOMR_DOMAINS environment variable
/// (whitespace-separated) unless --domains is given.
#[derive(Parser, Debug)]
#[command(name = "domr", version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").args(["getips", "getip", "full"])))]
struct Cli {
    /// Hosts list file ("-" for stdin)
    #[arg(short = 'f', long, value_name = "FILE")]
    hostsfile: Option<String>,

    /// Hosts list
    #[arg(short = 'H', long, num_args = 1.., value_name = "HOST")]
    hosts: Vec<String>,

    /// Fallback domains, overriding DOMR_DOMAINS
    #[arg(short = 'd', long, num_args = 1.., value_name = "DOMAIN")]
    domains: Vec<String>,

    /// Display resolved ips
    #[arg(short = 'i', long)]
    getips: bool,

    /// Display first resolved ip
    #[arg(short = 'I', long)]
    getip: bool,

    /// Display tab-separated input, match, name, aliases and ips
    #[arg(short = 'F', long)]
    full: bool,

    /// Do not print warnings
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    const fn display_mode(&self) -> DisplayMode {
        if self.getips {
            DisplayMode::Addresses
        } else if self.getip {
            DisplayMode::FirstAddress
        } else if self.full {
            DisplayMode::Full
        } else {
            DisplayMode::Name
        }
    }

    fn resolver_config(&self) -> ResolverConfig {
        if self.domains.is_empty() {
            ResolverConfig::from_env()
        } else {
            ResolverConfig::new(self.domains.iter().flat_map(|d| d.split_whitespace()))
        }
    }
}

/// `-q` wins over `RUST_LOG`; otherwise `RUST_LOG` wins over the default.
fn log_filter(quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn init_logging(quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(quiet))
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let hosts = match collect_hosts(&cli.hosts, cli.hostsfile.as_deref()) {
        Ok(hosts) => hosts,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let config = cli.resolver_config();
    tracing::debug!(
        hosts = hosts.len(),
        domains = ?config.domains,
        env = DOMAINS_ENV,
        "Resolving"
    );

    let resolver = Resolver::new(SystemNameService::new(), &config);
    let records = resolver.resolve_all(&hosts);

    match write_records(&mut std::io::stdout().lock(), &records, cli.display_mode()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            error!("failed to write results: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mode_flags() {
        let cli = Cli::parse_from(["domr", "-H", "web01"]);
        assert_eq!(cli.display_mode(), DisplayMode::Name);
        let cli = Cli::parse_from(["domr", "-i", "-H", "web01"]);
        assert_eq!(cli.display_mode(), DisplayMode::Addresses);
        let cli = Cli::parse_from(["domr", "-I", "-H", "web01"]);
        assert_eq!(cli.display_mode(), DisplayMode::FirstAddress);
        let cli = Cli::parse_from(["domr", "--full", "-H", "web01"]);
        assert_eq!(cli.display_mode(), DisplayMode::Full);
    }

    #[test]
    fn conflicting_modes_rejected() {
        assert!(Cli::try_parse_from(["domr", "-i", "-I", "-H", "web01"]).is_err());
    }

    #[test]
    fn hosts_take_many_values() {
        let cli = Cli::parse_from(["domr", "-H", "a", "b", "c"]);
        assert_eq!(cli.hosts, vec!["a", "b", "c"]);
    }

    #[test]
    fn quiet_filter_hides_warnings() {
        assert_eq!(
            log_filter(true).max_level_hint(),
            Some(tracing::level_filters::LevelFilter::ERROR)
        );
    }

    #[test]
    fn domains_flag_overrides_env() {
        let cli = Cli::parse_from(["domr", "-d", "a.example b.example", "c.example", "-H", "x"]);
        assert_eq!(
            cli.resolver_config().domains,
            vec!["a.example", "b.example", "c.example"]
        );
    }
}
