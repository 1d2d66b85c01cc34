//! Rendering resolution records.

use crate::resolver::ResolutionRecord;
use std::io::Write;
use std::net::Ipv4Addr;

/// Which view of each record to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Canonical name.
    #[default]
    Name,
    /// Every address, one per line.
    Addresses,
    /// First address only.
    FirstAddress,
    /// Tab-separated: input, matched input, name, aliases, addresses.
    Full,
}

impl DisplayMode {
    /// Whether failed records are printed in this mode.
    #[must_use]
    pub const fn shows_failures(self) -> bool {
        matches!(self, Self::Full)
    }
}

/// Renders one record, or `None` if this mode skips it.
#[must_use]
pub fn render(record: &ResolutionRecord, mode: DisplayMode) -> Option<String> {
    if !record.succeeded && !mode.shows_failures() {
        return None;
    }

    match mode {
        DisplayMode::Name => Some(record.primary_name.clone()),
        DisplayMode::Addresses if record.addresses.is_empty() => None,
        DisplayMode::Addresses => Some(join_addresses(&record.addresses, "\n")),
        DisplayMode::FirstAddress => record.first_address().map(|ip| ip.to_string()),
        DisplayMode::Full => Some(format!(
            "{}\t{}\t{}\t{}\t{}",
            record.input,
            record.matched_input,
            record.primary_name,
            record.aliases.join(" "),
            join_addresses(&record.addresses, " "),
        )),
    }
}

fn join_addresses(addresses: &[Ipv4Addr], sep: &str) -> String {
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

/// Writes every rendered record followed by a newline.
///
/// Returns the number of records written.
///
/// # Errors
///
/// Returns any error from `out`.
pub fn write_records<W: Write>(
    out: &mut W,
    records: &[ResolutionRecord],
    mode: DisplayMode,
) -> std::io::Result<usize> {
    let mut written = 0;
    for line in records.iter().filter_map(|r| render(r, mode)) {
        writeln!(out, "{line}")?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
