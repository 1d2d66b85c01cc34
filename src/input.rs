//! Host token sources.

use crate::error::{DomrError, Result};
use std::fs::File;
use std::io::Read;

/// Hosts file path that means "read standard input".
pub const STDIN_SENTINEL: &str = "-";

/// Splits text into host tokens on any whitespace.
#[must_use]
pub fn split_hosts(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Reads host tokens from `reader`.
///
/// # Errors
///
/// Returns [`DomrError::Io`] if reading fails.
pub fn read_hosts<R: Read>(mut reader: R) -> Result<Vec<String>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(split_hosts(&text))
}

/// Reads host tokens from a file, or stdin for [`STDIN_SENTINEL`].
///
/// # Errors
///
/// Returns [`DomrError::CannotOpen`] if the file cannot be read.
pub fn read_hosts_file(path: &str) -> Result<Vec<String>> {
    read_hosts_from(path, std::io::stdin().lock())
}

/// Like [`read_hosts_file`], reading `stdin` when `path` is
/// [`STDIN_SENTINEL`].
///
/// # Errors
///
/// Returns [`DomrError::CannotOpen`] if the file or `stdin` cannot be read.
pub fn read_hosts_from<R: Read>(path: &str, stdin: R) -> Result<Vec<String>> {
    let hosts = if path == STDIN_SENTINEL {
        read_hosts(stdin)
    } else {
        File::open(path)
            .map_err(DomrError::from)
            .and_then(read_hosts)
    };

    hosts.map_err(|e| match e {
        DomrError::Io(source) => DomrError::CannotOpen {
            path: path.to_string(),
            source,
        },
        other => other,
    })
}

/// Picks the host list: explicit hosts first, then the hosts file.
///
/// # Errors
///
/// Returns [`DomrError::NoHosts`] if neither source yields a token, or the
/// file's read error.
pub fn collect_hosts(hosts: &[String], hostsfile: Option<&str>) -> Result<Vec<String>> {
    let explicit: Vec<String> = hosts
        .iter()
        .flat_map(|h| split_hosts(h))
        .collect();
    if !explicit.is_empty() {
        return Ok(explicit);
    }

    let Some(path) = hostsfile else {
        return Err(DomrError::NoHosts);
    };
    let from_file = read_hosts_file(path)?;
    if from_file.is_empty() {
        tracing::debug!(path = %path, "Hosts file is empty");
        return Err(DomrError::NoHosts);
    }
    Ok(from_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_lines_and_spaces() {
        assert_eq!(
            split_hosts("web01\n\n  db1 10.0.0.1\r\n\tweb02\n"),
            vec!["web01", "db1", "10.0.0.1", "web02"]
        );
    }

    #[test]
    fn read_from_reader() {
        let hosts = read_hosts("a\nb\n".as_bytes()).unwrap();
        assert_eq!(hosts, vec!["a", "b"]);
    }

    #[test]
    fn explicit_hosts_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "from-file\n").unwrap();

        let hosts = collect_hosts(&["web01".into()], path.to_str()).unwrap();
        assert_eq!(hosts, vec!["web01"]);
    }

    #[test]
    fn falls_back_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "web01\nweb02\n").unwrap();

        let hosts = collect_hosts(&[], path.to_str()).unwrap();
        assert_eq!(hosts, vec!["web01", "web02"]);
    }

    #[test]
    fn nothing_is_no_hosts() {
        assert!(matches!(collect_hosts(&[], None).unwrap_err(), DomrError::NoHosts));
        assert!(matches!(collect_hosts(&[" ".into()], None).unwrap_err(), DomrError::NoHosts));
    }

    #[test]
    fn empty_file_is_no_hosts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "\n\n").unwrap();
        assert!(matches!(collect_hosts(&[], path.to_str()).unwrap_err(), DomrError::NoHosts));
    }

    #[test]
    fn dash_reads_stdin() {
        let hosts = read_hosts_from(STDIN_SENTINEL, "web01\n10.0.0.1 db1\n".as_bytes()).unwrap();
        assert_eq!(hosts, vec!["web01", "10.0.0.1", "db1"]);
    }

    #[test]
    fn dash_with_empty_stdin_is_empty() {
        let hosts = read_hosts_from("-", "".as_bytes()).unwrap();
        assert!(hosts.is_empty());
    }

    #[test]
    fn invalid_utf8_stdin_is_cannot_open() {
        let err = read_hosts_from(STDIN_SENTINEL, &[0xff, 0xfe][..]).unwrap_err();
        assert!(matches!(err, DomrError::CannotOpen { ref path, .. } if path == "-"));
    }

    #[test]
    fn missing_file_is_cannot_open() {
        let err = collect_hosts(&[], Some("/nonexistent/hosts")).unwrap_err();
        assert!(matches!(err, DomrError::CannotOpen { ref path, .. } if path == "/nonexistent/hosts"));
        assert!(err.to_string().starts_with("cannot open /nonexistent/hosts"));
    }
}
