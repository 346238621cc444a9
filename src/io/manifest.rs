//! Manifest parsing: one source granule filename per line, fixed `.h5`
//! suffix. Malformed lines fail loudly with their line number instead of
//! being silently mis-trimmed.
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest line {line}: expected '<granule-id>.h5', got {content:?}")]
    MalformedLine { line: usize, content: String },
}

/// Parse manifest text into granule identifiers. Lines are trimmed and blank
/// lines skipped; every remaining line must end in `.h5` with a non-empty
/// stem.
pub fn parse_manifest(text: &str) -> Result<Vec<String>, ManifestError> {
    let mut ids = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let id = line
            .strip_suffix(".h5")
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| ManifestError::MalformedLine {
                line: idx + 1,
                content: line.to_string(),
            })?;
        ids.push(id.to_string());
    }
    Ok(ids)
}

/// Read and parse a manifest file.
pub fn read_manifest(path: &Path) -> Result<Vec<String>, ManifestError> {
    let text = std::fs::read_to_string(path)?;
    parse_manifest(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fixed_suffix() {
        let ids = parse_manifest("AG100.v003.44.-077.0001.h5\nAG100.v003.-30.-082.0001.h5\n")
            .unwrap();
        assert_eq!(
            ids,
            vec!["AG100.v003.44.-077.0001", "AG100.v003.-30.-082.0001"]
        );
    }

    #[test]
    fn blank_lines_and_whitespace_are_tolerated() {
        let ids = parse_manifest("\n  AG100.v003.44.-077.0001.h5  \n\n").unwrap();
        assert_eq!(ids, vec!["AG100.v003.44.-077.0001"]);
    }

    #[test]
    fn malformed_line_fails_with_position() {
        let err = parse_manifest("good.h5\nbad.txt\n").unwrap_err();
        match err {
            ManifestError::MalformedLine { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "bad.txt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bare_suffix_is_malformed() {
        assert!(parse_manifest(".h5\n").is_err());
    }
}
