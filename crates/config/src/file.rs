//! Line-oriented `key=value` file parsing shared by the bot and
//! gamemode loaders.

use {
    crate::{ConfigError, Result},
    std::{fs, path::Path},
};

/// A parsed `key=value` line with its source location, for error
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// Reads a config file into its entries.
///
/// Blank lines and lines starting with `#` are skipped. Everything
/// else must contain `=`; the line splits at the first one, the key is
/// trimmed, and a single space after the `=` is tolerated. Lines
/// without `=` are logged and skipped rather than aborting the load.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_entries(&path.display().to_string(), &text))
}

pub(crate) fn parse_entries(file: &str, text: &str) -> Vec<Entry> {
    let mut entries = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            tracing::warn!(file, line, text = trimmed, "skipping line without '='");
            continue;
        };
        let key = key.trim().to_string();
        let value = value.strip_prefix(' ').unwrap_or(value).to_string();
        entries.push(Entry { key, value, line });
    }
    entries
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn keys_values(text: &str) -> Vec<(String, String)> {
        parse_entries("test.txt", text)
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect()
    }

    // ── basic shape ──────────────────────────────────────────────

    #[test]
    fn splits_at_first_equals() {
        let entries = keys_values("description=win = fun");
        assert_eq!(
            entries,
            vec![("description".into(), "win = fun".into())]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let entries = keys_values("# a comment\n\nlives=8\n   \n# another\n");
        assert_eq!(entries, vec![("lives".into(), "8".into())]);
    }

    #[test]
    fn tolerates_one_space_after_equals() {
        let entries = keys_values("name= Hangman\nother=  spaced");
        assert_eq!(entries[0].1, "Hangman");
        // Only a single space is eaten; further whitespace is value.
        assert_eq!(entries[1].1, " spaced");
    }

    #[test]
    fn skips_lines_without_equals() {
        let entries = keys_values("not a config line\nlives=3");
        assert_eq!(entries, vec![("lives".into(), "3".into())]);
    }

    #[test]
    fn records_line_numbers() {
        let entries = parse_entries("test.txt", "# header\na=1\n\nb=2\n");
        assert_eq!(entries[0].line, 2);
        assert_eq!(entries[1].line, 4);
    }

    // ── filesystem ───────────────────────────────────────────────

    #[test]
    fn missing_file_reports_path() {
        let err = read_entries(Path::new("/nonexistent/conf.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/conf.txt"));
    }

    #[test]
    fn reads_from_disk() {
        use std::io::Write as _;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "token=abc").unwrap();
        let entries = read_entries(file.path()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "token");
        assert_eq!(entries[0].value, "abc");
    }
}
