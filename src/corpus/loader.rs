//! Reads labeled emails from disk.
//!
//! A path list holds one email path per line, relative to the emails
//! directory. Email bodies are joined line by line with nothing in between,
//! so `"Hello\nWorld"` is read as `"HelloWorld"`. Lines end at `\n`, `\r\n`
//! or a lone `\r`. Bytes that are not valid UTF-8 become U+FFFD.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

use crate::corpus::email::{Email, FeatureExtractor};
use crate::error::{Result, SpamFilterError};
use crate::generic_types::Label;

lazy_static! {
    static ref LINE_BREAK_RE: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
}

pub struct CorpusLoader {
    emails_dir: PathBuf,
    extractor: FeatureExtractor,
}

impl CorpusLoader {
    pub fn new<P: Into<PathBuf>>(emails_dir: P, extractor: FeatureExtractor) -> Self {
        Self {
            emails_dir: emails_dir.into(),
            extractor,
        }
    }

    /// Load every email named in `list`, in file order.
    pub fn load_list<P: AsRef<Path>>(&self, list: P, label: Label) -> Result<Vec<Email>> {
        let list = list.as_ref();

        let mut emails = Vec::new();
        for (idx, line) in read_lines(list)?.into_iter().enumerate() {
            if line.trim().is_empty() {
                return Err(SpamFilterError::MalformedPathList {
                    list: list.to_path_buf(),
                    line: idx + 1,
                });
            }

            let path = self.emails_dir.join(&line);
            let text = read_lines(&path)?.concat();
            debug!(path = %path.display(), bytes = text.len(), "loaded email");
            emails.push(Email::new(label, path.to_string_lossy(), text, &self.extractor));
        }

        info!(list = %list.display(), %label, count = emails.len(), "loaded corpus");
        Ok(emails)
    }
}

/// The file's lines without their terminators. A final terminator does not
/// start another line.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).map_err(|source| SpamFilterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let mut lines: Vec<String> = LINE_BREAK_RE.split(&text).map(str::to_string).collect();
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    Ok(lines)
}
