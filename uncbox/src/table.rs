//! Reader for the whitespace-separated bin tables produced by the fixed-order codes.
//!
//! Every non-empty line that is not a comment contains the five columns
//! `xlow xmid xhigh val err`. Comments start with `#` and extend to the end of the line.

use super::error::{Error, Result};
use super::series::{BinLayout, BinnedSeries};
use itertools::Itertools;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default file-name template of the tables.
pub const DEFAULT_PATTERN: &str = "{order}_NEW_{channel}.{observable}.dat";

/// Reads the table stored in the file `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file can not be read and [`Error::Table`] if its contents are
/// malformed.
pub fn read(path: &Path) -> Result<BinnedSeries> {
    parse(BufReader::new(File::open(path)?), path)
}

/// Parses a table from `reader`. The path `origin` is only used in error messages.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails and [`Error::Table`] if a line does not contain exactly
/// five floating-point numbers.
pub fn parse(reader: impl BufRead, origin: &Path) -> Result<BinnedSeries> {
    let mut xlow = Vec::new();
    let mut xmid = Vec::new();
    let mut xhigh = Vec::new();
    let mut val = Vec::new();
    let mut err = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split_once('#').map_or(line.as_str(), |(content, _)| content);

        if content.trim().is_empty() {
            continue;
        }

        let error = |reason: String| Error::Table {
            path: origin.to_path_buf(),
            line: index + 1,
            reason,
        };

        let numbers: Vec<f64> = content
            .split_whitespace()
            .map(|field| {
                field
                    .parse()
                    .map_err(|e| error(format!("could not parse '{field}': {e}")))
            })
            .collect::<Result<_>>()?;

        let Some((low, mid, high, value, uncertainty)) = numbers.iter().copied().collect_tuple()
        else {
            return Err(error(format!(
                "expected 5 columns (xlow xmid xhigh val err), found {}",
                numbers.len()
            )));
        };

        xlow.push(low);
        xmid.push(mid);
        xhigh.push(high);
        val.push(value);
        err.push(uncertainty);
    }

    BinnedSeries::new(Arc::new(BinLayout::new(xlow, xmid, xhigh)?), val, err)
}

/// Expands the file-name template `pattern` by replacing the placeholders `{order}`, `{channel}`
/// and `{observable}`, and returns its path relative to `datadir`.
#[must_use]
pub fn path(
    datadir: &Path,
    pattern: &str,
    order: &str,
    channel: &str,
    observable: &str,
) -> PathBuf {
    datadir.join(
        pattern
            .replace("{order}", order)
            .replace("{channel}", channel)
            .replace("{observable}", observable),
    )
}
