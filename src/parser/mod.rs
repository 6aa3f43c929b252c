pub mod extract;
pub mod lines;
pub mod patterns;
pub mod segment;

use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::error::ParseError;
use crate::model::ParseReport;

/// Parse one complete log file. The file read is the only fatal failure;
/// everything past it degrades field by field.
pub fn parse_file(path: &Path) -> Result<ParseReport, ParseError> {
    let text = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_text(&text))
}

/// Pipeline: lines → job groups → per-job assembly → report. Jobs are
/// independent, so assembly fans out across groups; the indexed collect
/// keeps arrival order.
pub fn parse_text(text: &str) -> ParseReport {
    let lines = lines::read_lines(text);
    let groups = segment::split_jobs(&lines);

    let jobs = groups
        .par_iter()
        .enumerate()
        .map(|(id, group)| extract::assemble(id, group))
        .collect();

    let unrecognized_lines = lines
        .iter()
        .filter(|l| !l.text.trim().is_empty() && patterns::recognize(&l.text).is_none())
        .map(|l| l.text.clone())
        .collect();

    tracing::debug!(jobs = groups.len(), "parsed log text");
    ParseReport {
        jobs,
        unrecognized_lines,
    }
}
