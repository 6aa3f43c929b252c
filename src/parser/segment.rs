use super::lines::LogLine;
use super::patterns::BOUNDARY_MARKER;

/// Partition the line stream into one group per job: a new group starts at
/// each boundary marker, and lines before the first marker form a group of
/// their own. Single O(n) pass; the groups concatenate back to the input.
pub fn split_jobs(lines: &[LogLine]) -> Vec<&[LogLine]> {
    let mut groups = Vec::new();
    let mut start = 0;

    for (i, line) in lines.iter().enumerate() {
        if line.text.contains(BOUNDARY_MARKER) && i > start {
            groups.push(&lines[start..i]);
            start = i;
        }
    }
    if start < lines.len() {
        groups.push(&lines[start..]);
    }

    groups
}
