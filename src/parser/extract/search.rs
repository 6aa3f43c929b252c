use crate::model::SearchInfo;
use crate::parser::lines::LogLine;
use crate::parser::patterns;

pub fn extract(lines: &[LogLine]) -> SearchInfo {
    let mut info = SearchInfo::default();

    for line in lines {
        let text = &line.text;

        // Overwrite on every match, not additive.
        if text.contains("Removed") && text.contains("duplicate search results") {
            if let Some(caps) = patterns::DUPLICATES_RE.captures(text) {
                if let Ok(n) = caps[1].parse() {
                    info.duplicates_removed = n;
                }
            }
        } else if text.contains("found") && text.contains("videos") {
            if let Some(caps) = patterns::VIDEOS_FOUND_RE.captures(text) {
                if let Ok(n) = caps[1].parse() {
                    info.videos_found = n;
                }
            }
        }
    }

    info
}
