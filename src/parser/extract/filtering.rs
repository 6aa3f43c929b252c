use crate::model::FilteringInfo;
use crate::parser::lines::LogLine;
use crate::parser::patterns;

pub fn extract(lines: &[LogLine]) -> FilteringInfo {
    let mut info = FilteringInfo::default();

    for line in lines {
        if !line.text.contains("unique videos prepared") {
            continue;
        }
        if let Some(caps) = patterns::UNIQUE_VIDEOS_RE.captures(&line.text) {
            info.unique_videos = caps[1].parse().ok();
        }
    }

    info
}
