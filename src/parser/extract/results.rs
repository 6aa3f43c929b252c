use crate::model::{FinalVideo, ResultsInfo, ScrapeStatus};
use crate::parser::lines::LogLine;
use crate::parser::patterns;

pub fn extract(lines: &[LogLine]) -> ResultsInfo {
    let mut info = ResultsInfo::default();

    for line in lines {
        let text = &line.text;

        // Coarse filter first; the fine pattern arbitrates, so lines that
        // only look like list entries are skipped silently.
        if text.contains(". ") && text.contains(": ") && text.contains('[') && text.contains(']') {
            if let Some(caps) = patterns::FINAL_VIDEO_RE.captures(text) {
                if let Ok(views) = caps[4].parse() {
                    info.final_videos.push(FinalVideo {
                        video_id: caps[1].to_string(),
                        title: caps[2].to_string(),
                        clip: caps[3].to_string(),
                        views,
                    });
                }
            }
        } else if text.contains("SCRAPING") {
            if let Some(caps) = patterns::SCRAPE_STATUS_RE.captures(text) {
                info.status = Some(match &caps[1] {
                    "SUCCEEDED" => ScrapeStatus::Succeeded,
                    _ => ScrapeStatus::Failed,
                });
                info.delivered_count = caps[2].parse().ok();
                info.requested_count = caps[3].parse().ok();
                info.total_time = caps[4].parse().ok();
            }
        }
    }

    info
}
