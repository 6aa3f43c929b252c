use crate::model::{ProcessingInfo, VideoMetadata};
use crate::parser::lines::LogLine;
use crate::parser::patterns;

/// The metadata payload is read from exactly this many lines after the
/// load-balancer trigger, never from anywhere else in the group.
pub const RESPONSE_LOOKAHEAD_LINES: usize = 1;

pub fn extract(lines: &[LogLine]) -> ProcessingInfo {
    let mut info = ProcessingInfo::default();

    for (i, line) in lines.iter().enumerate() {
        let text = &line.text;

        if text.contains("Data received from load balancer:") {
            if let Some(caps) = patterns::DATA_SIZE_RE.captures(text) {
                if let Ok(n) = caps[1].parse() {
                    info.load_balancer.data_size = Some(n);
                }
                if let Some(next) = lines.get(i + RESPONSE_LOOKAHEAD_LINES) {
                    if next.text.contains("Received response:") {
                        collect_metadata(&next.text, &mut info.load_balancer.received_metadata);
                    }
                }
            }
        } else if text.contains("Embeddings generation took") {
            if let Some(seconds) = patterns::parse_seconds(text) {
                info.embedding_time = Some(seconds);
            }
        }
    }

    info
}

fn collect_metadata(text: &str, out: &mut Vec<VideoMetadata>) {
    for caps in patterns::VIDEO_METADATA_RE.captures_iter(text) {
        let views = caps[3].parse().ok();
        let clip_start = caps[4].parse().ok();
        let clip_end = caps[5].parse().ok();
        let (Some(views), Some(clip_start), Some(clip_end)) = (views, clip_start, clip_end) else {
            tracing::warn!("skipping metadata tuple with unparsable numeric field");
            continue;
        };
        out.push(VideoMetadata {
            video_id: caps[1].to_string(),
            description: caps[2].to_string(),
            views,
            clip_start,
            clip_end,
        });
    }
}
