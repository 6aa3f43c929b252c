use crate::model::DownloadInfo;
use crate::parser::lines::LogLine;
use crate::parser::patterns;

pub fn extract(lines: &[LogLine]) -> DownloadInfo {
    let mut info = DownloadInfo::default();

    for line in lines {
        if !line.text.contains("Downloaded and clipped") {
            continue;
        }
        if let Some(caps) = patterns::DOWNLOAD_RE.captures(&line.text) {
            if let Ok(n) = caps[1].parse() {
                info.downloaded_videos = n;
            }
            info.download_time = caps[2].parse().ok();
        }
    }

    info
}
