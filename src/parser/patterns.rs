//! Trigger registry: every marker and fine pattern the extractors consult,
//! in one place. The same entries drive unrecognized-line attribution, so
//! nothing here is declared without being dispatched on.

use std::sync::LazyLock;

use regex::Regex;

pub const BOUNDARY_MARKER: &str = "Incoming request: UID";
pub const BLACKLIST_MARKER: &str = "Blacklisting hotkey";
pub const NOT_BLACKLIST_MARKER: &str = "Not Blacklisting";
pub const INSUFFICIENT_STAKE: &str = "Insufficient stake";
pub const INCENTIVE_MARKER: &str = "Emission/day";

pub static HOTKEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"HK (\S+) -").unwrap());
pub static SCRAPE_REQUEST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) videos for query '(.*)'").unwrap());
pub static STAKE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"stake=(\d+)").unwrap());
pub static RANDOM_TOPIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Random topic from list: (.*?)(?:\||$)").unwrap());
pub static AUGMENTED_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Augmented query: '([^']+)' -> '([^']+)'").unwrap());
pub static ELAPSED_SECONDS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"took ([\d.]+) s").unwrap());
pub static DUPLICATES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Removed (\d+) duplicate").unwrap());
pub static VIDEOS_FOUND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"found (\d+) videos").unwrap());
pub static DOWNLOAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Downloaded and clipped (\d+) videos in ([\d.]+) seconds").unwrap()
});
pub static DATA_SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Data received from load balancer: (\d+)").unwrap());
pub static VIDEO_METADATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"VideoMetadata\(video_id='([^']+)', description='([^']+)', views=(\d+), start_time=(\d+), end_time=(\d+)",
    )
    .unwrap()
});
pub static UNIQUE_VIDEOS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+) unique videos prepared").unwrap());
pub static FINAL_VIDEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\. ([^:]+): (.*?) \[(\d+\.\.\d+)\] (\d+)").unwrap());
pub static SCRAPE_STATUS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"SCRAPING (SUCCEEDED|FAILED): Scraped (\d+)/(\d+) videos in ([\d.]+)").unwrap()
});

/// One named trigger: a cheap substring pre-filter plus an optional fine
/// pattern that arbitrates the match.
pub struct LinePattern {
    pub name: &'static str,
    pub needle: &'static str,
    pub regex: Option<&'static LazyLock<Regex>>,
}

impl LinePattern {
    pub fn matches(&self, line: &str) -> bool {
        line.contains(self.needle) && self.regex.map_or(true, |re| re.is_match(line))
    }
}

pub static REGISTRY: &[LinePattern] = &[
    LinePattern { name: "request_boundary", needle: BOUNDARY_MARKER, regex: None },
    LinePattern { name: "blacklist_verdict", needle: BLACKLIST_MARKER, regex: None },
    LinePattern { name: "no_blacklist_verdict", needle: NOT_BLACKLIST_MARKER, regex: None },
    LinePattern { name: "scraping_request", needle: "Received scraping request:", regex: Some(&SCRAPE_REQUEST_RE) },
    LinePattern { name: "stake", needle: "stake=", regex: Some(&STAKE_RE) },
    LinePattern { name: "random_topic", needle: "Random topic from list:", regex: Some(&RANDOM_TOPIC_RE) },
    LinePattern { name: "augmented_query", needle: "Augmented query:", regex: Some(&AUGMENTED_QUERY_RE) },
    LinePattern { name: "augmentation_time", needle: "Query augmentation took", regex: Some(&ELAPSED_SECONDS_RE) },
    LinePattern { name: "duplicates_removed", needle: "duplicate search results", regex: Some(&DUPLICATES_RE) },
    LinePattern { name: "videos_found", needle: "found", regex: Some(&VIDEOS_FOUND_RE) },
    LinePattern { name: "download_summary", needle: "Downloaded and clipped", regex: Some(&DOWNLOAD_RE) },
    LinePattern { name: "load_balancer_data", needle: "Data received from load balancer:", regex: Some(&DATA_SIZE_RE) },
    LinePattern { name: "load_balancer_response", needle: "Received response:", regex: None },
    LinePattern { name: "embedding_time", needle: "Embeddings generation took", regex: Some(&ELAPSED_SECONDS_RE) },
    LinePattern { name: "unique_videos", needle: "unique videos prepared", regex: Some(&UNIQUE_VIDEOS_RE) },
    LinePattern { name: "final_video", needle: "[", regex: Some(&FINAL_VIDEO_RE) },
    LinePattern { name: "scrape_status", needle: "SCRAPING", regex: Some(&SCRAPE_STATUS_RE) },
    LinePattern { name: "incentive_metrics", needle: INCENTIVE_MARKER, regex: None },
];

/// The first registry trigger that claims the line, if any.
pub fn recognize(line: &str) -> Option<&'static str> {
    REGISTRY
        .iter()
        .find(|pattern| pattern.matches(line))
        .map(|pattern| pattern.name)
}

/// Pull the elapsed-seconds token out of a `took <n> s` line. A value the
/// float parser rejects is logged and dropped, never fatal.
pub fn parse_seconds(text: &str) -> Option<f64> {
    let caps = ELAPSED_SECONDS_RE.captures(text)?;
    match caps[1].parse::<f64>() {
        Ok(seconds) => Some(seconds),
        Err(err) => {
            tracing::warn!(token = &caps[1], %err, "unparsable duration token");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_line_recognized() {
        assert_eq!(
            recognize("Incoming request: UID 101 - HK 5F3sa8nQ - timeout 12.0 s - stake 4300"),
            Some("request_boundary")
        );
    }

    #[test]
    fn stage_triggers_recognized() {
        assert!(recognize("Removed 61 duplicate search results.").is_some());
        assert_eq!(
            recognize("Video search took 2.50 s: found 52 videos"),
            Some("videos_found")
        );
        assert!(recognize("Downloaded and clipped 8 videos in 34.20 seconds").is_some());
        assert!(recognize("8 unique videos prepared").is_some());
        assert!(recognize("SCRAPING SUCCEEDED: Scraped 8/8 videos in 41.00").is_some());
        assert!(recognize("Emission/day: 0.52 | Incentive: 0.75").is_some());
    }

    #[test]
    fn noise_line_not_recognized() {
        assert_eq!(recognize("Starting axon server on port 8091"), None);
        assert_eq!(recognize(""), None);
    }

    #[test]
    fn coarse_needle_without_fine_match_not_recognized() {
        // Contains "found" but not the `found <n> videos` shape.
        assert_eq!(recognize("No proxy found for this region"), None);
    }

    #[test]
    fn timestamp_prefix_alone_does_not_recognize_a_line() {
        // The colorized timestamp is on nearly every trace line; only the
        // line body decides recognition.
        assert_eq!(
            recognize(
                "\u{1b}[34m2024-06-18 14:29:55.647\u{1b}[39m | \u{1b}[36m\u{1b}[1m     TRACE      \u{1b}[0m | axon     | <-- | 875 B | Videos |"
            ),
            None
        );
        assert_eq!(
            recognize("\u{1b}[34m2024-06-18 14:29:55.700\u{1b}[39m | Incoming request: UID 1 - HK a - timeout 12.0 s"),
            Some("request_boundary")
        );
    }

    #[test]
    fn parse_seconds_tolerates_garbage() {
        assert_eq!(parse_seconds("Query augmentation took 0.42 s"), Some(0.42));
        assert_eq!(parse_seconds("Query augmentation took 1.2.3 s"), None);
        assert_eq!(parse_seconds("no duration here"), None);
    }
}
