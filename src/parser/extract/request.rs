use crate::model::RequestInfo;
use crate::parser::lines::LogLine;
use crate::parser::patterns;

/// Verdict window, inclusive of the boundary line. A verdict printed past
/// this window is missed and the permissive default applies.
pub const BLACKLIST_LOOKAHEAD_LINES: usize = 5;

pub fn extract(lines: &[LogLine]) -> RequestInfo {
    let mut info = RequestInfo::default();

    for (i, line) in lines.iter().enumerate() {
        let text = &line.text;

        if text.contains(patterns::BOUNDARY_MARKER) {
            let Some(caps) = patterns::HOTKEY_RE.captures(text) else {
                tracing::warn!(line = line.index, "boundary line without parsable hotkey");
                continue;
            };
            info.client_hotkey = Some(caps[1].to_string());
            info.timestamp = line.timestamp().map(str::to_owned);

            let end = (i + BLACKLIST_LOOKAHEAD_LINES).min(lines.len());
            for next in &lines[i..end] {
                if next.text.contains(patterns::BLACKLIST_MARKER) {
                    info.blacklisted = Some(true);
                    if next.text.contains(patterns::INSUFFICIENT_STAKE) {
                        info.blacklist_reason = Some(patterns::INSUFFICIENT_STAKE.to_string());
                    }
                    break;
                } else if next.text.contains(patterns::NOT_BLACKLIST_MARKER) {
                    info.blacklisted = Some(false);
                    break;
                }
            }
        } else if !info.is_blacklisted() {
            if text.contains("Received scraping request:") {
                if let Some(caps) = patterns::SCRAPE_REQUEST_RE.captures(text) {
                    info.requested_videos = caps[1].parse().ok();
                    info.query = Some(caps[2].to_string());
                }
            } else if text.contains("stake=") {
                if let Some(caps) = patterns::STAKE_RE.captures(text) {
                    info.stake = caps[1].parse().ok();
                }
            }
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<LogLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| LogLine::new(i, *t))
            .collect()
    }

    #[test]
    fn hotkey_and_request_fields() {
        let group = lines(&[
            "Incoming request: UID 101 - HK 5F3sa8nQ - timeout 12.0 s",
            "Not Blacklisting recognized hotkey 5F3sa8nQ",
            "Received scraping request: 8 videos for query 'cable management'",
            "Setting weights: stake=4300",
        ]);
        let info = extract(&group);
        assert_eq!(info.client_hotkey.as_deref(), Some("5F3sa8nQ"));
        assert_eq!(info.blacklisted, Some(false));
        assert_eq!(info.requested_videos, Some(8));
        assert_eq!(info.query.as_deref(), Some("cable management"));
        assert_eq!(info.stake, Some(4300));
    }

    #[test]
    fn blacklisted_with_reason() {
        let group = lines(&[
            "Incoming request: UID 102 - HK 5BadActor - timeout 12.0 s",
            "Blacklisting hotkey 5BadActor: Insufficient stake",
        ]);
        let info = extract(&group);
        assert_eq!(info.blacklisted, Some(true));
        assert_eq!(info.blacklist_reason.as_deref(), Some("Insufficient stake"));
    }

    #[test]
    fn blacklisted_without_recorded_reason() {
        let group = lines(&[
            "Incoming request: UID 102 - HK 5BadActor - timeout 12.0 s",
            "Blacklisting hotkey 5BadActor: Forbidden",
        ]);
        let info = extract(&group);
        assert_eq!(info.blacklisted, Some(true));
        assert_eq!(info.blacklist_reason, None);
    }

    #[test]
    fn verdict_on_last_window_line_is_seen() {
        let group = lines(&[
            "Incoming request: UID 1 - HK a - timeout 12.0 s",
            "filler",
            "filler",
            "filler",
            "Blacklisting hotkey a",
        ]);
        let info = extract(&group);
        assert_eq!(info.blacklisted, Some(true));
    }

    #[test]
    fn verdict_past_window_is_missed() {
        let group = lines(&[
            "Incoming request: UID 1 - HK a - timeout 12.0 s",
            "filler",
            "filler",
            "filler",
            "filler",
            "Blacklisting hotkey a",
        ]);
        let info = extract(&group);
        assert_eq!(info.blacklisted, None);
        assert!(!info.is_blacklisted());
    }

    #[test]
    fn blacklisted_request_skips_field_recovery() {
        let group = lines(&[
            "Incoming request: UID 1 - HK a - timeout 12.0 s",
            "Blacklisting hotkey a: Insufficient stake",
            "Received scraping request: 8 videos for query 'ignored'",
            "Setting weights: stake=4300",
        ]);
        let info = extract(&group);
        assert!(info.is_blacklisted());
        assert_eq!(info.requested_videos, None);
        assert_eq!(info.query, None);
        assert_eq!(info.stake, None);
    }

    #[test]
    fn boundary_timestamp_recorded() {
        let group = lines(&[
            "\u{1b}[34m2024-06-18 14:29:55.700\u{1b}[39m | Incoming request: UID 1 - HK a - timeout 12.0 s",
        ]);
        let info = extract(&group);
        assert_eq!(info.timestamp.as_deref(), Some("2024-06-18 14:29:55.700"));
    }

    #[test]
    fn no_boundary_line_leaves_everything_unset() {
        let group = lines(&["just noise", "more noise"]);
        let info = extract(&group);
        assert_eq!(info, RequestInfo::default());
    }
}
