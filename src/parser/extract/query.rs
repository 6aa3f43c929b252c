use crate::model::QueryProcessingInfo;
use crate::parser::lines::LogLine;
use crate::parser::patterns;

pub fn extract(lines: &[LogLine]) -> QueryProcessingInfo {
    let mut info = QueryProcessingInfo::default();

    for line in lines {
        let text = &line.text;

        if text.contains("Random topic from list:") {
            if let Some(caps) = patterns::RANDOM_TOPIC_RE.captures(text) {
                info.random_topic = Some(caps[1].trim().to_string());
            }
        } else if text.contains("Augmented query:") {
            if let Some(caps) = patterns::AUGMENTED_QUERY_RE.captures(text) {
                // First occurrence seeds the original; every occurrence
                // appends, duplicates included.
                if info.original_query.is_none() {
                    info.original_query = Some(caps[1].to_string());
                }
                info.augmented_queries.push(caps[2].to_string());
            }
        } else if text.contains("Query augmentation took") {
            if let Some(seconds) = patterns::parse_seconds(text) {
                info.augmentation_time = Some(seconds);
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
    fn topic_terminated_by_pipe() {
        let group = lines(&["Random topic from list: cable management | weight 0.3"]);
        let info = extract(&group);
        assert_eq!(info.random_topic.as_deref(), Some("cable management"));
    }

    #[test]
    fn topic_terminated_by_end_of_line() {
        let group = lines(&["Random topic from list: gardening"]);
        let info = extract(&group);
        assert_eq!(info.random_topic.as_deref(), Some("gardening"));
    }

    #[test]
    fn first_augmentation_seeds_original_and_order_is_kept() {
        let group = lines(&[
            "Augmented query: 'cables' -> 'cable management tips'",
            "Augmented query: 'cables' -> 'cable routing 2024'",
            "Augmented query: 'cables' -> 'cable management tips'",
        ]);
        let info = extract(&group);
        assert_eq!(info.original_query.as_deref(), Some("cables"));
        assert_eq!(
            info.augmented_queries,
            vec![
                "cable management tips",
                "cable routing 2024",
                "cable management tips"
            ]
        );
    }

    #[test]
    fn last_augmentation_time_wins() {
        let group = lines(&[
            "Query augmentation took 0.42 s",
            "Query augmentation took 0.91 s",
        ]);
        let info = extract(&group);
        assert_eq!(info.augmentation_time, Some(0.91));
    }
}
