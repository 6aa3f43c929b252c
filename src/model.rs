use std::collections::BTreeMap;

use serde::Serialize;

/// Final document returned to the caller: all jobs in arrival order plus
/// every line no trigger claimed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseReport {
    pub jobs: Vec<Job>,
    pub unrecognized_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Unknown,
    Blacklisted,
    Succeeded,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Unknown => "unknown",
            JobStatus::Blacklisted => "blacklisted",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
        }
    }
}

/// One inbound scraping request and its full lifecycle through the worker.
///
/// Invariant: a blacklisted job carries only the `request` stage; `results`
/// and `incentive` stay absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_hotkey: Option<String>,
    pub status: JobStatus,
    pub stages: Stages,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<ResultsInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incentive: Option<BTreeMap<String, f64>>,
}

/// Per-stage extraction output. Explicit optional fields instead of a
/// name-keyed map so absence stays distinguishable from a zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_processing: Option<QueryProcessingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing: Option<ProcessingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtering: Option<FilteringInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_hotkey: Option<String>,
    /// None when no verdict appeared inside the lookahead window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklisted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blacklist_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_videos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stake: Option<u64>,
}

impl RequestInfo {
    /// Downstream gating: an absent verdict counts as not blacklisted.
    pub fn is_blacklisted(&self) -> bool {
        self.blacklisted.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryProcessingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_topic: Option<String>,
    pub augmented_queries: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub augmentation_time: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchInfo {
    pub videos_found: u32,
    pub duplicates_removed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DownloadInfo {
    pub downloaded_videos: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_time: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding_time: Option<f64>,
    pub load_balancer: LoadBalancerInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadBalancerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_size: Option<u64>,
    pub received_metadata: Vec<VideoMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub description: String,
    pub views: u64,
    pub clip_start: u64,
    pub clip_end: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteringInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_videos: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScrapeStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsInfo {
    pub final_videos: Vec<FinalVideo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScrapeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalVideo {
    pub video_id: String,
    pub title: String,
    pub clip: String,
    pub views: u64,
}
