pub mod download;
pub mod filtering;
pub mod incentive;
pub mod processing;
pub mod query;
pub mod request;
pub mod results;
pub mod search;

use crate::model::{Job, JobStatus, Stages};
use crate::parser::lines::LogLine;

/// Assemble one job record from its line group.
///
/// The request stage gates everything: a blacklisted request keeps only its
/// `request` entry and never reaches the other extractors. Otherwise each
/// extractor makes its own independent pass over the group and the final
/// status comes from the incentive metrics.
pub fn assemble(id: usize, lines: &[LogLine]) -> Job {
    let request_info = request::extract(lines);

    let mut job = Job {
        id: id.to_string(),
        client_hotkey: request_info.client_hotkey.clone(),
        status: JobStatus::Unknown,
        stages: Stages::default(),
        results: None,
        incentive: None,
    };

    if request_info.is_blacklisted() {
        tracing::debug!(job = %job.id, "request blacklisted, skipping stage extraction");
        job.status = JobStatus::Blacklisted;
        job.stages.request = Some(request_info);
        return job;
    }

    job.stages = Stages {
        request: Some(request_info),
        query_processing: Some(query::extract(lines)),
        search: Some(search::extract(lines)),
        download: Some(download::extract(lines)),
        processing: Some(processing::extract(lines)),
        filtering: Some(filtering::extract(lines)),
    };
    job.results = Some(results::extract(lines));

    let metrics = incentive::extract(lines);
    job.status = if metrics.get(incentive::INCENTIVE_KEY).copied().unwrap_or(0.0) > 0.0 {
        JobStatus::Succeeded
    } else {
        JobStatus::Failed
    };
    if !metrics.is_empty() {
        job.incentive = Some(metrics);
    }

    job
}
