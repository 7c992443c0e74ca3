/// Multi-site daily report assembly.
///
/// Groups the day's records by site, summarizes every site, and ranks the
/// sites by descending hazard count. Ties keep first-seen order, so the
/// same input always yields the same report.
///
/// Per-site summarization is independent, so it can run on a thread pool.
/// The parallel path reassembles summaries by first-seen position before
/// ranking and produces the same report as the serial path. A site whose
/// worker never reported back is summarized on the calling thread.

use chrono::NaiveDateTime;
use std::sync::{mpsc, Arc};
use threadpool::ThreadPool;
use tracing::{error, info};

use crate::analysis::groupings::group_by_site;
use crate::analysis::site_summary::summarize_site_with;
use crate::config::AnalysisConfig;
use crate::model::{DailyReport, HazardRecord, OrderedMap, SiteSummary, HAZARD_WEATHER_ALERT};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Builds a `DailyReport` with a fixed alert hazard type and worker count.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    alert_type: String,
    workers: usize,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self {
            alert_type: HAZARD_WEATHER_ALERT.to_string(),
            workers: 1,
        }
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            alert_type: config.alert_hazard_type.clone(),
            workers: config.parallel_workers.max(1),
        }
    }

    pub fn alert_type(mut self, alert_type: &str) -> Self {
        self.alert_type = alert_type.to_string();
        self
    }

    /// Values below 1 are treated as 1.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Summarizes and ranks every site in `records`.
    ///
    /// `generated_at` becomes the report's `analysis_timestamp`; passing it
    /// in keeps the build a pure function of its inputs.
    pub fn build(
        &self,
        date: &str,
        records: Vec<HazardRecord>,
        generated_at: NaiveDateTime,
    ) -> DailyReport {
        let grouped = group_by_site(records);
        let site_count = grouped.len();

        let summaries = if self.workers > 1 && site_count > 1 {
            self.summarize_parallel(grouped)
        } else {
            grouped
                .into_iter()
                .map(|(site, records)| {
                    let summary = summarize_site_with(&records, &self.alert_type);
                    (site, summary)
                })
                .collect()
        };

        let centers = rank_sites(summaries);
        info!(
            date,
            sites = centers.len(),
            hazards = centers.values().map(|s| s.total_hazards).sum::<usize>(),
            "built daily report"
        );

        DailyReport {
            date: date.to_string(),
            analysis_timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            total_centers: centers.len(),
            centers,
        }
    }

    fn summarize_parallel(
        &self,
        grouped: OrderedMap<Vec<HazardRecord>>,
    ) -> Vec<(String, SiteSummary)> {
        let sites: Vec<(String, Arc<Vec<HazardRecord>>)> = grouped
            .into_iter()
            .map(|(site, records)| (site, Arc::new(records)))
            .collect();
        let pool = ThreadPool::new(self.workers.min(sites.len()));
        let (tx, rx) = mpsc::channel();

        for (position, (_, records)) in sites.iter().enumerate() {
            let tx = tx.clone();
            let records = Arc::clone(records);
            let alert_type = self.alert_type.clone();
            pool.execute(move || {
                let summary = summarize_site_with(&records, &alert_type);
                // Receiver outlives the pool; a failed send is unreachable.
                let _ = tx.send((position, summary));
            });
        }
        drop(tx);

        let received: Vec<(usize, SiteSummary)> = rx.iter().collect();
        if received.len() != sites.len() {
            error!(
                expected = sites.len(),
                received = received.len(),
                panicked = pool.panic_count(),
                "site summarization workers failed, summarizing missing sites serially"
            );
        }

        assemble(sites, received, &self.alert_type)
    }
}

/// Places worker results back in first-seen site order. A site without a
/// result is summarized on the calling thread.
fn assemble(
    sites: Vec<(String, Arc<Vec<HazardRecord>>)>,
    received: Vec<(usize, SiteSummary)>,
    alert_type: &str,
) -> Vec<(String, SiteSummary)> {
    let mut slots: Vec<Option<SiteSummary>> = sites.iter().map(|_| None).collect();
    for (position, summary) in received {
        if let Some(slot) = slots.get_mut(position) {
            *slot = Some(summary);
        }
    }

    sites
        .into_iter()
        .zip(slots)
        .map(|((site, records), slot)| {
            let summary = slot.unwrap_or_else(|| summarize_site_with(&records, alert_type));
            (site, summary)
        })
        .collect()
}

/// Orders sites by descending `total_hazards`, keeping input order on ties.
pub fn rank_sites(mut summaries: Vec<(String, SiteSummary)>) -> OrderedMap<SiteSummary> {
    // sort_by is stable.
    summaries.sort_by(|a, b| b.1.total_hazards.cmp(&a.1.total_hazards));
    summaries.into_iter().collect()
}

/// Serial build with the default alert hazard type.
pub fn build_report(
    date: &str,
    records: Vec<HazardRecord>,
    generated_at: NaiveDateTime,
) -> DailyReport {
    ReportBuilder::default().build(date, records, generated_at)
}
