use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use crate::config;

/// Churn risk score for one patient, as returned by the external scoring
/// service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnScore {
    pub patient_name: String,
    pub score: f64,
}

/// Fetch the highest churn scores from the external scoring service.
///
/// The dashboard must never fail because scoring is down: every failure
/// mode (unset URL, network error, bad payload) degrades to an empty list.
pub async fn top_scores(limit: usize) -> Vec<ChurnScore> {
    let external = &config::config().external;
    if external.churn_service_url.is_empty() {
        return Vec::new();
    }

    let url = format!(
        "{}/scores",
        external.churn_service_url.trim_end_matches('/')
    );

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(external.churn_timeout_secs))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build churn service client: {}", e);
            return Vec::new();
        }
    };

    let response = match client.get(&url).send().await.and_then(|r| r.error_for_status()) {
        Ok(response) => response,
        Err(e) => {
            warn!("Churn service unavailable: {}", e);
            return Vec::new();
        }
    };

    match response.json::<Vec<ChurnScore>>().await {
        Ok(mut scores) => {
            scores.sort_by(|a, b| b.score.total_cmp(&a.score));
            scores.truncate(limit);
            scores
        }
        Err(e) => {
            warn!("Churn service returned an unexpected payload: {}", e);
            Vec::new()
        }
    }
}
