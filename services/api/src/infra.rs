use billing_assist::config::BillingConfig;
use billing_assist::workflows::coding::RuleTables;
use billing_assist::workflows::denial::{AggregateStats, StatsError};
use billing_assist::workflows::review::BillingReviewService;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the review service from billing settings, loading the payer stats
/// snapshot once. `stats_override` replaces the configured path when given.
pub(crate) fn build_review_service(
    config: &BillingConfig,
    stats_override: Option<&Path>,
) -> Result<BillingReviewService, StatsError> {
    let tables = RuleTables::standard().with_default_lookback(config.lookback_days);
    let stats_path = stats_override.or(config.payer_stats_path.as_deref());
    let stats = AggregateStats::load_optional(stats_path)?;

    Ok(BillingReviewService::new(tables, config.default_payer.clone()).with_stats(stats))
}
