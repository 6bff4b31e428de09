use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};

use crate::state::AppState;

/// Prometheus collectors for the search endpoint, registered on a private registry.
pub struct SearchMetrics {
    registry: Registry,
    searches_total: IntCounterVec,
    search_duration_seconds: Histogram,
    result_total_records: Histogram,
}

impl SearchMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let searches_total = IntCounterVec::new(
            Opts::new("carhub_searches_total", "Car searches partitioned by outcome."),
            &["outcome"],
        )?;
        let search_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "carhub_search_duration_seconds",
            "Wall time of one car search, store calls included.",
        ))?;
        let result_total_records = Histogram::with_opts(
            HistogramOpts::new(
                "carhub_search_result_total_records",
                "totalRecords reported by successful searches.",
            )
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0]),
        )?;

        registry.register(Box::new(searches_total.clone()))?;
        registry.register(Box::new(search_duration_seconds.clone()))?;
        registry.register(Box::new(result_total_records.clone()))?;

        Ok(Self { registry, searches_total, search_duration_seconds, result_total_records })
    }

    pub fn observe(&self, outcome: &str, duration_seconds: f64, total_records: Option<u64>) {
        self.searches_total.with_label_values(&[outcome]).inc();
        self.search_duration_seconds.observe(duration_seconds);
        if let Some(total) = total_records {
            self.result_total_records.observe(total as f64);
        }
    }

    pub fn encode(&self) -> Result<(String, String), prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok((encoder.format_type().to_string(), String::from_utf8_lossy(&buffer).into_owned()))
    }
}

/// GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.encode() {
        Ok((content_type, body)) => ([(CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes_are_exported() {
        let metrics = SearchMetrics::new().unwrap();
        metrics.observe("ok", 0.012, Some(3));
        metrics.observe("validation", 0.001, None);

        let (content_type, body) = metrics.encode().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert!(body.contains(r#"carhub_searches_total{outcome="ok"} 1"#));
        assert!(body.contains(r#"carhub_searches_total{outcome="validation"} 1"#));
        assert!(body.contains("carhub_search_result_total_records_count 1"));
    }
}
