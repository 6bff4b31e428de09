use std::sync::Arc;

use carhub_search::SearchEngine;

use crate::metrics::SearchMetrics;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub metrics: Arc<SearchMetrics>,
}

impl AppState {
    pub fn new(engine: SearchEngine) -> Result<Self, prometheus::Error> {
        Ok(Self {
            engine: Arc::new(engine),
            metrics: Arc::new(SearchMetrics::new()?),
        })
    }
}
