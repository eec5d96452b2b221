//! In-memory quote source for testing.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use synapse_types::Result;

use crate::*;

/// Quote source returning a fixed route list (for testing and offline use).
///
/// Every query it receives is recorded in order.
pub struct StaticQuoteSource {
    routes: Vec<Route>,
    queries: Mutex<Vec<QuoteQuery>>,
}

impl StaticQuoteSource {
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Build from a raw GET /bridge body, validated like a live response.
    pub fn from_json(body: &Value) -> Result<Self> {
        Ok(Self::new(routes_from_body(body)?))
    }

    /// Queries seen so far.
    pub fn queries(&self) -> Vec<QuoteQuery> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for StaticQuoteSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl QuoteSource for StaticQuoteSource {
    async fn fetch_routes(&self, query: &QuoteQuery) -> Result<Vec<Route>> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(query.clone());
        Ok(self.routes.clone())
    }
}
