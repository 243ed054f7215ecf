//! Session-scoped state shared by every user action.
use crate::core::currency::CurrencyRateProvider;
use crate::core::history::SearchHistory;
use crate::core::movie::{LookupError, MovieProvider, MovieRecord};
use crate::core::normalize;
use crate::core::poster::PosterFetcher;
use crate::export::{self, ExportFormat};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

pub const BASE_CURRENCY: &str = "USD";
pub const TARGET_CURRENCY: &str = "INR";

/// Everything one interactive session owns. Created on start, dropped on exit;
/// nothing here outlives the process.
pub struct Session {
    movies: Arc<dyn MovieProvider>,
    rates: Arc<dyn CurrencyRateProvider>,
    posters: Arc<dyn PosterFetcher>,
    history: SearchHistory,
    selected: Option<usize>,
    recent_limit: usize,
}

impl Session {
    pub fn new(
        movies: Arc<dyn MovieProvider>,
        rates: Arc<dyn CurrencyRateProvider>,
        posters: Arc<dyn PosterFetcher>,
        recent_limit: usize,
    ) -> Self {
        Session {
            movies,
            rates,
            posters,
            history: SearchHistory::new(),
            selected: None,
            recent_limit,
        }
    }

    /// Current USD to INR rate, or `None` when conversion is unavailable.
    pub async fn current_rate(&self) -> Option<f64> {
        match self.rates.get_rate(BASE_CURRENCY, TARGET_CURRENCY).await {
            Ok(rate) => Some(rate),
            Err(e) => {
                warn!(error = %e, "Live {BASE_CURRENCY} to {TARGET_CURRENCY} rate unavailable");
                None
            }
        }
    }

    /// Looks up a title and, on success, appends it to history and selects it.
    pub async fn search(&mut self, title: &str) -> Result<&MovieRecord, LookupError> {
        if title.trim().is_empty() {
            return Err(LookupError::EmptyTitle);
        }
        let rate = self.current_rate().await;
        let record = normalize::lookup(self.movies.as_ref(), title, rate).await?;
        info!(title = %record.title, hit_status = %record.hit_status, "Lookup succeeded");

        self.history.append(record);
        let index = self.history.len() - 1;
        self.selected = Some(index);
        Ok(&self.history.all()[index])
    }

    /// Selects a record by its zero-based position in history.
    pub fn select(&mut self, index: usize) -> Option<&MovieRecord> {
        let record = self.history.get(index)?;
        self.selected = Some(index);
        Some(record)
    }

    pub fn selected(&self) -> Option<&MovieRecord> {
        self.selected.and_then(|i| self.history.get(i))
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.selected = None;
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// The most recent searches, bounded by the configured limit.
    pub fn recent(&self) -> &[MovieRecord] {
        self.history.recent(self.recent_limit)
    }

    /// Serializes a snapshot of the full history.
    pub async fn export(&self, format: ExportFormat) -> Result<Vec<u8>> {
        let records = self.history.all();
        match format {
            ExportFormat::Csv => export::csv::to_csv(records),
            ExportFormat::Pdf => export::pdf::to_pdf(records, self.posters.as_ref()).await,
        }
    }
}
