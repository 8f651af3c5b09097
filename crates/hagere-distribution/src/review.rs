//! per-game review surface
//!
//! holds one game's distribution rows plus the search/status/page view state
//! over them. aggregates always run over the full filtered set; pagination is
//! a view concern only.

use tracing::warn;

use crate::aggregate::{filter_by_search_and_status, summarize, StatusFilter, Summary};
use crate::approval::ApprovalBatch;
use crate::record::{game_figure_anomalies, DistributionRecord};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// handle for one dispatched fetch; only the latest one may apply its rows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchToken(u64);

/// state machine over `{ records, search_term, status_filter, page, page_size }`
#[derive(Clone, Debug)]
pub struct ReviewSurface {
    records: Vec<DistributionRecord>,
    search_term: String,
    status_filter: StatusFilter,
    page: usize,
    page_size: usize,
    /// sequence of the most recently dispatched fetch
    fetch_seq: u64,
}

impl Default for ReviewSurface {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ReviewSurface {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            search_term: String::new(),
            status_filter: StatusFilter::All,
            page: 0,
            page_size: page_size.max(1),
            fetch_seq: 0,
        }
    }

    /// register a fetch (initial load or redistribute) and get its token
    ///
    /// issuing a new token supersedes every earlier one; a superseded
    /// response that arrives late is dropped by [`ReviewSurface::apply_fetch`]
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.fetch_seq += 1;
        FetchToken(self.fetch_seq)
    }

    /// install fetched rows if the token is still current
    ///
    /// replacement, never merge: stale unapproved selections die with the old
    /// rows. returns whether the rows were applied.
    pub fn apply_fetch(&mut self, token: FetchToken, rows: Vec<DistributionRecord>) -> bool {
        if token.0 != self.fetch_seq {
            warn!(
                got = token.0,
                current = self.fetch_seq,
                "dropping superseded distribution fetch"
            );
            return false;
        }

        for game_id in game_figure_anomalies(&rows) {
            warn!(%game_id, "inconsistent game-level figures across records");
        }

        self.records = rows;
        self.page = 0;
        true
    }

    pub fn set_search(&mut self, term: &str) {
        if self.search_term != term {
            self.search_term = term.to_string();
            self.page = 0;
        }
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        if self.status_filter != status {
            self.status_filter = status;
            self.page = 0;
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    pub fn records(&self) -> &[DistributionRecord] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// the full filtered set, what all aggregates are computed over
    pub fn filtered(&self) -> Vec<DistributionRecord> {
        filter_by_search_and_status(&self.records, &self.search_term, self.status_filter)
    }

    /// summary over the full filtered set, independent of the current page
    pub fn summary(&self) -> Summary {
        summarize(&self.filtered())
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size).max(1)
    }

    /// rows of the current page
    pub fn page_rows(&self) -> Vec<DistributionRecord> {
        self.filtered()
            .into_iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .collect()
    }

    /// count of unapproved rows in the filtered set; drives the approve-all
    /// button label and enablement
    pub fn pending_count(&self) -> usize {
        self.filtered().iter().filter(|r| !r.approved).count()
    }

    /// the approve-all working set: unapproved rows of the filtered set only,
    /// even when the `all` status filter keeps approved rows visible
    pub fn approval_batch(&self, note: Option<String>) -> ApprovalBatch {
        let items = self
            .filtered()
            .into_iter()
            .filter(|r| !r.approved)
            .collect();
        ApprovalBatch::new(items, note)
    }

    /// close the surface: drop rows and view state
    ///
    /// the fetch sequence is deliberately kept so responses dispatched before
    /// the close stay superseded
    pub fn reset(&mut self) {
        self.records.clear();
        self.search_term.clear();
        self.status_filter = StatusFilter::All;
        self.page = 0;
    }
}
