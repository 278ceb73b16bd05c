//! The HTML display surface and the set of columns built by one load cycle.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::bootstrap::bootstrap;
use crate::card::Card;
use crate::column::{ColumnController, ScrollMetrics, Surface};
use crate::config::ColumnConfig;
use crate::fetcher::Fetcher;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStatus {
    Loading,
    Error(String),
    Ready,
}

/// Buffers cards until the next response drains them, and remembers the
/// scroll position last reported by the browser.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    status: ColumnStatus,
    pending: Vec<Card>,
    metrics: ScrollMetrics,
}

impl HtmlSurface {
    pub fn new() -> Self {
        Self {
            status: ColumnStatus::Ready,
            pending: Vec::new(),
            metrics: ScrollMetrics::default(),
        }
    }

    pub fn status(&self) -> &ColumnStatus {
        &self.status
    }

    pub fn observe(&mut self, metrics: ScrollMetrics) {
        self.metrics = metrics;
    }

    /// Cards appended since the last call.
    pub fn drain(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.pending)
    }
}

impl Default for HtmlSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for HtmlSurface {
    fn show_loading(&mut self) {
        self.pending.clear();
        self.status = ColumnStatus::Loading;
    }

    fn show_error(&mut self, message: &str) {
        self.pending.clear();
        self.status = ColumnStatus::Error(message.to_string());
    }

    fn clear(&mut self) {
        self.pending.clear();
        self.status = ColumnStatus::Ready;
    }

    fn append(&mut self, card: Card) {
        self.pending.push(card);
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.metrics
    }
}

/// Everything a template needs to draw one column.
#[derive(Debug, Clone)]
pub struct ColumnView {
    pub slot: usize,
    pub source: String,
    pub status: ColumnStatus,
    pub cards: Vec<Card>,
    pub exhausted: bool,
}

#[derive(Default)]
pub struct Board {
    columns: Vec<ColumnController<HtmlSurface>>,
}

impl Board {
    pub async fn load(fetcher: &Fetcher, configs: &[ColumnConfig]) -> Self {
        let surfaces = configs.iter().map(|_| HtmlSurface::new()).collect();
        Self {
            columns: bootstrap(fetcher, configs, surfaces).await,
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_mut(&mut self, slot: usize) -> Option<&mut ColumnController<HtmlSurface>> {
        self.columns.get_mut(slot)
    }

    /// Views of all columns, taking whatever cards are pending on each.
    pub fn views(&mut self) -> Vec<ColumnView> {
        self.columns
            .iter_mut()
            .enumerate()
            .map(|(slot, column)| ColumnView {
                slot,
                source: column.state().source_name().to_string(),
                status: column.surface().status().clone(),
                exhausted: column.state().is_exhausted(),
                cards: column.surface_mut().drain(),
            })
            .collect()
    }

    /// Applies a scroll report to one column and returns the cards it added.
    /// `None` for an unknown slot.
    pub fn scroll(&mut self, slot: usize, metrics: ScrollMetrics) -> Option<Vec<Card>> {
        let column = self.column_mut(slot)?;
        column.surface_mut().observe(metrics);
        column.on_scroll();
        Some(column.surface_mut().drain())
    }
}

/// How many load cycles are kept before the oldest is dropped.
pub const MAX_BOARDS: usize = 64;

/// Boards of recent load cycles, keyed by id.
///
/// Each page view gets its own board, so its cursors move only with its own
/// scroll reports. Once `capacity` boards exist the oldest is evicted and
/// further scroll reports for it find nothing.
pub struct BoardStore {
    next_id: u64,
    capacity: usize,
    boards: HashMap<u64, Board>,
    order: VecDeque<u64>,
}

impl BoardStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            next_id: 1,
            capacity: capacity.max(1),
            boards: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Stores `board` and returns its id.
    pub fn insert(&mut self, board: Board) -> u64 {
        while self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.boards.remove(&oldest);
                debug!("Evicted board {}", oldest);
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        self.boards.insert(id, board);
        self.order.push_back(id);
        id
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Board> {
        self.boards.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl Default for BoardStore {
    fn default() -> Self {
        Self::new(MAX_BOARDS)
    }
}
