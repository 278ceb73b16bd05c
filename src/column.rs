//! Per-column pagination and infinite scroll.
//!
//! A [`ColumnController`] owns the item list of one column and the surface it
//! renders into. Pages are appended on setup and whenever the surface reports
//! a scroll position near its bottom.

use std::ops::Range;

use serde::Deserialize;
use tracing::debug;

use crate::card::{render_card, Card};
use crate::config::ColumnConfig;
use crate::feed::Item;

/// Distance from the bottom, in pixels, that counts as "at the bottom".
pub const SCROLL_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ScrollMetrics {
    #[serde(default)]
    pub scroll_top: f64,
    #[serde(default)]
    pub client_height: f64,
    #[serde(default)]
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, client_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            client_height,
            scroll_height,
        }
    }

    pub fn near_bottom(&self) -> bool {
        self.scroll_top + self.client_height >= self.scroll_height - SCROLL_THRESHOLD
    }
}

/// A display region a column renders into.
pub trait Surface {
    /// Replaces the content with a loading placeholder.
    fn show_loading(&mut self);
    /// Replaces the content with an error notice.
    fn show_error(&mut self, message: &str);
    fn clear(&mut self);
    fn append(&mut self, card: Card);
    fn scroll_metrics(&self) -> ScrollMetrics;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPhase {
    Idle,
    LoadingPage,
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct ColumnState {
    items: Vec<Item>,
    cursor: usize,
    page_size: usize,
    source_name: String,
    show_image: bool,
    in_flight: bool,
}

impl ColumnState {
    pub fn new(items: Vec<Item>, config: &ColumnConfig) -> Self {
        Self {
            items,
            cursor: 0,
            page_size: config.page_size.max(1),
            source_name: config.name.clone(),
            show_image: config.show_image,
            in_flight: false,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn show_image(&self) -> bool {
        self.show_image
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn phase(&self) -> ColumnPhase {
        if self.in_flight {
            ColumnPhase::LoadingPage
        } else if self.is_exhausted() {
            ColumnPhase::Exhausted
        } else {
            ColumnPhase::Idle
        }
    }

    /// Marks a page load as in flight and returns the item range it covers.
    ///
    /// Returns `None` while another page is in flight or when nothing is left.
    pub fn begin_page(&mut self) -> Option<Range<usize>> {
        if self.in_flight || self.is_exhausted() {
            return None;
        }
        self.in_flight = true;
        let end = (self.cursor + self.page_size).min(self.items.len());
        Some(self.cursor..end)
    }

    pub fn finish_page(&mut self, page: Range<usize>) {
        debug_assert_eq!(page.start, self.cursor);
        self.cursor = page.end.min(self.items.len());
        self.in_flight = false;
    }
}

pub struct ColumnController<S> {
    state: ColumnState,
    surface: S,
}

impl<S: Surface> ColumnController<S> {
    pub fn new(state: ColumnState, surface: S) -> Self {
        Self { state, surface }
    }

    /// Appends the first page.
    pub fn setup(&mut self) -> usize {
        self.load_more()
    }

    /// Appends the next page and returns how many cards were added.
    pub fn load_more(&mut self) -> usize {
        let Some(page) = self.state.begin_page() else {
            debug!(
                "No page to load for '{}' ({:?})",
                self.state.source_name,
                self.state.phase()
            );
            return 0;
        };

        let count = page.len();
        for item in &self.state.items[page.clone()] {
            self.surface.append(render_card(
                item,
                &self.state.source_name,
                self.state.show_image,
            ));
        }
        self.state.finish_page(page);

        debug!(
            "Appended {} cards to '{}' ({}/{})",
            count,
            self.state.source_name,
            self.state.cursor,
            self.state.items.len()
        );
        count
    }

    /// Loads the next page if the surface is scrolled to within
    /// [`SCROLL_THRESHOLD`] of its bottom.
    pub fn on_scroll(&mut self) -> usize {
        if self.state.is_exhausted() || !self.surface.scroll_metrics().near_bottom() {
            return 0;
        }
        self.load_more()
    }

    pub fn state(&self) -> &ColumnState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
