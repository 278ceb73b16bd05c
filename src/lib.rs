//! Tri-Column News - a three-column RSS news board
//!
//! Feeds are fetched through an RSS-to-JSON conversion proxy and shown as
//! news cards in three independently scrolling columns, one page at a time.

pub mod board;
pub mod bootstrap;
pub mod card;
pub mod column;
pub mod config;
pub mod date;
pub mod feed;
pub mod fetcher;
pub mod image;
pub mod routes;
