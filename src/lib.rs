//! Scrape-and-normalize core for an unofficial [vlr.gg](https://www.vlr.gg)
//! esports REST API.
//!
//! The crate fetches vlr.gg HTML pages, walks their known structure with CSS
//! selectors, and produces typed, JSON-serializable records: news, upcoming
//! matches (all schedule pages, with stream lists for live ones), completed
//! results behind a time-boxed incremental cache, the home-page live score,
//! player statistics, and team rankings. The HTTP layer on top is expected
//! to forward [`model::SegmentList`] values verbatim and map [`VlrError`]
//! variants to response codes.

pub use client::VlrClient;
pub use error::{Result, VlrError};
pub use model::*;

mod cache;
mod client;
pub mod error;
pub mod model;
pub(crate) mod scrape;
