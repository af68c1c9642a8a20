//! Naver News crawling.
//!
//! The crawl runs in two phases, each backed by a submodule:
//!
//! 1. **Listing**: discover article URLs per section from the daily
//!    breaking-news listing ([`listing`])
//! 2. **Scraping**: fetch and parse each article into a record ([`article`])
//!
//! # Submodules
//!
//! | Module | Role |
//! |--------|------|
//! | [`source`] | Page transport behind the [`source::PageSource`] trait |
//! | [`listing`] | Paginates listing pages until they stop yielding new links |
//! | [`normalize`] | Redirect resolution and query-string identifiers |
//! | [`extractor`] | Template selection and selector-based extraction |
//! | [`cleanup`] | Body markup to plain text |
//! | [`article`] | Ties the above into one record per URL |
//!
//! Everything runs sequentially; failed articles are logged and skipped.

pub mod article;
pub mod cleanup;
pub mod extractor;
pub mod listing;
pub mod normalize;
pub mod source;
