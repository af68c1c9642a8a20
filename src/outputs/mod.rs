//! Output generation for the corpus and per-article JSON.
//!
//! # Submodules
//!
//! - [`corpus`]: Writes the day's documents and index lines
//! - [`json`]: Writes individual article records as JSON
//!
//! # Output Structure
//!
//! ```text
//! root/
//! ├── corpus/
//! │   └── 2018/
//! │       ├── 2018-03-05.txt     # one document per line
//! │       └── 2018-03-05.index   # one tab-separated index line per document
//! └── articles/                  # only with `save_articles`
//!     └── 001/2018/03/05/0009876543.json
//! ```

pub mod corpus;
pub mod json;
