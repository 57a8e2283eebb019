//! Site scrapers.
//!
//! The crawl follows the same two-phase pattern for every layout:
//!
//! 1. **Indexing**: read list page `n` and collect its article URLs
//! 2. **Fetching**: download every article of that page concurrently, pull the
//!    paragraph text and run the layout's pairing heuristic
//!
//! Pagination stops at the first list page without items.
//!
//! # Supported Sources
//!
//! | Source | Module | Layouts |
//! |--------|--------|---------|
//! | China Daily language site | [`chinadaily`] | bilingual news, pure English with inline Chinese |

pub mod chinadaily;
