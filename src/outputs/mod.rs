//! Output sinks for extracted sentence pairs.
//!
//! - [`tsv`]: appends `english<TAB>chinese` rows to a flat file

pub mod tsv;
