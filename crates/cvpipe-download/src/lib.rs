//! CV download pipeline
//!
//! Enumerates a URL column of a spreadsheet, downloads every PDF link
//! under a fixed worker budget, and packages the results into a flat
//! zip archive keyed by spreadsheet row number.

pub mod archive;
pub mod config;
pub mod fetch;
pub mod runner;
pub mod sheet;

pub use config::DownloadConfig;
pub use runner::run;
