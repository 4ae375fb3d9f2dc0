//! Feedforge library.
//!
//! Generates fake social-media content (Reddit threads, Twitter/X threads,
//! Instagram feeds, Facebook posts with comments) by asking a language model
//! for structured records, then rendering those records to platform-styled
//! HTML and an A4 PDF snapshot.

pub mod avatar;
pub mod cli;
pub mod config;
pub mod csv_io;
pub mod images;
pub mod llm;
pub mod pdf;
pub mod records;
pub mod render;
