pub mod binning;
pub mod config;
pub mod domain;
pub mod error;
pub mod extend;
pub mod format;
pub mod selection;
pub mod ticks;
pub mod truncation;
