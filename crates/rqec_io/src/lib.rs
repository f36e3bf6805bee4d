//! I/O utilities for measurement-record files.
//!
//! Reads and writes shot records in the two Stim sample formats (`.b8`
//! bit-packed and `.01` text), and replays recorded shots through the
//! decoder as a measurement source. Record contents follow the layout
//! contract in [`rqec_common::layout`].

use anyhow::{Result, bail};
use rqec_common::layout::RecordLayout;
use rqec_core::SampleBatch;
use std::path::Path;

/// Binary `.b8` shot files.
///
/// Each shot is packed little-endian bit order into bytes and padded to a
/// byte boundary, matching Stim's `b8` sample format.
pub mod loader;

/// Parser and writer for the `.01` text format.
///
/// One shot per line, one `0`/`1` character per measurement.
pub mod parser;

/// Measurement source replaying recorded shots.
pub mod replay;

pub use replay::ReplaySource;

/// Supported record file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    B8,
    ZeroOne,
}

impl RecordFormat {
    /// Chooses the format from a file extension (`b8` or `01`).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some("b8") => Ok(RecordFormat::B8),
            Some("01") => Ok(RecordFormat::ZeroOne),
            _ => bail!(
                "unrecognised record file extension for {} (expected .b8 or .01)",
                path.as_ref().display()
            ),
        }
    }
}

/// Loads every shot of a record file, choosing the format by extension.
pub fn load_records<P: AsRef<Path>>(path: P, layout: RecordLayout) -> Result<SampleBatch> {
    match RecordFormat::from_path(&path)? {
        RecordFormat::B8 => {
            let bits = loader::load_b8_file(&path)?;
            loader::slice_records(&bits, layout)
        }
        RecordFormat::ZeroOne => parser::load_01_file(&path, layout),
    }
}

/// Writes every shot of `batch` to a record file, choosing the format by
/// extension.
pub fn write_records<P: AsRef<Path>>(path: P, batch: &SampleBatch) -> Result<()> {
    match RecordFormat::from_path(&path)? {
        RecordFormat::B8 => loader::write_b8_file(&path, batch),
        RecordFormat::ZeroOne => parser::write_01_file(&path, batch),
    }
}
