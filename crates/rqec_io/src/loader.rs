use anyhow::{Context, Result, ensure};
use bitvec::prelude::*;
use rqec_common::layout::{LAYOUT_VERSION, RecordLayout};
use rqec_core::SampleBatch;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Loads a Stim .b8 file (binary measurement data).
pub fn load_b8_file<P: AsRef<Path>>(path: P) -> Result<BitVec<u8, Lsb0>> {
    let mut file = File::open(path).context("Failed to open .b8 file")?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    // Stim packs bits least significant first.
    Ok(BitVec::<u8, Lsb0>::from_vec(buffer))
}

/// Cuts raw `.b8` bits into per-shot records of `layout`.
///
/// Fails when the data does not hold a whole number of byte-padded shots.
pub fn slice_records(raw_bits: &BitVec<u8, Lsb0>, layout: RecordLayout) -> Result<SampleBatch> {
    let bits_per_shot = layout.record_len();
    let stride_bits = bits_per_shot.div_ceil(8) * 8;
    ensure!(stride_bits > 0, "record layout has no measurements");
    ensure!(
        raw_bits.len() % stride_bits == 0,
        "{} bytes is not a whole number of {}-byte shots",
        raw_bits.len() / 8,
        stride_bits / 8
    );

    let num_shots = raw_bits.len() / stride_bits;
    let mut bits = Vec::with_capacity(num_shots * bits_per_shot);
    for shot in raw_bits.chunks_exact(stride_bits) {
        bits.extend(shot[..bits_per_shot].iter().map(|b| *b as u8));
    }
    debug!(
        num_shots,
        bits_per_shot,
        layout_version = LAYOUT_VERSION,
        "sliced .b8 records"
    );

    Ok(SampleBatch::from_bits(layout, bits)?)
}

/// Writes `batch` as a Stim .b8 file, one byte-padded shot after another.
pub fn write_b8_file<P: AsRef<Path>>(path: P, batch: &SampleBatch) -> Result<()> {
    let mut file = BufWriter::new(File::create(path).context("Failed to create .b8 file")?);
    let mut buffer = Vec::with_capacity(batch.record_len().div_ceil(8) * 1024);

    for record in batch.records() {
        for chunk in record.chunks(8) {
            let mut byte = 0u8;
            for (i, &bit) in chunk.iter().enumerate() {
                if bit & 1 == 1 {
                    byte |= 1 << i;
                }
            }
            buffer.push(byte);
        }

        if buffer.len() >= 1024 * 1024 {
            file.write_all(&buffer)?;
            buffer.clear();
        }
    }
    file.write_all(&buffer)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_skips_padding() {
        // Layout (3, 1): five bits per shot, padded to one byte.
        let raw = BitVec::<u8, Lsb0>::from_vec(vec![0b1110_0101, 0b0001_1010]);
        let batch = slice_records(&raw, RecordLayout::new(3, 1)).unwrap();
        assert_eq!(batch.trials(), 2);
        assert_eq!(batch.record(0), &[1, 0, 1, 0, 0]);
        assert_eq!(batch.record(1), &[0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_slice_rejects_truncated_data() {
        // Layout (5, 2): 13 bits per shot, two bytes each.
        let raw = BitVec::<u8, Lsb0>::from_vec(vec![0; 3]);
        assert!(slice_records(&raw, RecordLayout::new(5, 2)).is_err());
    }
}
