//! Parser for `.01` measurement-record files.
//!
//! The format is Stim's `01` sample output: each line is one shot, each
//! character is one measurement outcome in record order. Blank trailing
//! lines are ignored.

use anyhow::{Context, Result, anyhow, ensure};
use nom::IResult;
use nom::bytes::complete::take_while1;
use nom::character::complete::{line_ending, multispace0};
use nom::combinator::{all_consuming, map};
use nom::multi::separated_list0;
use nom::sequence::terminated;
use rqec_common::layout::RecordLayout;
use rqec_core::SampleBatch;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

fn shot(input: &str) -> IResult<&str, Vec<u8>> {
    map(take_while1(|c: char| c == '0' || c == '1'), |s: &str| {
        s.bytes().map(|b| b - b'0').collect()
    })(input)
}

fn shots(input: &str) -> IResult<&str, Vec<Vec<u8>>> {
    all_consuming(terminated(separated_list0(line_ending, shot), multispace0))(input)
}

/// Parses `.01` text into records of `layout`.
///
/// # Returns
///
/// The batch, or an error naming the first line whose length differs from
/// the layout's record length, or any character other than `0`/`1`.
pub fn parse_01(text: &str, layout: RecordLayout) -> Result<SampleBatch> {
    let (_, lines) = shots(text).map_err(|e| anyhow!("malformed .01 data: {e}"))?;

    let record_len = layout.record_len();
    let mut bits = Vec::with_capacity(lines.len() * record_len);
    for (i, line) in lines.iter().enumerate() {
        ensure!(
            line.len() == record_len,
            "shot {} has {} measurements, expected {}",
            i + 1,
            line.len(),
            record_len
        );
        bits.extend_from_slice(line);
    }
    Ok(SampleBatch::from_bits(layout, bits)?)
}

/// Loads a `.01` file into records of `layout`.
pub fn load_01_file<P: AsRef<Path>>(path: P, layout: RecordLayout) -> Result<SampleBatch> {
    let text = fs::read_to_string(path).context("Failed to open .01 file")?;
    parse_01(&text, layout)
}

/// Writes `batch` as a `.01` file, one line per shot.
pub fn write_01_file<P: AsRef<Path>>(path: P, batch: &SampleBatch) -> Result<()> {
    let mut file = BufWriter::new(File::create(path).context("Failed to create .01 file")?);
    let mut line = String::with_capacity(batch.record_len() + 1);
    for record in batch.records() {
        line.clear();
        line.extend(record.iter().map(|&b| if b & 1 == 1 { '1' } else { '0' }));
        line.push('\n');
        file.write_all(line.as_bytes())?;
    }
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let batch = parse_01("10100\n01011\n", RecordLayout::new(3, 1)).unwrap();
        assert_eq!(batch.trials(), 2);
        assert_eq!(batch.record(0), &[1, 0, 1, 0, 0]);
        assert_eq!(batch.record(1), &[0, 1, 0, 1, 1]);
    }

    #[test]
    fn test_parse_without_trailing_newline_and_crlf() {
        let batch = parse_01("000\r\n111", RecordLayout::new(3, 0)).unwrap();
        assert_eq!(batch.trials(), 2);
        assert_eq!(batch.record(1), &[1, 1, 1]);
    }

    #[test]
    fn test_empty_input_has_no_shots() {
        let batch = parse_01("", RecordLayout::new(3, 2)).unwrap();
        assert_eq!(batch.trials(), 0);
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert!(parse_01("10x00\n", RecordLayout::new(3, 1)).is_err());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = parse_01("10100\n0101\n", RecordLayout::new(3, 1)).unwrap_err();
        assert!(err.to_string().contains("shot 2"));
    }
}
