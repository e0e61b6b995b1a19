//! Rank normalization and the final projection.

use crate::config::Config;
use crate::error::Result;
use crate::ops::{map, ExternalSorter};
use crate::stream;
use crate::types::{by_field, Pair};
use std::fs::File;
use std::io::BufReader;

/// Rotates every rank so the smallest identifier leads, orders the nodes
/// by rank, and writes the identifiers headerless to `output.bin`.
pub fn finalize(config: &Config, total: u32) -> Result<()> {
    // The full ranking is sorted by identifier, so its first record holds
    // the smallest identifier; its rank is the rotation offset.
    let mut reader = BufReader::new(File::open(config.ranked(0))?);
    stream::read_count(&mut reader)?;
    let first: Pair = stream::read_record(&mut reader)?;
    let offset = first[1];
    drop(reader);

    map::<2, 2, _>(&config.ranked(0), &config.join_left(), config.budget, true, |r| {
        Some([
            r[0],
            ((r[1] as u64 + total as u64 - offset as u64) % total as u64) as u32,
        ])
    })?;
    let mut sorter = ExternalSorter::<2>::new(config.budget, config.merge_rank)?;
    sorter.sort_by(&config.join_left(), &config.join_right(), &config.dir, by_field(1))?;
    map::<2, 1, _>(&config.join_right(), &config.output(), config.budget, false, |r| {
        Some([r[0]])
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::write_all;

    #[test]
    fn test_rotates_to_smallest_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        // Ranks from an arbitrary head; node 1 sits at rank 2.
        write_all(&config.ranked(0), &[[1u32, 2], [2, 0], [3, 1]]).unwrap();

        finalize(&config, 3).unwrap();
        // 1 leads, then the cycle continues 2, 3 from the old head.
        assert_eq!(
            std::fs::read(config.output()).unwrap(),
            [1, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0]
        );
    }
}
