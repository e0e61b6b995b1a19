//! In-RAM ranking of the contracted base list.

use crate::config::Config;
use crate::error::Result;
use crate::stream;
use crate::types::Weighted;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Loads the surviving weighted list, walks it from its smallest surviving
/// identifier accumulating edge weights, and writes `(i, r(i))` sorted by
/// `i`. Returns the survivor count.
pub fn solve_base(config: &Config, iter: u32) -> Result<u32> {
    let mut list: Vec<Weighted> = stream::read_all(&config.weighted(iter))?;
    list.sort_unstable_by_key(|record| record[0]);

    let mut ranks = vec![0u32; list.len()];
    let mut at = 0usize;
    let mut rank = 0u32;
    for _ in 0..list.len() {
        ranks[at] = rank;
        rank += list[at][2];
        let next = list[at][1];
        at = list
            .binary_search_by_key(&next, |record| record[0])
            .expect("successor missing from the list");
    }

    let mut writer = BufWriter::new(File::create(config.ranked(iter))?);
    stream::write_count(&mut writer, list.len() as u32)?;
    for (record, &r) in list.iter().zip(&ranks) {
        stream::write_record(&mut writer, &[record[0], r])?;
    }
    writer.flush()?;
    info!("base: ranked {} survivors in memory", list.len());
    Ok(list.len() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{read_all, write_all};

    #[test]
    fn test_ranks_weighted_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        // 2 -> 5 -> 3 -> 2 with weights 1, 4, 2: ranks 0, 1, 5.
        write_all(&config.weighted(2), &[[5u32, 3, 4], [3, 2, 2], [2, 5, 1]]).unwrap();

        assert_eq!(solve_base(&config, 2).unwrap(), 3);
        assert_eq!(
            read_all::<2>(&config.ranked(2)).unwrap(),
            vec![[2, 0], [3, 5], [5, 1]]
        );
    }

    #[test]
    fn test_self_loop() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        write_all(&config.weighted(0), &[[6u32, 6, 1]]).unwrap();

        assert_eq!(solve_base(&config, 0).unwrap(), 1);
        assert_eq!(read_all::<2>(&config.ranked(0)).unwrap(), vec![[6, 0]]);
    }
}
