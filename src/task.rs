//! Pipeline orchestration.

use crate::config::Config;
use crate::error::Result;
use crate::ops::map;
use crate::phases::{contract, expand, finalize, solve_base};
use crate::stream::record_bytes;
use log::info;
use rand::Rng;
use std::fs::File;

/// Runs the full ranking pipeline, `input.bin` to `output.bin`: weight the
/// edges, contract until the list fits the budget, rank the base in RAM,
/// expand back through the traces, then normalize and emit.
pub fn run<R: Rng>(config: &Config, rng: &mut R) -> Result<()> {
    let total = map::<2, 3, _>(
        &config.input(),
        &config.weighted(0),
        config.budget,
        true,
        |edge| Some([edge[0], edge[1], 1]),
    )?;
    info!("ranking a list of {} nodes", total);
    if total == 0 {
        File::create(config.output())?;
        return Ok(());
    }

    // Contract while an iteration's widest working set outgrows the
    // budget; a list at or under the threshold goes straight to RAM.
    let mut iter = 0u32;
    let mut live = total;
    while live as u64 * record_bytes(6) as u64 > config.budget as u64 {
        live = contract(config, iter, rng)?;
        iter += 1;
    }
    solve_base(config, iter)?;
    for k in (0..iter).rev() {
        expand(config, k, total)?;
    }
    finalize(config, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::write_all;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        write_all::<2>(&config.input(), &[]).unwrap();

        run(&config, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(std::fs::read(config.output()).unwrap().is_empty());
    }

    #[test]
    fn test_in_ram_path_skips_contraction() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::new(dir.path());
        // Exactly at the threshold: 4 nodes through the widest record.
        config.budget = 4 * record_bytes(6);
        config.merge_rank = 2;
        write_all(&config.input(), &[[4u32, 2], [1, 4], [2, 3], [3, 1]]).unwrap();

        run(&config, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(!config.trace(0).exists());
        assert_eq!(
            std::fs::read(config.output()).unwrap(),
            [1, 0, 0, 0, 4, 0, 0, 0, 2, 0, 0, 0, 3, 0, 0, 0]
        );
    }
}
