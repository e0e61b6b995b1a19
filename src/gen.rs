//! Random cyclic-list fixtures.

use crate::config::Config;
use crate::error::Result;
use crate::stream;
use crate::types::NodeId;
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Writes a shuffled random cycle over `1..=size` to `input.bin`, and the
/// expected traversal order, headerless, to `output.expected.bin`.
pub fn generate<R: Rng>(config: &Config, size: u32, rng: &mut R) -> Result<()> {
    if size == 0 {
        stream::write_all::<2>(&config.input(), &[])?;
        File::create(config.expected())?;
        return Ok(());
    }

    let mut order: Vec<NodeId> = (1..=size).collect();
    order.shuffle(rng);

    let mut edges: Vec<[u32; 2]> = order
        .iter()
        .copied()
        .circular_tuple_windows()
        .map(|(from, to)| [from, to])
        .collect();
    edges.shuffle(rng);
    stream::write_all(&config.input(), &edges)?;

    let start = order.iter().position_min().expect("empty order");
    let mut writer = BufWriter::new(File::create(config.expected())?);
    for t in 0..size as usize {
        stream::write_record(&mut writer, &[order[(start + t) % size as usize]])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::read_all;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeSet;

    #[test]
    fn test_generates_one_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        generate(&config, 50, &mut StdRng::seed_from_u64(3)).unwrap();

        let edges = read_all::<2>(&config.input()).unwrap();
        assert_eq!(edges.len(), 50);
        let froms: BTreeSet<u32> = edges.iter().map(|e| e[0]).collect();
        let tos: BTreeSet<u32> = edges.iter().map(|e| e[1]).collect();
        assert_eq!(froms, (1..=50).collect::<BTreeSet<u32>>());
        assert_eq!(tos, froms);

        // Following the successors from 1 visits every node once.
        let next: std::collections::HashMap<u32, u32> =
            edges.iter().map(|e| (e[0], e[1])).collect();
        let mut seen = BTreeSet::new();
        let mut at = 1u32;
        for _ in 0..50 {
            assert!(seen.insert(at));
            at = next[&at];
        }
        assert_eq!(at, 1);
    }

    #[test]
    fn test_expected_is_rotation_from_minimum() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        generate(&config, 8, &mut StdRng::seed_from_u64(9)).unwrap();

        let expected = std::fs::read(config.expected()).unwrap();
        assert_eq!(expected.len(), 8 * 4);
        assert_eq!(&expected[..4], [1, 0, 0, 0]);
    }

    #[test]
    fn test_self_loop_fixture() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path());
        generate(&config, 1, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(read_all::<2>(&config.input()).unwrap(), vec![[1, 1]]);
        assert_eq!(std::fs::read(config.expected()).unwrap(), [1, 0, 0, 0]);
    }
}
