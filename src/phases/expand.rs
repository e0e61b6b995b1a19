//! Rank reconstruction, one trace file at a time.

use crate::config::Config;
use crate::error::Result;
use crate::ops::{left_join, map, ExternalSorter};
use crate::types::by_field;
use log::debug;

/// Rebuilds the ranks of every node alive at iteration `iter` from the
/// ranks of that iteration's survivors. `total` is the full list length,
/// the modulus for all rank arithmetic.
pub fn expand(config: &Config, iter: u32, total: u32) -> Result<u32> {
    let ranked_next = config.ranked(iter + 1);

    // Attach r(j) where j survived. A row whose j died finds no match and
    // carries a placeholder through; the right cursor holds still so the
    // next surviving j lines up. The placeholder is read only behind a
    // dying-predecessor flag, which forces j alive.
    left_join::<7, 2, 8, _>(
        &config.trace(iter),
        &ranked_next,
        &config.join_result(),
        config.budget,
        |t, r| match r {
            Some(r) if r[0] == t[3] => {
                (Some([t[0], t[1], t[2], t[3], t[4], t[5], t[6], r[1]]), true)
            }
            _ => (Some([t[0], t[1], t[2], t[3], t[4], t[5], t[6], 0]), false),
        },
    )?;

    let mut sorter = ExternalSorter::<8>::new(config.budget, config.merge_rank)?;
    sorter.sort_by(&config.join_result(), &config.join_left(), &config.dir, by_field(0))?;

    // Attach r(p(j)) the same way, now keyed by the predecessor.
    left_join::<8, 2, 9, _>(
        &config.join_left(),
        &ranked_next,
        &config.join_result(),
        config.budget,
        |e, r| match r {
            Some(r) if r[0] == e[0] => (
                Some([e[0], e[1], e[2], e[3], e[4], e[5], e[6], e[7], r[1]]),
                true,
            ),
            _ => (
                Some([e[0], e[1], e[2], e[3], e[4], e[5], e[6], e[7], 0]),
                false,
            ),
        },
    )?;

    // A surviving predecessor keeps its rank; a dying one sits w(p(j))
    // hops before its successor, wrapping across the head.
    let ranked = map::<9, 2, _>(
        &config.join_result(),
        &config.ranked(iter),
        config.budget,
        true,
        |x| {
            let rank = if x[1] == 0 {
                x[8]
            } else {
                ((x[7] as u64 + total as u64 - x[2] as u64) % total as u64) as u32
            };
            Some([x[0], rank])
        },
    )?;
    debug!("expansion {}: {} nodes ranked", iter, ranked);
    Ok(ranked)
}
