//! One random-mate contraction iteration.

use crate::config::Config;
use crate::error::Result;
use crate::ops::{join, map, ExternalSorter};
use crate::types::{by_field, Linked};
use log::info;
use rand::Rng;

/// Halves the weighted list in expectation: flags every node with a coin
/// flip, splices out each node whose flip beats its successor's, and folds
/// the spliced edge weights into the surviving predecessors. Writes the
/// iteration trace and the next weighted list; returns the survivor count.
pub fn contract<R: Rng>(config: &Config, iter: u32, rng: &mut R) -> Result<u32> {
    let flagged = config.join_result();
    map::<3, 4, _>(&config.weighted(iter), &flagged, config.budget, true, |w| {
        Some([w[0], w[1], w[2], rng.gen_range(0..2)])
    })?;

    // The same records keyed two ways: position t of the by-successor view
    // holds the edge entering the node that position t of the by-node view
    // starts from, so each position pairs a node with its predecessor.
    let mut sorter = ExternalSorter::<4>::new(config.budget, config.merge_rank)?;
    sorter.sort_by(&flagged, &config.join_left(), &config.dir, by_field(1))?;
    sorter.sort_by(&flagged, &config.join_right(), &config.dir, by_field(0))?;
    join::<4, 4, 6, _>(
        &config.join_left(),
        &config.join_right(),
        &flagged,
        config.budget,
        |pred, node| [pred[0], pred[1], node[1], pred[2], pred[3], node[3]],
    )?;

    // The joined stream comes out keyed by successor; the by-node view and
    // it pair every node with its predecessor's row.
    let mut sorter = ExternalSorter::<6>::new(config.budget, config.merge_rank)?;
    sorter.sort_by(&flagged, &config.join_left(), &config.dir, by_field(0))?;
    join::<6, 6, 7, _>(
        &config.join_left(),
        &flagged,
        &config.trace(iter),
        config.budget,
        |node, pred| [pred[0], dying(pred), pred[3], node[0], node[1], dying(node), node[3]],
    )?;

    let survivors = map::<7, 3, _>(
        &config.trace(iter),
        &config.weighted(iter + 1),
        config.budget,
        true,
        |t| match (t[1], t[5]) {
            (0, 0) => Some([t[0], t[3], t[2]]),
            (0, 1) => Some([t[0], t[4], t[2] + t[6]]),
            // A dying predecessor's edge is re-emitted by its own row.
            _ => None,
        },
    )?;
    info!("contraction {}: {} survivors", iter, survivors);
    Ok(survivors)
}

/// Whether the row's origin node loses this round: its flip is set and its
/// successor's is not, which makes dying nodes an independent set.
fn dying(row: &Linked) -> u32 {
    row[4] & (1 - row[5])
}
