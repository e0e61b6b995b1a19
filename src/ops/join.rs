//! Lockstep joins over key-sorted streams.

use crate::error::{Error, Result};
use crate::stream::{self, record_bytes};
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

/// Positional join: both inputs hold the same record count, and position t
/// of each is the pair to combine. Emits one record per position.
pub fn join<const L: usize, const R: usize, const T: usize, F>(
    left: &Path,
    right: &Path,
    output: &Path,
    budget: usize,
    mut combine: F,
) -> Result<u32>
where
    F: FnMut(&[u32; L], &[u32; R]) -> [u32; T],
{
    let (l_cap, r_cap, t_cap) = split_budget(budget, L, R, T)?;
    let mut lhs = BufReader::with_capacity(l_cap, File::open(left)?);
    let mut rhs = BufReader::with_capacity(r_cap, File::open(right)?);
    let mut out = BufWriter::with_capacity(t_cap, File::create(output)?);

    let count = stream::read_count(&mut lhs)?;
    let right_count = stream::read_count(&mut rhs)?;
    debug_assert_eq!(count, right_count);
    stream::write_count(&mut out, count)?;
    for _ in 0..count {
        let l = stream::read_record::<_, L>(&mut lhs)?;
        let r = stream::read_record::<_, R>(&mut rhs)?;
        stream::write_record(&mut out, &combine(&l, &r))?;
    }
    out.flush()?;
    Ok(count)
}

/// Left-join: the left stream drives; the combiner sees the current right
/// record (`None` once the right side is exhausted), decides what to emit,
/// and signals whether the right record was consumed. The right cursor
/// holds still otherwise, staying aligned for the next left key.
pub fn left_join<const L: usize, const R: usize, const T: usize, F>(
    left: &Path,
    right: &Path,
    output: &Path,
    budget: usize,
    mut combine: F,
) -> Result<u32>
where
    F: FnMut(&[u32; L], Option<&[u32; R]>) -> (Option<[u32; T]>, bool),
{
    let (l_cap, r_cap, t_cap) = split_budget(budget, L, R, T)?;
    let mut lhs = BufReader::with_capacity(l_cap, File::open(left)?);
    let mut rhs = BufReader::with_capacity(r_cap, File::open(right)?);
    let mut out = BufWriter::with_capacity(t_cap, File::create(output)?);

    let count = stream::read_count(&mut lhs)?;
    let mut right_remaining = stream::read_count(&mut rhs)?;
    stream::write_count(&mut out, count)?;

    let mut held: Option<[u32; R]> = None;
    let mut emitted = 0u32;
    for _ in 0..count {
        let l = stream::read_record::<_, L>(&mut lhs)?;
        if held.is_none() && right_remaining > 0 {
            held = Some(stream::read_record(&mut rhs)?);
            right_remaining -= 1;
        }
        let (target, consumed) = combine(&l, held.as_ref());
        if let Some(target) = target {
            stream::write_record(&mut out, &target)?;
            emitted += 1;
        }
        if consumed {
            held = None;
        }
    }
    if emitted != count {
        out.seek(SeekFrom::Start(0))?;
        stream::write_count(&mut out, emitted)?;
    }
    out.flush()?;
    Ok(emitted)
}

fn split_budget(budget: usize, l: usize, r: usize, t: usize) -> Result<(usize, usize, usize)> {
    let l_cap = budget * l / (l + r + t);
    let r_cap = budget * r / (l + r + t);
    let t_cap = budget - l_cap - r_cap;
    if l_cap < record_bytes(l) || r_cap < record_bytes(r) || t_cap < record_bytes(t) {
        return Err(Error::Budget(budget));
    }
    Ok((l_cap, r_cap, t_cap))
}
