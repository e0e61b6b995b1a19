//! External merge sort over fixed-width records.

use crate::config;
use crate::error::{Error, Result};
use crate::ops::run_pool::RunPool;
use crate::stream::{self, record_bytes};
use log::debug;
use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

/// One open input of a k-way merge.
struct Source<'a, const K: usize> {
    reader: BufReader<&'a File>,
    remaining: u32,
    current: Option<[u32; K]>,
}

impl<'a, const K: usize> Source<'a, K> {
    fn open(file: &'a File, capacity: usize) -> Result<Self> {
        let mut reader = BufReader::with_capacity(capacity, file);
        let remaining = stream::read_count(&mut reader)?;
        Ok(Self {
            reader,
            remaining,
            current: None,
        })
    }

    fn fill(&mut self) -> Result<Option<&[u32; K]>> {
        if self.current.is_none() && self.remaining > 0 {
            self.current = Some(stream::read_record(&mut self.reader)?);
            self.remaining -= 1;
        }
        Ok(self.current.as_ref())
    }
}

/// K-way external merge sorter for records of arity `K`.
///
/// During the merge phase each of the `rank` inputs reads through a buffer
/// of `budget / (2 * rank)` bytes and the output writes through
/// `budget / 2`; the split phase sorts chunks of `budget / record` records.
pub struct ExternalSorter<const K: usize> {
    ram: Vec<[u32; K]>,
    budget: usize,
    rank: usize,
    write_header: bool,
}

impl<const K: usize> ExternalSorter<K> {
    pub fn new(budget: usize, rank: usize) -> Result<Self> {
        if rank < config::MIN_MERGE_RANK || budget / (2 * rank) < record_bytes(K) {
            return Err(Error::Budget(budget));
        }
        Ok(Self {
            ram: Vec::new(),
            budget,
            rank,
            write_header: true,
        })
    }

    /// Suppresses the length prefix on the final output.
    pub fn headerless(mut self) -> Self {
        self.write_header = false;
        self
    }

    /// Sorts the stream at `input` into `output` under `cmp`, spilling
    /// length-prefixed runs into `dir`.
    pub fn sort_by<F>(&mut self, input: &Path, output: &Path, dir: &Path, cmp: F) -> Result<u32>
    where
        F: Fn(&[u32; K], &[u32; K]) -> Ordering + Copy,
    {
        let mut pool = self.split(input, dir, cmp)?;
        let block = self.budget / (2 * self.rank);
        let mut out = BufWriter::with_capacity(self.budget / 2, File::create(output)?);

        let mut result = pool.get()?;
        if pool.is_empty() {
            // Nothing was split: the input was empty. Copy its header through.
            let in_file = File::open(input)?;
            let mut sources = vec![Source::open(&in_file, block)?];
            let total = merge(&mut sources, &mut out, cmp, self.write_header)?;
            out.flush()?;
            return Ok(total);
        }
        while pool.len() > 1 {
            let mut used = Vec::with_capacity(self.rank);
            while used.len() < self.rank && !pool.is_empty() {
                used.push(pool.get()?);
            }
            {
                let mut sources = Vec::with_capacity(used.len());
                for run in &used {
                    sources.push(Source::open(&run.file, block)?);
                }
                (&result.file).seek(SeekFrom::Start(0))?;
                let mut writer = BufWriter::with_capacity(self.budget / 2, &result.file);
                merge(&mut sources, &mut writer, cmp, true)?;
                writer.flush()?;
            }
            pool.put(result);
            result = used.remove(0);
            // The rest of `used` drops here, releasing those run names.
        }

        let last = pool.get()?;
        let mut sources = vec![Source::open(&last.file, self.budget / 2)?];
        let total = merge(&mut sources, &mut out, cmp, self.write_header)?;
        out.flush()?;
        Ok(total)
    }

    /// Partitions the input into sorted, length-prefixed runs of at most
    /// `budget / record` records, plus one empty run seeding the merge.
    fn split<F>(&mut self, input: &Path, dir: &Path, cmp: F) -> Result<RunPool>
    where
        F: Fn(&[u32; K], &[u32; K]) -> Ordering + Copy,
    {
        let chunk = self.budget / record_bytes(K);
        let block = self.budget / (2 * self.rank);
        let mut reader = BufReader::with_capacity(self.budget / 2, File::open(input)?);
        let count = stream::read_count(&mut reader)? as usize;
        let runs = (count + chunk - 1) / chunk;
        let mut pool = RunPool::create(dir, runs + 1)?;

        let mut remaining = count;
        for _ in 0..runs {
            let take = remaining.min(chunk);
            self.ram.clear();
            for _ in 0..take {
                self.ram.push(stream::read_record(&mut reader)?);
            }
            self.ram.sort_unstable_by(|a, b| cmp(a, b));
            let run = pool.get()?;
            {
                let mut writer = BufWriter::with_capacity(block, &run.file);
                stream::write_count(&mut writer, take as u32)?;
                for record in &self.ram {
                    stream::write_record(&mut writer, record)?;
                }
                writer.flush()?;
            }
            pool.put(run);
            remaining -= take;
        }
        debug!("split {} records into {} runs", count, runs);
        Ok(pool)
    }
}

/// Merges the sources under `cmp` by linear scan over the open records.
fn merge<W: Write, F, const K: usize>(
    sources: &mut [Source<K>],
    out: &mut W,
    cmp: F,
    with_header: bool,
) -> Result<u32>
where
    F: Fn(&[u32; K], &[u32; K]) -> Ordering + Copy,
{
    let total = sources.iter().map(|s| s.remaining).sum::<u32>();
    if with_header {
        stream::write_count(out, total)?;
    }
    loop {
        let mut min: Option<(usize, [u32; K])> = None;
        for at in 0..sources.len() {
            let record = match sources[at].fill()? {
                Some(&record) => record,
                None => continue,
            };
            min = match min {
                Some((best, smallest)) if cmp(&record, &smallest) != Ordering::Less => {
                    Some((best, smallest))
                }
                _ => Some((at, record)),
            };
        }
        match min {
            Some((at, record)) => {
                sources[at].current = None;
                stream::write_record(out, &record)?;
            }
            None => break,
        }
    }
    Ok(total)
}
