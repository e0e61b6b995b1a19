//! Streaming map/filter over record streams.

use crate::error::{Error, Result};
use crate::stream::{self, record_bytes};
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

/// Applies `f` to every record of `input`, writing the survivors to
/// `output`, and returns the emitted count. A provisional header holding
/// the input count is rewritten with the true count once the stream ends;
/// with `with_header` off the output carries no header at all.
pub fn map<const A: usize, const B: usize, F>(
    input: &Path,
    output: &Path,
    budget: usize,
    with_header: bool,
    mut f: F,
) -> Result<u32>
where
    F: FnMut(&[u32; A]) -> Option<[u32; B]>,
{
    let (in_cap, out_cap) = split_budget(budget, A, B)?;
    let mut reader = BufReader::with_capacity(in_cap, File::open(input)?);
    let mut writer = BufWriter::with_capacity(out_cap, File::create(output)?);

    let count = stream::read_count(&mut reader)?;
    if with_header {
        stream::write_count(&mut writer, count)?;
    }
    let mut emitted = 0u32;
    for _ in 0..count {
        let record = stream::read_record::<_, A>(&mut reader)?;
        if let Some(target) = f(&record) {
            stream::write_record(&mut writer, &target)?;
            emitted += 1;
        }
    }
    if with_header {
        writer.seek(SeekFrom::Start(0))?;
        stream::write_count(&mut writer, emitted)?;
    }
    writer.flush()?;
    Ok(emitted)
}

fn split_budget(budget: usize, a: usize, b: usize) -> Result<(usize, usize)> {
    let in_cap = budget * a / (a + b);
    let out_cap = budget - in_cap;
    if in_cap < record_bytes(a) || out_cap < record_bytes(b) {
        return Err(Error::Budget(budget));
    }
    Ok((in_cap, out_cap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{read_all, write_all};

    const BUDGET: usize = 256;

    #[test]
    fn test_identity_preserves_stream() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        let records = vec![[4u32, 1], [2, 9], [7, 7]];
        write_all(&input, &records).unwrap();

        let emitted = map::<2, 2, _>(&input, &output, BUDGET, true, |r| Some(*r)).unwrap();
        assert_eq!(emitted, 3);
        assert_eq!(
            std::fs::read(&input).unwrap(),
            std::fs::read(&output).unwrap()
        );
    }

    #[test]
    fn test_filter_rewrites_header() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        write_all(&input, &[[1u32], [2], [3], [4]]).unwrap();

        let emitted = map::<1, 1, _>(&input, &output, BUDGET, true, |r| {
            if r[0] % 2 == 0 {
                Some(*r)
            } else {
                None
            }
        })
        .unwrap();
        assert_eq!(emitted, 2);
        assert_eq!(read_all::<1>(&output).unwrap(), vec![[2], [4]]);
    }

    #[test]
    fn test_widening_and_headerless() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        write_all(&input, &[[5u32, 6]]).unwrap();

        let emitted =
            map::<2, 3, _>(&input, &output, BUDGET, false, |r| Some([r[0], r[1], 1])).unwrap();
        assert_eq!(emitted, 1);
        // No header: just one packed record.
        assert_eq!(
            std::fs::read(&output).unwrap(),
            [5, 0, 0, 0, 6, 0, 0, 0, 1, 0, 0, 0]
        );
    }

    #[test]
    fn test_budget_too_small() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bin");
        let output = dir.path().join("out.bin");
        write_all(&input, &[[1u32, 2]]).unwrap();
        assert!(matches!(
            map::<2, 2, _>(&input, &output, 15, true, |r| Some(*r)),
            Err(Error::Budget(15))
        ));
    }
}
