//! Length-prefixed streams of fixed-width little-endian records.

use crate::error::Result;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Bytes taken by the record count at the start of every stream.
pub const HEADER_BYTES: u64 = 4;

/// On-disk size of a record of the given arity.
pub fn record_bytes(arity: usize) -> usize {
    arity * 4
}

pub fn read_count<R: Read>(reader: &mut R) -> Result<u32> {
    Ok(reader.read_u32::<LittleEndian>()?)
}

pub fn write_count<W: Write>(writer: &mut W, count: u32) -> Result<()> {
    Ok(writer.write_u32::<LittleEndian>(count)?)
}

pub fn read_record<R: Read, const K: usize>(reader: &mut R) -> Result<[u32; K]> {
    let mut record = [0u32; K];
    reader.read_u32_into::<LittleEndian>(&mut record)?;
    Ok(record)
}

pub fn write_record<W: Write, const K: usize>(writer: &mut W, record: &[u32; K]) -> Result<()> {
    for &field in record {
        writer.write_u32::<LittleEndian>(field)?;
    }
    Ok(())
}

/// Reads a whole stream into memory. Only for streams known to fit.
pub fn read_all<const K: usize>(path: &Path) -> Result<Vec<[u32; K]>> {
    let mut reader = BufReader::new(File::open(path)?);
    let count = read_count(&mut reader)?;
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(read_record(&mut reader)?);
    }
    Ok(records)
}

pub fn write_all<const K: usize>(path: &Path, records: &[[u32; K]]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_count(&mut writer, records.len() as u32)?;
    for record in records {
        write_record(&mut writer, record)?;
    }
    writer.flush()?;
    Ok(())
}
