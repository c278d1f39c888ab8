// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Structural check of column chunks before rows are read.
//!
//! The row reader trusts page headers: a corrupt page type or size makes it
//! panic or size buffers from the header alone. Every page header of every
//! chunk is walked here first and checked against the bytes actually present.

use parquet::basic::Compression;
use parquet::file::metadata::{ColumnChunkMetaData, ParquetMetaData};
use parquet::format::{PageHeader, PageType};
use parquet::thrift::{TCompactSliceInputProtocol, TSerializable};

use super::CODEC_NAME;
use crate::core::{CodecError, Result};

/// Leading magic bytes of a Parquet file.
const MAGIC_LEN: usize = 4;
/// Footer tail: metadata length (u32 LE) followed by the magic bytes.
const TAIL_LEN: usize = 8;

fn malformed(message: impl Into<String>) -> CodecError {
    CodecError::decode(CODEC_NAME, format!("malformed file: {}", message.into()))
}

/// Check every page of every column chunk in `data` against `metadata`.
pub(super) fn validate(data: &[u8], metadata: &ParquetMetaData) -> Result<()> {
    let data_end = data_end(data)?;
    for (index, group) in metadata.row_groups().iter().enumerate() {
        let rows = group.num_rows();
        if rows < 0 {
            return Err(malformed(format!("row group {index} has {rows} rows")));
        }
        for column in group.columns() {
            let values = validate_chunk(data, data_end, column)?;
            if values != rows {
                return Err(malformed(format!(
                    "column '{}' holds {values} values for {rows} rows",
                    column.column_path()
                )));
            }
        }
    }
    Ok(())
}

/// Offset where the footer metadata starts.
fn data_end(data: &[u8]) -> Result<usize> {
    let tail = data
        .len()
        .checked_sub(TAIL_LEN)
        .filter(|&tail| tail >= MAGIC_LEN)
        .ok_or_else(|| malformed("file shorter than its magic bytes"))?;
    let mut len = [0_u8; 4];
    len.copy_from_slice(&data[tail..tail + 4]);
    let metadata_len = u32::from_le_bytes(len) as usize;
    tail.checked_sub(metadata_len)
        .filter(|&end| end >= MAGIC_LEN)
        .ok_or_else(|| malformed("footer length exceeds file"))
}

/// Walk one chunk's pages; returns the number of values its data pages hold.
fn validate_chunk(data: &[u8], data_end: usize, column: &ColumnChunkMetaData) -> Result<i64> {
    let path = column.column_path().to_string();
    let start = match column.dictionary_page_offset() {
        Some(dict) if dict > 0 => dict.min(column.data_page_offset()),
        _ => column.data_page_offset(),
    };
    let start = usize::try_from(start)
        .ok()
        .filter(|&start| start >= MAGIC_LEN)
        .ok_or_else(|| malformed(format!("column '{path}' starts at offset {start}")))?;
    let end = usize::try_from(column.compressed_size())
        .ok()
        .and_then(|size| start.checked_add(size))
        .filter(|&end| end <= data_end)
        .ok_or_else(|| malformed(format!("column '{path}' extends past the data region")))?;

    let chunk_values = column.num_values();
    let uncompressed = column.compression() == Compression::UNCOMPRESSED;
    let mut pos = start;
    let mut values: i64 = 0;
    while pos < end {
        let remaining = &data[pos..end];
        let mut prot = TCompactSliceInputProtocol::new(remaining);
        let header = PageHeader::read_from_in_protocol(&mut prot)
            .map_err(|e| malformed(format!("column '{path}' page header: {e}")))?;
        pos += remaining.len() - prot.as_slice().len();

        let size = page_size(&header, end - pos, uncompressed)
            .map_err(|reason| malformed(format!("column '{path}' page at {pos}: {reason}")))?;
        values += page_values(&header, size, chunk_values)
            .map_err(|reason| malformed(format!("column '{path}' page at {pos}: {reason}")))?;
        pos += size;
    }
    if values != chunk_values {
        return Err(malformed(format!(
            "column '{path}' pages hold {values} values, metadata says {chunk_values}"
        )));
    }
    Ok(values)
}

/// Body size of a page, checked against the bytes left in its chunk.
fn page_size(header: &PageHeader, available: usize, uncompressed: bool) -> std::result::Result<usize, String> {
    let size = usize::try_from(header.compressed_page_size)
        .map_err(|_| format!("negative page size {}", header.compressed_page_size))?;
    if size > available {
        return Err(format!("page of {size} bytes with {available} left in chunk"));
    }
    if header.uncompressed_page_size < 0 {
        return Err(format!(
            "negative uncompressed size {}",
            header.uncompressed_page_size
        ));
    }
    if uncompressed && header.uncompressed_page_size != header.compressed_page_size {
        return Err(format!(
            "uncompressed chunk with page sizes {} and {}",
            header.compressed_page_size, header.uncompressed_page_size
        ));
    }
    Ok(size)
}

/// Values a page contributes to its chunk count; dictionary pages count none.
fn page_values(header: &PageHeader, size: usize, chunk_values: i64) -> std::result::Result<i64, String> {
    let counted = |n: i32| -> std::result::Result<i64, String> {
        let n = i64::from(n);
        if n <= 0 || n > chunk_values {
            return Err(format!("{n} values in a chunk of {chunk_values}"));
        }
        Ok(n)
    };
    match header.type_ {
        PageType::DATA_PAGE => {
            let page = header
                .data_page_header
                .as_ref()
                .ok_or("data page without its header")?;
            counted(page.num_values)
        }
        PageType::DATA_PAGE_V2 => {
            let page = header
                .data_page_header_v2
                .as_ref()
                .ok_or("data page without its header")?;
            let levels = i64::from(page.definition_levels_byte_length)
                + i64::from(page.repetition_levels_byte_length);
            if page.definition_levels_byte_length < 0
                || page.repetition_levels_byte_length < 0
                || levels > size as i64
            {
                return Err(format!("level bytes {levels} exceed page of {size}"));
            }
            counted(page.num_values)
        }
        PageType::DICTIONARY_PAGE => {
            let page = header
                .dictionary_page_header
                .as_ref()
                .ok_or("dictionary page without its header")?;
            if page.num_values < 0 || i64::from(page.num_values) > chunk_values {
                return Err(format!("dictionary of {} entries", page.num_values));
            }
            Ok(0)
        }
        other => Err(format!("unexpected page type {}", other.0)),
    }
}
