//! Molecule table and struct layout.
//!
//! A table is `total_size | offset_0 .. offset_{n-1} | field_0 .. field_{n-1}`,
//! every header word a little-endian `u32`. `total_size` is the length of the
//! whole buffer and each offset is the absolute position of its field. A
//! struct is the plain concatenation of its fixed-size fields.

use std::convert::TryInto;

use crate::error::{Error, Result};

pub use ::molecule::{pack_number, unpack_number, Number, NUMBER_SIZE};

/// Header word at `pos`, bounds-checked before `unpack_number`.
fn read_number(buf: &[u8], pos: usize) -> Result<usize> {
    let word = buf.get(pos..pos + NUMBER_SIZE).ok_or_else(|| {
        Error::malformed(format!(
            "header word at {} out of bounds of {} bytes",
            pos,
            buf.len()
        ))
    })?;
    Ok(unpack_number(word) as usize)
}

fn pack_size(n: usize) -> [u8; NUMBER_SIZE] {
    pack_number(n as Number)
}

pub fn encode_table<T: AsRef<[u8]>>(fields: &[T]) -> Vec<u8> {
    let header_size = NUMBER_SIZE * (fields.len() + 1);
    let total_size = header_size + fields.iter().map(|f| f.as_ref().len()).sum::<usize>();

    let mut buf = Vec::with_capacity(total_size);
    buf.extend_from_slice(&pack_size(total_size));
    let mut offset = header_size;
    for field in fields {
        buf.extend_from_slice(&pack_size(offset));
        offset += field.as_ref().len();
    }
    for field in fields {
        buf.extend_from_slice(field.as_ref());
    }
    buf
}

/// Number of fields declared by a table header.
pub fn table_field_count(buf: &[u8]) -> Result<usize> {
    let total_size = read_number(buf, 0)?;
    if total_size != buf.len() {
        return Err(Error::malformed(format!(
            "total size {} != buffer length {}",
            total_size,
            buf.len()
        )));
    }
    if total_size == NUMBER_SIZE {
        return Ok(0);
    }
    let header_size = read_number(buf, NUMBER_SIZE)?;
    if header_size % NUMBER_SIZE != 0 || header_size < NUMBER_SIZE * 2 {
        return Err(Error::malformed(format!(
            "invalid first offset {}",
            header_size
        )));
    }
    if header_size > total_size {
        return Err(Error::malformed(format!(
            "header size {} exceeds total size {}",
            header_size, total_size
        )));
    }
    Ok(header_size / NUMBER_SIZE - 1)
}

pub fn decode_table(buf: &[u8], field_count: usize) -> Result<Vec<&[u8]>> {
    let actual_count = table_field_count(buf)?;
    if actual_count != field_count {
        return Err(Error::malformed(format!(
            "expected {} fields, header declares {}",
            field_count, actual_count
        )));
    }

    let mut offsets = (1..=field_count)
        .map(|i| read_number(buf, NUMBER_SIZE * i))
        .collect::<Result<Vec<_>>>()?;
    offsets.push(buf.len());

    let mut fields = Vec::with_capacity(field_count);
    for (i, window) in offsets.windows(2).enumerate() {
        let (start, end) = (window[0], window[1]);
        if start > end {
            return Err(Error::malformed(format!(
                "offset {} of field {} is greater than next offset {}",
                start, i, end
            )));
        }
        if end > buf.len() {
            return Err(Error::malformed(format!(
                "offset {} out of bounds of {} bytes",
                end,
                buf.len()
            )));
        }
        fields.push(&buf[start..end]);
    }
    Ok(fields)
}

pub fn encode_fixed_bytes(value: &[u8], width: usize) -> Result<Vec<u8>> {
    if value.len() != width {
        return Err(Error::length_mismatch(width, value.len()));
    }
    Ok(value.to_vec())
}

pub fn encode_variable_bytes(value: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(NUMBER_SIZE + value.len());
    buf.extend_from_slice(&pack_size(value.len()));
    buf.extend_from_slice(value);
    buf
}

pub fn decode_variable_bytes(buf: &[u8]) -> Result<&[u8]> {
    let len = read_number(buf, 0)?;
    if NUMBER_SIZE + len != buf.len() {
        return Err(Error::malformed(format!(
            "bytes header declares {} bytes, {} available",
            len,
            buf.len().saturating_sub(NUMBER_SIZE)
        )));
    }
    Ok(&buf[NUMBER_SIZE..])
}

/// Little-endian in exactly `width` bytes, `width` in `1..=16`.
pub fn encode_uint(value: u128, width: usize) -> Result<Vec<u8>> {
    if width == 0 || width > 16 {
        return Err(Error::length_mismatch(16, width));
    }
    if width < 16 && value >> (width * 8) != 0 {
        return Err(Error::IntegerTooLarge {
            field: "value".to_string(),
            width,
            value,
        });
    }
    Ok(value.to_le_bytes()[..width].to_vec())
}

pub fn decode_uint(bytes: &[u8]) -> Result<u128> {
    if bytes.is_empty() || bytes.len() > 16 {
        return Err(Error::length_mismatch(16, bytes.len()));
    }
    let mut buf = [0u8; 16];
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(u128::from_le_bytes(buf))
}

/// Cursor over the fixed-size fields of a molecule struct.
pub struct StructReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> StructReader<'a> {
    pub fn new(buf: &'a [u8], size: usize) -> Result<Self> {
        if buf.len() != size {
            return Err(Error::length_mismatch(size, buf.len()));
        }
        Ok(StructReader { buf, pos: 0 })
    }

    pub fn read(&mut self, width: usize) -> Result<&'a [u8]> {
        let end = self.pos + width;
        let field = self
            .buf
            .get(self.pos..end)
            .ok_or_else(|| Error::length_mismatch(end, self.buf.len()))?;
        self.pos = end;
        Ok(field)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let field = self.read(N)?;
        field
            .try_into()
            .map_err(|_| Error::length_mismatch(N, field.len()))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    pub fn read_u128(&mut self) -> Result<u128> {
        self.read_array().map(u128::from_le_bytes)
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}
