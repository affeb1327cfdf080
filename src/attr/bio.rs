// Copyright 2026 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Big-endian reader and writer for attribute values.  Every read is bounds
//! checked and reports the offset at which it started.

use super::errors::Error;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Cursor};

pub const U24_MAX: u32 = 0x00FF_FFFF;

pub struct BioReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> BioReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(buf),
        }
    }

    pub fn position(&self) -> u32 {
        self.cursor.position() as u32
    }

    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    fn truncated(&self, field: &'static str) -> Error {
        Error::TruncatedField {
            field,
            offset: self.position(),
        }
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8, Error> {
        let offset = self.position();
        self.cursor
            .read_u8()
            .map_err(|_| Error::TruncatedField { field, offset })
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, Error> {
        if self.remaining() < 2 {
            return Err(self.truncated(field));
        }
        self.cursor
            .read_u16::<BigEndian>()
            .map_err(|_| self.truncated(field))
    }

    pub fn read_u24(&mut self, field: &'static str) -> Result<u32, Error> {
        if self.remaining() < 3 {
            return Err(self.truncated(field));
        }
        self.cursor
            .read_u24::<BigEndian>()
            .map_err(|_| self.truncated(field))
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, Error> {
        if self.remaining() < 4 {
            return Err(self.truncated(field));
        }
        self.cursor
            .read_u32::<BigEndian>()
            .map_err(|_| self.truncated(field))
    }

    /// Borrow the next `len` bytes of the underlying buffer
    pub fn read_data(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], Error> {
        if self.remaining() < len {
            return Err(self.truncated(field));
        }

        let start = self.cursor.position() as usize;
        let buf: &'a [u8] = *self.cursor.get_ref();
        let data = &buf[start..start + len];

        self.cursor.set_position((start + len) as u64);

        Ok(data)
    }

    pub fn read_remaining(&mut self) -> &'a [u8] {
        let start = (self.cursor.position() as usize).min(self.cursor.get_ref().len());
        let buf: &'a [u8] = *self.cursor.get_ref();

        self.cursor.set_position(buf.len() as u64);

        &buf[start..]
    }
}

/// Growable big-endian writer.  Values wider than their field are rejected
/// rather than truncated.
pub struct BioWriter {
    buf: Vec<u8>,
}

impl BioWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, v: u8, field: &'static str) -> Result<(), Error> {
        self.buf.write_u8(v).map_err(overflow(field))
    }

    pub fn write_u16(&mut self, v: u16, field: &'static str) -> Result<(), Error> {
        self.buf.write_u16::<BigEndian>(v).map_err(overflow(field))
    }

    pub fn write_u24(&mut self, v: u32, field: &'static str) -> Result<(), Error> {
        if v > U24_MAX {
            return Err(Error::FieldOverflow(field));
        }
        self.buf.write_u24::<BigEndian>(v).map_err(overflow(field))
    }

    pub fn write_u32(&mut self, v: u32, field: &'static str) -> Result<(), Error> {
        self.buf.write_u32::<BigEndian>(v).map_err(overflow(field))
    }

    pub fn write_data(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Write a 16-bit length followed by `data`
    pub fn write_data16(&mut self, data: &[u8], field: &'static str) -> Result<(), Error> {
        let len = u16::try_from(data.len()).map_err(|_| Error::FieldOverflow(field))?;
        self.write_u16(len, field)?;
        self.write_data(data);
        Ok(())
    }

    pub fn into_buf(self) -> Vec<u8> {
        self.buf
    }
}

// a Vec only refuses a write when it cannot grow
fn overflow(field: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |_| Error::FieldOverflow(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn read_fields() {
        let buf = hex!("01 0203 040506 0708090a 0b0c");
        let mut r = BioReader::new(&buf);

        assert_eq!(r.read_u8("a"), Ok(0x01));
        assert_eq!(r.read_u16("b"), Ok(0x0203));
        assert_eq!(r.read_u24("c"), Ok(0x040506));
        assert_eq!(r.read_u32("d"), Ok(0x0708090a));
        assert_eq!(r.remaining(), 2);
        assert_eq!(r.read_remaining(), hex!("0b0c"));
        assert_eq!(r.remaining(), 0);
        assert_eq!(r.read_remaining(), b"");
    }

    #[test]
    fn underrun_reports_start_offset() {
        let buf = hex!("01 0203");
        let mut r = BioReader::new(&buf);

        assert_eq!(r.read_u8("flags"), Ok(0x01));
        assert_eq!(
            r.read_u24("depth"),
            Err(Error::TruncatedField {
                field: "depth",
                offset: 1
            })
        );
        // a failed read consumes nothing
        assert_eq!(r.remaining(), 2);
        assert_eq!(r.read_data(2, "data"), Ok(&hex!("0203")[..]));
        assert!(r.read_u8("x").is_err());
        assert!(r.read_u16("x").is_err());
        assert!(r.read_u32("x").is_err());
        assert!(r.read_data(1, "x").is_err());
        assert_eq!(r.read_data(0, "x"), Ok(&b""[..]));
    }

    #[test]
    fn write_fields() {
        let mut w = BioWriter::with_capacity(16);

        w.write_u8(0x01, "a").expect("writing u8");
        w.write_u16(0x0203, "b").expect("writing u16");
        w.write_u24(0x040506, "c").expect("fits 24 bits");
        w.write_u32(0x0708090a, "d").expect("writing u32");
        w.write_data16(&hex!("0b0c"), "e").expect("fits 16 bits");
        w.write_u24(U24_MAX, "f").expect("largest 24-bit value");

        assert_eq!(
            w.into_buf(),
            hex!("01 0203 040506 0708090a 0002 0b0c ffffff")
        );
    }

    #[test]
    fn write_overflow() {
        let mut w = BioWriter::with_capacity(4);

        assert_eq!(
            w.write_u24(0x0100_0000, "depth"),
            Err(Error::FieldOverflow("depth"))
        );

        let big = vec![0u8; 0x10000];
        assert_eq!(
            w.write_data16(&big, "policy URI"),
            Err(Error::FieldOverflow("policy URI"))
        );
        assert!(w.into_buf().is_empty());
    }
}
