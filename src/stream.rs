use byteorder::{ByteOrder, BigEndian, LittleEndian};

use crate::error::{NBTError, NBTResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    Begin,
    Current,
    End,
}

const MIN_GROWTH: usize = 256;

pub struct NbtStream {
    data: Vec<u8>,
    length: usize,
    position: usize,
    endian: Endian,
    expandable: bool,
}

impl NbtStream {
    pub fn new(capacity: usize, endian: Endian) -> Self {
        NbtStream {
            data: vec![0u8; capacity],
            length: 0,
            position: 0,
            endian,
            expandable: true,
        }
    }

    pub fn empty() -> Self {
        Self::new(0, Endian::Big)
    }

    pub fn from_bytes(bytes: Vec<u8>, endian: Endian) -> Self {
        let length = bytes.len();
        NbtStream {
            data: bytes,
            length,
            position: 0,
            endian,
            expandable: false,
        }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn length(&self) -> usize {
        self.length
    }

    // Shrinking clamps position to the new length.
    pub fn set_length(&mut self, length: usize) {
        self.length = length;
        if self.position > self.length {
            self.position = self.length;
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    // Growing zero-fills the new region; shrinking below the current length
    // clamps length (and transitively position) down with it.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.data.resize(capacity, 0);
        if self.length > capacity {
            self.set_length(capacity);
        }
    }

    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.data.truncate(self.length);
        self.data
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.length]
    }

    // Seeking before the start fails; seeking past `length()` is allowed, the
    // write path grows or zero-fills as needed.
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> NBTResult<usize> {
        let base: i64 = match origin {
            SeekOrigin::Begin => 0,
            SeekOrigin::Current => self.position as i64,
            SeekOrigin::End => self.length as i64,
        };
        let target = base + offset;
        if target < 0 {
            return Err(NBTError::EndOfStream(
                "seek before the start of the stream".to_string(),
            ));
        }
        self.position = target as usize;
        Ok(self.position)
    }

    fn ensure_readable(&self, n: usize) -> NBTResult<()> {
        if self.position + n > self.length {
            return Err(NBTError::EndOfStream(format!(
                "requested {} bytes at position {} but only {} bytes remain",
                n,
                self.position,
                self.length.saturating_sub(self.position)
            )));
        }
        Ok(())
    }

    fn ensure_capacity(&mut self, end: usize) -> NBTResult<()> {
        if end <= self.data.len() {
            return Ok(());
        }
        if !self.expandable {
            return Err(NBTError::EndOfStream(
                "write would exceed a non-expandable stream's capacity".to_string(),
            ));
        }
        let doubled = MIN_GROWTH.max(self.data.len().saturating_mul(2));
        let new_capacity = end.max(doubled);
        self.data.resize(new_capacity, 0);
        Ok(())
    }

    // Truncates to what remains; never fails from EOF.
    pub fn read_bytes(&mut self, n: usize) -> Vec<u8> {
        let available = self.length.saturating_sub(self.position);
        let take = n.min(available);
        let slice = self.data[self.position..self.position + take].to_vec();
        self.position += take;
        slice
    }

    fn write_bytes_raw(&mut self, bytes: &[u8]) -> NBTResult<()> {
        let end = self.position + bytes.len();
        self.ensure_capacity(end)?;
        if self.position > self.length {
            for b in &mut self.data[self.length..self.position] {
                *b = 0;
            }
        }
        self.data[self.position..end].copy_from_slice(bytes);
        self.position = end;
        if self.position > self.length {
            self.length = self.position;
        }
        Ok(())
    }
}

macro_rules! typed_rw {
    ($read_name:ident, $write_name:ident, $ty:ty, $width:expr, $read_be:path, $read_le:path, $write_be:path, $write_le:path) => {
        impl NbtStream {
            pub fn $read_name(&mut self) -> NBTResult<$ty> {
                self.ensure_readable($width)?;
                let slice = &self.data[self.position..self.position + $width];
                let value = match self.endian {
                    Endian::Big => $read_be(slice),
                    Endian::Little => $read_le(slice),
                };
                self.position += $width;
                Ok(value)
            }

            pub fn $write_name(&mut self, value: $ty) -> NBTResult<()> {
                let mut buf = [0u8; $width];
                match self.endian {
                    Endian::Big => $write_be(&mut buf, value),
                    Endian::Little => $write_le(&mut buf, value),
                }
                self.write_bytes_raw(&buf)
            }
        }
    };
}

typed_rw!(
    read_i16,
    write_i16,
    i16,
    2,
    BigEndian::read_i16,
    LittleEndian::read_i16,
    BigEndian::write_i16,
    LittleEndian::write_i16
);
typed_rw!(
    read_i32,
    write_i32,
    i32,
    4,
    BigEndian::read_i32,
    LittleEndian::read_i32,
    BigEndian::write_i32,
    LittleEndian::write_i32
);
typed_rw!(
    read_i64,
    write_i64,
    i64,
    8,
    BigEndian::read_i64,
    LittleEndian::read_i64,
    BigEndian::write_i64,
    LittleEndian::write_i64
);
typed_rw!(
    read_u16,
    write_u16,
    u16,
    2,
    BigEndian::read_u16,
    LittleEndian::read_u16,
    BigEndian::write_u16,
    LittleEndian::write_u16
);
typed_rw!(
    read_u32,
    write_u32,
    u32,
    4,
    BigEndian::read_u32,
    LittleEndian::read_u32,
    BigEndian::write_u32,
    LittleEndian::write_u32
);
typed_rw!(
    read_f32,
    write_f32,
    f32,
    4,
    BigEndian::read_f32,
    LittleEndian::read_f32,
    BigEndian::write_f32,
    LittleEndian::write_f32
);
typed_rw!(
    read_f64,
    write_f64,
    f64,
    8,
    BigEndian::read_f64,
    LittleEndian::read_f64,
    BigEndian::write_f64,
    LittleEndian::write_f64
);

impl NbtStream {
    pub fn read_i8(&mut self) -> NBTResult<i8> {
        self.ensure_readable(1)?;
        let v = self.data[self.position] as i8;
        self.position += 1;
        Ok(v)
    }

    pub fn write_i8(&mut self, value: i8) -> NBTResult<()> {
        self.write_bytes_raw(&[value as u8])
    }

    pub fn read_u8(&mut self) -> NBTResult<u8> {
        self.ensure_readable(1)?;
        let v = self.data[self.position];
        self.position += 1;
        Ok(v)
    }

    pub fn write_u8(&mut self, value: u8) -> NBTResult<()> {
        self.write_bytes_raw(&[value])
    }

    pub fn read_string(&mut self) -> NBTResult<String> {
        let len = self.read_u16()? as usize;
        self.ensure_readable(len)?;
        let bytes = self.read_bytes(len);
        String::from_utf8(bytes).map_err(NBTError::from)
    }

    pub fn write_string(&mut self, value: &str) -> NBTResult<()> {
        let bytes = value.as_bytes();
        if bytes.len() > u16::MAX as usize {
            return Err(NBTError::RangeError(format!(
                "string of {} bytes exceeds the uint16 length prefix",
                bytes.len()
            )));
        }
        self.write_u16(bytes.len() as u16)?;
        self.write_bytes_raw(bytes)
    }
}
