use std::fmt;
use std::io::{Read, Write};

use flate2::read::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::Compression;

use crate::error::{NBTError, NBTResult};

const COMPOUND_TAG_BYTE: u8 = 0x0A;
const GZIP_MAGIC: u8 = 0x1F;
const ZLIB_MAGIC: u8 = 0x78;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NBTCompression {
    Uncompressed,
    Gzip,
    Zlib,
    // Decode-only: infers framing from the input's first byte. A `RangeError`
    // at encode time.
    AutoDetect,
}

impl fmt::Display for NBTCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NBTCompression::Uncompressed => "uncompressed",
            NBTCompression::Gzip => "gzip",
            NBTCompression::Zlib => "zlib",
            NBTCompression::AutoDetect => "auto-detect",
        };
        f.write_str(s)
    }
}

pub fn detect(bytes: &[u8]) -> NBTResult<NBTCompression> {
    match bytes.first() {
        None => Err(NBTError::FormatError(
            "cannot auto-detect compression on empty input".to_string(),
        )),
        Some(&COMPOUND_TAG_BYTE) => Ok(NBTCompression::Uncompressed),
        Some(&GZIP_MAGIC) => Ok(NBTCompression::Gzip),
        Some(&ZLIB_MAGIC) => Ok(NBTCompression::Zlib),
        Some(_) => Err(NBTError::FormatError(
            "cannot auto-detect compression".to_string(),
        )),
    }
}

pub fn decompress(bytes: &[u8], mode: NBTCompression) -> NBTResult<Vec<u8>> {
    match mode {
        NBTCompression::Uncompressed => Ok(bytes.to_vec()),
        NBTCompression::Gzip => {
            let mut out = Vec::new();
            GzDecoder::new(bytes).read_to_end(&mut out)?;
            Ok(out)
        }
        NBTCompression::Zlib => {
            let mut out = Vec::new();
            ZlibDecoder::new(bytes).read_to_end(&mut out)?;
            Ok(out)
        }
        NBTCompression::AutoDetect => decompress(bytes, detect(bytes)?),
    }
}

pub fn compress(bytes: &[u8], mode: NBTCompression) -> NBTResult<Vec<u8>> {
    match mode {
        NBTCompression::Uncompressed => Ok(bytes.to_vec()),
        NBTCompression::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(bytes)?;
            Ok(encoder.finish()?)
        }
        NBTCompression::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(bytes)?;
            Ok(encoder.finish()?)
        }
        NBTCompression::AutoDetect => Err(NBTError::RangeError(
            "AutoDetect is not a valid compression mode for encoding".to_string(),
        )),
    }
}
