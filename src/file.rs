//! Binds a root compound to the on-disk/on-wire NBT representation, with
//! auto-detected or explicit compression framing.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::codec::{self, Filter};
use crate::compression::{self, NBTCompression};
use crate::config::IoOptions;
use crate::error::{NBTError, NBTResult};
use crate::stream::NbtStream;
use crate::tag::Tag;
use crate::tag_type::TagType;

/// A complete NBT document: a named root compound plus the I/O options it
/// was decoded with (or will be encoded with).
pub struct NbtFile {
    root: Tag,
    io: IoOptions,
    /// The compression this file was last decoded or encoded with, used to
    /// resolve an unspecified compression on the next `to_*` call.
    last_compression: Option<NBTCompression>,
}

impl NbtFile {
    /// A new, empty document with an empty-named root compound.
    pub fn empty() -> NbtFile {
        NbtFile {
            root: Tag::compound_named(""),
            io: IoOptions::default(),
            last_compression: None,
        }
    }

    pub fn with_root(root: Tag) -> NBTResult<NbtFile> {
        if root.tag_type() != TagType::Compound || root.name().is_none() {
            return Err(NBTError::FormatError(
                "the root of a file must be a named Compound".to_string(),
            ));
        }
        Ok(NbtFile {
            root,
            io: IoOptions::default(),
            last_compression: None,
        })
    }

    /// Decode a complete document from `bytes`, auto-detecting compression
    /// and applying the optional filter to every tag as it is read.
    pub fn from_bytes(bytes: &[u8]) -> NBTResult<NbtFile> {
        Self::from_bytes_with(bytes, IoOptions::default(), NBTCompression::AutoDetect, None)
    }

    pub fn from_bytes_with(
        bytes: &[u8],
        io: IoOptions,
        compression: NBTCompression,
        filter: Option<Filter>,
    ) -> NBTResult<NbtFile> {
        let resolved = match compression {
            NBTCompression::AutoDetect => compression::detect(bytes)?,
            other => other,
        };
        let plain = compression::decompress(bytes, resolved)?;

        let mut stream = NbtStream::from_bytes(plain, io.endian);
        let root_type_byte = stream.read_u8()?;
        if root_type_byte != TagType::Compound as u8 {
            return Err(NBTError::FormatError(format!(
                "NBT root must be a Compound tag, found type byte {:#04X}",
                root_type_byte
            )));
        }
        let root_name = stream.read_string()?;

        // Decode the root's body directly rather than through `decode_value`: the
        // filter is only ever consulted for children (spec.md §4.5/§4.6), never the
        // root compound itself.
        let root_children = codec::decode_compound_body(&mut stream, filter)?;
        root_children
            .set_name(Some(&root_name))
            .expect("freshly decoded root has no parent");

        Ok(NbtFile {
            root: root_children,
            io,
            last_compression: Some(resolved),
        })
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> NBTResult<NbtFile> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> NBTResult<NbtFile> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// The root compound. Returns a shared handle: mutating it mutates this
    /// file's tree.
    pub fn root(&self) -> Tag {
        self.root.handle()
    }

    pub fn set_root(&mut self, root: Tag) -> NBTResult<()> {
        if root.tag_type() != TagType::Compound || root.name().is_none() {
            return Err(NBTError::FormatError(
                "the root of a file must be a named Compound".to_string(),
            ));
        }
        self.root = root;
        Ok(())
    }

    pub fn pretty_print(&self) -> String {
        crate::display::pretty_print(&self.root)
    }

    /// Encode the document. `compression` wins if given; otherwise the
    /// compression this file was last decoded/encoded with; otherwise gzip.
    /// `AutoDetect` is never valid here and fails with `RangeError`.
    pub fn to_bytes(&mut self, compression: Option<NBTCompression>) -> NBTResult<Vec<u8>> {
        let resolved = match compression {
            Some(NBTCompression::AutoDetect) => {
                return Err(NBTError::RangeError(
                    "AutoDetect is not valid when encoding".to_string(),
                ));
            }
            Some(c) => c,
            None => self.last_compression.unwrap_or(NBTCompression::Gzip),
        };

        if self.root.tag_type() != TagType::Compound || self.root.name().is_none() {
            return Err(NBTError::FormatError(
                "the root of a file must be a named Compound".to_string(),
            ));
        }

        let mut stream = NbtStream::new(0, self.io.endian);
        stream.write_u8(TagType::Compound as u8)?;
        stream.write_string(&self.root.name().unwrap())?;
        codec::encode_value(&mut stream, &self.root)?;

        let plain = stream.into_bytes();
        let out = compression::compress(&plain, resolved)?;
        self.last_compression = Some(resolved);
        Ok(out)
    }

    pub fn to_writer<W: Write>(&mut self, writer: &mut W, compression: Option<NBTCompression>) -> NBTResult<()> {
        let bytes = self.to_bytes(compression)?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    pub fn to_path<P: AsRef<Path>>(&mut self, path: P, compression: Option<NBTCompression>) -> NBTResult<()> {
        let bytes = self.to_bytes(compression)?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound;

    #[test]
    fn empty_root_round_trips_to_four_bytes() {
        let mut file = NbtFile::empty();
        let bytes = file.to_bytes(Some(NBTCompression::Uncompressed)).unwrap();
        assert_eq!(bytes, vec![0x0A, 0x00, 0x00, 0x00]);

        let decoded = NbtFile::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.root().name(), Some(String::new()));
        assert_eq!(compound::size(&decoded.root()).unwrap(), 0);
    }

    #[test]
    fn scalar_child_matches_known_wire_bytes() {
        let mut file = NbtFile::with_root(Tag::compound_named("root")).unwrap();
        compound::add(&file.root(), Tag::byte_named("b", 42)).unwrap();
        let bytes = file.to_bytes(Some(NBTCompression::Uncompressed)).unwrap();
        let expected = vec![
            0x0A, 0x00, 0x04, b'r', b'o', b'o', b't', 0x01, 0x00, 0x01, b'b', 0x2A, 0x00,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn rejects_non_compound_root_type_byte() {
        let bytes = vec![0x01, 0x00, 0x00, 0x00];
        assert!(NbtFile::from_bytes(&bytes).is_err());
    }

    #[test]
    fn gzip_round_trip_reports_gzip_compression() {
        let mut file = NbtFile::empty();
        let bytes = file.to_bytes(Some(NBTCompression::Gzip)).unwrap();
        let decoded = NbtFile::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.last_compression, Some(NBTCompression::Gzip));
    }

    #[test]
    fn explicit_autodetect_at_encode_fails() {
        let mut file = NbtFile::empty();
        assert!(file.to_bytes(Some(NBTCompression::AutoDetect)).is_err());
    }
}
