//! # Named Binary Tag (NBT)
//! The Named Binary Tag format is a structured, tree-shaped binary format
//! used by Minecraft for player data, world saves, and parts of its network
//! protocol.
//!
//! [NBT Specification](https://wiki.vg/NBT#Specification)
//!
//! ## This Crate
//! This crate reads, mutates, and writes NBT documents. A document is a tree
//! of [`Tag`] handles rooted at a named `Compound`; every tag knows its own
//! parent, so the tree can be walked and edited in either direction without
//! holding owning pointers in both.
//!
//! ### Key features
//! - A typed [`Tag`] handle for each of the 13 NBT tag kinds, with `Compound`
//!   and `List` containers enforcing name-uniqueness and element-type
//!   homogeneity as tags are inserted.
//! - [`NbtFile`](file::NbtFile) for reading and writing complete documents,
//!   with gzip/zlib compression and auto-detection.
//! - A post-order decode filter for discarding uninteresting subtrees while
//!   still fully consuming the stream.
//!
//! ### Cargo Features
//! - `debug` (default) — derives `Debug` on the public tag/error types.
//!
//! ## Quick Start
//!
//! ```
//! use nbt::{Tag, compound};
//!
//! let root = Tag::compound_named("");
//! compound::add(&root, Tag::byte_named("age", 18)).unwrap();
//! compound::add(&root, Tag::int_named("id", 69420)).unwrap();
//!
//! assert_eq!(compound::get(&root, "age").unwrap().unwrap().as_i8(), Some(18));
//! ```
//!
//! Lists hold unnamed, same-typed elements:
//!
//! ```
//! use nbt::{Tag, list};
//!
//! let numbers = Tag::list_named("numbers");
//! list::push(&numbers, Tag::byte(1)).unwrap();
//! list::push(&numbers, Tag::byte(2)).unwrap();
//! assert_eq!(list::length(&numbers).unwrap(), 2);
//! ```
//!
//! ### Reading and writing files
//!
//! ```
//! use nbt::file::NbtFile;
//! use nbt::compression::NBTCompression;
//! use nbt::{Tag, compound};
//!
//! let mut file = NbtFile::with_root(Tag::compound_named("root")).unwrap();
//! compound::add(&file.root(), Tag::string_named("greeting", "hello")).unwrap();
//!
//! let bytes = file.to_bytes(Some(NBTCompression::Uncompressed)).unwrap();
//! let decoded = NbtFile::from_bytes(&bytes).unwrap();
//! assert_eq!(
//!     compound::get(&decoded.root(), "greeting").unwrap().unwrap().as_str(),
//!     Some("hello".to_string())
//! );
//! ```

pub(crate) mod codec;
pub mod compound;
pub mod compression;
pub mod config;
pub mod display;
pub(crate) mod error;
pub mod file;
pub mod list;
pub(crate) mod stream;
pub(crate) mod tag;
pub(crate) mod tag_type;

pub use compression::NBTCompression;
pub use config::IoOptions;
pub use display::pretty_print;
pub use error::{NBTError, NBTResult};
pub use file::NbtFile;
pub use stream::{Endian, NbtStream};
pub use tag::Tag;
pub use tag_type::TagType;
