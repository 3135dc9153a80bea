use crate::compound::{self};
use crate::error::{NBTError, NBTResult};
use crate::list;
use crate::stream::NbtStream;
use crate::tag::Tag;
use crate::tag_type::TagType;

// Consulted after a tag (and all its children) has been fully decoded, to
// decide whether to retain it. Must not mutate the tree.
pub type Filter<'a> = &'a dyn Fn(&Tag) -> bool;

fn accept(tag: Tag, filter: Option<Filter>) -> Option<Tag> {
    match filter {
        Some(f) if !f(&tag) => None,
        _ => Some(tag),
    }
}

fn read_length(stream: &mut NbtStream) -> NBTResult<usize> {
    let len = stream.read_i32()?;
    if len < 0 {
        return Err(NBTError::FormatError(format!(
            "negative length {} in length-prefixed payload",
            len
        )));
    }
    Ok(len as usize)
}

pub fn decode_value(
    stream: &mut NbtStream,
    tag_type: TagType,
    filter: Option<Filter>,
) -> NBTResult<Option<Tag>> {
    let tag = match tag_type {
        TagType::End | TagType::Unknown => {
            return Err(NBTError::FormatError(format!(
                "{} is not a valid value tag",
                tag_type
            )));
        }
        TagType::Byte => Tag::byte(stream.read_i8()?),
        TagType::Short => Tag::short(stream.read_i16()?),
        TagType::Int => Tag::int(stream.read_i32()?),
        TagType::Long => Tag::long(stream.read_i64()?),
        TagType::Float => Tag::float(stream.read_f32()?),
        TagType::Double => Tag::double(stream.read_f64()?),
        TagType::ByteArray => {
            let len = read_length(stream)?;
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(stream.read_i8()?);
            }
            Tag::byte_array(values)
        }
        TagType::String => Tag::string(stream.read_string()?),
        TagType::IntArray => {
            let len = read_length(stream)?;
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(stream.read_i32()?);
            }
            Tag::int_array(values)
        }
        TagType::LongArray => {
            let len = read_length(stream)?;
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(stream.read_i64()?);
            }
            Tag::long_array(values)
        }
        TagType::List => decode_list_body(stream, filter)?,
        TagType::Compound => decode_compound_body(stream, filter)?,
    };
    Ok(accept(tag, filter))
}

fn decode_list_body(stream: &mut NbtStream, filter: Option<Filter>) -> NBTResult<Tag> {
    let element_byte = stream.read_u8()?;
    let element_type = TagType::from_byte(element_byte)?;
    let len = read_length(stream)?;

    let list = Tag::list();
    list::set_element_type(&list, element_type)
        .expect("a freshly-constructed list accepts any declared type");

    for _ in 0..len {
        if let Some(child) = decode_value(stream, element_type, filter)? {
            list::push(&list, child)?;
        }
    }
    Ok(list)
}

pub(crate) fn decode_compound_body(stream: &mut NbtStream, filter: Option<Filter>) -> NBTResult<Tag> {
    let compound = Tag::compound();
    loop {
        let child_byte = stream.read_u8()?;
        if child_byte == TagType::End as u8 {
            break;
        }
        let child_type = TagType::from_byte(child_byte)?;
        let name = stream.read_string()?;

        if let Some(child) = decode_value(stream, child_type, filter)? {
            child.set_name(Some(&name)).expect("freshly decoded tag has no parent yet");
            compound::add(&compound, child)?;
        }
    }
    Ok(compound)
}

// No type byte, no name — just the payload.
pub fn encode_value(stream: &mut NbtStream, tag: &Tag) -> NBTResult<()> {
    match tag.tag_type() {
        TagType::Byte => stream.write_i8(tag.as_i8().unwrap()),
        TagType::Short => stream.write_i16(tag.as_i16().unwrap()),
        TagType::Int => stream.write_i32(tag.as_i32().unwrap()),
        TagType::Long => stream.write_i64(tag.as_i64().unwrap()),
        TagType::Float => stream.write_f32(tag.as_f32().unwrap()),
        TagType::Double => stream.write_f64(tag.as_f64().unwrap()),
        TagType::ByteArray => {
            let values = tag.as_byte_array().unwrap();
            stream.write_i32(values.len() as i32)?;
            for v in values {
                stream.write_i8(v)?;
            }
            Ok(())
        }
        TagType::String => stream.write_string(&tag.as_str().unwrap()),
        TagType::IntArray => {
            let values = tag.as_int_array().unwrap();
            stream.write_i32(values.len() as i32)?;
            for v in values {
                stream.write_i32(v)?;
            }
            Ok(())
        }
        TagType::LongArray => {
            let values = tag.as_long_array().unwrap();
            stream.write_i32(values.len() as i32)?;
            for v in values {
                stream.write_i64(v)?;
            }
            Ok(())
        }
        TagType::List => encode_list_body(stream, tag),
        TagType::Compound => encode_compound_body(stream, tag),
        TagType::End | TagType::Unknown => unreachable!("Tag::tag_type never returns this"),
    }
}

fn encode_list_body(stream: &mut NbtStream, list_tag: &Tag) -> NBTResult<()> {
    let element_type = list::element_type(list_tag)?;
    if element_type == TagType::Unknown {
        return Err(NBTError::FormatError(
            "cannot encode a list whose element type was never resolved".to_string(),
        ));
    }
    stream.write_u8(element_type as u8)?;
    let items = list::items(list_tag)?;
    stream.write_i32(items.len() as i32)?;
    for item in &items {
        encode_value(stream, item)?;
    }
    Ok(())
}

fn encode_compound_body(stream: &mut NbtStream, compound_tag: &Tag) -> NBTResult<()> {
    for (name, child) in compound::tags(compound_tag)? {
        stream.write_u8(child.tag_type().as_byte())?;
        stream.write_string(&name)?;
        encode_value(stream, &child)?;
    }
    stream.write_u8(TagType::End as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::Endian;

    #[test]
    fn scalar_round_trips() {
        let tag = Tag::byte(42);
        let mut out = NbtStream::new(0, Endian::Big);
        encode_value(&mut out, &tag).unwrap();
        let bytes = out.into_bytes();

        let mut input = NbtStream::from_bytes(bytes, Endian::Big);
        let decoded = decode_value(&mut input, TagType::Byte, None).unwrap().unwrap();
        assert_eq!(decoded.as_i8(), Some(42));
    }

    #[test]
    fn negative_length_is_format_error() {
        let mut s = NbtStream::new(0, Endian::Big);
        s.write_i32(-1).unwrap();
        s.set_position(0);
        assert!(matches!(
            decode_value(&mut s, TagType::ByteArray, None),
            Err(NBTError::FormatError(_))
        ));
    }

    #[test]
    fn filter_discards_but_fully_consumes_stream() {
        let compound = Tag::compound();
        compound::add(&compound, Tag::int_named("keep", 1)).unwrap();
        compound::add(&compound, Tag::int_named("drop", 2)).unwrap();

        let mut out = NbtStream::new(0, Endian::Big);
        encode_compound_body(&mut out, &compound).unwrap();
        let bytes = out.into_bytes();
        let total_len = bytes.len();

        let mut input = NbtStream::from_bytes(bytes, Endian::Big);
        let filter: Filter = &|t: &Tag| t.name().as_deref() != Some("drop");
        let decoded = decode_compound_body(&mut input, Some(filter)).unwrap();

        assert_eq!(compound::size(&decoded).unwrap(), 1);
        assert!(compound::has(&decoded, "keep").unwrap());
        assert!(!compound::has(&decoded, "drop").unwrap());
        assert_eq!(input.position(), total_len);
    }
}
