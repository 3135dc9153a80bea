use std::sync::{Mutex, OnceLock};

use crate::compound;
use crate::list;
use crate::tag::Tag;
use crate::tag_type::TagType;

fn default_indent_lock() -> &'static Mutex<String> {
    static LOCK: OnceLock<Mutex<String>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new("    ".to_string()))
}

pub fn default_indent() -> String {
    default_indent_lock().lock().expect("default indent lock poisoned").clone()
}

pub fn set_default_indent(indent: &str) {
    *default_indent_lock().lock().expect("default indent lock poisoned") = indent.to_string();
}

pub fn pretty_print(tag: &Tag) -> String {
    let indent = default_indent();
    let mut out = String::new();
    write_node(tag, &indent, 0, &mut out);
    out
}

fn write_node(tag: &Tag, indent_unit: &str, level: usize, out: &mut String) {
    let prefix = indent_unit.repeat(level);
    let name = tag.name().unwrap_or_default();
    let kind = tag.tag_type();

    match kind {
        TagType::Compound => {
            out.push_str(&format!("{}TAG_Compound(\"{}\"):\n", prefix, name));
            for (_, child) in compound::tags(tag).expect("tag_type says Compound") {
                write_node(&child, indent_unit, level + 1, out);
            }
        }
        TagType::List => {
            let element_type = list::element_type(tag).expect("tag_type says List");
            out.push_str(&format!(
                "{}TAG_List(\"{}\") [{} entries of type {}]:\n",
                prefix,
                name,
                list::length(tag).expect("tag_type says List"),
                element_type
            ));
            for child in list::items(tag).expect("tag_type says List") {
                write_node(&child, indent_unit, level + 1, out);
            }
        }
        _ => {
            out.push_str(&format!("{}{}(\"{}\"): {}\n", prefix, kind, name, scalar_body(tag)));
        }
    }
}

fn scalar_body(tag: &Tag) -> String {
    match tag.tag_type() {
        TagType::Byte => tag.as_i8().unwrap().to_string(),
        TagType::Short => tag.as_i16().unwrap().to_string(),
        TagType::Int => tag.as_i32().unwrap().to_string(),
        TagType::Long => tag.as_i64().unwrap().to_string(),
        TagType::Float => tag.as_f32().unwrap().to_string(),
        TagType::Double => tag.as_f64().unwrap().to_string(),
        TagType::String => format!("\"{}\"", tag.as_str().unwrap()),
        TagType::ByteArray => format!("[{} bytes]", tag.as_byte_array().unwrap().len()),
        TagType::IntArray => format!("[{} ints]", tag.as_int_array().unwrap().len()),
        TagType::LongArray => format!("[{} longs]", tag.as_long_array().unwrap().len()),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_nested_structure() {
        let root = Tag::compound_named("root");
        compound::add(&root, Tag::byte_named("b", 5)).unwrap();
        let out = pretty_print(&root);
        assert!(out.contains("TAG_Compound(\"root\")"));
        assert!(out.contains("TAG_Byte(\"b\"): 5"));
    }
}
