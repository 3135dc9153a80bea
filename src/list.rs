use crate::error::{NBTError, NBTResult};
use crate::tag::{Payload, Tag};
use crate::tag_type::TagType;
use std::rc::Rc;

fn require_list(tag: &Tag) -> NBTResult<()> {
    if matches!(tag.borrow().payload, Payload::List(_)) {
        Ok(())
    } else {
        Err(NBTError::FormatError("tag is not a list".to_string()))
    }
}

fn clone_handle(tag: &Tag) -> Tag {
    Tag(Rc::clone(&tag.0))
}

pub fn element_type(list: &Tag) -> NBTResult<TagType> {
    require_list(list)?;
    let borrowed = list.borrow();
    if let Payload::List(data) = &borrowed.payload {
        Ok(data.element_type)
    } else {
        unreachable!()
    }
}

pub fn set_element_type(list: &Tag, new_type: TagType) -> NBTResult<()> {
    require_list(list)?;
    let mut borrowed = list.borrow_mut();
    if let Payload::List(data) = &mut borrowed.payload {
        if data.children.is_empty() || data.element_type == new_type {
            data.element_type = new_type;
            Ok(())
        } else {
            Err(NBTError::FormatError(format!(
                "cannot set list element type to {} while it holds {} elements",
                new_type, data.element_type
            )))
        }
    } else {
        unreachable!()
    }
}

fn admit(list: &Tag, child: &Tag) -> NBTResult<()> {
    if child.name().is_some() {
        return Err(NBTError::FormatError(
            "a tag inside a list must not have a name".to_string(),
        ));
    }
    if child.parent().is_some() {
        return Err(NBTError::FormatError(
            "tag already has a parent".to_string(),
        ));
    }
    if list.is_or_descends_from(child) {
        return Err(NBTError::FormatError(
            "cannot insert a tag into itself or one of its own descendants".to_string(),
        ));
    }
    let declared = element_type(list)?;
    let incoming = child.tag_type();
    if declared != TagType::Unknown && declared != incoming {
        return Err(NBTError::FormatError(format!(
            "list holds {} elements, cannot insert a {}",
            declared, incoming
        )));
    }
    Ok(())
}

fn attach(list: &Tag, child: Tag) {
    let incoming = child.tag_type();
    child.borrow_mut().parent = Rc::downgrade(&list.0);
    let mut borrowed = list.borrow_mut();
    if let Payload::List(data) = &mut borrowed.payload {
        if data.element_type == TagType::Unknown {
            data.element_type = incoming;
        }
        data.children.push(child);
    }
}

pub fn push(list: &Tag, child: Tag) -> NBTResult<()> {
    require_list(list)?;
    admit(list, &child)?;
    attach(list, child);
    Ok(())
}

pub fn insert(list: &Tag, index: usize, child: Tag) -> NBTResult<()> {
    require_list(list)?;
    admit(list, &child)?;
    let incoming = child.tag_type();
    child.borrow_mut().parent = Rc::downgrade(&list.0);
    let mut borrowed = list.borrow_mut();
    if let Payload::List(data) = &mut borrowed.payload {
        if index > data.children.len() {
            return Err(NBTError::RangeError(format!(
                "index {} out of range for list of length {}",
                index,
                data.children.len()
            )));
        }
        if data.element_type == TagType::Unknown {
            data.element_type = incoming;
        }
        data.children.insert(index, child);
    }
    Ok(())
}

pub fn at(list: &Tag, index: usize) -> NBTResult<Tag> {
    require_list(list)?;
    let borrowed = list.borrow();
    if let Payload::List(data) = &borrowed.payload {
        data.children
            .get(index)
            .map(clone_handle)
            .ok_or_else(|| NBTError::RangeError(format!("index {} out of range", index)))
    } else {
        unreachable!()
    }
}

pub fn remove(list: &Tag, target: &Tag) -> NBTResult<bool> {
    require_list(list)?;
    let mut borrowed = list.borrow_mut();
    if let Payload::List(data) = &mut borrowed.payload {
        if let Some(idx) = data.children.iter().position(|c| c.ptr_eq(target)) {
            let removed = data.children.remove(idx);
            drop(borrowed);
            removed.borrow_mut().parent = std::rc::Weak::new();
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn remove_at(list: &Tag, index: usize) -> NBTResult<Tag> {
    require_list(list)?;
    let mut borrowed = list.borrow_mut();
    if let Payload::List(data) = &mut borrowed.payload {
        if index >= data.children.len() {
            return Err(NBTError::RangeError(format!(
                "index {} out of range for list of length {}",
                index,
                data.children.len()
            )));
        }
        let removed = data.children.remove(index);
        drop(borrowed);
        removed.borrow_mut().parent = std::rc::Weak::new();
        return Ok(removed);
    }
    unreachable!()
}

pub fn clear(list: &Tag) -> NBTResult<()> {
    require_list(list)?;
    let mut borrowed = list.borrow_mut();
    if let Payload::List(data) = &mut borrowed.payload {
        let removed = std::mem::take(&mut data.children);
        drop(borrowed);
        for r in removed {
            r.borrow_mut().parent = std::rc::Weak::new();
        }
    }
    Ok(())
}

pub fn index_of(list: &Tag, target: &Tag) -> NBTResult<Option<usize>> {
    require_list(list)?;
    let borrowed = list.borrow();
    if let Payload::List(data) = &borrowed.payload {
        Ok(data.children.iter().position(|c| c.ptr_eq(target)))
    } else {
        unreachable!()
    }
}

pub(crate) fn index_of_child(list: &Tag, target: &Tag) -> Option<usize> {
    index_of(list, target).ok().flatten()
}

pub fn includes(list: &Tag, target: &Tag) -> NBTResult<bool> {
    Ok(index_of(list, target)?.is_some())
}

pub fn length(list: &Tag) -> NBTResult<usize> {
    require_list(list)?;
    let borrowed = list.borrow();
    if let Payload::List(data) = &borrowed.payload {
        Ok(data.children.len())
    } else {
        unreachable!()
    }
}

pub fn items(list: &Tag) -> NBTResult<Vec<Tag>> {
    require_list(list)?;
    let borrowed = list.borrow();
    if let Payload::List(data) = &borrowed.payload {
        Ok(data.children.iter().map(clone_handle).collect())
    } else {
        unreachable!()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_fixes_element_type_on_first_insert() {
        let list = Tag::list();
        push(&list, Tag::int(1)).unwrap();
        assert_eq!(element_type(&list).unwrap(), TagType::Int);
    }

    #[test]
    fn push_rejects_mismatched_type() {
        let list = Tag::list();
        push(&list, Tag::int(1)).unwrap();
        assert!(push(&list, Tag::byte(1)).is_err());
    }

    #[test]
    fn push_rejects_named_tags() {
        let list = Tag::list();
        assert!(push(&list, Tag::int_named("x", 1)).is_err());
    }

    #[test]
    fn at_out_of_range_fails() {
        let list = Tag::list();
        assert!(at(&list, 0).is_err());
    }

    #[test]
    fn remove_clears_parent() {
        let list = Tag::list();
        let item = Tag::int(5);
        push(&list, item).unwrap();
        let fetched = at(&list, 0).unwrap();
        remove_at(&list, 0).unwrap();
        assert!(fetched.parent().is_none());
    }

    #[test]
    fn set_element_type_rejects_mismatch_when_nonempty() {
        let list = Tag::list();
        push(&list, Tag::int(1)).unwrap();
        assert!(set_element_type(&list, TagType::Byte).is_err());
        assert!(set_element_type(&list, TagType::Int).is_ok());
    }
}
