use crate::error::{NBTError, NBTResult};
use crate::tag::{Payload, Tag};
use std::rc::Rc;

fn require_compound(tag: &Tag) -> NBTResult<()> {
    if matches!(tag.borrow().payload, Payload::Compound(_)) {
        Ok(())
    } else {
        Err(NBTError::FormatError("tag is not a compound".to_string()))
    }
}

pub fn add(parent: &Tag, child: Tag) -> NBTResult<()> {
    require_compound(parent)?;

    if child.name().is_none() {
        return Err(NBTError::FormatError(
            "a tag inside a compound must have a name".to_string(),
        ));
    }
    if child.parent().is_some() {
        return Err(NBTError::FormatError(
            "tag already has a parent".to_string(),
        ));
    }
    if parent.is_or_descends_from(&child) {
        return Err(NBTError::FormatError(
            "cannot insert a tag into itself or one of its own descendants".to_string(),
        ));
    }

    let name = child.name().unwrap();
    {
        let borrowed = parent.borrow();
        if let Payload::Compound(data) = &borrowed.payload {
            if data.children.iter().any(|c| c.name().as_deref() == Some(name.as_str())) {
                return Err(NBTError::FormatError(format!(
                    "compound already contains a child named '{}'",
                    name
                )));
            }
        }
    }

    child.borrow_mut().parent = Rc::downgrade(&parent.0);
    let mut borrowed = parent.borrow_mut();
    if let Payload::Compound(data) = &mut borrowed.payload {
        data.children.push(child);
    }
    Ok(())
}

pub fn get(parent: &Tag, name: &str) -> NBTResult<Option<Tag>> {
    require_compound(parent)?;
    let borrowed = parent.borrow();
    if let Payload::Compound(data) = &borrowed.payload {
        Ok(data
            .children
            .iter()
            .find(|c| c.name().as_deref() == Some(name))
            .map(clone_handle))
    } else {
        unreachable!()
    }
}

pub fn has(parent: &Tag, name: &str) -> NBTResult<bool> {
    Ok(get(parent, name)?.is_some())
}

pub fn delete(parent: &Tag, name: &str) -> NBTResult<bool> {
    require_compound(parent)?;
    let mut borrowed = parent.borrow_mut();
    if let Payload::Compound(data) = &mut borrowed.payload {
        if let Some(idx) = data
            .children
            .iter()
            .position(|c| c.name().as_deref() == Some(name))
        {
            let removed = data.children.remove(idx);
            drop(borrowed);
            removed.borrow_mut().parent = std::rc::Weak::new();
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn rename_tag(parent: &Tag, old: &str, new: &str) -> NBTResult<()> {
    require_compound(parent)?;
    if old == new {
        return Ok(());
    }
    rename_in_parent(parent, Some(old), new)
}

// Shared by `rename_tag` and by `Tag::set_name` when the tag being renamed
// already lives in `parent`.
pub(crate) fn rename_in_parent(parent: &Tag, old: Option<&str>, new: &str) -> NBTResult<()> {
    let borrowed = parent.borrow();
    let data = match &borrowed.payload {
        Payload::Compound(d) => d,
        _ => return Err(NBTError::FormatError("tag is not a compound".to_string())),
    };
    if data.children.iter().any(|c| c.name().as_deref() == Some(new)) {
        return Err(NBTError::FormatError(format!(
            "compound already contains a child named '{}'",
            new
        )));
    }
    let target = data
        .children
        .iter()
        .find(|c| c.name().as_deref() == old)
        .cloned_handle();
    drop(borrowed);
    match target {
        Some(tag) => {
            tag.borrow_mut().name = Some(new.to_string());
            Ok(())
        }
        None => Err(NBTError::FormatError(format!(
            "no child named '{}' to rename",
            old.unwrap_or("")
        ))),
    }
}

trait OptionTagExt {
    fn cloned_handle(self) -> Option<Tag>;
}
impl OptionTagExt for Option<&Tag> {
    fn cloned_handle(self) -> Option<Tag> {
        self.map(clone_handle)
    }
}

fn clone_handle(tag: &Tag) -> Tag {
    Tag(Rc::clone(&tag.0))
}

pub fn clear(parent: &Tag) -> NBTResult<()> {
    require_compound(parent)?;
    let mut borrowed = parent.borrow_mut();
    if let Payload::Compound(data) = &mut borrowed.payload {
        let removed = std::mem::take(&mut data.children);
        drop(borrowed);
        for r in removed {
            r.borrow_mut().parent = std::rc::Weak::new();
        }
    }
    Ok(())
}

pub fn size(parent: &Tag) -> NBTResult<usize> {
    require_compound(parent)?;
    let borrowed = parent.borrow();
    if let Payload::Compound(data) = &borrowed.payload {
        Ok(data.children.len())
    } else {
        unreachable!()
    }
}

pub fn names(parent: &Tag) -> NBTResult<Vec<String>> {
    require_compound(parent)?;
    let borrowed = parent.borrow();
    if let Payload::Compound(data) = &borrowed.payload {
        Ok(data.children.iter().filter_map(|c| c.name()).collect())
    } else {
        unreachable!()
    }
}

pub fn tags(parent: &Tag) -> NBTResult<Vec<(String, Tag)>> {
    require_compound(parent)?;
    let borrowed = parent.borrow();
    if let Payload::Compound(data) = &borrowed.payload {
        Ok(data
            .children
            .iter()
            .map(|c| (c.name().unwrap_or_default(), clone_handle(c)))
            .collect())
    } else {
        unreachable!()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_unnamed_children() {
        let root = Tag::compound();
        assert!(add(&root, Tag::int(1)).is_err());
    }

    #[test]
    fn add_rejects_duplicate_names() {
        let root = Tag::compound();
        add(&root, Tag::int_named("a", 1)).unwrap();
        let err = add(&root, Tag::int_named("a", 2));
        assert!(err.is_err());
        assert_eq!(size(&root).unwrap(), 1);
    }

    #[test]
    fn rename_collision_leaves_both_children_untouched() {
        let root = Tag::compound();
        add(&root, Tag::int_named("a", 1)).unwrap();
        add(&root, Tag::int_named("b", 2)).unwrap();
        assert!(rename_tag(&root, "a", "b").is_err());
        let mut names = names(&root).unwrap();
        names.sort();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn delete_clears_parent_back_reference() {
        let root = Tag::compound();
        let child = Tag::int_named("a", 1);
        add(&root, child).unwrap();
        let fetched = get(&root, "a").unwrap().unwrap();
        assert!(fetched.parent().is_some());
        delete(&root, "a").unwrap();
        assert!(fetched.parent().is_none());
    }

    #[test]
    fn cannot_insert_an_ancestor_into_its_own_descendant() {
        let root = Tag::compound_named("root");
        add(&root, Tag::compound_named("child")).unwrap();
        let child_ref = get(&root, "child").unwrap().unwrap();
        assert!(add(&child_ref, root).is_err());
    }
}
