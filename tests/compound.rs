//! Structural invariants of the compound container.

use nbt::{compound, Tag};

#[test]
fn names_must_be_unique_within_a_compound() {
    let root = Tag::compound_named("root");
    compound::add(&root, Tag::int_named("a", 1)).unwrap();
    let err = compound::add(&root, Tag::int_named("a", 2));
    assert!(err.is_err());
    assert_eq!(compound::size(&root).unwrap(), 1);
}

#[test]
fn rename_into_a_taken_name_fails_without_disturbing_either_child() {
    let root = Tag::compound_named("root");
    compound::add(&root, Tag::int_named("a", 1)).unwrap();
    compound::add(&root, Tag::int_named("b", 2)).unwrap();

    assert!(compound::rename_tag(&root, "a", "b").is_err());
    assert_eq!(compound::get(&root, "a").unwrap().unwrap().as_i32(), Some(1));
    assert_eq!(compound::get(&root, "b").unwrap().unwrap().as_i32(), Some(2));
}

#[test]
fn rename_to_an_unused_name_succeeds() {
    let root = Tag::compound_named("root");
    compound::add(&root, Tag::int_named("a", 1)).unwrap();
    compound::rename_tag(&root, "a", "c").unwrap();
    assert!(!compound::has(&root, "a").unwrap());
    assert_eq!(compound::get(&root, "c").unwrap().unwrap().as_i32(), Some(1));
}

#[test]
fn cannot_adopt_an_already_parented_tag() {
    let root_a = Tag::compound_named("a");
    let root_b = Tag::compound_named("b");
    let child = Tag::int_named("x", 1);
    compound::add(&root_a, child).unwrap();

    let fetched = compound::get(&root_a, "x").unwrap().unwrap();
    assert!(compound::add(&root_b, fetched).is_err());
}

#[test]
fn cannot_insert_an_ancestor_back_into_its_own_descendant() {
    let root = Tag::compound_named("root");
    compound::add(&root, Tag::compound_named("child")).unwrap();
    let child = compound::get(&root, "child").unwrap().unwrap();
    assert!(compound::add(&child, root).is_err());
}

#[test]
fn delete_detaches_the_child_from_the_tree() {
    let root = Tag::compound_named("root");
    compound::add(&root, Tag::int_named("a", 1)).unwrap();
    let handle = compound::get(&root, "a").unwrap().unwrap();
    assert!(compound::delete(&root, "a").unwrap());
    assert!(handle.parent().is_none());
    assert_eq!(compound::size(&root).unwrap(), 0);
}

#[test]
fn deep_clone_produces_an_independent_unparented_tree() {
    let root = Tag::compound_named("root");
    compound::add(&root, Tag::int_named("a", 7)).unwrap();

    let clone = root.deep_clone();
    assert!(clone.parent().is_none());
    assert_eq!(compound::size(&clone).unwrap(), 1);

    compound::get(&clone, "a").unwrap().unwrap().set_i32(99).unwrap();
    assert_eq!(compound::get(&root, "a").unwrap().unwrap().as_i32(), Some(7));
}
