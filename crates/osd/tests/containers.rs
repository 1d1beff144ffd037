use osd::{Osd, OsdArray, OsdMap, OsdType};

#[test]
fn map_missing_key_is_undefined() {
    let map = OsdMap::new();
    map.insert("present", 1);
    let missing = map.get("nonexistent");
    assert_eq!(missing.osd_type(), OsdType::Unknown);
    assert!(map.try_get("nonexistent").is_none());
    assert!(!map.contains_key("nonexistent"));
}

#[test]
fn map_preserves_insertion_order() {
    let map = OsdMap::new();
    map.insert("b", 1);
    map.insert("a", 2);
    map.insert("c", 3);
    assert_eq!(map.keys(), vec!["b", "a", "c"]);
    map.remove("a");
    assert_eq!(map.keys(), vec!["b", "c"]);
    assert_eq!(map.insert("b", 9), Some(Osd::Integer(1)));
    assert_eq!(map.len(), 2);
}

#[test]
fn clones_alias_the_same_container() {
    let map = OsdMap::new();
    let value = Osd::from(map.clone());
    map.insert("late", true);
    assert!(value.get("late").as_boolean());
}

#[test]
fn copy_is_shallow() {
    let child = OsdArray::new();
    let parent = OsdMap::new();
    parent.insert("child", child.clone());
    parent.insert("n", 1);

    let copy = parent.copy();
    assert!(!copy.ptr_eq(&parent));

    // Top-level edits are independent.
    copy.insert("n", 2);
    assert_eq!(parent.get("n").as_integer(), 1);

    // Nested containers are shared.
    child.push("shared");
    assert_eq!(copy.get("child").as_array().map(OsdArray::len), Some(1));
}

#[test]
fn array_copy_is_shallow() {
    let inner = OsdMap::new();
    let array = OsdArray::from_iter([Osd::from(inner.clone())]);
    let copy = array.copy();
    copy.push(1);
    assert_eq!(array.len(), 1);
    inner.insert("x", 1);
    assert_eq!(copy.at(0).get("x").as_integer(), 1);
}

#[test]
fn array_editing() {
    let array = OsdArray::from_iter([1, 2, 3]);
    array.insert(0, 0);
    array.set(3, 30);
    assert_eq!(array.to_vec(), vec![Osd::Integer(0), Osd::Integer(1), Osd::Integer(2), Osd::Integer(30)]);
    assert!(array.remove(&Osd::Integer(1)));
    assert!(!array.remove(&Osd::Integer(99)));
    assert_eq!(array.index_of(&Osd::Integer(30)), Some(2));
    assert_eq!(array.remove_at(0), Osd::Integer(0));
    assert!(array.contains(&Osd::Integer(2)));

    let mut dest = vec![Osd::Undefined; 3];
    array.copy_to(&mut dest, 1);
    assert_eq!(dest[1], Osd::Integer(2));
    assert_eq!(dest[2], Osd::Integer(30));
}

#[test]
#[should_panic(expected = "out of range")]
fn array_index_out_of_range_panics() {
    let array = OsdArray::from_iter([1]);
    array.at(1);
}

#[test]
#[should_panic(expected = "out of range")]
fn array_set_out_of_range_panics() {
    OsdArray::new().set(0, 1);
}

#[test]
fn array_get_is_checked() {
    let array = OsdArray::from_iter(["a"]);
    assert_eq!(array.get(0), Some(Osd::from("a")));
    assert_eq!(array.get(1), None);
}

#[test]
fn remove_value_that_aliases_the_array() {
    let array = OsdArray::new();
    array.push(OsdArray::new());
    let this = Osd::Array(array.clone());
    assert!(!array.remove(&this));
    array.push(this.clone());
    assert!(array.remove(&this));
    assert_eq!(array.len(), 1);
}
