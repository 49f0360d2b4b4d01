use super::*;

#[test]
fn background_class_maps_known_values() {
    assert_eq!(background_class(Some("light")), "content-block--light");
    assert_eq!(background_class(Some("dark")), "content-block--dark");
    assert_eq!(background_class(Some("blue")), "content-block--blue");
    assert_eq!(background_class(Some("green")), "content-block--green");
}

#[test]
fn background_class_defaults_to_light() {
    assert_eq!(background_class(None), "content-block--light");
    assert_eq!(background_class(Some("magenta")), "content-block--light");
}

#[test]
fn alignment_class_maps_known_values() {
    assert_eq!(alignment_class(Some("left")), "content-block--align-left");
    assert_eq!(alignment_class(Some("center")), "content-block--align-center");
    assert_eq!(alignment_class(Some("right")), "content-block--align-right");
}

#[test]
fn alignment_class_defaults_to_left() {
    assert_eq!(alignment_class(None), "content-block--align-left");
    assert_eq!(alignment_class(Some("justify")), "content-block--align-left");
}
