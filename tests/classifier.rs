use hydraulics_toolbox::field::{classify, Classification, Field};
use hydraulics_toolbox::quantity::QuantityKind;

fn fields(raw: &[&str]) -> Vec<Field> {
    raw.iter()
        .enumerate()
        .map(|(i, v)| Field::new(format!("x{i}"), *v, "m", QuantityKind::Length))
        .collect()
}

#[test]
fn two_missing_is_insufficient() {
    let cls = classify(&fields(&["1", "", "2", "abc"]));
    assert_eq!(cls.valid_ids, vec!["x0".to_string(), "x2".to_string()]);
    assert_eq!(cls.missing_ids, vec!["x1".to_string(), "x3".to_string()]);
    assert_eq!(cls.unique_missing, None);
    assert!(cls.is_insufficient());
}

#[test]
fn unique_missing_at_every_position() {
    for pos in 0..5 {
        let raw: Vec<&str> = (0..5).map(|i| if i == pos { " " } else { "1,5" }).collect();
        let cls = classify(&fields(&raw));
        assert_eq!(cls.unique_missing, Some(format!("x{pos}")));
        assert_eq!(cls.valid_ids.len(), 4);
        assert!(!cls.is_insufficient());
        assert!(!cls.is_complete());
    }
}

#[test]
fn nothing_missing_is_complete() {
    let cls = classify(&fields(&["1", "2", "-3.5"]));
    assert!(cls.is_complete());
    assert_eq!(cls.unique_missing, None);
}

#[test]
fn empty_input_is_complete() {
    assert_eq!(classify(&[]), Classification::default());
}

#[test]
fn non_finite_text_is_missing() {
    let cls = classify(&fields(&["inf", "1"]));
    assert_eq!(cls.unique_missing.as_deref(), Some("x0"));
}
