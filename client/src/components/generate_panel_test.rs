use super::*;

#[test]
fn submit_label_reflects_busy() {
    assert_eq!(submit_label(true), "Generating...");
    assert!(submit_label(false).starts_with("Generate"));
}

#[test]
fn out_of_credits_only_for_known_empty_balance() {
    assert!(out_of_credits(Some(0)));
    assert!(out_of_credits(Some(-1)));
    assert!(!out_of_credits(Some(3)));
    assert!(!out_of_credits(None));
}

#[test]
fn style_from_input_treats_blank_as_any() {
    assert_eq!(style_from_input(""), None);
    assert_eq!(style_from_input("  "), None);
    assert_eq!(style_from_input("bold"), Some("bold".to_owned()));
}
