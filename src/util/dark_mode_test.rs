use super::*;

#[test]
fn toggle_flips_the_preference() {
    assert!(toggle(false));
    assert!(!toggle(true));
}

#[test]
fn read_preference_defaults_off_outside_a_browser() {
    assert!(!read_preference());
}
