use chart_annotator_wasm::domain::annotation::{style_for, Glyph, Signal};
use quickcheck_macros::quickcheck;

#[test]
fn long_entry_is_green_and_points_up() {
    let style = style_for(&Signal::LongEntry);
    assert_eq!(style.color, "#2ca02c");
    assert_eq!(style.glyph, Glyph::TriangleUp);
    assert_eq!(style.label, "L-ENTRY");
    assert_eq!(style.badge_class, "bg-success");
}

#[test]
fn long_exit_is_blue_and_points_down() {
    let style = style_for(&Signal::LongExit);
    assert_eq!(style.color, "#1f77b4");
    assert_eq!(style.glyph, Glyph::TriangleDown);
    assert_eq!(style.badge_class, "bg-primary");
}

#[test]
fn short_entry_is_red_and_points_down() {
    let style = style_for(&Signal::ShortEntry);
    assert_eq!(style.color, "#d62728");
    assert_eq!(style.glyph, Glyph::TriangleDown);
    assert_eq!(style.badge_class, "bg-danger");
}

#[test]
fn short_exit_is_orange_and_points_up() {
    let style = style_for(&Signal::ShortExit);
    assert_eq!(style.color, "#ff7f0e");
    assert_eq!(style.glyph, Glyph::TriangleUp);
    assert_eq!(style.badge_class, "bg-warning");
}

#[test]
fn unrecognized_signal_gets_the_neutral_style() {
    let style = style_for(&Signal::Unknown("mystery".to_string()));
    assert_eq!(style.color, "#7f7f7f");
    assert_eq!(style.glyph, Glyph::Circle);
    assert_eq!(style.label, "mystery");
    assert_eq!(style.badge_class, "bg-secondary");
}

#[test]
fn known_signals_round_trip_through_their_wire_names() {
    for name in ["long_entry", "long_exit", "short_entry", "short_exit"] {
        let signal = Signal::from(name.to_string());
        assert!(!matches!(signal, Signal::Unknown(_)), "{name} should be recognized");
        assert_eq!(signal.to_string(), name);
    }
}

#[test]
fn unknown_wire_values_are_preserved_verbatim() {
    let signal = Signal::from("take_profit".to_string());
    assert_eq!(signal, Signal::Unknown("take_profit".to_string()));
    assert_eq!(signal.to_string(), "take_profit");
}

#[quickcheck]
fn every_wire_value_resolves_to_a_valid_style(raw: String) -> bool {
    let style = style_for(&Signal::from(raw));
    let known_badges = ["bg-success", "bg-primary", "bg-danger", "bg-warning", "bg-secondary"];
    style.color.starts_with('#') && known_badges.contains(&style.badge_class)
}
