use super::*;

#[test]
fn hex_parse_and_format_are_symmetric() {
    let c = Rgb::parse_hex("#E03C31").unwrap();
    assert_eq!(c, Rgb::new(0xe0, 0x3c, 0x31));
    assert_eq!(c.to_hex(), "#e03c31");
    assert_eq!(Rgb::parse_hex("f00").unwrap(), Rgb::RED);
    assert!(Rgb::parse_hex("#12345").is_err());
    assert!(Rgb::parse_hex("#zzzzzz").is_err());
}

#[test]
fn brightness_uses_luma_weights() {
    assert_eq!(Rgb::new(255, 255, 255).brightness(), 255.0);
    assert_eq!(Rgb::BLACK.brightness(), 0.0);
    assert!((Rgb::RED.brightness() - 76.245).abs() < 1e-9);
}

#[test]
fn brighten_adds_percent_of_full_scale() {
    // 10% of 255 is 25.5 and lands on 25; 20% is exactly 51.
    assert_eq!(Rgb::new(10, 20, 30).brighten(10), Rgb::new(35, 45, 55));
    assert_eq!(Rgb::new(10, 20, 30).brighten(20), Rgb::new(61, 71, 81));
    assert_eq!(Rgb::new(250, 250, 250).brighten(20), Rgb::new(255, 255, 255));
}

#[test]
fn brighten_rounds_half_shifts_down() {
    assert_eq!(Rgb::BLACK.brighten(10), Rgb::new(25, 25, 25));
    assert_eq!(Rgb::BLACK.brighten(20), Rgb::new(51, 51, 51));
}

#[test]
fn darken_lowers_hsl_lightness() {
    assert_eq!(Rgb::new(255, 255, 255).darken(20), Rgb::new(204, 204, 204));
    let red = Rgb::RED.darken(20);
    assert_eq!(red, Rgb::new(153, 0, 0));
    assert_eq!(Rgb::new(20, 20, 20).darken(20), Rgb::BLACK);
}

#[test]
fn hsl_round_trip_preserves_saturated_colors() {
    for c in [
        Rgb::new(0x14, 0x7b, 0xd1),
        Rgb::new(0x2d, 0xc8, 0x4d),
        Rgb::new(0x75, 0x3b, 0xbd),
    ] {
        let (h, s, l) = c.to_hsl();
        assert_eq!(Rgb::from_hsl(h, s, l), c);
    }
}

#[test]
fn serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgb::new(1, 2, 3)).unwrap();
    assert_eq!(json, "\"#010203\"");
    let back: Rgb = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgb::new(1, 2, 3));
    assert!(serde_json::from_str::<Rgb>("\"#nothex\"").is_err());
}
