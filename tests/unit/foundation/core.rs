use super::*;

#[test]
fn clamp_keeps_points_inside_margin_box() {
    let space = LogicalSpace::default();
    let p = space.clamp(Point::new(-5.0, 500.0));
    assert_eq!(p, Point::new(10.0, 190.0));
    assert!(space.contains(p));
    assert!(!space.contains(Point::new(5.0, 50.0)));
}

#[test]
fn host_mapping_scales_linearly() {
    let space = LogicalSpace::default();
    let p = space
        .map_from_host(Point::new(600.0, 200.0), Size::new(1200.0, 800.0))
        .unwrap();
    assert_eq!(p, Point::new(150.0, 50.0));
    assert!(
        space
            .map_from_host(Point::new(1.0, 1.0), Size::new(0.0, 800.0))
            .is_none()
    );
}

#[test]
fn host_mapping_rejects_non_finite_pointers() {
    let space = LogicalSpace::default();
    let host = Size::new(1200.0, 800.0);
    assert!(space.map_from_host(Point::new(f64::NAN, 10.0), host).is_none());
    assert!(space.map_from_host(Point::new(10.0, f64::INFINITY), host).is_none());
}

#[test]
fn space_validation_rejects_oversized_margin() {
    let mut space = LogicalSpace::default();
    assert!(space.validate().is_ok());
    space.margin = 101.0;
    assert!(space.validate().is_err());
    space.margin = 10.0;
    space.width = 0.0;
    assert!(space.validate().is_err());
}

#[test]
fn millis_fraction_clamps_and_handles_zero_span() {
    assert_eq!(Millis(150).fraction_of(Millis(300)), 0.5);
    assert_eq!(Millis(900).fraction_of(Millis(300)), 1.0);
    assert_eq!(Millis(0).fraction_of(Millis(0)), 1.0);
    assert_eq!(Millis(5).since(Millis(10)), Millis::ZERO);
}

#[test]
fn hex_colors_parse_and_print() {
    let c = Rgba8::parse_hex("#EE352E").unwrap();
    assert_eq!(c, Rgba8::rgb(0xEE, 0x35, 0x2E));
    assert_eq!(c.to_hex(), "#EE352E");
    let translucent = Rgba8::parse_hex("ffffff80").unwrap();
    assert_eq!(translucent.a, 0x80);
    assert!(Rgba8::parse_hex("#12345").is_err());
    assert!(Rgba8::parse_hex("#zzzzzz").is_err());
}

#[test]
fn colors_deserialize_from_strings() {
    let palette: Vec<Rgba8> = serde_json::from_str(r##"["#00933C", "#0039A6"]"##).unwrap();
    assert_eq!(palette[1], Rgba8::rgb(0x00, 0x39, 0xA6));
    assert!(serde_json::from_str::<Rgba8>(r#""red""#).is_err());
}
