use hemikit_core::{Error, PrinterProfile, TraceSettings};

#[test]
fn test_profile_from_partial_json() {
    let profile: PrinterProfile =
        serde_json::from_str(r#"{"filament_diameter": 2.85, "print_temperature": 210}"#).unwrap();
    assert_eq!(profile.filament_diameter, 2.85);
    assert_eq!(profile.print_temperature, 210);
    assert_eq!(profile.suck_mm, 15.0);
    assert_eq!(profile.default_feedrate, 990);
}

#[test]
fn test_thicker_filament_needs_less_feed() {
    let thin = PrinterProfile::new(1.75, 0.4, 0.2);
    let thick = PrinterProfile::new(2.85, 0.4, 0.2);
    let distance = 10.0;
    assert!(thick.extrusion_length(distance, 0.2) < thin.extrusion_length(distance, 0.2));

    // Deposited volume equals consumed filament volume.
    let e = thick.extrusion_length(distance, 0.2);
    assert!((e * thick.filament_area() - distance * 0.4 * 0.2).abs() < 1e-12);
}

#[test]
fn test_validation_names_the_field() {
    let profile = PrinterProfile {
        filament_diameter: f64::NAN,
        ..Default::default()
    };
    match profile.validate() {
        Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, "filament_diameter"),
        other => panic!("unexpected result {:?}", other),
    }

    let settings = TraceSettings {
        initial_step: 0.0,
        ..Default::default()
    };
    assert!(settings.validate().unwrap_err().is_parameter_error());
}
