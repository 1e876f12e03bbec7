use hemikit_camtools::GcodeWriter;
use hemikit_core::{PartialPosition, PrinterProfile};
use proptest::prelude::*;
use std::f64::consts::PI;

fn writer(profile: PrinterProfile) -> GcodeWriter<Vec<u8>> {
    GcodeWriter::new(Vec::new(), profile)
}

fn output(g: GcodeWriter<Vec<u8>>) -> Vec<String> {
    String::from_utf8(g.into_inner())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_extrusion_matches_volume_example() {
    let mut g = writer(PrinterProfile::new(1.75, 0.4, 0.2));
    g.move_to(PartialPosition::xyz(10.0, 0.0, 0.0), Some(0.2), None)
        .unwrap();

    let expected = 10.0 * 0.4 * 0.2 / (PI * 0.875 * 0.875);
    assert!((g.extruder_position() - expected).abs() < 1e-12);
    assert_eq!(output(g), vec!["G1 X10.00 E0.3326"]);
}

#[test]
fn test_unchanged_axis_and_feedrate_suppressed() {
    let mut g = writer(PrinterProfile::default());
    g.move_to(PartialPosition::xyz(5.0, 5.0, 0.2), Some(0.0), Some(990))
        .unwrap();
    g.move_to(PartialPosition::xyz(5.0, 8.0, 0.2), Some(0.0), Some(990))
        .unwrap();
    g.move_to(PartialPosition::xy(6.0, 8.0), Some(0.0), Some(1200))
        .unwrap();

    assert_eq!(
        output(g),
        vec![
            "G1 X5.00 Y5.00 Z0.20 F990",
            "G1 Y8.00",
            "G1 X6.00 F1200",
        ]
    );
}

#[test]
fn test_tiny_extrusion_dropped_but_accumulated() {
    let mut g = writer(PrinterProfile::new(1.75, 0.4, 0.2));
    let per_move = g.profile().extrusion_length(0.002, 0.2);
    assert!(per_move < 0.0001);

    for i in 1..=5 {
        g.move_to(PartialPosition::xy(0.002 * i as f64, 0.0), None, None)
            .unwrap();
    }

    let total = g.extruder_position();
    assert!(total > 0.0001, "accumulator lost small deltas: {}", total);
    assert!((total - 5.0 * per_move).abs() < 1e-12);
    assert!(output(g).iter().all(|line| !line.contains('E')));
}

#[test]
fn test_z_change_counts_towards_distance() {
    let mut g = writer(PrinterProfile::new(1.75, 0.4, 0.2));
    g.move_to(PartialPosition::xyz(3.0, 4.0, 12.0), None, None)
        .unwrap();
    let expected = g.profile().extrusion_length(13.0, 0.2);
    assert!((g.extruder_position() - expected).abs() < 1e-12);
}

#[test]
fn test_travel_move_has_no_extrusion() {
    let mut g = writer(PrinterProfile::default());
    g.travel_to(PartialPosition::xy(100.0, 100.0), 18000).unwrap();
    assert_eq!(g.extruder_position(), 0.0);
    assert_eq!(output(g), vec!["G1 X100.00 Y100.00 F18000"]);
}

proptest! {
    #[test]
    fn prop_extrusion_conserves_volume(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        z in 0.0f64..50.0,
        filament in 1.0f64..3.0,
        width in 0.1f64..1.0,
        layer_height in 0.0f64..0.6,
    ) {
        let mut g = writer(PrinterProfile::new(filament, width, 0.2));
        g.move_to(PartialPosition::xyz(x, y, z), Some(layer_height), None).unwrap();

        let distance = (x * x + y * y + z * z).sqrt();
        let area = PI * (filament / 2.0) * (filament / 2.0);
        let expected = distance * width * layer_height / area;
        prop_assert!((g.extruder_position() - expected).abs() <= 1e-9 * expected.max(1.0));
    }
}
