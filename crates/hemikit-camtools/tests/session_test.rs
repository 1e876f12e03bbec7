use hemikit_camtools::{run_session, GcodeWriter, SessionHeader, SkirtGenerator, SkirtParameters};
use hemikit_core::PrinterProfile;

#[test]
fn test_session_brackets_body() {
    let mut g = GcodeWriter::new(Vec::new(), PrinterProfile::default());
    run_session(&mut g, &SessionHeader::new("hemikit"), |g| {
        SkirtGenerator::new(SkirtParameters::default()).generate(g)
    })
    .unwrap();

    let text = String::from_utf8(g.into_inner()).unwrap();
    let preamble = text.find("; *** G-code Preamble ***").unwrap();
    let body = text.find("; Custom skirt with radius 50.000000").unwrap();
    let coda = text.find("; *** Coda ***").unwrap();
    assert!(preamble < body && body < coda);
    assert!(text.contains("G92 E0  ; reset extruder pos"));
}

#[test]
fn test_session_rejected_body_still_cools_down() {
    let mut g = GcodeWriter::new(Vec::new(), PrinterProfile::default());
    let result = run_session(&mut g, &SessionHeader::new("hemikit"), |g| {
        SkirtGenerator::new(SkirtParameters {
            radius: -1.0,
            ..Default::default()
        })
        .generate(g)
    });
    assert!(result.is_err());

    let text = String::from_utf8(g.into_inner()).unwrap();
    assert!(text.ends_with("M104 S0  ; cool extruder\nG28  ; home to top endstops\n"));
}
