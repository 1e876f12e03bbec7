use hemikit::{write_program, Job};
use hemikit_camtools::{HemispiralParameters, ScaffoldParameters, SessionHeader};
use hemikit_settings::Config;
use std::f64::consts::PI;
use std::io::Read;

fn render(config: &Config, job: &Job) -> String {
    let out = write_program(Vec::new(), config, job, &SessionHeader::new("hemikit")).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_demo_is_bracketed_and_ordered() {
    let text = render(&Config::default(), &Job::Demo);

    let preamble = text.find("; *** Main G-code ***").unwrap();
    let skirt = text.find("; Custom skirt with radius 50.000000").unwrap();
    let dome = text.find("; Hemi-Spiral, radius=75.000000").unwrap();
    let first_layer = text.find("; First layer").unwrap();
    let coda = text.find("; *** Coda ***").unwrap();
    assert!(preamble < skirt && skirt < dome && dome < first_layer && first_layer < coda);

    assert!(text.contains("top_width=0.290000"));
    assert!(text.contains("G1 Z100.00 F18000\n"));
    assert!(text.ends_with("M104 S0  ; cool extruder\nG28  ; home to top endstops\n"));
}

#[test]
fn test_output_is_deterministic() {
    let job = Job::Hemispiral {
        params: HemispiralParameters {
            radius: 15.0,
            start: -0.3 * PI,
            end: 0.3 * PI,
            top_width: None,
        },
        skirt: true,
    };
    let config = Config::default();
    assert_eq!(render(&config, &job), render(&config, &job));
}

#[test]
fn test_printer_settings_are_echoed() {
    let mut config = Config::default();
    config.printer.filament_diameter = 1.72;
    config.printer.extrusion_width = 0.3;
    config.printer.default_layer_height = 0.29;
    let text = render(
        &config,
        &Job::Scaffold(ScaffoldParameters {
            radius: 10.0,
            gap: 5.0,
            layers: 2,
        }),
    );
    assert!(text.contains("; filament_diameter = 1.72\n"));
    assert!(text.contains("; extrusion_width = 0.3\n"));
    assert!(text.contains("; default_layer_height = 0.29\n"));
}

#[test]
fn test_invalid_config_writes_nothing() {
    let mut config = Config::default();
    config.trace.tolerance = -1.0;
    let mut sink = Vec::new();
    let failed = write_program(&mut sink, &config, &Job::Demo, &SessionHeader::new("t")).is_err();
    assert!(failed);
    assert!(sink.is_empty());
}

#[test]
fn test_rejected_dome_reports_job() {
    let job = Job::Hemispiral {
        params: HemispiralParameters {
            top_width: Some(0.05),
            ..Default::default()
        },
        skirt: false,
    };
    let err = write_program(Vec::new(), &Config::default(), &job, &SessionHeader::new("t"))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("hemispiral"));
}

#[test]
fn test_writes_to_file() {
    let mut file = tempfile::tempfile().unwrap();
    let job = Job::Destring(Default::default());
    let mut file_out = write_program(
        file.try_clone().unwrap(),
        &Config::default(),
        &job,
        &SessionHeader::new("hemikit"),
    )
    .unwrap();
    std::io::Write::flush(&mut file_out).unwrap();

    use std::io::Seek;
    file.rewind().unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    assert!(text.starts_with("; hemikit\n"));
    assert!(text.contains("; *** Coda ***"));
}
