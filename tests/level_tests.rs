//! Integrationstests für Level-Dateien:
//! - Mitgeliefertes Kreuzungs-Level (TOML)
//! - JSON-Level mit expliziten Kurvendaten
//! - Fehlerfälle (Endung, Syntax, ungültiges Wegnetz)

use std::path::{Path, PathBuf};

use glam::Vec3;
use traffic_way_sim::engine::{EdgeKind, LightType, NodeKind};
use traffic_way_sim::{
    load_level, load_level_with_segments, parse_level, write_level, LevelFile, LevelFormat,
    SimOptions, Simulation,
};

fn crossing_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("levels/crossing.toml")
}

const CURVED_JSON: &str = r#"{
    "name": "Kurve",
    "way_points": [
        {
            "id": 1,
            "position": [0.0, 0.0, 0.0],
            "forward": [0.0, 0.0, 1.0],
            "kind": { "type": "spawn" },
            "outbounds": [2],
            "curves": {
                "outbound_path_mapping": [0],
                "start_tangents": [[5.0, 0.0, 0.0]],
                "end_tangents": [[10.0, 0.0, 5.0]]
            }
        },
        {
            "id": 2,
            "position": [10.0, 0.0, 10.0],
            "kind": { "type": "end" }
        }
    ]
}"#;

#[test]
fn test_crossing_level_loads() {
    let graph = load_level(&crossing_path()).expect("Kreuzungs-Level lädt");

    assert_eq!(graph.way_point_count(), 9);
    assert_eq!(graph.edge_count(), 7);
    assert_eq!(graph.spawn_points().count(), 2);
    assert_eq!(graph.light_state(1), Some(LightType::SteadyGreen));
    assert_eq!(graph.light_state(2), Some(LightType::SteadyRed));

    // Abzweig nach Osten wird zur abgeleiteten Kurve, geradeaus bleibt gerade
    assert_eq!(graph.curve_count(), 1);
    assert_eq!(graph.edge_kind(12, 0), EdgeKind::Straight);
    match graph.edge_kind(12, 1) {
        EdgeKind::Curve {
            control_start,
            control_end,
        } => {
            assert_eq!(control_start, Vec3::new(0.0, 0.0, 13.0));
            assert_eq!(control_end, Vec3::new(25.0, 0.0, 20.0));
        }
        EdgeKind::Straight => panic!("Outbound 1 von Way-Point 12 sollte eine Kurve sein"),
    }

    let label = &graph.way_point(12).expect("Way-Point 12 vorhanden").label;
    assert_eq!(label, "nord_abzweig");
    assert_eq!(
        graph.way_point(21).map(|p| p.kind),
        Some(NodeKind::StopLine { light: 2 })
    );
}

#[test]
fn test_crossing_level_respects_segment_count() {
    let graph = load_level_with_segments(&crossing_path(), 4).expect("Kreuzungs-Level lädt");
    let path = graph.curve_path(12, 1).expect("Kurve vorhanden");
    assert_eq!(path.points().len(), 5);
    assert_eq!(graph.segment_count(), 4);
}

#[test]
fn test_crossing_level_simulates() {
    let graph = load_level(&crossing_path()).expect("Kreuzungs-Level lädt");
    let options = SimOptions {
        seed: Some(3),
        ..SimOptions::default()
    };
    let mut sim = Simulation::new(graph, options);

    let events = sim.tick(1.0 / 60.0);

    assert_eq!(events.len(), 1);
    assert_eq!(sim.spawners().len(), 2);
    assert_eq!(sim.car_count(), 1);
}

#[test]
fn test_json_level_keeps_explicit_curves() {
    let level = parse_level(CURVED_JSON, LevelFormat::Json).expect("gültiges JSON");
    assert_eq!(level.name, "Kurve");
    assert_eq!(level.way_points.len(), 2);
    assert_eq!(level.way_points[1].forward, Vec3::Z);

    let graph = level.build(10).expect("gültiges Wegnetz");
    assert_eq!(
        graph.edge_kind(1, 0),
        EdgeKind::Curve {
            control_start: Vec3::new(5.0, 0.0, 0.0),
            control_end: Vec3::new(10.0, 0.0, 5.0),
        }
    );
    let path = graph.curve_path(1, 0).expect("Kurve vorhanden");
    assert_eq!(path.last_point(), Some(Vec3::new(10.0, 0.0, 10.0)));
}

#[test]
fn test_json_write_and_parse_again() {
    let level = parse_level(CURVED_JSON, LevelFormat::Json).expect("gültiges JSON");
    let text = write_level(&level, LevelFormat::Json).expect("serialisierbar");

    let again: LevelFile = parse_level(&text, LevelFormat::Json).expect("gültiges JSON");
    assert_eq!(again.way_points.len(), 2);
    assert_eq!(again.way_points[0].curves, level.way_points[0].curves);
    assert_eq!(again.way_points[0].kind, NodeKind::Spawn);
}

#[test]
fn test_format_from_extension() {
    assert_eq!(
        LevelFormat::from_path(Path::new("a/level.TOML")).expect("bekannt"),
        LevelFormat::Toml
    );
    assert_eq!(
        LevelFormat::from_path(Path::new("level.json")).expect("bekannt"),
        LevelFormat::Json
    );
    assert!(LevelFormat::from_path(Path::new("level.xml")).is_err());
    assert!(LevelFormat::from_path(Path::new("level")).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let err = load_level(Path::new("/nonexistent/level.toml")).expect_err("Datei fehlt");
    assert!(format!("{err:#}").contains("nicht lesbar"));
}

#[test]
fn test_broken_toml_is_an_error() {
    assert!(parse_level("way_points = [", LevelFormat::Toml).is_err());
}

#[test]
fn test_dangling_outbound_fails_build() {
    let text = r#"
name = "kaputt"

[[way_points]]
id = 1
position = [0.0, 0.0, 0.0]
outbounds = [99]
"#;
    let level = parse_level(text, LevelFormat::Toml).expect("gültiges TOML");
    let err = level.build(10).expect_err("Outbound 99 existiert nicht");
    assert!(format!("{err:#}").contains("kaputt"));
}
