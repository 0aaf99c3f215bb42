use approx::assert_relative_eq;
use serde_json::json;
use transport_catalogue::{io::json as json_io, prelude::*};

fn settings_json(palette: serde_json::Value) -> serde_json::Value {
    json!({
        "width": 600.0,
        "height": 400.0,
        "padding": 50.0,
        "stop_radius": 5.0,
        "line_width": 14.0,
        "bus_label_font_size": 20,
        "bus_label_offset": [7.0, 15.0],
        "stop_label_font_size": 20,
        "stop_label_offset": [7.0, -3.0],
        "underlayer_color": [255, 255, 255, 0.85],
        "underlayer_width": 3.0,
        "color_palette": palette
    })
}

#[test]
fn roundtrip_route_scenario() {
    let mut catalogue = Catalogue::new();
    let a = catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();
    let b = catalogue.add_stop("B", Coordinates::new(0.0, 10.0)).unwrap();
    catalogue.add_bus("X", ["A", "B"], true).unwrap();

    let mut distances = DistanceTable::new();
    distances.set(a, b, 1000);

    let stat = StatsEngine::new(&catalogue, &distances).route_info("X").unwrap();
    let geodesic = great_circle_distance(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 10.0));

    assert_eq!(stat.stops_count, 2);
    assert_eq!(stat.unique_stops_count, 2);
    assert_eq!(stat.route_length, 1000);
    assert_relative_eq!(stat.curvature.ratio().unwrap(), 1000.0 / geodesic);
}

#[test]
fn rejected_bus_leaves_catalogue_unchanged() {
    let mut catalogue = Catalogue::new();
    catalogue.add_stop("A", Coordinates::new(0.0, 0.0)).unwrap();

    let err = catalogue.add_bus("X", ["A", "B"], false).unwrap_err();

    assert!(matches!(err, CatalogueError::UnknownStopReference { .. }));
    assert_eq!(catalogue.bus_count(), 0);
}

#[test]
fn map_request_wraps_palette() {
    let document = json!({
        "base_requests": [
            {"type": "Stop", "name": "A", "latitude": 43.0, "longitude": 39.0},
            {"type": "Stop", "name": "B", "latitude": 43.1, "longitude": 39.2},
            {"type": "Stop", "name": "C", "latitude": 43.2, "longitude": 39.1},
            {"type": "Bus", "name": "3", "stops": ["C", "A"], "is_roundtrip": false},
            {"type": "Bus", "name": "1", "stops": ["A", "B"], "is_roundtrip": false},
            {"type": "Bus", "name": "2", "stops": ["B", "C", "B"], "is_roundtrip": true}
        ],
        "render_settings": settings_json(json!(["green", [255, 160, 0]])),
        "stat_requests": [{"id": 5, "type": "Map"}]
    });

    let responses = json_io::process(&document.to_string()).unwrap();
    let value = serde_json::to_value(&responses).unwrap();
    let map = value[0]["map"].as_array().unwrap();

    assert_eq!(value[0]["request_id"], 5);

    let lines: Vec<_> = map
        .iter()
        .filter(|p| p["type"] == "polyline")
        .map(|p| p["stroke"].clone())
        .collect();
    assert_eq!(lines, vec![json!("green"), json!([255, 160, 0]), json!("green")]);

    // Everything stays on the canvas.
    for primitive in map {
        for point in [&primitive["center"], &primitive["position"]] {
            if let (Some(x), Some(y)) = (point["x"].as_f64(), point["y"].as_f64()) {
                assert!((50.0 - 1e-6..=550.0 + 1e-6).contains(&x), "x = {x}");
                assert!((50.0 - 1e-6..=350.0 + 1e-6).contains(&y), "y = {y}");
            }
        }
    }

    let types: Vec<_> = map.iter().map(|p| p["type"].as_str().unwrap()).collect();
    let first_circle = types.iter().position(|t| *t == "circle").unwrap();
    assert!(types[..first_circle].iter().all(|t| *t != "circle"));
    assert_eq!(types[first_circle..first_circle + 3], ["circle", "circle", "circle"]);
    assert_eq!(types.len(), 3 + 2 * 5 + 3 + 2 * 3);
}

#[test]
fn invalid_render_settings_are_rejected() {
    let document = json!({
        "render_settings": settings_json(json!([])),
        "stat_requests": []
    });

    let err = json_io::process(&document.to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Invalid render_settings");
}

#[test]
fn text_script_out_and_back() {
    let script = "\
Stop A: 0, 0, 1000m to B
Stop B: 0, 10
Bus Y: A - B
Bus Y
Stop B
";

    let responses = transport_catalogue::io::text::process(script.as_bytes()).unwrap();
    assert_eq!(responses.len(), 2);
    assert!(responses[0].starts_with("Bus Y: 3 stops on route, 2 unique stops, 2000 route length"));
    assert_eq!(responses[1], "Stop B: buses Y");
}
