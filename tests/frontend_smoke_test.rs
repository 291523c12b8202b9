use std::fs;

#[test]
fn minimal_frontend_exists_and_covers_api_groups() {
    let html = fs::read_to_string("frontend/index.html")
        .expect("expected frontend/index.html to exist for backend smoke testing");

    for needle in [
        "citynav Smoke UI",
        "/health",
        "/api/locations",
        "/api/locations/nearby",
        "/api/categories",
        "/api/routes",
        "/api/distance",
        "id=\"request-presets\"",
        "id=\"send-request\"",
        "id=\"plan-route\"",
        "id=\"measure-distance\"",
    ] {
        assert!(
            html.contains(needle),
            "frontend/index.html is missing required marker: {needle}"
        );
    }
}

#[test]
fn frontend_route_modes_match_api() {
    let html = fs::read_to_string("frontend/index.html").unwrap();

    for mode in ["walking", "cycling", "driving"] {
        assert!(
            html.contains(&format!("value=\"{mode}\"")),
            "route mode {mode} is not selectable"
        );
    }
}
