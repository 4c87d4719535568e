//! Analyzer tests

use bounce_core::{analyze_scenario, parse_scenario, Diagnostics};

fn analyze(source: &str) -> Diagnostics {
    let scenario = parse_scenario(source).expect("should parse");
    analyze_scenario(&scenario)
}

fn messages(diagnostics: &Diagnostics) -> Vec<String> {
    diagnostics.iter().map(|d| d.to_string()).collect()
}

#[test]
fn test_valid_scenario_is_clean() {
    let diagnostics = analyze(
        r#"
arena width = 10.0 height = 10.0
ball a at (2.0, 2.0) vel (1.0, 0.0) radius 0.5
ball b at (6.0, 6.0) radius 0.5
simulate dt = 0.01 steps = 100
detect d = distance(a, b)
"#,
    );
    assert!(diagnostics.is_empty(), "{:?}", messages(&diagnostics));
}

#[test]
fn test_duplicate_ball_names() {
    let diagnostics = analyze(
        r#"
arena width = 10.0 height = 10.0
ball a at (2.0, 2.0) radius 0.5
ball a at (6.0, 6.0) radius 0.5
simulate dt = 0.01 steps = 100
"#,
    );
    assert!(diagnostics.has_errors());
    assert!(messages(&diagnostics)
        .iter()
        .any(|m| m.contains("duplicate ball name 'a'")));
}

#[test]
fn test_unknown_ball_in_detector() {
    let diagnostics = analyze(
        r#"
arena width = 10.0 height = 10.0
ball a at (2.0, 2.0) radius 0.5
simulate dt = 0.01 steps = 100
detect d = distance(a, ghost)
"#,
    );
    assert_eq!(diagnostics.errors().count(), 1);
    assert!(messages(&diagnostics)[0].contains("unknown ball 'ghost'"));
}

#[test]
fn test_demo_layout_names_are_known() {
    let diagnostics = analyze(
        "arena width = 10 height = 10\nsimulate dt = 0.01 steps = 1\ndetect d = distance(b0, b1)",
    );
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_radius_problems() {
    let diagnostics = analyze(
        r#"
arena width = 4.0 height = 2.0
ball flat at (1.0, 1.0) radius 0.0
ball huge at (2.0, 1.0) radius 1.2
simulate dt = 0.01 steps = 100
"#,
    );
    let msgs = messages(&diagnostics);
    assert_eq!(diagnostics.errors().count(), 2, "{:?}", msgs);
    assert!(msgs.iter().any(|m| m.contains("non-positive radius")));
    assert!(msgs.iter().any(|m| m.contains("does not fit")));
}

#[test]
fn test_placement_warnings() {
    let diagnostics = analyze(
        r#"
arena width = 10.0 height = 10.0
ball out at (0.1, 5.0) radius 0.5
ball a at (5.0, 5.0) radius 0.5
ball b at (5.5, 5.0) radius 0.5
simulate dt = 0.01 steps = 0
"#,
    );
    assert!(!diagnostics.has_errors());
    let warnings: Vec<String> = diagnostics.warnings().map(|d| d.to_string()).collect();
    assert_eq!(warnings.len(), 3, "{:?}", warnings);
    assert!(warnings.iter().any(|m| m.contains("starts outside")));
    assert!(warnings.iter().any(|m| m.contains("start overlapping")));
    assert!(warnings.iter().any(|m| m.contains("zero steps")));
}

#[test]
fn test_bad_settings() {
    let diagnostics = analyze(
        r#"
arena width = 0.0 height = 10.0
margin -0.5
collision model = simplified cooldown = -1.0
simulate dt = 0.0 steps = 10
"#,
    );
    let msgs = messages(&diagnostics);
    assert_eq!(diagnostics.errors().count(), 4, "{:?}", msgs);
    assert!(msgs.iter().any(|m| m.contains("arena dimensions")));
    assert!(msgs.iter().any(|m| m.contains("margin")));
    assert!(msgs.iter().any(|m| m.contains("cooldown")));
    assert!(msgs.iter().any(|m| m.contains("time step")));
}

#[test]
fn test_duplicate_detector_names() {
    let diagnostics = analyze(
        r#"
arena width = 10.0 height = 10.0
ball a at (2.0, 2.0) radius 0.5
simulate dt = 0.01 steps = 1
detect x = position(a)
detect x = speed(a)
"#,
    );
    assert!(messages(&diagnostics)
        .iter()
        .any(|m| m.contains("duplicate detector name 'x'")));
}
