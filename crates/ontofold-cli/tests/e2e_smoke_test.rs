use std::{fs, path::PathBuf};

use tempfile::tempdir;

use ontofold::{
    options::AbstractionRule,
    semantic::{ModelElement, Project},
};
use ontofold_cli::{Args, run};

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .to_string()
}

fn args(input: String, output: String) -> Args {
    Args {
        input,
        output,
        diagram: Some("vehicles_diagram".to_string()),
        element: None,
        rule: None,
        issues: None,
        config: None,
        log_level: "off".to_string(),
    }
}

fn read_project(path: &str) -> Project {
    let content = fs::read_to_string(path).expect("Failed to read output");
    serde_json::from_str(&content).expect("Output is not a valid project")
}

fn abstracted_class_names(project: &Project) -> Vec<String> {
    let Some(ModelElement::Package(package)) = project.model.contents.last() else {
        panic!("expected the abstraction package last");
    };
    let mut names: Vec<String> = package
        .contents
        .iter()
        .filter(|element| element.as_class().is_some())
        .map(|element| element.name().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn e2e_smoke_test_default_rule() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("vehicles.json");
    let output = output.to_string_lossy().to_string();

    run(&args(fixture("vehicles.json"), output.clone())).expect("Run failed");

    let project = read_project(&output);
    assert_eq!(project.diagrams.len(), 2);
    assert_eq!(project.diagrams[1].name(), "all: Vehicles");
    assert_eq!(abstracted_class_names(&project), vec!["Car", "Person"]);
}

#[test]
fn e2e_smoke_test_each_rule() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let cases = [
        (
            AbstractionRule::Parthood,
            vec!["Car", "Driver", "Person", "Temperature"],
        ),
        (
            AbstractionRule::Hierarchy,
            vec!["Car", "Engine", "Person", "Temperature"],
        ),
        (
            AbstractionRule::Aspects,
            vec!["Car", "Driver", "Engine", "Person"],
        ),
    ];

    for (rule, expected) in cases {
        let output = temp_dir.path().join(format!("{rule}.json"));
        let output = output.to_string_lossy().to_string();
        let mut args = args(fixture("vehicles.json"), output.clone());
        args.rule = Some(rule);

        run(&args).unwrap_or_else(|err| panic!("Rule {rule} failed: {err}"));

        let project = read_project(&output);
        assert_eq!(
            project.diagrams[1].name(),
            format!("{rule}: Vehicles"),
            "unexpected diagram name for {rule}"
        );
        assert_eq!(abstracted_class_names(&project), expected, "rule {rule}");
    }
}

#[test]
fn e2e_smoke_test_element_writes_issues() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");
    let issues = temp_dir.path().join("issues.json");

    let mut args = args(
        fixture("vehicles.json"),
        output.to_string_lossy().to_string(),
    );
    args.diagram = None;
    args.element = Some("engine".to_string());
    args.issues = Some(issues.to_string_lossy().to_string());

    run(&args).expect("Run failed");

    let project = read_project(&args.output);
    assert_eq!(
        project.diagrams[1].name(),
        "abstraction of Engine: Vehicles"
    );

    let issues: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&issues).expect("Failed to read issues"))
            .expect("Issues are not valid JSON");
    let issues = issues.as_array().expect("Issues should be a list");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["code"], "not_abstractable_class");
}

#[test]
fn e2e_smoke_test_with_config() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[abstraction]\ndefault_rule = \"hierarchy\"\n")
        .expect("Failed to write config");
    let output = temp_dir.path().join("out.json");

    let mut args = args(
        fixture("vehicles.json"),
        output.to_string_lossy().to_string(),
    );
    args.config = Some(config.to_string_lossy().to_string());

    run(&args).expect("Run failed");

    let project = read_project(&args.output);
    assert_eq!(project.diagrams[1].name(), "hierarchy: Vehicles");
}

#[test]
fn e2e_smoke_test_invalid_inputs() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir
        .path()
        .join("never.json")
        .to_string_lossy()
        .to_string();

    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "{ \"type\": \"Project\", ").expect("Failed to write input");

    let failing = [
        args(broken.to_string_lossy().to_string(), output.clone()),
        args(fixture("missing.json"), output.clone()),
        Args {
            diagram: Some("no_such_diagram".to_string()),
            ..args(fixture("vehicles.json"), output.clone())
        },
        Args {
            diagram: None,
            ..args(fixture("vehicles.json"), output.clone())
        },
    ];

    for args in &failing {
        assert!(run(args).is_err(), "expected failure for {args:?}");
    }
    assert!(!PathBuf::from(&output).exists());
}
