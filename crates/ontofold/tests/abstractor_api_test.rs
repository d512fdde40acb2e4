//! Integration tests for the Abstractor API
//!
//! These tests run whole abstraction requests the way a front end would.

use ontofold::{
    Abstractor, OntofoldError,
    config::{AbstractionConfig, AppConfig},
    identifier::Id,
    issue::IssueCode,
    options::{AbstractionOptions, AbstractionRule},
    semantic::{
        Bound, Cardinality, ClassStereotype, ModelElement, Package, Project, RelationEnd,
        RelationStereotype,
    },
};
use ontofold_core::builder::ProjectBuilder;

/// The package added by the run.
fn abstraction_package(project: &Project) -> &Package {
    match project.model.contents.last() {
        Some(ModelElement::Package(package)) => package,
        other => panic!("expected the abstraction package last, found {other:?}"),
    }
}

fn classes(package: &Package) -> Vec<&str> {
    let mut names: Vec<&str> = package
        .contents
        .iter()
        .filter(|element| element.as_class().is_some())
        .map(ModelElement::name)
        .collect();
    names.sort();
    names
}

fn car_engine_temperature() -> (Project, Id) {
    let mut builder = ProjectBuilder::new("Vehicles");
    let car = builder.class("Car", Some(ClassStereotype::Kind));
    let engine = builder.class("Engine", Some(ClassStereotype::Kind));
    let temperature = builder.class("Temperature", Some(ClassStereotype::Quality));
    builder.component_of(car, engine);
    builder.relation(
        None,
        Some(RelationStereotype::Characterization),
        temperature,
        engine,
    );
    let diagram = builder.diagram_id();
    (builder.build(), diagram)
}

#[test]
fn test_abstractor_api_exists() {
    let _abstractor = Abstractor::default();
    let _configured = Abstractor::new(AppConfig::default());
}

#[test]
fn test_default_rule_on_vehicles() {
    let (project, diagram) = car_engine_temperature();
    let abstractor = Abstractor::default();

    let output = abstractor
        .abstract_project(&project, &AbstractionOptions::new().with_diagram(diagram))
        .expect("Failed to abstract");

    assert!(output.issues.is_empty());
    assert_eq!(output.result.diagrams.len(), 2);
    assert_eq!(output.result.diagrams[1].name(), "all: Vehicles");

    let package = abstraction_package(&output.result);
    assert_eq!(package.name.as_deref(), Some("all: Vehicles"));
    assert_eq!(classes(package), vec!["Car"]);

    let car = package
        .contents
        .iter()
        .find_map(ModelElement::as_class)
        .expect("Car should remain");
    assert_eq!(car.properties.len(), 1);
    assert_eq!(car.properties[0].name.as_deref(), Some("engine"));

    // Temperature was moved onto Car, then consumed as an aspect.
    assert!(
        package
            .contents
            .iter()
            .all(|element| element.as_relation().is_none())
    );

    // The input project is untouched apart from the additions.
    assert_eq!(
        output.result.model.contents.len(),
        project.model.contents.len() + 1
    );
    assert_eq!(output.result.diagrams[0], project.diagrams[0]);
}

#[test]
fn test_diagram_views_reference_new_package() {
    let (project, diagram) = car_engine_temperature();
    let output = Abstractor::default()
        .abstract_project(
            &project,
            &AbstractionOptions::new()
                .with_diagram(diagram)
                .with_rule(AbstractionRule::Parthood),
        )
        .expect("Failed to abstract");

    let package = abstraction_package(&output.result);
    let abstracted = &output.result.diagrams[1];
    assert_eq!(abstracted.name(), "parthood: Vehicles");
    assert_eq!(abstracted.owner.map(|owner| owner.id), Some(package.id));
    for view in &abstracted.contents {
        assert!(
            package.find(view.model_element().id).is_some(),
            "view {} should depict an element of the new package",
            view.id()
        );
    }
    // Car and Temperature plus the redirected characterization.
    assert_eq!(abstracted.contents.len(), 3);
}

#[test]
fn test_hierarchy_on_people() {
    let mut builder = ProjectBuilder::new("People");
    let person = builder.class("Person", Some(ClassStereotype::Kind));
    let student = builder.class("Student", Some(ClassStereotype::Role));
    let company = builder.class("Company", Some(ClassStereotype::Kind));
    builder.generalization(person, student);
    let works_at = builder.relation(
        Some("worksAt"),
        Some(RelationStereotype::Material),
        student,
        company,
    );
    builder
        .relation_end_mut(works_at, RelationEnd::Source)
        .unwrap()
        .cardinality = Cardinality::new(1, Bound::Unbounded);
    let diagram = builder.diagram_id();
    let project = builder.build();

    let options = AbstractionOptions::new()
        .with_diagram(diagram)
        .with_rule(AbstractionRule::Hierarchy);
    let output = Abstractor::default()
        .abstract_project(&project, &options)
        .expect("Failed to abstract");

    let package = abstraction_package(&output.result);
    assert_eq!(classes(package), vec!["Company", "Person"]);

    let person_id = package
        .contents
        .iter()
        .find(|element| element.name() == "Person")
        .map(ModelElement::id)
        .unwrap();
    let relation = package
        .contents
        .iter()
        .find_map(ModelElement::as_relation)
        .expect("worksAt should remain");
    assert_eq!(relation.name.as_deref(), Some("worksAt"));
    let source = relation.source_end().unwrap();
    assert_eq!(source.type_id(), Some(person_id));
    assert_eq!(source.role(), Some("Student"));
    assert_eq!(source.cardinality.lower(), 0);
}

#[test]
fn test_abstract_from_element_picks_first_diagram_showing_it() {
    let (project, _) = car_engine_temperature();
    let engine = project
        .model
        .contents
        .iter()
        .find(|element| element.name() == "Engine")
        .map(ModelElement::id)
        .unwrap();
    let car = project
        .model
        .contents
        .iter()
        .find(|element| element.name() == "Car")
        .map(ModelElement::id)
        .unwrap();

    let abstractor = Abstractor::default();

    let output = abstractor
        .abstract_project(&project, &AbstractionOptions::new().with_element(car))
        .expect("Failed to abstract");
    assert_eq!(output.result.diagrams[1].name(), "abstraction of Car: Vehicles");
    assert!(output.issues.is_empty());

    // Engine has nothing to fold into it.
    let output = abstractor
        .abstract_project(&project, &AbstractionOptions::new().with_element(engine))
        .expect("Failed to abstract");
    assert_eq!(output.issues.len(), 1);
    assert_eq!(output.issues[0].code(), IssueCode::NotAbstractableClass);
    assert_eq!(output.issues[0].source().name(), "Engine");
}

#[test]
fn test_unknown_element_is_fatal() {
    let (project, diagram) = car_engine_temperature();
    let abstractor = Abstractor::default();

    let result = abstractor.abstract_project(
        &project,
        &AbstractionOptions::new().with_element(Id::new("missing-element")),
    );
    match result {
        Err(err @ OntofoldError::UnknownElement(_)) => {
            assert!(err.to_string().contains("missing-element"));
        }
        other => panic!("expected an unknown element error, got {other:?}"),
    }

    let result = abstractor.abstract_project(
        &project,
        &AbstractionOptions::new()
            .with_diagram(diagram)
            .with_element(Id::new("missing-element")),
    );
    match result {
        Err(err @ OntofoldError::ElementNotOnDiagram { .. }) => {
            let message = err.to_string();
            assert!(message.contains("missing-element"));
            assert!(message.contains(&diagram.to_string()));
            assert!(!message.contains("any diagram"));
        }
        other => panic!("expected an element not on diagram error, got {other:?}"),
    }
}

#[test]
fn test_diagram_selection_errors() {
    let (project, _) = car_engine_temperature();
    let abstractor = Abstractor::default();

    assert!(matches!(
        abstractor.abstract_project(&project, &AbstractionOptions::new()),
        Err(OntofoldError::NoDiagramSelected)
    ));
    assert!(matches!(
        abstractor.abstract_project(
            &project,
            &AbstractionOptions::new().with_diagram(Id::new("nowhere"))
        ),
        Err(OntofoldError::UnknownDiagram(_))
    ));
}

#[test]
fn test_configured_default_rule_and_height() {
    let (project, diagram) = car_engine_temperature();
    let config = AppConfig::new(AbstractionConfig::new(35.0, AbstractionRule::Aspects));

    let output = Abstractor::new(config)
        .abstract_project(&project, &AbstractionOptions::new().with_diagram(diagram))
        .expect("Failed to abstract");

    assert_eq!(output.result.diagrams[1].name(), "aspects: Vehicles");
    // Temperature characterizes Engine, so only the quality is folded.
    assert_eq!(
        classes(abstraction_package(&output.result)),
        vec!["Car", "Engine"]
    );
}

#[test]
fn test_json_round_trip_through_abstractor() {
    let (project, diagram) = car_engine_temperature();
    let json = serde_json::to_string(&project).expect("Failed to serialize");

    let output = Abstractor::default()
        .abstract_json(&json, &AbstractionOptions::new().with_diagram(diagram))
        .expect("Failed to abstract");

    let value: serde_json::Value = serde_json::from_str(&output).expect("Invalid output");
    assert_eq!(value["result"]["type"], "Project");
    assert_eq!(value["result"]["diagrams"][1]["name"], "all: Vehicles");
    assert_eq!(value["issues"].as_array().map(Vec::len), Some(0));

    assert!(matches!(
        Abstractor::default().abstract_json("{ not json", &AbstractionOptions::new()),
        Err(OntofoldError::Json(_))
    ));
}
