//! Ontofold - OntoUML model abstraction.
//!
//! Folds a diagram of an OntoUML project into a smaller one: parts into their
//! wholes, specific classes into general classes, and moments into the
//! endurants that bear them. The input project is never modified; the result
//! is a copy with one new package and one new diagram holding the abstraction.

pub mod config;
pub mod options;
pub mod rules;
pub mod structure;

mod error;

pub use ontofold_core::{diagram, identifier, issue, semantic};

pub use error::OntofoldError;

use log::{debug, info};
use serde::Serialize;

use ontofold_core::{
    diagram::Diagram,
    issue::AbstractionIssue,
    semantic::{ModelElement, Project},
};

use config::AppConfig;
use options::AbstractionOptions;
use rules::AbstractionRules;
use structure::ModelGraph;

/// The abstracted project and the issues found while abstracting.
#[derive(Debug, Clone, Serialize)]
pub struct AbstractionOutput {
    /// The input project plus the new package and diagram.
    pub result: Project,
    pub issues: Vec<AbstractionIssue>,
}

/// Entry point for abstracting OntoUML projects.
///
/// # Examples
///
/// ```
/// use ontofold::{Abstractor, options::AbstractionOptions};
/// use ontofold_core::builder::ProjectBuilder;
/// use ontofold_core::semantic::ClassStereotype;
///
/// let mut builder = ProjectBuilder::new("Vehicles");
/// let car = builder.class("Car", Some(ClassStereotype::Kind));
/// let engine = builder.class("Engine", Some(ClassStereotype::Kind));
/// builder.component_of(car, engine);
/// let diagram = builder.diagram_id();
/// let project = builder.build();
///
/// let abstractor = Abstractor::default();
/// let output = abstractor
///     .abstract_project(&project, &AbstractionOptions::new().with_diagram(diagram))
///     .expect("Failed to abstract");
///
/// assert_eq!(output.result.diagrams.len(), 2);
/// assert_eq!(output.result.diagrams[1].name(), "all: Vehicles");
/// ```
#[derive(Debug, Default)]
pub struct Abstractor {
    config: AppConfig,
}

impl Abstractor {
    /// Create a new abstractor with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration with the fold engine settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Abstracts one diagram of `project`.
    ///
    /// With an active element the run abstracts from that element only, on
    /// the active diagram or else the first diagram showing the element.
    /// Otherwise the requested rule, or the configured default rule, is
    /// applied to the active diagram. The new package and diagram are named
    /// `"<mode>: <diagram name>"`.
    ///
    /// # Errors
    ///
    /// Returns `OntofoldError` when the diagram or element cannot be found,
    /// the element is not on the selected diagram, or the diagram is
    /// inconsistent with the model.
    pub fn abstract_project(
        &self,
        project: &Project,
        options: &AbstractionOptions,
    ) -> Result<AbstractionOutput, OntofoldError> {
        info!(
            project:% = project.id,
            diagram:? = options.active_diagram_id,
            element:? = options.active_element_id,
            rule:? = options.abstraction_rule;
            "Abstracting project"
        );

        let diagram = select_diagram(project, options)?;
        let graph = ModelGraph::new(&project.model, diagram)?;
        let mut rules = AbstractionRules::new(graph, self.config.abstraction().attribute_height());

        let mode = match options.active_element_id {
            Some(element) => {
                let id = rules
                    .graph()
                    .resolve(element)
                    .filter(|id| rules.graph().contains(*id))
                    .ok_or(match options.active_diagram_id {
                        Some(diagram) => OntofoldError::ElementNotOnDiagram { element, diagram },
                        None => OntofoldError::UnknownElement(element),
                    })?;
                let name = rules
                    .graph()
                    .node(id)
                    .map(|node| node.name().to_string())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| element.to_string());
                rules.abstract_from(id)?;
                format!("abstraction of {name}")
            }
            None => {
                let rule = options.rule_or(self.config.abstraction().default_rule());
                rules.apply(rule)?;
                rule.to_string()
            }
        };

        let (graph, issues) = rules.into_parts();
        let stats = graph.stats();
        debug!(
            classes = stats.classes,
            relations = stats.relations,
            views = stats.views;
            "Abstraction graph after folding"
        );

        let name = format!("{mode}: {}", diagram.name());
        let model = graph.export_model(&name);
        let abstracted = graph.export_diagram(&name, &model);

        let mut result = project.clone();
        result.model.contents.push(ModelElement::Package(model));
        result.diagrams.push(abstracted);

        info!(name, issues = issues.len(); "Abstraction finished");
        Ok(AbstractionOutput { result, issues })
    }

    /// Abstracts a project given in the OntoUML JSON format and returns the
    /// output as JSON.
    ///
    /// # Errors
    ///
    /// As [`Abstractor::abstract_project`], plus `OntofoldError::Json` for
    /// malformed input.
    pub fn abstract_json(
        &self,
        json: &str,
        options: &AbstractionOptions,
    ) -> Result<String, OntofoldError> {
        let project: Project = serde_json::from_str(json)?;
        let output = self.abstract_project(&project, options)?;
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn select_diagram<'a>(
    project: &'a Project,
    options: &AbstractionOptions,
) -> Result<&'a Diagram, OntofoldError> {
    match (options.active_diagram_id, options.active_element_id) {
        (Some(diagram), _) => project
            .diagram(diagram)
            .ok_or(OntofoldError::UnknownDiagram(diagram)),
        (None, Some(element)) => project
            .diagram_showing(element)
            .ok_or(OntofoldError::UnknownElement(element)),
        (None, None) => Err(OntofoldError::NoDiagramSelected),
    }
}
