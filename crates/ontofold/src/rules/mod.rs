//! Abstraction rules that fold a model graph into a smaller one.
//!
//! [`AbstractionRules`] owns the graph it rewrites. Each entry point folds
//! nodes into their neighbours through the graph's mutation primitives and
//! records non-fatal findings as [`AbstractionIssue`]s. The three rule
//! families live in their own modules:
//!
//! - `parthood`: parts folded into their wholes
//! - `hierarchy`: specific classes folded into their general classes
//! - `aspects`: moments folded into the endurants they depend on

mod aspects;
mod hierarchy;
mod parthood;

use std::collections::HashSet;

use log::{debug, trace};

use ontofold_core::{identifier::Id, issue::AbstractionIssue, semantic::ModelElement};

use crate::{
    options::AbstractionRule,
    structure::{GraphError, GraphNode, ModelGraph},
};

/// The fold engine.
///
/// # Examples
///
/// ```
/// use ontofold::rules::AbstractionRules;
/// use ontofold::structure::ModelGraph;
/// use ontofold_core::builder::ProjectBuilder;
/// use ontofold_core::semantic::ClassStereotype;
///
/// let mut builder = ProjectBuilder::new("Vehicles");
/// let car = builder.class("Car", Some(ClassStereotype::Kind));
/// let engine = builder.class("Engine", Some(ClassStereotype::Kind));
/// builder.component_of(car, engine);
/// let project = builder.build();
///
/// let graph = ModelGraph::new(&project.model, &project.diagrams[0]).unwrap();
/// let relations = graph.part_of_relations();
/// let mut rules = AbstractionRules::new(graph, 20.0);
/// rules.parthood(&relations).unwrap();
///
/// let (graph, issues) = rules.into_parts();
/// assert_eq!(graph.stats().classes, 1);
/// assert!(issues.is_empty());
/// ```
#[derive(Debug)]
pub struct AbstractionRules {
    graph: ModelGraph,
    folded: HashSet<Id>,
    issues: Vec<AbstractionIssue>,
    attribute_height: f32,
}

impl AbstractionRules {
    /// Creates an engine over `graph`; every folded component grows its
    /// whole's views by `attribute_height`.
    pub fn new(graph: ModelGraph, attribute_height: f32) -> Self {
        Self {
            graph,
            folded: HashSet::new(),
            issues: Vec::new(),
            attribute_height,
        }
    }

    pub fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    pub fn issues(&self) -> &[AbstractionIssue] {
        &self.issues
    }

    /// Consumes the engine, returning the rewritten graph and the issues found.
    pub fn into_parts(self) -> (ModelGraph, Vec<AbstractionIssue>) {
        (self.graph, self.issues)
    }

    /// Abstracts from a single graph node.
    ///
    /// Part-whole relations are folded as parthood, generalizations and sets
    /// as hierarchy, moments as aspects, and any other class by folding
    /// everything that points into it. Other relations have no rule. When
    /// nothing ends up folded, the element is reported as a
    /// `not_abstractable_class` issue.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] when `id` is not in the graph, or any error
    /// raised by a mutation primitive.
    pub fn abstract_from(&mut self, id: Id) -> Result<(), GraphError> {
        let node = self.graph.node(id).ok_or(GraphError::UnknownNode(id))?;
        let element = node.element().clone();
        let is_class = node.is_class();
        let before = self.graph.stats().classes;

        if node.is_part_whole() {
            debug!(relation:% = id; "Abstracting from part-whole relation");
            self.process_parthood(id)?;
        } else if node.is_generalization() {
            debug!(generalization:% = id; "Abstracting from generalization");
            self.process_generalization(id)?;
        } else if node.is_generalization_set() {
            debug!(set:% = id; "Abstracting from generalization set");
            self.process_generalization_set(id)?;
        } else if node.is_moment() {
            debug!(class:% = id; "Abstracting from moment");
            self.abstract_aspect(id)?;
        } else if is_class {
            debug!(class:% = id; "Abstracting from class");
            self.fold_node(id)?;
        } else {
            debug!(relation:% = id, name = node.name(); "No rule abstracts relation");
        }

        if self.graph.stats().classes == before {
            let description = if is_class {
                format!("nothing could be folded into `{}`", element.name())
            } else {
                format!("nothing could be folded along `{}`", label_of(&element))
            };
            self.issues
                .push(AbstractionIssue::not_abstractable_class(element).with_description(description));
        }
        Ok(())
    }

    /// Applies a bulk rule to the whole graph.
    ///
    /// [`AbstractionRule::All`] runs parthood, then aspects, then hierarchy,
    /// each over what the previous step left.
    pub fn apply(&mut self, rule: AbstractionRule) -> Result<(), GraphError> {
        match rule {
            AbstractionRule::Parthood => {
                let relations = self.graph.part_of_relations();
                self.parthood(&relations)
            }
            AbstractionRule::Hierarchy => {
                let generalizations = self.graph.generalizations();
                let sets = self.graph.generalization_sets();
                self.hierarchy(&generalizations, &sets)
            }
            AbstractionRule::Aspects => {
                let moments = self.graph.moments();
                self.aspects(&moments)
            }
            AbstractionRule::All => {
                self.apply(AbstractionRule::Parthood)?;
                self.apply(AbstractionRule::Aspects)?;
                self.apply(AbstractionRule::Hierarchy)
            }
        }
    }

    /// Folds every given part-whole relation; ids already gone are skipped.
    pub fn parthood(&mut self, relations: &[Id]) -> Result<(), GraphError> {
        debug!(relations = relations.len(); "Applying parthood rule");
        for id in relations {
            if self.graph.contains(*id) {
                self.process_parthood(*id)?;
            }
        }
        Ok(())
    }

    /// Folds every given generalization, then whatever remains of the sets.
    pub fn hierarchy(&mut self, generalizations: &[Id], sets: &[Id]) -> Result<(), GraphError> {
        debug!(
            generalizations = generalizations.len(),
            sets = sets.len();
            "Applying hierarchy rule"
        );
        for id in generalizations {
            if self.graph.contains(*id) {
                self.process_generalization(*id)?;
            }
        }
        for id in sets {
            if self.graph.contains(*id) {
                self.process_generalization_set(*id)?;
            }
        }
        Ok(())
    }

    /// Folds every given moment into its endurants.
    pub fn aspects(&mut self, moments: &[Id]) -> Result<(), GraphError> {
        debug!(moments = moments.len(); "Applying aspects rule");
        for id in moments {
            if self.graph.is_class(*id) {
                self.abstract_aspect(*id)?;
            }
        }
        Ok(())
    }

    /// Folds into `id` every part and every specialization pointing at it.
    ///
    /// Each class is folded at most once; the memo is set before descending,
    /// so cycles terminate.
    fn fold_node(&mut self, id: Id) -> Result<(), GraphError> {
        if !self.folded.insert(id) {
            return Ok(());
        }
        trace!(class:% = id; "Folding class");

        // Parthood may reroute more part-whole relations onto this class.
        let mut seen = HashSet::new();
        while let Some(relation) = self.next_incoming(id, &seen, GraphNode::is_part_whole) {
            seen.insert(relation);
            self.process_parthood(relation)?;
        }

        while let Some(edge) = self.next_incoming(id, &seen, |node| {
            node.is_generalization() || node.is_generalization_set()
        }) {
            seen.insert(edge);
            if self.graph.node(edge).is_some_and(GraphNode::is_generalization) {
                self.process_generalization(edge)?;
            } else {
                self.process_generalization_set(edge)?;
            }
        }
        Ok(())
    }

    /// First edge ending at `class` that matches `predicate` and was not seen.
    fn next_incoming(
        &self,
        class: Id,
        seen: &HashSet<Id>,
        predicate: impl Fn(&GraphNode) -> bool,
    ) -> Option<Id> {
        self.graph
            .node(class)?
            .ins()
            .iter()
            .copied()
            .filter(|id| !seen.contains(id))
            .find(|id| self.graph.node(*id).is_some_and(&predicate))
    }
}

/// Name of an element, or its id when it has none.
fn label_of(element: &ModelElement) -> String {
    match element.name() {
        "" => element.id().to_string(),
        name => name.to_string(),
    }
}
