//! Aspects: folding moments into the endurants that bear them.

use log::{debug, trace};

use ontofold_core::{identifier::Id, semantic::RelationStereotype};

use super::AbstractionRules;
use crate::structure::{GraphError, GraphNode};

impl AbstractionRules {
    /// Folds a mode, quality or relator into its endurants.
    ///
    /// The endurants are the targets of the moment's characterizations and
    /// mediations. Each of them receives a copy of every other relation the
    /// moment has towards an endurant, and a participation in every event
    /// manifesting the moment. The moment is removed afterwards, even when it
    /// has no endurant.
    pub(super) fn abstract_aspect(&mut self, moment: Id) -> Result<(), GraphError> {
        if !self.graph.is_class(moment) {
            return Ok(());
        }
        self.fold_node(moment)?;

        let Some(node) = self.graph.node(moment) else {
            return Ok(());
        };

        let mut endurants: Vec<Id> = Vec::new();
        let mut carried = Vec::new();
        for relation in node.outs().iter().filter_map(|id| self.graph.node(*id)) {
            let Some(target) = relation.target() else {
                continue;
            };
            let stereotype = relation.relation_stereotype();
            if stereotype.is_some_and(RelationStereotype::is_existential_dependence) {
                if target != moment && !endurants.contains(&target) {
                    endurants.push(target);
                }
            } else if relation.is_relation()
                && stereotype != Some(RelationStereotype::ExternalDependence)
                && !self.graph.node(target).is_some_and(is_occurrent)
            {
                carried.push(relation.id());
            }
        }

        let manifestations: Vec<(Id, Id)> = node
            .ins()
            .iter()
            .filter_map(|id| self.graph.node(*id))
            .filter(|relation| {
                relation.relation_stereotype() == Some(RelationStereotype::Manifestation)
            })
            .filter_map(|relation| Some((relation.id(), relation.source()?)))
            .collect();

        debug!(
            moment:% = moment,
            name = node.name(),
            endurants = endurants.len(),
            carried = carried.len(),
            manifestations = manifestations.len();
            "Processing aspect"
        );

        if endurants.is_empty() {
            trace!(moment:% = moment; "Moment has no endurant");
            self.graph.remove_node(moment);
            return Ok(());
        }

        for endurant in &endurants {
            for relation in &carried {
                self.graph.duplicate_relation(*relation, *endurant, None)?;
            }
            for (manifestation, event) in &manifestations {
                self.graph
                    .duplicate_relation(*manifestation, *endurant, Some(*event))?;
            }
        }

        self.graph.remove_node(moment);
        Ok(())
    }
}

/// Events and situations, which moments are not carried towards.
fn is_occurrent(node: &GraphNode) -> bool {
    node.is_event() || node.is_situation()
}
