//! Hierarchy: folding specific classes into their general classes.

use log::{debug, trace};

use ontofold_core::identifier::Id;

use super::AbstractionRules;
use crate::structure::{GraphError, GraphNode, Retarget};

impl AbstractionRules {
    /// Folds the specific class of a generalization into the general class.
    ///
    /// Every relation of the specific class moves to the general class in
    /// the same direction. The moved end takes the specific class name as its
    /// role, replacing any role it had, and its lower bound is relaxed.
    pub(super) fn process_generalization(&mut self, id: Id) -> Result<(), GraphError> {
        let Some(specific) = self.graph.node(id).and_then(GraphNode::source) else {
            return Ok(());
        };
        self.fold_node(specific)?;

        let Some(node) = self.graph.node(id) else {
            return Ok(());
        };
        let (Some(specific), Some(general)) = (node.source(), node.target()) else {
            return Err(GraphError::DetachedRelation(id));
        };
        if specific == general {
            trace!(generalization:% = id; "Removing generalization self-loop");
            self.graph.remove_relation(id);
            return Ok(());
        }

        let role = self.name_of(specific);
        debug!(
            generalization:% = id,
            specific = role,
            general = self.name_of(general);
            "Processing generalization"
        );

        let (ins, outs) = self.plain_relations(specific);
        let retarget = Retarget::new()
            .with_role(role)
            .replace_role()
            .relax_lower();
        for relation in ins {
            self.graph.move_relation_to(relation, general, &retarget)?;
        }
        for relation in outs {
            self.graph.move_relation_from(relation, general, &retarget)?;
        }

        self.graph.remove_relation(id);
        self.graph.remove_node(specific);
        Ok(())
    }

    /// Folds every member of a generalization set, then drops the set.
    pub(super) fn process_generalization_set(&mut self, id: Id) -> Result<(), GraphError> {
        let Some(members) = self.graph.node(id).map(|node| node.ins().to_vec()) else {
            return Ok(());
        };
        debug!(set:% = id, members = members.len(); "Processing generalization set");

        for member in members {
            if self.graph.contains(member) {
                self.process_generalization(member)?;
            }
        }
        self.graph.remove_relation(id);
        Ok(())
    }

    /// Incoming and outgoing relations of a class, without generalizations
    /// and generalization sets.
    fn plain_relations(&self, class: Id) -> (Vec<Id>, Vec<Id>) {
        let Some(node) = self.graph.node(class) else {
            return (Vec::new(), Vec::new());
        };
        let is_plain = |id: &Id| self.graph.node(*id).is_some_and(GraphNode::is_relation);
        (
            node.ins().iter().copied().filter(is_plain).collect(),
            node.outs().iter().copied().filter(is_plain).collect(),
        )
    }
}
