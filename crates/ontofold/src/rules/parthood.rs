//! Parthood: folding parts into their wholes.

use log::{debug, trace, warn};

use ontofold_core::{identifier::Id, semantic::RelationStereotype};

use super::AbstractionRules;
use crate::structure::{GraphError, GraphNode, Retarget};

/// How a part-whole relation is folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PartWholeKind {
    ComponentOf,
    SubCollectionOf,
    SubQuantityOf,
    Participational,
    MemberOf,
}

impl PartWholeKind {
    /// Composite aggregations without a part-whole stereotype count as components.
    fn of(node: &GraphNode) -> Self {
        match node.relation_stereotype() {
            Some(RelationStereotype::SubCollectionOf) => Self::SubCollectionOf,
            Some(RelationStereotype::SubQuantityOf) => Self::SubQuantityOf,
            Some(RelationStereotype::Participational) => Self::Participational,
            Some(RelationStereotype::MemberOf) => Self::MemberOf,
            _ => Self::ComponentOf,
        }
    }
}

/// A part being merged into its whole.
struct PartFold {
    part: Id,
    whole: Id,
    /// Role name for relation ends moved onto the whole.
    role: Option<String>,
    /// Prefix for the names of ordinary relations moved onto the whole.
    prefix: String,
    /// Whether the part is essential to the whole (a read-only part end).
    essential: bool,
}

impl PartFold {
    fn retarget(&self) -> Retarget {
        match &self.role {
            Some(role) => Retarget::new().with_role(role.clone()),
            None => Retarget::new(),
        }
    }
}

impl AbstractionRules {
    /// Folds the part of a part-whole relation into the whole.
    ///
    /// The part is folded first, so nested parts collapse bottom-up.
    pub(super) fn process_parthood(&mut self, id: Id) -> Result<(), GraphError> {
        let Some(part) = self.graph.node(id).and_then(GraphNode::source) else {
            return Ok(());
        };
        self.fold_node(part)?;

        // Folding the part may have moved or consumed this relation.
        let Some(node) = self.graph.node(id) else {
            return Ok(());
        };
        let (Some(part), Some(whole)) = (node.source(), node.target()) else {
            return Err(GraphError::DetachedRelation(id));
        };
        if part == whole {
            trace!(relation:% = id; "Removing part-whole self-loop");
            self.graph.remove_relation(id);
            return Ok(());
        }

        let kind = PartWholeKind::of(node);
        let part_end = node
            .element()
            .as_relation()
            .and_then(|relation| relation.source_end());
        let cardinality = part_end.map(|end| end.cardinality).unwrap_or_default();
        let essential = part_end.is_some_and(|end| end.is_read_only);
        let part_name = self.name_of(part);
        let whole_name = self.name_of(whole);

        debug!(
            relation:% = id,
            kind:? = kind,
            part = part_name,
            whole = whole_name;
            "Processing part-whole relation"
        );

        match kind {
            PartWholeKind::ComponentOf => {
                self.graph
                    .add_attribute(whole, &lower_first(&part_name), cardinality)?;
                self.graph.grow_height(whole, self.attribute_height);
                let fold = PartFold {
                    part,
                    whole,
                    role: None,
                    prefix: format!("{whole_name}'s {part_name} "),
                    essential,
                };
                self.fold_part(id, &fold)
            }
            PartWholeKind::SubCollectionOf | PartWholeKind::SubQuantityOf => {
                let fold = PartFold {
                    part,
                    whole,
                    role: Some(part_name),
                    prefix: String::new(),
                    essential,
                };
                self.fold_part(id, &fold)
            }
            PartWholeKind::Participational => {
                warn!(
                    relation:% = id,
                    part = part_name,
                    whole = whole_name;
                    "Participational relations are not folded"
                );
                Ok(())
            }
            PartWholeKind::MemberOf => Ok(()),
        }
    }

    /// Removes the part-whole relation, reroutes everything incident on the
    /// part onto the whole, then removes the part.
    fn fold_part(&mut self, id: Id, fold: &PartFold) -> Result<(), GraphError> {
        self.graph.remove_relation(id);
        self.process_ins(fold)?;
        self.process_outs(fold)?;
        self.graph.remove_node(fold.part);
        Ok(())
    }

    /// Moves every edge ending at the part onto the whole.
    fn process_ins(&mut self, fold: &PartFold) -> Result<(), GraphError> {
        while let Some(relation) = self.first_in(fold.part) {
            let node = self
                .graph
                .node(relation)
                .ok_or(GraphError::UnknownNode(relation))?;

            if node.is_generalization() || node.is_generalization_set() {
                self.graph
                    .move_relation_to(relation, fold.whole, &Retarget::new())?;
                continue;
            }

            let source = node.source().and_then(|source| self.graph.node(source));
            let from_moment = source.is_some_and(GraphNode::is_moment);
            let from_event = source.is_some_and(GraphNode::is_event);

            if from_event && is_termination(node) && !fold.essential {
                trace!(relation:% = relation; "Dropping optional termination");
                self.graph.remove_relation(relation);
                continue;
            }

            let retarget = if from_moment || from_event {
                fold.retarget().relax_lower()
            } else {
                self.prefix_name(relation, &fold.prefix);
                fold.retarget()
            };
            self.graph
                .move_relation_to(relation, fold.whole, &retarget)?;
        }
        Ok(())
    }

    /// Moves every relation leaving the part onto the whole.
    fn process_outs(&mut self, fold: &PartFold) -> Result<(), GraphError> {
        while let Some(relation) = self.first_out(fold.part) {
            let node = self
                .graph
                .node(relation)
                .ok_or(GraphError::UnknownNode(relation))?;

            if node.is_generalization() {
                trace!(generalization:% = relation; "Dropping generalization of folded part");
                self.graph.remove_relation(relation);
                continue;
            }

            let target = node.target().and_then(|target| self.graph.node(target));
            let to_moment = target.is_some_and(GraphNode::is_moment);
            let to_event = target.is_some_and(GraphNode::is_event);

            if to_event && is_termination(node) && !fold.essential {
                trace!(relation:% = relation; "Dropping optional termination");
                self.graph.remove_relation(relation);
                continue;
            }

            let retarget = if to_moment || to_event {
                fold.retarget().cap_upper()
            } else {
                self.prefix_name(relation, &fold.prefix);
                fold.retarget()
            };
            self.graph
                .move_relation_from(relation, fold.whole, &retarget)?;
        }
        Ok(())
    }

    fn first_in(&self, class: Id) -> Option<Id> {
        self.graph.node(class)?.ins().first().copied()
    }

    fn first_out(&self, class: Id) -> Option<Id> {
        self.graph.node(class)?.outs().first().copied()
    }

    pub(super) fn name_of(&self, id: Id) -> String {
        self.graph
            .node(id)
            .map(|node| node.name().to_string())
            .unwrap_or_default()
    }

    /// Prefixes a named relation; unnamed relations and empty prefixes are left alone.
    fn prefix_name(&mut self, relation: Id, prefix: &str) {
        let name = self.name_of(relation);
        if !prefix.is_empty() && !name.is_empty() {
            self.graph.rename(relation, format!("{prefix}{name}"));
        }
    }
}

fn is_termination(node: &GraphNode) -> bool {
    node.relation_stereotype() == Some(RelationStereotype::Termination)
}

/// `"Engine"` becomes `"engine"`.
fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
