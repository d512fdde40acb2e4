//! A single node of the model graph.

use ontofold_core::{
    identifier::Id,
    semantic::{ClassStereotype, ModelElement, RelationStereotype, Stereotype},
};

/// One semantic element together with its views and adjacency.
///
/// Adjacency lists hold node ids, never nodes. A class node lists the relation,
/// generalization and generalization-set nodes attached to it. An edge node
/// (relation or generalization) has its source, part or specific class at
/// `ins[0]` and its target, whole or general class at `outs[0]`; a
/// generalization that belongs to sets lists them after `outs[0]`. A set node
/// lists its member generalizations in `ins` and the shared general class at
/// `outs[0]`.
#[derive(Debug, Clone)]
pub struct GraphNode {
    element: ModelElement,
    representations: Vec<Id>,
    ins: Vec<Id>,
    outs: Vec<Id>,
}

impl GraphNode {
    pub(super) fn new(element: ModelElement, representation: Id) -> Self {
        Self {
            element,
            representations: vec![representation],
            ins: Vec::new(),
            outs: Vec::new(),
        }
    }

    pub fn id(&self) -> Id {
        self.element.id()
    }

    pub fn name(&self) -> &str {
        self.element.name()
    }

    pub fn element(&self) -> &ModelElement {
        &self.element
    }

    pub(super) fn element_mut(&mut self) -> &mut ModelElement {
        &mut self.element
    }

    /// Ids of the views depicting this element, first one is the primary view.
    pub fn representations(&self) -> &[Id] {
        &self.representations
    }

    pub(super) fn add_representation(&mut self, view: Id) {
        self.representations.push(view);
    }

    pub fn ins(&self) -> &[Id] {
        &self.ins
    }

    pub fn outs(&self) -> &[Id] {
        &self.outs
    }

    /// `ins[0]`: the source, part or specific class of an edge node.
    pub fn source(&self) -> Option<Id> {
        self.ins.first().copied()
    }

    /// `outs[0]`: the target, whole or general class of an edge node.
    pub fn target(&self) -> Option<Id> {
        self.outs.first().copied()
    }

    pub(super) fn push_in(&mut self, id: Id) {
        self.ins.push(id);
    }

    pub(super) fn push_out(&mut self, id: Id) {
        self.outs.push(id);
    }

    /// Removes the first occurrence of `id` from `ins`.
    pub(super) fn remove_in(&mut self, id: Id) {
        if let Some(index) = self.ins.iter().position(|other| *other == id) {
            self.ins.remove(index);
        }
    }

    /// Removes the first occurrence of `id` from `outs`.
    pub(super) fn remove_out(&mut self, id: Id) {
        if let Some(index) = self.outs.iter().position(|other| *other == id) {
            self.outs.remove(index);
        }
    }

    pub(super) fn set_source(&mut self, id: Id) {
        match self.ins.first_mut() {
            Some(first) => *first = id,
            None => self.ins.push(id),
        }
    }

    pub(super) fn set_target(&mut self, id: Id) {
        match self.outs.first_mut() {
            Some(first) => *first = id,
            None => self.outs.push(id),
        }
    }

    pub fn stereotype(&self) -> Option<Stereotype> {
        match &self.element {
            ModelElement::Class(class) => class.stereotype.map(Stereotype::Class),
            ModelElement::Relation(relation) => relation.stereotype.map(Stereotype::Relation),
            _ => None,
        }
    }

    pub fn class_stereotype(&self) -> Option<ClassStereotype> {
        self.element.as_class().and_then(|class| class.stereotype)
    }

    pub fn relation_stereotype(&self) -> Option<RelationStereotype> {
        self.element.as_relation().and_then(|relation| relation.stereotype)
    }

    pub fn is_class(&self) -> bool {
        matches!(self.element, ModelElement::Class(_))
    }

    pub fn is_relation(&self) -> bool {
        matches!(self.element, ModelElement::Relation(_))
    }

    pub fn is_generalization(&self) -> bool {
        matches!(self.element, ModelElement::Generalization(_))
    }

    pub fn is_generalization_set(&self) -> bool {
        matches!(self.element, ModelElement::GeneralizationSet(_))
    }

    /// Whether the class is a moment: a mode, quality or relator.
    pub fn is_moment(&self) -> bool {
        self.class_stereotype().is_some_and(ClassStereotype::is_moment)
    }

    pub fn is_event(&self) -> bool {
        self.class_stereotype().is_some_and(ClassStereotype::is_event)
    }

    pub fn is_situation(&self) -> bool {
        self.class_stereotype()
            .is_some_and(ClassStereotype::is_situation)
    }

    /// Whether the relation is a part-whole relation, by stereotype or by a
    /// composite end.
    pub fn is_part_whole(&self) -> bool {
        self.element.as_relation().is_some_and(|relation| {
            relation.is_composition()
                || relation
                    .stereotype
                    .is_some_and(RelationStereotype::is_part_whole)
        })
    }
}

#[cfg(test)]
mod tests {
    use ontofold_core::semantic::{Cardinality, Class, Property, Relation};

    use super::*;

    fn class_node(name: &str, stereotype: Option<ClassStereotype>) -> GraphNode {
        GraphNode::new(
            ModelElement::Class(Class::new(Id::new(name), name, stereotype)),
            Id::new(&format!("{name}_view")),
        )
    }

    #[test]
    fn test_adjacency_edits() {
        let mut node = class_node("Car", Some(ClassStereotype::Kind));
        let r1 = Id::new("r1");
        let r2 = Id::new("r2");

        node.push_in(r1);
        node.push_in(r2);
        node.push_in(r1);
        node.remove_in(r1);
        assert_eq!(node.ins(), &[r2, r1]);

        node.remove_out(r1);
        assert!(node.outs().is_empty());
    }

    #[test]
    fn test_set_endpoints() {
        let mut node = class_node("Rel", None);
        node.set_target(Id::new("a"));
        node.push_out(Id::new("set"));
        node.set_target(Id::new("b"));

        assert_eq!(node.target(), Some(Id::new("b")));
        assert_eq!(node.outs().len(), 2);

        node.set_source(Id::new("c"));
        assert_eq!(node.source(), Some(Id::new("c")));
    }

    #[test]
    fn test_classification() {
        let quality = class_node("Temperature", Some(ClassStereotype::Quality));
        assert!(quality.is_class());
        assert!(quality.is_moment());
        assert!(!quality.is_event());
        assert_eq!(
            quality.stereotype(),
            Some(Stereotype::Class(ClassStereotype::Quality))
        );

        let unstereotyped = class_node("Thing", None);
        assert!(!unstereotyped.is_moment());
        assert_eq!(unstereotyped.stereotype(), None);
    }

    #[test]
    fn test_part_whole_detection() {
        let relation = Relation::new(
            Id::new("r"),
            None,
            Some(RelationStereotype::MemberOf),
            Property::end_of(Id::new("p0"), Id::new("a"), Cardinality::one()),
            Property::end_of(Id::new("p1"), Id::new("b"), Cardinality::one()),
        );
        let node = GraphNode::new(ModelElement::Relation(relation), Id::new("rv"));

        assert!(node.is_relation());
        assert!(node.is_part_whole());
        assert_eq!(node.relation_stereotype(), Some(RelationStereotype::MemberOf));
        assert_eq!(node.representations(), &[Id::new("rv")]);
    }
}
