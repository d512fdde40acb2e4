//! Programmatic construction of OntoUML projects.
//!
//! [`ProjectBuilder`] assembles a model package and a single diagram that
//! shows every element it adds, laying class boxes out on a simple grid.
//! It is mainly used to set up abstraction scenarios without hand-written JSON.

use std::collections::HashMap;

use crate::{
    diagram::{Diagram, DiagramElement, EdgeView, NodeView, PathShape, RectShape, Shape},
    geometry::Point,
    identifier::Id,
    semantic::{
        AggregationKind, Cardinality, Class, ClassStereotype, ElementRef, ElementType,
        Generalization, GeneralizationSet, ModelElement, Package, Project, Property, Relation,
        RelationEnd, RelationStereotype,
    },
};

const CLASS_WIDTH: f32 = 120.0;
const CLASS_HEIGHT: f32 = 40.0;
const COLUMN_SPACING: f32 = 200.0;
const ROW_SPACING: f32 = 120.0;
const COLUMNS: usize = 4;

/// Builder for projects with one fully drawn diagram.
///
/// # Examples
///
/// ```
/// use ontofold_core::builder::ProjectBuilder;
/// use ontofold_core::semantic::ClassStereotype;
///
/// let mut builder = ProjectBuilder::new("Vehicles");
/// let car = builder.class("Car", Some(ClassStereotype::Kind));
/// let engine = builder.class("Engine", Some(ClassStereotype::Kind));
/// builder.component_of(car, engine);
///
/// let project = builder.build();
/// assert_eq!(project.model.contents.len(), 3);
/// assert_eq!(project.diagrams[0].contents.len(), 3);
/// ```
pub struct ProjectBuilder {
    project: Project,
    diagram: Diagram,
    class_views: HashMap<Id, Id>,
    class_count: usize,
}

impl ProjectBuilder {
    pub fn new(name: &str) -> Self {
        let model = Package::new(Id::generate(), "Model");
        let diagram = Diagram::new(
            Id::generate(),
            name,
            Some(ElementRef::new(model.id, ElementType::Package)),
        );
        Self {
            project: Project::new(Id::generate(), name, model),
            diagram,
            class_views: HashMap::new(),
            class_count: 0,
        }
    }

    /// Id of the diagram being built.
    pub fn diagram_id(&self) -> Id {
        self.diagram.id
    }

    /// Adds a class and a box for it on the diagram.
    pub fn class(&mut self, name: &str, stereotype: Option<ClassStereotype>) -> Id {
        let id = self.hidden_class(name, stereotype);
        self.add_class_view(id);
        id
    }

    /// Adds a class to the model without drawing it.
    pub fn hidden_class(&mut self, name: &str, stereotype: Option<ClassStereotype>) -> Id {
        let id = Id::generate();
        self.push_element(ModelElement::Class(Class::new(id, name, stereotype)));
        id
    }

    /// Adds a `0..*` to `0..*` relation drawn from `source` to `target`.
    pub fn relation(
        &mut self,
        name: Option<&str>,
        stereotype: Option<RelationStereotype>,
        source: Id,
        target: Id,
    ) -> Id {
        let id = Id::generate();
        let relation = Relation::new(
            id,
            name,
            stereotype,
            Property::end_of(id.with_suffix("_src"), source, Cardinality::zero_to_many()),
            Property::end_of(id.with_suffix("_tgt"), target, Cardinality::zero_to_many()),
        );
        self.push_element(ModelElement::Relation(relation));
        self.add_edge_view(id, ElementType::Relation, source, target);
        id
    }

    /// Adds a `componentOf` relation drawn from the part to the whole.
    ///
    /// The whole end is composite with cardinality `1`; the part end is `1..*`.
    pub fn component_of(&mut self, whole: Id, part: Id) -> Id {
        let id = self.relation(None, Some(RelationStereotype::ComponentOf), part, whole);
        if let Some(end) = self.relation_end_mut(id, RelationEnd::Source) {
            end.cardinality = "1..*".parse().unwrap_or_default();
        }
        if let Some(end) = self.relation_end_mut(id, RelationEnd::Target) {
            end.cardinality = Cardinality::one();
            end.aggregation_kind = AggregationKind::Composite;
        }
        id
    }

    /// Adds a generalization drawn from `specific` to `general`.
    pub fn generalization(&mut self, general: Id, specific: Id) -> Id {
        let id = Id::generate();
        self.push_element(ModelElement::Generalization(Generalization::new(
            id, general, specific,
        )));
        self.add_edge_view(id, ElementType::Generalization, specific, general);
        id
    }

    /// Groups existing generalizations into a set shown as a text label.
    pub fn generalization_set(&mut self, name: Option<&str>, members: &[Id]) -> Id {
        let id = Id::generate();
        self.push_element(ModelElement::GeneralizationSet(GeneralizationSet::new(
            id,
            name,
            members.to_vec(),
        )));

        let view_id = Id::generate();
        self.diagram
            .contents
            .push(DiagramElement::GeneralizationSetView(NodeView {
                id: view_id,
                model_element: ElementRef::new(id, ElementType::GeneralizationSet),
                shape: Shape::Text(RectShape::new(
                    view_id.with_suffix("_shape"),
                    0.0,
                    0.0,
                    CLASS_WIDTH,
                    20.0,
                )),
            }));
        id
    }

    /// Draws an element one more time, copying its first view.
    ///
    /// Returns the id of the new view, or `None` when the element is not drawn.
    pub fn another_view(&mut self, element: Id) -> Option<Id> {
        let mut view = self
            .diagram
            .contents
            .iter()
            .find(|view| view.model_element().id == element)?
            .clone();
        let id = Id::generate();
        view.set_id(id);
        view.shape_mut().set_id(id.with_suffix("_shape"));
        self.diagram.contents.push(view);
        Some(id)
    }

    /// Mutable access to one end of a relation added earlier.
    pub fn relation_end_mut(&mut self, relation: Id, end: RelationEnd) -> Option<&mut Property> {
        self.project
            .model
            .contents
            .iter_mut()
            .find(|element| element.id() == relation)?
            .as_relation_mut()?
            .end_mut(end)
    }

    /// Mutable access to any element added earlier.
    pub fn element_mut(&mut self, id: Id) -> Option<&mut ModelElement> {
        self.project
            .model
            .contents
            .iter_mut()
            .find(|element| element.id() == id)
    }

    /// Reverses the drawn direction of an edge, leaving the model untouched.
    pub fn reverse_view(&mut self, element: Id) {
        self.diagram
            .contents
            .iter_mut()
            .filter(|view| view.model_element().id == element)
            .filter_map(DiagramElement::as_edge_mut)
            .for_each(EdgeView::reverse);
    }

    pub fn build(mut self) -> Project {
        self.project.diagrams.push(self.diagram);
        self.project
    }

    fn push_element(&mut self, element: ModelElement) {
        self.project.model.contents.push(element);
    }

    fn add_class_view(&mut self, class: Id) {
        let column = self.class_count % COLUMNS;
        let row = self.class_count / COLUMNS;
        self.class_count += 1;

        let view_id = Id::generate();
        let shape = RectShape::new(
            view_id.with_suffix("_shape"),
            column as f32 * COLUMN_SPACING,
            row as f32 * ROW_SPACING,
            CLASS_WIDTH,
            CLASS_HEIGHT,
        );
        self.diagram.contents.push(DiagramElement::ClassView(NodeView {
            id: view_id,
            model_element: ElementRef::class(class),
            shape: Shape::Rectangle(shape),
        }));
        self.class_views.insert(class, view_id);
    }

    fn anchor(&self, class: Id) -> Point {
        self.class_views
            .get(&class)
            .and_then(|view| self.diagram.contents.iter().find(|v| v.id() == *view))
            .and_then(|view| view.shape().bounds())
            .map(|bounds| bounds.bottom_center())
            .unwrap_or_default()
    }

    fn add_edge_view(&mut self, element: Id, element_type: ElementType, source: Id, target: Id) {
        // Undrawn classes get a view id that resolves to nothing on the diagram.
        let view_of = |class: Id| {
            self.class_views
                .get(&class)
                .copied()
                .unwrap_or_else(|| class.with_suffix("_undrawn"))
        };

        let view_id = Id::generate();
        let view = EdgeView {
            id: view_id,
            model_element: ElementRef::new(element, element_type),
            shape: Shape::Path(PathShape {
                id: view_id.with_suffix("_shape"),
                points: vec![self.anchor(source), self.anchor(target)],
            }),
            source: ElementRef::new(view_of(source), ElementType::ClassView),
            target: ElementRef::new(view_of(target), ElementType::ClassView),
        };

        let view = match element_type {
            ElementType::Generalization => DiagramElement::GeneralizationView(view),
            _ => DiagramElement::RelationView(view),
        };
        self.diagram.contents.push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_element_is_drawn() {
        let mut builder = ProjectBuilder::new("People");
        let person = builder.class("Person", Some(ClassStereotype::Kind));
        let student = builder.class("Student", Some(ClassStereotype::Role));
        let teacher = builder.class("Teacher", Some(ClassStereotype::Role));
        let g1 = builder.generalization(person, student);
        let g2 = builder.generalization(person, teacher);
        let set = builder.generalization_set(Some("byOccupation"), &[g1, g2]);

        let project = builder.build();
        let diagram = &project.diagrams[0];

        for element in [person, student, teacher, g1, g2, set] {
            assert!(diagram.shows(element), "{element} should be drawn");
        }
        assert_eq!(diagram.owner.map(|owner| owner.id), Some(project.model.id));
    }

    #[test]
    fn test_component_of_ends() {
        let mut builder = ProjectBuilder::new("Vehicles");
        let car = builder.class("Car", Some(ClassStereotype::Kind));
        let engine = builder.class("Engine", Some(ClassStereotype::Kind));
        let relation = builder.component_of(car, engine);

        let part_end = builder.relation_end_mut(relation, RelationEnd::Source).unwrap();
        assert_eq!(part_end.type_id(), Some(engine));
        assert_eq!(part_end.cardinality.to_string(), "1..*");

        let whole_end = builder.relation_end_mut(relation, RelationEnd::Target).unwrap();
        assert_eq!(whole_end.type_id(), Some(car));
        assert_eq!(whole_end.aggregation_kind, AggregationKind::Composite);
    }

    #[test]
    fn test_edge_anchors_at_class_bottoms() {
        let mut builder = ProjectBuilder::new("Grid");
        let a = builder.class("A", None);
        let b = builder.class("B", None);
        let relation = builder.relation(Some("knows"), Some(RelationStereotype::Material), a, b);

        let project = builder.build();
        let view = project.diagrams[0]
            .contents
            .iter()
            .find(|view| view.model_element().id == relation)
            .unwrap();

        assert_eq!(
            view.shape().points(),
            &[Point::new(60.0, 40.0), Point::new(260.0, 40.0)]
        );
    }

    #[test]
    fn test_another_view_and_reverse() {
        let mut builder = ProjectBuilder::new("Views");
        let a = builder.class("A", None);
        let b = builder.class("B", None);
        let relation = builder.relation(None, None, a, b);
        let extra = builder.another_view(relation).unwrap();
        builder.reverse_view(relation);

        assert!(builder.another_view(Id::new("nothing")).is_none());

        let project = builder.build();
        let views: Vec<_> = project.diagrams[0]
            .contents
            .iter()
            .filter(|view| view.model_element().id == relation)
            .collect();
        assert_eq!(views.len(), 2);
        assert!(views.iter().any(|view| view.id() == extra));
        assert!(views.iter().all(|view| view.shape().points()[0] == Point::new(260.0, 40.0)));
    }
}
