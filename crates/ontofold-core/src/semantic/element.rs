//! Model elements of an OntoUML package.
//!
//! Element structs are untagged; the `type` discriminator is written by
//! [`ModelElement`], which is the only place they appear in a package.
//! [`Property`] and [`Literal`] live in plain lists and carry their own tag.

use serde::{Deserialize, Serialize};

use crate::{
    identifier::Id,
    semantic::{Cardinality, ClassStereotype, RelationStereotype},
    serde_utils::null_to_default,
};

/// Type discriminator used by element references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Project,
    Package,
    Class,
    Relation,
    Generalization,
    GeneralizationSet,
    Property,
    Literal,
    Diagram,
    ClassView,
    RelationView,
    GeneralizationView,
    GeneralizationSetView,
}

/// A `{ "id": ..., "type": ... }` reference to another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub id: Id,
    #[serde(rename = "type")]
    pub element_type: ElementType,
}

impl ElementRef {
    pub fn new(id: Id, element_type: ElementType) -> Self {
        Self { id, element_type }
    }

    pub fn class(id: Id) -> Self {
        Self::new(id, ElementType::Class)
    }
}

/// Aggregation kind of a relation end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationKind {
    #[default]
    None,
    Shared,
    Composite,
}

/// One end of a relation, or an attribute of a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Property {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stereotype: Option<String>,
    #[serde(default)]
    pub is_derived: bool,
    #[serde(default)]
    pub is_read_only: bool,
    #[serde(default)]
    pub is_ordered: bool,
    #[serde(default)]
    pub cardinality: Cardinality,
    #[serde(default)]
    pub property_type: Option<ElementRef>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub aggregation_kind: AggregationKind,
}

impl Property {
    /// Creates a `0..*` property with no name or type.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            name: None,
            description: None,
            stereotype: None,
            is_derived: false,
            is_read_only: false,
            is_ordered: false,
            cardinality: Cardinality::default(),
            property_type: None,
            aggregation_kind: AggregationKind::None,
        }
    }

    /// Creates a relation end pointing at `class`.
    pub fn end_of(id: Id, class: Id, cardinality: Cardinality) -> Self {
        Self {
            cardinality,
            property_type: Some(ElementRef::class(class)),
            ..Self::new(id)
        }
    }

    /// Role name, treating an empty string as absent.
    pub fn role(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Id of the connected class, if any.
    pub fn type_id(&self) -> Option<Id> {
        self.property_type.map(|reference| reference.id)
    }
}

/// An enumeration literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub struct Literal {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stereotype: Option<ClassStereotype>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_derived: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub properties: Vec<Property>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub literals: Vec<Literal>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub restricted_to: Vec<String>,
}

impl Class {
    pub fn new(id: Id, name: &str, stereotype: Option<ClassStereotype>) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            description: None,
            stereotype,
            is_abstract: false,
            is_derived: false,
            properties: Vec::new(),
            literals: Vec::new(),
            restricted_to: Vec::new(),
        }
    }

    /// Appends an attribute.
    pub fn add_attribute(&mut self, attribute: Property) {
        self.properties.push(attribute);
    }
}

/// Which end of a binary relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationEnd {
    Source,
    Target,
}

impl RelationEnd {
    fn index(self) -> usize {
        match self {
            Self::Source => 0,
            Self::Target => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Source => Self::Target,
            Self::Target => Self::Source,
        }
    }
}

/// A binary relation; `properties[0]` is the source end, `properties[1]` the target end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stereotype: Option<RelationStereotype>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_derived: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub properties: Vec<Property>,
}

impl Relation {
    pub fn new(
        id: Id,
        name: Option<&str>,
        stereotype: Option<RelationStereotype>,
        source: Property,
        target: Property,
    ) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            description: None,
            stereotype,
            is_abstract: false,
            is_derived: false,
            properties: vec![source, target],
        }
    }

    /// Whether the relation has exactly the two ends of a binary relation.
    pub fn is_binary(&self) -> bool {
        self.properties.len() == 2
    }

    pub fn end(&self, end: RelationEnd) -> Option<&Property> {
        self.properties.get(end.index())
    }

    pub fn end_mut(&mut self, end: RelationEnd) -> Option<&mut Property> {
        self.properties.get_mut(end.index())
    }

    pub fn source_end(&self) -> Option<&Property> {
        self.end(RelationEnd::Source)
    }

    pub fn target_end(&self) -> Option<&Property> {
        self.end(RelationEnd::Target)
    }

    /// Whether the source end is marked as a composite aggregation.
    pub fn has_composite_source(&self) -> bool {
        self.source_end()
            .is_some_and(|end| end.aggregation_kind == AggregationKind::Composite)
    }

    /// Whether either end is a composite aggregation.
    pub fn is_composition(&self) -> bool {
        self.properties
            .iter()
            .any(|end| end.aggregation_kind == AggregationKind::Composite)
    }

    /// Exchanges the source and target ends.
    pub fn swap_ends(&mut self) {
        self.properties.swap(0, 1);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generalization {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub general: ElementRef,
    pub specific: ElementRef,
}

impl Generalization {
    pub fn new(id: Id, general: Id, specific: Id) -> Self {
        Self {
            id,
            name: None,
            description: None,
            general: ElementRef::class(general),
            specific: ElementRef::class(specific),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralizationSet {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_disjoint: bool,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub categorizer: Option<ElementRef>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub generalizations: Vec<ElementRef>,
}

impl GeneralizationSet {
    pub fn new(id: Id, name: Option<&str>, generalizations: Vec<Id>) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            description: None,
            is_disjoint: false,
            is_complete: false,
            categorizer: None,
            generalizations: generalizations
                .into_iter()
                .map(|id| ElementRef::new(id, ElementType::Generalization))
                .collect(),
        }
    }

    /// Forgets a member generalization. Returns whether it was a member.
    pub fn remove_member(&mut self, generalization: Id) -> bool {
        let before = self.generalizations.len();
        self.generalizations.retain(|member| member.id != generalization);
        self.generalizations.len() != before
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub contents: Vec<ModelElement>,
}

impl Package {
    pub fn new(id: Id, name: &str) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            description: None,
            contents: Vec::new(),
        }
    }

    /// Finds an element by id anywhere below this package.
    pub fn find(&self, id: Id) -> Option<&ModelElement> {
        self.contents.iter().find_map(|element| element.find(id))
    }

    /// Walks every element below this package, depth first.
    pub fn all_elements(&self) -> Vec<&ModelElement> {
        let mut elements = Vec::new();
        for element in &self.contents {
            elements.push(element);
            if let ModelElement::Package(package) = element {
                elements.extend(package.all_elements());
            }
        }
        elements
    }
}

/// Any element a package may contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ModelElement {
    Package(Package),
    Class(Class),
    Relation(Relation),
    Generalization(Generalization),
    GeneralizationSet(GeneralizationSet),
}

impl ModelElement {
    pub fn id(&self) -> Id {
        match self {
            Self::Package(package) => package.id,
            Self::Class(class) => class.id,
            Self::Relation(relation) => relation.id,
            Self::Generalization(generalization) => generalization.id,
            Self::GeneralizationSet(set) => set.id,
        }
    }

    pub fn set_id(&mut self, id: Id) {
        match self {
            Self::Package(package) => package.id = id,
            Self::Class(class) => class.id = id,
            Self::Relation(relation) => relation.id = id,
            Self::Generalization(generalization) => generalization.id = id,
            Self::GeneralizationSet(set) => set.id = id,
        }
    }

    /// Name of the element, empty when unnamed.
    pub fn name(&self) -> &str {
        let name = match self {
            Self::Package(package) => &package.name,
            Self::Class(class) => &class.name,
            Self::Relation(relation) => &relation.name,
            Self::Generalization(generalization) => &generalization.name,
            Self::GeneralizationSet(set) => &set.name,
        };
        name.as_deref().unwrap_or_default()
    }

    pub fn set_name(&mut self, name: String) {
        let slot = match self {
            Self::Package(package) => &mut package.name,
            Self::Class(class) => &mut class.name,
            Self::Relation(relation) => &mut relation.name,
            Self::Generalization(generalization) => &mut generalization.name,
            Self::GeneralizationSet(set) => &mut set.name,
        };
        *slot = Some(name);
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Package(_) => ElementType::Package,
            Self::Class(_) => ElementType::Class,
            Self::Relation(_) => ElementType::Relation,
            Self::Generalization(_) => ElementType::Generalization,
            Self::GeneralizationSet(_) => ElementType::GeneralizationSet,
        }
    }

    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut Class> {
        match self {
            Self::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    pub fn as_relation_mut(&mut self) -> Option<&mut Relation> {
        match self {
            Self::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    pub fn as_generalization(&self) -> Option<&Generalization> {
        match self {
            Self::Generalization(generalization) => Some(generalization),
            _ => None,
        }
    }

    pub fn as_generalization_set(&self) -> Option<&GeneralizationSet> {
        match self {
            Self::GeneralizationSet(set) => Some(set),
            _ => None,
        }
    }

    pub fn as_generalization_set_mut(&mut self) -> Option<&mut GeneralizationSet> {
        match self {
            Self::GeneralizationSet(set) => Some(set),
            _ => None,
        }
    }

    /// Finds `id` in this element or, for packages, anywhere below it.
    pub fn find(&self, id: Id) -> Option<&ModelElement> {
        if self.id() == id {
            return Some(self);
        }
        match self {
            Self::Package(package) => package.find(id),
            _ => None,
        }
    }
}
