//! The model graph: a rewritable copy of one diagram and the model behind it.
//!
//! # Architecture
//!
//! Nodes live in two id-keyed ordered maps: classes in `all_nodes`, and
//! relations, generalizations and generalization sets in `all_relations`.
//! Adjacency lists store ids, so rewrites pass [`Id`] handles around instead
//! of node references. Every view copied from the diagram lives in
//! `all_views` and is the representation of exactly one node.
//!
//! Every element and view is re-identified on the way in; `id_map` keeps the
//! old to new mapping so callers can find the copy of an original element.
//!
//! Each mutation primitive updates the semantic element and all of its views
//! together, so the exported model and diagram always agree.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace};

use ontofold_core::{
    diagram::{Diagram, DiagramElement},
    geometry::{Bounds, Point},
    identifier::Id,
    semantic::{
        Cardinality, ClassStereotype, ElementRef, ElementType, ModelElement, Package, Property,
        RelationEnd, RelationStereotype, Stereotype,
    },
};

use super::{GraphError, GraphNode};

/// How the moved end of a relation is rewritten by
/// [`ModelGraph::move_relation_to`] and [`ModelGraph::move_relation_from`].
///
/// By default only the endpoint moves. An existing role name is kept unless
/// [`Retarget::replace_role`] is set.
///
/// # Examples
///
/// ```
/// use ontofold::structure::Retarget;
///
/// let retarget = Retarget::new().with_role("engine").relax_lower();
/// assert_eq!(retarget.role(), Some("engine"));
/// ```
#[derive(Debug, Clone)]
pub struct Retarget {
    role: Option<String>,
    keep_old_role: bool,
    cap_upper: bool,
    relax_lower: bool,
}

impl Default for Retarget {
    fn default() -> Self {
        Self {
            role: None,
            keep_old_role: true,
            cap_upper: false,
            relax_lower: false,
        }
    }
}

impl Retarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Role name for the moved end; applied when the end has none.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Overwrite an existing role name too.
    pub fn replace_role(mut self) -> Self {
        self.keep_old_role = false;
        self
    }

    /// Cap the moved end's upper bound at 1.
    pub fn cap_upper(mut self) -> Self {
        self.cap_upper = true;
        self
    }

    /// Drop the moved end's lower bound to 0.
    pub fn relax_lower(mut self) -> Self {
        self.relax_lower = true;
        self
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    fn apply(&self, property: &mut Property) {
        if self.cap_upper {
            property.cardinality.cap_upper(1);
        }
        if self.relax_lower {
            property.cardinality.relax_lower();
        }
        if let Some(role) = &self.role {
            if !self.keep_old_role || property.role().is_none() {
                property.name = Some(role.clone());
            }
        }
    }
}

/// Node and view counts of a graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphStats {
    pub classes: usize,
    pub relations: usize,
    pub views: usize,
}

#[derive(Debug, Default)]
pub struct ModelGraph {
    all_nodes: IndexMap<Id, GraphNode>,
    all_relations: IndexMap<Id, GraphNode>,
    all_views: IndexMap<Id, DiagramElement>,
    all_stereotypes: IndexMap<Stereotype, Vec<Id>>,
    id_map: HashMap<Id, Id>,
}

impl ModelGraph {
    /// Builds a graph from `diagram` and the elements of `model` it shows.
    ///
    /// Both inputs are copied; neither is modified.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] when a view references an element missing from
    /// the model, an element of the wrong kind, a relation without exactly
    /// two ends, or when an edge view connects classes its element does not.
    pub fn new(model: &Package, diagram: &Diagram) -> Result<Self, GraphError> {
        let mut graph = Self::default();
        let originals: HashMap<Id, &DiagramElement> = diagram
            .contents
            .iter()
            .map(|view| (view.id(), view))
            .collect();

        for view in &diagram.contents {
            if let DiagramElement::ClassView(_) = view {
                let element = lookup(model, view)?;
                graph.include_element(view, element);
            }
        }

        for view in &diagram.contents {
            if view.as_edge().is_some() {
                graph.include_edge(model, view, &originals)?;
            }
        }

        for view in &diagram.contents {
            if let DiagramElement::GeneralizationSetView(_) = view {
                graph.include_generalization_set(model, view)?;
            }
        }

        let stats = graph.stats();
        debug!(
            classes = stats.classes,
            relations = stats.relations,
            views = stats.views;
            "Model graph built"
        );
        Ok(graph)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Copies `view` into the graph, creating the node for `element` unless an
    /// earlier view already did. Returns the node id, the new view id and
    /// whether the node is new.
    fn include_element(&mut self, view: &DiagramElement, element: ModelElement) -> (Id, Id, bool) {
        let view_id = Id::generate();
        self.id_map.insert(view.id(), view_id);

        let mut view = view.clone();
        view.set_id(view_id);
        view.shape_mut().set_id(view_id.with_suffix("_shape"));

        let existing = self
            .id_map
            .get(&element.id())
            .copied()
            .filter(|id| self.contains(*id));

        let (node_id, is_new) = match existing {
            Some(node_id) => {
                if let Some(node) = self.node_mut(node_id) {
                    node.add_representation(view_id);
                }
                trace!(node:% = node_id, view:% = view_id; "Additional view for node");
                (node_id, false)
            }
            None => {
                let element = self.reidentify(element);
                let node_id = element.id();
                let node = GraphNode::new(element, view_id);
                self.index(&node);
                if node.is_class() {
                    self.all_nodes.insert(node_id, node);
                } else {
                    self.all_relations.insert(node_id, node);
                }
                (node_id, true)
            }
        };

        let element_type = view.model_element().element_type;
        view.set_model_element(ElementRef::new(node_id, element_type));
        self.all_views.insert(view_id, view);

        (node_id, view_id, is_new)
    }

    /// Gives the element and its properties fresh ids, recording the mapping.
    fn reidentify(&mut self, mut element: ModelElement) -> ModelElement {
        let new_id = Id::generate();
        self.id_map.insert(element.id(), new_id);
        element.set_id(new_id);

        let properties = match &mut element {
            ModelElement::Class(class) => Some(&mut class.properties),
            ModelElement::Relation(relation) => Some(&mut relation.properties),
            _ => None,
        };
        if let Some(properties) = properties {
            for (index, property) in properties.iter_mut().enumerate() {
                let property_id = new_id.with_suffix(&format!("_prop{index}"));
                self.id_map.insert(property.id, property_id);
                property.id = property_id;
            }
        }
        element
    }

    /// Resolves an original view id to `(original class id, graph class id)`
    /// when it is a class view of this diagram.
    fn class_behind(&self, view: Id, originals: &HashMap<Id, &DiagramElement>) -> Option<(Id, Id)> {
        let original = originals.get(&view)?;
        if !matches!(original, DiagramElement::ClassView(_)) {
            return None;
        }
        let old_class = original.model_element().id;
        let class = self
            .id_map
            .get(&old_class)
            .copied()
            .filter(|id| self.all_nodes.contains_key(id))?;
        Some((old_class, class))
    }

    fn include_edge(
        &mut self,
        model: &Package,
        view: &DiagramElement,
        originals: &HashMap<Id, &DiagramElement>,
    ) -> Result<(), GraphError> {
        let Some(edge) = view.as_edge() else {
            return Ok(());
        };

        let ends = (
            self.class_behind(edge.source.id, originals),
            self.class_behind(edge.target.id, originals),
        );
        let (Some((old_source, source)), Some((old_target, target))) = ends else {
            debug!(
                view:% = view.id(),
                element:% = edge.model_element.id;
                "Skipping edge with an end outside the diagram"
            );
            return Ok(());
        };

        let element = lookup(model, view)?;
        let old_element = element.id();
        let (node_id, view_id, is_new) = self.include_element(view, element);

        let source_view = self.resolve(edge.source.id).unwrap_or(edge.source.id);
        let target_view = self.resolve(edge.target.id).unwrap_or(edge.target.id);
        if let Some(copy) = self
            .all_views
            .get_mut(&view_id)
            .and_then(DiagramElement::as_edge_mut)
        {
            copy.source = ElementRef::new(source_view, ElementType::ClassView);
            copy.target = ElementRef::new(target_view, ElementType::ClassView);
        }

        if !is_new {
            // Extra views follow the direction already fixed for the node.
            let fixed_source = self.all_relations.get(&node_id).and_then(GraphNode::source);
            if fixed_source != Some(source) {
                self.reverse_view(view_id);
            }
            return Ok(());
        }

        let reversed = self.orient(
            node_id,
            (old_source, old_target),
            (source, target),
            InconsistentViewContext {
                view: view.id(),
                element: old_element,
            },
        )?;

        let (source, target) = if reversed {
            self.reverse_view(view_id);
            (target, source)
        } else {
            (source, target)
        };

        self.connect(source, node_id);
        self.connect(node_id, target);
        Ok(())
    }

    /// Aligns an edge element with the classes its view connects and points
    /// it at the graph's class ids. Returns `true` when the edge must be
    /// reversed: a composite aggregation at the source end, or a
    /// generalization drawn from general to specific.
    fn orient(
        &mut self,
        node_id: Id,
        (old_source, old_target): (Id, Id),
        (source, target): (Id, Id),
        context: InconsistentViewContext,
    ) -> Result<bool, GraphError> {
        let inconsistent = || GraphError::InconsistentView {
            view: context.view,
            element: context.element,
        };
        let Some(node) = self.all_relations.get_mut(&node_id) else {
            return Err(GraphError::UnknownNode(node_id));
        };

        match node.element_mut() {
            ModelElement::Relation(relation) => {
                let relation_id = relation.id;
                let ends = (
                    relation.source_end().and_then(Property::type_id),
                    relation.target_end().and_then(Property::type_id),
                );
                if ends == (Some(old_target), Some(old_source)) && old_source != old_target {
                    relation.swap_ends();
                } else if ends != (Some(old_source), Some(old_target)) {
                    return Err(inconsistent());
                }

                let count = relation.properties.len();
                let [first, second] = relation.properties.as_mut_slice() else {
                    return Err(GraphError::MalformedRelation {
                        id: relation_id,
                        ends: count,
                    });
                };
                first.property_type = Some(ElementRef::class(source));
                second.property_type = Some(ElementRef::class(target));

                if relation.has_composite_source() {
                    relation.swap_ends();
                    return Ok(true);
                }
                Ok(false)
            }
            ModelElement::Generalization(generalization) => {
                let ends = (generalization.specific.id, generalization.general.id);
                let reversed = if ends == (old_source, old_target) {
                    false
                } else if ends == (old_target, old_source) {
                    true
                } else {
                    return Err(inconsistent());
                };

                let (specific, general) = if reversed {
                    (target, source)
                } else {
                    (source, target)
                };
                generalization.specific = ElementRef::class(specific);
                generalization.general = ElementRef::class(general);
                Ok(reversed)
            }
            other => Err(GraphError::UnexpectedElement {
                id: other.id(),
                expected: ElementType::Relation,
                found: other.element_type(),
            }),
        }
    }

    fn include_generalization_set(
        &mut self,
        model: &Package,
        view: &DiagramElement,
    ) -> Result<(), GraphError> {
        let element = lookup(model, view)?;
        let members: Vec<Id> = element
            .as_generalization_set()
            .map(|set| {
                set.generalizations
                    .iter()
                    .filter_map(|member| self.id_map.get(&member.id).copied())
                    .filter(|id| {
                        self.all_relations
                            .get(id)
                            .is_some_and(GraphNode::is_generalization)
                    })
                    .collect()
            })
            .unwrap_or_default();

        if members.is_empty() {
            debug!(view:% = view.id(); "Skipping generalization set with no member on the diagram");
            return Ok(());
        }

        let (node_id, _, is_new) = self.include_element(view, element);
        if !is_new {
            return Ok(());
        }

        if let Some(set) = self
            .all_relations
            .get_mut(&node_id)
            .and_then(|node| node.element_mut().as_generalization_set_mut())
        {
            set.generalizations = members
                .iter()
                .map(|id| ElementRef::new(*id, ElementType::Generalization))
                .collect();
            if let Some(categorizer) = set.categorizer.as_mut() {
                if let Some(id) = self.id_map.get(&categorizer.id) {
                    categorizer.id = *id;
                }
            }
        }

        for member in &members {
            self.connect(*member, node_id);
        }
        let general = members
            .first()
            .and_then(|member| self.all_relations.get(member))
            .and_then(GraphNode::target);
        if let Some(general) = general {
            self.connect(node_id, general);
        }
        Ok(())
    }

    fn connect(&mut self, from: Id, to: Id) {
        if let Some(node) = self.node_mut(from) {
            node.push_out(to);
        }
        if let Some(node) = self.node_mut(to) {
            node.push_in(from);
        }
    }

    fn reverse_view(&mut self, view: Id) {
        if let Some(edge) = self
            .all_views
            .get_mut(&view)
            .and_then(DiagramElement::as_edge_mut)
        {
            edge.reverse();
        }
    }

    fn index(&mut self, node: &GraphNode) {
        if let Some(stereotype) = node.stereotype() {
            self.all_stereotypes
                .entry(stereotype)
                .or_default()
                .push(node.id());
        }
    }

    fn unindex(&mut self, node: &GraphNode) {
        if let Some(ids) = node
            .stereotype()
            .and_then(|stereotype| self.all_stereotypes.get_mut(&stereotype))
        {
            let id = node.id();
            ids.retain(|other| *other != id);
        }
    }

    fn node_mut(&mut self, id: Id) -> Option<&mut GraphNode> {
        if self.all_nodes.contains_key(&id) {
            self.all_nodes.get_mut(&id)
        } else {
            self.all_relations.get_mut(&id)
        }
    }

    // =========================================================================
    // Mutation primitives
    // =========================================================================

    /// Detaches a relation, generalization or set and deletes it with its views.
    ///
    /// A removed generalization leaves every set it belonged to; a set left
    /// without members is removed as well. No-op for unknown ids.
    pub fn remove_relation(&mut self, id: Id) {
        let Some(node) = self.all_relations.shift_remove(&id) else {
            return;
        };
        trace!(relation:% = id, name = node.name(); "Removing relation");

        for source in node.ins() {
            if let Some(source) = self.node_mut(*source) {
                source.remove_out(id);
            }
        }
        for target in node.outs() {
            if let Some(target) = self.node_mut(*target) {
                target.remove_in(id);
            }
        }
        for view in node.representations() {
            self.all_views.shift_remove(view);
        }
        self.unindex(&node);

        if node.is_generalization() {
            for set_id in node.outs().iter().skip(1) {
                let emptied = match self.all_relations.get_mut(set_id) {
                    Some(set) => {
                        if let Some(members) = set.element_mut().as_generalization_set_mut() {
                            members.remove_member(id);
                        }
                        set.ins().is_empty()
                    }
                    None => false,
                };
                if emptied {
                    self.remove_relation(*set_id);
                }
            }
        }
    }

    /// Deletes a class node together with every relation touching it.
    /// No-op for unknown ids.
    pub fn remove_node(&mut self, id: Id) {
        let Some(node) = self.all_nodes.get(&id) else {
            return;
        };
        let incident: Vec<Id> = node.ins().iter().chain(node.outs()).copied().collect();
        for relation in incident {
            self.remove_relation(relation);
        }

        if let Some(node) = self.all_nodes.shift_remove(&id) {
            trace!(class:% = id, name = node.name(); "Removing class");
            for view in node.representations() {
                self.all_views.shift_remove(view);
            }
            self.unindex(&node);
        }
    }

    /// Moves the target end (`outs[0]`) of an edge node to `class`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] when either id is not in the graph and
    /// [`GraphError::DetachedRelation`] when the edge has no target.
    pub fn move_relation_to(&mut self, id: Id, class: Id, retarget: &Retarget) -> Result<(), GraphError> {
        self.move_end(id, RelationEnd::Target, class, retarget)
    }

    /// Moves the source end (`ins[0]`) of a relation or generalization to `class`.
    ///
    /// # Errors
    ///
    /// As [`ModelGraph::move_relation_to`]; generalization sets have no
    /// class at their source and yield [`GraphError::UnexpectedElement`].
    pub fn move_relation_from(
        &mut self,
        id: Id,
        class: Id,
        retarget: &Retarget,
    ) -> Result<(), GraphError> {
        self.move_end(id, RelationEnd::Source, class, retarget)
    }

    fn move_end(
        &mut self,
        id: Id,
        end: RelationEnd,
        class: Id,
        retarget: &Retarget,
    ) -> Result<(), GraphError> {
        let class_view = self
            .all_nodes
            .get(&class)
            .ok_or(GraphError::UnknownNode(class))?
            .representations()
            .first()
            .copied();
        let node = self.all_relations.get(&id).ok_or(GraphError::UnknownNode(id))?;
        if end == RelationEnd::Source && node.is_generalization_set() {
            return Err(GraphError::UnexpectedElement {
                id,
                expected: ElementType::Generalization,
                found: ElementType::GeneralizationSet,
            });
        }
        let old = match end {
            RelationEnd::Source => node.source(),
            RelationEnd::Target => node.target(),
        }
        .ok_or(GraphError::DetachedRelation(id))?;

        trace!(relation:% = id, from:% = old, to:% = class, end:? = end; "Moving relation end");

        if let Some(old_node) = self.node_mut(old) {
            match end {
                RelationEnd::Source => old_node.remove_out(id),
                RelationEnd::Target => old_node.remove_in(id),
            }
        }
        if let Some(new_node) = self.all_nodes.get_mut(&class) {
            match end {
                RelationEnd::Source => new_node.push_out(id),
                RelationEnd::Target => new_node.push_in(id),
            }
        }

        let anchor = self.anchor_of(class_view);
        let node = self
            .all_relations
            .get_mut(&id)
            .ok_or(GraphError::UnknownNode(id))?;
        match end {
            RelationEnd::Source => node.set_source(class),
            RelationEnd::Target => node.set_target(class),
        }

        match node.element_mut() {
            ModelElement::Relation(relation) => {
                if let Some(property) = relation.end_mut(end) {
                    property.property_type = Some(ElementRef::class(class));
                    retarget.apply(property);
                }
            }
            ModelElement::Generalization(generalization) => match end {
                RelationEnd::Source => generalization.specific = ElementRef::class(class),
                RelationEnd::Target => generalization.general = ElementRef::class(class),
            },
            _ => {}
        }

        let Some(class_view) = class_view else {
            return Ok(());
        };
        for view in node.representations() {
            if let Some(edge) = self
                .all_views
                .get_mut(view)
                .and_then(DiagramElement::as_edge_mut)
            {
                match end {
                    RelationEnd::Source => edge.attach_source(class_view, anchor),
                    RelationEnd::Target => edge.attach_target(class_view, anchor),
                }
            }
        }
        Ok(())
    }

    /// Bottom-centre of a class view's box.
    fn anchor_of(&self, view: Option<Id>) -> Option<Point> {
        view.and_then(|view| self.all_views.get(&view))
            .and_then(|view| view.shape().bounds())
            .map(Bounds::bottom_center)
    }

    /// Copies a relation with a new identity and a new view, starting at `from`.
    ///
    /// Without `to`, the copy keeps the prototype's target, its source end
    /// becomes `0..*` and it is named `"<from>'s <role> <name>"`, where the
    /// role is the prototype's source role or the name of the class `from`
    /// stands in for. With `to`, the copy ends at `to` and becomes a
    /// `participation`.
    ///
    /// Returns the id of the copy.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] for unknown ids, [`GraphError::UnexpectedElement`]
    /// when the prototype is not a relation, and [`GraphError::MissingRepresentation`]
    /// when it has no view to copy.
    pub fn duplicate_relation(&mut self, prototype: Id, from: Id, to: Option<Id>) -> Result<Id, GraphError> {
        let node = self
            .all_relations
            .get(&prototype)
            .ok_or(GraphError::UnknownNode(prototype))?;
        let mut relation = node
            .element()
            .as_relation()
            .cloned()
            .ok_or(GraphError::UnexpectedElement {
                id: prototype,
                expected: ElementType::Relation,
                found: node.element().element_type(),
            })?;
        let target = match to {
            Some(to) => to,
            None => node.target().ok_or(GraphError::DetachedRelation(prototype))?,
        };
        let replaced = node.source();
        let prototype_view = node
            .representations()
            .first()
            .and_then(|view| self.all_views.get(view))
            .ok_or(GraphError::MissingRepresentation(prototype))?
            .clone();

        let from_node = self.all_nodes.get(&from).ok_or(GraphError::UnknownNode(from))?;
        let from_name = from_node.name().to_string();
        let from_view = from_node.representations().first().copied();
        let target_view = self
            .all_nodes
            .get(&target)
            .ok_or(GraphError::UnknownNode(target))?
            .representations()
            .first()
            .copied();

        let id = Id::generate();
        relation.id = id;
        let count = relation.properties.len();
        let [source_end, target_end] = relation.properties.as_mut_slice() else {
            return Err(GraphError::MalformedRelation {
                id: prototype,
                ends: count,
            });
        };
        source_end.id = id.with_suffix("_prop0");
        target_end.id = id.with_suffix("_prop1");
        source_end.property_type = Some(ElementRef::class(from));
        target_end.property_type = Some(ElementRef::class(target));

        match to {
            Some(_) => relation.stereotype = Some(RelationStereotype::Participation),
            None => {
                source_end.cardinality = Cardinality::zero_to_many();
                let role = match source_end.role() {
                    Some(role) => role.to_string(),
                    None => replaced
                        .and_then(|class| self.all_nodes.get(&class))
                        .map(|class| class.name().to_string())
                        .unwrap_or_default(),
                };
                let original = relation.name.as_deref().unwrap_or_default();
                relation.name = Some(format!("{from_name}'s {role} {original}").trim_end().to_string());
            }
        }

        let view_id = Id::generate();
        let mut view = prototype_view;
        view.set_id(view_id);
        view.shape_mut().set_id(view_id.with_suffix("_shape"));
        view.set_model_element(ElementRef::new(id, ElementType::Relation));
        let source_anchor = self.anchor_of(from_view);
        let target_anchor = self.anchor_of(target_view);
        if let Some(edge) = view.as_edge_mut() {
            if let Some(from_view) = from_view {
                edge.attach_source(from_view, source_anchor);
            }
            if let Some(target_view) = target_view {
                edge.attach_target(target_view, target_anchor);
            }
        }

        trace!(prototype:% = prototype, copy:% = id, name:? = relation.name; "Duplicated relation");

        let node = GraphNode::new(ModelElement::Relation(relation), view_id);
        self.index(&node);
        self.all_relations.insert(id, node);
        self.all_views.insert(view_id, view);
        self.connect(from, id);
        self.connect(id, target);
        Ok(id)
    }

    /// Appends an attribute to a class.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownNode`] when `class` is not a class node.
    pub fn add_attribute(&mut self, class: Id, name: &str, cardinality: Cardinality) -> Result<(), GraphError> {
        let node = self
            .all_nodes
            .get_mut(&class)
            .ok_or(GraphError::UnknownNode(class))?;
        if let Some(target) = node.element_mut().as_class_mut() {
            let index = target.properties.len();
            let mut attribute = Property::new(class.with_suffix(&format!("_prop{index}")));
            attribute.name = Some(name.to_string());
            attribute.cardinality = cardinality;
            target.add_attribute(attribute);
        }
        Ok(())
    }

    /// Makes every view of a class taller by `delta`.
    pub fn grow_height(&mut self, class: Id, delta: f32) {
        let Some(node) = self.all_nodes.get(&class) else {
            return;
        };
        for view in node.representations() {
            if let Some(view) = self.all_views.get_mut(view) {
                view.shape_mut().grow_height(delta);
            }
        }
    }

    /// Renames any node.
    pub fn rename(&mut self, id: Id, name: String) {
        if let Some(node) = self.node_mut(id) {
            node.element_mut().set_name(name);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Any node, class or edge.
    pub fn node(&self, id: Id) -> Option<&GraphNode> {
        self.all_nodes
            .get(&id)
            .or_else(|| self.all_relations.get(&id))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.all_nodes.contains_key(&id) || self.all_relations.contains_key(&id)
    }

    pub fn is_class(&self, id: Id) -> bool {
        self.all_nodes.contains_key(&id)
    }

    /// Class node ids in insertion order.
    pub fn node_ids(&self) -> Vec<Id> {
        self.all_nodes.keys().copied().collect()
    }

    /// Edge node ids (relations, generalizations, sets) in insertion order.
    pub fn relation_ids(&self) -> Vec<Id> {
        self.all_relations.keys().copied().collect()
    }

    pub fn view(&self, id: Id) -> Option<&DiagramElement> {
        self.all_views.get(&id)
    }

    pub fn views(&self) -> impl Iterator<Item = &DiagramElement> {
        self.all_views.values()
    }

    fn indexed(&self, stereotype: Stereotype) -> Vec<Id> {
        self.all_stereotypes
            .get(&stereotype)
            .map(|ids| ids.iter().copied().filter(|id| self.contains(*id)).collect())
            .unwrap_or_default()
    }

    pub fn nodes_by_class_stereotype(&self, stereotype: ClassStereotype) -> Vec<Id> {
        self.indexed(Stereotype::Class(stereotype))
    }

    pub fn relations_by_stereotype(&self, stereotype: RelationStereotype) -> Vec<Id> {
        self.indexed(Stereotype::Relation(stereotype))
    }

    pub fn generalizations(&self) -> Vec<Id> {
        self.edges_where(GraphNode::is_generalization)
    }

    pub fn generalization_sets(&self) -> Vec<Id> {
        self.edges_where(GraphNode::is_generalization_set)
    }

    /// Relations that are part-whole by stereotype or by a composite end.
    pub fn part_of_relations(&self) -> Vec<Id> {
        self.edges_where(GraphNode::is_part_whole)
    }

    /// Class nodes stereotyped as mode, quality or relator.
    pub fn moments(&self) -> Vec<Id> {
        self.all_nodes
            .values()
            .filter(|node| node.is_moment())
            .map(GraphNode::id)
            .collect()
    }

    fn edges_where(&self, predicate: impl Fn(&GraphNode) -> bool) -> Vec<Id> {
        self.all_relations
            .values()
            .filter(|node| predicate(node))
            .map(GraphNode::id)
            .collect()
    }

    /// Id of the copy of an original element or view.
    pub fn resolve(&self, original: Id) -> Option<Id> {
        self.id_map.get(&original).copied()
    }

    /// First class node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<Id> {
        self.all_nodes
            .values()
            .find(|node| node.name() == name)
            .map(GraphNode::id)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            classes: self.all_nodes.len(),
            relations: self.all_relations.len(),
            views: self.all_views.len(),
        }
    }

    /// One-line summary of a node: its name and degree.
    pub fn describe(&self, id: Id) -> Option<String> {
        let node = self.node(id)?;
        let summary = format!(
            "Name: {}, ins: {}, outs: {}",
            node.name(),
            node.ins().len(),
            node.outs().len()
        );
        debug!(node:% = id; "{summary}");
        Some(summary)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// A fresh package holding every class, then every edge element.
    pub fn export_model(&self, name: &str) -> Package {
        let mut package = Package::new(Id::generate(), name);
        package.contents = self
            .all_nodes
            .values()
            .chain(self.all_relations.values())
            .map(|node| node.element().clone())
            .collect();
        package
    }

    /// A fresh diagram owned by `owner` holding every remaining view.
    pub fn export_diagram(&self, name: &str, owner: &Package) -> Diagram {
        let mut diagram = Diagram::new(
            Id::generate(),
            name,
            Some(ElementRef::new(owner.id, ElementType::Package)),
        );
        diagram.contents = self.all_views.values().cloned().collect();
        diagram
    }
}

struct InconsistentViewContext {
    view: Id,
    element: Id,
}

/// Finds the element a view depicts and checks it has the matching kind.
fn lookup(model: &Package, view: &DiagramElement) -> Result<ModelElement, GraphError> {
    let reference = view.model_element();
    let element = model
        .find(reference.id)
        .ok_or(GraphError::MissingElement {
            view: view.id(),
            element: reference.id,
        })?;

    let expected = match view {
        DiagramElement::ClassView(_) => ElementType::Class,
        DiagramElement::RelationView(_) => ElementType::Relation,
        DiagramElement::GeneralizationView(_) => ElementType::Generalization,
        DiagramElement::GeneralizationSetView(_) => ElementType::GeneralizationSet,
    };
    if element.element_type() != expected {
        return Err(GraphError::UnexpectedElement {
            id: reference.id,
            expected,
            found: element.element_type(),
        });
    }
    if let ModelElement::Relation(relation) = element {
        if !relation.is_binary() {
            return Err(GraphError::MalformedRelation {
                id: relation.id,
                ends: relation.properties.len(),
            });
        }
    }
    Ok(element.clone())
}
