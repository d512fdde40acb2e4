//! Diagram and view types.
//!
//! A [`Diagram`] is a flat list of views. Each view depicts one model element
//! and owns exactly one [`Shape`]: class and generalization-set views are
//! boxes, relation and generalization views are paths between two class views.

use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    semantic::{ElementRef, ElementType},
    serde_utils::null_to_default,
};

/// Axis-aligned box shape, used by `Rectangle` and `Text` shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub id: Id,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
}

impl RectShape {
    pub fn new(id: Id, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::new(self.x, self.y), Size::new(self.width, self.height))
    }
}

/// Polyline shape of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    pub id: Id,
    #[serde(default, deserialize_with = "null_to_default")]
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Rectangle(RectShape),
    Path(PathShape),
    Text(RectShape),
}

impl Shape {
    pub fn id(&self) -> Id {
        match self {
            Self::Rectangle(rect) | Self::Text(rect) => rect.id,
            Self::Path(path) => path.id,
        }
    }

    pub fn set_id(&mut self, id: Id) {
        match self {
            Self::Rectangle(rect) | Self::Text(rect) => rect.id = id,
            Self::Path(path) => path.id = id,
        }
    }

    /// Bounding box of box shapes; paths have none.
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Rectangle(rect) | Self::Text(rect) => Some(rect.bounds()),
            Self::Path(_) => None,
        }
    }

    pub fn points(&self) -> &[Point] {
        match self {
            Self::Path(path) => &path.points,
            _ => &[],
        }
    }

    pub fn points_mut(&mut self) -> Option<&mut Vec<Point>> {
        match self {
            Self::Path(path) => Some(&mut path.points),
            _ => None,
        }
    }

    /// Makes a box shape taller. No-op on paths.
    pub fn grow_height(&mut self, delta: f32) {
        if let Self::Rectangle(rect) | Self::Text(rect) = self {
            rect.height += delta;
        }
    }
}

/// View of a class or a generalization set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: Id,
    pub model_element: ElementRef,
    pub shape: Shape,
}

/// View of a relation or a generalization, drawn between two class views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub id: Id,
    pub model_element: ElementRef,
    pub shape: Shape,
    pub source: ElementRef,
    pub target: ElementRef,
}

impl EdgeView {
    /// Swaps source and target and reverses the path.
    pub fn reverse(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
        if let Some(points) = self.shape.points_mut() {
            points.reverse();
        }
    }

    /// Re-anchors the source side on a class view.
    pub fn attach_source(&mut self, view: Id, anchor: Option<Point>) {
        self.source = ElementRef::new(view, ElementType::ClassView);
        let first = self.shape.points_mut().and_then(|points| points.first_mut());
        if let (Some(anchor), Some(first)) = (anchor, first) {
            *first = anchor;
        }
    }

    /// Re-anchors the target side on a class view.
    pub fn attach_target(&mut self, view: Id, anchor: Option<Point>) {
        self.target = ElementRef::new(view, ElementType::ClassView);
        let last = self.shape.points_mut().and_then(|points| points.last_mut());
        if let (Some(anchor), Some(last)) = (anchor, last) {
            *last = anchor;
        }
    }
}

/// Any view a diagram may contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DiagramElement {
    ClassView(NodeView),
    RelationView(EdgeView),
    GeneralizationView(EdgeView),
    GeneralizationSetView(NodeView),
}

impl DiagramElement {
    pub fn id(&self) -> Id {
        match self {
            Self::ClassView(view) | Self::GeneralizationSetView(view) => view.id,
            Self::RelationView(view) | Self::GeneralizationView(view) => view.id,
        }
    }

    pub fn set_id(&mut self, id: Id) {
        match self {
            Self::ClassView(view) | Self::GeneralizationSetView(view) => view.id = id,
            Self::RelationView(view) | Self::GeneralizationView(view) => view.id = id,
        }
    }

    pub fn model_element(&self) -> ElementRef {
        match self {
            Self::ClassView(view) | Self::GeneralizationSetView(view) => view.model_element,
            Self::RelationView(view) | Self::GeneralizationView(view) => view.model_element,
        }
    }

    pub fn set_model_element(&mut self, element: ElementRef) {
        match self {
            Self::ClassView(view) | Self::GeneralizationSetView(view) => {
                view.model_element = element
            }
            Self::RelationView(view) | Self::GeneralizationView(view) => {
                view.model_element = element
            }
        }
    }

    pub fn shape(&self) -> &Shape {
        match self {
            Self::ClassView(view) | Self::GeneralizationSetView(view) => &view.shape,
            Self::RelationView(view) | Self::GeneralizationView(view) => &view.shape,
        }
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        match self {
            Self::ClassView(view) | Self::GeneralizationSetView(view) => &mut view.shape,
            Self::RelationView(view) | Self::GeneralizationView(view) => &mut view.shape,
        }
    }

    pub fn view_type(&self) -> ElementType {
        match self {
            Self::ClassView(_) => ElementType::ClassView,
            Self::RelationView(_) => ElementType::RelationView,
            Self::GeneralizationView(_) => ElementType::GeneralizationView,
            Self::GeneralizationSetView(_) => ElementType::GeneralizationSetView,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeView> {
        match self {
            Self::RelationView(view) | Self::GeneralizationView(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_edge_mut(&mut self) -> Option<&mut EdgeView> {
        match self {
            Self::RelationView(view) | Self::GeneralizationView(view) => Some(view),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Diagram {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<ElementRef>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub contents: Vec<DiagramElement>,
}

impl Diagram {
    pub fn new(id: Id, name: &str, owner: Option<ElementRef>) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            description: None,
            owner,
            contents: Vec::new(),
        }
    }

    /// Name of the diagram, empty when unnamed.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Whether any view of this diagram depicts `element`.
    pub fn shows(&self, element: Id) -> bool {
        self.contents
            .iter()
            .any(|view| view.model_element().id == element)
    }
}
