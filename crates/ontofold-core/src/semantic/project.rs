//! The project document: one model package plus its diagrams.

use serde::{Deserialize, Serialize};

use crate::{diagram::Diagram, identifier::Id, semantic::Package, serde_utils::null_to_default};

/// Root of an OntoUML JSON document.
///
/// # Examples
///
/// ```
/// # use ontofold_core::semantic::Project;
/// let json = r#"{
///     "type": "Project",
///     "id": "p1",
///     "name": "Vehicles",
///     "model": { "type": "Package", "id": "m1", "name": "Model", "contents": [] },
///     "diagrams": []
/// }"#;
///
/// let project: Project = serde_json::from_str(json).unwrap();
/// assert_eq!(project.model.id, "m1");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "tagged_package")]
    pub model: Package,
    #[serde(default, deserialize_with = "null_to_default")]
    pub diagrams: Vec<Diagram>,
}

impl Project {
    pub fn new(id: Id, name: &str, model: Package) -> Self {
        Self {
            id,
            name: Some(name.to_string()),
            description: None,
            model,
            diagrams: Vec::new(),
        }
    }

    pub fn diagram(&self, id: Id) -> Option<&Diagram> {
        self.diagrams.iter().find(|diagram| diagram.id == id)
    }

    /// First diagram that depicts the model element `element`.
    pub fn diagram_showing(&self, element: Id) -> Option<&Diagram> {
        self.diagrams.iter().find(|diagram| diagram.shows(element))
    }
}

/// The root package is written with its own `type` tag.
mod tagged_package {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::semantic::Package;

    #[derive(Serialize)]
    #[serde(tag = "type")]
    enum TaggedRef<'a> {
        Package(&'a Package),
    }

    #[derive(Deserialize)]
    #[serde(tag = "type")]
    enum Tagged {
        Package(Package),
    }

    pub fn serialize<S: Serializer>(package: &Package, serializer: S) -> Result<S::Ok, S::Error> {
        TaggedRef::Package(package).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Package, D::Error> {
        let Tagged::Package(package) = Tagged::deserialize(deserializer)?;
        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_package_round_trips_with_tag() {
        let project = Project::new(Id::new("p"), "Demo", Package::new(Id::new("m"), "Model"));
        let value = serde_json::to_value(&project).unwrap();

        assert_eq!(value["type"], "Project");
        assert_eq!(value["model"]["type"], "Package");
        assert_eq!(value["model"]["name"], "Model");

        let back: Project = serde_json::from_value(value).unwrap();
        assert_eq!(back, project);
    }

    #[test]
    fn test_model_must_be_package() {
        let json = r#"{"type": "Project", "id": "p", "model": {"type": "Class", "id": "c"}}"#;
        assert!(serde_json::from_str::<Project>(json).is_err());
    }

    #[test]
    fn test_missing_diagrams_default_to_empty() {
        let json = r#"{"type": "Project", "id": "p", "model": {"type": "Package", "id": "m"}, "diagrams": null}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert!(project.diagrams.is_empty());
        assert!(project.diagram(Id::new("d")).is_none());
    }
}
