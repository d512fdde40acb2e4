//! OntoUML stereotypes for classes and relations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stereotype of a class.
///
/// Serialized in camelCase, e.g. `historicalRoleMixin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassStereotype {
    Type,
    HistoricalRole,
    HistoricalRoleMixin,
    Event,
    Situation,
    Category,
    Mixin,
    RoleMixin,
    PhaseMixin,
    Kind,
    Collective,
    Quantity,
    Relator,
    Quality,
    Mode,
    Subkind,
    Role,
    Phase,
    Enumeration,
    Datatype,
    Abstract,
}

impl ClassStereotype {
    /// Stereotypes of existentially dependent aspects (moments).
    pub const MOMENT_ONLY: [ClassStereotype; 3] = [Self::Mode, Self::Quality, Self::Relator];

    pub fn is_moment(self) -> bool {
        Self::MOMENT_ONLY.contains(&self)
    }

    pub fn is_event(self) -> bool {
        self == Self::Event
    }

    pub fn is_situation(self) -> bool {
        self == Self::Situation
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::HistoricalRole => "historicalRole",
            Self::HistoricalRoleMixin => "historicalRoleMixin",
            Self::Event => "event",
            Self::Situation => "situation",
            Self::Category => "category",
            Self::Mixin => "mixin",
            Self::RoleMixin => "roleMixin",
            Self::PhaseMixin => "phaseMixin",
            Self::Kind => "kind",
            Self::Collective => "collective",
            Self::Quantity => "quantity",
            Self::Relator => "relator",
            Self::Quality => "quality",
            Self::Mode => "mode",
            Self::Subkind => "subkind",
            Self::Role => "role",
            Self::Phase => "phase",
            Self::Enumeration => "enumeration",
            Self::Datatype => "datatype",
            Self::Abstract => "abstract",
        }
    }
}

impl fmt::Display for ClassStereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stereotype of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationStereotype {
    Material,
    Derivation,
    Comparative,
    Mediation,
    Characterization,
    ExternalDependence,
    ComponentOf,
    MemberOf,
    SubCollectionOf,
    SubQuantityOf,
    Instantiation,
    Termination,
    Participational,
    Participation,
    HistoricalDependence,
    Creation,
    Manifestation,
    BringsAbout,
    Triggers,
}

impl RelationStereotype {
    /// Part-whole stereotypes, folded by the parthood rule.
    pub const PART_WHOLE: [RelationStereotype; 5] = [
        Self::ComponentOf,
        Self::SubCollectionOf,
        Self::SubQuantityOf,
        Self::Participational,
        Self::MemberOf,
    ];

    pub fn is_part_whole(self) -> bool {
        Self::PART_WHOLE.contains(&self)
    }

    /// Relations through which a moment inheres in or mediates an endurant.
    pub fn is_existential_dependence(self) -> bool {
        matches!(self, Self::Characterization | Self::Mediation)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Derivation => "derivation",
            Self::Comparative => "comparative",
            Self::Mediation => "mediation",
            Self::Characterization => "characterization",
            Self::ExternalDependence => "externalDependence",
            Self::ComponentOf => "componentOf",
            Self::MemberOf => "memberOf",
            Self::SubCollectionOf => "subCollectionOf",
            Self::SubQuantityOf => "subQuantityOf",
            Self::Instantiation => "instantiation",
            Self::Termination => "termination",
            Self::Participational => "participational",
            Self::Participation => "participation",
            Self::HistoricalDependence => "historicalDependence",
            Self::Creation => "creation",
            Self::Manifestation => "manifestation",
            Self::BringsAbout => "bringsAbout",
            Self::Triggers => "triggers",
        }
    }
}

impl fmt::Display for RelationStereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stereotype of any node in the model graph, used as the key of the
/// stereotype index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stereotype {
    Class(ClassStereotype),
    Relation(RelationStereotype),
}

impl fmt::Display for Stereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(stereotype) => write!(f, "{stereotype}"),
            Self::Relation(stereotype) => write!(f, "{stereotype}"),
        }
    }
}

impl From<ClassStereotype> for Stereotype {
    fn from(stereotype: ClassStereotype) -> Self {
        Self::Class(stereotype)
    }
}

impl From<RelationStereotype> for Stereotype {
    fn from(stereotype: RelationStereotype) -> Self {
        Self::Relation(stereotype)
    }
}
