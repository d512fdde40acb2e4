//! Non-fatal findings reported by an abstraction run.
//!
//! Issues never abort a run; they travel back to the caller next to the
//! abstracted project.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{identifier::Id, semantic::ModelElement};

/// The severity level of an issue.
///
/// - [`Severity::Error`] marks a result the caller should not trust
/// - [`Severity::Warning`] marks an advisory finding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[default]
    Warning,
}

impl Severity {
    /// Returns `true` if this is an error severity.
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }

    /// Returns `true` if this is a warning severity.
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Stable machine-readable issue codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Abstracting from a class folded nothing into it.
    NotAbstractableClass,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAbstractableClass => "not_abstractable_class",
        }
    }

    /// Default title shown for the code.
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotAbstractableClass => "Class cannot be abstracted",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload attached to an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueData {
    /// The element the issue is about.
    pub source: ModelElement,
}

/// A single issue found while abstracting.
///
/// # Example
///
/// ```
/// # use ontofold_core::identifier::Id;
/// # use ontofold_core::issue::{AbstractionIssue, IssueCode, Severity};
/// # use ontofold_core::semantic::{Class, ModelElement};
/// let class = ModelElement::Class(Class::new(Id::new("c1"), "Person", None));
/// let issue = AbstractionIssue::not_abstractable_class(class)
///     .with_description("nothing is folded into `Person`");
///
/// assert_eq!(issue.code(), IssueCode::NotAbstractableClass);
/// assert_eq!(issue.severity(), Severity::Warning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractionIssue {
    id: Id,
    code: IssueCode,
    title: String,
    description: Option<String>,
    severity: Severity,
    data: IssueData,
}

impl AbstractionIssue {
    /// Creates a warning about `source`.
    pub fn new(code: IssueCode, source: ModelElement, title: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            code,
            title: title.into(),
            description: None,
            severity: Severity::default(),
            data: IssueData { source },
        }
    }

    /// Issue for a class from which nothing could be abstracted.
    pub fn not_abstractable_class(source: ModelElement) -> Self {
        let code = IssueCode::NotAbstractableClass;
        Self::new(code, source, code.title())
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn code(&self) -> IssueCode {
        self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The element the issue is about.
    pub fn source(&self) -> &ModelElement {
        &self.data.source
    }
}

impl fmt::Display for AbstractionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.title)?;
        if let Some(description) = &self.description {
            write!(f, " ({description})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::Class;

    fn person() -> ModelElement {
        ModelElement::Class(Class::new(Id::new("person"), "Person", None))
    }

    #[test]
    fn test_defaults() {
        let issue = AbstractionIssue::not_abstractable_class(person());

        assert_eq!(issue.severity(), Severity::Warning);
        assert!(issue.severity().is_warning());
        assert_eq!(issue.description(), None);
        assert_eq!(issue.source().id(), "person");
    }

    #[test]
    fn test_builder() {
        let issue = AbstractionIssue::not_abstractable_class(person())
            .with_severity(Severity::Error)
            .with_description("no parts");

        assert!(issue.severity().is_error());
        assert_eq!(issue.description(), Some("no parts"));
        assert_eq!(
            issue.to_string(),
            "error[not_abstractable_class]: Class cannot be abstracted (no parts)"
        );
    }

    #[test]
    fn test_json_shape() {
        let issue = AbstractionIssue::not_abstractable_class(person());
        let value = serde_json::to_value(&issue).unwrap();

        assert_eq!(value["code"], "not_abstractable_class");
        assert_eq!(value["severity"], "warning");
        assert!(value["description"].is_null());
        assert_eq!(value["data"]["source"]["type"], "Class");
        assert_eq!(value["data"]["source"]["name"], "Person");
    }

    #[test]
    fn test_ids_are_fresh() {
        let a = AbstractionIssue::not_abstractable_class(person());
        let b = AbstractionIssue::not_abstractable_class(person());
        assert_ne!(a.id(), b.id());
    }
}
