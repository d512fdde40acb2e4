//! Request options for an abstraction run.
//!
//! Options arrive partially filled from JSON or the command line; every
//! field is optional and [`AbstractionOptions`] falls back to the configured
//! defaults when one is missing.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use ontofold_core::identifier::Id;

/// Bulk abstraction rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbstractionRule {
    Parthood,
    Hierarchy,
    Aspects,
    /// Parthood, then aspects, then hierarchy.
    #[default]
    All,
}

impl AbstractionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parthood => "parthood",
            Self::Hierarchy => "hierarchy",
            Self::Aspects => "aspects",
            Self::All => "all",
        }
    }
}

impl fmt::Display for AbstractionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbstractionRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parthood" => Ok(Self::Parthood),
            "hierarchy" => Ok(Self::Hierarchy),
            "aspects" => Ok(Self::Aspects),
            "all" => Ok(Self::All),
            _ => Err(format!(
                "unknown abstraction rule `{s}`, expected parthood, hierarchy, aspects or all"
            )),
        }
    }
}

/// What to abstract and how.
///
/// With an active element the run abstracts from that element only; otherwise
/// the rule is applied to the whole active diagram.
///
/// # Examples
///
/// ```
/// use ontofold::options::{AbstractionOptions, AbstractionRule};
///
/// let options: AbstractionOptions =
///     serde_json::from_str(r#"{ "activeDiagramId": "d1" }"#).unwrap();
/// assert_eq!(options.rule_or(AbstractionRule::All), AbstractionRule::All);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbstractionOptions {
    #[serde(default)]
    pub active_diagram_id: Option<Id>,
    #[serde(default)]
    pub active_element_id: Option<Id>,
    #[serde(default)]
    pub abstraction_rule: Option<AbstractionRule>,
}

impl AbstractionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_diagram(mut self, diagram: Id) -> Self {
        self.active_diagram_id = Some(diagram);
        self
    }

    pub fn with_element(mut self, element: Id) -> Self {
        self.active_element_id = Some(element);
        self
    }

    pub fn with_rule(mut self, rule: AbstractionRule) -> Self {
        self.abstraction_rule = Some(rule);
        self
    }

    /// The requested rule, or `default` when none was given.
    pub fn rule_or(&self, default: AbstractionRule) -> AbstractionRule {
        self.abstraction_rule.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names() {
        for rule in [
            AbstractionRule::Parthood,
            AbstractionRule::Hierarchy,
            AbstractionRule::Aspects,
            AbstractionRule::All,
        ] {
            assert_eq!(rule.to_string().parse::<AbstractionRule>(), Ok(rule));
        }
        assert!("everything".parse::<AbstractionRule>().is_err());
        assert_eq!(AbstractionRule::default(), AbstractionRule::All);
    }

    #[test]
    fn test_partial_json() {
        let options: AbstractionOptions = serde_json::from_str(
            r#"{ "activeElementId": "e1", "abstractionRule": "hierarchy" }"#,
        )
        .unwrap();

        assert_eq!(options.active_diagram_id, None);
        assert_eq!(options.active_element_id, Some(Id::new("e1")));
        assert_eq!(
            options.rule_or(AbstractionRule::All),
            AbstractionRule::Hierarchy
        );

        let empty: AbstractionOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AbstractionOptions::new());
    }

    #[test]
    fn test_builder() {
        let options = AbstractionOptions::new()
            .with_diagram(Id::new("d"))
            .with_rule(AbstractionRule::Aspects);

        assert_eq!(options.active_diagram_id, Some(Id::new("d")));
        assert_eq!(options.active_element_id, None);
        assert_eq!(options.rule_or(AbstractionRule::All), AbstractionRule::Aspects);
    }
}
