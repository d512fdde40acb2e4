//! Multiplicity intervals of relation ends.
//!
//! Cardinalities travel through JSON as strings such as `"1"`, `"0..1"` or
//! `"1..*"`. A lone `"*"` is shorthand for `"0..*"`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Upper end of a [`Cardinality`].
///
/// Variant order matters: every finite bound compares below [`Bound::Unbounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bound {
    Finite(u32),
    Unbounded,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unbounded => write!(f, "*"),
        }
    }
}

/// Error returned when a cardinality string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardinalityError {
    #[error("invalid cardinality bound `{0}`")]
    InvalidBound(String),

    #[error("lower bound {lower} exceeds upper bound {upper} in cardinality `{input}`")]
    Inverted { input: String, lower: u32, upper: u32 },
}

/// A `lower..upper` multiplicity interval with `lower <= upper`.
///
/// # Examples
///
/// ```
/// # use ontofold_core::semantic::{Bound, Cardinality};
/// let mut card: Cardinality = "2..5".parse().unwrap();
/// card.relax_lower();
/// card.cap_upper(1);
/// assert_eq!(card.to_string(), "0..1");
///
/// assert_eq!(Cardinality::one().to_string(), "1");
/// assert_eq!(Cardinality::default().upper(), Bound::Unbounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cardinality {
    lower: u32,
    upper: Bound,
}

impl Cardinality {
    /// Creates a cardinality, clamping `lower` so the interval is never inverted.
    pub fn new(lower: u32, upper: Bound) -> Self {
        let lower = match upper {
            Bound::Finite(max) => lower.min(max),
            Bound::Unbounded => lower,
        };
        Self { lower, upper }
    }

    /// `0..*`
    pub fn zero_to_many() -> Self {
        Self::new(0, Bound::Unbounded)
    }

    /// `1`
    pub fn one() -> Self {
        Self::new(1, Bound::Finite(1))
    }

    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }

    /// Drops the lower bound to zero.
    pub fn relax_lower(&mut self) {
        self.lower = 0;
    }

    /// Lowers the upper bound to `max` when it is larger; the lower bound follows.
    pub fn cap_upper(&mut self, max: u32) {
        if self.upper > Bound::Finite(max) {
            self.upper = Bound::Finite(max);
            self.lower = self.lower.min(max);
        }
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::zero_to_many()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.upper == Bound::Finite(self.lower) {
            write!(f, "{}", self.lower)
        } else {
            write!(f, "{}..{}", self.lower, self.upper)
        }
    }
}

fn parse_bound(input: &str, raw: &str) -> Result<Bound, CardinalityError> {
    match raw.trim() {
        "*" => Ok(Bound::Unbounded),
        other => other
            .parse()
            .map(Bound::Finite)
            .map_err(|_| CardinalityError::InvalidBound(input.to_string())),
    }
}

impl FromStr for Cardinality {
    type Err = CardinalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (lower, upper) = match input.split_once("..") {
            Some((lower, upper)) => (lower.trim(), parse_bound(input, upper)?),
            None if input == "*" => return Ok(Self::zero_to_many()),
            None => {
                let bound = parse_bound(input, input)?;
                (input, bound)
            }
        };

        let lower: u32 = lower
            .parse()
            .map_err(|_| CardinalityError::InvalidBound(input.to_string()))?;

        if let Bound::Finite(max) = upper {
            if lower > max {
                return Err(CardinalityError::Inverted {
                    input: input.to_string(),
                    lower,
                    upper: max,
                });
            }
        }

        Ok(Self { lower, upper })
    }
}

impl Serialize for Cardinality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cardinality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        match value {
            Some(value) => value.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_common_forms() {
        let cases = [
            ("1", 1, Bound::Finite(1)),
            ("0..1", 0, Bound::Finite(1)),
            ("0..*", 0, Bound::Unbounded),
            ("1..*", 1, Bound::Unbounded),
            ("*", 0, Bound::Unbounded),
            (" 2 .. 4 ", 2, Bound::Finite(4)),
        ];

        for (input, lower, upper) in cases {
            let card: Cardinality = input.parse().unwrap();
            assert_eq!(card.lower(), lower, "lower of {input}");
            assert_eq!(card.upper(), upper, "upper of {input}");
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "many".parse::<Cardinality>(),
            Err(CardinalityError::InvalidBound(_))
        ));
        assert!(matches!(
            "*..1".parse::<Cardinality>(),
            Err(CardinalityError::InvalidBound(_))
        ));
        assert!(matches!(
            "3..1".parse::<Cardinality>(),
            Err(CardinalityError::Inverted { lower: 3, upper: 1, .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Cardinality::one().to_string(), "1");
        assert_eq!(Cardinality::zero_to_many().to_string(), "0..*");
        assert_eq!(Cardinality::new(1, Bound::Unbounded).to_string(), "1..*");
        assert_eq!(Cardinality::new(0, Bound::Finite(1)).to_string(), "0..1");
    }

    #[test]
    fn test_relax_lower() {
        let mut card = Cardinality::new(1, Bound::Unbounded);
        card.relax_lower();
        assert_eq!(card, Cardinality::zero_to_many());
    }

    #[test]
    fn test_cap_upper() {
        let mut many = Cardinality::new(2, Bound::Unbounded);
        many.cap_upper(1);
        assert_eq!(many, Cardinality::one());

        let mut optional = Cardinality::new(0, Bound::Finite(1));
        optional.cap_upper(1);
        assert_eq!(optional, Cardinality::new(0, Bound::Finite(1)));
    }

    #[test]
    fn test_new_clamps_lower() {
        let card = Cardinality::new(5, Bound::Finite(2));
        assert_eq!(card.lower(), 2);
    }

    #[test]
    fn test_serde_string_form() {
        let card = Cardinality::new(1, Bound::Unbounded);
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"1..*\"");

        let back: Cardinality = serde_json::from_str("\"0..1\"").unwrap();
        assert_eq!(back, Cardinality::new(0, Bound::Finite(1)));

        let null: Cardinality = serde_json::from_str("null").unwrap();
        assert_eq!(null, Cardinality::zero_to_many());

        assert!(serde_json::from_str::<Cardinality>("\"x\"").is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn bound_strategy() -> impl Strategy<Value = Bound> {
        prop_oneof![
            (0u32..20).prop_map(Bound::Finite),
            Just(Bound::Unbounded),
        ]
    }

    fn cardinality_strategy() -> impl Strategy<Value = Cardinality> {
        (0u32..20, bound_strategy()).prop_map(|(lower, upper)| Cardinality::new(lower, upper))
    }

    // ===================
    // Property Test Functions
    // ===================

    fn check_interval_never_inverted(card: Cardinality) -> Result<(), TestCaseError> {
        prop_assert!(Bound::Finite(card.lower()) <= card.upper());
        Ok(())
    }

    /// Relaxing only ever widens the interval.
    fn check_relax_never_tightens(card: Cardinality) -> Result<(), TestCaseError> {
        let mut relaxed = card;
        relaxed.relax_lower();

        prop_assert_eq!(relaxed.lower(), 0);
        prop_assert!(relaxed.lower() <= card.lower());
        prop_assert_eq!(relaxed.upper(), card.upper());
        Ok(())
    }

    fn check_cap_keeps_interval_valid(card: Cardinality, max: u32) -> Result<(), TestCaseError> {
        let mut capped = card;
        capped.cap_upper(max);

        prop_assert_eq!(capped.upper(), card.upper().min(Bound::Finite(max)));
        prop_assert!(Bound::Finite(capped.lower()) <= capped.upper());
        Ok(())
    }

    fn check_display_parses_back(card: Cardinality) -> Result<(), TestCaseError> {
        let parsed: Cardinality = card.to_string().parse().expect("display output parses");
        prop_assert_eq!(parsed, card);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn interval_never_inverted(card in cardinality_strategy()) {
            check_interval_never_inverted(card)?;
        }

        #[test]
        fn relax_never_tightens(card in cardinality_strategy()) {
            check_relax_never_tightens(card)?;
        }

        #[test]
        fn cap_keeps_interval_valid(card in cardinality_strategy(), max in 0u32..5) {
            check_cap_keeps_interval_valid(card, max)?;
        }

        #[test]
        fn display_parses_back(card in cardinality_strategy()) {
            check_display_parses_back(card)?;
        }
    }
}
