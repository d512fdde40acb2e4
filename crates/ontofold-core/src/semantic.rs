//! Semantic OntoUML model types.
//!
//! These types mirror the model part of the OntoUML JSON project format. They
//! are what the abstraction engine rewrites: classes, relations between them,
//! generalizations and generalization sets, all owned by a [`Package`].
//!
//! # Organization
//!
//! - [`cardinality`] - Multiplicity intervals of relation ends: [`Cardinality`], [`Bound`]
//! - [`stereotype`] - Class and relation stereotypes: [`ClassStereotype`], [`RelationStereotype`]
//! - [`element`] - Model elements: [`Class`], [`Relation`], [`Property`], [`ModelElement`], etc.
//! - [`project`] - The top level [`Project`] holding one model and its diagrams

pub mod cardinality;
pub mod element;
pub mod project;
pub mod stereotype;

pub use cardinality::*;
pub use element::*;
pub use project::*;
pub use stereotype::*;
