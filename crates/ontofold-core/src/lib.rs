//! Ontofold Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Ontofold model
//! abstraction engine and its front ends. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types for diagram shapes ([`geometry`] module)
//! - **Semantic**: OntoUML model elements, stereotypes and cardinalities ([`semantic`] module)
//! - **Diagram**: Views depicting model elements on a diagram ([`diagram`] module)
//! - **Issues**: Non-fatal findings reported by an abstraction run ([`issue`] module)
//! - **Builder**: Programmatic construction of projects ([`builder::ProjectBuilder`])
//!
//! All model and diagram types (de)serialize to the OntoUML JSON project format.

pub mod builder;
pub mod diagram;
pub mod geometry;
pub mod identifier;
pub mod issue;
pub mod semantic;

mod serde_utils;
