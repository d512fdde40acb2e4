//! Command-line argument definitions for the Ontofold CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input project, the diagram or element
//! to abstract, the rule to apply, configuration and logging verbosity.

use clap::Parser;

use ontofold::options::AbstractionRule;

/// Command-line arguments for the Ontofold abstraction tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input OntoUML project (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the abstracted project (JSON)
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Id of the diagram to abstract
    #[arg(short, long)]
    pub diagram: Option<String>,

    /// Id of a class to abstract from, instead of applying a rule
    #[arg(short, long)]
    pub element: Option<String>,

    /// Abstraction rule (parthood, hierarchy, aspects, all)
    #[arg(short, long)]
    pub rule: Option<AbstractionRule>,

    /// Path to write the issues found during abstraction (JSON)
    #[arg(long)]
    pub issues: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
