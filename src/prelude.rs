//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the promptgraph
//! crate. Import this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use promptgraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let text = std::fs::read_to_string("path/to/workflow.json")?;
//! let document: WorkflowDocument = text.parse()?;
//!
//! let mut observer = RecordingObserver::new();
//! let prompts = PromptResolver::default().resolve_observed(&document, &mut observer)?;
//!
//! println!("Resolved: {:?}", prompts);
//! for event in &observer.events {
//!     println!("  {}", event);
//! }
//! # Ok(())
//! # }
//! ```

// Resolution
pub use crate::resolver::{
    DEFAULT_MAX_HOPS, PromptResolver, ResolvedPrompts, ResolverBuilder, SamplerMode, Strategy,
};

// Documents and graphs
pub use crate::graph::{Link, Node, WorkflowGraph};
pub use crate::nodes::{NodeId, NodeKind, NodeRole, PromptSide, TextRule};
pub use crate::workflow::{DocumentShape, WorkflowDocument};

// Diagnostics
pub use crate::trace::{
    NoopObserver, RecordingObserver, ResolutionEvent, ResolutionObserver, TracingObserver,
};

// Error types
pub use crate::error::{ExportError, MetadataError, WorkflowError};

// Image metadata and output
pub use crate::export::{ExportMode, ExtractOptions, FileOutcome};
pub use crate::metadata;

// Standard library re-exports commonly used with this crate
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
