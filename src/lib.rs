//! # promptgraph - Prompt Recovery for Node-Based Workflows
//!
//! **promptgraph** recovers the positive and negative text prompts from the node graph
//! a generative-media editor embeds in its output images. It reads the wiring of the
//! graph rather than guessing from node order, and degrades gracefully when the
//! serialized graph is incomplete.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Document**: Read the embedded text with [`metadata::workflow_text_from_file`]
//!     and parse it into a [`WorkflowDocument`]. The shape (editor graph or flat API graph)
//!     is decided once here.
//! 2.  **Resolve**: Build a [`PromptResolver`] with `PromptResolver::builder()` and call
//!     `resolve`. For editor graphs the resolver indexes the links, selects the live
//!     sampler (preferring one wired through to an output node), follows its inputs
//!     upstream and reads text with per-encoder rules.
//! 3.  **Use the Result**: [`ResolvedPrompts`] holds an optional positive and negative
//!     prompt. Both absent means no prompt could be determined; that is not an error.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = metadata::workflow_text_from_file(Path::new("render_00042.png"))?
//!         .ok_or("no workflow embedded in image")?;
//!     let document: WorkflowDocument = text.parse()?;
//!
//!     let resolver = PromptResolver::builder().max_hops(64).build();
//!     let prompts = resolver.resolve(&document)?;
//!
//!     match prompts.primary() {
//!         Some(prompt) => println!("-> Prompt: {}", prompt),
//!         None => println!("-> No prompt could be determined."),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod export;
pub mod graph;
pub mod metadata;
pub mod nodes;
pub mod prelude;
pub mod resolver;
pub mod trace;
pub mod workflow;

pub use resolver::{PromptResolver, ResolvedPrompts};
pub use workflow::WorkflowDocument;

use error::WorkflowError;
use serde_json::Value;

/// Resolves prompts from an already-decoded JSON document with default settings.
pub fn extract_prompts(value: Value) -> Result<ResolvedPrompts, WorkflowError> {
    let document = WorkflowDocument::from_value(value)?;
    PromptResolver::default().resolve(&document)
}
