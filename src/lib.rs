//! Freemarker is a rendering wrapper around the external FMPP engine.
//! It owns the protocol for getting inputs to the engine and reading
//! its outputs: source resolution, data embedding, ephemeral config
//! generation, subprocess invocation, and error line translation.
//! Template syntax and evaluation belong entirely to the engine.

/// Ephemeral artifact staging and scoped cleanup
pub mod artifacts;

/// Engine config directives and their plain-text serialization
pub mod config;

/// Data-to-variable preamble generation and error line translation
pub mod embed;

/// Error types and handling for the library
pub mod error;

/// Include-path virtualization
/// Rewrites include directives through the virtual includes root and
/// binds that root in the engine config
pub mod includes;

/// Engine subprocess invocation and run classification
pub mod invoker;

/// Render orchestration and the public rendering API
pub mod renderer;

/// Template identifier to source path resolution
pub mod resolve;
