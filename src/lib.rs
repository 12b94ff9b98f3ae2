// Sprintdeck - Sprint Report Export Tool
// Copyright (c) 2025 Sprintdeck Contributors
// Licensed under the MIT License

//! # Sprintdeck
//!
//! Sprintdeck turns issue-tracker sprint data into shareable report
//! artifacts: PDF and HTML decks, Markdown, metrics JSON, executive
//! summaries, and one-page PDF digests.
//!
//! The heart of the crate is the export pipeline in [`core::export`]: a
//! format-agnostic orchestrator that validates input, consults a
//! fingerprint-keyed result cache, dispatches to a pluggable renderer,
//! retries recoverable failures with exponential backoff, and runs a
//! post-render quality gate before handing the artifact back.
//!
//! Layers, outermost first:
//!
//! - [`cli`] parses arguments and drives the pipeline end to end
//! - [`adapters`] hold everything external: renderers, the issue tracker
//!   client, analytics recording
//! - [`core`] is the pipeline itself: orchestration, cache, classification,
//!   quality gate, presentation assembly
//! - [`domain`] carries the shared types; [`config`] and [`logging`] supply
//!   the ambient plumbing
//!
//! Dependencies are explicit: the orchestrator is constructed from its
//! registry, cache, classifier, and gate, so tests (and multi-tenant hosts)
//! can run several isolated pipelines in one process.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sprintdeck::adapters::renderers::RendererRegistry;
//! use sprintdeck::core::cache::{CacheConfig, ResultCache};
//! use sprintdeck::core::classify::ErrorClassifier;
//! use sprintdeck::core::export::{ExportOrchestrator, OrchestratorConfig};
//! use sprintdeck::core::quality::QualityGate;
//! use sprintdeck::domain::{ExportFormat, ExportOptions, Presentation};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Renderers are registered explicitly before any export runs
//!     let orchestrator = ExportOrchestrator::new(
//!         Arc::new(RendererRegistry::with_default_renderers()),
//!         Arc::new(ResultCache::new(CacheConfig::default())),
//!         Arc::new(ErrorClassifier::new()),
//!         Arc::new(QualityGate::default()),
//!         OrchestratorConfig::default(),
//!     );
//!
//!     let presentation = Presentation::new("Sprint 31 Review", "Sprint 31", vec![]);
//!     let options = ExportOptions::new(ExportFormat::Markdown);
//!     let result = orchestrator
//!         .export(&presentation, &[], &[], None, &options, None)
//!         .await?;
//!
//!     println!("Exported {} bytes", result.size_bytes);
//!     Ok(())
//! }
//! ```
//!
//! Failures inside the pipeline are classified onto a fixed taxonomy
//! ([`core::classify::ErrorCode`]); recoverable codes are retried with
//! exponential backoff, everything else surfaces immediately with a
//! human-readable message and suggested recovery actions.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
