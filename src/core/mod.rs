//! Core business logic for Sprintdeck.
//!
//! This module contains the export pipeline and everything it orchestrates.
//!
//! # Modules
//!
//! - [`export`] - Orchestration, retry policy, and progress reporting
//! - [`cache`] - Fingerprint-keyed result cache with pluggable eviction
//! - [`classify`] - Failure taxonomy, classification, and recovery hints
//! - [`quality`] - Post-render quality gate and rule set
//! - [`fingerprint`] - Deterministic cache keys
//! - [`assemble`] - Presentation assembly from sprint data
//!
//! # Export Workflow
//!
//! One `export()` call walks these steps:
//!
//! 1. **Validate**: reject empty presentations and bad options immediately
//! 2. **Fingerprint**: hash content plus output-affecting options
//! 3. **Cache lookup**: a hit returns the stored artifact untouched
//! 4. **Render**: registry lookup, then the retry loop with classified
//!    failures and exponential backoff
//! 5. **Post-process**: stamp metadata, store in the cache
//! 6. **Quality gate**: rule-based validation; failures log, never block
//!
//! # Example
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
//! # async fn example() -> sprintdeck::domain::Result<()> {
//! let orchestrator = ExportOrchestrator::new(
//!     Arc::new(RendererRegistry::with_default_renderers()),
//!     Arc::new(ResultCache::new(CacheConfig::default())),
//!     Arc::new(ErrorClassifier::new()),
//!     Arc::new(QualityGate::default()),
//!     OrchestratorConfig::default(),
//! );
//!
//! let presentation = Presentation::new("Review", "Sprint 1", vec![]);
//! let options = ExportOptions::new(ExportFormat::Pdf);
//! let result = orchestrator
//!     .export(&presentation, &[], &[], None, &options, None)
//!     .await?;
//! println!("{} ({} bytes)", result.file_name, result.size_bytes);
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod cache;
pub mod classify;
pub mod export;
pub mod fingerprint;
pub mod quality;
