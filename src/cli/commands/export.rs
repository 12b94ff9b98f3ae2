//! Export command implementation
//!
//! Fetches sprint data from the tracker, assembles the report deck, runs the
//! export pipeline, and writes the artifact to disk.

use crate::adapters::renderers::RendererRegistry;
use crate::adapters::tracker::TrackerClient;
use crate::config::load_config;
use crate::core::assemble::PresentationAssembler;
use crate::core::cache::ResultCache;
use crate::core::classify::ErrorClassifier;
use crate::core::export::{ExportOrchestrator, ProgressCallback};
use crate::core::quality::QualityGate;
use crate::domain::ids::SprintId;
use crate::domain::issue::{Issue, Sprint, SprintMetrics, SprintState};
use crate::domain::options::{ExportFormat, ExportOptions, QualityTier};
use clap::Args;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format (pdf, html, markdown, metrics, executive, digest, advanced-digest)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Quality tier (low, medium, high)
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Sprint ID to report on; latest closed or active sprint by default
    #[arg(long)]
    pub sprint: Option<String>,

    /// Board ID override
    #[arg(long)]
    pub board: Option<String>,

    /// Team name shown on the title slide
    #[arg(long)]
    pub team: Option<String>,

    /// Output directory override
    #[arg(short, long)]
    pub output: Option<String>,

    /// Skip image embedding
    #[arg(long)]
    pub no_images: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if let Some(board) = &self.board {
            config.tracker.board_id = Some(board.clone());
        }

        // Resolve format and quality from CLI or configured defaults
        let format = ExportFormat::from_str(
            self.format.as_deref().unwrap_or(&config.export.default_format),
        )?;
        let quality = QualityTier::from_str(
            self.quality
                .as_deref()
                .unwrap_or(&config.export.default_quality),
        )?;
        let mut options = ExportOptions::new(format).with_quality(quality);
        options.include_images = !self.no_images;

        // Fetch sprint data
        let tracker = TrackerClient::new(config.tracker.clone())?;
        let board_id = tracker.board_id().cloned().ok_or_else(|| {
            anyhow::anyhow!("no board configured; set tracker.board_id or pass --board")
        })?;

        let sprints = tracker.vendor().fetch_sprints(&board_id).await?;
        let Some(sprint) = select_sprint(&sprints, self.sprint.as_deref()) else {
            eprintln!("No reportable sprint found on board {board_id}");
            return Ok(1);
        };
        tracing::info!(sprint = %sprint.name, "Selected sprint");

        // Sprint and upcoming-sprint issues load concurrently
        let issues_fut = tracker.vendor().fetch_sprint_issues(&sprint.id);
        let (issues, upcoming_issues) = match next_sprint(&sprints, &sprint.id) {
            Some(next) => {
                futures::try_join!(issues_fut, tracker.vendor().fetch_sprint_issues(&next.id))?
            }
            None => (issues_fut.await?, Vec::new()),
        };
        let metrics = derive_metrics(&issues);

        // Assemble the deck
        let mut assembler = PresentationAssembler::new(sprint);
        if let Some(team) = &self.team {
            assembler = assembler.with_team_name(team);
        }
        let presentation = assembler.assemble(&issues, Some(&metrics));

        // Build the pipeline with explicit dependencies
        let orchestrator = ExportOrchestrator::new(
            Arc::new(RendererRegistry::with_default_renderers()),
            Arc::new(ResultCache::with_strategy(
                config.cache.cache_config(),
                config.cache.eviction_strategy(),
            )),
            Arc::new(ErrorClassifier::new()),
            Arc::new(QualityGate::new(config.quality.clone())),
            config.export.orchestrator_config(),
        )
        .with_cancellation(shutdown_signal);

        let progress: ProgressCallback = Box::new(|event| {
            println!("[{:>3}%] {}", event.percentage, event.message);
        });

        let result = match orchestrator
            .export(
                &presentation,
                &issues,
                &upcoming_issues,
                Some(&metrics),
                &options,
                Some(progress),
            )
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(1);
            }
        };

        // Write the artifact
        let output_dir = self
            .output
            .as_deref()
            .unwrap_or(&config.application.output_dir);
        tokio::fs::create_dir_all(output_dir).await?;
        let path = Path::new(output_dir).join(&result.file_name);
        tokio::fs::write(&path, &result.content).await?;

        println!(
            "Exported {} ({} bytes, {} slides) to {}",
            result.file_name,
            result.size_bytes,
            result.metadata.slide_count,
            path.display()
        );
        Ok(0)
    }
}

/// Pick the sprint to report on: an explicit id, else the active sprint,
/// else the most recent closed one
fn select_sprint<'a>(sprints: &'a [Sprint], requested: Option<&str>) -> Option<&'a Sprint> {
    if let Some(id) = requested {
        return sprints.iter().find(|sprint| sprint.id.as_str() == id);
    }
    sprints
        .iter()
        .find(|sprint| sprint.state == SprintState::Active)
        .or_else(|| {
            sprints
                .iter()
                .rev()
                .find(|sprint| sprint.state == SprintState::Closed)
        })
}

/// The first future sprint after the reported one
fn next_sprint<'a>(sprints: &'a [Sprint], current: &SprintId) -> Option<&'a Sprint> {
    sprints
        .iter()
        .filter(|sprint| sprint.id != *current)
        .find(|sprint| sprint.state == SprintState::Future)
}

/// Derive default metrics from the issue list; the UI lets users edit these
fn derive_metrics(issues: &[Issue]) -> SprintMetrics {
    let committed: f64 = issues.iter().filter_map(|issue| issue.story_points).sum();
    let completed: f64 = issues
        .iter()
        .filter(|issue| issue.status.is_done())
        .filter_map(|issue| issue.story_points)
        .sum();
    let carryover = issues
        .iter()
        .filter(|issue| !issue.status.is_done())
        .count() as u32;
    let defects = issues
        .iter()
        .filter(|issue| issue.issue_type == "bug")
        .count() as u32;

    SprintMetrics {
        committed_points: committed,
        completed_points: completed,
        defect_count: defects,
        carryover_count: carryover,
        checklist: Vec::new(),
        notes: None,
    }
}
