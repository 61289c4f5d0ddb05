//! stampede - ramped load-generation runner

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use stampede_core::{GroupBuilder, StopCondition, TestPlan};

mod cli;
mod plan;

use cli::{Cli, Commands};
use plan::DemoPlan;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    match cli.command {
        Commands::Run {
            threads,
            offset,
            ramp_secs,
            duration_secs,
            pacing,
            action_ms,
        } => run(threads, offset, ramp_secs, duration_secs, pacing, action_ms).await,
    }
}

async fn run(
    threads: usize,
    offset: usize,
    ramp_secs: u64,
    duration_secs: u64,
    pacing: Option<f64>,
    action_ms: u64,
) -> Result<()> {
    let action_delay = Duration::from_millis(action_ms);
    let factory = Arc::new(move |_id: usize, _prior: Option<Arc<dyn TestPlan>>| {
        Arc::new(DemoPlan::new(action_delay)) as Arc<dyn TestPlan>
    });

    let stop_condition = if duration_secs == 0 {
        StopCondition::Indefinite
    } else {
        StopCondition::Duration(Duration::from_secs(duration_secs))
    };

    let group = Arc::new(
        GroupBuilder::new()
            .factory(factory)
            .threads(threads)
            .offset(offset)
            .ramp(Duration::from_secs(ramp_secs))
            .stop_condition(stop_condition)
            .pacing(pacing)
            .build()?,
    );

    // Live counter report once a second for the life of the run.
    let counters = group.counters();
    let reporter = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            tracing::info!(
                launching = counters.launching(),
                active = counters.active(),
                actions = counters.actions(),
                errors = counters.error_count(),
                "Live counters"
            );
        }
    });

    let result = group.kickstart_with_signal_handling().await;
    reporter.abort();
    result?;

    let snapshot = group.snapshot();
    tracing::info!(
        total = snapshot.total,
        actions = snapshot.actions,
        errors = snapshot.errors.len(),
        "Run finished"
    );
    for entry in &snapshot.errors {
        tracing::warn!(%entry, "Recorded error");
    }

    Ok(())
}
