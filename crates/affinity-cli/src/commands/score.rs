use std::sync::Arc;

use affinity_core::{Job, Node};
use affinity_placement::{
    AffinityPlugin, CycleOutcome, ErrorKind, Plugin, StaticLister, run_cycle,
};
use serde::Serialize;
use tracing::info;

use super::input::{load_config, load_job, load_nodes};

#[derive(Debug, Serialize)]
struct ScoreReport<'a> {
    job: &'a str,
    plugin: &'a str,
    scores: Vec<ScoreRow<'a>>,
    selected: Option<&'a str>,
    failures: Vec<FailureRow<'a>>,
}

#[derive(Debug, Serialize)]
struct ScoreRow<'a> {
    node: &'a str,
    raw: i64,
    normalized: i64,
}

#[derive(Debug, Serialize)]
struct FailureRow<'a> {
    node: &'a str,
    kind: &'static str,
    error: String,
}

pub fn score(config: Option<&str>, nodes: &str, job: &str, format: &str) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let inventory = load_nodes(nodes)?;
    let job = load_job(job)?;
    info!(job = %job.name, nodes = inventory.len(), "inputs loaded");

    let (outcome, plugin) = dry_run(config, inventory, &job)?;
    print!("{}", render(&outcome, &plugin, format)?);

    if let Some(failure) = outcome.failures.first() {
        anyhow::bail!(
            "scoring failed on {} of {} nodes: {}",
            outcome.failures.len(),
            outcome.failures.len() + outcome.raw.len(),
            failure.error
        );
    }
    Ok(())
}

/// Score `job` on every node of `inventory`, in inventory order.
fn dry_run(
    config: affinity_core::AffinityConfig,
    inventory: Vec<Node>,
    job: &Job,
) -> anyhow::Result<(CycleOutcome, AffinityPlugin)> {
    let candidates: Vec<String> = inventory.iter().map(|n| n.name.clone()).collect();
    let plugin = AffinityPlugin::new(config, Arc::new(StaticLister::new(inventory)))?;
    let outcome = run_cycle(&plugin, job, &candidates);
    Ok((outcome, plugin))
}

fn render(
    outcome: &CycleOutcome,
    plugin: &AffinityPlugin,
    format: &str,
) -> anyhow::Result<String> {
    let report = ScoreReport {
        job: &outcome.job,
        plugin: plugin.name(),
        scores: outcome
            .raw
            .iter()
            .zip(&outcome.normalized)
            .map(|(raw, norm)| ScoreRow {
                node: &raw.name,
                raw: raw.score,
                normalized: norm.score,
            })
            .collect(),
        // A flat vector means no node was preferred.
        selected: outcome
            .best()
            .filter(|_| outcome.has_spread())
            .map(|s| s.name.as_str()),
        failures: outcome
            .failures
            .iter()
            .map(|f| FailureRow {
                node: &f.node,
                kind: match f.error.kind() {
                    ErrorKind::Caller => "caller",
                    ErrorKind::Infrastructure => "infrastructure",
                },
                error: f.error.to_string(),
            })
            .collect(),
    };

    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(&report)?)),
        _ => Ok(format_text(&report)),
    }
}

fn format_text(report: &ScoreReport<'_>) -> String {
    let mut out = format!("job {} ({})\n", report.job, report.plugin);
    if !report.scores.is_empty() {
        out.push_str(&format!("  {:<32} {:>6} {:>10}\n", "NODE", "RAW", "NORMALIZED"));
        for row in &report.scores {
            out.push_str(&format!(
                "  {:<32} {:>6} {:>10}\n",
                row.node, row.raw, row.normalized
            ));
        }
    }
    for failure in &report.failures {
        out.push_str(&format!(
            "  {:<32} failed ({}): {}\n",
            failure.node, failure.kind, failure.error
        ));
    }
    match report.selected {
        Some(node) => out.push_str(&format!("selected: {node}\n")),
        None if report.failures.is_empty() => out.push_str("selected: none (no preference)\n"),
        None => {}
    }
    out
}
