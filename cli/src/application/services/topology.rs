//! Topology use-cases: list environments, declare, assemble.

use anyhow::{Context, Result};
use sitestack_topology::{
    EnvironmentProfile, EnvironmentResolver, ForwardRefs, PendingTopology, Topology,
    TopologyAssembler,
};

use crate::application::ports::{EnvironmentTableSource, ProgressReporter};

fn assembler(source: &impl EnvironmentTableSource) -> Result<TopologyAssembler> {
    let table = source
        .load()
        .with_context(|| format!("failed to load environments from {}", source.describe()))?;
    Ok(TopologyAssembler::new(EnvironmentResolver::new(table)))
}

/// Every profile in the active table, sorted by identifier.
///
/// # Errors
///
/// Returns an error if the table cannot be loaded.
pub fn list_environments(source: &impl EnvironmentTableSource) -> Result<Vec<EnvironmentProfile>> {
    let table = source
        .load()
        .with_context(|| format!("failed to load environments from {}", source.describe()))?;
    Ok(table.profiles().cloned().collect())
}

/// Declaration phase only.
///
/// # Errors
///
/// Returns an error if the table cannot be loaded or `env` is unknown.
pub fn declare_topology(
    source: &impl EnvironmentTableSource,
    env: &str,
    reporter: &impl ProgressReporter,
) -> Result<PendingTopology> {
    let assembler = assembler(source)?;
    reporter.step(&format!("resolving environment '{env}'..."));
    let pending = assembler.declare(env)?;
    reporter.success(&format!(
        "declared {} ({})",
        pending.stack().name,
        pending.profile().domain_name()
    ));
    for (reference, stage) in pending.pending_references() {
        reporter.step(&format!("waiting on {reference} (needed by {stage})"));
    }
    Ok(pending)
}

/// Declaration and binding phases.
///
/// # Errors
///
/// Returns an error if the table cannot be loaded, `env` is unknown, a
/// forward reference is missing, or any planner rejects its input.
pub fn assemble_topology(
    source: &impl EnvironmentTableSource,
    env: &str,
    refs: &ForwardRefs,
    reporter: &impl ProgressReporter,
) -> Result<Topology> {
    let mut pending = declare_topology(source, env, reporter)?;
    reporter.step("binding forward references...");
    let topology = pending.bind(refs)?;
    reporter.success(&format!(
        "assembled {} declarations",
        topology.declarations().len()
    ));
    Ok(topology)
}
