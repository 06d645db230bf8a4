//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;
use sitestack_topology::origin::STORAGE_ORIGIN_ID;
use sitestack_topology::{
    EnvironmentProfile, PathPattern, PendingTopology, RouteRule, Topology, TopologyOutputs,
};

use crate::output::OutputContext;

/// Renders topology types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        self.ctx.info(&format!("sitestack v{version}"));
    }

    /// Render the environment table, one profile per block.
    pub fn render_environments(&self, profiles: &[EnvironmentProfile], source: &str) {
        if profiles.is_empty() {
            self.ctx.info("No environments configured.");
            return;
        }
        self.ctx.header(&format!("Environments ({source}):"));
        for profile in profiles {
            self.ctx.gap();
            let marker = if profile.is_production() { " (production)" } else { "" };
            self.ctx.kv("Environment:", &format!("{}{marker}", profile.id()));
            self.ctx.kv("Domain:", profile.domain_name());
            self.ctx.kv("Storage:", profile.storage_id());
            self.ctx.kv(
                "Zone:",
                &format!("{} ({})", profile.zone_name(), profile.zone_id()),
            );
            self.ctx.kv("Records:", &record_list(profile.record_names()));
        }
    }

    /// Render the declaration phase and the references still outstanding.
    pub fn render_pending(&self, pending: &PendingTopology) {
        let profile = pending.profile();
        self.ctx.kv("Stack:", &pending.stack().name);
        self.ctx.kv("Environment:", profile.id());
        self.ctx.kv("Stage:", &pending.stage().to_string());
        self.ctx.gap();
        self.ctx.header("Declared:");
        self.ctx.kv(
            "Certificate:",
            &format!(
                "{} (DNS validation in {})",
                pending.certificate().domain_name,
                profile.zone_name()
            ),
        );
        self.ctx.kv(
            "Storage origin:",
            &format!("{} (private)", pending.storage_origin().storage_id()),
        );
        self.ctx.kv(
            "Compute service:",
            &format!(
                "{} on port {}",
                pending.service().service_name,
                pending.service().port
            ),
        );

        let waiting = pending.pending_references();
        if waiting.is_empty() {
            return;
        }
        self.ctx.gap();
        self.ctx.header("Waiting on:");
        for (reference, stage) in waiting {
            self.ctx.warn(&format!("{reference} (needed by {stage})"));
        }
    }

    /// Render a fully bound topology.
    pub fn render_topology(&self, topology: &Topology) {
        self.ctx.kv("Stack:", &topology.stack.name);
        self.ctx.kv("Environment:", &topology.environment);
        self.ctx.gap();

        self.ctx.header("Declarations:");
        for declaration in topology.declarations() {
            self.ctx.kv(&format!("{:<16}", declaration.kind()), declaration.id());
        }
        self.ctx.gap();

        self.ctx.header("Routes:");
        for rule in &topology.distribution.rules {
            self.render_route(rule);
        }
        self.ctx.gap();

        self.ctx.header("DNS:");
        for record in &topology.dns_records {
            self.ctx.kv(&record.fqdn, &format!("→ {}", record.alias_target));
        }
        self.ctx.gap();

        self.render_outputs(&topology.outputs);
    }

    /// Render the named outputs of a completed build.
    pub fn render_outputs(&self, outputs: &TopologyOutputs) {
        self.ctx.header("Outputs:");
        for (name, value) in outputs.entries() {
            self.ctx.kv(&format!("{name}:"), value);
        }
    }

    fn render_route(&self, rule: &RouteRule) {
        if self.ctx.quiet {
            return;
        }
        let pattern = match &rule.pattern {
            PathPattern::Default => "(default)",
            PathPattern::Prefix(prefix) => prefix.as_str(),
        };
        let style = if rule.target.as_str() == STORAGE_ORIGIN_ID {
            self.ctx.styles.storage
        } else {
            self.ctx.styles.service
        };
        println!(
            "  {:<16} → {}",
            pattern.style(self.ctx.styles.dim),
            rule.target.as_str().style(style)
        );
    }
}

fn record_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| if name.is_empty() { "@" } else { name.as_str() })
        .collect::<Vec<_>>()
        .join(", ")
}
