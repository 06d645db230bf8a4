//! Routing layer: the behavior table that splits traffic between origins.
//!
//! Prefix rules come first, in the order given, followed by exactly one
//! default rule. A request takes the first prefix rule whose pattern
//! matches its path, otherwise the default.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::certificate::CertificateRequest;
use crate::error::{Result, TopologyError};
use crate::origin::{NetworkOrigin, OriginAccessControl, OriginId, StorageOrigin};

pub const DISTRIBUTION_ID: &str = "SiteDistribution";

/// Path prefixes served from the storage origin.
pub const STATIC_PREFIXES: &[&str] = &["/images/*", "/static/*"];

/// Headers a storage origin needs to answer CORS preflight correctly.
const CORS_HEADERS: &[&str] = &[
    "Origin",
    "Access-Control-Request-Method",
    "Access-Control-Request-Headers",
];

// ── Rule types ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathPattern {
    Default,
    Prefix(String),
}

impl PathPattern {
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Whether a request for `path` falls under this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Default => true,
            Self::Prefix(pattern) => glob_match(pattern, path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CachePolicy {
    Disabled,
    OptimizedForStatic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Forwarding {
    None,
    All,
}

/// Which parts of the viewer request reach the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingPolicy {
    pub headers: Vec<String>,
    pub cookies: Forwarding,
    pub query_strings: Forwarding,
}

impl ForwardingPolicy {
    /// `Host`, every cookie and every query parameter, so the compute
    /// service sees what a direct client connection would send.
    #[must_use]
    pub fn all_viewer() -> Self {
        Self {
            headers: vec!["Host".to_string()],
            cookies: Forwarding::All,
            query_strings: Forwarding::All,
        }
    }

    /// Only the headers a storage origin needs for CORS.
    #[must_use]
    pub fn cors_safe() -> Self {
        Self {
            headers: CORS_HEADERS.iter().map(ToString::to_string).collect(),
            cookies: Forwarding::None,
            query_strings: Forwarding::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerProtocol {
    RedirectToHttps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRule {
    pub pattern: PathPattern,
    pub target: OriginId,
    pub cache: CachePolicy,
    pub forwarding: ForwardingPolicy,
    pub viewer_protocol: ViewerProtocol,
}

// ── Planning ─────────────────────────────────────────────────────────────────

/// Builds the behavior table: one rule per static prefix, then the default.
///
/// # Errors
///
/// Returns [`TopologyError::InvalidRoutePattern`] for a prefix that does not
/// start with `/`, and [`TopologyError::ConflictingRoute`] when the same
/// prefix is listed twice.
pub fn plan_routes<S: AsRef<str>>(
    storage: &StorageOrigin,
    network: &NetworkOrigin,
    static_prefixes: &[S],
) -> Result<Vec<RouteRule>> {
    let mut rules: Vec<RouteRule> = Vec::with_capacity(static_prefixes.len() + 1);
    for prefix in static_prefixes {
        let prefix = prefix.as_ref();
        validate_pattern(prefix)?;
        let pattern = PathPattern::Prefix(prefix.to_string());
        if rules.iter().any(|r| r.pattern == pattern) {
            return Err(TopologyError::ConflictingRoute {
                pattern: prefix.to_string(),
            });
        }
        rules.push(RouteRule {
            pattern,
            target: storage.id().clone(),
            cache: CachePolicy::OptimizedForStatic,
            forwarding: ForwardingPolicy::cors_safe(),
            viewer_protocol: ViewerProtocol::RedirectToHttps,
        });
    }
    rules.push(RouteRule {
        pattern: PathPattern::Default,
        target: network.id().clone(),
        cache: CachePolicy::Disabled,
        forwarding: ForwardingPolicy::all_viewer(),
        viewer_protocol: ViewerProtocol::RedirectToHttps,
    });
    Ok(rules)
}

fn validate_pattern(pattern: &str) -> Result<()> {
    let invalid = |reason: &str| TopologyError::InvalidRoutePattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };
    if !pattern.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if pattern.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    glob_regex(pattern).map_err(|e| invalid(&e.to_string()))?;
    Ok(())
}

/// The rule a request for `path` is served by.
///
/// `None` only for a rule table without a default rule, which
/// [`plan_routes`] never produces.
#[must_use]
pub fn resolve_path<'a>(rules: &'a [RouteRule], path: &str) -> Option<&'a RouteRule> {
    rules
        .iter()
        .filter(|r| !r.pattern.is_default())
        .find(|r| r.pattern.matches(path))
        .or_else(|| rules.iter().find(|r| r.pattern.is_default()))
}

/// Compiles a prefix pattern into an anchored, case-sensitive regex:
/// `*` is any run of characters, `?` is one, everything else is literal.
fn glob_regex(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    let mut source = String::from("(?s)^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            _ => source.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    source.push('$');
    Regex::new(&source)
}

fn glob_match(pattern: &str, path: &str) -> bool {
    glob_regex(pattern).is_ok_and(|re| re.is_match(path))
}

// ── Distribution ─────────────────────────────────────────────────────────────

/// The routing layer as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionPlan {
    pub id: String,
    pub comment: String,
    /// Names the routing layer answers for.
    pub aliases: Vec<String>,
    pub certificate_id: String,
    /// Signing identity used towards the storage origin.
    pub origin_access_control: OriginAccessControl,
    pub rules: Vec<RouteRule>,
}

impl DistributionPlan {
    #[must_use]
    pub fn default_rule(&self) -> Option<&RouteRule> {
        self.rules.iter().find(|r| r.pattern.is_default())
    }

    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteRule> {
        resolve_path(&self.rules, path)
    }
}

/// `domain` and `www.domain`.
#[must_use]
pub fn aliases(domain: &str) -> Vec<String> {
    vec![domain.to_string(), format!("www.{domain}")]
}

/// Plans the routing layer over both origins.
///
/// # Errors
///
/// Propagates [`plan_routes`] failures.
pub fn plan_distribution<S: AsRef<str>>(
    domain: &str,
    certificate: &CertificateRequest,
    storage: &StorageOrigin,
    network: &NetworkOrigin,
    static_prefixes: &[S],
) -> Result<DistributionPlan> {
    Ok(DistributionPlan {
        id: DISTRIBUTION_ID.to_string(),
        comment: format!("CDN for {domain}"),
        aliases: aliases(domain),
        certificate_id: certificate.id.clone(),
        origin_access_control: storage.access_control().clone(),
        rules: plan_routes(storage, network, static_prefixes)?,
    })
}
