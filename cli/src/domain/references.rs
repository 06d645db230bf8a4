//! Forward references supplied on the command line or via environment.

use sitestack_topology::{ForwardRef, ForwardRefs};

/// Raw values as received from flags; any of them may be absent.
#[derive(Debug, Clone, Default)]
pub struct ReferenceValues {
    pub service_endpoint: Option<String>,
    pub distribution_source: Option<String>,
    pub distribution_domain: Option<String>,
}

/// Builds the reference registry, skipping absent values.
///
/// Blank values are kept; the registry treats them as missing, so the
/// build reports the reference by name.
#[must_use]
pub fn collect_references(values: &ReferenceValues) -> ForwardRefs {
    let mut refs = ForwardRefs::new();
    let pairs = [
        (ForwardRef::ServiceEndpoint, &values.service_endpoint),
        (ForwardRef::DistributionSource, &values.distribution_source),
        (ForwardRef::DistributionDomain, &values.distribution_domain),
    ];
    for (reference, value) in pairs {
        if let Some(value) = value {
            refs.provide(reference, value.as_str());
        }
    }
    refs
}
