//! Alias records pointing configured names at the routing layer.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::assembler::BuildStage;
use crate::certificate::ZoneRef;
use crate::error::{Result, TopologyError};
use crate::reference::ForwardRef;

const RECORD_ID_PREFIX: &str = "DnsRecord-";
const MAX_NAME_LEN: usize = 253;

/// One DNS label: up to 63 letters, digits, `-` or `_`, not starting or
/// ending with `-`.
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_]([A-Za-z0-9_-]{0,61}[A-Za-z0-9_])?$").expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    /// IPv4 alias to another named resource.
    A,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsRecord {
    pub id: String,
    /// Relative record name; empty for the zone apex.
    pub name: String,
    pub fqdn: String,
    pub zone: ZoneRef,
    pub record_type: RecordType,
    pub alias_target: String,
}

impl DnsRecord {
    #[must_use]
    pub fn is_apex(&self) -> bool {
        self.name.is_empty()
    }
}

/// Declaration id for a record name.
///
/// Every character outside `[A-Za-z0-9]` becomes `-`. The apex is the bare
/// prefix, which no non-empty name produces. The same name always yields
/// the same id.
#[must_use]
pub fn record_id(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("{RECORD_ID_PREFIX}{safe}")
}

/// Checks `name` as a relative DNS name. The empty string is the apex.
fn validate_record_name(name: &str) -> Result<()> {
    let invalid = |reason: String| TopologyError::InvalidRecordName {
        name: name.to_string(),
        reason,
    };
    if name.is_empty() {
        return Ok(());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid(format!("longer than {MAX_NAME_LEN} characters")));
    }
    for (index, label) in name.split('.').enumerate() {
        if label.is_empty() {
            return Err(invalid("contains an empty label".to_string()));
        }
        if label == "*" {
            if index == 0 {
                continue;
            }
            return Err(invalid("wildcard is only allowed as the first label".to_string()));
        }
        if !LABEL_RE.is_match(label) {
            return Err(invalid(format!(
                "label '{label}' must be 1-63 letters, digits, '-' or '_' and must not start or end with '-'"
            )));
        }
    }
    Ok(())
}

fn fqdn(name: &str, zone: &ZoneRef) -> String {
    if name.is_empty() {
        zone.name.clone()
    } else {
        format!("{name}.{}", zone.name)
    }
}

/// One alias record per name, in input order.
///
/// Every name is checked before failing, so a single error report covers
/// all bad names. Names compare case-insensitively.
///
/// # Errors
///
/// - [`TopologyError::MissingForwardReference`] if `alias_target` is blank.
/// - [`TopologyError::InvalidRecordName`] for a malformed name, or one whose
///   id collides with a different name.
/// - [`TopologyError::DuplicateRecordName`] for a repeated name.
/// - [`TopologyError::RecordNames`] when more than one of the above occurs.
pub fn plan_dns_records<S: AsRef<str>>(
    zone: &ZoneRef,
    record_names: &[S],
    alias_target: &str,
) -> Result<Vec<DnsRecord>> {
    let alias_target = alias_target.trim();
    if alias_target.is_empty() {
        return Err(TopologyError::MissingForwardReference {
            reference: ForwardRef::DistributionDomain,
            stage: BuildStage::DnsBound,
        });
    }

    let mut records = Vec::with_capacity(record_names.len());
    let mut errors = Vec::new();
    let mut seen_ids: HashMap<String, &str> = HashMap::new();

    for name in record_names {
        let name = name.as_ref();
        if let Err(e) = validate_record_name(name) {
            tracing::warn!(name, error = %e, "rejecting DNS record");
            errors.push(e);
            continue;
        }
        let id = record_id(name);
        let key = id.to_ascii_lowercase();
        if let Some(&existing) = seen_ids.get(&key) {
            let e = if existing.eq_ignore_ascii_case(name) {
                TopologyError::DuplicateRecordName {
                    name: name.to_string(),
                }
            } else {
                TopologyError::InvalidRecordName {
                    name: name.to_string(),
                    reason: format!("identifier '{id}' collides with record '{existing}'"),
                }
            };
            tracing::warn!(name, error = %e, "rejecting DNS record");
            errors.push(e);
            continue;
        }
        seen_ids.insert(key, name);
        records.push(DnsRecord {
            id,
            name: name.to_string(),
            fqdn: fqdn(name, zone),
            zone: zone.clone(),
            record_type: RecordType::A,
            alias_target: alias_target.to_string(),
        });
    }

    match errors.len() {
        0 => Ok(records),
        1 => Err(errors.remove(0)),
        _ => Err(TopologyError::RecordNames(errors)),
    }
}
