//! TLS certificate request planning.

use serde::{Deserialize, Serialize};

/// Declaration id of the site certificate.
pub const CERTIFICATE_ID: &str = "SiteCertificate";

/// An owned DNS zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRef {
    pub name: String,
    pub id: String,
}

impl ZoneRef {
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

/// How ownership of the requested names is proven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Validation {
    /// DNS records written into the owned zone.
    Dns { zone: ZoneRef },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub id: String,
    pub domain_name: String,
    pub subject_alternative_names: Vec<String>,
    pub validation: Validation,
}

/// Requests a certificate for `domain` and `*.domain`, validated through `zone`.
#[must_use]
pub fn plan_certificate(domain: &str, zone: &ZoneRef) -> CertificateRequest {
    CertificateRequest {
        id: CERTIFICATE_ID.to_string(),
        domain_name: domain.to_string(),
        subject_alternative_names: vec![format!("*.{domain}")],
        validation: Validation::Dns { zone: zone.clone() },
    }
}
