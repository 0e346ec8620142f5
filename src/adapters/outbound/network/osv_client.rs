use crate::dependency_analysis::domain::ResolvedCoordinate;
use crate::ports::outbound::{VulnerabilityMatch, VulnerabilityScanner};
use crate::shared::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::warn;

/// OSV API client for Maven coordinates
///
/// Uses the OSV.dev batch query API to find affected coordinates, then fetches
/// each distinct vulnerability once for its summary and severity.
///
/// # Security
/// - Implements timeout (30 seconds)
/// - Bounds concurrent detail requests
/// - Does not retry failed requests
pub struct OsvClient {
    client: reqwest::Client,
    api_url: String,
    details_url: String,
}

impl OsvClient {
    const API_ENDPOINT: &'static str = "https://api.osv.dev/v1/querybatch";
    const DETAILS_ENDPOINT: &'static str = "https://api.osv.dev/v1/vulns";
    const TIMEOUT_SECONDS: u64 = 30;
    const RATE_LIMIT_MS: u64 = 100;
    const MAX_BATCH_SIZE: usize = 100; // OSV API limit
    const MAX_CONCURRENT_DETAILS: usize = 10;

    /// Creates a new OSV API client with default configuration
    pub fn new() -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("depscope/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: Self::API_ENDPOINT.to_string(),
            details_url: Self::DETAILS_ENDPOINT.to_string(),
        })
    }

    fn batch_query(coordinates: &[ResolvedCoordinate]) -> OsvBatchQuery {
        OsvBatchQuery {
            queries: coordinates
                .iter()
                .map(|coordinate| OsvQuery {
                    package: OsvPackage {
                        name: format!("{}:{}", coordinate.group, coordinate.artifact),
                        ecosystem: "Maven".to_string(),
                    },
                    version: coordinate.version.clone(),
                })
                .collect(),
        }
    }

    /// Fetches vulnerability ids for one batch of coordinates
    async fn fetch_batch(&self, coordinates: &[ResolvedCoordinate]) -> Result<Vec<OsvResult>> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&Self::batch_query(coordinates))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("OSV API returned status code {}", response.status());
        }

        let batch_response: OsvBatchResponse = response.json().await?;
        if batch_response.results.len() != coordinates.len() {
            anyhow::bail!(
                "OSV API returned {} results for {} queries",
                batch_response.results.len(),
                coordinates.len()
            );
        }
        Ok(batch_response.results)
    }

    /// Fetches detailed vulnerability information by ID
    ///
    /// The batch API returns ids only; severity and summary need a second request.
    async fn fetch_vulnerability_details(&self, vuln_id: &str) -> Result<OsvVulnerability> {
        let url = format!("{}/{}", self.details_url, urlencoding::encode(vuln_id));
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "OSV API returned status code {} for vulnerability {}",
                response.status(),
                vuln_id
            );
        }

        Ok(response.json().await?)
    }

    async fn describe(&self, id: String) -> (String, VulnerabilityMatch) {
        let described = match self.fetch_vulnerability_details(&id).await {
            Ok(details) => to_match(&details),
            Err(e) => {
                warn!("Failed to fetch details for {}: {:#}", id, e);
                VulnerabilityMatch::new(id.clone())
            }
        };
        (id, described)
    }
}

#[async_trait]
impl VulnerabilityScanner for OsvClient {
    async fn scan(
        &self,
        coordinates: &[ResolvedCoordinate],
    ) -> Result<Vec<(ResolvedCoordinate, Vec<VulnerabilityMatch>)>> {
        // Step 1: ids per coordinate
        let mut affected: Vec<(ResolvedCoordinate, Vec<String>)> = Vec::new();
        for (index, chunk) in coordinates.chunks(Self::MAX_BATCH_SIZE).enumerate() {
            if index > 0 {
                tokio::time::sleep(Duration::from_millis(Self::RATE_LIMIT_MS)).await;
            }
            let results = self.fetch_batch(chunk).await?;
            for (coordinate, result) in chunk.iter().zip(results) {
                if !result.vulns.is_empty() {
                    let ids = result.vulns.into_iter().map(|v| v.id).collect();
                    affected.push((coordinate.clone(), ids));
                }
            }
        }

        // Step 2: details, once per distinct id
        let mut ids: Vec<String> = affected.iter().flat_map(|(_, ids)| ids.clone()).collect();
        ids.sort();
        ids.dedup();
        let details: HashMap<String, VulnerabilityMatch> = stream::iter(ids)
            .map(|id| self.describe(id))
            .buffer_unordered(Self::MAX_CONCURRENT_DETAILS)
            .collect()
            .await;

        Ok(affected
            .into_iter()
            .map(|(coordinate, ids)| {
                let matches = ids
                    .iter()
                    .map(|id| {
                        details
                            .get(id)
                            .cloned()
                            .unwrap_or_else(|| VulnerabilityMatch::new(id.clone()))
                    })
                    .collect();
                (coordinate, matches)
            })
            .collect())
    }
}

fn to_match(vulnerability: &OsvVulnerability) -> VulnerabilityMatch {
    let mut found = VulnerabilityMatch::new(vulnerability.id.clone());
    if let Some(summary) = &vulnerability.summary {
        found = found.with_summary(summary.clone());
    }
    if let Some(severity) = severity_of(vulnerability) {
        found = found.with_severity(severity);
    }
    found
}

/// Severity from the CVSS v3 vector when present, else from the database label.
fn severity_of(vulnerability: &OsvVulnerability) -> Option<&'static str> {
    let from_cvss = vulnerability
        .severity
        .iter()
        .flatten()
        .find(|s| s.severity_type == "CVSS_V3")
        .and_then(|s| parse_cvss_score(&s.score))
        .map(severity_label);
    from_cvss.or_else(|| {
        vulnerability
            .database_specific
            .as_ref()
            .and_then(|db| db.severity.as_deref())
            .and_then(normalize_severity)
    })
}

fn severity_label(score: f64) -> &'static str {
    match score {
        s if s >= 9.0 => "CRITICAL",
        s if s >= 7.0 => "HIGH",
        s if s >= 4.0 => "MEDIUM",
        s if s > 0.0 => "LOW",
        _ => "NONE",
    }
}

fn normalize_severity(label: &str) -> Option<&'static str> {
    match label.to_uppercase().as_str() {
        "CRITICAL" => Some("CRITICAL"),
        "HIGH" => Some("HIGH"),
        "MODERATE" | "MEDIUM" => Some("MEDIUM"),
        "LOW" => Some("LOW"),
        _ => None,
    }
}

/// CVSS v3 base score from a vector such as
/// `CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H` (9.8).
fn parse_cvss_score(vector: &str) -> Option<f64> {
    let metrics: HashMap<&str, &str> = vector
        .split('/')
        .skip(1)
        .filter_map(|part| part.split_once(':'))
        .collect();
    let metric = |name: &str| metrics.get(name).copied();

    let changed = match metric("S")? {
        "U" => false,
        "C" => true,
        _ => return None,
    };
    let attack_vector = match metric("AV")? {
        "N" => 0.85,
        "A" => 0.62,
        "L" => 0.55,
        "P" => 0.2,
        _ => return None,
    };
    let attack_complexity = match metric("AC")? {
        "L" => 0.77,
        "H" => 0.44,
        _ => return None,
    };
    let privileges = match (metric("PR")?, changed) {
        ("N", _) => 0.85,
        ("L", false) => 0.62,
        ("L", true) => 0.68,
        ("H", false) => 0.27,
        ("H", true) => 0.5,
        _ => return None,
    };
    let interaction = match metric("UI")? {
        "N" => 0.85,
        "R" => 0.62,
        _ => return None,
    };
    let impact_of = |name: &str| match metric(name)? {
        "N" => Some(0.0),
        "L" => Some(0.22),
        "H" => Some(0.56),
        _ => None,
    };
    let (c, i, a) = (impact_of("C")?, impact_of("I")?, impact_of("A")?);

    let iss = 1.0_f64 - (1.0 - c) * (1.0 - i) * (1.0 - a);
    let impact = if changed {
        7.52 * (iss - 0.029) - 3.25 * (iss - 0.02_f64).powi(15)
    } else {
        6.42 * iss
    };
    let exploitability = 8.22 * attack_vector * attack_complexity * privileges * interaction;

    let base = if impact <= 0.0 {
        0.0
    } else if changed {
        f64::min(1.08 * (impact + exploitability), 10.0)
    } else {
        f64::min(impact + exploitability, 10.0)
    };
    Some((base * 10.0).ceil() / 10.0)
}

// OSV API request/response structures

#[derive(Debug, Serialize)]
struct OsvBatchQuery {
    queries: Vec<OsvQuery>,
}

#[derive(Debug, Serialize)]
struct OsvQuery {
    package: OsvPackage,
    version: String,
}

#[derive(Debug, Serialize)]
struct OsvPackage {
    name: String,
    ecosystem: String,
}

#[derive(Debug, Deserialize)]
struct OsvBatchResponse {
    results: Vec<OsvResult>,
}

#[derive(Debug, Deserialize)]
struct OsvResult {
    #[serde(default)]
    vulns: Vec<OsvVulnerabilityId>,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerabilityId {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OsvVulnerability {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    severity: Option<Vec<OsvSeverity>>,
    #[serde(default)]
    database_specific: Option<DatabaseSpecific>,
}

#[derive(Debug, Deserialize)]
struct OsvSeverity {
    #[serde(rename = "type")]
    severity_type: String,
    score: String,
}

#[derive(Debug, Deserialize)]
struct DatabaseSpecific {
    #[serde(default)]
    severity: Option<String>,
}
