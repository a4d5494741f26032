//! Data models module
//!
//! Defines core data structures:
//! - ProfileError: the error taxonomy for profile resolution and decoding
//! - FilterCriteria: declarative filter configuration compiled by the filter module
//! - Config: parsed command-line configuration
//! - ProfileSummary / ListOutput: JSON output shapes for list mode

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Errors raised while resolving, decoding or inspecting a provisioning profile
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The identifier resolved to no file in any of the searched directories
    #[error("Unable to find provisioning profile with UUID {0}")]
    NotFound(String),
    /// Neither the CMS parser nor the `security` fallback produced a payload
    #[error("Unable to decode signed container {path}: {reason}")]
    DecodeFailure { path: PathBuf, reason: String },
    /// The decoded payload is empty or not a property list dictionary
    #[error("Unable to parse property list payload of {path}")]
    MalformedPayload { path: PathBuf },
    /// A single embedded developer certificate blob failed to parse.
    /// Scoped to that entry; the remaining certificates still decode.
    #[error("Unable to decode developer certificate: {0}")]
    CertificateDecode(String),
}

/// Push-environment filter value (three-valued logic, see the filter module)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApsEnvFilter {
    /// Match any profile that has a push entitlement, regardless of environment
    Present,
    /// Match the environment string ("development"/"production") as a pattern
    Matching(String),
}

/// Filter criteria for listing profiles. Unset fields impose no constraint.
///
/// Pattern fields are regular expressions tested against the corresponding
/// profile field. Compiled once into a reusable predicate by the filter module.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Pattern against the profile name
    pub name: Option<String>,
    /// Pattern against the App ID name (the name registered in the portal)
    pub appid_name: Option<String>,
    /// Pattern against the full application identifier from the entitlements
    pub appid: Option<String>,
    /// Pattern against the profile UUID
    pub uuid: Option<String>,
    /// Pattern against the team name or any team identifier
    pub team: Option<String>,
    /// true selects expired profiles, false selects still-valid ones
    pub expired: Option<bool>,
    /// true selects profiles with at least one provisioned device
    pub has_devices: Option<bool>,
    /// Equality against the ProvisionsAllDevices flag
    pub all_devices: Option<bool>,
    /// Push notification environment filter
    pub aps_env: Option<ApsEnvFilter>,
    /// Platform that must appear in the profile's platform list
    pub platform: Option<String>,
}

/// How list results are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// ASCII table with one row per profile
    Table,
    /// UUIDs only, one per line (suitable for piping to xargs)
    UuidList,
    /// File paths only, one per line
    PathList,
    /// JSON document
    Json,
}

/// Configuration for one invocation, parsed from the command line
#[derive(Debug, Clone)]
pub struct Config {
    /// Single profile to inspect (path or UUID). None means list mode.
    pub profile: Option<String>,
    /// Directories searched for profiles, in order
    pub dirs: Vec<PathBuf>,
    /// Filter criteria for list mode
    pub filters: FilterCriteria,
    /// Output rendering mode
    pub mode: OutputMode,
    /// Terminate list entries with NUL instead of newline (UuidList/PathList only)
    pub zero: bool,
    /// Print developer certificate details in info mode
    pub show_certs: bool,
    /// Print provisioned device UDIDs in info mode
    pub show_devices: bool,
}

/// One row of the JSON list output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub uuid: String,
    pub name: String,
    pub app_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    pub team_name: String,
    pub path: String,
}

/// One decode failure in the JSON list output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanFailure {
    pub path: String,
    pub error: String,
}

/// Aggregated statistics for the JSON list output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total number of profile files found on disk
    pub scanned: usize,
    /// Number of profiles that decoded and matched the filters
    pub matched: usize,
    /// Number of files that failed to decode
    pub failed: usize,
}

/// Complete JSON document for list mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOutput {
    pub profiles: Vec<ProfileSummary>,
    pub errors: Vec<ScanFailure>,
    pub summary: ScanSummary,
}
