//! Provisioning profile model module
//!
//! A read-only typed view over the decoded plist dictionary of one profile.
//! Accessors look their key up on demand and coerce the value; a missing key
//! yields the documented default (empty string / empty list / false) rather
//! than failing. Nothing is cached and the underlying dictionary is never
//! mutated.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use x509_certificate::CapturedX509Certificate;

use crate::decode;
use crate::entitlements::Entitlements;
use crate::models::ProfileError;

/// Top-level dictionary key holding the raw DER copy of the whole profile.
/// Large binary field, stripped from display/JSON serialization by convention.
const DER_ENCODED_PROFILE_KEY: &str = "DER-Encoded-Profile";

/// The decoded content of one provisioning profile file
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningProfile {
    path: PathBuf,
    plist: plist::Dictionary,
}

impl ProvisioningProfile {
    /// Decode the profile file at `path`: unwrap the signed container, then
    /// parse the payload as a property list dictionary.
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let payload = decode::decode_container(path)?;
        let plist = decode::parse_payload(path, &payload)?;
        Ok(ProvisioningProfile {
            path: path.to_path_buf(),
            plist,
        })
    }

    /// Wrap an already-decoded dictionary
    pub fn from_dictionary(path: PathBuf, plist: plist::Dictionary) -> Self {
        ProvisioningProfile { path, plist }
    }

    /// The file this profile was decoded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The name of the profile
    pub fn name(&self) -> &str {
        self.string("Name")
    }

    /// The UUID of the profile
    pub fn uuid(&self) -> &str {
        self.string("UUID")
    }

    /// The name associated with the App ID in the developer portal.
    /// Not the App ID itself.
    pub fn app_id_name(&self) -> &str {
        self.string("AppIDName")
    }

    /// The App ID prefix, typically the team identifier. Stored as a
    /// one-element array in the profile; the first entry is returned.
    pub fn app_id_prefix(&self) -> &str {
        self.plist
            .get("ApplicationIdentifierPrefix")
            .and_then(plist::Value::as_array)
            .and_then(|values| values.first())
            .and_then(plist::Value::as_string)
            .unwrap_or("")
    }

    /// The creation date of the profile
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.date("CreationDate")
    }

    /// The expiration date of the profile
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.date("ExpirationDate")
    }

    /// The time-to-live of the profile in days. Some profiles carry this as a
    /// real number; the value is truncated to an integer either way.
    pub fn time_to_live_days(&self) -> i64 {
        match self.plist.get("TimeToLive") {
            Some(plist::Value::Integer(i)) => i.as_signed().unwrap_or(0),
            Some(plist::Value::Real(r)) => *r as i64,
            _ => 0,
        }
    }

    /// The team identifiers. Profiles typically contain exactly one.
    pub fn team_ids(&self) -> Vec<String> {
        self.string_list("TeamIdentifier")
    }

    /// The name of the team
    pub fn team_name(&self) -> &str {
        self.string("TeamName")
    }

    /// The platforms this profile applies to (e.g. "iOS")
    pub fn platforms(&self) -> Vec<String> {
        self.string_list("Platform")
    }

    /// The provisioned device UDIDs. Absent and empty are equivalent here.
    pub fn provisioned_devices(&self) -> Vec<String> {
        self.string_list("ProvisionedDevices")
    }

    /// Whether this profile provisions all devices instead of a fixed list
    pub fn provisions_all_devices(&self) -> bool {
        self.plist
            .get("ProvisionsAllDevices")
            .and_then(plist::Value::as_boolean)
            .unwrap_or(false)
    }

    /// The embedded developer certificates, decoded from their DER blobs.
    ///
    /// Lenient by design: each blob decodes independently and a malformed
    /// entry surfaces as an `Err` in its slot without aborting the others.
    pub fn developer_certificates(&self) -> Vec<Result<DeveloperCertificate, ProfileError>> {
        self.plist
            .get("DeveloperCertificates")
            .and_then(plist::Value::as_array)
            .map(|blobs| {
                blobs
                    .iter()
                    .map(|blob| match blob.as_data() {
                        Some(der) => DeveloperCertificate::from_der(der),
                        None => Err(ProfileError::CertificateDecode(
                            "certificate entry is not a data blob".to_string(),
                        )),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Typed view over the entitlements sub-dictionary
    pub fn entitlements(&self) -> Entitlements<'_> {
        Entitlements::new(
            self.plist
                .get("Entitlements")
                .and_then(plist::Value::as_dictionary),
        )
    }

    /// The full underlying dictionary, including the raw DER profile blob
    pub fn as_dictionary(&self) -> &plist::Dictionary {
        &self.plist
    }

    /// A copy of the dictionary suitable for display or JSON serialization,
    /// with the raw DER profile blob removed
    pub fn display_dictionary(&self) -> plist::Dictionary {
        let mut dict = self.plist.clone();
        dict.remove(DER_ENCODED_PROFILE_KEY);
        dict
    }

    fn string(&self, key: &str) -> &str {
        self.plist
            .get(key)
            .and_then(plist::Value::as_string)
            .unwrap_or("")
    }

    fn date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.plist
            .get(key)
            .and_then(plist::Value::as_date)
            .map(|d| DateTime::<Utc>::from(SystemTime::from(d)))
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.plist
            .get(key)
            .and_then(plist::Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_string().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Decoded summary of one embedded developer certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperCertificate {
    /// Subject common name
    pub subject: String,
    /// Issuer common name
    pub issuer: String,
    /// Serial number, hex-encoded
    pub serial: String,
    /// End of the certificate validity period
    pub not_after: DateTime<Utc>,
}

impl DeveloperCertificate {
    /// Decode a single DER certificate blob
    pub fn from_der(der: &[u8]) -> Result<Self, ProfileError> {
        let cert = CapturedX509Certificate::from_der(der)
            .map_err(|e| ProfileError::CertificateDecode(e.to_string()))?;

        Ok(DeveloperCertificate {
            subject: cert.subject_common_name().unwrap_or_default(),
            issuer: cert.issuer_common_name().unwrap_or_default(),
            serial: hex::encode(cert.serial_number_asn1().as_slice()),
            not_after: cert.validity_not_after(),
        })
    }
}
