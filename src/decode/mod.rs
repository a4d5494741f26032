//! Signed container decoding module
//!
//! Handles:
//! - Unwrapping the CMS/PKCS7 envelope of a provisioning profile
//! - Fallback to the `security` command-line tool when the CMS parser fails
//! - Parsing the extracted payload as a property list dictionary
//!
//! The two decode paths form an explicit policy: the in-process CMS parser is
//! attempted first, and the subprocess fallback runs exactly once after any
//! parse/verify error or empty payload. The fallback exists because CMS
//! tooling is inconsistently available across host platforms.

use cryptographic_message_syntax::SignedData;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::models::ProfileError;

/// Decode the signed container at `path` and return the raw plist payload bytes.
///
/// Signature well-formedness is checked against the certificates embedded in
/// the envelope. Trust-chain validation is intentionally not performed: the
/// tool inspects profiles regardless of their trust status.
pub fn decode_container(path: &Path) -> Result<Vec<u8>, ProfileError> {
    let data = fs::read(path).map_err(|e| ProfileError::DecodeFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match extract_cms_payload(&data) {
        Ok(payload) => Ok(payload),
        Err(reason) => {
            // Single fallback attempt, never retried
            extract_with_security(path).ok_or(ProfileError::DecodeFailure {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}

/// Primary decode path: parse the bytes as a CMS SignedData envelope and
/// extract the attached payload.
fn extract_cms_payload(data: &[u8]) -> Result<Vec<u8>, String> {
    let signed_data = SignedData::parse_ber(data).map_err(|e| e.to_string())?;

    for signer in signed_data.signers() {
        signer
            .verify_signature_with_signed_data(&signed_data)
            .map_err(|e| format!("signature verification failed: {e}"))?;
    }

    let payload = signed_data
        .signed_content()
        .ok_or_else(|| "no signed content in envelope".to_string())?;
    if payload.is_empty() {
        return Err("empty signed content".to_string());
    }

    Ok(payload.to_vec())
}

/// Fallback decode path: have the `security` tool unwrap the envelope and
/// capture its standard output as the payload.
fn extract_with_security(path: &Path) -> Option<Vec<u8>> {
    let output = Command::new("security")
        .args(["cms", "-D", "-i"])
        .arg(path)
        .output()
        .ok()?;

    if !output.status.success() || output.stdout.is_empty() {
        return None;
    }

    Some(output.stdout)
}

/// Parse payload bytes (XML or binary plist) into the top-level dictionary.
///
/// All keys are preserved losslessly, including ones the typed accessors
/// never look at, so the full profile can be re-serialized for display.
pub fn parse_payload(path: &Path, payload: &[u8]) -> Result<plist::Dictionary, ProfileError> {
    let value: plist::Value =
        plist::from_bytes(payload).map_err(|_| ProfileError::MalformedPayload {
            path: path.to_path_buf(),
        })?;

    value
        .into_dictionary()
        .ok_or_else(|| ProfileError::MalformedPayload {
            path: path.to_path_buf(),
        })
}
