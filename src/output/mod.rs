//! Output formatting module
//!
//! Handles:
//! - ASCII table rendering for list mode
//! - Plain UUID/path listings suitable for piping to xargs
//! - Human-readable single-profile info
//! - JSON output for both modes
//!
//! Everything here consumes the typed profile model; no decoding happens in
//! this layer.

use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::models::{ListOutput, OutputMode, ProfileError, ProfileSummary, ScanFailure, ScanSummary};
use crate::profile::ProvisioningProfile;

/// Outcome stream produced by the scanner
pub type ScanOutcome = Result<ProvisioningProfile, (PathBuf, ProfileError)>;

/// A small helper to print fixed-width ASCII tables
pub struct AsciiTable {
    widths: Vec<usize>,
}

impl AsciiTable {
    pub fn new(widths: &[usize]) -> Self {
        AsciiTable {
            widths: widths.to_vec(),
        }
    }

    /// Render one row, clipping or padding each column to its width
    pub fn row(&self, cols: &[&str]) -> String {
        let cells: Vec<String> = self
            .widths
            .iter()
            .enumerate()
            .map(|(i, &width)| {
                let content = cols.get(i).copied().unwrap_or("");
                let clipped: String = content.chars().take(width).collect();
                format!("{clipped:<width$}")
            })
            .collect();
        format!("| {} |", cells.join(" | "))
    }

    /// Render a separator line
    pub fn separator(&self) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", segments.join("+"))
    }
}

/// Print one per-file decode failure
pub fn print_error<W: Write>(out: &mut W, path: &Path, error: &ProfileError) -> io::Result<()> {
    writeln!(out, "\u{274c}  {} - {}", path.display(), error)
}

/// Print the filtered profile list as an ASCII table, followed by the count
/// of listed profiles and any per-file decode failures.
pub fn print_table<W: Write>(
    out: &mut W,
    outcomes: impl Iterator<Item = ScanOutcome>,
) -> io::Result<()> {
    let table = AsciiTable::new(&[36, 60, 45, 25, 2, 10]);
    writeln!(out, "{}", table.separator())?;
    writeln!(
        out,
        "{}",
        table.row(&["UUID", "Name", "AppID", "Expiration Date", " ", "Team Name"])
    )?;
    writeln!(out, "{}", table.separator())?;

    let mut count = 0;
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(profile) => {
                let expiration = profile.expiration_date();
                // 2705=checkmark, 274C=red X
                let state = match expiration {
                    Some(date) if Utc::now() < date => "\u{2705}",
                    _ => "\u{274c}",
                };
                let expiration_text = expiration.map(format_date).unwrap_or_default();
                writeln!(
                    out,
                    "{}",
                    table.row(&[
                        profile.uuid(),
                        profile.name(),
                        profile.entitlements().app_id().unwrap_or(""),
                        &expiration_text,
                        state,
                        profile.team_name(),
                    ])
                )?;
                count += 1;
            }
            Err(failure) => errors.push(failure),
        }
    }

    writeln!(out, "{}", table.separator())?;
    writeln!(out, "{count} Provisioning Profiles found.")?;

    for (path, error) in &errors {
        print_error(out, path, error)?;
    }
    Ok(())
}

/// Print the filtered list as bare UUIDs or paths, one entry per line (or
/// NUL-terminated with `zero`), then any per-file decode failures.
pub fn print_list<W: Write>(
    out: &mut W,
    outcomes: impl Iterator<Item = ScanOutcome>,
    mode: OutputMode,
    zero: bool,
) -> io::Result<()> {
    let terminator = if zero { "\0" } else { "\n" };
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(profile) => {
                let entry = match mode {
                    OutputMode::PathList => profile.path().display().to_string(),
                    _ => profile.uuid().to_string(),
                };
                write!(out, "{entry}{terminator}")?;
            }
            Err(failure) => errors.push(failure),
        }
    }
    for (path, error) in &errors {
        print_error(out, path, error)?;
    }
    Ok(())
}

/// Print the human-readable description of one profile
pub fn print_info<W: Write>(
    out: &mut W,
    profile: &ProvisioningProfile,
    show_certs: bool,
    show_devices: bool,
) -> io::Result<()> {
    writeln!(out, "- name: {}", profile.name())?;
    writeln!(out, "- uuid: {}", profile.uuid())?;
    writeln!(out, "- app_id_name: {}", profile.app_id_name())?;
    writeln!(out, "- app_id_prefix: {}", profile.app_id_prefix())?;
    writeln!(
        out,
        "- creation_date: {}",
        profile.creation_date().map(format_date).unwrap_or_default()
    )?;
    writeln!(
        out,
        "- expiration_date: {}",
        profile.expiration_date().map(format_date).unwrap_or_default()
    )?;
    writeln!(out, "- ttl: {}", profile.time_to_live_days())?;
    writeln!(out, "- team_ids: [{}]", profile.team_ids().join(", "))?;
    writeln!(out, "- team_name: {}", profile.team_name())?;
    writeln!(out, "- Entitlements:")?;
    for line in profile.entitlements().to_string().lines() {
        writeln!(out, "   {line}")?;
    }

    let certificates = profile.developer_certificates();
    writeln!(out, "- {} Developer Certificates", certificates.len())?;
    if show_certs {
        for certificate in &certificates {
            match certificate {
                Ok(cert) => {
                    writeln!(out, "   - {}", cert.subject)?;
                    writeln!(out, "     issuer: {}", cert.issuer)?;
                    writeln!(out, "     serial: {}", cert.serial)?;
                    writeln!(out, "     expires: {}", format_date(cert.not_after))?;
                }
                Err(error) => writeln!(out, "   - \u{274c} {error}")?,
            }
        }
    }

    let devices = profile.provisioned_devices();
    writeln!(out, "- {} Provisioned Devices", devices.len())?;
    if show_devices {
        for udid in &devices {
            writeln!(out, "   - {udid}")?;
        }
    }
    writeln!(
        out,
        "- Provision all devices: {}",
        profile.provisions_all_devices()
    )?;
    Ok(())
}

/// Print one profile as a JSON document (full dictionary, minus the raw DER
/// profile blob)
pub fn print_info_json<W: Write>(out: &mut W, profile: &ProvisioningProfile) -> anyhow::Result<()> {
    let value = plist_to_json(&plist::Value::Dictionary(profile.display_dictionary()));
    serde_json::to_writer_pretty(&mut *out, &value)?;
    writeln!(out)?;
    Ok(())
}

/// Print the filtered list as a JSON document with per-profile summaries,
/// decode failures and aggregate statistics
pub fn print_list_json<W: Write>(
    out: &mut W,
    outcomes: impl Iterator<Item = ScanOutcome>,
    scanned: usize,
) -> anyhow::Result<()> {
    let mut profiles = Vec::new();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(profile) => profiles.push(ProfileSummary {
                uuid: profile.uuid().to_string(),
                name: profile.name().to_string(),
                app_id: profile.entitlements().app_id().unwrap_or("").to_string(),
                expiration_date: profile.expiration_date().map(|d| d.to_rfc3339()),
                team_name: profile.team_name().to_string(),
                path: profile.path().display().to_string(),
            }),
            Err((path, error)) => errors.push(ScanFailure {
                path: path.display().to_string(),
                error: error.to_string(),
            }),
        }
    }

    let document = ListOutput {
        summary: ScanSummary {
            scanned,
            matched: profiles.len(),
            failed: errors.len(),
        },
        profiles,
        errors,
    };
    serde_json::to_writer_pretty(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339()
}

/// Convert a plist value into a JSON-compatible value for serialization
pub fn plist_to_json(value: &plist::Value) -> serde_json::Value {
    match value {
        plist::Value::String(s) => serde_json::Value::String(s.clone()),
        plist::Value::Boolean(b) => serde_json::Value::Bool(*b),
        plist::Value::Integer(i) => match i.as_signed() {
            Some(n) => serde_json::Value::Number(n.into()),
            // Does not fit in i64, keep as string
            None => serde_json::Value::String(i.to_string()),
        },
        plist::Value::Real(r) => serde_json::Number::from_f64(*r)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        plist::Value::Date(d) => serde_json::Value::String(d.to_xml_format()),
        plist::Value::Data(d) => serde_json::Value::String(format!("0x{}", hex::encode(d))),
        plist::Value::Array(values) => {
            serde_json::Value::Array(values.iter().map(plist_to_json).collect())
        }
        plist::Value::Dictionary(dict) => serde_json::Value::Object(
            dict.iter()
                .map(|(key, value)| (key.clone(), plist_to_json(value)))
                .collect(),
        ),
        _ => serde_json::Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_table_clips_and_pads() {
        let table = AsciiTable::new(&[4, 6]);
        assert_eq!(table.separator(), "+------+--------+");
        assert_eq!(table.row(&["toolong", "ab"]), "| tool | ab     |");
        assert_eq!(table.row(&["x"]), "| x    |        |");
    }

    #[test]
    fn test_plist_to_json_round_trips_scalars() {
        let mut dict = plist::Dictionary::new();
        dict.insert("name".into(), plist::Value::String("Example".into()));
        dict.insert("count".into(), plist::Value::Integer(3i64.into()));
        dict.insert("enabled".into(), plist::Value::Boolean(true));
        dict.insert("blob".into(), plist::Value::Data(vec![0xab, 0xcd]));

        let json = plist_to_json(&plist::Value::Dictionary(dict));
        assert_eq!(json["name"], "Example");
        assert_eq!(json["count"], 3);
        assert_eq!(json["enabled"], true);
        assert_eq!(json["blob"], "0xabcd");
    }

    #[test]
    fn test_print_info_renders_dashed_list() {
        let mut dict = plist::Dictionary::new();
        dict.insert("Name".into(), plist::Value::String("Example".into()));
        dict.insert(
            "UUID".into(),
            plist::Value::String("12345678-ABCD-EF90-1234-567890ABCDEF".into()),
        );
        let profile =
            ProvisioningProfile::from_dictionary(PathBuf::from("x.mobileprovision"), dict);

        let mut buffer = Vec::new();
        print_info(&mut buffer, &profile, false, false).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("- name: Example"));
        assert!(text.contains("- uuid: 12345678-ABCD-EF90-1234-567890ABCDEF"));
        assert!(text.contains("- 0 Developer Certificates"));
        assert!(text.contains("- Provision all devices: false"));
    }
}
