//! Entitlements view module
//!
//! Read-only typed accessors over the `Entitlements` sub-dictionary of a
//! provisioning profile. Keys are case-sensitive dotted identifiers and none
//! of them is guaranteed present, so every accessor can report absence.

use std::fmt;

/// Read-only view over the entitlements dictionary of a profile.
///
/// Constructed with `None` when the profile carries no entitlements at all;
/// every lookup then reports absence.
#[derive(Debug, Clone, Copy)]
pub struct Entitlements<'a> {
    dict: Option<&'a plist::Dictionary>,
}

impl<'a> Entitlements<'a> {
    pub fn new(dict: Option<&'a plist::Dictionary>) -> Self {
        Entitlements { dict }
    }

    /// The full application identifier, including the team prefix
    pub fn app_id(&self) -> Option<&'a str> {
        self.string("application-identifier")
    }

    /// The team identifier
    pub fn team_id(&self) -> Option<&'a str> {
        self.string("com.apple.developer.team-identifier")
    }

    /// The Apple Push Service environment, typically "development" or
    /// "production". `None` means push notifications are not enabled, which
    /// is distinct from a present-but-empty value for filtering purposes.
    pub fn aps_environment(&self) -> Option<&'a str> {
        self.string("aps-environment")
    }

    /// The keychain access groups
    pub fn keychain_access_groups(&self) -> Vec<String> {
        self.string_list("keychain-access-groups")
    }

    /// The registered application groups
    pub fn app_groups(&self) -> Vec<String> {
        self.string_list("com.apple.security.application-groups")
    }

    /// Whether a debugger can be attached to the executable
    pub fn get_task_allow(&self) -> bool {
        self.flag("get-task-allow")
    }

    /// Whether Beta (TestFlight) reports are active
    pub fn beta_reports_active(&self) -> bool {
        self.flag("beta-reports-active")
    }

    /// Whether the HealthKit entitlement is set
    pub fn healthkit(&self) -> bool {
        self.flag("com.apple.developer.healthkit")
    }

    /// The ubiquity container identifiers, if at least one is enabled
    pub fn ubiquity_container_identifiers(&self) -> Vec<String> {
        self.string_list("com.apple.developer.ubiquity-container-identifiers")
    }

    /// The ubiquity key-value store identifier, if enabled
    pub fn ubiquity_kvstore_identifier(&self) -> Option<&'a str> {
        self.string("com.apple.developer.ubiquity-kvstore-identifier")
    }

    /// Generic access to any entitlement value by key
    pub fn get(&self, key: &str) -> Option<&'a plist::Value> {
        self.dict.and_then(|d| d.get(key))
    }

    /// Check if a given entitlement key is present
    pub fn has_key(&self, key: &str) -> bool {
        self.dict.map(|d| d.contains_key(key)).unwrap_or(false)
    }

    /// All entitlement keys, in the order they appear in the profile
    pub fn keys(&self) -> Vec<&'a str> {
        self.dict
            .map(|d| d.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn string(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(plist::Value::as_string)
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key)
            .and_then(plist::Value::as_boolean)
            .unwrap_or(false)
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.get(key)
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

/// Pretty-printed dashed list of all entitlement keys and values, one
/// `- key: value` line per entry in the order they appear in the profile.
impl fmt::Display for Entitlements<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(dict) = self.dict else {
            return Ok(());
        };
        let mut first = true;
        for (key, value) in dict.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "- {}: {}", key, render_value(value))?;
        }
        Ok(())
    }
}

/// Plain single-line rendering of a plist value for human output
fn render_value(value: &plist::Value) -> String {
    match value {
        plist::Value::String(s) => s.clone(),
        plist::Value::Boolean(b) => b.to_string(),
        plist::Value::Integer(i) => i.to_string(),
        plist::Value::Real(r) => r.to_string(),
        plist::Value::Date(d) => d.to_xml_format(),
        plist::Value::Data(d) => format!("<{} bytes>", d.len()),
        plist::Value::Array(values) => {
            let items: Vec<String> = values.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        plist::Value::Dictionary(dict) => {
            let items: Vec<String> = dict
                .iter()
                .map(|(k, v)| format!("{}: {}", k, render_value(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
        other => format!("{other:?}"),
    }
}
