//! Profile filtering module
//!
//! Compiles a `FilterCriteria` into a reusable predicate. All regular
//! expressions are compiled once here, then the predicate is evaluated
//! against every profile in a scan. The predicate is the logical AND of all
//! set criteria; an empty criteria set matches everything.

use chrono::Utc;
use regex::Regex;

use crate::models::{ApsEnvFilter, FilterCriteria};
use crate::profile::ProvisioningProfile;

/// Compiled push-environment criterion
#[derive(Debug)]
enum ApsEnvPredicate {
    Present,
    Matching(Regex),
}

/// A compiled, reusable profile predicate
#[derive(Debug)]
pub struct ProfilePredicate {
    name: Option<Regex>,
    appid_name: Option<Regex>,
    appid: Option<Regex>,
    uuid: Option<Regex>,
    team: Option<Regex>,
    expired: Option<bool>,
    has_devices: Option<bool>,
    all_devices: Option<bool>,
    aps_env: Option<ApsEnvPredicate>,
    platform: Option<String>,
}

impl ProfilePredicate {
    /// Compile the criteria, validating every pattern up front
    pub fn compile(criteria: &FilterCriteria) -> Result<Self, regex::Error> {
        let aps_env = match &criteria.aps_env {
            None => None,
            Some(ApsEnvFilter::Present) => Some(ApsEnvPredicate::Present),
            Some(ApsEnvFilter::Matching(pattern)) => {
                Some(ApsEnvPredicate::Matching(Regex::new(pattern)?))
            }
        };

        Ok(ProfilePredicate {
            name: compile_pattern(&criteria.name)?,
            appid_name: compile_pattern(&criteria.appid_name)?,
            appid: compile_pattern(&criteria.appid)?,
            uuid: compile_pattern(&criteria.uuid)?,
            team: compile_pattern(&criteria.team)?,
            expired: criteria.expired,
            has_devices: criteria.has_devices,
            all_devices: criteria.all_devices,
            aps_env,
            platform: criteria.platform.clone(),
        })
    }

    /// Evaluate the predicate against one profile
    pub fn matches(&self, profile: &ProvisioningProfile) -> bool {
        if let Some(re) = &self.name {
            if !re.is_match(profile.name()) {
                return false;
            }
        }
        if let Some(re) = &self.appid_name {
            if !re.is_match(profile.app_id_name()) {
                return false;
            }
        }
        if let Some(re) = &self.appid {
            if !re.is_match(profile.entitlements().app_id().unwrap_or("")) {
                return false;
            }
        }
        if let Some(re) = &self.uuid {
            if !re.is_match(profile.uuid()) {
                return false;
            }
        }
        if let Some(re) = &self.team {
            // The pattern may name the team either way
            let ids = profile.team_ids();
            if !re.is_match(profile.team_name()) && !ids.iter().any(|id| re.is_match(id)) {
                return false;
            }
        }
        if let Some(want_expired) = self.expired {
            // A profile without an expiration date never matches this criterion
            match profile.expiration_date() {
                Some(date) => {
                    if (date < Utc::now()) != want_expired {
                        return false;
                    }
                }
                None => return false,
            }
        }
        if let Some(want_devices) = self.has_devices {
            if !profile.provisioned_devices().is_empty() != want_devices {
                return false;
            }
        }
        if let Some(want_all) = self.all_devices {
            if profile.provisions_all_devices() != want_all {
                return false;
            }
        }
        if let Some(aps) = &self.aps_env {
            if !match_aps_env(profile.entitlements().aps_environment(), aps) {
                return false;
            }
        }
        if let Some(platform) = &self.platform {
            if !profile.platforms().iter().any(|p| p == platform) {
                return false;
            }
        }
        true
    }
}

fn compile_pattern(pattern: &Option<String>) -> Result<Option<Regex>, regex::Error> {
    pattern.as_deref().map(Regex::new).transpose()
}

/// Three-valued push-environment matching: a profile without any push
/// entitlement never matches, `Present` matches any environment, and a
/// pattern matches the specific environment string.
fn match_aps_env(actual: Option<&str>, filter: &ApsEnvPredicate) -> bool {
    match (actual, filter) {
        (None, _) => false,
        (Some(_), ApsEnvPredicate::Present) => true,
        (Some(env), ApsEnvPredicate::Matching(re)) => re.is_match(env),
    }
}
