//! Profile discovery and scanning module
//!
//! Responsible for:
//! - Resolving a bare UUID identifier to a file in the configured directories
//! - Enumerating profile files across one or more directories
//! - Decoding each file and applying the compiled filter predicate
//! - Collecting per-file decode failures without aborting the scan

use glob::glob;
use std::path::{Path, PathBuf};

use crate::filter::ProfilePredicate;
use crate::models::ProfileError;
use crate::profile::ProvisioningProfile;

/// File extensions used for provisioning profiles
pub const PROFILE_EXTENSIONS: &[&str] = &["mobileprovision", "provisionprofile"];

/// The default directories where provisioning profiles are stored, in search
/// order. Callers can override this list entirely; it is configuration, not
/// hardwired behavior.
pub fn default_profile_dirs() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    vec![
        // Pre-Xcode 16 location
        home.join("Library/MobileDevice/Provisioning Profiles"),
        // Xcode 16 and later
        home.join("Library/Developer/Xcode/UserData/Provisioning Profiles"),
    ]
}

/// Whether the argument looks like a profile UUID rather than a file path
fn is_identifier(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

/// Resolve a profile argument to a file path.
///
/// An argument of the form of a UUID is searched as `<uuid>.<ext>` across the
/// given directories; anything else is taken as a literal path.
pub fn resolve(identifier: &str, dirs: &[PathBuf]) -> Result<PathBuf, ProfileError> {
    if !is_identifier(identifier) {
        return Ok(PathBuf::from(identifier));
    }

    for dir in dirs {
        for ext in PROFILE_EXTENSIONS {
            let candidate = dir.join(format!("{identifier}.{ext}"));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(ProfileError::NotFound(identifier.to_string()))
}

/// Enumerate the profile files directly inside `dir`
pub fn list_profile_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for ext in PROFILE_EXTENSIONS {
        let pattern = dir.join(format!("*.{ext}"));
        if let Ok(paths) = glob(&pattern.to_string_lossy()) {
            files.extend(paths.flatten());
        }
    }
    files
}

/// Lazily decode and filter the profiles found in `dirs`.
///
/// Yields one item per file: a profile that decoded and matched the
/// predicate, or the `(path, error)` pair for a file that failed to decode.
/// A corrupt file never stops the scan of the remaining files. Profiles that
/// decode but do not match the predicate are skipped silently.
pub fn scan_profiles<'a>(
    dirs: &'a [PathBuf],
    predicate: &'a ProfilePredicate,
) -> impl Iterator<Item = Result<ProvisioningProfile, (PathBuf, ProfileError)>> + 'a {
    dirs.iter()
        .flat_map(|dir| list_profile_files(dir))
        .filter_map(move |path| match ProvisioningProfile::from_file(&path) {
            Ok(profile) => predicate.matches(&profile).then(|| Ok(profile)),
            Err(err) => Some(Err((path, err))),
        })
}
