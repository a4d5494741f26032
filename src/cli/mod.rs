//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Single-profile inspection by path or UUID
//! - Filter options for list mode
//! - Output format selection (table/list/JSON)
//! - Search directory overrides

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::models::{ApsEnvFilter, Config, FilterCriteria, OutputMode};
use crate::scan;

/// Build the clap command definition
fn build_command() -> Command {
    Command::new("listprov")
        .version(env!("LISTPROV_VERSION"))
        .long_version(concat!(env!("LISTPROV_VERSION"), " (", env!("GIT_HASH"), ")"))
        .about("Inspect, filter and list Apple provisioning profiles")
        .long_about(
            "A command-line tool to list the provisioning profiles installed on this machine \
             and inspect the content of individual profiles, including entitlements, developer \
             certificates and provisioned devices.",
        )
        .arg(
            Arg::new("profile")
                .value_name("PATH|UUID")
                .help("Inspect a single profile, by file path or by UUID"),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .value_name("DIR")
                .help("Directory to search for profiles (repeatable, overrides the defaults)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("PATTERN")
                .help("Filter by profile name"),
        )
        .arg(
            Arg::new("appid-name")
                .long("appid-name")
                .value_name("PATTERN")
                .help("Filter by App ID name"),
        )
        .arg(
            Arg::new("appid")
                .long("appid")
                .value_name("PATTERN")
                .help("Filter by application identifier"),
        )
        .arg(
            Arg::new("uuid")
                .long("uuid")
                .value_name("PATTERN")
                .help("Filter by UUID"),
        )
        .arg(
            Arg::new("team")
                .long("team")
                .value_name("PATTERN")
                .help("Filter by team name or team identifier"),
        )
        .arg(
            Arg::new("platform")
                .long("platform")
                .value_name("PLATFORM")
                .help("Filter by platform (e.g. iOS)"),
        )
        .arg(
            Arg::new("expired")
                .short('e')
                .long("expired")
                .help("Only list expired profiles")
                .conflicts_with("valid")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("valid")
                .long("valid")
                .help("Only list still-valid profiles")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("has-devices")
                .long("has-devices")
                .help("Only list profiles with provisioned devices")
                .conflicts_with("no-devices")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-devices")
                .long("no-devices")
                .help("Only list profiles without provisioned devices")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("all-devices")
                .long("all-devices")
                .help("Only list profiles provisioning all devices")
                .conflicts_with("not-all-devices")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("not-all-devices")
                .long("not-all-devices")
                .help("Only list profiles restricted to a device list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("aps-env")
                .long("aps-env")
                .value_name("ENV")
                .help("Only list profiles with push enabled, optionally matching ENV")
                .num_args(0..=1)
                .default_missing_value(""),
        )
        .arg(
            Arg::new("json")
                .short('j')
                .long("json")
                .help("Output in JSON format")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("uuids")
                .short('l')
                .long("uuids")
                .help("Print only the profile UUIDs, suitable for piping")
                .conflicts_with_all(["paths", "json"])
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("paths")
                .short('p')
                .long("paths")
                .help("Print only the profile file paths, suitable for piping")
                .conflicts_with("json")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print0")
                .short('0')
                .long("print0")
                .help("Terminate list entries with NUL instead of newline")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("certs")
                .long("certs")
                .help("Print developer certificate details for a single profile")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("devices")
                .long("devices")
                .help("Print provisioned device UDIDs for a single profile")
                .action(ArgAction::SetTrue),
        )
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<Config> {
    let matches = build_command().get_matches();

    let dirs = match matches.get_many::<String>("dir") {
        Some(values) => values.map(PathBuf::from).collect(),
        None => scan::default_profile_dirs(),
    };

    let expired = if matches.get_flag("expired") {
        Some(true)
    } else if matches.get_flag("valid") {
        Some(false)
    } else {
        None
    };
    let has_devices = if matches.get_flag("has-devices") {
        Some(true)
    } else if matches.get_flag("no-devices") {
        Some(false)
    } else {
        None
    };
    let all_devices = if matches.get_flag("all-devices") {
        Some(true)
    } else if matches.get_flag("not-all-devices") {
        Some(false)
    } else {
        None
    };
    // Bare --aps-env means "push enabled, any environment"
    let aps_env = matches.get_one::<String>("aps-env").map(|value| {
        if value.is_empty() {
            ApsEnvFilter::Present
        } else {
            ApsEnvFilter::Matching(value.clone())
        }
    });

    let filters = FilterCriteria {
        name: matches.get_one::<String>("name").cloned(),
        appid_name: matches.get_one::<String>("appid-name").cloned(),
        appid: matches.get_one::<String>("appid").cloned(),
        uuid: matches.get_one::<String>("uuid").cloned(),
        team: matches.get_one::<String>("team").cloned(),
        expired,
        has_devices,
        all_devices,
        aps_env,
        platform: matches.get_one::<String>("platform").cloned(),
    };

    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("uuids") {
        OutputMode::UuidList
    } else if matches.get_flag("paths") {
        OutputMode::PathList
    } else {
        OutputMode::Table
    };

    Ok(Config {
        profile: matches.get_one::<String>("profile").cloned(),
        dirs,
        filters,
        mode,
        zero: matches.get_flag("print0"),
        show_certs: matches.get_flag("certs"),
        show_devices: matches.get_flag("devices"),
    })
}
