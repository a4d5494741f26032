#![forbid(unsafe_code)]

use anyhow::Result;

use listprov::filter::ProfilePredicate;
use listprov::models::OutputMode;
use listprov::profile::ProvisioningProfile;
use listprov::{cli, output, scan};

fn main() -> Result<()> {
    let config = cli::parse_args()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &config.profile {
        // A single explicitly requested profile fails hard on any error
        Some(identifier) => {
            let path = scan::resolve(identifier, &config.dirs)?;
            let profile = ProvisioningProfile::from_file(&path)?;
            if config.mode == OutputMode::Json {
                output::print_info_json(&mut out, &profile)?;
            } else {
                output::print_info(&mut out, &profile, config.show_certs, config.show_devices)?;
            }
        }
        // List mode: scan all configured directories, tolerate per-file failures
        None => {
            let predicate = ProfilePredicate::compile(&config.filters)?;
            let outcomes = scan::scan_profiles(&config.dirs, &predicate);
            match config.mode {
                OutputMode::Table => output::print_table(&mut out, outcomes)?,
                OutputMode::UuidList | OutputMode::PathList => {
                    output::print_list(&mut out, outcomes, config.mode, config.zero)?
                }
                OutputMode::Json => {
                    let scanned: usize = config
                        .dirs
                        .iter()
                        .map(|dir| scan::list_profile_files(dir).len())
                        .sum();
                    output::print_list_json(&mut out, outcomes, scanned)?
                }
            }
        }
    }

    Ok(())
}
