//! Whole-claim processing

use super::print_json;
use anyhow::Result;
use wlcg_authorization::WlcgProfile;
use wlcg_core::ProfileConfig;

/// Process `claim` with `config` and print the sorted outcome
pub fn run(claim: &str, config: ProfileConfig) -> Result<()> {
    let outcome = WlcgProfile::new(config).process_claim(claim)?;
    if outcome.authorisations.is_empty() {
        tracing::info!("Claim grants no filesystem access");
    }
    print_json(&outcome)
}
