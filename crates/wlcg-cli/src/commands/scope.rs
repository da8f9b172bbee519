//! Single-token commands

use super::print_json;
use anyhow::{Context, Result};
use tracing::info;
use wlcg_authorization::{authorize, is_recognized_scope, parse_scope};
use wlcg_core::{FsPath, ProfileConfig};

/// Print whether `token` is a recognised scope; fails for unrecognised tokens
pub fn check(token: &str) -> Result<()> {
    if is_recognized_scope(token) {
        println!("recognised: {token}");
        Ok(())
    } else {
        anyhow::bail!("not a recognised WLCG scope: {token}")
    }
}

/// Parse `token` and print its authorisation, `null` for compute scopes
pub fn parse(token: &str, root: Option<&str>, config: &ProfileConfig) -> Result<()> {
    let root = match root {
        Some(root) => FsPath::new(root).context("Invalid --root")?,
        None => config.authorization_root.clone(),
    };

    let scope = parse_scope(token)?;
    info!(scope = %scope, root = %root, "Resolving scope");
    print_json(&authorize(&scope, &root))
}
