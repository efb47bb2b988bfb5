//! Bearer token lookup for the REST client.
//!
//! Resolution order:
//! 1. `dialogflow.access_token` from config
//! 2. the environment variable named by `dialogflow.access_token_env`
//! 3. `gcloud auth application-default print-access-token`, when
//!    `dialogflow.use_gcloud` is set

use std::process::Command;

use mania_config::DialogflowConfig;
use tracing::debug;

pub fn resolve_access_token(cfg: &DialogflowConfig) -> Option<String> {
    if let Some(t) = non_empty(cfg.access_token.as_deref()) {
        debug!("using access token from config");
        return Some(t);
    }
    if let Some(t) = non_empty(std::env::var(&cfg.access_token_env).ok().as_deref()) {
        debug!(env = %cfg.access_token_env, "using access token from environment");
        return Some(t);
    }
    if cfg.use_gcloud {
        return gcloud_access_token();
    }
    None
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

fn gcloud_access_token() -> Option<String> {
    let output = Command::new("gcloud")
        .args(["auth", "application-default", "print-access-token"])
        .output();
    match output {
        Ok(out) if out.status.success() => {
            debug!("using access token from gcloud application-default credentials");
            let stdout = String::from_utf8_lossy(&out.stdout);
            non_empty(Some(stdout.as_ref()))
        }
        Ok(out) => {
            debug!(
                status = %out.status,
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "gcloud could not print an access token"
            );
            None
        }
        Err(e) => {
            debug!(error = %e, "gcloud not available");
            None
        }
    }
}
