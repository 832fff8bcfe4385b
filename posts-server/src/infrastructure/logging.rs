use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

// sqlx logs every statement at info; keep it down unless asked for explicitly.
const QUIET_TARGETS: &[&str] = &["sqlx=warn"];

pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new(default_directives("info")));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    let level = level.trim();
    let mut directives = vec![if level.is_empty() { "info" } else { level }];
    directives.extend(
        QUIET_TARGETS
            .iter()
            .filter(|target| !level.contains(target.split('=').next().unwrap_or_default())),
    );
    directives.join(",")
}
