//! Post-deploy notification to New Relic
//!
//! Runs after a successful deploy when the environment opts in with a
//! `newrelic` key. Failures here are surfaced but deliberately get no
//! special handling; the deploy itself already happened.

use reqwest::blocking::Client;
use tracing::debug;

use crate::{config::Config, describe, error::Result, git};

const DEPLOYMENTS_URL: &str = "https://rpm.newrelic.com/deployments.xml";

/// Record the deploy with New Relic if the environment is configured for it
pub fn notify(
    client: &Client,
    config: &Config,
    environment: &str,
    environment_commit: &str,
    local_commit: &str,
) -> Result<()> {
    if config.get(environment, "newrelic").is_none() {
        debug!(environment, "no newrelic key, skipping deploy hook");
        return Ok(());
    }

    println!("Running New Relic deploy hook...");

    let changelog = git::changelog(environment_commit, local_commit)?;
    let description = describe::generate_desc(environment_commit, local_commit, &changelog);

    // The newest commit in the range, as far as the changelog knows
    let revision = changelog
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .unwrap_or(local_commit);

    let user = config.username()?;
    let form = [
        ("deployment[app_name]", config.require("newrelic", "app_name")?),
        (
            "deployment[application_id]",
            config.require("newrelic", "application_id")?,
        ),
        ("deployment[description]", description.as_str()),
        ("deployment[revision]", revision),
        ("deployment[changelog]", changelog.as_str()),
        ("deployment[user]", user.as_str()),
    ];

    let response = client
        .post(DEPLOYMENTS_URL)
        .header("x-api-key", config.require("newrelic", "api_key")?)
        .form(&form)
        .send()?;

    println!("{} {}", response.status().as_u16(), response.text()?);
    println!("done");

    Ok(())
}
