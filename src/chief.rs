//! The two HTTP conversations with the outside world: asking an environment
//! what it currently runs, and telling Chief to push something new.

use reqwest::blocking::Client;
use serde::Serialize;
use std::{
    io::{self, Read, Write},
    time::{Duration, Instant},
};
use tracing::debug;
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// The form Chief expects with a deploy request
#[derive(Debug, Serialize)]
pub struct DeployPayload<'d> {
    pub who: &'d str,
    pub password: &'d str,
    #[serde(rename = "ref")]
    pub reference: &'d str,
}

/// Parse a configured URL, assuming plain HTTP when no scheme was given
pub fn ensure_scheme(raw: &str) -> Result<Url> {
    let prefixed;
    let full = if raw.starts_with("http") {
        raw
    } else {
        prefixed = format!("http://{}", raw);
        &prefixed
    };

    Url::parse(full).map_err(|source| Error::InvalidUrl {
        url: raw.into(),
        source,
    })
}

/// Ask the environment's revision URL which commit it currently runs
///
/// Failures here are not dressed up: if the revision URL cannot be reached
/// the run dies with the transport error.
pub fn current_revision(client: &Client, config: &Config, environment: &str) -> Result<String> {
    let url = ensure_scheme(config.require(environment, "revision_url")?)?;
    debug!(%url, "fetching currently deployed revision");

    let body = client.get(url).send()?.error_for_status()?.text()?;
    Ok(body.trim().into())
}

/// Trigger the deploy and stream Chief's progress log to the console
///
/// The response body arrives over minutes, so chunks are written and flushed
/// as they come in rather than buffered to completion. Returns the wall-clock
/// time from just before the request until the stream ended.
pub fn deploy(client: &Client, url: &Url, payload: &DeployPayload) -> Result<Duration> {
    debug!(%url, who = payload.who, "triggering deploy");
    let start = Instant::now();

    // A connection failure here gets a friendlier treatment than a failure
    // reported inside the stream
    let mut response = client
        .post(url.clone())
        .form(payload)
        .send()
        .map_err(Error::Unreachable)?;

    let mut stdout = io::stdout();
    let mut buffer = [0u8; 4096];
    loop {
        let read = response.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        stdout.write_all(&buffer[..read])?;
        stdout.flush()?;
    }

    // Chief doesn't finish with a newline. Rude.
    println!();

    Ok(start.elapsed())
}
