use dialoguer::Confirm;
use eyre::Result;
use reqwest::blocking::Client;
use std::{env, io, process, time::Duration};
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

mod args;
mod chief;
mod config;
mod describe;
mod error;
mod git;
mod github;
mod notifier;

use args::Args;
use config::Config;
use error::Error;

/// How long to wait for a connection before giving up. The deploy stream
/// itself stays unbounded since Chief takes minutes to answer.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    // Setup traceback
    if env::var("RUST_SPANTRACE").is_err() {
        env::set_var("RUST_SPANTRACE", "0");
    }
    color_eyre::install()?;
    init_tracing();

    // Parse the CLI
    let cli = Args::from_args();

    if let Err(error) = run(cli) {
        eprintln!("{}", error);
        process::exit(error.exit_code());
    }

    Ok(())
}

fn run(cli: Args) -> error::Result<()> {
    let config = Config::load(&cli.config)?;

    // Build the HTTP client
    let client = Client::builder()
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(None)
        .build()?;

    let environment_commit = chief::current_revision(&client, &config, &cli.environment)?;
    let local_commit = git::rev_parse(&cli.reference)?;

    if cli.github {
        let repo = config.require("general", "github")?;
        let url = github::compare_url(repo, &environment_commit, &local_commit);
        println!("{}", url);
        if !cli.print_only {
            github::open(&url);
        }
        return Ok(());
    }

    let chief_url = chief::ensure_scheme(config.require(&cli.environment, "chief_url")?)?;
    let password = config.require(&cli.environment, "password")?;
    let username = config.username()?;

    println!("Environment: {}", cli.environment);
    println!("Pushing as : {}", username);
    println!(
        "Pushing    : {} ({})",
        cli.reference,
        github::short(&local_commit)
    );
    println!("On server  : {}", github::short(&environment_commit));

    if environment_commit.starts_with(&local_commit) {
        println!("Pushing out (again):");
        git::show_oneline(&local_commit)?;
    } else if !git::is_ancestor(&environment_commit, &local_commit)? {
        println!("Pushing from different branch:");
        git::show_oneline(&local_commit)?;
    } else {
        println!("Pushing out:");
        git::show_range(&environment_commit, &local_commit)?;
    }

    if cli.print_only {
        return Ok(());
    }

    println!();
    let proceed = Confirm::new()
        .with_prompt("Proceed?")
        .interact()
        .map_err(Error::Prompt)?;
    if !proceed {
        return Err(Error::Canceled);
    }

    println!("Logs at: {}/logs/{}", chief_url, local_commit);

    let payload = chief::DeployPayload {
        who: &username,
        password,
        reference: &local_commit,
    };
    let elapsed = chief::deploy(&client, &chief_url, &payload)?;
    println!("Total time: {:.3}s", elapsed.as_secs_f64());

    notifier::notify(
        &client,
        &config,
        &cli.environment,
        &environment_commit,
        &local_commit,
    )
}

/// Send diagnostics to stderr so they never mix with the deploy log
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
