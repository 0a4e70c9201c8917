use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "chiefctl", about = "Push code using Chief")]
pub struct Args {
    /// Environment defined in the config file to deploy to
    #[structopt(name = "ENV")]
    pub environment: String,

    /// A git reference (like a SHA) to deploy
    #[structopt(name = "REF", default_value = "HEAD")]
    pub reference: String,

    /// Open a browser to the GitHub compare URL for the diff
    #[structopt(short, long)]
    pub github: bool,

    /// Only print the git log (or GitHub URL with -g), nothing more
    #[structopt(short = "p", long = "print")]
    pub print_only: bool,

    /// The configuration file location
    ///
    /// Where the environment definitions should be loaded from. The
    /// environment variable CHIEFCTL_CONFIG can also be used.
    #[structopt(
        short,
        long,
        env = "CHIEFCTL_CONFIG",
        default_value = "chiefctl.ini"
    )]
    pub config: PathBuf,
}
