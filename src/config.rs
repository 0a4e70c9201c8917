use ini::Ini;
use std::{path::Path, process::Command};
use tracing::debug;

use crate::error::{Error, Result};

/// The parsed configuration file
///
/// One section per environment, each with a `revision_url`, `chief_url`, and
/// `password`. A `general` section may carry `username` and `github`, and a
/// `newrelic` section carries the deploy notification credentials.
#[derive(Debug)]
pub struct Config {
    ini: Ini,
}

impl Config {
    /// Read the configuration from a given file, once per run
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration");

        let ini = Ini::load_from_file(path).map_err(|source| Error::Config {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self { ini })
    }

    /// Look up a key, returning nothing if the section or key is absent
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.ini.section(Some(section))?.get(key)
    }

    /// Look up a key that must exist
    ///
    /// A missing section means the environment is not defined at all, which
    /// is reported differently from a missing key within it.
    pub fn require(&self, section: &str, key: &str) -> Result<&str> {
        let properties = self
            .ini
            .section(Some(section))
            .ok_or_else(|| Error::MissingEnvironment(section.into()))?;

        properties.get(key).ok_or_else(|| Error::MissingKey {
            key: key.into(),
            section: section.into(),
        })
    }

    /// The user to record deploys as, falling back to the current OS user
    pub fn username(&self) -> Result<String> {
        if let Some(username) = self.get("general", "username") {
            return Ok(username.trim().into());
        }

        let output = Command::new("whoami").output()?;
        if !output.status.success() {
            return Err(Error::Command {
                command: "whoami".into(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().into())
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::error::Error;

    #[test]
    fn parse_config() {
        let config = Config::load("./chiefctl.example.ini").expect("failed to parse configuration");

        assert_eq!(Some("bob"), config.get("general", "username"));
        assert_eq!(Some("bobloblaw/lawblog"), config.get("general", "github"));

        assert_eq!(
            Some("http://example.com/media/revision.txt"),
            config.get("prod", "revision_url")
        );
        assert_eq!(
            Some("http://chief.example.com/example.prod"),
            config.get("prod", "chief_url")
        );
        assert_eq!(Some("lolpassword"), config.get("prod", "password"));

        assert_eq!(Some("omgsecret"), config.get("stage", "password"));
    }

    #[test]
    fn optional_lookups_never_fail() {
        let config = Config::load("./chiefctl.example.ini").unwrap();

        assert_eq!(None, config.get("nonexistent", "revision_url"));
        assert_eq!(None, config.get("prod", "nonexistent"));
    }

    #[test]
    fn missing_environment() {
        let config = Config::load("./chiefctl.example.ini").unwrap();

        let error = config.require("nonexistent", "revision_url").unwrap_err();
        assert!(matches!(error, Error::MissingEnvironment(_)));
        assert_eq!(2, error.exit_code());
    }

    #[test]
    fn missing_key() {
        let config = Config::load("./chiefctl.example.ini").unwrap();

        let error = config.require("prod", "nonexistent").unwrap_err();
        assert!(matches!(error, Error::MissingKey { .. }));
        assert_eq!(4, error.exit_code());
    }

    #[test]
    fn username_from_config() {
        let config = Config::load("./chiefctl.example.ini").unwrap();
        assert_eq!("bob", config.username().unwrap());
    }

    #[test]
    fn section_and_key_errors_are_distinct() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[stage]\nrevision_url = stage.example.com/rev.txt").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(matches!(
            config.require("prod", "password").unwrap_err(),
            Error::MissingEnvironment(_)
        ));
        assert!(matches!(
            config.require("stage", "password").unwrap_err(),
            Error::MissingKey { .. }
        ));
    }

    #[test]
    fn unreadable_file() {
        assert!(matches!(
            Config::load("./does-not-exist.ini").unwrap_err(),
            Error::Config { .. }
        ));
    }
}
