//! # Config - run configuration for setmerge
//!
//! Collects everything one merge run needs: the ordered input paths, the
//! output path, the header byte order and the overwrite policy.
//!
//! ## Environment
//!
//! ```text
//! SETMERGE_LITTLE_ENDIAN  treat headers as little-endian  (default: false)
//! SETMERGE_FORCE          overwrite without asking        (default: false)
//! ```
//!
//! Command-line flags, when given, always take precedence.

use setfile::Endianness;
use std::path::PathBuf;
use thiserror::Error;

/// Minimum number of input files for a merge.
pub const MIN_INPUTS: usize = 2;

pub const ENV_LITTLE_ENDIAN: &str = "SETMERGE_LITTLE_ENDIAN";
pub const ENV_FORCE: &str = "SETMERGE_FORCE";

/// What to do when the output path already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Ask the caller for a yes/no decision before overwriting.
    #[default]
    Prompt,
    /// Overwrite without asking.
    Force,
}

impl OverwritePolicy {
    #[must_use]
    pub fn from_flag(force: bool) -> Self {
        if force {
            OverwritePolicy::Force
        } else {
            OverwritePolicy::Prompt
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "need at least {} input files and an output path, got {given} path(s)",
        MIN_INPUTS
    )]
    TooFewInputs { given: usize },

    #[error("invalid value {value:?} for {key}: expected true/false, yes/no, on/off or 1/0")]
    InvalidEnv { key: String, value: String },
}

/// Defaults taken from the environment, overridable by flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvDefaults {
    pub little_endian: bool,
    pub force: bool,
}

impl EnvDefaults {
    /// Reads defaults from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads defaults through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            little_endian: flag_or(&lookup, ENV_LITTLE_ENDIAN, false)?,
            force: flag_or(&lookup, ENV_FORCE, false)?,
        })
    }
}

fn flag_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            key: key.to_string(),
            value: raw,
        }),
    }
}

/// A fully resolved merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Input files, in merge order.
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    pub endianness: Endianness,
    pub overwrite: OverwritePolicy,
}

impl MergeConfig {
    /// Builds a config from positional paths where the last one is the output.
    ///
    /// # Errors
    ///
    /// [`ConfigError::TooFewInputs`] unless there are at least [`MIN_INPUTS`]
    /// inputs plus the output.
    pub fn from_paths(
        mut paths: Vec<PathBuf>,
        endianness: Endianness,
        overwrite: OverwritePolicy,
    ) -> Result<Self, ConfigError> {
        let given = paths.len();
        if given < MIN_INPUTS + 1 {
            return Err(ConfigError::TooFewInputs { given });
        }
        let Some(output) = paths.pop() else {
            return Err(ConfigError::TooFewInputs { given });
        };
        Ok(Self {
            inputs: paths,
            output,
            endianness,
            overwrite,
        })
    }

    /// Resolves flags against environment defaults. A flag that is set wins.
    pub fn resolve(
        paths: Vec<PathBuf>,
        little_endian: bool,
        force: bool,
        env: EnvDefaults,
    ) -> Result<Self, ConfigError> {
        Self::from_paths(
            paths,
            Endianness::from_flag(little_endian || env.little_endian),
            OverwritePolicy::from_flag(force || env.force),
        )
    }
}
