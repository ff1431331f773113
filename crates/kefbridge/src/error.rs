//! CLI error types with miette diagnostics.
//!
//! Maps library errors into user-facing diagnostics with help text and
//! stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use kefbridge_api::Error as ApiError;
use kefbridge_config::ConfigError;
use kefbridge_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("no speaker host given")]
    #[diagnostic(
        code(kefbridge::no_host),
        help("Pass --host <ip> or set the KEFBRIDGE_HOST environment variable.")
    )]
    NoHost,

    #[error("could not load configuration")]
    #[diagnostic(
        code(kefbridge::config),
        help(
            "Check the config file for syntax errors.\n\
             Default location: <config dir>/kefbridge/config.toml"
        )
    )]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(code(kefbridge::speaker))]
    Api(#[from] ApiError),

    #[error(transparent)]
    #[diagnostic(code(kefbridge::bridge))]
    Core(#[from] CoreError),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoHost | Self::Api(ApiError::InvalidArgument { .. }) => exit_code::USAGE,
            Self::Api(ApiError::CommandFailed { .. } | ApiError::QueryFailed { .. }) => {
                exit_code::CONNECTION
            }
            _ => exit_code::GENERAL,
        }
    }
}
