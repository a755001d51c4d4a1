use std::{fmt::Display, io};

#[derive(Debug)]
pub enum Error {
    MalformedHeader(String),
    MalformedRecord,
    AheadBehindParse(String),
    MalformedDiffStat(String),
    UnexpectedOutput { command: String, reason: String },
    ExternalQuery { command: String, cause: QueryError },
    Cancelled,
    Config(Box<figment::Error>),
    ConfigDir(etcetera::HomeDirError),
    OpenLogFile(io::Error),
    Serialize(serde_json::Error),
}

impl Error {
    pub(crate) fn malformed_header(line: &str) -> Self {
        Error::MalformedHeader(line.to_string())
    }

    pub(crate) fn query(command: &str, cause: QueryError) -> Self {
        Error::ExternalQuery {
            command: command.to_string(),
            cause,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ExternalQuery { cause, .. } => Some(cause),
            Error::Config(e) => Some(e.as_ref()),
            Error::ConfigDir(e) => Some(e),
            Error::OpenLogFile(e) => Some(e),
            Error::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedHeader(line) => {
                f.write_fmt(format_args!("Unexpected header format: {:?}", line))
            }
            Error::MalformedRecord => f.write_str("Last status record doesn't end with a nil byte"),
            Error::AheadBehindParse(s) => {
                f.write_fmt(format_args!("Can't parse ahead/behind count: {:?}", s))
            }
            Error::MalformedDiffStat(s) => {
                f.write_fmt(format_args!("Can't parse diff statistics: {:?}", s))
            }
            Error::UnexpectedOutput { command, reason } => {
                f.write_fmt(format_args!("Unexpected output from '{}': {}", command, reason))
            }
            Error::ExternalQuery { command, cause } => {
                f.write_fmt(format_args!("exec '{}': {}", command, cause))
            }
            Error::Cancelled => f.write_str("Cancelled"),
            Error::Config(e) => f.write_fmt(format_args!("Configuration error: {}", e)),
            Error::ConfigDir(e) => {
                f.write_fmt(format_args!("Couldn't find configuration directory: {}", e))
            }
            Error::OpenLogFile(e) => f.write_fmt(format_args!("Couldn't open log file: {}", e)),
            Error::Serialize(e) => f.write_fmt(format_args!("Can't format status: {}", e)),
        }
    }
}

#[derive(Debug)]
pub enum QueryError {
    Spawn(io::Error),
    BadExit(Option<i32>, String),
    ReadOutput(io::Error),
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Spawn(e) | QueryError::ReadOutput(e) => Some(e),
            QueryError::BadExit(..) => None,
        }
    }
}

impl Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Spawn(e) => f.write_fmt(format_args!("Failed to spawn command: {}", e)),
            QueryError::BadExit(code, stderr) => {
                f.write_fmt(format_args!(
                    "exited with code: {}",
                    code.map(|c| c.to_string())
                        .unwrap_or_else(|| "".to_string())
                ))?;
                if !stderr.is_empty() {
                    f.write_fmt(format_args!(" ({})", stderr))?;
                }
                Ok(())
            }
            QueryError::ReadOutput(e) => {
                f.write_fmt(format_args!("Couldn't read command output: {}", e))
            }
        }
    }
}
