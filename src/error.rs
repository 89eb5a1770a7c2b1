use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum VdsError {
    #[error("cannot open ini file: {0}")]
    ConfigRead(Utf8PathBuf),

    #[error("failed to parse ini file: {0}")]
    ConfigParse(String),

    #[error("invalid product name: {0}")]
    InvalidProduct(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("cannot open runinfo file: {0}")]
    RuninfoRead(Utf8PathBuf),

    #[error("runinfo file has no {attribute} attribute on {element}")]
    RuninfoAttribute { element: String, attribute: String },

    #[error("invalid runinfo timestamp: {0}")]
    RuninfoTimestamp(String),

    #[error("failed to initialize logger: {0}")]
    LoggerInit(String),

    #[error("invalid server address: {0}")]
    InvalidServer(String),

    #[error("VanderSat request failed: {0}")]
    VdsHttp(String),

    #[error("VanderSat API returned status {status}")]
    VdsStatus { status: u16 },

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("malformed log line: {0}")]
    MalformedLogLine(String),

    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),
}
