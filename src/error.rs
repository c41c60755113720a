use std::path::PathBuf;

/// Result alias that carries [`LyricastError`].
pub type Result<T> = std::result::Result<T, LyricastError>;

/// Errors raised by the collaborators around the lyric pipeline.
///
/// The pipeline itself recovers by substitution and never produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum LyricastError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(#[from] ::config::ConfigError),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("audio output: {0}")]
    AudioOutput(String),
    #[error("toml: {0}")]
    Toml(#[from] toml::ser::Error),
}
