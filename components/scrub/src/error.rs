/// Invalid setup, reported before any node is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid traversal direction {0:?}, use \"top_down\" or \"bottom_up\"")]
    InvalidDirection(String),
    #[error("unknown policy {0:?}, use one of \"strip\", \"escape\", \"prune\" or \"cull\"")]
    UnknownPolicy(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to parse markup: {0}")]
    Parse(#[from] scrub_dom::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
