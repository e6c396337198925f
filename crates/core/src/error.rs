use std::fmt;

#[derive(Debug)]
pub enum BoardError {
    /// Category id not in the catalog.
    UnknownCategory(String),
    /// Reward id not in the catalog.
    UnknownReward(String),
    /// Reward is not currently placed in the given category.
    NotPlaced { category: String, reward: String },
    /// Persisted layout could not be parsed or serialized.
    Layout(String),
    /// Blob store failure.
    Storage(StoreError),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory(id) => write!(f, "unknown category: {id}"),
            Self::UnknownReward(id) => write!(f, "unknown reward: {id}"),
            Self::NotPlaced { category, reward } => {
                write!(f, "reward '{reward}' is not in category '{category}'")
            }
            Self::Layout(msg) => write!(f, "invalid layout: {msg}"),
            Self::Storage(e) => write!(f, "storage error: {e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for BoardError {
    fn from(e: StoreError) -> Self {
        Self::Storage(e)
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// Key is empty or contains characters the backend cannot address.
    InvalidKey(String),
    /// IO error (read, write, remove).
    Io(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid storage key: '{key}'"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
