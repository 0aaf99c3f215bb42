#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    #[error("Stop names and bus numbers must not be empty")]
    EmptyName,

    #[error("Stop already registered: {0}")]
    DuplicateStop(String),

    #[error("Bus already registered: {0}")]
    DuplicateBus(String),

    #[error("Bus {bus} references unknown stop: {stop}")]
    UnknownStopReference { bus: String, stop: String },

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Stop not found: {0}")]
    StopNotFound(String),
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
