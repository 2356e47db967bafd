use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("transition '{transition}' references place '{place}' not present in net '{net}'")]
    UndeclaredPlace {
        net: String,
        transition: String,
        place: String,
    },

    #[error("duplicate name '{0}' in net")]
    DuplicateName(String),

    #[error("net '{0}' is already finalized")]
    AlreadyFinalized(String),

    #[error("place '{0}' has no marking: supply an initial value or a marking override")]
    MarkingRequired(String),

    #[error("assignment transition '{transition}' returned {got} values for {expected} codomain places")]
    ArityMismatch {
        transition: String,
        expected: usize,
        got: usize,
    },

    #[error("non-finite value produced by '{origin}' at t = {time} s")]
    NonFinite { origin: String, time: f64 },

    #[error("simulation is invalid after a numeric failure and cannot be advanced")]
    Invalidated,

    #[error("simulation already finished")]
    Finished,

    #[error("target time {target} s is not ahead of current time {current} s")]
    TimeNotAhead { target: f64, current: f64 },

    #[error("invalid settings: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
