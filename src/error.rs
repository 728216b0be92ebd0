use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("decoy alphabet is empty")]
    EmptyAlphabet,

    #[error("reroll chance must be within [0, 1], got {0}")]
    RerollChance(f64),

    #[error("{which} window must be at least one frame wide")]
    EmptyWindow { which: &'static str },

    #[error("start window {start} plus settle window {settle} overflows the frame counter")]
    WindowOverflow { start: u32, settle: u32 },

    #[error("{0}")]
    Usage(String),

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
