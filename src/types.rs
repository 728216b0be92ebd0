use std::path::PathBuf;

/// One character of displayed content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// A character of the old or new text, shown as is.
    Plain(char),
    /// A transient glyph shown while a position scrambles.
    Decoy(char),
}

impl Cell {
    pub fn ch(self) -> char {
        match self {
            Cell::Plain(ch) | Cell::Decoy(ch) => ch,
        }
    }

    pub fn is_decoy(self) -> bool {
        matches!(self, Cell::Decoy(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub title: String,
    pub profile: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log: Option<PathBuf>,
}
