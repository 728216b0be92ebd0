use crate::types::Cell;

/// Somewhere a reveal can be drawn.
pub trait TextSurface {
    /// The text currently on display, decoys included.
    fn text(&self) -> String;

    /// Replaces everything on display.
    fn replace(&mut self, cells: Vec<Cell>);
}

/// In-memory surface the terminal UI renders from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Panel {
    cells: Vec<Cell>,
}

impl Panel {
    pub fn new(text: &str) -> Self {
        Self {
            cells: text.chars().map(Cell::Plain).collect(),
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl TextSurface for Panel {
    fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.ch()).collect()
    }

    fn replace(&mut self, cells: Vec<Cell>) {
        self.cells = cells;
    }
}
