use crate::{entropy::Entropy, scramble::ScrambleConfig, types::Cell};

/// Timing and content of a single character position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Character shown before scrambling starts, `None` past the old text.
    pub from: Option<char>,
    /// Character shown once settled, `None` past the new text.
    pub to: Option<char>,
    /// Frame at which scrambling starts.
    pub start: u32,
    /// Frame at which the position settles on `to`. Never below `start`.
    pub end: u32,
    /// Decoy currently shown while scrambling.
    pub glyph: Option<char>,
}

/// Output of one render step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub cells: Vec<Cell>,
    pub settled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Lays out one entry per position of the longer of `old` and `new`.
    pub fn build(
        old: &str,
        new: &str,
        config: &ScrambleConfig,
        entropy: &mut impl Entropy,
    ) -> Self {
        let old: Vec<char> = old.chars().collect();
        let new: Vec<char> = new.chars().collect();
        let length = old.len().max(new.len());

        let entries = (0..length)
            .map(|i| {
                let start = entropy.below(config.start_window);
                let end = start + entropy.below(config.settle_window);

                ScheduleEntry {
                    from: old.get(i).copied(),
                    to: new.get(i).copied(),
                    start,
                    end,
                    glyph: None,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the schedule as of `frame`, rerolling decoys of the positions
    /// that are scrambling.
    pub fn render(
        &mut self,
        frame: u32,
        config: &ScrambleConfig,
        entropy: &mut impl Entropy,
    ) -> Rendered {
        let mut cells = Vec::with_capacity(self.entries.len());
        let mut complete = 0;

        for entry in &mut self.entries {
            if frame >= entry.end {
                complete += 1;
                cells.extend(entry.to.map(Cell::Plain));
            } else if frame >= entry.start {
                let glyph = match entry.glyph {
                    Some(glyph) if !entropy.chance(config.reroll_chance) => glyph,
                    _ => config.alphabet[entropy.pick(config.alphabet.len())],
                };
                entry.glyph = Some(glyph);
                cells.push(Cell::Decoy(glyph));
            } else {
                cells.extend(entry.from.map(Cell::Plain));
            }
        }

        Rendered {
            cells,
            settled: complete == self.entries.len(),
        }
    }
}
