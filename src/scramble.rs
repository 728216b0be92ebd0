//! Scramble reveal engine.
//!
//! A [`Scrambler`] owns one surface and animates it from whatever it shows
//! to a new string. Every position waits a random number of frames, shows
//! random decoy glyphs for a random number of frames, then settles on its
//! final character. The host delivers one step per display refresh through
//! [`Scrambler::tick`].

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::{
    completion::{self, Completion, Resolver},
    entropy::Entropy,
    error::{Error, Result},
    schedule::Schedule,
    surface::TextSurface,
};

pub const DECOY_ALPHABET: &str = "!<>-_\\/[]{}—=+*^?#________";
pub const REROLL_CHANCE: f64 = 0.28;
pub const START_WINDOW: u32 = 40;
pub const SETTLE_WINDOW: u32 = 40;

#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleConfig {
    /// Glyphs decoys are drawn from. Repeats weigh a glyph up.
    pub alphabet: Vec<char>,
    /// Chance per frame that a scrambling position swaps its decoy.
    pub reroll_chance: f64,
    /// Scrambling starts within `0..start_window` frames.
    pub start_window: u32,
    /// Scrambling lasts `0..settle_window` frames.
    pub settle_window: u32,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            alphabet: DECOY_ALPHABET.chars().collect(),
            reroll_chance: REROLL_CHANCE,
            start_window: START_WINDOW,
            settle_window: SETTLE_WINDOW,
        }
    }
}

impl ScrambleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.alphabet.is_empty() {
            return Err(Error::EmptyAlphabet);
        }

        if !(0.0..=1.0).contains(&self.reroll_chance) {
            return Err(Error::RerollChance(self.reroll_chance));
        }

        if self.start_window == 0 {
            return Err(Error::EmptyWindow { which: "start" });
        }

        if self.settle_window == 0 {
            return Err(Error::EmptyWindow { which: "settle" });
        }

        if self.start_window.checked_add(self.settle_window).is_none() {
            return Err(Error::WindowOverflow {
                start: self.start_window,
                settle: self.settle_window,
            });
        }

        Ok(())
    }

    /// Every position settles strictly before this frame.
    pub fn frame_bound(&self) -> u32 {
        self.start_window.saturating_add(self.settle_window)
    }
}

/// Handle to the animation step a reveal has queued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepToken {
    generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Scrambling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Nothing is queued.
    Idle,
    /// The step belonged to a reveal that has since been replaced.
    Stale,
    /// Rendered `frame`, more steps follow.
    Scrambling { frame: u32 },
    /// Rendered the last step; `frames` steps were drawn in total.
    Settled { frames: u32 },
}

#[derive(Debug, Default)]
struct EngineState {
    frame: u32,
    schedule: Schedule,
    resolver: Option<Resolver>,
    generation: u64,
    pending: Option<u64>,
}

pub struct Scrambler<S, E = StdRng> {
    surface: S,
    config: ScrambleConfig,
    entropy: E,
    state: EngineState,
}

impl<S: TextSurface> Scrambler<S> {
    pub fn new(surface: S, config: ScrambleConfig) -> Result<Self> {
        Self::with_entropy(surface, config, StdRng::from_os_rng())
    }
}

impl<S: TextSurface, E: Entropy> Scrambler<S, E> {
    pub fn with_entropy(surface: S, config: ScrambleConfig, entropy: E) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            surface,
            config,
            entropy,
            state: EngineState::default(),
        })
    }

    /// Starts animating towards `text`, superseding any reveal in flight.
    ///
    /// The first frame is drawn before this returns. The returned
    /// [`Completion`] resolves on the step that settles every position; a
    /// superseded reveal's completion never resolves.
    pub fn reveal(&mut self, text: &str) -> Completion {
        let old = self.surface.text();

        if let Some(generation) = self.state.pending.take() {
            trace!(generation, frame = self.state.frame, "superseding reveal in flight");
        }

        let schedule = Schedule::build(&old, text, &self.config, &mut self.entropy);
        let (resolver, completion) = completion::pair();

        debug!(
            from = old.chars().count(),
            to = text.chars().count(),
            positions = schedule.len(),
            "starting reveal"
        );

        self.state.generation = self.state.generation.wrapping_add(1);
        self.state.schedule = schedule;
        self.state.resolver = Some(resolver);
        self.state.frame = 0;

        self.render();

        completion
    }

    /// The step queued by the current reveal, if it has not settled yet.
    pub fn pending_step(&self) -> Option<StepToken> {
        self.state
            .pending
            .map(|generation| StepToken { generation })
    }

    /// Draws the step behind `token` unless a newer reveal replaced it.
    pub fn step(&mut self, token: StepToken) -> Tick {
        match self.state.pending {
            Some(generation) if generation == token.generation => self.render(),
            Some(_) => {
                trace!(generation = token.generation, "dropping stale step");
                Tick::Stale
            }
            None if token.generation == self.state.generation => Tick::Idle,
            None => Tick::Stale,
        }
    }

    /// Draws the queued step, if any. Call once per display refresh.
    pub fn tick(&mut self) -> Tick {
        match self.pending_step() {
            Some(token) => self.step(token),
            None => Tick::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.state.pending.is_some() {
            Phase::Scrambling
        } else {
            Phase::Idle
        }
    }

    pub fn is_animating(&self) -> bool {
        self.phase() == Phase::Scrambling
    }

    /// Frame the next step will draw.
    pub fn frame(&self) -> u32 {
        self.state.frame
    }

    pub fn schedule(&self) -> &Schedule {
        &self.state.schedule
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn render(&mut self) -> Tick {
        let frame = self.state.frame;
        let rendered = self
            .state
            .schedule
            .render(frame, &self.config, &mut self.entropy);
        self.surface.replace(rendered.cells);

        if !rendered.settled {
            self.state.pending = Some(self.state.generation);
            self.state.frame += 1;
            return Tick::Scrambling { frame };
        }

        self.state.pending = None;
        if let Some(resolver) = self.state.resolver.take() {
            resolver.resolve();
        }

        let frames = frame + 1;
        debug!(frames, "reveal settled");

        Tick::Settled { frames }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entropy::scripted::Scripted, surface::Panel, types::Cell};
    use proptest::prelude::*;

    fn engine(text: &str, seed: u64) -> Scrambler<Panel> {
        Scrambler::with_entropy(
            Panel::new(text),
            ScrambleConfig::default(),
            StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    fn run_to_end<S: TextSurface, E: Entropy>(engine: &mut Scrambler<S, E>) -> u32 {
        let mut ticks = 0;
        while engine.is_animating() {
            engine.tick();
            ticks += 1;
            assert!(ticks <= 80, "reveal did not settle within 80 ticks");
        }
        ticks
    }

    #[test]
    fn default_config_is_valid() {
        let config = ScrambleConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.alphabet.len(), 26);
        assert_eq!(config.alphabet.iter().filter(|&&c| c == '_').count(), 9);
        assert_eq!(config.frame_bound(), 80);
    }

    #[test]
    fn invalid_configs_fail_construction() {
        let cases = [
            ScrambleConfig {
                alphabet: Vec::new(),
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                reroll_chance: 1.5,
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                reroll_chance: f64::NAN,
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                start_window: 0,
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                settle_window: 0,
                ..ScrambleConfig::default()
            },
            ScrambleConfig {
                start_window: u32::MAX,
                settle_window: u32::MAX,
                ..ScrambleConfig::default()
            },
        ];

        for config in cases {
            assert!(Scrambler::new(Panel::default(), config).is_err());
        }
    }

    #[test]
    fn overflowing_windows_are_rejected_before_reveal() {
        let config = ScrambleConfig {
            start_window: u32::MAX,
            settle_window: u32::MAX,
            ..ScrambleConfig::default()
        };
        assert_eq!(config.frame_bound(), u32::MAX);

        let err = Scrambler::with_entropy(Panel::new("abcdefgh"), config, StdRng::seed_from_u64(8))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            Error::WindowOverflow {
                start: u32::MAX,
                settle: u32::MAX
            }
        ));
    }

    #[test]
    fn widest_windows_still_settle() {
        let config = ScrambleConfig {
            start_window: u32::MAX - 40,
            settle_window: 40,
            ..ScrambleConfig::default()
        };
        let entropy = Scripted::default().frames([u32::MAX, u32::MAX]);
        let mut engine = Scrambler::with_entropy(Panel::new("a"), config, entropy).unwrap();

        let _ = engine.reveal("b");
        let entry = &engine.schedule().entries()[0];

        assert_eq!(entry.start, u32::MAX - 41);
        assert_eq!(entry.end, u32::MAX - 2);
        assert!(entry.end < engine.config.frame_bound());
    }

    #[test]
    fn exact_frames_with_scripted_entropy() {
        // Position 0: start 0, end 2. Position 1: start 1, end 3.
        let entropy = Scripted::default()
            .frames([0, 2, 1, 2])
            .picks([17, 0])
            .rolls([false, false]);
        let mut engine =
            Scrambler::with_entropy(Panel::new("ab"), ScrambleConfig::default(), entropy).unwrap();

        let done = engine.reveal("XY");
        assert_eq!(engine.surface().cells(), &[Cell::Decoy('#'), Cell::Plain('b')]);
        assert_eq!(engine.frame(), 1);

        assert_eq!(engine.tick(), Tick::Scrambling { frame: 1 });
        assert_eq!(engine.surface().cells(), &[Cell::Decoy('#'), Cell::Decoy('!')]);

        assert_eq!(engine.tick(), Tick::Scrambling { frame: 2 });
        assert_eq!(engine.surface().cells(), &[Cell::Plain('X'), Cell::Decoy('!')]);
        assert!(!done.is_resolved());

        assert_eq!(engine.tick(), Tick::Settled { frames: 4 });
        assert_eq!(engine.surface().text(), "XY");
        assert!(done.is_resolved());
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.tick(), Tick::Idle);
    }

    #[test]
    fn empty_to_empty_resolves_synchronously() {
        let mut engine = engine("", 3);

        let done = engine.reveal("");

        assert!(done.is_resolved());
        assert!(!engine.is_animating());
        assert_eq!(engine.schedule().len(), 0);
    }

    #[test]
    fn empty_to_single_char() {
        let mut engine = engine("", 5);

        let done = engine.reveal("X");
        assert_eq!(engine.schedule().len(), 1);
        run_to_end(&mut engine);

        assert!(done.is_resolved());
        assert_eq!(engine.surface().text(), "X");
    }

    #[test]
    fn shrinking_reveal_drops_the_tail() {
        let mut engine = engine("ABC", 9);

        let done = engine.reveal("AB");
        assert_eq!(engine.schedule().len(), 3);
        assert_eq!(engine.schedule().entries()[2].to, None);
        run_to_end(&mut engine);

        assert!(done.is_resolved());
        assert_eq!(engine.surface().text(), "AB");
    }

    #[test]
    fn later_reveal_supersedes_earlier() {
        let mut engine = engine("hello", 21);

        let first = engine.reveal("world");
        let stale = engine.pending_step().unwrap();
        engine.tick();
        engine.tick();

        let second = engine.reveal("scramble");
        assert_eq!(engine.frame(), 1);
        assert_eq!(engine.step(stale), Tick::Stale);

        run_to_end(&mut engine);

        assert!(second.is_resolved());
        assert!(!first.is_resolved());
        assert_eq!(engine.surface().text(), "scramble");
        assert_eq!(engine.step(stale), Tick::Stale);
    }

    #[test]
    fn reveal_reads_decoys_as_old_text() {
        let entropy = Scripted::default().frames([0, 5]).picks([4]);
        let mut engine =
            Scrambler::with_entropy(Panel::new("a"), ScrambleConfig::default(), entropy).unwrap();

        let _ = engine.reveal("b");
        assert_eq!(engine.surface().text(), "_");

        let _ = engine.reveal("c");
        assert_eq!(engine.schedule().entries()[0].from, Some('_'));
    }

    #[test]
    fn unicode_is_revealed_per_char() {
        let mut engine = engine("", 13);

        let done = engine.reveal("ça—日本");
        assert_eq!(engine.schedule().len(), 5);
        run_to_end(&mut engine);

        assert!(done.is_resolved());
        assert_eq!(engine.surface().text(), "ça—日本");
    }

    proptest! {
        #[test]
        fn every_reveal_settles_within_bound(
            old in "\\PC{0,20}",
            new in "\\PC{0,20}",
            seed in any::<u64>(),
        ) {
            let mut engine = engine(&old, seed);

            let done = engine.reveal(&new);
            let mut rendered = 1;
            while engine.is_animating() {
                engine.tick();
                rendered += 1;
            }

            prop_assert!(rendered <= 80);
            prop_assert!(done.is_resolved());
            prop_assert_eq!(engine.surface().text(), new);
        }
    }
}
