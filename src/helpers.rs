use crate::{
    error::{Error, Result},
    types::{Cell, Options},
};

use ratatui::prelude::*;
use std::{env, fs, path::Path, process, sync::Mutex};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const DEFAULT_TITLE: &str = "SUDHANTHIRAN";
pub const DEFAULT_PROFILE: &str = "Developer. Tinkerer. Occasional designer.

Projects  |  About  |  Contact";
pub const DECOY_COLOR: Color = Color::DarkGray;

pub fn print_usage_and_exit() -> ! {
    eprintln!(
        "Usage: scramble [-title TEXT] [-profile PATH] [-seed N] [-log PATH]

Options:
  -title TEXT    Reveal TEXT as the title on startup
  -profile PATH  Show the contents of PATH once the title has settled
  -seed N        Seed the random source for a repeatable animation
  -log PATH      Write trace output to PATH (filtered by RUST_LOG)
By default the title reads {DEFAULT_TITLE} and randomness is seeded from the OS."
    );

    process::exit(1);
}

pub fn parse_args() -> Options {
    match parse_from(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => print_usage_and_exit(),
        Err(e) => {
            eprintln!("{}", e);

            print_usage_and_exit()
        }
    }
}

/// Parses command line flags. `Ok(None)` means help was asked for.
pub fn parse_from(args: impl IntoIterator<Item = String>) -> Result<Option<Options>> {
    let mut options = Options {
        title: DEFAULT_TITLE.to_string(),
        profile: None,
        seed: None,
        log: None,
    };

    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |what: &str| {
            args.next()
                .ok_or_else(|| Error::Usage(format!("Missing {} after {}", what, arg)))
        };

        match arg.as_str() {
            "-h" | "--help" => return Ok(None),

            "-t" | "-title" | "--title" => {
                options.title = value("text")?;
            }

            "-p" | "-profile" | "--profile" => {
                options.profile = Some(value("path")?.into());
            }

            "-s" | "-seed" | "--seed" => {
                let raw = value("seed")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| Error::Usage(format!("Invalid seed: {}", raw)))?;

                options.seed = Some(seed);
            }

            "-l" | "-log" | "--log" => {
                options.log = Some(value("path")?.into());
            }

            other => return Err(Error::Usage(format!("Unknown argument: {}", other))),
        }
    }

    Ok(Some(options))
}

pub fn load_profile(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.replace("\r\n", "\n").trim_end().to_string())
}

/// Sends tracing output to `path`. The terminal itself belongs to the UI.
pub fn init_logging(path: &Path) -> Result<()> {
    let file = fs::File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "scramble=info".into()))
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();

    Ok(())
}

pub fn cells_to_line(cells: &[Cell]) -> Line<'static> {
    let spans: Vec<Span<'static>> = cells
        .iter()
        .map(|cell| {
            let style = if cell.is_decoy() {
                Style::default().fg(DECOY_COLOR)
            } else {
                Style::default()
            };

            Span::styled(cell.ch().to_string(), style)
        })
        .collect();

    Line::from(spans)
}
