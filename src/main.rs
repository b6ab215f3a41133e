mod palette;
mod patch;
mod setup;
mod terminal;
use crate::setup::run_acquired;
use lexopt::{Arg, Parser};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

/// Stylesheet patched when no `--css` option is given
const DEFAULT_STYLESHEET: &str = "dist/style.css";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run { css: PathBuf, verbosity: u8 },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut css = None;
        let mut verbosity = 0u8;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("css") => css = Some(PathBuf::from(parser.value()?)),
                Arg::Short('v') | Arg::Long("verbose") => verbosity = verbosity.saturating_add(1),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            css: css.unwrap_or_else(|| PathBuf::from(DEFAULT_STYLESHEET)),
            verbosity,
        })
    }

    fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Command::Run { css, verbosity } => {
                init_logging(verbosity);
                run_acquired(terminal::acquire(), &css).map(ExitCode::from)
            }
            Command::Help => {
                println!("Usage: calendar-events-setup [-c <PATH>] [-v]...");
                println!();
                println!("Interactively choose a color palette for the calendar-events stylesheet");
                println!();
                println!("Options:");
                println!("  -c, --css <PATH>  Stylesheet to patch [default: {DEFAULT_STYLESHEET}]");
                println!("  -v, --verbose     Log more details to stderr (repeatable)");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(ExitCode::SUCCESS)
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    Command::from_parser(Parser::from_env())?.run()
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args.iter().copied()))
    }

    #[test]
    fn test_default() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                css: PathBuf::from("dist/style.css"),
                verbosity: 0
            }
        );
    }

    #[test]
    fn test_options() {
        assert_eq!(
            parse(&["-vv", "--css", "build/app.css"]).unwrap(),
            Command::Run {
                css: PathBuf::from("build/app.css"),
                verbosity: 2
            }
        );
        assert_eq!(
            parse(&["--css=x.css", "--verbose"]).unwrap(),
            Command::Run {
                css: PathBuf::from("x.css"),
                verbosity: 1
            }
        );
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse(&["-v", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse(&["-V"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["style.css"]).is_err());
        assert!(parse(&["--css"]).is_err());
        assert!(parse(&["--colour"]).is_err());
    }
}
