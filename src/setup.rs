use crate::palette::{palette, Hue, Shade};
use crate::patch::patch_file;
use crate::terminal::{Acquired, Prompter};
use crossterm::style::Stylize;
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Selection {
    pub(crate) hue: Hue,
    pub(crate) shade: Shade,
}

#[derive(Debug, Error)]
pub(crate) enum SelectError {
    #[error("invalid hue choice: {0:?}")]
    InvalidHue(String),
    #[error("invalid shade choice: {0:?}")]
    InvalidShade(String),
    #[error("failed to communicate with terminal")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    Applied(Selection),
    Rejected,
}

/// Ask the operator for a hue and then a shade.  End of input counts as an
/// invalid answer.
pub(crate) fn select<P: Prompter>(prompter: &mut P) -> Result<Selection, SelectError> {
    let menu = format!(
        "\n{}\n\nChoose a color palette:\n{}\nColor (1-{}): ",
        "calendar-events setup".bold(),
        numbered(Hue::ALL),
        Hue::ALL.len()
    );
    prompter.prompt(&menu)?;
    let answer = prompter.read_line()?.unwrap_or_default();
    let Some(hue) = Hue::from_choice(&answer) else {
        return Err(SelectError::InvalidHue(answer));
    };
    debug!(%hue, "hue chosen");

    let menu = format!(
        "\nChoose a shade for {hue}:\n{}\nShade (1-{}): ",
        numbered(Shade::ALL.map(Shade::label)),
        Shade::ALL.len()
    );
    prompter.prompt(&menu)?;
    let answer = prompter.read_line()?.unwrap_or_default();
    let Some(shade) = Shade::from_choice(&answer) else {
        return Err(SelectError::InvalidShade(answer));
    };
    debug!(%shade, "shade chosen");

    Ok(Selection { hue, shade })
}

// Menu lines of the form "  1. green\n"
fn numbered<I, D>(items: I) -> String
where
    I: IntoIterator<Item = D>,
    D: fmt::Display,
{
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {item}\n", i + 1))
        .collect::<Vec<_>>()
        .concat()
}

/// Run the palette selection and, if the operator's choices are valid, patch
/// the stylesheet at `css_path`.  The stylesheet is not touched if the
/// selection is rejected.
pub(crate) fn run<P: Prompter>(prompter: &mut P, css_path: &Path) -> anyhow::Result<Outcome> {
    let selection = match select(prompter) {
        Ok(sel) => sel,
        Err(SelectError::Io(e)) => return Err(anyhow::Error::new(e).context("prompt failed")),
        Err(e) => {
            info!("{e}");
            prompter.prompt(&format!("{}\n", "Invalid selection.".red()))?;
            return Ok(Outcome::Rejected);
        }
    };
    let set = palette(selection.hue, selection.shade);
    let replaced = patch_file(css_path, set)?;
    info!(
        hue = %selection.hue,
        shade = %selection.shade,
        replaced,
        path = %css_path.display(),
        "palette applied"
    );
    prompter.prompt(&format!(
        "\nPalette applied: {} {}\n",
        selection.hue, selection.shade
    ))?;
    Ok(Outcome::Applied(selection))
}

/// Exit status for a run that applied a palette or was skipped
pub(crate) const EXIT_OK: u8 = 0;

/// Exit status for a run in which the operator made an invalid selection
pub(crate) const EXIT_REJECTED: u8 = 1;

/// Carry out the whole setup procedure on whatever terminal could be
/// acquired, and return the process exit status
pub(crate) fn run_acquired<P: Prompter>(
    acquired: Acquired<P>,
    css_path: &Path,
) -> anyhow::Result<u8> {
    let Acquired::Interactive(mut prompter) = acquired else {
        info!("no interactive terminal available; skipping palette setup");
        return Ok(EXIT_OK);
    };
    let outcome = run(&mut prompter, css_path)?;
    drop(prompter);
    match outcome {
        Outcome::Applied(selection) => {
            debug!(?selection, "setup complete");
            Ok(EXIT_OK)
        }
        Outcome::Rejected => Ok(EXIT_REJECTED),
    }
}
