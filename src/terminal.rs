use crossterm::tty::IsTty;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, StdinLock, Stdout, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Line-oriented interaction with the operator
pub(crate) trait Prompter {
    /// Write `text` and flush it so that it is visible before the next read
    fn prompt(&mut self, text: &str) -> io::Result<()>;

    /// Read one line of input, including its terminator.  Returns `None` at
    /// end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// A [`Prompter`] over a separate reader & writer
#[derive(Debug)]
pub(crate) struct Channel<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Channel<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Channel { input, output }
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Channel<R, W> {
    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        // Read bytes rather than a `String` so that non-UTF-8 input is an
        // invalid answer instead of an I/O error
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            Ok(None)
        } else {
            Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
        }
    }
}

/// An interactive terminal session.  Any handles opened to the terminal
/// device are closed when this is dropped.
#[derive(Debug)]
pub(crate) enum Terminal {
    /// The process's own stdin & stdout
    Inherited(Channel<StdinLock<'static>, Stdout>),
    /// The controlling terminal, opened directly
    Device(Channel<BufReader<File>, File>),
}

impl Prompter for Terminal {
    fn prompt(&mut self, text: &str) -> io::Result<()> {
        match self {
            Terminal::Inherited(chan) => chan.prompt(text),
            Terminal::Device(chan) => chan.prompt(text),
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self {
            Terminal::Inherited(chan) => chan.read_line(),
            Terminal::Device(chan) => chan.read_line(),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Acquired<P = Terminal> {
    Interactive(P),
    Unavailable,
}

/// Paths at which the controlling terminal can be opened for reading and for
/// writing
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TtyDevice {
    input: PathBuf,
    output: PathBuf,
}

impl TtyDevice {
    #[cfg(test)]
    pub(crate) fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input: P, output: Q) -> TtyDevice {
        TtyDevice {
            input: input.into(),
            output: output.into(),
        }
    }

    pub(crate) fn controlling() -> TtyDevice {
        if cfg!(windows) {
            TtyDevice {
                input: PathBuf::from("CONIN$"),
                output: PathBuf::from("CONOUT$"),
            }
        } else {
            TtyDevice {
                input: PathBuf::from("/dev/tty"),
                output: PathBuf::from("/dev/tty"),
            }
        }
    }

    fn open(&self) -> io::Result<Channel<BufReader<File>, File>> {
        let input = File::open(&self.input)?;
        let output = OpenOptions::new().write(true).open(&self.output)?;
        Ok(Channel::new(BufReader::new(input), output))
    }
}

/// Obtain an interactive session with the operator, even if stdin has been
/// redirected.  Never fails; if no terminal can be reached, the result is
/// [`Acquired::Unavailable`].
pub(crate) fn acquire() -> Acquired {
    acquire_from(io::stdin().is_tty(), &TtyDevice::controlling())
}

pub(crate) fn acquire_from(stdin_is_tty: bool, device: &TtyDevice) -> Acquired {
    if stdin_is_tty {
        debug!("stdin is a terminal; prompting on stdin/stdout");
        return Acquired::Interactive(Terminal::Inherited(Channel::new(
            io::stdin().lock(),
            io::stdout(),
        )));
    }
    match device.open() {
        Ok(chan) => {
            debug!(
                path = %device.input.display(),
                "stdin is not a terminal; prompting on controlling terminal"
            );
            Acquired::Interactive(Terminal::Device(chan))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %device.input.display(), "no controlling terminal device");
            Acquired::Unavailable
        }
        Err(e) => {
            info!(
                path = %device.input.display(),
                error = %e,
                "could not open controlling terminal"
            );
            Acquired::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_prompt_and_read() {
        let mut chan = Channel::new(&b"3\nabc\n"[..], Vec::new());
        chan.prompt("Color (1-6): ").unwrap();
        assert_eq!(chan.read_line().unwrap().as_deref(), Some("3\n"));
        assert_eq!(chan.read_line().unwrap().as_deref(), Some("abc\n"));
        assert_eq!(chan.read_line().unwrap(), None);
        assert_eq!(chan.into_output(), b"Color (1-6): ");
    }

    #[test]
    fn test_channel_final_line_without_newline() {
        let mut chan = Channel::new(&b"2"[..], Vec::new());
        assert_eq!(chan.read_line().unwrap().as_deref(), Some("2"));
        assert_eq!(chan.read_line().unwrap(), None);
    }

    #[test]
    fn test_channel_invalid_utf8() {
        let mut chan = Channel::new(&b"\xFF1\n"[..], Vec::new());
        assert_eq!(chan.read_line().unwrap().as_deref(), Some("\u{FFFD}1\n"));
    }

    #[test]
    fn test_missing_device_is_unavailable() {
        let tmpdir = tempfile::tempdir().unwrap();
        let device = TtyDevice::new(tmpdir.path().join("tty"), tmpdir.path().join("tty"));
        assert!(matches!(
            acquire_from(false, &device),
            Acquired::Unavailable
        ));
    }

    #[test]
    fn test_tty_stdin_does_not_open_device() {
        let tmpdir = tempfile::tempdir().unwrap();
        let device = TtyDevice::new(tmpdir.path().join("tty"), tmpdir.path().join("tty"));
        assert!(matches!(
            acquire_from(true, &device),
            Acquired::Interactive(Terminal::Inherited(_))
        ));
    }

    #[test]
    fn test_unopenable_device_is_unavailable() {
        // A directory can be opened for reading on some platforms but never
        // for writing
        let tmpdir = tempfile::tempdir().unwrap();
        let device = TtyDevice::new(tmpdir.path(), tmpdir.path());
        assert!(matches!(
            acquire_from(false, &device),
            Acquired::Unavailable
        ));
    }

    #[test]
    fn test_device_channel() {
        let tmpdir = tempfile::tempdir().unwrap();
        let input = tmpdir.path().join("in");
        let output = tmpdir.path().join("out");
        std::fs::write(&input, "4\n").unwrap();
        std::fs::write(&output, "").unwrap();
        let device = TtyDevice::new(&input, &output);
        let Acquired::Interactive(mut term) = acquire_from(false, &device) else {
            panic!("device should have been opened");
        };
        assert!(matches!(term, Terminal::Device(_)));
        term.prompt("Shade (1-3): ").unwrap();
        assert_eq!(term.read_line().unwrap().as_deref(), Some("4\n"));
        drop(term);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Shade (1-3): ");
    }
}
