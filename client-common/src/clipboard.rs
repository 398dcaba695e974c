use std::io::Write;

use data_encoding::BASE64;
use eyre::WrapErr;
use tracing::{debug, error};

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> eyre::Result<()>;
}

/// Sets the terminal's clipboard with an OSC 52 escape sequence.
pub struct Osc52<W: Write> {
    out: W,
}

impl<W: Write> Osc52<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52<W> {
    fn write_text(&mut self, text: &str) -> eyre::Result<()> {
        write!(self.out, "\x1b]52;c;{}\x07", BASE64.encode(text.as_bytes())).wrap_err("could not write to terminal")?;
        self.out.flush().wrap_err("could not write to terminal")
    }
}

/// Copies `text`, then reports the outcome to `callback`.
pub fn copy_to_clipboard<C, F>(clipboard: &mut C, text: &str, callback: F)
where
    C: Clipboard + ?Sized,
    F: FnOnce(eyre::Result<()>),
{
    let res = clipboard.write_text(text);
    match &res {
        Ok(()) => debug!(len = text.len(), "copied to clipboard"),
        Err(e) => error!("Could not copy text: {:#}", e),
    }
    callback(res)
}
