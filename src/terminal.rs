use std::fs::File;
use std::os::fd::AsFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};
use tracing::{debug, error};

use crate::error::{Error, Result};

/// A read may return with nothing at all.
pub const READ_MIN_BYTES: u8 = 0;

/// Longest a read blocks waiting for input, in tenths of a second.
pub const READ_TIMEOUT_DECISECONDS: u8 = 1;

/// Raw mode on a terminal for as long as this value lives. `Drop` restores
/// the captured configuration if [`RawMode::restore`] was never reached.
pub struct RawMode<F: AsFd> {
    fd: F,
    snapshot: Termios,
    restored: bool,
}

impl<F: AsFd> RawMode<F> {
    pub fn enable(fd: F) -> Result<Self> {
        let snapshot = termios::tcgetattr(fd.as_fd()).map_err(Error::GetAttr)?;
        debug!("captured terminal configuration");

        // From here on the guard owns the snapshot, so a failing switch still
        // gets the original written back when it drops.
        let guard = Self {
            fd,
            snapshot,
            restored: false,
        };
        let raw = raw_attributes(&guard.snapshot);
        termios::tcsetattr(guard.fd.as_fd(), SetArg::TCSAFLUSH, &raw)
            .map_err(Error::SetAttr)?;
        debug!(
            min = READ_MIN_BYTES,
            timeout_ds = READ_TIMEOUT_DECISECONDS,
            "raw mode enabled"
        );

        Ok(guard)
    }

    pub fn snapshot(&self) -> &Termios {
        &self.snapshot
    }

    /// Unbuffered handle on the same device, so every `read` is one read(2).
    pub fn input(&self) -> Result<File> {
        let fd = self.fd.as_fd().try_clone_to_owned().map_err(Error::Read)?;
        Ok(File::from(fd))
    }

    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.apply_snapshot()
    }

    fn apply_snapshot(&self) -> Result<()> {
        termios::tcsetattr(self.fd.as_fd(), SetArg::TCSAFLUSH, self.snapshot())
            .map_err(Error::SetAttr)?;
        debug!("terminal configuration restored");
        Ok(())
    }
}

impl<F: AsFd> Drop for RawMode<F> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = self.apply_snapshot() {
            error!("{err}");
        }
    }
}

pub fn raw_attributes(original: &Termios) -> Termios {
    let mut raw = original.clone();

    // Ctrl-S/Ctrl-Q, CR to NL, break to SIGINT, parity check, 8th bit strip.
    raw.input_flags &= !(InputFlags::BRKINT
        | InputFlags::ICRNL
        | InputFlags::INPCK
        | InputFlags::ISTRIP
        | InputFlags::IXON);
    raw.output_flags &= !OutputFlags::OPOST;
    raw.control_flags |= ControlFlags::CS8;
    // Echo, line buffering, Ctrl-C/Ctrl-Z signals, Ctrl-V.
    raw.local_flags &=
        !(LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::ISIG | LocalFlags::IEXTEN);

    raw.control_chars[SpecialCharacterIndices::VMIN as usize] = READ_MIN_BYTES;
    raw.control_chars[SpecialCharacterIndices::VTIME as usize] = READ_TIMEOUT_DECISECONDS;

    raw
}
