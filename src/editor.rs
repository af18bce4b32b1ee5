use std::io::{self, ErrorKind, Read, Write};

use tracing::{debug, trace};

use crate::error::{Error, Result};

pub const QUIT_BYTE: u8 = b'q';

pub struct Editor<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> Editor<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(b) = self.read_byte()? else {
                continue;
            };
            trace!(byte = b, "read");

            self.output
                .write_all(describe_byte(b).as_bytes())
                .and_then(|()| self.output.flush())
                .map_err(Error::Write)?;

            if b == QUIT_BYTE {
                debug!("quit requested");
                return Ok(());
            }
        }
    }

    // None on timeout.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(err) if is_no_data(&err) => Ok(None),
            Err(err) => Err(Error::Read(err)),
        }
    }
}

fn is_no_data(err: &io::Error) -> bool {
    matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted)
}

// Output post-processing is off, hence \r\n.
pub fn describe_byte(b: u8) -> String {
    if is_printable(b) {
        format!("{} ('{}')\r\n", b, b as char)
    } else {
        format!("{}\r\n", b)
    }
}

fn is_printable(b: u8) -> bool {
    b == b' ' || b.is_ascii_graphic()
}
