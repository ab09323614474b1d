//! Diagnostic console trait.
//!
//! Line-oriented text output plus a single-byte input primitive. The
//! console is used only during interactive calibration and for the
//! serial-plotter view; the binary frame protocol never touches it.

/// Human-facing diagnostic channel.
pub trait Console {
    /// Write one line of text. The implementation appends the line
    /// terminator.
    fn write_line(&mut self, line: &str);

    /// Return the next pending input byte, or `None` if no byte is
    /// available. Never blocks.
    fn poll_byte(&mut self) -> Option<u8>;

    /// Discard all pending input bytes.
    fn drain_input(&mut self) {
        while self.poll_byte().is_some() {}
    }
}

/// Console that discards output and never produces input.
///
/// Use this when the sampler is constructed with a known-good
/// calibration table and no operator is attached.
pub struct NullConsole;

impl Console for NullConsole {
    fn write_line(&mut self, _line: &str) {}

    fn poll_byte(&mut self) -> Option<u8> {
        None
    }
}

/// Console over a blocking serial port.
///
/// Works with any port implementing the blocking `embedded-io` traits,
/// e.g. a buffered UART. The same port typically also carries the
/// binary frames; [`SerialConsole::port_mut`] hands it back out for
/// that.
#[cfg(feature = "embedded-io")]
pub struct SerialConsole<T> {
    port: T,
}

#[cfg(feature = "embedded-io")]
impl<T> SerialConsole<T>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    /// Wrap a serial port.
    pub fn new(port: T) -> Self {
        Self { port }
    }

    /// Access the underlying port, e.g. to emit frames on it.
    pub fn port_mut(&mut self) -> &mut T {
        &mut self.port
    }

    /// Release the underlying port.
    pub fn into_inner(self) -> T {
        self.port
    }
}

#[cfg(feature = "embedded-io")]
impl<T> Console for SerialConsole<T>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    fn write_line(&mut self, line: &str) {
        let _ = self.port.write_all(line.as_bytes());
        let _ = self.port.write_all(b"\r\n");
    }

    fn poll_byte(&mut self) -> Option<u8> {
        match self.port.read_ready() {
            Ok(true) => {
                let mut byte = [0u8; 1];
                match self.port.read(&mut byte) {
                    Ok(n) if n > 0 => Some(byte[0]),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
