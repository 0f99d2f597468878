//! Serial port trait and error types.

/// Error type for serial operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SerialError {
    /// UART/communication I/O error.
    Io,
    /// Line could not be encoded (should not happen for valid descriptors).
    Encode,
}

impl core::fmt::Display for SerialError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io => write!(f, "serial I/O error"),
            Self::Encode => write!(f, "line encoding failed"),
        }
    }
}

/// Non-blocking byte-level serial link to the host.
///
/// The controller drains inbound bytes opportunistically and writes whole
/// lines, terminator included.
pub trait SerialPort {
    /// Take one received byte if one is already buffered.
    ///
    /// Returns `Ok(None)` when nothing is pending; never waits.
    fn read_byte(&mut self) -> Result<Option<u8>, SerialError>;

    /// Write all bytes of one outbound line.
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError>;
}

/// [`SerialPort`] adapter for any `embedded-io` UART.
///
/// Uses `ReadReady` to poll without blocking, which is how buffered HAL
/// UARTs expose "data available".
#[cfg(any(test, feature = "embedded-io"))]
pub struct IoSerial<T> {
    io: T,
}

#[cfg(any(test, feature = "embedded-io"))]
impl<T> IoSerial<T> {
    /// Wrap a UART.
    #[must_use]
    pub fn new(io: T) -> Self {
        Self { io }
    }

    /// Get a mutable reference to the wrapped UART.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.io
    }

    /// Unwrap the UART.
    pub fn into_inner(self) -> T {
        self.io
    }
}

#[cfg(any(test, feature = "embedded-io"))]
impl<T> SerialPort for IoSerial<T>
where
    T: embedded_io::Read + embedded_io::ReadReady + embedded_io::Write,
{
    fn read_byte(&mut self) -> Result<Option<u8>, SerialError> {
        if !self.io.read_ready().map_err(|_| SerialError::Io)? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match self.io.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(_) => Err(SerialError::Io),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SerialError> {
        self.io.write_all(bytes).map_err(|_| SerialError::Io)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    struct FakeUart {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
    }

    impl embedded_io::ErrorType for FakeUart {
        type Error = core::convert::Infallible;
    }

    impl embedded_io::Read for FakeUart {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let mut n = 0;
            while n < buf.len() {
                match self.rx.pop_front() {
                    Some(b) => buf[n] = b,
                    None => break,
                }
                n += 1;
            }
            Ok(n)
        }
    }

    impl embedded_io::ReadReady for FakeUart {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.rx.is_empty())
        }
    }

    impl embedded_io::Write for FakeUart {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.tx.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_io_serial_reads_one_byte_at_a_time() {
        let mut port = IoSerial::new(FakeUart {
            rx: VecDeque::from(std::vec![b'a', b'b']),
            tx: Vec::new(),
        });

        assert_eq!(port.read_byte(), Ok(Some(b'a')));
        assert_eq!(port.read_byte(), Ok(Some(b'b')));
        assert_eq!(port.read_byte(), Ok(None));
    }

    #[test]
    fn test_io_serial_writes_whole_line() {
        let mut port = IoSerial::new(FakeUart {
            rx: VecDeque::new(),
            tx: Vec::new(),
        });

        port.write_all(b"b1 1\r\n").unwrap();
        assert_eq!(port.into_inner().tx, b"b1 1\r\n");
    }

    #[test]
    fn test_io_serial_idle_when_nothing_ready() {
        let mut port = IoSerial::new(FakeUart {
            rx: VecDeque::new(),
            tx: Vec::new(),
        });
        assert_eq!(port.read_byte(), Ok(None));
        assert!(port.inner_mut().tx.is_empty());
    }

    struct NoInputs;

    impl crate::InputBank for NoInputs {
        fn slider_count(&self) -> usize {
            0
        }

        fn button_count(&self) -> usize {
            0
        }

        fn read_slider(&mut self, _index: usize) -> u16 {
            0
        }

        fn read_button_level(&mut self, _index: usize) -> bool {
            true
        }
    }

    #[test]
    fn test_io_serial_drives_controller() {
        let uart = FakeUart {
            rx: VecDeque::from(b"GET_CONFIG\r\n".to_vec()),
            tx: Vec::new(),
        };
        let descriptor = mixer_proto::DeviceDescriptor::new(0, 0);
        let mut ctl =
            crate::MixerController::new(NoInputs, IoSerial::new(uart), descriptor).unwrap();

        ctl.announce().unwrap();
        assert_eq!(ctl.tick(0).responses, 1);

        let (_, port) = ctl.into_parts();
        assert_eq!(
            port.into_inner().tx,
            b"DeskMixer Controller Ready\r\nCONFIG:SLIDERS:0:BUTTONS:0:SCREEN:0\r\n"
        );
    }
}
