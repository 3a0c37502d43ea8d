//! Serial Bluetooth link (HC-style module on UART0, GP0/GP1, 115200 baud).
//!
//! The paired phone app sends short command strings terminated by `;` or a
//! newline. [`MessageAssembler`] folds raw link bytes into messages and is
//! hardware-free; [`Bluetooth`] feeds it from the buffered UART.

use heapless::Vec;

/// Capacity of one assembled message, terminator excluded.
pub const MESSAGE_CAPACITY: usize = 64;

/// One message from the Bluetooth link.
pub type BtMessage = Vec<u8, MESSAGE_CAPACITY>;

/// Accumulates raw link bytes into terminated messages.
///
/// Messages end at `;` or a newline; carriage returns are skipped. Bytes
/// past [`MESSAGE_CAPACITY`] are dropped, so an oversized message is still
/// delivered once its terminator arrives, truncated to capacity. The partial
/// message persists inside the assembler until its terminator shows up.
#[derive(Debug, Default)]
pub struct MessageAssembler {
    partial: BtMessage,
}

impl MessageAssembler {
    /// An assembler with no partial message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            partial: BtMessage::new(),
        }
    }

    /// Feed one byte; returns the completed message at a terminator.
    pub fn push_byte(&mut self, byte: u8) -> Option<BtMessage> {
        match byte {
            b';' | b'\n' => Some(core::mem::take(&mut self.partial)),
            b'\r' => None,
            other => {
                // Past capacity the byte is dropped, keeping what fit.
                let _ = self.partial.push(other);
                None
            }
        }
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod driver {
    use embassy_rp::uart::BufferedUart;
    use embedded_io_async::Read;

    use super::{BtMessage, MessageAssembler};
    use crate::Result;

    /// The Bluetooth serial link.
    ///
    /// # Examples
    /// ```no_run
    /// # use embassy_rp::uart::BufferedUart;
    /// # async fn example(uart: BufferedUart) -> picogo_kit::Result<()> {
    /// let mut bt = picogo_kit::Bluetooth::new(uart);
    /// let message = bt.read_message().await?;
    /// defmt::info!("bluetooth: {=[u8]:a}", message.as_slice());
    /// # Ok(())
    /// # }
    /// ```
    pub struct Bluetooth {
        uart: BufferedUart,
        assembler: MessageAssembler,
    }

    impl Bluetooth {
        /// Wrap a buffered UART connected to the Bluetooth module.
        #[must_use]
        pub fn new(uart: BufferedUart) -> Self {
            Self {
                uart,
                assembler: MessageAssembler::new(),
            }
        }

        /// Wait for the next `;`- or newline-terminated message.
        ///
        /// Cancellation-safe: the partial message lives in the driver, not in
        /// the future, so a call dropped mid-message (losing a `select` race,
        /// say) loses no bytes; the next call resumes where the last one
        /// stopped.
        ///
        /// # Errors
        /// Returns an error if the UART read fails.
        pub async fn read_message(&mut self) -> Result<BtMessage> {
            loop {
                let mut byte = [0_u8; 1];
                let n = self.uart.read(&mut byte).await?;
                if n == 0 {
                    continue;
                }
                if let Some(message) = self.assembler.push_byte(byte[0]) {
                    return Ok(message);
                }
            }
        }
    }
}

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use driver::Bluetooth;
