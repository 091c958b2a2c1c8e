//! Driver for the SSD1683-based 400x300 three-colour e-ink panel.
//!
//! [`Ssd1683`] is written against the `embedded-hal` traits so the command
//! stream can be checked on any host. [`open_panel`] wires it to the Linux
//! SPI and GPIO character devices on a Raspberry Pi and reports
//! `BackendUnavailable` everywhere else.

use std::fmt::Debug;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::{InputPin, OutputPin};
use inky_common::layout::{SURFACE_HEIGHT, SURFACE_WIDTH};
use inky_common::{InkyError, InkyResult};
use renderer::palette::{ACCENT_INDEX, BLACK_INDEX};
use renderer::IndexedFrame;
use tracing::{debug, info};

use crate::image_backend::PanelDevice;

/// SPI device the panel is attached to.
pub const SPI_DEVICE: &str = "/dev/spidev0.0";
/// SPI clock.
pub const SPI_SPEED_HZ: u32 = 488_000;
/// GPIO character device.
pub const GPIO_CHIP: &str = "/dev/gpiochip0";
pub const RESET_PIN: u32 = 27;
pub const BUSY_PIN: u32 = 17;
pub const DC_PIN: u32 = 22;

/// Device tree node naming the board model.
pub const MODEL_PATH: &str = "/sys/firmware/devicetree/base/model";

/// Longest transfer handed to the SPI driver in one call.
const SPI_CHUNK: usize = 4096;
/// Poll interval while the panel reports busy.
const BUSY_POLL_MS: u16 = 10;
/// A full three-colour refresh takes ~30s; give up well after that.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 60_000;

/// Controller commands.
pub mod cmd {
    pub const DEEP_SLEEP: u8 = 0x10;
    pub const DATA_ENTRY_MODE: u8 = 0x11;
    pub const SOFT_RESET: u8 = 0x12;
    pub const DRIVER_CONTROL: u8 = 0x01;
    pub const MASTER_ACTIVATE: u8 = 0x20;
    pub const DISPLAY_UPDATE_2: u8 = 0x22;
    pub const WRITE_BW_RAM: u8 = 0x24;
    pub const WRITE_ACCENT_RAM: u8 = 0x26;
    pub const WRITE_VCOM: u8 = 0x2C;
    pub const DUMMY_LINE_PERIOD: u8 = 0x3A;
    pub const GATE_LINE_WIDTH: u8 = 0x3B;
    pub const BORDER_WAVEFORM: u8 = 0x3C;
    pub const RAM_X_RANGE: u8 = 0x44;
    pub const RAM_Y_RANGE: u8 = 0x45;
    pub const RAM_X_COUNTER: u8 = 0x4E;
    pub const RAM_Y_COUNTER: u8 = 0x4F;
}

/// Update sequence loading the waveform from the controller's OTP.
const UPDATE_SEQUENCE_OTP: u8 = 0xF7;
/// Border follows the black/white RAM.
const BORDER_BLACK: u8 = 0x00;

fn hal_error<E: Debug>(what: &str) -> impl FnOnce(E) -> InkyError + '_ {
    move |e| InkyError::Io(format!("{}: {:?}", what, e))
}

/// SSD1683 controller on an SPI bus with data/command, reset and busy lines.
pub struct Ssd1683<SPI, DC, RST, BUSY, DELAY> {
    spi: SPI,
    dc: DC,
    reset: RST,
    busy: BUSY,
    delay: DELAY,
    width: u32,
    height: u32,
    busy_timeout_ms: u32,
}

impl<SPI, DC, RST, BUSY, DELAY> Ssd1683<SPI, DC, RST, BUSY, DELAY>
where
    SPI: Write<u8>,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
    RST: OutputPin,
    RST::Error: Debug,
    BUSY: InputPin,
    BUSY::Error: Debug,
    DELAY: DelayMs<u16>,
{
    pub fn new(spi: SPI, dc: DC, reset: RST, busy: BUSY, delay: DELAY) -> Self {
        Self {
            spi,
            dc,
            reset,
            busy,
            delay,
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn with_busy_timeout(mut self, timeout_ms: u32) -> Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Give the bus and pins back.
    pub fn release(self) -> (SPI, DC, RST, BUSY, DELAY) {
        (self.spi, self.dc, self.reset, self.busy, self.delay)
    }

    fn command(&mut self, command: u8, data: &[u8]) -> InkyResult<()> {
        self.dc.set_low().map_err(hal_error("dc pin"))?;
        self.spi.write(&[command]).map_err(hal_error("spi command"))?;
        if !data.is_empty() {
            self.dc.set_high().map_err(hal_error("dc pin"))?;
            for chunk in data.chunks(SPI_CHUNK) {
                self.spi.write(chunk).map_err(hal_error("spi data"))?;
            }
        }
        Ok(())
    }

    fn wait_busy(&mut self) -> InkyResult<()> {
        let mut waited: u32 = 0;
        while self.busy.is_high().map_err(hal_error("busy pin"))? {
            if waited >= self.busy_timeout_ms {
                return Err(InkyError::Io(format!(
                    "panel still busy after {}ms",
                    waited
                )));
            }
            self.delay.delay_ms(BUSY_POLL_MS);
            waited += u32::from(BUSY_POLL_MS);
        }
        Ok(())
    }

    fn hardware_reset(&mut self) -> InkyResult<()> {
        self.reset.set_low().map_err(hal_error("reset pin"))?;
        self.delay.delay_ms(100);
        self.reset.set_high().map_err(hal_error("reset pin"))?;
        self.delay.delay_ms(100);
        Ok(())
    }

    /// Reset the controller and program the panel geometry.
    pub fn init(&mut self) -> InkyResult<()> {
        let rows = (self.height - 1) as u16;
        let [rows_lo, rows_hi] = rows.to_le_bytes();
        let last_col = (self.width / 8 - 1) as u8;

        self.hardware_reset()?;
        self.command(cmd::SOFT_RESET, &[])?;
        self.wait_busy()?;

        self.command(cmd::DRIVER_CONTROL, &[rows_lo, rows_hi, 0x00])?;
        self.command(cmd::DUMMY_LINE_PERIOD, &[0x07])?;
        self.command(cmd::GATE_LINE_WIDTH, &[0x04])?;
        self.command(cmd::DATA_ENTRY_MODE, &[0x03])?;
        self.command(cmd::WRITE_VCOM, &[0x3C])?;
        self.command(cmd::BORDER_WAVEFORM, &[BORDER_BLACK])?;
        self.command(cmd::RAM_X_RANGE, &[0x00, last_col])?;
        self.command(cmd::RAM_Y_RANGE, &[0x00, 0x00, rows_lo, rows_hi])?;
        self.reset_counters()
    }

    fn reset_counters(&mut self) -> InkyResult<()> {
        self.command(cmd::RAM_X_COUNTER, &[0x00])?;
        self.command(cmd::RAM_Y_COUNTER, &[0x00, 0x00])
    }

    /// Upload both colour planes, refresh, then put the controller to sleep.
    pub fn display(&mut self, frame: &IndexedFrame) -> InkyResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(InkyError::invalid_parameter(
                "frame",
                format!(
                    "expected {}x{}, got {}x{}",
                    self.width, self.height, frame.width, frame.height
                ),
            ));
        }

        // Black/white RAM is inverted: a set bit is white.
        let bw = frame.pack_plane(|i| i != BLACK_INDEX);
        let accent = frame.pack_plane(|i| i == ACCENT_INDEX);

        self.init()?;
        self.command(cmd::WRITE_BW_RAM, &bw)?;
        self.reset_counters()?;
        self.command(cmd::WRITE_ACCENT_RAM, &accent)?;

        self.command(cmd::DISPLAY_UPDATE_2, &[UPDATE_SEQUENCE_OTP])?;
        self.command(cmd::MASTER_ACTIVATE, &[])?;
        self.wait_busy()?;
        self.command(cmd::DEEP_SLEEP, &[0x01])?;
        debug!(bytes = bw.len() + accent.len(), "Panel refreshed");
        Ok(())
    }
}

impl<SPI, DC, RST, BUSY, DELAY> PanelDevice for Ssd1683<SPI, DC, RST, BUSY, DELAY>
where
    SPI: Write<u8>,
    SPI::Error: Debug,
    DC: OutputPin,
    DC::Error: Debug,
    RST: OutputPin,
    RST::Error: Debug,
    BUSY: InputPin,
    BUSY::Error: Debug,
    DELAY: DelayMs<u16>,
{
    fn name(&self) -> &'static str {
        "inky"
    }

    fn show(&mut self, frame: &IndexedFrame) -> InkyResult<()> {
        self.display(frame)
    }
}

/// Whether a device tree model string names a Raspberry Pi.
pub fn model_is_raspberry_pi(model: &str) -> bool {
    model.to_ascii_lowercase().contains("raspberry pi")
}

/// Check the running board.
pub fn is_raspberry_pi() -> bool {
    std::fs::read_to_string(MODEL_PATH)
        .map(|model| model_is_raspberry_pi(model.trim_end_matches('\0')))
        .unwrap_or(false)
}

/// Open the panel attached to this machine.
pub fn open_panel() -> InkyResult<Box<dyn PanelDevice>> {
    if !is_raspberry_pi() {
        return Err(InkyError::BackendUnavailable(
            "the inky panel needs a Raspberry Pi".to_string(),
        ));
    }
    let panel = linux::open()?;
    info!(spi = SPI_DEVICE, "Inky panel opened");
    Ok(Box::new(panel))
}

#[cfg(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64")))]
mod linux {
    use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
    use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
    use linux_embedded_hal::{CdevPin, Delay, Spidev};

    use super::*;

    pub type LinuxPanel = Ssd1683<Spidev, CdevPin, CdevPin, CdevPin, Delay>;

    fn request(chip: &mut Chip, offset: u32, flags: LineRequestFlags, default: u8, label: &str) -> InkyResult<CdevPin> {
        let handle = chip
            .get_line(offset)
            .and_then(|line| line.request(flags, default, label))
            .map_err(hal_error(label))?;
        CdevPin::new(handle).map_err(hal_error(label))
    }

    pub fn open() -> InkyResult<LinuxPanel> {
        let mut spi = Spidev::open(SPI_DEVICE)?;
        let options = SpidevOptions::new()
            .bits_per_word(8)
            .max_speed_hz(SPI_SPEED_HZ)
            .mode(SpiModeFlags::SPI_MODE_0)
            .build();
        spi.configure(&options)?;

        let mut chip = Chip::new(GPIO_CHIP).map_err(hal_error("gpio chip"))?;
        let dc = request(&mut chip, DC_PIN, LineRequestFlags::OUTPUT, 0, "inky-dc")?;
        let reset = request(&mut chip, RESET_PIN, LineRequestFlags::OUTPUT, 1, "inky-reset")?;
        let busy = request(&mut chip, BUSY_PIN, LineRequestFlags::INPUT, 0, "inky-busy")?;

        Ok(Ssd1683::new(spi, dc, reset, busy, Delay))
    }
}

#[cfg(not(all(target_os = "linux", any(target_arch = "arm", target_arch = "aarch64"))))]
mod linux {
    use super::*;

    pub fn open() -> InkyResult<NoPanel> {
        Err(InkyError::BackendUnavailable(format!(
            "no SPI support built for this target (expected {})",
            SPI_DEVICE
        )))
    }

    pub struct NoPanel;

    impl PanelDevice for NoPanel {
        fn name(&self) -> &'static str {
            "inky"
        }

        fn show(&mut self, _frame: &IndexedFrame) -> InkyResult<()> {
            Err(InkyError::BackendUnavailable("inky".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_detection() {
        assert!(model_is_raspberry_pi("Raspberry Pi 4 Model B Rev 1.4"));
        assert!(model_is_raspberry_pi("raspberry pi zero 2 w"));
        assert!(!model_is_raspberry_pi("Pine64 RockPro64"));
        assert!(!model_is_raspberry_pi(""));
    }
}
