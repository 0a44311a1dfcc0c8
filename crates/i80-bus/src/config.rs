use heapless::Vec;

/// Widest data bus the hardware supports (8-, 16- or 24-line modes).
pub const MAX_DATA_LINES: usize = 24;

/// Fallback DMA transfer ceiling when the caller does not supply one.
pub const DEFAULT_MAX_TRANSFER: usize = 100_000;

/// Default pixel clock frequency in Hz.
pub const DEFAULT_PCLK_HZ: u32 = 20_000_000;

/// Depth of the hardware transmit queue.
pub const TRANS_QUEUE_DEPTH: usize = 10;

/// Clock source feeding the bus peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    #[default]
    Pll160M,
    Pll240M,
    Xtal,
}

/// Idle/command/dummy/data levels driven on the DC line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DcLevels {
    pub idle: bool,
    pub cmd: bool,
    pub dummy: bool,
    pub data: bool,
}

impl Default for DcLevels {
    fn default() -> Self {
        Self { idle: false, cmd: false, dummy: false, data: true }
    }
}

/// Physical bus configuration handed to [`I80Driver::create_bus`].
///
/// The bus width is the number of entries in `data_gpios`.
///
/// [`I80Driver::create_bus`]: crate::I80Driver::create_bus
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusConfig {
    pub clk_src: ClockSource,
    pub dc_gpio: i32,
    pub wr_gpio: i32,
    pub data_gpios: Vec<i32, MAX_DATA_LINES>,
    pub max_transfer_bytes: usize,
}

/// Panel interface configuration handed to [`I80Driver::create_io`].
///
/// [`I80Driver::create_io`]: crate::I80Driver::create_io
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoConfig {
    pub cs_gpio: i32,
    pub pclk_hz: u32,
    pub trans_queue_depth: usize,
    pub cmd_bits: u8,
    pub param_bits: u8,
    pub dc_levels: DcLevels,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            cs_gpio: -1,
            pclk_hz: DEFAULT_PCLK_HZ,
            trans_queue_depth: TRANS_QUEUE_DEPTH,
            cmd_bits: 8,
            param_bits: 8,
            dc_levels: DcLevels::default(),
        }
    }
}

/// Session-facing parameters for [`I80Bus::init`].
///
/// Only the pins are mandatory; `max_bytes` and `freq` fall back to
/// [`DEFAULT_MAX_TRANSFER`] and [`DEFAULT_PCLK_HZ`].
///
/// [`I80Bus::init`]: crate::I80Bus::init
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I80Config<'a> {
    /// Chip-select pin.
    pub cs: i32,
    /// Data/command select pin.
    pub dc: i32,
    /// Write-strobe pin.
    pub wr: i32,
    /// Data-line pins, in bus order; the count sets the bus width.
    pub data: &'a [i32],
    /// DMA transfer ceiling; `None` or `Some(0)` picks the fallback.
    pub max_bytes: Option<usize>,
    /// Pixel clock in Hz.
    pub freq: u32,
}

impl<'a> I80Config<'a> {
    pub fn new(cs: i32, dc: i32, wr: i32, data: &'a [i32]) -> Self {
        Self { cs, dc, wr, data, max_bytes: None, freq: DEFAULT_PCLK_HZ }
    }

    /// The effective DMA transfer ceiling.
    pub fn max_transfer(&self) -> usize {
        match self.max_bytes {
            Some(n) if n > 0 => n,
            _ => DEFAULT_MAX_TRANSFER,
        }
    }
}
