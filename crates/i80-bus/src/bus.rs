use dma_blob::{AllocError, Blob, HeapCaps};
use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::Vec;

use crate::config::{BusConfig, I80Config, IoConfig};
use crate::driver::I80Driver;
use crate::error::BusError;
use crate::table::BusTable;

/// One session on an 8080-style parallel LCD bus.
///
/// A session owns the right to address one slot of a [`BusTable`], not
/// the slot's handles themselves; those stay in the table so they
/// survive the session being dropped without a
/// [`deinit`](I80Bus::deinit).
pub struct I80Bus<'a, M, D, A, const N: usize>
where
    M: RawMutex,
    D: I80Driver,
    A: HeapCaps,
{
    table: &'a BusTable<M, D, A, N>,
    slot: Option<usize>,
}

impl<'a, M, D, A, const N: usize> I80Bus<'a, M, D, A, N>
where
    M: RawMutex,
    D: I80Driver,
    A: HeapCaps + Clone,
{
    /// Create an unbound session. Performs no hardware I/O.
    pub fn new(table: &'a BusTable<M, D, A, N>) -> Self {
        Self { table, slot: None }
    }

    /// The slot this session is bound to, if any.
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    /// Claim a slot and configure the bus, then the panel interface.
    ///
    /// When no slot is free the session stays unbound. Once a slot is
    /// claimed the session is bound to it even if a hardware step fails,
    /// so the partially configured slot remains reclaimable through
    /// [`deinit`](I80Bus::deinit) — there are no automatic retries.
    pub fn init(
        &mut self,
        config: &I80Config<'_>,
    ) -> Result<(), BusError<D::Error>> {
        if self.slot.is_some() {
            return Err(BusError::AlreadyInitialized);
        }

        let data_gpios = Vec::from_slice(config.data)
            .map_err(|_| BusError::TooManyDataLines)?;
        let bus_config = BusConfig {
            clk_src: Default::default(),
            dc_gpio: config.dc,
            wr_gpio: config.wr,
            data_gpios,
            max_transfer_bytes: config.max_transfer(),
        };
        let io_config = IoConfig {
            cs_gpio: config.cs,
            pclk_hz: config.freq,
            ..IoConfig::default()
        };

        let slot = self.table.claim()?;
        self.slot = Some(slot);

        self.table.setup_bus(slot, &bus_config)?;
        self.table.setup_io(slot, &io_config)?;
        Ok(())
    }

    /// Tear down the bound slot and unbind.
    ///
    /// A no-op on an unbound session. On a driver failure the session
    /// stays bound so the caller can retry.
    pub fn deinit(&mut self) -> Result<(), BusError<D::Error>> {
        match self.slot {
            None => Ok(()),
            Some(slot) => {
                self.table.teardown(slot)?;
                self.slot = None;
                Ok(())
            }
        }
    }

    /// Allocate a DMA-capable buffer the bus hardware can read from.
    ///
    /// Independent of the slot binding; the session merely forwards to
    /// the table's allocator.
    pub fn malloc_dma(
        &self,
        size: usize,
        spiram: bool,
    ) -> Result<Blob<A>, AllocError> {
        self.table.alloc_dma(size, spiram)
    }

    /// Transmit a command code and its parameter bytes.
    pub fn write_cmd(
        &self,
        cmd: u8,
        params: &[u8],
    ) -> Result<(), BusError<D::Error>> {
        let slot = self.slot.ok_or(BusError::NotInitialized)?;
        self.table.with_io(slot, |driver, io| {
            driver.tx_param(io, cmd, params)
        })
    }

    /// Transmit a command code and color data.
    ///
    /// Uses the driver's color-transmit primitive, which may differ from
    /// parameter transmission in timing and DMA usage.
    pub fn write_color(
        &self,
        cmd: u8,
        pixels: &[u8],
    ) -> Result<(), BusError<D::Error>> {
        let slot = self.slot.ok_or(BusError::NotInitialized)?;
        self.table.with_io(slot, |driver, io| {
            driver.tx_color(io, cmd, pixels)
        })
    }
}
