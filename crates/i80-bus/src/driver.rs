use crate::config::{BusConfig, IoConfig};

/// Abstracts the vendor driver for an 8080-style parallel LCD bus.
///
/// Implementors wrap the platform's LCD peripheral API: one call pair
/// creates and destroys the physical bus, another the panel interface
/// layered on it, and two transmit primitives push parameter bytes and
/// color data. The interface depends on the bus, so destruction must run
/// in reverse creation order; [`BusTable`](crate::BusTable) enforces
/// that ordering.
pub trait I80Driver {
    /// Opaque handle for a configured bus peripheral.
    type BusHandle;
    /// Opaque handle for a panel interface on top of one bus.
    type IoHandle;
    /// Error type surfaced verbatim from the vendor driver.
    type Error: core::fmt::Debug;

    /// Configure the physical bus.
    fn create_bus(
        &mut self,
        config: &BusConfig,
    ) -> Result<Self::BusHandle, Self::Error>;

    /// Configure a panel interface on an existing bus.
    fn create_io(
        &mut self,
        bus: &mut Self::BusHandle,
        config: &IoConfig,
    ) -> Result<Self::IoHandle, Self::Error>;

    /// Destroy a panel interface.
    ///
    /// On failure, returns the error **and** the handle so the caller
    /// still owns the interface and can retry.
    fn delete_io(
        &mut self,
        io: Self::IoHandle,
    ) -> Result<(), (Self::Error, Self::IoHandle)>;

    /// Destroy a bus. Must only be called once its interface is gone.
    ///
    /// On failure, returns the error **and** the handle so the caller
    /// still owns the bus and can retry.
    fn delete_bus(
        &mut self,
        bus: Self::BusHandle,
    ) -> Result<(), (Self::Error, Self::BusHandle)>;

    /// Transmit a command code followed by parameter bytes.
    fn tx_param(
        &mut self,
        io: &mut Self::IoHandle,
        cmd: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;

    /// Transmit a command code followed by color data.
    ///
    /// Distinct from [`tx_param`](I80Driver::tx_param): color transfers
    /// may use DMA and different timing on the wire.
    fn tx_color(
        &mut self,
        io: &mut Self::IoHandle,
        cmd: u8,
        data: &[u8],
    ) -> Result<(), Self::Error>;
}
