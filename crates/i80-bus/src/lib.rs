#![no_std]
//! Slot-managed driver core for Intel 8080 style parallel LCD buses.
//!
//! A microcontroller has a small, fixed number of parallel-bus
//! peripherals, and each one carries two dependent hardware handles: the
//! bus itself and the panel interface layered on top of it. Both outlive
//! any host-language object heap — a soft reset of the host discards its
//! objects while the peripherals stay configured, so the handles must be
//! tracked somewhere that survives. [`BusTable`] is that place: a
//! process-lifetime registry of bus slots with an explicit
//! [`teardown_all`](BusTable::teardown_all) entry point the host calls
//! once on (re)start, before any session exists.
//!
//! [`I80Bus`] is the per-use session on top of the table: it claims a
//! slot, configures the bus and then the interface through an
//! [`I80Driver`], transmits command and color data, and releases the
//! slot in reverse creation order on deinit.

mod bus;
mod config;
mod driver;
mod error;
mod table;

pub use bus::I80Bus;
pub use config::{
    BusConfig, ClockSource, DcLevels, I80Config, IoConfig,
    DEFAULT_MAX_TRANSFER, DEFAULT_PCLK_HZ, MAX_DATA_LINES,
    TRANS_QUEUE_DEPTH,
};
pub use driver::I80Driver;
pub use error::BusError;
pub use table::{BusTable, SlotStatus};
