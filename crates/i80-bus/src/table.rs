use core::cell::RefCell;

use dma_blob::{AllocError, Blob, HeapCaps};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::config::{BusConfig, IoConfig};
use crate::driver::I80Driver;
use crate::error::BusError;

/// Externally visible state of one bus slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotStatus {
    /// No storage materialized; the slot is free.
    Vacant,
    /// Claimed by a session, no hardware configured yet.
    Claimed,
    /// Bus configured, panel interface not (yet, or it failed).
    BusOnly,
    /// Bus and panel interface both configured.
    Ready,
}

/// Per-slot lifecycle state.
///
/// The interface handle only exists alongside the bus handle it depends
/// on, so an interface without a bus is unrepresentable.
enum SlotState<D: I80Driver> {
    Vacant,
    Claimed,
    Bus(D::BusHandle),
    Ready(D::BusHandle, D::IoHandle),
}

struct Inner<D: I80Driver, const N: usize> {
    driver: D,
    slots: [SlotState<D>; N],
}

/// Fixed-capacity registry of the hardware's parallel-bus slots.
///
/// One table exists for the lifetime of the process and owns the vendor
/// driver plus the DMA allocator handle. Sessions
/// ([`I80Bus`](crate::I80Bus)) borrow the table and address slots by
/// index, so the hardware handles survive even when the host discards
/// its session objects; the host reclaims anything left over by calling
/// [`teardown_all`](BusTable::teardown_all) once on (re)start.
///
/// `N` is the number of bus peripherals the SoC has.
pub struct BusTable<M: RawMutex, D: I80Driver, A: HeapCaps, const N: usize> {
    alloc: A,
    inner: Mutex<M, RefCell<Inner<D, N>>>,
}

impl<M: RawMutex, D: I80Driver, A: HeapCaps, const N: usize>
    BusTable<M, D, A, N>
{
    /// Create a table with all slots vacant.
    pub const fn new(driver: D, alloc: A) -> Self {
        Self {
            alloc,
            inner: Mutex::new(RefCell::new(Inner {
                driver,
                slots: [const { SlotState::Vacant }; N],
            })),
        }
    }

    /// Claim the first vacant slot, materializing its storage.
    ///
    /// `Err(Exhausted)` when every slot is occupied — an ordinary
    /// outcome the caller is expected to handle, not a fault.
    pub fn claim(&self) -> Result<usize, BusError<D::Error>> {
        self.inner.lock(|cell| {
            let mut inner = cell.borrow_mut();
            for (id, slot) in inner.slots.iter_mut().enumerate() {
                if matches!(slot, SlotState::Vacant) {
                    *slot = SlotState::Claimed;
                    return Ok(id);
                }
            }
            Err(BusError::Exhausted)
        })
    }

    /// Tear down one slot in reverse creation order and vacate it.
    ///
    /// Empty slots and out-of-range ids succeed as no-ops. The interface
    /// is destroyed before the bus it depends on; each handle leaves the
    /// slot only after its own release succeeded, so a driver failure
    /// mid-sequence keeps the remaining handles in place and a retry
    /// resumes where this call stopped.
    pub fn teardown(&self, slot: usize) -> Result<(), BusError<D::Error>> {
        if slot >= N {
            return Ok(());
        }
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let Inner { driver, slots } = &mut *guard;

            match core::mem::replace(&mut slots[slot], SlotState::Vacant) {
                SlotState::Vacant | SlotState::Claimed => Ok(()),
                SlotState::Bus(bus) => match driver.delete_bus(bus) {
                    Ok(()) => Ok(()),
                    Err((err, bus)) => {
                        slots[slot] = SlotState::Bus(bus);
                        Err(BusError::Driver(err))
                    }
                },
                SlotState::Ready(bus, io) => {
                    let bus = match driver.delete_io(io) {
                        Ok(()) => bus,
                        Err((err, io)) => {
                            slots[slot] = SlotState::Ready(bus, io);
                            return Err(BusError::Driver(err));
                        }
                    };
                    match driver.delete_bus(bus) {
                        Ok(()) => Ok(()),
                        Err((err, bus)) => {
                            slots[slot] = SlotState::Bus(bus);
                            Err(BusError::Driver(err))
                        }
                    }
                }
            }
        })
    }

    /// Tear down every slot, stopping at the first driver failure.
    ///
    /// The host calls this once when it (re)initializes, before any
    /// session is created, to reclaim hardware a vanished session left
    /// open. A failure aborts the sweep; calling again resumes it.
    pub fn teardown_all(&self) -> Result<(), BusError<D::Error>> {
        for slot in 0..N {
            self.teardown(slot)?;
        }
        Ok(())
    }

    /// State of `slot`, or `None` for an out-of-range id.
    pub fn status(&self, slot: usize) -> Option<SlotStatus> {
        if slot >= N {
            return None;
        }
        self.inner.lock(|cell| {
            Some(match cell.borrow().slots[slot] {
                SlotState::Vacant => SlotStatus::Vacant,
                SlotState::Claimed => SlotStatus::Claimed,
                SlotState::Bus(_) => SlotStatus::BusOnly,
                SlotState::Ready(..) => SlotStatus::Ready,
            })
        })
    }

    /// Number of slots a `claim` could currently take.
    pub fn free_slots(&self) -> usize {
        self.inner.lock(|cell| {
            cell.borrow()
                .slots
                .iter()
                .filter(|slot| matches!(slot, SlotState::Vacant))
                .count()
        })
    }

    /// Allocate a DMA-capable buffer from the table's allocator.
    pub(crate) fn alloc_dma(
        &self,
        size: usize,
        spiram: bool,
    ) -> Result<Blob<A>, AllocError>
    where
        A: Clone,
    {
        Blob::new_dma(self.alloc.clone(), size, spiram)
    }

    /// Configure the physical bus on a claimed slot.
    pub(crate) fn setup_bus(
        &self,
        slot: usize,
        config: &BusConfig,
    ) -> Result<(), BusError<D::Error>> {
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let Inner { driver, slots } = &mut *guard;

            match slots[slot] {
                SlotState::Vacant | SlotState::Claimed => {}
                _ => return Err(BusError::AlreadyInitialized),
            }

            let bus = driver.create_bus(config).map_err(BusError::Driver)?;
            slots[slot] = SlotState::Bus(bus);
            Ok(())
        })
    }

    /// Configure the panel interface on a slot whose bus exists.
    pub(crate) fn setup_io(
        &self,
        slot: usize,
        config: &IoConfig,
    ) -> Result<(), BusError<D::Error>> {
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let Inner { driver, slots } = &mut *guard;

            let io = match &mut slots[slot] {
                SlotState::Vacant | SlotState::Claimed => {
                    return Err(BusError::NotInitialized)
                }
                SlotState::Ready(..) => {
                    return Err(BusError::AlreadyInitialized)
                }
                SlotState::Bus(bus) => {
                    driver.create_io(bus, config).map_err(BusError::Driver)?
                }
            };

            let SlotState::Bus(bus) =
                core::mem::replace(&mut slots[slot], SlotState::Claimed)
            else {
                unreachable!()
            };
            slots[slot] = SlotState::Ready(bus, io);
            Ok(())
        })
    }

    /// Run `f` against the driver and a ready slot's interface handle.
    pub(crate) fn with_io<R>(
        &self,
        slot: usize,
        f: impl FnOnce(&mut D, &mut D::IoHandle) -> Result<R, D::Error>,
    ) -> Result<R, BusError<D::Error>> {
        if slot >= N {
            return Err(BusError::NotInitialized);
        }
        self.inner.lock(|cell| {
            let mut guard = cell.borrow_mut();
            let Inner { driver, slots } = &mut *guard;

            match &mut slots[slot] {
                SlotState::Ready(_, io) => {
                    f(driver, io).map_err(BusError::Driver)
                }
                _ => Err(BusError::NotInitialized),
            }
        })
    }
}
