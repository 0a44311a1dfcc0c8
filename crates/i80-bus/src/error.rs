/// Errors surfaced by the bus table and sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E: core::fmt::Debug> {
    /// Every slot in the bus table is occupied.
    Exhausted,
    /// More data-line pins were supplied than the bus hardware has.
    TooManyDataLines,
    /// The operation needs a configured bus and panel interface.
    NotInitialized,
    /// The session is already bound to a bus slot.
    AlreadyInitialized,
    /// The bus driver rejected the operation.
    Driver(E),
}

impl<E: core::fmt::Debug + core::fmt::Display> core::fmt::Display
    for BusError<E>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BusError::Exhausted => write!(f, "no free bus slot"),
            BusError::TooManyDataLines => {
                write!(f, "too many data-line pins")
            }
            BusError::NotInitialized => write!(f, "bus not initialized"),
            BusError::AlreadyInitialized => {
                write!(f, "bus already initialized")
            }
            BusError::Driver(err) => write!(f, "bus driver error: {}", err),
        }
    }
}
