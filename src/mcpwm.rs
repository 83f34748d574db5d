// MCPWM resource management module
// Slot allocation, timer configuration and duty-cycle writes for the three
// motor interface kinds sharing the chip's two MCPWM units

pub mod board;
pub mod driver;
pub mod slots;
pub mod timer;

// Re-export main types for easier access
pub use driver::{McpwmDriver, SixPhasePins, StepperPins, ThreePhasePins};
pub use slots::SlotRegistry;
pub use timer::{applied_frequency, dead_time_ticks};

/// Errors surfaced by slot allocation and duty-cycle writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Every slot of the requested interface kind is occupied or blocked by a
    /// motor on a colliding unit/operator. The motor stays unconfigured.
    NoFreeSlot,
    /// The registration window was sealed; motors register during setup only
    RegistrySealed,
    /// No registered motor matches the given pin
    UnknownPin,
}
