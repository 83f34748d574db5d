//! Hardware-abstraction core for a BLDC/stepper motor-control stack.
//!
//! Two independent pieces live here:
//!
//! - **MCPWM resource management** (`mcpwm`): first-fit allocation of the
//!   chip's shared timer/operator slots across 3-phase, 4-phase stepper and
//!   6-phase complementary motor interfaces, timer frequency/dead-time
//!   programming with synchronized start, and duty-cycle writes keyed by the
//!   motor's registered pin.
//! - **Hall sensor estimation** (`hall_sensor`): a sector state machine fed
//!   by edge interrupts on three Hall channels, deriving rotor direction,
//!   multi-turn angle and a staleness-aware velocity estimate.
//!
//! The platform (GPIO, edge interrupts, MCPWM registers, delays) is reached
//! only through the capability traits in `hal`, implemented per board by the
//! firmware crate. Registration runs during single-threaded setup; edge
//! handling runs in interrupt context; angle/velocity queries and duty writes
//! run in the control loop.

#![no_std]

mod fmt;

pub mod config;
pub mod hal;
pub mod hall_sensor;
pub mod mcpwm;

pub use hal::{
    CountingMode, DutyMode, EdgeInterrupts, InputPins, McpwmBackend, McpwmOperator, McpwmSignal,
    McpwmTimer, McpwmUnit, PinId, Pull, TimerConfig,
};
pub use hall_sensor::{Direction, HallChannel, HallSensor, SectorObserver};
pub use mcpwm::{
    McpwmDriver, PwmError, SixPhasePins, SlotRegistry, StepperPins, ThreePhasePins,
};
