//! Platform capability traits and hardware identifiers.
//!
//! The core never touches registers itself. Everything board- or
//! vendor-specific (GPIO reads, edge interrupt wiring, MCPWM register
//! programming) is reached through the traits in this module, implemented
//! once per board by the firmware crate. This keeps the allocation and
//! estimation logic host-testable.

/// GPIO pin identifier (chip pin number)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// Input pull configuration for sensor pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No internal pull; the board provides external pull-ups
    #[default]
    None,
    /// Internal pull-up
    Up,
}

/// MCPWM unit. The chip carries two independent units; each drives up to
/// three phases through its three sub-timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum McpwmUnit {
    Unit0,
    Unit1,
}

/// PWM operator within a unit. Each sub-timer feeds two operators (A and B),
/// which is what lets two 3-phase motors share one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum McpwmOperator {
    OprA,
    OprB,
}

impl McpwmOperator {
    pub(crate) fn index(self) -> usize {
        match self {
            McpwmOperator::OprA => 0,
            McpwmOperator::OprB => 1,
        }
    }
}

/// Sub-timer within a unit; three per unit, one per phase, present regardless
/// of how many phases a motor interface actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum McpwmTimer {
    Timer0,
    Timer1,
    Timer2,
}

/// Output signal route of one MCPWM unit (sub-timer x operator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum McpwmSignal {
    Pwm0A,
    Pwm0B,
    Pwm1A,
    Pwm1B,
    Pwm2A,
    Pwm2B,
}

/// Counter direction of a sub-timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CountingMode {
    /// Ramp up, reset, repeat (edge-aligned pulses)
    Up,
    /// Ramp up then down each period (center-aligned pulses at half the
    /// counter tick frequency)
    UpDown,
}

/// Active level of the generated duty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DutyMode {
    ActiveHigh,
    ActiveLow,
}

/// Settings applied identically to every sub-timer of a unit
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Counter tick frequency [Hz]
    pub frequency_hz: u32,
    pub counting_mode: CountingMode,
    pub duty_mode: DutyMode,
}

/// Digital input capability consumed by sensor initialization and edge
/// handling.
pub trait InputPins {
    /// Configure a pin as a digital input with the given pull
    fn configure_input(&mut self, pin: PinId, pull: Pull);

    /// Sample the current level of a pin
    fn read_level(&self, pin: PinId) -> bool;
}

/// External interrupt capability. Implementations route both edges of the pin
/// to the handler the firmware wires up for that channel.
pub trait EdgeInterrupts {
    /// Request both-edge triggers on a pin
    fn attach_any_edge(&mut self, pin: PinId);
}

/// MCPWM peripheral capability: the register-level operations the timer
/// configurator and duty writer issue. Implementations are expected to accept
/// every call; hardware-level faults are out of scope at this layer.
pub trait McpwmBackend {
    /// Route a unit's output signal to a physical pin
    fn route_signal(&mut self, unit: McpwmUnit, signal: McpwmSignal, pin: PinId);

    /// Program counting mode, duty mode and frequency into one sub-timer
    fn init_timer(&mut self, unit: McpwmUnit, timer: McpwmTimer, config: &TimerConfig);

    /// Enable active-high-complement output on a sub-timer with the given
    /// rising/falling dead time [100 ns ticks]
    fn enable_complementary_dead_time(
        &mut self,
        unit: McpwmUnit,
        timer: McpwmTimer,
        rising_ticks: u32,
        falling_ticks: u32,
    );

    /// Arm a sub-timer to restart its counting phase on the unit's internal
    /// sync trigger
    fn arm_sync(&mut self, unit: McpwmUnit, timer: McpwmTimer);

    /// Drive the unit's internal sync trigger line
    fn set_sync_output(&mut self, unit: McpwmUnit, active: bool);

    /// Write a duty percentage [0, 100] to one sub-timer/operator output
    fn set_duty(&mut self, unit: McpwmUnit, timer: McpwmTimer, operator: McpwmOperator, duty_pct: f32);

    /// Busy-wait for the given number of microseconds
    fn delay_us(&mut self, micros: u32);
}
