//! Compile-time configuration parameters for the MCPWM core.

/// PWM timer settings
pub mod pwm {
    /// Counter frequency applied when the caller requests none (40 kHz counter
    /// rate; up-down counting halves it to 20 kHz effective output)
    pub const DEFAULT_FREQUENCY_HZ: u32 = 40_000;

    /// Counter frequency ceiling for 3-phase outputs (50 kHz effective)
    pub const MAX_FREQUENCY_3PWM_HZ: u32 = 100_000;

    /// Counter frequency ceiling for 4-phase (stepper) outputs
    pub const MAX_FREQUENCY_4PWM_HZ: u32 = 100_000;

    /// Counter frequency ceiling for 6-phase complementary outputs; lower than
    /// the 3-/4-phase ceiling to leave margin for dead-time insertion
    pub const MAX_FREQUENCY_6PWM_HZ: u32 = 60_000;

    /// Settle time between timer programming and sync arming [µs]
    pub const SYNC_SETTLE_DELAY_US: u32 = 100_000;

    /// Width of each half of the sync trigger pulse [µs]
    pub const SYNC_PULSE_DELAY_US: u32 = 1_000;
}

/// Hall sensor settings
pub mod hall {
    /// Sector count of one electrical revolution (three 120-degree sensors)
    pub const SECTORS_PER_ELECTRIC_REV: u8 = 6;
}
