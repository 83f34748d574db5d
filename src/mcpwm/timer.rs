//! Timer configuration: frequency normalization, dead-time conversion and
//! the synchronized start sequence for one MCPWM unit.

use crate::config;
use crate::fmt::*;
use crate::hal::{CountingMode, DutyMode, McpwmBackend, McpwmTimer, McpwmUnit, TimerConfig};

/// All three sub-timers of a unit, in programming order
pub(crate) const SUB_TIMERS: [McpwmTimer; 3] =
    [McpwmTimer::Timer0, McpwmTimer::Timer1, McpwmTimer::Timer2];

/// Normalize a requested output frequency into the counter frequency to
/// program.
///
/// An unset or zero request selects the fixed default. Otherwise the request
/// is doubled (the counter runs in up-down mode, which halves the effective
/// output frequency) and clamped to the interface kind's ceiling.
pub fn applied_frequency(requested_hz: Option<u32>, ceiling_hz: u32) -> u32 {
    match requested_hz {
        None | Some(0) => config::pwm::DEFAULT_FREQUENCY_HZ,
        Some(hz) => hz.saturating_mul(2).min(ceiling_hz),
    }
}

/// Convert a dead-zone fraction of the PWM period into an absolute dead time
/// in 100 ns hardware ticks.
pub fn dead_time_ticks(applied_hz: u32, dead_zone: f32) -> u32 {
    ((1e7 / applied_hz as f32) * dead_zone) as u32
}

/// Program all three sub-timers of a unit and start them phase aligned.
///
/// Counting mode (up-down) and duty mode (active high) are identical across
/// the sub-timers. When `dead_zone` is given, complementary dead time is
/// inserted symmetrically on rising and falling edges of every sub-timer.
///
/// The sub-timers must leave this function counting in lockstep: after a
/// settle delay, each is armed on the unit's sync trigger and a single pulse
/// restarts them together. Skipping the pulse leaves the counters skewed,
/// which corrupts the torque vector of a multi-phase motor.
pub fn configure_unit<B: McpwmBackend>(
    backend: &mut B,
    unit: McpwmUnit,
    frequency_hz: u32,
    dead_zone: Option<f32>,
) {
    let timer_config = TimerConfig {
        frequency_hz,
        counting_mode: CountingMode::UpDown,
        duty_mode: DutyMode::ActiveHigh,
    };
    for timer in SUB_TIMERS {
        backend.init_timer(unit, timer, &timer_config);
    }

    if let Some(zone) = dead_zone {
        let ticks = dead_time_ticks(frequency_hz, zone);
        for timer in SUB_TIMERS {
            backend.enable_complementary_dead_time(unit, timer, ticks, ticks);
        }
    }

    backend.delay_us(config::pwm::SYNC_SETTLE_DELAY_US);
    for timer in SUB_TIMERS {
        backend.arm_sync(unit, timer);
    }
    backend.delay_us(config::pwm::SYNC_PULSE_DELAY_US);
    backend.set_sync_output(unit, true);
    backend.delay_us(config::pwm::SYNC_PULSE_DELAY_US);
    backend.set_sync_output(unit, false);

    debug!("unit {} configured at {} Hz", unit, frequency_hz);
}
