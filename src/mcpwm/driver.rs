//! Motor driver front end: registration, timer startup and duty-cycle writes
//! for the three motor interface kinds.
//!
//! Registration allocates a slot, routes the motor's pins to the slot's
//! output signals and arms the unit's timers. Duty writes resolve the slot by
//! the motor's registered primary pin on every call, so the registry stays
//! the single source of truth and no backreference is stored.

use crate::config;
use crate::hal::{McpwmBackend, PinId};
use crate::mcpwm::timer::{self, SUB_TIMERS};
use crate::mcpwm::{board, PwmError, SlotRegistry};

/// Phase pins of a 3-phase motor. `a` is the registration key.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThreePhasePins {
    pub a: PinId,
    pub b: PinId,
    pub c: PinId,
}

/// Coil pins of a 4-phase stepper motor. `coil1_a` is the registration key.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperPins {
    pub coil1_a: PinId,
    pub coil1_b: PinId,
    pub coil2_a: PinId,
    pub coil2_b: PinId,
}

/// High/low side pins of a 6-phase motor. `a_high` is the registration key.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SixPhasePins {
    pub a_high: PinId,
    pub a_low: PinId,
    pub b_high: PinId,
    pub b_low: PinId,
    pub c_high: PinId,
    pub c_low: PinId,
}

/// MCPWM motor driver over a platform backend.
pub struct McpwmDriver<B: McpwmBackend> {
    backend: B,
    registry: SlotRegistry,
}

impl<B: McpwmBackend> McpwmDriver<B> {
    pub fn new(backend: B) -> Self {
        Self { backend, registry: SlotRegistry::new() }
    }

    /// Slot registry view, for diagnostics
    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    /// Close the registration window once all motors are set up
    pub fn seal(&mut self) {
        self.registry.seal();
    }

    /// Register a 3-phase motor and start its PWM timers.
    ///
    /// `frequency_hz` is the desired output frequency; `None` or `Some(0)`
    /// selects the default.
    pub fn configure_three_phase(
        &mut self,
        frequency_hz: Option<u32>,
        pins: ThreePhasePins,
    ) -> Result<(), PwmError> {
        let applied = timer::applied_frequency(frequency_hz, config::pwm::MAX_FREQUENCY_3PWM_HZ);
        let index = self.registry.allocate_three_phase(pins.a)?;
        let slot = &board::THREE_PHASE_SLOTS[index];
        for (signal, pin) in slot.signals.iter().zip([pins.a, pins.b, pins.c]) {
            self.backend.route_signal(slot.unit, *signal, pin);
        }
        timer::configure_unit(&mut self.backend, slot.unit, applied, None);
        Ok(())
    }

    /// Register a 4-phase stepper motor and start its PWM timers.
    pub fn configure_stepper(
        &mut self,
        frequency_hz: Option<u32>,
        pins: StepperPins,
    ) -> Result<(), PwmError> {
        let applied = timer::applied_frequency(frequency_hz, config::pwm::MAX_FREQUENCY_4PWM_HZ);
        let index = self.registry.allocate_stepper(pins.coil1_a)?;
        let slot = &board::STEPPER_SLOTS[index];
        let pin_order = [pins.coil1_a, pins.coil1_b, pins.coil2_a, pins.coil2_b];
        for (signal, pin) in slot.signals.iter().zip(pin_order) {
            self.backend.route_signal(slot.unit, *signal, pin);
        }
        timer::configure_unit(&mut self.backend, slot.unit, applied, None);
        Ok(())
    }

    /// Register a 6-phase motor and start its PWM timers with complementary
    /// dead time.
    ///
    /// `dead_zone` is the fraction of each period reserved as dead time
    /// between a high-side switch turning off and its low-side complement
    /// turning on.
    pub fn configure_six_phase(
        &mut self,
        frequency_hz: Option<u32>,
        dead_zone: f32,
        pins: SixPhasePins,
    ) -> Result<(), PwmError> {
        let applied = timer::applied_frequency(frequency_hz, config::pwm::MAX_FREQUENCY_6PWM_HZ);
        let index = self.registry.allocate_six_phase(pins.a_high)?;
        let slot = &board::SIX_PHASE_SLOTS[index];
        let pin_order = [
            pins.a_high, pins.a_low, pins.b_high, pins.b_low, pins.c_high, pins.c_low,
        ];
        for (signal, pin) in slot.signals.iter().zip(pin_order) {
            self.backend.route_signal(slot.unit, *signal, pin);
        }
        timer::configure_unit(&mut self.backend, slot.unit, applied, Some(dead_zone));
        Ok(())
    }

    /// Write per-phase duty cycles (fractions in [0, 1]) for a 3-phase motor
    /// identified by its registered phase-A pin.
    pub fn write_three_phase(&mut self, pin_a: PinId, duty: [f32; 3]) -> Result<(), PwmError> {
        let index = self.registry.find_three_phase(pin_a).ok_or(PwmError::UnknownPin)?;
        let slot = &board::THREE_PHASE_SLOTS[index];
        for (timer, dc) in SUB_TIMERS.iter().zip(duty) {
            self.backend.set_duty(slot.unit, *timer, slot.operator, dc * 100.0);
        }
        Ok(())
    }

    /// Write per-coil duty cycles for a stepper motor identified by its
    /// registered coil-1A pin. Order: 1A, 1B, 2A, 2B.
    pub fn write_stepper(&mut self, pin_1a: PinId, duty: [f32; 4]) -> Result<(), PwmError> {
        let index = self.registry.find_stepper(pin_1a).ok_or(PwmError::UnknownPin)?;
        let slot = &board::STEPPER_SLOTS[index];
        let targets = [
            (SUB_TIMERS[0], slot.operators[0]),
            (SUB_TIMERS[1], slot.operators[0]),
            (SUB_TIMERS[0], slot.operators[1]),
            (SUB_TIMERS[1], slot.operators[1]),
        ];
        for ((timer, operator), dc) in targets.iter().zip(duty) {
            self.backend.set_duty(slot.unit, *timer, *operator, dc * 100.0);
        }
        Ok(())
    }

    /// Write per-phase duty cycles for a 6-phase motor identified by its
    /// registered phase-AH pin. Each phase duty is applied symmetrically to
    /// the high and low half of its complementary pair; the dead-time unit
    /// shapes the actual gate signals.
    pub fn write_six_phase(&mut self, pin_ah: PinId, duty: [f32; 3]) -> Result<(), PwmError> {
        let index = self.registry.find_six_phase(pin_ah).ok_or(PwmError::UnknownPin)?;
        let slot = &board::SIX_PHASE_SLOTS[index];
        for (timer, dc) in SUB_TIMERS.iter().zip(duty) {
            for operator in slot.operators {
                self.backend.set_duty(slot.unit, *timer, operator, dc * 100.0);
            }
        }
        Ok(())
    }
}
