//! Slot layout tables: which unit, operator(s) and output signals each motor
//! slot drives. This is static board wiring data consumed by the registry and
//! driver, not computed by them.
//!
//! Two units with three sub-timers and two operators each yield:
//! - four 3-phase slots (one operator of one unit each),
//! - two 4-phase stepper slots (both operators of one unit),
//! - two 6-phase slots (both operators of one unit, all three sub-timers).

use crate::hal::{McpwmOperator, McpwmSignal, McpwmUnit};

/// Hardware layout of a 3-phase slot: one operator across all three
/// sub-timers of a unit.
pub struct ThreePhaseSlot {
    pub unit: McpwmUnit,
    pub operator: McpwmOperator,
    /// Output routes for phases A, B, C
    pub signals: [McpwmSignal; 3],
}

/// Hardware layout of a 4-phase stepper slot: both operators of sub-timers
/// 0 and 1 of a unit.
pub struct StepperSlot {
    pub unit: McpwmUnit,
    pub operators: [McpwmOperator; 2],
    /// Output routes for coil outputs 1A, 1B, 2A, 2B
    pub signals: [McpwmSignal; 4],
}

/// Hardware layout of a 6-phase slot: both operators of all three sub-timers
/// of a unit, high side on operator A, low side on operator B.
pub struct SixPhaseSlot {
    pub unit: McpwmUnit,
    pub operators: [McpwmOperator; 2],
    /// Output routes for AH, AL, BH, BL, CH, CL
    pub signals: [McpwmSignal; 6],
}

use McpwmOperator::{OprA, OprB};
use McpwmSignal::{Pwm0A, Pwm0B, Pwm1A, Pwm1B, Pwm2A, Pwm2B};
use McpwmUnit::{Unit0, Unit1};

pub const THREE_PHASE_SLOTS: [ThreePhaseSlot; 4] = [
    // 1st motor: unit 0 channel A
    ThreePhaseSlot { unit: Unit0, operator: OprA, signals: [Pwm0A, Pwm1A, Pwm2A] },
    // 2nd motor: unit 0 channel B
    ThreePhaseSlot { unit: Unit0, operator: OprB, signals: [Pwm0B, Pwm1B, Pwm2B] },
    // 3rd motor: unit 1 channel A
    ThreePhaseSlot { unit: Unit1, operator: OprA, signals: [Pwm0A, Pwm1A, Pwm2A] },
    // 4th motor: unit 1 channel B
    ThreePhaseSlot { unit: Unit1, operator: OprB, signals: [Pwm0B, Pwm1B, Pwm2B] },
];

pub const STEPPER_SLOTS: [StepperSlot; 2] = [
    StepperSlot {
        unit: Unit0,
        operators: [OprA, OprB],
        signals: [Pwm0A, Pwm1A, Pwm0B, Pwm1B],
    },
    StepperSlot {
        unit: Unit1,
        operators: [OprA, OprB],
        signals: [Pwm0A, Pwm1A, Pwm0B, Pwm1B],
    },
];

pub const SIX_PHASE_SLOTS: [SixPhaseSlot; 2] = [
    SixPhaseSlot {
        unit: Unit0,
        operators: [OprA, OprB],
        signals: [Pwm0A, Pwm0B, Pwm1A, Pwm1B, Pwm2A, Pwm2B],
    },
    SixPhaseSlot {
        unit: Unit1,
        operators: [OprA, OprB],
        signals: [Pwm0A, Pwm0B, Pwm1A, Pwm1B, Pwm2A, Pwm2B],
    },
];
