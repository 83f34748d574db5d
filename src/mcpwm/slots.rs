//! Slot registry: first-fit allocation of MCPWM hardware slots with
//! cross-interface exclusion.
//!
//! The three slot pools (3-phase, stepper, 6-phase) overlap on the same
//! physical units and operators, so allocating a slot for one interface kind
//! must block the colliding slots of the other two. Rather than writing
//! "taken" sentinels into sibling pools, exclusivity is tracked once in an
//! operator-claim map keyed by (unit, operator): a slot is allocatable only
//! while its own marker is empty and every operator its layout uses is
//! unclaimed.
//!
//! Registration is an initialization-time activity. The registry can be
//! sealed once setup completes, after which further registrations are
//! rejected; lookups stay available for the duty-write path.

use crate::fmt::*;
use crate::hal::{McpwmOperator, McpwmUnit, PinId};
use crate::mcpwm::board;
use crate::mcpwm::PwmError;

/// Claim map over the four (unit, operator) pairs of the chip
#[derive(Default)]
struct OperatorClaims {
    claimed: [[bool; 2]; 2],
}

impl OperatorClaims {
    fn unit_index(unit: McpwmUnit) -> usize {
        match unit {
            McpwmUnit::Unit0 => 0,
            McpwmUnit::Unit1 => 1,
        }
    }

    fn all_free(&self, unit: McpwmUnit, operators: &[McpwmOperator]) -> bool {
        operators
            .iter()
            .all(|op| !self.claimed[Self::unit_index(unit)][op.index()])
    }

    fn claim(&mut self, unit: McpwmUnit, operators: &[McpwmOperator]) {
        for op in operators {
            self.claimed[Self::unit_index(unit)][op.index()] = true;
        }
    }
}

/// Fixed pools of motor slots plus the shared operator-claim map.
///
/// All slots start empty; registration stores the motor's primary pin in the
/// first allocatable slot (first-fit, first-registered-wins, so hardware
/// assignment is determined by registration order alone).
pub struct SlotRegistry {
    three_phase: [Option<PinId>; board::THREE_PHASE_SLOTS.len()],
    stepper: [Option<PinId>; board::STEPPER_SLOTS.len()],
    six_phase: [Option<PinId>; board::SIX_PHASE_SLOTS.len()],
    claims: OperatorClaims,
    sealed: bool,
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotRegistry {
    pub const fn new() -> Self {
        Self {
            three_phase: [None; 4],
            stepper: [None; 2],
            six_phase: [None; 2],
            claims: OperatorClaims { claimed: [[false; 2]; 2] },
            sealed: false,
        }
    }

    /// Close the registration window. Registration mutates shared pool state
    /// and is only safe while setup is still single threaded; sealing turns
    /// that contract into a checked one.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Register a 3-phase motor by its phase-A pin.
    ///
    /// Returns the slot index, or `NoFreeSlot` when every slot is occupied or
    /// blocked by a stepper/6-phase motor on the same operator.
    pub fn allocate_three_phase(&mut self, pin_a: PinId) -> Result<usize, PwmError> {
        if self.sealed {
            return Err(PwmError::RegistrySealed);
        }
        for (index, slot) in board::THREE_PHASE_SLOTS.iter().enumerate() {
            if self.three_phase[index].is_none()
                && self.claims.all_free(slot.unit, &[slot.operator])
            {
                self.three_phase[index] = Some(pin_a);
                self.claims.claim(slot.unit, &[slot.operator]);
                info!("3PWM motor on pin {} -> slot {}", pin_a.0, index);
                return Ok(index);
            }
        }
        warn!("3PWM allocation failed for pin {}: no free slot", pin_a.0);
        Err(PwmError::NoFreeSlot)
    }

    /// Register a 4-phase stepper motor by its coil-1A pin.
    pub fn allocate_stepper(&mut self, pin_1a: PinId) -> Result<usize, PwmError> {
        if self.sealed {
            return Err(PwmError::RegistrySealed);
        }
        for (index, slot) in board::STEPPER_SLOTS.iter().enumerate() {
            if self.stepper[index].is_none() && self.claims.all_free(slot.unit, &slot.operators) {
                self.stepper[index] = Some(pin_1a);
                self.claims.claim(slot.unit, &slot.operators);
                info!("4PWM motor on pin {} -> slot {}", pin_1a.0, index);
                return Ok(index);
            }
        }
        warn!("4PWM allocation failed for pin {}: no free slot", pin_1a.0);
        Err(PwmError::NoFreeSlot)
    }

    /// Register a 6-phase motor by its phase-AH pin.
    pub fn allocate_six_phase(&mut self, pin_ah: PinId) -> Result<usize, PwmError> {
        if self.sealed {
            return Err(PwmError::RegistrySealed);
        }
        for (index, slot) in board::SIX_PHASE_SLOTS.iter().enumerate() {
            if self.six_phase[index].is_none() && self.claims.all_free(slot.unit, &slot.operators) {
                self.six_phase[index] = Some(pin_ah);
                self.claims.claim(slot.unit, &slot.operators);
                info!("6PWM motor on pin {} -> slot {}", pin_ah.0, index);
                return Ok(index);
            }
        }
        warn!("6PWM allocation failed for pin {}: no free slot", pin_ah.0);
        Err(PwmError::NoFreeSlot)
    }

    /// Find the slot registered for a 3-phase motor's phase-A pin
    pub fn find_three_phase(&self, pin_a: PinId) -> Option<usize> {
        self.three_phase.iter().position(|p| *p == Some(pin_a))
    }

    /// Find the slot registered for a stepper motor's coil-1A pin
    pub fn find_stepper(&self, pin_1a: PinId) -> Option<usize> {
        self.stepper.iter().position(|p| *p == Some(pin_1a))
    }

    /// Find the slot registered for a 6-phase motor's phase-AH pin
    pub fn find_six_phase(&self, pin_ah: PinId) -> Option<usize> {
        self.six_phase.iter().position(|p| *p == Some(pin_ah))
    }

    /// Registered primary pin of a 3-phase slot, if any
    pub fn three_phase_pin(&self, index: usize) -> Option<PinId> {
        self.three_phase.get(index).copied().flatten()
    }

    /// Registered primary pin of a stepper slot, if any
    pub fn stepper_pin(&self, index: usize) -> Option<PinId> {
        self.stepper.get(index).copied().flatten()
    }

    /// Registered primary pin of a 6-phase slot, if any
    pub fn six_phase_pin(&self, index: usize) -> Option<PinId> {
        self.six_phase.get(index).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(n: u8) -> PinId {
        PinId(n)
    }

    #[test]
    fn three_phase_first_fit_ascending_until_exhausted() {
        let mut reg = SlotRegistry::new();
        for expected in 0..4 {
            assert_eq!(reg.allocate_three_phase(pin(10 + expected as u8)), Ok(expected));
        }
        // Fifth registration on a four-slot pool fails
        assert_eq!(reg.allocate_three_phase(pin(40)), Err(PwmError::NoFreeSlot));
    }

    #[test]
    fn stepper_pool_holds_two() {
        let mut reg = SlotRegistry::new();
        assert_eq!(reg.allocate_stepper(pin(1)), Ok(0));
        assert_eq!(reg.allocate_stepper(pin(2)), Ok(1));
        assert_eq!(reg.allocate_stepper(pin(3)), Err(PwmError::NoFreeSlot));
    }

    #[test]
    fn six_phase_pool_holds_two() {
        let mut reg = SlotRegistry::new();
        assert_eq!(reg.allocate_six_phase(pin(1)), Ok(0));
        assert_eq!(reg.allocate_six_phase(pin(2)), Ok(1));
        assert_eq!(reg.allocate_six_phase(pin(3)), Err(PwmError::NoFreeSlot));
    }

    #[test]
    fn six_phase_blocks_colliding_unit_for_three_phase() {
        let mut reg = SlotRegistry::new();
        // 6-phase motor takes both operators of unit 0
        assert_eq!(reg.allocate_six_phase(pin(1)), Ok(0));
        // Both 3-phase registrations must land on unit 1 (slots 2 and 3)
        assert_eq!(reg.allocate_three_phase(pin(2)), Ok(2));
        assert_eq!(reg.allocate_three_phase(pin(3)), Ok(3));
        assert_eq!(reg.allocate_three_phase(pin(4)), Err(PwmError::NoFreeSlot));
    }

    #[test]
    fn three_phase_blocks_stepper_and_six_phase_on_same_unit() {
        let mut reg = SlotRegistry::new();
        // Operator A of unit 0
        assert_eq!(reg.allocate_three_phase(pin(1)), Ok(0));
        // Stepper and 6-phase need both operators of a unit; only unit 1 is left
        assert_eq!(reg.allocate_stepper(pin(2)), Ok(1));
        assert_eq!(reg.allocate_six_phase(pin(3)), Err(PwmError::NoFreeSlot));
    }

    #[test]
    fn stepper_blocks_both_three_phase_slots_of_its_unit() {
        let mut reg = SlotRegistry::new();
        assert_eq!(reg.allocate_stepper(pin(1)), Ok(0));
        // Slots 0 and 1 (unit 0) are blocked, allocation skips to unit 1
        assert_eq!(reg.allocate_three_phase(pin(2)), Ok(2));
        assert_eq!(reg.allocate_three_phase(pin(3)), Ok(3));
        assert_eq!(reg.allocate_three_phase(pin(4)), Err(PwmError::NoFreeSlot));
    }

    #[test]
    fn blocked_slots_stay_blocked_forever() {
        let mut reg = SlotRegistry::new();
        assert_eq!(reg.allocate_six_phase(pin(1)), Ok(0));
        // Exhaust the remaining unit, then retry the blocked one repeatedly
        assert_eq!(reg.allocate_stepper(pin(2)), Ok(1));
        for _ in 0..3 {
            assert_eq!(reg.allocate_three_phase(pin(9)), Err(PwmError::NoFreeSlot));
            assert_eq!(reg.allocate_six_phase(pin(9)), Err(PwmError::NoFreeSlot));
            assert_eq!(reg.allocate_stepper(pin(9)), Err(PwmError::NoFreeSlot));
        }
    }

    #[test]
    fn sealed_registry_rejects_registration_but_keeps_lookups() {
        let mut reg = SlotRegistry::new();
        assert_eq!(reg.allocate_three_phase(pin(7)), Ok(0));
        reg.seal();
        assert!(reg.is_sealed());
        assert_eq!(reg.allocate_three_phase(pin(8)), Err(PwmError::RegistrySealed));
        assert_eq!(reg.allocate_stepper(pin(8)), Err(PwmError::RegistrySealed));
        assert_eq!(reg.allocate_six_phase(pin(8)), Err(PwmError::RegistrySealed));
        assert_eq!(reg.find_three_phase(pin(7)), Some(0));
    }

    #[test]
    fn find_matches_registered_primary_pin_only() {
        let mut reg = SlotRegistry::new();
        assert_eq!(reg.allocate_three_phase(pin(21)), Ok(0));
        assert_eq!(reg.allocate_three_phase(pin(22)), Ok(1));
        assert_eq!(reg.find_three_phase(pin(22)), Some(1));
        assert_eq!(reg.find_three_phase(pin(23)), None);
        assert_eq!(reg.find_stepper(pin(21)), None);
    }
}
