// Hall sensor processing for rotor position and speed estimation
// Three digital Hall channels sampled on edge interrupts drive a sector state
// machine; angle and velocity are derived from sector index, rotation count
// and edge timing

use core::f32::consts::TAU;

use embassy_time::{Duration, Instant};

use crate::config;
use crate::fmt::*;
use crate::hal::{EdgeInterrupts, InputPins, PinId, Pull};

/// Sector lookup table
/// Maps the raw 3-bit Hall code (C + B<<1 + A<<2) to an electrical sector
/// 0-5, or -1 for the two codes (0b000, 0b111) that three 120-degree sensors
/// can never produce.
/// Valid rotation sequence: 4 -> 6 -> 2 -> 3 -> 1 -> 5 -> 4 (one electrical
/// revolution).
const ELECTRIC_SECTORS: [i8; 8] = [
    -1, // 0b000: invalid
    4,  // 0b001
    2,  // 0b010
    3,  // 0b011
    0,  // 0b100
    5,  // 0b101
    1,  // 0b110
    -1, // 0b111: invalid
];

/// Rotation direction. `Clockwise` is the motor's defined positive rotation;
/// the sensor's `natural_direction` calibration constant corrects for wiring
/// orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise = 1,
    CounterClockwise = -1,
}

impl Direction {
    pub fn sign(self) -> i32 {
        self as i32
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Hall input channel. The raw code packs the channel levels as
/// C + B<<1 + A<<2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HallChannel {
    A = 0,
    B = 1,
    C = 2,
}

/// Notification hook invoked synchronously from the edge-handling path when
/// the sector changes. Runs in the same timing-constrained context as the
/// estimator and must not block.
pub trait SectorObserver {
    fn on_sector_changed(&mut self, sector: u8);
}

/// No-op observer
impl SectorObserver for () {
    fn on_sector_changed(&mut self, _sector: u8) {}
}

/// Hall sensor state machine for rotor sector, direction, angle and velocity.
///
/// Edge handling (`handle_edge`) is expected to run from interrupt context;
/// queries (`angle`, `velocity`) run from the control loop. The struct uses
/// no locking: fields are written only by the edge path and read by the
/// control loop, which re-samples frequently enough that brief staleness is
/// acceptable.
pub struct HallSensor<O = ()> {
    /// Input pins for channels A, B, C (immutable after construction)
    pins: [PinId; 3],
    /// Input pull applied during `init`; external pull-ups by default
    pull: Pull,
    pole_pairs: u8,
    /// Counts per mechanical revolution: 6 sectors per electrical revolution
    /// times pole pairs
    cpr: i32,
    natural_direction: Direction,

    /// Last observed level per channel
    levels: [bool; 3],
    /// Raw 3-bit Hall code derived from `levels`
    raw_state: u8,
    /// Current electrical sector (0-5); retained across invalid codes
    sector: i8,
    direction: Direction,
    /// Direction at the previous edge, for reversal detection
    prev_direction: Direction,
    /// Signed electrical revolution count in raw sector order; moves by
    /// exactly one per sector wraparound
    rotation_count: i32,
    /// Timestamp of the last handled valid edge
    last_pulse: Instant,
    /// Time between the last two same-direction edges; zero after a reversal
    pulse_interval: Duration,
    /// Diagnostic count of all observed edges, including invalid codes
    total_edges: u32,

    observer: O,
}

impl HallSensor<()> {
    /// Create a sensor without a sector observer.
    ///
    /// # Arguments
    /// * `pins` - input pins for channels A, B, C
    /// * `pole_pairs` - motor pole pairs (must be positive)
    /// * `natural_direction` - calibration constant for wiring orientation
    pub fn new(pins: [PinId; 3], pole_pairs: u8, natural_direction: Direction) -> Self {
        Self::with_observer(pins, pole_pairs, natural_direction, ())
    }
}

impl<O: SectorObserver> HallSensor<O> {
    /// Create a sensor with a sector-change observer.
    pub fn with_observer(
        pins: [PinId; 3],
        pole_pairs: u8,
        natural_direction: Direction,
        observer: O,
    ) -> Self {
        debug_assert!(pole_pairs > 0);
        Self {
            pins,
            pull: Pull::None,
            pole_pairs,
            cpr: pole_pairs as i32 * config::hall::SECTORS_PER_ELECTRIC_REV as i32,
            natural_direction,
            levels: [false; 3],
            raw_state: 0,
            sector: 0,
            direction: Direction::Clockwise,
            prev_direction: Direction::Clockwise,
            rotation_count: 0,
            last_pulse: Instant::from_ticks(0),
            pulse_interval: Duration::from_ticks(0),
            total_edges: 0,
            observer,
        }
    }

    /// Select the input pull applied by `init`
    pub fn set_pull(&mut self, pull: Pull) {
        self.pull = pull;
    }

    /// Configure the input pins and prime the state from the current line
    /// levels.
    pub fn init(&mut self, gpio: &mut impl InputPins, now: Instant) {
        for pin in self.pins {
            gpio.configure_input(pin, self.pull);
        }
        for channel in [HallChannel::A, HallChannel::B, HallChannel::C] {
            self.levels[channel as usize] = gpio.read_level(self.pins[channel as usize]);
        }
        self.raw_state = Self::pack(self.levels);
        let sector = ELECTRIC_SECTORS[self.raw_state as usize];
        if sector >= 0 {
            self.sector = sector;
        }
        self.last_pulse = now;
    }

    /// Request both-edge triggers on the three channels. The platform routes
    /// each pin's interrupt to a call of `handle_edge` for that channel.
    pub fn enable_interrupts(&mut self, exti: &mut impl EdgeInterrupts) {
        for pin in self.pins {
            exti.attach_any_edge(pin);
        }
    }

    /// Edge handler for one channel. Re-reads the channel level and runs a
    /// full state update; call from the pin's interrupt with the current
    /// time.
    pub fn handle_edge(&mut self, channel: HallChannel, gpio: &impl InputPins, now: Instant) {
        let index = channel as usize;
        self.levels[index] = gpio.read_level(self.pins[index]);
        self.update_state(now);
    }

    fn pack(levels: [bool; 3]) -> u8 {
        (levels[2] as u8) | ((levels[1] as u8) << 1) | ((levels[0] as u8) << 2)
    }

    /// Updates sector, direction, rotation count and pulse timing following
    /// an edge.
    fn update_state(&mut self, now: Instant) {
        self.total_edges = self.total_edges.wrapping_add(1);
        self.raw_state = Self::pack(self.levels);
        let new_sector = ELECTRIC_SECTORS[self.raw_state as usize];
        if new_sector < 0 {
            // Transient glitch; hold the last valid sector
            trace!("invalid hall code {}", self.raw_state);
            return;
        }

        // Only adjacent-sector steps are physically possible, so an apparent
        // jump beyond +-3 must be an index wraparound, not a skip.
        let delta = (new_sector - self.sector) as i32;
        if delta > 3 {
            // Wrapped 0 -> 5: one raw revolution backward
            self.direction = self.natural_direction.reversed();
            self.rotation_count -= 1;
        } else if delta < -3 {
            // Wrapped 5 -> 0: one raw revolution forward
            self.direction = self.natural_direction;
            self.rotation_count += 1;
        } else {
            self.direction = if new_sector > self.sector {
                self.natural_direction
            } else {
                self.natural_direction.reversed()
            };
        }
        self.sector = new_sector;

        if self.direction == self.prev_direction {
            self.pulse_interval = now - self.last_pulse;
        } else {
            // A reversal mixes half-periods of both directions; the interval
            // is useless for the frequency estimate
            self.pulse_interval = Duration::from_ticks(0);
        }
        self.last_pulse = now;
        self.prev_direction = self.direction;

        self.observer.on_sector_changed(new_sector as u8);
    }

    /// Shaft angle [rad]. Monotonic while direction is constant; re-anchored
    /// by `init_relative_zero`.
    pub fn angle(&self) -> f32 {
        self.natural_direction.sign() as f32
            * ((self.rotation_count * 6 + self.sector as i32) as f32 / self.cpr as f32)
            * TAU
    }

    /// Shaft velocity [rad/s] using mixed time and frequency measurement.
    ///
    /// Reports zero when no interval is available, or when more time has
    /// passed since the last edge than the interval itself: the shaft stopped
    /// or slowed drastically and the old estimate would be frozen and too
    /// high.
    pub fn velocity(&self, now: Instant) -> f32 {
        if self.pulse_interval.as_ticks() == 0 || (now - self.last_pulse) > self.pulse_interval {
            return 0.0;
        }
        let interval_s = self.pulse_interval.as_micros() as f32 / 1_000_000.0;
        self.direction.sign() as f32 * (TAU / self.cpr as f32) / interval_s
    }

    /// This sensor type has no index channel: no search is needed to find an
    /// absolute zero.
    pub fn needs_absolute_zero_search(&self) -> bool {
        false
    }

    /// The sector is absolute within one electrical revolution.
    pub fn has_absolute_zero(&self) -> bool {
        true
    }

    /// Take the current position as the new zero reference. The sector is
    /// absolute within a revolution and stays untouched; only the rotation
    /// count is cleared. Returns the angle correction applied (always zero).
    pub fn init_relative_zero(&mut self) -> f32 {
        self.rotation_count = 0;
        0.0
    }

    /// Align to the absolute zero. A Hall sensor cannot move its zero; the
    /// returned value is the negated current angle for the caller to use as
    /// an offset.
    pub fn init_absolute_zero(&mut self) -> f32 {
        -self.angle()
    }

    pub fn sector(&self) -> u8 {
        self.sector as u8
    }

    pub fn raw_state(&self) -> u8 {
        self.raw_state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rotation_count(&self) -> i32 {
        self.rotation_count
    }

    pub fn total_edges(&self) -> u32 {
        self.total_edges
    }

    pub fn pole_pairs(&self) -> u8 {
        self.pole_pairs
    }

    pub fn counts_per_revolution(&self) -> u16 {
        self.cpr as u16
    }
}
