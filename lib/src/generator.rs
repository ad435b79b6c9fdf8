//! Random dragon parameters
//!
//! Every field is drawn independently from a fixed range, so the output is a
//! pure function of the supplied random source.

use crate::settings::DragonSettings;
use rand::Rng;
use std::f64::consts::TAU;
use std::ops::{Range, RangeInclusive};

pub const ANGLE_RANGE: Range<f64> = 0.0..TAU;
pub const SCALE_RANGE: Range<f64> = 0.5..0.9;
pub const SHIFT_RANGE: RangeInclusive<f64> = -1.0..=1.0;
pub const ITERATIONS_RANGE: RangeInclusive<u32> = 10_000..=100_000;

pub struct DragonSettingsGenerator<R> {
    rng: R,
}

impl<R: Rng> DragonSettingsGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn generate(&mut self) -> DragonSettings {
        DragonSettings {
            angle1: self.rng.random_range(ANGLE_RANGE),
            angle2: self.rng.random_range(ANGLE_RANGE),
            scale: self.rng.random_range(SCALE_RANGE),
            shift_x: self.rng.random_range(SHIFT_RANGE),
            shift_y: self.rng.random_range(SHIFT_RANGE),
            iterations_count: self.rng.random_range(ITERATIONS_RANGE),
        }
    }
}
