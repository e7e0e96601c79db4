//! 指标采样：周期读取 consciousness / coherence / health
//!
//! 读数成功时钳制到 [0,100] 并取整；指标源缺席、失败或读数非有限时改用平滑回退：
//! next = min(100, max(floor, prev) + rand[0, max_increment))，保证回退值只升不降。

use rand::Rng;

use crate::config::{GaugeTriple, VitalsSection};
use crate::core::state::VitalSigns;
use crate::core::QuantumError;
use crate::services::VitalReading;

#[derive(Debug, Clone)]
pub struct VitalsSampler {
    floor: GaugeTriple,
    max_increment: GaugeTriple,
}

fn clamp_round(value: f64) -> f64 {
    value.clamp(0.0, 100.0).round()
}

fn smoothed<R: Rng + ?Sized>(prev: f64, floor: f64, max_increment: f64, rng: &mut R) -> f64 {
    let step = if max_increment > 0.0 {
        rng.gen_range(0.0..max_increment)
    } else {
        0.0
    };
    (prev.max(floor) + step).min(100.0)
}

impl VitalsSampler {
    pub fn new(config: &VitalsSection) -> Self {
        Self {
            floor: config.floor,
            max_increment: config.max_increment,
        }
    }

    /// 校验读数；非有限值视为形状非法
    pub fn accept(reading: &VitalReading) -> Result<VitalSigns, QuantumError> {
        let values = [reading.consciousness, reading.coherence, reading.health];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(QuantumError::InvalidShape(format!(
                "non-finite vital reading {:?}",
                reading
            )));
        }
        Ok(VitalSigns {
            consciousness: clamp_round(reading.consciousness),
            coherence: clamp_round(reading.coherence),
            health: clamp_round(reading.health),
        })
    }

    pub fn fallback<R: Rng + ?Sized>(&self, prev: &VitalSigns, rng: &mut R) -> VitalSigns {
        VitalSigns {
            consciousness: smoothed(
                prev.consciousness,
                self.floor.consciousness,
                self.max_increment.consciousness,
                rng,
            ),
            coherence: smoothed(
                prev.coherence,
                self.floor.coherence,
                self.max_increment.coherence,
                rng,
            ),
            health: smoothed(prev.health, self.floor.health, self.max_increment.health, rng),
        }
    }

    /// 一次采样：读数可用则采用，否则回退
    pub fn tick<R: Rng + ?Sized>(
        &self,
        prev: &VitalSigns,
        reading: Option<VitalReading>,
        rng: &mut R,
    ) -> VitalSigns {
        match reading.map(|r| Self::accept(&r)) {
            Some(Ok(vitals)) => vitals,
            Some(Err(e)) => {
                tracing::warn!("Vital signs rejected ({}), using smoothed fallback", e);
                self.fallback(prev, rng)
            }
            None => self.fallback(prev, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sampler() -> VitalsSampler {
        VitalsSampler::new(&VitalsSection::default())
    }

    fn start() -> VitalSigns {
        VitalSigns {
            consciousness: 75.0,
            coherence: 85.0,
            health: 90.0,
        }
    }

    #[test]
    fn test_reading_is_clamped_and_rounded() {
        let v = sampler().tick(
            &start(),
            Some(VitalReading {
                consciousness: 120.0,
                coherence: -4.0,
                health: 67.6,
            }),
            &mut ChaCha8Rng::seed_from_u64(1),
        );
        assert_eq!(v.consciousness, 100.0);
        assert_eq!(v.coherence, 0.0);
        assert_eq!(v.health, 68.0);
    }

    #[test]
    fn test_fallback_monotonic_and_converges() {
        let s = sampler();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut v = start();
        for _ in 0..500 {
            let next = s.tick(&v, None, &mut rng);
            assert!(next.health >= v.health);
            assert!(next.health >= 85.0);
            assert!(next.health <= 100.0);
            v = next;
        }
        assert!(v.health > 99.0);
        assert!(v.consciousness > 99.0);
    }

    #[test]
    fn test_fallback_lifts_low_values_to_floor() {
        let low = VitalSigns {
            consciousness: 10.0,
            coherence: 0.0,
            health: 20.0,
        };
        let v = sampler().fallback(&low, &mut ChaCha8Rng::seed_from_u64(3));
        assert!(v.consciousness >= 75.0);
        assert!(v.coherence >= 80.0);
        assert!(v.health >= 85.0);
    }

    #[test]
    fn test_nan_reading_falls_back() {
        let v = sampler().tick(
            &start(),
            Some(VitalReading {
                consciousness: f64::NAN,
                coherence: 50.0,
                health: 50.0,
            }),
            &mut ChaCha8Rng::seed_from_u64(5),
        );
        assert!(v.health >= 90.0);
    }
}
