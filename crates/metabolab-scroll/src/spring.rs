//! Damped spring used to smooth raw scroll progress.

use metabolab_config::ScrollSettings;

/// Longest single integration step; larger frame deltas are sub-stepped.
const MAX_STEP_SECS: f64 = 1.0 / 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Distance from target under which the spring may settle.
    pub rest_delta: f64,
    /// Speed under which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

impl From<&ScrollSettings> for SpringConfig {
    fn from(s: &ScrollSettings) -> Self {
        Self {
            stiffness: s.stiffness,
            damping: s.damping,
            mass: s.mass,
            rest_delta: s.rest_delta,
            rest_speed: s.rest_speed,
        }
    }
}

impl SpringConfig {
    pub fn critical_damping(stiffness: f64, mass: f64) -> f64 {
        2.0 * (stiffness.max(0.0001) * mass.max(0.0001)).sqrt()
    }

    /// `damping / critical_damping`; at or above 1 the spring does not oscillate.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / Self::critical_damping(self.stiffness, self.mass)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Spring {
    value: f64,
    velocity: f64,
    target: f64,
    at_rest: bool,
    config: SpringConfig,
}

impl Spring {
    pub fn new(initial: f64, config: SpringConfig) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            target: initial,
            at_rest: true,
            config: SpringConfig {
                stiffness: config.stiffness.max(0.0001),
                damping: config.damping.max(0.0),
                mass: config.mass.max(0.0001),
                ..config
            },
        }
    }

    pub fn set_target(&mut self, target: f64) {
        if target != self.target {
            self.target = target;
            self.at_rest = false;
        }
    }

    /// Advance by `dt` seconds and return the new value.
    /// Non-positive and non-finite deltas leave the spring untouched.
    pub fn step(&mut self, dt: f64) -> f64 {
        if self.at_rest || !(dt > 0.0 && dt.is_finite()) {
            return self.value;
        }

        let steps = (dt / MAX_STEP_SECS).ceil().max(1.0) as usize;
        let h = dt / steps as f64;
        let SpringConfig { stiffness, damping, mass, rest_delta, rest_speed } = self.config;

        for _ in 0..steps {
            let acceleration =
                (stiffness * (self.target - self.value) - damping * self.velocity) / mass;
            self.velocity += acceleration * h;
            self.value += self.velocity * h;

            if (self.target - self.value).abs() < rest_delta && self.velocity.abs() < rest_speed {
                self.value = self.target;
                self.velocity = 0.0;
                self.at_rest = true;
                break;
            }
        }
        self.value
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Any non-decreasing target sequence under any frame timing gives a
        /// non-decreasing output that settles on the last target.
        #[test]
        fn test_monotone_targets_give_monotone_output(
            frames in prop::collection::vec((0.0f64..0.05, 1.0f64..40.0), 1..240),
        ) {
            let mut spring = Spring::new(0.0, SpringConfig::default());
            let mut target = 0.0f64;
            let mut prev = spring.value();

            for (rise, dt_ms) in frames {
                target = (target + rise).min(1.0);
                spring.set_target(target);
                let value = spring.step(dt_ms / 1000.0);
                prop_assert!(value >= prev - 1e-9, "decreased: {} -> {}", prev, value);
                prop_assert!(value <= target + 1e-3, "overshoot: {} past {}", value, target);
                prev = value;
            }

            for _ in 0..600 {
                let value = spring.step(1.0 / 60.0);
                prop_assert!(value >= prev - 1e-9);
                prev = value;
            }
            prop_assert!((spring.value() - target).abs() <= 0.001);
        }
    }
}
