//! Synthetic sample generation.

use chrono::SecondsFormat;
use tracing::debug;

use crate::sample::{Category, SamplePoint};
use crate::source::{Clock, RandSource, SystemClock, UniformSource};

/// Shape of the underlying signal: `sin(seq * frequency) * amplitude + baseline`,
/// plus noise uniformly spread over `noise_span`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waveform {
    pub frequency: f64,
    pub amplitude: f64,
    pub baseline: f64,
    pub noise_span: f64,
}

impl Default for Waveform {
    fn default() -> Self {
        Self {
            frequency: 0.1,
            amplitude: 50.0,
            baseline: 100.0,
            noise_span: 20.0,
        }
    }
}

impl Waveform {
    pub fn base(&self, sequence: u64) -> f64 {
        (sequence as f64 * self.frequency).sin() * self.amplitude + self.baseline
    }
}

/// Owns the sequence counter and the random/time sources.
///
/// Draw order per point: noise, metabolite count, confidence, category.
pub struct SampleGenerator {
    sequence: u64,
    waveform: Waveform,
    source: Box<dyn UniformSource + Send>,
    clock: Box<dyn Clock + Send>,
}

impl std::fmt::Debug for SampleGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleGenerator")
            .field("sequence", &self.sequence)
            .field("waveform", &self.waveform)
            .finish()
    }
}

impl SampleGenerator {
    pub fn new(
        source: impl UniformSource + Send + 'static,
        clock: impl Clock + Send + 'static,
    ) -> Self {
        Self {
            sequence: 0,
            waveform: Waveform::default(),
            source: Box::new(source),
            clock: Box::new(clock),
        }
    }

    /// OS-seeded randomness and the system clock.
    pub fn from_entropy() -> Self {
        Self::new(RandSource::from_entropy(), SystemClock)
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Sequence number of the most recently generated point (0 before the first).
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn generate(&mut self) -> SamplePoint {
        self.sequence += 1;
        let sequence = self.sequence;

        let base = self.waveform.base(sequence);
        let noise = (self.source.next_unit() - 0.5) * self.waveform.noise_span;
        let value = (base + noise).max(0.0);

        let metabolite_count = ((self.source.next_unit() * 50.0).floor() as u32).min(49) + 20;
        let confidence = self.source.next_unit() * 0.3 + 0.7;
        let category = Category::from_unit(self.source.next_unit());

        let timestamp = self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true);

        debug!(sequence, value, %category, "generated metabolome sample");

        SamplePoint {
            timestamp,
            sequence,
            value,
            metabolite_count,
            confidence,
            category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FixedClock, ScriptedUniform};
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap())
    }

    #[test]
    fn test_exact_output_for_scripted_draws() {
        // noise 0.75 -> +5, count 0.5 -> 45, confidence 0.5 -> 0.85, category 0.3 -> Amino Acids
        let mut gen = SampleGenerator::new(ScriptedUniform::new(vec![0.75, 0.5, 0.5, 0.3]), clock());
        let p = gen.generate();
        assert_eq!(p.sequence, 1);
        let expected = (0.1f64).sin() * 50.0 + 100.0 + 5.0;
        assert!((p.value - expected).abs() < 1e-9);
        assert_eq!(p.metabolite_count, 45);
        assert!((p.confidence - 0.85).abs() < 1e-12);
        assert_eq!(p.category, Category::AminoAcids);
        assert_eq!(p.timestamp, "2024-05-14T09:30:00.000Z");
    }

    #[test]
    fn test_sequence_increments_per_point() {
        let mut gen = SampleGenerator::new(ScriptedUniform::constant(0.5), clock());
        assert_eq!(gen.sequence(), 0);
        let seqs: Vec<u64> = (0..5).map(|_| gen.generate().sequence).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
        assert_eq!(gen.sequence(), 5);
    }

    #[test]
    fn test_negative_sum_clamps_to_zero() {
        // amplitude 200 drives the trough of the sinusoid well below zero
        let waveform = Waveform { amplitude: 200.0, ..Waveform::default() };
        let mut gen = SampleGenerator::new(ScriptedUniform::constant(0.0), clock())
            .with_waveform(waveform);
        let mut saw_clamp = false;
        for _ in 0..80 {
            let seq = gen.sequence() + 1;
            let raw = waveform.base(seq) - 0.5 * waveform.noise_span;
            let p = gen.generate();
            assert!(p.value >= 0.0);
            if raw < 0.0 {
                assert_eq!(p.value, 0.0);
                saw_clamp = true;
            }
        }
        assert!(saw_clamp, "waveform never went negative");
    }

    #[test]
    fn test_ranges_hold_at_extreme_draws() {
        for u in [0.0, 0.999_999] {
            let mut gen = SampleGenerator::new(ScriptedUniform::constant(u), clock());
            let p = gen.generate();
            assert!((20..=69).contains(&p.metabolite_count));
            assert!(p.confidence >= 0.7 && p.confidence < 1.0);
        }
    }

    #[test]
    fn test_random_points_respect_invariants() {
        let mut gen = SampleGenerator::new(RandSource::seeded(7), clock());
        for _ in 0..1_000 {
            let p = gen.generate();
            assert!(p.value >= 0.0);
            assert!((20..=69).contains(&p.metabolite_count));
            assert!((0.7..1.0).contains(&p.confidence));
        }
    }
}
