//! Volume control with logarithmic scaling
//!
//! Provides human-perceptual volume control using dB scaling.
//! The slider position is a linear value in [0, 1], mapped to -60 dB to 0 dB.

use tracing::warn;

/// Bottom of the dB range (slider just above zero)
const MIN_DB: f64 = -60.0;

/// Top of the dB range (unity gain)
const MAX_DB: f64 = 0.0;

/// Volume controller with logarithmic scaling
///
/// 0.0 = silence (explicit floor, the curve never reaches it),
/// just above 0.0 ≈ -60 dB, 1.0 = 0 dB (unity gain).
#[derive(Debug, Clone)]
pub struct Volume {
    /// Slider position (0.0-1.0)
    level: f64,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller
    ///
    /// # Arguments
    /// * `level` - Initial slider position, clamped to [0, 1]
    pub fn new(level: f64) -> Self {
        let mut volume = Self {
            level: 0.0,
            muted: false,
        };
        volume.set_level(level);
        volume
    }

    /// Set slider position, clamped to [0, 1]
    ///
    /// Returns false when the value was NaN and nothing changed.
    pub fn set_level(&mut self, level: f64) -> bool {
        if level.is_nan() {
            warn!("Ignoring NaN volume level");
            return false;
        }
        self.level = level.clamp(0.0, 1.0);
        true
    }

    /// Get current slider position (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Mute audio (preserves volume level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute audio (restores previous volume)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain for the current slider position, ignoring mute
    pub fn effective_gain(&self) -> f64 {
        Self::gain_for_level(self.level)
    }

    /// Gain actually sent to the output: 0.0 while muted
    pub fn output_gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.effective_gain()
        }
    }

    /// Apply output gain to audio buffer (in-place)
    pub fn apply(&self, buffer: &mut [f32]) {
        let gain = self.output_gain() as f32;

        if gain == 0.0 {
            buffer.fill(0.0);
        } else if gain != 1.0 {
            for sample in buffer.iter_mut() {
                *sample *= gain;
            }
        }
    }

    /// Convert slider position to linear gain
    ///
    /// Formula: db = -60 + 60 * level, gain = 10^(db/20)
    /// - 0.0  → 0.0 (hard floor)
    /// - 0.5  → -30 dB → 0.0316 gain
    /// - 0.8  → -12 dB → 0.251 gain (default)
    /// - 1.0  →   0 dB → 1.0 gain (unity)
    pub fn gain_for_level(level: f64) -> f64 {
        if level <= 0.0 {
            return 0.0;
        }

        let db = MIN_DB + (MAX_DB - MIN_DB) * level.min(1.0);
        10.0_f64.powf(db / 20.0)
    }

    /// Current output level in dB, -60 when silent or muted
    ///
    /// Useful for debugging and display
    pub fn to_db(&self) -> f64 {
        let gain = self.output_gain();
        if gain == 0.0 {
            MIN_DB
        } else {
            20.0 * gain.log10()
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8)
    }
}
