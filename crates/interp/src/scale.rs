// external crates
use serde::{Deserialize, Serialize};

/// Offset added inside the log-cosine transforms to guard `ln(0)`
///
/// Without it the processed value diverges at the physical bound of the
/// cosine domain.
pub const COSINE_NUDGE: f64 = 1e-10;

/// Highest cosine representable under the plain log-cosine transform
///
/// Angular distributions tabulated on a [`Scale::LogCos`] axis stop at this
/// cutoff; the forward-peaked remainder above it is carried analytically by
/// the coupled elastic distributions. [`Scale::NudgedLogCos`] shifts the
/// transform so the full domain up to `1.0` stays representable.
pub const CUTOFF_COSINE: f64 = 0.999999;

/// The processing transform applied to one grid axis
///
/// Interpolation happens in the processed space, so the choice of scale per
/// axis is what distinguishes lin-lin from log-log from log-cosine
/// interpolation. Processing and recovery are exact inverses:
///
/// ```rust
/// # use mcdist_interp::Scale;
/// let processed = Scale::Log.process(3.5);
/// let recovered = Scale::Log.recover(processed);
/// assert!((recovered - 3.5).abs() < 3.5 * 1e-15);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    /// Identity transform
    Lin,
    /// Natural logarithm, for positive quantities spanning decades
    Log,
    /// `ln(1 - value + nudge)` over cosines in `[-1, 0.999999]`
    LogCos,
    /// `ln(2 - value + nudge)` over cosines in `[-1, 1]`
    NudgedLogCos,
}

impl Scale {
    /// Transform a raw grid value into processed space
    pub fn process(&self, value: f64) -> f64 {
        match self {
            Scale::Lin => value,
            Scale::Log => value.ln(),
            Scale::LogCos => (1.0 - value + COSINE_NUDGE).ln(),
            Scale::NudgedLogCos => (2.0 - value + COSINE_NUDGE).ln(),
        }
    }

    /// Transform a processed value back to the raw grid value
    pub fn recover(&self, processed: f64) -> f64 {
        match self {
            Scale::Lin => processed,
            Scale::Log => processed.exp(),
            Scale::LogCos => 1.0 + COSINE_NUDGE - processed.exp(),
            Scale::NudgedLogCos => 2.0 + COSINE_NUDGE - processed.exp(),
        }
    }

    /// Is the value inside the domain this transform is defined over?
    ///
    /// ```rust
    /// # use mcdist_interp::Scale;
    /// assert!(Scale::NudgedLogCos.accepts(1.0));
    /// assert!(!Scale::LogCos.accepts(1.0));
    /// assert!(!Scale::Log.accepts(0.0));
    /// ```
    pub fn accepts(&self, value: f64) -> bool {
        match self {
            Scale::Lin => value.is_finite(),
            Scale::Log => value.is_finite() && value > 0.0,
            Scale::LogCos => (-1.0..=CUTOFF_COSINE).contains(&value),
            Scale::NudgedLogCos => (-1.0..=1.0).contains(&value),
        }
    }

    /// True for the cosine transforms, which decrease with the raw value
    pub fn is_cosine(&self) -> bool {
        matches!(self, Scale::LogCos | Scale::NudgedLogCos)
    }

    /// Conventional name used in scheme labels
    pub fn name(&self) -> &'static str {
        match self {
            Scale::Lin => "Lin",
            Scale::Log => "Log",
            Scale::LogCos => "LogCos",
            Scale::NudgedLogCos => "NudgedLogCos",
        }
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn process_recover_is_identity() {
        for value in [0.1, 1.0, 3.5, 1e5] {
            assert_relative_eq!(
                Scale::Log.recover(Scale::Log.process(value)),
                value,
                max_relative = 1e-14
            );
        }
        for cosine in [-1.0, -0.5, 0.0, 0.5, CUTOFF_COSINE] {
            let processed = Scale::LogCos.process(cosine);
            assert_relative_eq!(
                Scale::LogCos.recover(processed),
                cosine,
                epsilon = 1e-14,
                max_relative = 1e-14
            );
        }
        for cosine in [-1.0, 0.0, CUTOFF_COSINE, 1.0] {
            let processed = Scale::NudgedLogCos.process(cosine);
            assert_relative_eq!(
                Scale::NudgedLogCos.recover(processed),
                cosine,
                epsilon = 1e-14,
                max_relative = 1e-14
            );
        }
    }

    #[test]
    fn cosine_transforms_decrease_with_the_cosine() {
        assert!(Scale::LogCos.process(-1.0) > Scale::LogCos.process(0.0));
        assert!(Scale::NudgedLogCos.process(0.0) > Scale::NudgedLogCos.process(1.0));
    }

    #[test]
    fn forward_peak_needs_the_nudged_transform() {
        assert!(Scale::NudgedLogCos.accepts(1.0));
        assert!(Scale::NudgedLogCos.process(1.0).is_finite());
        assert!(!Scale::LogCos.accepts(1.0));
        assert!(Scale::LogCos.accepts(CUTOFF_COSINE));
    }

    #[test]
    fn domains_exclude_the_unphysical() {
        assert!(!Scale::Log.accepts(-2.0));
        assert!(!Scale::Lin.accepts(f64::NAN));
        assert!(!Scale::LogCos.accepts(-1.1));
        assert!(!Scale::NudgedLogCos.accepts(1.1));
    }
}
