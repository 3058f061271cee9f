//! Error taxonomy for parameter validation.
//!
//! Every failure in this crate is a contract violation detected before any
//! numerical work or buffer mutation takes place. There is no transient error
//! class: callers fix the offending parameter and call again.
//!
//! Buffers are always passed as slices, so the "absent buffer" case cannot be
//! expressed and has no variant here.

use thiserror::Error;

/// Errors raised by designers, the convolution engine, the oversampler and
/// the channel multiplexer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DspError {
    /// A sampling rate was zero, negative or not a number.
    #[error("sampling rate '{param}' must be greater than 0 Hz, got {value}")]
    SamplingRate {
        /// Name of the offending parameter.
        param: &'static str,
        /// Value that was supplied.
        value: f64,
    },

    /// A frequency was outside `[0, limit]`.
    #[error("frequency '{param}' must lie in [0, {limit}] Hz, got {value}")]
    Frequency {
        /// Name of the offending parameter.
        param: &'static str,
        /// Value that was supplied.
        value: f64,
        /// Upper bound of the valid range (the sampling rate).
        limit: f64,
    },

    /// A length, offset, count or other shape parameter violated a required
    /// relationship.
    #[error("argument '{param}' is out of range: {reason}")]
    ArgumentRange {
        /// Name of the offending parameter.
        param: &'static str,
        /// Which relationship was violated.
        reason: &'static str,
    },
}

impl DspError {
    /// Create an [`ArgumentRange`](Self::ArgumentRange) error.
    pub fn range(param: &'static str, reason: &'static str) -> Self {
        DspError::ArgumentRange { param, reason }
    }

    /// Name of the parameter that caused the error.
    pub fn param(&self) -> &'static str {
        match self {
            Self::SamplingRate { param, .. }
            | Self::Frequency { param, .. }
            | Self::ArgumentRange { param, .. } => param,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DspError>;

/// Reject sampling rates that are not strictly positive.
pub(crate) fn check_sampling_rate(param: &'static str, value: f64) -> Result<()> {
    // NaN fails the comparison as well
    if value > 0.0 {
        Ok(())
    } else {
        Err(DspError::SamplingRate { param, value })
    }
}

/// Reject frequencies outside `[0, sampling_rate]`.
pub(crate) fn check_frequency(param: &'static str, value: f64, sampling_rate: f64) -> Result<()> {
    if (0.0..=sampling_rate).contains(&value) {
        Ok(())
    } else {
        Err(DspError::Frequency {
            param,
            value,
            limit: sampling_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_rate_rejects_zero_negative_and_nan() {
        assert!(check_sampling_rate("rate", 48000.0).is_ok());
        assert_eq!(
            check_sampling_rate("rate", 0.0),
            Err(DspError::SamplingRate {
                param: "rate",
                value: 0.0
            })
        );
        assert!(check_sampling_rate("rate", -1.0).is_err());
        assert!(check_sampling_rate("rate", f64::NAN).is_err());
    }

    #[test]
    fn frequency_bounds_are_inclusive() {
        assert!(check_frequency("f", 0.0, 100.0).is_ok());
        assert!(check_frequency("f", 100.0, 100.0).is_ok());
        assert!(check_frequency("f", -0.1, 100.0).is_err());
        assert!(check_frequency("f", 100.1, 100.0).is_err());
    }

    #[test]
    fn display_names_parameter_and_value() {
        let msg = DspError::Frequency {
            param: "frequencies",
            value: 50000.0,
            limit: 48000.0,
        }
        .to_string();
        assert!(msg.contains("frequencies"), "got: {msg}");
        assert!(msg.contains("50000"), "got: {msg}");

        let msg = DspError::range("left", "must be half the interleaved length").to_string();
        assert_eq!(
            msg,
            "argument 'left' is out of range: must be half the interleaved length"
        );
    }

    #[test]
    fn param_accessor() {
        assert_eq!(DspError::range("count", "too large").param(), "count");
        assert_eq!(
            DspError::SamplingRate {
                param: "sampling_rate",
                value: 0.0
            }
            .param(),
            "sampling_rate"
        );
    }
}
