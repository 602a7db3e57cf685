//! Price a single leg from the weight carried and the distance travelled.
//!
//! A leg is billed at a flat rate per unit of distance. Cargo heavier than the
//! free allowance adds a surcharge per started block of excess weight, so
//! `5.01` units over a `5` unit allowance bills one whole block.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How legs travelled without cargo are billed.
///
/// # Examples
/// ```
/// use courier_core::EmptyLegPolicy;
///
/// assert_eq!("free".parse::<EmptyLegPolicy>(), Ok(EmptyLegPolicy::Free));
/// assert_eq!(EmptyLegPolicy::default(), EmptyLegPolicy::Charged);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyLegPolicy {
    /// Empty legs pay the base distance rate.
    #[default]
    Charged,
    /// Empty legs cost nothing.
    Free,
}

impl EmptyLegPolicy {
    /// Return the policy as its configuration keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Charged => "charged",
            Self::Free => "free",
        }
    }
}

impl std::fmt::Display for EmptyLegPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmptyLegPolicy {
    type Err = CostModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "charged" => Ok(Self::Charged),
            "free" => Ok(Self::Free),
            _ => Err(CostModelError::UnknownEmptyLegPolicy(s.to_owned())),
        }
    }
}

/// Errors returned by [`CostModel::new`] and policy parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostModelError {
    /// A rate or allowance was negative or not finite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidRate {
        /// Name of the offending parameter.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The surcharge block size was not strictly positive.
    #[error("block size must be a finite, positive number (got {0})")]
    InvalidBlockSize(f64),
    /// The empty-leg policy keyword was not recognised.
    #[error("unknown empty-leg policy '{0}' (expected 'charged' or 'free')")]
    UnknownEmptyLegPolicy(String),
}

/// Weight and distance based tariff.
///
/// The default model charges `10` per unit of distance, plus `8` per unit of
/// distance for every started block of `5` weight units above the first `5`.
///
/// # Examples
/// ```
/// use courier_core::CostModel;
///
/// let model = CostModel::default();
/// assert_eq!(model.cost(5.0, 2.0), 20.0);
/// assert_eq!(model.cost(5.5, 2.0), 36.0);
/// assert_eq!(model.cost(40.0, 0.0), 0.0);
/// ```
///
/// Decoding goes through [`CostModel::new`], so a configuration file cannot
/// carry a tariff the constructor would reject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CostModelSpec", into = "CostModelSpec")]
pub struct CostModel {
    base_rate: f64,
    free_allowance: f64,
    block_size: f64,
    block_rate: f64,
    empty_leg: EmptyLegPolicy,
}

/// Wire shape of a [`CostModel`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CostModelSpec {
    base_rate: f64,
    free_allowance: f64,
    block_size: f64,
    block_rate: f64,
    #[serde(default)]
    empty_leg: EmptyLegPolicy,
}

impl TryFrom<CostModelSpec> for CostModel {
    type Error = CostModelError;

    fn try_from(spec: CostModelSpec) -> Result<Self, Self::Error> {
        Self::new(
            spec.base_rate,
            spec.free_allowance,
            spec.block_size,
            spec.block_rate,
            spec.empty_leg,
        )
    }
}

impl From<CostModel> for CostModelSpec {
    fn from(model: CostModel) -> Self {
        Self {
            base_rate: model.base_rate,
            free_allowance: model.free_allowance,
            block_size: model.block_size,
            block_rate: model.block_rate,
            empty_leg: model.empty_leg,
        }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            base_rate: 10.0,
            free_allowance: 5.0,
            block_size: 5.0,
            block_rate: 8.0,
            empty_leg: EmptyLegPolicy::Charged,
        }
    }
}

impl CostModel {
    /// Validate and construct a tariff.
    ///
    /// # Errors
    /// Returns [`CostModelError`] when a rate is negative or not finite, or
    /// when `block_size` is not strictly positive.
    pub fn new(
        base_rate: f64,
        free_allowance: f64,
        block_size: f64,
        block_rate: f64,
        empty_leg: EmptyLegPolicy,
    ) -> Result<Self, CostModelError> {
        for (field, value) in [
            ("base rate", base_rate),
            ("free allowance", free_allowance),
            ("block rate", block_rate),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CostModelError::InvalidRate { field, value });
            }
        }
        if !block_size.is_finite() || block_size <= 0.0 {
            return Err(CostModelError::InvalidBlockSize(block_size));
        }
        Ok(Self {
            base_rate,
            free_allowance,
            block_size,
            block_rate,
            empty_leg,
        })
    }

    /// Return a copy of this model using `policy` for empty legs.
    #[must_use]
    pub const fn with_empty_leg_policy(mut self, policy: EmptyLegPolicy) -> Self {
        self.empty_leg = policy;
        self
    }

    /// Policy applied to legs without cargo.
    #[must_use]
    pub const fn empty_leg_policy(&self) -> EmptyLegPolicy {
        self.empty_leg
    }

    /// Cost of carrying `weight` over `distance`.
    ///
    /// A zero-length leg is free whatever the cargo. Under
    /// [`EmptyLegPolicy::Free`] a leg without cargo is free too. The result is
    /// not rounded; callers round the total of a whole route.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "tariffs are defined over fractional weights and distances"
    )]
    pub fn cost(&self, weight: f64, distance: f64) -> f64 {
        if distance <= 0.0 {
            return 0.0;
        }
        if weight <= 0.0 && self.empty_leg == EmptyLegPolicy::Free {
            return 0.0;
        }
        let base = self.base_rate * distance;
        if weight <= self.free_allowance {
            return base;
        }
        let blocks = ((weight - self.free_allowance) / self.block_size).ceil();
        base + blocks * self.block_rate * distance
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare fractional weights and costs"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx_eq(lhs: f64, rhs: f64) -> bool {
        (lhs - rhs).abs() < 1e-9
    }

    #[rstest]
    #[case(0.0, 3.0, 30.0)]
    #[case(5.0, 3.0, 30.0)]
    #[case(5.000_1, 3.0, 54.0)]
    #[case(10.0, 3.0, 54.0)]
    #[case(10.5, 3.0, 78.0)]
    #[case(27.0, 2.5, 25.0 + 5.0 * 8.0 * 2.5)]
    fn default_tariff_bills_started_blocks(
        #[case] weight: f64,
        #[case] distance: f64,
        #[case] expected: f64,
    ) {
        let model = CostModel::default();
        assert!(approx_eq(model.cost(weight, distance), expected));
    }

    #[rstest]
    #[case(0.0)]
    #[case(3.0)]
    #[case(120.0)]
    fn zero_distance_is_free(#[case] weight: f64) {
        let model = CostModel::default();
        assert!(approx_eq(model.cost(weight, 0.0), 0.0));
    }

    #[rstest]
    fn free_policy_waives_empty_legs_only() {
        let model = CostModel::default().with_empty_leg_policy(EmptyLegPolicy::Free);
        assert!(approx_eq(model.cost(0.0, 4.0), 0.0));
        assert!(approx_eq(model.cost(1.0, 4.0), 40.0));
    }

    #[rstest]
    fn charged_policy_bills_empty_legs() {
        let model = CostModel::default();
        assert_eq!(model.empty_leg_policy(), EmptyLegPolicy::Charged);
        assert!(approx_eq(model.cost(0.0, 4.0), 40.0));
    }

    #[rstest]
    fn decoding_applies_constructor_checks() {
        let json = r#"{"baseRate":10,"freeAllowance":5,"blockSize":0,"blockRate":8,"emptyLeg":"charged"}"#;
        let err = serde_json::from_str::<CostModel>(json).expect_err("zero block size should fail");
        assert!(err.to_string().contains("block size"));
    }

    #[rstest]
    #[case(r#"{"baseRate":-1,"freeAllowance":5,"blockSize":5,"blockRate":8}"#)]
    #[case(r#"{"baseRate":10,"freeAllowance":5,"blockSize":-5,"blockRate":8}"#)]
    #[case(r#"{"baseRate":10,"freeAllowance":5,"blockSize":5,"blockRate":8,"surcharge":1}"#)]
    fn decoding_rejects_invalid_tariffs(#[case] json: &str) {
        assert!(serde_json::from_str::<CostModel>(json).is_err());
    }

    #[rstest]
    fn decoding_accepts_valid_tariff() {
        let json = r#"{"baseRate":10,"freeAllowance":5,"blockSize":5,"blockRate":8,"emptyLeg":"free"}"#;
        let model: CostModel = serde_json::from_str(json).expect("valid tariff should decode");
        assert_eq!(
            model,
            CostModel::default().with_empty_leg_policy(EmptyLegPolicy::Free)
        );
        assert_eq!(model.empty_leg_policy(), EmptyLegPolicy::Free);
    }

    #[rstest]
    #[case(-1.0, 5.0, 5.0, 8.0)]
    #[case(10.0, f64::NAN, 5.0, 8.0)]
    #[case(10.0, 5.0, 5.0, f64::INFINITY)]
    fn constructor_rejects_bad_rates(
        #[case] base: f64,
        #[case] allowance: f64,
        #[case] block: f64,
        #[case] block_rate: f64,
    ) {
        let result = CostModel::new(base, allowance, block, block_rate, EmptyLegPolicy::Charged);
        assert!(matches!(result, Err(CostModelError::InvalidRate { .. })));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    fn constructor_rejects_non_positive_block(#[case] block: f64) {
        let result = CostModel::new(10.0, 5.0, block, 8.0, EmptyLegPolicy::Charged);
        assert!(matches!(result, Err(CostModelError::InvalidBlockSize(_))));
    }

    #[rstest]
    fn policy_parsing_rejects_unknown() {
        let err = "sometimes"
            .parse::<EmptyLegPolicy>()
            .expect_err("unknown keyword should fail");
        assert!(err.to_string().contains("sometimes"));
    }
}
