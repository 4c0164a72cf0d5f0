//! Synthetic bias audit: scores two demographic groups with identical
//! offense distributions, inflating one group's weight, and reports the
//! resulting disparity. Illustrative only.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::round_to;

pub const DEFAULT_BIAS_MULTIPLIER: f64 = 2.5;
const BASELINE_MULTIPLIER: f64 = 1.5;
const SAMPLE_SIZE: usize = 20;

fn default_bias_multiplier() -> f64 {
    DEFAULT_BIAS_MULTIPLIER
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditRequest {
    #[serde(default = "default_bias_multiplier")]
    pub bias_multiplier: f64,
}

impl Default for AuditRequest {
    fn default() -> Self {
        Self {
            bias_multiplier: DEFAULT_BIAS_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditGroup {
    #[serde(rename = "Group A")]
    A,
    #[serde(rename = "Group B")]
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditSample {
    pub group: AuditGroup,
    pub prior_offenses: u32,
    pub risk_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    #[serde(rename = "Group A")]
    pub group_a: f64,
    #[serde(rename = "Group B")]
    pub group_b: f64,
    pub disparity_factor: f64,
}

/// Draws the synthetic population: alternating groups, priors uniform in 1..=10.
pub fn generate_samples<R: Rng>(request: &AuditRequest, rng: &mut R) -> Vec<AuditSample> {
    (0..SAMPLE_SIZE)
        .map(|index| {
            let group = if index % 2 == 0 {
                AuditGroup::A
            } else {
                AuditGroup::B
            };
            let prior_offenses = rng.gen_range(1..=10u32);
            let weight = match group {
                AuditGroup::A => BASELINE_MULTIPLIER,
                AuditGroup::B => request.bias_multiplier,
            };
            AuditSample {
                group,
                prior_offenses,
                risk_score: f64::from(prior_offenses) * weight,
            }
        })
        .collect()
}

fn group_mean(samples: &[AuditSample], group: AuditGroup) -> f64 {
    let scores: Vec<f64> = samples
        .iter()
        .filter(|sample| sample.group == group)
        .map(|sample| sample.risk_score)
        .collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

/// Group means rounded to two places; disparity is B over A, or zero when A is not positive.
pub fn summarize(samples: &[AuditSample]) -> AuditSummary {
    let group_a = round_to(group_mean(samples, AuditGroup::A), 2);
    let group_b = round_to(group_mean(samples, AuditGroup::B), 2);
    let disparity_factor = if group_a > 0.0 {
        round_to(group_b / group_a, 2)
    } else {
        0.0
    };

    AuditSummary {
        group_a,
        group_b,
        disparity_factor,
    }
}

pub fn run_simulation<R: Rng>(request: &AuditRequest, rng: &mut R) -> AuditSummary {
    summarize(&generate_samples(request, rng))
}
