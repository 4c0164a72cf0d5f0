use serde::{Deserialize, Serialize};

/// Defendant factors considered by the pre-trial risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefendantProfile {
    pub prior_offenses: u32,
    pub age_at_first_arrest: u32,
    pub has_stable_employment: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: u32,
}

const PRIOR_OFFENSE_WEIGHT: u32 = 3;
const EARLY_ARREST_AGE: u32 = 21;

/// Additive score: priors weigh 3 each, a first arrest before 21 adds 4, and
/// lacking stable employment adds 2.
pub fn risk_score(profile: &DefendantProfile) -> u32 {
    let age_factor = if profile.age_at_first_arrest < EARLY_ARREST_AGE {
        2
    } else {
        0
    };
    let employment_factor = if profile.has_stable_employment { 0 } else { 2 };

    profile
        .prior_offenses
        .saturating_mul(PRIOR_OFFENSE_WEIGHT)
        .saturating_add(age_factor * 2)
        .saturating_add(employment_factor)
}

pub fn assess(profile: &DefendantProfile) -> RiskAssessment {
    RiskAssessment {
        risk_score: risk_score(profile),
    }
}
