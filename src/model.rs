use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EstimatorError, Result};

/// Score below which stress is considered low.
pub const LOW_CUTOFF: f64 = 33.0;
/// Score at or above which stress is considered high.
pub const HIGH_CUTOFF: f64 = 66.0;

const CONFIDENCE_MIN: f64 = 85.0;
const CONFIDENCE_MAX: f64 = 95.0;

/// Daily lifestyle figures the calculator sliders expose.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct StressInputs {
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub gpa: f64,
    pub physical_activity: f64,
    pub social_activity: f64,
}

impl Default for StressInputs {
    fn default() -> Self {
        Self {
            study_hours: 6.0,
            sleep_hours: 7.0,
            gpa: 3.0,
            physical_activity: 3.0,
            social_activity: 3.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    StudyHours,
    SleepHours,
    Gpa,
    PhysicalActivity,
    SocialActivity,
}

impl InputField {
    pub const ALL: [InputField; 5] = [
        InputField::StudyHours,
        InputField::SleepHours,
        InputField::Gpa,
        InputField::PhysicalActivity,
        InputField::SocialActivity,
    ];

    /// Inclusive slider bounds.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            InputField::StudyHours => (1.0, 16.0),
            InputField::SleepHours => (3.0, 12.0),
            InputField::Gpa => (1.0, 4.0),
            InputField::PhysicalActivity | InputField::SocialActivity => (0.0, 7.0),
        }
    }

    pub fn step(self) -> f64 {
        match self {
            InputField::StudyHours | InputField::SleepHours => 0.5,
            InputField::Gpa => 0.1,
            InputField::PhysicalActivity | InputField::SocialActivity => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InputField::StudyHours => "study_hours",
            InputField::SleepHours => "sleep_hours",
            InputField::Gpa => "gpa",
            InputField::PhysicalActivity => "physical_activity",
            InputField::SocialActivity => "social_activity",
        }
    }

    /// Clamps `value` into the slider range and snaps it to the slider step.
    pub fn normalize(self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(EstimatorError::InvalidInput { field: self, value });
        }
        let (min, max) = self.bounds();
        let step = self.step();
        let steps = ((value.clamp(min, max) - min) / step).round();
        // Every step is a multiple of 0.1, so one decimal removes the float drift.
        let snapped = ((min + steps * step) * 10.0).round() / 10.0;
        Ok(snapped.clamp(min, max))
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl StressInputs {
    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::StudyHours => self.study_hours,
            InputField::SleepHours => self.sleep_hours,
            InputField::Gpa => self.gpa,
            InputField::PhysicalActivity => self.physical_activity,
            InputField::SocialActivity => self.social_activity,
        }
    }

    fn slot(&mut self, field: InputField) -> &mut f64 {
        match field {
            InputField::StudyHours => &mut self.study_hours,
            InputField::SleepHours => &mut self.sleep_hours,
            InputField::Gpa => &mut self.gpa,
            InputField::PhysicalActivity => &mut self.physical_activity,
            InputField::SocialActivity => &mut self.social_activity,
        }
    }

    /// Stores a normalized value for `field` and reports whether anything changed.
    pub fn set(&mut self, field: InputField, value: f64) -> Result<bool> {
        let value = field.normalize(value)?;
        let slot = self.slot(field);
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    /// Returns a copy with every field clamped and snapped to its slider.
    pub fn normalized(self) -> Result<Self> {
        let mut out = self;
        for field in InputField::ALL {
            *out.slot(field) = field.normalize(self.get(field))?;
        }
        Ok(out)
    }

    /// The unclamped weighted sum; 0 means a balanced lifestyle.
    pub fn raw_score(&self) -> f64 {
        let mut raw = 0.0;
        raw += (self.study_hours - 4.0) * 0.15;
        raw += (8.0 - self.sleep_hours) * 0.20;
        if self.gpa > 3.5 {
            raw += 0.10;
        }
        raw += (5.0 - self.physical_activity) * 0.10;
        raw += (5.0 - self.social_activity) * 0.08;
        raw
    }

    /// Stress percentage in [0, 100].
    pub fn stress_score(&self) -> f64 {
        self.raw_score().clamp(0.0, 1.0) * 100.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [StressLevel::Low, StressLevel::Moderate, StressLevel::High];

    pub fn from_score(score: f64) -> Self {
        if score < LOW_CUTOFF {
            StressLevel::Low
        } else if score < HIGH_CUTOFF {
            StressLevel::Moderate
        } else {
            StressLevel::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Moderate => "Moderate",
            StressLevel::High => "High",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StressLevel {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "rendah" => Ok(StressLevel::Low),
            "moderate" | "sedang" => Ok(StressLevel::Moderate),
            "high" | "tinggi" => Ok(StressLevel::High),
            _ => Err(EstimatorError::UnknownLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Estimate {
    pub score: f64,
    pub level: StressLevel,
    /// Cosmetic; has no bearing on `level`.
    pub confidence: f64,
    pub computed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct StressModel;

impl StressModel {
    pub fn new() -> Self {
        StressModel
    }

    pub fn predict(&self, inputs: &StressInputs) -> (StressLevel, f64) {
        let score = inputs.stress_score();
        (StressLevel::from_score(score), score)
    }

    pub fn evaluate<R: Rng>(&self, inputs: &StressInputs, rng: &mut R) -> Estimate {
        let (level, score) = self.predict(inputs);
        Estimate {
            score,
            level,
            confidence: rng.gen_range(CONFIDENCE_MIN..CONFIDENCE_MAX),
            computed_at: Utc::now(),
        }
    }
}
