// ============================================================
// Layer 3 — Raw Attribute Set
// ============================================================
// What a form submission looks like before anything has been
// checked: attribute name → raw value. Values arrive as text
// (URL-encoded forms, CLI flags) or as numbers (JSON bodies).
//
// Converting to PatientAttributes is the system boundary:
// every value is parsed against its closed domain there, and
// anything outside it is rejected with InvalidInput.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::attributes::{
    keys, AgeCategory, Choice, DiabeticStatus, GenHealth, NumericRange, PatientAttributes,
    Race, Sex, YesNo, BMI_RANGE, MENTAL_HEALTH_RANGE, PHYSICAL_HEALTH_RANGE, SLEEP_TIME_RANGE,
};
use crate::domain::error::{RiskError, RiskResult};

/// A single submitted value.
///
/// `Other` catches any JSON value that is neither a number nor a
/// string (`true`, `null`, arrays, objects) so the body still
/// deserializes and the offending field is reported by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawValue {
    /// The value as it would be echoed back to the user.
    pub fn describe(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s)   => s.clone(),
            RawValue::Other(v)  => v.to_string(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// User-submitted values, keyed by attribute name.
/// Unknown keys are carried along and ignored on conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAttributeSet {
    values: BTreeMap<String, RawValue>,
}

impl RawAttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and the CLI.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn require(&self, key: &str) -> RiskResult<&RawValue> {
        self.values
            .get(key)
            .ok_or_else(|| RiskError::invalid(key, "", "missing"))
    }

    fn choice<T: Choice>(&self, key: &str) -> RiskResult<T> {
        let value = self.require(key)?;
        match value {
            RawValue::Text(s)   => T::parse_for(key, s),
            RawValue::Number(_) => Err(RiskError::invalid(key, value.describe(), "expected a label, not a number")),
            RawValue::Other(_)  => Err(RiskError::invalid(key, value.describe(), "expected a label")),
        }
    }

    fn number(&self, key: &str, range: &NumericRange) -> RiskResult<f64> {
        let value = match self.require(key)? {
            RawValue::Number(n) => *n,
            RawValue::Text(s)   => s
                .trim()
                .parse::<f64>()
                .map_err(|_| RiskError::invalid(key, s.as_str(), "expected a number"))?,
            other => return Err(RiskError::invalid(key, other.describe(), "expected a number")),
        };
        range.check(key, value)
    }

    fn whole(&self, key: &str, range: &NumericRange) -> RiskResult<u8> {
        // range.check has already enforced integer and bounds within u8
        Ok(self.number(key, range)? as u8)
    }
}

impl FromIterator<(String, RawValue)> for RawAttributeSet {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl From<&PatientAttributes> for RawAttributeSet {
    fn from(a: &PatientAttributes) -> Self {
        RawAttributeSet::new()
            .with(keys::BMI,               a.bmi)
            .with(keys::PHYSICAL_HEALTH,   f64::from(a.physical_health))
            .with(keys::MENTAL_HEALTH,     f64::from(a.mental_health))
            .with(keys::SLEEP_TIME,        f64::from(a.sleep_time))
            .with(keys::SMOKING,           a.smoking.label())
            .with(keys::ALCOHOL_DRINKING,  a.alcohol_drinking.label())
            .with(keys::STROKE,            a.stroke.label())
            .with(keys::DIFF_WALKING,      a.diff_walking.label())
            .with(keys::PHYSICAL_ACTIVITY, a.physical_activity.label())
            .with(keys::SEX,               a.sex.label())
            .with(keys::DIABETIC,          a.diabetic.label())
            .with(keys::ASTHMA,            a.asthma.label())
            .with(keys::KIDNEY_DISEASE,    a.kidney_disease.label())
            .with(keys::SKIN_CANCER,       a.skin_cancer.label())
            .with(keys::AGE_CATEGORY,      a.age_category.label())
            .with(keys::RACE,              a.race.label())
            .with(keys::GEN_HEALTH,        a.gen_health.label())
    }
}

impl TryFrom<&RawAttributeSet> for PatientAttributes {
    type Error = RiskError;

    fn try_from(raw: &RawAttributeSet) -> RiskResult<Self> {
        let attrs = PatientAttributes {
            bmi:               raw.number(keys::BMI, &BMI_RANGE)?,
            physical_health:   raw.whole(keys::PHYSICAL_HEALTH, &PHYSICAL_HEALTH_RANGE)?,
            mental_health:     raw.whole(keys::MENTAL_HEALTH, &MENTAL_HEALTH_RANGE)?,
            sleep_time:        raw.whole(keys::SLEEP_TIME, &SLEEP_TIME_RANGE)?,
            smoking:           raw.choice::<YesNo>(keys::SMOKING)?,
            alcohol_drinking:  raw.choice::<YesNo>(keys::ALCOHOL_DRINKING)?,
            stroke:            raw.choice::<YesNo>(keys::STROKE)?,
            diff_walking:      raw.choice::<YesNo>(keys::DIFF_WALKING)?,
            physical_activity: raw.choice::<YesNo>(keys::PHYSICAL_ACTIVITY)?,
            sex:               raw.choice::<Sex>(keys::SEX)?,
            diabetic:          raw.choice::<DiabeticStatus>(keys::DIABETIC)?,
            asthma:            raw.choice::<YesNo>(keys::ASTHMA)?,
            kidney_disease:    raw.choice::<YesNo>(keys::KIDNEY_DISEASE)?,
            skin_cancer:       raw.choice::<YesNo>(keys::SKIN_CANCER)?,
            age_category:      raw.choice::<AgeCategory>(keys::AGE_CATEGORY)?,
            race:              raw.choice::<Race>(keys::RACE)?,
            gen_health:        raw.choice::<GenHealth>(keys::GEN_HEALTH)?,
        };
        Ok(attrs)
    }
}
