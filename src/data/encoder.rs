// ============================================================
// Layer 4 — Feature Encoder
// ============================================================
// Turns one submission into one vector the model can read.
//
// Steps (applied in order):
//   1. Validate the raw set into PatientAttributes
//      (anything outside its domain → InvalidInput)
//   2. Numeric fields pass through unchanged
//   3. Binary answers become 0/1 indicators
//   4. Age, race and general health are one-hot expanded,
//      one column per bin. Age 18-24 is the baseline and has
//      no column of its own.
//   5. Reindex into the schema's column order. Columns the
//      schema wants but we did not compute are 0; columns we
//      computed but the schema does not want are dropped.
//
// One-hot columns are matched by comparing the selected enum
// variant with the bin the column stands for. Labels are never
// compared as substrings ("good" must not light up "very good").

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::attributes::{AgeCategory, Choice, GenHealth, PatientAttributes, Race};
use crate::domain::error::RiskResult;
use crate::domain::feature_vector::{EncodedFeatureVector, FeatureSchema};
use crate::domain::raw::RawAttributeSet;

// ─── Column names ─────────────────────────────────────────────────────────────
pub const BMI:               &str = "BMI";
pub const PHYSICAL_HEALTH:   &str = "PhysicalHealth";
pub const MENTAL_HEALTH:     &str = "MentalHealth";
pub const SLEEP_TIME:        &str = "SleepTime";
pub const SMOKING:           &str = "Smoking";
pub const ALCOHOL_DRINKING:  &str = "AlcoholDrinking";
pub const STROKE:            &str = "Stroke";
pub const DIFF_WALKING:      &str = "DiffWalking";
pub const SEX:               &str = "Sex";
pub const DIABETIC:          &str = "Diabetic";
pub const PHYSICAL_ACTIVITY: &str = "PhysicalActivity";
pub const ASTHMA:            &str = "Asthma";
pub const KIDNEY_DISEASE:    &str = "KidneyDisease";
pub const SKIN_CANCER:       &str = "SkinCancer";

pub const AGE_PREFIX:        &str = "AgeCategory_";
pub const RACE_PREFIX:       &str = "Race_";
pub const GEN_HEALTH_PREFIX: &str = "GenHealth_";

/// Column for an age bin, or None for the baseline bin.
pub fn age_column(age: AgeCategory) -> Option<String> {
    (age != AgeCategory::BASELINE).then(|| format!("{AGE_PREFIX}{}", age.label()))
}

/// Every race bin has its own column; there is no baseline.
pub fn race_column(race: Race) -> String {
    format!("{RACE_PREFIX}{}", race.label())
}

/// Every general-health bin has its own column.
pub fn gen_health_column(health: GenHealth) -> String {
    format!("{GEN_HEALTH_PREFIX}{}", health.label())
}

/// Every column the encoder knows how to compute, in a stable order.
/// This is the layout the model was trained on, but the schema
/// shipped with the model is what actually decides the order.
pub fn known_columns() -> Vec<String> {
    let mut cols: Vec<String> = [
        BMI, PHYSICAL_HEALTH, MENTAL_HEALTH, SLEEP_TIME,
        SMOKING, ALCOHOL_DRINKING, STROKE, DIFF_WALKING, SEX, DIABETIC,
        PHYSICAL_ACTIVITY, ASTHMA, KIDNEY_DISEASE, SKIN_CANCER,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    cols.extend(AgeCategory::ALL.iter().filter_map(|a| age_column(*a)));
    cols.extend(Race::ALL.iter().map(|r| race_column(*r)));
    cols.extend(GenHealth::ALL.iter().map(|g| gen_health_column(*g)));
    cols
}

// ─── One-hot expansion ────────────────────────────────────────────────────────
fn one_hot<T: Choice>(
    out:      &mut HashMap<String, f64>,
    selected: T,
    column:   impl Fn(T) -> Option<String>,
) {
    for bin in T::ALL.iter().copied() {
        if let Some(name) = column(bin) {
            out.insert(name, if bin == selected { 1.0 } else { 0.0 });
        }
    }
}

// ─── FeatureEncoder ───────────────────────────────────────────────────────────
/// Encodes submissions against one fixed schema.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: Arc<FeatureSchema>,
}

impl FeatureEncoder {
    pub fn new(schema: Arc<FeatureSchema>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Arc<FeatureSchema> {
        &self.schema
    }

    /// Validate then encode a raw submission.
    pub fn encode(&self, raw: &RawAttributeSet) -> RiskResult<EncodedFeatureVector> {
        let attrs = PatientAttributes::try_from(raw)?;
        self.encode_attributes(&attrs)
    }

    /// Encode already-typed attributes. Numeric ranges are checked
    /// again since the struct can be built without going through
    /// a RawAttributeSet.
    pub fn encode_attributes(&self, attrs: &PatientAttributes) -> RiskResult<EncodedFeatureVector> {
        attrs.validate()?;

        let computed = Self::columns_for(attrs);
        let values: Vec<f64> = self
            .schema
            .columns()
            .iter()
            .map(|c| computed.get(c).copied().unwrap_or(0.0))
            .collect();

        let dropped = computed
            .keys()
            .filter(|k| self.schema.position(k).is_none())
            .count();
        if dropped > 0 {
            tracing::trace!("Dropped {} computed columns not in schema", dropped);
        }

        Ok(EncodedFeatureVector::new(Arc::clone(&self.schema), values))
    }

    /// Every computed column with its value, before schema alignment.
    pub fn columns_for(a: &PatientAttributes) -> HashMap<String, f64> {
        let mut m = HashMap::with_capacity(40);

        m.insert(BMI.to_string(),               a.bmi);
        m.insert(PHYSICAL_HEALTH.to_string(),   f64::from(a.physical_health));
        m.insert(MENTAL_HEALTH.to_string(),     f64::from(a.mental_health));
        m.insert(SLEEP_TIME.to_string(),        f64::from(a.sleep_time));

        m.insert(SMOKING.to_string(),           a.smoking.indicator());
        m.insert(ALCOHOL_DRINKING.to_string(),  a.alcohol_drinking.indicator());
        m.insert(STROKE.to_string(),            a.stroke.indicator());
        m.insert(DIFF_WALKING.to_string(),      a.diff_walking.indicator());
        m.insert(SEX.to_string(),               a.sex.indicator());
        m.insert(DIABETIC.to_string(),          a.diabetic.indicator());
        m.insert(PHYSICAL_ACTIVITY.to_string(), a.physical_activity.indicator());
        m.insert(ASTHMA.to_string(),            a.asthma.indicator());
        m.insert(KIDNEY_DISEASE.to_string(),    a.kidney_disease.indicator());
        m.insert(SKIN_CANCER.to_string(),       a.skin_cancer.indicator());

        one_hot(&mut m, a.age_category, age_column);
        one_hot(&mut m, a.race,         |r| Some(race_column(r)));
        one_hot(&mut m, a.gen_health,   |g| Some(gen_health_column(g)));

        m
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attributes::{keys, DiabeticStatus, Sex, YesNo};
    use crate::domain::error::RiskError;
    use proptest::prelude::*;

    fn full_schema() -> Arc<FeatureSchema> {
        Arc::new(FeatureSchema::new(known_columns()).unwrap())
    }

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(full_schema())
    }

    fn group_sum(v: &EncodedFeatureVector, prefix: &str) -> f64 {
        v.iter()
            .filter(|(c, _)| c.starts_with(prefix))
            .map(|(_, x)| x)
            .sum()
    }

    #[test]
    fn test_known_columns_layout() {
        let cols = known_columns();
        assert_eq!(cols.len(), 14 + 12 + 6 + 5);
        assert!(!cols.contains(&"AgeCategory_18-24".to_string()));
        assert!(cols.contains(&"AgeCategory_80 or older".to_string()));
        assert!(cols.contains(&"Race_american indian/alaskan native".to_string()));
        assert!(cols.contains(&"GenHealth_very good".to_string()));
    }

    #[test]
    fn test_reference_scenario() {
        let raw = RawAttributeSet::from(&PatientAttributes::default())
            .with(keys::SMOKING, "yes")
            .with(keys::SEX, "male")
            .with(keys::AGE_CATEGORY, "65-69")
            .with(keys::RACE, "white")
            .with(keys::GEN_HEALTH, "good");
        let v = encoder().encode(&raw).unwrap();

        assert_eq!(v.get(SMOKING), Some(1.0));
        assert_eq!(v.get(SEX), Some(1.0));
        assert_eq!(v.get("AgeCategory_65-69"), Some(1.0));
        assert_eq!(group_sum(&v, AGE_PREFIX), 1.0);
        assert_eq!(v.get("Race_white"), Some(1.0));
        assert_eq!(group_sum(&v, RACE_PREFIX), 1.0);
        assert_eq!(v.get("GenHealth_good"), Some(1.0));
        assert_eq!(group_sum(&v, GEN_HEALTH_PREFIX), 1.0);

        for col in [ALCOHOL_DRINKING, STROKE, DIFF_WALKING, DIABETIC, PHYSICAL_ACTIVITY,
                    ASTHMA, KIDNEY_DISEASE, SKIN_CANCER] {
            assert_eq!(v.get(col), Some(0.0), "{col}");
        }
    }

    #[test]
    fn test_good_does_not_match_very_good() {
        let attrs = PatientAttributes { gen_health: GenHealth::Good, ..Default::default() };
        let v = encoder().encode_attributes(&attrs).unwrap();
        assert_eq!(v.get("GenHealth_good"), Some(1.0));
        assert_eq!(v.get("GenHealth_very good"), Some(0.0));
    }

    #[test]
    fn test_baseline_age_is_all_zero() {
        let attrs = PatientAttributes { age_category: AgeCategory::Age18To24, ..Default::default() };
        let v = encoder().encode_attributes(&attrs).unwrap();
        assert_eq!(group_sum(&v, AGE_PREFIX), 0.0);
    }

    #[test]
    fn test_borderline_diabetic_encodes_to_one() {
        let raw = RawAttributeSet::from(&PatientAttributes::default())
            .with(keys::DIABETIC, "borderline");
        let v = encoder().encode(&raw).unwrap();
        assert_eq!(v.get(DIABETIC), Some(1.0));

        let attrs = PatientAttributes { diabetic: DiabeticStatus::DontKnow, ..Default::default() };
        assert_eq!(encoder().encode_attributes(&attrs).unwrap().get(DIABETIC), Some(0.0));
    }

    #[test]
    fn test_out_of_domain_value_is_invalid_input() {
        let raw = RawAttributeSet::from(&PatientAttributes::default())
            .with(keys::SMOKING, "maybe");
        let err = encoder().encode(&raw).unwrap_err();
        assert!(matches!(err, RiskError::InvalidInput { .. }));
    }

    #[test]
    fn test_out_of_range_struct_is_invalid_input() {
        let attrs = PatientAttributes { sleep_time: 30, ..Default::default() };
        assert!(encoder().encode_attributes(&attrs).unwrap_err().is_user_error());
    }

    #[test]
    fn test_reindex_fills_missing_and_drops_extra() {
        let schema = FeatureSchema::new(vec![
            "Sex".to_string(),
            "SomethingNew".to_string(),
            "BMI".to_string(),
        ])
        .unwrap();
        let enc = FeatureEncoder::new(Arc::new(schema));
        let attrs = PatientAttributes { bmi: 28.0, sex: Sex::Male, ..Default::default() };
        let v = enc.encode_attributes(&attrs).unwrap();
        assert_eq!(v.values(), &[1.0, 0.0, 28.0]);
    }

    #[test]
    fn test_numeric_fields_pass_through() {
        let attrs = PatientAttributes {
            bmi: 33.3,
            physical_health: 4,
            mental_health: 12,
            sleep_time: 6,
            stroke: YesNo::Yes,
            ..Default::default()
        };
        let v = encoder().encode_attributes(&attrs).unwrap();
        assert_eq!(v.get(BMI), Some(33.3));
        assert_eq!(v.get(PHYSICAL_HEALTH), Some(4.0));
        assert_eq!(v.get(MENTAL_HEALTH), Some(12.0));
        assert_eq!(v.get(SLEEP_TIME), Some(6.0));
        assert_eq!(v.get(STROKE), Some(1.0));
    }

    // ─── Properties ───────────────────────────────────────────────────────────
    fn pick<T: Choice + std::fmt::Debug>() -> impl Strategy<Value = T> {
        proptest::sample::select(T::ALL.to_vec())
    }

    prop_compose! {
        fn any_attributes()(
            bmi in 10.0f64..=60.0,
            physical_health in 0u8..=30,
            mental_health in 0u8..=30,
            sleep_time in 0u8..=24,
            binaries in proptest::collection::vec(pick::<YesNo>(), 8),
            sex in pick::<Sex>(),
            diabetic in pick::<DiabeticStatus>(),
            age_category in pick::<AgeCategory>(),
            race in pick::<Race>(),
            gen_health in pick::<GenHealth>(),
        ) -> PatientAttributes {
            PatientAttributes {
                bmi, physical_health, mental_health, sleep_time,
                smoking:           binaries[0],
                alcohol_drinking:  binaries[1],
                stroke:            binaries[2],
                diff_walking:      binaries[3],
                physical_activity: binaries[4],
                asthma:            binaries[5],
                kidney_disease:    binaries[6],
                skin_cancer:       binaries[7],
                sex, diabetic, age_category, race, gen_health,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_vector_matches_schema(attrs in any_attributes()) {
            let enc = encoder();
            let v = enc.encode_attributes(&attrs).unwrap();
            prop_assert_eq!(v.len(), enc.schema().len());
            prop_assert_eq!(v.schema().columns(), enc.schema().columns());
        }

        #[test]
        fn prop_one_hot_groups_are_exclusive(attrs in any_attributes()) {
            let v = encoder().encode_attributes(&attrs).unwrap();
            let age = group_sum(&v, AGE_PREFIX);
            let expected_age = if attrs.age_category == AgeCategory::BASELINE { 0.0 } else { 1.0 };
            prop_assert_eq!(age, expected_age);
            prop_assert_eq!(group_sum(&v, RACE_PREFIX), 1.0);
            prop_assert_eq!(group_sum(&v, GEN_HEALTH_PREFIX), 1.0);
        }

        #[test]
        fn prop_encoding_is_deterministic(attrs in any_attributes()) {
            let enc = encoder();
            let a = enc.encode(&RawAttributeSet::from(&attrs)).unwrap();
            let b = enc.encode(&RawAttributeSet::from(&attrs)).unwrap();
            let bits = |v: &EncodedFeatureVector| v.values().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
            prop_assert_eq!(bits(&a), bits(&b));
        }
    }
}
