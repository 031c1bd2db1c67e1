// ============================================================
// Layer 3 — Patient Attribute Domains
// ============================================================
// Every attribute the intake form collects has a closed domain:
//
//   - categorical answers are enums, one variant per label
//     the form offers (plus one inherited label, see
//     DiabeticStatus::NoBorderlineDiabetes)
//   - numeric answers are bounded ranges matching the form
//     widgets (BMI input, the three day/hour sliders)
//
// Parsing is exact: a label either equals one of the variant
// labels or it is rejected with InvalidInput. Nothing is ever
// silently defaulted here.

use std::fmt;

use crate::domain::error::{RiskError, RiskResult};

// ─── Attribute keys ──────────────────────────────────────────────────────────
/// Keys used in a RawAttributeSet, in form order.
pub mod keys {
    pub const BMI:               &str = "bmi";
    pub const PHYSICAL_HEALTH:   &str = "physical_health";
    pub const MENTAL_HEALTH:     &str = "mental_health";
    pub const SLEEP_TIME:        &str = "sleep_time";
    pub const SMOKING:           &str = "smoking";
    pub const ALCOHOL_DRINKING:  &str = "alcohol_drinking";
    pub const STROKE:            &str = "stroke";
    pub const DIFF_WALKING:      &str = "diff_walking";
    pub const PHYSICAL_ACTIVITY: &str = "physical_activity";
    pub const SEX:               &str = "sex";
    pub const DIABETIC:          &str = "diabetic";
    pub const ASTHMA:            &str = "asthma";
    pub const KIDNEY_DISEASE:    &str = "kidney_disease";
    pub const SKIN_CANCER:       &str = "skin_cancer";
    pub const AGE_CATEGORY:      &str = "age_category";
    pub const RACE:              &str = "race";
    pub const GEN_HEALTH:        &str = "gen_health";

    pub const ALL: [&str; 17] = [
        BMI, PHYSICAL_HEALTH, MENTAL_HEALTH, SLEEP_TIME,
        SMOKING, ALCOHOL_DRINKING, STROKE, DIFF_WALKING, PHYSICAL_ACTIVITY,
        SEX, DIABETIC, ASTHMA, KIDNEY_DISEASE, SKIN_CANCER,
        AGE_CATEGORY, RACE, GEN_HEALTH,
    ];
}

// ─── Choice ──────────────────────────────────────────────────────────────────
/// A categorical attribute with a fixed, ordered set of labels.
pub trait Choice: Sized + Copy + Eq + 'static {
    /// Every variant in the order the form lists them.
    const ALL: &'static [Self];

    /// The exact label the form submits for this variant.
    fn label(self) -> &'static str;

    /// Labels a user can pick from. Defaults to all of them.
    fn offered() -> Vec<Self> {
        Self::ALL.to_vec()
    }

    /// Parse a submitted label for the attribute `field`.
    /// Surrounding whitespace is ignored, case is not.
    fn parse_for(field: &str, raw: &str) -> RiskResult<Self> {
        let wanted = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.label() == wanted)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|v| v.label()).collect();
                RiskError::invalid(field, raw, format!("expected one of: {}", expected.join(", ")))
            })
    }
}

macro_rules! impl_display_from_label {
    ($($t:ty),* $(,)?) => {
        $(
            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

// ─── YesNo ───────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    No,
    Yes,
}

impl Choice for YesNo {
    const ALL: &'static [Self] = &[YesNo::No, YesNo::Yes];

    fn label(self) -> &'static str {
        match self {
            YesNo::No  => "no",
            YesNo::Yes => "yes",
        }
    }
}

impl YesNo {
    pub fn indicator(self) -> f64 {
        match self {
            YesNo::Yes => 1.0,
            YesNo::No  => 0.0,
        }
    }
}

// ─── Sex ─────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Choice for Sex {
    const ALL: &'static [Self] = &[Sex::Female, Sex::Male];

    fn label(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male   => "male",
        }
    }
}

impl Sex {
    pub fn indicator(self) -> f64 {
        match self {
            Sex::Male   => 1.0,
            Sex::Female => 0.0,
        }
    }
}

// ─── DiabeticStatus ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiabeticStatus {
    No,
    Yes,
    YesDuringPregnancy,
    Borderline,
    DontKnow,
    /// Counted as diabetic by the encoder but never offered by the
    /// form. Kept so that payloads produced with the training-data
    /// label still encode the same way.
    NoBorderlineDiabetes,
}

impl Choice for DiabeticStatus {
    const ALL: &'static [Self] = &[
        DiabeticStatus::No,
        DiabeticStatus::Yes,
        DiabeticStatus::YesDuringPregnancy,
        DiabeticStatus::Borderline,
        DiabeticStatus::DontKnow,
        DiabeticStatus::NoBorderlineDiabetes,
    ];

    fn label(self) -> &'static str {
        match self {
            DiabeticStatus::No                   => "no",
            DiabeticStatus::Yes                  => "yes",
            DiabeticStatus::YesDuringPregnancy   => "yes (during pregnancy)",
            DiabeticStatus::Borderline           => "borderline",
            DiabeticStatus::DontKnow             => "don't know",
            DiabeticStatus::NoBorderlineDiabetes => "no, borderline diabetes",
        }
    }

    fn offered() -> Vec<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|s| *s != DiabeticStatus::NoBorderlineDiabetes)
            .collect()
    }
}

impl DiabeticStatus {
    pub fn indicator(self) -> f64 {
        match self {
            DiabeticStatus::Yes
            | DiabeticStatus::YesDuringPregnancy
            | DiabeticStatus::Borderline
            | DiabeticStatus::NoBorderlineDiabetes => 1.0,
            DiabeticStatus::No | DiabeticStatus::DontKnow => 0.0,
        }
    }
}

// ─── AgeCategory ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgeCategory {
    Age18To24,
    Age25To29,
    Age30To34,
    Age35To39,
    Age40To44,
    Age45To49,
    Age50To54,
    Age55To59,
    Age60To64,
    Age65To69,
    Age70To74,
    Age75To79,
    Age80OrOlder,
}

impl Choice for AgeCategory {
    const ALL: &'static [Self] = &[
        AgeCategory::Age18To24,
        AgeCategory::Age25To29,
        AgeCategory::Age30To34,
        AgeCategory::Age35To39,
        AgeCategory::Age40To44,
        AgeCategory::Age45To49,
        AgeCategory::Age50To54,
        AgeCategory::Age55To59,
        AgeCategory::Age60To64,
        AgeCategory::Age65To69,
        AgeCategory::Age70To74,
        AgeCategory::Age75To79,
        AgeCategory::Age80OrOlder,
    ];

    fn label(self) -> &'static str {
        match self {
            AgeCategory::Age18To24    => "18-24",
            AgeCategory::Age25To29    => "25-29",
            AgeCategory::Age30To34    => "30-34",
            AgeCategory::Age35To39    => "35-39",
            AgeCategory::Age40To44    => "40-44",
            AgeCategory::Age45To49    => "45-49",
            AgeCategory::Age50To54    => "50-54",
            AgeCategory::Age55To59    => "55-59",
            AgeCategory::Age60To64    => "60-64",
            AgeCategory::Age65To69    => "65-69",
            AgeCategory::Age70To74    => "70-74",
            AgeCategory::Age75To79    => "75-79",
            AgeCategory::Age80OrOlder => "80 or older",
        }
    }
}

impl AgeCategory {
    /// The bin the model was trained without a column for.
    pub const BASELINE: AgeCategory = AgeCategory::Age18To24;
}

// ─── Race ────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    White,
    Black,
    Asian,
    AmericanIndianAlaskanNative,
    Hispanic,
    Other,
}

impl Choice for Race {
    const ALL: &'static [Self] = &[
        Race::White,
        Race::Black,
        Race::Asian,
        Race::AmericanIndianAlaskanNative,
        Race::Hispanic,
        Race::Other,
    ];

    fn label(self) -> &'static str {
        match self {
            Race::White                       => "white",
            Race::Black                       => "black",
            Race::Asian                       => "asian",
            Race::AmericanIndianAlaskanNative => "american indian/alaskan native",
            Race::Hispanic                    => "hispanic",
            Race::Other                       => "other",
        }
    }
}

// ─── GenHealth ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenHealth {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl Choice for GenHealth {
    const ALL: &'static [Self] = &[
        GenHealth::Excellent,
        GenHealth::VeryGood,
        GenHealth::Good,
        GenHealth::Fair,
        GenHealth::Poor,
    ];

    fn label(self) -> &'static str {
        match self {
            GenHealth::Excellent => "excellent",
            GenHealth::VeryGood  => "very good",
            GenHealth::Good      => "good",
            GenHealth::Fair      => "fair",
            GenHealth::Poor      => "poor",
        }
    }
}

impl_display_from_label!(YesNo, Sex, DiabeticStatus, AgeCategory, Race, GenHealth);

// ─── Numeric ranges ──────────────────────────────────────────────────────────
/// Inclusive bounds for a numeric form input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min:     f64,
    pub max:     f64,
    pub default: f64,
    pub step:    f64,
    /// Sliders only produce whole numbers.
    pub integer: bool,
}

pub const BMI_RANGE: NumericRange =
    NumericRange { min: 10.0, max: 60.0, default: 10.0, step: 0.1, integer: false };
pub const PHYSICAL_HEALTH_RANGE: NumericRange =
    NumericRange { min: 0.0, max: 30.0, default: 0.0, step: 1.0, integer: true };
pub const MENTAL_HEALTH_RANGE: NumericRange =
    NumericRange { min: 0.0, max: 30.0, default: 0.0, step: 1.0, integer: true };
pub const SLEEP_TIME_RANGE: NumericRange =
    NumericRange { min: 0.0, max: 24.0, default: 7.0, step: 1.0, integer: true };

impl NumericRange {
    /// Reject values that are non-finite, out of bounds, or
    /// fractional where the widget only allows whole numbers.
    pub fn check(&self, field: &str, value: f64) -> RiskResult<f64> {
        if !value.is_finite() {
            return Err(RiskError::invalid(field, value.to_string(), "must be a finite number"));
        }
        if value < self.min || value > self.max {
            return Err(RiskError::invalid(
                field,
                value.to_string(),
                format!("must be between {} and {}", self.min, self.max),
            ));
        }
        if self.integer && value.fract() != 0.0 {
            return Err(RiskError::invalid(field, value.to_string(), "must be a whole number"));
        }
        Ok(value)
    }
}

// ─── PatientAttributes ───────────────────────────────────────────────────────
/// One fully validated form submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatientAttributes {
    pub bmi:               f64,
    pub physical_health:   u8,
    pub mental_health:     u8,
    pub sleep_time:        u8,
    pub smoking:           YesNo,
    pub alcohol_drinking:  YesNo,
    pub stroke:            YesNo,
    pub diff_walking:      YesNo,
    pub physical_activity: YesNo,
    pub sex:               Sex,
    pub diabetic:          DiabeticStatus,
    pub asthma:            YesNo,
    pub kidney_disease:    YesNo,
    pub skin_cancer:       YesNo,
    pub age_category:      AgeCategory,
    pub race:              Race,
    pub gen_health:        GenHealth,
}

impl PatientAttributes {
    /// Re-check the numeric fields. Categorical fields are valid by
    /// construction; numeric ones can still be set out of range by
    /// code that builds the struct directly.
    pub fn validate(&self) -> RiskResult<()> {
        BMI_RANGE.check(keys::BMI, self.bmi)?;
        PHYSICAL_HEALTH_RANGE.check(keys::PHYSICAL_HEALTH, self.physical_health.into())?;
        MENTAL_HEALTH_RANGE.check(keys::MENTAL_HEALTH, self.mental_health.into())?;
        SLEEP_TIME_RANGE.check(keys::SLEEP_TIME, self.sleep_time.into())?;
        Ok(())
    }
}

/// The form's initial state.
impl Default for PatientAttributes {
    fn default() -> Self {
        Self {
            bmi:               BMI_RANGE.default,
            physical_health:   PHYSICAL_HEALTH_RANGE.default as u8,
            mental_health:     MENTAL_HEALTH_RANGE.default as u8,
            sleep_time:        SLEEP_TIME_RANGE.default as u8,
            smoking:           YesNo::No,
            alcohol_drinking:  YesNo::No,
            stroke:            YesNo::No,
            diff_walking:      YesNo::No,
            physical_activity: YesNo::No,
            sex:               Sex::Female,
            diabetic:          DiabeticStatus::No,
            asthma:            YesNo::No,
            kidney_disease:    YesNo::No,
            skin_cancer:       YesNo::No,
            age_category:      AgeCategory::Age18To24,
            race:              Race::White,
            gen_health:        GenHealth::Excellent,
        }
    }
}
