// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   predict — score one patient given on the command line
//   serve   — run the intake form as a small web app
//   schema  — print the column list the loaded model expects
//
// Categorical flags take the exact labels the form offers
// ("yes", "very good", "80 or older", ...). They are kept as
// plain strings here and validated by the domain layer, so the
// CLI and the form reject the same things the same way.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::domain::attributes::keys;
use crate::domain::raw::RawAttributeSet;
use crate::infra::settings::{
    Settings, DEFAULT_ARTIFACT_DIR, DEFAULT_BIND, DEFAULT_COLUMNS_FILE, DEFAULT_MODEL_FILE,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess one patient and print the result
    Predict(PredictArgs),

    /// Serve the intake form over HTTP
    Serve(ServeArgs),

    /// Print the model's expected columns in order
    Schema(SchemaArgs),
}

/// Where the trained model lives. Shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    /// Directory containing the classifier and its column list
    #[arg(long, env = "HEART_RISK_ARTIFACT_DIR", default_value = DEFAULT_ARTIFACT_DIR)]
    pub artifact_dir: PathBuf,

    /// Classifier file name inside the artifact directory
    #[arg(long, default_value = DEFAULT_MODEL_FILE)]
    pub model_file: String,

    /// Column list file name inside the artifact directory
    #[arg(long, default_value = DEFAULT_COLUMNS_FILE)]
    pub columns_file: String,
}

impl From<ArtifactArgs> for Settings {
    fn from(a: ArtifactArgs) -> Self {
        Settings {
            artifact_dir: a.artifact_dir,
            model_file:   a.model_file,
            columns_file: a.columns_file,
            ..Settings::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,

    /// Read the whole submission from a JSON object instead of flags.
    /// Cannot be combined with any attribute flag.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Body mass index (10.0 - 60.0)
    #[arg(long, default_value_t = 10.0, conflicts_with = "json")]
    pub bmi: f64,

    /// Days of poor physical health in the past 30
    #[arg(long, default_value_t = 0.0, conflicts_with = "json")]
    pub physical_health: f64,

    /// Days of poor mental health in the past 30
    #[arg(long, default_value_t = 0.0, conflicts_with = "json")]
    pub mental_health: f64,

    /// Hours of sleep per night
    #[arg(long, default_value_t = 7.0, conflicts_with = "json")]
    pub sleep_time: f64,

    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub smoking: String,

    /// Heavy alcohol drinking
    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub alcohol_drinking: String,

    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub stroke: String,

    /// Difficulty walking or climbing stairs
    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub diff_walking: String,

    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub physical_activity: String,

    /// female | male
    #[arg(long, default_value = "female", conflicts_with = "json")]
    pub sex: String,

    /// no | yes | yes (during pregnancy) | borderline | don't know
    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub diabetic: String,

    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub asthma: String,

    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub kidney_disease: String,

    #[arg(long, default_value = "no", conflicts_with = "json")]
    pub skin_cancer: String,

    /// 18-24, 25-29, ..., 75-79, "80 or older"
    #[arg(long, default_value = "18-24", conflicts_with = "json")]
    pub age_category: String,

    /// white | black | asian | american indian/alaskan native | hispanic | other
    #[arg(long, default_value = "white", conflicts_with = "json")]
    pub race: String,

    /// excellent | very good | good | fair | poor
    #[arg(long, default_value = "excellent", conflicts_with = "json")]
    pub gen_health: String,
}

impl PredictArgs {
    /// The flags as an unvalidated submission.
    pub fn to_raw(&self) -> RawAttributeSet {
        RawAttributeSet::new()
            .with(keys::BMI,               self.bmi)
            .with(keys::PHYSICAL_HEALTH,   self.physical_health)
            .with(keys::MENTAL_HEALTH,     self.mental_health)
            .with(keys::SLEEP_TIME,        self.sleep_time)
            .with(keys::SMOKING,           self.smoking.as_str())
            .with(keys::ALCOHOL_DRINKING,  self.alcohol_drinking.as_str())
            .with(keys::STROKE,            self.stroke.as_str())
            .with(keys::DIFF_WALKING,      self.diff_walking.as_str())
            .with(keys::PHYSICAL_ACTIVITY, self.physical_activity.as_str())
            .with(keys::SEX,               self.sex.as_str())
            .with(keys::DIABETIC,          self.diabetic.as_str())
            .with(keys::ASTHMA,            self.asthma.as_str())
            .with(keys::KIDNEY_DISEASE,    self.kidney_disease.as_str())
            .with(keys::SKIN_CANCER,       self.skin_cancer.as_str())
            .with(keys::AGE_CATEGORY,      self.age_category.as_str())
            .with(keys::RACE,              self.race.as_str())
            .with(keys::GEN_HEALTH,        self.gen_health.as_str())
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,

    /// Address to listen on
    #[arg(long, env = "HEART_RISK_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,
}

impl From<ServeArgs> for Settings {
    fn from(a: ServeArgs) -> Self {
        Settings { bind: a.bind, ..a.artifact.into() }
    }
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    #[command(flatten)]
    pub artifact: ArtifactArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::attributes::{GenHealth, PatientAttributes, Sex, YesNo};
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_json_conflicts_with_attribute_flags() {
        let err = Cli::try_parse_from([
            "heart-risk", "predict", "--json", "patient.json", "--smoking", "yes",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let ok = Cli::try_parse_from(["heart-risk", "predict", "--json", "patient.json"]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_predict_flags_become_raw_set() {
        let cli = Cli::try_parse_from([
            "heart-risk", "predict",
            "--bmi", "31.2",
            "--smoking", "yes",
            "--sex", "male",
            "--gen-health", "very good",
        ])
        .unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        let attrs = PatientAttributes::try_from(&args.to_raw()).unwrap();
        assert_eq!(attrs.bmi, 31.2);
        assert_eq!(attrs.smoking, YesNo::Yes);
        assert_eq!(attrs.sex, Sex::Male);
        assert_eq!(attrs.gen_health, GenHealth::VeryGood);
        assert_eq!(attrs.sleep_time, 7);
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["heart-risk", "predict"]).unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        let attrs = PatientAttributes::try_from(&args.to_raw()).unwrap();
        assert_eq!(attrs, PatientAttributes::default());
    }

    #[test]
    fn test_bad_label_passes_clap_but_fails_validation() {
        let cli = Cli::try_parse_from(["heart-risk", "predict", "--smoking", "maybe"]).unwrap();
        let Commands::Predict(args) = cli.command else { panic!("expected predict") };
        assert!(PatientAttributes::try_from(&args.to_raw()).is_err());
    }

    #[test]
    fn test_serve_settings() {
        let cli = Cli::try_parse_from([
            "heart-risk", "serve", "--artifact-dir", "/opt/model", "--bind", "0.0.0.0:9000",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else { panic!("expected serve") };
        let settings: Settings = args.into();
        assert_eq!(settings.bind, "0.0.0.0:9000");
        assert_eq!(settings.model_path(), PathBuf::from("/opt/model/model.json"));
    }
}
