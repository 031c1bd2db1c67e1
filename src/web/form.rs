// ============================================================
// Layer 1 — Intake Form Rendering
// ============================================================
// The form offers exactly the domain's choices, in the same
// order, with the same numeric bounds. Whatever the user last
// submitted is echoed back so a rejected form can be fixed
// instead of refilled.

use std::fmt::Write;

use crate::domain::attributes::{
    keys, AgeCategory, Choice, DiabeticStatus, GenHealth, NumericRange, Race, Sex, YesNo,
    BMI_RANGE, MENTAL_HEALTH_RANGE, PHYSICAL_HEALTH_RANGE, SLEEP_TIME_RANGE,
};
use crate::domain::prediction::PredictionResult;
use crate::domain::raw::{RawAttributeSet, RawValue};

pub enum FieldKind {
    Number(NumericRange),
    Select(Vec<&'static str>),
}

pub struct Field {
    pub key:   &'static str,
    pub label: &'static str,
    pub kind:  FieldKind,
}

fn options<T: Choice>() -> FieldKind {
    FieldKind::Select(T::offered().into_iter().map(|v| v.label()).collect())
}

/// Every input on the form, in display order.
pub fn fields() -> Vec<Field> {
    use FieldKind::Number;
    vec![
        Field { key: keys::BMI,               label: "BMI",                                    kind: Number(BMI_RANGE) },
        Field { key: keys::PHYSICAL_HEALTH,   label: "Physical Health (sick days in past 30)", kind: Number(PHYSICAL_HEALTH_RANGE) },
        Field { key: keys::MENTAL_HEALTH,     label: "Mental Health (stress days in past 30)", kind: Number(MENTAL_HEALTH_RANGE) },
        Field { key: keys::SLEEP_TIME,        label: "Sleep Time (hours/night)",               kind: Number(SLEEP_TIME_RANGE) },
        Field { key: keys::SMOKING,           label: "Smokes?",                                kind: options::<YesNo>() },
        Field { key: keys::ALCOHOL_DRINKING,  label: "Drinks alcohol heavily?",                kind: options::<YesNo>() },
        Field { key: keys::STROKE,            label: "Ever had a stroke?",                     kind: options::<YesNo>() },
        Field { key: keys::DIFF_WALKING,      label: "Has difficulty walking?",                kind: options::<YesNo>() },
        Field { key: keys::PHYSICAL_ACTIVITY, label: "Physically active?",                     kind: options::<YesNo>() },
        Field { key: keys::SEX,               label: "Sex",                                    kind: options::<Sex>() },
        Field { key: keys::DIABETIC,          label: "Diabetic?",                              kind: options::<DiabeticStatus>() },
        Field { key: keys::ASTHMA,            label: "Has asthma?",                            kind: options::<YesNo>() },
        Field { key: keys::KIDNEY_DISEASE,    label: "Kidney disease?",                        kind: options::<YesNo>() },
        Field { key: keys::SKIN_CANCER,       label: "Skin cancer?",                           kind: options::<YesNo>() },
        Field { key: keys::AGE_CATEGORY,      label: "Age Category",                           kind: options::<AgeCategory>() },
        Field { key: keys::RACE,              label: "Race",                                   kind: options::<Race>() },
        Field { key: keys::GEN_HEALTH,        label: "General Health",                         kind: options::<GenHealth>() },
    ]
}

/// What to show above the form after a submit.
pub enum Banner {
    Result(PredictionResult),
    Error(String),
}

/// HTML-escape text for use in element bodies and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c    => out.push(c),
        }
    }
    out
}

fn submitted(values: &RawAttributeSet, key: &str) -> Option<String> {
    values.get(key).map(RawValue::describe)
}

fn render_field(html: &mut String, field: &Field, values: &RawAttributeSet) {
    let current = submitted(values, field.key);
    let _ = writeln!(html, "<label for=\"{0}\">{1}</label>", field.key, escape(field.label));
    match &field.kind {
        FieldKind::Number(range) => {
            let value = current.unwrap_or_else(|| range.default.to_string());
            let _ = writeln!(
                html,
                "<input type=\"number\" id=\"{0}\" name=\"{0}\" min=\"{1}\" max=\"{2}\" step=\"{3}\" value=\"{4}\" required>",
                field.key, range.min, range.max, range.step, escape(&value),
            );
        }
        FieldKind::Select(choices) => {
            let _ = writeln!(html, "<select id=\"{0}\" name=\"{0}\">", field.key);
            for choice in choices {
                let selected = current.as_deref() == Some(*choice);
                let _ = writeln!(
                    html,
                    "  <option value=\"{0}\"{1}>{0}</option>",
                    escape(choice),
                    if selected { " selected" } else { "" },
                );
            }
            html.push_str("</select>\n");
        }
    }
}

/// Full page: title, optional banner, the form.
pub fn render_page(values: &RawAttributeSet, banner: Option<&Banner>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str(concat!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
        "<title>Heart Disease Risk Predictor</title>\n",
        "<style>body{font-family:sans-serif;max-width:40em;margin:2em auto}",
        "label{display:block;margin-top:.6em}",
        ".success{background:#e6f4ea;padding:1em}.error{background:#fce8e6;padding:1em}</style>\n",
        "</head>\n<body>\n<h1>Heart Disease Risk Predictor</h1>\n",
        "<p>Enter patient information to assess their risk of developing heart disease.</p>\n",
    ));

    match banner {
        Some(Banner::Result(r)) => {
            let class = if r.at_risk() { "error" } else { "success" };
            let _ = writeln!(html, "<div class=\"{class}\" role=\"status\">{}</div>", escape(&r.message()));
        }
        Some(Banner::Error(msg)) => {
            let _ = writeln!(html, "<div class=\"error\" role=\"alert\">{}</div>", escape(msg));
        }
        None => {}
    }

    html.push_str("<form method=\"post\" action=\"/predict\">\n<h2>Patient Information</h2>\n");
    for field in fields() {
        render_field(&mut html, &field, values);
    }
    html.push_str("<p><button type=\"submit\">Predict</button></p>\n</form>\n</body>\n</html>\n");
    html
}
