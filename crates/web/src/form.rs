//! Form controls and decoding of a submitted form into a patient record.
//!
//! Responsibilities:
//! - Describe the editable controls (label, element id, form name, kind, default)
//! - Hold the raw values posted by the browser
//! - Assemble one [`PatientRecord`] per submission
//!
//! Notes:
//! - No range checks are applied. The number inputs carry `min`/`max` hints for the browser,
//!   but out-of-range values that reach the server are passed through to the model.
//! - Edema has no control; the record always submits it as 0.

use cirrhosis_core::{Drug, Indicator, PatientRecord, Sex};
use serde::Deserialize;

use crate::error::FormError;

/// How a control is rendered and what it accepts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlKind {
    Dropdown {
        options: &'static [&'static str],
        default: &'static str,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        placeholder: &'static str,
    },
}

/// One editable field on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Control {
    /// Form field name; matches the [`FormSubmission`] field.
    pub name: &'static str,
    /// Element id.
    pub id: &'static str,
    pub label: &'static str,
    pub kind: ControlKind,
}

// Dropdown options come straight from the record's categorical domains.
const DRUG_OPTIONS: &[&str] = &[Drug::ALL[0].as_wire(), Drug::ALL[1].as_wire()];
const SEX_OPTIONS: &[&str] = &[Sex::ALL[0].as_wire(), Sex::ALL[1].as_wire()];
const YES_NO_OPTIONS: &[&str] = &[Indicator::ALL[0].as_wire(), Indicator::ALL[1].as_wire()];

const fn dropdown(
    name: &'static str,
    id: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    default: &'static str,
) -> Control {
    Control {
        name,
        id,
        label,
        kind: ControlKind::Dropdown { options, default },
    }
}

const fn measurement(
    name: &'static str,
    id: &'static str,
    label: &'static str,
    placeholder: &'static str,
) -> Control {
    Control {
        name,
        id,
        label,
        kind: ControlKind::Number {
            min: None,
            max: None,
            placeholder,
        },
    }
}

/// Every editable control, in page order.
pub const CONTROLS: [Control; 15] = [
    dropdown(
        "drug",
        "drug-dropdown",
        "Drug",
        DRUG_OPTIONS,
        Drug::DPenicillamine.as_wire(),
    ),
    Control {
        name: "age",
        id: "age-input",
        label: "AgeInYears",
        kind: ControlKind::Number {
            min: Some(0.0),
            max: Some(100.0),
            placeholder: "Enter age",
        },
    },
    dropdown("sex", "sex-dropdown", "Sex", SEX_OPTIONS, Sex::Male.as_wire()),
    dropdown(
        "ascites",
        "ascites-dropdown",
        "Ascites",
        YES_NO_OPTIONS,
        Indicator::Yes.as_wire(),
    ),
    dropdown(
        "hepatomegaly",
        "hepatomegaly-dropdown",
        "Hepatomegaly",
        YES_NO_OPTIONS,
        Indicator::Yes.as_wire(),
    ),
    dropdown(
        "spiders",
        "spiders-dropdown",
        "Spiders",
        YES_NO_OPTIONS,
        Indicator::Yes.as_wire(),
    ),
    measurement("bilirubin", "bilirubin-input", "Bilirubin", "Enter Bilirubin value"),
    measurement(
        "cholesterol",
        "cholesterol-input",
        "Cholesterol",
        "Enter Cholesterol value",
    ),
    measurement("albumin", "albumin-input", "Albumin", "Enter Albumin value"),
    measurement("copper", "copper-input", "Copper", "Enter Copper value"),
    measurement("alkphos", "alkphos-input", "Alk_Phos", "Enter Alk_Phos value"),
    measurement("sgot", "sgot-input", "SGOT", "Enter SGOT value"),
    measurement(
        "triglycerides",
        "triglycerides-input",
        "Tryglicerides",
        "Enter Tryglicerides value",
    ),
    measurement("platelets", "platelets-input", "Platelets", "Enter Platelets value"),
    measurement(
        "prothrombin",
        "prothrombin-input",
        "Prothrombin",
        "Enter Prothrombin value",
    ),
];

/// Raw control values as posted by the browser.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct FormSubmission {
    pub drug: Option<String>,
    pub age: Option<String>,
    pub sex: Option<String>,
    pub ascites: Option<String>,
    pub hepatomegaly: Option<String>,
    pub spiders: Option<String>,
    pub bilirubin: Option<String>,
    pub cholesterol: Option<String>,
    pub albumin: Option<String>,
    pub copper: Option<String>,
    pub alkphos: Option<String>,
    pub sgot: Option<String>,
    pub triglycerides: Option<String>,
    pub platelets: Option<String>,
    pub prothrombin: Option<String>,
}

impl FormSubmission {
    /// Control values shown before anything has been submitted: dropdowns at their defaults,
    /// measurements blank.
    pub fn initial() -> Self {
        let mut form = Self::default();
        for control in &CONTROLS {
            if let ControlKind::Dropdown { default, .. } = control.kind {
                if let Some(slot) = form.slot_mut(control.name) {
                    *slot = Some(default.to_string());
                }
            }
        }
        form
    }

    /// Current raw value of the control named `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "drug" => &self.drug,
            "age" => &self.age,
            "sex" => &self.sex,
            "ascites" => &self.ascites,
            "hepatomegaly" => &self.hepatomegaly,
            "spiders" => &self.spiders,
            "bilirubin" => &self.bilirubin,
            "cholesterol" => &self.cholesterol,
            "albumin" => &self.albumin,
            "copper" => &self.copper,
            "alkphos" => &self.alkphos,
            "sgot" => &self.sgot,
            "triglycerides" => &self.triglycerides,
            "platelets" => &self.platelets,
            "prothrombin" => &self.prothrombin,
            _ => return None,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        match name {
            "drug" => Some(&mut self.drug),
            "sex" => Some(&mut self.sex),
            "ascites" => Some(&mut self.ascites),
            "hepatomegaly" => Some(&mut self.hepatomegaly),
            "spiders" => Some(&mut self.spiders),
            _ => None,
        }
    }

    /// Assemble the record scored for this submission.
    ///
    /// # Errors
    /// Returns a [`FormError`] if a dropdown value is missing or not one of its options, or if a
    /// measurement is not a finite number. Blank measurements are not errors.
    pub fn to_record(&self) -> Result<PatientRecord, FormError> {
        Ok(PatientRecord {
            drug: choice(self.drug.as_deref(), "Drug", Drug::from_wire)?,
            age_in_years: number(self.age.as_deref(), "AgeInYears")?,
            sex: choice(self.sex.as_deref(), "Sex", Sex::from_wire)?,
            ascites: choice(self.ascites.as_deref(), "Ascites", Indicator::from_wire)?,
            hepatomegaly: choice(
                self.hepatomegaly.as_deref(),
                "Hepatomegaly",
                Indicator::from_wire,
            )?,
            spiders: choice(self.spiders.as_deref(), "Spiders", Indicator::from_wire)?,
            bilirubin: number(self.bilirubin.as_deref(), "Bilirubin")?,
            cholesterol: number(self.cholesterol.as_deref(), "Cholesterol")?,
            albumin: number(self.albumin.as_deref(), "Albumin")?,
            copper: number(self.copper.as_deref(), "Copper")?,
            alk_phos: number(self.alkphos.as_deref(), "Alk_Phos")?,
            sgot: number(self.sgot.as_deref(), "SGOT")?,
            tryglicerides: number(self.triglycerides.as_deref(), "Tryglicerides")?,
            platelets: number(self.platelets.as_deref(), "Platelets")?,
            prothrombin: number(self.prothrombin.as_deref(), "Prothrombin")?,
        })
    }
}

fn choice<T>(
    raw: Option<&str>,
    label: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, FormError> {
    let raw = raw.ok_or(FormError::MissingValue(label))?;
    parse(raw).ok_or_else(|| FormError::UnknownOption {
        label,
        value: raw.to_string(),
    })
}

fn number(raw: Option<&str>, label: &'static str) -> Result<Option<f64>, FormError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FormError::InvalidNumber {
            label,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) fn reference_submission() -> FormSubmission {
    FormSubmission {
        drug: Some("D-penicillamine".into()),
        age: Some("50".into()),
        sex: Some("M".into()),
        ascites: Some("N".into()),
        hepatomegaly: Some("N".into()),
        spiders: Some("N".into()),
        bilirubin: Some("1.0".into()),
        cholesterol: Some("200".into()),
        albumin: Some("3.5".into()),
        copper: Some("50".into()),
        alkphos: Some("100".into()),
        sgot: Some("80".into()),
        triglycerides: Some("100".into()),
        platelets: Some("250".into()),
        prothrombin: Some("10".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_cover_every_submission_field() {
        let form = reference_submission();
        for control in &CONTROLS {
            assert!(form.value(control.name).is_some(), "{}", control.name);
        }
        assert_eq!(CONTROLS.len(), 15);
    }

    #[test]
    fn dropdown_options_are_accepted_by_the_record() {
        let mut form = reference_submission();
        for control in &CONTROLS {
            let ControlKind::Dropdown { options, default } = control.kind else {
                continue;
            };
            assert!(options.contains(&default), "{} default", control.name);
            for option in options {
                *form.slot_mut(control.name).unwrap() = Some(option.to_string());
                assert!(form.to_record().is_ok(), "{} = {option}", control.name);
            }
            form = reference_submission();
        }
    }

    #[test]
    fn dropdowns_offer_every_category() {
        assert_eq!(DRUG_OPTIONS.len(), Drug::ALL.len());
        assert!(Drug::ALL.iter().all(|d| DRUG_OPTIONS.contains(&d.as_wire())));
        assert!(Sex::ALL.iter().all(|s| SEX_OPTIONS.contains(&s.as_wire())));
        assert!(Indicator::ALL
            .iter()
            .all(|i| YES_NO_OPTIONS.contains(&i.as_wire())));
        for option in DRUG_OPTIONS {
            assert_eq!(Drug::from_wire(option).map(Drug::as_wire), Some(*option));
        }
        for option in SEX_OPTIONS {
            assert_eq!(Sex::from_wire(option).map(Sex::as_wire), Some(*option));
        }
        for option in YES_NO_OPTIONS {
            assert_eq!(
                Indicator::from_wire(option).map(Indicator::as_wire),
                Some(*option)
            );
        }
    }

    #[test]
    fn initial_form_has_dropdown_defaults_only() {
        let form = FormSubmission::initial();
        assert_eq!(form.drug.as_deref(), Some("D-penicillamine"));
        assert_eq!(form.sex.as_deref(), Some("M"));
        assert_eq!(form.ascites.as_deref(), Some("Y"));
        assert_eq!(form.hepatomegaly.as_deref(), Some("Y"));
        assert_eq!(form.spiders.as_deref(), Some("Y"));
        assert_eq!(form.age, None);
        assert_eq!(form.prothrombin, None);
    }

    #[test]
    fn builds_record_from_reference_values() {
        let record = reference_submission().to_record().unwrap();
        assert_eq!(record.drug, Drug::DPenicillamine);
        assert_eq!(record.sex, Sex::Male);
        assert_eq!(record.ascites, Indicator::No);
        assert_eq!(record.age_in_years, Some(50.0));
        assert_eq!(record.albumin, Some(3.5));
        assert_eq!(record.tryglicerides, Some(100.0));
    }

    #[test]
    fn blank_measurements_become_absent() {
        let mut form = reference_submission();
        form.copper = Some("  ".into());
        form.sgot = None;
        let record = form.to_record().unwrap();
        assert_eq!(record.copper, None);
        assert_eq!(record.sgot, None);
    }

    #[test]
    fn out_of_range_age_is_passed_through() {
        let mut form = reference_submission();
        form.age = Some("140".into());
        assert_eq!(form.to_record().unwrap().age_in_years, Some(140.0));
    }

    #[test]
    fn non_numeric_measurement_is_rejected() {
        let mut form = reference_submission();
        form.bilirubin = Some("high".into());
        assert_eq!(
            form.to_record().unwrap_err(),
            FormError::InvalidNumber {
                label: "Bilirubin",
                value: "high".into()
            }
        );
    }

    #[test]
    fn non_finite_measurement_is_rejected() {
        let mut form = reference_submission();
        form.platelets = Some("NaN".into());
        assert!(matches!(
            form.to_record(),
            Err(FormError::InvalidNumber { label: "Platelets", .. })
        ));
    }

    #[test]
    fn missing_dropdown_is_rejected() {
        let mut form = reference_submission();
        form.sex = None;
        assert_eq!(form.to_record().unwrap_err(), FormError::MissingValue("Sex"));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut form = reference_submission();
        form.drug = Some("Aspirin".into());
        assert_eq!(
            form.to_record().unwrap_err(),
            FormError::UnknownOption {
                label: "Drug",
                value: "Aspirin".into()
            }
        );
    }
}
