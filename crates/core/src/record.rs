//! Patient record assembled for a single prediction.
//!
//! Responsibilities:
//! - Define the categorical domains accepted by the pipeline and their wire strings
//! - Carry one patient's measurements for exactly one request/response cycle
//! - Present the record as named cells in the column order the pipeline expects
//!
//! Notes:
//! - The three Edema indicators are part of the scored row but cannot be set by callers. They
//!   are always submitted as `0`; no control in the form edits them.
//! - Numeric measurements are optional. An absent value is handed to the pipeline, whose
//!   imputation step decides what it becomes.

use crate::constants::*;

/// Treatment arm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drug {
    DPenicillamine,
    Placebo,
}

impl Drug {
    pub const ALL: [Drug; 2] = [Drug::DPenicillamine, Drug::Placebo];

    /// Convert to the wire string used by the pipeline and the form.
    pub const fn as_wire(self) -> &'static str {
        match self {
            Drug::DPenicillamine => "D-penicillamine",
            Drug::Placebo => "Placebo",
        }
    }

    /// Parse from the wire string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "D-penicillamine" => Some(Drug::DPenicillamine),
            "Placebo" => Some(Drug::Placebo),
            _ => None,
        }
    }
}

/// Patient sex as recorded in the trial data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Female, Sex::Male];

    pub const fn as_wire(self) -> &'static str {
        match self {
            Sex::Female => "F",
            Sex::Male => "M",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "F" => Some(Sex::Female),
            "M" => Some(Sex::Male),
            _ => None,
        }
    }
}

/// Presence of a clinical sign (ascites, hepatomegaly, spiders).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator {
    Yes,
    No,
}

impl Indicator {
    pub const ALL: [Indicator; 2] = [Indicator::Yes, Indicator::No];

    pub const fn as_wire(self) -> &'static str {
        match self {
            Indicator::Yes => "Y",
            Indicator::No => "N",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "Y" => Some(Indicator::Yes),
            "N" => Some(Indicator::No),
            _ => None,
        }
    }
}

/// One named value of the scored row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    /// Numeric measurement; `None` when the field was left blank.
    Number(Option<f64>),
    /// Categorical value as its wire string.
    Category(&'static str),
}

/// A single patient's measurements.
///
/// Built fresh for every submission and discarded once the prediction is produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PatientRecord {
    pub drug: Drug,
    pub age_in_years: Option<f64>,
    pub sex: Sex,
    pub ascites: Indicator,
    pub hepatomegaly: Indicator,
    pub spiders: Indicator,
    pub bilirubin: Option<f64>,
    pub cholesterol: Option<f64>,
    pub albumin: Option<f64>,
    pub copper: Option<f64>,
    pub alk_phos: Option<f64>,
    pub sgot: Option<f64>,
    pub tryglicerides: Option<f64>,
    pub platelets: Option<f64>,
    pub prothrombin: Option<f64>,
}

impl PatientRecord {
    /// Value submitted for each Edema indicator.
    pub const EDEMA_FIXED: f64 = 0.0;

    /// The record as named cells, ordered as [`FEATURE_COLUMNS`].
    ///
    /// Edema_N, Edema_S and Edema_Y are always [`Self::EDEMA_FIXED`].
    pub fn columns(&self) -> Vec<(&'static str, Cell)> {
        let edema = Cell::Number(Some(Self::EDEMA_FIXED));
        vec![
            (COL_DRUG, Cell::Category(self.drug.as_wire())),
            (COL_AGE, Cell::Number(self.age_in_years)),
            (COL_SEX, Cell::Category(self.sex.as_wire())),
            (COL_ASCITES, Cell::Category(self.ascites.as_wire())),
            (COL_HEPATOMEGALY, Cell::Category(self.hepatomegaly.as_wire())),
            (COL_SPIDERS, Cell::Category(self.spiders.as_wire())),
            (COL_EDEMA_N, edema),
            (COL_EDEMA_S, edema),
            (COL_EDEMA_Y, edema),
            (COL_BILIRUBIN, Cell::Number(self.bilirubin)),
            (COL_CHOLESTEROL, Cell::Number(self.cholesterol)),
            (COL_ALBUMIN, Cell::Number(self.albumin)),
            (COL_COPPER, Cell::Number(self.copper)),
            (COL_ALK_PHOS, Cell::Number(self.alk_phos)),
            (COL_SGOT, Cell::Number(self.sgot)),
            (COL_TRYGLICERIDES, Cell::Number(self.tryglicerides)),
            (COL_PLATELETS, Cell::Number(self.platelets)),
            (COL_PROTHROMBIN, Cell::Number(self.prothrombin)),
        ]
    }
}

#[cfg(test)]
pub(crate) fn sample_record() -> PatientRecord {
    PatientRecord {
        drug: Drug::DPenicillamine,
        age_in_years: Some(50.0),
        sex: Sex::Male,
        ascites: Indicator::No,
        hepatomegaly: Indicator::No,
        spiders: Indicator::No,
        bilirubin: Some(1.0),
        cholesterol: Some(200.0),
        albumin: Some(3.5),
        copper: Some(50.0),
        alk_phos: Some(100.0),
        sgot: Some(80.0),
        tryglicerides: Some(100.0),
        platelets: Some(250.0),
        prothrombin: Some(10.0),
    }
}
