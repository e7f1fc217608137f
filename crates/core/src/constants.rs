//! Constants used throughout the cirrhosis core crate.
//!
//! Column names must match the serialized pipeline exactly, including the
//! historical spelling of `Tryglicerides`.

/// Filename of the serialized prediction pipeline.
pub const MODEL_FILENAME: &str = "best_model.json";

/// Default listening address: all interfaces, fixed port.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Artifact format version understood by [`crate::pipeline::Pipeline::load`].
pub const MODEL_FORMAT_VERSION: u32 = 1;

pub const COL_DRUG: &str = "Drug";
pub const COL_AGE: &str = "AgeInYears";
pub const COL_SEX: &str = "Sex";
pub const COL_ASCITES: &str = "Ascites";
pub const COL_HEPATOMEGALY: &str = "Hepatomegaly";
pub const COL_SPIDERS: &str = "Spiders";
pub const COL_EDEMA_N: &str = "Edema_N";
pub const COL_EDEMA_S: &str = "Edema_S";
pub const COL_EDEMA_Y: &str = "Edema_Y";
pub const COL_BILIRUBIN: &str = "Bilirubin";
pub const COL_CHOLESTEROL: &str = "Cholesterol";
pub const COL_ALBUMIN: &str = "Albumin";
pub const COL_COPPER: &str = "Copper";
pub const COL_ALK_PHOS: &str = "Alk_Phos";
pub const COL_SGOT: &str = "SGOT";
pub const COL_TRYGLICERIDES: &str = "Tryglicerides";
pub const COL_PLATELETS: &str = "Platelets";
pub const COL_PROTHROMBIN: &str = "Prothrombin";

/// Every column of a patient record, in the order the pipeline was trained on.
pub const FEATURE_COLUMNS: [&str; 18] = [
    COL_DRUG,
    COL_AGE,
    COL_SEX,
    COL_ASCITES,
    COL_HEPATOMEGALY,
    COL_SPIDERS,
    COL_EDEMA_N,
    COL_EDEMA_S,
    COL_EDEMA_Y,
    COL_BILIRUBIN,
    COL_CHOLESTEROL,
    COL_ALBUMIN,
    COL_COPPER,
    COL_ALK_PHOS,
    COL_SGOT,
    COL_TRYGLICERIDES,
    COL_PLATELETS,
    COL_PROTHROMBIN,
];

/// Sentence shown when the classifier returns the positive label.
pub const POSITIVE_SENTENCE: &str = "Patient is predicted to have cirrhosis.";

/// Sentence shown for every other label.
pub const NEGATIVE_SENTENCE: &str = "Patient is predicted not to have cirrhosis.";
