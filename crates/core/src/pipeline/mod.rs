//! Serialized prediction pipeline: a column transformer followed by a random forest.
//!
//! The artifact is a JSON document produced by the training job. It is read and validated once
//! at startup; afterwards the [`Pipeline`] is immutable and shared by every request.

mod forest;
mod transform;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::constants::{FEATURE_COLUMNS, MODEL_FORMAT_VERSION};
use crate::error::{ModelError, ModelResult, PredictionResult};
use crate::record::PatientRecord;
use crate::scorer::{Label, Scorer};

use forest::RandomForest;
use transform::ColumnTransformer;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PipelineArtifact {
    format_version: u32,
    columns: Vec<String>,
    transformer: ColumnTransformer,
    classifier: RandomForest,
}

/// A loaded, validated pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    columns: Vec<String>,
    transformer: ColumnTransformer,
    classifier: RandomForest,
}

impl Pipeline {
    /// Read and validate the artifact at `path`.
    ///
    /// # Errors
    /// Returns a [`ModelError`] if the file is missing or unreadable, is not valid JSON of the
    /// expected shape, or is internally inconsistent.
    pub fn load(path: &Path) -> ModelResult<Self> {
        if !path.is_file() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let pipeline = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            trees = pipeline.classifier.trees.len(),
            features = pipeline.transformer.output_width(),
            "loaded model artifact"
        );
        Ok(pipeline)
    }

    /// Parse and validate an artifact held in memory.
    pub fn from_json(contents: &str) -> ModelResult<Self> {
        let artifact: PipelineArtifact = serde_json::from_str(contents)?;
        if artifact.format_version != MODEL_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: artifact.format_version,
                expected: MODEL_FORMAT_VERSION,
            });
        }

        let pipeline = Self {
            columns: artifact.columns,
            transformer: artifact.transformer,
            classifier: artifact.classifier,
        };
        pipeline.validate()?;
        Ok(pipeline)
    }

    fn validate(&self) -> ModelResult<()> {
        if self.columns.is_empty() {
            return Err(ModelError::Invalid("pipeline declares no input columns".into()));
        }
        self.transformer.validate(&self.columns)?;
        self.classifier.validate(self.transformer.output_width())?;

        if self.columns.iter().map(String::as_str).ne(FEATURE_COLUMNS) {
            // Scoring still works by column name; a mismatch shows up per call.
            tracing::warn!(
                columns = ?self.columns,
                "model input columns differ from the patient record columns"
            );
        }
        Ok(())
    }

    /// Input columns in the order the pipeline was trained on.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Class probabilities for one record, ordered as the classifier's classes.
    pub fn predict_proba(&self, record: &PatientRecord) -> PredictionResult<Vec<f64>> {
        let features = self.transformer.transform(&record.columns())?;
        Ok(self.classifier.predict_proba(&features))
    }
}

impl Scorer for Pipeline {
    fn predict(&self, record: &PatientRecord) -> PredictionResult<Label> {
        let features = self.transformer.transform(&record.columns())?;
        Ok(self.classifier.predict(&features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::resolve_model_path;
    use crate::error::PredictionError;
    use crate::record::{sample_record, Indicator};
    use crate::scorer::prediction_sentence;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Single-tree pipeline over the full record: positive when Bilirubin > 2.0.
    const BILIRUBIN_STUMP: &str = r#"{
        "format_version": 1,
        "columns": ["Drug", "AgeInYears", "Sex", "Ascites", "Hepatomegaly", "Spiders",
                    "Edema_N", "Edema_S", "Edema_Y", "Bilirubin", "Cholesterol", "Albumin",
                    "Copper", "Alk_Phos", "SGOT", "Tryglicerides", "Platelets", "Prothrombin"],
        "transformer": {
            "numeric": {
                "columns": ["AgeInYears", "Bilirubin", "Cholesterol", "Albumin", "Copper",
                            "Alk_Phos", "SGOT", "Tryglicerides", "Platelets", "Prothrombin"],
                "impute": [50.0, 3.0, 300.0, 3.5, 70.0, 1200.0, 110.0, 100.0, 250.0, 10.5],
                "mean":   [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
                "scale":  [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
            },
            "categorical": {
                "columns": ["Drug", "Sex", "Ascites", "Hepatomegaly", "Spiders"],
                "categories": [["D-penicillamine", "Placebo"], ["F", "M"], ["N", "Y"],
                               ["N", "Y"], ["N", "Y"]]
            },
            "passthrough": ["Edema_N", "Edema_S", "Edema_Y"]
        },
        "classifier": {
            "classes": [0, 1],
            "trees": [
                {"nodes": [
                    {"kind": "split", "feature": 1, "threshold": 2.0, "left": 1, "right": 2},
                    {"kind": "leaf", "value": [10.0, 0.0]},
                    {"kind": "leaf", "value": [0.0, 10.0]}
                ]}
            ]
        }
    }"#;

    fn write_artifact(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_artifact_from_disk() {
        let file = write_artifact(BILIRUBIN_STUMP);
        let pipeline = Pipeline::load(file.path()).unwrap();
        assert_eq!(pipeline.columns().len(), 18);
    }

    #[test]
    fn scores_by_column_name() {
        let pipeline = Pipeline::from_json(BILIRUBIN_STUMP).unwrap();
        let mut record = sample_record();

        record.bilirubin = Some(1.0);
        assert_eq!(pipeline.predict(&record).unwrap(), Label::NEGATIVE);

        record.bilirubin = Some(2.5);
        assert_eq!(pipeline.predict(&record).unwrap(), Label::POSITIVE);
    }

    #[test]
    fn blank_measurement_uses_imputed_value() {
        let pipeline = Pipeline::from_json(BILIRUBIN_STUMP).unwrap();
        let mut record = sample_record();
        record.bilirubin = None;
        // Imputed bilirubin is 3.0, above the split.
        assert_eq!(pipeline.predict(&record).unwrap(), Label::POSITIVE);
    }

    #[test]
    fn repeated_predictions_are_identical() {
        let pipeline = Pipeline::from_json(BILIRUBIN_STUMP).unwrap();
        let record = sample_record();
        let first = pipeline.predict_proba(&record).unwrap();
        for _ in 0..10 {
            assert_eq!(pipeline.predict_proba(&record).unwrap(), first);
        }
    }

    #[test]
    fn category_missing_from_artifact_fails_per_call() {
        let narrowed = BILIRUBIN_STUMP.replace(r#"["N", "Y"]]"#, r#"["N"]]"#);
        let pipeline = Pipeline::from_json(&narrowed).unwrap();
        let mut record = sample_record();
        record.spiders = Indicator::Yes;

        let err = pipeline.predict(&record).unwrap_err();
        assert_eq!(
            err,
            PredictionError::UnknownCategory {
                column: "Spiders".into(),
                value: "Y".into()
            }
        );
    }

    #[test]
    fn column_unknown_to_record_fails_per_call() {
        let renamed = BILIRUBIN_STUMP.replace("\"Copper\"", "\"Copper_ppm\"");
        let pipeline = Pipeline::from_json(&renamed).unwrap();
        let err = pipeline.predict(&sample_record()).unwrap_err();
        assert_eq!(err, PredictionError::MissingField("Copper_ppm".into()));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = Pipeline::load(&dir.path().join("best_model.json")).unwrap_err();
        assert!(matches!(err, ModelError::NotFound(_)));
    }

    #[test]
    fn corrupt_file_fails_to_deserialize() {
        let file = write_artifact("\u{80}not json");
        let err = Pipeline::load(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::Deserialization(_)));
    }

    #[test]
    fn unknown_format_version_is_rejected() {
        let bumped = BILIRUBIN_STUMP.replace("\"format_version\": 1", "\"format_version\": 2");
        let err = Pipeline::from_json(&bumped).unwrap_err();
        assert!(matches!(
            err,
            ModelError::UnsupportedVersion { found: 2, expected: 1 }
        ));
    }

    #[test]
    fn split_beyond_feature_width_is_rejected() {
        let broken = BILIRUBIN_STUMP.replace("\"feature\": 1", "\"feature\": 23");
        let err = Pipeline::from_json(&broken).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn empty_class_list_is_rejected_at_load() {
        let broken = BILIRUBIN_STUMP.replace("\"classes\": [0, 1]", "\"classes\": []");
        let err = Pipeline::from_json(&broken).unwrap_err();
        assert!(matches!(err, ModelError::Invalid(_)));
    }

    #[test]
    fn extra_node_key_is_rejected() {
        let annotated = BILIRUBIN_STUMP.replace(
            "{\"kind\": \"leaf\", \"value\": [10.0, 0.0]}",
            "{\"kind\": \"leaf\", \"value\": [10.0, 0.0], \"gain\": 0.1}",
        );
        assert_ne!(annotated, BILIRUBIN_STUMP);
        let err = Pipeline::from_json(&annotated).unwrap_err();
        assert!(matches!(err, ModelError::Deserialization(_)));
    }

    #[test]
    fn shipped_artifact_loads_and_scores_the_reference_patient() {
        let path = resolve_model_path(None).unwrap();
        let pipeline = Pipeline::load(&path).unwrap();

        let label = pipeline.predict(&sample_record()).unwrap();
        assert!(label == Label::NEGATIVE || label == Label::POSITIVE);
        let sentence = prediction_sentence(label);
        assert!(
            sentence == "Patient is predicted to have cirrhosis."
                || sentence == "Patient is predicted not to have cirrhosis."
        );
    }

    #[test]
    fn shipped_artifact_flags_decompensated_patient() {
        let path = resolve_model_path(None).unwrap();
        let pipeline = Pipeline::load(&path).unwrap();

        let mut record = sample_record();
        record.bilirubin = Some(8.0);
        record.albumin = Some(2.8);
        record.prothrombin = Some(12.5);
        record.platelets = Some(120.0);
        record.ascites = Indicator::Yes;
        record.hepatomegaly = Indicator::Yes;

        assert_eq!(pipeline.predict(&record).unwrap(), Label::POSITIVE);
    }
}
