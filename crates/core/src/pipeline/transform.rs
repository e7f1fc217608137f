//! Column preprocessing: imputation and standard scaling for numeric columns, one-hot encoding
//! for categorical columns, passthrough for pre-encoded indicators.
//!
//! The output vector is laid out step by step: numeric columns first, then the one-hot blocks of
//! each categorical column, then passthrough columns.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{ModelError, ModelResult, PredictionError, PredictionResult};
use crate::record::Cell;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct NumericStep {
    pub(crate) columns: Vec<String>,
    /// Value substituted for a blank measurement, per column.
    pub(crate) impute: Vec<f64>,
    pub(crate) mean: Vec<f64>,
    pub(crate) scale: Vec<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CategoricalStep {
    pub(crate) columns: Vec<String>,
    /// Known categories per column, in encoding order.
    pub(crate) categories: Vec<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ColumnTransformer {
    pub(crate) numeric: NumericStep,
    pub(crate) categorical: CategoricalStep,
    #[serde(default)]
    pub(crate) passthrough: Vec<String>,
}

impl ColumnTransformer {
    /// Number of features produced for the classifier.
    pub(crate) fn output_width(&self) -> usize {
        self.numeric.columns.len()
            + self.categorical.categories.iter().map(Vec::len).sum::<usize>()
            + self.passthrough.len()
    }

    /// Check internal consistency against the pipeline's declared input columns.
    pub(crate) fn validate(&self, input_columns: &[String]) -> ModelResult<()> {
        let n = self.numeric.columns.len();
        if self.numeric.impute.len() != n
            || self.numeric.mean.len() != n
            || self.numeric.scale.len() != n
        {
            return Err(ModelError::Invalid(
                "numeric step parameters do not match its column count".into(),
            ));
        }
        let params = self
            .numeric
            .impute
            .iter()
            .chain(&self.numeric.mean)
            .chain(&self.numeric.scale);
        for value in params {
            if !value.is_finite() {
                return Err(ModelError::Invalid(
                    "numeric step parameters must be finite".into(),
                ));
            }
        }
        if let Some(pos) = self.numeric.scale.iter().position(|s| *s == 0.0) {
            return Err(ModelError::Invalid(format!(
                "numeric column {} has zero scale",
                self.numeric.columns[pos]
            )));
        }

        if self.categorical.categories.len() != self.categorical.columns.len() {
            return Err(ModelError::Invalid(
                "categorical step needs one category list per column".into(),
            ));
        }
        let categorical = &self.categorical;
        for (column, categories) in categorical.columns.iter().zip(&categorical.categories) {
            if categories.is_empty() {
                return Err(ModelError::Invalid(format!(
                    "categorical column {column} has no categories"
                )));
            }
            let unique: HashSet<&String> = categories.iter().collect();
            if unique.len() != categories.len() {
                return Err(ModelError::Invalid(format!(
                    "categorical column {column} has duplicate categories"
                )));
            }
        }

        let mut claimed = HashSet::new();
        let step_columns = self
            .numeric
            .columns
            .iter()
            .chain(&self.categorical.columns)
            .chain(&self.passthrough);
        for column in step_columns {
            if !claimed.insert(column.as_str()) {
                return Err(ModelError::Invalid(format!(
                    "column {column} is claimed by more than one step"
                )));
            }
            if !input_columns.contains(column) {
                return Err(ModelError::Invalid(format!(
                    "column {column} is not an input column"
                )));
            }
        }
        if let Some(unclaimed) = input_columns.iter().find(|c| !claimed.contains(c.as_str())) {
            return Err(ModelError::Invalid(format!(
                "input column {unclaimed} is not handled by any step"
            )));
        }

        Ok(())
    }

    /// Turn one named row into the classifier's feature vector.
    ///
    /// Expects a transformer that passed [`ColumnTransformer::validate`].
    pub(crate) fn transform(&self, row: &[(&'static str, Cell)]) -> PredictionResult<Vec<f64>> {
        let mut features = Vec::with_capacity(self.output_width());

        for (i, column) in self.numeric.columns.iter().enumerate() {
            let value = match lookup(row, column)? {
                Cell::Number(value) => value.unwrap_or(self.numeric.impute[i]),
                Cell::Category(_) => return Err(incompatible(column, "numeric")),
            };
            features.push((value - self.numeric.mean[i]) / self.numeric.scale[i]);
        }

        let categorical = &self.categorical;
        for (column, categories) in categorical.columns.iter().zip(&categorical.categories) {
            let value = match lookup(row, column)? {
                Cell::Category(value) => value,
                Cell::Number(_) => return Err(incompatible(column, "categorical")),
            };
            let hot = categories.iter().position(|c| c == value).ok_or_else(|| {
                PredictionError::UnknownCategory {
                    column: column.clone(),
                    value: value.to_string(),
                }
            })?;
            features.extend((0..categories.len()).map(|j| if j == hot { 1.0 } else { 0.0 }));
        }

        for column in &self.passthrough {
            match lookup(row, column)? {
                Cell::Number(Some(value)) => features.push(value),
                Cell::Number(None) => {
                    return Err(PredictionError::MissingField(column.clone()));
                }
                Cell::Category(_) => return Err(incompatible(column, "numeric")),
            }
        }

        Ok(features)
    }
}

fn lookup(row: &[(&'static str, Cell)], column: &str) -> PredictionResult<Cell> {
    row.iter()
        .find(|(name, _)| *name == column)
        .map(|(_, cell)| *cell)
        .ok_or_else(|| PredictionError::MissingField(column.to_string()))
}

fn incompatible(column: &str, expected: &'static str) -> PredictionError {
    PredictionError::IncompatibleType {
        column: column.to_string(),
        expected,
    }
}
