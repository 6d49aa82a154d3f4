//! Model artifact format and loading

use super::estimator::{Estimator, EstimatorSpec};
use super::ModelError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported artifact serializations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactFormat {
    Json,
    Yaml,
}

impl ArtifactFormat {
    pub fn extension(&self) -> &str {
        match self {
            ArtifactFormat::Json => "json",
            ArtifactFormat::Yaml => "yaml",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ArtifactFormat::Json),
            "yaml" | "yml" => Some(ArtifactFormat::Yaml),
            _ => None,
        }
    }

    /// Detect format from an uploaded file name or a path
    pub fn from_file_name(name: &str) -> Result<Self, ModelError> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ModelError::UnsupportedFormat(name.to_string()))
    }
}

/// A trained estimator plus the column names it was fitted on
///
/// ```yaml
/// estimator: LogisticRegression
/// feature_names_in: [age, income]
/// classes: [no, yes]
/// coef: [[0.04, 0.00002]]
/// intercept: [-3.1]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Fit-time column names; absent when fitted on an unnamed matrix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names_in: Option<Vec<String>>,

    #[serde(flatten)]
    pub estimator: EstimatorSpec,
}

impl ModelArtifact {
    pub fn new(estimator: EstimatorSpec) -> Self {
        Self {
            feature_names_in: None,
            estimator,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names_in = Some(names);
        self
    }

    /// Check estimator parameters and their agreement with the fitted names
    pub fn validate(&self) -> Result<(), ModelError> {
        self.estimator.validate()?;

        if let (Some(names), Some(width)) = (&self.feature_names_in, self.estimator.n_features()) {
            if names.len() != width {
                return Err(ModelError::InvalidArtifact(format!(
                    "{} declares {} feature names but was fitted on {} features",
                    self.estimator.specific_type(),
                    names.len(),
                    width
                )));
            }
        }
        Ok(())
    }

    /// Serialize to bytes in the given format
    pub fn to_bytes(&self, format: ArtifactFormat) -> Result<Vec<u8>> {
        let bytes = match format {
            ArtifactFormat::Json => serde_json::to_vec_pretty(self).map_err(|e| {
                crate::Error::Serialization(format!("JSON serialization failed: {e}"))
            })?,
            ArtifactFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| {
                    crate::Error::Serialization(format!("YAML serialization failed: {e}"))
                })?
                .into_bytes(),
        };
        Ok(bytes)
    }
}

/// Decode and validate an artifact from raw bytes
pub fn parse_artifact(bytes: &[u8], format: ArtifactFormat) -> Result<ModelArtifact, ModelError> {
    let artifact: ModelArtifact = match format {
        ArtifactFormat::Json => serde_json::from_slice(bytes).map_err(|e| {
            ModelError::InvalidArtifact(format!("JSON deserialization failed: {e}"))
        })?,
        ArtifactFormat::Yaml => serde_yaml::from_slice(bytes).map_err(|e| {
            ModelError::InvalidArtifact(format!("YAML deserialization failed: {e}"))
        })?,
    };

    artifact.validate()?;
    Ok(artifact)
}

/// Load an artifact from a file; the format comes from the extension
///
/// # Example
///
/// ```no_run
/// use tabserve::model::load_artifact;
///
/// let artifact = load_artifact("model.yaml").unwrap();
/// println!("{}", artifact.estimator.specific_type());
/// ```
pub fn load_artifact(path: impl AsRef<Path>) -> Result<ModelArtifact> {
    let path = path.as_ref();
    let format = ArtifactFormat::from_file_name(&path.to_string_lossy())?;
    let bytes = std::fs::read(path)?;
    Ok(parse_artifact(&bytes, format)?)
}

/// Write an artifact; the format comes from the extension
pub fn save_artifact(artifact: &ModelArtifact, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ArtifactFormat::from_file_name(&path.to_string_lossy())?;
    std::fs::write(path, artifact.to_bytes(format)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearRegression, TaskType};
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ArtifactFormat::from_extension("json"), Some(ArtifactFormat::Json));
        assert_eq!(ArtifactFormat::from_extension("YML"), Some(ArtifactFormat::Yaml));
        assert_eq!(ArtifactFormat::from_extension("pkl"), None);
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(
            ArtifactFormat::from_file_name("models/churn.yaml").unwrap(),
            ArtifactFormat::Yaml
        );
        assert_eq!(
            ArtifactFormat::from_file_name("model.joblib"),
            Err(ModelError::UnsupportedFormat("model.joblib".to_string()))
        );
        assert!(ArtifactFormat::from_file_name("model").is_err());
    }

    #[test]
    fn test_parse_yaml_artifact() {
        let yaml = b"estimator: LinearRegression\n\
            feature_names_in: [a, b]\n\
            coef: [1.0, 2.0]\n\
            intercept: 0.5\n";
        let artifact = parse_artifact(yaml, ArtifactFormat::Yaml).unwrap();
        assert_eq!(artifact.estimator.specific_type(), "LinearRegression");
        assert_eq!(artifact.estimator.task_type(), TaskType::Regressor);
        assert_eq!(
            artifact.feature_names_in,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_parse_unknown_estimator() {
        let json = br#"{"estimator": "RandomForestClassifier", "n_estimators": 100}"#;
        let err = parse_artifact(json, ArtifactFormat::Json).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_class_prior() {
        let json =
            br#"{"estimator": "DummyClassifier", "classes": [0, 1], "class_prior": [2.0, -1.0]}"#;
        let err = parse_artifact(json, ArtifactFormat::Json).unwrap_err();
        assert!(matches!(err, ModelError::InvalidArtifact(_)));
    }

    #[test]
    fn test_feature_names_width_mismatch() {
        let json = br#"{
            "estimator": "LinearRegression",
            "feature_names_in": ["a"],
            "coef": [1.0, 2.0]
        }"#;
        let err = parse_artifact(json, ArtifactFormat::Json).unwrap_err();
        assert!(err.to_string().contains("declares 1 feature names"));
    }

    #[test]
    fn test_save_and_load_file() {
        let artifact = ModelArtifact::new(EstimatorSpec::Ridge(LinearRegression::new(
            vec![0.5, 0.25],
            1.0,
        )))
        .with_feature_names(vec!["x".to_string(), "y".to_string()]);

        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        save_artifact(&artifact, file.path()).unwrap();

        let loaded = load_artifact(file.path()).unwrap();
        assert_eq!(loaded, artifact);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("pkl");
        assert!(load_artifact(&path).is_err());
    }
}
