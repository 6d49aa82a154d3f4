//! Schema descriptors

use crate::infer::{Kind, KindInfo};
use serde::{Deserialize, Serialize};

/// Title of the classifier output slot
pub const CLASSIFIER_TITLE: &str = "Predicted class";

/// Title of the regressor output slot
pub const REGRESSOR_TITLE: &str = "Predicted value";

/// One input feature: its name, kind and kind-specific metadata
///
/// Serializes flat, e.g. `{"title": "age", "required": true, "type": "number",
/// "min": 18.0, "max": 90.0, "integer": true}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Feature name
    #[serde(rename = "title")]
    pub name: String,

    /// Every feature must be supplied at prediction time
    pub required: bool,

    /// Kind and metadata
    #[serde(flatten)]
    pub info: KindInfo,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, info: KindInfo) -> Self {
        Self {
            name: name.into(),
            required: true,
            info,
        }
    }

    pub fn kind(&self) -> Kind {
        self.info.kind()
    }
}

/// Model output slot, determined by the model's task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputDescriptor {
    Classifier {
        title: String,
        /// Class labels in the model's own order
        mapping: Vec<String>,
        details: bool,
    },
    Regressor {
        title: String,
    },
}

impl OutputDescriptor {
    /// Classifier output with labels in probability order
    pub fn classifier(labels: Vec<String>) -> Self {
        Self::Classifier {
            title: CLASSIFIER_TITLE.to_string(),
            mapping: labels,
            details: false,
        }
    }

    pub fn regressor() -> Self {
        Self::Regressor {
            title: REGRESSOR_TITLE.to_string(),
        }
    }

    /// Class labels, for classifiers
    pub fn labels(&self) -> Option<&[String]> {
        match self {
            Self::Classifier { mapping, .. } => Some(mapping),
            Self::Regressor { .. } => None,
        }
    }
}

/// Input fields in model feature order plus the single output slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub inputs: Vec<FieldDescriptor>,
    pub outputs: Vec<OutputDescriptor>,
}

impl Schema {
    pub fn new(inputs: Vec<FieldDescriptor>, output: OutputDescriptor) -> Self {
        Self {
            inputs,
            outputs: vec![output],
        }
    }

    /// Input field names in order
    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().map(|f| f.name.as_str()).collect()
    }

    /// Look up an input field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.inputs.iter().find(|f| f.name == name)
    }
}
