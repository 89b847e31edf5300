//! Logistic adapter: Implementation of RiskModel over JSON-exported artifacts.
//!
//! Two artifacts are produced by the (out of tree) training pipeline:
//!
//! - `scaler.json`: a fitted standard or min-max scaler
//! - `logistic_model.json`: a fitted binary logistic regression
//!
//! # Integrity
//!
//! An optional `manifest.json` binds both artifacts by SHA-256 digest
//! (see the `hash_model` binary). When present, every digest is checked before
//! anything is parsed. Set `CARDIORISK_REQUIRE_MANIFEST=true` to refuse
//! artifacts that are not bound by a manifest.
//!
//! # Failure mode
//!
//! Every load failure is reported as `CardioriskError::ModelUnavailable`.
//! The caller treats it as fatal: no prediction is possible without both artifacts.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{FeatureVector, ScoringResult, CLASS_DISEASE, CLASS_HEALTHY, NUM_FEATURES};
use crate::ports::RiskModel;
use crate::CardioriskError;

pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "logistic_model.json";
pub const MANIFEST_FILE: &str = "manifest.json";

/// Only manifest version understood by this loader.
pub const MANIFEST_VERSION: u32 = 1;

/// A fitted feature scaler, as exported from the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureScaler {
    /// `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },

    /// `(x - min) / (max - min) * (hi - lo) + lo`
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: [f64; 2],
    },
}

fn default_feature_range() -> [f64; 2] {
    [0.0, 1.0]
}

impl FeatureScaler {
    fn validate(&self) -> Result<(), CardioriskError> {
        let (a, b) = match self {
            Self::Standard { mean, scale } => (mean, scale),
            Self::MinMax {
                data_min,
                data_max,
                feature_range,
            } => {
                let finite = feature_range.iter().all(|v| v.is_finite());
                if !finite || feature_range[0] >= feature_range[1] {
                    return Err(unavailable("scaler feature_range must be finite and increasing"));
                }
                (data_min, data_max)
            }
        };
        check_params("scaler", a)?;
        check_params("scaler", b)
    }

    /// Normalize a raw feature vector.
    ///
    /// Features without a fitted parameter are left at 0.0; `validate` rejects
    /// such scalers at load time.
    #[must_use]
    pub fn transform(&self, features: &FeatureVector) -> [f64; NUM_FEATURES] {
        let mut out = [0.0; NUM_FEATURES];
        let raw = features.as_slice().iter();
        match self {
            Self::Standard { mean, scale } => {
                for ((slot, x), (m, s)) in out.iter_mut().zip(raw).zip(mean.iter().zip(scale)) {
                    *slot = (x - m) / nonzero(*s);
                }
            }
            Self::MinMax {
                data_min,
                data_max,
                feature_range,
            } => {
                let [lo, hi] = *feature_range;
                let bounds = data_min.iter().zip(data_max);
                for ((slot, x), (min, max)) in out.iter_mut().zip(raw).zip(bounds) {
                    let std = (x - min) / nonzero(max - min);
                    *slot = std * (hi - lo) + lo;
                }
            }
        }
        out
    }
}

/// Constant features are fitted with a zero scale; divide by 1 instead.
fn nonzero(v: f64) -> f64 {
    if v == 0.0 {
        1.0
    } else {
        v
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    Logistic,
}

/// A fitted binary logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub kind: ClassifierKind,
    /// Class labels in probability-column order
    pub classes: Vec<u8>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticClassifier {
    fn validate(&self) -> Result<(), CardioriskError> {
        if self.classes != [CLASS_DISEASE, CLASS_HEALTHY] {
            return Err(unavailable(format!(
                "classifier classes must be [0, 1], got {:?}",
                self.classes
            )));
        }
        check_params("classifier", &self.coefficients)?;
        if !self.intercept.is_finite() {
            return Err(unavailable("classifier intercept is not finite"));
        }
        Ok(())
    }

    /// Linear decision value `w·x + b` for an already-scaled vector.
    #[must_use]
    pub fn decision_function(&self, scaled: &[f64; NUM_FEATURES]) -> f64 {
        self.coefficients
            .iter()
            .zip(scaled.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

/// Artifact manifest: SHA-256 digests of the bound files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelManifest {
    pub version: u32,
    #[serde(default)]
    pub created_at: Option<i64>,
    pub files: BTreeMap<String, String>,
}

/// Scaler + classifier loaded from a model directory.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    scaler: FeatureScaler,
    classifier: LogisticClassifier,
}

impl LogisticModel {
    /// Build a model from already-parsed artifacts.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` if the parameters do not match the 13-feature schema.
    pub fn from_parts(
        scaler: FeatureScaler,
        classifier: LogisticClassifier,
    ) -> Result<Self, CardioriskError> {
        scaler.validate()?;
        classifier.validate()?;
        Ok(Self { scaler, classifier })
    }

    /// Load both artifacts from `model_dir`.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` if a file is missing, unreadable, malformed,
    /// fails its manifest digest, or does not match the feature schema.
    pub fn load(model_dir: &Path, require_manifest: bool) -> Result<Self, CardioriskError> {
        ensure_dir(model_dir)?;
        Self::verify_manifest(model_dir, require_manifest)?;

        let model = Self::load_artifacts(model_dir)?;

        tracing::info!(
            "Loaded model from {:?} (scaler={}, n_features={})",
            model_dir,
            model.scaler_kind(),
            NUM_FEATURES
        );
        Ok(model)
    }

    /// Parse and validate both artifacts without consulting `manifest.json`.
    ///
    /// Used when (re)writing the manifest, where the old digests are expected
    /// to be stale.
    ///
    /// # Errors
    /// Returns `ModelUnavailable` if a file is missing, malformed, or does not
    /// match the feature schema.
    pub fn load_artifacts(model_dir: &Path) -> Result<Self, CardioriskError> {
        ensure_dir(model_dir)?;
        let scaler: FeatureScaler = read_json(&model_dir.join(SCALER_FILE))?;
        let classifier: LogisticClassifier = read_json(&model_dir.join(CLASSIFIER_FILE))?;
        Self::from_parts(scaler, classifier)
    }

    fn verify_manifest(model_dir: &Path, require_manifest: bool) -> Result<(), CardioriskError> {
        let manifest_path = model_dir.join(MANIFEST_FILE);
        if !manifest_path.exists() {
            if require_manifest {
                return Err(unavailable(format!(
                    "{MANIFEST_FILE} required but not found in {:?}",
                    model_dir
                )));
            }
            tracing::warn!(
                "No {MANIFEST_FILE} in {:?}; loading artifacts without digest verification",
                model_dir
            );
            return Ok(());
        }

        let manifest: ModelManifest = read_json(&manifest_path)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(unavailable(format!(
                "unsupported manifest version: {}",
                manifest.version
            )));
        }

        for required in [SCALER_FILE, CLASSIFIER_FILE] {
            if !manifest.files.contains_key(required) {
                return Err(unavailable(format!("{MANIFEST_FILE} does not bind {required}")));
            }
        }

        for (rel, expected_hex) in &manifest.files {
            let path = model_dir.join(rel);
            let bytes = fs::read(&path).map_err(|e| {
                unavailable(format!(
                    "manifest references missing/unreadable file {:?}: {e}",
                    path
                ))
            })?;
            if !sha256_hex(&bytes).eq_ignore_ascii_case(expected_hex.trim()) {
                return Err(unavailable(format!("file hash mismatch for {rel}")));
            }
        }

        tracing::info!("Model manifest digests verified");
        Ok(())
    }

    #[must_use]
    pub fn scaler_kind(&self) -> &'static str {
        match self.scaler {
            FeatureScaler::Standard { .. } => "standard",
            FeatureScaler::MinMax { .. } => "min_max",
        }
    }
}

impl RiskModel for LogisticModel {
    fn score(&self, features: &FeatureVector) -> Result<ScoringResult, CardioriskError> {
        let scaled = self.scaler.transform(features);
        let z = self.classifier.decision_function(&scaled);
        let p_healthy = sigmoid(z);

        if !p_healthy.is_finite() {
            return Err(unavailable("classifier produced a non-finite probability"));
        }

        // sklearn semantics: the positive column wins only on a strictly positive decision.
        let predicted_class = if z > 0.0 {
            self.classifier.classes[1]
        } else {
            self.classifier.classes[0]
        };

        tracing::debug!("Decision value={:.4}, p(class 1)={:.4}", z, p_healthy);

        Ok(ScoringResult::new(
            predicted_class,
            [1.0 - p_healthy, p_healthy],
        ))
    }
}

/// Numerically stable logistic function.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Hash both artifacts in `model_dir` and (over)write its `manifest.json`.
///
/// The artifacts must parse and validate first; an existing manifest is ignored.
///
/// # Errors
/// Returns `ModelUnavailable` for unusable artifacts, `Io` if the manifest
/// cannot be written.
pub fn write_manifest(model_dir: &Path, created_at: i64) -> Result<ModelManifest, CardioriskError> {
    LogisticModel::load_artifacts(model_dir)?;

    let mut files = BTreeMap::new();
    for rel in [SCALER_FILE, CLASSIFIER_FILE] {
        let bytes = fs::read(model_dir.join(rel))?;
        files.insert(rel.to_string(), sha256_hex(&bytes));
    }

    let manifest = ModelManifest {
        version: MANIFEST_VERSION,
        created_at: Some(created_at),
        files,
    };
    fs::write(
        model_dir.join(MANIFEST_FILE),
        serde_json::to_vec_pretty(&manifest)?,
    )?;

    tracing::info!("Wrote {MANIFEST_FILE} in {:?}", model_dir);
    Ok(manifest)
}

/// Lowercase hex SHA-256 digest.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CardioriskError> {
    let content = fs::read_to_string(path)
        .map_err(|e| unavailable(format!("failed to read {:?}: {e}", path)))?;
    serde_json::from_str(&content)
        .map_err(|e| unavailable(format!("invalid artifact {:?}: {e}", path)))
}

fn check_params(what: &str, values: &[f64]) -> Result<(), CardioriskError> {
    if values.len() != NUM_FEATURES {
        return Err(unavailable(format!(
            "{what} has {} parameters, expected {NUM_FEATURES}",
            values.len()
        )));
    }
    if !values.iter().all(|v| v.is_finite()) {
        return Err(unavailable(format!("{what} contains non-finite parameters")));
    }
    Ok(())
}

fn ensure_dir(model_dir: &Path) -> Result<(), CardioriskError> {
    if model_dir.is_dir() {
        Ok(())
    } else {
        Err(unavailable(format!("model directory {model_dir:?} not found")))
    }
}

fn unavailable(msg: impl Into<String>) -> CardioriskError {
    CardioriskError::ModelUnavailable(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PatientInput, RiskLevel};
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn bundled_models() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("models")
    }

    fn identity_scaler() -> FeatureScaler {
        FeatureScaler::Standard {
            mean: vec![0.0; NUM_FEATURES],
            scale: vec![1.0; NUM_FEATURES],
        }
    }

    fn classifier(coefficients: Vec<f64>, intercept: f64) -> LogisticClassifier {
        LogisticClassifier {
            kind: ClassifierKind::Logistic,
            classes: vec![0, 1],
            coefficients,
            intercept,
        }
    }

    fn model_with(coefficient: f64, intercept: f64) -> LogisticModel {
        LogisticModel::from_parts(
            identity_scaler(),
            classifier(vec![coefficient; NUM_FEATURES], intercept),
        )
        .expect("valid parts")
    }

    fn write_artifacts(dir: &Path, intercept: f64) {
        let scaler = serde_json::to_string(&identity_scaler()).expect("serialize scaler");
        let model = serde_json::to_string(&classifier(vec![0.0; NUM_FEATURES], intercept))
            .expect("serialize model");
        fs::write(dir.join(SCALER_FILE), scaler).expect("write scaler");
        fs::write(dir.join(CLASSIFIER_FILE), model).expect("write model");
    }

    fn write_manifest_with(dir: &Path, files: &[(&str, String)]) {
        let manifest = ModelManifest {
            version: MANIFEST_VERSION,
            created_at: None,
            files: files
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        };
        fs::write(
            dir.join(MANIFEST_FILE),
            serde_json::to_vec(&manifest).expect("serialize manifest"),
        )
        .expect("write manifest");
    }

    fn digest_of(dir: &Path, rel: &str) -> String {
        sha256_hex(&fs::read(dir.join(rel)).expect("read artifact"))
    }

    #[test]
    fn test_bundled_model_scores_default_patient_high() {
        let model = LogisticModel::load(&bundled_models(), true).expect("Model should load");
        let features = model.encode(&PatientInput::default()).expect("Should encode");
        let result = model.score(&features).expect("Should score");

        assert_eq!(result.predicted_class, 0);
        assert_eq!(result.risk_level(), RiskLevel::High);
        let p = result.probability_of_disease();
        assert!(p > 0.68 && p < 0.70, "unexpected probability {p}");
        assert!((result.class_probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decision_boundary_polarity() {
        // Positive decision => class 1 (healthy), probability of disease below 0.5.
        let model = model_with(0.0, 2.0);
        let features = FeatureVector::encode(&PatientInput::default()).expect("encode");
        let result = model.score(&features).expect("score");
        assert_eq!(result.predicted_class, 1);
        assert!(result.probability_of_disease() < 0.5);

        // Zero decision => class 0, exactly 50%.
        let model = model_with(0.0, 0.0);
        let result = model.score(&features).expect("score");
        assert_eq!(result.predicted_class, 0);
        assert!((result.probability_of_disease() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_extreme_decision_stays_in_unit_interval() {
        let model = model_with(100.0, 0.0);
        let features = FeatureVector::encode(&PatientInput::default()).expect("encode");
        let p = model.score(&features).expect("score").probability_of_disease();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_min_max_scaler_transform() {
        let scaler = FeatureScaler::MinMax {
            data_min: vec![0.0; NUM_FEATURES],
            data_max: vec![100.0; NUM_FEATURES],
            feature_range: [-1.0, 1.0],
        };
        scaler.validate().expect("valid scaler");
        let features = FeatureVector::encode(&PatientInput::default()).expect("encode");
        let scaled = scaler.transform(&features);
        // age 58 => 0.58 * 2 - 1
        assert!((scaled[0] - 0.16).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_scaler_defaults_range_when_parsing() {
        let json = format!(
            r#"{{"kind":"min_max","data_min":{:?},"data_max":{:?}}}"#,
            vec![0.0; NUM_FEATURES],
            vec![10.0; NUM_FEATURES]
        );
        let scaler: FeatureScaler = serde_json::from_str(&json).expect("parse");
        assert!(matches!(
            scaler,
            FeatureScaler::MinMax { feature_range, .. } if feature_range == [0.0, 1.0]
        ));
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let mut scale = vec![1.0; NUM_FEATURES];
        scale[5] = 0.0;
        let scaler = FeatureScaler::Standard {
            mean: vec![0.0; NUM_FEATURES],
            scale,
        };
        let features = FeatureVector::encode(&PatientInput {
            fasting_blood_sugar: true,
            ..PatientInput::default()
        })
        .expect("encode");
        assert!((scaler.transform(&features)[5] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_wrong_parameter_count() {
        let err = LogisticModel::from_parts(identity_scaler(), classifier(vec![1.0; 9], 0.0))
            .expect_err("must fail");
        assert!(matches!(err, CardioriskError::ModelUnavailable(_)));
    }

    #[test]
    fn test_rejects_unexpected_classes() {
        let mut c = classifier(vec![0.0; NUM_FEATURES], 0.0);
        c.classes = vec![1, 0];
        assert!(LogisticModel::from_parts(identity_scaler(), c).is_err());
    }

    #[test]
    fn test_missing_directory_is_unavailable() {
        let temp = tempdir().expect("tempdir");
        let err = LogisticModel::load(&temp.path().join("nope"), false).expect_err("must fail");
        assert!(matches!(err, CardioriskError::ModelUnavailable(_)));
    }

    #[test]
    fn test_missing_artifact_is_unavailable() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path(), 0.0);
        fs::remove_file(temp.path().join(SCALER_FILE)).expect("remove");
        let err = LogisticModel::load(temp.path(), false).expect_err("must fail");
        assert!(err.to_string().contains("scaler.json"));
    }

    #[test]
    fn test_unsigned_artifacts_load_unless_manifest_required() {
        let temp = tempdir().expect("tempdir");
        write_artifacts(temp.path(), 0.5);

        assert!(LogisticModel::load(temp.path(), false).is_ok());
        assert!(LogisticModel::load(temp.path(), true).is_err());
    }

    #[test]
    fn test_manifest_digest_verified() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifacts(dir, 0.5);
        write_manifest_with(
            dir,
            &[
                (SCALER_FILE, digest_of(dir, SCALER_FILE)),
                (CLASSIFIER_FILE, digest_of(dir, CLASSIFIER_FILE)),
            ],
        );
        LogisticModel::load(dir, true).expect("manifest matches");

        // Tamper with the classifier after the manifest was written.
        write_artifacts(dir, -3.0);
        let err = LogisticModel::load(dir, true).expect_err("must fail");
        assert!(err.to_string().contains("hash mismatch"));
    }

    #[test]
    fn test_manifest_must_bind_both_artifacts() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifacts(dir, 0.5);
        write_manifest_with(dir, &[(SCALER_FILE, digest_of(dir, SCALER_FILE))]);

        let err = LogisticModel::load(dir, false).expect_err("must fail");
        assert!(err.to_string().contains(CLASSIFIER_FILE));
    }

    #[test]
    fn test_rehash_after_artifact_change() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifacts(dir, 0.5);
        write_manifest(dir, 1_791_763_200).expect("first manifest");
        LogisticModel::load(dir, true).expect("manifest matches");

        // Retrained classifier: the old manifest is now stale.
        write_artifacts(dir, -3.0);
        assert!(LogisticModel::load(dir, true).is_err());

        let manifest = write_manifest(dir, 1_791_849_600).expect("rehash");
        assert_eq!(manifest.created_at, Some(1_791_849_600));
        assert_eq!(manifest.files[CLASSIFIER_FILE], digest_of(dir, CLASSIFIER_FILE));

        let model = LogisticModel::load(dir, true).expect("fresh manifest matches");
        let features = FeatureVector::encode(&PatientInput::default()).expect("encode");
        assert_eq!(model.score(&features).expect("score").predicted_class, 0);
    }

    #[test]
    fn test_manifest_not_written_for_invalid_artifacts() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path();
        write_artifacts(dir, 0.5);
        let short = classifier(vec![0.0; 9], 0.5);
        fs::write(
            dir.join(CLASSIFIER_FILE),
            serde_json::to_string(&short).expect("serialize"),
        )
        .expect("write");

        let err = write_manifest(dir, 0).expect_err("must fail");
        assert!(matches!(err, CardioriskError::ModelUnavailable(_)));
        assert!(!dir.join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_transform_tolerates_short_scaler() {
        let scaler = FeatureScaler::Standard {
            mean: vec![0.0; 3],
            scale: vec![2.0; 3],
        };
        assert!(scaler.validate().is_err());

        let features = FeatureVector::encode(&PatientInput::default()).expect("encode");
        let scaled = scaler.transform(&features);
        assert!((scaled[0] - 29.0).abs() < f64::EPSILON);
        assert_eq!(scaled[3], 0.0);
    }
}
