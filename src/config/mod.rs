//! Configuration system with YAML schema and validation.
//!
//! Mistake-proofing happens in three layers:
//! - Type-safe configuration structs
//! - Field constraints via `validator`
//! - Semantic validation of cross-field rules
//!
//! Defaults reproduce the classic run: 1000 integer samples in a square of
//! half-width 100.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::{Estimator, SamplingMode};
use crate::error::{SimError, SimResult};
use crate::visualization::ExportFormat;

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PiConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Reproducibility settings.
    #[validate(nested)]
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Sampling settings.
    #[validate(nested)]
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Output artifacts.
    #[validate(nested)]
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl PiConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> SimResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> SimResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SimError::serialization(format!("YAML serialization failed: {e}")))
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> PiConfigBuilder {
        PiConfigBuilder::default()
    }

    /// Run field and semantic validation.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> SimResult<()> {
        self.validate()?;
        self.validate_semantic()
    }

    /// Validate semantic constraints beyond schema.
    fn validate_semantic(&self) -> SimResult<()> {
        let radius = self.sampling.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::config(format!(
                "sampling.radius must be a finite positive number, got {radius}"
            )));
        }
        if !Estimator::supports_radius(radius) {
            return Err(SimError::config(format!(
                "sampling.radius squared must be a normal f64, got {radius}"
            )));
        }
        if self.sampling.mode == SamplingMode::Integer && radius.fract() != 0.0 {
            return Err(SimError::config(format!(
                "integer sampling needs a whole-number radius, got {radius}"
            )));
        }

        let out = &self.output;
        let names = [&out.estimate_chart, &out.error_chart, &out.scene];
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(SimError::config("output file names must not be empty"));
        }
        if out.estimate_chart == out.error_chart
            || out.estimate_chart == out.scene
            || out.error_chart == out.scene
        {
            return Err(SimError::config("output file names must be distinct"));
        }

        Ok(())
    }
}

impl Default for PiConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reproducibility: ReproducibilityConfig::default(),
            sampling: SamplingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct PiConfigBuilder {
    seed: Option<u64>,
    samples: Option<u64>,
    radius: Option<f64>,
    mode: Option<SamplingMode>,
    output_dir: Option<PathBuf>,
    render_scene: Option<bool>,
    export: Option<ExportFormat>,
}

impl PiConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of samples.
    #[must_use]
    pub const fn samples(mut self, samples: u64) -> Self {
        self.samples = Some(samples);
        self
    }

    /// Set the circle radius.
    #[must_use]
    pub const fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Set the sampling mode.
    #[must_use]
    pub const fn mode(mut self, mode: SamplingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable the scene rendering.
    #[must_use]
    pub const fn render_scene(mut self, enabled: bool) -> Self {
        self.render_scene = Some(enabled);
        self
    }

    /// Request a data export.
    #[must_use]
    pub const fn export(mut self, format: ExportFormat) -> Self {
        self.export = Some(format);
        self
    }

    /// Build the configuration.
    ///
    /// The result is not validated; call [`PiConfig::check`] before use.
    #[must_use]
    pub fn build(self) -> PiConfig {
        let mut config = PiConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(samples) = self.samples {
            config.sampling.samples = samples;
        }
        if let Some(radius) = self.radius {
            config.sampling.radius = radius;
        }
        if let Some(mode) = self.mode {
            config.sampling.mode = mode;
        }
        if let Some(dir) = self.output_dir {
            config.output.dir = dir;
        }
        if let Some(enabled) = self.render_scene {
            config.output.render_scene = enabled;
        }
        if self.export.is_some() {
            config.output.export = self.export;
        }

        config
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ReproducibilityConfig {
    /// Master seed for the RNG.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

const fn default_seed() -> u64 {
    42
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

/// Sampling settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Number of samples.
    #[validate(range(min = 1))]
    #[serde(default = "default_samples")]
    pub samples: u64,
    /// Circle radius, half the side of the square.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Coordinate domain.
    #[serde(default)]
    pub mode: SamplingMode,
}

const fn default_samples() -> u64 {
    1000
}

const fn default_radius() -> f64 {
    100.0
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            radius: default_radius(),
            mode: SamplingMode::default(),
        }
    }
}

/// Output artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving all artifacts.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Estimate convergence chart file name.
    #[serde(default = "default_estimate_chart")]
    pub estimate_chart: String,
    /// Error chart file name.
    #[serde(default = "default_error_chart")]
    pub error_chart: String,
    /// Sample scene file name.
    #[serde(default = "default_scene")]
    pub scene: String,
    /// Whether to render the sample scene.
    #[serde(default = "default_true")]
    pub render_scene: bool,
    /// Optional data export.
    #[serde(default)]
    pub export: Option<ExportFormat>,
    /// Image width in pixels.
    #[validate(range(min = 100, max = 10_000))]
    #[serde(default = "default_width")]
    pub width: u32,
    /// Image height in pixels.
    #[validate(range(min = 100, max = 10_000))]
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_estimate_chart() -> String {
    "pi_estimate.svg".to_string()
}

fn default_error_chart() -> String {
    "pi_error.svg".to_string()
}

fn default_scene() -> String {
    "samples.svg".to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_width() -> u32 {
    1200
}

const fn default_height() -> u32 {
    900
}

impl OutputConfig {
    /// Full path of the estimate chart.
    #[must_use]
    pub fn estimate_chart_path(&self) -> PathBuf {
        self.dir.join(&self.estimate_chart)
    }

    /// Full path of the error chart.
    #[must_use]
    pub fn error_chart_path(&self) -> PathBuf {
        self.dir.join(&self.error_chart)
    }

    /// Full path of the sample scene.
    #[must_use]
    pub fn scene_path(&self) -> PathBuf {
        self.dir.join(&self.scene)
    }

    /// Full path of the data export, if one is configured.
    #[must_use]
    pub fn export_path(&self) -> Option<PathBuf> {
        self.export
            .map(|format| self.dir.join(format!("pi_run.{}", format.extension())))
    }

    /// Image size as `(width, height)`.
    #[must_use]
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            estimate_chart: default_estimate_chart(),
            error_chart: default_error_chart(),
            scene: default_scene(),
            render_scene: true,
            export: None,
            width: default_width(),
            height: default_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = PiConfig::default();

        assert_eq!(config.schema_version, "1.0");
        assert_eq!(config.reproducibility.seed, 42);
        assert_eq!(config.sampling.samples, 1000);
        assert!((config.sampling.radius - 100.0).abs() < f64::EPSILON);
        assert_eq!(config.sampling.mode, SamplingMode::Integer);
        assert!(config.output.render_scene);
        assert!(config.output.export.is_none());
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
schema_version: "1.0"
reproducibility:
  seed: 7
sampling:
  samples: 5000
  radius: 1.5
  mode: continuous
output:
  dir: out
  export: json-lines
  width: 800
  height: 600
"#;
        let config = PiConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.reproducibility.seed, 7);
        assert_eq!(config.sampling.samples, 5000);
        assert_eq!(config.sampling.mode, SamplingMode::Continuous);
        assert_eq!(config.output.export, Some(ExportFormat::JsonLines));
        assert_eq!(config.output.size(), (800, 600));
        assert_eq!(config.output.estimate_chart_path(), PathBuf::from("out/pi_estimate.svg"));
        assert_eq!(config.output.export_path(), Some(PathBuf::from("out/pi_run.jsonl")));
    }

    #[test]
    fn test_config_empty_yaml_uses_defaults() {
        let config = PiConfig::from_yaml("{}").unwrap();
        assert_eq!(config.sampling.samples, 1000);
        assert_eq!(config.output.scene, "samples.svg");
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        let result = PiConfig::from_yaml("sampling:\n  samples: 10\n  sides: 6\n");
        assert!(matches!(result, Err(SimError::YamlParse(_))));
    }

    #[test]
    fn test_config_rejects_zero_samples() {
        let result = PiConfig::from_yaml("sampling:\n  samples: 0\n");
        assert!(matches!(result, Err(SimError::Validation(_))));
    }

    #[test]
    fn test_config_rejects_non_positive_radius() {
        let result = PiConfig::from_yaml("sampling:\n  radius: -3\n");
        assert!(matches!(result, Err(SimError::Config { .. })));
    }

    #[test]
    fn test_config_rejects_radius_with_degenerate_square() {
        for radius in ["1.0e200", "1.0e-200"] {
            let yaml = format!("sampling:\n  radius: {radius}\n  mode: continuous\n");
            let err = PiConfig::from_yaml(&yaml).unwrap_err();
            assert!(err.to_string().contains("radius squared"), "radius {radius}");
        }
        let yaml = "sampling:\n  radius: 1.0e-100\n  mode: continuous\n";
        assert!(PiConfig::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_config_rejects_fractional_integer_radius() {
        let result = PiConfig::from_yaml("sampling:\n  radius: 2.5\n  mode: integer\n");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("whole-number radius"));
    }

    #[test]
    fn test_config_rejects_duplicate_file_names() {
        let yaml = "output:\n  estimate_chart: a.svg\n  error_chart: a.svg\n";
        let err = PiConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn test_config_rejects_tiny_image() {
        let result = PiConfig::from_yaml("output:\n  width: 10\n");
        assert!(matches!(result, Err(SimError::Validation(_))));
    }

    #[test]
    fn test_builder() {
        let config = PiConfig::builder()
            .seed(99)
            .samples(10)
            .radius(4.0)
            .mode(SamplingMode::Continuous)
            .output_dir("/tmp/pi")
            .render_scene(false)
            .export(ExportFormat::Csv)
            .build();

        assert_eq!(config.reproducibility.seed, 99);
        assert_eq!(config.sampling.samples, 10);
        assert!((config.sampling.radius - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.sampling.mode, SamplingMode::Continuous);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/pi"));
        assert!(!config.output.render_scene);
        assert_eq!(config.output.export, Some(ExportFormat::Csv));
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip_preserves_settings() {
        let config = PiConfig::builder().seed(5).samples(321).build();
        let yaml = config.to_yaml().unwrap();
        let parsed = PiConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.reproducibility.seed, 5);
        assert_eq!(parsed.sampling.samples, 321);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PiConfig::load("/nonexistent/pisim.yaml");
        assert!(matches!(result, Err(SimError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.yaml");
        std::fs::write(&path, "reproducibility:\n  seed: 3\n").unwrap();
        let config = PiConfig::load(&path).unwrap();
        assert_eq!(config.reproducibility.seed, 3);
    }
}
