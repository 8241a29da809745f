use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::generator::records::SemanticModel;

/// Text format of the written model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Block-style YAML.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// `.json` selects JSON; anything else is YAML.
    pub fn from_path(path: &Path) -> Self {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        }
    }
}

/// Render the model as text.
pub fn render(model: &SemanticModel, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(model).map_err(|e| ConvertError::Serialize(e.to_string()))
        }
        OutputFormat::Json => serde_json::to_string_pretty(model)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| ConvertError::Serialize(e.to_string())),
    }
}

/// Render the model in the format implied by `path` and write it there.
///
/// Missing parent directories are created.
pub fn write_output(path: &Path, model: &SemanticModel) -> Result<()> {
    let content = render(model, OutputFormat::from_path(path))?;
    write_text(path, &content)
}

/// Write text to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    let output_error = |source: std::io::Error| ConvertError::Output {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_error)?;
    }
    std::fs::write(path, content).map_err(output_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_follows_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.JSON")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path(Path::new("out.yml")), OutputFormat::Yaml);
        assert_eq!(OutputFormat::from_path(Path::new("out")), OutputFormat::Yaml);
    }

    #[test]
    fn write_output_reports_directory_creation_errors() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file").expect("should create marker file");

        let err = write_output(&blocker.join("model.yml"), &SemanticModel::default())
            .expect_err("writing below a file should fail");
        assert!(matches!(err, ConvertError::Output { .. }));
        assert!(err.to_string().contains("failed to write"));
    }

    #[test]
    fn write_output_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let path = dir.path().join("nested/out/model.yml");

        write_output(&path, &SemanticModel::default()).expect("write should succeed");

        let written = std::fs::read_to_string(&path).expect("output should exist");
        assert!(written.contains("cubes: []"));
        assert!(written.contains("measures: []"));
    }
}
