use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Data, Env, Format, Json, Yaml};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unsupported file or missing file extension: {0:?}")]
    UnsupportedFile(PathBuf),
    #[error("General parsing error: `{0}`")]
    GeneralParsingError(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub database_url: String,
    pub trace_level: Option<String>,
    pub trace_json: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ConfigRoot {
    app: AppConfig,
}

pub enum InputFormat {
    Yaml(Data<Yaml>),
    Json(Data<Json>),
}

impl AppConfig {
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            let path = path.as_ref();
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("yml" | "yaml") => inputs.push(InputFormat::Yaml(Yaml::file(path))),
                Some("json") => inputs.push(InputFormat::Json(Json::file(path))),
                _ => return Err(ConfigError::UnsupportedFile(path.to_owned())),
            }
        }

        Self::parse(inputs)
    }

    #[cfg(test)]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigError> {
        let inputs = configs
            .into_iter()
            .map(|s| Yaml::string(s.as_ref()))
            .map(InputFormat::Yaml);

        Self::parse(inputs)
    }

    /// Merges `inputs` in order, then `MIGRATION_`-prefixed environment variables.
    pub fn parse(inputs: impl IntoIterator<Item = InputFormat>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                InputFormat::Yaml(content) => figment.merge(content),
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        figment = figment.merge(Env::prefixed("MIGRATION_").split("__").lowercase(false));

        let root = figment
            .extract::<ConfigRoot>()
            .map_err(|e| ConfigError::GeneralParsingError(e.to_string()))?;

        Ok(root.app)
    }

    pub fn trace_level(&self) -> &str {
        self.trace_level.as_deref().unwrap_or("info")
    }
}
