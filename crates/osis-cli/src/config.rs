use std::path::{Path, PathBuf};

use miette::Diagnostic;
use osis_renderer::RenderParameters;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("couldn't read {}", path.display())]
    #[diagnostic(code(osis2html::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}", path.display())]
    #[diagnostic(code(osis2html::config::toml))]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    #[diagnostic(code(osis2html::config::json))]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown config format for {}", path.display())]
    #[diagnostic(
        code(osis2html::config::format),
        help("use a .toml or .json file")
    )]
    UnknownFormat { path: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Reads render parameters from a TOML or JSON file. Missing keys keep their defaults.
pub fn load(path: &Path) -> Result<RenderParameters, ConfigError> {
    let Some(format) = Format::from_path(path) else {
        return Err(ConfigError::UnknownFormat {
            path: path.to_path_buf(),
        });
    };
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(path, format, &text)
}

fn parse(path: &Path, format: Format, text: &str) -> Result<RenderParameters, ConfigError> {
    match format {
        Format::Toml => toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        }),
        Format::Json => serde_json::from_str(text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}
