//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RoutesConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<RoutesConfig, ConfigError> {
    let config: RoutesConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RoutesConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RelationshipNames;

    const SAMPLE: &str = r#"
[server]
bind_address = "127.0.0.1:9000"
prefix = "/api/v1"

[observability]
log_level = "debug"

[[resources]]
type = "posts"
has-one = "author"
has-many = ["comments", "tags"]
authorizer = "App.GenericAuthorizer"

[[resources]]
type = "comments"
controller = "App.CommentsController"
validators = "App.CommentValidators"
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9000");
        assert_eq!(config.server.prefix, "/api/v1");
        assert_eq!(config.resources.len(), 2);

        let posts = &config.resources[0];
        assert_eq!(posts.resource_type, "posts");
        assert_eq!(posts.has_one, RelationshipNames::One("author".into()));
        assert_eq!(posts.has_many.to_vec(), vec!["comments", "tags"]);

        let decls: Vec<_> = config.declarations().collect();
        assert_eq!(decls[1].0, "comments");
        assert_eq!(decls[1].1.controller.as_deref(), Some("App.CommentsController"));
    }

    #[test]
    fn test_unknown_resource_key_rejected() {
        let err = parse_config("[[resources]]\ntype = \"posts\"\nbelongs-to = \"site\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("belongs-to"));
    }

    #[test]
    fn test_validation_error_reported() {
        let err = parse_config("[[resources]]\ntype = \"posts/drafts\"\n").unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("jsonapi-routes-{}.toml", std::process::id()));
        fs::write(&path, SAMPLE).unwrap();
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.resources.len(), 2);

        assert!(matches!(load_config(&path), Err(ConfigError::Io(_))));
    }
}
