use quarry_path::PathError;

#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    #[error("failed to read request: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML request: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid field `{field}`: {source}")]
    Field { field: String, source: PathError },

    #[error("request has no fields")]
    NoFields,

    #[error("no request file: pass a path or set QUARRY_EXPLAIN_REQUEST")]
    MissingRequest,
}
