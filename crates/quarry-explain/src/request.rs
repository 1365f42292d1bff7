use std::fs;
use std::path::{Path, PathBuf};

use quarry_path::Projection;
use quarry_pipeline::{CompiledPipeline, PipelineBuilder, Session, SessionState};
use serde::Deserialize;
use tracing::info;

use crate::error::ExplainError;

/// Fields to compile, in order, into one pipeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExplainRequest {
    /// Host-allocated session key. A fresh one is allocated when absent.
    #[serde(default)]
    pub session_key: Option<String>,
    /// Dotted paths, each relative to the value the previous one selected.
    pub fields: Vec<String>,
}

pub const REQUEST_ENV: &str = "QUARRY_EXPLAIN_REQUEST";
pub const COMPACT_ENV: &str = "QUARRY_EXPLAIN_COMPACT";

/// Where to read the request and how to print the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub request_path: PathBuf,
    pub compact: bool,
}

/// Resolve settings from the arguments after the program name and an
/// environment lookup. The first argument wins over `QUARRY_EXPLAIN_REQUEST`;
/// compact output only when `QUARRY_EXPLAIN_COMPACT` is exactly `"1"`.
pub fn resolve<I, E>(args: I, env: E) -> Result<Settings, ExplainError>
where
    I: IntoIterator<Item = String>,
    E: Fn(&str) -> Option<String>,
{
    let request_path = args
        .into_iter()
        .next()
        .or_else(|| env(REQUEST_ENV))
        .ok_or(ExplainError::MissingRequest)?;
    let compact = env(COMPACT_ENV).is_some_and(|v| v == "1");
    Ok(Settings {
        request_path: PathBuf::from(request_path),
        compact,
    })
}

/// Read a request file. `.yaml`/`.yml` files are YAML, anything else JSON.
pub fn load_request(path: &Path) -> Result<ExplainRequest, ExplainError> {
    let text = fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&text)?),
        _ => Ok(serde_json::from_str(&text)?),
    }
}

pub fn explain(request: &ExplainRequest) -> Result<CompiledPipeline, ExplainError> {
    if request.fields.is_empty() {
        return Err(ExplainError::NoFields);
    }
    let fields = request
        .fields
        .iter()
        .map(|field| {
            Projection::parse(field).map_err(|source| ExplainError::Field {
                field: field.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let session = match &request.session_key {
        Some(key) => Session::with_key(key.clone()),
        None => Session::new(),
    };
    let mut builder = PipelineBuilder::new(&session);
    for field in &fields {
        builder.project(field);
    }
    let pipeline = builder.finish();
    info!(
        unique_key = session.unique_key(),
        fields = fields.len(),
        stages = pipeline.stages.len(),
        "compiled pipeline"
    );
    Ok(pipeline)
}

/// The pipeline's stage documents as a JSON array.
pub fn to_json(pipeline: &CompiledPipeline, compact: bool) -> Result<String, ExplainError> {
    let stages = pipeline.to_documents();
    let json = if compact {
        serde_json::to_string(&stages)?
    } else {
        serde_json::to_string_pretty(&stages)?
    };
    Ok(json)
}
