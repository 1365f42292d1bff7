use bson::{Bson, Document, doc};
use quarry_path::Projection;

/// The value side of a field assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A literal top-level field name.
    Key(String),
    /// A nested location, rendered as its dotted path.
    Projection(Projection),
    /// The whole document currently flowing through the pipeline.
    Root,
}

impl Reference {
    /// Aggregation expression string, e.g. `"$k0.a.b"` or `"$$ROOT"`.
    pub fn to_expression(&self) -> String {
        match self {
            Reference::Key(key) => format!("${key}"),
            Reference::Projection(p) => format!("${}", p.to_key()),
            Reference::Root => "$$ROOT".to_string(),
        }
    }
}

/// One aggregation pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Keep only documents where the dotted path is present.
    MatchExists(String),
    /// Set top-level fields from references, evaluated against the input
    /// document of the stage.
    AddFields(Vec<(String, Reference)>),
}

impl Stage {
    pub fn to_document(&self) -> Document {
        match self {
            Stage::MatchExists(key) => {
                let mut filter = Document::new();
                filter.insert(key.clone(), doc! { "$exists": true });
                doc! { "$match": filter }
            }
            Stage::AddFields(fields) => {
                let mut assignments = Document::new();
                for (name, reference) in fields {
                    assignments.insert(name.clone(), Bson::String(reference.to_expression()));
                }
                doc! { "$addFields": assignments }
            }
        }
    }
}

pub fn render_pipeline(stages: &[Stage]) -> Vec<Document> {
    stages.iter().map(Stage::to_document).collect()
}

/// Constructors for the two stage primitives the compiler emits.
///
/// The compiler only hands over keys and references; what a stage looks like
/// is up to the implementation.
pub trait StageFactory {
    type Stage;

    fn exists(&self, key: &str) -> Self::Stage;
    fn assign(&self, fields: Vec<(String, Reference)>) -> Self::Stage;
}

/// Builds [`Stage`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct BsonStages;

impl StageFactory for BsonStages {
    type Stage = Stage;

    fn exists(&self, key: &str) -> Stage {
        Stage::MatchExists(key.to_string())
    }

    fn assign(&self, fields: Vec<(String, Reference)>) -> Stage {
        Stage::AddFields(fields)
    }
}
