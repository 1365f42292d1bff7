mod builder;
mod project;
mod session;
mod stage;

pub use builder::{CompiledPipeline, PipelineBuilder};
pub use project::{PROJECT_SUFFIX, ProjectCompiler, compile_project};
pub use quarry_path::{DocumentValue, Mapper, PathError, Projection};
pub use session::{DEFAULT_KEY_PREFIX, Session, SessionState};
pub use stage::{BsonStages, Reference, Stage, StageFactory, render_pipeline};
