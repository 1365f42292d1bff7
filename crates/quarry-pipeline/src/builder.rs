use bson::Document;
use quarry_path::{DocumentValue, Mapper, Projection};
use tracing::debug;

use crate::project::ProjectCompiler;
use crate::session::SessionState;
use crate::stage::{BsonStages, Reference, Stage, StageFactory, render_pipeline};

/// Accumulates the stages of one pipeline for one session.
///
/// The first stage copies the whole input document to the session key, so
/// the current value starts out as the document itself. Each
/// [`project`](Self::project) narrows the current value to a nested field.
/// Compilations take `&mut self` and are therefore sequenced.
pub struct PipelineBuilder<'s, S: SessionState + ?Sized, F: StageFactory = BsonStages> {
    session: &'s S,
    compiler: ProjectCompiler<F>,
    stages: Vec<F::Stage>,
}

impl<'s, S: SessionState + ?Sized> PipelineBuilder<'s, S> {
    pub fn new(session: &'s S) -> Self {
        Self::with_factory(session, BsonStages)
    }
}

impl<'s, S: SessionState + ?Sized, F: StageFactory> PipelineBuilder<'s, S, F> {
    pub fn with_factory(session: &'s S, factory: F) -> Self {
        let focus = factory.assign(vec![(session.unique_key().to_string(), Reference::Root)]);
        Self {
            session,
            compiler: ProjectCompiler::with_factory(factory),
            stages: vec![focus],
        }
    }

    /// Narrow the current value to `field`, relative to the current value.
    pub fn project(&mut self, field: &Projection) -> &mut Self {
        let unique_key = self.session.unique_key();
        self.stages.extend(self.compiler.compile(unique_key, field));
        debug!(unique_key, field = %field, stages = self.stages.len(), "compiled projection");
        self
    }

    pub fn stages(&self) -> &[F::Stage] {
        &self.stages
    }

    pub fn finish(self) -> CompiledPipeline<F::Stage> {
        CompiledPipeline {
            stages: self.stages,
            mapper: Mapper::Nest(self.session.unique_key().to_string()),
        }
    }
}

/// Stages plus the mapper that reads the current value out of the documents
/// the pipeline produces.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPipeline<T = Stage> {
    pub stages: Vec<T>,
    pub mapper: Mapper,
}

impl<T> CompiledPipeline<T> {
    /// The current value inside a result document.
    pub fn value<V: DocumentValue>(&self, result: &V) -> V {
        self.mapper.evaluate_value(result)
    }

    /// Dotted location, in result documents, of `path` relative to the
    /// current value.
    pub fn path(&self, path: &Projection) -> Projection {
        self.mapper.evaluate_path(path)
    }
}

impl CompiledPipeline<Stage> {
    pub fn to_documents(&self) -> Vec<Document> {
        render_pipeline(&self.stages)
    }
}
