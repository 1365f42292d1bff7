use quarry_path::Projection;

use crate::stage::{BsonStages, Reference, Stage, StageFactory};

/// Suffix of the temporary field derived from the session key.
pub const PROJECT_SUFFIX: &str = "_project";

/// Compiles a nested field access into stages that leave the field's value
/// at the session's unique key.
///
/// The pipeline convention is that the current working value lives at the
/// unique key `U`. For a field `fld` relative to that value the compiler emits:
///
/// 1. `$match` on `U.fld` existing. Without it a document whose nested field
///    is absent would lose the value instead of carrying a null forward.
/// 2. `$addFields { U_project: "$U.fld" }`, copying the value to a flat
///    temporary field.
/// 3. `$addFields { U: "$U_project" }`, moving it back onto `U`.
///
/// Step 3 always targets `U`, so successive compilations against one session
/// chain without renaming. They must be sequenced: `U_project` is derived
/// from `U`, not allocated, and two interleaved compilations sharing `U`
/// would overwrite each other's temporary.
#[derive(Debug, Clone, Default)]
pub struct ProjectCompiler<F = BsonStages> {
    factory: F,
}

impl ProjectCompiler {
    pub fn new() -> Self {
        Self {
            factory: BsonStages,
        }
    }
}

impl<F: StageFactory> ProjectCompiler<F> {
    pub fn with_factory(factory: F) -> Self {
        Self { factory }
    }

    /// Always returns exactly three stages, in pipeline order.
    pub fn compile(&self, unique_key: &str, field: &Projection) -> [F::Stage; 3] {
        let tmp_key = format!("{unique_key}{PROJECT_SUFFIX}");
        let full_path = field.prepend(unique_key);

        [
            self.factory.exists(&full_path.to_key()),
            self.factory
                .assign(vec![(tmp_key.clone(), Reference::Projection(full_path))]),
            self.factory
                .assign(vec![(unique_key.to_string(), Reference::Key(tmp_key))]),
        ]
    }
}

/// [`ProjectCompiler::compile`] with the default stage representation.
pub fn compile_project(unique_key: &str, field: &Projection) -> [Stage; 3] {
    ProjectCompiler::new().compile(unique_key, field)
}
