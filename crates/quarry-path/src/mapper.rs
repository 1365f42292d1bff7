use crate::projection::Projection;
use crate::value::DocumentValue;

/// One translation step between where a value lives in a pipeline document
/// and the value itself.
///
/// The value interpreter ([`Mapper::evaluate_value`]) and the path
/// interpreter ([`Mapper::evaluate_path`]) must describe the same navigation:
/// descending into field `k` of a document corresponds to prepending `k` to a
/// path. Both are built on [`Mapper::step`], the only place the variants are
/// matched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mapper {
    Identity,
    Nest(String),
}

impl Mapper {
    /// The field this mapper descends into, if any.
    fn step(&self) -> Option<&str> {
        match self {
            Mapper::Identity => None,
            Mapper::Nest(key) => Some(key),
        }
    }

    /// Apply the step to a document value. An absent field (or a
    /// non-document input) yields [`DocumentValue::missing`].
    pub fn evaluate_value<V: DocumentValue>(&self, value: &V) -> V {
        match self.step() {
            None => value.clone(),
            Some(key) => value.get_field(key).cloned().unwrap_or_else(V::missing),
        }
    }

    /// Apply the step to a path: the returned projection addresses, on the
    /// original document, what `path` addresses on the mapped value.
    pub fn evaluate_path(&self, path: &Projection) -> Projection {
        match self.step() {
            None => path.clone(),
            Some(key) => path.prepend(key),
        }
    }
}
