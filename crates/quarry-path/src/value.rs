use bson::Bson;

use crate::projection::Projection;

/// The slice of a document model that [`Mapper`](crate::Mapper) needs:
/// treat a value as a document and look up one field in it.
pub trait DocumentValue: Clone {
    /// The store's native representation of an absent value. A stored value
    /// equal to this sentinel is indistinguishable from an absent field once
    /// a mapper has been applied.
    fn missing() -> Self;

    /// Field `key` of this value when it is a document. `None` when the field
    /// is absent or the value is not document-shaped.
    fn get_field(&self, key: &str) -> Option<&Self>;

    /// Follow every segment of `path` through nested documents.
    fn navigate(&self, path: &Projection) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |value, segment| value.get_field(segment))
    }
}

impl DocumentValue for Bson {
    /// `Undefined`, kept apart from `Null`: an explicit null is a present
    /// value. A stored `Undefined` reads back as absent.
    fn missing() -> Self {
        Bson::Undefined
    }

    fn get_field(&self, key: &str) -> Option<&Self> {
        match self {
            Bson::Document(doc) => doc.get(key),
            _ => None,
        }
    }
}
