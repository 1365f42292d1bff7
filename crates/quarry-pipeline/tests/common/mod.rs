#![allow(dead_code)]

use bson::{Bson, Document};
use proptest::prelude::*;
use quarry_pipeline::{DocumentValue, Projection, Reference, Stage};

/// Minimal in-memory interpretation of the emitted stages, enough to check
/// what a pipeline does to a batch of documents.
pub fn run(stages: &[Stage], docs: Vec<Document>) -> Vec<Document> {
    stages.iter().fold(docs, |docs, stage| match stage {
        Stage::MatchExists(key) => {
            let path = Projection::parse(key).expect("valid dotted key");
            docs.into_iter()
                .filter(|doc| Bson::Document(doc.clone()).navigate(&path).is_some())
                .collect()
        }
        Stage::AddFields(fields) => docs
            .into_iter()
            .map(|doc| add_fields(doc, fields))
            .collect(),
    })
}

fn add_fields(input: Document, fields: &[(String, Reference)]) -> Document {
    let root = Bson::Document(input.clone());
    let mut output = input;
    for (name, reference) in fields {
        let value = match reference {
            Reference::Key(key) => root.get_field(key).cloned(),
            Reference::Projection(p) => root.navigate(p).cloned(),
            Reference::Root => Some(root.clone()),
        };
        match value {
            Some(v) => {
                output.insert(name.clone(), v);
            }
            None => {
                output.remove(name);
            }
        }
    }
    output
}

pub fn segment() -> impl Strategy<Value = String> {
    "[a-d]{1,2}"
}

pub fn projection() -> impl Strategy<Value = Projection> {
    prop::collection::vec(segment(), 1..4)
        .prop_map(|segments| Projection::try_from(segments).expect("non-empty segments"))
}

pub fn scalar() -> impl Strategy<Value = Bson> {
    prop_oneof![
        any::<i32>().prop_map(Bson::Int32),
        any::<bool>().prop_map(Bson::Boolean),
        "[a-z]{0,6}".prop_map(Bson::String),
        Just(Bson::Null),
    ]
}

pub fn document() -> impl Strategy<Value = Document> {
    let value = scalar().prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec((segment(), inner), 0..4).prop_map(|entries| {
            Bson::Document(entries.into_iter().collect())
        })
    });
    prop::collection::vec((segment(), value), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}
