//! Evaluation backend for indexed platform entities. Any field path is a
//! valid key, and a filter may name several keys that are OR-ed together.

use crate::backend::{FilterBackend, KeyKind};
use crate::candidate::{split_path, Candidate};
use crate::resolver::Resolver;

const IDENTIFIER_KEYS: &[&str] = &[
    "objectMarking",
    "createdBy",
    "creator_id",
    "objectAssignee",
    "objectParticipant",
    "objectLabel",
    "objects",
    "fromId",
    "toId",
    "workflow_id",
];
const ID_FIELDS: &[&str] = &["id", "internal_id", "standard_id", "x_opencti_stix_ids"];

#[derive(Debug, Clone, Copy, Default)]
pub struct EntityBackend;

impl FilterBackend for EntityBackend {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn supports_multi_key(&self) -> bool {
        true
    }

    fn key_kind(&self, key: &str) -> Option<KeyKind> {
        let kind = match key {
            "entity_type" | "fromType" | "toType" | "fromTypes" | "toTypes" => KeyKind::Type,
            "ids" => KeyKind::Ids,
            "source_reliability" => KeyKind::Reliability,
            k if IDENTIFIER_KEYS.contains(&k) => KeyKind::Identifier,
            _ => KeyKind::Value,
        };
        Some(kind)
    }

    fn extract<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        key: &str,
        resolver: &dyn Resolver,
    ) -> Vec<String> {
        match key {
            "entity_type" => [
                candidate.values_at(&["entity_type"]),
                candidate.values_at(&["parent_types"]),
            ]
            .concat(),
            "fromTypes" => candidate.values_at(&["fromType"]),
            "toTypes" => candidate.values_at(&["toType"]),
            "ids" => ID_FIELDS
                .iter()
                .flat_map(|field| candidate.values_at(&[*field]))
                .collect(),
            "source_reliability" => {
                let own = candidate.values_at(&["source_reliability"]);
                if !own.is_empty() {
                    return own;
                }
                candidate
                    .values_at(&["createdBy"])
                    .iter()
                    .filter_map(|author| resolver.resolve(author))
                    .collect()
            }
            path => candidate.values_at(&split_path(path)),
        }
    }
}
