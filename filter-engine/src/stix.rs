//! Evaluation backend for raw STIX objects, as found in streams and webhook
//! payloads. Only a closed set of single-key filters is supported.

use crate::backend::{FilterBackend, KeyKind};
use crate::candidate::Candidate;
use crate::errors::FilterError;
use crate::resolver::Resolver;
use crate::type_hierarchy::stix_type_to_entity_type;

/// Platform extension carried by domain objects and relationships
pub const STIX_EXT_OCTI: &str = "extension-definition--ea279b3e-5c71-4632-ac08-831c66a786ba";
/// Platform extension carried by cyber observables
pub const STIX_EXT_OCTI_SCO: &str = "extension-definition--f93e2c80-4231-4f9a-af8b-95c9bd566a82";

const TYPE_KEYS: &[&str] = &["entity_type", "fromTypes", "toTypes"];
const IDENTIFIER_KEYS: &[&str] = &[
    "objectMarking",
    "createdBy",
    "creator_id",
    "objectAssignee",
    "objectParticipant",
    "objectLabel",
    "workflow_id",
    "fromId",
    "toId",
    "objects",
    "connectedToId",
];
const VALUE_KEYS: &[&str] = &[
    "confidence",
    "revoked",
    "x_opencti_score",
    "x_opencti_detection",
    "x_opencti_main_observable_type",
    "pattern_type",
    "report_types",
    "indicator_types",
    "malware_types",
    "priority",
    "severity",
    "relationship_type",
    "created",
    "modified",
    "published",
    "valid_from",
    "valid_until",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StixBackend;

fn extension_values<C: Candidate + ?Sized>(candidate: &C, field: &str) -> Vec<String> {
    for extension in [STIX_EXT_OCTI, STIX_EXT_OCTI_SCO] {
        let values = candidate.values_at(&["extensions", extension, field]);
        if !values.is_empty() {
            return values;
        }
    }
    Vec::new()
}

/// Extension field, or the legacy top-level `x_opencti_*` property when the
/// object carries no extension value
fn extension_or_field<C: Candidate + ?Sized>(
    candidate: &C,
    field: &str,
    legacy: &str,
) -> Vec<String> {
    let values = extension_values(candidate, field);
    if values.is_empty() {
        candidate.values_at(&[legacy])
    } else {
        values
    }
}

fn fields<C: Candidate + ?Sized>(candidate: &C, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .flat_map(|name| candidate.values_at(&[*name]))
        .collect()
}

/// Platform entity type: the one declared in the extension, otherwise
/// derived from the STIX type (or the relationship type for relationships).
fn entity_type<C: Candidate + ?Sized>(candidate: &C) -> Vec<String> {
    let declared = extension_values(candidate, "type");
    if !declared.is_empty() {
        return declared;
    }
    candidate
        .values_at(&["type"])
        .into_iter()
        .flat_map(|stix_type| {
            if stix_type == "relationship" {
                candidate.values_at(&["relationship_type"])
            } else {
                let entity_type = stix_type_to_entity_type(&stix_type)
                    .map(str::to_string)
                    .unwrap_or(stix_type);
                vec![entity_type]
            }
        })
        .collect()
}

impl FilterBackend for StixBackend {
    fn name(&self) -> &'static str {
        "stix"
    }

    fn supports_multi_key(&self) -> bool {
        false
    }

    fn key_kind(&self, key: &str) -> Option<KeyKind> {
        if TYPE_KEYS.contains(&key) {
            Some(KeyKind::Type)
        } else if key == "ids" {
            Some(KeyKind::Ids)
        } else if IDENTIFIER_KEYS.contains(&key) {
            Some(KeyKind::Identifier)
        } else if key == "source_reliability" {
            Some(KeyKind::Reliability)
        } else if VALUE_KEYS.contains(&key) {
            Some(KeyKind::Value)
        } else {
            None
        }
    }

    fn check_candidate<C: Candidate + ?Sized>(&self, candidate: &C) -> Result<(), FilterError> {
        if !candidate.is_record() {
            return Err(FilterError::MalformedCandidate(
                "a STIX object must be a JSON object".to_string(),
            ));
        }
        if candidate.values_at(&["type"]).is_empty() {
            return Err(FilterError::MalformedCandidate(
                "STIX object has no type".to_string(),
            ));
        }
        Ok(())
    }

    fn extract<C: Candidate + ?Sized>(
        &self,
        candidate: &C,
        key: &str,
        resolver: &dyn Resolver,
    ) -> Vec<String> {
        match key {
            "entity_type" => entity_type(candidate),
            "fromTypes" => [
                extension_values(candidate, "source_type"),
                extension_values(candidate, "sighting_of_type"),
            ]
            .concat(),
            "toTypes" => [
                extension_values(candidate, "target_type"),
                extension_values(candidate, "where_sighted_types"),
            ]
            .concat(),
            "ids" => [
                fields(candidate, &["id", "x_opencti_id", "x_opencti_stix_ids"]),
                extension_values(candidate, "id"),
                extension_values(candidate, "stix_ids"),
            ]
            .concat(),
            "objectMarking" => fields(candidate, &["object_marking_refs"]),
            "createdBy" => fields(candidate, &["created_by_ref"]),
            "creator_id" => extension_values(candidate, "creator_ids"),
            "objectAssignee" => extension_values(candidate, "assignee_ids"),
            "objectParticipant" => extension_values(candidate, "participant_ids"),
            "objectLabel" => fields(candidate, &["labels"]),
            "workflow_id" => extension_values(candidate, "workflow_id"),
            "fromId" => fields(candidate, &["source_ref", "sighting_of_ref"]),
            "toId" => fields(candidate, &["target_ref", "where_sighted_refs"]),
            "objects" => fields(candidate, &["object_refs"]),
            "connectedToId" => fields(
                candidate,
                &[
                    "id",
                    "source_ref",
                    "target_ref",
                    "sighting_of_ref",
                    "where_sighted_refs",
                    "object_refs",
                ],
            ),
            "source_reliability" => fields(candidate, &["created_by_ref"])
                .iter()
                .filter_map(|author| resolver.resolve(author))
                .collect(),
            "x_opencti_score" => extension_or_field(candidate, "score", key),
            "x_opencti_detection" => extension_or_field(candidate, "detection", key),
            "x_opencti_main_observable_type" => {
                extension_or_field(candidate, "main_observable_type", key)
            }
            "revoked" => {
                let revoked = fields(candidate, &["revoked"]);
                if revoked.is_empty() {
                    vec!["false".to_string()]
                } else {
                    revoked
                }
            }
            other => fields(candidate, &[other]),
        }
    }
}
