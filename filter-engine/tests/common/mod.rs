//! Shared fixtures for the filter-engine integration tests

#![allow(dead_code)]

use filter_engine::{
    EntityBackend, Filter, FilterEvaluator, FilterGroup, ResolutionMap, StixBackend,
};
use serde_json::Value;

pub const TLP_CLEAR: &str = "marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9";
pub const TLP_GREEN: &str = "marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da";
pub const TLP_AMBER: &str = "marking-definition--f88d31f6-486f-44da-b317-01333bde0b82";
pub const TLP_RED: &str = "marking-definition--5e57c739-391a-4eb3-b6be-7d15ca92d5ed";

pub const AUTHOR_RELIABLE: &str = "identity--7b82b010-b1c0-4dae-981f-7756374a17df";
pub const AUTHOR_UNKNOWN: &str = "identity--c017f212-546b-4f21-999e-5dd7ab0fc637";

/// Thirteen STIX objects, as they come out of a live stream: two malware, one
/// software, two reports, a note, a grouping, an indicator, an IPv4 address,
/// a `uses` relationship, a sighting and two marking definitions.
pub const STIX_BUNDLE: &str = r#"[
  {
    "type": "malware", "id": "malware--21c45dbe-54ec-5bb7-b8cd-9f27cc518714",
    "name": "Paradise Ransomware", "is_family": true, "confidence": 80,
    "malware_types": ["ransomware"], "labels": ["ransomware", "windows"],
    "created_by_ref": "identity--7b82b010-b1c0-4dae-981f-7756374a17df",
    "object_marking_refs": ["marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9"],
    "created": "2021-02-01T10:00:00.000Z", "modified": "2023-05-03T12:00:00.000Z",
    "extensions": {
      "extension-definition--ea279b3e-5c71-4632-ac08-831c66a786ba": {
        "id": "0a3d8a56-5cc2-4b66-a7cc-2d5d4b3c7e15", "type": "Malware",
        "creator_ids": ["88ec0c6a-13ce-5e39-b486-354fe4a7084f"],
        "stix_ids": ["malware--0fb7e3a4-6b1b-4e9c-9df0-52dc3f4f1cf3"]
      }
    }
  },
  {
    "type": "malware", "id": "malware--8a4b5aef-e4a7-524c-92f9-a61c08d1cd85",
    "name": "Dridex", "is_family": true, "confidence": 40, "revoked": true,
    "object_marking_refs": ["marking-definition--5e57c739-391a-4eb3-b6be-7d15ca92d5ed"],
    "created": "2020-06-11T08:00:00.000Z"
  },
  {
    "type": "software", "id": "software--9f1e5bf2-35a4-56b8-9e8a-f2e4f7c4c6ea",
    "name": "7-Zip", "vendor": "Igor Pavlov",
    "extensions": {
      "extension-definition--f93e2c80-4231-4f9a-af8b-95c9bd566a82": {
        "id": "b1a6a5d3-8fbd-4b72-9e1d-2a91c6e5b0f8",
        "creator_ids": ["6a4b11e1-90ca-4e42-ba42-db7bc7f7d505"]
      }
    }
  },
  {
    "type": "report", "id": "report--f3e554eb-60f5-587c-9191-4f25e9ba9f32",
    "name": "Report on Paradise", "confidence": 60, "report_types": ["threat-report"],
    "published": "2023-03-01T00:00:00.000Z", "labels": ["ransomware"],
    "created_by_ref": "identity--7b82b010-b1c0-4dae-981f-7756374a17df",
    "object_marking_refs": ["marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da"],
    "object_refs": [
      "malware--21c45dbe-54ec-5bb7-b8cd-9f27cc518714",
      "relationship--35e6de3b-2b1c-4c43-9f2e-6a5a7e1b8f21"
    ]
  },
  {
    "type": "report", "id": "report--9a0bd5a2-2b5e-5b8b-a1f7-d8f3f6b5cb31",
    "name": "Weekly digest", "confidence": 20, "report_types": ["internal-report"],
    "published": "2022-11-15T00:00:00.000Z",
    "created_by_ref": "identity--c017f212-546b-4f21-999e-5dd7ab0fc637",
    "object_marking_refs": [
      "marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da",
      "marking-definition--f88d31f6-486f-44da-b317-01333bde0b82"
    ],
    "object_refs": ["malware--8a4b5aef-e4a7-524c-92f9-a61c08d1cd85"]
  },
  {
    "type": "note", "id": "note--0d8b1e7c-4c12-5a5b-9d47-5a4f3c7d6e21",
    "content": "Seen again", "object_refs": ["malware--21c45dbe-54ec-5bb7-b8cd-9f27cc518714"],
    "extensions": {
      "extension-definition--ea279b3e-5c71-4632-ac08-831c66a786ba": {
        "assignee_ids": ["88ec0c6a-13ce-5e39-b486-354fe4a7084f"],
        "workflow_id": "b28a5b76-1f3b-4b5c-8d3c-2f7a8a1e9c10"
      }
    }
  },
  {
    "type": "grouping", "id": "grouping--5e3c2f1a-8b2d-5c4e-9a7f-1d2e3f4a5b6c",
    "name": "Campaign material", "context": "suspicious-activity",
    "object_refs": ["ipv4-addr--7c1e2b3a-4d5e-5f6a-8b9c-0d1e2f3a4b5c"]
  },
  {
    "type": "indicator", "id": "indicator--51640662-9c78-4402-932f-1d4531624723",
    "name": "Paradise hash", "pattern_type": "stix", "confidence": 75,
    "pattern": "[file:hashes.'SHA-256' = 'e5a5...']",
    "valid_from": "2023-01-01T00:00:00.000Z", "valid_until": "2024-01-01T00:00:00.000Z",
    "indicator_types": ["malicious-activity"],
    "extensions": {
      "extension-definition--ea279b3e-5c71-4632-ac08-831c66a786ba": {
        "score": 90, "detection": true, "main_observable_type": "StixFile"
      }
    }
  },
  {
    "type": "ipv4-addr", "id": "ipv4-addr--7c1e2b3a-4d5e-5f6a-8b9c-0d1e2f3a4b5c",
    "value": "198.51.100.23",
    "extensions": {
      "extension-definition--f93e2c80-4231-4f9a-af8b-95c9bd566a82": {"score": 30}
    }
  },
  {
    "type": "relationship", "id": "relationship--35e6de3b-2b1c-4c43-9f2e-6a5a7e1b8f21",
    "relationship_type": "uses", "confidence": 50,
    "source_ref": "malware--21c45dbe-54ec-5bb7-b8cd-9f27cc518714",
    "target_ref": "software--9f1e5bf2-35a4-56b8-9e8a-f2e4f7c4c6ea",
    "extensions": {
      "extension-definition--ea279b3e-5c71-4632-ac08-831c66a786ba": {
        "source_type": "Malware", "target_type": "Software"
      }
    }
  },
  {
    "type": "sighting", "id": "sighting--ee2f5d2b-1a3c-5b4d-9e6f-7a8b9c0d1e2f",
    "count": 3,
    "sighting_of_ref": "indicator--51640662-9c78-4402-932f-1d4531624723",
    "where_sighted_refs": ["identity--c017f212-546b-4f21-999e-5dd7ab0fc637"],
    "extensions": {
      "extension-definition--ea279b3e-5c71-4632-ac08-831c66a786ba": {
        "sighting_of_type": "Indicator", "where_sighted_types": ["Organization"]
      }
    }
  },
  {
    "type": "marking-definition", "id": "marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9",
    "name": "TLP:CLEAR", "definition_type": "statement"
  },
  {
    "type": "marking-definition", "id": "marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da",
    "name": "TLP:GREEN", "definition_type": "statement"
  }
]"#;

pub const STIX_BUNDLE_LEN: usize = 13;

/// Resolution map of the stream context: short marking names and internal ids
pub const RESOLUTION_MAP: &str = r#"{
  "marking1": "marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9",
  "marking2": "marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da",
  "marking-amber": "marking-definition--f88d31f6-486f-44da-b317-01333bde0b82",
  "marking-red": "marking-definition--5e57c739-391a-4eb3-b6be-7d15ca92d5ed",
  "0a3d8a56-5cc2-4b66-a7cc-2d5d4b3c7e15": "malware--21c45dbe-54ec-5bb7-b8cd-9f27cc518714"
}"#;

/// Indexed reports, `marking1`/`marking2` already translated by the index
pub const ENTITY_REPORTS: &str = r#"[
  {
    "id": "report-1", "standard_id": "report--0b8e3c3e-6b0a-5d5d-9b52-7c4a1f0c8a01",
    "entity_type": "Report", "parent_types": ["Container", "Stix-Domain-Object", "Stix-Core-Object"],
    "name": "Report1", "description": "First report", "confidence": 10,
    "report_types": ["threat-report"],
    "objectMarking": ["marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9"],
    "published": "2023-01-10T00:00:00.000Z"
  },
  {
    "id": "report-2", "standard_id": "report--0b8e3c3e-6b0a-5d5d-9b52-7c4a1f0c8a02",
    "entity_type": "Report", "name": "Report2", "description": "Second report",
    "confidence": 20, "report_types": ["threat-report", "internal-report"],
    "objectMarking": ["marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da"],
    "published": "2023-02-10T00:00:00.000Z"
  },
  {
    "id": "report-3", "standard_id": "report--0b8e3c3e-6b0a-5d5d-9b52-7c4a1f0c8a03",
    "entity_type": "Report", "name": "Report3", "description": "Report1",
    "confidence": 30, "report_types": ["internal-report"],
    "objectMarking": ["marking-definition--613f2e26-407d-48c7-9eca-b8e91df99dc9"],
    "createdBy": "identity--7b82b010-b1c0-4dae-981f-7756374a17df",
    "published": "2023-03-10T00:00:00.000Z"
  },
  {
    "id": "report-4", "standard_id": "report--0b8e3c3e-6b0a-5d5d-9b52-7c4a1f0c8a04",
    "entity_type": "Report", "name": "Report4", "description": "Fourth report",
    "confidence": 80,
    "objectMarking": ["marking-definition--34098fce-860f-48ae-8e50-ebd3cc5e41da"],
    "published": "2023-04-10T00:00:00.000Z"
  },
  {
    "id": "report-fixture", "standard_id": "report--0b8e3c3e-6b0a-5d5d-9b52-7c4a1f0c8a05",
    "entity_type": "Report", "name": "A demo report for testing purposes",
    "description": "Fixture", "confidence": 15, "report_types": ["threat-report"],
    "published": "2020-02-26T00:00:00.000Z"
  }
]"#;

pub fn stix_bundle() -> Vec<Value> {
    serde_json::from_str(STIX_BUNDLE).unwrap()
}

pub fn entity_reports() -> Vec<Value> {
    serde_json::from_str(ENTITY_REPORTS).unwrap()
}

pub fn resolution_map() -> ResolutionMap {
    serde_json::from_str(RESOLUTION_MAP).unwrap()
}

/// Ids of the candidates of `candidates` matching `group` on the STIX backend
pub fn stix_ids(candidates: &[Value], group: &FilterGroup, map: &ResolutionMap) -> Vec<String> {
    let evaluator = FilterEvaluator::new(StixBackend, map);
    ids_of(&evaluator.filter_many(candidates, group).unwrap().matched)
}

pub fn entity_ids(candidates: &[Value], group: &FilterGroup, map: &ResolutionMap) -> Vec<String> {
    let evaluator = FilterEvaluator::new(EntityBackend, map);
    ids_of(&evaluator.filter_many(candidates, group).unwrap().matched)
}

pub fn ids_of(matched: &[&Value]) -> Vec<String> {
    matched
        .iter()
        .map(|c| c["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Group holding a single filter
pub fn only(filter: Filter) -> FilterGroup {
    FilterGroup::and().with_filter(filter)
}

/// Number of bundle objects matching a single STIX filter
pub fn stix_count(filter: Filter) -> usize {
    let map = resolution_map();
    let evaluator = FilterEvaluator::new(StixBackend, &map);
    evaluator.count_matches(&stix_bundle(), &only(filter)).unwrap()
}
