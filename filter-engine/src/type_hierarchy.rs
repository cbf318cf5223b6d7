//! Static entity-type hierarchy.
//!
//! Every concrete type points at its direct abstract parent; the ancestor
//! chain is obtained by walking parent links up to `Basic-Object` or
//! `Basic-Relationship`. The table is built once and never mutated.

use lazy_static::lazy_static;
use std::collections::HashMap;

pub const ABSTRACT_BASIC_OBJECT: &str = "Basic-Object";
pub const ABSTRACT_STIX_OBJECT: &str = "Stix-Object";
pub const ABSTRACT_STIX_CORE_OBJECT: &str = "Stix-Core-Object";
pub const ABSTRACT_STIX_DOMAIN_OBJECT: &str = "Stix-Domain-Object";
pub const ABSTRACT_STIX_CYBER_OBSERVABLE: &str = "Stix-Cyber-Observable";
pub const ABSTRACT_STIX_META_OBJECT: &str = "Stix-Meta-Object";
pub const ABSTRACT_INTERNAL_OBJECT: &str = "Internal-Object";
pub const ABSTRACT_CONTAINER: &str = "Container";
pub const ABSTRACT_CASE: &str = "Case";
pub const ABSTRACT_IDENTITY: &str = "Identity";
pub const ABSTRACT_LOCATION: &str = "Location";
pub const ABSTRACT_THREAT_ACTOR: &str = "Threat-Actor";
pub const ABSTRACT_HASHED_OBSERVABLE: &str = "Hashed-Observable";

pub const ABSTRACT_BASIC_RELATIONSHIP: &str = "Basic-Relationship";
pub const ABSTRACT_STIX_RELATIONSHIP: &str = "Stix-Relationship";
pub const ABSTRACT_STIX_CORE_RELATIONSHIP: &str = "Stix-Core-Relationship";
pub const ABSTRACT_STIX_REF_RELATIONSHIP: &str = "Stix-Ref-Relationship";
pub const ABSTRACT_INTERNAL_RELATIONSHIP: &str = "Internal-Relationship";
/// Sightings have no sub-types: the abstraction layer is also the concrete type
pub const STIX_SIGHTING_RELATIONSHIP: &str = "Stix-Sighting-Relationship";

const ABSTRACT_LINKS: &[(&str, &str)] = &[
    (ABSTRACT_STIX_OBJECT, ABSTRACT_BASIC_OBJECT),
    (ABSTRACT_INTERNAL_OBJECT, ABSTRACT_BASIC_OBJECT),
    (ABSTRACT_STIX_CORE_OBJECT, ABSTRACT_STIX_OBJECT),
    (ABSTRACT_STIX_META_OBJECT, ABSTRACT_STIX_OBJECT),
    (ABSTRACT_STIX_DOMAIN_OBJECT, ABSTRACT_STIX_CORE_OBJECT),
    (ABSTRACT_STIX_CYBER_OBSERVABLE, ABSTRACT_STIX_CORE_OBJECT),
    (ABSTRACT_CONTAINER, ABSTRACT_STIX_DOMAIN_OBJECT),
    (ABSTRACT_CASE, ABSTRACT_CONTAINER),
    (ABSTRACT_IDENTITY, ABSTRACT_STIX_DOMAIN_OBJECT),
    (ABSTRACT_LOCATION, ABSTRACT_STIX_DOMAIN_OBJECT),
    (ABSTRACT_THREAT_ACTOR, ABSTRACT_STIX_DOMAIN_OBJECT),
    (ABSTRACT_HASHED_OBSERVABLE, ABSTRACT_STIX_CYBER_OBSERVABLE),
    (ABSTRACT_STIX_RELATIONSHIP, ABSTRACT_BASIC_RELATIONSHIP),
    (ABSTRACT_INTERNAL_RELATIONSHIP, ABSTRACT_BASIC_RELATIONSHIP),
    (ABSTRACT_STIX_CORE_RELATIONSHIP, ABSTRACT_STIX_RELATIONSHIP),
    (ABSTRACT_STIX_REF_RELATIONSHIP, ABSTRACT_STIX_RELATIONSHIP),
];

const STIX_DOMAIN_OBJECTS: &[&str] = &[
    "Attack-Pattern",
    "Campaign",
    "Channel",
    "Course-Of-Action",
    "Data-Component",
    "Data-Source",
    "Event",
    "Incident",
    "Indicator",
    "Infrastructure",
    "Intrusion-Set",
    "Language",
    "Malware",
    "Malware-Analysis",
    "Narrative",
    "Tool",
    "Vulnerability",
];
const CONTAINERS: &[&str] = &["Report", "Note", "Opinion", "Observed-Data", "Grouping"];
const CASES: &[&str] = &["Case-Incident", "Case-Rfi", "Case-Rft", "Feedback"];
const IDENTITIES: &[&str] = &["Individual", "Organization", "Sector", "System"];
const LOCATIONS: &[&str] = &[
    "City",
    "Country",
    "Region",
    "Position",
    "Administrative-Area",
];
const THREAT_ACTORS: &[&str] = &["Threat-Actor-Group", "Threat-Actor-Individual"];
const HASHED_OBSERVABLES: &[&str] = &["StixFile", "Artifact", "X509-Certificate"];
const STIX_CYBER_OBSERVABLES: &[&str] = &[
    "Autonomous-System",
    "Bank-Account",
    "Cryptocurrency-Wallet",
    "Directory",
    "Domain-Name",
    "Email-Addr",
    "Email-Message",
    "Email-Mime-Part-Type",
    "Hostname",
    "IPv4-Addr",
    "IPv6-Addr",
    "Mac-Addr",
    "Media-Content",
    "Mutex",
    "Network-Traffic",
    "Phone-Number",
    "Process",
    "Software",
    "Text",
    "Url",
    "User-Account",
    "User-Agent",
    "Windows-Registry-Key",
    "Windows-Registry-Value-Type",
];
const STIX_META_OBJECTS: &[&str] = &[
    "Marking-Definition",
    "Label",
    "External-Reference",
    "Kill-Chain-Phase",
    "Vocabulary",
];
const INTERNAL_OBJECTS: &[&str] = &["User", "Group", "Role", "Capability", "Settings", "Status"];
const STIX_CORE_RELATIONSHIPS: &[&str] = &[
    "analysis-of",
    "attributed-to",
    "authored-by",
    "based-on",
    "beacons-to",
    "belongs-to",
    "characterizes",
    "citizen-of",
    "communicates-with",
    "compromises",
    "consists-of",
    "controls",
    "cooperates-with",
    "delivers",
    "derived-from",
    "detects",
    "downloads",
    "drops",
    "duplicate-of",
    "dynamic-analysis-of",
    "employed-by",
    "exfiltrates-to",
    "exploits",
    "has",
    "hosts",
    "impersonates",
    "indicates",
    "investigates",
    "known-as",
    "located-at",
    "mitigates",
    "national-of",
    "originates-from",
    "owns",
    "part-of",
    "participates-in",
    "related-to",
    "remediates",
    "reports-to",
    "resides-in",
    "resolves-to",
    "revoked-by",
    "static-analysis-of",
    "subtechnique-of",
    "supports",
    "targets",
    "uses",
    "variant-of",
];
const STIX_REF_RELATIONSHIPS: &[&str] = &[
    "created-by",
    "external-reference",
    "kill-chain-phase",
    "object",
    "object-assignee",
    "object-label",
    "object-marking",
    "object-participant",
    "operating-system",
    "sample",
];
const INTERNAL_RELATIONSHIPS: &[&str] = &[
    "accesses-to",
    "allowed-by",
    "has-capability",
    "has-role",
    "member-of",
    "migrates",
    "participate-to",
];

/// STIX wire type names that do not lower-case to the platform type name
const STIX_TYPE_ALIASES: &[(&str, &str)] = &[
    ("file", "StixFile"),
    ("sighting", STIX_SIGHTING_RELATIONSHIP),
    ("identity", ABSTRACT_IDENTITY),
    ("location", ABSTRACT_LOCATION),
    ("threat-actor", ABSTRACT_THREAT_ACTOR),
    ("x-opencti-text", "Text"),
    ("x-opencti-hostname", "Hostname"),
];

fn build_parent_table() -> HashMap<&'static str, &'static str> {
    let mut parents: HashMap<&'static str, &'static str> = ABSTRACT_LINKS.iter().copied().collect();
    let groups: [(&[&'static str], &'static str); 13] = [
        (STIX_DOMAIN_OBJECTS, ABSTRACT_STIX_DOMAIN_OBJECT),
        (CONTAINERS, ABSTRACT_CONTAINER),
        (CASES, ABSTRACT_CASE),
        (IDENTITIES, ABSTRACT_IDENTITY),
        (LOCATIONS, ABSTRACT_LOCATION),
        (THREAT_ACTORS, ABSTRACT_THREAT_ACTOR),
        (HASHED_OBSERVABLES, ABSTRACT_HASHED_OBSERVABLE),
        (STIX_CYBER_OBSERVABLES, ABSTRACT_STIX_CYBER_OBSERVABLE),
        (STIX_META_OBJECTS, ABSTRACT_STIX_META_OBJECT),
        (INTERNAL_OBJECTS, ABSTRACT_INTERNAL_OBJECT),
        (STIX_CORE_RELATIONSHIPS, ABSTRACT_STIX_CORE_RELATIONSHIP),
        (STIX_REF_RELATIONSHIPS, ABSTRACT_STIX_REF_RELATIONSHIP),
        (INTERNAL_RELATIONSHIPS, ABSTRACT_INTERNAL_RELATIONSHIP),
    ];
    for (children, parent) in groups {
        for child in children {
            parents.insert(*child, parent);
        }
    }
    parents.insert(STIX_SIGHTING_RELATIONSHIP, ABSTRACT_STIX_RELATIONSHIP);
    parents
}

lazy_static! {
    static ref PARENT_OF: HashMap<&'static str, &'static str> = build_parent_table();
    static ref ABSTRACT_TYPES: Vec<&'static str> = {
        let mut types: Vec<&'static str> = PARENT_OF.values().copied().collect();
        types.sort_unstable();
        types.dedup();
        types.retain(|t| *t != STIX_SIGHTING_RELATIONSHIP);
        types
    };
    static ref BY_LOWERCASE: HashMap<String, &'static str> = {
        let mut names: HashMap<String, &'static str> = HashMap::new();
        for (child, parent) in PARENT_OF.iter() {
            names.insert(child.to_lowercase(), *child);
            names.insert(parent.to_lowercase(), *parent);
        }
        names
    };
}

/// Ancestors of `entity_type`, nearest first. Unknown types have none.
pub fn ancestors_of(entity_type: &str) -> Vec<&'static str> {
    let mut ancestors = Vec::new();
    let mut current = canonical_name(entity_type).unwrap_or_default();
    while let Some(&parent) = PARENT_OF.get(current) {
        ancestors.push(parent);
        current = parent;
    }
    ancestors
}

/// The type itself followed by its ancestors
pub fn expand(entity_type: &str) -> Vec<String> {
    let own = canonical_name(entity_type).unwrap_or(entity_type);
    std::iter::once(own)
        .chain(ancestors_of(own))
        .map(str::to_string)
        .collect()
}

/// `candidate` is `wanted` or has `wanted` among its ancestors
pub fn type_matches(candidate: &str, wanted: &str) -> bool {
    let wanted = canonical_name(wanted).unwrap_or(wanted);
    expand(candidate).iter().any(|t| t == wanted)
}

pub fn is_abstract(entity_type: &str) -> bool {
    canonical_name(entity_type).is_some_and(|t| ABSTRACT_TYPES.binary_search(&t).is_ok())
}

/// Case-insensitive lookup of the platform spelling of a known type
pub fn canonical_name(raw: &str) -> Option<&'static str> {
    BY_LOWERCASE.get(&raw.to_lowercase()).copied()
}

/// Platform entity type for a STIX `type` field. `relationship` is not
/// resolvable on its own: the caller reads `relationship_type` instead.
pub fn stix_type_to_entity_type(stix_type: &str) -> Option<&'static str> {
    let lowered = stix_type.to_lowercase();
    STIX_TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, entity_type)| *entity_type)
        .or_else(|| canonical_name(&lowered))
}
