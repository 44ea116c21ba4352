//! Derivation of the field mapping between a source and a target struct.
//!
//! The mapping is resolved in two passes over the source fields. The first pass handles fields
//! with a `gen-copier` directive, the second pass matches the remaining fields by name. A broken
//! directive is an error, an implicit match that fails the type check is not: the field is left
//! out of the mapping.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, warn};

use crate::{directive::copier_directive, error::CopierError, field::FieldDescriptor};

/// Target fields indexed by name. Anonymous fields are not indexed.
///
/// Raw identifiers are indexed without their `r#` prefix, so `r#type` can be looked up as
/// either `type` or `r#type`.
#[derive(Debug)]
pub struct TargetIndex<'a> {
    fields: HashMap<&'a str, &'a FieldDescriptor>,
}

impl<'a> TargetIndex<'a> {
    pub fn new(fields: &'a [FieldDescriptor]) -> Self {
        let fields = fields
            .iter()
            .filter(|field| !field.is_anonymous())
            .map(|field| (unraw(&field.name), field))
            .collect();

        TargetIndex { fields }
    }

    pub fn get(&self, name: &str) -> Option<&'a FieldDescriptor> {
        self.fields.get(unraw(name)).copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn unraw(name: &str) -> &str {
    name.strip_prefix("r#").unwrap_or(name)
}

/// How an entry of the mapping was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingOrigin {
    Directive,
    Implicit,
}

/// A single `target.<target> = source.<source>` copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub target: String,
    pub origin: MappingOrigin,
}

/// Source field name to target field name, ordered by source field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: BTreeMap<String, MappingEntry>,
    claimed: HashSet<String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_source(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    /// Returns `true` if some source field is already copied into `target`.
    pub fn is_claimed(&self, target: &str) -> bool {
        self.claimed.contains(target)
    }

    pub fn get(&self, source: &str) -> Option<&MappingEntry> {
        self.entries.get(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(source, entry)` pairs in lexicographic order of the source field.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingEntry)> {
        self.entries.iter().map(|(s, e)| (s.as_str(), e))
    }

    fn insert(&mut self, source: &str, target: &str, origin: MappingOrigin) {
        self.claimed.insert(target.to_string());
        self.entries.insert(
            source.to_string(),
            MappingEntry {
                target: target.to_string(),
                origin,
            },
        );
    }
}

/// Result of handling one source field in the directive pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveOutcome<'a> {
    /// The field has no directive and is left for the implicit pass.
    NoDirective,
    /// The field is copied into the named target field.
    Mapped { target: &'a str },
    /// Another directive already copies into the named target field.
    TargetClaimed { target: &'a str },
}

/// Result of handling one source field in the implicit pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImplicitOutcome {
    /// The target has no field with the same name.
    NoCounterpart,
    /// The same-named target field is already written by a directive.
    TargetClaimed,
    /// The same-named target field has a different type signature.
    TypeMismatch,
    /// The field is copied into the same-named target field.
    Mapped,
}

/// Resolves the full mapping from `source_fields` to the fields in `targets`.
///
/// Returns an error as soon as a directive names a missing target field or a target field with
/// a different type signature; the implicit pass never runs in that case.
pub fn resolve_mapping(
    source_fields: &[FieldDescriptor],
    targets: &TargetIndex,
    target_type: &str,
) -> Result<MappingTable, CopierError> {
    let mut table = MappingTable::new();

    debug!("processing fields with a directive");
    for field in source_fields.iter().filter(|f| !f.is_anonymous()) {
        debug!("  source field: {} ({})", field.name, field.type_signature);
        match resolve_directive(field, targets, target_type, &mut table)? {
            DirectiveOutcome::Mapped { target } => {
                debug!("    added mapping: {} -> {}", field.name, target)
            }
            DirectiveOutcome::TargetClaimed { target } => warn!(
                "directive on {} ignored: target field {} is already assigned",
                field.name, target
            ),
            DirectiveOutcome::NoDirective => (),
        }
    }

    debug!("processing fields with matching names");
    for field in source_fields.iter().filter(|f| !f.is_anonymous()) {
        // Fields with a directive are settled by the first pass, even if it skipped them.
        if table.contains_source(&field.name) || copier_directive(&field.metadata).is_some() {
            continue;
        }

        match resolve_implicit(field, targets, &mut table) {
            ImplicitOutcome::Mapped => {
                debug!("  added mapping: {} -> {}", field.name, field.name)
            }
            ImplicitOutcome::TypeMismatch => {
                let target = targets.get(&field.name).map(|t| t.type_signature.as_str());
                debug!(
                    "  type mismatch: {} ({}) vs {} ({})",
                    field.name,
                    field.type_signature,
                    field.name,
                    target.unwrap_or_default()
                )
            }
            ImplicitOutcome::TargetClaimed => debug!(
                "  skipping {}: target field is assigned by a directive",
                field.name
            ),
            ImplicitOutcome::NoCounterpart => (),
        }
    }

    Ok(table)
}

/// Handles the directive of a single source field, if it has one.
pub fn resolve_directive<'f>(
    field: &'f FieldDescriptor,
    targets: &TargetIndex,
    target_type: &str,
    table: &mut MappingTable,
) -> Result<DirectiveOutcome<'f>, CopierError> {
    let Some(target_name) = copier_directive(&field.metadata) else {
        return Ok(DirectiveOutcome::NoDirective);
    };

    debug!("    found directive: {} -> {}", field.name, target_name);

    let Some(target) = targets.get(target_name) else {
        return Err(CopierError::TargetFieldNotFound {
            source_field: field.name.clone(),
            target_field: target_name.to_string(),
            target_type: target_type.to_string(),
        });
    };

    if !field.type_signature.is_compatible_with(&target.type_signature) {
        return Err(CopierError::TypeMismatch {
            source_field: field.name.clone(),
            source_type: field.type_signature.to_string(),
            target_field: target.name.clone(),
            target_type: target.type_signature.to_string(),
        });
    }

    if table.is_claimed(&target.name) {
        return Ok(DirectiveOutcome::TargetClaimed {
            target: target_name,
        });
    }

    table.insert(&field.name, &target.name, MappingOrigin::Directive);
    Ok(DirectiveOutcome::Mapped {
        target: target_name,
    })
}

/// Matches a single source field against the same-named target field.
pub fn resolve_implicit(
    field: &FieldDescriptor,
    targets: &TargetIndex,
    table: &mut MappingTable,
) -> ImplicitOutcome {
    let Some(target) = targets.get(&field.name) else {
        return ImplicitOutcome::NoCounterpart;
    };

    if table.is_claimed(&target.name) {
        return ImplicitOutcome::TargetClaimed;
    }

    if !field.type_signature.is_compatible_with(&target.type_signature) {
        return ImplicitOutcome::TypeMismatch;
    }

    table.insert(&field.name, &target.name, MappingOrigin::Implicit);
    ImplicitOutcome::Mapped
}
