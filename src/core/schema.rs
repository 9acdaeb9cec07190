//! Schema extraction: reduce a resolved type to a flat property list.
//!
//! Nested members whose type is an aliased named type are expanded into their
//! own schemas, appended before the schema that references them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::facts::{MemberId, TypeFacts, TypeId};
use super::output::{Property, Schema};

/// Name given to types with neither an alias nor a declaration symbol.
pub const ANONYMOUS_TYPE_NAME: &str = "__type";

/// How repeated named types are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemaMode {
    /// Append a fresh schema every time a type is encountered, even if the
    /// same type was already expanded earlier in the run.
    #[default]
    Repeat,
    /// Append each type identity at most once per run.
    Dedupe,
}

/// Stateful extractor shared by one traversal.
pub struct SchemaExtractor<'f> {
    facts: &'f dyn TypeFacts,
    mode: SchemaMode,
    /// Types on the current expansion path.
    expanding: HashSet<TypeId>,
    /// Types already appended (dedupe mode only), with their schema names.
    emitted: HashMap<TypeId, String>,
}

impl<'f> SchemaExtractor<'f> {
    pub fn new(facts: &'f dyn TypeFacts, mode: SchemaMode) -> Self {
        Self {
            facts,
            mode,
            expanding: HashSet::new(),
            emitted: HashMap::new(),
        }
    }

    /// Extract `ty` and every aliased type reachable through its members,
    /// appending them to `types` (nested first). Returns the name of the
    /// schema describing `ty`.
    pub fn extract_into(&mut self, ty: TypeId, types: &mut Vec<Schema>) -> String {
        if let Some(name) = self.emitted.get(&ty) {
            return name.clone();
        }

        let schema = self.extract(ty, types);
        let name = schema.name.clone();
        self.append(ty, schema, types);
        name
    }

    /// Build the schema for `ty`. Nested schemas are appended to `types` as a
    /// side effect; the returned schema itself is not.
    pub fn extract(&mut self, ty: TypeId, types: &mut Vec<Schema>) -> Schema {
        let name = self.schema_name(ty);
        self.expanding.insert(ty);

        let properties = self
            .facts
            .members(ty)
            .into_iter()
            .map(|member| self.property(member, types))
            .collect();

        self.expanding.remove(&ty);
        debug!(schema = %name, "extracted schema");

        Schema { name, properties }
    }

    fn schema_name(&self, ty: TypeId) -> String {
        self.facts
            .alias_name(ty)
            .or_else(|| self.facts.type_symbol(ty).map(|symbol| symbol.name))
            .unwrap_or_else(|| ANONYMOUS_TYPE_NAME.to_string())
    }

    fn property(&mut self, member: MemberId, types: &mut Vec<Schema>) -> Property {
        let name = self.facts.member_name(member);
        let optional = self.facts.is_optional(member);

        let Some(member_type) = self.facts.member_type(member) else {
            return Property {
                name,
                intrinsic_type: None,
                complex_type: None,
                optional,
            };
        };

        let intrinsic_type = self.facts.intrinsic_name(member_type);
        let complex_type = self.facts.alias_name(member_type);

        if complex_type.is_some() {
            self.expand_nested(member_type, types);
        }

        Property {
            name,
            intrinsic_type,
            complex_type,
            optional,
        }
    }

    fn expand_nested(&mut self, ty: TypeId, types: &mut Vec<Schema>) {
        if self.expanding.contains(&ty) {
            debug!(type_id = ty.index(), "cyclic reference, not expanding again");
            return;
        }
        if self.emitted.contains_key(&ty) {
            return;
        }

        let schema = self.extract(ty, types);
        self.append(ty, schema, types);
    }

    fn append(&mut self, ty: TypeId, schema: Schema, types: &mut Vec<Schema>) {
        if self.mode == SchemaMode::Dedupe {
            self.emitted.insert(ty, schema.name.clone());
        }
        types.push(schema);
    }
}
