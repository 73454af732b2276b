use std::collections::BTreeSet;

use crate::parse::SchemaMap;
use crate::parse::reference::local_ref_name;
use crate::parse::schema::Schema;

/// Collect every named schema `schema` depends on, directly or transitively.
///
/// Names are the raw keys of `all_schemas`. References to undeclared names are
/// skipped.
pub fn collect_references(schema: &Schema, all_schemas: &SchemaMap) -> BTreeSet<String> {
    let mut visited = BTreeSet::new();
    collect_into(schema, all_schemas, &mut visited);
    visited
}

/// Depth-first walk accumulating into `visited`.
///
/// `visited` is also the termination condition: a name already present is never
/// entered again, which is what keeps cyclic schema graphs finite.
pub fn collect_into(schema: &Schema, all_schemas: &SchemaMap, visited: &mut BTreeSet<String>) {
    if let Some(ref_path) = schema.reference() {
        if let Some(name) = local_ref_name(ref_path)
            && let Some(target) = all_schemas.get(&name)
            && visited.insert(name)
        {
            collect_into(target, all_schemas, visited);
        }
        return;
    }

    for prop in schema.properties.values() {
        collect_into(prop, all_schemas, visited);
    }
    if let Some(ref items) = schema.items {
        collect_into(items, all_schemas, visited);
    }
    for sub in schema.compositions() {
        collect_into(sub, all_schemas, visited);
    }
}
