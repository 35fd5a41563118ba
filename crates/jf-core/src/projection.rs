//! Projection of a document through a selection set.

use crate::path::Path;
use crate::schema::SchemaNode;
use crate::selection::{Field, SelectionSet};
use serde_json::{Map, Value};

/// Error returned when a selection does not fit the inferred schema.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The field is absent from the object, or its value cannot be selected.
    #[error("unknown field '{name}' at {path}")]
    UnknownField {
        /// Requested field name.
        name: String,
        /// Path of the object the field was looked up in.
        path: String,
    },
    /// A scalar field was given a sub-selection.
    #[error("field '{name}' at {path} is a scalar and cannot have a sub-selection")]
    TypeMismatch {
        /// Requested field name.
        name: String,
        /// Path of the object the field was looked up in.
        path: String,
    },
    /// An object field (or list of objects) was selected without a sub-selection.
    #[error("field '{name}' at {path} is an object and requires a sub-selection")]
    MissingSubSelection {
        /// Requested field name.
        name: String,
        /// Path of the object the field was looked up in.
        path: String,
    },
}

/// Projects `value` through `selection`, validating against `schema`.
///
/// `schema` must have been inferred from `value` (or from a document of the
/// same shape). The result holds exactly the selected members; duplicate
/// selections of one field are merged.
pub fn project(
    value: &Value,
    schema: &SchemaNode,
    selection: &SelectionSet,
) -> Result<Value, ProjectionError> {
    project_object(value, schema, selection, &Path::root())
}

fn project_object(
    value: &Value,
    schema: &SchemaNode,
    selection: &SelectionSet,
    path: &Path,
) -> Result<Value, ProjectionError> {
    let mut result = Map::new();
    for field in selection.fields() {
        let node = schema
            .field(&field.name)
            .ok_or_else(|| ProjectionError::UnknownField {
                name: field.name.clone(),
                path: path.to_string(),
            })?;
        check_selection(field, node, path)?;

        // Past the first list element the value may not have this member.
        let Some(member) = value.get(&field.name) else {
            continue;
        };
        let projected = project_value(
            member,
            node,
            field.selection.as_ref(),
            &path.push_field(&field.name),
        )?;
        match result.get_mut(&field.name) {
            Some(existing) => merge(existing, projected),
            None => {
                result.insert(field.name.clone(), projected);
            }
        }
    }
    Ok(Value::Object(result))
}

fn check_selection(field: &Field, node: &SchemaNode, path: &Path) -> Result<(), ProjectionError> {
    match (node.is_leaf(), field.selection.is_some()) {
        (true, true) => Err(ProjectionError::TypeMismatch {
            name: field.name.clone(),
            path: path.to_string(),
        }),
        (false, false) => Err(ProjectionError::MissingSubSelection {
            name: field.name.clone(),
            path: path.to_string(),
        }),
        _ => Ok(()),
    }
}

fn project_value(
    value: &Value,
    schema: &SchemaNode,
    selection: Option<&SelectionSet>,
    path: &Path,
) -> Result<Value, ProjectionError> {
    if !schema.admits(value) {
        return Ok(Value::Null);
    }
    match (schema, selection, value) {
        (SchemaNode::ObjectOf(_), Some(selection), _) => {
            project_object(value, schema, selection, path)
        }
        (SchemaNode::ListOf(element), Some(_), Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| project_value(item, element, selection, &path.push_index(idx)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        _ => Ok(value.clone()),
    }
}

/// Folds a second projection of the same member into the first.
fn merge(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(left), Value::Object(right)) => {
            for (key, value) in right {
                match left.get_mut(&key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        left.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            for (slot, value) in left.iter_mut().zip(right) {
                merge(slot, value);
            }
        }
        (slot, value) => *slot = value,
    }
}
