use serde_json::Value;
use std::collections::BTreeMap;

/// Scalar kinds a leaf field may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// JSON string.
    String,
    /// JSON number (any representation).
    Number,
    /// JSON boolean.
    Boolean,
}

/// Structural type of a value, inferred from the document itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A leaf value.
    Scalar(ScalarKind),
    /// An array; the element type comes from the first element.
    ListOf(Box<SchemaNode>),
    /// An object. Members that inferred to [`SchemaNode::Unsupported`] stay in
    /// the map but are never selectable.
    ObjectOf(BTreeMap<String, SchemaNode>),
    /// Null, empty arrays and anything else that cannot be selected.
    Unsupported,
}

/// Infers the schema of `value`.
///
/// Never fails: shapes with no usable type map to [`SchemaNode::Unsupported`].
pub fn infer(value: &Value) -> SchemaNode {
    match value {
        Value::Object(map) => SchemaNode::ObjectOf(
            map.iter()
                .map(|(key, member)| (key.clone(), infer(member)))
                .collect(),
        ),
        Value::Array(items) => match items.first().map(infer) {
            None | Some(SchemaNode::Unsupported) => SchemaNode::Unsupported,
            Some(element) => SchemaNode::ListOf(Box::new(element)),
        },
        Value::String(_) => SchemaNode::Scalar(ScalarKind::String),
        Value::Number(_) => SchemaNode::Scalar(ScalarKind::Number),
        Value::Bool(_) => SchemaNode::Scalar(ScalarKind::Boolean),
        Value::Null => SchemaNode::Unsupported,
    }
}

impl SchemaNode {
    /// Looks up a selectable member of an object schema.
    ///
    /// Returns `None` when `self` is not an object, when the member is absent,
    /// or when the member is unsupported.
    pub fn field(&self, name: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::ObjectOf(fields) => fields
                .get(name)
                .filter(|node| !matches!(node, SchemaNode::Unsupported)),
            _ => None,
        }
    }

    /// Names of the selectable members of an object schema, ascending.
    pub fn selectable_fields(&self) -> Vec<&str> {
        match self {
            SchemaNode::ObjectOf(fields) => fields
                .iter()
                .filter(|(_, node)| !matches!(node, SchemaNode::Unsupported))
                .map(|(name, _)| name.as_str())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// True when the node is selected without a sub-selection: scalars and
    /// (possibly nested) lists of scalars.
    pub fn is_leaf(&self) -> bool {
        match self {
            SchemaNode::Scalar(_) => true,
            SchemaNode::ListOf(element) => element.is_leaf(),
            SchemaNode::ObjectOf(_) | SchemaNode::Unsupported => false,
        }
    }

    /// Whether a runtime value has the shape this node describes.
    ///
    /// Only the outermost kind is checked; values inside arrays after the
    /// first element may differ arbitrarily.
    pub(crate) fn admits(&self, value: &Value) -> bool {
        match (self, value) {
            (SchemaNode::Scalar(_), Value::String(_) | Value::Number(_) | Value::Bool(_)) => true,
            (SchemaNode::ListOf(_), Value::Array(_)) => true,
            (SchemaNode::ObjectOf(_), Value::Object(_)) => true,
            _ => false,
        }
    }
}
