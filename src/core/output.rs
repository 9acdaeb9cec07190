//! Output records and the sequences the traversal appends them to.
//!
//! Field names serialize in camelCase and absent values serialize as `null`,
//! which is the document shape downstream generators read.

use serde::{Deserialize, Serialize};

/// A discovered component and the schema describing its props.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    #[serde(alias = "propsName")]
    pub props_schema_name: Option<String>,
}

/// Normalized description of a named type's properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    pub intrinsic_type: Option<String>,
    pub complex_type: Option<String>,
    pub optional: bool,
}

/// Legacy documentation record produced for class declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntry {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub documentation: Option<String>,
    #[serde(rename = "type")]
    pub type_text: Option<String>,
    pub constructors: Option<Vec<DocEntry>>,
    pub parameters: Option<Vec<DocEntry>>,
    pub return_type: Option<String>,
}

/// Everything one extraction run produces.
///
/// `types` and `components` are append-only and keep encounter order.
/// `classes` is collected by the class path but is not part of the
/// serialized document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    pub types: Vec<Schema>,
    pub components: Vec<Component>,
    #[serde(skip)]
    pub classes: Vec<DocEntry>,
}

impl Documentation {
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.types.iter().find(|schema| schema.name == name)
    }

    /// Split into the `(components, types)` pair.
    pub fn into_parts(self) -> (Vec<Component>, Vec<Schema>) {
        (self.components, self.types)
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_json_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_absent_values_serialize_as_null() {
        let property = Property {
            name: "color".to_string(),
            intrinsic_type: Some("string".to_string()),
            complex_type: None,
            optional: true,
        };

        assert_json_snapshot!(property, @r#"
        {
          "name": "color",
          "intrinsicType": "string",
          "complexType": null,
          "optional": true
        }
        "#);
    }

    #[test]
    fn test_document_keys_and_order() {
        let documentation = Documentation {
            types: vec![Schema {
                name: "P".to_string(),
                properties: vec![],
            }],
            components: vec![Component {
                name: "Btn".to_string(),
                props_schema_name: None,
            }],
            classes: vec![DocEntry::default()],
        };

        let json = serde_json::to_string(&documentation).unwrap();
        assert_eq!(
            json,
            r#"{"types":[{"name":"P","properties":[]}],"components":[{"name":"Btn","propsSchemaName":null}]}"#
        );
    }

    #[test]
    fn test_component_accepts_legacy_props_name() {
        let component: Component =
            serde_json::from_str(r#"{ "name": "Foo", "propsName": "FooProps" }"#).unwrap();
        assert_eq!(component.props_schema_name.as_deref(), Some("FooProps"));
    }

    #[test]
    fn test_into_parts() {
        let documentation = Documentation {
            types: vec![Schema {
                name: "P".to_string(),
                properties: vec![],
            }],
            components: vec![],
            classes: vec![],
        };
        assert!(documentation.schema("P").is_some());
        assert!(documentation.schema("Q").is_none());

        let (components, types) = documentation.into_parts();
        assert!(components.is_empty());
        assert_eq!(types.len(), 1);
    }
}
