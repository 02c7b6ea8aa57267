//! Catalog parsing from bundled JSON files
//!
//! A catalog declares, per label type, the category taxonomy and the
//! attribute enumerations a dataset uses. Loaders resolve integer enum codes
//! from annotation files through these tables; nothing here is process-global
//! state - a catalog is plain data passed into a loader call.

use serde::Deserialize;

use crate::utils::LoaderError;

/// Declared category
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
}

/// Declared attribute: optional value type and optional enum table
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AttributeInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub value_type: Option<String>,
    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,
}

impl AttributeInfo {
    /// Resolve an integer code against this attribute's enum table
    pub fn resolve_enum(&self, code: usize) -> Result<String, LoaderError> {
        let value = self
            .enum_values
            .get(code)
            .ok_or_else(|| LoaderError::UnknownEnumCode {
                attribute: self.name.clone(),
                code,
                max: self.enum_values.len().saturating_sub(1),
            })?;
        match value {
            serde_json::Value::String(s) => Ok(s.clone()),
            other => Ok(other.to_string()),
        }
    }
}

/// Classification subcatalog: attribute declarations only
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ClassificationSubcatalog {
    #[serde(default)]
    pub attributes: Vec<AttributeInfo>,
}

/// Box2D subcatalog: categories plus attribute declarations
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Box2dSubcatalog {
    #[serde(default)]
    pub categories: Vec<CategoryInfo>,
    #[serde(default)]
    pub attributes: Vec<AttributeInfo>,
}

impl Box2dSubcatalog {
    /// Resolve a category code against the declared taxonomy
    pub fn resolve_category(&self, code: usize) -> Result<&str, LoaderError> {
        self.categories
            .get(code)
            .map(|c| c.name.as_str())
            .ok_or_else(|| LoaderError::UnknownEnumCode {
                attribute: "category".to_string(),
                code,
                max: self.categories.len().saturating_sub(1),
            })
    }

    /// Find a declared attribute by name
    pub fn attribute(&self, name: &str) -> Result<&AttributeInfo, LoaderError> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| LoaderError::InvalidCatalog(format!("missing attribute \"{}\"", name)))
    }
}

/// Per-dataset catalog, one subcatalog per label type
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub struct Catalog {
    #[serde(default)]
    pub classification: Option<ClassificationSubcatalog>,
    #[serde(default)]
    pub box2d: Option<Box2dSubcatalog>,
}

impl Catalog {
    /// Parse a catalog from its JSON text
    pub fn from_json(json: &str) -> Result<Self, LoaderError> {
        serde_json::from_str(json).map_err(|e| LoaderError::InvalidCatalog(e.to_string()))
    }

    pub fn classification(&self) -> Result<&ClassificationSubcatalog, LoaderError> {
        self.classification
            .as_ref()
            .ok_or(LoaderError::MissingSubcatalog("CLASSIFICATION"))
    }

    pub fn box2d(&self) -> Result<&Box2dSubcatalog, LoaderError> {
        self.box2d
            .as_ref()
            .ok_or(LoaderError::MissingSubcatalog("BOX2D"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "CLASSIFICATION": {
            "attributes": [
                {"name": "daylight", "type": "boolean"},
                {"name": "fog", "type": "boolean"}
            ]
        },
        "BOX2D": {
            "categories": [{"name": "car"}, {"name": "truck"}],
            "attributes": [
                {"name": "occlusion", "enum": ["no-occ", "large-occ"]}
            ]
        }
    }"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let classification = catalog.classification().unwrap();
        assert_eq!(classification.attributes.len(), 2);
        assert_eq!(classification.attributes[0].name, "daylight");

        let box2d = catalog.box2d().unwrap();
        assert_eq!(box2d.resolve_category(1).unwrap(), "truck");
        let occlusion = box2d.attribute("occlusion").unwrap();
        assert_eq!(occlusion.resolve_enum(0).unwrap(), "no-occ");
    }

    #[test]
    fn test_enum_code_out_of_range() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let box2d = catalog.box2d().unwrap();
        let err = box2d.attribute("occlusion").unwrap().resolve_enum(9);
        assert!(matches!(
            err,
            Err(LoaderError::UnknownEnumCode { code: 9, max: 1, .. })
        ));
    }

    #[test]
    fn test_missing_subcatalog() {
        let catalog = Catalog::from_json("{}").unwrap();
        assert!(matches!(
            catalog.box2d(),
            Err(LoaderError::MissingSubcatalog("BOX2D"))
        ));
    }
}
