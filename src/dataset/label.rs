//! Label types attached to data items

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute value: catalogs declare the type, labels carry the value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Str(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Str(value)
    }
}

/// Ordered attribute map; BTreeMap keeps serialized output stable
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Whole-item classification label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    pub category: Option<String>,
    pub attributes: Attributes,
}

impl Classification {
    pub fn with_attributes(attributes: Attributes) -> Self {
        Self {
            category: None,
            attributes,
        }
    }
}

/// 2D bounding box label with min/max corners
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledBox2d {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub category: Option<String>,
    pub attributes: Attributes,
    /// Tracking/instance id carried through from the source annotation
    pub instance: Option<String>,
}

impl LabeledBox2d {
    /// Build a box from left/top corner plus width and height
    pub fn from_xywh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            xmin: left,
            ymin: top,
            xmax: left + width,
            ymax: top + height,
            category: None,
            attributes: Attributes::new(),
            instance: None,
        }
    }
}

/// The label set a data item owns: zero-or-one classification plus boxes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Label {
    pub classification: Option<Classification>,
    pub box2d: Vec<LabeledBox2d>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_from_xywh() {
        let b = LabeledBox2d::from_xywh(10.0, 5.0, 20.0, 8.0);
        assert_eq!(b.xmin, 10.0);
        assert_eq!(b.ymin, 5.0);
        assert_eq!(b.xmax, 30.0);
        assert_eq!(b.ymax, 13.0);
    }

    #[test]
    fn test_attribute_value_serializes_untagged() {
        let v = serde_json::to_string(&AttributeValue::Bool(true)).unwrap();
        assert_eq!(v, "true");
        let v = serde_json::to_string(&AttributeValue::Str("fog".into())).unwrap();
        assert_eq!(v, "\"fog\"");
    }
}
