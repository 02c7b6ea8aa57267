//! In-memory dataset model
//!
//! A `Dataset` owns ordered `Segment`s; a `Segment` owns ordered `Data`
//! items; each `Data` item carries at most one label set. Loaders build the
//! tree once and hand exclusive ownership to the caller; nothing mutates it
//! after the load returns.

pub mod catalog;
pub mod label;

use std::path::PathBuf;

pub use catalog::{AttributeInfo, Box2dSubcatalog, Catalog, ClassificationSubcatalog};
pub use label::{AttributeValue, Classification, Label, LabeledBox2d};

/// A named dataset: catalog plus append-ordered segments
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub name: String,
    pub catalog: Catalog,
    segments: Vec<Segment>,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            catalog: Catalog::default(),
            segments: Vec::new(),
        }
    }

    /// Append a new empty segment and return a handle to fill it
    pub fn create_segment(&mut self, name: impl Into<String>) -> &mut Segment {
        self.segments.push(Segment::new(name));
        self.segments.last_mut().unwrap()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// An append-ordered collection of data items
#[derive(Debug, Clone)]
pub struct Segment {
    pub name: String,
    data: Vec<Data>,
}

impl Segment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
        }
    }

    pub fn append(&mut self, data: Data) {
        self.data.push(data);
    }

    pub fn data(&self) -> &[Data] {
        &self.data
    }
}

/// One data item: a local file plus its labels
#[derive(Debug, Clone)]
pub struct Data {
    pub local_path: PathBuf,
    pub label: Label,
}

impl Data {
    pub fn new(local_path: impl Into<PathBuf>) -> Self {
        Self {
            local_path: local_path.into(),
            label: Label::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_append_order() {
        let mut dataset = Dataset::new("demo");
        let segment = dataset.create_segment("seq1");
        segment.append(Data::new("a.jpg"));
        segment.append(Data::new("b.jpg"));
        dataset.create_segment("seq2");

        let names: Vec<&str> = dataset.segments().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["seq1", "seq2"]);
        assert_eq!(dataset.segments()[0].data().len(), 2);
        assert_eq!(
            dataset.segments()[0].data()[0].local_path,
            PathBuf::from("a.jpg")
        );
    }
}
