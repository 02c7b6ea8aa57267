//! Remote platform trait seam
//!
//! These traits are the contract the CLI programs against; the HTTP gateway
//! client is one implementation, in-memory fixtures in tests are another.
//! All operations are blocking and read-only.

use crate::tbrn::VersionRef;
use crate::utils::ClientError;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Top-level platform operations
pub trait PlatformClient {
    /// Every dataset name visible to the caller, in server order
    fn list_dataset_names(&self) -> ClientResult<Vec<String>>;

    /// Open a dataset at an optional draft or revision
    fn get_dataset(
        &self,
        name: &str,
        version: Option<&VersionRef>,
    ) -> ClientResult<Box<dyn DatasetAccess + '_>>;
}

/// Read operations on one dataset at a pinned version
pub trait DatasetAccess {
    /// Segment names in server order
    fn list_segment_names(&self) -> ClientResult<Vec<String>>;

    /// Open a segment; the handle tells normal from fusion segments
    fn get_segment(&self, name: &str) -> ClientResult<SegmentHandle<'_>>;
}

/// Segment flavor resolved at open time
pub enum SegmentHandle<'a> {
    Normal(Box<dyn SegmentRead + 'a>),
    Fusion(Box<dyn FusionSegmentRead + 'a>),
}

impl SegmentHandle<'_> {
    pub fn name(&self) -> &str {
        match self {
            SegmentHandle::Normal(segment) => segment.name(),
            SegmentHandle::Fusion(segment) => segment.name(),
        }
    }
}

/// Read operations on a normal (single-sensor) segment
pub trait SegmentRead {
    fn name(&self) -> &str;

    /// Remote paths of every data item, in server order
    fn list_data_paths(&self) -> ClientResult<Vec<String>>;
}

/// Read operations on a fusion (multi-sensor) segment
pub trait FusionSegmentRead {
    fn name(&self) -> &str;

    /// Time-ordered frames; each frame maps sensor name to one data record
    fn list_frames(&self) -> ClientResult<Vec<Frame>>;
}

/// One remote data record inside a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteData {
    pub path: String,
}

/// One synchronized multi-sensor capture
///
/// Sensor order is preserved as the server returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    sensors: Vec<(String, RemoteData)>,
}

impl Frame {
    pub fn new(sensors: Vec<(String, RemoteData)>) -> Self {
        Self { sensors }
    }

    pub fn sensor(&self, name: &str) -> Option<&RemoteData> {
        self.sensors
            .iter()
            .find(|(sensor, _)| sensor == name)
            .map(|(_, data)| data)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RemoteData)> {
        self.sensors
            .iter()
            .map(|(sensor, data)| (sensor.as_str(), data))
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_preserves_sensor_order() {
        let frame = Frame::new(vec![
            ("lidar".to_string(), RemoteData { path: "a.bin".to_string() }),
            ("camera".to_string(), RemoteData { path: "a.jpg".to_string() }),
        ]);
        let sensors: Vec<&str> = frame.iter().map(|(name, _)| name).collect();
        assert_eq!(sensors, vec!["lidar", "camera"]);
        assert_eq!(frame.sensor("camera").unwrap().path, "a.jpg");
        assert!(frame.sensor("radar").is_none());
    }
}
