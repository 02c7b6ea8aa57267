//! TensorBay Resource Name (TBRN) parsing and formatting
//!
//! A TBRN addresses a dataset, segment, frame, sensor or file on the
//! platform. The string splits at most once on `"://"`; the head is a
//! colon-delimited name list and the tail, when present, is the remote path:
//!
//! ```text
//! tb:<dataset>[@<draft|revision>][:<segment>[:<frame>[:<sensor>]]][://<remote_path>]
//! ```
//!
//! Examples:
//! - `tb:VOC2012` - a dataset
//! - `tb:VOC2012@main:train` - a segment at a committed revision
//! - `tb:VOC2012:train://2012_004331.jpg` - a file in a normal segment
//! - `tb:fusion@1:seq1:0:lidar://000000.bin` - a sensor file in a draft

use std::fmt;
use std::str::FromStr;

use crate::utils::TbrnError;

/// Scheme prefix every TBRN starts with
pub const TBRN_SCHEME: &str = "tb";

/// Separator between the name head and the remote path tail
const PATH_SEPARATOR: &str = "://";

/// Resource flavor addressed by a TBRN
///
/// The variant is decided at parse time from which fields are present and
/// never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TbrnKind {
    Dataset,
    Segment,
    Frame,
    FrameSensor,
    NormalFile,
    FusionFile,
}

/// Version qualifier attached to the dataset name with `@`
///
/// Draft and revision are mutually exclusive by construction: a TBRN carries
/// at most one `VersionRef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRef {
    /// Uncommitted working state, selected by number
    Draft(u32),
    /// Committed snapshot, selected by name or commit id
    Revision(String),
}

impl fmt::Display for VersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRef::Draft(number) => write!(f, "{}", number),
            VersionRef::Revision(revision) => write!(f, "{}", revision),
        }
    }
}

/// A parsed TBRN locator
///
/// Constructed once per CLI invocation, immutable thereafter. Fields beyond
/// `dataset_name` are populated only as required by `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tbrn {
    pub kind: TbrnKind,
    pub dataset_name: String,
    pub segment_name: Option<String>,
    pub frame_index: Option<usize>,
    pub sensor_name: Option<String>,
    pub remote_path: Option<String>,
    pub version: Option<VersionRef>,
}

impl Tbrn {
    /// Dataset-level locator
    pub fn dataset(dataset_name: impl Into<String>) -> Self {
        Self {
            kind: TbrnKind::Dataset,
            dataset_name: dataset_name.into(),
            segment_name: None,
            frame_index: None,
            sensor_name: None,
            remote_path: None,
            version: None,
        }
    }

    /// Segment-level locator
    pub fn segment(dataset_name: impl Into<String>, segment_name: impl Into<String>) -> Self {
        Self {
            kind: TbrnKind::Segment,
            segment_name: Some(segment_name.into()),
            ..Self::dataset(dataset_name)
        }
    }

    /// Frame-level locator
    pub fn frame(
        dataset_name: impl Into<String>,
        segment_name: impl Into<String>,
        frame_index: usize,
    ) -> Self {
        Self {
            kind: TbrnKind::Frame,
            frame_index: Some(frame_index),
            ..Self::segment(dataset_name, segment_name)
        }
    }

    /// Sensor-level locator inside a frame
    pub fn frame_sensor(
        dataset_name: impl Into<String>,
        segment_name: impl Into<String>,
        frame_index: usize,
        sensor_name: impl Into<String>,
    ) -> Self {
        Self {
            kind: TbrnKind::FrameSensor,
            sensor_name: Some(sensor_name.into()),
            ..Self::frame(dataset_name, segment_name, frame_index)
        }
    }

    /// File locator inside a normal segment
    pub fn normal_file(
        dataset_name: impl Into<String>,
        segment_name: impl Into<String>,
        remote_path: impl Into<String>,
    ) -> Self {
        Self {
            kind: TbrnKind::NormalFile,
            remote_path: Some(remote_path.into()),
            ..Self::segment(dataset_name, segment_name)
        }
    }

    /// File locator inside a fusion segment frame/sensor
    pub fn fusion_file(
        dataset_name: impl Into<String>,
        segment_name: impl Into<String>,
        frame_index: usize,
        sensor_name: impl Into<String>,
        remote_path: impl Into<String>,
    ) -> Self {
        Self {
            kind: TbrnKind::FusionFile,
            remote_path: Some(remote_path.into()),
            ..Self::frame_sensor(dataset_name, segment_name, frame_index, sensor_name)
        }
    }

    /// Attach a version qualifier, consuming self
    pub fn with_version(mut self, version: Option<VersionRef>) -> Self {
        self.version = version;
        self
    }
}

impl FromStr for Tbrn {
    type Err = TbrnError;

    fn from_str(tbrn: &str) -> Result<Self, Self::Err> {
        // Split off the remote path first; names must not contain "://".
        let (head, remote_path) = match tbrn.split_once(PATH_SEPARATOR) {
            Some((head, path)) => (head, Some(path)),
            None => (tbrn, None),
        };

        if let Some(path) = remote_path {
            if path.is_empty() {
                return Err(TbrnError::EmptyField {
                    field: "remote path",
                    tbrn: tbrn.to_string(),
                });
            }
        }

        let mut names = head.split(':');
        if names.next() != Some(TBRN_SCHEME) {
            return Err(TbrnError::MissingScheme(tbrn.to_string()));
        }

        let names: Vec<&str> = names.collect();
        if names.iter().any(|name| name.is_empty()) {
            return Err(TbrnError::EmptyField {
                field: "name",
                tbrn: tbrn.to_string(),
            });
        }

        let (dataset_field, rest) = names
            .split_first()
            .ok_or_else(|| TbrnError::EmptyField {
                field: "dataset name",
                tbrn: tbrn.to_string(),
            })?;

        // "name@qualifier": all-decimal qualifier selects a draft, anything
        // else a revision.
        let (dataset_name, version) = match dataset_field.split_once('@') {
            Some((name, qualifier)) if name.is_empty() || qualifier.is_empty() => {
                return Err(TbrnError::EmptyField {
                    field: "version qualifier",
                    tbrn: tbrn.to_string(),
                });
            }
            Some((name, qualifier)) => {
                let version = match qualifier.parse::<u32>() {
                    Ok(number) => VersionRef::Draft(number),
                    Err(_) => VersionRef::Revision(qualifier.to_string()),
                };
                (name, Some(version))
            }
            None => (*dataset_field, None),
        };
        if dataset_name.is_empty() {
            return Err(TbrnError::EmptyField {
                field: "dataset name",
                tbrn: tbrn.to_string(),
            });
        }

        let parse_frame = |field: &str| {
            field
                .parse::<usize>()
                .map_err(|_| TbrnError::InvalidFrameIndex(field.to_string()))
        };

        let locator = match (rest, remote_path) {
            ([], None) => Tbrn::dataset(dataset_name),
            ([segment], None) => Tbrn::segment(dataset_name, *segment),
            ([segment], Some(path)) => Tbrn::normal_file(dataset_name, *segment, path),
            ([segment, frame], None) => {
                Tbrn::frame(dataset_name, *segment, parse_frame(*frame)?)
            }
            ([segment, frame, sensor], None) => {
                Tbrn::frame_sensor(dataset_name, *segment, parse_frame(*frame)?, *sensor)
            }
            ([segment, frame, sensor], Some(path)) => {
                Tbrn::fusion_file(dataset_name, *segment, parse_frame(*frame)?, *sensor, path)
            }
            ([] | [_, _], Some(_)) => {
                return Err(TbrnError::DanglingRemotePath(tbrn.to_string()));
            }
            _ => return Err(TbrnError::TooManyFields(tbrn.to_string())),
        };

        Ok(locator.with_version(version))
    }
}

impl fmt::Display for Tbrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", TBRN_SCHEME, self.dataset_name)?;
        if let Some(ref version) = self.version {
            write!(f, "@{}", version)?;
        }
        if let Some(ref segment_name) = self.segment_name {
            write!(f, ":{}", segment_name)?;
        }
        if let Some(frame_index) = self.frame_index {
            write!(f, ":{}", frame_index)?;
        }
        if let Some(ref sensor_name) = self.sensor_name {
            write!(f, ":{}", sensor_name)?;
        }
        if let Some(ref remote_path) = self.remote_path {
            write!(f, "{}{}", PATH_SEPARATOR, remote_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dataset() {
        let tbrn: Tbrn = "tb:VOC2012".parse().unwrap();
        assert_eq!(tbrn.kind, TbrnKind::Dataset);
        assert_eq!(tbrn.dataset_name, "VOC2012");
        assert_eq!(tbrn.version, None);
    }

    #[test]
    fn test_parse_segment_with_draft() {
        let tbrn: Tbrn = "tb:VOC2012@3:train".parse().unwrap();
        assert_eq!(tbrn.kind, TbrnKind::Segment);
        assert_eq!(tbrn.segment_name.as_deref(), Some("train"));
        assert_eq!(tbrn.version, Some(VersionRef::Draft(3)));
    }

    #[test]
    fn test_parse_segment_with_revision() {
        let tbrn: Tbrn = "tb:VOC2012@v1.0:train".parse().unwrap();
        assert_eq!(tbrn.version, Some(VersionRef::Revision("v1.0".to_string())));
    }

    #[test]
    fn test_parse_frame_and_sensor() {
        let tbrn: Tbrn = "tb:fusion:seq1:12".parse().unwrap();
        assert_eq!(tbrn.kind, TbrnKind::Frame);
        assert_eq!(tbrn.frame_index, Some(12));

        let tbrn: Tbrn = "tb:fusion:seq1:12:lidar".parse().unwrap();
        assert_eq!(tbrn.kind, TbrnKind::FrameSensor);
        assert_eq!(tbrn.sensor_name.as_deref(), Some("lidar"));
    }

    #[test]
    fn test_parse_files() {
        let tbrn: Tbrn = "tb:VOC2012:train://2012_004331.jpg".parse().unwrap();
        assert_eq!(tbrn.kind, TbrnKind::NormalFile);
        assert_eq!(tbrn.remote_path.as_deref(), Some("2012_004331.jpg"));

        let tbrn: Tbrn = "tb:fusion:seq1:0:lidar://000000.bin".parse().unwrap();
        assert_eq!(tbrn.kind, TbrnKind::FusionFile);
        assert_eq!(tbrn.frame_index, Some(0));
        assert_eq!(tbrn.remote_path.as_deref(), Some("000000.bin"));
    }

    #[test]
    fn test_parse_rejects_missing_scheme() {
        assert_eq!(
            "VOC2012:train".parse::<Tbrn>(),
            Err(TbrnError::MissingScheme("VOC2012:train".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_empty_fields() {
        assert!("tb:".parse::<Tbrn>().is_err());
        assert!("tb:VOC2012::file".parse::<Tbrn>().is_err());
        assert!("tb:VOC2012@:train".parse::<Tbrn>().is_err());
        assert!("tb:VOC2012:train://".parse::<Tbrn>().is_err());
    }

    #[test]
    fn test_parse_rejects_bad_frame_index() {
        assert_eq!(
            "tb:ds:seg:abc".parse::<Tbrn>(),
            Err(TbrnError::InvalidFrameIndex("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_frame_with_path_but_no_sensor() {
        assert!(matches!(
            "tb:ds:seg:3://a.jpg".parse::<Tbrn>(),
            Err(TbrnError::DanglingRemotePath(_))
        ));
    }

    #[test]
    fn test_parse_rejects_too_many_fields() {
        assert!(matches!(
            "tb:ds:seg:3:lidar:extra".parse::<Tbrn>(),
            Err(TbrnError::TooManyFields(_))
        ));
    }

    #[test]
    fn test_format_round_trip_preserves_kind() {
        let cases = [
            "tb:VOC2012",
            "tb:VOC2012@3",
            "tb:VOC2012@v1.0:train",
            "tb:VOC2012:train://folder/2012_004331.jpg",
            "tb:fusion:seq1:12",
            "tb:fusion:seq1:12:lidar",
            "tb:fusion@1:seq1:0:lidar://000000.bin",
        ];
        for case in cases {
            let parsed: Tbrn = case.parse().unwrap();
            let reparsed: Tbrn = parsed.to_string().parse().unwrap();
            assert_eq!(parsed, reparsed, "round trip failed for {}", case);
            assert_eq!(parsed.to_string(), case);
        }
    }
}
