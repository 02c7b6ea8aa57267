//! The `gas ls` command
//!
//! Lists remote resources one level below the addressed one, emitting one
//! TBRN per line. Every emitted line re-parses to the kind it was derived
//! from, so output can be fed back into further `ls` calls.
//!
//! Dispatch is an exhaustive match over the locator kind; adding a kind
//! without a listing strategy is a compile error.

use std::io::{self, Write};

use thiserror::Error;

use crate::cli::utility::filter_data;
use crate::client::{
    DatasetAccess, Frame, FusionSegmentRead, PlatformClient, SegmentHandle, SegmentRead,
};
use crate::tbrn::{Tbrn, TbrnKind, VersionRef};
use crate::utils::{ClientError, TbrnError};

/// Errors surfaced by `ls`
///
/// Every variant formats as the single line the user sees on stderr; the
/// process then exits with status 1.
#[derive(Error, Debug)]
pub enum LsError {
    #[error("No such frame: \"{0}\"!")]
    NoSuchFrame(usize),

    #[error("No such sensor: \"{0}\"!")]
    NoSuchSensor(String),

    #[error("No such file: \"{0}\"!")]
    NoSuchFile(String),

    #[error("Segment \"{0}\" is not a fusion segment!")]
    NotFusionSegment(String),

    #[error("Segment \"{0}\" is a fusion segment!")]
    NotNormalSegment(String),

    #[error("{0}")]
    Tbrn(#[from] TbrnError),

    #[error("{0}")]
    Client(#[from] ClientError),

    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Context shared by every listing strategy: the addressed dataset at a
/// pinned version.
struct LsContext<'a> {
    dataset_name: &'a str,
    version: Option<&'a VersionRef>,
}

impl LsContext<'_> {
    fn dataset_tbrn(&self) -> Tbrn {
        Tbrn::dataset(self.dataset_name).with_version(self.version.cloned())
    }

    fn segment_tbrn(&self, segment_name: &str) -> Tbrn {
        Tbrn::segment(self.dataset_name, segment_name).with_version(self.version.cloned())
    }

    fn frame_tbrn(&self, segment_name: &str, frame_index: usize) -> Tbrn {
        Tbrn::frame(self.dataset_name, segment_name, frame_index)
            .with_version(self.version.cloned())
    }

    fn sensor_tbrn(&self, segment_name: &str, frame_index: usize, sensor_name: &str) -> Tbrn {
        Tbrn::frame_sensor(self.dataset_name, segment_name, frame_index, sensor_name)
            .with_version(self.version.cloned())
    }

    fn normal_file_tbrn(&self, segment_name: &str, remote_path: &str) -> Tbrn {
        Tbrn::normal_file(self.dataset_name, segment_name, remote_path)
            .with_version(self.version.cloned())
    }

    fn fusion_file_tbrn(
        &self,
        segment_name: &str,
        frame_index: usize,
        sensor_name: &str,
        remote_path: &str,
    ) -> Tbrn {
        Tbrn::fusion_file(
            self.dataset_name,
            segment_name,
            frame_index,
            sensor_name,
            remote_path,
        )
        .with_version(self.version.cloned())
    }
}

/// Entry point for `gas ls`
///
/// Without a TBRN, lists every dataset name the platform knows, in server
/// order. With one, parses it and routes to the strategy for its kind.
pub fn ls(
    gas: &dyn PlatformClient,
    tbrn: Option<&str>,
    list_all_files: bool,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    let Some(tbrn) = tbrn else {
        for dataset_name in gas.list_dataset_names()? {
            writeln!(out, "{}", Tbrn::dataset(dataset_name))?;
        }
        return Ok(());
    };

    let info: Tbrn = tbrn.parse()?;
    let context = LsContext {
        dataset_name: &info.dataset_name,
        version: info.version.as_ref(),
    };
    let dataset = gas.get_dataset(&info.dataset_name, info.version.as_ref())?;

    match info.kind {
        TbrnKind::Dataset => ls_dataset(&context, dataset.as_ref(), list_all_files, out),
        TbrnKind::Segment => ls_segment(&context, dataset.as_ref(), &info, list_all_files, out),
        TbrnKind::Frame => ls_frame(&context, dataset.as_ref(), &info, list_all_files, out),
        TbrnKind::FrameSensor => ls_sensor(&context, dataset.as_ref(), &info, out),
        TbrnKind::NormalFile => ls_normal_file(&context, dataset.as_ref(), &info, out),
        TbrnKind::FusionFile => ls_fusion_file(&context, dataset.as_ref(), &info, out),
    }
}

/// Segment name the locator must carry for any kind below Dataset
fn segment_name(info: &Tbrn) -> &str {
    info.segment_name.as_deref().unwrap_or_default()
}

/// Frame the locator addresses, or the out-of-range user error
fn frame_at<'a>(frames: &'a [Frame], frame_index: usize) -> Result<&'a Frame, LsError> {
    frames
        .get(frame_index)
        .ok_or(LsError::NoSuchFrame(frame_index))
}

fn open_fusion_segment<'a>(
    dataset: &'a dyn DatasetAccess,
    name: &str,
) -> Result<Box<dyn FusionSegmentRead + 'a>, LsError> {
    match dataset.get_segment(name)? {
        SegmentHandle::Fusion(segment) => Ok(segment),
        SegmentHandle::Normal(_) => Err(LsError::NotFusionSegment(name.to_string())),
    }
}

fn open_normal_segment<'a>(
    dataset: &'a dyn DatasetAccess,
    name: &str,
) -> Result<Box<dyn SegmentRead + 'a>, LsError> {
    match dataset.get_segment(name)? {
        SegmentHandle::Normal(segment) => Ok(segment),
        SegmentHandle::Fusion(_) => Err(LsError::NotNormalSegment(name.to_string())),
    }
}

/// Echo one line per data path under a segment
fn echo_data(
    context: &LsContext<'_>,
    segment_name: &str,
    data_paths: impl IntoIterator<Item = String>,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    for path in data_paths {
        writeln!(out, "{}", context.normal_file_tbrn(segment_name, &path))?;
    }
    Ok(())
}

/// Echo one segment: data paths for a normal segment; frame indices, or
/// per-sensor files when `list_all_files`, for a fusion segment.
fn echo_segment(
    context: &LsContext<'_>,
    segment: &SegmentHandle<'_>,
    list_all_files: bool,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    match segment {
        SegmentHandle::Normal(segment) => {
            echo_data(context, segment.name(), segment.list_data_paths()?, out)
        }
        SegmentHandle::Fusion(segment) => {
            let frames = segment.list_frames()?;
            if !list_all_files {
                for index in 0..frames.len() {
                    writeln!(out, "{}", context.frame_tbrn(segment.name(), index))?;
                }
            } else {
                for (index, frame) in frames.iter().enumerate() {
                    for (sensor_name, data) in frame.iter() {
                        writeln!(
                            out,
                            "{}",
                            context.fusion_file_tbrn(
                                segment.name(),
                                index,
                                sensor_name,
                                &data.path
                            )
                        )?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn ls_dataset(
    context: &LsContext<'_>,
    dataset: &dyn DatasetAccess,
    list_all_files: bool,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    let segment_names = dataset.list_segment_names()?;
    if !list_all_files {
        for name in segment_names {
            writeln!(out, "{}", context.segment_tbrn(&name))?;
        }
        return Ok(());
    }

    for name in segment_names {
        let segment = dataset.get_segment(&name)?;
        echo_segment(context, &segment, list_all_files, out)?;
    }
    Ok(())
}

fn ls_segment(
    context: &LsContext<'_>,
    dataset: &dyn DatasetAccess,
    info: &Tbrn,
    list_all_files: bool,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    let segment = dataset.get_segment(segment_name(info))?;
    echo_segment(context, &segment, list_all_files, out)
}

fn ls_frame(
    context: &LsContext<'_>,
    dataset: &dyn DatasetAccess,
    info: &Tbrn,
    list_all_files: bool,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    let segment = open_fusion_segment(dataset, segment_name(info))?;
    let frames = segment.list_frames()?;
    let frame_index = info.frame_index.unwrap_or_default();
    let frame = frame_at(&frames, frame_index)?;

    if !list_all_files {
        for (sensor_name, _) in frame.iter() {
            writeln!(
                out,
                "{}",
                context.sensor_tbrn(segment.name(), frame_index, sensor_name)
            )?;
        }
    } else {
        for (sensor_name, data) in frame.iter() {
            writeln!(
                out,
                "{}",
                context.fusion_file_tbrn(segment.name(), frame_index, sensor_name, &data.path)
            )?;
        }
    }
    Ok(())
}

fn ls_sensor(
    context: &LsContext<'_>,
    dataset: &dyn DatasetAccess,
    info: &Tbrn,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    let segment = open_fusion_segment(dataset, segment_name(info))?;
    let frames = segment.list_frames()?;
    let frame_index = info.frame_index.unwrap_or_default();
    let frame = frame_at(&frames, frame_index)?;

    let sensor_name = info.sensor_name.as_deref().unwrap_or_default();
    let data = frame
        .sensor(sensor_name)
        .ok_or_else(|| LsError::NoSuchSensor(sensor_name.to_string()))?;

    writeln!(
        out,
        "{}",
        context.fusion_file_tbrn(segment.name(), frame_index, sensor_name, &data.path)
    )?;
    Ok(())
}

fn ls_normal_file(
    context: &LsContext<'_>,
    dataset: &dyn DatasetAccess,
    info: &Tbrn,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    let segment = open_normal_segment(dataset, segment_name(info))?;
    let remote_path = info.remote_path.as_deref().unwrap_or_default();
    let matched = filter_data(segment.list_data_paths()?, remote_path);
    echo_data(context, segment.name(), matched, out)
}

fn ls_fusion_file(
    context: &LsContext<'_>,
    dataset: &dyn DatasetAccess,
    info: &Tbrn,
    out: &mut dyn Write,
) -> Result<(), LsError> {
    let segment = open_fusion_segment(dataset, segment_name(info))?;
    let frames = segment.list_frames()?;
    let frame_index = info.frame_index.unwrap_or_default();
    let frame = frame_at(&frames, frame_index)?;

    let sensor_name = info.sensor_name.as_deref().unwrap_or_default();
    let remote_path = info.remote_path.as_deref().unwrap_or_default();
    let data = frame
        .sensor(sensor_name)
        .ok_or_else(|| LsError::NoSuchSensor(sensor_name.to_string()))?;
    if data.path != remote_path {
        return Err(LsError::NoSuchFile(remote_path.to_string()));
    }

    writeln!(out, "{}", info)?;
    Ok(())
}
