//! Blocking HTTP client for the TensorBay gateway
//!
//! Thin JSON-over-HTTP provider for the [`PlatformClient`] trait family.
//! Every call is a single blocking GET; the access key travels in the
//! `X-Token` header. Version qualifiers become query parameters so a handle
//! opened at a draft or revision pins every later read.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::platform::{
    ClientResult, DatasetAccess, Frame, FusionSegmentRead, PlatformClient, RemoteData,
    SegmentHandle, SegmentRead,
};
use crate::tbrn::VersionRef;
use crate::utils::ClientError;

const DEFAULT_GATEWAY_URL: &str = "https://gas.graviti.cn/gateway";

/// Connection settings for the gateway
#[derive(Debug, Clone)]
pub struct GasConfig {
    pub access_key: String,
    pub url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl GasConfig {
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            url: DEFAULT_GATEWAY_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// HTTP implementation of [`PlatformClient`]
pub struct GasHttp {
    http: reqwest::blocking::Client,
    config: GasConfig,
}

// Wire DTOs. The gateway wraps list payloads in a named field.

#[derive(Deserialize)]
struct DatasetListBody {
    datasets: Vec<NameEntry>,
}

#[derive(Deserialize)]
struct NameEntry {
    name: String,
}

#[derive(Deserialize)]
struct SegmentListBody {
    segments: Vec<SegmentEntry>,
}

#[derive(Deserialize)]
struct SegmentEntry {
    name: String,
    #[serde(rename = "isFusion", default)]
    is_fusion: bool,
}

#[derive(Deserialize)]
struct DataListBody {
    data: Vec<DataEntry>,
}

#[derive(Deserialize)]
struct DataEntry {
    #[serde(rename = "remotePath")]
    remote_path: String,
}

#[derive(Deserialize)]
struct FrameListBody {
    frames: Vec<FrameEntry>,
}

#[derive(Deserialize)]
struct FrameEntry {
    #[serde(rename = "frame")]
    sensors: Vec<SensorDataEntry>,
}

#[derive(Deserialize)]
struct SensorDataEntry {
    #[serde(rename = "sensorName")]
    sensor_name: String,
    #[serde(rename = "remotePath")]
    remote_path: String,
}

impl GasHttp {
    pub fn new(config: GasConfig) -> ClientResult<Self> {
        if config.access_key.is_empty() {
            return Err(ClientError::MissingAccessKey);
        }
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// GET a JSON body from a gateway path, with optional version params
    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        version: Option<&VersionRef>,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.config.url.trim_end_matches('/'), path);
        debug!(url = %url, "gateway GET");

        let mut request = self
            .http
            .get(&url)
            .header("X-Token", self.config.access_key.as_str());
        match version {
            Some(VersionRef::Draft(number)) => {
                request = request.query(&[("draftNumber", number.to_string())]);
            }
            Some(VersionRef::Revision(revision)) => {
                request = request.query(&[("revision", revision.as_str())]);
            }
            None => {}
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                url,
            });
        }
        response
            .json::<T>()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl PlatformClient for GasHttp {
    fn list_dataset_names(&self) -> ClientResult<Vec<String>> {
        let body: DatasetListBody = self.get_json("v1/datasets", None)?;
        Ok(body.datasets.into_iter().map(|d| d.name).collect())
    }

    fn get_dataset(
        &self,
        name: &str,
        version: Option<&VersionRef>,
    ) -> ClientResult<Box<dyn DatasetAccess + '_>> {
        Ok(Box::new(DatasetHttp {
            gas: self,
            dataset_name: name.to_string(),
            version: version.cloned(),
        }))
    }
}

/// One dataset pinned to an optional version
struct DatasetHttp<'a> {
    gas: &'a GasHttp,
    dataset_name: String,
    version: Option<VersionRef>,
}

impl DatasetAccess for DatasetHttp<'_> {
    fn list_segment_names(&self) -> ClientResult<Vec<String>> {
        let body: SegmentListBody = self.gas.get_json(
            &format!("v1/datasets/{}/segments", self.dataset_name),
            self.version.as_ref(),
        )?;
        Ok(body.segments.into_iter().map(|s| s.name).collect())
    }

    fn get_segment(&self, name: &str) -> ClientResult<SegmentHandle<'_>> {
        let body: SegmentListBody = self.gas.get_json(
            &format!("v1/datasets/{}/segments", self.dataset_name),
            self.version.as_ref(),
        )?;
        let entry = body
            .segments
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ClientError::NoSuchSegment(name.to_string()))?;

        let segment = SegmentHttp {
            gas: self.gas,
            dataset_name: self.dataset_name.clone(),
            segment_name: entry.name,
            version: self.version.clone(),
        };
        Ok(if entry.is_fusion {
            SegmentHandle::Fusion(Box::new(segment))
        } else {
            SegmentHandle::Normal(Box::new(segment))
        })
    }
}

struct SegmentHttp<'a> {
    gas: &'a GasHttp,
    dataset_name: String,
    segment_name: String,
    version: Option<VersionRef>,
}

impl SegmentRead for SegmentHttp<'_> {
    fn name(&self) -> &str {
        &self.segment_name
    }

    fn list_data_paths(&self) -> ClientResult<Vec<String>> {
        let body: DataListBody = self.gas.get_json(
            &format!(
                "v1/datasets/{}/segments/{}/data",
                self.dataset_name, self.segment_name
            ),
            self.version.as_ref(),
        )?;
        Ok(body.data.into_iter().map(|d| d.remote_path).collect())
    }
}

impl FusionSegmentRead for SegmentHttp<'_> {
    fn name(&self) -> &str {
        &self.segment_name
    }

    fn list_frames(&self) -> ClientResult<Vec<Frame>> {
        let body: FrameListBody = self.gas.get_json(
            &format!(
                "v1/datasets/{}/segments/{}/frames",
                self.dataset_name, self.segment_name
            ),
            self.version.as_ref(),
        )?;
        Ok(body
            .frames
            .into_iter()
            .map(|frame| {
                Frame::new(
                    frame
                        .sensors
                        .into_iter()
                        .map(|s| (s.sensor_name, RemoteData { path: s.remote_path }))
                        .collect(),
                )
            })
            .collect())
    }
}
