//! Remote platform client
//!
//! `platform` holds the trait seam the CLI programs against; `gas` is the
//! blocking HTTP gateway implementation.

pub mod gas;
pub mod platform;

pub use gas::{GasConfig, GasHttp};
pub use platform::{
    ClientResult, DatasetAccess, Frame, FusionSegmentRead, PlatformClient, RemoteData,
    SegmentHandle, SegmentRead,
};
