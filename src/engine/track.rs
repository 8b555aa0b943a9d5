//! Track assembly
//!
//! Wraps encoded bytes into the `AudioTrack` handed back to callers. The
//! bytes live behind an `Arc`, so a track can be cloned and shared across
//! tasks; they are freed when the last handle is dropped.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::engine::config::RenderConfig;
use crate::engine::io::{write_asset, EncodedAsset};
use crate::error::Result;

/// File name given to every synthesized track
pub const TRACK_NAME: &str = "Generated_Cinematic_SFX.wav";

/// MIME type of the encoded container
pub const WAV_MIME_TYPE: &str = "audio/wav";

/// Caller-resolvable reference to an encoded asset
#[derive(Debug, Clone)]
pub struct ResourceHandle {
    id: Uuid,
    asset: Arc<EncodedAsset>,
}

impl ResourceHandle {
    pub fn new(id: Uuid, asset: EncodedAsset) -> Self {
        Self {
            id,
            asset: Arc::new(asset),
        }
    }

    /// Local reference string for this resource (`blob:cinesynth/<uuid>`)
    pub fn url(&self) -> String {
        format!("blob:cinesynth/{}", self.id)
    }

    pub fn bytes(&self) -> &[u8] {
        self.asset.bytes()
    }

    pub fn len(&self) -> usize {
        self.asset.byte_len()
    }

    pub fn is_empty(&self) -> bool {
        self.asset.byte_len() == 0
    }

    pub fn mime_type(&self) -> &'static str {
        WAV_MIME_TYPE
    }

    pub fn asset(&self) -> &EncodedAsset {
        &self.asset
    }

    /// Write the file bytes to `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        write_asset(&self.asset, path)
    }
}

/// A finished synthesized track
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub id: Uuid,
    pub handle: ResourceHandle,
    pub name: String,
    /// Configured (clamped) duration in seconds
    pub duration_secs: f64,
}

impl AudioTrack {
    /// Serializable summary of the track
    pub fn summary(&self) -> TrackSummary {
        let asset = self.handle.asset();
        TrackSummary {
            id: self.id,
            url: self.handle.url(),
            name: self.name.clone(),
            duration_secs: self.duration_secs,
            channels: asset.channels,
            sample_rate: asset.sample_rate,
            bits_per_sample: asset.bits_per_sample,
            byte_len: asset.byte_len(),
            sha256: asset.checksum(),
        }
    }
}

/// JSON-friendly description of an `AudioTrack`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub id: Uuid,
    pub url: String,
    pub name: String,
    pub duration_secs: f64,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub byte_len: usize,
    pub sha256: String,
}

/// Bind an encoded asset to a fresh identity
///
/// The track records the configured duration, not the requested one.
pub fn assemble(asset: EncodedAsset, config: &RenderConfig) -> AudioTrack {
    let id = Uuid::new_v4();
    AudioTrack {
        id,
        handle: ResourceHandle::new(id, asset),
        name: TRACK_NAME.to_string(),
        duration_secs: config.duration_secs,
    }
}
