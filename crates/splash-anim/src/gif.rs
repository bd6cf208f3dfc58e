//! GIF decoding into frame sequences

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use thiserror::Error;
use tracing::debug;

use crate::frames::{Frame, FrameBuffer};

/// Floor applied to per-frame delays; some encoders write zero
const MIN_FRAME_DELAY: Duration = Duration::from_millis(10);

/// Errors that can occur while loading an animation
#[derive(Error, Debug)]
pub enum AnimError {
    #[error("failed to read animation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode animation: {0}")]
    Decode(#[from] image::ImageError),

    #[error("animation contains no frames")]
    Empty,
}

/// Load an animated GIF from disk
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Frame>, AnimError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let frames = load_from_reader(BufReader::new(file))?;
    debug!("loaded {} frames from {:?}", frames.len(), path);
    Ok(frames)
}

/// Decode an animated GIF from any reader
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Frame>, AnimError> {
    let decoder = GifDecoder::new(reader)?;
    let decoded = decoder.into_frames().collect_frames()?;
    if decoded.is_empty() {
        return Err(AnimError::Empty);
    }

    let frames = decoded
        .into_iter()
        .map(|frame| {
            let delay = Duration::from(frame.delay()).max(MIN_FRAME_DELAY);
            let buffer = frame.into_buffer();
            let (width, height) = (buffer.width(), buffer.height());
            Frame::new(FrameBuffer::new(width, height, buffer.into_raw()), delay)
        })
        .collect();

    Ok(frames)
}
