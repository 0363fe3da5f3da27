use std::{
    fs,
    panic::{self, UnwindSafe},
    path::{Path, PathBuf},
    sync::mpsc::Sender,
    thread,
};

use crate::{error::TextureError, scene_pkg::node::NodeId};

/// Which texture slot of an object node an image is destined for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSlot {
    Diffuse,
    NormalMap,
}

/// Decoded RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct TextureRequest {
    pub node: NodeId,
    pub slot: TextureSlot,
    pub path: PathBuf,
}

/// Completion message for one [`TextureRequest`].
#[derive(Debug)]
pub struct TextureEvent {
    pub node: NodeId,
    pub slot: TextureSlot,
    pub path: PathBuf,
    pub result: Result<TextureImage, TextureError>,
}

/// Asynchronous image acquisition.
///
/// Implementations must send exactly one [`TextureEvent`] per request. A closed channel
/// means the scene was dropped and the event can be discarded. Dropping the sender without
/// sending counts as a failed request.
pub trait ImageLoader {
    fn request(&self, request: TextureRequest, events: Sender<TextureEvent>);
}

/// Decodes each request on its own thread with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadedImageLoader;

impl ImageLoader for ThreadedImageLoader {
    fn request(&self, request: TextureRequest, events: Sender<TextureEvent>) {
        thread::spawn(move || {
            let result = guarded_decode(&request.path, decode_image);
            let event = TextureEvent {
                node: request.node,
                slot: request.slot,
                path: request.path,
                result,
            };
            if events.send(event).is_err() {
                log::trace!("texture arrived after its scene was dropped");
            }
        });
    }
}

/// Runs `decode`, turning a panic into [`TextureError::Abandoned`] so the request still
/// gets its event.
pub fn guarded_decode(
    path: &Path,
    decode: impl FnOnce(&Path) -> Result<TextureImage, TextureError> + UnwindSafe,
) -> Result<TextureImage, TextureError> {
    panic::catch_unwind(|| decode(path)).unwrap_or_else(|_| {
        log::error!("image decoder panicked on {}", path.display());
        Err(TextureError::Abandoned {
            path: path.to_path_buf(),
        })
    })
}

pub fn decode_image(path: &Path) -> Result<TextureImage, TextureError> {
    let bytes = fs::read(path).map_err(|source| TextureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes)
        .map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    Ok(TextureImage {
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
    })
}
