//! Headless surface for testing.

use super::scripted::ScriptedContext;
use glrec_core::{ContextKind, Surface, SurfaceSize};
use std::sync::atomic::{AtomicU32, Ordering};

/// A canvas without a window. Contexts acquired from it are
/// [`ScriptedContext`]s sized like the canvas at acquisition time.
#[derive(Debug)]
pub struct HeadlessCanvas {
    width: AtomicU32,
    height: AtomicU32,
}

impl HeadlessCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: AtomicU32::new(width),
            height: AtomicU32::new(height),
        }
    }

    /// Change the canvas size, as a page script assigning `canvas.width` would.
    pub fn resize(&self, width: u32, height: u32) {
        self.width.store(width, Ordering::Relaxed);
        self.height.store(height, Ordering::Relaxed);
    }
}

impl Default for HeadlessCanvas {
    /// The HTML canvas default of 300x150.
    fn default() -> Self {
        Self::new(300, 150)
    }
}

impl SurfaceSize for HeadlessCanvas {
    fn width(&self) -> u32 {
        self.width.load(Ordering::Relaxed)
    }

    fn height(&self) -> u32 {
        self.height.load(Ordering::Relaxed)
    }
}

impl Surface for HeadlessCanvas {
    type Context = ScriptedContext;

    /// Known context kinds are provided; anything else is refused.
    fn get_context(&self, kind: &ContextKind) -> Option<ScriptedContext> {
        match kind {
            ContextKind::Other(_) => None,
            known => Some(ScriptedContext::new(known.clone(), self.width(), self.height())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize() {
        let canvas = HeadlessCanvas::default();
        assert_eq!((canvas.width(), canvas.height()), (300, 150));

        canvas.resize(1024, 768);
        assert_eq!((canvas.width(), canvas.height()), (1024, 768));
    }

    #[test]
    fn test_context_kinds() {
        let canvas = HeadlessCanvas::new(64, 64);
        let context = canvas.get_context(&ContextKind::Webgl).unwrap();
        assert_eq!(context.kind(), &ContextKind::Webgl);
        assert!(canvas.get_context(&ContextKind::Other("webgpu".into())).is_none());
    }
}
