use std::io::{self, Read};
use std::sync::{Mutex, PoisonError};

use crate::impls::reflect_methods;
use crate::{Reflect, ReflectScalar, Shape, ShapeFlags, Typed};

/// A readable byte source, such as a request body.
///
/// A reader cannot be duplicated, so a `Stream` is a leaf that refuses
/// assignment, and its shape carries [`ShapeFlags::STREAM`]: a copy that
/// reaches it through an `Arc<Stream>` or `Rc<Stream>` shares the pointer.
///
/// Reads go through an internal lock so that a shared `Stream` can be read
/// from any of its owners.
pub struct Stream {
    reader: Mutex<Box<dyn Read + Send>>,
}

impl Stream {
    /// Wrap a reader.
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: Mutex::new(Box::new(reader)),
        }
    }

    /// A stream over an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(io::Cursor::new(bytes.into()))
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::new(io::empty())
    }
}

impl core::fmt::Debug for Stream {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

impl Read for &Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read(buf)
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut shared: &Stream = self;
        shared.read(buf)
    }
}

impl Reflect for Stream {
    reflect_methods!(Scalar);
}

impl Typed for Stream {
    const SHAPE: &'static Shape =
        &const { Shape::scalar("Stream").with_flags(ShapeFlags::STREAM) };
}

impl ReflectScalar for Stream {
    fn assign_from(&mut self, _src: &dyn Reflect) -> bool {
        false
    }
}
