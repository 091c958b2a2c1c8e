//! Scoped frame acquisition.
//!
//! A [`Frame`] begins a fresh surface when created and flushes it exactly
//! once when it goes away: through [`Frame::finish`], on an early `?`
//! return, or while unwinding from a panic.

use std::ops::{Deref, DerefMut};

use inky_common::InkyResult;
use tracing::{debug, error};

use crate::backend::DisplayBackend;

/// A backend borrowed for the duration of one frame.
pub struct Frame<'a, B: DisplayBackend + ?Sized> {
    backend: &'a mut B,
    flushed: bool,
}

impl<'a, B: DisplayBackend + ?Sized> Frame<'a, B> {
    /// Reset the backend surface and start a frame.
    pub fn begin(backend: &'a mut B) -> InkyResult<Self> {
        backend.begin()?;
        debug!(backend = backend.name(), "Frame started");
        Ok(Self {
            backend,
            flushed: false,
        })
    }

    /// Flush now and report the outcome.
    pub fn finish(mut self) -> InkyResult<()> {
        self.flush_once()
    }

    fn flush_once(&mut self) -> InkyResult<()> {
        if self.flushed {
            return Ok(());
        }
        self.flushed = true;
        debug!(backend = self.backend.name(), "Flushing frame");
        self.backend.flush()
    }
}

impl<B: DisplayBackend + ?Sized> Deref for Frame<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.backend
    }
}

impl<B: DisplayBackend + ?Sized> DerefMut for Frame<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.backend
    }
}

impl<B: DisplayBackend + ?Sized> Drop for Frame<'_, B> {
    fn drop(&mut self) {
        if self.flushed {
            return;
        }
        let name = self.backend.name();
        if let Err(e) = self.flush_once() {
            error!(backend = name, error = %e, "Failed to flush frame");
        }
    }
}

/// Run `draw` inside a frame on `backend`.
///
/// The frame is flushed exactly once whatever `draw` does. A drawing error
/// takes precedence over a flush error; the latter is then only logged.
pub fn scoped<B, T, F>(backend: &mut B, draw: F) -> InkyResult<T>
where
    B: DisplayBackend + ?Sized,
    F: FnOnce(&mut B) -> InkyResult<T>,
{
    let mut frame = Frame::begin(backend)?;
    let drawn = draw(&mut *frame);
    let flushed = frame.finish();
    match drawn {
        Ok(value) => flushed.map(|_| value),
        Err(e) => {
            if let Err(flush_err) = flushed {
                error!(error = %flush_err, "Flush failed after drawing error");
            }
            Err(e)
        }
    }
}
