use std::io::Write;

use services::{AudioBackend, SoundError};

/// Terminal stand-in for an audio device: rings the bell on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl AudioBackend for TerminalBell {
    fn preload(&self, source: &str) -> Result<(), SoundError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(())
        } else {
            Err(SoundError::Unavailable(source.to_string()))
        }
    }

    fn play(&self, source: &str) -> Result<(), SoundError> {
        tracing::trace!(%source, "bell");
        let mut err = std::io::stderr().lock();
        err.write_all(b"\x07")
            .and_then(|()| err.flush())
            .map_err(|e| SoundError::Backend(e.to_string()))
    }
}
