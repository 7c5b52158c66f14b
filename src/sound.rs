use std::{io::Cursor, path::Path, sync::Arc};

use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::{
    alert::Player,
    error::{Error, Result},
};

/// Plays one sound file through the default output device.
///
/// The file is read once up front and decoded again from memory on every
/// ring so each ring starts at the beginning.
pub struct RodioPlayer {
    stream: OutputStream,
    sink: Option<Sink>,
    sound: Arc<[u8]>,
    volume: f32,
    looping: bool,
}

impl std::fmt::Debug for RodioPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioPlayer")
            .field("sound_bytes", &self.sound.len())
            .field("volume", &self.volume)
            .field("looping", &self.looping)
            .finish_non_exhaustive()
    }
}

impl RodioPlayer {
    /// `volume` is a percentage, 0 to 100
    ///
    /// # Errors
    ///
    /// If the file can't be read, isn't a sound rodio can decode, or there is
    /// no output device.
    pub fn open(path: &Path, volume: f32, looping: bool) -> Result<Self> {
        let sound: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| Error::io(path, e))?
            .into();
        // fail now rather than on the first ring
        Decoder::new(Cursor::new(Arc::clone(&sound))).map_err(|e| Error::Audio(e.to_string()))?;
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| Error::Audio(e.to_string()))?;
        debug!("loaded alarm sound {}", path.display());
        Ok(Self {
            stream,
            sink: None,
            sound,
            volume: volume.clamp(0.0, 100.0),
            looping,
        })
    }
}

impl Player for RodioPlayer {
    fn play(&mut self) -> Result<()> {
        self.stop();
        let source = Decoder::new(Cursor::new(Arc::clone(&self.sound)))
            .map_err(|e| Error::Audio(e.to_string()))?;
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume / 100.0);
        if self.looping {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        sink.play();
        self.sink = Some(sink);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
