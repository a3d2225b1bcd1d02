//! WAV container — mono 16-bit PCM export and import via hound.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use tracing::info;

use crate::synth::SampleBuffer;

/// Channel count of every file this module writes.
pub const CHANNELS: u16 = 1;
/// Bits per sample of every file this module writes.
pub const BITS_PER_SAMPLE: u16 = 16;

/// Errors that can occur when writing or reading a WAV file.
#[derive(Debug)]
pub enum WavError {
    /// Filesystem failure: missing directory, permission denied, disk full.
    Io(io::Error),
    /// Malformed container or encoder failure.
    Format(hound::Error),
    /// The file decodes but is not mono 16-bit integer PCM.
    UnsupportedFormat(String),
}

impl std::fmt::Display for WavError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WavError::Io(e) => write!(f, "I/O error: {e}"),
            WavError::Format(e) => write!(f, "WAV error: {e}"),
            WavError::UnsupportedFormat(s) => write!(f, "unsupported format: {s}"),
        }
    }
}

impl std::error::Error for WavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WavError::Io(e) => Some(e),
            WavError::Format(e) => Some(e),
            WavError::UnsupportedFormat(_) => None,
        }
    }
}

impl From<io::Error> for WavError {
    fn from(e: io::Error) -> Self {
        WavError::Io(e)
    }
}

impl From<hound::Error> for WavError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => WavError::Io(io),
            other => WavError::Format(other),
        }
    }
}

impl WavError {
    /// Whether this is a filesystem failure rather than a format problem.
    pub fn is_io(&self) -> bool {
        matches!(self, WavError::Io(_))
    }
}

/// The header every exported file carries.
pub fn spec_for(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Encode `buffer` into any seekable writer.
pub fn write_wav_to<W: Write + Seek>(writer: W, buffer: &SampleBuffer) -> Result<(), WavError> {
    let mut wav = hound::WavWriter::new(writer, spec_for(buffer.sample_rate()))?;
    for &s in buffer.samples() {
        wav.write_sample(s)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Write `buffer` to `path`, replacing any existing file.
pub fn write_wav(path: &Path, buffer: &SampleBuffer) -> Result<(), WavError> {
    let file = File::create(path)?;
    write_wav_to(BufWriter::new(file), buffer)?;
    info!(
        path = %path.display(),
        frames = buffer.len(),
        sample_rate = buffer.sample_rate(),
        "wrote wav"
    );
    Ok(())
}

/// Decode a mono 16-bit WAV from any seekable reader.
pub fn read_wav_from<R: Read + Seek>(reader: R) -> Result<SampleBuffer, WavError> {
    let wav = hound::WavReader::new(reader)?;
    let spec = wav.spec();

    if spec.channels != CHANNELS {
        return Err(WavError::UnsupportedFormat(format!(
            "{} channels, expected {CHANNELS}",
            spec.channels
        )));
    }
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE
    {
        return Err(WavError::UnsupportedFormat(format!(
            "{}-bit {:?}, expected 16-bit Int",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = wav
        .into_samples::<i16>()
        .collect::<Result<Vec<i16>, _>>()?;
    Ok(SampleBuffer::from_samples(samples, spec.sample_rate))
}

/// Read a mono 16-bit WAV file from `path`.
pub fn read_wav(path: &Path) -> Result<SampleBuffer, WavError> {
    let file = File::open(path)?;
    read_wav_from(BufReader::new(file))
}
