//! Conversion from a mono sample buffer to interleaved device frames.

use crate::synth::SampleBuffer;

/// Convert `buffer` to interleaved f32 at `device_rate` with `channels` copies of each frame.
pub fn to_device_frames(buffer: &SampleBuffer, device_rate: u32, channels: u16) -> Vec<f32> {
    let mono = buffer.to_f32();
    let resampled = if buffer.sample_rate() == device_rate || buffer.sample_rate() == 0 {
        mono
    } else {
        resample_linear(&mono, buffer.sample_rate(), device_rate)
    };

    let channels = channels.max(1) as usize;
    let mut out = Vec::with_capacity(resampled.len() * channels);
    for s in resampled {
        out.extend(std::iter::repeat(s).take(channels));
    }
    out
}

/// Linear-interpolation resampling from `source_rate` to `target_rate`.
pub fn resample_linear(input: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if input.is_empty() {
        return Vec::new();
    }
    if input.len() == 1 {
        return vec![input[0]];
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let output_len = ((input.len() as f64 / ratio).ceil()) as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_pos = i as f64 * ratio;
        let idx = src_pos as usize;
        let frac = (src_pos - idx as f64) as f32;

        let sample = if idx + 1 < input.len() {
            input[idx] * (1.0 - frac) + input[idx + 1] * frac
        } else {
            input[idx.min(input.len() - 1)]
        };
        output.push(sample);
    }

    output
}
