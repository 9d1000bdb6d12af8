//! A cpal output stream that plays whatever is handed to its mixer.
//! Opening a [`Speaker`] acquires the device, dropping it releases the device.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use anyhow::{bail, Context, Result};
use cpal::{
    traits::{DeviceTrait, StreamTrait},
    Device, FromSample, SampleFormat, SizedSample, Stream, StreamConfig,
};
use parking_lot::Mutex;
use tracing::{debug, error};

use super::{devices::get_output_device, mixer::Mixer};
use crate::{error::Error, synth::Output};

/// Longest time a speaker waits for queued tones to finish when released.
const DRAIN_LIMIT: Duration = Duration::from_secs(1);
const DRAIN_POLL: Duration = Duration::from_millis(5);

pub struct Speaker {
    mixer: Arc<Mutex<Mixer>>,
    failed: Arc<AtomicBool>,
    sample_rate: u32,
    stream: Stream,
}

impl Speaker {
    pub fn open(device: &str) -> Result<Self> {
        let output = get_output_device(device)?;
        let sample_format = output.config.sample_format();
        let sample_rate = output.config.sample_rate().0;
        let mixer = Arc::new(Mutex::new(Mixer::new(output.config.channels())));
        let failed = Arc::new(AtomicBool::new(false));

        let config: StreamConfig = output.config.into();
        let device = &output.device;
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(device, &config, &mixer, &failed),
            SampleFormat::F64 => build_stream::<f64>(device, &config, &mixer, &failed),
            SampleFormat::I8 => build_stream::<i8>(device, &config, &mixer, &failed),
            SampleFormat::I16 => build_stream::<i16>(device, &config, &mixer, &failed),
            SampleFormat::I32 => build_stream::<i32>(device, &config, &mixer, &failed),
            SampleFormat::I64 => build_stream::<i64>(device, &config, &mixer, &failed),
            SampleFormat::U8 => build_stream::<u8>(device, &config, &mixer, &failed),
            SampleFormat::U16 => build_stream::<u16>(device, &config, &mixer, &failed),
            SampleFormat::U32 => build_stream::<u32>(device, &config, &mixer, &failed),
            SampleFormat::U64 => build_stream::<u64>(device, &config, &mixer, &failed),
            format => bail!("Unsupported sample format {format:?}"),
        }?;
        stream.play().context("Could not start output stream")?;
        debug!(?sample_format, "Output stream started");

        Ok(Self {
            mixer,
            failed,
            sample_rate,
            stream,
        })
    }
}

/// Opens a stream in the device's own sample type, converting the mixer's `f32` output.
fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    mixer: &Arc<Mutex<Mixer>>,
    failed: &Arc<AtomicBool>,
) -> Result<Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let mixer = mixer.clone();
    let failed = failed.clone();
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _info: &cpal::OutputCallbackInfo| {
                mixer.lock().output(data);
            },
            move |err| {
                error!("Output stream error: {err}");
                failed.store(true, Ordering::Release);
            },
            None,
        )
        .context("Could not build output stream")
}

impl Output for Speaker {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn queue(&mut self, samples: Vec<f32>) -> crate::error::Result<()> {
        if self.failed.load(Ordering::Acquire) {
            return Err(Error::Synthesis("output stream has failed".to_owned()));
        }

        self.mixer.lock().add(samples);
        Ok(())
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        let start = Instant::now();
        while !self.failed.load(Ordering::Acquire)
            && !self.mixer.lock().is_idle()
            && start.elapsed() < DRAIN_LIMIT
        {
            thread::sleep(DRAIN_POLL);
        }

        if let Err(e) = self.stream.pause() {
            debug!("Could not pause output stream: {e}");
        }
    }
}
