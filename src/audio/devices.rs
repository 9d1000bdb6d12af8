//! Picks the output device the notes are played on.

use anyhow::{Context, Result};
use cpal::{
    traits::{DeviceTrait, HostTrait},
    Device, SupportedStreamConfig,
};
use tracing::info;

use crate::misc::Similarity;

/// The output device and the config its stream will be opened with.
pub struct OutputDevice {
    pub device: Device,
    pub config: SupportedStreamConfig,
}

/// Finds an output device by name.
/// `default` asks the host for its default device, anything else picks the device
/// whose name is most similar (dice coefficient) to the one given.
pub fn get_output_device(wanted: &str) -> Result<OutputDevice> {
    let host = cpal::default_host();
    let wanted = wanted.to_lowercase();

    let device = match wanted.as_str() {
        "default" => host
            .default_output_device()
            .context("No default output device")?,
        _ => {
            let comp_name = |dev: &Device| {
                dev.name()
                    .map(|x| x.to_lowercase().similarity(&wanted))
                    .unwrap_or(0.0)
            };

            host.output_devices()
                .context("Could not list output devices")?
                .map(|x| (comp_name(&x), x))
                .reduce(|a, b| if a.0 >= b.0 { a } else { b })
                .context("No output device found")?
                .1
        }
    };

    let config = device
        .default_output_config()
        .context("No default output config")?;

    info!(
        device = %device.name().unwrap_or_else(|_| "unknown".to_owned()),
        sample_rate = config.sample_rate().0,
        channels = config.channels(),
        "Output hooked into device"
    );

    Ok(OutputDevice { device, config })
}
