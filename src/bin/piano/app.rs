//! Piano - audio device setup and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    FromSample, Sample, SizedSample,
};
use rtrb::Consumer;

use saavy_piano::{
    synth::{self, PolySynth, SynthMessage, SynthParts},
    SynthConfig,
};

use crate::ui::UiApp;

type Engine = PolySynth<Consumer<SynthMessage>>;

/// Main application builder
pub struct Piano {
    config: SynthConfig,
}

impl Piano {
    pub fn new() -> Self {
        Self {
            config: SynthConfig::default(),
        }
    }

    /// Starting octave of the lowest key
    pub fn octave(mut self, octave: i32) -> Self {
        self.config = self.config.octave(octave);
        self
    }

    /// Open the default output device, start the engine and hand the
    /// terminal to the UI until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let supported = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();
        tracing::info!(
            sample_rate = stream_config.sample_rate.0,
            channels = stream_config.channels,
            ?sample_format,
            "output device opened"
        );

        let config = self
            .config
            .sample_rate(f64::from(stream_config.sample_rate.0));
        let SynthParts {
            engine,
            controller,
            display,
        } = synth::build(&config)?;

        let stream = match sample_format {
            cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, engine),
            cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, engine),
            cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, engine),
            other => Err(eyre!("unsupported sample format {other:?}")),
        }?;
        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(controller, display, &config).run(&mut terminal);
        ratatui::restore();

        // Keep the stream alive until the UI is gone
        drop(stream);
        result
    }
}

impl Default for Piano {
    fn default() -> Self {
        Self::new()
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut engine: Engine,
) -> EyreResult<cpal::Stream>
where
    T: SizedSample + FromSample<i16>,
{
    let channels = usize::from(config.channels);
    let block_size = engine.capacity();

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _| {
            let total_frames = data.len() / channels;
            let mut frames_written = 0;

            while frames_written < total_frames {
                let frames_to_render = (total_frames - frames_written).min(block_size);
                let block = engine.render(frames_to_render);

                // Left to even channels, right to odd
                let out_off = frames_written * channels;
                for (i, frame) in block.iter().enumerate() {
                    for ch in 0..channels {
                        let sample = if ch % 2 == 0 { frame.left } else { frame.right };
                        data[out_off + i * channels + ch] = T::from_sample(sample);
                    }
                }

                frames_written += frames_to_render;
            }
        },
        |err| tracing::error!(%err, "audio stream error"),
        None,
    )?;
    Ok(stream)
}
