use log::{error, info};

use crate::adapters::gpu::errors::GpuSetupError;
use crate::adapters::gpu::escape_time_pipeline::EscapeTimePipeline;

/// Device, queue and the compiled escape-time pipeline.
///
/// Created once per controller; a failure here disables that controller for
/// the rest of the session.
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
    escape_time: EscapeTimePipeline,
    adapter_name: String,
}

impl GpuContext {
    pub fn new(label: &str) -> Result<Self, GpuSetupError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(GpuSetupError::NoAdapter)?;

        let adapter_name = adapter.get_info().name;
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some(label),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
            },
            None,
        ))?;

        let owner = label.to_owned();
        device.on_uncaptured_error(Box::new(move |err| {
            error!("{owner}: uncaptured GPU error: {err}");
        }));

        let escape_time = capture_errors(&device, || EscapeTimePipeline::new(&device))
            .map_err(|err| GpuSetupError::Pipeline(err.to_string()))?;

        info!("{label}: using GPU adapter {adapter_name}");

        Ok(Self {
            device,
            queue,
            escape_time,
            adapter_name,
        })
    }

    #[must_use]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[must_use]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    #[must_use]
    pub fn escape_time(&self) -> &EscapeTimePipeline {
        &self.escape_time
    }

    #[must_use]
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    #[must_use]
    pub fn max_texture_side(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Blocks until everything submitted so far has finished on the GPU.
    pub fn wait_idle(&self) {
        let _ = self.device.poll(wgpu::Maintain::Wait);
    }

    pub fn wait_for(&self, submission: wgpu::SubmissionIndex) {
        let _ = self
            .device
            .poll(wgpu::Maintain::WaitForSubmissionIndex(submission));
    }
}

/// Runs `create` inside validation and out-of-memory error scopes and
/// returns the first error either scope caught.
pub fn capture_errors<T>(device: &wgpu::Device, create: impl FnOnce() -> T) -> Result<T, wgpu::Error> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

    let value = create();

    let out_of_memory = pollster::block_on(device.pop_error_scope());
    let validation = pollster::block_on(device.pop_error_scope());

    match out_of_memory.or(validation) {
        Some(err) => Err(err),
        None => Ok(value),
    }
}
