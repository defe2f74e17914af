//! Graphics context managing shared GPU resources.
//!
//! The [`GraphicsContext`] owns the wgpu instance, adapter, device, and
//! queue used to upload baked icon textures. It is initialized once per
//! process and shared by every texture bake.

use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::error::{IconError, IconResult};

/// Global graphics context instance.
static GRAPHICS_CONTEXT: OnceLock<GraphicsContext> = OnceLock::new();

/// Configuration options for graphics context initialization.
#[derive(Debug, Clone)]
pub struct GraphicsConfig {
    /// Preferred GPU backends to use.
    pub backends: wgpu::Backends,
    /// Power preference for adapter selection.
    pub power_preference: wgpu::PowerPreference,
    /// Required device features.
    pub required_features: wgpu::Features,
    /// Required device limits.
    pub required_limits: wgpu::Limits,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::LowPower,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
        }
    }
}

/// Shared GPU resources used by the texture pipeline.
#[derive(Debug)]
pub struct GpuResources {
    /// The wgpu instance.
    pub instance: wgpu::Instance,
    /// The graphics adapter (represents a physical GPU).
    pub adapter: wgpu::Adapter,
    /// The logical device for creating GPU resources.
    pub device: wgpu::Device,
    /// The command queue for submitting GPU work.
    pub queue: wgpu::Queue,
}

impl GpuResources {
    fn new(config: &GraphicsConfig) -> IconResult<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.backends,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: config.power_preference,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(IconError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        info!(
            target: "waymark_icons::context",
            name = adapter_info.name,
            backend = ?adapter_info.backend,
            "selected graphics adapter"
        );

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("waymark-icons-device"),
                required_features: config.required_features,
                required_limits: config.required_limits.clone(),
                memory_hints: wgpu::MemoryHints::Performance,
            },
            None,
        ))?;

        debug!(
            target: "waymark_icons::context",
            "created graphics device and queue"
        );

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }
}

/// The process-wide graphics context.
///
/// Must be initialized with [`init`](Self::init) before any texture can
/// be baked.
pub struct GraphicsContext {
    resources: Arc<GpuResources>,
    config: GraphicsConfig,
}

impl GraphicsContext {
    /// Initialize the global graphics context.
    ///
    /// # Errors
    ///
    /// Returns an error if the context was already initialized, no
    /// suitable adapter was found, or device creation failed.
    pub fn init(config: GraphicsConfig) -> IconResult<&'static GraphicsContext> {
        let resources = GpuResources::new(&config)?;

        let context = GraphicsContext {
            resources: Arc::new(resources),
            config,
        };

        GRAPHICS_CONTEXT
            .set(context)
            .map_err(|_| IconError::NotInitialized)?;

        Ok(GRAPHICS_CONTEXT.get().unwrap())
    }

    /// Get the global graphics context, if initialized.
    pub fn try_get() -> Option<&'static GraphicsContext> {
        GRAPHICS_CONTEXT.get()
    }

    /// Get the global graphics context.
    ///
    /// # Panics
    ///
    /// Panics if [`init`](Self::init) has not been called.
    pub fn get() -> &'static GraphicsContext {
        GRAPHICS_CONTEXT
            .get()
            .expect("GraphicsContext not initialized. Call GraphicsContext::init() first.")
    }

    /// Get the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.resources.device
    }

    /// Get the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.resources.queue
    }

    /// Get shared access to all GPU resources.
    pub fn resources(&self) -> Arc<GpuResources> {
        Arc::clone(&self.resources)
    }

    /// Get the configuration used to create this context.
    pub fn config(&self) -> &GraphicsConfig {
        &self.config
    }

    /// Get information about the graphics adapter.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.resources.adapter.get_info()
    }
}

impl std::fmt::Debug for GraphicsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.adapter_info();
        f.debug_struct("GraphicsContext")
            .field("adapter", &info.name)
            .field("backend", &info.backend)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphics_config_default() {
        let config = GraphicsConfig::default();
        assert_eq!(config.backends, wgpu::Backends::PRIMARY);
        assert_eq!(config.power_preference, wgpu::PowerPreference::LowPower);
        assert_eq!(config.required_features, wgpu::Features::empty());
    }

    #[test]
    #[ignore = "requires GPU"]
    fn test_context_init() {
        let ctx = GraphicsContext::init(GraphicsConfig::default()).unwrap();
        assert!(!ctx.adapter_info().name.is_empty());
        assert!(GraphicsContext::try_get().is_some());
    }
}
