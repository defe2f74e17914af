//! Error types for the icon crate.

use thiserror::Error;

/// Errors that can occur while rendering or baking icons.
#[derive(Error, Debug)]
pub enum IconError {
    /// A pixel surface could not be allocated (zero-sized or out of memory).
    #[error("failed to allocate {width}x{height} pixel surface")]
    SurfaceAllocation { width: u32, height: u32 },

    /// Zero or negative dimensions were passed to a scale-fit computation.
    #[error("invalid fit dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    /// The graphics context has not been initialized.
    #[error("graphics context not initialized")]
    NotInitialized,

    /// No suitable graphics adapter was found.
    #[error("no suitable graphics adapter found")]
    NoAdapter,

    /// Failed to request a graphics device.
    #[error("failed to request graphics device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),

    /// A vector asset could not be read or parsed.
    #[error("failed to load vector asset: {0}")]
    AssetLoad(String),

    /// Reading texture pixels back from the GPU failed.
    #[error("texture readback failed: {0}")]
    Readback(String),

    /// Saving pixel data to an image file failed.
    #[error("failed to save image: {0}")]
    ImageSave(String),
}

/// Result type for icon operations.
pub type IconResult<T> = Result<T, IconError>;
