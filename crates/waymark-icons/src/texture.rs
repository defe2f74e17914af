//! Baking rendered icons into GPU textures.
//!
//! [`render_to_texture`] materializes a renderer's output as a GPU texture:
//! it allocates a transparent canvas, lets the renderer paint the full
//! region, builds a mip chain on the CPU, and uploads every level. The
//! returned [`IconTexture`] is a snapshot that later bakes never mutate,
//! and it outlives the canvas that produced it, which is dropped before
//! this function returns.

use std::path::Path;

use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::context::GraphicsContext;
use crate::error::{IconError, IconResult};
use crate::registry::IconRegistry;
use crate::types::{Color, Rect};

/// Bytes per pixel for RGBA8 format.
const BYTES_PER_PIXEL: u32 = 4;

/// A baked icon texture: GPU handle plus dimensions.
///
/// Owned by the caller; dropping it releases the GPU memory.
pub struct IconTexture {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl IconTexture {
    /// Get the underlying texture handle.
    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    /// Get the full-texture view.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Texture dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Read the base mip level back from the GPU.
    ///
    /// Returns straight RGBA pixel data in row-major order. Synchronous;
    /// blocks until the GPU finishes the transfer.
    pub fn read_pixels(&self) -> IconResult<Vec<u8>> {
        read_texture_pixels(&self.texture, self.width, self.height)
    }

    /// Save the base mip level to an image file.
    ///
    /// The format is determined by the file extension.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> IconResult<()> {
        let path = path.as_ref();
        let pixels = self.read_pixels()?;

        let image_buffer: image::ImageBuffer<image::Rgba<u8>, _> =
            image::ImageBuffer::from_raw(self.width, self.height, pixels).ok_or(
                IconError::SurfaceAllocation {
                    width: self.width,
                    height: self.height,
                },
            )?;

        image_buffer
            .save(path)
            .map_err(|e| IconError::ImageSave(e.to_string()))?;

        debug!(
            target: "waymark_icons::texture",
            path = %path.display(),
            "saved texture to file"
        );

        Ok(())
    }
}

impl std::fmt::Debug for IconTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconTexture")
            .field("size", &(self.width, self.height))
            .finish()
    }
}

/// Number of mip levels for a full chain down to 1x1.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).leading_zeros()
}

/// Render an icon into a new GPU texture with a full mip chain.
///
/// The renderer receives a transparent canvas covering `(0, 0, width,
/// height)` and the tint color; unpainted pixels stay transparent. The
/// canvas lives only for the duration of this call and is released even
/// when the renderer fails.
///
/// # Errors
///
/// Returns [`IconError::NotInitialized`] if the graphics context is not
/// up, [`IconError::SurfaceAllocation`] for zero dimensions, and whatever
/// the renderer itself reports.
pub fn render_to_texture<F>(
    width: u32,
    height: u32,
    tint: Color,
    renderer: F,
) -> IconResult<IconTexture>
where
    F: FnOnce(&mut Canvas, Rect, Color) -> IconResult<()>,
{
    let ctx = GraphicsContext::try_get().ok_or(IconError::NotInitialized)?;

    let mut canvas = Canvas::new(width, height)?;
    renderer(
        &mut canvas,
        Rect::new(0.0, 0.0, width as f32, height as f32),
        tint,
    )?;

    let premultiplied = canvas.data().to_vec();
    drop(canvas);

    let mip_count = mip_level_count(width, height);
    let texture = ctx.device().create_texture(&wgpu::TextureDescriptor {
        label: Some("icon_texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: mip_count,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });

    let mut level_data = premultiplied;
    let (mut level_width, mut level_height) = (width, height);
    for level in 0..mip_count {
        let rgba = unpremultiply(&level_data);
        ctx.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: level,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(BYTES_PER_PIXEL * level_width),
                rows_per_image: Some(level_height),
            },
            wgpu::Extent3d {
                width: level_width,
                height: level_height,
                depth_or_array_layers: 1,
            },
        );

        if level + 1 < mip_count {
            (level_data, level_width, level_height) =
                downsample(&level_data, level_width, level_height);
        }
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    info!(
        target: "waymark_icons::texture",
        width,
        height,
        mip_count,
        "baked icon texture"
    );

    Ok(IconTexture {
        texture,
        view,
        width,
        height,
    })
}

/// Bake a named icon from a registry into a texture.
pub fn render_icon_to_texture(
    registry: &IconRegistry,
    name: &str,
    width: u32,
    height: u32,
    tint: Color,
) -> IconResult<IconTexture> {
    render_to_texture(width, height, tint, |canvas, rect, color| {
        registry.draw(canvas, name, rect, color)
    })
}

/// Convert premultiplied RGBA8 to straight RGBA8.
fn unpremultiply(premultiplied: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(premultiplied.len());
    for chunk in premultiplied.chunks(4) {
        let a = chunk[3] as f32 / 255.0;
        if a > 0.0 {
            result.push((chunk[0] as f32 / a).min(255.0) as u8);
            result.push((chunk[1] as f32 / a).min(255.0) as u8);
            result.push((chunk[2] as f32 / a).min(255.0) as u8);
            result.push(chunk[3]);
        } else {
            result.extend_from_slice(&[0, 0, 0, 0]);
        }
    }
    result
}

/// Halve a premultiplied RGBA8 image with a 2x2 box filter.
///
/// Odd dimensions clamp the second sample to the last row/column.
fn downsample(premultiplied: &[u8], width: u32, height: u32) -> (Vec<u8>, u32, u32) {
    let out_width = (width / 2).max(1);
    let out_height = (height / 2).max(1);

    let mut out = Vec::with_capacity((out_width * out_height * BYTES_PER_PIXEL) as usize);
    for oy in 0..out_height {
        for ox in 0..out_width {
            let x0 = (ox * 2).min(width - 1);
            let x1 = (ox * 2 + 1).min(width - 1);
            let y0 = (oy * 2).min(height - 1);
            let y1 = (oy * 2 + 1).min(height - 1);

            for c in 0..4usize {
                let sum = premultiplied[((y0 * width + x0) * 4) as usize + c] as u32
                    + premultiplied[((y0 * width + x1) * 4) as usize + c] as u32
                    + premultiplied[((y1 * width + x0) * 4) as usize + c] as u32
                    + premultiplied[((y1 * width + x1) * 4) as usize + c] as u32;
                out.push(((sum + 2) / 4) as u8);
            }
        }
    }

    (out, out_width, out_height)
}

/// Helper for calculating readback buffer dimensions with row alignment.
///
/// WebGPU requires `bytes_per_row` to be a multiple of 256 bytes for
/// texture-to-buffer copies.
#[derive(Debug, Clone, Copy)]
struct BufferDimensions {
    height: u32,
    unpadded_bytes_per_row: u32,
    padded_bytes_per_row: u32,
}

impl BufferDimensions {
    fn new(width: u32, height: u32) -> Self {
        let unpadded_bytes_per_row = width * BYTES_PER_PIXEL;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        Self {
            height,
            unpadded_bytes_per_row,
            padded_bytes_per_row,
        }
    }

    fn buffer_size(&self) -> u64 {
        (self.padded_bytes_per_row * self.height) as u64
    }
}

/// Read pixel data back from a texture's base mip level.
fn read_texture_pixels(texture: &wgpu::Texture, width: u32, height: u32) -> IconResult<Vec<u8>> {
    let ctx = GraphicsContext::try_get().ok_or(IconError::NotInitialized)?;
    let device = ctx.device();
    let queue = ctx.queue();

    let dims = BufferDimensions::new(width, height);

    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("icon_texture_readback"),
        size: dims.buffer_size(),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("icon_texture_readback_encoder"),
    });

    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(dims.padded_bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );

    queue.submit(std::iter::once(encoder.finish()));

    let buffer_slice = output_buffer.slice(..);
    let (sender, receiver) = std::sync::mpsc::channel();
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = sender.send(result);
    });

    device.poll(wgpu::Maintain::Wait);
    receiver
        .recv()
        .map_err(|_| IconError::Readback("map callback dropped".into()))?
        .map_err(|e| IconError::Readback(e.to_string()))?;

    let data = buffer_slice.get_mapped_range();
    let mut pixels = Vec::with_capacity((width * height * BYTES_PER_PIXEL) as usize);
    for row in 0..height {
        let start = (row * dims.padded_bytes_per_row) as usize;
        let end = start + dims.unpadded_bytes_per_row as usize;
        pixels.extend_from_slice(&data[start..end]);
    }

    drop(data);
    output_buffer.unmap();

    Ok(pixels)
}
