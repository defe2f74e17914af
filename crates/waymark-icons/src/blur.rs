//! In-place Gaussian blur over premultiplied RGBA8 pixel data.
//!
//! Separable implementation: one horizontal and one vertical pass through a
//! scratch buffer, with clamp-to-edge sampling. Operating on premultiplied
//! data keeps transparent regions from bleeding darkness into the result.

/// Build a normalized Gaussian kernel for the given radius.
///
/// Returns a single-entry identity kernel when the radius rounds to zero.
fn gaussian_kernel(radius: f32) -> Vec<f32> {
    let r = radius.ceil() as i32;
    if r <= 0 {
        return vec![1.0];
    }

    let sigma = (radius * 0.5).max(0.5) as f64;
    let denom = 2.0 * sigma * sigma;

    let mut weights = Vec::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights.push(w);
        sum += w;
    }

    weights.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Blur premultiplied RGBA8 pixel data in place.
///
/// `data` must hold `width * height * 4` bytes in row-major order. A radius
/// of zero (or less) leaves the data untouched.
pub fn gaussian_blur(data: &mut [u8], width: u32, height: u32, radius: f32) {
    debug_assert_eq!(data.len(), (width * height * 4) as usize);

    let kernel = gaussian_kernel(radius);
    if kernel.len() == 1 {
        return;
    }

    let mut scratch = vec![0u8; data.len()];
    horizontal_pass(data, &mut scratch, width, height, &kernel);
    vertical_pass(&scratch, data, width, height, &kernel);
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[f32]) {
    let radius = (kernel.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (ki, &kw) in kernel.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) * 4) as usize;
                for c in 0..4 {
                    acc[c] += kw * src[idx + c] as f32;
                }
            }
            let out = ((y * w + x) * 4) as usize;
            for c in 0..4 {
                dst[out + c] = (acc[c] + 0.5) as u8;
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, kernel: &[f32]) {
    let radius = (kernel.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 4];
            for (ki, &kw) in kernel.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) * 4) as usize;
                for c in 0..4 {
                    acc[c] += kw * src[idx + c] as f32;
                }
            }
            let out = ((y * w + x) * 4) as usize;
            for c in 0..4 {
                dst[out + c] = (acc[c] + 0.5) as u8;
            }
        }
    }
}
