/// Precompute a normalized 1D Gaussian kernel.
///
/// `kernel_size` must be odd and >= 1. Unlike the sigma-from-size convention,
/// `sigma` is supplied by the caller so a fixed spread can be combined with a
/// varying support.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f64) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let half = (kernel_size / 2) as f64;
    let mut kernel_f64: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = kernel_f64.iter().sum();
    for v in &mut kernel_f64 {
        *v /= sum;
    }
    kernel_f64.iter().map(|&v| v as f32).collect()
}

/// Maps an out-of-range coordinate back inside `[0, len)` by mirroring
/// without repeating the edge sample (`dcb|abcd|cba`).
pub fn reflect_101(pos: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    let mut p = pos;
    while p < 0 || p >= len {
        p = if p < 0 { -p } else { 2 * len - p - 2 };
    }
    p as usize
}

/// Separable Gaussian blur from `src` into `dst`, reusing `temp`.
///
/// `src` is left untouched; `dst` is resized to match it.
pub fn separable_gaussian_blur(
    src: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
    dst: &mut Vec<u8>,
) {
    let needed = width * height * channels;
    dst.clear();
    dst.resize(needed, 0);
    if needed == 0 {
        return;
    }
    if kernel.len() <= 1 {
        dst.copy_from_slice(src);
        return;
    }
    let half = (kernel.len() / 2) as isize;
    temp.resize(needed, 0.0);

    let col_taps = tap_table(width, kernel.len(), half);
    let row_taps = tap_table(height, kernel.len(), half);

    // Horizontal pass: src → temp
    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let taps = &col_taps[x * kernel.len()..(x + 1) * kernel.len()];
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (&sx, &w) in taps.iter().zip(kernel) {
                    sum += src[(row + sx) * channels + c] as f32 * w;
                }
                temp[(row + x) * channels + c] = sum;
            }
        }
    }

    // Vertical pass: temp → dst
    for y in 0..height {
        let taps = &row_taps[y * kernel.len()..(y + 1) * kernel.len()];
        for x in 0..width {
            for c in 0..channels {
                let mut sum = 0.0f32;
                for (&sy, &w) in taps.iter().zip(kernel) {
                    sum += temp[(sy * width + x) * channels + c] * w;
                }
                dst[(y * width + x) * channels + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Source index for every (output position, kernel tap) pair along one axis.
fn tap_table(len: usize, kernel_len: usize, half: isize) -> Vec<usize> {
    let mut table = Vec::with_capacity(len * kernel_len);
    for pos in 0..len as isize {
        for k in 0..kernel_len as isize {
            table.push(reflect_101(pos + k - half, len));
        }
    }
    table
}
