use crate::foundation::core::Grid;
use crate::kernel::annulus::Kernel;

/// Convolve `src` with `kernel`, treating every cell outside the grid as zero.
///
/// Output has the same shape as `src`. Kernels produced by [`crate::generate_kernel`] are
/// point-symmetric, so convolution and correlation agree.
pub fn convolve_zero_padded(src: &Grid<f64>, kernel: &Kernel) -> Grid<f64> {
    let w = src.width() as isize;
    let h = src.height() as isize;
    let data = src.data();
    let mut out = Grid::filled(src.width(), src.height(), 0.0);
    let out_data = out.data_mut();

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0f64;
            for tap in kernel.taps() {
                let sx = x - tap.dx;
                let sy = y - tap.dy;
                if sx < 0 || sy < 0 || sx >= w || sy >= h {
                    continue;
                }
                let v = data[(sy * w + sx) as usize];
                if v != 0.0 {
                    acc += v * tap.weight;
                }
            }
            out_data[(y * w + x) as usize] = acc;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/convolve.rs"]
mod tests;
