//! Contrast Limited Adaptive Histogram Equalization on 8-bit planes.
//!
//! The plane is split into a `tile_grid` of tiles (padded reflect-101 on the
//! right/bottom when the size is not divisible). Each tile gets a clipped
//! histogram and an equalization LUT; output pixels blend the LUTs of the
//! four nearest tile centers bilinearly.

use super::border::reflect101;
use crate::error::{Error, Result};

/// CLAHE parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClaheParams {
    /// Histogram clip limit relative to a uniform histogram; `<= 0` disables clipping.
    pub clip_limit: f32,
    /// Number of tiles along x and y.
    pub tile_grid: [u32; 2],
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: 2.0,
            tile_grid: [10, 10],
        }
    }
}

impl ClaheParams {
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.clip_limit.is_finite() {
            return Err(Error::invalid(
                "clahe.clip_limit",
                self.clip_limit,
                "must be finite",
            ));
        }
        if self.tile_grid.iter().any(|&t| t == 0) {
            return Err(Error::invalid(
                "clahe.tile_grid",
                format!("{:?}", self.tile_grid),
                "tile counts must be >= 1",
            ));
        }
        Ok(())
    }
}

const BINS: usize = 256;

fn clip_histogram(hist: &mut [u32; BINS], limit: u32) {
    let mut excess: u32 = 0;
    for h in hist.iter_mut() {
        if *h > limit {
            excess += *h - limit;
            *h = limit;
        }
    }

    let batch = excess / BINS as u32;
    let mut residual = excess - batch * BINS as u32;
    for h in hist.iter_mut() {
        *h += batch;
    }

    if residual > 0 {
        let step = (BINS as u32 / residual).max(1) as usize;
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            residual -= 1;
            i += step;
        }
    }
}

fn build_luts(
    plane: &[u8],
    width: usize,
    height: usize,
    params: &ClaheParams,
) -> (Vec<[u8; BINS]>, usize, usize) {
    let tiles_x = params.tile_grid[0] as usize;
    let tiles_y = params.tile_grid[1] as usize;
    let tile_w = width.div_ceil(tiles_x);
    let tile_h = height.div_ceil(tiles_y);
    let area = (tile_w * tile_h) as f32;

    let clip = if params.clip_limit > 0.0 {
        Some(((params.clip_limit * area / BINS as f32) as u32).max(1))
    } else {
        None
    };
    let lut_scale = 255.0 / area;

    let mut luts = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut hist = [0u32; BINS];
            for y in ty * tile_h..(ty + 1) * tile_h {
                let row = reflect101(y as i64, height) * width;
                for x in tx * tile_w..(tx + 1) * tile_w {
                    let v = plane[row + reflect101(x as i64, width)];
                    hist[v as usize] += 1;
                }
            }

            if let Some(limit) = clip {
                clip_histogram(&mut hist, limit);
            }

            let mut lut = [0u8; BINS];
            let mut sum = 0u32;
            for (dst, &h) in lut.iter_mut().zip(hist.iter()) {
                sum += h;
                *dst = (sum as f32 * lut_scale).round().min(255.0) as u8;
            }
            luts.push(lut);
        }
    }
    (luts, tile_w, tile_h)
}

/// Interpolation coordinates along one axis: `(lower tile, upper tile, weight of upper)`.
fn axis_taps(pos: usize, tile: usize, tiles: usize) -> (usize, usize, f32) {
    let f = pos as f32 / tile as f32 - 0.5;
    let lo = f.floor();
    let w = f - lo;
    let lo = lo as i64;
    let t1 = lo.max(0) as usize;
    let t2 = ((lo + 1) as usize).min(tiles - 1);
    (t1, t2, w)
}

/// Equalize a row-major 8-bit plane.
pub(crate) fn equalize_plane(
    plane: &[u8],
    width: u32,
    height: u32,
    params: &ClaheParams,
) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(plane.len(), w * h);
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let tiles_x = params.tile_grid[0] as usize;
    let tiles_y = params.tile_grid[1] as usize;
    let (luts, tile_w, tile_h) = build_luts(plane, w, h, params);

    let x_taps: Vec<_> = (0..w).map(|x| axis_taps(x, tile_w, tiles_x)).collect();

    let mut out = vec![0u8; w * h];
    for y in 0..h {
        let (ty1, ty2, ya) = axis_taps(y, tile_h, tiles_y);
        let row_top = ty1 * tiles_x;
        let row_bot = ty2 * tiles_x;
        for x in 0..w {
            let (tx1, tx2, xa) = x_taps[x];
            let v = plane[y * w + x] as usize;
            let top =
                luts[row_top + tx1][v] as f32 * (1.0 - xa) + luts[row_top + tx2][v] as f32 * xa;
            let bot =
                luts[row_bot + tx1][v] as f32 * (1.0 - xa) + luts[row_bot + tx2][v] as f32 * xa;
            out[y * w + x] = (top * (1.0 - ya) + bot * ya).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spread(v: &[u8]) -> u8 {
        v.iter().max().unwrap() - v.iter().min().unwrap()
    }

    #[test]
    fn constant_plane_stays_constant() {
        let plane = vec![90u8; 64 * 48];
        let out = equalize_plane(&plane, 64, 48, &ClaheParams::default());
        assert!(out.iter().all(|&v| v == out[0]));
    }

    #[test]
    fn single_tile_without_clip_is_global_equalization() {
        // Left half 50, right half 200.
        let (w, h) = (4u32, 2u32);
        let plane: Vec<u8> = (0..h)
            .flat_map(|_| (0..w).map(|x| if x < 2 { 50 } else { 200 }))
            .collect();
        let params = ClaheParams {
            clip_limit: 0.0,
            tile_grid: [1, 1],
        };
        let out = equalize_plane(&plane, w, h, &params);
        assert_eq!(out, vec![128, 128, 255, 255, 128, 128, 255, 255]);
    }

    #[test]
    fn low_contrast_ramp_gets_wider() {
        let (w, h) = (200u32, 200u32);
        let plane: Vec<u8> = (0..h)
            .flat_map(|_| (0..w).map(|x| 100 + (x * 40 / (w - 1)) as u8))
            .collect();
        let out = equalize_plane(&plane, w, h, &ClaheParams::default());
        assert!(spread(&out) > spread(&plane));
    }

    #[test]
    fn non_divisible_sizes_are_handled() {
        let plane: Vec<u8> = (0..37 * 23).map(|i| (i % 251) as u8).collect();
        let out = equalize_plane(&plane, 37, 23, &ClaheParams::default());
        assert_eq!(out.len(), plane.len());
    }

    #[test]
    fn clip_redistributes_all_excess() {
        let mut hist = [0u32; BINS];
        hist[10] = 1000;
        clip_histogram(&mut hist, 4);
        assert_eq!(hist.iter().sum::<u32>(), 1000);
        assert!(hist[10] <= 4 + 4);
    }

    #[test]
    fn zero_tile_grid_is_rejected() {
        let params = ClaheParams {
            clip_limit: 2.0,
            tile_grid: [0, 8],
        };
        assert!(params.validate().is_err());
    }
}
