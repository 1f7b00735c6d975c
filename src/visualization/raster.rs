//! Raster plot export for an evaluated scenario
//!
//! Renders the three fixed outputs — quiver plot of the field, contour plot
//! of the potential, and the combined figure — straight into RGB image
//! buffers and saves them as PNG. The renderers consume the evaluator's
//! output maps only; non-finite samples (grid points on top of a charge)
//! are skipped while drawing, never treated as errors.

use anyhow::Result;
use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::field::grid::SampleGrid;
use crate::field::scenario::Scenario;
use crate::field::states::{ChargeSystem, FieldMaps};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FRAME: Rgb<u8> = Rgb([70, 70, 70]);
const GRID_LINE: Rgb<u8> = Rgb([220, 220, 220]);
const ARROW_BLUE: Rgb<u8> = Rgb([30, 70, 200]);
const CHARGE_POSITIVE: Rgb<u8> = Rgb([200, 40, 40]);
const CHARGE_NEGATIVE: Rgb<u8> = Rgb([40, 70, 200]);

/// Number of grid divisions drawn as light background lines
const GRID_DIVISIONS: u32 = 10;

/// World -> pixel mapping for one plot
/// y is flipped so larger world y is higher up in the image
struct PlotArea {
    width: u32,
    height: u32,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl PlotArea {
    fn from_grid(grid: &SampleGrid, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            x_min: grid.x_min(),
            x_max: grid.x_max(),
            y_min: grid.y_min(),
            y_max: grid.y_max(),
        }
    }

    fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        let px = (x - self.x_min) / (self.x_max - self.x_min) * (self.width - 1) as f64;
        let py = (1.0 - (y - self.y_min) / (self.y_max - self.y_min)) * (self.height - 1) as f64;
        (px as f32, py as f32)
    }
}

// =========================================================================================
// Pixel-level drawing helpers
// =========================================================================================

fn draw_line(img: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return;
    }
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
    let n = steps as i32;
    for s in 0..=n {
        let t = s as f32 / steps;
        let x = (x0 + t * dx).round() as i64;
        let y = (y0 + t * dy).round() as i64;
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Line with a two-stroke head at the tip
fn draw_arrow(img: &mut RgbImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgb<u8>) {
    draw_line(img, x0, y0, x1, y1, color);

    let angle = (y1 - y0).atan2(x1 - x0);
    let head = ((x1 - x0).hypot(y1 - y0) * 0.35).clamp(2.0, 6.0);
    // ~150° off the shaft on both sides
    for da in [2.6_f32, -2.6_f32] {
        let hx = x1 + head * (angle + da).cos();
        let hy = y1 + head * (angle + da).sin();
        draw_line(img, x1, y1, hx, hy, color);
    }
}

fn fill_circle(img: &mut RgbImage, cx: f32, cy: f32, radius: f32, color: Rgb<u8>) {
    let r2 = radius * radius;
    let x_lo = (cx - radius).floor() as i64;
    let x_hi = (cx + radius).ceil() as i64;
    let y_lo = (cy - radius).floor() as i64;
    let y_hi = (cy + radius).ceil() as i64;
    for y in y_lo..=y_hi {
        for x in x_lo..=x_hi {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r2
                && x >= 0
                && y >= 0
                && (x as u32) < img.width()
                && (y as u32) < img.height()
            {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Viridis-style colormap sampled from an anchor table, t in [0, 1]
fn viridis_color(t: f64) -> Rgb<u8> {
    const ANCHORS: [[f64; 3]; 9] = [
        [68.0, 1.0, 84.0],
        [70.0, 50.0, 126.0],
        [54.0, 92.0, 141.0],
        [39.0, 127.0, 142.0],
        [33.0, 145.0, 140.0],
        [31.0, 161.0, 135.0],
        [74.0, 193.0, 109.0],
        [160.0, 218.0, 57.0],
        [253.0, 231.0, 37.0],
    ];
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let s = t * (ANCHORS.len() - 1) as f64;
    let i = (s.floor() as usize).min(ANCHORS.len() - 2);
    let f = s - i as f64;
    let lerp = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    Rgb([
        lerp(ANCHORS[i][0], ANCHORS[i + 1][0]),
        lerp(ANCHORS[i][1], ANCHORS[i + 1][1]),
        lerp(ANCHORS[i][2], ANCHORS[i + 1][2]),
    ])
}

// =========================================================================================
// Plot furniture: background grid, frame, charge markers
// =========================================================================================

fn draw_plot_frame(img: &mut RgbImage, area: &PlotArea) {
    // Light background grid, like plt.grid()
    for d in 1..GRID_DIVISIONS {
        let x = area.x_min + (area.x_max - area.x_min) * d as f64 / GRID_DIVISIONS as f64;
        let y = area.y_min + (area.y_max - area.y_min) * d as f64 / GRID_DIVISIONS as f64;
        let (px, _) = area.to_pixel(x, area.y_min);
        let (_, py) = area.to_pixel(area.x_min, y);
        draw_line(img, px, 0.0, px, (area.height - 1) as f32, GRID_LINE);
        draw_line(img, 0.0, py, (area.width - 1) as f32, py, GRID_LINE);
    }

    // Axis frame
    let w = (area.width - 1) as f32;
    let h = (area.height - 1) as f32;
    draw_line(img, 0.0, 0.0, w, 0.0, FRAME);
    draw_line(img, 0.0, h, w, h, FRAME);
    draw_line(img, 0.0, 0.0, 0.0, h, FRAME);
    draw_line(img, w, 0.0, w, h, FRAME);
}

fn draw_charges(img: &mut RgbImage, area: &PlotArea, sys: &ChargeSystem) {
    let radius = (0.012 * area.width.min(area.height) as f32).max(4.0);
    for c in &sys.charges {
        let (px, py) = area.to_pixel(c.x.x, c.x.y);
        let color = if c.q >= 0.0 { CHARGE_POSITIVE } else { CHARGE_NEGATIVE };
        fill_circle(img, px, py, radius, color);
    }
}

// =========================================================================================
// Quiver
// =========================================================================================

/// Draw one fixed-length direction arrow per strided grid point
/// Arrows with non-finite components are skipped silently
fn draw_field_arrows<F>(
    img: &mut RgbImage,
    area: &PlotArea,
    grid: &SampleGrid,
    maps: &FieldMaps,
    stride: usize,
    mut color_at: F,
) where
    F: FnMut(usize, usize) -> Rgb<u8>,
{
    let (ny, nx) = grid.shape();
    let stride = stride.max(1);

    // Arrow span: a bit under the strided cell size, in pixels
    let step_x = area.width as f32 / nx as f32;
    let step_y = area.height as f32 / ny as f32;
    let half_len = 0.42 * stride as f32 * step_x.max(step_y);

    for j in (0..ny).step_by(stride) {
        for i in (0..nx).step_by(stride) {
            let ex = maps.ex[[j, i]];
            let ey = maps.ey[[j, i]];
            if !ex.is_finite() || !ey.is_finite() {
                continue;
            }
            let mag = ex.hypot(ey);
            if mag == 0.0 {
                continue;
            }

            // Unit direction; the magnitude near the charges would dwarf
            // every other arrow, so length stays fixed
            let ux = (ex / mag) as f32;
            // World y up -> pixel y down
            let uy = -(ey / mag) as f32;

            let (cx, cy) = area.to_pixel(grid.x[i], grid.y[j]);
            draw_arrow(
                img,
                cx - ux * half_len,
                cy - uy * half_len,
                cx + ux * half_len,
                cy + uy * half_len,
                color_at(j, i),
            );
        }
    }
}

// =========================================================================================
// Contours
// =========================================================================================

/// Evenly spaced levels over the percentile-clipped finite range of `v`
/// Raw min/max would sit inside the charge cores and push every level there
fn contour_level_values(v: &Array2<f64>, count: usize) -> Vec<f64> {
    let mut finite: Vec<f64> = v.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() || count == 0 {
        return Vec::new();
    }
    finite.sort_by(|a, b| a.total_cmp(b));

    let lo_idx = (finite.len() as f64 * 0.02) as usize;
    let hi_idx = ((finite.len() as f64 * 0.98) as usize).min(finite.len() - 1);
    let lo = finite[lo_idx];
    let hi = finite[hi_idx];

    (0..count)
        .map(|i| lo + (hi - lo) * (i as f64 + 0.5) / count as f64)
        .collect()
}

/// Marching-squares pass: one short segment per level crossing per grid cell
/// Cells touching a non-finite sample draw nothing
fn draw_contours(
    img: &mut RgbImage,
    area: &PlotArea,
    grid: &SampleGrid,
    v: &Array2<f64>,
    levels: &[f64],
) {
    let (ny, nx) = v.dim();
    if levels.is_empty() {
        return;
    }
    let denom = (levels.len().max(2) - 1) as f64;

    for (li, &level) in levels.iter().enumerate() {
        let color = viridis_color(li as f64 / denom);
        for j in 0..ny - 1 {
            for i in 0..nx - 1 {
                // Cell corners, counterclockwise
                let corners = [
                    (grid.x[i], grid.y[j], v[[j, i]]),
                    (grid.x[i + 1], grid.y[j], v[[j, i + 1]]),
                    (grid.x[i + 1], grid.y[j + 1], v[[j + 1, i + 1]]),
                    (grid.x[i], grid.y[j + 1], v[[j + 1, i]]),
                ];
                if corners.iter().any(|c| !c.2.is_finite()) {
                    continue;
                }

                // Interpolated level crossings along the four edges
                let mut crossings: Vec<(f64, f64)> = Vec::new();
                for e in 0..4 {
                    let (xa, ya, va) = corners[e];
                    let (xb, yb, vb) = corners[(e + 1) % 4];
                    if (va - level) * (vb - level) < 0.0 {
                        let t = (level - va) / (vb - va);
                        crossings.push((xa + t * (xb - xa), ya + t * (yb - ya)));
                    }
                }

                // 2 crossings: one segment; 4 crossings: saddle cell, pair as found
                for seg in crossings.chunks_exact(2) {
                    let (px0, py0) = area.to_pixel(seg[0].0, seg[0].1);
                    let (px1, py1) = area.to_pixel(seg[1].0, seg[1].1);
                    draw_line(img, px0, py0, px1, py1, color);
                }
            }
        }
    }
}

// =========================================================================================
// The three plots
// =========================================================================================

/// Quiver plot of the field direction, uniform blue arrows
pub fn render_field_plot(scenario: &Scenario, maps: &FieldMaps) -> RgbImage {
    let render = &scenario.render;
    let area = PlotArea::from_grid(&scenario.grid, render.width, render.height);
    let mut img = RgbImage::from_pixel(render.width, render.height, BACKGROUND);

    draw_plot_frame(&mut img, &area);
    draw_field_arrows(&mut img, &area, &scenario.grid, maps, scenario.engine.arrow_stride, |_, _| ARROW_BLUE);
    draw_charges(&mut img, &area, &scenario.system);
    img
}

/// Contour plot of the potential
pub fn render_potential_plot(scenario: &Scenario, maps: &FieldMaps) -> RgbImage {
    let render = &scenario.render;
    let area = PlotArea::from_grid(&scenario.grid, render.width, render.height);
    let mut img = RgbImage::from_pixel(render.width, render.height, BACKGROUND);

    draw_plot_frame(&mut img, &area);
    let levels = contour_level_values(&maps.v, scenario.engine.contour_levels);
    draw_contours(&mut img, &area, &scenario.grid, &maps.v, &levels);
    draw_charges(&mut img, &area, &scenario.system);
    img
}

/// Combined figure: equipotential contours plus arrows colored by 2·ln|E|
pub fn render_combined_plot(scenario: &Scenario, maps: &FieldMaps) -> RgbImage {
    let render = &scenario.render;
    let area = PlotArea::from_grid(&scenario.grid, render.width, render.height);
    let mut img = RgbImage::from_pixel(render.width, render.height, BACKGROUND);

    draw_plot_frame(&mut img, &area);

    let levels = contour_level_values(&maps.v, scenario.engine.contour_levels);
    draw_contours(&mut img, &area, &scenario.grid, &maps.v, &levels);

    // Log-magnitude color scale over the finite arrows
    let mag = maps.magnitude();
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &m in mag.iter() {
        if m.is_finite() && m > 0.0 {
            let l = 2.0 * m.ln();
            lo = lo.min(l);
            hi = hi.max(l);
        }
    }
    let span = if (hi - lo).abs() > f64::EPSILON { hi - lo } else { 1.0 };

    draw_field_arrows(&mut img, &area, &scenario.grid, maps, scenario.engine.arrow_stride, |j, i| {
        let m = mag[[j, i]];
        if m.is_finite() && m > 0.0 {
            viridis_color((2.0 * m.ln() - lo) / span)
        } else {
            ARROW_BLUE
        }
    });

    draw_charges(&mut img, &area, &scenario.system);
    img
}

/// Evaluate the scenario once and write all three configured PNG files
pub fn save_plots(scenario: &Scenario) -> Result<()> {
    let (ny, nx) = scenario.grid.shape();
    println!(
        "save_plots: evaluating {} charges on a {}x{} grid",
        scenario.system.charges.len(),
        nx,
        ny
    );
    let maps = scenario.evaluate();

    render_field_plot(scenario, &maps).save(&scenario.render.field_file)?;
    println!("save_plots: wrote {}", scenario.render.field_file);

    render_potential_plot(scenario, &maps).save(&scenario.render.potential_file)?;
    println!("save_plots: wrote {}", scenario.render.potential_file);

    render_combined_plot(scenario, &maps).save(&scenario.render.combined_file)?;
    println!("save_plots: wrote {}", scenario.render.combined_file);

    Ok(())
}
