use image::png::PngEncoder;
use image::{ColorType, ImageError, Rgb, RgbImage};

pub const CHART_WIDTH: u32 = 800;
pub const CHART_HEIGHT: u32 = 500;
const MARGIN: i64 = 50;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FRAME: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const PRE_COLOR: Rgb<u8> = Rgb([214, 39, 40]);
const POST_COLOR: Rgb<u8> = Rgb([31, 119, 180]);

/// Dash pattern of the pre curve, in pixels drawn / skipped.
const DASH_ON: u32 = 10;
const DASH_OFF: u32 = 6;

#[derive(Debug, Clone, Copy)]
enum Stroke {
    Solid,
    Dashed,
}

/// Plot area mapping from (gait %, angle) to pixel coordinates.
struct Plot {
    y_min: f64,
    y_max: f64,
}

impl Plot {
    fn new(curves: &[&[f64]]) -> Self {
        let (mut y_min, mut y_max) = curves
            .iter()
            .flat_map(|c| c.iter().copied())
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        }
        if (y_max - y_min).abs() < f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }
        let pad = (y_max - y_min) * 0.05;
        Self {
            y_min: y_min - pad,
            y_max: y_max + pad,
        }
    }

    fn left() -> i64 {
        MARGIN
    }

    fn right() -> i64 {
        CHART_WIDTH as i64 - MARGIN
    }

    fn top() -> i64 {
        MARGIN
    }

    fn bottom() -> i64 {
        CHART_HEIGHT as i64 - MARGIN
    }

    fn x(&self, percent: f64) -> i64 {
        let span = (Self::right() - Self::left()) as f64;
        Self::left() + (percent / 100.0 * span).round() as i64
    }

    fn y(&self, value: f64) -> i64 {
        let span = (Self::bottom() - Self::top()) as f64;
        let t = (value - self.y_min) / (self.y_max - self.y_min);
        Self::bottom() - (t * span).round() as i64
    }
}

/// Draw both gait-cycle curves and encode the raster as PNG.
pub fn render_png(pre: &[f64], post: &[f64]) -> Result<Vec<u8>, ImageError> {
    let mut img = RgbImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);
    let plot = Plot::new(&[pre, post]);

    draw_grid(&mut img);
    draw_curve(&mut img, &plot, pre, PRE_COLOR, Stroke::Dashed);
    draw_curve(&mut img, &plot, post, POST_COLOR, Stroke::Solid);
    draw_frame(&mut img);

    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).encode(img.as_raw(), CHART_WIDTH, CHART_HEIGHT, ColorType::Rgb8)?;
    Ok(buf)
}

fn draw_grid(img: &mut RgbImage) {
    for step in 0..=4 {
        let x = Plot::left() + (Plot::right() - Plot::left()) * step / 4;
        draw_line(img, (x, Plot::top()), (x, Plot::bottom()), GRID, 1, None);
        let y = Plot::top() + (Plot::bottom() - Plot::top()) * step / 4;
        draw_line(img, (Plot::left(), y), (Plot::right(), y), GRID, 1, None);
    }
}

fn draw_frame(img: &mut RgbImage) {
    let (l, r, t, b) = (Plot::left(), Plot::right(), Plot::top(), Plot::bottom());
    draw_line(img, (l, t), (r, t), FRAME, 1, None);
    draw_line(img, (r, t), (r, b), FRAME, 1, None);
    draw_line(img, (r, b), (l, b), FRAME, 1, None);
    draw_line(img, (l, b), (l, t), FRAME, 1, None);
}

fn draw_curve(img: &mut RgbImage, plot: &Plot, curve: &[f64], color: Rgb<u8>, stroke: Stroke) {
    if curve.len() < 2 {
        return;
    }
    let step = 100.0 / (curve.len() - 1) as f64;
    let mut dash_counter = 0u32;
    for (i, pair) in curve.windows(2).enumerate() {
        if !pair[0].is_finite() || !pair[1].is_finite() {
            continue;
        }
        let from = (plot.x(i as f64 * step), plot.y(pair[0]));
        let to = (plot.x((i + 1) as f64 * step), plot.y(pair[1]));
        let dash = match stroke {
            Stroke::Solid => None,
            Stroke::Dashed => Some(&mut dash_counter),
        };
        draw_line(img, from, to, color, 2, dash);
    }
}

/// Bresenham line. With `dash`, pixels are drawn only in the "on" part of
/// the pattern; the counter carries over between segments.
fn draw_line(
    img: &mut RgbImage,
    from: (i64, i64),
    to: (i64, i64),
    color: Rgb<u8>,
    thickness: i64,
    mut dash: Option<&mut u32>,
) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let visible = match dash.as_deref_mut() {
            Some(counter) => {
                let on = *counter % (DASH_ON + DASH_OFF) < DASH_ON;
                *counter = counter.wrapping_add(1);
                on
            }
            None => true,
        };
        if visible {
            for ox in 0..thickness {
                for oy in 0..thickness {
                    put_pixel(img, x + ox, y + oy, color);
                }
            }
        }
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn put_pixel(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}
