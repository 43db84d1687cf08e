use crate::AtomicF64;
use glyph_features_core::{Grid, PixelPos};

/// Cast one bouncing ray from `start` towards `end` and add 1.0 to
/// `accumulator` for every background pixel crossed after the bounce.
///
/// The ray advances in `max(|dx|, |dy|)` equal float steps and runs for at
/// most twice that many iterations. It stops when it comes back to
/// `start`, when the very first step lands on foreground, or on its second
/// foreground hit. The first later foreground hit reverses it. Returns the
/// number of pixels credited.
pub fn bounce_ray(
    grid: &Grid,
    start: PixelPos,
    end: PixelPos,
    min_steps: usize,
    accumulator: &[AtomicF64],
) -> usize {
    let (sx, sy) = (start.x as i64, start.y as i64);
    let dx = end.x as i64 - sx;
    let dy = end.y as i64 - sy;
    let steps = dx.unsigned_abs().max(dy.unsigned_abs()) as usize;
    if steps < min_steps.max(1) {
        return 0;
    }

    let mut x_inc = dx as f64 / steps as f64;
    let mut y_inc = dy as f64 / steps as f64;
    let mut x = sx as f64;
    let mut y = sy as f64;
    let mut bounced = false;
    let mut credited = 0;

    for i in 0..steps * 2 {
        let cx = (x + x_inc).round_ties_even() as i64;
        let cy = (y + y_inc).round_ties_even() as i64;
        if (cx, cy) == (sx, sy) || !grid.in_bounds(cx, cy) {
            break;
        }

        if grid.is_foreground(cx as usize, cy as usize) {
            if i == 0 || bounced {
                break;
            }
            bounced = true;
            x += x_inc;
            y += y_inc;
            x_inc = -x_inc;
            y_inc = -y_inc;
            continue;
        }

        if bounced {
            accumulator[cy as usize * grid.width() + cx as usize].fetch_add(1.0);
            credited += 1;
        }
        x += x_inc;
        y += y_inc;
    }
    credited
}
