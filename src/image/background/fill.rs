//! Border-connected flood fill over a class map.

use image::RgbaImage;

use crate::image::background::classify::PixelClass;

/// Clear alpha on every fillable pixel 4-connected to the image border.
///
/// Scanline fill: each popped seed is widened to the full horizontal run of
/// fillable pixels, the run is painted, and runs on the rows above and below
/// are pushed as new seeds. Fillable regions not reachable from the border
/// (e.g. the inside of a ring) are left untouched.
pub(super) fn clear_border_connected(img: &mut RgbaImage, classes: &[PixelClass]) {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return;
    }
    debug_assert_eq!(classes.len(), width as usize * height as usize);

    let mut fill = BorderFill {
        width,
        classes,
        marks: vec![Mark::Unseen; classes.len()],
        stack: Vec::with_capacity((width + height) as usize * 2),
    };

    fill.push_runs(0, width - 1, 0);
    fill.push_runs(0, width - 1, height - 1);
    for y in 1..height.saturating_sub(1) {
        fill.push_runs(0, 0, y);
        fill.push_runs(width - 1, width - 1, y);
    }

    while let Some((x, y)) = fill.stack.pop() {
        if fill.marks[fill.index(x, y)] == Mark::Done {
            continue;
        }
        let (left, right) = fill.widen(x, y);

        for rx in left..=right {
            let idx = fill.index(rx, y);
            fill.marks[idx] = Mark::Done;
            paint(img, classes[idx], rx, y);
        }

        if y > 0 {
            fill.push_runs(left, right, y - 1);
        }
        if y + 1 < height {
            fill.push_runs(left, right, y + 1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    Queued,
    Done,
}

struct BorderFill<'a> {
    width: u32,
    classes: &'a [PixelClass],
    marks: Vec<Mark>,
    stack: Vec<(u32, u32)>,
}

impl BorderFill<'_> {
    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Fillable and not painted yet (queued pixels still count).
    #[inline]
    fn paintable(&self, x: u32, y: u32) -> bool {
        let idx = self.index(x, y);
        self.marks[idx] != Mark::Done && self.classes[idx].is_fillable()
    }

    /// Extend `(x, y)` left and right over paintable pixels.
    fn widen(&self, x: u32, y: u32) -> (u32, u32) {
        let mut left = x;
        while left > 0 && self.paintable(left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < self.width && self.paintable(right + 1, y) {
            right += 1;
        }
        (left, right)
    }

    /// Push one seed per run of unseen fillable pixels in `[from, to]` on row `y`.
    ///
    /// The whole run is marked queued so it is never pushed twice.
    fn push_runs(&mut self, from: u32, to: u32, y: u32) {
        let mut in_run = false;
        for x in from..=to {
            let idx = self.index(x, y);
            if self.marks[idx] == Mark::Unseen && self.classes[idx].is_fillable() {
                self.marks[idx] = Mark::Queued;
                if !in_run {
                    self.stack.push((x, y));
                    in_run = true;
                }
            } else {
                in_run = false;
            }
        }
    }
}

#[inline]
fn paint(img: &mut RgbaImage, class: PixelClass, x: u32, y: u32) {
    match class {
        PixelClass::Background => img.get_pixel_mut(x, y)[3] = 0,
        PixelClass::Fringe(alpha) => img.get_pixel_mut(x, y)[3] = alpha,
        PixelClass::Subject => {}
    }
}
