use crate::foundation::geom::{Point, Size};

/// Proportional draw size and centering offset for one composite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedGeometry {
    /// Size the source is scaled to before drawing.
    pub draw: Size,
    /// Top-left placement of the scaled draw on the canvas.
    pub offset: Point,
}

/// Compute the proportional draw size and centering offset.
///
/// With `fit_inside` the smaller of the two axis scales is used and the scaled
/// image fits entirely within the target box, leaving borders on the other
/// axis. Without it the larger scale is used: the image fills the box and the
/// overflowing axis is cropped at the canvas edges (negative offset).
///
/// Draw dimensions truncate toward zero; the offset is the integer midpoint
/// `(requested - draw) / 2` per axis, again truncating toward zero.
pub fn resolve(original: Size, requested: Size, fit_inside: bool) -> ResolvedGeometry {
    if original == requested || original.is_empty() {
        return ResolvedGeometry {
            draw: requested,
            offset: Point::default(),
        };
    }

    let scale_w = f64::from(requested.width) / f64::from(original.width);
    let scale_h = f64::from(requested.height) / f64::from(original.height);

    let draw = if scale_w == scale_h {
        // Aspect ratio already matches; no bars, no crop.
        requested
    } else {
        // The scale-winning axis lands exactly on the requested value, so it
        // is pinned there and only the other axis is scaled and truncated.
        let width_wins = if fit_inside {
            scale_w < scale_h
        } else {
            scale_w > scale_h
        };
        if width_wins {
            Size::new(
                requested.width,
                (f64::from(original.height) * scale_w) as u32,
            )
        } else {
            Size::new(
                (f64::from(original.width) * scale_h) as u32,
                requested.height,
            )
        }
    };

    ResolvedGeometry {
        draw,
        offset: Point::new(
            centered(requested.width, draw.width),
            centered(requested.height, draw.height),
        ),
    }
}

fn centered(requested: u32, draw: u32) -> i32 {
    if requested == draw {
        0
    } else {
        ((i64::from(requested) - i64::from(draw)) / 2) as i32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
