#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub usize);

/// A length on the drawing canvas, in pixels.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Pixels(pub u32);

/// How many whole cells of `cell_side` pixels fit along a canvas side.
pub fn cells_along(canvas_side: Pixels, cell_side: Pixels) -> usize {
    if cell_side.0 == 0 {
        0
    } else {
        (canvas_side.0 / cell_side.0) as usize
    }
}
