use crate::cells::{Coordinate, Direction};
use crate::grid::Grid;
use crate::units::Pixels;

/// A wall as a line between two pixel positions.
pub type LineSegment = ((i32, i32), (i32, i32));

#[derive(Debug, Copy, Clone)]
pub struct RenderOptions<'a> {
    pub title: &'a str,
    pub canvas_width: Pixels,
    pub canvas_height: Pixels,
    pub cell_side: Pixels,
}

/// The line to draw for the wall on one side of the cell at `coord`.
pub fn wall_segment(coord: Coordinate, direction: Direction, cell_side: Pixels) -> LineSegment {
    let s = cell_side.0 as i32;
    let x1 = coord.x as i32 * s;
    let y1 = coord.y as i32 * s;
    let (x2, y2) = (x1 + s, y1 + s);

    match direction {
        Direction::Up => ((x1, y1), (x2, y1)),
        Direction::Down => ((x1, y2), (x2, y2)),
        Direction::Left => ((x1, y1), (x1, y2)),
        Direction::Right => ((x2, y1), (x2, y2)),
    }
}

/// Every wall still standing, cell by cell. Walls shared by two cells are listed from both sides.
pub fn wall_segments(grid: &Grid, cell_side: Pixels) -> Vec<LineSegment> {
    let mut segments = Vec::with_capacity(grid.size() * 2);
    for coord in grid.iter() {
        for &dir in &Direction::ALL {
            if grid.has_wall(coord, dir) {
                segments.push(wall_segment(coord, dir, cell_side));
            }
        }
    }
    segments
}

/// The filled square marking the cursor, inset from the cell's walls: (x, y, side).
pub fn cursor_square(position: Coordinate, cell_side: Pixels) -> (i32, i32, u32) {
    let inset = cell_side.0 / 4;
    let side = cell_side.0.saturating_sub(2 * inset).max(1);
    let x = (position.x * cell_side.0 + inset) as i32;
    let y = (position.y * cell_side.0 + inset) as i32;
    (x, y, side)
}

#[cfg(feature = "window")]
pub use self::window::render_to_window;

#[cfg(feature = "window")]
mod window {
    use log::{debug, info};
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::pixels::Color;
    use sdl2::rect::{Point, Rect};

    use super::{cursor_square, wall_segments, RenderOptions};
    use crate::cells::Direction;
    use crate::cursor::Cursor;
    use crate::grid::Grid;
    use crate::sdl;

    fn keycode_direction(keycode: Keycode) -> Option<Direction> {
        match keycode {
            Keycode::W | Keycode::Up => Some(Direction::Up),
            Keycode::S | Keycode::Down => Some(Direction::Down),
            Keycode::A | Keycode::Left => Some(Direction::Left),
            Keycode::D | Keycode::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Show the maze in a window until it is closed or escape is pressed.
    ///
    /// The grid is only read; the cursor the keyboard moves around is local to the event loop.
    pub fn render_to_window(grid: &Grid, options: &RenderOptions) -> Result<(), String> {
        let sdl_setup = sdl::init()?;

        let window = sdl_setup.video_subsystem
            .window(options.title, options.canvas_width.0, options.canvas_height.0)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let mut canvas = window.into_canvas()
            .present_vsync()
            .accelerated()
            .build()
            .map_err(|e| e.to_string())?;
        info!("window {}x{} open", options.canvas_width.0, options.canvas_height.0);

        let black = Color::RGB(0, 0, 0);
        let white = Color::RGB(0xff, 0xff, 0xff);
        let red = Color::RGB(0xff, 0, 0);

        // The maze never changes once generated, only the cursor does.
        let walls = wall_segments(grid, options.cell_side)
            .into_iter()
            .map(|((x1, y1), (x2, y2))| (Point::new(x1, y1), Point::new(x2, y2)))
            .collect::<Vec<_>>();
        let mut cursor = Cursor::for_grid(grid);

        let mut events = sdl_setup.sdl_context.event_pump()?;
        'event: loop {
            for event in events.poll_iter() {
                match event {
                    Event::Quit { .. } |
                    Event::KeyDown { keycode: Some(Keycode::Escape), .. } => break 'event,
                    Event::KeyDown { keycode: Some(keycode), .. } => {
                        if let Some(dir) = keycode_direction(keycode) {
                            if cursor.step(dir) {
                                debug!("cursor at {:?}", cursor.position());
                            }
                        }
                    }
                    _ => continue,
                }
            }

            canvas.set_draw_color(black);
            canvas.clear();

            canvas.set_draw_color(white);
            for &(start, end) in &walls {
                canvas.draw_line(start, end)?;
            }

            let (x, y, side) = cursor_square(cursor.position(), options.cell_side);
            canvas.set_draw_color(red);
            canvas.fill_rect(Rect::new(x, y, side, side))?;

            canvas.present();
        }

        info!("window closed");
        Ok(())
    }
}
