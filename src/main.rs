use docopt::Docopt;
use log::{debug, info};
use maze_backtracker::{
    cells::Coordinate,
    config::MazeConfig,
    generators,
    grid::Grid,
    units::Pixels,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Maze backtracker

Usage:
    maze_driver -h | --help
    maze_driver [--canvas-width=<px> --canvas-height=<px> --cell-pixels=<px>] [--start-x=<x> --start-y=<y>] [--seed=<n>] [--text] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --canvas-width=<px>    Width of the drawing area in pixels [default: 501].
    --canvas-height=<px>   Height of the drawing area in pixels [default: 501].
    --cell-pixels=<px>     Pixel length of one cell wall [default: 20].
    --start-x=<x>          x coordinate of the cell generation starts from [default: 0].
    --start-y=<y>          y coordinate of the cell generation starts from [default: 0].
    --seed=<n>             Seed for the random number generator, for a reproducible maze.
    --text                 Print the maze as text instead of showing it in a window.
    --text-out=<path>      Output file path for a textual rendering of the maze.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_canvas_width: u32,
    flag_canvas_height: u32,
    flag_cell_pixels: u32,
    flag_start_x: u32,
    flag_start_y: u32,
    flag_seed: Option<u64>,
    flag_text: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
    use error_chain::error_chain;
    error_chain! {

        foreign_links {
            Io(::std::io::Error);
            Config(::maze_backtracker::config::ConfigError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    // Info unless RUST_LOG says otherwise
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    debug!("{:?}", args);

    let config = MazeConfig::new(Pixels(args.flag_canvas_width),
                                 Pixels(args.flag_canvas_height),
                                 Pixels(args.flag_cell_pixels),
                                 Coordinate::new(args.flag_start_x, args.flag_start_y))?;
    info!("maze grid {}x{} cells of {} pixels",
          config.grid_width.0,
          config.grid_height.0,
          config.cell_side.0);

    let mut maze_grid = Grid::new(config.grid_width, config.grid_height)
        .ok_or_else(|| format!("Cannot allocate a {}x{} grid",
                               config.grid_width.0,
                               config.grid_height.0))?;

    // Seeded once per run. Logged so that any maze can be generated again.
    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!("random seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let walls_removed = generators::recursive_backtracker(&mut maze_grid, config.start, &mut rng);
    info!("generated maze from {:?}, {} walls removed", config.start, walls_removed);

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    let text_requested = args.flag_text || !args.flag_text_out.is_empty();
    if !args.flag_text_out.is_empty() {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    } else if text_requested || !cfg!(feature = "window") {
        println!("{}", maze_grid);
    }

    if !text_requested {
        show_window(&maze_grid, &config)?;
    }

    Ok(())
}

#[cfg(feature = "window")]
fn show_window(maze_grid: &Grid, config: &MazeConfig) -> Result<()> {
    use maze_backtracker::renderers::{render_to_window, RenderOptions};

    let options = RenderOptions {
        title: "Maze",
        canvas_width: config.canvas_width,
        canvas_height: config.canvas_height,
        cell_side: config.cell_side,
    };
    render_to_window(maze_grid, &options).map_err(|e| format!("SDL failure: {}", e).into())
}

#[cfg(not(feature = "window"))]
fn show_window(_: &Grid, _: &MazeConfig) -> Result<()> {
    debug!("built without the window feature, text rendering only");
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    write_text_to_file(&maze_grid.edge_list(), file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!("saved {} passages to {}", maze_grid.passages_count(), file_path);

    Ok(())
}
