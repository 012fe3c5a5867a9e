use std::env;

fn main() {

    // Only the window renderer links against SDL2.
    if env::var("CARGO_FEATURE_WINDOW").is_err() {
        return;
    }

    // Assume libsdl2-dev etc. is installed with the package manager on unix family systems.
    // On a windows OS we look for the C built sdl2 libraries in ./sdl_libs.
    // The `cargo run` command will also look for sdl2 dlls in the same directory.
    if cfg!(target_family = "windows") {

        let libs_dir = env::var("SDL_LIBS_DIR")
            .ok()
            .or_else(|| {
                env::var("CARGO_MANIFEST_DIR")
                    .ok()
                    .map(|cargo_root_dir| format!("{}/sdl_libs", cargo_root_dir))
            });

        if let Some(libs) = libs_dir {
            println!("cargo:rustc-link-search=native={}", libs);
        }
    }
}
