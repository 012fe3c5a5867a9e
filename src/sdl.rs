use log::debug;

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
}

pub fn init() -> Result<SdlSetup, String> {
    let sdl_context: sdl2::Sdl = sdl2::init()?;
    let video_subsystem: sdl2::VideoSubsystem = sdl_context.video()?;
    debug!("SDL initialised, video driver {}", video_subsystem.current_video_driver());

    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
    })
}
