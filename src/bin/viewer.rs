//! Interactive viewer. Press `G` to grab the mouse and look around, move with
//! WASD, Space and left Shift. The light follows the camera.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};

use projection3d::camera::{
    DEFAULT_FAR, DEFAULT_FOV, DEFAULT_HEIGHT, DEFAULT_NEAR, DEFAULT_WIDTH, MOVE_STEP,
};
use projection3d::math::vec3::Vec3;
use projection3d::window::{FpsCounter, FrameLimiter, InputState, Window, WindowEvent};
use projection3d::{Camera, Engine, MeshData, Model, NormalWeighting, ShadingMode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OBJ file to view; the built-in cube when omitted
    #[arg(long)]
    obj: Option<PathBuf>,

    /// none, flat, gouraud or phong
    #[arg(long, default_value = "phong", value_parser = parse_shading)]
    shading: ShadingMode,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,
}

fn parse_shading(s: &str) -> Result<ShadingMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "none" => Ok(ShadingMode::None),
        "flat" => Ok(ShadingMode::Flat),
        "gouraud" => Ok(ShadingMode::Gouraud),
        "phong" => Ok(ShadingMode::Phong),
        other => Err(format!("unknown shading mode '{other}'")),
    }
}

/// A camera of the new size with the old pose.
fn resized(camera: &Camera, width: u32, height: u32) -> Camera {
    let mut next = Camera::new(width, height, camera.fov(), camera.near(), camera.far());
    next.set_position(camera.position());
    next.set_yaw(camera.yaw());
    next.set_pitch(camera.pitch());
    next
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mesh = match &args.obj {
        Some(path) => MeshData::from_obj(path)?,
        None => MeshData::cube(),
    };
    let mut model = Model::from_mesh(mesh, NormalWeighting::default());
    model
        .set_position(Vec3::new(0.0, 0.0, 5.0))
        .set_shading(args.shading);

    let mut window = Window::new("projection3d", args.width, args.height)?;
    let mut camera = Camera::new(args.width, args.height, DEFAULT_FOV, DEFAULT_NEAR, DEFAULT_FAR);
    let mut engine = Engine::new(args.width, args.height);
    let mut input = InputState::default();
    let mut limiter = FrameLimiter::new(&window);
    let mut fps = FpsCounter::new();

    info!("Viewer started ({} shading), press G to grab the mouse", model.shading());

    loop {
        match window.poll_events(&mut input) {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                window.resize(width, height)?;
                camera = resized(&camera, width, height);
            }
            WindowEvent::None => {}
        }

        let (dx, dy) = input.mouse_delta;
        camera.process_mouse_delta(dx as f64, dy as f64);
        camera.process_keyboard(MOVE_STEP, &input.movement());

        let frame = engine.render(&camera, &model, camera.position());
        window.present(&frame.to_rgba_bytes())?;

        limiter.wait_and_get_delta(&window);
        if let Some(rate) = fps.tick() {
            window.set_title(&format!("projection3d - {rate:.0} fps"))?;
            debug!("{:?}", engine.last_stats());
        }
    }

    Ok(())
}
