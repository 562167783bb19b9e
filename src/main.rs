//! Headless renderer: draws one frame of a mesh and writes it to an image.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use projection3d::camera::{DEFAULT_FAR, DEFAULT_FOV, DEFAULT_HEIGHT, DEFAULT_NEAR, DEFAULT_WIDTH};
use projection3d::colors::Rgb;
use projection3d::math::vec3::Vec3;
use projection3d::{Camera, Engine, MeshData, Model, NormalWeighting, RenderOptions, ShadingMode};

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Shading {
    None,
    Flat,
    Gouraud,
    #[default]
    Phong,
}

impl From<Shading> for ShadingMode {
    fn from(shading: Shading) -> Self {
        match shading {
            Shading::None => ShadingMode::None,
            Shading::Flat => ShadingMode::Flat,
            Shading::Gouraud => ShadingMode::Gouraud,
            Shading::Phong => ShadingMode::Phong,
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Weighting {
    #[default]
    Mean,
    Area,
    Angle,
}

impl From<Weighting> for NormalWeighting {
    fn from(weighting: Weighting) -> Self {
        match weighting {
            Weighting::Mean => NormalWeighting::Mean,
            Weighting::Area => NormalWeighting::Area,
            Weighting::Angle => NormalWeighting::Angle,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OBJ file to render; the built-in cube when omitted
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Output image path; the format follows the extension
    #[arg(short, long, default_value = "frame.png")]
    output: PathBuf,

    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Horizontal field of view in degrees
    #[arg(long, default_value_t = DEFAULT_FOV)]
    fov: f64,

    #[arg(long, default_value_t = DEFAULT_NEAR)]
    near: f64,

    #[arg(long, default_value_t = DEFAULT_FAR)]
    far: f64,

    /// Camera position, "x,y,z"
    #[arg(long, default_value = "0,0,0", value_parser = parse_vec3, allow_hyphen_values = true)]
    camera: Vec3,

    /// Camera yaw in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    yaw: f64,

    /// Camera pitch in degrees, positive looks down
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pitch: f64,

    /// Light position, "x,y,z"; defaults to the camera position
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    light: Option<Vec3>,

    /// Model position, "x,y,z"
    #[arg(long, default_value = "0,0,5", value_parser = parse_vec3, allow_hyphen_values = true)]
    model_pos: Vec3,

    /// Base color, "r,g,b" in 0-255
    #[arg(long, default_value = "255,255,255", value_parser = parse_rgb)]
    color: Rgb,

    #[arg(long, value_enum, default_value_t = Shading::Phong)]
    shading: Shading,

    /// How face normals are combined into vertex normals
    #[arg(long, value_enum, default_value_t = Weighting::Mean)]
    weighting: Weighting,

    /// Draw faces turned away from the camera
    #[arg(long, default_value_t = false)]
    no_cull: bool,

    /// Minimum light intensity in 0-1
    #[arg(long, default_value_t = 0.0)]
    ambient: f64,
}

fn parse_components<T: std::str::FromStr>(s: &str) -> Result<[T; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated values, got '{s}'"));
    }
    let mut values = Vec::with_capacity(3);
    for part in parts {
        values.push(
            part.parse::<T>()
                .map_err(|_| format!("'{part}' is not a valid component"))?,
        );
    }
    values
        .try_into()
        .map_err(|_| format!("expected three values in '{s}'"))
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    parse_components::<f64>(s).map(Vec3::from)
}

fn parse_rgb(s: &str) -> Result<Rgb, String> {
    parse_components::<u8>(s).map(Rgb::from)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mesh = match &args.obj {
        Some(path) => MeshData::from_obj(path)?,
        None => MeshData::cube(),
    };

    let mut model = Model::from_mesh(mesh, args.weighting.into());
    model
        .set_position(args.model_pos)
        .set_color(args.color)
        .set_shading(args.shading.into());

    let mut camera = Camera::new(args.width, args.height, args.fov, args.near, args.far);
    camera.set_position(args.camera);
    camera.set_yaw(args.yaw);
    camera.set_pitch(args.pitch);

    let light = args.light.unwrap_or_else(|| camera.position());

    let options = RenderOptions {
        backface_culling: !args.no_cull,
        ambient_floor: args.ambient.clamp(0.0, 1.0),
        ..RenderOptions::default()
    };
    let mut engine = Engine::with_options(args.width, args.height, options);
    let frame = engine.render(&camera, &model, light);
    frame.save(&args.output)?;

    let stats = engine.last_stats();
    info!(
        "{} shading: {} faces drawn, {} culled, {} clipped, {} pixels",
        model.shading(),
        stats.faces_drawn,
        stats.faces_culled,
        stats.faces_clipped,
        stats.pixels_written
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vectors_with_spaces_and_signs() {
        assert_eq!(parse_vec3("1, -2.5,3").unwrap(), Vec3::new(1.0, -2.5, 3.0));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,2,x").is_err());
    }

    #[test]
    fn parses_colors() {
        assert_eq!(parse_rgb("255,128,0").unwrap(), Rgb::new(255, 128, 0));
        assert!(parse_rgb("256,0,0").is_err());
    }

    #[test]
    fn defaults_render_the_cube_in_front() {
        let args = Args::parse_from(["projection3d"]);
        assert_eq!(args.model_pos, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(args.light, None);
        assert_eq!(ShadingMode::from(args.shading), ShadingMode::Phong);
        assert!(!args.no_cull);
    }

    #[test]
    fn negative_vectors_are_accepted() {
        let args = Args::parse_from(["projection3d", "--camera", "-1,0,-3", "--pitch", "-10"]);
        assert_eq!(args.camera, Vec3::new(-1.0, 0.0, -3.0));
        assert_eq!(args.pitch, -10.0);
    }
}
