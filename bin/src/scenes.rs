//! Built-in demo scenes, assembled through the factory interfaces the way
//! an external scene loader would.

use lumo_accel::Group;
use lumo_core::app::OPTIONS;
use lumo_core::camera::ArcCamera;
use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::film::Film;
use lumo_core::geometry::{Transform, Vector3f};
use lumo_core::instance::{ArcInstance, Instance};
use lumo_core::integrator::{Integrator, SamplingIntegratorData};
use lumo_core::light::{ArcBackgroundLight, ArcLight};
use lumo_core::properties::{Properties, Value};
use lumo_core::reflection::ArcBsdf;
use lumo_core::scene::Scene;
use lumo_core::shape::ArcShape;
use lumo_core::texture::ArcTexture;
use lumo_lights::EnvironmentMap;
use lumo_shapes::sdf;
use std::sync::Arc;

/// Builds a named demo scene together with the film it renders into.
///
/// * `name` - The scene name.
pub fn build(name: &str) -> Result<(Arc<dyn Integrator>, Arc<Film>), String> {
    match name {
        "cornell" => cornell(),
        "spheres" => spheres(),
        "sdf" => mandelbulb(),
        "volume" => volume(),
        _ => Err(format!(
            "unknown scene '{name}' (available: cornell, spheres, sdf, volume)"
        )),
    }
}

fn constant_texture(color: Color) -> Result<ArcTexture, String> {
    lumo_textures::create(
        "constant",
        &Properties::new().insert("value", Value::Color(color)),
    )
}

fn diffuse(color: Color) -> Result<ArcBsdf, String> {
    lumo_bsdfs::create(
        "diffuse",
        &Properties::new().insert("albedo", Value::Texture(constant_texture(color)?)),
    )
}

fn simple_instance(
    shape: ArcShape,
    transform: Option<Transform>,
    bsdf: Option<ArcBsdf>,
) -> ArcInstance {
    Arc::new(Instance::new(
        shape,
        transform.map(Arc::new),
        bsdf,
        None,
        None,
        None,
        None,
        false,
    ))
}

fn perspective_camera(
    resolution: (i64, i64),
    fov: Float,
    transform: Transform,
) -> Result<ArcCamera, String> {
    lumo_cameras::create(
        "perspective",
        &Properties::new()
            .insert("width", Value::Int(resolution.0))
            .insert("height", Value::Int(resolution.1))
            .insert("fov", Value::Float(fov))
            .insert("transform", Value::Transform(Arc::new(transform))),
    )
}

fn sampler(default_count: usize) -> Result<Box<dyn lumo_core::sampler::Sampler>, String> {
    let count = OPTIONS.samples_per_pixel.unwrap_or(default_count);
    lumo_samplers::create(
        "independent",
        &Properties::new().insert("count", Value::Int(count as i64)),
    )
}

fn integrator(
    variant: &str,
    props: &Properties,
    scene: Arc<Scene>,
    default_spp: usize,
) -> Result<(Arc<dyn Integrator>, Arc<Film>), String> {
    let film = Arc::new(Film::new());
    let data = SamplingIntegratorData::new(scene, sampler(default_spp)?, film.clone());
    let integrator = lumo_integrators::create(variant, props, data)?;
    Ok((integrator, film))
}

/// The classic box: matte walls, two spheres, an area light in the
/// ceiling, rendered with the path tracer.
fn cornell() -> Result<(Arc<dyn Integrator>, Arc<Film>), String> {
    let rectangle: ArcShape = lumo_shapes::create("rectangle", &Properties::new())?;
    let sphere: ArcShape = lumo_shapes::create("sphere", &Properties::new())?;

    let white = Color::gray(0.73);
    let red = Color::new(0.65, 0.05, 0.05);
    let green = Color::new(0.12, 0.45, 0.15);

    let wall = |rotate_axis: Vector3f, angle: Float, translate: Vector3f, color: Color| {
        let mut t = Transform::identity();
        t.rotate(rotate_axis, angle);
        t.translate(translate);
        Ok::<ArcInstance, String>(simple_instance(
            rectangle.clone(),
            Some(t),
            Some(diffuse(color)?),
        ))
    };

    let x = Vector3f::new(1.0, 0.0, 0.0);
    let y = Vector3f::new(0.0, 1.0, 0.0);
    let floor = wall(x, -PI / 2.0, Vector3f::new(0.0, -1.0, 0.0), white)?;
    let ceiling = wall(x, PI / 2.0, Vector3f::new(0.0, 1.0, 0.0), white)?;
    let back = wall(y, PI, Vector3f::new(0.0, 0.0, 1.0), white)?;
    let left = wall(y, PI / 2.0, Vector3f::new(-1.0, 0.0, 0.0), red)?;
    let right = wall(y, -PI / 2.0, Vector3f::new(1.0, 0.0, 0.0), green)?;

    let mut matte_t = Transform::identity();
    matte_t.scale(Vector3f::splat(0.35))?;
    matte_t.translate(Vector3f::new(-0.4, -0.65, 0.2));
    let matte_ball = simple_instance(sphere.clone(), Some(matte_t), Some(diffuse(white)?));

    let mut mirror_t = Transform::identity();
    mirror_t.scale(Vector3f::splat(0.35))?;
    mirror_t.translate(Vector3f::new(0.45, -0.65, -0.25));
    let mirror = lumo_bsdfs::create(
        "conductor",
        &Properties::new().insert(
            "reflectance",
            Value::Texture(constant_texture(Color::gray(0.9))?),
        ),
    )?;
    let mirror_ball = simple_instance(sphere, Some(mirror_t), Some(mirror));

    // The emissive panel exists only as the area light's sampling target;
    // leaving it out of the aggregate keeps its radiance from being found
    // twice.
    let mut panel_t = Transform::identity();
    panel_t.scale(Vector3f::splat(0.4))?;
    panel_t.rotate(x, PI / 2.0);
    panel_t.translate(Vector3f::new(0.0, 0.99, 0.0));
    let emission = lumo_lights::create_emission(
        "lambertian",
        &Properties::new().insert(
            "emission",
            Value::Texture(constant_texture(Color::gray(12.0))?),
        ),
    )?;
    let panel = Arc::new(Instance::new(
        rectangle,
        Some(Arc::new(panel_t)),
        None,
        Some(emission),
        None,
        None,
        None,
        false,
    ));
    let light: ArcLight = lumo_lights::create(
        "area",
        &Properties::new().insert("instance", Value::Instance(panel)),
    )?;

    let mut camera_t = Transform::identity();
    camera_t.translate(Vector3f::new(0.0, 0.0, -3.4));
    let camera = perspective_camera((512, 512), 40.0, camera_t)?;

    let group = Group::new(vec![floor, ceiling, back, left, right, matte_ball, mirror_ball]);
    let scene = Arc::new(Scene::new(camera, group, vec![light], None));

    integrator(
        "pathtracer",
        &Properties::new().insert("depth", Value::Int(4)),
        scene,
        64,
    )
}

/// Three spheres with different materials on a checkered ground under a
/// constant environment.
fn spheres() -> Result<(Arc<dyn Integrator>, Arc<Film>), String> {
    let sphere: ArcShape = lumo_shapes::create("sphere", &Properties::new())?;
    let rectangle: ArcShape = lumo_shapes::create("rectangle", &Properties::new())?;

    let checker = lumo_textures::create(
        "checkerboard",
        &Properties::new()
            .insert("color0", Value::Color(Color::gray(0.25)))
            .insert("color1", Value::Color(Color::gray(0.7)))
            .insert("scale", Value::Vector(Vector3f::new(16.0, 16.0, 0.0))),
    )?;
    let ground_bsdf = lumo_bsdfs::create(
        "diffuse",
        &Properties::new().insert("albedo", Value::Texture(checker)),
    )?;
    let mut ground_t = Transform::identity();
    ground_t.scale(Vector3f::new(8.0, 8.0, 1.0))?;
    ground_t.rotate(Vector3f::new(1.0, 0.0, 0.0), -PI / 2.0);
    ground_t.translate(Vector3f::new(0.0, -1.0, 0.0));
    let ground = simple_instance(rectangle, Some(ground_t), Some(ground_bsdf));

    let place = |offset: Vector3f, bsdf: ArcBsdf| {
        let mut t = Transform::identity();
        t.translate(offset);
        simple_instance(sphere.clone(), Some(t), Some(bsdf))
    };

    let matte = place(Vector3f::new(-2.2, 0.0, 0.0), diffuse(Color::new(0.6, 0.2, 0.2))?);

    let rough = lumo_bsdfs::create(
        "roughconductor",
        &Properties::new()
            .insert(
                "reflectance",
                Value::Texture(constant_texture(Color::gray(0.95))?),
            )
            .insert(
                "roughness",
                Value::Texture(constant_texture(Color::gray(0.3))?),
            ),
    )?;
    let brushed = place(Vector3f::new(0.0, 0.0, 0.0), rough);

    let glass = lumo_bsdfs::create(
        "dielectric",
        &Properties::new()
            .insert("ior", Value::Texture(constant_texture(Color::gray(1.5))?))
            .insert(
                "reflectance",
                Value::Texture(constant_texture(Color::WHITE)?),
            )
            .insert(
                "transmittance",
                Value::Texture(constant_texture(Color::WHITE)?),
            ),
    )?;
    let glass_ball = place(Vector3f::new(2.2, 0.0, 0.0), glass);

    let sky: ArcTexture = match &OPTIONS.envmap {
        Some(path) => lumo_textures::create(
            "image",
            &Properties::new().insert(
                "image",
                Value::Image(Arc::new(lumo_core::film::Image::read(path)?)),
            ),
        )?,
        None => constant_texture(Color::gray(0.8))?,
    };
    let environment = Arc::new(EnvironmentMap::with_texture(sky, None));

    let mut camera_t = Transform::identity();
    camera_t.look_at(
        Vector3f::new(0.0, 1.2, -6.5),
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
    )?;
    let camera = perspective_camera((768, 512), 45.0, camera_t)?;

    let group = Group::new(vec![ground, matte, brushed, glass_ball]);
    let scene = Arc::new(Scene::new(
        camera,
        group,
        vec![environment.clone() as ArcLight],
        Some(environment as ArcBackgroundLight),
    ));

    integrator(
        "pathtracer",
        &Properties::new().insert("depth", Value::Int(5)),
        scene,
        16,
    )
}

/// A mandelbulb visualised by the marching-step debug integrator.
fn mandelbulb() -> Result<(Arc<dyn Integrator>, Arc<Film>), String> {
    let bulb = sdf::create_node(
        "mandelbulb",
        &Properties::new().insert("power", Value::Float(8.0)),
        vec![],
    )?;
    let shape = Arc::new(sdf::SdfShape::new(
        bulb,
        &Properties::new()
            .insert("maxSteps", Value::Int(120))
            .insert("minDistance", Value::Float(1e-3)),
    )?);
    let instance = simple_instance(shape, None, None);

    let mut camera_t = Transform::identity();
    camera_t.look_at(
        Vector3f::new(1.8, 1.4, -2.2),
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
    )?;
    let camera = perspective_camera((512, 512), 50.0, camera_t)?;

    let scene = Arc::new(Scene::new(camera, Group::new(vec![instance]), vec![], None));

    integrator("sdf", &Properties::new(), scene, 4)
}

/// A scattering ball over a matte floor, lit by a point light, rendered by
/// the volumetric path tracer.
fn volume() -> Result<(Arc<dyn Integrator>, Arc<Film>), String> {
    let sphere: ArcShape = lumo_shapes::create("sphere", &Properties::new())?;
    let rectangle: ArcShape = lumo_shapes::create("rectangle", &Properties::new())?;

    let mut floor_t = Transform::identity();
    floor_t.scale(Vector3f::new(6.0, 6.0, 1.0))?;
    floor_t.rotate(Vector3f::new(1.0, 0.0, 0.0), -PI / 2.0);
    floor_t.translate(Vector3f::new(0.0, -1.2, 0.0));
    let floor = simple_instance(rectangle, Some(floor_t), Some(diffuse(Color::gray(0.6))?));

    let medium = lumo_media::create(
        "homogeneous",
        &Properties::new()
            .insert("density", Value::Float(1.2))
            .insert("sigmaS", Value::Color(Color::gray(0.8))),
    )?;
    let fog_ball = Arc::new(Instance::new(
        sphere,
        None,
        None,
        None,
        None,
        Some(medium),
        None,
        false,
    ));

    let light = lumo_lights::create(
        "point",
        &Properties::new()
            .insert("power", Value::Color(Color::gray(160.0)))
            .insert("position", Value::Vector(Vector3f::new(2.0, 2.5, -2.0))),
    )?;

    let mut camera_t = Transform::identity();
    camera_t.look_at(
        Vector3f::new(0.0, 0.6, -4.2),
        Vector3f::new(0.0, 0.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
    )?;
    let camera = perspective_camera((512, 512), 45.0, camera_t)?;

    let group = Group::new(vec![floor, fog_ball]);
    let scene = Arc::new(Scene::new(camera, group, vec![light], None));

    integrator(
        "volumepathtracer",
        &Properties::new().insert("depth", Value::Int(4)),
        scene,
        64,
    )
}
