//! End-to-end rendering scenarios wiring cameras, shapes, materials,
//! lights and integrators together.

use lumo_accel::Group;
use lumo_bsdfs::{Conductor, Dielectric, Diffuse};
use lumo_cameras::PerspectiveCamera;
use lumo_core::camera::{ArcCamera, Camera};
use lumo_core::color::Color;
use lumo_core::common::*;
use lumo_core::film::Film;
use lumo_core::geometry::{Point2f, Point2i, Point3f, Ray, Transform, Vector3f};
use lumo_core::instance::{ArcInstance, Instance};
use lumo_core::integrator::{SamplingIntegrator, SamplingIntegratorData};
use lumo_core::light::{ArcBackgroundLight, ArcLight};
use lumo_core::portal::PortalLink;
use lumo_core::properties::{Properties, Value};
use lumo_core::sampler::Sampler;
use lumo_core::scene::Scene;
use lumo_core::texture::ArcTexture;
use lumo_integrators::{DirectIntegrator, NormalsIntegrator, PathTracer, VolumePathTracer};
use lumo_lights::{DirectionalLight, EnvironmentMap, PointLight};
use lumo_media::HomogeneousMedium;
use lumo_samplers::IndependentSampler;
use lumo_shapes::{Rectangle, Sphere};
use lumo_textures::ConstantTexture;
use std::sync::Arc;

fn texture(color: Color) -> ArcTexture {
    Arc::new(ConstantTexture::with_color(color))
}

fn plain_instance(shape: lumo_core::shape::ArcShape, bsdf: Option<lumo_core::reflection::ArcBsdf>) -> ArcInstance {
    Arc::new(Instance::new(shape, None, bsdf, None, None, None, None, false))
}

fn camera_at(origin: Vector3f, resolution: Point2i, fov: Float) -> ArcCamera {
    let mut transform = Transform::identity();
    transform.translate(origin);
    Arc::new(PerspectiveCamera::with_values(resolution, fov, "x", transform).unwrap())
}

fn integrator_data(scene: Arc<Scene>, samples: usize) -> SamplingIntegratorData {
    SamplingIntegratorData::new(
        scene,
        Box::new(IndependentSampler::with_count(samples)),
        Arc::new(Film::new()),
    )
}

fn sampler_for(seed: u64) -> Box<dyn Sampler> {
    let mut sampler = IndependentSampler::with_count(1);
    sampler.seed(Point2i::new(seed as i32, 0), 0);
    Box::new(sampler)
}

/// Scenario: unit sphere, perspective camera at (0,0,-3) looking +z,
/// normals integrator. The centre of the image sees the remapped normal
/// (0.5, 0.5, 0).
#[test]
fn normals_of_a_centred_sphere() {
    let sphere = plain_instance(Arc::new(Sphere::new()), None);
    let camera = camera_at(Vector3f::new(0.0, 0.0, -3.0), Point2i::new(2, 2), 45.0);
    let scene = Arc::new(Scene::new(
        camera.clone(),
        Group::new(vec![sphere]),
        vec![],
        None,
    ));

    let integrator = NormalsIntegrator::new(&Properties::new(), integrator_data(scene, 1));

    let mut rng = sampler_for(1);
    let center = camera.sample(Point2f::zero(), &mut *rng);
    let color = integrator.li(&center.ray, &mut *rng);

    assert!((color.r - 0.5).abs() < 1e-4);
    assert!((color.g - 0.5).abs() < 1e-4);
    assert!(color.b.abs() < 1e-4);
}

/// Scenario: white diffuse ground plane lit by a directional light from
/// straight above returns radiance intensity/π.
#[test]
fn diffuse_plane_under_directional_light() {
    let plane = plain_instance(
        Arc::new(Rectangle::new()),
        Some(Arc::new(Diffuse::with_albedo(texture(Color::WHITE)))),
    );
    let light: ArcLight = Arc::new(DirectionalLight::with_values(
        Color::WHITE,
        Vector3f::new(0.0, 0.0, 1.0),
    ));
    let camera = camera_at(Vector3f::new(0.0, 0.0, 3.0), Point2i::new(2, 2), 45.0);
    let scene = Arc::new(Scene::new(camera, Group::new(vec![plane]), vec![light], None));

    let props = Properties::new().insert("depth", Value::Int(2));
    let integrator = PathTracer::new(&props, integrator_data(scene, 1));

    let ray = Ray::new(Point3f::new(0.0, 0.0, 3.0), Vector3f::new(0.0, 0.0, -1.0));
    let mut rng = sampler_for(7);
    let n = 64;
    let mut mean = Color::BLACK;
    for i in 0..n {
        rng.seed(Point2i::new(0, 0), i);
        mean += integrator.li(&ray, &mut *rng);
    }
    mean /= n as Float;

    assert!((mean.r - INV_PI).abs() < 1e-3);
}

/// Scenario: a mirror ball under a constant white environment reflects
/// pure white with a single sample of the direct integrator.
#[test]
fn mirror_ball_under_white_environment() {
    let ball = plain_instance(
        Arc::new(Sphere::new()),
        Some(Arc::new(Conductor::with_reflectance(texture(Color::WHITE)))),
    );
    let environment = Arc::new(EnvironmentMap::with_texture(texture(Color::WHITE), None));
    let camera = camera_at(Vector3f::new(0.0, 0.0, -3.0), Point2i::new(2, 2), 45.0);
    let scene = Arc::new(Scene::new(
        camera,
        Group::new(vec![ball]),
        vec![environment.clone() as ArcLight],
        Some(environment as ArcBackgroundLight),
    ));

    let integrator = DirectIntegrator::new(integrator_data(scene, 1));

    let ray = Ray::new(Point3f::new(0.0, 0.0, -3.0), Vector3f::new(0.0, 0.0, 1.0));
    let mut rng = sampler_for(3);
    let color = integrator.li(&ray, &mut *rng);

    assert!((color.r - 1.0).abs() < 1e-4);
    assert!((color.g - 1.0).abs() < 1e-4);
    assert!((color.b - 1.0).abs() < 1e-4);
}

/// Scenario: a glass ball (ior 1.5, transmittance 0.9) under a white
/// environment. For the centre ray the expected radiance over the Fresnel
/// branches within three bounces is R + T²·τ² ≈ 0.7865; the η² factors of
/// the two refractions cancel exactly.
#[test]
fn glass_ball_refracts_the_environment() {
    let tau = 0.9;
    let ball = plain_instance(
        Arc::new(Sphere::new()),
        Some(Arc::new(Dielectric::with_textures(
            texture(Color::gray(1.5)),
            texture(Color::WHITE),
            texture(Color::gray(tau)),
        ))),
    );
    let environment = Arc::new(EnvironmentMap::with_texture(texture(Color::WHITE), None));
    let camera = camera_at(Vector3f::new(0.0, 0.0, -4.0), Point2i::new(2, 2), 45.0);
    let scene = Arc::new(Scene::new(
        camera,
        Group::new(vec![ball]),
        vec![],
        Some(environment as ArcBackgroundLight),
    ));

    let props = Properties::new().insert("depth", Value::Int(3));
    let integrator = PathTracer::new(&props, integrator_data(scene, 1));

    let ray = Ray::new(Point3f::new(0.0, 0.0, -4.0), Vector3f::new(0.0, 0.0, 1.0));
    let mut rng = sampler_for(11);
    let n = 4000;
    let mut mean = Color::BLACK;
    for i in 0..n {
        rng.seed(Point2i::new(1, 1), i);
        mean += integrator.li(&ray, &mut *rng);
    }
    mean /= n as Float;

    // Fresnel reflectance at normal incidence for ior 1.5 is 0.04.
    let fresnel = 0.04;
    let expected = fresnel + (1.0 - fresnel) * (1.0 - fresnel) * tau * tau;
    assert!((mean.r - expected).abs() < 0.02, "mean {} vs {}", mean.r, expected);
}

/// Scenario: a homogeneous absorbing ball (σ_t = 1) between a lit diffuse
/// plane and a point light attenuates the light by e⁻² along the two-unit
/// chord of the shadow ray.
#[test]
fn medium_shadowing_attenuates_by_the_chord() {
    let plane = plain_instance(
        Arc::new(Rectangle::new()),
        Some(Arc::new(Diffuse::with_albedo(texture(Color::WHITE)))),
    );

    let mut ball_transform = Transform::identity();
    ball_transform.translate(Vector3f::new(0.0, 0.0, 3.0));
    let medium_ball = Arc::new(Instance::new(
        Arc::new(Sphere::new()),
        Some(Arc::new(ball_transform)),
        None,
        None,
        None,
        Some(Arc::new(HomogeneousMedium::with_coefficients(
            1.0,
            Color::WHITE,
        ))),
        None,
        false,
    ));

    // Power chosen so the unshadowed contribution at the plane centre is
    // exactly one: power / (4π d²) · albedo/π = 1 for d = 6.
    let light: ArcLight = Arc::new(PointLight::with_values(
        Color::gray(4.0 * PI * 36.0 * PI),
        Point3f::new(0.0, 0.0, 6.0),
    ));

    let camera = camera_at(Vector3f::new(0.0, 0.0, 1.0), Point2i::new(2, 2), 45.0);
    let scene = Arc::new(Scene::new(
        camera,
        Group::new(vec![plane, medium_ball]),
        vec![light],
        None,
    ));

    let props = Properties::new().insert("depth", Value::Int(2));
    let integrator = VolumePathTracer::new(&props, integrator_data(scene, 1));

    let ray = Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0));
    let mut rng = sampler_for(23);
    let n = 16;
    let mut mean = Color::BLACK;
    for i in 0..n {
        rng.seed(Point2i::new(2, 2), i);
        mean += integrator.li(&ray, &mut *rng);
    }
    mean /= n as Float;

    let expected = (-2.0 as Float).exp();
    assert!(
        (mean.r - expected).abs() < 1e-3,
        "mean {} vs {}",
        mean.r,
        expected
    );
}

/// A ray hitting a portal surface continues from the linked portal.
#[test]
fn portals_forward_rays_to_their_link() {
    let link = Arc::new(PortalLink::new());

    let portal_a = Arc::new(Instance::new(
        Arc::new(Rectangle::new()),
        None,
        None,
        None,
        None,
        None,
        Some(link.clone()),
        false,
    ));

    let mut b_transform = Transform::identity();
    b_transform.translate(Vector3f::new(0.0, 0.0, 10.0));
    let b_transform = Arc::new(b_transform);
    let portal_b = Arc::new(Instance::new(
        Arc::new(Rectangle::new()),
        Some(b_transform.clone()),
        None,
        None,
        None,
        None,
        Some(link.clone()),
        false,
    ));

    link.register(&portal_a, None).unwrap();
    link.register(&portal_b, Some(b_transform)).unwrap();

    let mut target_transform = Transform::identity();
    target_transform.translate(Vector3f::new(0.0, 0.0, 12.0));
    let target = Arc::new(Instance::new(
        Arc::new(Rectangle::new()),
        Some(Arc::new(target_transform)),
        Some(Arc::new(Diffuse::with_albedo(texture(Color::WHITE)))),
        None,
        None,
        None,
        None,
        false,
    ));

    let camera = camera_at(Vector3f::new(0.0, 0.0, -2.0), Point2i::new(2, 2), 45.0);
    let scene = Arc::new(Scene::new(
        camera,
        Group::new(vec![portal_a, portal_b, target.clone()]),
        vec![],
        None,
    ));

    let ray = Ray::new(Point3f::new(0.25, 0.0, -2.0), Vector3f::new(0.0, 0.0, 1.0));
    let mut rng = sampler_for(31);
    let its = scene.intersect(&ray, &mut *rng);

    assert!(its.is_hit());
    assert!((its.surf.position.z - 12.0).abs() < 1e-3);
    assert!(Arc::ptr_eq(its.instance.as_ref().unwrap(), &target));
}

/// A third portal registration is a construction error.
#[test]
fn portal_links_hold_exactly_two_ends() {
    let link = Arc::new(PortalLink::new());
    let make = || {
        Arc::new(Instance::new(
            Arc::new(Rectangle::new()),
            None,
            None,
            None,
            None,
            None,
            Some(link.clone()),
            false,
        ))
    };
    let a = make();
    let b = make();
    let c = make();
    link.register(&a, None).unwrap();
    link.register(&b, None).unwrap();
    assert!(link.register(&c, None).is_err());
}

/// The full tile-parallel driver produces the same centre-heavy image a
/// direct per-ray evaluation would.
#[test]
fn driver_renders_the_normals_scene() {
    let sphere = plain_instance(Arc::new(Sphere::new()), None);
    let camera = camera_at(Vector3f::new(0.0, 0.0, -3.0), Point2i::new(16, 16), 45.0);
    let scene = Arc::new(Scene::new(
        camera,
        Group::new(vec![sphere]),
        vec![],
        None,
    ));

    let film = Arc::new(Film::new());
    let data = SamplingIntegratorData::new(
        scene,
        Box::new(IndependentSampler::with_count(1)),
        film.clone(),
    );
    let integrator = NormalsIntegrator::new(&Properties::new(), data);

    integrator.render().unwrap();

    assert_eq!(film.resolution(), Point2i::new(16, 16));
    // The centre pixels face the camera.
    let centre = film.pixel(Point2i::new(8, 8));
    assert!((centre.r - 0.5).abs() < 0.1);
    assert!((centre.g - 0.5).abs() < 0.1);
    assert!(centre.b < 0.2);

    // Corner rays miss the sphere entirely.
    let corner = film.pixel(Point2i::new(0, 0));
    assert!(corner.is_black());
}
