//! Example: render a small demo scene to a PNG.
//!
//! Run with: cargo run --release --example render_demo
//! Pass an OBJ file as the first argument to drop a mesh into the scene.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use prism_renderer::{load_obj, Color, Image, Light, Material, Mesh, Quad, Scene, Sphere, Vec3};

fn main() -> Result<()> {
    env_logger::init();

    let obj_path = std::env::args().nth(1);
    let scene = build_scene(obj_path.as_deref())?;
    println!(
        "Scene: {} objects, {} lights",
        scene.object_count(),
        scene.light_count()
    );

    let mut image = Image::new(800, 600);

    println!("Rendering {}x{}...", image.width(), image.height());
    let start = Instant::now();
    scene.render(&mut image);
    println!("Rendered in {:.2?}", start.elapsed());

    let filename = "output.png";
    image::save_buffer(
        filename,
        &image.to_rgba(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )?;
    println!("Saved to {filename}");

    Ok(())
}

fn build_scene(obj_path: Option<&str>) -> Result<Scene> {
    let mut scene = Scene::new();
    scene.set_eye(Vec3::new(400.0, 300.0, 1000.0));
    scene.set_render_shadows(true);
    scene.set_recursion_depth(3);
    scene.set_super_sample(2);

    // matte floor
    scene.add_object(Arc::new(Quad::new(
        Vec3::new(-600.0, -50.0, 1200.0),
        Vec3::new(1400.0, -50.0, 1200.0),
        Vec3::new(1400.0, -50.0, -1200.0),
        Vec3::new(-600.0, -50.0, -1200.0),
        Material::new(Color::new(0.6, 0.6, 0.6), 0.2, 0.8, 0.0, 1.0),
    )));

    scene.add_object(Arc::new(Sphere::new(
        Vec3::new(190.0, 190.0, 230.0),
        100.0,
        Material::new(Color::new(0.2, 0.3, 1.0), 0.2, 0.7, 0.5, 64.0),
    )));
    scene.add_object(Arc::new(Sphere::new(
        Vec3::new(550.0, 180.0, -100.0),
        120.0,
        Material::new(Color::new(1.0, 0.3, 0.2), 0.2, 0.7, 0.8, 32.0),
    )));
    scene.add_object(Arc::new(Sphere::new(
        Vec3::new(400.0, 420.0, 50.0),
        80.0,
        Material::new(Color::new(0.2, 0.9, 0.3), 0.2, 0.8, 0.2, 8.0),
    )));

    // glass sphere in front
    scene.add_object(Arc::new(Sphere::new(
        Vec3::new(300.0, 110.0, 450.0),
        90.0,
        Material::transparent(Color::ONE, 0.0, 0.0, 0.2, 128.0, 1.52),
    )));

    if let Some(path) = obj_path {
        let triangles = load_obj(path)?;
        println!("Loaded {}: {} triangles", path, triangles.len());
        scene.add_object(Arc::new(Mesh::new(
            &triangles,
            Vec3::new(620.0, 150.0, 350.0),
            Vec3::new(0.0, 0.6, 0.0),
            Vec3::splat(80.0),
            Material::new(Color::new(0.9, 0.8, 0.3), 0.2, 0.8, 0.3, 16.0),
        )));
    }

    scene.add_light(Light::new(
        Vec3::new(-150.0, 900.0, 1200.0),
        Color::new(1.0, 1.0, 1.0),
    ));
    scene.add_light(Light::new(
        Vec3::new(900.0, 700.0, 500.0),
        Color::new(0.4, 0.4, 0.45),
    ));

    Ok(scene)
}
