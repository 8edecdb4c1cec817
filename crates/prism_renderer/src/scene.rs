//! Scene assembly and the Whitted trace/render pipeline.
//!
//! `Scene` owns the object and light lists plus the render parameters.
//! `render` shoots supersampled primary rays per pixel, `trace` does the
//! recursive shading (Phong local terms, shadows, reflection and
//! refraction) and `cast_ray` is the nearest-hit query under all of it.

use std::mem;
use std::sync::Arc;

use prism_core::{Color, Light};
use prism_math::{Ray, Vec3};
use rayon::prelude::*;

use crate::image::{clamp_color, Image};
use crate::object::{Hit, Object};

/// Offset for secondary ray origins, keeps them from re-hitting the
/// surface they start on.
const EPSILON: f32 = 1e-2;

/// Mirror `v` across the plane with normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// A renderable scene: objects, lights, eye position and render
/// parameters.
pub struct Scene {
    objects: Vec<Arc<dyn Object>>,
    lights: Vec<Light>,
    eye: Vec3,
    render_shadows: bool,
    recursion_depth: u32,
    supersampling_factor: u32,
}

impl Scene {
    /// Create an empty scene with shadows off, no recursion and one
    /// sample per pixel.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            eye: Vec3::ZERO,
            render_shadows: false,
            recursion_depth: 0,
            supersampling_factor: 1,
        }
    }

    /// Add an object. Ownership is shared, so callers may keep their own
    /// handle.
    pub fn add_object(&mut self, object: Arc<dyn Object>) {
        self.objects.push(object);
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Set the eye (camera) position.
    pub fn set_eye(&mut self, eye: Vec3) {
        self.eye = eye;
    }

    /// Enable or disable shadow rays.
    pub fn set_render_shadows(&mut self, enabled: bool) {
        self.render_shadows = enabled;
    }

    /// Set how many reflection and refraction bounces a ray may take.
    pub fn set_recursion_depth(&mut self, depth: u32) {
        self.recursion_depth = depth;
    }

    /// Set the supersampling factor (sub-rays per pixel per axis).
    /// A factor below 1 is treated as 1.
    pub fn set_super_sample(&mut self, factor: u32) {
        self.supersampling_factor = factor.max(1);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Find the nearest object hit by `ray`.
    ///
    /// Linear scan with a strict `<` on t seeded at infinity, so of two
    /// equal-t hits the earlier-added object wins.
    pub fn cast_ray(&self, ray: &Ray) -> Option<(&dyn Object, Hit)> {
        let mut nearest: Option<(&dyn Object, Hit)> = None;
        let mut min_t = f32::INFINITY;

        for object in &self.objects {
            if let Some(hit) = object.intersect(ray) {
                if hit.t < min_t {
                    min_t = hit.t;
                    nearest = Some((object.as_ref(), hit));
                }
            }
        }

        nearest
    }

    /// Shade one ray recursively. `depth` counts the reflection and
    /// refraction bounces still allowed; local shading always happens.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        let (object, hit) = match self.cast_ray(ray) {
            Some(found) => found,
            None => return Color::ZERO, // background
        };

        let material = object.material();
        let hit_point = ray.at(hit.t);
        let view = -ray.direction;

        // Geometric normal straight from the primitive; the shading
        // normal is re-oriented to face the viewer.
        let normal = hit.normal;
        let shading_normal = if normal.dot(view) >= 0.0 { normal } else { -normal };

        let base_color = match &material.texture {
            Some(texture) => match object.to_uv(hit_point) {
                // uv has v growing upward, texture rows grow downward
                Some((u, v)) => texture.color_at(u, 1.0 - v),
                None => material.color,
            },
            None => material.color,
        };

        // Ambient once, independent of the light list
        let mut color = material.ambient * base_color;

        for light in &self.lights {
            let to_light = light.position - hit_point;
            let light_dir = to_light.normalize();

            if self.render_shadows {
                let shadow_ray = Ray::new(hit_point + EPSILON * shading_normal, light_dir);
                if let Some((_, shadow_hit)) = self.cast_ray(&shadow_ray) {
                    // occluders beyond the light do not block it
                    if shadow_hit.t < to_light.length() {
                        continue;
                    }
                }
            }

            let lambert = shading_normal.dot(light_dir);
            color += lambert.max(0.0) * material.diffuse * light.color * base_color;

            // Highlight only when the light is on the visible side
            if lambert > 0.0 {
                let highlight = reflect(-light_dir, shading_normal).dot(view).max(0.0);
                color += highlight.powf(material.shininess) * material.specular * light.color;
            }
        }

        if depth > 0 && material.is_transparent {
            // Reflection side, off the view-facing normal
            let reflect_ray = Ray::new(
                hit_point + EPSILON * shading_normal,
                reflect(ray.direction, shading_normal),
            );

            // Snell setup: flip the interface normal and swap the indices
            // when the ray leaves the object instead of entering it
            let mut boundary_normal = normal;
            let mut cos_in = ray.direction.dot(normal);
            let mut ni = 1.0;
            let mut nt = material.refractive_index;

            if cos_in < 0.0 {
                cos_in = -cos_in;
            } else {
                boundary_normal = -boundary_normal;
                mem::swap(&mut ni, &mut nt);
            }

            let eta = ni / nt;
            let k = 1.0 - eta * eta * (1.0 - cos_in * cos_in);

            let reflected = self.trace(&reflect_ray, depth - 1);

            // k < 0 is total internal reflection: the transmitted branch
            // contributes black but still takes part in the blend
            let refracted = if k >= 0.0 {
                let direction = (eta * ray.direction
                    + (eta * cos_in - k.sqrt()) * boundary_normal)
                    .normalize_or_zero();
                // start just across the surface from the viewer
                let origin = hit_point - EPSILON * shading_normal;
                self.trace(&Ray::new(origin, direction), depth - 1)
            } else {
                Color::ZERO
            };

            // Schlick's approximation for the reflected share
            let kr0 = ((ni - nt) / (ni + nt)).powi(2);
            let kr = kr0 + (1.0 - kr0) * (1.0 - cos_in).powi(5);

            color += kr * reflected + (1.0 - kr) * refracted;
        } else if depth > 0 && material.specular > 0.0 {
            let reflect_ray = Ray::new(
                hit_point + EPSILON * shading_normal,
                reflect(ray.direction, shading_normal),
            );
            color += material.specular * self.trace(&reflect_ray, depth - 1);
        }

        color
    }

    /// Render the scene into `image`.
    ///
    /// Every pixel gets factor^2 sub-rays on a regular grid, traced,
    /// averaged and clamped. Rows are distributed over the rayon pool;
    /// each pixel is a pure function of the scene, so the output does not
    /// depend on scheduling.
    pub fn render(&self, image: &mut Image) {
        let width = image.width();
        let height = image.height();
        if width == 0 || height == 0 {
            return;
        }

        let factor = self.supersampling_factor;
        let offset = 1.0 / (factor as f32 + 1.0);

        log::debug!(
            "rendering {}x{}: {} objects, {} lights, depth {}, {} samples/pixel",
            width,
            height,
            self.objects.len(),
            self.lights.len(),
            self.recursion_depth,
            factor * factor
        );

        image
            .pixels_mut()
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    let mut color = Color::ZERO;

                    for i in 1..=factor {
                        for j in 1..=factor {
                            // y flipped so row 0 is the top of the image;
                            // the image plane sits at z = 0
                            let sample = Vec3::new(
                                x as f32 + offset * j as f32,
                                (height - 1 - y as u32) as f32 + offset * i as f32,
                                0.0,
                            );
                            let ray = Ray::new(self.eye, (sample - self.eye).normalize());
                            color += self.trace(&ray, self.recursion_depth);
                        }
                    }

                    color /= (factor * factor) as f32;
                    *pixel = clamp_color(color);
                }
            });
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use prism_core::{Material, Texture};

    use super::*;
    use crate::quad::Quad;
    use crate::sphere::Sphere;
    use crate::triangle::Triangle;

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    fn matte(color: Color) -> Material {
        Material::new(color, 0.1, 0.8, 0.0, 1.0)
    }

    fn glowing(color: Color) -> Material {
        Material::new(color, 1.0, 0.0, 0.0, 1.0)
    }

    fn backdrop(z: f32) -> Quad {
        Quad::new(
            Vec3::new(-50.0, -50.0, z),
            Vec3::new(50.0, -50.0, z),
            Vec3::new(50.0, 50.0, z),
            Vec3::new(-50.0, 50.0, z),
            glowing(Color::ONE),
        )
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_cast_ray_finds_nearest() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 10.0),
            1.0,
            matte(RED),
        )));
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            matte(BLUE),
        )));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let (object, hit) = scene.cast_ray(&ray).unwrap();
        assert_eq!(hit.t, 4.0);
        assert_eq!(object.material().color, BLUE);
    }

    #[test]
    fn test_cast_ray_tie_keeps_first_added() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            matte(RED),
        )));
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            matte(BLUE),
        )));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let (object, _) = scene.cast_ray(&ray).unwrap();
        assert_eq!(object.material().color, RED);
    }

    #[test]
    fn test_cast_ray_miss() {
        let mut scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert!(scene.cast_ray(&ray).is_none());

        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 50.0, 0.0),
            1.0,
            matte(RED),
        )));
        assert!(scene.cast_ray(&ray).is_none());
    }

    #[test]
    fn test_trace_miss_is_black() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(scene.trace(&ray, 5), Color::ZERO);
    }

    #[test]
    fn test_trace_without_lights_is_ambient_only() {
        let mut scene = Scene::new();
        let color = Color::new(0.5, 0.25, 1.0);
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::new(color, 0.3, 0.8, 0.0, 1.0),
        )));

        let traced = scene.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)), 0);
        assert!((traced - 0.3 * color).length() < 1e-6);
    }

    #[test]
    fn test_depth_zero_never_reflects() {
        // mirror sphere ahead, glowing sphere behind the eye
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::new(Color::ONE, 0.1, 0.0, 0.9, 32.0),
        )));
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            glowing(Color::ONE),
        )));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let local = scene.trace(&ray, 0);
        let with_bounce = scene.trace(&ray, 1);

        assert!((local - 0.1 * Color::ONE).length() < 1e-6);
        assert!(with_bounce.x > local.x);
    }

    #[test]
    fn test_occluded_light_leaves_ambient_only() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::new(Color::ONE, 0.2, 0.8, 0.5, 16.0),
        )));
        // blocker sits halfway between the hit point and the light
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 5.0, -1.0),
            2.0,
            matte(RED),
        )));
        scene.add_light(Light::new(Vec3::new(0.0, 10.0, -6.0), Color::ONE));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));

        scene.set_render_shadows(true);
        let shadowed = scene.trace(&ray, 0);
        assert!((shadowed - 0.2 * Color::ONE).length() < 1e-6);

        scene.set_render_shadows(false);
        let unshadowed = scene.trace(&ray, 0);
        assert!(unshadowed.x > shadowed.x + 0.1);
    }

    #[test]
    fn test_occluder_beyond_light_casts_no_shadow() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::new(Color::ONE, 0.2, 0.8, 0.0, 16.0),
        )));
        // on the shadow ray's line, but farther away than the light
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, -20.0),
            1.0,
            matte(RED),
        )));
        scene.add_light(Light::new(Vec3::new(0.0, 0.0, -5.0), Color::ONE));
        scene.set_render_shadows(true);

        let traced = scene.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)), 0);
        assert!(traced.x > 0.2 + 0.1); // diffuse survived
    }

    #[test]
    fn test_textured_sphere_samples_flipped_v() {
        // 1x2 texture: red on top, blue below; the +z pole has v = 1,
        // which lands on the top row
        let texture = Arc::new(Texture::new(1, 2, vec![RED, BLUE], "<test>"));
        let material = Material::textured(texture, 1.0, 0.0, 0.0, 1.0);

        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            material,
        )));

        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(scene.trace(&ray, 0), RED);
    }

    #[test]
    fn test_texture_without_uv_mapping_falls_back_to_flat_color() {
        let texture = Arc::new(Texture::solid_color(RED));
        let material = Material::textured(texture, 1.0, 0.0, 0.0, 1.0);
        let flat = material.color;

        let mut scene = Scene::new();
        scene.add_object(Arc::new(Triangle::new(
            Vec3::new(-5.0, -5.0, 5.0),
            Vec3::new(5.0, -5.0, 5.0),
            Vec3::new(0.0, 5.0, 5.0),
            material,
        )));

        let traced = scene.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)), 0);
        assert!((traced - flat).length() < 1e-6);
    }

    #[test]
    fn test_glass_transmits_straight_through() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            Material::transparent(Color::ONE, 0.0, 0.0, 0.0, 32.0, 1.5),
        )));
        scene.add_object(Arc::new(backdrop(20.0)));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));

        // the glass itself shades to black here (no ambient, no lights)
        assert_eq!(scene.trace(&ray, 0), Color::ZERO);

        // two interfaces need depth 2; most energy is transmitted.
        // Schlick at normal incidence keeps 4% per interface: 0.96^2
        let through = scene.trace(&ray, 2);
        assert!(through.x > 0.85 && through.x < 0.95, "got {through}");
    }

    #[test]
    fn test_total_internal_reflection_transmits_nothing() {
        let mut scene = Scene::new();
        scene.add_object(Arc::new(Sphere::new(
            Vec3::ZERO,
            1.0,
            Material::transparent(Color::ONE, 0.0, 0.0, 0.0, 32.0, 1.5),
        )));
        scene.add_object(Arc::new(backdrop(20.0)));

        // steep internal hit, past the critical angle: the transmitted
        // branch is black and the internal bounce dies at depth 0
        let tir = scene.trace(&Ray::new(Vec3::new(0.9, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)), 1);
        assert_eq!(tir, Color::ZERO);

        // straight out through the center refracts into the backdrop
        let open = scene.trace(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0)), 1);
        assert!(open.x > 0.5);
    }

    #[test]
    fn test_render_is_deterministic() {
        let mut scene = Scene::new();
        scene.set_eye(Vec3::new(4.0, 4.0, -10.0));
        scene.set_render_shadows(true);
        scene.set_recursion_depth(2);
        scene.set_super_sample(2);
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(4.0, 4.0, 5.0),
            3.0,
            Material::new(RED, 0.2, 0.7, 0.5, 32.0),
        )));
        scene.add_light(Light::new(Vec3::new(-5.0, 20.0, -10.0), Color::ONE));

        let mut first = Image::new(8, 8);
        let mut second = Image::new(8, 8);
        scene.render(&mut first);
        scene.render(&mut second);

        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn test_supersampling_is_noop_on_uniform_pixels() {
        // averaging a constant changes nothing
        let mut scene = Scene::new();
        scene.set_eye(Vec3::new(2.0, 2.0, -5.0));

        let mut single = Image::new(4, 4);
        scene.render(&mut single);

        scene.set_super_sample(2);
        let mut averaged = Image::new(4, 4);
        scene.render(&mut averaged);

        assert_eq!(single.pixels(), averaged.pixels());
    }

    #[test]
    fn test_supersampling_averages_partial_coverage() {
        // single pixel spanning [0,1)^2; a wall covers x >= 0.6, so the
        // centered single sample misses while factor 2 hits half its grid
        let mut scene = Scene::new();
        scene.set_eye(Vec3::new(0.5, 0.5, -5.0));
        scene.add_object(Arc::new(Quad::new(
            Vec3::new(0.6, -1.0, 0.0),
            Vec3::new(2.0, -1.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
            Vec3::new(0.6, 2.0, 0.0),
            glowing(Color::ONE),
        )));

        let mut image = Image::new(1, 1);
        scene.render(&mut image);
        assert_eq!(image.get(0, 0), Color::ZERO);

        scene.set_super_sample(2);
        scene.render(&mut image);
        let pixel = image.get(0, 0);
        assert!(pixel.x > 0.0 && pixel.x < 1.0);
        assert_eq!(pixel, Color::splat(0.5));
    }

    #[test]
    fn test_render_clamps_pixels() {
        let mut scene = Scene::new();
        scene.set_eye(Vec3::new(0.5, 0.5, -5.0));
        scene.add_object(Arc::new(Sphere::new(
            Vec3::new(0.5, 0.5, 2.0),
            1.0,
            Material::new(Color::ONE, 5.0, 0.0, 0.0, 1.0),
        )));

        // trace itself runs unclamped
        let ray = Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(scene.trace(&ray, 0).x > 1.0);

        let mut image = Image::new(1, 1);
        scene.render(&mut image);
        assert_eq!(image.get(0, 0), Color::ONE);
    }

    #[test]
    fn test_scene_counts_and_shared_handles() {
        let mut scene = Scene::new();
        assert_eq!(scene.object_count(), 0);
        assert_eq!(scene.light_count(), 0);

        let sphere = Arc::new(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, matte(RED)));
        scene.add_object(sphere.clone());
        scene.add_light(Light::new(Vec3::ZERO, Color::ONE));

        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(Arc::strong_count(&sphere), 2);
    }
}
