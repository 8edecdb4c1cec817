//! Triangulated OBJ ingestion.
//!
//! Parsing is delegated to `tobj`; this module only flattens the parsed
//! models into the `[Vec3; 3]` triangle list the mesh primitive consumes.
//! Normals and texture coordinates in the file are ignored, the renderer
//! shades meshes with face normals.

use std::path::Path;

use glam::Vec3;
use thiserror::Error;

/// Errors that can occur while ingesting an OBJ file.
#[derive(Error, Debug)]
pub enum ObjError {
    #[error("failed to parse OBJ: {0}")]
    Parse(#[from] tobj::LoadError),
}

/// Load a triangulated OBJ as a flat list of triangle vertex positions.
///
/// Every face is triangulated by the loader, so each returned entry is one
/// triangle with its three corners in file winding order. An OBJ without
/// faces loads as an empty list.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<[Vec3; 3]>, ObjError> {
    let path = path.as_ref();

    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options)?;

    let mut triangles = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let start = triangles.len();

        for face in mesh.indices.chunks_exact(3) {
            match (
                position(mesh, face[0]),
                position(mesh, face[1]),
                position(mesh, face[2]),
            ) {
                (Some(a), Some(b), Some(c)) => triangles.push([a, b, c]),
                _ => log::warn!("model '{}': vertex index out of range, face skipped", model.name),
            }
        }

        log::debug!("model '{}': {} triangles", model.name, triangles.len() - start);
    }

    log::info!("loaded {}: {} triangles", path.display(), triangles.len());
    Ok(triangles)
}

/// Fetch one vertex position from a parsed mesh.
fn position(mesh: &tobj::Mesh, index: u32) -> Option<Vec3> {
    let i = index as usize * 3;
    let xyz = mesh.positions.get(i..i + 3)?;
    Some(Vec3::new(xyz[0], xyz[1], xyz[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_single_triangle() {
        let path = write_temp_obj(
            "prism_obj_single_triangle.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
        );

        let triangles = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0][0], Vec3::ZERO);
        assert_eq!(triangles[0][1], Vec3::X);
        assert_eq!(triangles[0][2], Vec3::Y);
    }

    #[test]
    fn test_quad_face_triangulates() {
        let path = write_temp_obj(
            "prism_obj_quad_face.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );

        let triangles = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_obj("/definitely/not/here.obj").is_err());
    }
}
