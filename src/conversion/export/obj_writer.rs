use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use glam::{Mat3, Vec3};
use itertools::Itertools;
use log::debug;

use crate::conversion::common::types::{MaterialData, MeshData};
use crate::conversion::export::SceneBuilder;
use crate::error::ConversionError;
use crate::io::index::AssetIndex;

struct ObjInstance {
    name: String,
    mesh: usize,
    position: Vec3,
    rotation: Mat3,
}

struct ObjMesh {
    mesh: MeshData,
    /// Index into `ObjSceneWriter::materials` per mesh material
    materials: Vec<usize>,
}

/// Writes the scene as Wavefront OBJ plus a MTL library next to it. Instances are baked, every
/// instance becomes its own `o` block.
#[derive(Default)]
pub struct ObjSceneWriter<'a> {
    textures: Option<&'a AssetIndex>,
    meshes: Vec<ObjMesh>,
    instances: Vec<ObjInstance>,
    materials: Vec<(String, MaterialData)>,
    material_lookup: HashMap<String, usize>,
}

impl<'a> ObjSceneWriter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve texture names through the index, missing textures fall back to the default one.
    pub fn with_textures(index: &'a AssetIndex) -> Self {
        Self {
            textures: Some(index),
            ..Self::default()
        }
    }

    fn material(&mut self, material: &MaterialData) -> usize {
        let key = format!("{}|{:?}|{:?}", material.name, material.color.to_array(), material.texture);
        if let Some(&index) = self.material_lookup.get(&key) {
            return index;
        }

        let unique_name = format!("{}_{}", sanitize(&material.name), self.materials.len());
        self.materials.push((unique_name, material.clone()));
        self.material_lookup.insert(key, self.materials.len() - 1);
        self.materials.len() - 1
    }

    pub fn write_obj<W: Write>(&self, w: &mut W, material_library: &str) -> std::io::Result<()> {
        writeln!(w, "mtllib {}", material_library)?;

        let (mut vertex_offset, mut corner_offset) = (1usize, 1usize);
        for instance in &self.instances {
            let Some(obj_mesh) = self.meshes.get(instance.mesh) else {
                continue;
            };
            let mesh = &obj_mesh.mesh;

            writeln!(w, "o {}", sanitize(&instance.name))?;
            for vertex in &mesh.vertices {
                let v = instance.rotation * *vertex + instance.position;
                writeln!(w, "v {} {} {}", v.x, v.y, v.z)?;
            }
            for uv in &mesh.uvs {
                writeln!(w, "vt {} {}", uv.x, uv.y)?;
            }
            for normal in &mesh.normals {
                let n = instance.rotation * *normal;
                writeln!(w, "vn {} {} {}", n.x, n.y, n.z)?;
            }

            let mut current_material = None;
            for (face_index, face) in mesh.faces.iter().enumerate() {
                let material = mesh
                    .material_indices
                    .get(face_index)
                    .and_then(|&index| obj_mesh.materials.get(index as usize));
                if material != current_material {
                    if let Some(&material) = material {
                        writeln!(w, "usemtl {}", self.materials[material].0)?;
                    }
                    current_material = material;
                }

                let corners = face
                    .iter()
                    .enumerate()
                    .map(|(corner, &vertex)| {
                        let corner = corner_offset + face_index * 3 + corner;
                        format!("{}/{}/{}", vertex_offset + vertex as usize, corner, corner)
                    })
                    .join(" ");
                writeln!(w, "f {}", corners)?;
            }

            vertex_offset += mesh.vertices.len();
            corner_offset += mesh.faces.len() * 3;
        }

        Ok(())
    }

    pub fn write_mtl<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for (name, material) in &self.materials {
            writeln!(w, "newmtl {}", name)?;
            writeln!(w, "Kd {} {} {}", material.color.x, material.color.y, material.color.z)?;
            writeln!(w, "d {}", material.color.w)?;

            let texture = match (self.textures, &material.texture) {
                (Some(index), Some(texture)) => Some(index.texture(texture)),
                (None, Some(texture)) => Some(texture.clone()),
                (_, None) => None,
            };
            if let Some(texture) = texture {
                writeln!(w, "map_Kd {}", texture)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}

impl SceneBuilder for ObjSceneWriter<'_> {
    type MeshHandle = usize;

    fn create_mesh_resource(&mut self, name: &str, mesh: &MeshData) -> Result<usize, ConversionError> {
        debug!("Creating mesh resource {}: {:?}", name, mesh);
        let materials = mesh.materials.iter().map(|m| self.material(m)).collect_vec();
        self.meshes.push(ObjMesh {
            mesh: mesh.clone(),
            materials,
        });
        Ok(self.meshes.len() - 1)
    }

    fn create_instance(
        &mut self,
        name: &str,
        mesh: &usize,
        position: Vec3,
        rotation: Mat3,
    ) -> Result<(), ConversionError> {
        if *mesh >= self.meshes.len() {
            return Err(ConversionError::MeshResolution {
                object: name.to_string(),
                reason: format!("unknown mesh resource {}", mesh),
            });
        }

        self.instances.push(ObjInstance {
            name: name.to_string(),
            mesh: *mesh,
            position,
            rotation,
        });
        Ok(())
    }

    fn persist(&mut self, path: &Path) -> Result<(), ConversionError> {
        let mtl_path = path.with_extension("mtl");
        let mtl_name = mtl_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        write_file(path, |w| self.write_obj(w, &mtl_name))?;
        write_file(&mtl_path, |w| self.write_mtl(w))?;
        Ok(())
    }
}

fn write_file<F>(target: &Path, content: F) -> Result<(), ConversionError>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(target).map_err(|err| ConversionError::io(target.display().to_string(), &err))?;
    let mut writer = BufWriter::new(file);
    content(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|err| ConversionError::io(target.display().to_string(), &err))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c.is_whitespace() {
            true => '_',
            false => c,
        })
        .collect()
}
