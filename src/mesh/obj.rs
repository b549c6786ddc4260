use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;

use crate::error::{HeartError, ObjErrorKind};
use crate::mesh::{Mesh, MeshVertex, DEFAULT_COLOR};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub position: usize,
    pub normal: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct ObjGroup {
    pub material: Option<String>,
    pub triangles: Vec<[Corner; 3]>,
}

/// The parts of an OBJ file the renderer needs, with indices resolved to zero-based
#[derive(Debug, Clone, Default)]
pub struct ObjModel {
    pub material_library: Option<String>,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub groups: Vec<ObjGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: [f32; 3],
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        let [r, g, b, a] = DEFAULT_COLOR;
        Self {
            diffuse: [r, g, b],
            opacity: a,
        }
    }
}

impl Material {
    pub fn color(&self) -> [f32; 4] {
        let [r, g, b] = self.diffuse;
        [r, g, b, self.opacity]
    }
}

pub type MaterialLibrary = HashMap<String, Material>;

fn obj_error(line: usize, kind: ObjErrorKind) -> HeartError {
    HeartError::Obj { line, kind }
}

fn parse_floats<const N: usize>(
    line: usize,
    statement: &'static str,
    args: &mut std::str::SplitWhitespace,
) -> Result<[f32; N], HeartError> {
    let mut values = [0.0; N];
    for value in values.iter_mut() {
        let word = args
            .next()
            .ok_or_else(|| obj_error(line, ObjErrorKind::MissingArguments(statement)))?;
        *value = word
            .parse()
            .map_err(|_| obj_error(line, ObjErrorKind::BadNumber(word.to_string())))?;
    }
    Ok(values)
}

/// One-based, or negative counting back from the latest element
fn resolve_index(line: usize, word: &str, count: usize) -> Result<usize, HeartError> {
    let index: i64 = word
        .parse()
        .map_err(|_| obj_error(line, ObjErrorKind::BadIndex(word.to_string())))?;
    let resolved = match index {
        0 => None,
        positive if positive > 0 => Some(positive - 1),
        negative => Some(count as i64 + negative),
    };
    match resolved {
        Some(resolved) if (0..count as i64).contains(&resolved) => Ok(resolved as usize),
        _ => Err(obj_error(line, ObjErrorKind::IndexOutOfRange { index, count })),
    }
}

fn parse_corner(line: usize, word: &str, model: &ObjModel) -> Result<Corner, HeartError> {
    let mut parts = word.split('/');
    let position = match parts.next() {
        Some(part) if !part.is_empty() => resolve_index(line, part, model.positions.len())?,
        _ => return Err(obj_error(line, ObjErrorKind::BadIndex(word.to_string()))),
    };
    let _texture = parts.next();
    let normal = match parts.next() {
        Some(part) if !part.is_empty() => Some(resolve_index(line, part, model.normals.len())?),
        _ => None,
    };
    if parts.next().is_some() {
        return Err(obj_error(line, ObjErrorKind::BadIndex(word.to_string())));
    }
    Ok(Corner { position, normal })
}

impl ObjModel {
    fn group_for(&mut self, material: &Option<String>) -> &mut ObjGroup {
        let index = match self.groups.iter().position(|group| &group.material == material) {
            Some(index) => index,
            None => {
                self.groups.push(ObjGroup {
                    material: material.clone(),
                    triangles: Vec::new(),
                });
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(|group| group.triangles.len()).sum()
    }

    /// One mesh per material group that has triangles
    pub fn into_meshes(self, materials: &MaterialLibrary) -> Vec<Mesh> {
        let ObjModel {
            positions,
            normals,
            groups,
            ..
        } = self;
        groups
            .into_iter()
            .filter(|group| !group.triangles.is_empty())
            .map(|group| {
                let color = group
                    .material
                    .as_ref()
                    .and_then(|name| materials.get(name))
                    .copied()
                    .unwrap_or_default()
                    .color();
                let mut vertices = Vec::with_capacity(group.triangles.len() * 3);
                for triangle in &group.triangles {
                    let [a, b, c] = triangle.map(|corner| positions[corner.position]);
                    let face_normal = (b - a).cross(c - a).normalize_or_zero();
                    for corner in triangle {
                        let normal = corner
                            .normal
                            .map(|index| normals[index].normalize_or_zero())
                            .unwrap_or(face_normal);
                        vertices.push(MeshVertex {
                            position: positions[corner.position].to_array(),
                            normal: normal.to_array(),
                        });
                    }
                }
                let indices = (0..vertices.len() as u32).collect();
                Mesh {
                    material: group.material,
                    vertices,
                    indices,
                    color,
                }
            })
            .collect()
    }
}

pub fn parse_obj(source: &str) -> Result<ObjModel, HeartError> {
    let mut model = ObjModel::default();
    let mut material: Option<String> = None;
    for (number, text) in source.lines().enumerate() {
        let line = number + 1;
        let text = text.split('#').next().unwrap_or_default();
        let mut args = text.split_whitespace();
        let Some(statement) = args.next() else {
            continue;
        };
        match statement {
            "v" => {
                let [x, y, z] = parse_floats::<3>(line, "v", &mut args)?;
                model.positions.push(Vec3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(line, "vn", &mut args)?;
                model.normals.push(Vec3::new(x, y, z));
            }
            "f" => {
                let corners = args
                    .map(|word| parse_corner(line, word, &model))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(obj_error(
                        line,
                        ObjErrorKind::DegenerateFace {
                            corners: corners.len(),
                        },
                    ));
                }
                let group = model.group_for(&material);
                for pair in corners[1..].windows(2) {
                    group.triangles.push([corners[0], pair[0], pair[1]]);
                }
            }
            "usemtl" => {
                material = Some(rest_of_line(line, "usemtl", args)?);
            }
            "mtllib" => {
                model.material_library = Some(rest_of_line(line, "mtllib", args)?);
            }
            _ => {}
        }
    }
    Ok(model)
}

fn rest_of_line(
    line: usize,
    statement: &'static str,
    args: std::str::SplitWhitespace,
) -> Result<String, HeartError> {
    let words: Vec<&str> = args.collect();
    if words.is_empty() {
        return Err(obj_error(line, ObjErrorKind::MissingArguments(statement)));
    }
    Ok(words.join(" "))
}

pub fn parse_mtl(source: &str) -> Result<MaterialLibrary, HeartError> {
    let mut library = MaterialLibrary::new();
    let mut current: Option<String> = None;
    for (number, text) in source.lines().enumerate() {
        let line = number + 1;
        let text = text.split('#').next().unwrap_or_default();
        let mut args = text.split_whitespace();
        let Some(statement) = args.next() else {
            continue;
        };
        if statement == "newmtl" {
            let name = rest_of_line(line, "newmtl", args)?;
            library.insert(name.clone(), Material::default());
            current = Some(name);
            continue;
        }
        let Some(material) = current.as_ref().and_then(|name| library.get_mut(name)) else {
            continue;
        };
        match statement {
            "Kd" => material.diffuse = parse_floats::<3>(line, "Kd", &mut args)?,
            "d" => {
                let [opacity] = parse_floats::<1>(line, "d", &mut args)?;
                material.opacity = opacity;
            }
            "Tr" => {
                let [transparency] = parse_floats::<1>(line, "Tr", &mut args)?;
                material.opacity = 1.0 - transparency;
            }
            _ => {}
        }
    }
    Ok(library)
}

fn read(path: &Path) -> Result<String, HeartError> {
    fs::read_to_string(path).map_err(|err| HeartError::io(path, err))
}

/// Read an OBJ file and its materials into drawable meshes.
///
/// An explicit `material_path` wins over the `mtllib` inside the file. A
/// material library that can't be read only costs the colors.
pub fn load_model(obj_path: &Path, material_path: Option<&Path>) -> Result<Vec<Mesh>, HeartError> {
    let model = parse_obj(&read(obj_path)?)?;
    let library_path: Option<PathBuf> = match material_path {
        Some(path) => Some(path.to_path_buf()),
        None => model.material_library.as_ref().map(|name| {
            obj_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(name)
        }),
    };
    let materials = match library_path {
        None => MaterialLibrary::new(),
        Some(path) => match read(&path) {
            Ok(source) => parse_mtl(&source)?,
            Err(err) => {
                log::warn!("Using default colors: {err}");
                MaterialLibrary::new()
            }
        },
    };
    let meshes = model.into_meshes(&materials);
    if meshes.is_empty() {
        return Err(HeartError::NoActors {
            path: obj_path.to_path_buf(),
        });
    }
    Ok(meshes)
}
