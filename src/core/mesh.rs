use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use glam::Vec3;
use thiserror::Error;

use crate::core::color::Color;
use crate::error::ViewerError;

/// An undirected edge between two vertex indices, stored with `a < b` so the
/// same edge reached from two neighbouring faces compares equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    /// Returns `None` for a self pair.
    pub fn new(i: usize, j: usize) -> Option<Self> {
        if i == j {
            return None;
        }
        Some(Edge {
            a: i.min(j),
            b: i.max(j),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vec3>, // Model space, y already flipped to screen-down
    pub edges: BTreeSet<Edge>,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("vertex needs 3 coordinates, found {0}")]
    MissingCoordinates(usize),
    #[error("invalid vertex coordinate {0:?}")]
    InvalidCoordinate(String),
    #[error("face needs at least 3 vertices, found {0}")]
    TooFewFaceVertices(usize),
    #[error("invalid face vertex reference {0:?}")]
    InvalidIndex(String),
    #[error("face references vertex {index} but only {defined} are defined")]
    IndexOutOfRange { index: i64, defined: usize },
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            vertices: Vec::new(),
            edges: BTreeSet::new(),
            color: Color::default(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Parses the `o`, `v` and `f` directives of an OBJ document. Every other
    /// line (comments, normals, texture coords, groups...) is skipped.
    ///
    /// Faces contribute their closed boundary to the edge set. Face references
    /// are 1-based, or negative to count back from the latest vertex, and only
    /// the first slash field of each reference is read.
    pub fn parse(content: &str) -> Result<Mesh, ParseError> {
        let mut mesh = Mesh::new();

        for (i, line) in content.lines().enumerate() {
            let line_no = i + 1;
            let err = |kind| ParseError {
                line: line_no,
                kind,
            };

            let trimmed = line.trim();
            let mut tokens = trimmed.split_whitespace();
            match tokens.next() {
                Some("o") => {
                    mesh.name = trimmed[1..].trim().to_string();
                }
                Some("v") => {
                    let coords: Vec<&str> = tokens.take(3).collect();
                    if coords.len() < 3 {
                        return Err(err(ParseErrorKind::MissingCoordinates(coords.len())));
                    }
                    let mut xyz = [0.0f32; 3];
                    for (slot, raw) in xyz.iter_mut().zip(&coords) {
                        *slot = raw
                            .parse()
                            .map_err(|_| err(ParseErrorKind::InvalidCoordinate(raw.to_string())))?;
                    }
                    mesh.vertices.push(Vec3::new(xyz[0], -xyz[1], xyz[2]));
                }
                Some("f") => {
                    let indices = tokens
                        .map(|tok| resolve_index(tok, mesh.vertices.len()))
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(err)?;
                    if indices.len() < 3 {
                        return Err(err(ParseErrorKind::TooFewFaceVertices(indices.len())));
                    }
                    mesh.add_face(&indices);
                }
                _ => {}
            }
        }

        Ok(mesh)
    }

    /// Reads and parses an OBJ file. The mesh keeps the default color.
    pub fn from_obj(path: &Path) -> crate::Result<Mesh> {
        let content = fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
        Mesh::parse(&content).map_err(|source| ViewerError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Inserts the closed polygon boundary `i0 -> i1 -> ... -> iN -> i0`.
    fn add_face(&mut self, indices: &[usize]) {
        let closing = indices.last().zip(indices.first());
        let edges = indices
            .windows(2)
            .map(|w| (w[0], w[1]))
            .chain(closing.map(|(&last, &first)| (last, first)))
            .filter_map(|(i, j)| Edge::new(i, j));
        self.edges.extend(edges);
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_index(token: &str, defined: usize) -> Result<usize, ParseErrorKind> {
    let first = token.split('/').next().unwrap_or_default();
    let index: i64 = first
        .parse()
        .map_err(|_| ParseErrorKind::InvalidIndex(token.to_string()))?;

    let resolved = match index {
        0 => return Err(ParseErrorKind::InvalidIndex(token.to_string())),
        i if i > 0 => i - 1,
        i => defined as i64 + i,
    };
    if resolved < 0 || resolved >= defined as i64 {
        return Err(ParseErrorKind::IndexOutOfRange { index, defined });
    }
    Ok(resolved as usize)
}
