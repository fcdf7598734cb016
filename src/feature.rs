//! Features as handed to the renderer: geometry paths plus attributes.
//!
//! Features are owned by the upstream feature source and are read-only here.

use hashbrown::HashMap;
use kurbo::{Point, Rect};

/// Segment command attached to a vertex.
///
/// `Unknown` carries raw command codes from sources that speak a wider
/// vocabulary. Consumers skip such vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveTo,
    LineTo,
    Close,
    End,
    Unknown(u8),
}

impl Command {
    /// Decodes the toolkit's numeric command codes.
    pub fn from_raw(code: u8) -> Command {
        match code {
            0 => Command::End,
            1 => Command::MoveTo,
            2 => Command::LineTo,
            0x4f => Command::Close,
            other => Command::Unknown(other),
        }
    }

    pub fn is_vertex(self) -> bool {
        matches!(self, Command::MoveTo | Command::LineTo)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub cmd: Command,
}

impl Vertex {
    pub fn new(x: f64, y: f64, cmd: Command) -> Self {
        Self { x, y, cmd }
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

/// One geometry path: an ordered vertex sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub kind: GeometryKind,
    vertices: Vec<Vertex>,
}

impl Geometry {
    pub fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
        }
    }

    pub fn from_vertices(kind: GeometryKind, vertices: Vec<Vertex>) -> Self {
        Self { kind, vertices }
    }

    /// An open polyline through `points`.
    pub fn line_string(points: &[(f64, f64)]) -> Self {
        let mut geom = Self::new(GeometryKind::LineString);
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                geom.move_to(x, y);
            } else {
                geom.line_to(x, y);
            }
        }
        geom
    }

    /// A single closed ring through `points`.
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        let mut geom = Self::line_string(points);
        geom.kind = GeometryKind::Polygon;
        if !points.is_empty() {
            geom.close();
        }
        geom
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push(Vertex::new(x, y, Command::MoveTo));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push(Vertex::new(x, y, Command::LineTo));
    }

    pub fn close(&mut self) {
        self.vertices.push(Vertex::new(0.0, 0.0, Command::Close));
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Number of positioned points (move-to and line-to vertices).
    pub fn num_points(&self) -> usize {
        self.vertices.iter().filter(|v| v.cmd.is_vertex()).count()
    }

    /// Bounding box of the positioned points, `None` when there are none.
    pub fn envelope(&self) -> Option<Rect> {
        let mut points = self.vertices.iter().filter(|v| v.cmd.is_vertex());
        let first = points.next()?;
        let start = Rect::from_points(first.point(), first.point());
        Some(points.fold(start, |acc, v| acc.union_pt(v.point())))
    }
}

/// Attribute value of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Numeric view of the value. Strings are parsed; anything else that is not
    /// a number yields `None`.
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: u64,
    paths: Vec<Geometry>,
    attributes: HashMap<String, Value>,
}

impl Feature {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            paths: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_path(mut self, geom: Geometry) -> Self {
        self.paths.push(geom);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn add_path(&mut self, geom: Geometry) {
        self.paths.push(geom);
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn paths(&self) -> &[Geometry] {
        &self.paths
    }

    /// Union of all path envelopes.
    pub fn envelope(&self) -> Option<Rect> {
        self.paths
            .iter()
            .filter_map(Geometry::envelope)
            .reduce(|a, b| a.union(b))
    }
}
