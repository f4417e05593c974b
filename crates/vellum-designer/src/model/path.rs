use glam::{DMat4, DVec3};
use lyon::geom::{point as geom_point, CubicBezierSegment, QuadraticBezierSegment};
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::Point;

/// A flattened, implicitly closed sequence of points.
pub type Ring = Vec<Point>;

/// A single drawing command. Insertion order defines contour topology.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    QuadraticTo {
        to: Point,
        control: Point,
    },
    CubicTo {
        to: Point,
        control1: Point,
        control2: Point,
    },
    Close,
}

impl PathCommand {
    /// Anchor and control points carried by this command.
    pub fn points(&self) -> SmallVec<[Point; 3]> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => smallvec![p],
            PathCommand::QuadraticTo { to, control } => smallvec![to, control],
            PathCommand::CubicTo {
                to,
                control1,
                control2,
            } => smallvec![to, control1, control2],
            PathCommand::Close => SmallVec::new(),
        }
    }

    fn map_points(&self, f: impl Fn(Point) -> Point) -> PathCommand {
        match *self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(f(p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(f(p)),
            PathCommand::QuadraticTo { to, control } => PathCommand::QuadraticTo {
                to: f(to),
                control: f(control),
            },
            PathCommand::CubicTo {
                to,
                control1,
                control2,
            } => PathCommand::CubicTo {
                to: f(to),
                control1: f(control1),
                control2: f(control2),
            },
            PathCommand::Close => PathCommand::Close,
        }
    }
}

/// Ordered drawing commands describing one or more contours.
///
/// The path performs no validation: callers may describe degenerate contours
/// (zero, one or two points) and downstream stages skip them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a closed contour through `points`.
    pub fn from_polygon(points: &[Point]) -> Self {
        let mut path = Self::new();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
            path.close();
        }
        path
    }

    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn quadratic_to(&mut self, point: Point, control: Point) {
        self.commands.push(PathCommand::QuadraticTo { to: point, control });
    }

    pub fn cubic_to(&mut self, point: Point, control1: Point, control2: Point) {
        self.commands.push(PathCommand::CubicTo {
            to: point,
            control1,
            control2,
        });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Every anchor and control point, in command order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|c| c.points())
    }

    /// Appends a vertex to the last contour, keeping its `Close` last.
    pub fn insert_before_close(&mut self, point: Point) {
        match self.commands.last() {
            None => self.move_to(point),
            Some(PathCommand::Close) => {
                let at = self.commands.len() - 1;
                self.commands.insert(at, PathCommand::LineTo(point));
            }
            Some(_) => self.line_to(point),
        }
    }

    /// Applies an affine matrix to every point and control point in place.
    pub fn transform(&mut self, matrix: &DMat4) {
        for cmd in &mut self.commands {
            *cmd = cmd.map_points(|p| apply(matrix, p));
        }
    }

    pub fn transformed(&self, matrix: &DMat4) -> Path {
        let mut path = self.clone();
        path.transform(matrix);
        path
    }

    /// Splits the path into flattened rings.
    ///
    /// One ring is produced per `MoveTo`→`Close` or `MoveTo`→`MoveTo` span.
    /// Curves are flattened to within `tolerance`. A trailing span that is
    /// never terminated is dropped. Short rings are kept as-is.
    pub fn contours(&self, tolerance: f64) -> Vec<Ring> {
        let tolerance = if tolerance > 0.0 && tolerance.is_finite() {
            tolerance
        } else {
            vellum_core::constants::DEFAULT_FLATTEN_TOLERANCE
        };

        let mut rings = Vec::new();
        let mut current: Ring = Vec::new();

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if !current.is_empty() {
                        rings.push(std::mem::take(&mut current));
                    }
                    current.push(p);
                }
                PathCommand::LineTo(p) => current.push(p),
                PathCommand::QuadraticTo { to, control } => match current.last().copied() {
                    Some(from) => {
                        let segment = QuadraticBezierSegment {
                            from: geom_point(from.x, from.y),
                            ctrl: geom_point(control.x, control.y),
                            to: geom_point(to.x, to.y),
                        };
                        current.extend(
                            segment
                                .flattened(tolerance)
                                .map(|p| Point::new(p.x, p.y)),
                        );
                    }
                    None => current.push(to),
                },
                PathCommand::CubicTo {
                    to,
                    control1,
                    control2,
                } => match current.last().copied() {
                    Some(from) => {
                        let segment = CubicBezierSegment {
                            from: geom_point(from.x, from.y),
                            ctrl1: geom_point(control1.x, control1.y),
                            ctrl2: geom_point(control2.x, control2.y),
                            to: geom_point(to.x, to.y),
                        };
                        current.extend(
                            segment
                                .flattened(tolerance)
                                .map(|p| Point::new(p.x, p.y)),
                        );
                    }
                    None => current.push(to),
                },
                PathCommand::Close => rings.push(std::mem::take(&mut current)),
            }
        }

        rings
    }
}

fn apply(matrix: &DMat4, p: Point) -> Point {
    let v = matrix.transform_point3(DVec3::new(p.x, p.y, 0.0));
    Point::new(v.x, v.y)
}
