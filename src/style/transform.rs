use kurbo::{Affine, Vec2};

use crate::feature::Feature;

/// Numeric argument of a transform node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(f64),
    /// Feature attribute; missing or non-numeric values evaluate to 0
    Attribute(String),
}

impl Expr {
    pub fn attr(name: impl Into<String>) -> Self {
        Expr::Attribute(name.into())
    }

    pub fn evaluate(&self, feature: &Feature) -> f64 {
        match self {
            Expr::Literal(v) => *v,
            Expr::Attribute(name) => feature.get(name).and_then(|v| v.to_f64()).unwrap_or(0.0),
        }
    }
}

impl From<f64> for Expr {
    fn from(v: f64) -> Self {
        Expr::Literal(v)
    }
}

/// One step of a symbolizer transform. Angles are in degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformNode {
    /// a, b, c, d, e, f as in SVG `matrix()`
    Matrix([Expr; 6]),
    Translate(Expr, Option<Expr>),
    Scale(Expr, Option<Expr>),
    Rotate {
        angle: Expr,
        center: Option<(Expr, Expr)>,
    },
    SkewX(Expr),
    SkewY(Expr),
}

impl TransformNode {
    /// Translation components are multiplied by `scale_factor`; scale, rotation
    /// and skew are not.
    fn to_affine(&self, feature: &Feature, scale_factor: f64) -> Affine {
        let eval = |e: &Expr| e.evaluate(feature);
        match self {
            TransformNode::Matrix(m) => Affine::new([
                eval(&m[0]),
                eval(&m[1]),
                eval(&m[2]),
                eval(&m[3]),
                eval(&m[4]) * scale_factor,
                eval(&m[5]) * scale_factor,
            ]),
            TransformNode::Translate(tx, ty) => {
                let tx = eval(tx);
                let ty = ty.as_ref().map(eval).unwrap_or(0.0);
                Affine::translate(Vec2::new(tx * scale_factor, ty * scale_factor))
            }
            TransformNode::Scale(sx, sy) => {
                let sx = eval(sx);
                let sy = sy.as_ref().map(eval).unwrap_or(sx);
                Affine::scale_non_uniform(sx, sy)
            }
            TransformNode::Rotate { angle, center } => {
                let rotation = Affine::rotate(eval(angle).to_radians());
                match center {
                    Some((cx, cy)) => {
                        let c = Vec2::new(eval(cx) * scale_factor, eval(cy) * scale_factor);
                        Affine::translate(c) * rotation * Affine::translate(-c)
                    }
                    None => rotation,
                }
            }
            TransformNode::SkewX(angle) => {
                Affine::new([1.0, 0.0, eval(angle).to_radians().tan(), 1.0, 0.0, 0.0])
            }
            TransformNode::SkewY(angle) => {
                Affine::new([1.0, eval(angle).to_radians().tan(), 0.0, 1.0, 0.0, 0.0])
            }
        }
    }
}

/// Ordered transform list, composed left to right as in SVG: the last node
/// is applied to points first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformList(pub Vec<TransformNode>);

impl TransformList {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn then(mut self, node: TransformNode) -> Self {
        self.0.push(node);
        self
    }

    /// Resolves the list against a feature into a concrete affine.
    pub fn evaluate(&self, feature: &Feature, scale_factor: f64) -> Affine {
        self.0
            .iter()
            .fold(Affine::IDENTITY, |acc, node| acc * node.to_affine(feature, scale_factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn empty_list_is_identity() {
        let feature = Feature::new(1);
        assert_eq!(TransformList::new().evaluate(&feature, 2.0), Affine::IDENTITY);
    }

    #[test]
    fn translation_is_scaled() {
        let feature = Feature::new(1);
        let list =
            TransformList::new().then(TransformNode::Translate(3.0.into(), Some(4.0.into())));
        let p = list.evaluate(&feature, 2.0) * Point::ZERO;
        assert!(close(p, Point::new(6.0, 8.0)));
    }

    #[test]
    fn nodes_compose_like_svg() {
        // translate(10, 0) rotate(90): rotate first, then move
        let feature = Feature::new(1);
        let list = TransformList::new()
            .then(TransformNode::Translate(10.0.into(), None))
            .then(TransformNode::Rotate { angle: 90.0.into(), center: None });
        let p = list.evaluate(&feature, 1.0) * Point::new(1.0, 0.0);
        assert!(close(p, Point::new(10.0, 1.0)));
    }

    #[test]
    fn attributes_drive_arguments() {
        let feature = Feature::new(1).with_attribute("angle", 180.0).with_attribute("label", "x");
        let list = TransformList::new().then(TransformNode::Rotate {
            angle: Expr::attr("angle"),
            center: Some((1.0.into(), 0.0.into())),
        });
        let p = list.evaluate(&feature, 1.0) * Point::new(2.0, 0.0);
        assert!(close(p, Point::new(0.0, 0.0)));

        // non-numeric attributes evaluate to zero
        let list = TransformList::new().then(TransformNode::Scale(Expr::attr("label"), None));
        let p = list.evaluate(&feature, 1.0) * Point::new(5.0, 5.0);
        assert!(close(p, Point::ZERO));
    }

    #[test]
    fn matrix_translation_is_scaled() {
        let feature = Feature::new(1);
        let m = [1.0, 0.0, 0.0, 1.0, 5.0, 7.0].map(Expr::from);
        let list = TransformList::new().then(TransformNode::Matrix(m));
        let affine = list.evaluate(&feature, 2.0);
        assert!(close(affine * Point::ZERO, Point::new(10.0, 14.0)));
        // the linear part is left alone
        assert!(close(affine * Point::new(1.0, 1.0), Point::new(11.0, 15.0)));
    }

    #[test]
    fn skews_take_degrees() {
        let feature = Feature::new(1).with_attribute("skew", 45.0);
        let skew_x = TransformList::new().then(TransformNode::SkewX(Expr::attr("skew")));
        assert!(close(skew_x.evaluate(&feature, 1.0) * Point::new(0.0, 1.0), Point::new(1.0, 1.0)));

        let skew_y = TransformList::new().then(TransformNode::SkewY(45.0.into()));
        assert!(close(skew_y.evaluate(&feature, 3.0) * Point::new(1.0, 0.0), Point::new(1.0, 1.0)));
    }
}
