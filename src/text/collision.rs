use kurbo::Rect;

/// Tracks screen regions already occupied by labels.
///
/// Within one map pass the occupied set only grows; [`clear`](Self::clear)
/// belongs to the caller, between passes.
pub trait CollisionDetector {
    /// Area labels may occupy.
    fn extent(&self) -> Rect;

    /// True if `bbox` fits inside the extent without touching any occupied box.
    fn has_placement(&self, bbox: Rect) -> bool;

    fn insert(&mut self, bbox: Rect);

    /// Number of occupied boxes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

/// Collision detector over a flat list of occupied boxes.
#[derive(Debug, Clone)]
pub struct LabelCollisionDetector {
    extent: Rect,
    boxes: Vec<Rect>,
}

impl LabelCollisionDetector {
    pub fn new(extent: Rect) -> Self {
        Self {
            extent,
            boxes: Vec::new(),
        }
    }

    /// Detector covering a `width` x `height` map grown by `buffer` pixels on every side.
    pub fn for_map(width: u32, height: u32, buffer: f64) -> Self {
        Self::new(Rect::new(
            -buffer,
            -buffer,
            width as f64 + buffer,
            height as f64 + buffer,
        ))
    }

    pub fn boxes(&self) -> &[Rect] {
        &self.boxes
    }
}

fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

impl CollisionDetector for LabelCollisionDetector {
    fn extent(&self) -> Rect {
        self.extent
    }

    fn has_placement(&self, bbox: Rect) -> bool {
        let inside = bbox.x0 >= self.extent.x0
            && bbox.y0 >= self.extent.y0
            && bbox.x1 <= self.extent.x1
            && bbox.y1 <= self.extent.y1;
        inside && !self.boxes.iter().any(|b| overlaps(b, &bbox))
    }

    fn insert(&mut self, bbox: Rect) {
        self.boxes.push(bbox);
    }

    fn len(&self) -> usize {
        self.boxes.len()
    }

    fn clear(&mut self) {
        self.boxes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_boxes_block_overlaps() {
        let mut detector = LabelCollisionDetector::for_map(100, 100, 0.0);
        let a = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(detector.has_placement(a));
        detector.insert(a);
        assert!(!detector.has_placement(Rect::new(15.0, 15.0, 25.0, 25.0)));
        // touching edges do not collide
        assert!(detector.has_placement(Rect::new(20.0, 10.0, 30.0, 20.0)));
        assert_eq!(detector.len(), 1);
    }

    #[test]
    fn buffer_extends_the_usable_area() {
        let tight = LabelCollisionDetector::for_map(100, 100, 0.0);
        let buffered = LabelCollisionDetector::for_map(100, 100, 10.0);
        let edge = Rect::new(-5.0, 0.0, 5.0, 10.0);
        assert!(!tight.has_placement(edge));
        assert!(buffered.has_placement(edge));
    }

    #[test]
    fn clear_empties() {
        let mut detector = LabelCollisionDetector::for_map(10, 10, 0.0);
        detector.insert(Rect::new(0.0, 0.0, 1.0, 1.0));
        detector.clear();
        assert!(detector.is_empty());
    }
}
