use hashbrown::HashMap;

/// Get-or-create cache of backend font faces keyed by face name.
///
/// Misses are remembered too, so a face that cannot be loaded is asked for
/// (and warned about) only once.
#[derive(Debug)]
pub struct FaceCache<F> {
    faces: HashMap<String, Option<F>>,
}

impl<F> Default for FaceCache<F> {
    fn default() -> Self {
        Self {
            faces: HashMap::new(),
        }
    }
}

impl<F> FaceCache<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached face for `name`, calling `load` on first use.
    pub fn get_or_load(&mut self, name: &str, load: impl FnOnce(&str) -> Option<F>) -> Option<&F> {
        if !self.faces.contains_key(name) {
            let face = load(name);
            if face.is_none() {
                log::warn!("font face '{}' unavailable, using backend default", name);
            }
            self.faces.insert(name.to_string(), face);
        }
        self.faces.get(name).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn clear(&mut self) {
        self.faces.clear();
    }
}
