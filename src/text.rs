//! Label placement types and the collaborators that produce them.
//!
//! Text layout and overlap testing live outside this crate. The renderer
//! consumes their results through [`LayoutEngine`] and [`PlacementFinder`],
//! and shares a [`CollisionDetector`] with them for a whole map pass.

mod collision;
mod face_cache;
mod layout;
mod placement;

pub use collision::{CollisionDetector, LabelCollisionDetector};
pub use face_cache::FaceCache;
pub use layout::{LabelRequest, LayoutEngine, PlacementFinder};
pub use placement::{GlyphNode, Placement};
