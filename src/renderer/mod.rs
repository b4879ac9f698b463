//! WebGPU rendering module
//!
//! `layout` and `scene` are pure and platform independent; `pipeline` uploads
//! the scene's triangles each frame.

pub mod layout;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use layout::{Layout, Rect};
pub use pipeline::RenderState;
pub use scene::{Scene, SceneStyle};
