//! # drape-contact
//!
//! Collision response of cloth particles against the ground plane and a
//! body described by a signed distance field.
//!
//! Both colliders push penetrating particles out along a surface normal
//! and rewrite their previous position, so the velocity implied by the
//! next Verlet step already carries friction and restitution.
//!
//! ## Key Types
//!
//! - [`GroundPlane`]: Horizontal plane, always active.
//! - [`BodyCollider`]: Owns the optional body [`SdfGrid`](drape_sdf::SdfGrid).
//! - [`CollisionParams`]: Friction, restitution, contact thickness.
//! - [`CollisionPipeline`]: Ground, then body.

pub mod body;
pub mod collision_pipeline;
pub mod ground_plane;
pub mod params;
pub mod response;

pub use body::BodyCollider;
pub use collision_pipeline::{CollisionPipeline, CollisionStepResult};
pub use ground_plane::GroundPlane;
pub use params::CollisionParams;
pub use response::{respond, ContactResult};
