//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.81;

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Default number of relaxation iterations per constraint set.
pub const DEFAULT_ITERATIONS: u32 = 5;

/// Lower bound for relaxation iterations per constraint set.
pub const MIN_ITERATIONS: u32 = 2;

/// Upper bound for relaxation iterations per constraint set.
pub const MAX_ITERATIONS: u32 = 10;

/// Default velocity damping (fraction of velocity removed per tick).
pub const DEFAULT_DAMPING: f32 = 0.01;

/// Default per-particle mass (kg).
pub const DEFAULT_PARTICLE_MASS: f32 = 0.01;

/// Default stiffness of structural (stretch) constraints.
pub const DEFAULT_STRUCTURAL_STIFFNESS: f32 = 1.0;

/// Default stiffness of shear (diagonal) constraints.
pub const DEFAULT_SHEAR_STIFFNESS: f32 = 0.6;

/// Default stiffness of bend (skip-one) constraints.
pub const DEFAULT_BEND_STIFFNESS: f32 = 0.25;

/// Height of the ground plane (Y coordinate).
pub const GROUND_HEIGHT: f32 = 0.0;

/// Default contact thickness (meters). Offset kept between cloth and body surface.
pub const DEFAULT_CONTACT_THICKNESS: f32 = 0.005;

/// Default tangential friction against the body (0 = frictionless).
pub const DEFAULT_FRICTION: f32 = 0.3;

/// Default normal restitution against the body (0 = no bounce).
pub const DEFAULT_RESTITUTION: f32 = 0.0;

/// Work items per dispatched batch.
pub const WORKGROUP_SIZE: usize = 64;

/// Default SDF resolution (voxels per axis).
pub const DEFAULT_SDF_RESOLUTION: u32 = 64;

/// Smallest accepted SDF resolution.
pub const MIN_SDF_RESOLUTION: u32 = 2;

/// Largest accepted SDF resolution. 256³ floats is already 64 MiB.
pub const MAX_SDF_RESOLUTION: u32 = 256;

/// Bounding-box padding applied on each side, as a fraction of the axis span.
pub const SDF_BOUNDS_PADDING: f32 = 0.05;

/// Voxels farther than this many cell widths from the surface skip sign classification.
pub const SDF_SIGN_BAND_CELLS: f32 = 3.0;

/// Smallest grid dimension (rows or columns) of a cloth grid.
pub const MIN_GRID_DIMENSION: usize = 2;

/// Height of the lowest row of a new cloth grid above the ground (meters).
pub const GRID_VERTICAL_OFFSET: f32 = 1.6;

/// Forward (+Z) offset of a new cloth grid's centre relative to the body origin (meters).
pub const GRID_FORWARD_OFFSET: f32 = 0.25;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-7;
