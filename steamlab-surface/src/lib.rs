//! Property-surface mesh generation for steamlab.
//!
//! Builds the triangulated surface of valid (volume, pressure, temperature)
//! states in normalized plot space. A regular grid covers the single-phase
//! regions; triangles spanning the two-phase dome are excised and the cut is
//! re-stitched against an independently sampled dome boundary with a
//! sorted-merge zipper, closed at the top by a fan around the critical point.
//! The liquid/vapor dividing surface fills the dome as a ribbon with its own
//! seam vertices.
//!
//! Construction is deterministic for a given provider and configuration, and
//! a finished [`SurfaceMesh`] is immutable: reconfiguration produces a new
//! mesh rather than editing the published one.

mod builder;
mod config;
mod error;
mod graph;
mod mesh;
mod sample;
mod stitch;

pub use builder::{build_surface, MeshDiagnostics, SurfaceBuild};
pub use config::SurfaceConfig;
pub use error::SurfaceError;
pub use graph::GraphModel;
pub use mesh::SurfaceMesh;
