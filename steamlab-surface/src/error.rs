use thiserror::Error;

use steamlab_thermo::PropertyError;

/// Errors that may occur while building a surface mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The sampling configuration was rejected before any computation.
    #[error("invalid surface config: {reason}")]
    Config { reason: &'static str },

    /// The property provider rejected a sample; construction is aborted and
    /// any previously published mesh stays in effect.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// Sampling produced geometry the stitching pass cannot work with.
    #[error("degenerate surface: {context}")]
    Degenerate { context: String },
}
