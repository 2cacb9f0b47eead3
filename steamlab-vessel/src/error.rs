use thiserror::Error;

use steamlab_thermo::{PhaseRegion, PropertyError};

/// Errors that may occur when evolving the vessel state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    /// The property provider rejected a requested state.
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// The operation is not defined in the current phase region.
    ///
    /// Pressure deltas inside the two-phase region are explicitly
    /// unsupported; the state is left unchanged.
    #[error("pressure changes are not supported in the {region} region")]
    UnsupportedRegion { region: PhaseRegion },

    /// The engine was configured with invalid iteration parameters.
    #[error("invalid iteration config: {reason}")]
    Config { reason: &'static str },
}
