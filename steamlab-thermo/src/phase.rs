use std::fmt;

/// Phase region of a water state.
///
/// States at or above the critical pressure are tagged as subcooled liquid
/// below the critical temperature and superheated vapor above it; there is no
/// separate supercritical tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseRegion {
    SubcooledLiquid,
    TwoPhase,
    SuperheatedVapor,
}

impl fmt::Display for PhaseRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhaseRegion::SubcooledLiquid => "subcooled liquid",
            PhaseRegion::TwoPhase => "two-phase",
            PhaseRegion::SuperheatedVapor => "superheated vapor",
        };
        write!(f, "{name}")
    }
}
