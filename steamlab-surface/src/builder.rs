use glam::Vec3;

use steamlab_thermo::{plot::PlotMapper, PropertyProvider};

use crate::{
    sample::{grid_triangles, sample_dome, sample_grid},
    stitch::{excise_spanning_triangles, fan_apex, normalize_orphans, stitch_left, stitch_right},
    SurfaceConfig, SurfaceError, SurfaceMesh,
};

/// Counters describing how a build went.
///
/// The unclassifiable count covers the rare floating-point edge case of a
/// vertex landing exactly on the excision midline; those triangles are
/// conservatively dropped. `stitch_skipped` reports the degenerate situation
/// of too few orphans to run the zipper (possible at tiny sample counts),
/// in which case the cut is left open rather than mis-stitched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshDiagnostics {
    pub grid_triangles: usize,
    pub excised_triangles: usize,
    pub unclassified_dropped: usize,
    pub stitched_triangles: usize,
    pub fan_triangles: usize,
    pub ribbon_triangles: usize,
    pub stitch_skipped: bool,
}

/// A finished mesh together with its build diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceBuild {
    pub mesh: SurfaceMesh,
    pub diagnostics: MeshDiagnostics,
}

/// Builds the property surface for a provider.
///
/// Deterministic for a given provider and configuration; two builds with
/// identical inputs produce identical meshes.
///
/// # Errors
///
/// Returns [`SurfaceError::Config`] for an invalid configuration (rejected
/// before any sampling) and [`SurfaceError::Property`] or
/// [`SurfaceError::Degenerate`] if sampling fails mid-build. No partial mesh
/// is ever returned.
pub fn build_surface<P: PropertyProvider>(
    provider: &P,
    config: &SurfaceConfig,
) -> Result<SurfaceBuild, SurfaceError> {
    config
        .validate()
        .map_err(|reason| SurfaceError::Config { reason })?;
    let mapper = PlotMapper::new(provider.bounds(), config.zoom_bias).map_err(|_| {
        SurfaceError::Config {
            reason: "zoom_bias must be a usable log base",
        }
    })?;

    let mut positions = sample_grid(provider, &mapper, config)?;
    let base_triangles = grid_triangles(config.samples);
    let grid_count = base_triangles.len();

    let dome_start = positions.len();
    let dome = sample_dome(provider, &mapper, config)?;
    let apex = (dome_start + dome.apex_offset) as u32;
    positions.extend_from_slice(&dome.positions);
    let dome_end = positions.len();

    let excision =
        excise_spanning_triangles(&positions, &base_triangles, dome_start, dome_end, dome.ceiling);
    let mut triangles = excision.retained;
    let mut left = excision.left_orphans;
    let mut right = excision.right_orphans;
    normalize_orphans(&positions, &mut left);
    normalize_orphans(&positions, &mut right);

    let mut stitched_triangles = 0;
    let mut fan_triangles = 0;
    let mut stitch_skipped = false;
    if left.len() >= 3 && right.len() >= 2 {
        let stitch_start = triangles.len();
        let left_consumed = stitch_left(&positions, &left, dome_start, dome_end, &mut triangles);
        let right_consumed = stitch_right(&positions, &right, dome_start, dome_end, &mut triangles);
        stitched_triangles = triangles.len() - stitch_start;

        let fan_start = triangles.len();
        fan_apex(
            &left,
            &right,
            left_consumed,
            right_consumed,
            apex,
            &mut triangles,
        );
        fan_triangles = triangles.len() - fan_start;
    } else {
        stitch_skipped = true;
    }

    // The dividing surface inside the dome reuses the boundary positions,
    // duplicated so each side of the seam carries its own normals.
    let inner_start = positions.len();
    positions.extend_from_within(dome_start..dome_end);
    let ribbon_start = triangles.len();
    for rung in 0..config.samples * 2 - 1 {
        let base = (inner_start + rung * 2) as u32;
        triangles.push([base, base + 2, base + 1]);
        triangles.push([base + 1, base + 2, base + 3]);
    }
    let ribbon_triangles = triangles.len() - ribbon_start;

    let normals = face_normals(&positions, &triangles);
    let mesh = SurfaceMesh {
        positions,
        normals,
        triangles,
    };
    debug_assert!(mesh.is_well_formed());

    Ok(SurfaceBuild {
        mesh,
        diagnostics: MeshDiagnostics {
            grid_triangles: grid_count,
            excised_triangles: excision.excised,
            unclassified_dropped: excision.unclassified,
            stitched_triangles,
            fan_triangles,
            ribbon_triangles,
            stitch_skipped,
        },
    })
}

/// Assigns each triangle's face normal to its three vertices.
///
/// A vertex shared by several triangles keeps the normal of the last one
/// written, a deliberate simplification that leaves shared edges faceted
/// instead of smooth-shaded.
fn face_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in triangles {
        let [ai, bi, ci] = *tri;
        let a = positions[ai as usize];
        let b = positions[bi as usize];
        let c = positions[ci as usize];
        let normal = (b - a).cross(c - a).normalize_or_zero();
        normals[ai as usize] = normal;
        normals[bi as usize] = normal;
        normals[ci as usize] = normal;
    }
    normals
}

#[cfg(test)]
mod tests {
    use super::*;

    use steamlab_thermo::model::SyntheticFluid;

    fn fixture_config() -> SurfaceConfig {
        SurfaceConfig {
            samples: 4,
            density_bias: 1.0,
            zoom_bias: 10.0,
        }
    }

    #[test]
    fn fixture_build_matches_the_expected_shape() {
        let build = build_surface(&SyntheticFluid, &fixture_config()).unwrap();
        let d = build.diagnostics;

        // (N−1)²·2 grid triangles before any excision.
        assert_eq!(d.grid_triangles, 18);
        assert_eq!(d.excised_triangles, 4);
        assert_eq!(d.unclassified_dropped, 0);
        assert!(!d.stitch_skipped);
        assert!(d.stitched_triangles > 0);
        assert!(d.fan_triangles > 0);
        // Two ribbon triangles per rung step across 2N samples.
        assert_eq!(d.ribbon_triangles, 14);

        // Grid + dome boundary + duplicated dome interior.
        assert_eq!(build.mesh.vertex_count(), 16 + 16 + 16);
        assert!(build.mesh.is_well_formed());
    }

    #[test]
    fn identical_inputs_build_identical_meshes() {
        let first = build_surface(&SyntheticFluid, &fixture_config()).unwrap();
        let second = build_surface(&SyntheticFluid, &fixture_config()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_normal_is_unit_length_or_zero() {
        let build = build_surface(&SyntheticFluid, &fixture_config()).unwrap();
        for normal in &build.mesh.normals {
            let length = normal.length();
            assert!(length == 0.0 || (length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn invalid_configs_are_rejected_before_sampling() {
        let config = SurfaceConfig {
            samples: 1,
            ..fixture_config()
        };
        assert!(matches!(
            build_surface(&SyntheticFluid, &config),
            Err(SurfaceError::Config { .. })
        ));
    }

    #[test]
    fn no_orphan_is_dropped_by_the_zipper() {
        // Re-run the pipeline by hand so the orphan lists stay visible.
        let config = fixture_config();
        let provider = SyntheticFluid;
        let mapper = PlotMapper::new(provider.bounds(), config.zoom_bias).unwrap();

        let mut positions = sample_grid(&provider, &mapper, &config).unwrap();
        let base = grid_triangles(config.samples);
        let dome_start = positions.len();
        let dome = sample_dome(&provider, &mapper, &config).unwrap();
        let apex = (dome_start + dome.apex_offset) as u32;
        positions.extend_from_slice(&dome.positions);
        let dome_end = positions.len();

        let excision =
            excise_spanning_triangles(&positions, &base, dome_start, dome_end, dome.ceiling);
        let mut left = excision.left_orphans;
        let mut right = excision.right_orphans;
        normalize_orphans(&positions, &mut left);
        normalize_orphans(&positions, &mut right);
        assert!(left.len() >= 3 && right.len() >= 2);

        let mut seam = Vec::new();
        let left_consumed = stitch_left(&positions, &left, dome_start, dome_end, &mut seam);
        let right_consumed = stitch_right(&positions, &right, dome_start, dome_end, &mut seam);
        fan_apex(&left, &right, left_consumed, right_consumed, apex, &mut seam);

        for orphan in left.iter().chain(right.iter()) {
            assert!(
                seam.iter().any(|tri| tri.contains(orphan)),
                "orphan {orphan} never stitched"
            );
        }
    }
}
