use glam::Vec3;

use steamlab_thermo::{plot::PlotMapper, PropertyProvider};

use crate::{SurfaceConfig, SurfaceError};

/// Interior of the nudge that lifts the dome ceiling above the last rung.
const CEILING_NUDGE: f32 = 0.01;

/// Dome boundary samples and the excision ceiling derived from them.
pub(crate) struct DomeBoundary {
    /// Interleaved saturated-liquid/saturated-vapor plot positions, ordered
    /// by ascending saturation pressure.
    pub positions: Vec<Vec3>,
    /// Offset within `positions` of the highest-pressure vertex (the apex
    /// the top fan converges on).
    pub apex_offset: usize,
    /// Plotted pressure above which grid triangles are never excised,
    /// nudged up slightly so the dome interior is fully enclosed.
    pub ceiling: f32,
}

/// Samples the single-phase grid: `samples²` plot positions in row-major
/// order, pressure rows outer and temperature columns inner.
pub(crate) fn sample_grid<P: PropertyProvider>(
    provider: &P,
    mapper: &PlotMapper,
    config: &SurfaceConfig,
) -> Result<Vec<Vec3>, SurfaceError> {
    let n = config.samples;
    let bounds = provider.bounds();
    let mut positions = Vec::with_capacity(n * n);

    for y in 0..n {
        let p_percentile = config.biased(y as f64 / (n - 1) as f64);
        let pressure = bounds.pressure_at(p_percentile);
        for z in 0..n {
            let t_percentile = config.biased(z as f64 / (n - 1) as f64);
            let temperature = bounds.temperature_at(t_percentile);
            let volume = provider.volume_pt(pressure, temperature)?;
            positions.push(mapper.plot(pressure, volume, temperature));
        }
    }

    ensure_finite(&positions, "grid")?;
    Ok(positions)
}

/// Generates the standard two-triangles-per-quad connectivity for the grid,
/// split along a fixed diagonal.
pub(crate) fn grid_triangles(n: usize) -> Vec<[u32; 3]> {
    let stride = n as u32;
    let mut triangles = Vec::with_capacity((n - 1) * (n - 1) * 2);
    for y in 0..n - 1 {
        for z in 0..n - 1 {
            let vi = (n * y + z) as u32;
            triangles.push([vi, vi + stride, vi + stride + 1]);
            triangles.push([vi, vi + stride + 1, vi + 1]);
        }
    }
    triangles
}

/// Samples the saturation curve at `2·samples` density-biased pressures,
/// appending one liquid-side and one vapor-side vertex per sample.
pub(crate) fn sample_dome<P: PropertyProvider>(
    provider: &P,
    mapper: &PlotMapper,
    config: &SurfaceConfig,
) -> Result<DomeBoundary, SurfaceError> {
    let count = config.samples * 2;
    let bounds = provider.bounds();
    let mut positions = Vec::with_capacity(count * 2);
    let mut highest = 0.0_f32;
    let mut apex_offset = 0;

    for y in 0..count {
        let percentile = config.biased(y as f64 / (count - 1) as f64);
        let pressure = bounds.saturation_pressure_at(percentile);
        let temperature = provider.saturation_temperature(pressure)?;

        let liquid = provider.saturation_liquid_volume(pressure)?;
        let liquid_point = mapper.plot(pressure, liquid, temperature);
        if liquid_point.y > highest {
            highest = liquid_point.y;
            apex_offset = positions.len();
        }
        positions.push(liquid_point);

        let vapor = provider.saturation_vapor_volume(pressure)?;
        positions.push(mapper.plot(pressure, vapor, temperature));
    }

    ensure_finite(&positions, "dome boundary")?;
    Ok(DomeBoundary {
        positions,
        apex_offset,
        ceiling: highest + CEILING_NUDGE * (1.0 - highest),
    })
}

fn ensure_finite(positions: &[Vec3], context: &str) -> Result<(), SurfaceError> {
    if positions.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(SurfaceError::Degenerate {
            context: format!("{context} sampling produced a non-finite plot position"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use steamlab_thermo::model::SyntheticFluid;

    fn mapper(config: &SurfaceConfig) -> PlotMapper {
        PlotMapper::new(SyntheticFluid.bounds(), config.zoom_bias).unwrap()
    }

    fn fixture_config() -> SurfaceConfig {
        SurfaceConfig {
            samples: 4,
            density_bias: 1.0,
            zoom_bias: 10.0,
        }
    }

    #[test]
    fn grid_has_a_vertex_per_sample_pair() {
        let config = fixture_config();
        let grid = sample_grid(&SyntheticFluid, &mapper(&config), &config).unwrap();
        assert_eq!(grid.len(), 16);
    }

    #[test]
    fn quad_connectivity_yields_two_triangles_per_cell() {
        let triangles = grid_triangles(4);
        assert_eq!(triangles.len(), 18);
        // The fixed diagonal splits the first cell into these two triangles.
        assert_eq!(triangles[0], [0, 4, 5]);
        assert_eq!(triangles[1], [0, 5, 1]);
    }

    #[test]
    fn dome_vertices_interleave_liquid_and_vapor() {
        let config = fixture_config();
        let dome = sample_dome(&SyntheticFluid, &mapper(&config), &config).unwrap();

        assert_eq!(dome.positions.len(), 16);
        // Liquid sits left of vapor at every rung.
        for rung in dome.positions.chunks_exact(2) {
            assert!(rung[0].x < rung[1].x);
            assert_eq!(rung[0].y, rung[1].y);
        }
    }

    #[test]
    fn apex_is_the_highest_pressure_liquid_vertex() {
        let config = fixture_config();
        let dome = sample_dome(&SyntheticFluid, &mapper(&config), &config).unwrap();

        // Saturation pressure grows monotonically with the percentile, so
        // the apex is the liquid vertex of the final rung.
        assert_eq!(dome.apex_offset, dome.positions.len() - 2);
        assert!(dome.ceiling > dome.positions[dome.apex_offset].y);
    }
}
