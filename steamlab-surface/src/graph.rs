use steamlab_thermo::PropertyProvider;

use crate::{build_surface, MeshDiagnostics, SurfaceBuild, SurfaceConfig, SurfaceError, SurfaceMesh};

/// Owns the published surface mesh and rebuilds it on configuration change.
///
/// The mesh is replaced atomically: reconfiguration builds a complete
/// candidate first and only then swaps it in, bumping the epoch. A failed
/// rebuild (invalid parameter, provider failure) leaves both the previous
/// mesh and the previous configuration in effect. Consumers poll the epoch
/// to learn that a fresh handle should be fetched.
pub struct GraphModel<P> {
    provider: P,
    config: SurfaceConfig,
    build: SurfaceBuild,
    epoch: u64,
}

impl<P: PropertyProvider> GraphModel<P> {
    /// Builds the initial surface.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] if the config is invalid or the provider
    /// rejects a sample.
    pub fn new(provider: P, config: SurfaceConfig) -> Result<Self, SurfaceError> {
        let build = build_surface(&provider, &config)?;
        Ok(Self {
            provider,
            config,
            build,
            epoch: 0,
        })
    }

    /// The currently published mesh.
    #[must_use]
    pub fn mesh(&self) -> &SurfaceMesh {
        &self.build.mesh
    }

    /// Diagnostics from the build that produced the current mesh.
    #[must_use]
    pub fn diagnostics(&self) -> MeshDiagnostics {
        self.build.diagnostics
    }

    /// The configuration behind the current mesh.
    #[must_use]
    pub fn config(&self) -> SurfaceConfig {
        self.config
    }

    /// Bumped every time a new mesh is published.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Changes the sampling density bias and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] and keeps the previous mesh and
    /// configuration if the new value is invalid or the rebuild fails.
    pub fn set_density_bias(&mut self, density_bias: f64) -> Result<(), SurfaceError> {
        self.reconfigure(SurfaceConfig {
            density_bias,
            ..self.config
        })
    }

    /// Changes the plot zoom bias and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] and keeps the previous mesh and
    /// configuration if the new value is invalid or the rebuild fails.
    pub fn set_zoom_bias(&mut self, zoom_bias: f64) -> Result<(), SurfaceError> {
        self.reconfigure(SurfaceConfig {
            zoom_bias,
            ..self.config
        })
    }

    /// Changes the grid resolution and rebuilds.
    ///
    /// # Errors
    ///
    /// Returns a [`SurfaceError`] and keeps the previous mesh and
    /// configuration if the new value is invalid or the rebuild fails.
    pub fn set_samples(&mut self, samples: usize) -> Result<(), SurfaceError> {
        self.reconfigure(SurfaceConfig {
            samples,
            ..self.config
        })
    }

    fn reconfigure(&mut self, config: SurfaceConfig) -> Result<(), SurfaceError> {
        let build = build_surface(&self.provider, &config)?;
        self.config = config;
        self.build = build;
        self.epoch += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use steamlab_thermo::model::SyntheticFluid;

    fn model() -> GraphModel<SyntheticFluid> {
        let config = SurfaceConfig {
            samples: 4,
            density_bias: 1.0,
            zoom_bias: 10.0,
        };
        GraphModel::new(SyntheticFluid, config).unwrap()
    }

    #[test]
    fn reconfiguring_publishes_a_new_mesh_and_bumps_the_epoch() {
        let mut model = model();
        assert_eq!(model.epoch(), 0);
        let before = model.mesh().clone();

        model.set_density_bias(2.0).unwrap();
        assert_eq!(model.epoch(), 1);
        assert_ne!(*model.mesh(), before);
        assert_eq!(model.config().density_bias, 2.0);
    }

    #[test]
    fn a_rejected_reconfiguration_keeps_the_published_mesh() {
        let mut model = model();
        let before = model.mesh().clone();

        assert!(model.set_zoom_bias(1.0).is_err());
        assert_eq!(model.epoch(), 0);
        assert_eq!(*model.mesh(), before);
        assert_eq!(model.config().zoom_bias, 10.0);
    }

    #[test]
    fn sample_count_changes_resize_the_mesh() {
        let mut model = model();
        let before = model.mesh().vertex_count();

        model.set_samples(6).unwrap();
        assert!(model.mesh().vertex_count() > before);
        assert!(model.mesh().is_well_formed());
    }
}
