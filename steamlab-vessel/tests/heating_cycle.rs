use approx::assert_relative_eq;
use uom::si::{
    f64::{Mass, Power, Time},
    mass::kilogram,
    power::watt,
    time::second,
};

use steamlab_thermo::{model::AnalyticWater, plot::PlotMapper, PropertyProvider};
use steamlab_vessel::{IterationConfig, TickConfig, TickInput, Vessel, VesselEngine};

fn engine() -> VesselEngine<AnalyticWater> {
    let water = AnalyticWater;
    let plot = PlotMapper::new(water.bounds(), 10.0).unwrap();
    VesselEngine::new(water, plot, Vessel::default(), IterationConfig::default()).unwrap()
}

#[test]
fn a_burner_session_keeps_every_published_state_consistent() {
    let mut engine = engine();
    let tick_config = TickConfig::default();
    let input = TickInput {
        heat_rate: Power::new::<watt>(30_000.0),
        piston_weight: Mass::new::<kilogram>(250.0),
        dt: Time::new::<second>(1.0 / 60.0),
        insulated: true,
        clamped: false,
    };

    for _ in 0..120 {
        engine.tick(&input, &tick_config).unwrap();
        let s = engine.state();

        // The enthalpy definition must hold for every committed state.
        assert_relative_eq!(
            s.enthalpy.value,
            s.internal_energy.value + s.pressure.value * s.specific_volume.value,
            max_relative = 1e-6
        );

        let point = engine.plot_point();
        for coord in [point.x, point.y, point.z] {
            assert!(coord.is_finite());
            assert!((-1e-3..=1.001).contains(&coord));
        }
    }
}

#[test]
fn clamped_heating_never_moves_the_piston() {
    let mut engine = engine();
    let tick_config = TickConfig::default();
    let volume = engine.state().specific_volume;
    let input = TickInput {
        heat_rate: Power::new::<watt>(100_000.0),
        piston_weight: Mass::new::<kilogram>(0.0),
        dt: Time::new::<second>(1.0 / 60.0),
        insulated: true,
        clamped: true,
    };

    for _ in 0..30 {
        engine.tick(&input, &tick_config).unwrap();
        assert_eq!(engine.state().specific_volume, volume);
    }
}
