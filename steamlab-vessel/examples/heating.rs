//! Drives the vessel through a few seconds of burner heating and prints the
//! state after each simulated second.

use uom::si::{
    f64::{Mass, Power, Time},
    mass::kilogram,
    power::watt,
    pressure::kilopascal,
    specific_volume::cubic_meter_per_kilogram,
    thermodynamic_temperature::kelvin,
    time::second,
};

use steamlab_thermo::{model::AnalyticWater, plot::PlotMapper, PropertyProvider};
use steamlab_vessel::{IterationConfig, TickConfig, TickInput, Vessel, VesselEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let water = AnalyticWater;
    let plot = PlotMapper::new(water.bounds(), 10.0)?;
    let mut engine = VesselEngine::new(
        water,
        plot,
        Vessel::default(),
        IterationConfig::default(),
    )?;

    let tick_config = TickConfig::default();
    let input = TickInput {
        heat_rate: Power::new::<watt>(8_000.0),
        piston_weight: Mass::new::<kilogram>(500.0),
        dt: Time::new::<second>(1.0 / 60.0),
        insulated: true,
        clamped: false,
    };

    for tick in 0..600u32 {
        engine.tick(&input, &tick_config)?;
        if tick % 60 == 59 {
            let s = engine.state();
            let point = engine.plot_point();
            println!(
                "t+{:>2}s  p = {:>9.2} kPa  T = {:>7.2} K  v = {:.5} m³/kg  {}  plot ({:.3}, {:.3}, {:.3})",
                (tick + 1) / 60,
                s.pressure.get::<kilopascal>(),
                s.temperature.get::<kelvin>(),
                s.specific_volume.get::<cubic_meter_per_kilogram>(),
                s.region,
                point.x,
                point.y,
                point.z,
            );
        }
    }

    Ok(())
}
