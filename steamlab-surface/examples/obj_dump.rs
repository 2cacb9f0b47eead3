//! Builds the water property surface and writes it to stdout as Wavefront
//! OBJ, ready for any mesh viewer:
//!
//! ```sh
//! cargo run --example obj_dump > surface.obj
//! ```

use steamlab_surface::{build_surface, SurfaceConfig};
use steamlab_thermo::model::AnalyticWater;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SurfaceConfig {
        samples: 64,
        ..SurfaceConfig::default()
    };
    let build = build_surface(&AnalyticWater, &config)?;

    eprintln!(
        "built {} vertices, {} triangles ({} excised, {} stitched, {} fanned)",
        build.mesh.vertex_count(),
        build.mesh.triangle_count(),
        build.diagnostics.excised_triangles,
        build.diagnostics.stitched_triangles,
        build.diagnostics.fan_triangles,
    );

    for p in &build.mesh.positions {
        println!("v {} {} {}", p.x, p.y, p.z);
    }
    for n in &build.mesh.normals {
        println!("vn {} {} {}", n.x, n.y, n.z);
    }
    for [a, b, c] in &build.mesh.triangles {
        // OBJ indices are 1-based.
        println!("f {0}//{0} {1}//{1} {2}//{2}", a + 1, b + 1, c + 1);
    }

    Ok(())
}
