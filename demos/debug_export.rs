//! Debug export — builds a sample alignment and prints it as Wavefront OBJ.
//!
//! Usage:
//! ```text
//! cargo run --example debug_export > alignment.obj
//! RUST_LOG=alignment_curves=debug cargo run --example debug_export > alignment.obj
//! ```
//!
//! The alignment is a tangent, a clothoid transition and the circular arc
//! it leads into, followed by the arc refitted through three of its
//! samples.

use std::f64::consts::FRAC_PI_2;
use std::io;

use alignment_curves::export::ObjWriter;
use alignment_curves::geometry::{AnyCurve, CircleArc, ClothoidArc, ComposedCurve, Curve, Line};
use alignment_curves::math::{Isometry2, Point2, Vector2};
use alignment_curves::tessellation::{TessellateCurve, TessellationParams};
use alignment_curves::Result;

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for the library.
    // Override with RUST_LOG env var (e.g. RUST_LOG=alignment_curves=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("debug_export=info".parse().unwrap_or_default())
        .add_directive("alignment_curves=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let tangent = Line::new(Point2::new(0.0, 0.0), Point2::new(50.0, 0.0))?;

    let spiral_length = 30.0;
    let spiral = ClothoidArc::from_parts(
        40.0,
        false,
        0.0,
        spiral_length,
        Isometry2::new(Vector2::new(50.0, 0.0), 0.0),
    )?;

    let radius = spiral.radius(spiral_length);
    let heading = spiral.heading(spiral_length);
    let center = spiral.point1() + Vector2::new(-heading.sin(), heading.cos()) * radius;
    let start_angle = heading - FRAC_PI_2;
    let arc = CircleArc::new(center, radius, start_angle, start_angle + 0.6)?;

    let alignment: AnyCurve =
        ComposedCurve::new(vec![tangent.into(), spiral.into(), arc.clone().into()])?.into();
    tracing::info!(total_length = alignment.total_length(), "built alignment");

    let refit = CircleArc::three_points(
        &arc.start_point()?,
        &arc.position(start_angle + 0.3)?,
        &arc.end_point()?,
    )?;

    let params = TessellationParams::default();
    let mut obj = ObjWriter::new(io::stdout().lock());
    obj.write_polyline("alignment", &TessellateCurve::new(&alignment, params).execute()?)?;
    obj.write_polyline(
        "refit_arc",
        &TessellateCurve::new(&refit.into(), params).execute()?,
    )?;
    obj.into_inner()?;

    Ok(())
}
