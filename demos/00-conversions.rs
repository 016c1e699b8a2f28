// demos/00-conversions.rs

// Using geoshift to convert points between the Chinese web mapping systems.
// Run with:
// cargo run --example 00-conversions

use geoshift::prelude::*;

// Use Anyhow for convenient error handling
fn main() -> anyhow::Result<()> {
    // The simplest entry point is the free function `convert`, which uses
    // a built-in, immutable conversion graph. Points are given as
    // (longitude, latitude) in degrees, or (easting, northing) in metres
    // for the mercator system.
    let tiananmen = Coor2D::lnglat(116.403963, 39.915119);
    let xiangshan = Coor2D::lnglat(116.191704, 39.942046);
    let data = [tiananmen, xiangshan];

    // The result is masked: Elements that end up as NaN are `None`
    let wgs = geoshift::convert(&data, Gcj02, Wgs84, Some(6))?;
    println!("gcj02 -> wgs84:");
    for point in &wgs {
        println!("    {:?}", point);
    }

    // A context gives access to the operators behind the conversions, and
    // to in place transformation of the data
    let mut ctx = Minimal::new();
    println!("bd09 -> mercator is: {}", ctx.definition(Bd09, WebMercator)?);

    let mut operands = data;
    let n = ctx.transform(&mut operands, Wgs84, WebMercator)?;
    println!("{n} points converted to mercator:");
    for point in operands {
        println!("    {:?}", point);
    }

    // Operators can also be instantiated directly from their definitions,
    // and run in both directions
    let op = ctx.op("gcj02 | bd09")?;
    let mut operands = data;
    ctx.apply(op, Fwd, &mut operands)?;
    println!("wgs84 -> bd09: {:?}", operands[0]);
    ctx.apply(op, Inv, &mut operands)?;
    println!("...and back:   {:?}", operands[0]);

    // The edges of the graph can be replaced. Here, we pretend that the
    // national obfuscation does not exist
    ctx.register_edge(Wgs84, Gcj02, "noop")?;
    ctx.register_edge(Gcj02, Wgs84, "noop inv")?;
    let plain = ctx.convert(&data, Gcj02, Wgs84, None)?;
    println!("without obfuscation: {:?}", plain[0]);

    // Distances are computed in the mercator plane, and scaled to the ground
    let d = geo_distance(&[tiananmen], &[xiangshan], Wgs84, Metric::Euclidean, LengthUnit::Kilometers, Some(2))?;
    println!("Tiananmen - Xiangshan: {:?} km", d[0]);

    Ok(())
}
