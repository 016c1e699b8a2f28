//! csys: Convert points between the Chinese web mapping coordinate systems,
//! compute distances, and convert units, from the command line.
use anyhow::{bail, Context as _};
use clap::{Parser, Subcommand};
use geoshift::prelude::*;
use log::{debug, trace};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csys")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert "x y" points from one coordinate system to another
    Convert {
        /// Source system (bd09, gcj02, wgs84, mercator)
        from: CoordinateSystem,
        /// Target system
        to: CoordinateSystem,
        /// Number of decimals in the output
        #[arg(short = 'd', long)]
        decimals: Option<i32>,
        /// The files to operate on, stdin if not present
        files: Vec<PathBuf>,
    },

    /// Distances between the two points "x1 y1 x2 y2" of each line
    Distance {
        /// The system of the input points (bd09, gcj02, wgs84, mercator)
        #[arg(short, long, default_value_t = CoordinateSystem::default())]
        system: CoordinateSystem,
        /// euclidean, manhattan, chebyshev, or cosine
        #[arg(short, long, default_value = "euclidean")]
        metric: Metric,
        /// Unit of the length metrics (km, m, mi, ft, nm)
        #[arg(short, long, default_value = "m")]
        unit: LengthUnit,
        /// Number of decimals in the output
        #[arg(short = 'd', long)]
        decimals: Option<i32>,
        /// The files to operate on, stdin if not present
        files: Vec<PathBuf>,
    },

    /// Convert a length, time, or angle value between units
    Unit {
        #[arg(allow_hyphen_values = true)]
        value: f64,
        from: String,
        to: String,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    trace!("{options:#?}");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match options.command {
        Command::Convert {
            from,
            to,
            decimals,
            files,
        } => {
            let rows = read_rows(&files, 2)?;
            let points = geoshift::prelude::from_rows(&rows)?;
            debug!("converting {} points from {from} to {to}", points.len());
            let converted = geoshift::convert(&points, from, to, decimals)?;
            for point in converted {
                writeln!(out, "{} {}", show(point[0]), show(point[1]))?;
            }
        }

        Command::Distance {
            system,
            metric,
            unit,
            decimals,
            files,
        } => {
            let rows = read_rows(&files, 4)?;
            let origins: Vec<Coor2D> = rows.iter().map(|r| Coor2D::raw(r[0], r[1])).collect();
            let destinations: Vec<Coor2D> =
                rows.iter().map(|r| Coor2D::raw(r[2], r[3])).collect();
            debug!("{metric} distances for {} pairs", origins.len());
            let distances =
                geo_distance(&origins, &destinations, system, metric, unit, decimals)?;
            for d in distances {
                writeln!(out, "{}", show(d))?;
            }
        }

        Command::Unit { value, from, to } => {
            let result = geoshift::units::convert_by_name(value, &from, &to)?;
            writeln!(out, "{result}")?;
        }
    }
    Ok(())
}

// Null values are written as '*'
fn show(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "*".to_string(),
    }
}

// Read the numeric rows of the input files (or stdin), each having exactly
// `width` elements, separated by whitespace or commas. '#' starts a comment.
fn read_rows(files: &[PathBuf], width: usize) -> Result<Vec<Vec<f64>>, anyhow::Error> {
    let mut readers: Vec<(String, Box<dyn BufRead>)> = Vec::new();
    if files.is_empty() {
        readers.push(("stdin".to_string(), Box::new(BufReader::new(io::stdin()))));
    }
    for path in files {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open {}", path.display()))?;
        readers.push((path.display().to_string(), Box::new(BufReader::new(file))));
    }

    let mut rows = Vec::new();
    for (name, reader) in readers {
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.split('#').next().unwrap_or_default();
            let fields: Vec<&str> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|s| !s.is_empty())
                .collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != width {
                bail!(
                    "{name}, line {}: expected {width} numbers, found {}",
                    index + 1,
                    fields.len()
                );
            }
            let row = fields
                .iter()
                .map(|f| f.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .with_context(|| format!("{name}, line {}: not a number", index + 1))?;
            rows.push(row);
        }
    }
    Ok(rows)
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_defaults() -> Result<(), anyhow::Error> {
        let cli = Cli::try_parse_from(["csys", "distance"])?;
        let Command::Distance { system, metric, unit, decimals, files } = cli.command else {
            bail!("expected the distance subcommand");
        };
        assert_eq!(system, Bd09);
        assert_eq!(metric, Metric::Euclidean);
        assert_eq!(unit, LengthUnit::Meters);
        assert_eq!(decimals, None);
        assert!(files.is_empty());

        let cli = Cli::try_parse_from(["csys", "distance", "--system", "wgs84", "-d", "-2"])?;
        let Command::Distance { system, decimals, .. } = cli.command else {
            bail!("expected the distance subcommand");
        };
        assert_eq!(system, Wgs84);
        assert_eq!(decimals, Some(-2));
        Ok(())
    }
}
