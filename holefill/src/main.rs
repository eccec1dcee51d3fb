//! Command line front end.
//!
//! ```bash
//! holefill image.png mask.png output.png --method windowed --window 20
//! ```
//!
//! Mask pixels darker than mid gray are holes. The image is filled in
//! linear gray and written as an 8-bit sRGB gray PNG.

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use holefill::config::DEFAULT_WINDOW_SIZE;
use holefill::{
    FillMethod, InversePowerWeight, SpatialQuery, WeightFn, WindowScaledWeight, fill, load_masked,
    save_luma_png,
};

#[derive(Debug)]
struct Args {
    image: PathBuf,
    mask: PathBuf,
    output: PathBuf,
    method: FillMethod,
    kernel: InversePowerWeight,
    log_level: String,
    log_dir: Option<PathBuf>,
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} <image.png> <mask.png> <output.png> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --method <name>     global | windowed | propagate | spatial (default: windowed)");
    eprintln!(
        "  --window <n>        window size for the windowed method (default: {})",
        DEFAULT_WINDOW_SIZE
    );
    eprintln!("  --radius <r>        fixed search radius for the spatial method");
    eprintln!("  --margin <m>        automatic radius margin for the spatial method (default: 1.5)");
    eprintln!("  --nearest <k>       use the k nearest boundary pixels for the spatial method");
    eprintln!("  --epsilon <e>       weight kernel epsilon (default: 0.01)");
    eprintln!("  --zeta <z>          weight kernel exponent (default: 3)");
    eprintln!("  --log <level>       log filter, overridden by RUST_LOG (default: info)");
    eprintln!("  --log-dir <dir>     also write rolling log files to <dir>");
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let value = value.with_context(|| format!("{} requires a value", flag))?;
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid value '{}' for {}: {}", value, flag, e))
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut method: FillMethod = FillMethod::Windowed {
        window_size: DEFAULT_WINDOW_SIZE,
    };
    let mut window: Option<usize> = None;
    let mut query: Option<SpatialQuery> = None;
    let mut kernel = InversePowerWeight::default();
    let mut log_level = "info".to_string();
    let mut log_dir = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--method" => method = parse_value("--method", iter.next())?,
            "--window" => window = Some(parse_value("--window", iter.next())?),
            "--radius" => query = Some(SpatialQuery::Radius(parse_value("--radius", iter.next())?)),
            "--margin" => {
                query = Some(SpatialQuery::AutoRadius {
                    margin: parse_value("--margin", iter.next())?,
                })
            }
            "--nearest" => {
                query = Some(SpatialQuery::Nearest(parse_value("--nearest", iter.next())?))
            }
            "--epsilon" => kernel.epsilon = parse_value("--epsilon", iter.next())?,
            "--zeta" => kernel.zeta = parse_value("--zeta", iter.next())?,
            "--log" => log_level = parse_value("--log", iter.next())?,
            "--log-dir" => log_dir = Some(parse_value("--log-dir", iter.next())?),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let [image, mask, output]: [PathBuf; 3] = positional
        .try_into()
        .map_err(|p: Vec<PathBuf>| anyhow::anyhow!("Expected 3 paths, got {}", p.len()))?;

    match &mut method {
        FillMethod::Windowed { window_size } => {
            if let Some(window) = window {
                *window_size = window;
            }
        }
        FillMethod::Spatial(spatial) => {
            if let Some(query) = query {
                *spatial = query;
            }
        }
        FillMethod::Global | FillMethod::Propagate => {}
    }

    let name = method.name();
    if window.is_some() && !matches!(method, FillMethod::Windowed { .. }) {
        bail!("--window only applies to the windowed method, not {}", name);
    }
    if query.is_some() && !matches!(method, FillMethod::Spatial(_)) {
        bail!(
            "--radius, --margin and --nearest only apply to the spatial method, not {}",
            name
        );
    }
    method.check()?;

    Ok(Args {
        image,
        mask,
        output,
        method,
        kernel,
        log_level,
        log_dir,
    })
}

fn run(args: &Args) -> Result<()> {
    let mut grid = load_masked(&args.image, &args.mask)?;
    let holes = grid.hole_count();
    tracing::info!(
        width = grid.width(),
        height = grid.height(),
        holes,
        method = args.method.name(),
        "Filling holes"
    );

    let weight: Box<dyn WeightFn> = match args.method {
        FillMethod::Windowed { window_size } => Box::new(WindowScaledWeight {
            window_size,
            epsilon: args.kernel.epsilon,
            zeta: args.kernel.zeta,
        }),
        _ => Box::new(args.kernel),
    };

    let start = Instant::now();
    fill(&mut grid, &args.method, weight.as_ref());
    tracing::info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        remaining = grid.hole_count(),
        "Fill complete"
    );

    save_luma_png(&grid, &args.output)
        .with_context(|| format!("Writing result for {}", args.image.display()))?;
    tracing::info!(path = %args.output.display(), "Output written");
    Ok(())
}

fn main() {
    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("holefill");

    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            print_usage(program);
            std::process::exit(1);
        }
    };

    common::log_setup::setup_logging(&args.log_level, "holefill", args.log_dir.as_deref());

    if let Err(e) = run(&args) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("holefill")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_to_windowed() {
        let args = parse_args(&argv(&["a.png", "m.png", "o.png"])).unwrap();
        assert_eq!(args.image, PathBuf::from("a.png"));
        assert_eq!(args.output, PathBuf::from("o.png"));
        assert_eq!(
            args.method,
            FillMethod::Windowed {
                window_size: DEFAULT_WINDOW_SIZE
            }
        );
        assert_eq!(args.kernel, InversePowerWeight::default());
        assert!(args.log_dir.is_none());
    }

    #[test]
    fn window_and_kernel_flags() {
        let args = parse_args(&argv(&[
            "a.png", "m.png", "o.png", "--window", "7", "--zeta", "2", "--epsilon", "0.5",
        ]))
        .unwrap();
        assert_eq!(args.method, FillMethod::Windowed { window_size: 7 });
        assert_eq!(args.kernel.zeta, 2.0);
        assert_eq!(args.kernel.epsilon, 0.5);
    }

    #[test]
    fn spatial_query_flags() {
        let args = parse_args(&argv(&[
            "--method", "spatial", "--nearest", "12", "a.png", "m.png", "o.png",
        ]))
        .unwrap();
        assert_eq!(args.method, FillMethod::Spatial(SpatialQuery::Nearest(12)));

        let args = parse_args(&argv(&[
            "a.png", "m.png", "o.png", "--method", "spatial", "--radius", "4.5",
        ]))
        .unwrap();
        assert_eq!(args.method, FillMethod::Spatial(SpatialQuery::Radius(4.5)));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&argv(&["a.png", "m.png"])).is_err());
        assert!(parse_args(&argv(&["a.png", "m.png", "o.png", "--method", "magic"])).is_err());
        assert!(parse_args(&argv(&["a.png", "m.png", "o.png", "--window"])).is_err());
        assert!(parse_args(&argv(&["a.png", "m.png", "o.png", "--frobnicate"])).is_err());
    }

    #[test]
    fn rejects_invalid_method_parameters() {
        let cases: [&[&str]; 4] = [
            &["--window", "0"],
            &["--method", "spatial", "--radius", "NaN"],
            &["--method", "spatial", "--radius", "-1"],
            &["--method", "spatial", "--nearest", "0"],
        ];
        for flags in cases {
            let mut parts = vec!["a.png", "m.png", "o.png"];
            parts.extend_from_slice(flags);
            let err = parse_args(&argv(&parts)).unwrap_err();
            assert!(
                err.downcast_ref::<holefill::InvalidConfigError>().is_some(),
                "{flags:?}: {err:#}"
            );
        }
    }

    #[test]
    fn rejects_flags_for_other_methods() {
        let err = parse_args(&argv(&[
            "a.png", "m.png", "o.png", "--method", "global", "--nearest", "5",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("spatial method"));

        let err = parse_args(&argv(&[
            "a.png", "m.png", "o.png", "--method", "propagate", "--window", "9",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("windowed method"));
    }
}
