//! `splat-convert`: validate, standardize and compact-encode Gaussian splat
//! PLY files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use splat_core::color::preview_colors;
use splat_core::schema::{self, REQUIRED_ATTRIBUTES};
use splat_io::{convert_file, read_ply_store, read_splat_file, splat_path_for, PlyReader};

#[derive(Parser, Debug)]
#[command(name = "splat-convert", version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Standardize a source PLY and write the canonical PLY and compact .splat files.
    Convert {
        /// Source PLY produced by the reconstruction model (WXYZ rotations).
        input: PathBuf,

        /// Standardized PLY output. Defaults to `<input stem>.standard.ply`.
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Compact output. Defaults to the PLY output with a `.splat` extension.
        #[arg(long)]
        splat: Option<PathBuf>,

        /// Replace the input file with its standardized version.
        #[arg(long)]
        in_place: bool,
    },

    /// Check that a PLY carries every required Gaussian splat attribute.
    Validate {
        input: PathBuf,

        /// Additional attribute names to require.
        #[arg(long = "require", value_name = "NAME")]
        extra: Vec<String>,
    },

    /// Print the record count and leading records of a compact .splat file.
    Inspect {
        input: PathBuf,

        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
    },

    /// Print derived preview RGBA colors of a PLY.
    Preview {
        input: PathBuf,

        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,
    },
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn default_output_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}.standard.ply"))
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert {
            input,
            output,
            splat,
            in_place,
        } => {
            let ply_out = if in_place {
                input.clone()
            } else {
                output.unwrap_or_else(|| default_output_for(&input))
            };
            let splat_out = splat.unwrap_or_else(|| splat_path_for(&ply_out));
            let report = convert_file(&input, &ply_out, &splat_out)
                .with_context(|| format!("converting {}", input.display()))?;
            println!(
                "kept {} dropped {} of {} points",
                report.kept, report.dropped, report.input_points
            );
            println!("ply:   {}", report.ply_path.display());
            println!("splat: {}", report.splat_path.display());
        }
        Command::Validate { input, extra } => {
            let mut reader = PlyReader::open(&input)
                .with_context(|| format!("opening {}", input.display()))?;
            let header = reader
                .read_header()
                .with_context(|| format!("reading header of {}", reader.path().display()))?;
            for element in &header.elements {
                info!(
                    "Element `{}`: {} entries, {} properties",
                    element.name,
                    element.count,
                    element.properties.len()
                );
            }
            let store = reader
                .read_store()
                .with_context(|| format!("reading {}", reader.path().display()))?;
            let mut required: Vec<String> =
                REQUIRED_ATTRIBUTES.iter().map(|s| s.to_string()).collect();
            required.extend(extra);
            let missing = schema::missing_attributes(&store, &required);
            if !missing.is_empty() {
                bail!(
                    "{} is missing attributes: {}",
                    input.display(),
                    missing.join(", ")
                );
            }
            println!(
                "{}: {} points, all {} required attributes present",
                input.display(),
                store.num_points(),
                required.len()
            );
        }
        Command::Inspect { input, limit } => {
            let records = read_splat_file(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            println!("{}: {} records", input.display(), records.len());
            for (i, r) in records.iter().take(limit).enumerate() {
                println!(
                    "{i:>6}  pos {:?}  scale {:?}  rgba {:?}  rot {:?}",
                    r.position,
                    r.scale,
                    r.color,
                    r.rotation_xyzw()
                );
            }
        }
        Command::Preview { input, limit } => {
            let store = read_ply_store(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let colors = preview_colors(&store)
                .with_context(|| format!("deriving colors for {}", input.display()))?;
            info!("Derived {} preview colors", colors.len());
            for (i, rgba) in colors.iter().take(limit).enumerate() {
                println!(
                    "{i:>6}  {:.4} {:.4} {:.4} {:.4}",
                    rgba[0], rgba[1], rgba[2], rgba[3]
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(level_for(cli.verbose))
        .parse_default_env()
        .init();
    run(cli.command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_with_defaults() {
        let cli = Cli::try_parse_from(["splat-convert", "-vv", "convert", "raw.ply"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Convert {
                input,
                output,
                splat,
                in_place,
            } => {
                assert_eq!(input, PathBuf::from("raw.ply"));
                assert!(output.is_none() && splat.is_none() && !in_place);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn in_place_conflicts_with_output() {
        let parsed = Cli::try_parse_from([
            "splat-convert",
            "convert",
            "raw.ply",
            "--in-place",
            "-o",
            "out.ply",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output_for(Path::new("dir/photo.ply")),
            PathBuf::from("dir/photo.standard.ply")
        );
    }

    #[test]
    fn validate_fails_on_incomplete_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("partial.ply");
        let mut bytes =
            b"ply\nformat binary_little_endian 1.0\nelement vertex 1\nproperty float x\nend_header\n"
                .to_vec();
        bytes.extend_from_slice(&0.0f32.to_le_bytes());
        std::fs::write(&input, bytes).unwrap();

        let err = run(Command::Validate {
            input,
            extra: Vec::new(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("opacity"));
    }

    #[test]
    fn inspect_and_preview_read_converted_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scene.ply");
        let names = REQUIRED_ATTRIBUTES;
        let mut bytes = String::from("ply\nformat binary_little_endian 1.0\nelement vertex 2\n");
        for name in names {
            bytes.push_str(&format!("property float {name}\n"));
        }
        bytes.push_str("end_header\n");
        let mut bytes = bytes.into_bytes();
        for _ in 0..2 {
            for name in names {
                let v = if name == "rot_0" { 1.0f32 } else { 0.0 };
                bytes.extend_from_slice(&v.to_le_bytes());
            }
        }
        std::fs::write(&input, bytes).unwrap();

        run(Command::Preview {
            input: input.clone(),
            limit: 1,
        })
        .unwrap();
        run(Command::Convert {
            input: input.clone(),
            output: None,
            splat: None,
            in_place: false,
        })
        .unwrap();

        let splat = splat_path_for(default_output_for(&input));
        assert_eq!(std::fs::metadata(&splat).unwrap().len(), 64);
        run(Command::Inspect {
            input: splat,
            limit: 5,
        })
        .unwrap();
    }

    #[test]
    fn inspect_rejects_partial_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.splat");
        std::fs::write(&input, [0u8; 40]).unwrap();
        assert!(run(Command::Inspect { input, limit: 1 }).is_err());
    }

    #[test]
    fn log_level_grows_with_verbosity() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }
}
