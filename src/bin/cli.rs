// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyvol CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use polyvol::real::{Real, DEFAULT_PERTURBATION};
use polyvol::{geometry, intersect, io};
use serde::Serialize;
use std::path::Path;

#[derive(Parser)]
#[command(name = "polyvol")]
#[command(about = "Polyvol - mesh intersection volume kernel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the volume and statistics of a single mesh
    Volume {
        /// Input mesh file (STL)
        input: String,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Compute the volume of the intersection of two meshes
    Intersect {
        /// First mesh file (STL)
        first: String,

        /// Second mesh file (STL)
        second: String,

        /// Use the localized algorithm instead of the counted one
        #[arg(long)]
        localized: bool,

        /// Skip the vertex perturbation preprocessing step
        #[arg(long)]
        no_perturb: bool,

        /// Skip centering the pair around the origin
        #[arg(long)]
        no_center: bool,

        /// Seed for the perturbation generator (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

#[derive(Serialize)]
struct IntersectionReport {
    first: String,
    second: String,
    first_triangles: usize,
    second_triangles: usize,
    algorithm: &'static str,
    volume: Real,
    elapsed_ms: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Volume { input, format } => {
            volume_command(input, format, cli.verbose)?;
        }
        Commands::Intersect {
            first,
            second,
            localized,
            no_perturb,
            no_center,
            seed,
            format,
        } => {
            intersect_command(
                first,
                second,
                *localized,
                *no_perturb,
                *no_center,
                *seed,
                format,
                cli.verbose,
            )?;
        }
        Commands::Version => {
            println!("Polyvol v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn require_file(path: &str) {
    if !Path::new(path).exists() {
        eprintln!("{} Input file not found: {}", "Error:".red(), path);
        std::process::exit(1);
    }
}

fn volume_command(input: &str, format: &str, verbose: bool) -> Result<()> {
    require_file(input);

    if verbose {
        println!("Loading: {}", input);
    }

    let mesh = io::load_mesh(input)?;
    let stats = geometry::analyze(&mesh);

    match format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => {
            println!("{} {}", "Mesh:".bright_black(), input);
            println!(
                "  {} {}",
                "Triangles:".bright_black(),
                stats.triangle_count.to_string().cyan()
            );
            println!(
                "  {} {}",
                "Unique vertices:".bright_black(),
                stats.unique_vertex_count.to_string().cyan()
            );
            println!(
                "  {} {}",
                "Watertight:".bright_black(),
                if stats.is_watertight {
                    "yes".green()
                } else {
                    "no".red()
                }
            );
            println!(
                "  {} {}",
                "Surface area:".bright_black(),
                format!("{:.6}", stats.surface_area).cyan()
            );
            println!(
                "  {} {}",
                "Volume:".bright_black(),
                format!("{:.6}", stats.volume).yellow()
            );
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn intersect_command(
    first_path: &str,
    second_path: &str,
    localized: bool,
    no_perturb: bool,
    no_center: bool,
    seed: Option<u64>,
    format: &str,
    verbose: bool,
) -> Result<()> {
    require_file(first_path);
    require_file(second_path);

    let mut first = io::load_mesh(first_path)?;
    let mut second = io::load_mesh(second_path)?;

    if !no_center {
        geometry::center_pair(&mut first, &mut second);
    }

    if !no_perturb {
        match seed {
            Some(seed) => {
                first.perturb_seeded(DEFAULT_PERTURBATION, seed);
                second.perturb_seeded(DEFAULT_PERTURBATION, seed.wrapping_add(1));
            }
            None => {
                first.perturb(DEFAULT_PERTURBATION);
                second.perturb(DEFAULT_PERTURBATION);
            }
        }
    }

    let first_normals = first.generate_normals();
    let second_normals = second.generate_normals();

    if verbose {
        println!(
            "Preparation complete. Triangles: {} vs {}.",
            first.triangle_count(),
            second.triangle_count()
        );
    }

    let start = std::time::Instant::now();
    let volume = if localized {
        intersect::localized_intersection_volume(&first_normals, &second_normals)
    } else {
        intersect::intersection_volume(&first_normals, &second_normals)
    };
    let elapsed = start.elapsed();

    let report = IntersectionReport {
        first: first_path.to_string(),
        second: second_path.to_string(),
        first_triangles: first.triangle_count(),
        second_triangles: second.triangle_count(),
        algorithm: if localized { "localized" } else { "counted" },
        volume,
        elapsed_ms: elapsed.as_secs_f64() * 1000.0,
    };

    match format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            println!(
                "{} {}",
                "Intersection volume:".bright_black(),
                format!("{:.10}", report.volume).yellow()
            );
            if verbose {
                println!(
                    "  {} {}",
                    "Algorithm:".bright_black(),
                    report.algorithm.cyan()
                );
                println!(
                    "  {} {:.2?}",
                    "Elapsed:".bright_black(),
                    elapsed
                );
            }
        }
    }

    Ok(())
}
