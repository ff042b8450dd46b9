use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;

use spiralmesh::{
    DifferenceScheme, MeshEngine, MeshResult, SHAPE_PRESETS, ShapeConstants, SurfaceConfig,
    SurfaceMesh, find_preset,
};

#[derive(Parser)]
#[command(name = "spiralmesh")]
#[command(about = "Generate the spiral shell mesh and report on it", long_about = None)]
#[command(version)]
struct Cli {
    /// Named shape preset; --a/--b/--c override its values
    #[arg(short, long)]
    preset: Option<String>,

    /// List presets and exit
    #[arg(long)]
    list_presets: bool,

    #[arg(long)]
    a: Option<f64>,

    #[arg(long)]
    b: Option<f64>,

    #[arg(long)]
    c: Option<f64>,

    /// Grid step in degrees
    #[arg(short, long, default_value = "5", allow_negative_numbers = true)]
    step: f64,

    /// Reproduce the old finite-difference shading
    #[arg(long)]
    legacy_normals: bool,

    /// Also weld the triangle list into an indexed mesh
    #[arg(long)]
    indexed: bool,

    /// Seconds to wait for the worker
    #[arg(long, default_value = "60")]
    timeout: u64,
}

impl Cli {
    fn constants(&self) -> Result<ShapeConstants> {
        let base = match &self.preset {
            Some(name) => {
                find_preset(name)
                    .ok_or_else(|| anyhow!("unknown preset '{name}', try --list-presets"))?
                    .constants
            }
            None => ShapeConstants::default(),
        };

        Ok(ShapeConstants::new(
            self.a.unwrap_or(base.a),
            self.b.unwrap_or(base.b),
            self.c.unwrap_or(base.c),
        ))
    }

    fn config(&self) -> Result<SurfaceConfig> {
        let scheme = if self.legacy_normals {
            DifferenceScheme::Legacy
        } else {
            DifferenceScheme::BackwardDifference
        };

        Ok(SurfaceConfig::default()
            .with_constants(self.constants()?)
            .with_step(self.step)
            .with_scheme(scheme))
    }
}

fn report(surface: &SurfaceMesh, indexed: bool) {
    let mesh = &surface.mesh;
    log::info!(
        "{}x{} cells, {} triangles, {} vertices",
        surface.cells_u,
        surface.cells_v,
        mesh.triangle_count(),
        mesh.vertex_count()
    );
    log::info!(
        "buffers: {} bytes positions, {} bytes normals",
        mesh.vertex_bytes().len(),
        mesh.normal_bytes().len()
    );

    if let Some(bounds) = surface.bounds {
        log::info!(
            "bounds min {:?} max {:?} center {:?}",
            bounds.min.to_array(),
            bounds.max.to_array(),
            bounds.center().to_array()
        );
    }

    if surface.degenerate_normals > 0 {
        log::info!("{} degenerate normals", surface.degenerate_normals);
    }

    if indexed {
        let welded = mesh.to_indexed();
        log::info!(
            "indexed: {} unique vertices, {} indices ({} bytes)",
            welded.vertex_count(),
            welded.indices.len(),
            welded.index_bytes().len()
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list_presets {
        for preset in SHAPE_PRESETS {
            let k = preset.constants;
            println!(
                "{:<14} A={:<5} B={:<5} C={:<6} {}",
                preset.name, k.a, k.b, k.c, preset.description
            );
        }
        return Ok(());
    }

    let config = cli.config()?;
    log::info!(
        "generating A={} B={} C={} step={} ({:?})",
        config.constants.a,
        config.constants.b,
        config.constants.c,
        config.domain.step,
        config.scheme
    );

    let engine = MeshEngine::new();
    let started = Instant::now();
    let id = engine.request(config)?;

    let result = loop {
        let result = engine
            .recv_result_timeout(Duration::from_secs(cli.timeout))?
            .context("timed out waiting for the mesh")?;
        if result.id() == id {
            break result;
        }
    };

    match result {
        MeshResult::Surface { mesh, .. } => {
            log::info!("generated in {:.1?}", started.elapsed());
            report(&mesh, cli.indexed);
            Ok(())
        }
        MeshResult::Error { error, .. } => bail!(error),
    }
}
