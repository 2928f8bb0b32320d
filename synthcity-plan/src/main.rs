#![cfg(feature = "generator")]

use std::error::Error;
use std::path::{Path, PathBuf};

use synthcity_core::{City, CityConfig};
use synthcity_plan::generator::render_plan;
use synthcity_plan::plan::PlanGeometry;

const DEFAULT_SEED: u64 = 42;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn parse_seed() -> Result<u64, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(arg) => Ok(arg.parse()?),
        None => Ok(DEFAULT_SEED),
    }
}

fn load_config(root: &Path) -> Result<CityConfig, Box<dyn Error>> {
    let path = root.join("assets").join("city.json");
    if !path.exists() {
        return Ok(CityConfig::default());
    }
    let text = std::fs::read_to_string(&path)?;
    println!("using config {}", path.display());
    Ok(CityConfig::from_json(&text)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let root = workspace_root();
    let seed = parse_seed()?;
    let config = load_config(&root)?;
    PlanGeometry::for_config(&config)?;

    let city = City::generate(config, seed)?;
    let layout = city.layout();
    println!(
        "seed {}: {} buildings, {} vehicles",
        seed,
        layout.buildings.len(),
        layout.vehicles.len()
    );
    if let Some(tallest) = layout.tallest() {
        println!(
            "tallest building: {} floors at cell ({}, {})",
            tallest.height, tallest.cell.col, tallest.cell.row
        );
    }

    let assets = root.join("assets");
    std::fs::create_dir_all(&assets)?;

    let plan_path = assets.join("plan.png");
    render_plan(&layout)?.save(&plan_path)?;
    println!("wrote {}", plan_path.display());

    let layout_path = assets.join("layout.json");
    std::fs::write(&layout_path, layout.to_json()?)?;
    println!("wrote {}", layout_path.display());

    Ok(())
}
