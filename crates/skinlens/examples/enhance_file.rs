use std::error::Error;
use std::path::Path;

use skinlens::{compose_side_by_side, EnhanceConfig, Enhancer};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <image> <out.png> [config.json] [comparison.png]",
            args[0]
        );
        std::process::exit(2);
    }

    let config = match args.get(3) {
        Some(path) => EnhanceConfig::from_json_file(Path::new(path))?,
        None => EnhanceConfig::default(),
    };
    let enhancer = Enhancer::with_config(config)?;

    let image = skinlens::load_rgb(Path::new(&args[1]))?;
    let enhanced = enhancer.enhance(&image);
    skinlens::save_rgb(Path::new(&args[2]), &enhanced)?;
    println!("Wrote {}", args[2]);

    if let Some(out) = args.get(4) {
        skinlens::save_rgb(Path::new(out), &compose_side_by_side(&image, &enhanced))?;
        println!("Wrote {out}");
    }
    Ok(())
}
