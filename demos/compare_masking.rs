//! Compare leaf features with and without background masking
//!
//! Prints both feature sets for one photograph and optionally writes the
//! masked raster for inspection.

use leaf_health::detection::LeafSegmenter;
use leaf_health::image_loader::load_image;
use leaf_health::preprocessing::ImageNormalizer;
use leaf_health::FeaturePipeline;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <leaf_image> [masked_output.png]", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example compare_masking samples/Tomato_healthy_1.jpeg masked.png");
        process::exit(1);
    }

    let image_path = Path::new(&args[1]);
    let image = match load_image(image_path) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    for (label, masking) in [("Full frame", false), ("Leaf masked", true)] {
        match FeaturePipeline::with_masking(masking).features(&image) {
            Ok(f) => println!(
                "{:<12} hue {:6.2}  saturation {:6.2}  value {:6.2}",
                label, f.avg_hue, f.avg_saturation, f.avg_value
            ),
            Err(e) => {
                eprintln!("{}: {}", label, e);
                process::exit(1);
            }
        }
    }

    let segmentation = match ImageNormalizer::new()
        .normalize(&image)
        .and_then(|normalized| LeafSegmenter::new().segment(&normalized))
    {
        Ok(segmentation) => segmentation,
        Err(e) => {
            eprintln!("Segmentation failed: {}", e);
            process::exit(1);
        }
    };
    println!("Leaf coverage: {:.1}%", segmentation.coverage * 100.0);

    if let Some(output) = args.get(2) {
        match segmentation.masked.save(output) {
            Ok(_) => eprintln!("Masked image saved to {}", output),
            Err(e) => {
                eprintln!("Error saving masked image: {}", e);
                process::exit(1);
            }
        }
    }
}
