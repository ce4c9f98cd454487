use gridindex::{LatLong, OverlayConfig, OverlayContext, Scheme};

// Tokyo Station
const CENTER_LAT: f64 = 35.681;
const CENTER_LON: f64 = 139.767;
const ZOOM_LEVELS: [u8; 3] = [6, 10, 14];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let center = LatLong::new(CENTER_LAT, CENTER_LON);
    let mut overlay = OverlayContext::new(OverlayConfig::default());

    for scheme in Scheme::ALL {
        overlay.set_scheme(scheme);
        for zoom in ZOOM_LEVELS {
            println!("=== {} at zoom {} ===", scheme, zoom);
            match overlay.update(&center, zoom)? {
                None => println!("(unchanged)"),
                Some(cells) => {
                    for cell in cells.iter().take(8) {
                        let label = if cell.labels.show_long() {
                            &cell.labels.long
                        } else {
                            &cell.labels.short
                        };
                        println!(
                            "{:>14} [{:.5}, {:.5}] - [{:.5}, {:.5}]",
                            label,
                            cell.bbox.min_latitude,
                            cell.bbox.min_longitude,
                            cell.bbox.max_latitude,
                            cell.bbox.max_longitude
                        );
                    }
                    if cells.len() > 8 {
                        println!("... {} cells in total", cells.len());
                    }
                }
            }
        }
    }

    println!(
        "Layer cache: {} entries, {} hits, {} misses",
        overlay.layer_cache().len(),
        overlay.layer_cache().hits(),
        overlay.layer_cache().misses()
    );
    Ok(())
}
