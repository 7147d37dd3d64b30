/// Print the effective page configuration
///
/// Run with: cargo run -p hiyaav-config --example print_config

fn main() {
    let config = hiyaav_config::HiyaavConfig::load();

    println!("=== HIYAAV Page Configuration ===\n");

    println!("Scroll:");
    println!("  Duration: {}s", config.scroll.duration_secs);
    println!("  Mouse multiplier: {}", config.scroll.mouse_multiplier);
    println!("  Touch multiplier: {}", config.scroll.touch_multiplier);
    println!("  Smooth touch: {}", config.scroll.smooth_touch);
    println!();

    println!("Reveal:");
    println!("  Threshold: {}", config.reveal.threshold);
    println!("  Root margin: {}px", config.reveal.root_margin_px);
    println!("  Trigger start: top {}%", config.triggers.start_fraction * 100.0);
    println!();

    println!("Cursor:");
    println!("  Min viewport width: {}", config.cursor.min_viewport_width);
    println!(
        "  Sizes: {} resting / {} active",
        config.cursor.resting_size, config.cursor.active_size
    );
    println!();

    println!("Background:");
    println!("  Particles: {}", config.background.particle_count);
    println!("  Camera depth: {}", config.background.camera_depth);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
