use std::time::Instant;

use feedtui::feed::{filter_indices, sort_indices, FilterConfig, StatusStore};
use feedtui::window::compute_window;

fn main() {
    // Check for --clear-cache flag
    let clear_cache = std::env::args().any(|a| a == "--clear-cache");

    if clear_cache {
        if let Some(cache_dir) = dirs::cache_dir() {
            let cache_file = cache_dir.join("feedtui/items.bin");
            let _ = std::fs::remove_file(&cache_file);
            println!("Cleared cache");
        }
    }

    let feed_dir = std::env::args()
        .nth(1)
        .filter(|a| a != "--clear-cache")
        .unwrap_or_else(|| shellexpand::tilde("~/.local/share/feedtui/feed").to_string());

    println!("Scanning: {}", feed_dir);
    println!(
        "Available parallelism: {:?}",
        std::thread::available_parallelism()
    );

    let start = Instant::now();

    match feedtui::feed::scan_feed(&feed_dir, |current, total| {
        if current % 5000 == 0 {
            println!("Scan progress: {}/{}", current, total);
        }
    }) {
        Ok(items) => {
            let scan_duration = start.elapsed();
            println!("Scanned {} items in {:?}", items.len(), scan_duration);
            println!(
                "Rate: {:.0} items/sec",
                items.len() as f64 / scan_duration.as_secs_f64()
            );

            // Now benchmark the full filter -> sort -> window pass
            let store = StatusStore::load();
            let pass_start = Instant::now();
            let filtered = filter_indices(&items, &FilterConfig::default());
            let sorted = sort_indices(&items, filtered, store.done_ids(), store.snoozed_ids());
            let window = compute_window(0, 600, 88, 5, sorted.len().min(20));
            let pass_duration = pass_start.elapsed();

            println!(
                "\nFiltered+sorted {} items in {:?} (window {}..{})",
                sorted.len(),
                pass_duration,
                window.start,
                window.end
            );
            println!("\nTotal: {:?}", start.elapsed());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
        }
    }
}
