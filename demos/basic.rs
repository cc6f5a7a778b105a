// Example: minimal usage, scrolling a 1M-item list with estimated sizes.
use windower::{Windower, WindowerOptions};

fn main() {
    let ids: Vec<u64> = (0..1_000_000).collect();
    let options = WindowerOptions::new(30, 24, ids)
        .with_buffer_len(10)
        .with_on_change(Some(|range: windower::Range| {
            println!("window moved: {range:?}");
        }));
    let mut w = Windower::new(options).expect("valid options");

    println!("initial: {:?}", w.get_range());

    // Simulate a scroll session.
    for offset in [0u64, 500, 5_000, 240_000, 12_000_000] {
        w.handle_scroll(offset);
    }
    println!("total extent: {}", w.total_extent());
}
