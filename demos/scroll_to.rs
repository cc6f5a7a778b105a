// Example: "scroll to index" with a fixed header in front of the list.
use windower::{Windower, WindowerOptions};

fn main() {
    let ids: Vec<u64> = (0..50_000).collect();
    let mut w = Windower::new(
        WindowerOptions::new(25, 32, ids)
            .with_buffer_len(8)
            .with_leading_offset(120),
    )
    .expect("valid options");

    let target = 31_337;
    let offset = w.get_offset_for_index(target);
    println!("item {target} sits at scroll offset {offset}");

    w.handle_scroll(offset);
    let r = w.get_range();
    assert!(r.contains(target));
    println!("window now {}..={}", r.start, r.end);
}
