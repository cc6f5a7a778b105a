// Example: variable item sizes. Record measurements as "elements" appear,
// and watch the classification and paddings react.
use windower::{Sizing, Windower, WindowerOptions};

fn main() {
    let ids: Vec<u64> = (0..10_000).collect();
    let mut w = Windower::new(WindowerOptions::new(20, 40, ids).with_buffer_len(5))
        .expect("valid options");

    // Measure the initially rendered window: all rows happen to be 40 tall,
    // so the engine keeps the uniform hypothesis.
    for id in 0..20u64 {
        w.record_size(id, 40);
    }
    println!("after first window: {:?}", w.sizing());
    assert_eq!(w.sizing(), Sizing::Uniform(40));

    // One expanded row flips the list to variable sizing for good.
    w.record_size(7, 160);
    println!("after expansion: {:?}", w.sizing());

    w.handle_scroll(3_000);
    let r = w.get_range();
    println!(
        "range {}..={}  pad_front={} pad_behind={}",
        r.start, r.end, r.pad_front, r.pad_behind
    );
}
