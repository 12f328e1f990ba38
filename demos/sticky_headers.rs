// Example: a long list with three levels of nested sticky group headers.
use sticky_virtualizer::{Entry, Mode, VirtualizeOptions, Virtualizer};

fn level_of(id: u64) -> Option<u32> {
    if id % 31 == 0 {
        Some(3)
    } else if id % 19 == 1 {
        Some(2)
    } else if id % 7 == 2 {
        Some(1)
    } else {
        None
    }
}

fn main() {
    let entries: Vec<Entry> = (0..10_000u64)
        .map(|id| {
            let e = Entry::fixed(id, 40);
            match level_of(id) {
                Some(level) => e.with_level(level),
                None => e,
            }
        })
        .collect();

    let v = Virtualizer::new(entries).expect("valid entries");
    println!(
        "entries={} headers={} roots={} total_size={}",
        v.len(),
        v.sticky_tree().len(),
        v.sticky_tree().roots().len(),
        v.total_size()
    );

    let viewport = 600;
    assert_eq!(v.mode(viewport), Mode::Window);

    for scroll in [0u64, 4_010, 123_456, 399_000] {
        let opts = VirtualizeOptions::new(viewport)
            .with_scroll_offset(scroll)
            .with_overscan(2);
        let items = v.virtualize(&opts).expect("valid options");
        let range = v.window_range(&opts).expect("valid options");

        println!("scroll={scroll} range={range:?} items={}", items.len());
        // A real UI would position every item; pinned headers use `render_offset`.
        for it in items.iter().filter(|it| it.sticky.is_some()) {
            println!(
                "  header id={} level={:?} natural={:?} rendered={:?}",
                it.id,
                it.level,
                it.offset,
                it.render_offset(scroll)
            );
        }
    }
}
