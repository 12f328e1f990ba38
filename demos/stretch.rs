// Example: a short sequence stretched to fill a tall viewport.
use sticky_virtualizer::{Entry, Mode, VirtualizeOptions, virtualize};

fn main() {
    let entries = vec![
        Entry::fixed("toolbar", 48),
        Entry::min("summary", 80).with_max_size(160),
        Entry::min("details", 120).with_weight(2.0),
        Entry::min("notes", 60).with_weight(1.0),
        Entry::fixed("footer", 32),
    ];

    for viewport in [340u32, 600, 1_080] {
        let items = virtualize(&VirtualizeOptions::new(viewport), entries.clone())
            .expect("valid entries");
        let total: u32 = items.iter().map(|it| it.size).sum();
        println!("viewport={viewport} filled={total}");
        for it in &items {
            println!("  {:<8} size={}", it.id, it.size);
        }
    }

    // Once content outgrows the viewport, the same entries are windowed instead.
    let v = sticky_virtualizer::Virtualizer::new(entries).expect("valid entries");
    assert_eq!(v.mode(200), Mode::Window);
    let items = v
        .virtualize(&VirtualizeOptions::new(200).with_scroll_offset(100))
        .expect("valid options");
    println!(
        "windowed: {:?}",
        items.iter().map(|it| (it.id, it.offset)).collect::<Vec<_>>()
    );
}
