// Example: an adapter driving a Controller from simulated host events.
use grid_virtualizer::GridOptions;
use grid_virtualizer_adapter::{Controller, GridCallbacks};

fn main() {
    let callbacks = GridCallbacks::new()
        .with_on_scroll(|info| println!("on_scroll {info:?}"))
        .with_on_section_rendered(|s| {
            println!(
                "on_section_rendered rows={:?} columns={:?}",
                s.row_overscan, s.column_overscan
            )
        })
        .with_on_scrollbar_presence_change(|c| println!("on_scrollbar_presence_change {c:?}"));

    let mut c: Controller<String> = Controller::new(
        GridOptions::new(5_000, 20, 24u32, 96u32)
            .with_size(480, 240)
            .with_scrollbar_size(12),
    )
    .with_callbacks(callbacks);

    let frame = c.render(|p| format!("{}:{}", p.row, p.column));
    println!("first frame: {} cells", frame.cells.len());

    // Wheel events, 16ms apart.
    for (i, top) in [24.0, 72.0, 150.5, 300.0].into_iter().enumerate() {
        let now = i as u64 * 16;
        c.on_scroll(0.0, top, now);
        c.tick(now);
        c.render(|p| format!("{}:{}", p.row, p.column));
    }
    println!("settled: {:?}", c.tick(500));

    // A programmatic jump must be mirrored by the host's scroll container.
    c.scroll_to_cell(Some(4_000), Some(19));
    let frame = c.render(|p| format!("{}:{}", p.row, p.column));
    if let Some(position) = frame.scroll_to {
        println!("host should scroll to {position:?}");
    }
}
