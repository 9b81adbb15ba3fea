// Example: content taller than the host can scroll is mapped onto a capped scroll range.
use grid_virtualizer::{Grid, GridOptions};

fn main() {
    let options = GridOptions::new(10_000_000, 1, 50u32, 300u32)
        .with_size(300, 800)
        .with_max_scroll_size(Some(1_500_000));
    let mut grid: Grid = Grid::new(options);

    let total = grid.total_size();
    println!(
        "content height={} scroll height={}",
        grid.rows().content_size(),
        total.height
    );

    // Scroll to the middle of the scrollbar.
    let middle = (total.height - 800) / 2;
    grid.handle_scroll_event(0.0, middle as f64, 0);
    let section = grid.render_section();
    println!("section={section:?}");
    println!("offsets_adjusted={}", grid.rows().offsets_adjusted());
}
