// Example: minimal usage, a host scroll event, and scroll-to-cell.
use grid_virtualizer::{Align, Grid, GridOptions};

fn main() {
    // 100k rows of 30px, 50 columns of 120px, in an 800x600 viewport.
    let options = GridOptions::new(100_000, 50, 30u32, 120u32)
        .with_size(800, 600)
        .with_overscan(5, 1);
    let mut grid: Grid = Grid::new(options);

    println!("total_size={:?}", grid.total_size());
    println!("section={:?}", grid.render_section());

    // The host's scroll container moved.
    let transition = grid.handle_scroll_event(240.0, 45_000.0, 0);
    println!("transition={transition:?} position={:?}", grid.scroll_position());

    let mut rendered = 0usize;
    grid.for_each_cell(|_| (), |_, _| rendered += 1);
    println!("rendered_cells={rendered} section={:?}", grid.rendered_section());

    // Quiet period elapses; the burst settles.
    println!("tick={:?}", grid.tick(200));

    grid.update_options(|o| o.scroll_to_alignment = Align::Center);
    grid.scroll_to_cell(Some(99_999), Some(49));
    println!(
        "after scroll_to_cell: write_back={:?}",
        grid.requested_scroll_position()
    );
}
