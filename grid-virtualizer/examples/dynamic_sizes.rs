// Example: per-index sizes, lazy measurement and invalidation.
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use grid_virtualizer::{CellSize, Grid, GridOptions};

fn main() {
    // Row 0 is a header whose height the host can change.
    let header = Arc::new(AtomicU32::new(40));
    let row_height = CellSize::computed({
        let header = Arc::clone(&header);
        move |i| {
            if i == 0 {
                header.load(Ordering::Relaxed)
            } else {
                20 + (i % 3) as u32 * 10
            }
        }
    });
    let column_width = CellSize::computed(|i| if i % 2 == 0 { 80 } else { 140 });

    let mut grid: Grid<String> = Grid::new(
        GridOptions::new(10_000, 200, row_height, column_width)
            .with_estimated_row_size(30)
            .with_size(640, 480),
    );

    grid.render_section();
    println!(
        "rows measured through {:?}, estimated height={}",
        grid.rows().last_measured_index(),
        grid.total_size().height
    );

    // Only the header changed: re-measure from row 0 on the next pass.
    header.store(120, Ordering::Relaxed);
    grid.invalidate_cell_size_after_render(0, 0);

    grid.for_each_cell(
        |p| format!("r{}c{}", p.row, p.column),
        |p, label| {
            if p.column == 0 && p.row < 3 {
                println!("{label}: {:?}", p.style);
            }
        },
    );
}
