//! Gallery grid layout
//!
//! Fixed 4 columns. Slot 0 is always the "add photo" link, photos follow in list
//! order, and the last row is padded with empty cells.

use gallery_core::Photo;

pub const GRID_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridSlot<'a> {
    AddPhoto,
    Photo(&'a Photo),
    Empty,
}

/// `ceil((photo_count + 1) / GRID_COLUMNS)`
pub fn grid_rows(photo_count: usize) -> usize {
    (photo_count + 1).div_ceil(GRID_COLUMNS)
}

/// Row-major slots for the given photos
pub fn layout_grid(photos: &[Photo]) -> Vec<Vec<GridSlot<'_>>> {
    let rows = grid_rows(photos.len());
    (0..rows)
        .map(|row| {
            (0..GRID_COLUMNS)
                .map(|col| match row * GRID_COLUMNS + col {
                    0 => GridSlot::AddPhoto,
                    index => photos
                        .get(index - 1)
                        .map(GridSlot::Photo)
                        .unwrap_or(GridSlot::Empty),
                })
                .collect()
        })
        .collect()
}
