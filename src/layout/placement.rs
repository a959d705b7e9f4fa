//! Column placement: turns a column assignment into top-left positions.

use super::types::{ColumnAssignment, SubcomponentSummary};
use crate::config::Graphics;
use crate::geometry::{Point, Size};

/// Stack each column top-to-bottom in declaration order, centre members
/// horizontally within the column and centre columns vertically against the
/// tallest one.
///
/// `min_height` is the least interior height the caller needs (room for the
/// chip's own boundary pins).
pub fn place_columns(
    subcomponents: &[SubcomponentSummary],
    assignment: &ColumnAssignment,
    graphics: &Graphics,
    min_height: f64,
) -> (Vec<Point>, Size) {
    let pad_x = graphics.column_padding;
    let pad_y = graphics.row_padding;

    let mut positions = vec![Point::default(); subcomponents.len()];
    let mut column_heights = vec![0.0_f64; assignment.n_columns];

    let mut x_offset = pad_x;
    for (col, column_height) in column_heights.iter_mut().enumerate() {
        let members: Vec<usize> = assignment
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == col)
            .map(|(i, _)| i)
            .collect();

        let max_width = members
            .iter()
            .map(|&i| subcomponents[i].width)
            .fold(0.0, f64::max);

        let mut y_offset = pad_y;
        for &i in &members {
            let centering = (max_width - subcomponents[i].width) / 2.0;
            positions[i] = Point::new(x_offset + centering, y_offset);
            y_offset += subcomponents[i].height + pad_y;
        }
        *column_height = y_offset;

        x_offset += max_width + pad_x;
    }

    let max_height = column_heights.iter().copied().fold(min_height, f64::max);

    // One more pass to centre columns vertically.
    for (i, p) in positions.iter_mut().enumerate() {
        let col = assignment.columns[i];
        p.y += (max_height - column_heights[col]) / 2.0;
    }

    (positions, Size::new(x_offset, max_height))
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_placement.rs"]
mod tests;
