// dataset.name = base_numbers
// dataset.schema = raw
// dataset.description = Base numbers for demos

use bdp_core::{Column, Frame};
use bdp_run::{TransformContext, TransformResult};

pub fn base_numbers(_ctx: &TransformContext<'_>) -> TransformResult {
    let frame = Frame::new(vec![
        Column::new("value", vec![1i64, 2, 3, 4]),
        Column::new("square", vec![1i64, 4, 9, 16]),
        Column::new("is_even", vec![false, true, false, true]),
        Column::new("label", vec!["one", "two", "three", "four"]),
    ])?;
    Ok(frame)
}
