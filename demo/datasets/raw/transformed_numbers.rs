// dataset.name = transformed_numbers
// dataset.schema = raw
// dataset.description = Sum of the base numbers
// dataset.depends = raw.base_numbers

use bdp_core::{Column, ColumnData, Frame};
use bdp_run::{TransformContext, TransformResult};

pub fn transformed_numbers(ctx: &TransformContext<'_>) -> TransformResult {
    let base = ctx.table("raw.base_numbers")?;
    let total: i64 = match base.column("value") {
        Some(ColumnData::Int(values)) => values.iter().flatten().sum(),
        _ => return Err("raw.base_numbers has no integer column `value`".into()),
    };
    let frame = Frame::new(vec![
        Column::new("total", vec![total]),
        Column::new("row_count", vec![base.height() as i64]),
    ])?;
    Ok(frame)
}
