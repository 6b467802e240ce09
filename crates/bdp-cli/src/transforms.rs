//! Transform functions compiled into the `bdp` binary.
//!
//! Each module is a transform asset of the demo project; its function is
//! registered under the asset's qualified name.

use bdp_run::TransformRegistry;

#[path = "../../../demo/datasets/raw/base_numbers.rs"]
mod base_numbers;
#[path = "../../../demo/datasets/raw/transformed_numbers.rs"]
mod transformed_numbers;

/// Registry with every compiled-in transform
pub(crate) fn registry() -> TransformRegistry {
    let mut registry = TransformRegistry::new();
    registry
        .register("raw.base_numbers", base_numbers::base_numbers)
        .register(
            "raw.transformed_numbers",
            transformed_numbers::transformed_numbers,
        );
    registry
}
