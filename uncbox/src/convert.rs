#[allow(clippy::cast_precision_loss)]
pub(crate) fn f64_from_u128(x: u128) -> f64 {
    x as f64
}

pub(crate) fn i32_from_u32(x: u32) -> i32 {
    // UNWRAP: basis indices are tiny compared to `i32::MAX`
    i32::try_from(x).unwrap()
}
