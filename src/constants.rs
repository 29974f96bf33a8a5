pub const COMMENT_CHAR: char = ';';

pub const ASSIGN_CHAR: u8 = b'=';

/// String values starting with this token are engine class references and are
/// written back without quotes, even inside struct literals.
pub const CLASS_REFERENCE_PREFIX: &str = "Class'";

/// Fractional digits emitted for every float value.
pub const FLOAT_PRECISION: usize = 6;

/// An indexed array key: ends in `]`, contains `[`, and the `[` is not the
/// first character (a header line is not an indexed key).
#[inline]
pub fn has_array_index(key: &str) -> bool {
    !key.starts_with('[') && key.ends_with(']') && key.contains('[')
}

/// Strips the `[n]` suffix from an indexed array key.
#[inline]
pub fn strip_array_index(key: &str) -> &str {
    match key.find('[') {
        Some(pos) => &key[..pos],
        None => key,
    }
}
