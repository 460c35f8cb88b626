pub const DESCRIBE_DEFAULT: &str = include_str!("../data/prompts/describe_default.txt");
pub const CALORIE_COUNT: &str = include_str!("../data/prompts/calorie_count.txt");

/// Default prompt for `describe_image` when the caller sends none.
pub fn describe_default() -> &'static str {
    DESCRIBE_DEFAULT.trim()
}

/// Fixed instruction for the calorie-count variant.
pub fn calorie_count() -> &'static str {
    CALORIE_COUNT.trim()
}
