/// Segments of a version string that contribute to its rank
const RANKED_SEGMENTS: usize = 3;

/// Leading characters of each segment that are parsed
const SEGMENT_DIGITS: usize = 2;

const SEGMENT_WEIGHT: i64 = 100;

/// Comparable integer for a dotted version string.
///
/// Only the first three segments count, and only the first two characters of
/// each. Unparsable segments count as zero. The rightmost considered segment
/// has weight 1, the one before it 100, then 10000. Consequently
/// `rank("1.2.3.4") == rank("1.2.3")` and `rank("1.123") == rank("1.12")`.
pub fn rank(version: &str) -> i64 {
    version
        .split('.')
        .take(RANKED_SEGMENTS)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .fold((0i64, 1i64), |(acc, weight), segment| {
            let head: String = segment.chars().take(SEGMENT_DIGITS).collect();
            let value = head.parse::<i64>().unwrap_or(0);
            (acc + value * weight, weight * SEGMENT_WEIGHT)
        })
        .0
}
