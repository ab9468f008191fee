use crate::stream::Stream;

/// True when `candidate` is a presentation duplicate of anything in
/// `streams`.
pub fn contains_similar_stream(candidate: &Stream, streams: &[Stream]) -> bool {
    streams.iter().any(|s| s.equals_stream(candidate))
}

/// Order-preserving distinct filter over candidate streams.
///
/// Keeps the first occurrence of each presentation and drops later
/// duplicates. Linear scan per candidate; the number of qualities per item
/// is always small. Idempotent: running it on its own output changes
/// nothing.
pub fn dedup_streams(candidates: Vec<Stream>) -> Vec<Stream> {
    let mut distinct: Vec<Stream> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !contains_similar_stream(&candidate, &distinct) {
            distinct.push(candidate);
        }
    }
    distinct
}
