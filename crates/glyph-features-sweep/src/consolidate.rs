use std::ops::Range;

/// Consolidated run sequence for one angle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Consolidation {
    /// Accepted crossing counts, in ray order.
    pub runs: Vec<u32>,
    /// Ray spans attributed to each run, as `(run index, rays)`.
    pub spans: Vec<(usize, Range<usize>)>,
}

/// Collapse per-ray crossing counts into runs.
///
/// Rays `0 .. len - 2` are scanned. A count that differs from the last
/// accepted one is accepted only when the next ray repeats it, which
/// filters single-ray flicker. On acceptance the rays since the previous
/// acceptance are attributed to the previous run; rays before the first
/// accepted run belong to no run. The rays from the last acceptance to the
/// end are attributed to the final run.
pub fn consolidate(raw: &[u32]) -> Consolidation {
    let mut out = Consolidation::default();
    let mut last_index: Option<usize> = None;

    for i in 0..raw.len().saturating_sub(2) {
        let count = raw[i];
        if out.runs.last() == Some(&count) || count != raw[i + 1] {
            continue;
        }
        if let (Some(prev_run), Some(start)) = (out.runs.len().checked_sub(1), last_index) {
            if start < i {
                out.spans.push((prev_run, start..i));
            }
        }
        out.runs.push(count);
        last_index = Some(i);
    }

    if let (Some(final_run), Some(start)) = (out.runs.len().checked_sub(1), last_index) {
        out.spans.push((final_run, start..raw.len()));
    }
    out
}
