use serde::Serialize;

/// Envelope returned by every API operation: the upstream HTTP status plus
/// the extracted records. The HTTP layer forwards this verbatim as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentList<T> {
    pub status: u16,
    pub segments: Vec<T>,
}
