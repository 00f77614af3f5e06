/// Article identifiers come from the store's monotonic sequence and are
/// never reused within a session.
pub type ArticleId = i64;
