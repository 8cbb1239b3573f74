use chrono::Utc;

/// Clock behind the scheduling logic. Injectable so tests can pin "now"
/// to a fixed instant.
pub trait ISys: Send + Sync {
    /// Milliseconds since the unix epoch
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall clock, used outside of tests
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
