use uuid::Uuid;

/// Builds a client-side id of the form `<prefix>-<random>`.
///
/// The random part is a v4 UUID, so ids stay distinct under rapid repeated
/// calls within the same clock tick.
pub fn create_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
