// Thu Feb 5 2026 - Alex

use rand::Rng;

// Human-presentable access code, three independent 3-digit groups.
// Collisions are not checked; the space is small enough that the operator
// accepts the birthday risk.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}-{}-{}",
        rng.gen_range(100..=999),
        rng.gen_range(100..=999),
        rng.gen_range(100..=999)
    )
}
