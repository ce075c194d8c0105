use rand::prelude::*;

use crate::data::{FieldValue, ProfileRecord};

const LANGUAGES: [&str; 8] = ["Rust", "Go", "Python", "TypeScript", "C++", "Java", "Kotlin", "Haskell"];

/// One plausible developer profile.
///
/// Stars per repository are log-uniform in `[1, 1000)` so every quality
/// label occurs; repository counts span every complexity bucket.
pub fn synthetic_profile<R: Rng + ?Sized>(id: usize, rng: &mut R) -> ProfileRecord {
    let repos = rng.gen_range(1..150u32) as f64;
    let stars_per_repo = 10f64.powf(rng.r#gen::<f64>() * 3.0);
    let total_stars = (stars_per_repo * repos).round();
    let n_languages = rng.gen_range(0..=LANGUAGES.len());
    let languages: Vec<FieldValue> = LANGUAGES
        .choose_multiple(rng, n_languages)
        .map(|&lang| FieldValue::from(lang))
        .collect();
    let bio = if rng.gen_bool(0.7) { "Building developer tools" } else { "" };

    ProfileRecord::new()
        .with_field("id", format!("dev-{id}"))
        .with_field("github_username", format!("user{id}"))
        .with_field("public_repos", repos)
        .with_field("total_stars", total_stars)
        .with_field("followers", rng.gen_range(0..5000u32) as f64)
        .with_field("languages", languages)
        .with_field("bio", bio)
        .with_field("commit_recency_days", rng.gen_range(0..1500u32) as f64)
}

/// `n` profiles with identifiers `dev-0..dev-n`.
pub fn synthetic_profiles(n: usize, seed: u64) -> Vec<ProfileRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|i| synthetic_profile(i, &mut rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{build_features, Task};

    #[test]
    fn profiles_build_features_for_every_task() {
        for record in synthetic_profiles(25, 3) {
            for task in Task::ALL {
                let features = build_features(&record, task).unwrap();
                assert_eq!(features.len(), task.n_features());
            }
        }
    }

    #[test]
    fn profiles_are_seeded() {
        assert_eq!(synthetic_profiles(5, 1), synthetic_profiles(5, 1));
        assert_ne!(synthetic_profiles(5, 1), synthetic_profiles(5, 2));
    }
}
