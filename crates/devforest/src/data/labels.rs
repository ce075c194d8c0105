//! Threshold rules that derive training labels from raw records.
//!
//! Profiles are not hand-labeled; training sets are built by bucketing the
//! popularity signals below and letting the forest learn the boundary from
//! the full feature vector.

use super::features::{count, stars_per_repo};
use super::record::ProfileRecord;
use super::task::{ComplexityLabel, QualityLabel, Task};
use crate::error::SchemaError;

/// Quality from stars per repository: `<10` Low, `<50` Medium, `<200` High, else Excellent.
pub fn quality_label(record: &ProfileRecord) -> Result<QualityLabel, SchemaError> {
    let stars_per_repo = stars_per_repo(record)?;
    Ok(if stars_per_repo >= 200.0 {
        QualityLabel::Excellent
    } else if stars_per_repo >= 50.0 {
        QualityLabel::High
    } else if stars_per_repo >= 10.0 {
        QualityLabel::Medium
    } else {
        QualityLabel::Low
    })
}

/// Complexity from total stars and repository count, whichever is higher.
pub fn complexity_label(record: &ProfileRecord) -> Result<ComplexityLabel, SchemaError> {
    let stars = count(record, "total_stars")?;
    let repos = count(record, "public_repos")?;
    Ok(if stars >= 100_000.0 || repos >= 100.0 {
        ComplexityLabel::Advanced
    } else if stars >= 10_000.0 || repos >= 50.0 {
        ComplexityLabel::Complex
    } else if stars >= 1_000.0 || repos >= 10.0 {
        ComplexityLabel::Medium
    } else {
        ComplexityLabel::Simple
    })
}

/// Class index of the heuristic label for `task`.
pub fn heuristic_label(task: Task, record: &ProfileRecord) -> Result<u32, SchemaError> {
    match task {
        Task::Quality => quality_label(record).map(QualityLabel::index),
        Task::Complexity => complexity_label(record).map(ComplexityLabel::index),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, QualityLabel::Low)]
    #[case(9.99, QualityLabel::Low)]
    #[case(10.0, QualityLabel::Medium)]
    #[case(49.0, QualityLabel::Medium)]
    #[case(50.0, QualityLabel::High)]
    #[case(199.5, QualityLabel::High)]
    #[case(200.0, QualityLabel::Excellent)]
    fn quality_thresholds(#[case] stars_per_repo: f64, #[case] expected: QualityLabel) {
        let record = ProfileRecord::new().with_field("stars_per_repo", stars_per_repo);
        assert_eq!(quality_label(&record).unwrap(), expected);
    }

    #[rstest]
    #[case(0.0, 0.0, ComplexityLabel::Simple)]
    #[case(999.0, 9.0, ComplexityLabel::Simple)]
    #[case(1_000.0, 0.0, ComplexityLabel::Medium)]
    #[case(0.0, 10.0, ComplexityLabel::Medium)]
    #[case(10_000.0, 1.0, ComplexityLabel::Complex)]
    #[case(5.0, 50.0, ComplexityLabel::Complex)]
    #[case(100_000.0, 1.0, ComplexityLabel::Advanced)]
    #[case(0.0, 100.0, ComplexityLabel::Advanced)]
    fn complexity_thresholds(
        #[case] stars: f64,
        #[case] repos: f64,
        #[case] expected: ComplexityLabel,
    ) {
        let record = ProfileRecord::new()
            .with_field("total_stars", stars)
            .with_field("public_repos", repos);
        assert_eq!(complexity_label(&record).unwrap(), expected);
    }

    #[test]
    fn quality_derives_ratio_when_missing() {
        let record = ProfileRecord::new()
            .with_field("total_stars", 600.0)
            .with_field("public_repos", 3.0);
        assert_eq!(quality_label(&record).unwrap(), QualityLabel::Excellent);
    }

    #[test]
    fn labels_reject_what_features_reject() {
        for record in [
            ProfileRecord::new().with_field("total_stars", -5.0),
            ProfileRecord::new().with_field("public_repos", "many"),
        ] {
            for task in Task::ALL {
                assert!(heuristic_label(task, &record).is_err(), "{task}: {record:?}");
                assert!(crate::data::build_features(&record, task).is_err(), "{task}: {record:?}");
            }
        }
        let record = ProfileRecord::new().with_field("stars_per_repo", -1.0);
        assert!(matches!(
            quality_label(&record),
            Err(SchemaError::InvalidField { ref field, .. }) if field == "stars_per_repo"
        ));
    }

    #[test]
    fn heuristic_label_dispatches_by_task() {
        let record = ProfileRecord::new()
            .with_field("stars_per_repo", 60.0)
            .with_field("public_repos", 120.0);
        assert_eq!(heuristic_label(Task::Quality, &record).unwrap(), 2);
        assert_eq!(heuristic_label(Task::Complexity, &record).unwrap(), 3);
    }
}
