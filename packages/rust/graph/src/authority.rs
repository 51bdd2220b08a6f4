//! Authority scoring for citation-derived nodes.

use citelens_shared::SourceType;
use citelens_shared::score::{clamp_unit, round3};

/// Largest boost a top-ranked citation can earn.
const MAX_RANK_BOOST: f64 = 0.2;

/// Authority of a source type before rank and confidence adjustments.
pub fn base_authority(source_type: SourceType) -> f64 {
    match source_type {
        SourceType::LicensedPublisher => 0.9,
        SourceType::Curated => 0.8,
        SourceType::Directory => 0.7,
        SourceType::Reddit => 0.6,
        SourceType::UserGenerated => 0.4,
    }
}

/// Base authority, plus up to `0.2 * (10 - rank) / 10` for ranked citations
/// (capped at 1.0), then averaged with the supplied confidence.
pub fn calculate_authority_score(
    source_type: SourceType,
    rank: Option<u32>,
    confidence: Option<f64>,
) -> f64 {
    let mut score = base_authority(source_type);

    if let Some(rank) = rank {
        let boost = (MAX_RANK_BOOST * (10.0 - f64::from(rank)) / 10.0).clamp(0.0, MAX_RANK_BOOST);
        score = (score + boost).min(1.0);
    }

    if let Some(confidence) = confidence {
        score = (score + clamp_unit(confidence)) / 2.0;
    }

    round3(clamp_unit(score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_scores() {
        assert_eq!(calculate_authority_score(SourceType::LicensedPublisher, None, None), 0.9);
        assert_eq!(calculate_authority_score(SourceType::Curated, None, None), 0.8);
        assert_eq!(calculate_authority_score(SourceType::Directory, None, None), 0.7);
        assert_eq!(calculate_authority_score(SourceType::Reddit, None, None), 0.6);
        assert_eq!(calculate_authority_score(SourceType::UserGenerated, None, None), 0.4);
    }

    #[test]
    fn rank_boost_is_capped() {
        // 0.9 + 0.18 would exceed 1.0
        assert_eq!(calculate_authority_score(SourceType::LicensedPublisher, Some(1), None), 1.0);
        assert_eq!(calculate_authority_score(SourceType::Directory, Some(1), None), 0.88);
        assert_eq!(calculate_authority_score(SourceType::Directory, Some(5), None), 0.8);
    }

    #[test]
    fn low_ranks_earn_nothing() {
        assert_eq!(calculate_authority_score(SourceType::Reddit, Some(10), None), 0.6);
        assert_eq!(calculate_authority_score(SourceType::Reddit, Some(25), None), 0.6);
    }

    #[test]
    fn confidence_is_averaged_in() {
        assert_eq!(
            calculate_authority_score(SourceType::Directory, Some(3), Some(0.8)),
            0.82
        );
        assert_eq!(calculate_authority_score(SourceType::UserGenerated, None, Some(5.0)), 0.7);
        assert_eq!(
            calculate_authority_score(SourceType::UserGenerated, None, Some(f64::NAN)),
            0.2
        );
    }
}
