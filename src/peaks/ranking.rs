//! Distance ranking of peak records
//!
//! Results are kept as a sorted list of (distance, record) pairs. Ties on
//! distance are broken by node id (records without an id last) and then by
//! name, so equal distances never displace each other.

use crate::coord::{haversine_distance, Coordinates};
use crate::peaks::PeakRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A peak together with its distance from the search center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPeak {
    pub distance_meters: f64,
    pub peak: PeakRecord,
}

/// Distance-sorted, size-bounded search output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResult {
    peaks: Vec<RankedPeak>,
}

impl RankedResult {
    /// An empty result (nothing found within the search ceiling)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rank `records` by distance from `center`, keeping at most `max_results`
    ///
    /// Records sharing a node id are collapsed to the first occurrence.
    pub fn rank(center: Coordinates, records: Vec<PeakRecord>, max_results: usize) -> Self {
        let mut seen_ids = HashSet::new();
        let mut peaks: Vec<RankedPeak> = records
            .into_iter()
            .filter(|record| record.id.map_or(true, |id| seen_ids.insert(id)))
            .map(|peak| RankedPeak {
                distance_meters: haversine_distance(center, peak.coords),
                peak,
            })
            .collect();

        peaks.sort_by(compare_ranked);
        peaks.truncate(max_results);

        Self { peaks }
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// The closest peak, if any
    pub fn nearest(&self) -> Option<&RankedPeak> {
        self.peaks.first()
    }

    /// Peak at a zero-based rank
    pub fn get(&self, index: usize) -> Option<&RankedPeak> {
        self.peaks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedPeak> {
        self.peaks.iter()
    }

    /// Distances in ranking order
    pub fn distances(&self) -> Vec<f64> {
        self.peaks.iter().map(|p| p.distance_meters).collect()
    }

    pub fn into_vec(self) -> Vec<RankedPeak> {
        self.peaks
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a RankedPeak;
    type IntoIter = std::slice::Iter<'a, RankedPeak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

fn compare_ranked(a: &RankedPeak, b: &RankedPeak) -> Ordering {
    a.distance_meters
        .total_cmp(&b.distance_meters)
        .then_with(|| compare_ids(a.peak.id, b.peak.id))
        .then_with(|| a.peak.name.cmp(&b.peak.name))
}

fn compare_ids(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(id: i64, name: &str, lat: f64, lng: f64) -> PeakRecord {
        PeakRecord::new(Some(id), name, Coordinates::new(lat, lng))
    }

    #[test]
    fn test_rank_sorts_ascending() {
        let center = Coordinates::new(46.0, 8.0);
        let records = vec![
            peak(1, "Far", 46.3, 8.0),
            peak(2, "Near", 46.01, 8.0),
            peak(3, "Middle", 46.1, 8.0),
        ];

        let ranked = RankedResult::rank(center, records, 10);

        let names: Vec<&str> = ranked.iter().map(|r| r.peak.name.as_str()).collect();
        assert_eq!(names, vec!["Near", "Middle", "Far"]);
        assert_eq!(ranked.nearest().unwrap().peak.id, Some(2));
    }

    #[test]
    fn test_rank_truncates() {
        let center = Coordinates::new(0.0, 0.0);
        let records = (1..=8)
            .map(|i| peak(i, &format!("P{}", i), 0.0, i as f64 * 0.01))
            .collect();

        let ranked = RankedResult::rank(center, records, 5);

        assert_eq!(ranked.len(), 5);
        let distances = ranked.distances();
        assert!(distances.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ranked.get(4).unwrap().peak.name, "P5");
        assert!(ranked.get(5).is_none());
    }

    #[test]
    fn test_equal_distances_are_both_kept() {
        let center = Coordinates::new(0.0, 0.0);
        // Mirror images across the meridian are exactly equidistant
        let records = vec![peak(20, "East", 0.0, 0.05), peak(10, "West", 0.0, -0.05)];

        let ranked = RankedResult::rank(center, records, 5);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked.distances()[0], ranked.distances()[1]);
        assert_eq!(ranked.get(0).unwrap().peak.name, "West");
        assert_eq!(ranked.get(1).unwrap().peak.name, "East");
    }

    #[test]
    fn test_missing_id_sorts_after_known_id_on_tie() {
        let center = Coordinates::new(0.0, 0.0);
        let records = vec![
            PeakRecord::new(None, "Anonymous", Coordinates::new(0.0, 0.05)),
            peak(7, "Known", 0.0, -0.05),
        ];

        let ranked = RankedResult::rank(center, records, 5);

        assert_eq!(ranked.get(0).unwrap().peak.name, "Known");
        assert_eq!(ranked.get(1).unwrap().peak.name, "Anonymous");
    }

    #[test]
    fn test_duplicate_ids_collapsed() {
        let center = Coordinates::new(0.0, 0.0);
        let records = vec![
            peak(5, "First", 0.0, 0.02),
            peak(5, "Second copy", 0.0, 0.01),
            PeakRecord::new(None, "No id", Coordinates::new(0.0, 0.03)),
            PeakRecord::new(None, "No id either", Coordinates::new(0.0, 0.04)),
        ];

        let ranked = RankedResult::rank(center, records, 10);

        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().any(|r| r.peak.name == "First"));
        assert!(!ranked.iter().any(|r| r.peak.name == "Second copy"));
    }

    #[test]
    fn test_empty() {
        let ranked = RankedResult::rank(Coordinates::new(0.0, 0.0), vec![], 5);
        assert!(ranked.is_empty());
        assert_eq!(ranked, RankedResult::empty());
        assert!(ranked.nearest().is_none());
    }

    #[test]
    fn test_serializes_as_list() {
        let center = Coordinates::new(0.0, 0.0);
        let ranked = RankedResult::rank(center, vec![peak(1, "A", 0.0, 0.01)], 5);
        let json = serde_json::to_value(&ranked).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["peak"]["name"], "A");
    }
}
