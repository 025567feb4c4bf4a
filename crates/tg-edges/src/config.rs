use serde::Deserialize;

/// Edge Builder parameters.  Field names match the JSON option names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgesConfig {
    /// Largest squared centroid distance at which Phase A merges clusters.
    pub max_intracluster_distance: f64,
    /// Per-round growth of the Phase A threshold, as a fraction of the max.
    pub max_intracluster_distance_growthfactor: f64,
    /// Slack applied to each cluster's nearest-neighbour distance in Phase B.
    pub post_cluster_max_intracluster_distancefactor: f64,
    /// K nearest stations defining a loose station's neighbourhood.
    pub loosestations_neighbourcount: usize,
    /// Neighbourhoods sparser than `diagonal · factor` are skipped.
    pub loosestations_max_range_factor: f64,
    /// Steps taken outward from a loose station before giving up.
    pub loosestations_max_iterations: usize,
    /// Step length and search radius, relative to the neighbourhood spacing.
    pub loosestations_search_radius_factor: f64,
}

impl Default for EdgesConfig {
    fn default() -> Self {
        Self {
            max_intracluster_distance:                    100.0,
            max_intracluster_distance_growthfactor:       0.1,
            post_cluster_max_intracluster_distancefactor: 1.5,
            loosestations_neighbourcount:                 3,
            loosestations_max_range_factor:               0.3,
            loosestations_max_iterations:                 10,
            loosestations_search_radius_factor:           0.5,
        }
    }
}
