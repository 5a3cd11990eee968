//! Threshold segmentation by seed intensity.
//!
//! A single row-major scan assigns every sample to a segment. Segments are
//! tried in creation order and a sample joins the first one whose seed (the
//! first sample it recorded) is closer than [`SIMILARITY_THRESHOLD`];
//! otherwise the sample seeds a new segment. Only intensity is compared, so a
//! segment can gather samples from anywhere in the grid, and the result
//! depends on scan order. This is not connected-component labelling.
//!
//! Each segment is then rendered black or white depending on its seed.

use ndarray::{Array2, ArrayView2};

use crate::error::{GridError, GridResult};
use crate::grid::{Grid, MAX_INTENSITY, MIN_INTENSITY};

/// Samples closer than this to a seed join its segment.
pub const SIMILARITY_THRESHOLD: f64 = 10.0;

/// Seeds below this render black, the rest white.
pub const BINARY_CUTOFF: f64 = 128.0;

/// Segment assignment produced by [`label_segments`].
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// Segment index of every sample
    pub labels: Array2<usize>,
    /// Seed value of every segment, in creation order
    pub seeds: Vec<f64>,
}

impl Segmentation {
    /// Number of segments found.
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Paint each sample with its segment's binary intensity.
    pub fn render(&self) -> Array2<f64> {
        let colors: Vec<f64> = self
            .seeds
            .iter()
            .map(|&seed| {
                if seed < BINARY_CUTOFF {
                    MIN_INTENSITY
                } else {
                    MAX_INTENSITY
                }
            })
            .collect();

        self.labels.mapv(|label| colors[label])
    }
}

/// Assign every sample of `input` to a segment.
///
/// Fails with `EmptyInput` when `input` has no rows.
pub fn label_segments(input: ArrayView2<f64>) -> GridResult<Segmentation> {
    if input.nrows() == 0 {
        return Err(GridError::EmptyInput(
            "cannot segment a grid with no rows".to_string(),
        ));
    }

    let mut seeds: Vec<f64> = Vec::new();
    let mut labels = Array2::<usize>::zeros(input.dim());

    for ((y, x), &value) in input.indexed_iter() {
        let label = match seeds
            .iter()
            .position(|&seed| (seed - value).abs() < SIMILARITY_THRESHOLD)
        {
            Some(existing) => existing,
            None => {
                seeds.push(value);
                seeds.len() - 1
            }
        };
        labels[[y, x]] = label;
    }

    Ok(Segmentation { labels, seeds })
}

impl Grid {
    /// Replace the grid with its black/white segment rendering.
    pub fn segment(&mut self) -> GridResult<()> {
        let segmentation = label_segments(self.view())?;
        self.replace(segmentation.render());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_uniform_grid() {
        let mut grid = Grid::from_rows(&[[200.0; 4]; 3]).unwrap();
        grid.segment().unwrap();
        assert!(grid.view().iter().all(|&v| v == 255.0));

        let mut dark = Grid::from_rows(&[[3.0; 4]; 3]).unwrap();
        dark.segment().unwrap();
        assert!(dark.view().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_segment_threshold_is_strict() {
        let segmentation = label_segments(
            Grid::from_rows(&[[0.0, 9.0, 10.0]]).unwrap().view(),
        )
        .unwrap();
        assert_eq!(segmentation.len(), 2);
        assert_eq!(segmentation.labels.row(0).to_vec(), vec![0, 0, 1]);
        assert_eq!(segmentation.seeds, vec![0.0, 10.0]);
    }

    #[test]
    fn test_segment_compares_against_seed_not_neighbour() {
        // 9 joins seed 0; 18 is 9 away from its neighbour but 18 from the seed
        let segmentation = label_segments(
            Grid::from_rows(&[[0.0, 9.0, 18.0]]).unwrap().view(),
        )
        .unwrap();
        assert_eq!(segmentation.labels.row(0).to_vec(), vec![0, 0, 1]);
    }

    #[test]
    fn test_segment_first_matching_segment_wins() {
        // 128 is within 10 of both seeds 120 and 130; the older one wins,
        // so it renders black even though it is closer to the white seed
        let mut grid = Grid::from_rows(&[[120.0, 130.0, 128.0]]).unwrap();
        let segmentation = label_segments(grid.view()).unwrap();
        assert_eq!(segmentation.seeds, vec![120.0, 130.0]);
        assert_eq!(segmentation.labels.row(0).to_vec(), vec![0, 1, 0]);

        grid.segment().unwrap();
        assert_eq!(grid.to_rows(), vec![vec![0.0, 255.0, 0.0]]);
    }

    #[test]
    fn test_segment_spatially_distant_samples_share_segment() {
        let mut grid = Grid::from_rows(&[
            [10.0, 200.0, 200.0],
            [200.0, 200.0, 12.0],
        ])
        .unwrap();
        let segmentation = label_segments(grid.view()).unwrap();
        assert_eq!(segmentation.len(), 2);
        assert_eq!(segmentation.labels[[1, 2]], segmentation.labels[[0, 0]]);

        grid.segment().unwrap();
        assert_eq!(
            grid.to_rows(),
            vec![vec![0.0, 255.0, 255.0], vec![255.0, 255.0, 0.0]]
        );
    }

    #[test]
    fn test_segment_cutoff() {
        let mut grid = Grid::from_rows(&[[127.0, 140.0]]).unwrap();
        grid.segment().unwrap();
        // 140 is 13 away from 127, so it seeds its own segment
        assert_eq!(grid.to_rows(), vec![vec![0.0, 255.0]]);
    }

    #[test]
    fn test_segment_empty_grid() {
        let rows: Vec<Vec<f64>> = Vec::new();
        let mut grid = Grid::from_rows(&rows).unwrap();
        assert!(matches!(grid.segment(), Err(GridError::EmptyInput(_))));
    }
}
