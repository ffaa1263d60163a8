use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// External movie identifier, as used by callers and the metadata provider.
pub type MovieId = u64;

/// Error types for the recommender
#[derive(Debug, Error)]
pub enum RecommenderError {
    #[error("movie {0} is not in the similarity index")]
    UnknownMovie(MovieId),

    #[error("duplicate movie id {0} in index")]
    DuplicateMovie(MovieId),

    #[error("similarity matrix row {row} has {found} columns, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("index has {movies} movies but similarity matrix is {matrix}x{matrix}")]
    DimensionMismatch { movies: usize, matrix: usize },

    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Ordered table of movie ids. Row order defines each movie's position in
/// the similarity matrix; ids must be unique.
#[derive(Debug, Clone)]
pub struct MovieIndex {
    ids: Vec<MovieId>,
    positions: HashMap<MovieId, usize>,
}

impl MovieIndex {
    pub fn new(ids: Vec<MovieId>) -> Result<Self, RecommenderError> {
        let mut positions = HashMap::with_capacity(ids.len());
        for (position, &id) in ids.iter().enumerate() {
            if positions.insert(id, position).is_some() {
                return Err(RecommenderError::DuplicateMovie(id));
            }
        }
        Ok(Self { ids, positions })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn position_of(&self, id: MovieId) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    fn id_at(&self, position: usize) -> MovieId {
        self.ids[position]
    }
}

/// Square matrix of precomputed similarity scores, indexed by position.
/// Cell `[i][j]` is the similarity between the movies at positions `i` and
/// `j`; higher means more similar, and `[i][i]` is maximal.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f32>>) -> Result<Self, RecommenderError> {
        let expected = rows.len();
        for (row, scores) in rows.iter().enumerate() {
            if scores.len() != expected {
                return Err(RecommenderError::NotSquare {
                    row,
                    expected,
                    found: scores.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row(&self, position: usize) -> &[f32] {
        &self.rows[position]
    }
}

/// Similarity-based movie recommender.
///
/// Owns the id index and the similarity matrix, both loaded once at startup
/// and immutable afterwards, so a single instance can be shared across
/// request handlers behind an `Arc` without locking.
#[derive(Debug)]
pub struct Recommender {
    index: MovieIndex,
    matrix: SimilarityMatrix,
}

impl Recommender {
    /// Builds a recommender, validating that the index and matrix agree on
    /// the number of movies. A mismatch is fatal: the service must not start
    /// with inconsistent datasets.
    pub fn new(index: MovieIndex, matrix: SimilarityMatrix) -> Result<Self, RecommenderError> {
        if index.len() != matrix.len() {
            return Err(RecommenderError::DimensionMismatch {
                movies: index.len(),
                matrix: matrix.len(),
            });
        }
        Ok(Self { index, matrix })
    }

    /// Loads both datasets from JSON files: an array of movie ids (array
    /// order = matrix position) and an NxN array of similarity scores.
    pub fn from_files(
        index_path: impl AsRef<Path>,
        matrix_path: impl AsRef<Path>,
    ) -> Result<Self, RecommenderError> {
        let ids: Vec<MovieId> = read_json(index_path.as_ref())?;
        let rows: Vec<Vec<f32>> = read_json(matrix_path.as_ref())?;

        let recommender = Self::new(MovieIndex::new(ids)?, SimilarityMatrix::new(rows)?)?;

        tracing::info!(
            movies = recommender.movie_count(),
            "Loaded similarity datasets"
        );

        Ok(recommender)
    }

    /// Number of movies in the loaded datasets.
    pub fn movie_count(&self) -> usize {
        self.index.len()
    }

    /// Returns up to `limit` movie ids most similar to `id`, ordered by
    /// descending similarity score. The query movie itself is excluded by
    /// position, and equal scores break ties by ascending position, so the
    /// output is fully deterministic for a given dataset.
    pub fn recommend(&self, id: MovieId, limit: usize) -> Result<Vec<MovieId>, RecommenderError> {
        let position = self
            .index
            .position_of(id)
            .ok_or(RecommenderError::UnknownMovie(id))?;

        let distances = self.matrix.row(position);

        let mut scored: Vec<(usize, f32)> = distances
            .iter()
            .copied()
            .enumerate()
            .filter(|&(candidate, _)| candidate != position)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let recommendations: Vec<MovieId> = scored
            .into_iter()
            .take(limit)
            .map(|(candidate, _)| self.index.id_at(candidate))
            .collect();

        tracing::debug!(
            movie_id = id,
            limit = limit,
            results = recommendations.len(),
            "Recommendation lookup completed"
        );

        Ok(recommendations)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RecommenderError> {
    let file = File::open(path).map_err(|source| RecommenderError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| RecommenderError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_recommender() -> Recommender {
        // Four movies; row 0 matches the layout used across the route tests.
        let index = MovieIndex::new(vec![10, 20, 30, 40]).unwrap();
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 0.9, 0.2, 0.5],
            vec![0.9, 1.0, 0.4, 0.3],
            vec![0.2, 0.4, 1.0, 0.6],
            vec![0.5, 0.3, 0.6, 1.0],
        ])
        .unwrap();
        Recommender::new(index, matrix).unwrap()
    }

    #[test]
    fn test_recommend_orders_by_descending_similarity() {
        let recommender = create_test_recommender();
        let result = recommender.recommend(10, 2).unwrap();
        assert_eq!(result, vec![20, 40]);
    }

    #[test]
    fn test_recommend_never_returns_query_movie() {
        let recommender = create_test_recommender();
        for id in [10, 20, 30, 40] {
            let result = recommender.recommend(id, 10).unwrap();
            assert!(!result.contains(&id));
            assert_eq!(result.len(), 3);
        }
    }

    #[test]
    fn test_recommend_unknown_movie() {
        let recommender = create_test_recommender();
        let result = recommender.recommend(99, 8);
        assert!(matches!(result, Err(RecommenderError::UnknownMovie(99))));
    }

    #[test]
    fn test_recommend_zero_limit() {
        let recommender = create_test_recommender();
        assert!(recommender.recommend(10, 0).unwrap().is_empty());
    }

    #[test]
    fn test_recommend_limit_exceeding_catalog() {
        let recommender = create_test_recommender();
        let result = recommender.recommend(10, 100).unwrap();
        assert_eq!(result, vec![20, 40, 30]);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let recommender = create_test_recommender();
        let first = recommender.recommend(30, 3).unwrap();
        let second = recommender.recommend(30, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_recommend_smaller_limit_is_prefix_of_larger() {
        let recommender = create_test_recommender();
        for id in [10, 20, 30, 40] {
            for k in 0..3 {
                let shorter = recommender.recommend(id, k).unwrap();
                let longer = recommender.recommend(id, k + 1).unwrap();
                assert_eq!(shorter, longer[..k]);
            }
        }
    }

    #[test]
    fn test_recommend_breaks_ties_by_position() {
        let index = MovieIndex::new(vec![100, 200, 300, 400]).unwrap();
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 0.5, 0.5, 0.5],
            vec![0.5, 1.0, 0.5, 0.5],
            vec![0.5, 0.5, 1.0, 0.5],
            vec![0.5, 0.5, 0.5, 1.0],
        ])
        .unwrap();
        let recommender = Recommender::new(index, matrix).unwrap();

        // All candidates tie at 0.5, so ascending position decides the order.
        assert_eq!(recommender.recommend(100, 3).unwrap(), vec![200, 300, 400]);
        assert_eq!(recommender.recommend(300, 3).unwrap(), vec![100, 200, 400]);
    }

    #[test]
    fn test_recommend_excludes_self_even_when_tied_for_maximum() {
        // A candidate ties the query movie's self-similarity. Explicit
        // position filtering must still drop the query movie, not the tie.
        let index = MovieIndex::new(vec![1, 2, 3]).unwrap();
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 1.0, 0.2],
            vec![1.0, 1.0, 0.1],
            vec![0.2, 0.1, 1.0],
        ])
        .unwrap();
        let recommender = Recommender::new(index, matrix).unwrap();

        assert_eq!(recommender.recommend(2, 2).unwrap(), vec![1, 3]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = MovieIndex::new(vec![10, 20, 10]);
        assert!(matches!(result, Err(RecommenderError::DuplicateMovie(10))));
    }

    #[test]
    fn test_non_square_matrix_rejected() {
        let result = SimilarityMatrix::new(vec![vec![1.0, 0.5], vec![0.5]]);
        assert!(matches!(
            result,
            Err(RecommenderError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let index = MovieIndex::new(vec![10, 20, 30]).unwrap();
        let matrix = SimilarityMatrix::new(vec![vec![1.0, 0.5], vec![0.5, 1.0]]).unwrap();
        let result = Recommender::new(index, matrix);
        assert!(matches!(
            result,
            Err(RecommenderError::DimensionMismatch {
                movies: 3,
                matrix: 2
            })
        ));
    }

    #[test]
    fn test_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let index_path = dir.path().join("movie_ids.json");
        let mut index_file = File::create(&index_path).unwrap();
        write!(index_file, "[10, 20, 30]").unwrap();

        let matrix_path = dir.path().join("similarity.json");
        let mut matrix_file = File::create(&matrix_path).unwrap();
        write!(
            matrix_file,
            "[[1.0, 0.8, 0.1], [0.8, 1.0, 0.3], [0.1, 0.3, 1.0]]"
        )
        .unwrap();

        let recommender = Recommender::from_files(&index_path, &matrix_path).unwrap();
        assert_eq!(recommender.movie_count(), 3);
        assert_eq!(recommender.recommend(10, 8).unwrap(), vec![20, 30]);
    }

    #[test]
    fn test_from_files_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let result = Recommender::from_files(
            dir.path().join("missing.json"),
            dir.path().join("also_missing.json"),
        );
        assert!(matches!(result, Err(RecommenderError::Io { .. })));
    }

    #[test]
    fn test_from_files_malformed_dataset() {
        let dir = tempfile::tempdir().unwrap();

        let index_path = dir.path().join("movie_ids.json");
        let mut index_file = File::create(&index_path).unwrap();
        write!(index_file, "not json").unwrap();

        let matrix_path = dir.path().join("similarity.json");
        let mut matrix_file = File::create(&matrix_path).unwrap();
        write!(matrix_file, "[]").unwrap();

        let result = Recommender::from_files(&index_path, &matrix_path);
        assert!(matches!(result, Err(RecommenderError::Parse { .. })));
    }
}
