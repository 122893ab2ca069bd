//! Random forest regressor
//!
//! Regression-only CART ensemble: each tree is grown on a bootstrap sample
//! with a random feature subset per split, thresholds at midpoints between
//! adjacent observed values, and variance reduction as the split criterion.
//! Leaves predict the mean target; the forest averages its trees.

use crate::error::{PredictError, Result};
use crate::features::FeatureTable;
use crate::models::{Regressor, TrainedRegressor};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Random forest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    pub n_trees: usize,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Features considered per split (all if None)
    pub max_features: Option<usize>,
    /// Draw bootstrap samples per tree
    pub bootstrap: bool,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 500,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            bootstrap: true,
            seed: 123,
        }
    }
}

/// Node of a fitted regression tree
#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn traverse(&self, row: &[f64]) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

/// Random forest regressor
#[derive(Debug, Clone)]
pub struct RandomForestRegressor {
    name: String,
    config: ForestConfig,
}

/// Fitted random forest
#[derive(Debug)]
pub struct TrainedRandomForest {
    name: String,
    n_features: usize,
    trees: Vec<Node>,
    feature_importances: Vec<f64>,
}

impl RandomForestRegressor {
    /// Create a forest with the given configuration
    pub fn new(config: ForestConfig) -> Result<Self> {
        if config.n_trees == 0 {
            return Err(PredictError::ValidationError(
                "Forest must have at least one tree".to_string(),
            ));
        }
        if config.max_depth == 0 {
            return Err(PredictError::ValidationError(
                "Tree depth must be at least 1".to_string(),
            ));
        }
        if config.min_samples_leaf == 0 {
            return Err(PredictError::ValidationError(
                "Leaves must hold at least one sample".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Random Forest (trees={})", config.n_trees),
            config,
        })
    }

    /// Create a forest with default settings and an explicit seed
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::new(ForestConfig {
            seed,
            ..ForestConfig::default()
        })
    }
}

impl Regressor for RandomForestRegressor {
    type Trained = TrainedRandomForest;

    fn fit(&self, table: &FeatureTable) -> Result<Self::Trained> {
        if table.is_empty() {
            return Err(PredictError::ModelFailure(
                "Cannot fit a forest on an empty feature table".to_string(),
            ));
        }

        let rows = table.rows();
        let targets = table.targets();
        let n_samples = rows.len();
        let n_features = table.feature_set().len();

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut trees = Vec::with_capacity(self.config.n_trees);
        let mut importances = vec![0.0; n_features];

        for _ in 0..self.config.n_trees {
            let indices: Vec<usize> = if self.config.bootstrap {
                (0..n_samples)
                    .map(|_| rng.gen_range(0..n_samples))
                    .collect()
            } else {
                (0..n_samples).collect()
            };

            let mut builder = TreeBuilder {
                config: &self.config,
                rows,
                targets,
                importances: &mut importances,
            };
            trees.push(builder.build(&indices, 0, &mut rng));
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }

        Ok(TrainedRandomForest {
            name: self.name.clone(),
            n_features,
            trees,
            feature_importances: importances,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedRandomForest {
    /// Normalized impurity-decrease importance per feature, in feature-set
    /// order
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// Number of trees in the fitted ensemble
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

impl TrainedRegressor for TrainedRandomForest {
    fn predict_one(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.n_features {
            return Err(PredictError::ModelFailure(format!(
                "Expected {} features, got {}",
                self.n_features,
                row.len()
            )));
        }

        let sum: f64 = self.trees.iter().map(|tree| tree.traverse(row)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct TreeBuilder<'a> {
    config: &'a ForestConfig,
    rows: &'a [Vec<f64>],
    targets: &'a [f64],
    importances: &'a mut [f64],
}

impl TreeBuilder<'_> {
    fn build(&mut self, indices: &[usize], depth: usize, rng: &mut StdRng) -> Node {
        let labels: Vec<f64> = indices.iter().map(|&i| self.targets[i]).collect();
        let impurity = variance(&labels);

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || impurity < 1e-12
        {
            return Node::Leaf {
                value: mean(&labels),
            };
        }

        match self.find_best_split(indices, impurity, rng) {
            Some(split) => {
                if split.left.len() < self.config.min_samples_leaf
                    || split.right.len() < self.config.min_samples_leaf
                {
                    return Node::Leaf {
                        value: mean(&labels),
                    };
                }

                self.importances[split.feature] += split.gain * indices.len() as f64;

                let left = self.build(&split.left, depth + 1, rng);
                let right = self.build(&split.right, depth + 1, rng);

                Node::Split {
                    feature: split.feature,
                    threshold: split.threshold,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
            None => Node::Leaf {
                value: mean(&labels),
            },
        }
    }

    fn find_best_split(
        &self,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut StdRng,
    ) -> Option<SplitCandidate> {
        let n_features = self.rows[indices[0]].len();
        let max_features = self.config.max_features.unwrap_or(n_features).max(1);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let mut best: Option<SplitCandidate> = None;

        for &feature in &feature_indices {
            let mut values: Vec<f64> = indices.iter().map(|&i| self.rows[i][feature]).collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for pair in values.windows(2) {
                let threshold = (pair[0] + pair[1]) / 2.0;

                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| self.rows[i][feature] <= threshold);

                if left.is_empty() || right.is_empty() {
                    continue;
                }

                let left_labels: Vec<f64> = left.iter().map(|&i| self.targets[i]).collect();
                let right_labels: Vec<f64> = right.iter().map(|&i| self.targets[i]).collect();

                let n_left = left.len() as f64;
                let n_right = right.len() as f64;
                let weighted = (n_left * variance(&left_labels)
                    + n_right * variance(&right_labels))
                    / (n_left + n_right);
                let gain = parent_impurity - weighted;

                if gain > best.as_ref().map_or(0.0, |b| b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        gain,
                        left,
                        right,
                    });
                }
            }
        }

        best
    }
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    gain: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}
