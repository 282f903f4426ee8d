//! Portable JSON export of a scikit-learn style binary classifier.
//!
//! Three model families are supported: logistic regression, a single
//! decision tree, and a random forest. Trees use scikit-learn's flat
//! array layout (`children_left`, `children_right`, `feature`,
//! `threshold`, `value`), so an exporter can dump `tree_` attributes
//! directly. Everything is validated once at load; inference itself
//! cannot index out of bounds or loop.

use serde::Deserialize;

use super::{Classifier, ClassifierError, FEATURE_COUNT, FEATURE_NAMES};

/// Only artifact layout version understood by this loader.
pub const FORMAT_VERSION: u32 = 1;

/// Sentinel used by scikit-learn for "no child".
const TREE_LEAF: i64 = -1;

// ═══════════════════════════════════════════════════════════
// On-disk layout
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default)]
    pub name: Option<String>,
    pub feature_names: Vec<String>,
    pub model: ModelSpec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSpec {
    LogisticRegression { coefficients: Vec<f64>, intercept: f64 },
    DecisionTree { tree: TreeSpec },
    RandomForest { trees: Vec<TreeSpec> },
}

#[derive(Debug, Deserialize)]
pub struct TreeSpec {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    /// Per-node class weights `[n_no_diabetes, n_diabetes]`.
    pub value: Vec<[f64; 2]>,
}

// ═══════════════════════════════════════════════════════════
// Validated models
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        probabilities: [f64; 2],
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_spec(spec: TreeSpec, tree_index: usize) -> Result<Self, ClassifierError> {
        let invalid = |msg: String| ClassifierError::InvalidArtifact(format!("tree {tree_index}: {msg}"));

        let n = spec.children_left.len();
        if n == 0 {
            return Err(invalid("tree has no nodes".into()));
        }
        if spec.children_right.len() != n
            || spec.feature.len() != n
            || spec.threshold.len() != n
            || spec.value.len() != n
        {
            return Err(invalid("node arrays have different lengths".into()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (spec.children_left[i], spec.children_right[i]);

            if left == TREE_LEAF || right == TREE_LEAF {
                if left != right {
                    return Err(invalid(format!("node {i} has exactly one child")));
                }
                let [w0, w1] = spec.value[i];
                if !(w0.is_finite() && w1.is_finite()) || w0 < 0.0 || w1 < 0.0 || w0 + w1 <= 0.0 {
                    return Err(invalid(format!("leaf {i} has invalid class weights")));
                }
                let total = w0 + w1;
                nodes.push(Node::Leaf {
                    probabilities: [w0 / total, w1 / total],
                });
                continue;
            }

            // Children always come after their parent, which rules out cycles.
            let child = |c: i64| -> Result<usize, ClassifierError> {
                usize::try_from(c)
                    .ok()
                    .filter(|&c| c > i && c < n)
                    .ok_or_else(|| invalid(format!("node {i} has out-of-order child {c}")))
            };
            let feature = usize::try_from(spec.feature[i])
                .ok()
                .filter(|&f| f < FEATURE_COUNT)
                .ok_or_else(|| {
                    invalid(format!("node {i} splits on unknown feature {}", spec.feature[i]))
                })?;
            let threshold = spec.threshold[i];
            if !threshold.is_finite() {
                return Err(invalid(format!("node {i} has non-finite threshold")));
            }

            nodes.push(Node::Split {
                feature,
                threshold,
                left: child(left)?,
                right: child(right)?,
            });
        }

        Ok(Self { nodes })
    }

    fn predict_probability(&self, features: &[f64; FEATURE_COUNT]) -> [f64; 2] {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { probabilities } => return *probabilities,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Model {
    Logistic {
        coefficients: [f64; FEATURE_COUNT],
        intercept: f64,
    },
    Tree(Tree),
    Forest(Vec<Tree>),
}

/// Classifier backed by a validated JSON artifact. Immutable after load.
#[derive(Debug, Clone)]
pub struct JsonClassifier {
    name: Option<String>,
    model: Model,
}

impl JsonClassifier {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ClassifierError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)
            .map_err(|e| ClassifierError::InvalidArtifact(e.to_string()))?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ClassifierError> {
        if artifact.format_version != FORMAT_VERSION {
            return Err(ClassifierError::UnsupportedFormat(format!(
                "artifact format_version {} (expected {FORMAT_VERSION})",
                artifact.format_version
            )));
        }

        if artifact.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ClassifierError::InvalidArtifact(format!(
                "feature_names must be {FEATURE_NAMES:?}, got {:?}",
                artifact.feature_names
            )));
        }

        let model = match artifact.model {
            ModelSpec::LogisticRegression {
                coefficients,
                intercept,
            } => {
                let coefficients: [f64; FEATURE_COUNT] =
                    coefficients.try_into().map_err(|c: Vec<f64>| {
                        ClassifierError::InvalidArtifact(format!(
                            "expected {FEATURE_COUNT} coefficients, got {}",
                            c.len()
                        ))
                    })?;
                if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
                    return Err(ClassifierError::InvalidArtifact(
                        "logistic regression weights must be finite".into(),
                    ));
                }
                Model::Logistic {
                    coefficients,
                    intercept,
                }
            }
            ModelSpec::DecisionTree { tree } => Model::Tree(Tree::from_spec(tree, 0)?),
            ModelSpec::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(ClassifierError::InvalidArtifact(
                        "random forest has no trees".into(),
                    ));
                }
                let trees = trees
                    .into_iter()
                    .enumerate()
                    .map(|(i, spec)| Tree::from_spec(spec, i))
                    .collect::<Result<Vec<_>, _>>()?;
                Model::Forest(trees)
            }
        };

        Ok(Self {
            name: artifact.name,
            model,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Classifier for JsonClassifier {
    fn predict_probability(
        &self,
        features: &[f64; FEATURE_COUNT],
    ) -> Result<[f64; 2], ClassifierError> {
        let p = match &self.model {
            Model::Logistic {
                coefficients,
                intercept,
            } => {
                let z = intercept
                    + coefficients
                        .iter()
                        .zip(features)
                        .map(|(w, x)| w * x)
                        .sum::<f64>();
                let p1 = sigmoid(z);
                [1.0 - p1, p1]
            }
            Model::Tree(tree) => tree.predict_probability(features),
            Model::Forest(trees) => {
                let mut sum = [0.0, 0.0];
                for tree in trees {
                    let [p0, p1] = tree.predict_probability(features);
                    sum[0] += p0;
                    sum[1] += p1;
                }
                let n = trees.len() as f64;
                [sum[0] / n, sum[1] / n]
            }
        };

        if !(p[0].is_finite() && p[1].is_finite()) {
            return Err(ClassifierError::Inference(
                "model produced non-finite probabilities".into(),
            ));
        }
        Ok(p)
    }

    fn kind(&self) -> String {
        match &self.model {
            Model::Logistic { .. } => "logistic_regression".into(),
            Model::Tree(_) => "decision_tree".into(),
            Model::Forest(trees) => format!("random_forest ({} trees)", trees.len()),
        }
    }
}

/// Logistic function, stable for large |z|.
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
