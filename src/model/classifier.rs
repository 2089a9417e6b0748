use std::path::Path;

use serde::Deserialize;

use super::ModelError;

/// Flattened binary decision tree, as exported at training time.
///
/// Parallel arrays indexed by node. `feature == -1` marks a leaf whose
/// `label` is the predicted class code; interior nodes route left when
/// `features[feature] <= threshold`, right otherwise, starting at node 0.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTreeModel {
    #[serde(default)]
    pub feature_names: Vec<String>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    left: Vec<i64>,
    right: Vec<i64>,
    label: Vec<i64>,
}

impl DecisionTreeModel {
    /// Load a tree artifact from disk.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ModelError::ArtifactLoad(path.display().to_string(), e.to_string()))?;
        let model: Self = serde_json::from_str(&json)
            .map_err(|e| ModelError::ArtifactParse(path.display().to_string(), e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Small fixture tree over [age, gender, bp, temp, symptom]:
    /// symptom code 0 → class 0, 1 → class 1, 2 → class 2.
    pub fn load_test() -> Self {
        Self {
            feature_names: vec![
                "age".into(),
                "gender".into(),
                "bp".into(),
                "temp".into(),
                "symptom".into(),
            ],
            feature: vec![4, -1, 4, -1, -1],
            threshold: vec![0.5, 0.0, 1.5, 0.0, 0.0],
            left: vec![1, -1, 3, -1, -1],
            right: vec![2, -1, 4, -1, -1],
            label: vec![-1, 0, -1, 1, 2],
        }
    }

    fn validate(&self) -> Result<(), ModelError> {
        let n = self.feature.len();
        if n == 0 {
            return Err(ModelError::MalformedModel("empty tree".into()));
        }
        if self.threshold.len() != n
            || self.left.len() != n
            || self.right.len() != n
            || self.label.len() != n
        {
            return Err(ModelError::MalformedModel(
                "node arrays have mismatched lengths".into(),
            ));
        }
        Ok(())
    }

    /// Walk the tree for one feature vector; returns the leaf's class code.
    pub fn predict(&self, features: &[f64]) -> Result<i64, ModelError> {
        let n = self.feature.len();
        let mut node = 0usize;

        // A well-formed tree reaches a leaf in at most n hops
        for _ in 0..n {
            let feature = self.feature[node];
            if feature < 0 {
                return Ok(self.label[node]);
            }

            let idx = feature as usize;
            let value = *features.get(idx).ok_or_else(|| {
                ModelError::MalformedModel(format!(
                    "node {node} splits on feature {idx} but input has {} fields",
                    features.len()
                ))
            })?;

            let next = if value <= self.threshold[node] {
                self.left[node]
            } else {
                self.right[node]
            };
            if next < 0 || next as usize >= n {
                return Err(ModelError::MalformedModel(format!(
                    "node {node} has dangling child {next}"
                )));
            }
            node = next as usize;
        }

        Err(ModelError::MalformedModel(
            "no leaf reached within node count".into(),
        ))
    }

    pub fn node_count(&self) -> usize {
        self.feature.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_routes_by_symptom_code() {
        let model = DecisionTreeModel::load_test();
        assert_eq!(model.predict(&[30.0, 1.0, 120.0, 98.6, 0.0]).unwrap(), 0);
        assert_eq!(model.predict(&[30.0, 1.0, 120.0, 98.6, 1.0]).unwrap(), 1);
        assert_eq!(model.predict(&[30.0, 1.0, 120.0, 98.6, 2.0]).unwrap(), 2);
    }

    #[test]
    fn short_feature_vector_is_rejected() {
        let model = DecisionTreeModel::load_test();
        let err = model.predict(&[30.0, 1.0]).unwrap_err();
        assert!(matches!(err, ModelError::MalformedModel(_)));
    }

    #[test]
    fn dangling_child_is_rejected() {
        let model = DecisionTreeModel {
            feature_names: vec![],
            feature: vec![0],
            threshold: vec![1.0],
            left: vec![5],
            right: vec![5],
            label: vec![-1],
        };
        let err = model.predict(&[0.0]).unwrap_err();
        assert!(err.to_string().contains("dangling child"));
    }

    #[test]
    fn cyclic_tree_terminates_with_error() {
        // Node 0 routes to itself; the walk must stop, not spin
        let model = DecisionTreeModel {
            feature_names: vec![],
            feature: vec![0],
            threshold: vec![1.0],
            left: vec![0],
            right: vec![0],
            label: vec![-1],
        };
        let err = model.predict(&[0.0]).unwrap_err();
        assert!(err.to_string().contains("no leaf reached"));
    }

    #[test]
    fn load_rejects_mismatched_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_model.json");
        std::fs::write(
            &path,
            r#"{"feature": [-1], "threshold": [0.0, 0.0], "left": [-1], "right": [-1], "label": [0]}"#,
        )
        .unwrap();
        let err = DecisionTreeModel::load(&path).unwrap_err();
        assert!(err.to_string().contains("mismatched lengths"));
    }

    #[test]
    fn load_reads_tree_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(
            &path,
            r#"{"feature": [4, -1, -1], "threshold": [0.5, 0.0, 0.0],
                "left": [1, -1, -1], "right": [2, -1, -1], "label": [-1, 7, 9]}"#,
        )
        .unwrap();
        let model = DecisionTreeModel::load(&path).unwrap();
        assert_eq!(model.node_count(), 3);
        assert_eq!(model.predict(&[0.0, 0.0, 0.0, 0.0, 0.0]).unwrap(), 7);
        assert_eq!(model.predict(&[0.0, 0.0, 0.0, 0.0, 1.0]).unwrap(), 9);
    }
}
