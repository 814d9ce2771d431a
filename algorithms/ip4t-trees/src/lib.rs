//!
//! # Decision tree learning
//! `ip4t-trees` provides the tree models of the IP4T dashboard: a CART decision tree for
//! classification and a bagged random forest of such trees.
//!
//! Decision Trees (DTs) are a non-parametric supervised learning method. The goal is to create a
//! model that predicts the value of a target variable by learning simple decision rules inferred
//! from the data features.
//!
//! # Current state
//!
//! * [`DecisionTree`]: single-tree fitting with Gini or entropy splits, depth limits and per-split
//!   feature subsampling
//! * [`RandomForestClassifier`]: bootstrap aggregated trees with a probability weighted vote
//! * [`TreeText`]: an indented plain-text rendering of a fitted tree
//!

mod decision_trees;

pub use decision_trees::*;

pub use ip4t::error::Result;
