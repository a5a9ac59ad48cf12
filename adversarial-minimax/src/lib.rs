#![deny(missing_debug_implementations, missing_docs)]
//! This crate implements depth limited minimax for games with one maximizing agent and any number
//! of minimizing agents. You provide a 'scoring' function that turns a given state into anything
//! that implements the `Ord` trait, and the search picks the action for agent 0.
//!
//! We lean on the `maze-types` crate for the state traits, and in particular for
//! [maze_types::types::SimulableGame], which is used to generate the next states.

use std::sync::atomic::{AtomicUsize, Ordering};

use maze_types::AgentIndex;

pub mod paranoid;

/// Hooks the search calls while it walks the tree
///
/// Every method defaults to a no-op so implementers only override what they want to observe
pub trait SearchInstruments {
    /// Called once for every node that gets expanded, before its children are generated
    fn observe_expansion(&self, _agent: AgentIndex, _ply: usize) {}

    /// Called every time the scoring function is invoked
    fn observe_leaf(&self, _ply: usize) {}
}

#[derive(Debug, Clone, Copy, Default)]
/// Any empty struct that implements `SearchInstruments` as a no-op which can be used when you don't
/// want to observe the search
pub struct Instruments {}

impl SearchInstruments for Instruments {}

/// Counts the expansions and leaf evaluations of a search
#[derive(Debug, Default)]
pub struct LeafCounter {
    leaves: AtomicUsize,
    expansions: AtomicUsize,
}

impl LeafCounter {
    /// How many times the scoring function ran
    pub fn leaf_count(&self) -> usize {
        self.leaves.load(Ordering::Relaxed)
    }

    /// How many interior nodes were expanded
    pub fn expansion_count(&self) -> usize {
        self.expansions.load(Ordering::Relaxed)
    }
}

impl SearchInstruments for LeafCounter {
    fn observe_expansion(&self, _agent: AgentIndex, _ply: usize) {
        self.expansions.fetch_add(1, Ordering::Relaxed);
    }

    fn observe_leaf(&self, _ply: usize) {
        self.leaves.fetch_add(1, Ordering::Relaxed);
    }
}
