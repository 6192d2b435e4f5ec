pub mod manifest_invariants;
