//! Newick output for ranked trees.
//!
//! The compact form `(0,(1,2))` is available via `Display` of
//! [RankTree](crate::RankTree). This module adds the Newick format proper:
//! * [to_newick] - a single tree terminated by `;`, with leaf labels
//!   written according to a [NewickStyle]
//! * [write_newick_file] - many trees, one per line
//!
//! # Format
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | '(' vertex (',' vertex)+ ')'`
//! * `leaf ::= label`
//!
//! Labels with delimiters are quoted with `'`; branch lengths aren't written,
//! since ranked trees have none.

pub mod writer;

pub use self::writer::{NewickStyle, to_newick, write_newick_file};
