//! Newick format writing for ranked trees.

use crate::error::RankError;
use crate::model::RankTree;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Style for serializing a tree to Newick format,
/// controlling how leaf labels are represented in the output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewickStyle {
    /// Use the name at position `label` of a given list of names
    Label,
    /// Use 0-based labels as stored (0, 1, 2, ...)
    #[default]
    ZeroIndexed,
    /// Use 1-based labels (1, 2, 3, ...) (as in Nexus files)
    OneIndexed,
}

/// Writes given trees to a file in Newick format, one tree per line.
///
/// # Arguments
/// * `file` - The file to write to
/// * `trees` - Trees to write
/// * `style` - The [NewickStyle] used for leaf labels
/// * `names` - Leaf names, required for [NewickStyle::Label]
///
/// # Errors
/// Returns [RankError] of kind `IoError` if writing fails, and
/// `InvalidStructure` if a tree can't be written with the given style
/// (see [to_newick]).
///
/// # Example
/// ```no_run
/// use treerank::newick::{write_newick_file, NewickStyle};
/// use treerank::all_labelled_trees;
/// use std::fs::File;
///
/// let trees: Vec<_> = all_labelled_trees(4).collect();
/// let file = File::create("trees.nwk")?;
/// write_newick_file(file, &trees, NewickStyle::OneIndexed, None::<&[&str]>)?;
/// # Ok::<(), treerank::RankError>(())
/// ```
pub fn write_newick_file<L: AsRef<str>>(
    file: File,
    trees: &[RankTree],
    style: NewickStyle,
    names: Option<&[L]>,
) -> Result<(), RankError> {
    let mut writer = BufWriter::new(file);
    for tree in trees {
        let newick = to_newick(style, tree, names);
        if newick.is_empty() {
            return Err(RankError::invalid_structure(format!(
                "tree {tree} can't be written in style {style:?}"
            )));
        }
        writer.write_all(newick.as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Returns the Newick representation of a tree with closing semicolon.
///
/// Unlabelled leaves are written empty, e.g. `(,(,));` for a shape.
///
/// # Arguments
/// * `style` - The [NewickStyle] used to represent leaf labels in the output
/// * `tree` - The tree to convert
/// * `names` - Leaf names indexed by label, required when using
///   [NewickStyle::Label], otherwise can be `None`
///
/// # Returns
/// A Newick format string terminated with `;`. Returns an empty string if
/// [NewickStyle::Label] is used without names, or a label has no name.
///
/// # Example
/// ```
/// use treerank::newick::{to_newick, NewickStyle};
/// use treerank::RankTree;
///
/// let tree = RankTree::new(vec![RankTree::leaf(1), RankTree::leaf(0)]).unwrap();
/// let names = ["Kiwi", "Great Spotted Kiwi"];
/// assert_eq!(to_newick(NewickStyle::Label, &tree, Some(&names[..])), "(Kiwi,'Great Spotted Kiwi');");
/// assert_eq!(to_newick(NewickStyle::OneIndexed, &tree, None::<&[&str]>), "(1,2);");
/// ```
pub fn to_newick<L: AsRef<str>>(style: NewickStyle, tree: &RankTree, names: Option<&[L]>) -> String {
    // Recursive helper; false if a label has no name
    fn build_newick<L: AsRef<str>>(tree: &RankTree, newick: &mut String, style: NewickStyle, names: Option<&[L]>) -> bool {
        if tree.is_leaf() {
            let Some(label) = tree.label() else {
                return true;
            };
            match style {
                NewickStyle::Label => match names.and_then(|names| names.get(label)) {
                    Some(name) => newick.push_str(&escape_label(name.as_ref())),
                    None => return false,
                },
                NewickStyle::ZeroIndexed => newick.push_str(&label.to_string()),
                NewickStyle::OneIndexed => newick.push_str(&(label + 1).to_string()),
            }
            return true;
        }

        newick.push('(');
        for (i, child) in tree.children().iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            if !build_newick(child, newick, style, names) {
                return false;
            }
        }
        newick.push(')');
        true
    }

    if style == NewickStyle::Label && names.is_none() {
        return String::new();
    }

    // "(,)" per internal vertex and a few digits per leaf
    let mut newick = String::with_capacity(4 * tree.num_leaves() + 2);
    if !build_newick(tree, &mut newick, style, names) {
        return String::new();
    }
    newick.push(';');
    newick
}

/// Quotes a label if it contains Newick delimiters, doubling inner quotes.
pub(crate) fn escape_label(label: &str) -> String {
    if label
        .chars()
        .any(|c| matches!(c, ' ' | ',' | ';' | '\t' | '\n' | '\r' | '(' | ')' | ':' | '[' | ']' | '\''))
    {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("A"), "A");
        assert_eq!(escape_label("Little Spotted Kiwi"), "'Little Spotted Kiwi'");
        assert_eq!(escape_label("O'Brien"), "'O''Brien'");
    }
}
