//! Textual record of the nodes evaluated during a search.
//!
//! Each evaluated node appends one line `(label,score,role),` where `role`
//! is `1` when the maximizing player moves at the node and `2` otherwise.
//! Scores always carry a fractional part (`-2.0`, not `-2`).

use std::fmt::Write as _;
use std::path::Path;

use super::node::NodeLabel;

#[derive(Clone, Debug, Default)]
pub struct SearchTreeDescription {
    text: String,
    nodes: usize,
}

impl SearchTreeDescription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the entry of one evaluated node.
    pub fn record(&mut self, label: &NodeLabel, score: f32, mover_is_maximising: bool) {
        let role = if mover_is_maximising { 1 } else { 2 };
        // Writing into a String cannot fail.
        let _ = writeln!(self.text, "({label},{score:?},{role}),");
        self.nodes += 1;
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of recorded nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes == 0
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.nodes = 0;
    }

    /// Write the description to `path`, replacing any previous content.
    pub fn write(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_format() {
        let mut description = SearchTreeDescription::new();
        let mut label = NodeLabel::root();
        description.record(&label, 0.5, true);
        label.push(1);
        description.record(&label, -2.0, false);

        assert_eq!(description.as_str(), "(root,0.5,1),\n(1,-2.0,2),\n");
        assert_eq!(description.len(), 2);
    }

    #[test]
    fn test_record_keeps_fraction_for_whole_scores() {
        let mut description = SearchTreeDescription::new();
        description.record(&NodeLabel::root(), 1000.0, true);
        description.record(&NodeLabel::root(), 0.0, false);

        assert_eq!(description.as_str(), "(root,1000.0,1),\n(root,0.0,2),\n");
    }

    #[test]
    fn test_clear() {
        let mut description = SearchTreeDescription::new();
        description.record(&NodeLabel::root(), 1.0, true);
        description.clear();

        assert!(description.is_empty());
        assert_eq!(description.as_str(), "");
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.txt");

        let mut description = SearchTreeDescription::new();
        description.record(&NodeLabel::root(), 3.0, false);
        description.write(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "(root,3.0,2),\n");
    }
}
