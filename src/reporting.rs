use crate::aggregate::AggregateResult;
use crate::trie::{Trie, TrieNode};
use std::path::Path;
use tracing::{debug, info};

pub const SEPARATOR: &str = "----------------------------------------";

/// Prints the totals collected during a scan.
pub fn print_summary(result: &AggregateResult) {
    info!("");
    info!("Summary:");
    info!("  Files processed: {}", result.files_processed);
    info!("  Total characters: {}", result.total_characters);
}

/// Prints the character counts of the processed files as a directory tree.
pub fn print_char_tree(result: &AggregateResult) {
    debug!("Printing character tree for {} files", result.file_stats.len());
    let mut trie = Trie::new();
    for (path, chars) in &result.file_stats {
        trie.insert(Path::new(path), *chars);
    }

    info!("Overall ({} characters)", trie.root().calculate_total_chars());
    for line in render_tree(trie.root(), "") {
        info!("{}", line);
    }
}

fn render_tree(node: &TrieNode, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let count = node.children.len();

    for (i, (name, child)) in node.children.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "┗━━" } else { "┣━━" };

        match child.char_count {
            Some(chars) if child.children.is_empty() => {
                lines.push(format!("{}{} {} ({} characters)", prefix, connector, name, chars));
            }
            _ => {
                lines.push(format!(
                    "{}{} {}/ ({} characters)",
                    prefix,
                    connector,
                    name,
                    child.calculate_total_chars()
                ));
                let child_prefix = format!("{}{}   ", prefix, if is_last { " " } else { "┃" });
                lines.extend(render_tree(child, &child_prefix));
            }
        }
    }
    lines
}
