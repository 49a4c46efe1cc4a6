//! Record segmentation for item exports
//!
//! The export has no record delimiters. Each record starts with the item name
//! and usually ends with the name repeated (or its `Blueprint:` heading), but
//! some records omit that line entirely, so the scan also remembers a
//! provisional boundary right after the last fresh run of marker lines.

use std::ops::Range;
use tracing::{debug, trace};

const ITEM_LEVEL_MARKER: &str = "Item Level: ";
const FACTION_MARKER: &str = "Faction: ";
const BLUEPRINT_PREFIX: &str = "Blueprint: ";

/// Text removed before an export is split into lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningRules {
    /// Substrings stripped from the whole export (expansion tags)
    pub expansion_names: Vec<String>,
    /// Whole lines dropped after trimming
    pub noise_tokens: Vec<String>,
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            expansion_names: vec!["Forgotten Gods".to_string(), "Ashes of Malmouth".to_string()],
            noise_tokens: vec!["MI".to_string()],
        }
    }
}

/// Turn a raw export into trimmed, non-empty, noise-free lines
pub fn clean_lines(content: &str, rules: &CleaningRules) -> Vec<String> {
    let mut content = content.to_string();
    for name in &rules.expansion_names {
        content = content.replace(name.as_str(), "");
    }

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !rules.noise_tokens.iter().any(|noise| noise == line))
        .map(str::to_string)
        .collect()
}

/// Heading line that marks the crafted duplicate of an item
pub fn blueprint_heading(name: &str) -> String {
    format!("{}{}", BLUEPRINT_PREFIX, name)
}

/// One segmented record: its name and the line range it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub lines: Range<usize>,
}

impl Block {
    /// The block's lines joined into its raw text
    pub fn raw_text(&self, lines: &[String]) -> String {
        lines[self.lines.clone()].join("\n")
    }
}

/// Fallback boundary tracking while looking for a terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryState {
    /// Last line was not a fresh marker line
    Scanning,
    /// Last line was a marker line that moved the provisional end
    MarkerSeen,
}

#[derive(Debug)]
struct BoundaryScan {
    state: BoundaryState,
    provisional_end: Option<usize>,
}

impl BoundaryScan {
    fn new() -> Self {
        Self {
            state: BoundaryState::Scanning,
            provisional_end: None,
        }
    }

    /// Feed the line at `pos`
    fn observe(&mut self, pos: usize, line: &str) {
        let fresh = self.state == BoundaryState::MarkerSeen || self.provisional_end.is_none();
        if is_marker(line) && fresh {
            self.provisional_end = Some(pos + 1);
            self.state = BoundaryState::MarkerSeen;
        } else {
            self.state = BoundaryState::Scanning;
        }
    }
}

fn is_marker(line: &str) -> bool {
    line.contains(ITEM_LEVEL_MARKER) || line.contains(FACTION_MARKER)
}

/// Find the exclusive end of the record whose name sits at `start`
pub fn find_block_end(lines: &[String], start: usize) -> usize {
    let name = lines[start].as_str();
    let blueprint = blueprint_heading(name);
    let mut scan = BoundaryScan::new();

    for (pos, line) in lines.iter().enumerate().skip(start + 1) {
        if line == name || *line == blueprint {
            trace!(name, terminator = pos, "explicit terminator");
            return pos + 1;
        }
        scan.observe(pos, line);
    }

    match scan.provisional_end {
        Some(end) => {
            trace!(name, end, "no terminator, using provisional boundary");
            end
        }
        None => lines.len(),
    }
}

/// Split cleaned lines into consecutive, non-overlapping records
pub fn segment(lines: &[String]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut start = 0;

    while start < lines.len() {
        let end = find_block_end(lines, start);
        debug!(name = %lines[start], start, end, "segmented block");
        blocks.push(Block {
            name: lines[start].clone(),
            lines: start..end,
        });
        start = end;
    }

    blocks
}
