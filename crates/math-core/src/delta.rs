//! Snapshot delta extractor.
//!
//! Given two full-page snapshots, find the newly added content. Total:
//! strategies are tried in order of structural awareness and exhausting
//! them yields an empty string, never an error.

use math_domain::DeltaResult;

/// Added content between two snapshots, with the strategy that found
/// it. Mirrors `extract_added_content` for callers that want the
/// `changed` flag.
pub fn extract_delta(prev: &str, curr: &str) -> DeltaResult {
    if prev.trim().is_empty() {
        if curr.trim().is_empty() {
            return DeltaResult::unchanged();
        }
        return DeltaResult::added(curr.to_string(), "first_snapshot");
    }
    if prev.trim() == curr.trim() {
        return DeltaResult::unchanged();
    }
    if let Some(added) = structured_block_diff(prev, curr) {
        if !added.is_empty() {
            return DeltaResult::added(added, "structured_block");
        }
    }
    let added = line_set_diff(prev, curr);
    if !added.is_empty() {
        return DeltaResult::added(added, "line_set");
    }
    let added = prefix_suffix_diff(prev, curr);
    if !added.is_empty() {
        return DeltaResult::added(added, "prefix_suffix");
    }
    let added = opcode_added(prev, curr);
    if !added.is_empty() {
        return DeltaResult::added(added, "opcode");
    }
    log::debug!("no detectable addition between snapshots");
    DeltaResult {
        changed: true,
        added_text: String::new(),
        strategy: "exhausted".to_string(),
    }
}

/// The two-argument entry point: just the added text.
pub fn extract_added_content(prev: &str, curr: &str) -> String {
    if prev.trim().is_empty() && curr.trim().is_empty() {
        return String::new();
    }
    extract_delta(prev, curr).added_text
}

/// Rows of the first `\begin{array}..\end{array}` block, split on the
/// LaTeX row separator.
fn array_rows(text: &str) -> Option<Vec<String>> {
    let start = text.find("\\begin{array}")?;
    let end = text.find("\\end{array}")?;
    if end <= start {
        return None;
    }
    let mut body = &text[start + "\\begin{array}".len()..end];
    // optional column layout right after the opening, e.g. {l}
    if let Some(rest) = body.strip_prefix('{') {
        if let Some(close) = rest.find('}') {
            body = &rest[close + 1..];
        }
    }
    let rows: Vec<String> = body
        .split("\\\\")
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect();
    Some(rows)
}

/// Set difference over array-block rows, preserving `curr` order. A
/// row extending a `prev` row contributes only the new suffix.
fn structured_block_diff(prev: &str, curr: &str) -> Option<String> {
    let prev_rows = array_rows(prev)?;
    let curr_rows = array_rows(curr)?;
    Some(new_lines(&prev_rows, &curr_rows))
}

/// Lines of `curr` absent from `prev`; a candidate containing a `prev`
/// line as a substring contributes only the remainder after it.
fn line_set_diff(prev: &str, curr: &str) -> String {
    let prev_lines: Vec<String> = non_empty_lines(prev);
    let curr_lines: Vec<String> = non_empty_lines(curr);
    new_lines(&prev_lines, &curr_lines)
}

fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn new_lines(prev_lines: &[String], curr_lines: &[String]) -> String {
    let mut added: Vec<String> = Vec::new();
    for line in curr_lines {
        if prev_lines.iter().any(|p| p == line) {
            continue;
        }
        // longest old line embedded in the candidate wins
        let best = prev_lines
            .iter()
            .filter(|p| line.contains(p.as_str()))
            .max_by_key(|p| p.len());
        match best {
            Some(p) => {
                if let Some(pos) = line.find(p.as_str()) {
                    let remainder = line[pos + p.len()..].trim();
                    if !remainder.is_empty() {
                        added.push(remainder.to_string());
                    }
                }
            }
            None => added.push(line.clone()),
        }
    }
    added.join("\n")
}

/// Middle slice left after removing the longest common prefix and
/// suffix.
fn prefix_suffix_diff(prev: &str, curr: &str) -> String {
    let p: Vec<char> = prev.chars().collect();
    let c: Vec<char> = curr.chars().collect();
    let mut start = 0;
    while start < p.len() && start < c.len() && p[start] == c[start] {
        start += 1;
    }
    let mut end = 0;
    while end < p.len() - start && end < c.len() - start && p[p.len() - 1 - end] == c[c.len() - 1 - end]
    {
        end += 1;
    }
    if start + end < c.len() {
        c[start..c.len() - end].iter().collect::<String>().trim().to_string()
    } else {
        String::new()
    }
}

/// Character-level LCS fallback: everything in `curr` outside the
/// common subsequence. Skipped for very large inputs.
fn opcode_added(prev: &str, curr: &str) -> String {
    let p: Vec<char> = prev.chars().collect();
    let c: Vec<char> = curr.chars().collect();
    if p.len().saturating_mul(c.len()) > 1_000_000 {
        log::debug!("snapshots too large for the opcode fallback");
        return String::new();
    }
    // LCS length table
    let mut dp = vec![vec![0u32; c.len() + 1]; p.len() + 1];
    for i in (0..p.len()).rev() {
        for j in (0..c.len()).rev() {
            dp[i][j] = if p[i] == c[j] {
                dp[i + 1][j + 1] + 1
            } else {
                dp[i + 1][j].max(dp[i][j + 1])
            };
        }
    }
    // walk the table, collecting curr chars outside the LCS
    let mut out = String::new();
    let (mut i, mut j) = (0, 0);
    while i < p.len() && j < c.len() {
        if p[i] == c[j] {
            i += 1;
            j += 1;
        } else if dp[i + 1][j] >= dp[i][j + 1] {
            i += 1;
        } else {
            out.push(c[j]);
            j += 1;
        }
    }
    out.push_str(&c[j..].iter().collect::<String>());
    out.trim().to_string()
}
