// crates/report-page-validator/src/sql.rs
// ============================================================================
// Module: SQL Placeholder Scan
// Description: Lexical scan for `:name` placeholders in query text.
// Purpose: Detect placeholders that no parameter declares.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The scan is lexical only; SQL is never parsed or executed. Single-quoted
//! literals, double-quoted identifiers, `--` line comments, `/* */` block
//! comments, and `::` casts are skipped so their contents never register as
//! placeholders.

/// Returns distinct placeholder names in order of first appearance.
#[must_use]
pub fn placeholders(sql: &str) -> Vec<String> {
    let chars: Vec<char> = sql.chars().collect();
    let mut names: Vec<String> = Vec::new();
    let mut index = 0;
    while let Some(&ch) = chars.get(index) {
        let next = chars.get(index + 1).copied();
        match ch {
            '\'' | '"' => index = skip_quoted(&chars, index + 1, ch),
            '-' if next == Some('-') => {
                index = chars[index ..]
                    .iter()
                    .position(|c| *c == '\n')
                    .map_or(chars.len(), |offset| index + offset + 1);
            }
            '/' if next == Some('*') => index = skip_block_comment(&chars, index + 2),
            ':' if next == Some(':') => index += 2,
            ':' if next.is_some_and(is_name_start) => {
                let start = index + 1;
                let end = chars[start ..]
                    .iter()
                    .position(|c| !is_name_char(*c))
                    .map_or(chars.len(), |offset| start + offset);
                let name: String = chars[start .. end].iter().collect();
                if !names.contains(&name) {
                    names.push(name);
                }
                index = end;
            }
            _ => index += 1,
        }
    }
    names
}

/// Skips a quoted run opened before `start`; doubled quotes are escapes.
fn skip_quoted(chars: &[char], start: usize, quote: char) -> usize {
    let mut index = start;
    while let Some(&ch) = chars.get(index) {
        if ch == quote {
            if chars.get(index + 1) == Some(&quote) {
                index += 2;
                continue;
            }
            return index + 1;
        }
        index += 1;
    }
    chars.len()
}

/// Skips to just past the closing `*/`.
fn skip_block_comment(chars: &[char], start: usize) -> usize {
    let mut index = start;
    while index + 1 < chars.len() {
        if chars[index] == '*' && chars[index + 1] == '/' {
            return index + 2;
        }
        index += 1;
    }
    chars.len()
}

/// First character of a placeholder name.
const fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

/// Subsequent placeholder characters.
const fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::placeholders;

    #[test]
    fn finds_distinct_names_in_order() {
        let sql = "SELECT * FROM t WHERE a = :region AND b > :since AND c = :region";
        assert_eq!(placeholders(sql), vec!["region".to_string(), "since".to_string()]);
    }

    #[test]
    fn skips_literals_comments_and_casts() {
        let sql = "SELECT ':fake', \"col:x\", amount::numeric -- :comment\n\
                   /* :block */ FROM t WHERE id = :id AND s = 'it''s :quoted'";
        assert_eq!(placeholders(sql), vec!["id".to_string()]);
    }

    #[test]
    fn ignores_bare_colons_and_digits() {
        assert!(placeholders("SELECT '10:30', x FROM t WHERE y = :1 OR z = : a").is_empty());
    }

    #[test]
    fn unterminated_constructs_end_the_scan() {
        assert!(placeholders("SELECT 'open :x").is_empty());
        assert!(placeholders("SELECT 1 /* :x").is_empty());
    }
}
