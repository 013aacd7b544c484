// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Fatesheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Fatesheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Filtering for the add-reference picker.

use crate::model::SheetName;

/// Orders picker candidates for `query`.
///
/// An empty query keeps the offered order. Otherwise only names containing the query as a
/// case-insensitive subsequence survive, best match first; ties keep the offered order.
pub(crate) fn rank_candidates(query: &str, candidates: &[SheetName]) -> Vec<SheetName> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return candidates.to_vec();
    }

    let mut scored: Vec<(i64, usize, &SheetName)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(idx, name)| {
            let haystack = name.as_str().to_lowercase();
            fuzzy_score(&needle, &haystack).map(|score| (score, idx, name))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, name)| name.clone()).collect()
}

#[derive(Debug, Clone, Copy)]
struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let subseq = subsequence_stats(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (ratio * 1000.0).round() as i64;
    score -= subseq.span as i64;
    score -= (subseq.first as i64) / 4;
    score += (subseq.consecutive as i64) * 40;
    if subseq.start_boundary {
        score += 150;
    }
    if haystack.starts_with(needle) {
        score += 2500;
    } else if haystack.contains(needle) {
        score += 2000;
    } else {
        score += 500;
    }

    Some(score)
}

fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut needle_iter = needle.chars().peekable();
    let mut first: Option<usize> = None;
    let mut last = 0;
    let mut prev_match: Option<usize> = None;
    let mut consecutive = 0;
    let mut start_boundary = false;
    let mut prev_hay: Option<char> = None;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = needle_iter.peek() else {
            break;
        };

        if ch == want {
            needle_iter.next();
            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_hay.map_or(true, is_boundary_char);
            }
            if prev_match.is_some_and(|prev| idx == prev + 1) {
                consecutive += 1;
            }
            prev_match = Some(idx);
            last = idx;
        }

        prev_hay = Some(ch);
    }

    if needle_iter.peek().is_some() {
        return None;
    }

    let first = first?;
    Some(SubsequenceStats {
        first,
        span: last.saturating_sub(first).saturating_add(1),
        consecutive,
        start_boundary,
    })
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '_' | '\'' | '.')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::rank_candidates;
    use crate::model::SheetName;

    fn names(values: &[&str]) -> Vec<SheetName> {
        values.iter().map(|value| SheetName::from(*value)).collect()
    }

    fn ranked(query: &str, values: &[&str]) -> Vec<String> {
        rank_candidates(query, &names(values)).into_iter().map(|name| name.as_str().to_owned()).collect()
    }

    #[test]
    fn empty_query_keeps_offered_order() {
        assert_eq!(ranked("  ", &["Wall", "Bob", "Troll"]), vec!["Wall", "Bob", "Troll"]);
    }

    #[rstest]
    #[case("bob", &["Wall", "Bob", "Old Bobbin"], &["Bob", "Old Bobbin"])]
    #[case("TR", &["Troll", "Tower Rat", "Bob"], &["Troll", "Tower Rat"])]
    #[case("zz", &["Wall", "Bob"], &[])]
    fn filters_to_subsequence_matches(
        #[case] query: &str,
        #[case] offered: &[&str],
        #[case] expected: &[&str],
    ) {
        assert_eq!(ranked(query, offered), expected);
    }

    #[test]
    fn prefix_beats_scattered_match() {
        assert_eq!(ranked("ca", &["Scar", "Cave"]), vec!["Cave", "Scar"]);
    }
}
