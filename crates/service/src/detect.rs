//! Fuzzy species detection from free-text input.

use models::species::Species;

/// Rank the species catalog against a list of free-text values.
///
/// Every case-folded substring containment of a match word in a value
/// counts as one hit for its species. Candidates are returned ordered by
/// descending hit count; the sort is stable, so ties keep catalog order.
/// The hit count itself is not exposed. The full catalog is re-scanned on
/// every call.
pub fn rank_candidates(catalog: Vec<Species>, values: &[String]) -> Vec<Species> {
    let values: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();

    let mut scored: Vec<(Species, usize)> = Vec::new();
    for species in catalog {
        let mut hits = 0;
        for value in &values {
            for word in &species.match_words {
                if value.contains(&word.to_lowercase()) {
                    hits += 1;
                }
            }
        }

        if hits > 0 {
            scored.push((species, hits));
        }
    }

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(species, _)| species).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(name: &str, match_words: &[&str]) -> Species {
        Species {
            name: name.into(),
            display_name: name.into(),
            request_castration_status: false,
            match_words: match_words.iter().map(|w| w.to_string()).collect(),
            icon: None,
        }
    }

    fn values(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn single_hit_per_species_keeps_catalog_order() {
        let catalog = vec![species("feline", &["cat", "feline"]), species("canine", &["dog"])];
        let result = rank_candidates(catalog, &values(&["my cat is sick", "dog bite"]));

        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["feline", "canine"]);
    }

    #[test]
    fn more_hits_rank_first() {
        let catalog = vec![species("canine", &["dog"]), species("feline", &["cat", "feline"])];
        let result =
            rank_candidates(catalog, &values(&["cat scratch", "feline leukemia test", "dog"]));

        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["feline", "canine"]);
    }

    #[test]
    fn matching_is_case_insensitive_on_both_sides() {
        let catalog = vec![species("feline", &["CAT"])];
        let result = rank_candidates(catalog, &values(&["My Cat sneezes"]));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn containment_is_substring_not_whole_word() {
        let catalog = vec![species("feline", &["cat"])];
        let result = rank_candidates(catalog, &values(&["catastrophic visit"]));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn species_without_hits_are_absent() {
        let catalog = vec![species("feline", &["cat"]), species("equine", &["horse"])];
        let result = rank_candidates(catalog, &values(&["dog bite"]));
        assert!(result.is_empty());
    }

    #[test]
    fn empty_input_yields_no_candidates() {
        let catalog = vec![species("feline", &["cat"])];
        assert!(rank_candidates(catalog, &[]).is_empty());
    }
}
