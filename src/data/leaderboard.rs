//! Ranking rules shared by CTF and KotH leaderboards

/// A leaderboard row that can be ordered by a score and carries its rank
pub trait Ranked {
    fn id(&self) -> &str;
    fn username(&self) -> &str;
    /// Metric the board is ordered by, higher is better
    fn score(&self) -> u64;
    fn rank(&self) -> u32;
    fn set_rank(&mut self, rank: u32);
}

/// Sort by score descending and assign ranks `1..=N`.
///
/// The sort is stable: entries with equal scores keep their previous
/// relative order, so an incumbent stays ahead of a newcomer it ties with.
pub fn rerank<T: Ranked>(entries: &mut [T]) {
    entries.sort_by(|a, b| b.score().cmp(&a.score()));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.set_rank(index as u32 + 1);
    }
}

/// Rank of the entry with `id`, if it is on the board
pub fn rank_of<T: Ranked>(entries: &[T], id: &str) -> Option<u32> {
    entries.iter().find(|e| e.id() == id).map(|e| e.rank())
}

/// Case-insensitive username search
pub fn search<'a, T: Ranked>(entries: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|e| e.username().to_lowercase().contains(&query))
        .collect()
}

/// True when the board is sorted by score and ranks run `1..=N`
pub fn is_consistent<T: Ranked>(entries: &[T]) -> bool {
    let sorted = entries.windows(2).all(|w| w[0].score() >= w[1].score());
    let contiguous = entries
        .iter()
        .enumerate()
        .all(|(i, e)| e.rank() == i as u32 + 1);
    sorted && contiguous
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row {
        id: String,
        score: u64,
        rank: u32,
    }

    impl Ranked for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn username(&self) -> &str {
            &self.id
        }
        fn score(&self) -> u64 {
            self.score
        }
        fn rank(&self) -> u32 {
            self.rank
        }
        fn set_rank(&mut self, rank: u32) {
            self.rank = rank;
        }
    }

    fn row(id: &str, score: u64) -> Row {
        Row { id: id.to_string(), score, rank: 0 }
    }

    #[test]
    fn ties_keep_previous_order() {
        let mut rows = vec![row("a", 10), row("b", 30), row("c", 10), row("d", 30)];
        rerank(&mut rows);
        let order: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
        assert!(is_consistent(&rows));
        assert_eq!(rank_of(&rows, "c"), Some(4));
        assert_eq!(rank_of(&rows, "zzz"), None);
    }

    #[test]
    fn search_ignores_case() {
        let rows = vec![row("CyberAgent1", 1), row("RootMaster", 2)];
        let hits = search(&rows, "ROOT");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "RootMaster");
        assert_eq!(search(&rows, "  ").len(), 2);
    }
}
