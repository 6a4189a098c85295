use phf::{Map, phf_map};

/// A standard 2D HP benchmark sequence and the best score known for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benchmark {
    pub sequence: &'static str,
    pub optimal_score: u32,
}

impl Benchmark {
    #[inline]
    pub fn length(&self) -> usize {
        self.sequence.len()
    }
}

static BENCHMARKS: Map<&'static str, Benchmark> = phf_map! {
    "hp20" => Benchmark { sequence: "HPHPPHHPHPPHPHHPPHPH", optimal_score: 9 },
    "hp24" => Benchmark { sequence: "HHPPHPPHPPHPPHPPHPPHPPHH", optimal_score: 9 },
    "hp25" => Benchmark { sequence: "PPHPPHHPPPPHHPPPPHHPPPPHH", optimal_score: 8 },
    "hp36" => Benchmark { sequence: "PPPHHPPHHPPPPPHHHHHHHPPHHPPPPHHPPHPP", optimal_score: 14 },
    "hp48" => Benchmark { sequence: "PPHPPHHPPHHPPPPPHHHHHHHHHHPPPPPPHHPPHHPPHPPHHHHH", optimal_score: 23 },
    "hp50" => Benchmark { sequence: "HHPHPHPHPHHHHPHPPPHPPPHPPPPHPPPHPPPHPHHHHPHPHPHPHH", optimal_score: 21 },
    "hp60" => Benchmark { sequence: "PPHHHPHHHHHHHHPPPHHHHHHHHHHPHPPPHHHHHHHHHHHHPPPPHHHHHHPHHPHP", optimal_score: 36 },
    "hp64" => Benchmark { sequence: "HHHHHHHHHHHHPHPHPPHHPPHHPPHPPHHPPHHPPHPPHHPPHHPPHPHPHHHHHHHHHHHH", optimal_score: 42 },
    "hp85" => Benchmark { sequence: "HHHHPPPPHHHHHHHHHHHHPPPPPPHHHHHHHHHHHHPPPHHHHHHHHHHHHPPPHHHHHHHHHHHHPPPHPPHHPPHHPPHPH", optimal_score: 53 },
    "hp100" => Benchmark { sequence: "PPPPPPHPHHPPPPPHHHPHHHHHPHHPPPPHHPPHHPHHHHHPHHHHHHHHHHPHHPHHHHHHHPPPPPPPPPPPHHHHHHHPPHPHHHPPPPPPHPHH", optimal_score: 48 },
};

pub fn by_name(name: &str) -> Option<(&'static str, &'static Benchmark)> {
    BENCHMARKS
        .get_entry(name.trim().to_ascii_lowercase().as_str())
        .map(|(k, v)| (*k, v))
}

pub fn by_length(length: usize) -> Option<(&'static str, &'static Benchmark)> {
    BENCHMARKS
        .entries()
        .find(|(_, b)| b.length() == length)
        .map(|(k, v)| (*k, v))
}

/// Resolves either a benchmark name (`hp20`) or a bare chain length (`20`).
pub fn lookup(query: &str) -> Option<(&'static str, &'static Benchmark)> {
    match query.trim().parse::<usize>() {
        Ok(length) => by_length(length),
        Err(_) => by_name(query),
    }
}

/// All benchmarks ordered by chain length.
pub fn all() -> Vec<(&'static str, &'static Benchmark)> {
    let mut entries: Vec<_> = BENCHMARKS.entries().map(|(k, v)| (*k, v)).collect();
    entries.sort_by_key(|(_, b)| b.length());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::sequence::Sequence;

    #[test]
    fn names_match_sequence_lengths() {
        for (name, benchmark) in all() {
            let declared: usize = name.trim_start_matches("hp").parse().unwrap();
            assert_eq!(declared, benchmark.length(), "benchmark {name}");
            assert!(benchmark.sequence.parse::<Sequence>().is_ok());
        }
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        let (name, benchmark) = by_name("HP20").unwrap();
        assert_eq!(name, "hp20");
        assert_eq!(benchmark.optimal_score, 9);
        assert!(by_name("hp21").is_none());
    }

    #[test]
    fn lookup_by_length_finds_the_matching_entry() {
        assert_eq!(by_length(36).unwrap().1.optimal_score, 14);
        assert!(by_length(37).is_none());
    }

    #[test]
    fn lookup_accepts_names_and_lengths() {
        assert_eq!(lookup(" 48 ").map(|(name, _)| name), Some("hp48"));
        assert_eq!(lookup("Hp85").map(|(name, _)| name), Some("hp85"));
        assert!(lookup("21").is_none());
        assert!(lookup("unknown").is_none());
    }

    #[test]
    fn listing_is_sorted_by_length() {
        let lengths: Vec<usize> = all().iter().map(|(_, b)| b.length()).collect();
        let mut sorted = lengths.clone();
        sorted.sort_unstable();
        assert_eq!(lengths, sorted);
        assert_eq!(lengths.len(), 10);
    }
}
