//! Challenge content and answer checking.

/// How a challenge is presented to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    /// Pick one of a fixed set of options.
    Select(&'static [&'static str]),
    /// Free-text entry.
    Input,
}

/// Optional nudge shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    None,
    Text(&'static str),
    /// Text shown next to an icon (e.g. a phone for a call-related question).
    Icon(&'static str),
    /// Labelled pictures to compare, as `(label, image source)` pairs.
    Images(&'static [(&'static str, &'static str)]),
}

impl Hint {
    pub fn is_available(&self) -> bool {
        !matches!(self, Hint::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub id: u32,
    pub prompt: &'static str,
    pub expected_answer: &'static str,
    pub kind: ChallengeKind,
    pub hint: Hint,
}

impl Challenge {
    /// Trimmed, case-insensitive exact comparison against the expected answer.
    pub fn accepts(&self, submitted: &str) -> bool {
        normalize(submitted) == normalize(self.expected_answer)
    }
}

fn normalize(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// Ordered, fixed-length source of challenges.
pub trait ChallengeProvider {
    /// Number of challenges (and gates) in the journey.
    fn count(&self) -> usize;

    /// The challenge for `step`, or `None` past the end.
    fn challenge(&self, step: usize) -> Option<&Challenge>;

    /// Whether `submitted` answers the challenge at `step`. Out-of-range steps never match.
    fn answer_matches(&self, step: usize, submitted: &str) -> bool {
        self.challenge(step).is_some_and(|c| c.accepts(submitted))
    }
}

impl ChallengeProvider for &[Challenge] {
    fn count(&self) -> usize {
        self.len()
    }

    fn challenge(&self, step: usize) -> Option<&Challenge> {
        self.get(step)
    }
}

/// The journey's built-in challenge table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinChallenges;

impl ChallengeProvider for BuiltinChallenges {
    fn count(&self) -> usize {
        CHALLENGES.len()
    }

    fn challenge(&self, step: usize) -> Option<&Challenge> {
        CHALLENGES.get(step)
    }
}

/// Number of built-in challenges.
pub const TOTAL_STEPS: usize = 12;

pub static CHALLENGES: [Challenge; TOTAL_STEPS] = [
    Challenge {
        id: 1,
        prompt: "Which planet is known as the Red Planet?",
        expected_answer: "Mars",
        kind: ChallengeKind::Select(&["Venus", "Mars", "Jupiter", "Mercury"]),
        hint: Hint::Icon("Named after a god of war."),
    },
    Challenge {
        id: 2,
        prompt: "What is the chemical symbol for gold?",
        expected_answer: "Au",
        kind: ChallengeKind::Select(&["Ag", "Gd", "Au", "Go"]),
        hint: Hint::Text("From the Latin word aurum."),
    },
    Challenge {
        id: 3,
        prompt: "How many sides does a hexagon have?",
        expected_answer: "6",
        kind: ChallengeKind::Select(&["5", "6", "7", "8"]),
        hint: Hint::Text("Think of a honeycomb cell."),
    },
    Challenge {
        id: 4,
        prompt: "Which ocean is the largest?",
        expected_answer: "Pacific",
        kind: ChallengeKind::Select(&["Atlantic", "Indian", "Arctic", "Pacific"]),
        hint: Hint::Text("Its name means peaceful."),
    },
    Challenge {
        id: 5,
        prompt: "What is the boiling point of water at sea level in Celsius?",
        expected_answer: "100",
        kind: ChallengeKind::Select(&["90", "100", "110", "212"]),
        hint: Hint::Text("A nice round number."),
    },
    Challenge {
        id: 6,
        prompt: "Which instrument has 88 keys?",
        expected_answer: "Piano",
        kind: ChallengeKind::Select(&["Organ", "Accordion", "Piano", "Harp"]),
        hint: Hint::Text("Black and white, found in concert halls."),
    },
    Challenge {
        id: 7,
        prompt: "What gas do plants absorb from the air?",
        expected_answer: "Carbon dioxide",
        kind: ChallengeKind::Select(&["Oxygen", "Nitrogen", "Carbon dioxide", "Helium"]),
        hint: Hint::Text("We breathe it out."),
    },
    Challenge {
        id: 8,
        prompt: "Which is the smallest prime number?",
        expected_answer: "2",
        kind: ChallengeKind::Select(&["0", "1", "2", "3"]),
        hint: Hint::Text("It is also the only even one."),
    },
    Challenge {
        id: 9,
        prompt: "On which continent is the Sahara desert?",
        expected_answer: "Africa",
        kind: ChallengeKind::Select(&["Asia", "Africa", "Australia", "South America"]),
        hint: Hint::Images(&[
            ("Asia", "/maps/asia.png"),
            ("Africa", "/maps/africa.png"),
            ("Australia", "/maps/australia.png"),
            ("South America", "/maps/south-america.png"),
        ]),
    },
    Challenge {
        id: 10,
        prompt: "How many minutes are in a full day?",
        expected_answer: "1440",
        kind: ChallengeKind::Select(&["1240", "1440", "1640", "2400"]),
        hint: Hint::Text("Twenty-four times sixty."),
    },
    Challenge {
        id: 11,
        prompt: "Which star is closest to Earth?",
        expected_answer: "The Sun",
        kind: ChallengeKind::Select(&["Sirius", "Proxima Centauri", "The Sun", "Polaris"]),
        hint: Hint::Text("Look up at noon."),
    },
    Challenge {
        id: 12,
        prompt: "Type the word that ends every journey:",
        expected_answer: "home",
        kind: ChallengeKind::Input,
        hint: Hint::None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_fixed_length() {
        assert_eq!(BuiltinChallenges.count(), 12);
        assert_eq!(TOTAL_STEPS, 12);
        assert!(BuiltinChallenges.challenge(12).is_none());
    }

    #[test]
    fn select_answers_are_among_options() {
        for c in CHALLENGES.iter() {
            if let ChallengeKind::Select(options) = c.kind {
                assert!(options.contains(&c.expected_answer), "challenge {}", c.id);
            }
        }
    }

    #[test]
    fn hints_cover_every_kind() {
        let hints: Vec<Hint> = CHALLENGES.iter().map(|c| c.hint).collect();
        assert!(matches!(hints[0], Hint::Icon(_)));
        assert!(matches!(hints[1], Hint::Text(_)));
        assert_eq!(hints[11], Hint::None);
        assert!(!hints[11].is_available());
        match hints[8] {
            Hint::Images(images) => {
                assert_eq!(images.len(), 4);
                assert!(images.iter().any(|(label, _)| *label == CHALLENGES[8].expected_answer));
            }
            other => panic!("expected image hint, got {other:?}"),
        }
    }

    #[test]
    fn matching_trims_and_ignores_case() {
        let p = BuiltinChallenges;
        assert!(p.answer_matches(0, "mars"));
        assert!(p.answer_matches(0, "  MARS \n"));
        assert!(p.answer_matches(10, "the sun"));
        assert!(!p.answer_matches(0, "Mar"));
        assert!(!p.answer_matches(0, "Mars!"));
        assert!(!p.answer_matches(10, "thesun"));
    }

    #[test]
    fn out_of_range_never_matches() {
        assert!(!BuiltinChallenges.answer_matches(12, "home"));
        let empty: &[Challenge] = &[];
        assert_eq!(empty.count(), 0);
        assert!(!empty.answer_matches(0, ""));
    }

    #[test]
    fn slices_act_as_providers() {
        let subset: &[Challenge] = &CHALLENGES[..3];
        assert_eq!(subset.count(), 3);
        assert!(subset.answer_matches(2, "6"));
    }
}
