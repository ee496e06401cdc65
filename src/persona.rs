use serde::Serialize;

// Declaration order is the tie-break order when interest scores are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Archetype {
    Explorer,
    CultureBuff,
    UrbanSocialite,
    LeisureSeeker,
}

impl Archetype {
    fn keywords(self) -> [&'static str; 2] {
        match self {
            Archetype::Explorer => ["adventure", "nature"],
            Archetype::CultureBuff => ["culture", "history"],
            Archetype::UrbanSocialite => ["nightlife", "shopping"],
            Archetype::LeisureSeeker => ["relaxation", "food"],
        }
    }

    fn label(self) -> &'static str {
        match self {
            Archetype::Explorer => "Explorer",
            Archetype::CultureBuff => "Culture Buff",
            Archetype::UrbanSocialite => "Urban Socialite",
            Archetype::LeisureSeeker => "Leisure Seeker",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Archetype::Explorer => {
                "You chase trails, wild landscapes, and the places guidebooks skip."
            }
            Archetype::CultureBuff => {
                "Museums, monuments, and local stories are the heart of your trips."
            }
            Archetype::UrbanSocialite => {
                "You travel for the buzz: night markets, rooftop bars, and city energy."
            }
            Archetype::LeisureSeeker => {
                "Slow mornings, good food, and time to recharge define your ideal trip."
            }
        }
    }

    fn index(self) -> u8 {
        match self {
            Archetype::Explorer => 0,
            Archetype::CultureBuff => 1,
            Archetype::UrbanSocialite => 2,
            Archetype::LeisureSeeker => 3,
        }
    }
}

const ALL_ARCHETYPES: [Archetype; 4] = [
    Archetype::Explorer,
    Archetype::CultureBuff,
    Archetype::UrbanSocialite,
    Archetype::LeisureSeeker,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetTier {
    Budget,
    Comfort,
    Luxury,
}

impl BudgetTier {
    // USD boundaries: below 1500 is Budget, 6000 and up is Luxury.
    pub fn for_amount(budget: f64) -> Self {
        if budget < 1500.0 {
            BudgetTier::Budget
        } else if budget < 6000.0 {
            BudgetTier::Comfort
        } else {
            BudgetTier::Luxury
        }
    }

    fn index(self) -> u8 {
        match self {
            BudgetTier::Budget => 0,
            BudgetTier::Comfort => 1,
            BudgetTier::Luxury => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaProfile {
    pub persona: &'static str,
    pub cluster: u8,
    pub description: &'static str,
}

// One point per interest matching an archetype keyword; the highest score
// wins, ties to the earliest archetype. The cluster id folds archetype and
// budget tier into one number (0..=11).
pub fn classify(interests: &[String], budget: f64, duration: i64) -> Result<PersonaProfile, String> {
    if interests.is_empty() {
        return Err("at least one interest is required".into());
    }
    if duration <= 0 {
        return Err("duration must be a positive number of days".into());
    }

    let mut best = ALL_ARCHETYPES[0];
    let mut best_score = 0usize;
    for archetype in ALL_ARCHETYPES {
        let score = interests
            .iter()
            .filter(|interest| {
                archetype
                    .keywords()
                    .iter()
                    .any(|kw| interest.trim().eq_ignore_ascii_case(kw))
            })
            .count();
        if score > best_score {
            best = archetype;
            best_score = score;
        }
    }

    let tier = BudgetTier::for_amount(budget);
    Ok(PersonaProfile {
        persona: best.label(),
        cluster: best.index() * 3 + tier.index(),
        description: best.description(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interests(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn outdoor_interests_make_an_explorer() {
        let profile = classify(&interests(&["Adventure", "Nature"]), 800.0, 7).unwrap();
        assert_eq!(profile.persona, "Explorer");
        assert_eq!(profile.cluster, 0); // first archetype, budget tier
        assert!(profile.description.contains("trails"));
    }

    #[test]
    fn strongest_interest_group_wins() {
        let profile =
            classify(&interests(&["Culture", "History", "Food"]), 2000.0, 10).unwrap();
        assert_eq!(profile.persona, "Culture Buff");
        assert_eq!(profile.cluster, 4); // archetype 1, comfort tier
    }

    #[test]
    fn ties_fall_to_the_earliest_archetype() {
        // One point each for Culture Buff and Leisure Seeker.
        let profile = classify(&interests(&["culture", "relaxation"]), 1000.0, 3).unwrap();
        assert_eq!(profile.persona, "Culture Buff");
    }

    #[test]
    fn matching_ignores_case_and_padding() {
        let profile = classify(&interests(&["NIGHTLIFE", " shopping "]), 7000.0, 4).unwrap();
        assert_eq!(profile.persona, "Urban Socialite");
        assert_eq!(profile.cluster, 2 * 3 + 2); // luxury tier
    }

    #[test]
    fn unrecognized_interests_still_classify() {
        let profile = classify(&interests(&["skydiving photography"]), 500.0, 2).unwrap();
        assert_eq!(profile.persona, "Explorer"); // zero scores fall to the first archetype
    }

    #[test]
    fn budget_tier_boundaries_are_left_inclusive() {
        assert_eq!(BudgetTier::for_amount(1499.99), BudgetTier::Budget);
        assert_eq!(BudgetTier::for_amount(1500.0), BudgetTier::Comfort);
        assert_eq!(BudgetTier::for_amount(5999.99), BudgetTier::Comfort);
        assert_eq!(BudgetTier::for_amount(6000.0), BudgetTier::Luxury);
    }

    #[test]
    fn invalid_input_is_rejected() {
        assert!(classify(&[], 1000.0, 5).is_err());
        assert!(classify(&interests(&["Food"]), 1000.0, 0).is_err());
        assert!(classify(&interests(&["Food"]), 1000.0, -3).is_err());
    }
}
