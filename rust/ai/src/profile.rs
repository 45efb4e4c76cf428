use holdem_engine::player::{Controller, Personality};

/// Tunable weights behind a personality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    /// Propensity to raise, 0..=1
    pub aggression: f64,
    /// Selectivity about which hands to continue with, 0..=1
    pub tightness: f64,
    /// Chance of playing a hand as if it were stronger, 0..=1
    pub bluff_frequency: f64,
}

impl Profile {
    pub fn for_personality(personality: Personality) -> Self {
        match personality {
            Personality::Tight => Self {
                aggression: 0.3,
                tightness: 0.8,
                bluff_frequency: 0.05,
            },
            Personality::Loose => Self {
                aggression: 0.6,
                tightness: 0.3,
                bluff_frequency: 0.2,
            },
            Personality::Passive => Self {
                aggression: 0.2,
                tightness: 0.5,
                bluff_frequency: 0.05,
            },
            Personality::Balanced => Self {
                aggression: 0.5,
                tightness: 0.5,
                bluff_frequency: 0.1,
            },
        }
    }

    /// Human seats asked for a decision (e.g. as a hint) play balanced.
    pub fn for_controller(controller: Controller) -> Self {
        match controller {
            Controller::Ai(personality) => Self::for_personality(personality),
            Controller::Human => Self::for_personality(Personality::Balanced),
        }
    }
}
