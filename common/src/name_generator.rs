use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Swift", "Brave", "Clever", "Mighty", "Silent", "Golden", "Wild", "Noble",
    "Hungry", "Sneaky", "Quick", "Coiled", "Bold", "Scaly", "Cunning", "Sly",
];

const NOUNS: &[&str] = &[
    "Python", "Viper", "Cobra", "Mamba", "Adder", "Boa", "Krait", "Asp",
    "Taipan", "Racer", "Garter", "Anaconda", "Sidewinder", "Rattler", "Whipsnake", "Kingsnake",
];

/// Placeholder offered in the name field before the first game.
pub fn suggest_player_name() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{} {}", adjective, noun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlayerName;

    #[test]
    fn test_suggestion_is_a_valid_player_name() {
        for _ in 0..32 {
            let suggestion = suggest_player_name();
            let (adjective, noun) = suggestion.split_once(' ').unwrap();
            assert!(ADJECTIVES.contains(&adjective));
            assert!(NOUNS.contains(&noun));
            assert!(PlayerName::parse(&suggestion).is_ok());
        }
    }
}
