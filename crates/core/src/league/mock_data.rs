//! The 2019 league used for seeding and demos.
//!
//! Pure data; no side effects.

use super::types::{Player, Team};

/// Teams and their 2019 win totals.
pub fn seed_teams() -> Vec<Team> {
    vec![
        Team::new("Phillies", 81),
        Team::new("Yankees", 103),
        Team::new("Dodgers", 106),
    ]
}

/// Players, their salaries and teams.
pub fn seed_players() -> Vec<Player> {
    vec![
        Player::new("Bryce Harper", 11_538_462, "Phillies"),
        Player::new("Rhys Hoskins", 57_500, "Phillies"),
        Player::new("J.A. Happ", 17_000_000, "Yankees"),
        Player::new("Giancarlo Stanton", 26_000_000, "Yankees"),
        Player::new("Homer Bailey", 23_000_000, "Dodgers"),
        Player::new("Justin Turner", 19_000_000, "Dodgers"),
    ]
}
