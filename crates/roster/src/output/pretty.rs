//! Pretty output formatting.

use roster_core::league::{Player, Team, TeamSummary};

use crate::commands::DemoReport;

/// Format a salary as dollars with thousands separators.
pub fn format_salary(salary: u64) -> String {
    let digits = salary.to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    output.push('$');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(c);
    }
    output
}

/// Format a team for display.
pub fn format_team(team: &Team) -> String {
    format!("{}\n  Wins: {}", team.team_name, team.wins)
}

/// Format a player for display.
pub fn format_player(player: &Player) -> String {
    format!(
        "{}\n  Team: {}\n  Salary: {}",
        player.player_name,
        player.team,
        format_salary(player.salary)
    )
}

/// Format players for display.
pub fn format_players(players: &[Player]) -> String {
    if players.is_empty() {
        return "No players found.".to_string();
    }
    let mut output = format!("PLAYERS ({})\n", players.len());
    output.push_str(&"-".repeat(40));
    for player in players {
        output.push_str(&format!("\n{}", format_player(player)));
        output.push('\n');
    }
    output
}

/// Format a team summary for display.
pub fn format_summary(summary: &TeamSummary) -> String {
    format!(
        "{}\n\n{}",
        format_team(&summary.team),
        format_players(&summary.players)
    )
}

/// Format the result of a highest-salary lookup.
pub fn format_top_salary(player: &Option<Player>) -> String {
    match player {
        Some(player) => format!(
            "{} has the highest salary of {}",
            player.player_name,
            format_salary(player.salary)
        ),
        None => "No players found.".to_string(),
    }
}

/// Format the demo walkthrough.
pub fn format_demo(report: &DemoReport) -> String {
    let team = &report.team.team_name;
    let mut output = format!("The {} had {} wins in 2019\n", team, report.team.wins);

    output.push_str(&format!("The following players play for the {team}:\n"));
    for player in &report.players {
        output.push_str(&player.player_name);
        output.push('\n');
    }

    output.push_str(&format_top_salary(&report.top_salary));
    output
}
