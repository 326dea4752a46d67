//! Plain-text rendering of tables and the overview.

use std::fmt::Write as _;

use rosterdash_core::team_label;
use rosterdash_types::{DashboardSummary, GroupCounts, Player, RatingTier, Team};

/// Lay out rows under headers with left-aligned, padded columns.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| (*h).to_owned()).collect();
    for row in std::iter::once(&header).chain(rows) {
        let line: Vec<String> = widths
            .iter()
            .zip(row)
            .map(|(&width, cell)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

fn or_dash(text: &str) -> String {
    if text.is_empty() { String::from("-") } else { text.to_owned() }
}

/// Rating with its tier, e.g. `8.4 (Good)`.
pub fn rating(value: f64) -> String {
    let tier = match RatingTier::from_rating(value) {
        RatingTier::Excellent => "Excellent",
        RatingTier::Good => "Good",
        RatingTier::Average => "Average",
        RatingTier::BelowAverage => "Below Average",
    };
    format!("{value:.1} ({tier})")
}

/// The teams table.
pub fn teams_table(rows: &[&Team]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                or_dash(&t.name),
                or_dash(&t.sport),
                or_dash(&t.coach),
                or_dash(&t.location),
                t.founded_year.map_or_else(|| String::from("-"), |y| y.to_string()),
            ]
        })
        .collect();
    table(&["ID", "NAME", "SPORT", "COACH", "LOCATION", "FOUNDED"], &cells)
}

/// The players table, resolving team names against `teams`.
pub fn players_table(rows: &[&Player], teams: &[Team]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.full_name(),
                p.age.to_string(),
                or_dash(&p.position),
                rating(p.rating),
                team_label(teams, p.team_id).as_str().to_owned(),
                p.jersey_number.map_or_else(|| String::from("-"), |n| format!("#{n}")),
            ]
        })
        .collect();
    table(&["ID", "NAME", "AGE", "POSITION", "RATING", "TEAM", "JERSEY"], &cells)
}

fn counts(out: &mut String, title: &str, groups: &GroupCounts) {
    let _ = writeln!(out, "\n{title}");
    if groups.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for group in &groups.0 {
        let _ = writeln!(out, "  {:<20} {}", or_dash(&group.key), group.count);
    }
}

/// The dashboard overview.
pub fn overview(summary: &DashboardSummary, teams: &[Team]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Teams          {}", summary.total_teams);
    let _ = writeln!(out, "Players        {}", summary.total_players);
    let _ = writeln!(out, "Average rating {:.1}", summary.average_rating);
    let _ = writeln!(out, "Average age    {}", summary.average_age);
    let _ = writeln!(out, "Free agents    {}", summary.free_agents_count);
    let best = summary
        .highest_rating
        .map_or_else(|| summary.highest_rated_player.clone(), |r| {
            format!("{} ({r:.1})", summary.highest_rated_player)
        });
    let _ = writeln!(out, "Best player    {best}");
    if let Some(oldest) = &summary.oldest_team {
        let _ = writeln!(
            out,
            "Oldest team    {oldest} (avg founded {:.0})",
            summary.average_founded_year
        );
    }
    if let Some(placeholder) = summary.placeholder {
        let _ = writeln!(
            out,
            "Matches        {}\nTournaments    {}",
            placeholder.total_matches, placeholder.total_tournaments
        );
    }

    let _ = writeln!(out, "\nTop players");
    let top: Vec<&Player> = summary.top_players.iter().collect();
    out.push_str(&players_table(&top, teams));

    if !summary.free_agent_preview.is_empty() {
        let _ = writeln!(out, "\nFree agents");
        for player in &summary.free_agent_preview {
            let _ = writeln!(out, "  {} - {}", player.full_name(), or_dash(&player.position));
        }
    }

    counts(&mut out, "Players by position", &summary.players_by_position);
    counts(&mut out, "Teams by sport", &summary.teams_by_sport);
    counts(&mut out, "Teams by location", &summary.teams_by_location);

    let _ = writeln!(out, "\nRating distribution");
    for bucket in &summary.rating_distribution {
        let _ = writeln!(out, "  {:<20} {}", bucket.label, bucket.count);
    }
    out
}

#[cfg(test)]
mod tests {
    use rosterdash_core::SummaryBuilder;
    use rosterdash_types::{PlayerId, TeamId};

    use super::*;

    fn team() -> Team {
        Team {
            id: TeamId(1),
            name: String::from("Lakers"),
            sport: String::from("Basketball"),
            coach: String::new(),
            location: String::from("Los Angeles"),
            founded_year: Some(1947),
            created_at: None,
            updated_at: None,
        }
    }

    fn player(id: i32, team_id: Option<i32>) -> Player {
        Player {
            id: PlayerId(id),
            first_name: String::from("Ada"),
            last_name: String::from("Stone"),
            age: 24,
            position: String::from("Guard"),
            rating: 8.44,
            team_id: team_id.map(TeamId),
            jersey_number: Some(7),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn rating_shows_tier() {
        assert_eq!(rating(8.44), "8.4 (Good)");
        assert_eq!(rating(9.0), "9.0 (Excellent)");
        assert_eq!(rating(3.2), "3.2 (Below Average)");
    }

    #[test]
    fn teams_table_aligns_columns() {
        let teams = vec![team()];
        let rows: Vec<&Team> = teams.iter().collect();
        let text = teams_table(&rows);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.first().is_some_and(|l| l.starts_with("ID  NAME    SPORT")));
        assert!(lines.get(1).is_some_and(|l| l.contains("Lakers  Basketball  -")));
    }

    #[test]
    fn players_table_resolves_team_names() {
        let teams = vec![team()];
        let players = vec![player(1, Some(1)), player(2, None), player(3, Some(5))];
        let rows: Vec<&Player> = players.iter().collect();
        let text = players_table(&rows, &teams);
        assert!(text.contains("Lakers"));
        assert!(text.contains("Free Agent"));
        assert!(text.contains("Unknown"));
        assert!(text.contains("#7"));
    }

    #[test]
    fn overview_lists_every_section() {
        let teams = vec![team()];
        let summary = SummaryBuilder::default().build(&teams, &[player(1, None)]);
        let text = overview(&summary, &teams);
        assert!(text.contains("Free agents    1"));
        assert!(text.contains("Best player    Ada Stone (8.4)"));
        assert!(text.contains("Oldest team    Lakers"));
        assert!(text.contains("Excellent (9.0+)"));
        assert!(!text.contains("Matches"));
    }
}
