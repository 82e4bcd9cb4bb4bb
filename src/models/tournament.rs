//! Tournament aggregate and its chess games.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::User;

/// Read a string that the server may send as `null` for "not set yet".
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A played game. `pgn` is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    pub black: String,
    pub white: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub winner: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pgn: String,
}

/// Request body for recording a game in a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewGame {
    pub black: String,
    pub white: String,
    pub winner: String,
    pub pgn: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    WhiteWins,
    BlackWins,
    Draw,
    Undecided,
}

impl Game {
    /// Interpret `winner`: a player's username, `draw` / `1/2-1/2`, or empty.
    pub fn outcome(&self) -> GameOutcome {
        let winner = self.winner.trim();
        if winner.is_empty() {
            GameOutcome::Undecided
        } else if winner == self.white {
            GameOutcome::WhiteWins
        } else if winner == self.black {
            GameOutcome::BlackWins
        } else if winner.eq_ignore_ascii_case("draw") || winner == "1/2-1/2" {
            GameOutcome::Draw
        } else {
            GameOutcome::Undecided
        }
    }
}

/// Tournament aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: u64,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub games: Vec<Game>,
}

/// Request body for creating a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTournament {
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
}

/// A player's line in the standings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub username: String,
    pub points: f64,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
}

impl Standing {
    fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            points: 0.0,
            played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }
}

impl Tournament {
    /// Standings by points (win 1, draw ½), ties broken by username.
    /// Undecided games are not counted.
    pub fn standings(&self) -> Vec<Standing> {
        let mut table: BTreeMap<&str, Standing> = BTreeMap::new();

        for user in self.users.iter().flatten() {
            table
                .entry(user.username.as_str())
                .or_insert_with(|| Standing::new(&user.username));
        }

        for game in &self.games {
            let outcome = game.outcome();
            if outcome == GameOutcome::Undecided {
                continue;
            }
            for (player, won, lost) in [
                (
                    game.white.as_str(),
                    outcome == GameOutcome::WhiteWins,
                    outcome == GameOutcome::BlackWins,
                ),
                (
                    game.black.as_str(),
                    outcome == GameOutcome::BlackWins,
                    outcome == GameOutcome::WhiteWins,
                ),
            ] {
                let line = table
                    .entry(player)
                    .or_insert_with(|| Standing::new(player));
                line.played += 1;
                if won {
                    line.wins += 1;
                    line.points += 1.0;
                } else if lost {
                    line.losses += 1;
                } else {
                    line.draws += 1;
                    line.points += 0.5;
                }
            }
        }

        let mut standings: Vec<Standing> = table.into_values().collect();
        // BTreeMap already yields usernames in order; the sort is stable.
        standings.sort_by(|a, b| b.points.total_cmp(&a.points));
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(id: u64, white: &str, black: &str, winner: &str) -> Game {
        Game {
            id,
            white: white.to_string(),
            black: black.to_string(),
            winner: winner.to_string(),
            pgn: "1. e4 e5".to_string(),
        }
    }

    #[test]
    fn test_outcome() {
        assert_eq!(game(1, "a", "b", "a").outcome(), GameOutcome::WhiteWins);
        assert_eq!(game(1, "a", "b", "b").outcome(), GameOutcome::BlackWins);
        assert_eq!(game(1, "a", "b", "Draw").outcome(), GameOutcome::Draw);
        assert_eq!(game(1, "a", "b", "1/2-1/2").outcome(), GameOutcome::Draw);
        assert_eq!(game(1, "a", "b", "").outcome(), GameOutcome::Undecided);
        assert_eq!(game(1, "a", "b", "c").outcome(), GameOutcome::Undecided);
    }

    #[test]
    fn test_undecided_game_with_null_fields() {
        let game: Game = serde_json::from_str(
            r#"{"id":1,"white":"a","black":"b","winner":null,"pgn":null}"#,
        )
        .unwrap();
        assert_eq!(game.winner, "");
        assert_eq!(game.pgn, "");
        assert_eq!(game.outcome(), GameOutcome::Undecided);

        let game: Game = serde_json::from_str(r#"{"id":2,"white":"a","black":"b"}"#).unwrap();
        assert_eq!(game.outcome(), GameOutcome::Undecided);
    }

    #[test]
    fn test_standings() {
        let json = r#"{
            "id": 1,
            "title": "Autumn Open",
            "date": "2022-10-01",
            "description": "Rapid",
            "users": [
                {"username":"carl","name":"C","surname":"C","email":"c@c.test"},
                {"username":"zed","name":"Z","surname":"Z","email":"z@c.test"}
            ],
            "games": [
                {"id":1,"white":"anna","black":"boris","winner":"anna","pgn":""},
                {"id":2,"white":"boris","black":"carl","winner":"draw","pgn":""},
                {"id":3,"white":"carl","black":"anna","winner":"","pgn":""}
            ]
        }"#;
        let tournament: Tournament = serde_json::from_str(json).unwrap();
        let standings = tournament.standings();

        let names: Vec<&str> = standings.iter().map(|s| s.username.as_str()).collect();
        assert_eq!(names, vec!["anna", "boris", "carl", "zed"]);
        assert_eq!(standings[0].points, 1.0);
        assert_eq!(standings[0].played, 1);
        assert_eq!(standings[1].points, 0.5);
        assert_eq!(standings[1].losses, 1);
        assert_eq!(standings[1].draws, 1);
        assert_eq!(standings[3].played, 0);
    }

    #[test]
    fn test_list_view_without_games() {
        let json =
            r#"{"id":2,"title":"Blitz","date":"2022-11-05","description":"","users_count":12}"#;
        let tournament: Tournament = serde_json::from_str(json).unwrap();
        assert_eq!(tournament.users_count, Some(12));
        assert!(tournament.games.is_empty());
        assert!(tournament.standings().is_empty());
    }
}
