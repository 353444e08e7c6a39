use mindi_core::model::capture::MatchOutcome;
use mindi_core::model::seat::Team;
use mindi_core::model::table::TableSize;

use super::MatchRow;
use crate::config::BenchConfig;

/// Running totals across a batch of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub matches: usize,
    pub team_a_wins: usize,
    pub team_b_wins: usize,
    pub draws: usize,
    pub tens: [usize; 2],
    pub tricks: usize,
    pub reveals: usize,
    pub virtual_ms: u64,
}

impl OutcomeTally {
    pub fn record(&mut self, row: &MatchRow) {
        self.matches += 1;
        match row.outcome {
            MatchOutcome::Winner(Team::A) => self.team_a_wins += 1,
            MatchOutcome::Winner(Team::B) => self.team_b_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
        self.tens[0] += row.tens_team_a;
        self.tens[1] += row.tens_team_b;
        self.tricks += row.tricks_played;
        if row.trump_revealed_at_trick.is_some() {
            self.reveals += 1;
        }
        self.virtual_ms += row.virtual_duration_ms;
    }

    fn mean(total: u64, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }
}

pub(super) fn render_markdown(
    config: &BenchConfig,
    table: TableSize,
    tally: &OutcomeTally,
) -> String {
    let mut out = String::new();
    out.push_str("# Match Summary\n\n");
    out.push_str(&format!("- Run: `{}`\n", config.run_id));
    out.push_str(&format!("- Table: {table} players\n"));
    out.push_str(&format!("- Root seed: {}\n", config.table.seed.unwrap_or(0)));
    out.push_str(&format!("- Matches: {}\n\n", tally.matches));

    out.push_str("| Outcome | Count |\n");
    out.push_str("|---------|-------|\n");
    out.push_str(&format!("| Team A wins | {} |\n", tally.team_a_wins));
    out.push_str(&format!("| Team B wins | {} |\n", tally.team_b_wins));
    out.push_str(&format!("| Draws | {} |\n\n", tally.draws));

    let matches = tally.matches;
    out.push_str("| Metric | Mean |\n");
    out.push_str("|--------|------|\n");
    out.push_str(&format!(
        "| Tens (Team A) | {:.2} |\n",
        OutcomeTally::mean(tally.tens[0] as u64, matches)
    ));
    out.push_str(&format!(
        "| Tens (Team B) | {:.2} |\n",
        OutcomeTally::mean(tally.tens[1] as u64, matches)
    ));
    out.push_str(&format!(
        "| Tricks played | {:.2} |\n",
        OutcomeTally::mean(tally.tricks as u64, matches)
    ));
    out.push_str(&format!(
        "| Virtual duration (ms) | {:.0} |\n",
        OutcomeTally::mean(tally.virtual_ms, matches)
    ));
    out.push_str(&format!(
        "\nTrump revealed in {} of {} matches.\n",
        tally.reveals, matches
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(outcome: MatchOutcome, tens: (usize, usize)) -> MatchRow {
        MatchRow {
            run_id: "t".to_string(),
            match_index: 0,
            table_size: 4,
            seed: 1,
            outcome,
            tens_team_a: tens.0,
            tens_team_b: tens.1,
            tricks_played: 6,
            trump: "H".to_string(),
            trump_revealed_at_trick: Some(1),
            virtual_duration_ms: 3_000,
        }
    }

    #[test]
    fn tally_counts_each_outcome() {
        let mut tally = OutcomeTally::default();
        tally.record(&row(MatchOutcome::Winner(Team::A), (3, 1)));
        tally.record(&row(MatchOutcome::Winner(Team::B), (0, 4)));
        tally.record(&row(MatchOutcome::Draw, (2, 2)));

        assert_eq!(tally.matches, 3);
        assert_eq!(tally.team_a_wins, 1);
        assert_eq!(tally.team_b_wins, 1);
        assert_eq!(tally.draws, 1);
        assert_eq!(tally.tens, [5, 7]);
        assert_eq!(tally.reveals, 3);
    }

    #[test]
    fn empty_tally_has_zero_means() {
        assert_eq!(OutcomeTally::mean(0, 0), 0.0);
        assert_eq!(OutcomeTally::mean(9, 3), 3.0);
    }
}
