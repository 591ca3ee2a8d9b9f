//! Mixed-pairs candidate generation: circle-method rotation over a fixed
//! male and a single rotating ring, then greedy team-into-match pairing.

use crate::logic::scheduler::{round_plan, PairTally};
use crate::models::{Bye, GameMatch, Gender, Player, PlayerId, Round, Team};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Build one complete mixed-pairs schedule candidate.
///
/// The caller has already verified the roster: equal male/female counts,
/// both non-zero.
pub(crate) fn generate_candidate(
    active: &[&Player],
    courts_count: usize,
    rng: &mut StdRng,
) -> (Vec<Round>, PairTally) {
    let ids: Vec<PlayerId> = active.iter().map(|p| p.id).collect();
    let male_set: HashSet<PlayerId> = active
        .iter()
        .filter(|p| p.gender == Gender::Male)
        .map(|p| p.id)
        .collect();

    let mut males: Vec<PlayerId> = ids.iter().copied().filter(|id| male_set.contains(id)).collect();
    males.shuffle(rng);
    let fixed = males[0];

    // One ring of everyone except the fixed male. Rotating it one position
    // per round cycles through (n - 1) distinct alignments, so partner
    // coverage closes over a full rotation.
    let mut ring: Vec<PlayerId> = ids.iter().copied().filter(|&id| id != fixed).collect();
    ring.shuffle(rng);

    let (_, total_rounds) = round_plan(ids.len(), courts_count);
    let mut tally = PairTally::new(&ids, courts_count);
    let mut rounds = Vec::with_capacity(total_rounds);

    for round_index in 0..total_rounds {
        let mut male_order = vec![fixed];
        let mut female_order = Vec::new();
        for &id in &ring {
            if male_set.contains(&id) {
                male_order.push(id);
            } else {
                female_order.push(id);
            }
        }
        repair_partner_repeats(&male_order, &mut female_order, &tally);

        let teams: Vec<Team> = male_order
            .iter()
            .zip(female_order.iter())
            .map(|(&m, &f)| Team::new(m, f))
            .collect();

        let (matches, byes) = pair_teams(teams, round_index, courts_count, &mut tally);
        for bye in &byes {
            tally.record_bye(bye.player_id);
        }
        rounds.push(Round::new(round_index, matches, byes));

        ring.rotate_right(1);
    }

    (rounds, tally)
}

/// Swap later females forward wherever that avoids repeating a partnership
/// without making the displaced pairing worse.
fn repair_partner_repeats(male_order: &[PlayerId], female_order: &mut [PlayerId], tally: &PairTally) {
    let n = male_order.len().min(female_order.len());
    for i in 0..n {
        if tally.partner_count(male_order[i], female_order[i]) == 0 {
            continue;
        }
        for j in i + 1..n {
            let displaced = tally.partner_count(male_order[j], female_order[i]);
            if tally.partner_count(male_order[i], female_order[j]) == 0
                && displaced <= tally.partner_count(male_order[j], female_order[j])
            {
                female_order.swap(i, j);
                break;
            }
        }
    }
}

/// Greedily pair teams into matches: repeatedly take the unmatched pair with
/// the fewest cross-team opponent repeats until the courts run out or fewer
/// than two teams remain. Unmatched teams sit the round out.
fn pair_teams(
    mut available: Vec<Team>,
    round_index: usize,
    courts_count: usize,
    tally: &mut PairTally,
) -> (Vec<GameMatch>, Vec<Bye>) {
    let mut matches = Vec::new();
    for court in 0..courts_count {
        if available.len() < 2 {
            break;
        }
        let mut best = (0, 1, u32::MAX);
        for i in 0..available.len() {
            for j in i + 1..available.len() {
                let repeats = tally.cross_opponent_count(&available[i], &available[j]);
                if repeats < best.2 {
                    best = (i, j, repeats);
                }
            }
        }
        let team_b = available.remove(best.1);
        let team_a = available.remove(best.0);
        tally.record_match(&team_a, &team_b, court);
        matches.push(GameMatch::new(round_index, court, team_a, team_b));
    }

    let byes = available
        .into_iter()
        .flat_map(|team| team.players())
        .map(|player_id| Bye {
            player_id,
            round_index,
        })
        .collect();
    (matches, byes)
}
