//! Open / same-sex candidate generation: bye-prioritized round pools and a
//! windowed per-court search over team pairings.

use crate::logic::scheduler::{round_plan, PairTally, COURT_SEARCH_WINDOW};
use crate::models::{Bye, GameMatch, Player, PlayerId, Round, Team};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Build one complete schedule candidate from the given pseudorandom stream.
pub(crate) fn generate_candidate(
    active: &[&Player],
    courts_count: usize,
    rng: &mut StdRng,
) -> (Vec<Round>, PairTally) {
    let ids: Vec<PlayerId> = active.iter().map(|p| p.id).collect();
    let (players_per_round, total_rounds) = round_plan(ids.len(), courts_count);
    let mut tally = PairTally::new(&ids, courts_count);
    let mut rounds = Vec::with_capacity(total_rounds);

    for round_index in 0..total_rounds {
        let mut order = ids.clone();
        order.shuffle(rng);
        // Stable sort keeps the shuffle as tiebreak. Players with the fewest
        // byes so far sit out this round; the rest take the court.
        order.sort_by_key(|&id| tally.bye_count(id));
        let sitting = order.len() - players_per_round;
        let mut byes: Vec<Bye> = order[..sitting]
            .iter()
            .map(|&player_id| Bye {
                player_id,
                round_index,
            })
            .collect();
        let mut pool: Vec<PlayerId> = order[sitting..].to_vec();

        let mut matches = Vec::new();
        for court in 0..courts_count {
            if pool.len() < 4 {
                break;
            }
            pool.shuffle(rng);
            let window = pool.len().min(COURT_SEARCH_WINDOW);
            let Some((team_a, team_b)) = best_pairing(&pool[..window], court, &tally) else {
                break;
            };
            pool.retain(|&id| !team_a.contains(id) && !team_b.contains(id));
            tally.record_match(&team_a, &team_b, court);
            matches.push(GameMatch::new(round_index, court, team_a, team_b));
        }

        // Fewer than 4 left over: they sit out too.
        byes.extend(pool.drain(..).map(|player_id| Bye {
            player_id,
            round_index,
        }));
        for bye in &byes {
            tally.record_bye(bye.player_id);
        }
        rounds.push(Round::new(round_index, matches, byes));
    }

    (rounds, tally)
}

/// Search every 4-player subset of the window and all 3 team splits for the
/// cheapest pairing under the recorded tallies. Bounded by the window size;
/// exhaustive search over the full pool would be combinatorially infeasible.
fn best_pairing(window: &[PlayerId], court: usize, tally: &PairTally) -> Option<(Team, Team)> {
    const SPLITS: [(usize, usize, usize, usize); 3] = [(0, 1, 2, 3), (0, 2, 1, 3), (0, 3, 1, 2)];

    let n = window.len();
    let mut best: Option<((Team, Team), f64)> = None;
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                for l in k + 1..n {
                    let quad = [window[i], window[j], window[k], window[l]];
                    for (a, b, c, d) in SPLITS {
                        let team_a = Team::new(quad[a], quad[b]);
                        let team_b = Team::new(quad[c], quad[d]);
                        let cost = tally.pairing_cost(&team_a, &team_b, court);
                        if best.as_ref().map_or(true, |(_, lowest)| cost < *lowest) {
                            best = Some(((team_a, team_b), cost));
                        }
                    }
                }
            }
        }
    }
    best.map(|(teams, _)| teams)
}
