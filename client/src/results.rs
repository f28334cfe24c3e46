use solana_sdk::pubkey::Pubkey;
use voting_dapp::states::Candidate;

#[derive(Clone, Debug, PartialEq)]
pub struct Standing {
    pub address: Pubkey,
    pub candidate_id: u32,
    pub name: String,
    pub votes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoVotes,
    Winner(u32),
    /// Candidate ids sharing the top count, lowest id first.
    Draw(Vec<u32>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Standings {
    /// Most votes first, ties broken by lower candidate id.
    pub rows: Vec<Standing>,
    pub total: u64,
    pub outcome: Outcome,
}

impl Standings {
    /// Percentage of the counted votes, 0 when nothing was counted.
    pub fn share(&self, row: &Standing) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        row.votes as f64 * 100.0 / self.total as f64
    }
}

/// Ranks candidates by their stored counts. Nothing is cached; call again on
/// fresh accounts to get fresh standings.
pub fn tally<'a>(candidates: impl IntoIterator<Item = (&'a Pubkey, &'a Candidate)>) -> Standings {
    let mut rows: Vec<Standing> = candidates
        .into_iter()
        .map(|(address, c)| Standing {
            address: *address,
            candidate_id: c.candidate_id,
            name: c.name.clone(),
            votes: c.vote_count,
        })
        .collect();
    rows.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.candidate_id.cmp(&b.candidate_id)));

    let total = rows.iter().map(|r| r.votes).sum();
    let top = rows.first().map_or(0, |r| r.votes);
    let outcome = if top == 0 {
        Outcome::NoVotes
    } else {
        let leaders: Vec<u32> = rows
            .iter()
            .take_while(|r| r.votes == top)
            .map(|r| r.candidate_id)
            .collect();
        match leaders.as_slice() {
            [single] => Outcome::Winner(*single),
            _ => Outcome::Draw(leaders),
        }
    };

    Standings {
        rows,
        total,
        outcome,
    }
}
