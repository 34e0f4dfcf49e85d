use bitcoin::{Amount, Network};

/// Fixed fees paid by the funding and reveal transactions.
///
/// Fee-rate estimation is out of scope; the fees are a flat per-network
/// schedule, generous enough to clear the mempool on any recent network
/// conditions.
#[derive(Debug, Clone, Copy)]
pub struct Fees {
    pub commit_fee: Amount,
    pub reveal_fee: Amount,
}

impl Fees {
    pub fn for_network(network: Network) -> Self {
        match network {
            Network::Bitcoin => Fees {
                commit_fee: Amount::from_sat(50_000),
                reveal_fee: Amount::from_sat(50_000),
            },
            Network::Testnet | Network::Regtest | Network::Signet => Fees {
                commit_fee: Amount::from_sat(30_000),
                reveal_fee: Amount::from_sat(30_000),
            },
            _ => panic!("unknown network"),
        }
    }
}
